//! Generic view model over a remote collection.
//!
//! A [`ResourceView`] owns the transient client copy of one collection
//! (comments of an inspection, the inspection list, ...) and runs two
//! independent state machines over it:
//!
//! * load: `Idle -> Loading -> (Loaded | Failed)`
//! * submit: `Idle -> Submitting -> (reload | Failed)`
//!
//! A failed load keeps the previously loaded items so stale data stays on
//! screen under the error banner. Overlapping loads resolve to the most
//! recently *issued* one: each load takes a ticket and a response whose
//! ticket has been superseded is dropped. Only one submit runs at a time;
//! a second one while the first is in flight returns [`SubmitOutcome::Busy`]
//! without touching the draft.
//!
//! Load and submit errors live in separate slots, so rejecting a draft never
//! hides the banner of a failed fetch.

use std::fmt;

use derive_more::Display;
use parking_lot::Mutex;

use crate::{
    constants::*,
    entities::page::PageInfo,
    errors::{AppError, FieldError},
    repositories::resource::{CreateResource, ResourceRepository, Scope},
};

/// Which collection a view shows; selects fallback and empty-state texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ResourceKind {
    #[display("Comments")]
    Comments,
    #[display("Inspections")]
    Inspections,
    #[display("Transformers")]
    Transformers,
    #[display("Thermal images")]
    ThermalImages,
    #[display("Maintenance records")]
    MaintenanceRecords,
}

impl ResourceKind {
    pub fn load_failed_message(&self) -> &'static str {
        match self {
            ResourceKind::Comments => COMMENTS_LOAD_FAILED,
            ResourceKind::Inspections => INSPECTIONS_LOAD_FAILED,
            ResourceKind::Transformers => TRANSFORMERS_LOAD_FAILED,
            ResourceKind::ThermalImages => IMAGES_LOAD_FAILED,
            ResourceKind::MaintenanceRecords => MAINTENANCE_LOAD_FAILED,
        }
    }

    pub fn submit_failed_message(&self) -> &'static str {
        match self {
            ResourceKind::Comments => COMMENT_ADD_FAILED,
            ResourceKind::Inspections => INSPECTION_CREATE_FAILED,
            ResourceKind::Transformers => TRANSFORMER_CREATE_FAILED,
            ResourceKind::ThermalImages => IMAGE_UPLOAD_FAILED,
            ResourceKind::MaintenanceRecords => MAINTENANCE_CREATE_FAILED,
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            ResourceKind::Comments => COMMENTS_EMPTY,
            ResourceKind::Inspections => INSPECTIONS_EMPTY,
            ResourceKind::Transformers => TRANSFORMERS_EMPTY,
            ResourceKind::ThermalImages => IMAGES_EMPTY,
            ResourceKind::MaintenanceRecords => MAINTENANCE_EMPTY,
        }
    }
}

/// Error surfaced by a view, local to that view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    /// Client-side check failed; shown next to the offending input.
    Validation(Vec<FieldError>),
    /// Fetching the collection failed; shown as a dismissable banner.
    Load(String),
    /// Creating a record failed; the draft is kept for a retry.
    Submit(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::Validation(errors) => match errors.first() {
                Some(error) => write!(f, "{}", error),
                None => write!(f, "Invalid input"),
            },
            ViewError::Load(msg) | ViewError::Submit(msg) => write!(f, "{}", msg),
        }
    }
}

impl ViewError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Validation message for one input, if that input failed.
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            ViewError::Validation(errors) => errors
                .iter()
                .find(|e| e.field == field)
                .map(|e| e.message.as_str()),
            _ => None,
        }
    }
}

/// Form state that can be turned into a create payload.
pub trait Draft: Clone + Send + Sync {
    type Payload: Send + Sync;

    /// Validates the draft and builds the payload for `scope`.
    fn to_payload(&self, scope: &Scope) -> Result<Self::Payload, AppError>;

    /// Clears the draft after a successful submit.
    fn reset(&mut self);
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(usize),
    Failed(AppError),
    /// A newer load was issued before this one resolved.
    Superseded,
    /// The scope was undefined; nothing was fetched.
    Skipped,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

#[derive(Debug)]
pub enum SubmitOutcome<T> {
    Created { record: T, reload: LoadOutcome },
    Invalid(AppError),
    Failed(AppError),
    /// Another submit was still in flight; nothing was sent.
    Busy,
}

impl<T> SubmitOutcome<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitOutcome::Busy)
    }
}

/// Point-in-time copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot<T> {
    pub kind: ResourceKind,
    pub items: Vec<T>,
    pub is_loading: bool,
    pub is_submitting: bool,
    pub load_error: Option<ViewError>,
    pub submit_error: Option<ViewError>,
    /// Position of the loaded page; `None` until a load succeeds.
    pub page: Option<PageInfo>,
}

impl<T> ViewSnapshot<T> {
    /// The most relevant error: the submit side first, then the load side.
    pub fn error(&self) -> Option<&ViewError> {
        self.submit_error.as_ref().or(self.load_error.as_ref())
    }

    /// Error to show as a banner; validation errors render inline instead.
    pub fn banner(&self) -> Option<&ViewError> {
        self.submit_error
            .as_ref()
            .filter(|e| !matches!(e, ViewError::Validation(_)))
            .or(self.load_error.as_ref())
    }

    /// Empty-state text, only when a settled, error-free load returned nothing.
    pub fn empty_message(&self) -> Option<&'static str> {
        let settled = !self.is_loading && self.banner().is_none();
        (settled && self.items.is_empty()).then(|| self.kind.empty_message())
    }

    /// Size of the whole collection, which may exceed the loaded page.
    pub fn total(&self) -> u64 {
        self.page
            .map(|page| page.total_elements)
            .unwrap_or(self.items.len() as u64)
    }

    /// True when the collection holds records outside the loaded page.
    pub fn is_partial(&self) -> bool {
        self.total() > self.items.len() as u64
    }

    pub fn heading(&self) -> String {
        format!("{} ({})", self.kind, self.total())
    }
}

struct ViewState<T> {
    items: Vec<T>,
    is_loading: bool,
    is_submitting: bool,
    load_error: Option<ViewError>,
    submit_error: Option<ViewError>,
    scope: Option<Scope>,
    page: u32,
    page_info: Option<PageInfo>,
    latest_ticket: u64,
}

pub struct ResourceView<R, D = ()>
where
    R: ResourceRepository,
{
    repo: R,
    kind: ResourceKind,
    state: Mutex<ViewState<R::Record>>,
    draft: Mutex<D>,
}

impl<R> ResourceView<R, ()>
where
    R: ResourceRepository,
{
    /// A read-only view.
    pub fn new(repo: R, kind: ResourceKind) -> Self {
        ResourceView::with_draft(repo, kind, ())
    }
}

impl<R, D> ResourceView<R, D>
where
    R: ResourceRepository,
{
    pub fn with_draft(repo: R, kind: ResourceKind, draft: D) -> Self {
        ResourceView {
            repo,
            kind,
            state: Mutex::new(ViewState {
                items: Vec::new(),
                is_loading: false,
                is_submitting: false,
                load_error: None,
                submit_error: None,
                scope: None,
                page: FIRST_PAGE,
                page_info: None,
                latest_ticket: 0,
            }),
            draft: Mutex::new(draft),
        }
    }

    /// Binds the view to a scope without fetching.
    pub fn scoped(self, scope: Scope) -> Self {
        self.state.lock().scope = Some(scope);
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn items(&self) -> Vec<R::Record> {
        self.state.lock().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn is_submitting(&self) -> bool {
        self.state.lock().is_submitting
    }

    /// The submit-side error if there is one, else the load-side error.
    pub fn error(&self) -> Option<ViewError> {
        let state = self.state.lock();
        state.submit_error.clone().or_else(|| state.load_error.clone())
    }

    pub fn load_error(&self) -> Option<ViewError> {
        self.state.lock().load_error.clone()
    }

    pub fn submit_error(&self) -> Option<ViewError> {
        self.state.lock().submit_error.clone()
    }

    pub fn scope(&self) -> Option<Scope> {
        self.state.lock().scope.clone()
    }

    /// Page the next load fetches.
    pub fn page(&self) -> u32 {
        self.state.lock().page
    }

    pub fn page_info(&self) -> Option<PageInfo> {
        self.state.lock().page_info
    }

    pub fn snapshot(&self) -> ViewSnapshot<R::Record> {
        let state = self.state.lock();
        ViewSnapshot {
            kind: self.kind,
            items: state.items.clone(),
            is_loading: state.is_loading,
            is_submitting: state.is_submitting,
            load_error: state.load_error.clone(),
            submit_error: state.submit_error.clone(),
            page: state.page_info,
        }
    }

    pub fn dismiss_error(&self) {
        let mut state = self.state.lock();
        state.load_error = None;
        state.submit_error = None;
    }

    /// Items matching `predicate`, in server order.
    pub fn filtered<F>(&self, predicate: F) -> Vec<R::Record>
    where
        F: Fn(&R::Record) -> bool,
    {
        self.state
            .lock()
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Fetches the current page of `scope` and replaces the items.
    ///
    /// Switching to a different scope starts again from the first page.
    pub async fn load(&self, scope: &Scope) -> LoadOutcome {
        if !scope.is_defined() {
            tracing::debug!(kind = %self.kind, "Skipping load: scope not set");
            return LoadOutcome::Skipped;
        }

        let (ticket, page) = {
            let mut state = self.state.lock();
            if state.scope.as_ref() != Some(scope) {
                state.page = FIRST_PAGE;
                state.page_info = None;
            }
            state.latest_ticket += 1;
            state.scope = Some(scope.clone());
            state.is_loading = true;
            state.load_error = None;
            state.submit_error = None;
            (state.latest_ticket, state.page)
        };

        tracing::debug!(kind = %self.kind, %scope, page, ticket, "Loading");
        let result = self.repo.list_page(scope, page).await;

        let mut state = self.state.lock();
        if ticket != state.latest_ticket {
            tracing::debug!(kind = %self.kind, ticket, latest = state.latest_ticket, "Dropping superseded response");
            return LoadOutcome::Superseded;
        }
        state.is_loading = false;

        match result {
            Ok(page_of) => {
                let info = page_of.info(page);
                let count = page_of.content.len();
                state.items = page_of.into_content();
                state.page_info = Some(info);
                tracing::debug!(kind = %self.kind, count, total = info.total_elements, "Loaded");
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                let message = e
                    .user_message()
                    .unwrap_or_else(|| self.kind.load_failed_message().to_string());
                tracing::warn!(kind = %self.kind, "Load failed: {}", e);
                state.load_error = Some(ViewError::Load(message));
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Loads the active scope again; skipped when no scope was ever set.
    pub async fn reload(&self) -> LoadOutcome {
        match self.scope() {
            Some(scope) => self.load(&scope).await,
            None => LoadOutcome::Skipped,
        }
    }

    /// Moves to page `page` of the active scope and loads it.
    pub async fn go_to_page(&self, page: u32) -> LoadOutcome {
        self.state.lock().page = page;
        self.reload().await
    }

    /// Loads the following page; skipped on the last page.
    pub async fn next_page(&self) -> LoadOutcome {
        let next = {
            let state = self.state.lock();
            match state.page_info {
                Some(info) if info.has_next() => info.number + 1,
                _ => return LoadOutcome::Skipped,
            }
        };
        self.go_to_page(next).await
    }

    /// Loads the preceding page; skipped on the first page.
    pub async fn previous_page(&self) -> LoadOutcome {
        let previous = {
            let state = self.state.lock();
            match state.page_info {
                Some(info) if info.has_previous() => info.number - 1,
                _ => return LoadOutcome::Skipped,
            }
        };
        self.go_to_page(previous).await
    }
}

impl<R, D> ResourceView<R, D>
where
    R: CreateResource,
    D: Draft<Payload = R::Payload>,
{
    pub fn draft(&self) -> D {
        self.draft.lock().clone()
    }

    pub fn edit_draft<F>(&self, edit: F)
    where
        F: FnOnce(&mut D),
    {
        let mut draft = self.draft.lock();
        edit(&mut *draft);
    }

    /// Replaces the input buffer with `draft` and submits it.
    ///
    /// While another submit is in flight the buffer is left alone and
    /// [`SubmitOutcome::Busy`] is returned.
    pub async fn submit(&self, draft: D) -> SubmitOutcome<R::Record> {
        self.submit_with(Some(draft)).await
    }

    /// Validates and creates the buffered draft, then reloads the scope.
    ///
    /// Invalid input never reaches the repository. On failure the draft is
    /// left as typed so the user can retry.
    pub async fn submit_draft(&self) -> SubmitOutcome<R::Record> {
        self.submit_with(None).await
    }

    async fn submit_with(&self, replacement: Option<D>) -> SubmitOutcome<R::Record> {
        // lock order: state, then draft
        let (scope, payload) = {
            let mut state = self.state.lock();
            if state.is_submitting {
                tracing::debug!(kind = %self.kind, "Submit ignored: another submit is in flight");
                return SubmitOutcome::Busy;
            }

            let scope = state.scope.clone().unwrap_or(Scope::All);
            let mut draft = self.draft.lock();
            if let Some(replacement) = replacement {
                *draft = replacement;
            }

            match draft.to_payload(&scope) {
                Ok(payload) => {
                    state.is_submitting = true;
                    state.submit_error = None;
                    (scope, payload)
                }
                Err(e) => {
                    let fields = match &e {
                        AppError::ValidationError(fields) => fields.clone(),
                        other => vec![FieldError {
                            field: String::new(),
                            message: other.to_string(),
                        }],
                    };
                    tracing::debug!(kind = %self.kind, "Rejected draft: {}", e);
                    state.submit_error = Some(ViewError::Validation(fields));
                    return SubmitOutcome::Invalid(e);
                }
            }
        };

        tracing::debug!(kind = %self.kind, %scope, "Submitting");
        match self.repo.create(&payload).await {
            Ok(record) => {
                self.draft.lock().reset();
                let reload = self.load(&scope).await;
                self.state.lock().is_submitting = false;
                SubmitOutcome::Created { record, reload }
            }
            Err(e) => {
                let message = e
                    .user_message()
                    .unwrap_or_else(|| self.kind.submit_failed_message().to_string());
                tracing::warn!(kind = %self.kind, "Submit failed: {}", e);
                let mut state = self.state.lock();
                state.is_submitting = false;
                state.submit_error = Some(ViewError::Submit(message));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
