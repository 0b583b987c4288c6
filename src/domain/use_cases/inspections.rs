use validator::Validate;

use crate::{
    entities::inspection::{Inspection, InspectionDraft, InspectionStatus, NewInspection},
    errors::AppError,
    repositories::resource::{CreateResource, Scope},
    use_cases::resource_view::{Draft, ResourceKind, ResourceView},
};

pub type InspectionsView<R> = ResourceView<R, InspectionDraft>;

impl Draft for InspectionDraft {
    type Payload = NewInspection;

    /// A transformer-scoped view fills in the transformer when the form
    /// left it empty.
    fn to_payload(&self, scope: &Scope) -> Result<NewInspection, AppError> {
        let mut draft = self.clone();
        if draft.transformer_id.trim().is_empty() {
            if let Some(transformer_id) = scope.owner_id() {
                draft.transformer_id = transformer_id.to_string();
            }
        }

        draft.validate()?;

        draft.to_new_inspection().ok_or_else(|| {
            AppError::invalid_field("inspected_date", "Please select an inspection date")
        })
    }

    fn reset(&mut self) {
        *self = InspectionDraft::default();
    }
}

/// All inspections, or only those of one transformer.
pub fn inspections_view<R>(repo: R, transformer_id: Option<&str>) -> InspectionsView<R>
where
    R: CreateResource<Record = Inspection, Payload = NewInspection>,
{
    let scope = match transformer_id {
        Some(id) => Scope::owner(id),
        None => Scope::All,
    };
    ResourceView::with_draft(repo, ResourceKind::Inspections, InspectionDraft::default())
        .scoped(scope)
}

/// Client-side filter over an already fetched inspection list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionFilter {
    pub search: String,
    pub status: Option<InspectionStatus>,
    pub transformer_id: Option<String>,
}

impl InspectionFilter {
    pub fn search(term: impl Into<String>) -> Self {
        InspectionFilter {
            search: term.into(),
            ..Default::default()
        }
    }

    pub fn matches(&self, inspection: &Inspection) -> bool {
        let term = self.search.trim().to_lowercase();
        let text_match = term.is_empty()
            || inspection.inspection_no.to_lowercase().contains(&term)
            || inspection.inspected_by.to_lowercase().contains(&term);

        let status_match = self.status.as_ref().is_none_or(|s| &inspection.status == s);

        let transformer_match = self
            .transformer_id
            .as_deref()
            .is_none_or(|id| inspection.transformer_id == id);

        text_match && status_match && transformer_match
    }

    pub fn apply<'a>(&self, inspections: &'a [Inspection]) -> Vec<&'a Inspection> {
        inspections.iter().filter(|i| self.matches(i)).collect()
    }
}
