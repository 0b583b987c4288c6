//! Edit-in-place state of an inspection's notes.

use parking_lot::Mutex;

use crate::{
    constants::{NOTES_EMPTY, NOTES_SAVE_FAILED},
    entities::inspection::Inspection,
    errors::AppError,
    repositories::inspection::InspectionRepository,
};

#[derive(Debug)]
pub enum NotesSave {
    /// The trimmed text matched the saved notes; nothing was sent.
    Unchanged,
    Saved(Inspection),
    Failed(AppError),
    /// A save was already in flight.
    Busy,
}

impl NotesSave {
    pub fn is_saved(&self) -> bool {
        matches!(self, NotesSave::Saved(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesSnapshot {
    pub saved: String,
    pub text: String,
    pub is_editing: bool,
    pub is_saving: bool,
    pub error: Option<String>,
}

impl NotesSnapshot {
    /// What the read-only view shows.
    pub fn display_text(&self) -> &str {
        if self.saved.trim().is_empty() {
            NOTES_EMPTY
        } else {
            &self.saved
        }
    }
}

pub struct NotesEditor<R>
where
    R: InspectionRepository,
{
    repo: R,
    inspection_id: String,
    state: Mutex<NotesSnapshot>,
}

impl<R> NotesEditor<R>
where
    R: InspectionRepository,
{
    pub fn new(repo: R, inspection_id: impl Into<String>, notes: Option<&str>) -> Self {
        let saved = notes.unwrap_or_default().to_string();
        NotesEditor {
            repo,
            inspection_id: inspection_id.into(),
            state: Mutex::new(NotesSnapshot {
                text: saved.clone(),
                saved,
                ..Default::default()
            }),
        }
    }

    pub fn for_inspection(repo: R, inspection: &Inspection) -> Self {
        NotesEditor::new(repo, inspection.id.clone(), inspection.notes.as_deref())
    }

    pub fn snapshot(&self) -> NotesSnapshot {
        self.state.lock().clone()
    }

    pub fn begin_edit(&self) {
        let mut state = self.state.lock();
        state.text = state.saved.clone();
        state.is_editing = true;
        state.error = None;
    }

    pub fn edit(&self, text: impl Into<String>) {
        self.state.lock().text = text.into();
    }

    /// Leaves edit mode and restores the saved notes.
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        state.text = state.saved.clone();
        state.is_editing = false;
        state.error = None;
    }

    /// Sends the trimmed text. On failure the editor stays open with the
    /// text as typed.
    pub async fn save(&self) -> NotesSave {
        let notes = {
            let mut state = self.state.lock();
            if state.is_saving {
                return NotesSave::Busy;
            }
            let notes = state.text.trim().to_string();
            if notes == state.saved.trim() {
                state.is_editing = false;
                return NotesSave::Unchanged;
            }
            state.is_saving = true;
            state.error = None;
            notes
        };

        let result = self.repo.update_inspection_notes(&self.inspection_id, &notes).await;

        let mut state = self.state.lock();
        state.is_saving = false;
        match result {
            Ok(inspection) => {
                state.saved = inspection.notes.clone().unwrap_or(notes);
                state.text = state.saved.clone();
                state.is_editing = false;
                tracing::info!(inspection_id = %self.inspection_id, "Notes saved");
                NotesSave::Saved(inspection)
            }
            Err(e) => {
                tracing::warn!(inspection_id = %self.inspection_id, "Saving notes failed: {}", e);
                state.error = Some(e.user_message().unwrap_or_else(|| NOTES_SAVE_FAILED.to_string()));
                NotesSave::Failed(e)
            }
        }
    }
}
