use validator::Validate;

use crate::{
    entities::comment::{Comment, CommentDraft, CreateCommentRequest},
    errors::AppError,
    repositories::resource::{CreateResource, Scope},
    use_cases::resource_view::{Draft, LoadOutcome, ResourceKind, ResourceView, ViewSnapshot},
};

pub type CommentsView<R> = ResourceView<R, CommentDraft>;

impl Draft for CommentDraft {
    type Payload = CreateCommentRequest;

    fn to_payload(&self, scope: &Scope) -> Result<CreateCommentRequest, AppError> {
        self.validate()?;

        let inspection_id = scope.owner_id().ok_or_else(|| {
            AppError::invalid_field("inspection_id", "Select an inspection before commenting")
        })?;

        Ok(self.clone().into_request(inspection_id))
    }

    /// Clears the comment body; the author stays for the next comment.
    fn reset(&mut self) {
        self.comment_text.clear();
    }
}

/// Comment thread of one inspection, with the add-comment box pre-filled
/// with `author`.
pub fn comments_view<R>(repo: R, inspection_id: &str, author: &str) -> CommentsView<R>
where
    R: CreateResource<Record = Comment, Payload = CreateCommentRequest>,
{
    ResourceView::with_draft(repo, ResourceKind::Comments, CommentDraft::for_author(author))
        .scoped(Scope::owner(inspection_id))
}

/// Confirmation for a created comment. The comment exists even when the
/// refresh afterwards failed, so a confirmation is always produced.
pub fn added_message(reload: &LoadOutcome, snapshot: &ViewSnapshot<Comment>) -> String {
    match reload {
        LoadOutcome::Loaded(_) => format!("Comment added ({} total)", snapshot.total()),
        _ => "Comment added".to_string(),
    }
}

/// Whether the "Add Comment" button should be enabled.
pub fn can_submit(draft: &CommentDraft, is_submitting: bool) -> bool {
    !is_submitting && !draft.comment_text.trim().is_empty()
}
