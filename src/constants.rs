// ───── Fallback banner texts ─────────────────────────────────────────
pub const COMMENTS_LOAD_FAILED: &str = "Failed to load comments";
pub const COMMENT_ADD_FAILED: &str = "Failed to add comment";
pub const COMMENTS_EMPTY: &str = "No comments yet. Be the first to add a comment!";

pub const INSPECTIONS_LOAD_FAILED: &str = "Failed to load inspections";
pub const INSPECTION_CREATE_FAILED: &str = "Failed to create inspection";
pub const INSPECTIONS_EMPTY: &str = "No inspections found";

pub const TRANSFORMERS_LOAD_FAILED: &str = "Failed to load transformers";
pub const TRANSFORMER_CREATE_FAILED: &str = "Failed to create transformer";
pub const TRANSFORMERS_EMPTY: &str = "No transformers found";

pub const IMAGES_LOAD_FAILED: &str = "Failed to load thermal images";
pub const IMAGE_UPLOAD_FAILED: &str = "Failed to upload thermal image";
pub const IMAGES_EMPTY: &str = "No thermal images uploaded yet";

pub const MAINTENANCE_LOAD_FAILED: &str = "Failed to load maintenance record";
pub const MAINTENANCE_CREATE_FAILED: &str = "Failed to create maintenance record";
pub const MAINTENANCE_SAVE_FAILED: &str = "Failed to save maintenance record";
pub const MAINTENANCE_EMPTY: &str = "No maintenance record found";

pub const NOTES_SAVE_FAILED: &str = "Failed to save notes";
pub const NOTES_EMPTY: &str = "No notes added yet. Click \"Edit\" to add inspection notes.";

// ───── Paging ───────────────────────────────────────────────────────
pub const FIRST_PAGE: u32 = 0;
pub const IMAGES_PAGE_SIZE: u32 = 200;
