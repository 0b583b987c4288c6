pub mod auth;
pub mod comments;
pub mod inspections;
pub mod maintenance;
pub mod notes;
pub mod resource_view;
pub mod thermal_images;
pub mod transformers;
