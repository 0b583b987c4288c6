pub mod auth;
pub mod comment;
pub mod http_repo;
pub mod inspection;
pub mod maintenance_record;
pub mod resource;
pub mod thermal_image;
pub mod transformer;
