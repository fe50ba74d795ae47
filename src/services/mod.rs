pub mod application_service;
pub mod auth;
pub mod entity_service;
pub mod evaluator_service;
pub mod group_service;
pub mod notice_service;
pub mod profile_service;
