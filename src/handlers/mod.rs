pub mod applications;
pub mod auth;
pub mod cities;
pub mod entities;
pub mod evaluations;
pub mod evaluators;
pub mod groups;
pub mod notices;
pub mod profiles;
