mod application_repo;
mod city_repo;
mod entity_repo;
mod evaluator_repo;
mod group_repo;
mod notice_repo;
mod profile_repo;
mod user_repo;

pub use application_repo::ApplicationRepository;
pub use city_repo::CityRepository;
pub use entity_repo::EntityRepository;
pub use evaluator_repo::EvaluatorRepository;
pub use group_repo::GroupRepository;
pub use notice_repo::{CityPartition, NoticeRepository};
pub use profile_repo::ProfileRepository;
pub use user_repo::UserRepository;
