pub mod mappers;
pub mod repositories;

pub use repositories::interaction_repository::PostgresInteractionRepository;
