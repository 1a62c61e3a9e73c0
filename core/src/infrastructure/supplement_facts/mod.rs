pub mod mappers;
pub mod repositories;

pub use repositories::supplement_fact_repository::PostgresSupplementFactRepository;
