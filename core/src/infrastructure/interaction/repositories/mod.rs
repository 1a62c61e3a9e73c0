pub mod interaction_repository;
