pub mod supplement_fact_repository;
