pub mod db;
pub mod health;
pub mod interaction;
pub mod llm;
pub mod reference;
pub mod suppai;
pub mod supplement_facts;
