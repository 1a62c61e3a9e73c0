pub mod common;
pub mod health;
pub mod interaction;
pub mod stack_check;
pub mod supplement;
pub mod supplement_facts;
