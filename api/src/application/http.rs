pub mod health;
pub mod server;
pub mod stack_check;
pub mod supplement;
