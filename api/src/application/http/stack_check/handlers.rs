pub mod check_stack;
pub mod get_interaction;
pub mod get_recent;
