pub mod autosuggest;
pub mod get_alternatives;
pub mod get_related_products;
pub mod get_supplement_info;
pub mod parse_stack_text;
