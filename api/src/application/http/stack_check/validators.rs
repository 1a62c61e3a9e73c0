use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const MIN_STACK_SIZE: usize = 2;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckStackValidator {
    #[validate(length(min = 2, max = 10, message = "stack must contain 2 to 10 supplements"))]
    pub stack: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InteractionQuery {
    #[validate(length(min = 1, message = "a is required"))]
    pub a: String,

    #[validate(length(min = 1, message = "b is required"))]
    pub b: String,
}
