use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AutosuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplementNameQuery {
    #[validate(length(min = 1, max = 200, message = "name must be 1 to 200 characters"))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParseStackTextValidator {
    #[validate(length(max = 10000, message = "text is too long"))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_query_rejects_empty_name() {
        let query = SupplementNameQuery {
            name: String::new(),
        };
        assert!(query.validate().is_err());

        let query = SupplementNameQuery {
            name: "zinc".to_string(),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_autosuggest_query_defaults_to_empty() {
        let query: AutosuggestQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.q, "");
    }
}
