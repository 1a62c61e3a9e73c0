use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::{
    common::entities::app_errors::CoreError, supplement_facts::entities::ScrapedSection,
};

pub const WIKIPEDIA_SOURCE: &str = "wikipedia";

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default, rename = "type")]
    page_type: String,
    #[serde(default)]
    extract: String,
}

impl PageSummary {
    /// Disambiguation pages describe several topics; their extract is not
    /// about the supplement.
    fn into_section(self) -> Option<ScrapedSection> {
        if self.page_type == "disambiguation" || self.extract.trim().is_empty() {
            return None;
        }

        Some(ScrapedSection {
            source: WIKIPEDIA_SOURCE.to_string(),
            uses_text: self.extract,
            dosing_text: String::new(),
        })
    }
}

pub fn page_title(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Reads the lead summary of a Wikipedia article through the REST API.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    base_url: String,
    client: Client,
}

impl WikipediaClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub async fn fetch(&self, name: &str) -> Result<Option<ScrapedSection>, CoreError> {
        let title = page_title(name);
        if title.is_empty() {
            return Ok(None);
        }

        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            urlencoding::encode(&title)
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("Wikipedia request failed: {}", e))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(CoreError::ExternalServiceError(format!(
                "Wikipedia returned {} for {}",
                response.status(),
                title
            )));
        }

        let summary: PageSummary = response.json().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("Failed to parse Wikipedia summary: {}", e))
        })?;

        Ok(summary.into_section())
    }
}
