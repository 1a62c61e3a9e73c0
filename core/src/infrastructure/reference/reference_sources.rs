use tracing::{debug, warn};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        supplement_facts::{entities::ScrapedSection, ports::FactSourcePort},
    },
    infrastructure::reference::{webmd_client::WebMdClient, wikipedia_client::WikipediaClient},
};

/// Every reference source, queried in order. A failing source is logged and
/// skipped; the call fails only when nothing was scraped and a source errored.
#[derive(Debug, Clone)]
pub struct ReferenceSources {
    webmd: WebMdClient,
    wikipedia: WikipediaClient,
}

impl ReferenceSources {
    pub fn new(webmd: WebMdClient, wikipedia: WikipediaClient) -> Self {
        Self { webmd, wikipedia }
    }
}

fn collect(
    source: &str,
    result: Result<Option<ScrapedSection>, CoreError>,
    sections: &mut Vec<ScrapedSection>,
    failures: &mut Vec<String>,
) {
    match result {
        Ok(Some(section)) => sections.push(section),
        Ok(None) => debug!("{} has nothing for this supplement", source),
        Err(e) => {
            warn!("{} scrape failed: {}", source, e);
            failures.push(format!("{}: {}", source, e));
        }
    }
}

impl FactSourcePort for ReferenceSources {
    async fn fetch_sections(&self, name: String) -> Result<Vec<ScrapedSection>, CoreError> {
        let mut sections = Vec::new();
        let mut failures = Vec::new();

        collect(
            "WebMD",
            self.webmd.fetch(&name).await,
            &mut sections,
            &mut failures,
        );
        collect(
            "Wikipedia",
            self.wikipedia.fetch(&name).await,
            &mut sections,
            &mut failures,
        );

        if sections.is_empty() && !failures.is_empty() {
            return Err(CoreError::ExternalServiceError(failures.join("; ")));
        }

        Ok(sections)
    }
}
