use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, text::collapse_whitespace},
    supplement_facts::entities::ScrapedSection,
};

pub const WEBMD_SOURCE: &str = "webmd";

static MONOGRAPH_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ingredientmono-(\d+)/([a-z0-9-]+)").expect("valid monograph link regex")
});

static MONOGRAPH_LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a[href*="/vitamins/ai/ingredientmono-"]"#)
        .expect("valid monograph link selector")
});

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("valid heading selector"));

/// Monograph location on WebMD: numeric id and URL slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonographRef {
    pub id: String,
    pub slug: String,
}

pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// First monograph link on a search results page.
pub fn parse_search_results(html: &str) -> Option<MonographRef> {
    let document = Html::parse_document(html);

    document
        .select(&MONOGRAPH_LINK_SELECTOR)
        .filter_map(|link| link.value().attr("href"))
        .find_map(|href| {
            MONOGRAPH_LINK_RE.captures(href).map(|caps| MonographRef {
                id: caps[1].to_string(),
                slug: caps[2].to_string(),
            })
        })
}

/// Text of everything between an `h2` and the next `h2`.
fn section_after(heading: ElementRef<'_>) -> String {
    let mut parts = Vec::new();

    for sibling in heading.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            if element.value().name() == "h2" {
                break;
            }
            let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                parts.push(text);
            }
        } else if let Some(text) = sibling.value().as_text() {
            let text = collapse_whitespace(text);
            if !text.is_empty() {
                parts.push(text);
            }
        }
    }

    parts.join("\n")
}

/// "Uses" and "Dosing" sections of a monograph page.
pub fn parse_monograph(html: &str) -> ScrapedSection {
    let document = Html::parse_document(html);
    let mut section = ScrapedSection {
        source: WEBMD_SOURCE.to_string(),
        ..Default::default()
    };

    for heading in document.select(&HEADING_SELECTOR) {
        let title = heading.text().collect::<String>().to_lowercase();

        if title.contains("uses") && section.uses_text.is_empty() {
            section.uses_text = section_after(heading);
        } else if title.contains("dosing") && section.dosing_text.is_empty() {
            section.dosing_text = section_after(heading);
        }
    }

    section
}

#[derive(Debug, Clone)]
pub struct WebMdClient {
    base_url: String,
    client: Client,
}

impl WebMdClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn get_html(&self, url: &str) -> Result<String, CoreError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("WebMD request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(CoreError::ExternalServiceError(format!(
                "WebMD returned {} for {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| CoreError::ExternalServiceError(format!("WebMD body error: {}", e)))
    }

    async fn find_monograph(&self, name: &str) -> Option<MonographRef> {
        let url = format!(
            "{}/vitamins/search?query={}",
            self.base_url,
            urlencoding::encode(name)
        );

        match self.get_html(&url).await {
            Ok(html) => parse_search_results(&html),
            Err(e) => {
                debug!("WebMD search failed for {}: {}", name, e);
                None
            }
        }
    }

    /// Scrapes the monograph for `name`, trying the searched id first and
    /// the bare slug second.
    pub async fn fetch(&self, name: &str) -> Result<Option<ScrapedSection>, CoreError> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Ok(None);
        }

        let mut urls = Vec::new();
        let mut fallback_slug = slug;
        if let Some(monograph) = self.find_monograph(name).await {
            urls.push(format!(
                "{}/vitamins/ai/ingredientmono-{}/{}",
                self.base_url, monograph.id, monograph.slug
            ));
            fallback_slug = monograph.slug;
        }
        urls.push(format!(
            "{}/vitamins/ai/ingredientmono-{}",
            self.base_url, fallback_slug
        ));

        let mut last_error = None;
        for url in urls {
            match self.get_html(&url).await {
                Ok(html) => {
                    let section = parse_monograph(&html);
                    if !section.is_empty() {
                        return Ok(Some(section));
                    }
                }
                Err(e) => {
                    warn!("WebMD page {} failed: {}", url, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("N-Acetyl Cysteine (NAC)"), "n-acetyl-cysteine-nac");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn test_parse_search_results_takes_first_monograph() {
        let html = r#"
            <html><body>
              <a href="/vitamins/search?page=2">Next</a>
              <a href="https://www.webmd.com/vitamins/ai/ingredientmono-873/creatine">Creatine</a>
              <a href="/vitamins/ai/ingredientmono-1018/n-acetyl-cysteine">NAC</a>
            </body></html>
        "#;

        assert_eq!(
            parse_search_results(html),
            Some(MonographRef {
                id: "873".to_string(),
                slug: "creatine".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_monograph_collects_sections_until_next_heading() {
        let html = r#"
            <html><body>
              <h1>Creatine</h1>
              <h2>Overview</h2>
              <p>Creatine is a chemical found in the body.</p>
              <h2>Uses &amp; Effectiveness</h2>
              <p>Creatine is used to improve exercise performance.</p>
              <ul><li>Muscle strength</li></ul>
              <h2>Side Effects</h2>
              <p>Possibly safe.</p>
              <h2>Dosing</h2>
              <p>Adults commonly use 20 g per day for 5-7 days, then 3-5 g per day.</p>
            </body></html>
        "#;

        let section = parse_monograph(html);

        assert_eq!(section.source, "webmd");
        assert_eq!(
            section.uses_text,
            "Creatine is used to improve exercise performance.\nMuscle strength"
        );
        assert_eq!(
            section.dosing_text,
            "Adults commonly use 20 g per day for 5-7 days, then 3-5 g per day."
        );
    }

    #[test]
    fn test_parse_monograph_without_sections_is_empty() {
        assert!(parse_monograph("<html><body><p>Not found</p></body></html>").is_empty());
    }
}
