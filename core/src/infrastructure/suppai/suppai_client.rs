use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error};

use crate::domain::{
    common::entities::app_errors::CoreError,
    interaction::{
        entities::EvidenceFragment, ports::InteractionEvidencePort,
        value_objects::EvidencePairKey,
    },
    supplement::{entities::CanonicalAgent, ports::SupplementSearchPort},
};

/// Client for the SUPP.AI knowledge base: agent search, agent lookup and
/// pairwise interaction evidence.
#[derive(Debug, Clone)]
pub struct SuppAiClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<AgentDto>,
}

#[derive(Debug, Deserialize)]
struct AgentDto {
    cui: String,
    preferred_name: String,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    definition: Option<String>,
}

impl From<AgentDto> for CanonicalAgent {
    fn from(dto: AgentDto) -> Self {
        Self {
            identifier: dto.cui,
            preferred_name: dto.preferred_name,
            aliases: dto.synonyms,
            description: dto.definition.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InteractionResponse {
    #[serde(default)]
    evidence: Vec<EvidenceDto>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EvidenceDto {
    /// One paper with the sentences that mention both agents.
    Paper { sentences: Vec<FragmentDto> },
    Fragment(FragmentDto),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FragmentDto {
    Spans { spans: Vec<SpanDto> },
    Text { text: String },
    Plain(String),
}

#[derive(Debug, Deserialize)]
struct SpanDto {
    text: String,
}

impl From<FragmentDto> for EvidenceFragment {
    fn from(dto: FragmentDto) -> Self {
        match dto {
            FragmentDto::Spans { spans } => {
                EvidenceFragment::from_spans(spans.into_iter().map(|s| s.text).collect())
            }
            FragmentDto::Text { text } | FragmentDto::Plain(text) => {
                EvidenceFragment::from_text(text)
            }
        }
    }
}

impl InteractionResponse {
    fn into_fragments(self) -> Vec<EvidenceFragment> {
        self.evidence
            .into_iter()
            .flat_map(|evidence| match evidence {
                EvidenceDto::Paper { sentences } => sentences,
                EvidenceDto::Fragment(fragment) => vec![fragment],
            })
            .map(EvidenceFragment::from)
            .collect()
    }
}

impl SuppAiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// GETs `path` and decodes the body. `Ok(None)` on 404.
    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<Option<T>, CoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("SUPP.AI request to {} failed: {}", path, e);
                CoreError::ExternalServiceError(format!("SUPP.AI error: {}", e))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("SUPP.AI has no resource at {}", path);
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            error!("SUPP.AI returned {} for {}", status, path);
            return Err(CoreError::ExternalServiceError(format!(
                "SUPP.AI returned error: {}",
                status
            )));
        }

        response.json::<T>().await.map(Some).map_err(|e| {
            error!("Failed to parse SUPP.AI response for {}: {}", path, e);
            CoreError::ExternalServiceError(format!("Failed to parse SUPP.AI response: {}", e))
        })
    }
}

impl SupplementSearchPort for SuppAiClient {
    async fn search(&self, query: String) -> Result<Vec<CanonicalAgent>, CoreError> {
        let response: Option<SearchResponse> = self
            .get_json("/api/agent/search", &[("q", query.as_str())])
            .await?;

        Ok(response
            .map(|r| r.results.into_iter().map(CanonicalAgent::from).collect())
            .unwrap_or_default())
    }

    async fn get_agent(&self, identifier: String) -> Result<Option<CanonicalAgent>, CoreError> {
        let path = format!("/api/agent/{}", urlencoding::encode(&identifier));
        let agent: Option<AgentDto> = self.get_json(&path, &[]).await?;

        Ok(agent.map(CanonicalAgent::from))
    }
}

impl InteractionEvidencePort for SuppAiClient {
    async fn get_evidence(
        &self,
        key: EvidencePairKey,
    ) -> Result<Option<Vec<EvidenceFragment>>, CoreError> {
        let path = format!("/api/interaction/{}", urlencoding::encode(key.as_str()));
        let response: Option<InteractionResponse> = self.get_json(&path, &[]).await?;

        Ok(response
            .map(InteractionResponse::into_fragments)
            .filter(|fragments| !fragments.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interaction::entities::RawEvidence;

    #[test]
    fn test_search_results_map_to_agents() {
        let body = r#"{
            "query": "creatine",
            "results": [
                {
                    "cui": "C0010286",
                    "preferred_name": "Creatine",
                    "synonyms": ["Creatine monohydrate", "Kreatin"],
                    "definition": "An amino acid derivative.",
                    "ent_type": "supplement"
                },
                {"cui": "C0056500", "preferred_name": "Creatine kinase"}
            ],
            "total": 2
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let agents: Vec<CanonicalAgent> =
            response.results.into_iter().map(CanonicalAgent::from).collect();

        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].identifier, "C0010286");
        assert_eq!(agents[0].aliases, vec!["Creatine monohydrate", "Kreatin"]);
        assert_eq!(agents[1].description, "");
    }

    #[test]
    fn test_sentence_spans_are_joined_before_concatenation() {
        let body = r#"{
            "interaction_id": "C0006644-C0010286",
            "evidence": [
                {
                    "paper": {"title": "Caffeine and creatine", "year": 2002},
                    "sentences": [
                        {
                            "uid": 1,
                            "spans": [
                                {"text": "Caffeine", "cui": "C0006644"},
                                {"text": " may blunt the ergogenic effect of "},
                                {"text": "creatine", "cui": "C0010286"},
                                {"text": "."}
                            ]
                        }
                    ]
                },
                {"text": "Co-ingestion was associated with gastrointestinal discomfort."}
            ]
        }"#;

        let response: InteractionResponse = serde_json::from_str(body).unwrap();
        let fragments = response.into_fragments();

        assert_eq!(fragments.len(), 2);
        assert_eq!(
            RawEvidence::from_fragments(&fragments),
            RawEvidence::Text(
                "Caffeine may blunt the ergogenic effect of creatine. Co-ingestion was associated with gastrointestinal discomfort."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_plain_string_evidence_is_accepted() {
        let body = r#"{"evidence": ["Zinc reduces copper absorption."]}"#;

        let response: InteractionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.into_fragments(),
            vec![EvidenceFragment::from_text("Zinc reduces copper absorption.")]
        );
    }

    #[test]
    fn test_missing_evidence_is_empty() {
        let response: InteractionResponse =
            serde_json::from_str(r#"{"interaction_id": "a-b"}"#).unwrap();
        assert!(response.into_fragments().is_empty());
    }
}
