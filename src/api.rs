use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GENERATE_ENDPOINT: &str = "/generate_content";
pub const HISTORY_ENDPOINT: &str = "/history";
pub const ANALYTICS_ENDPOINT: &str = "/api/analytics";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] gloo_net::Error),
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub url: &'a str,
}

/// Body of a 200 response from the generation endpoint. A present `error`
/// field means the request failed despite the status code.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub generated_content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    error: Option<String>,
}

impl GenerationResponse {
    fn into_result(self) -> Result<Self, ApiError> {
        match self.error {
            Some(message) => Err(ApiError::Backend(message)),
            None => Ok(self),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    #[serde(default)]
    pub generated_content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub metadata: Option<EntryMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryMetadata {
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub keyword_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_generations: u64,
    #[serde(default)]
    pub popular_keywords: Vec<String>,
    #[serde(default)]
    pub generation_timeline: Timeline,
    #[serde(default)]
    pub average_word_count: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

pub async fn generate(url: &str) -> Result<GenerationResponse, ApiError> {
    let request = Request::post(GENERATE_ENDPOINT).json(&GenerationRequest { url })?;
    let response = request.send().await?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response.json::<GenerationResponse>().await?.into_result()
}

pub async fn fetch_history() -> Result<Vec<HistoryEntry>, ApiError> {
    fetch_json(HISTORY_ENDPOINT).await
}

pub async fn fetch_analytics() -> Result<AnalyticsSummary, ApiError> {
    fetch_json(ANALYTICS_ENDPOINT).await
}

async fn fetch_json<T>(url: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_response_keeps_keyword_order() {
        let payload: GenerationResponse = serde_json::from_str(
            r#"{
                "url": "http://example.com",
                "keywords": ["a", "b", "c"],
                "generated_content": "text",
                "timestamp": "2026-08-01T10:00:00"
            }"#,
        )
        .expect("decode");

        let result = payload.into_result().expect("no backend error");
        assert_eq!(result.keywords, vec!["a", "b", "c"]);
        assert_eq!(result.generated_content, "text");
    }

    #[test]
    fn generation_response_error_field_wins() {
        let payload: GenerationResponse =
            serde_json::from_str(r#"{"error": "No content found at URL"}"#).expect("decode");

        match payload.into_result() {
            Err(ApiError::Backend(message)) => assert_eq!(message, "No content found at URL"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn history_entry_tolerates_minimal_shape() {
        let entry: HistoryEntry =
            serde_json::from_str(r#"{"url": "http://x", "generated_content": "body"}"#)
                .expect("decode");

        assert_eq!(entry.url, "http://x");
        assert!(entry.keywords.is_empty());
        assert!(entry.timestamp.is_empty());
        assert!(entry.metadata.is_none());
    }

    #[test]
    fn history_entry_decodes_backend_bookkeeping() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{
                "url": "http://x",
                "generated_content": "body",
                "keywords": ["k1", "k2"],
                "timestamp": "2026-08-01T10:00:00",
                "metadata": {"word_count": 512, "keyword_count": 2}
            }"#,
        )
        .expect("decode");

        let metadata = entry.metadata.expect("metadata present");
        assert_eq!(metadata.word_count, 512);
        assert_eq!(metadata.keyword_count, 2);
    }

    #[test]
    fn analytics_summary_defaults_missing_sections() {
        let summary: AnalyticsSummary =
            serde_json::from_str(r#"{"total_generations": 4}"#).expect("decode");

        assert_eq!(summary.total_generations, 4);
        assert!(summary.popular_keywords.is_empty());
        assert!(summary.generation_timeline.labels.is_empty());
        assert!(summary.average_word_count.is_none());
    }

    #[test]
    fn analytics_summary_decodes_timeline_pairs() {
        let summary: AnalyticsSummary = serde_json::from_str(
            r#"{
                "total_generations": 3,
                "popular_keywords": ["rust", "wasm"],
                "generation_timeline": {
                    "labels": ["2026-07-30", "2026-07-31", "2026-08-01"],
                    "data": [1, 0, 2]
                },
                "average_word_count": 480.5
            }"#,
        )
        .expect("decode");

        assert_eq!(summary.generation_timeline.labels.len(), 3);
        assert_eq!(summary.generation_timeline.data, vec![1.0, 0.0, 2.0]);
        assert_eq!(summary.average_word_count, Some(480.5));
    }

    #[test]
    fn status_error_names_the_code() {
        assert_eq!(
            ApiError::Status(502).to_string(),
            "request failed with status 502"
        );
    }
}
