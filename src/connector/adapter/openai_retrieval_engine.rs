use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::{IngestionBatch, RetrievalEngine};
use crate::domain::{Answer, Citation, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o";
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Retrieval depth per query.
const MAX_NUM_RESULTS: u32 = 2;

#[derive(serde::Serialize)]
struct CreateStoreRequest<'a> {
    name: &'a str,
}

#[derive(serde::Serialize)]
struct BatchRequest<'a> {
    file_ids: &'a [String],
}

#[derive(Deserialize)]
struct IdResponse {
    id: String,
}

#[derive(Deserialize)]
struct BatchResponse {
    id: String,
    status: String,
}

/// The engine's query response, decoded as explicit variants. Anything that
/// is neither the structured output shape nor a plain text object lands in
/// the `Unrecognized` branch and is stringified, never probed field by
/// field.
#[derive(Deserialize)]
#[serde(untagged)]
enum QueryResponse {
    Structured { output: Vec<OutputItem> },
    Plain { text: String },
    Unrecognized(serde_json::Value),
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Deserialize)]
struct ContentItem {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    annotations: Vec<AnnotationItem>,
}

#[derive(Deserialize)]
struct AnnotationItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    file_id: Option<String>,
}

impl QueryResponse {
    fn into_answer(self) -> Answer {
        match self {
            QueryResponse::Structured { output } => {
                // Prefer the assistant message; fall back to any message
                // carrying text.
                let item = output
                    .iter()
                    .find(|item| item.role.as_deref() == Some("assistant"))
                    .or_else(|| {
                        output
                            .iter()
                            .find(|item| item.content.iter().any(|c| c.text.is_some()))
                    });

                let Some(item) = item else {
                    return Answer::new(String::new());
                };

                let text = item
                    .content
                    .iter()
                    .find_map(|c| c.text.clone())
                    .unwrap_or_default();

                let citations: Vec<Citation> = item
                    .content
                    .iter()
                    .flat_map(|c| c.annotations.iter())
                    .filter(|a| a.kind == "file_citation")
                    .map(|a| Citation {
                        quote: a.quote.clone().unwrap_or_default(),
                        source: a
                            .filename
                            .clone()
                            .or_else(|| a.file_id.clone())
                            .unwrap_or_default(),
                    })
                    .collect();

                let answer = Answer::new(text);
                if citations.is_empty() {
                    answer
                } else {
                    answer.with_citations(citations)
                }
            }
            QueryResponse::Plain { text } => Answer::new(text),
            QueryResponse::Unrecognized(value) => {
                debug!("Unrecognized engine response shape, stringifying");
                Answer::new(value.to_string())
            }
        }
    }
}

/// HTTP client for the hosted vector-store and file-search API.
///
/// Constructed explicitly and injected into each component so tests can
/// substitute a double; there is no shared global handle.
pub struct OpenAiRetrievalEngine {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiRetrievalEngine {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable                | Default                  |
    /// |-------------------------|--------------------------|
    /// | `EXPERTMEM_ENGINE_URL`  | `https://api.openai.com` |
    /// | `EXPERTMEM_ENGINE_MODEL`| `gpt-4o`                 |
    /// | `EXPERTMEM_ENGINE_KEY`  | `""` (empty)             |
    pub fn from_env() -> Self {
        let base = std::env::var("EXPERTMEM_ENGINE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("EXPERTMEM_ENGINE_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let key = std::env::var("EXPERTMEM_ENGINE_KEY").unwrap_or_default();
        Self::new(key, model, base)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(&self.api_key)
    }

    async fn check(
        context: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Engine returned {} on {}: {}", status, context, body);
        Err(DomainError::upstream(format!(
            "Engine returned {} on {}",
            status, context
        )))
    }
}

#[async_trait]
impl RetrievalEngine for OpenAiRetrievalEngine {
    async fn create_store(&self, name: &str) -> Result<String, DomainError> {
        let response = self
            .authed(self.client.post(self.url("/v1/vector_stores")))
            .json(&CreateStoreRequest { name })
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("create_store: {}", e)))?;

        let response = Self::check("create_store", response).await?;
        let body: IdResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("create_store: {}", e)))?;
        debug!("Created store {} ({})", body.id, name);
        Ok(body.id)
    }

    async fn register_content(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DomainError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        let response = self
            .authed(self.client.post(self.url("/v1/files")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("register_content: {}", e)))?;

        let response = Self::check("register_content", response).await?;
        let body: IdResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("register_content: {}", e)))?;
        debug!("Registered content {} ({})", body.id, file_name);
        Ok(body.id)
    }

    async fn batch_ingest(
        &self,
        store_id: &str,
        content_ids: &[String],
    ) -> Result<IngestionBatch, DomainError> {
        let path = format!("/v1/vector_stores/{}/file_batches", store_id);
        let response = self
            .authed(self.client.post(self.url(&path)))
            .json(&BatchRequest {
                file_ids: content_ids,
            })
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("batch_ingest: {}", e)))?;

        let response = Self::check("batch_ingest", response).await?;
        let body: BatchResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("batch_ingest: {}", e)))?;
        debug!(
            "Batch {} ({}) covers {} files",
            body.id,
            body.status,
            content_ids.len()
        );
        Ok(IngestionBatch {
            id: body.id,
            status: body.status,
        })
    }

    async fn batch_status(
        &self,
        store_id: &str,
        batch_id: &str,
    ) -> Result<IngestionBatch, DomainError> {
        let path = format!("/v1/vector_stores/{}/file_batches/{}", store_id, batch_id);
        let response = self
            .authed(self.client.get(self.url(&path)))
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("batch_status: {}", e)))?;

        let response = Self::check("batch_status", response).await?;
        let body: BatchResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("batch_status: {}", e)))?;
        Ok(IngestionBatch {
            id: body.id,
            status: body.status,
        })
    }

    async fn remove_content_from_store(
        &self,
        store_id: &str,
        content_id: &str,
    ) -> Result<(), DomainError> {
        let path = format!("/v1/vector_stores/{}/files/{}", store_id, content_id);
        let response = self
            .authed(self.client.delete(self.url(&path)))
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("remove_content_from_store: {}", e)))?;

        Self::check("remove_content_from_store", response).await?;
        Ok(())
    }

    async fn delete_content(&self, content_id: &str) -> Result<(), DomainError> {
        let path = format!("/v1/files/{}", content_id);
        let response = self
            .authed(self.client.delete(self.url(&path)))
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("delete_content: {}", e)))?;

        Self::check("delete_content", response).await?;
        Ok(())
    }

    async fn delete_store(&self, store_id: &str) -> Result<(), DomainError> {
        let path = format!("/v1/vector_stores/{}", store_id);
        let response = self
            .authed(self.client.delete(self.url(&path)))
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("delete_store: {}", e)))?;

        Self::check("delete_store", response).await?;
        Ok(())
    }

    async fn query(
        &self,
        prompt: &str,
        store_ids: &[String],
        system_context: &str,
    ) -> Result<Answer, DomainError> {
        let mut body = serde_json::json!({
            "model": self.model,
            "input": [
                { "role": "system", "content": system_context },
                { "role": "user", "content": prompt },
            ],
            "temperature": 0,
        });

        if !store_ids.is_empty() {
            body["tools"] = serde_json::json!([{
                "type": "file_search",
                "vector_store_ids": store_ids,
                "max_num_results": MAX_NUM_RESULTS,
            }]);
            body["include"] = serde_json::json!(["file_search_call.results"]);
        }

        let response = self
            .authed(self.client.post(self.url("/v1/responses")))
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("query: {}", e)))?;

        let response = Self::check("query", response).await?;
        let decoded: QueryResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("query: {}", e)))?;

        Ok(decoded.into_answer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_response_prefers_assistant_text() {
        let raw = serde_json::json!({
            "output": [
                { "role": "tool", "content": [] },
                { "role": "assistant", "content": [{ "text": "the answer" }] },
            ]
        });
        let decoded: QueryResponse = serde_json::from_value(raw).expect("decode");
        assert_eq!(decoded.into_answer().text, "the answer");
    }

    #[test]
    fn test_citation_annotations_are_extracted() {
        let raw = serde_json::json!({
            "output": [{
                "role": "assistant",
                "content": [{
                    "text": "see the guide",
                    "annotations": [
                        { "type": "file_citation", "quote": "p. 4", "filename": "guide.pdf" },
                        { "type": "url_citation", "quote": "ignored" },
                    ],
                }],
            }]
        });
        let decoded: QueryResponse = serde_json::from_value(raw).expect("decode");
        let answer = decoded.into_answer();
        let citations = answer.citations.expect("citations");
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].source, "guide.pdf");
    }

    #[test]
    fn test_plain_text_response() {
        let raw = serde_json::json!({ "text": "plain" });
        let decoded: QueryResponse = serde_json::from_value(raw).expect("decode");
        let answer = decoded.into_answer();
        assert_eq!(answer.text, "plain");
        assert!(answer.citations.is_none());
    }

    #[test]
    fn test_unrecognized_shape_is_stringified() {
        let raw = serde_json::json!({ "unexpected": [1, 2, 3] });
        let decoded: QueryResponse = serde_json::from_value(raw).expect("decode");
        let answer = decoded.into_answer();
        assert!(answer.text.contains("unexpected"));
        assert!(answer.citations.is_none());
    }
}
