use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::{DocumentSource, FetchedDocument};
use crate::domain::DomainError;

const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Fetches document bytes from HTTP(S) URLs with a bounded timeout, or from
/// local paths directly. The file name handed to the engine keeps the URL's
/// extension, defaulting to `.pdf` when the path has none.
pub struct HttpDocumentSource {
    client: reqwest::Client,
}

impl HttpDocumentSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    fn is_url(reference: &str) -> bool {
        reference.starts_with("http://") || reference.starts_with("https://")
    }
}

impl Default for HttpDocumentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, reference: &str) -> Result<FetchedDocument, DomainError> {
        if Self::is_url(reference) {
            debug!("Downloading document from {}", reference);
            let response = self.client.get(reference).send().await.map_err(|e| {
                DomainError::upstream(format!("Failed to download {}: {}", reference, e))
            })?;

            if !response.status().is_success() {
                return Err(DomainError::upstream(format!(
                    "Download of {} returned {}",
                    reference,
                    response.status()
                )));
            }

            let bytes = response.bytes().await.map_err(|e| {
                DomainError::upstream(format!("Failed to read body of {}: {}", reference, e))
            })?;

            Ok(FetchedDocument {
                file_name: file_name_from_url(reference),
                bytes: bytes.to_vec(),
            })
        } else {
            debug!("Reading document from local path {}", reference);
            let bytes = tokio::fs::read(reference).await?;
            let file_name = reference
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or(reference)
                .to_string();
            Ok(FetchedDocument { file_name, bytes })
        }
    }
}

/// Last path segment of the URL, with query/fragment stripped and a `.pdf`
/// extension appended when none is present.
fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && !s.contains(':'))
        .unwrap_or("document");

    if segment.contains('.') {
        segment.to_string()
    } else {
        format!("{}.pdf", segment)
    }
}
