use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{DomainRepository, ExpertRepository, RetrievalEngine, StoreRegistry};
use crate::domain::{Answer, DomainError, MemoryType, OwnerTuple};

/// Substituted whenever the engine returns an empty answer.
pub const FALLBACK_ANSWER: &str = "I couldn't find a specific answer to your question.";

/// The retrieval gateway: resolves a memory type to a store-id list, submits
/// the query with the expert's context, and normalizes the response shape.
pub struct QueryMemoryUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    expert_repo: Arc<dyn ExpertRepository>,
    registry: Arc<dyn StoreRegistry>,
    engine: Arc<dyn RetrievalEngine>,
}

impl QueryMemoryUseCase {
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        expert_repo: Arc<dyn ExpertRepository>,
        registry: Arc<dyn StoreRegistry>,
        engine: Arc<dyn RetrievalEngine>,
    ) -> Self {
        Self {
            domain_repo,
            expert_repo,
            registry,
            engine,
        }
    }

    pub async fn execute(
        &self,
        expert_name: &str,
        query: &str,
        memory: MemoryType,
        client_name: Option<&str>,
    ) -> Result<Answer, DomainError> {
        let expert = self
            .expert_repo
            .find_by_name(expert_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", expert_name)))?;

        let store_ids = match memory {
            MemoryType::Llm => Vec::new(),
            MemoryType::Domain => {
                let domain_name = expert.domain();
                let domain = self
                    .domain_repo
                    .find_by_name(domain_name)
                    .await?
                    .ok_or_else(|| {
                        DomainError::not_found(format!("Domain {} not found", domain_name))
                    })?;
                let store_id = domain.default_store_id().ok_or_else(|| {
                    DomainError::not_found(format!("No store found for domain {}", domain_name))
                })?;
                vec![store_id.to_string()]
            }
            MemoryType::Expert => {
                let store_id = expert.preferred_store_id().ok_or_else(|| {
                    DomainError::not_found(format!("No store found for expert {}", expert_name))
                })?;
                vec![store_id.to_string()]
            }
            MemoryType::Client => {
                let client_name = client_name.ok_or_else(|| {
                    DomainError::invalid_request("Client name is required for client memory")
                })?;
                let tuple = OwnerTuple::client(expert.domain(), expert_name, client_name);
                let record = self.registry.find(&tuple).await?.ok_or_else(|| {
                    DomainError::not_found(format!(
                        "No store found for expert {} and client {}",
                        expert_name, client_name
                    ))
                })?;
                vec![record.store_id().to_string()]
            }
        };

        info!(
            "Querying expert {} with {} memory ({} stores)",
            expert_name,
            memory,
            store_ids.len()
        );

        let answer = self
            .engine
            .query(query, &store_ids, expert.context())
            .await?;

        Ok(Self::normalize(answer))
    }

    /// Guarantees a non-empty answer string; citations stay only when the
    /// upstream produced a well-formed list (the adapter already drops
    /// anything else).
    fn normalize(mut answer: Answer) -> Answer {
        if answer.text.trim().is_empty() {
            debug!("Empty answer from engine, substituting fallback");
            answer.text = FALLBACK_ANSWER.to_string();
        }
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_substitutes_fallback_for_empty_text() {
        let normalized = QueryMemoryUseCase::normalize(Answer::new("  "));
        assert_eq!(normalized.text, FALLBACK_ANSWER);
    }

    #[test]
    fn test_normalize_keeps_non_empty_text() {
        let normalized = QueryMemoryUseCase::normalize(Answer::new("ok"));
        assert_eq!(normalized.text, "ok");
        assert!(normalized.citations.is_none());
    }
}
