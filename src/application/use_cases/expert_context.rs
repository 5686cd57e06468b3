use std::sync::Arc;

use crate::application::ExpertRepository;
use crate::domain::{DomainError, Expert};

/// Reads and updates an expert's free-text context.
pub struct ExpertContextUseCase {
    expert_repo: Arc<dyn ExpertRepository>,
}

impl ExpertContextUseCase {
    pub fn new(expert_repo: Arc<dyn ExpertRepository>) -> Self {
        Self { expert_repo }
    }

    pub async fn get(&self, expert_name: &str) -> Result<String, DomainError> {
        let expert = self.require(expert_name).await?;
        Ok(expert.context().to_string())
    }

    pub async fn update(&self, expert_name: &str, context: &str) -> Result<Expert, DomainError> {
        self.require(expert_name).await?;
        self.expert_repo.update_context(expert_name, context).await?;
        self.require(expert_name).await
    }

    async fn require(&self, expert_name: &str) -> Result<Expert, DomainError> {
        self.expert_repo
            .find_by_name(expert_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", expert_name)))
    }
}
