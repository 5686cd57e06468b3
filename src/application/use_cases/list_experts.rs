use std::sync::Arc;

use crate::application::ExpertRepository;
use crate::domain::{DomainError, Expert};

pub struct ListExpertsUseCase {
    expert_repo: Arc<dyn ExpertRepository>,
}

impl ListExpertsUseCase {
    pub fn new(expert_repo: Arc<dyn ExpertRepository>) -> Self {
        Self { expert_repo }
    }

    pub async fn execute(&self) -> Result<Vec<Expert>, DomainError> {
        self.expert_repo.list().await
    }

    pub async fn find(&self, expert_name: &str) -> Result<Expert, DomainError> {
        self.expert_repo
            .find_by_name(expert_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Expert {} not found", expert_name)))
    }
}
