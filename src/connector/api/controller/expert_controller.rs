use anyhow::Result;

use super::super::Container;
use super::render_warnings;
use crate::domain::Expert;

pub struct ExpertController<'a> {
    container: &'a Container,
}

impl<'a> ExpertController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn create(
        &self,
        name: String,
        domain: String,
        context: String,
        own_store: bool,
    ) -> Result<String> {
        let use_case = self.container.create_expert_use_case();
        let outcome = use_case
            .execute(&name, &domain, &context, !own_store)
            .await?;

        let expert = outcome.value();
        let mut output = format!(
            "Expert {} created in domain {} (preferred store: {})\n",
            expert.name(),
            expert.domain(),
            expert.preferred_store_id().unwrap_or("none")
        );
        output.push_str(&render_warnings(outcome.warnings()));
        Ok(output)
    }

    pub async fn list(&self) -> Result<String> {
        let use_case = self.container.list_experts_use_case();
        let experts = use_case.execute().await?;

        Ok(self.format_experts(&experts))
    }

    pub async fn preferred_store(&self, expert_name: String) -> Result<String> {
        let use_case = self.container.list_experts_use_case();
        let expert = use_case.find(&expert_name).await?;

        Ok(match expert.preferred_store_id() {
            Some(store_id) => format!("Expert {}: preferred store {}", expert_name, store_id),
            None => format!("Expert {} has no preferred store", expert_name),
        })
    }

    pub async fn clients(&self, expert_name: String, domain: Option<String>) -> Result<String> {
        let use_case = self.container.client_names_use_case();
        let clients = use_case.execute(&expert_name, domain.as_deref()).await?;

        if clients.is_empty() {
            return Ok(format!("No clients found for expert {}", expert_name));
        }
        Ok(format!(
            "Clients of {}:\n{}",
            expert_name,
            clients
                .iter()
                .map(|c| format!("  {}\n", c))
                .collect::<String>()
        ))
    }

    pub async fn get_context(&self, expert_name: String) -> Result<String> {
        let use_case = self.container.expert_context_use_case();
        let context = use_case.get(&expert_name).await?;
        Ok(context)
    }

    pub async fn set_context(&self, expert_name: String, context: String) -> Result<String> {
        let use_case = self.container.expert_context_use_case();
        let expert = use_case.update(&expert_name, &context).await?;
        Ok(format!("Context updated for expert {}", expert.name()))
    }

    fn format_experts(&self, experts: &[Expert]) -> String {
        if experts.is_empty() {
            return "No experts registered.".to_string();
        }

        let mut output = format!("{} experts:\n\n", experts.len());
        for expert in experts {
            output.push_str(&format!(
                "  {} (domain: {}, preferred store: {})\n",
                expert.name(),
                expert.domain(),
                expert.preferred_store_id().unwrap_or("none")
            ));
        }
        output
    }
}
