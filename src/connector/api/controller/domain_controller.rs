use std::collections::BTreeMap;

use anyhow::Result;

use super::super::Container;
use super::render_report;
use crate::domain::Domain;

pub struct DomainController<'a> {
    container: &'a Container,
}

impl<'a> DomainController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn create(&self, name: String) -> Result<String> {
        let use_case = self.container.create_domain_use_case();
        let domain = use_case.execute(&name).await?;

        Ok(format!(
            "Domain {} created with default store {}",
            domain.name(),
            domain.default_store_id().unwrap_or("(none)")
        ))
    }

    pub async fn list(&self) -> Result<String> {
        let use_case = self.container.list_domains_use_case();
        let domains = use_case.execute().await?;

        Ok(self.format_domains(&domains))
    }

    pub async fn default_store(&self, domain_name: String) -> Result<String> {
        let use_case = self.container.list_domains_use_case();
        let domain = use_case.find(&domain_name).await?;

        Ok(match domain.default_store_id() {
            Some(store_id) => format!("Domain {}: default store {}", domain_name, store_id),
            None => format!("Domain {} has no default store", domain_name),
        })
    }

    pub async fn add_files(
        &self,
        domain_name: String,
        documents: Vec<(String, String)>,
    ) -> Result<String> {
        let mapping: BTreeMap<String, String> = documents.into_iter().collect();
        let use_case = self.container.add_domain_files_use_case();
        let outcome = use_case.execute(&domain_name, &mapping).await?;

        Ok(render_report(
            &format!("Added {} documents to", mapping.len()),
            &outcome,
        ))
    }

    fn format_domains(&self, domains: &[Domain]) -> String {
        if domains.is_empty() {
            return "No domains registered.".to_string();
        }

        let mut output = format!("{} domains:\n\n", domains.len());
        for domain in domains {
            output.push_str(&format!(
                "  {} (store: {}, {} experts)\n",
                domain.name(),
                domain.default_store_id().unwrap_or("none"),
                domain.expert_names().len()
            ));
        }
        output
    }
}
