use std::collections::BTreeMap;

use anyhow::Result;

use super::super::Container;
use super::render_report;
use crate::domain::{DomainError, StoreRecord};

pub struct StoreController<'a> {
    container: &'a Container,
}

impl<'a> StoreController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn init_expert_store(
        &self,
        expert: String,
        use_domain_default: bool,
    ) -> Result<String> {
        let resolved = self
            .container
            .resolver()
            .init_expert_stores(&expert, use_domain_default)
            .await?;

        Ok(format!(
            "Expert {} now points at store {} ({})",
            expert,
            resolved.store_id,
            if resolved.created { "created" } else { "existing" }
        ))
    }

    pub async fn update_expert_store(&self, expert: String) -> Result<String> {
        let resolved = self
            .container
            .resolver()
            .ensure_dedicated_store(&expert)
            .await?;

        Ok(format!(
            "Dedicated store for {}: {} ({})",
            expert,
            resolved.store_id,
            if resolved.created { "created" } else { "existing" }
        ))
    }

    pub async fn create_client_store(&self, expert: String, client: String) -> Result<String> {
        let resolved = self
            .container
            .resolver()
            .resolve_client_store(&expert, &client)
            .await?;

        Ok(format!(
            "Store {} for expert {} and client {} ({})",
            resolved.store_id,
            expert,
            client,
            if resolved.created { "created" } else { "existing" }
        ))
    }

    pub async fn client_store(&self, expert: String, client: String) -> Result<String> {
        let use_case = self.container.find_store_use_case();
        match use_case.execute(None, Some(&expert), Some(&client)).await {
            Ok(record) => Ok(format!(
                "Expert {} / client {}: store {}",
                expert,
                client,
                record.store_id()
            )),
            Err(e) if e.is_not_found() => Ok(format!(
                "No store found for expert {} and client {}",
                expert, client
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_store(
        &self,
        domain: Option<String>,
        expert: Option<String>,
        client: Option<String>,
    ) -> Result<String> {
        let use_case = self.container.find_store_use_case();
        let record = use_case
            .execute(domain.as_deref(), expert.as_deref(), client.as_deref())
            .await?;

        Ok(self.format_record(&record))
    }

    pub async fn add_expert_files(
        &self,
        expert: String,
        client: Option<String>,
        documents: Vec<(String, String)>,
    ) -> Result<String> {
        let mapping: BTreeMap<String, String> = documents.into_iter().collect();
        let use_case = self.container.add_expert_files_use_case();
        let outcome = use_case
            .execute(&expert, client.as_deref(), &mapping)
            .await?;

        Ok(render_report(
            &format!("Added {} documents to", mapping.len()),
            &outcome,
        ))
    }

    pub async fn update_store(
        &self,
        store_id: String,
        documents: Vec<(String, String)>,
    ) -> Result<String> {
        let mapping: BTreeMap<String, String> = documents.into_iter().collect();
        let use_case = self.container.update_store_use_case();
        let outcome = use_case.execute(&store_id, &mapping).await?;

        Ok(render_report("Updated", &outcome))
    }

    pub async fn batch_status(&self, store_id: String, batch_id: String) -> Result<String> {
        let use_case = self.container.batch_status_use_case();
        let batch = use_case.execute(&store_id, &batch_id).await?;

        Ok(format!("Batch {}: {}", batch.id, batch.status))
    }

    pub async fn delete_expert_store(&self, expert: String, store_id: String) -> Result<String> {
        let use_case = self.container.delete_store_use_case();
        use_case.delete_expert_store(&expert, &store_id).await?;

        Ok(format!("Store {} deleted for expert {}", store_id, expert))
    }

    pub async fn delete_memory(
        &self,
        domain: Option<String>,
        expert: Option<String>,
        client: Option<String>,
    ) -> Result<String> {
        if domain.is_none() && expert.is_none() && client.is_none() {
            return Err(DomainError::invalid_request(
                "Provide either a domain only, an expert only, or an expert and client",
            )
            .into());
        }

        let use_case = self.container.delete_store_use_case();
        let record = use_case
            .delete_by_owner(domain.as_deref(), expert.as_deref(), client.as_deref())
            .await?;

        Ok(format!(
            "Deleted {} store {} ({})",
            record.owner().as_str(),
            record.store_id(),
            record.owner_tuple().describe()
        ))
    }

    fn format_record(&self, record: &StoreRecord) -> String {
        let mut output = format!(
            "Store {} ({}, {})\n",
            record.store_id(),
            record.owner().as_str(),
            record.owner_tuple().describe()
        );
        output.push_str(&format!(
            "  Files: {}, Batches: {}, Latest batch: {}\n",
            record.file_count(),
            record.batch_ids().len(),
            record.latest_batch_id().unwrap_or("none")
        ));
        output
    }
}
