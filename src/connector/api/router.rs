use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{
    DocumentController, DomainController, ExpertController, QueryController, StoreController,
};

pub struct Router<'a> {
    domain_controller: DomainController<'a>,
    expert_controller: ExpertController<'a>,
    store_controller: StoreController<'a>,
    document_controller: DocumentController<'a>,
    query_controller: QueryController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            domain_controller: DomainController::new(container),
            expert_controller: ExpertController::new(container),
            store_controller: StoreController::new(container),
            document_controller: DocumentController::new(container),
            query_controller: QueryController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::CreateDomain { name } => self.domain_controller.create(name).await,
            Commands::ListDomains => self.domain_controller.list().await,
            Commands::DomainStore { domain } => {
                self.domain_controller.default_store(domain).await
            }
            Commands::CreateExpert {
                name,
                domain,
                context,
                own_store,
            } => {
                self.expert_controller
                    .create(name, domain, context, own_store)
                    .await
            }
            Commands::ListExperts => self.expert_controller.list().await,
            Commands::ExpertStore { expert } => {
                self.expert_controller.preferred_store(expert).await
            }
            Commands::Clients { expert, domain } => {
                self.expert_controller.clients(expert, domain).await
            }
            Commands::GetContext { expert } => self.expert_controller.get_context(expert).await,
            Commands::SetContext { expert, context } => {
                self.expert_controller.set_context(expert, context).await
            }
            Commands::ClientStore { expert, client } => {
                self.store_controller.client_store(expert, client).await
            }
            Commands::InitExpertStore {
                expert,
                use_domain_default,
            } => {
                self.store_controller
                    .init_expert_store(expert, use_domain_default)
                    .await
            }
            Commands::UpdateExpertStore { expert } => {
                self.store_controller.update_expert_store(expert).await
            }
            Commands::CreateClientStore { expert, client } => {
                self.store_controller
                    .create_client_store(expert, client)
                    .await
            }
            Commands::AddDomainFiles { domain, documents } => {
                self.domain_controller.add_files(domain, documents).await
            }
            Commands::AddExpertFiles {
                expert,
                client,
                documents,
            } => {
                self.store_controller
                    .add_expert_files(expert, client, documents)
                    .await
            }
            Commands::FindStore {
                domain,
                expert,
                client,
            } => {
                self.store_controller
                    .find_store(domain, expert, client)
                    .await
            }
            Commands::UpdateStore {
                store_id,
                documents,
            } => self.store_controller.update_store(store_id, documents).await,
            Commands::BatchStatus { store_id, batch_id } => {
                self.store_controller.batch_status(store_id, batch_id).await
            }
            Commands::DeleteExpertStore { expert, store_id } => {
                self.store_controller
                    .delete_expert_store(expert, store_id)
                    .await
            }
            Commands::DeleteMemory {
                domain,
                expert,
                client,
            } => {
                self.store_controller
                    .delete_memory(domain, expert, client)
                    .await
            }
            Commands::ListDocuments {
                domain,
                created_by,
                client,
            } => {
                self.document_controller
                    .list(domain, created_by, client)
                    .await
            }
            Commands::Query {
                expert,
                text,
                memory,
                client,
            } => {
                self.query_controller
                    .query(expert, text, memory, client)
                    .await
            }
        }
    }
}
