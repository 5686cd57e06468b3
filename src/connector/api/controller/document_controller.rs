use anyhow::Result;

use super::super::Container;
use crate::domain::Document;

pub struct DocumentController<'a> {
    container: &'a Container,
}

impl<'a> DocumentController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(
        &self,
        domain: Option<String>,
        created_by: Option<String>,
        client: Option<String>,
    ) -> Result<String> {
        let use_case = self.container.list_documents_use_case();
        let documents = use_case
            .execute(domain.as_deref(), created_by.as_deref(), client.as_deref())
            .await?;

        Ok(self.format_documents(&documents))
    }

    fn format_documents(&self, documents: &[Document]) -> String {
        if documents.is_empty() {
            return "No documents found.".to_string();
        }

        let mut output = format!("{} documents:\n\n", documents.len());
        for document in documents {
            output.push_str(&format!(
                "  {} ({})\n    Domain: {}, Created by: {}, Client: {}\n    Content id: {}\n",
                document.name(),
                document.link(),
                document.domain(),
                document.created_by(),
                document.client_name().unwrap_or("none"),
                document.content_id()
            ));
        }
        output
    }
}
