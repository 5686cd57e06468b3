use anyhow::Result;

use super::super::Container;
use crate::domain::{Answer, DomainError, MemoryType};

pub struct QueryController<'a> {
    container: &'a Container,
}

impl<'a> QueryController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn query(
        &self,
        expert: String,
        text: String,
        memory: String,
        client: Option<String>,
    ) -> Result<String> {
        let memory = MemoryType::parse(&memory).ok_or_else(|| {
            DomainError::invalid_request(format!("Invalid memory type: {}", memory))
        })?;

        let use_case = self.container.query_use_case();
        let answer = use_case
            .execute(&expert, &text, memory, client.as_deref())
            .await?;

        Ok(self.format_answer(&answer))
    }

    fn format_answer(&self, answer: &Answer) -> String {
        let mut output = answer.text.clone();

        if let Some(citations) = &answer.citations {
            if !citations.is_empty() {
                output.push_str("\n\nCitations:\n");
                for citation in citations {
                    output.push_str(&format!("  \"{}\" - {}\n", citation.quote, citation.source));
                }
            }
        }

        output
    }
}
