use serde::{Deserialize, Serialize};

/// Query-time selector choosing which store tier (or none) to retrieve from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    /// Plain language-model call, no retrieval augmentation.
    Llm,
    Domain,
    Expert,
    Client,
}

impl MemoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryType::Llm => "llm",
            MemoryType::Domain => "domain",
            MemoryType::Expert => "expert",
            MemoryType::Client => "client",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "llm" => Some(MemoryType::Llm),
            "domain" => Some(MemoryType::Domain),
            "expert" => Some(MemoryType::Expert),
            "client" => Some(MemoryType::Client),
            _ => None,
        }
    }
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supporting quote extracted from retrieved content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub quote: String,
    pub source: String,
}

/// Normalized query answer: the text field is always a non-empty string and
/// citations are present only when the upstream returned a well-formed list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub citations: Option<Vec<Citation>>,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: None,
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = Some(citations);
        self
    }
}
