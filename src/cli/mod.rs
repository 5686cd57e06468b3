use clap::Subcommand;

/// Parses one `name=reference` document argument.
pub fn parse_document(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, link)| (name.to_string(), link.to_string()))
        .filter(|(name, link)| !name.is_empty() && !link.is_empty())
        .ok_or_else(|| format!("expected name=reference, got '{}'", s))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a domain and create its default store
    CreateDomain { name: String },

    /// List all registered domains
    ListDomains,

    /// Show a domain's default store id
    DomainStore { domain: String },

    /// Register an expert under an existing domain
    CreateExpert {
        name: String,

        #[arg(short, long)]
        domain: String,

        #[arg(short, long, default_value = "")]
        context: String,

        /// Create a dedicated store instead of sharing the domain default
        #[arg(long)]
        own_store: bool,
    },

    /// List all registered experts
    ListExperts,

    /// Show an expert's preferred store id
    ExpertStore { expert: String },

    /// List client names an expert has ingested documents for
    Clients {
        expert: String,

        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Show an expert's context
    GetContext { expert: String },

    /// Replace an expert's context
    SetContext { expert: String, context: String },

    /// Show the store id for an expert/client pair
    ClientStore { expert: String, client: String },

    /// Initialize an expert's store references from its domain
    InitExpertStore {
        expert: String,

        /// Point the preferred store at the domain default
        #[arg(long)]
        use_domain_default: bool,
    },

    /// Get or create an expert's dedicated store
    UpdateExpertStore { expert: String },

    /// Get or create a client-scoped store for an expert
    CreateClientStore { expert: String, client: String },

    /// Attach documents (name=reference) to a domain's default store
    AddDomainFiles {
        domain: String,

        #[arg(value_parser = parse_document, required = true)]
        documents: Vec<(String, String)>,
    },

    /// Attach documents to an expert's store, or a client's with --client
    AddExpertFiles {
        expert: String,

        #[arg(short = 'C', long)]
        client: Option<String>,

        #[arg(value_parser = parse_document, required = true)]
        documents: Vec<(String, String)>,
    },

    /// Look a store up by owner filters
    FindStore {
        #[arg(long)]
        domain: Option<String>,

        #[arg(long)]
        expert: Option<String>,

        #[arg(long)]
        client: Option<String>,
    },

    /// Replace a store's document mapping by store id
    UpdateStore {
        store_id: String,

        #[arg(value_parser = parse_document)]
        documents: Vec<(String, String)>,
    },

    /// Show the engine's status for one ingestion batch
    BatchStatus { store_id: String, batch_id: String },

    /// Delete an expert's preferred store by explicit id
    DeleteExpertStore { expert: String, store_id: String },

    /// Delete the store owned by a domain, an expert, or an expert/client pair
    DeleteMemory {
        #[arg(long)]
        domain: Option<String>,

        #[arg(long)]
        expert: Option<String>,

        #[arg(long)]
        client: Option<String>,
    },

    /// List documents by domain, creator, and client filters
    ListDocuments {
        #[arg(long)]
        domain: Option<String>,

        #[arg(long)]
        created_by: Option<String>,

        #[arg(long)]
        client: Option<String>,
    },

    /// Ask an expert a question against the chosen memory tier
    Query {
        expert: String,

        text: String,

        /// One of: llm, domain, expert, client
        #[arg(short, long, default_value = "expert")]
        memory: String,

        #[arg(long)]
        client: Option<String>,
    },
}
