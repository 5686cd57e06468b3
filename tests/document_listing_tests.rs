mod common;

use common::Harness;
use expertmem::Document;

async fn seed(h: &Harness) {
    let rows = [
        ("Atlas", "https://example.com/atlas.pdf", "peds", None, None),
        (
            "Protocol",
            "https://example.com/protocol.pdf",
            "peds",
            Some("DrSmith"),
            None,
        ),
        (
            "Acme notes",
            "https://example.com/acme.pdf",
            "peds",
            Some("DrSmith"),
            Some("acme"),
        ),
        (
            "Globex notes",
            "https://example.com/globex.pdf",
            "peds",
            Some("DrSmith"),
            Some("globex"),
        ),
        (
            "Cardio atlas",
            "https://example.com/cardio.pdf",
            "cardio",
            None,
            None,
        ),
    ];

    for (i, (name, link, domain, created_by, client)) in rows.iter().enumerate() {
        let document = Document::new(
            name.to_string(),
            link.to_string(),
            domain.to_string(),
            created_by.map(str::to_string),
            client.map(str::to_string),
            format!("file_seed_{}", i),
        );
        h.documents().insert(&document).await.expect("seed document");
    }
}

#[tokio::test]
async fn client_filter_takes_priority() {
    let h = Harness::new();
    seed(&h).await;

    let documents = h
        .list_documents()
        .execute(Some("peds"), Some("DrSmith"), Some("acme"))
        .await
        .expect("list");

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].name(), "Acme notes");
}

#[tokio::test]
async fn creator_filter_excludes_client_scoped_documents() {
    let h = Harness::new();
    seed(&h).await;

    let documents = h
        .list_documents()
        .execute(Some("peds"), Some("DrSmith"), None)
        .await
        .expect("list");

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].name(), "Protocol");
}

#[tokio::test]
async fn domain_filter_returns_only_defaults() {
    let h = Harness::new();
    seed(&h).await;

    let documents = h
        .list_documents()
        .execute(Some("peds"), None, None)
        .await
        .expect("list");

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].name(), "Atlas");
}

#[tokio::test]
async fn no_filters_returns_nothing() {
    let h = Harness::new();
    seed(&h).await;

    let documents = h
        .list_documents()
        .execute(None, None, None)
        .await
        .expect("list");
    assert!(documents.is_empty());
}

#[tokio::test]
async fn client_names_are_distinct_and_sorted() {
    let h = Harness::new();
    seed(&h).await;

    let clients = h
        .client_names()
        .execute("DrSmith", Some("peds"))
        .await
        .expect("client names");
    assert_eq!(clients, vec!["acme".to_string(), "globex".to_string()]);

    let clients = h
        .client_names()
        .execute("DrSmith", Some("cardio"))
        .await
        .expect("client names");
    assert!(clients.is_empty());
}
