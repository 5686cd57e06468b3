mod common;

use common::{mapping, Harness};
use expertmem::{MemoryType, StoreOwner};

/// The end-to-end walkthrough: a domain, an opted-in expert, and a query
/// routed through the shared default store.
#[tokio::test]
async fn domain_expert_query_walkthrough() {
    let h = Harness::new();

    let domain = h.create_domain().execute("peds").await.expect("create domain");
    let s0 = domain.default_store_id().expect("default store").to_string();

    let outcome = h
        .create_expert()
        .execute("DrSmith", "peds", "pediatrician", true)
        .await
        .expect("create expert");
    assert!(outcome.is_clean());
    assert_eq!(outcome.value().preferred_store_id(), Some(s0.as_str()));

    // The domain's advisory member list picked the expert up.
    let domain = h.list_domains().find("peds").await.expect("find domain");
    assert!(domain.has_expert("DrSmith"));

    h.query()
        .execute("DrSmith", "When is a murmur innocent?", MemoryType::Expert, None)
        .await
        .expect("query");

    let queries = h.engine.queries().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].store_ids, vec![s0]);
    assert_eq!(queries[0].prompt, "When is a murmur innocent?");
}

#[tokio::test]
async fn creating_the_same_expert_twice_conflicts() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", true)
        .await
        .expect("create expert");

    let err = h
        .create_expert()
        .execute("DrSmith", "peds", "", true)
        .await
        .expect_err("duplicate expert name");
    assert!(err.is_conflict());
}

#[tokio::test]
async fn expert_creation_requires_the_domain() {
    let h = Harness::new();
    let err = h
        .create_expert()
        .execute("DrSmith", "peds", "", true)
        .await
        .expect_err("domain missing");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn find_store_infers_the_owner_tier() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", false)
        .await
        .expect("create expert");
    h.add_domain_files()
        .execute("peds", &mapping(&[("A", "https://example.com/a.pdf")]))
        .await
        .expect("domain files");

    let record = h
        .find_store()
        .execute(Some("peds"), None, None)
        .await
        .expect("domain lookup");
    assert_eq!(record.owner(), StoreOwner::Domain);

    let record = h
        .find_store()
        .execute(None, Some("DrSmith"), None)
        .await
        .expect("expert lookup");
    assert_eq!(record.owner(), StoreOwner::Expert);
}

#[tokio::test]
async fn find_store_rejects_ambiguous_matches() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    for expert in ["DrSmith", "DrJones"] {
        h.create_expert()
            .execute(expert, "peds", "", true)
            .await
            .expect("create expert");
        h.add_expert_files()
            .execute(
                expert,
                Some("acme"),
                &mapping(&[("A", "https://example.com/a.pdf")]),
            )
            .await
            .expect("client files");
    }

    // Two experts serve the same client; a client-only filter cannot pick one.
    let err = h
        .find_store()
        .execute(None, None, Some("acme"))
        .await
        .expect_err("ambiguous");
    assert!(err.is_invalid_request());

    let err = h
        .find_store()
        .execute(None, None, None)
        .await
        .expect_err("no filters");
    assert!(err.is_invalid_request());

    let err = h
        .find_store()
        .execute(Some("cardio"), None, None)
        .await
        .expect_err("nothing registered for that domain");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn batch_status_reports_for_known_stores_only() {
    let h = Harness::new();
    let domain = h.create_domain().execute("peds").await.expect("create domain");
    let store_id = domain.default_store_id().expect("store").to_string();

    let err = h
        .batch_status()
        .execute(&store_id, "batch_1")
        .await
        .expect_err("no record registered yet");
    assert!(err.is_not_found());

    h.add_domain_files()
        .execute("peds", &mapping(&[("A", "https://example.com/a.pdf")]))
        .await
        .expect("add files");
    let record = h
        .registry()
        .find_by_store_id(&store_id)
        .await
        .expect("lookup")
        .expect("record");
    let batch_id = record.latest_batch_id().expect("batch").to_string();

    let batch = h
        .batch_status()
        .execute(&store_id, &batch_id)
        .await
        .expect("status");
    assert_eq!(batch.id, batch_id);
    assert_eq!(batch.status, "completed");
}

#[tokio::test]
async fn expert_context_can_be_read_and_replaced() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "pediatrician", true)
        .await
        .expect("create expert");

    let context_use_case =
        expertmem::ExpertContextUseCase::new(h.experts());
    assert_eq!(context_use_case.get("DrSmith").await.expect("get"), "pediatrician");

    context_use_case
        .update("DrSmith", "pediatric cardiologist")
        .await
        .expect("update");
    assert_eq!(
        context_use_case.get("DrSmith").await.expect("get"),
        "pediatric cardiologist"
    );

    // The new context flows into subsequent queries as system context.
    h.query()
        .execute("DrSmith", "q", MemoryType::Llm, None)
        .await
        .expect("query");
    let queries = h.engine.queries().await;
    assert_eq!(queries[0].system_context, "pediatric cardiologist");
}
