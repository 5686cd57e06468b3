mod common;

use common::{mapping, Harness};
use expertmem::{Answer, MemoryType, FALLBACK_ANSWER};

async fn seed_expert(h: &Harness, own_store: bool) {
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "pediatric cardiology", !own_store)
        .await
        .expect("create expert");
}

#[tokio::test]
async fn llm_memory_uses_no_stores() {
    let h = Harness::new();
    seed_expert(&h, true).await;

    h.query()
        .execute("DrSmith", "hello", MemoryType::Llm, None)
        .await
        .expect("query");

    let queries = h.engine.queries().await;
    assert_eq!(queries.len(), 1);
    assert!(
        queries[0].store_ids.is_empty(),
        "llm memory must not retrieve, whatever stores the expert has"
    );
}

#[tokio::test]
async fn expert_memory_targets_the_preferred_store() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "pediatric cardiology", true)
        .await
        .expect("create expert");

    let domain = h.list_domains().find("peds").await.expect("find domain");
    let s0 = domain.default_store_id().expect("default store");

    h.query()
        .execute("DrSmith", "dosage guidance?", MemoryType::Expert, None)
        .await
        .expect("query");

    let queries = h.engine.queries().await;
    assert_eq!(queries[0].store_ids, vec![s0.to_string()]);
    assert_eq!(queries[0].system_context, "pediatric cardiology");
}

#[tokio::test]
async fn domain_memory_targets_the_domain_default() {
    let h = Harness::new();
    seed_expert(&h, true).await;
    let domain = h.list_domains().find("peds").await.expect("find domain");

    h.query()
        .execute("DrSmith", "what is covered?", MemoryType::Domain, None)
        .await
        .expect("query");

    let queries = h.engine.queries().await;
    assert_eq!(
        queries[0].store_ids,
        vec![domain.default_store_id().expect("store").to_string()]
    );
}

#[tokio::test]
async fn client_memory_requires_a_client_name() {
    let h = Harness::new();
    seed_expert(&h, true).await;

    let err = h
        .query()
        .execute("DrSmith", "q", MemoryType::Client, None)
        .await
        .expect_err("missing client name");
    assert!(err.is_invalid_request());
}

#[tokio::test]
async fn client_memory_fails_without_a_store() {
    let h = Harness::new();
    seed_expert(&h, true).await;

    let err = h
        .query()
        .execute("DrSmith", "q", MemoryType::Client, Some("acme"))
        .await
        .expect_err("no client store yet");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn client_memory_targets_the_client_store() {
    let h = Harness::new();
    seed_expert(&h, true).await;
    h.add_expert_files()
        .execute(
            "DrSmith",
            Some("acme"),
            &mapping(&[("notes", "https://example.com/notes.pdf")]),
        )
        .await
        .expect("attach client files");

    h.query()
        .execute("DrSmith", "q", MemoryType::Client, Some("acme"))
        .await
        .expect("query");

    let queries = h.engine.queries().await;
    assert_eq!(queries.last().expect("query recorded").store_ids.len(), 1);
}

#[tokio::test]
async fn expert_memory_without_a_store_is_not_found() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", false)
        .await
        .expect("create expert");

    // Tear the preferred store down, then query expert memory.
    let expert = h.list_experts().find("DrSmith").await.expect("find expert");
    let store_id = expert.preferred_store_id().expect("store").to_string();
    h.delete_store()
        .delete_expert_store("DrSmith", &store_id)
        .await
        .expect("delete store");

    let err = h
        .query()
        .execute("DrSmith", "q", MemoryType::Expert, None)
        .await
        .expect_err("preferred store gone");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn empty_answers_are_replaced_with_the_fallback() {
    let h = Harness::new();
    seed_expert(&h, true).await;
    h.engine.set_answer(Answer::new("")).await;

    let answer = h
        .query()
        .execute("DrSmith", "q", MemoryType::Llm, None)
        .await
        .expect("query");
    assert_eq!(answer.text, FALLBACK_ANSWER);
    assert!(answer.citations.is_none());
}

#[tokio::test]
async fn unknown_expert_cannot_be_queried() {
    let h = Harness::new();
    let err = h
        .query()
        .execute("DrWho", "q", MemoryType::Llm, None)
        .await
        .expect_err("unknown expert");
    assert!(err.is_not_found());
}
