mod common;

use common::{mapping, Harness};
use expertmem::{OwnerTuple, StoreOwner};

#[tokio::test]
async fn domain_default_store_is_resolved_idempotently() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");

    let first = h
        .resolver()
        .resolve_domain_store("peds")
        .await
        .expect("first resolution");
    let second = h
        .resolver()
        .resolve_domain_store("peds")
        .await
        .expect("second resolution");

    assert!(!first.created, "store was created alongside the domain");
    assert!(!second.created);
    assert_eq!(first.store_id, second.store_id);
}

#[tokio::test]
async fn domain_without_default_gets_one_created_once() {
    let h = Harness::new();
    // Seed a domain row with no default store, as if its store was deleted.
    h.domains()
        .insert(&expertmem::Domain::new("peds".to_string(), None))
        .await
        .expect("seed domain");

    let first = h
        .resolver()
        .resolve_domain_store("peds")
        .await
        .expect("first resolution");
    let second = h
        .resolver()
        .resolve_domain_store("peds")
        .await
        .expect("second resolution");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.store_id, second.store_id);
    assert_eq!(first.store_name, "Default_peds");
}

#[tokio::test]
async fn opted_in_expert_shares_domain_default() {
    let h = Harness::new();
    let domain = h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "pediatrician", true)
        .await
        .expect("create expert");

    let expert = h.list_experts().find("DrSmith").await.expect("find expert");
    assert_eq!(expert.preferred_store_id(), domain.default_store_id());
    assert_eq!(expert.default_store_id(), domain.default_store_id());
}

#[tokio::test]
async fn opted_out_expert_gets_dedicated_store() {
    let h = Harness::new();
    let domain = h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "pediatrician", false)
        .await
        .expect("create expert");

    let expert = h.list_experts().find("DrSmith").await.expect("find expert");
    assert_eq!(expert.default_store_id(), domain.default_store_id());
    assert!(expert.has_dedicated_store());

    let record = h
        .registry()
        .find(&OwnerTuple::expert("peds", "DrSmith"))
        .await
        .expect("registry lookup")
        .expect("record registered");
    assert_eq!(record.owner(), StoreOwner::Expert);
    assert_eq!(Some(record.store_id()), expert.preferred_store_id());
}

#[tokio::test]
async fn dedicated_store_is_created_at_most_once() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", false)
        .await
        .expect("create expert");

    let resolver = h.resolver();
    let first = resolver
        .ensure_dedicated_store("DrSmith")
        .await
        .expect("first call");
    let second = resolver
        .ensure_dedicated_store("DrSmith")
        .await
        .expect("second call");

    assert!(!first.created, "store existed from expert creation");
    assert!(!second.created);
    assert_eq!(first.store_id, second.store_id);
}

#[tokio::test]
async fn opted_in_expert_flips_to_dedicated_store_on_demand() {
    let h = Harness::new();
    let domain = h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", true)
        .await
        .expect("create expert");

    let resolved = h
        .resolver()
        .ensure_dedicated_store("DrSmith")
        .await
        .expect("dedicated store");

    assert!(resolved.created);
    assert_eq!(resolved.store_name, "DrSmith_peds");
    let expert = h.list_experts().find("DrSmith").await.expect("find expert");
    assert_ne!(expert.preferred_store_id(), domain.default_store_id());
}

#[tokio::test]
async fn client_resolution_leaves_no_registry_trace() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", true)
        .await
        .expect("create expert");

    let resolved = h
        .resolver()
        .resolve_client_store("DrSmith", "acme")
        .await
        .expect("client resolution");

    assert!(resolved.created);
    assert_eq!(resolved.store_name, "DrSmith_acme_peds");

    let record = h
        .registry()
        .find(&OwnerTuple::client("peds", "DrSmith", "acme"))
        .await
        .expect("registry lookup");
    assert!(record.is_none(), "bare resolution must not register a record");
}

#[tokio::test]
async fn client_resolution_reuses_registered_store() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", true)
        .await
        .expect("create expert");

    h.add_expert_files()
        .execute(
            "DrSmith",
            Some("acme"),
            &mapping(&[("notes", "https://example.com/notes.pdf")]),
        )
        .await
        .expect("attach client files");

    let record = h
        .registry()
        .find(&OwnerTuple::client("peds", "DrSmith", "acme"))
        .await
        .expect("registry lookup")
        .expect("record registered after ingestion");

    let resolved = h
        .resolver()
        .resolve_client_store("DrSmith", "acme")
        .await
        .expect("client resolution");
    assert!(!resolved.created);
    assert_eq!(resolved.store_id, record.store_id());
}

#[tokio::test]
async fn expert_creation_fails_without_domain_default() {
    let h = Harness::new();
    h.domains()
        .insert(&expertmem::Domain::new("peds".to_string(), None))
        .await
        .expect("seed domain");

    let err = h
        .create_expert()
        .execute("DrSmith", "peds", "", true)
        .await
        .expect_err("no default store to copy");
    assert!(err.is_invalid_request());
}

#[tokio::test]
async fn resolution_for_unknown_expert_fails() {
    let h = Harness::new();
    let err = h
        .resolver()
        .ensure_dedicated_store("DrWho")
        .await
        .expect_err("unknown expert");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn duplicate_domain_is_rejected() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");

    let err = h
        .create_domain()
        .execute("peds")
        .await
        .expect_err("duplicate domain");
    assert!(err.is_conflict());
}
