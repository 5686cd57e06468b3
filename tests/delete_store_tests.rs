mod common;

use common::{mapping, Harness};
use expertmem::OwnerTuple;

const URL_A: &str = "https://example.com/a.pdf";

#[tokio::test]
async fn domain_store_deletion_is_blocked_while_experts_exist() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.add_domain_files()
        .execute("peds", &mapping(&[("A", URL_A)]))
        .await
        .expect("add files");
    h.create_expert()
        .execute("DrSmith", "peds", "", true)
        .await
        .expect("create expert");

    let err = h
        .delete_store()
        .delete_by_owner(Some("peds"), None, None)
        .await
        .expect_err("experts still reference the domain");
    assert!(err.is_conflict());

    // The store survives untouched.
    let record = h
        .registry()
        .find(&OwnerTuple::domain("peds"))
        .await
        .expect("lookup");
    assert!(record.is_some());
}

#[tokio::test]
async fn domain_store_deletion_succeeds_without_experts() {
    let h = Harness::new();
    let domain = h.create_domain().execute("peds").await.expect("create domain");
    let store_id = domain.default_store_id().expect("store").to_string();
    h.add_domain_files()
        .execute("peds", &mapping(&[("A", URL_A)]))
        .await
        .expect("add files");

    let record = h
        .delete_store()
        .delete_by_owner(Some("peds"), None, None)
        .await
        .expect("delete");
    assert_eq!(record.store_id(), store_id);

    let domain = h.list_domains().find("peds").await.expect("find domain");
    assert!(domain.default_store_id().is_none());
    assert!(h
        .registry()
        .find(&OwnerTuple::domain("peds"))
        .await
        .expect("lookup")
        .is_none());
    assert!(h.engine.store_contents(&store_id).await.is_none());
}

#[tokio::test]
async fn expert_store_deletion_is_blocked_while_client_stores_exist() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", false)
        .await
        .expect("create expert");
    h.add_expert_files()
        .execute("DrSmith", Some("acme"), &mapping(&[("A", URL_A)]))
        .await
        .expect("client files");

    let err = h
        .delete_store()
        .delete_by_owner(None, Some("DrSmith"), None)
        .await
        .expect_err("client stores still reference the expert");
    assert!(err.is_conflict());
}

#[tokio::test]
async fn expert_store_deletion_succeeds_after_client_stores_go() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", false)
        .await
        .expect("create expert");
    h.add_expert_files()
        .execute("DrSmith", Some("acme"), &mapping(&[("A", URL_A)]))
        .await
        .expect("client files");

    h.delete_store()
        .delete_by_owner(None, Some("DrSmith"), Some("acme"))
        .await
        .expect("delete client store");
    h.delete_store()
        .delete_by_owner(None, Some("DrSmith"), None)
        .await
        .expect("delete expert store");

    let expert = h.list_experts().find("DrSmith").await.expect("find expert");
    assert!(expert.preferred_store_id().is_none());
}

#[tokio::test]
async fn deleting_expert_store_by_id_requires_a_match() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");
    h.create_expert()
        .execute("DrSmith", "peds", "", false)
        .await
        .expect("create expert");

    let err = h
        .delete_store()
        .delete_expert_store("DrSmith", "vs_bogus")
        .await
        .expect_err("id mismatch");
    assert!(err.is_conflict());

    let expert = h.list_experts().find("DrSmith").await.expect("find expert");
    let store_id = expert.preferred_store_id().expect("store").to_string();
    h.delete_store()
        .delete_expert_store("DrSmith", &store_id)
        .await
        .expect("matching id deletes");

    let expert = h.list_experts().find("DrSmith").await.expect("find expert");
    assert!(expert.preferred_store_id().is_none());
}

#[tokio::test]
async fn invalid_owner_combinations_are_rejected() {
    let h = Harness::new();

    let err = h
        .delete_store()
        .delete_by_owner(None, None, Some("acme"))
        .await
        .expect_err("client without expert");
    assert!(err.is_invalid_request());

    let err = h
        .delete_store()
        .delete_by_owner(None, None, None)
        .await
        .expect_err("nothing provided");
    assert!(err.is_invalid_request());
}

#[tokio::test]
async fn deleting_a_missing_store_is_not_found() {
    let h = Harness::new();
    h.create_domain().execute("peds").await.expect("create domain");

    // The domain has a default store but no registry record until files are
    // attached, so owner-based deletion has nothing to find.
    let err = h
        .delete_store()
        .delete_by_owner(Some("peds"), None, None)
        .await
        .expect_err("no record registered");
    assert!(err.is_not_found());
}
