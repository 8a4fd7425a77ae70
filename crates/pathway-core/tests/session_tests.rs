mod common;

use common::{create_test_pathway, FakePlanService, EMAIL, PASSWORD};
use pathway_core::{
    models::Profile,
    store::keys,
    PathwayBuilder, PathwayError, SessionState,
};

#[tokio::test]
async fn test_sign_in_normalizes_email_and_sets_bearer() {
    let service = FakePlanService::new();
    let (_temp_dir, pathway) = create_test_pathway(service.clone()).await;
    assert_eq!(pathway.session().state(), SessionState::SignedOut);

    let session = pathway
        .session()
        .sign_in(" Ana@Example.com ", PASSWORD)
        .await
        .expect("sign in");

    assert_eq!(session.user.email, EMAIL);
    assert_eq!(session.user.display_name, "ana");
    assert_eq!(session.token, format!("token-{EMAIL}"));
    assert!(pathway.session().state().is_signed_in());
    assert_eq!(service.state().bearer.as_deref(), Some(session.token.as_str()));
    assert_eq!(service.calls(), vec![format!("login {EMAIL}")]);
}

#[tokio::test]
async fn test_display_name_comes_from_cached_profile() {
    let service = FakePlanService::new();
    let (_temp_dir, pathway) = create_test_pathway(service).await;
    pathway
        .profiles()
        .update_details(Some("Ana Souza"), None)
        .await
        .expect("profile");

    let session = pathway
        .session()
        .sign_in(EMAIL, PASSWORD)
        .await
        .expect("sign in");
    assert_eq!(session.user.display_name, "Ana Souza");
}

#[tokio::test]
async fn test_rejected_credentials_keep_server_message() {
    let service = FakePlanService::new();
    let (_temp_dir, pathway) = create_test_pathway(service.clone()).await;

    let err = pathway
        .session()
        .sign_in(EMAIL, "wrong")
        .await
        .expect_err("bad password");

    assert!(matches!(err, PathwayError::Authentication { .. }));
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!pathway.session().state().is_signed_in());
    assert_eq!(service.state().bearer, None);
}

#[tokio::test]
async fn test_empty_credentials_never_reach_the_service() {
    let service = FakePlanService::new();
    let (_temp_dir, pathway) = create_test_pathway(service.clone()).await;

    for (email, password) in [("", PASSWORD), ("   ", PASSWORD), (EMAIL, "")] {
        let err = pathway
            .session()
            .sign_in(email, password)
            .await
            .expect_err("empty input");
        assert!(matches!(err, PathwayError::InvalidInput { .. }));
    }
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let service = FakePlanService::new();
    let (temp_dir, pathway) = create_test_pathway(service).await;
    pathway
        .session()
        .sign_in(EMAIL, PASSWORD)
        .await
        .expect("sign in");
    drop(pathway);

    let restarted_service = FakePlanService::new();
    let restarted = PathwayBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_service(restarted_service.clone())
        .build()
        .await
        .expect("restart");

    let session = restarted.session().current().expect("restored session");
    assert_eq!(session.user.email, EMAIL);
    assert_eq!(
        restarted_service.state().bearer.as_deref(),
        Some(format!("token-{EMAIL}").as_str())
    );
    // Restoring is local only.
    assert!(restarted_service.calls().is_empty());
}

#[tokio::test]
async fn test_partial_session_restores_signed_out() {
    let service = FakePlanService::new();
    let (_temp_dir, pathway) = create_test_pathway(service.clone()).await;
    pathway
        .store()
        .set(keys::SESSION_TOKEN, "orphan-token")
        .await
        .expect("write");

    assert_eq!(pathway.session().restore().await, SessionState::SignedOut);
    assert_eq!(service.state().bearer, None);
}

#[tokio::test]
async fn test_sign_out_clears_session_but_keeps_progress() {
    let service = FakePlanService::new();
    let (_temp_dir, pathway) = create_test_pathway(service.clone()).await;
    pathway
        .session()
        .sign_in(EMAIL, PASSWORD)
        .await
        .expect("sign in");
    pathway.profiles().add_skill("SQL").await.expect("skill");
    pathway
        .store()
        .set(&keys::progress(pathway_core::PlanId::new(3)), "[0]")
        .await
        .expect("progress");

    pathway.session().sign_out().await.expect("sign out");

    assert_eq!(pathway.session().state(), SessionState::SignedOut);
    assert_eq!(service.state().bearer, None);
    for key in keys::SESSION_SCOPED {
        assert_eq!(pathway.store().get(key).await.expect("read"), None, "{key}");
    }
    assert_eq!(pathway.profiles().load().await.expect("profile"), Profile::default());
    assert!(pathway
        .store()
        .get(&keys::progress(pathway_core::PlanId::new(3)))
        .await
        .expect("read")
        .is_some());

    // Calls after signing out carry no token.
    let _ = pathway.session().sign_in(EMAIL, "wrong").await;
    assert_eq!(service.state().bearer_seen.last(), Some(&None));
}

#[tokio::test]
async fn test_failed_sign_out_keeps_session() {
    let service = FakePlanService::new();
    let (temp_dir, pathway) = create_test_pathway(service.clone()).await;
    pathway
        .session()
        .sign_in(EMAIL, PASSWORD)
        .await
        .expect("sign in");

    // A directory in place of the database file makes every write fail.
    let db_path = temp_dir.path().join("test.db");
    let moved = temp_dir.path().join("moved.db");
    std::fs::rename(&db_path, &moved).expect("move database");
    std::fs::create_dir(&db_path).expect("block database path");

    let err = pathway.session().sign_out().await.expect_err("sign out");
    assert!(matches!(err, PathwayError::Database { .. }), "{err:?}");
    assert!(pathway.session().state().is_signed_in());
    assert!(service.state().bearer.is_some());

    std::fs::remove_dir(&db_path).expect("unblock database path");
    std::fs::rename(&moved, &db_path).expect("restore database");
    drop(pathway);

    let restarted = PathwayBuilder::new()
        .with_database_path(Some(db_path))
        .with_service(FakePlanService::new())
        .build()
        .await
        .expect("restart");
    assert!(restarted.session().state().is_signed_in());
}

#[tokio::test]
async fn test_sign_up_reports_field_message_and_does_not_sign_in() {
    let service = FakePlanService::new();
    let (_temp_dir, pathway) = create_test_pathway(service.clone()).await;

    let err = pathway
        .session()
        .sign_up("Bruno", "bruno@example.com", "short")
        .await
        .expect_err("weak password");
    match err {
        PathwayError::Registration { message, field } => {
            assert_eq!(message, "Password must have at least 8 characters");
            assert_eq!(field.as_deref(), Some("password"));
        }
        other => panic!("expected a registration error, got {other:?}"),
    }

    pathway
        .session()
        .sign_up("Bruno", " Bruno@Example.com", "long enough")
        .await
        .expect("sign up");
    assert!(service.state().accounts.contains_key("bruno@example.com"));
    assert!(!pathway.session().state().is_signed_in());
}
