//! Integration tests for login, principal resolution and logout.

mod helpers;

use std::sync::Arc;

use tokenward_auth::{InMemoryUserDirectory, SessionContext};
use tokenward_core::types::{TenantId, UserId};
use uuid::Uuid;

use helpers::{TestSession, acme_user};

#[tokio::test]
async fn test_acme_session_survives_access_expiry() {
    let mut session = TestSession::new();
    let user = acme_user();
    session.register(&user);

    session.manager.login(&user).await.unwrap();
    let after_login = session.context.snapshot();
    assert_eq!(after_login.user.user_id, Some(UserId(Uuid::from_u128(42))));
    assert_eq!(after_login.tenant.tenant_id, Some(TenantId(Uuid::from_u128(7))));
    assert_eq!(after_login.tenant.tenant_name.as_deref(), Some("Acme"));

    let stored = session.stored_pair().await.unwrap();
    assert_eq!(session.manager.access_token(), Some(stored.access_token.as_str()));
    assert_eq!(session.manager.refresh_token(), Some(stored.refresh_token.as_str()));

    session.expire_stored_access_token(&user).await;
    session.context.clear();

    let principal = session.manager.get_principal().await;
    assert!(principal.is_authenticated());
    assert_eq!(principal.user_id(), Some(user.id));
    assert_eq!(session.context.snapshot(), after_login);
}

#[tokio::test]
async fn test_login_then_principal_keeps_context() {
    let mut session = TestSession::new();
    let user = acme_user();

    session.manager.login(&user).await.unwrap();
    let after_login = session.context.snapshot();

    let principal = session.manager.get_principal().await;
    assert!(principal.is_authenticated());
    assert_eq!(principal.tenant_name(), Some("Acme"));
    assert_eq!(session.context.snapshot(), after_login);
}

#[tokio::test]
async fn test_no_stored_tokens_is_anonymous() {
    let mut session = TestSession::new();

    let principal = session.manager.get_principal().await;
    assert!(!principal.is_authenticated());
    assert!(!session.context.is_bound());
    assert!(session.manager.access_token().is_none());
}

#[tokio::test]
async fn test_expired_pair_is_anonymous_and_kept() {
    let mut session = TestSession::new();
    let user = acme_user();
    session.manager.login(&user).await.unwrap();
    session.expire_stored_tokens(&user).await;
    let before = session.raw_stored().await;

    assert!(!session.manager.get_principal().await.is_authenticated());
    assert!(before.is_some());
    assert_eq!(session.raw_stored().await, before);
}

#[tokio::test]
async fn test_garbage_payload_is_evicted() {
    let mut session = TestSession::new();
    session.manager.login(&acme_user()).await.unwrap();
    session.corrupt_stored_payload().await;

    assert!(!session.manager.get_principal().await.is_authenticated());
    assert_eq!(session.raw_stored().await, None);
}

#[tokio::test]
async fn test_rotated_protection_key_is_evicted() {
    let mut session = TestSession::new();
    session.manager.login(&acme_user()).await.unwrap();
    assert!(session.raw_stored().await.is_some());

    session.rotate_protection_key([9u8; 32]);

    assert!(!session.manager.get_principal().await.is_authenticated());
    assert_eq!(session.raw_stored().await, None);
}

#[tokio::test]
async fn test_get_principal_is_idempotent() {
    let mut session = TestSession::new();
    session.manager.login(&acme_user()).await.unwrap();

    let first = session.manager.get_principal().await;
    let context_after_first = session.context.snapshot();
    let raw_after_first = session.raw_stored().await;

    let second = session.manager.get_principal().await;
    assert_eq!(first, second);
    assert_eq!(session.context.snapshot(), context_after_first);
    assert_eq!(session.raw_stored().await, raw_after_first);
}

#[tokio::test]
async fn test_logout_removes_storage_only() {
    let mut session = TestSession::new();
    session.manager.login(&acme_user()).await.unwrap();
    let bound = session.context.snapshot();

    session.manager.remove_auth_data_from_storage().await.unwrap();
    assert_eq!(session.raw_stored().await, None);
    assert!(session.manager.access_token().is_some());
    assert_eq!(session.context.snapshot(), bound);

    assert!(!session.manager.get_principal().await.is_authenticated());
}

#[tokio::test]
async fn test_sessions_do_not_share_tokens() {
    let mut first = TestSession::new();
    let mut second =
        TestSession::on_cache(first.cache.clone(), Arc::new(InMemoryUserDirectory::new()));

    first.manager.login(&acme_user()).await.unwrap();

    assert!(first.manager.get_principal().await.is_authenticated());
    assert!(!second.manager.get_principal().await.is_authenticated());
}

#[tokio::test]
async fn test_context_is_ambient_within_scope() {
    let mut session = TestSession::new();
    let context = session.context.clone();

    let tenant_name = context
        .scope(async move {
            session.manager.login(&acme_user()).await.unwrap();
            SessionContext::try_current().and_then(|c| c.tenant().tenant_name)
        })
        .await;

    assert_eq!(tenant_name.as_deref(), Some("Acme"));
}
