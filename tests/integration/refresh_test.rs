//! Integration tests for access token refresh.

mod helpers;

use tokenward_auth::jwt::TokenType;
use tokenward_auth::{JwtDecoder, TokenValidation};
use tokenward_core::error::ErrorKind;
use tokenward_core::types::TenantId;
use tokenward_entity::user::ApplicationUser;

use helpers::{TestSession, acme_user, hours_ago};

#[tokio::test]
async fn test_refresh_issues_valid_fresh_access_token() {
    let mut session = TestSession::new();
    let user = acme_user();
    session.register(&user);
    session.manager.login(&user).await.unwrap();
    let stored = session.stored_pair().await.unwrap();
    let raw = session.raw_stored().await;

    let access_token = session.manager.refresh(&stored.refresh_token).await.unwrap();
    assert_ne!(access_token, stored.access_token);

    match JwtDecoder::access(&session.config.auth).decode(&access_token) {
        TokenValidation::Valid(validated) => {
            assert_eq!(validated.claims.user_id(), user.id);
            assert_eq!(validated.claims.tenant_name.as_deref(), Some("Acme"));
        }
        other => panic!("refreshed token should validate, got {other:?}"),
    }

    assert_eq!(session.raw_stored().await, raw);
    assert_eq!(session.stored_pair().await, Some(stored));
}

#[tokio::test]
async fn test_refresh_uses_current_directory_record() {
    let mut session = TestSession::new();
    let user = acme_user();
    session.manager.login(&user).await.unwrap();
    let stored = session.stored_pair().await.unwrap();

    let moved = user.clone().with_tenant(TenantId::new(), "Globex");
    session.register(&moved);

    let access_token = session.manager.refresh(&stored.refresh_token).await.unwrap();
    match JwtDecoder::access(&session.config.auth).decode(&access_token) {
        TokenValidation::Valid(validated) => {
            assert_eq!(validated.claims.tenant_name.as_deref(), Some("Globex"));
        }
        other => panic!("refreshed token should validate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let mut session = TestSession::new();
    let user = acme_user();
    session.register(&user);
    session.manager.login(&user).await.unwrap();
    let stored = session.stored_pair().await.unwrap();

    let err = session
        .manager
        .refresh(&stored.access_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_refresh_rejects_expired_token() {
    let session = TestSession::new();
    let user = acme_user();
    session.register(&user);

    let expired = session.mint(&user, TokenType::Refresh, hours_ago(24 * 30));
    let err = session.manager.refresh(&expired).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_refresh_unknown_user() {
    let session = TestSession::new();
    let stranger = ApplicationUser::new("stranger");

    let token = session.mint(&stranger, TokenType::Refresh, hours_ago(0));
    let err = session.manager.refresh(&token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(err.message.contains(&stranger.id.to_string()));
}

#[tokio::test]
async fn test_refresh_leaves_context_alone() {
    let mut session = TestSession::new();
    let user = acme_user();
    session.register(&user);
    session.manager.login(&user).await.unwrap();
    let stored = session.stored_pair().await.unwrap();
    let bound = session.context.snapshot();

    session.manager.refresh(&stored.refresh_token).await.unwrap();
    assert_eq!(session.context.snapshot(), bound);
    assert_eq!(session.manager.refresh_token(), Some(stored.refresh_token.as_str()));
}
