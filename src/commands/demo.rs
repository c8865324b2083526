//! `demo`: run one session through its whole lifecycle against the
//! in-memory stack and show the bound context after each step.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use tokenward_auth::{
    AuthenticatedUserPrincipal, InMemoryUserDirectory, ProtectedTokenStorage, SessionContext,
    SessionTokenManager,
};
use tokenward_cache::CacheManager;
use tokenward_core::config::AppConfig;
use tokenward_core::error::AppError;
use tokenward_core::types::TenantId;
use tokenward_entity::user::ApplicationUser;

use crate::output::{self, OutputFormat};

/// Arguments for the demo command
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Username of the demo user
    #[arg(long, default_value = "demo")]
    pub username: String,
    /// Tenant name of the demo user
    #[arg(long, default_value = "Acme")]
    pub tenant_name: String,
}

/// One lifecycle step
#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    /// Step name
    #[tabled(rename = "Step")]
    step: &'static str,
    /// Principal authenticated after the step
    #[tabled(rename = "Authenticated")]
    authenticated: String,
    /// Bound username
    #[tabled(rename = "User")]
    user: String,
    /// Bound tenant name
    #[tabled(rename = "Tenant")]
    tenant: String,
    /// Step outcome
    #[tabled(rename = "Note")]
    note: String,
}

impl StepRow {
    fn capture(step: &'static str, authenticated: Option<bool>, note: impl Into<String>) -> Self {
        let snapshot = SessionContext::try_current()
            .map(|context| context.snapshot())
            .unwrap_or_default();

        Self {
            step,
            authenticated: output::or_dash(authenticated),
            user: output::or_dash(snapshot.user.user_name),
            tenant: output::or_dash(snapshot.tenant.tenant_name),
            note: note.into(),
        }
    }
}

/// Execute the demo command
pub async fn execute(
    args: &DemoArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let cache = Arc::new(CacheManager::new(&config.cache)?);
    let scope = Uuid::new_v4().to_string();
    let storage = Arc::new(ProtectedTokenStorage::from_config(
        cache,
        &config.storage,
        scope,
    )?);

    let user =
        ApplicationUser::new(&args.username).with_tenant(TenantId::new(), &args.tenant_name);
    let directory = Arc::new(InMemoryUserDirectory::new());
    directory.insert(user.clone());

    let context = Arc::new(SessionContext::new());
    let mut manager =
        SessionTokenManager::from_config(&config.auth, storage.clone(), directory, context.clone());

    let rows = context
        .scope(async {
            let mut rows = Vec::new();

            manager.login(&user).await?;
            rows.push(StepRow::capture("login", None, "token pair stored"));

            let principal = manager.get_principal().await;
            rows.push(StepRow::capture(
                "get_principal",
                Some(principal.is_authenticated()),
                describe(&principal),
            ));

            let refresh_token = manager.refresh_token().unwrap_or_default().to_string();
            let access_token = manager.refresh(&refresh_token).await?;
            let note = if Some(access_token.as_str()) == manager.access_token() {
                "access token reused"
            } else {
                "new access token issued"
            };
            rows.push(StepRow::capture("refresh", None, note));

            manager.logout().await?;
            rows.push(StepRow::capture("logout", None, "stored pair removed"));

            let principal = manager.get_principal().await;
            rows.push(StepRow::capture(
                "get_principal",
                Some(principal.is_authenticated()),
                describe(&principal),
            ));

            Ok::<_, AppError>(rows)
        })
        .await?;

    output::print_list(&rows, format);

    let removed = storage.clear().await?;
    if format == OutputFormat::Table {
        output::print_success(&format!(
            "Session {} finished ({removed} leftover entries cleared)",
            storage.scope()
        ));
    }
    Ok(())
}

fn describe(principal: &AuthenticatedUserPrincipal) -> String {
    match principal.user_id() {
        Some(id) => format!("principal {id}"),
        None => "anonymous".to_string(),
    }
}
