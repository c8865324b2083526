//! `issue`: log a user in and print the token pair.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tokenward_auth::{JwtEncoder, LoginService};
use tokenward_core::config::AppConfig;
use tokenward_core::error::AppError;
use tokenward_core::types::{TenantId, UserId};
use tokenward_entity::user::ApplicationUser;

use crate::output::{self, OutputFormat};

/// Arguments for the issue command
#[derive(Debug, Args)]
pub struct IssueArgs {
    /// Username to put in the tokens
    #[arg(long)]
    pub username: String,
    /// User ID (random when omitted)
    #[arg(long)]
    pub user_id: Option<UserId>,
    /// Tenant ID
    #[arg(long)]
    pub tenant_id: Option<TenantId>,
    /// Tenant display name
    #[arg(long, requires = "tenant_id")]
    pub tenant_name: Option<String>,
}

/// Token display row
#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    /// Token type
    #[tabled(rename = "Type")]
    token_type: &'static str,
    /// Expiry
    #[tabled(rename = "Expires")]
    expires_at: String,
    /// Encoded token
    #[tabled(rename = "Token")]
    token: String,
}

/// Execute the issue command
pub async fn execute(
    args: &IssueArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut user = ApplicationUser::new(&args.username);
    if let Some(id) = args.user_id {
        user = user.with_id(id);
    }
    user.tenant_id = args.tenant_id;
    user.tenant_name = args.tenant_name.clone();

    let pair = JwtEncoder::new(&config.auth).login(&user).await?;

    match format {
        OutputFormat::Json => output::print_json(&pair),
        OutputFormat::Table => {
            output::print_kv("User ID", &user.id.to_string());
            output::print_kv("Tenant ID", &output::or_dash(user.tenant_id));
            let rows = [
                TokenRow {
                    token_type: "access",
                    expires_at: pair.access_expires_at.to_rfc3339(),
                    token: pair.access_token.clone(),
                },
                TokenRow {
                    token_type: "refresh",
                    expires_at: pair.refresh_expires_at.to_rfc3339(),
                    token: pair.refresh_token.clone(),
                },
            ];
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
