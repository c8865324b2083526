//! `inspect`: validate a token and print its claims.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tokenward_auth::{JwtDecoder, TokenValidation};
use tokenward_core::config::AppConfig;
use tokenward_core::error::{AppError, ErrorKind};

use crate::output::{self, OutputFormat};

/// Arguments for the inspect command
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Encoded JWT
    pub token: String,
    /// Validate as a refresh token instead of an access token
    #[arg(long)]
    pub refresh: bool,
}

/// Claim display row
#[derive(Debug, Serialize, Tabled)]
struct ClaimRow {
    /// Claim type
    #[tabled(rename = "Claim")]
    claim: String,
    /// Claim value
    #[tabled(rename = "Value")]
    value: String,
}

/// Execute the inspect command
pub async fn execute(
    args: &InspectArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let decoder = if args.refresh {
        JwtDecoder::refresh(&config.auth)
    } else {
        JwtDecoder::access(&config.auth)
    };

    match decoder.decode(&args.token) {
        TokenValidation::Valid(validated) => {
            match format {
                OutputFormat::Json => output::print_json(&validated.claims),
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "Valid {} token, expires {}",
                        decoder.expected_type(),
                        validated.claims.expires_at().to_rfc3339()
                    ));
                    let rows: Vec<ClaimRow> = validated
                        .identity
                        .claims()
                        .iter()
                        .map(|c| ClaimRow {
                            claim: c.claim_type.clone(),
                            value: c.value.clone(),
                        })
                        .collect();
                    output::print_list(&rows, format);
                }
            }
            Ok(())
        }
        TokenValidation::Invalid(reason) => {
            output::print_warning(&format!("Token rejected: {reason}"));
            Err(AppError::with_source(
                ErrorKind::Authentication,
                "Token is not valid",
                reason,
            ))
        }
        TokenValidation::CorruptPayload(e) => Err(e),
    }
}
