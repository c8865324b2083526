//! `picklist`: load key/value options from a JSON file through the list cache.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tokenward_cache::{CachedList, ListSource};
use tokenward_core::config::AppConfig;
use tokenward_core::error::{AppError, ErrorKind};
use tokenward_core::result::AppResult;
use tokenward_entity::keyvalue::KeyValue;

use crate::output::{self, OutputFormat};

/// Arguments for the picklist command
#[derive(Debug, Args)]
pub struct PicklistArgs {
    /// JSON file holding an array of key/value entries
    pub file: PathBuf,
    /// Only show entries of this picklist
    #[arg(long)]
    pub name: Option<String>,
}

/// Picklist display row
#[derive(Debug, Serialize, Tabled)]
struct KeyValueRow {
    /// Picklist name
    #[tabled(rename = "Name")]
    name: String,
    /// Stored value
    #[tabled(rename = "Value")]
    value: String,
    /// Display text
    #[tabled(rename = "Text")]
    text: String,
}

/// Reads key/value entries from a JSON file.
struct JsonFileSource {
    path: PathBuf,
}

#[async_trait]
impl ListSource<KeyValue> for JsonFileSource {
    async fn load(&self) -> AppResult<Vec<KeyValue>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::NotFound,
                format!("Cannot read picklist file {}", self.path.display()),
                e,
            )
        })?;

        let mut items: Vec<KeyValue> = serde_json::from_str(&raw)?;
        items.sort_by(KeyValue::picklist_order);
        Ok(items)
    }
}

/// Execute the picklist command
pub async fn execute(
    args: &PicklistArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let source: Arc<dyn ListSource<KeyValue>> = Arc::new(JsonFileSource {
        path: args.file.clone(),
    });
    let list = CachedList::from_config("picklist", source, &config.picklist);
    list.initialize().await?;

    let rows: Vec<KeyValueRow> = list
        .data_source()
        .await
        .iter()
        .filter(|kv| args.name.as_deref().is_none_or(|name| kv.name == name))
        .map(|kv| KeyValueRow {
            name: kv.name.clone(),
            value: kv.value.clone(),
            text: kv.text.clone().unwrap_or_default(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
