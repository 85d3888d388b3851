//! Import command - create configurations from a JSON document

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::domain::{CheckoutStorage, DeliveryMethod, DeliveryZone, DeliveryZoneId};

use super::print_json;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file of the form {"zones": [...], "methods": [...]}
    pub file: PathBuf,
}

/// Contents of an import file
#[derive(Debug, Default, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub zones: Vec<DeliveryZone>,
    #[serde(default)]
    pub methods: Vec<DeliveryMethod>,
}

/// Run the import command
pub async fn run(
    storage: &dyn CheckoutStorage,
    args: ImportArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let document: ImportDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;

    import_document(storage, document, out).await
}

/// Creates the zones of `document`, then its methods.
/// When the methods fail the zones created here are removed again, so the
/// same document can be imported once the cause is fixed.
pub async fn import_document(
    storage: &dyn CheckoutStorage,
    document: ImportDocument,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let zone_ids: Vec<DeliveryZoneId> = document.zones.iter().map(|z| z.id.clone()).collect();
    let methods = document.methods.len();

    storage.create_zone_configs(document.zones).await?;

    if let Err(err) = storage.create_method_configs(document.methods).await {
        if let Err(rollback) = storage.delete_specific_zone_configs(&zone_ids).await {
            warn!(error = %rollback, "Failed to remove zones of the failed import");
        }
        return Err(err.into());
    }

    print_json(out, &json!({ "zones": zone_ids.len(), "methods": methods }))
}
