//! `as3gen check`

use crate::generate::load_schema;
use anyhow::{Context, Result};
use as3gen::FileGenerator;
use as3gen_core::GeneratorOptions;
use std::path::Path;
use tracing::info;

/// Validate the schema and options, then print the planned files.
pub fn run(schema: &Path, parameter: &str, json: bool) -> Result<()> {
    let schema_file = load_schema(schema)?;
    let options = GeneratorOptions::parse(parameter).context("Invalid generator parameter")?;

    let planned = as3gen::plan(&FileGenerator::new(&schema_file), &options)
        .with_context(|| format!("Schema {} failed validation", schema.display()))?;
    info!(schema = %schema.display(), files = planned.len(), "schema is valid");

    if json {
        let text = serde_json::to_string_pretty(&planned).context("Failed to encode plan")?;
        println!("{text}");
    } else {
        println!("✓ {} is valid", schema.display());
        for file in &planned {
            println!("  {} ({})", file.path, file.type_name);
        }
        if let Some(list_file) = options.output_list_file() {
            println!("  {list_file} (output list)");
        }
    }
    Ok(())
}
