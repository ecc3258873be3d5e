//! `as3gen generate`

use anyhow::{Context, Result};
use as3gen::FsOutputDirectory;
use as3gen_core::SchemaFile;
use std::path::Path;
use tracing::{debug, info};

/// Generate sources for the schema at `schema` under `output`.
pub fn run(schema: &Path, output: &Path, parameter: &str) -> Result<()> {
    let schema_file = load_schema(schema)?;
    info!(
        schema = %schema.display(),
        output = %output.display(),
        records = schema_file.record_count(),
        "generating sources"
    );
    let mut directory = FsOutputDirectory::new(output);

    let manifest = as3gen::generate(&schema_file, parameter, &mut directory)
        .with_context(|| format!("Failed to generate sources for {}", schema.display()))?;
    info!(files = manifest.len(), "generation complete");

    println!(
        "Generated {} file(s) in {}",
        manifest.len(),
        output.display()
    );
    for path in &manifest {
        println!("  {path}");
    }
    Ok(())
}

/// Load a schema description, TOML or JSON by extension.
pub fn load_schema(path: &Path) -> Result<SchemaFile> {
    let schema = SchemaFile::from_path(path)
        .with_context(|| format!("Failed to load schema: {}", path.display()))?;
    debug!(path = %path.display(), name = %schema.name, "loaded schema");
    Ok(schema)
}
