//! Run driver: options, validation, rendering, commit and manifest.
//!
//! Everything is rendered in memory before the first output stream is
//! opened, so configuration, validation and dispatch errors leave no files
//! behind. Only an I/O failure while committing can leave a partial run.

use crate::file::{FileGenerator, GeneratedFile, PlannedFile};
use crate::manifest::Manifest;
use crate::output::{OutputDirectory, check_relative_path};
use as3gen_core::{GeneratorError, GeneratorOptions, GeneratorResult, SchemaFile};
use std::io::Write;
use tracing::{debug, info};

/// Generate every file for `schema` into `output`.
///
/// `parameter` is the comma-separated option string. Returns the manifest
/// of written files, which is also written to `output_list_file` when that
/// option is set.
pub fn generate(
    schema: &SchemaFile,
    parameter: &str,
    output: &mut dyn OutputDirectory,
) -> GeneratorResult<Manifest> {
    let options = GeneratorOptions::parse(parameter)?;
    generate_with_options(schema, &options, output)
}

/// [`generate`] with already parsed options and the default placement.
pub fn generate_with_options(
    schema: &SchemaFile,
    options: &GeneratorOptions,
    output: &mut dyn OutputDirectory,
) -> GeneratorResult<Manifest> {
    run(&FileGenerator::new(schema), options, output)
}

/// Render and commit one file generator's output.
pub fn run(
    file_generator: &FileGenerator<'_>,
    options: &GeneratorOptions,
    output: &mut dyn OutputDirectory,
) -> GeneratorResult<Manifest> {
    let planned = plan(file_generator, options)?;
    debug!(
        schema = %file_generator.schema().name,
        files = planned.len(),
        placement = ?file_generator.placement(),
        "planned generation"
    );

    let (files, manifest) = render(file_generator)?;
    commit(&files, output)?;

    if let Some(list_file) = options.output_list_file() {
        manifest.write_to(output, list_file)?;
        info!(path = list_file, entries = manifest.len(), "wrote output list");
    }
    Ok(manifest)
}

/// Validate a run and list the files it would produce, without rendering.
///
/// The output list file must stay below the output root and may not share
/// a path with a generated file.
pub fn plan(
    file_generator: &FileGenerator<'_>,
    options: &GeneratorOptions,
) -> GeneratorResult<Vec<PlannedFile>> {
    if let Some(list_file) = options.output_list_file() {
        check_relative_path(list_file).map_err(|reason| GeneratorError::InvalidOutputPath {
            path: list_file.to_string(),
            reason: reason.to_string(),
        })?;
    }

    let planned = file_generator.plan()?;

    if let Some(list_file) = options.output_list_file()
        && let Some(clash) = planned.iter().find(|file| file.path == list_file)
    {
        return Err(GeneratorError::PathCollision {
            path: list_file.to_string(),
            first: clash.type_name.clone(),
            second: as3gen_core::OUTPUT_LIST_FILE.to_string(),
        });
    }
    Ok(planned)
}

/// Render every top-level record, folding the produced paths into a manifest.
fn render(file_generator: &FileGenerator<'_>) -> GeneratorResult<(Vec<GeneratedFile>, Manifest)> {
    let files = file_generator.generate_all()?;
    let mut manifest = Manifest::new();
    for file in &files {
        manifest.push(file.path.as_str());
    }
    Ok((files, manifest))
}

fn commit(files: &[GeneratedFile], output: &mut dyn OutputDirectory) -> GeneratorResult<()> {
    for file in files {
        let mut stream = output
            .open(&file.path)
            .map_err(|source| GeneratorError::io(&file.path, source))?;
        stream
            .write_all(file.contents.as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|source| GeneratorError::io(&file.path, source))?;
        info!(path = %file.path, bytes = file.contents.len(), "wrote generated file");
    }
    Ok(())
}
