//! Per-schema file planning and rendering.
//!
//! A [`FileGenerator`] turns every top-level record type of a schema into
//! one primary `.as` file. Nested record types are placed according to the
//! generator's [`NestedPlacement`]: in their own sibling files (the default)
//! or inline, after the package block of the enclosing file.

use crate::message::{ClassAccess, MessageGenerator};
use crate::naming;
use crate::printer::{Printer, Variables};
use as3gen_core::{GeneratorError, GeneratorResult, RecordType, SchemaFile};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Where nested record types are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedPlacement {
    /// After the package block of the enclosing top-level file.
    Inline,
    /// In a file of their own, next to the enclosing top-level file.
    Sibling,
}

/// Placement used by [`FileGenerator::new`].
pub const NESTED_PLACEMENT: NestedPlacement = NestedPlacement::Sibling;

const HEADER: &str = "\
// Generated by the protocol buffer compiler.  DO NOT EDIT!
// source: $filename$

";

const IMPORTS: &str = "\
import com.google.protobuf.CodedInputStream;
import com.google.protobuf.CodedOutputStream;
import flash.utils.ByteArray;
";

/// A file the generator will produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    /// Path relative to the output root.
    pub path: String,
    /// Emitted class name (`Outer_Inner`).
    pub class_name: String,
    /// Schema type name (`Outer.Inner`).
    pub type_name: String,
}

/// A rendered file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub contents: String,
}

/// Check that a namespace maps to a relative directory.
///
/// The empty namespace is valid; otherwise every dot-separated segment
/// must be an identifier and not a reserved word.
pub fn validate_namespace(namespace: &str) -> GeneratorResult<()> {
    if namespace.is_empty() {
        return Ok(());
    }

    for segment in namespace.split('.') {
        let reason = if segment.is_empty() {
            Some("empty segment".to_string())
        } else if !naming::is_identifier(segment) {
            Some(format!("segment `{segment}` is not an identifier"))
        } else if naming::is_keyword(segment) {
            Some(format!("segment `{segment}` is a reserved word"))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(GeneratorError::InvalidNamespace {
                namespace: namespace.to_string(),
                reason,
            });
        }
    }
    Ok(())
}

/// Plans and renders the files for one schema.
#[derive(Debug, Clone, Copy)]
pub struct FileGenerator<'a> {
    schema: &'a SchemaFile,
    placement: NestedPlacement,
}

impl<'a> FileGenerator<'a> {
    pub fn new(schema: &'a SchemaFile) -> Self {
        Self {
            schema,
            placement: NESTED_PLACEMENT,
        }
    }

    pub fn with_placement(mut self, placement: NestedPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn schema(&self) -> &'a SchemaFile {
        self.schema
    }

    pub fn placement(&self) -> NestedPlacement {
        self.placement
    }

    /// The output namespace.
    pub fn namespace(&self) -> &'a str {
        self.schema.namespace()
    }

    /// Check the namespace and that no two planned files share a path.
    pub fn validate(&self) -> GeneratorResult<()> {
        self.plan().map(|_| ())
    }

    /// Every file this generator will produce, in manifest order.
    ///
    /// A top-level file is followed by its siblings, depth first.
    pub fn plan(&self) -> GeneratorResult<Vec<PlannedFile>> {
        validate_namespace(self.namespace())?;

        let mut planned = Vec::new();
        let mut owners = HashMap::new();
        for record in &self.schema.messages {
            self.plan_record(record, None, None, &mut planned, &mut owners)?;
        }
        Ok(planned)
    }

    fn plan_record(
        &self,
        record: &RecordType,
        scope_class: Option<&str>,
        scope_type: Option<&str>,
        planned: &mut Vec<PlannedFile>,
        owners: &mut HashMap<String, String>,
    ) -> GeneratorResult<()> {
        let class_name = naming::class_name(scope_class, &record.name);
        let type_name = match scope_type {
            Some(outer) => format!("{outer}.{}", record.name),
            None => record.name.clone(),
        };
        let path = naming::output_path(self.namespace(), &class_name);

        if let Some(first) = owners.get(&path) {
            return Err(GeneratorError::PathCollision {
                path,
                first: first.clone(),
                second: type_name,
            });
        }
        owners.insert(path.clone(), type_name.clone());
        planned.push(PlannedFile {
            path,
            class_name: class_name.clone(),
            type_name: type_name.clone(),
        });

        if self.placement == NestedPlacement::Sibling {
            for nested in &record.nested {
                self.plan_record(nested, Some(&class_name), Some(&type_name), planned, owners)?;
            }
        }
        Ok(())
    }

    /// Render the files for one top-level record: its primary file, then
    /// one sibling per nested type under [`NestedPlacement::Sibling`].
    pub fn generate(&self, record: &RecordType) -> GeneratorResult<Vec<GeneratedFile>> {
        let generator = MessageGenerator::new(record, None, &self.schema.package)?;
        let mut files = Vec::new();

        match self.placement {
            NestedPlacement::Sibling => self.render_with_siblings(&generator, &mut files)?,
            NestedPlacement::Inline => {
                let mut inline = Vec::new();
                collect_nested(&generator, &mut inline)?;
                files.push(self.render_file(&generator, &inline)?);
            }
        }
        Ok(files)
    }

    /// Render every top-level record in declaration order.
    pub fn generate_all(&self) -> GeneratorResult<Vec<GeneratedFile>> {
        self.schema
            .messages
            .iter()
            .try_fold(Vec::new(), |mut files, record| {
                files.extend(self.generate(record)?);
                Ok(files)
            })
    }

    fn render_with_siblings(
        &self,
        generator: &MessageGenerator<'_>,
        files: &mut Vec<GeneratedFile>,
    ) -> GeneratorResult<()> {
        files.push(self.render_file(generator, &[])?);
        for nested in generator.nested()? {
            self.render_with_siblings(&nested, files)?;
        }
        Ok(())
    }

    fn render_file(
        &self,
        generator: &MessageGenerator<'_>,
        inline: &[MessageGenerator<'_>],
    ) -> GeneratorResult<GeneratedFile> {
        let namespace = self.namespace();
        let mut variables = Variables::new();
        variables.insert("filename", self.schema.name.clone());
        variables.insert("package", namespace.to_string());

        let mut printer = Printer::new();
        printer.print(HEADER, &variables)?;
        if namespace.is_empty() {
            printer.print_raw("package {\n");
        } else {
            printer.print("package $package$ {\n", &variables)?;
        }
        printer.indent();
        printer.print_raw("\n");
        printer.print_raw(IMPORTS);
        printer.print_raw("\n");
        generator.generate(&mut printer, ClassAccess::Public)?;
        printer.outdent();
        printer.print_raw("\n}\n");

        if !inline.is_empty() {
            printer.print_raw("\n");
            printer.print_raw(IMPORTS);
            for nested in inline {
                printer.print_raw("\n");
                nested.generate(&mut printer, ClassAccess::FileLocal)?;
            }
        }

        let path = naming::output_path(namespace, generator.class_name());
        debug!(path = %path, class = generator.class_name(), inline = inline.len(), "rendered file");
        Ok(GeneratedFile {
            path,
            contents: printer.into_string(),
        })
    }
}

/// All nested generators below `generator`, depth first.
fn collect_nested<'a>(
    generator: &MessageGenerator<'a>,
    out: &mut Vec<MessageGenerator<'a>>,
) -> GeneratorResult<()> {
    for nested in generator.nested()? {
        let mut below = Vec::new();
        collect_nested(&nested, &mut below)?;
        out.push(nested);
        out.append(&mut below);
    }
    Ok(())
}

#[cfg(test)]
#[path = "file/file_tests.rs"]
mod file_tests;
