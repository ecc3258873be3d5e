//! as3gen - Descriptor-driven ActionScript 3 code generator
//!
//! Turns a [`SchemaFile`](as3gen_core::SchemaFile) into `.as` source files:
//! one value class and builder class per record type, written through an
//! [`OutputDirectory`].
//!
//! # Example
//!
//! ```
//! use as3gen::{MemoryOutputDirectory, generate};
//! use as3gen_core::{Field, FieldType, RecordType, SchemaFile};
//!
//! let schema = SchemaFile::new("widget.proto", "a.b")
//!     .with_message(RecordType::new("Widget").with_field(Field::new("id", 1, FieldType::Int32)));
//! let mut output = MemoryOutputDirectory::new();
//!
//! let manifest = generate(&schema, "", &mut output)?;
//!
//! assert_eq!(manifest.files(), ["a/b/Widget.as"]);
//! # Ok::<(), as3gen_core::GeneratorError>(())
//! ```

pub mod as3_types;
pub mod field;
pub mod file;
pub mod generator;
pub mod manifest;
pub mod message;
pub mod naming;
pub mod output;
pub mod printer;

pub use field::{FieldGenerator, FieldGeneratorMap, FieldScope, FieldVariant, Phase, make_field_generator};
pub use file::{
    FileGenerator, GeneratedFile, NESTED_PLACEMENT, NestedPlacement, PlannedFile,
    validate_namespace,
};
pub use generator::{generate, generate_with_options, plan, run};
pub use manifest::Manifest;
pub use message::{ClassAccess, MessageGenerator};
pub use output::{FsOutputDirectory, MemoryOutputDirectory, OutputDirectory, check_relative_path};
pub use printer::{Printer, Variables};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        FileGenerator, FsOutputDirectory, Manifest, MemoryOutputDirectory, NestedPlacement,
        OutputDirectory, generate,
    };
    pub use as3gen_core::prelude::*;
}
