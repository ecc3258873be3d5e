//! as3gen-core - Descriptor tree, options and errors
//!
//! This crate provides the foundational types shared by the as3gen crates:
//! - [`SchemaFile`], [`RecordType`] and [`Field`] describing the input schema
//! - [`GeneratorOptions`] parsed from the plugin parameter string
//! - [`GeneratorError`] for error handling

pub mod descriptor;
mod error;
mod options;

pub use descriptor::{
    Cardinality, Field, FieldType, Label, RecordType, SchemaError, SchemaFile, ValueCategory,
};
pub use error::{ErrorKind, GeneratorError, GeneratorResult};
pub use options::{GeneratorOptions, OUTPUT_LIST_FILE, split_parameter};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Cardinality, Field, FieldType, GeneratorError, GeneratorOptions, GeneratorResult, Label,
        RecordType, SchemaFile, ValueCategory,
    };
}
