//! as3gen-wire - Wire format and reference record runtime
//!
//! This crate provides:
//! - [`WireType`], tag helpers and the varint/zigzag codecs used by the
//!   emitted `CodedOutputStream`/`CodedInputStream` calls
//! - [`WireWriter`] and [`WireReader`] for encoding and decoding
//! - [`DynamicRecord`] and [`RecordBuilder`], an executable model of the
//!   generated classes' merge, parse, serialize and size semantics

mod record;
mod wire;

pub use record::{DynamicRecord, RECURSION_LIMIT, RecordBuilder, TypeRegistry, Value};
pub use wire::{
    MAX_VARINT_LEN, TAG_TYPE_BITS, WireError, WireReader, WireResult, WireType, WireWriter,
    decode_zigzag32, decode_zigzag64, encode_zigzag32, encode_zigzag64, make_tag, split_tag,
    tag_size, varint_size,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DynamicRecord, RecordBuilder, TypeRegistry, Value, WireError, WireResult, WireType,
    };
}
