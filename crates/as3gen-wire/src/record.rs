//! Reference runtime for generated record types.
//!
//! [`DynamicRecord`] and [`RecordBuilder`] implement, directly over a
//! [`RecordType`] descriptor, the same behaviour the emitted ActionScript
//! classes implement: explicit presence for singular fields, recursive
//! merge of singular record fields, append-only merge of repeated fields,
//! and serialization whose size computation agrees with the bytes written.
//!
//! # Examples
//!
//! ```
//! use as3gen_core::{Field, FieldType, RecordType, SchemaFile};
//! use as3gen_wire::{DynamicRecord, TypeRegistry, Value};
//!
//! let schema = SchemaFile::new("a.proto", "demo").with_message(
//!     RecordType::new("Point")
//!         .with_field(Field::new("x", 1, FieldType::Sint32))
//!         .with_field(Field::new("y", 2, FieldType::Sint32)),
//! );
//! let registry = TypeRegistry::from_schema(&schema);
//!
//! let mut builder = registry.new_builder("Point").unwrap();
//! builder.set("x", Value::Sint32(-3)).unwrap();
//! let point = builder.build();
//!
//! let bytes = point.serialize();
//! assert_eq!(bytes.len(), point.serialized_size());
//!
//! let parsed = DynamicRecord::parse(&registry, "Point", &bytes).unwrap();
//! assert_eq!(parsed, point);
//! ```

use crate::wire::{
    WireError, WireReader, WireResult, WireType, WireWriter, decode_zigzag32, decode_zigzag64,
    encode_zigzag32, encode_zigzag64, tag_size, varint_size,
};
use as3gen_core::{Cardinality, Field, FieldType, RecordType, SchemaFile};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Deepest record nesting [`RecordBuilder::merge_from_bytes`] accepts.
pub const RECURSION_LIMIT: usize = 100;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Double(f64),
    Float(f32),
    Int64(i64),
    Uint64(u64),
    Int32(i32),
    Fixed64(u64),
    Fixed32(u32),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Uint32(u32),
    Enum(i32),
    Sfixed32(i32),
    Sfixed64(i64),
    Sint32(i32),
    Sint64(i64),
    Record(DynamicRecord),
}

/// Storage for one field.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Singular(Option<Value>),
    Repeated(Vec<Value>),
}

/// An immutable record value.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    descriptor: Arc<RecordType>,
    slots: Vec<Slot>,
}

/// Mutable counterpart of [`DynamicRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBuilder {
    descriptor: Arc<RecordType>,
    slots: Vec<Slot>,
}

/// Record descriptors of one schema file, addressable by type name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    package: String,
    types: BTreeMap<String, Arc<RecordType>>,
}

impl Value {
    /// The declared field type this value belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Double(_) => FieldType::Double,
            Value::Float(_) => FieldType::Float,
            Value::Int64(_) => FieldType::Int64,
            Value::Uint64(_) => FieldType::Uint64,
            Value::Int32(_) => FieldType::Int32,
            Value::Fixed64(_) => FieldType::Fixed64,
            Value::Fixed32(_) => FieldType::Fixed32,
            Value::Bool(_) => FieldType::Bool,
            Value::String(_) => FieldType::String,
            Value::Bytes(_) => FieldType::Bytes,
            Value::Uint32(_) => FieldType::Uint32,
            Value::Enum(_) => FieldType::Enum,
            Value::Sfixed32(_) => FieldType::Sfixed32,
            Value::Sfixed64(_) => FieldType::Sfixed64,
            Value::Sint32(_) => FieldType::Sint32,
            Value::Sint64(_) => FieldType::Sint64,
            Value::Record(_) => FieldType::Message,
        }
    }

    pub fn as_record(&self) -> Option<&DynamicRecord> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    fn write_to(&self, number: u32, writer: &mut WireWriter) {
        writer.write_tag(number, WireType::for_field_type(self.field_type()));
        match self {
            Value::Double(v) => writer.write_fixed64(v.to_bits()),
            Value::Float(v) => writer.write_fixed32(v.to_bits()),
            Value::Int64(v) => writer.write_varint(*v as u64),
            Value::Uint64(v) => writer.write_varint(*v),
            Value::Int32(v) | Value::Enum(v) => writer.write_varint(i64::from(*v) as u64),
            Value::Fixed64(v) => writer.write_fixed64(*v),
            Value::Fixed32(v) => writer.write_fixed32(*v),
            Value::Bool(v) => writer.write_varint(u64::from(*v)),
            Value::String(v) => writer.write_length_delimited(v.as_bytes()),
            Value::Bytes(v) => writer.write_length_delimited(v),
            Value::Uint32(v) => writer.write_varint(u64::from(*v)),
            Value::Sfixed32(v) => writer.write_fixed32(*v as u32),
            Value::Sfixed64(v) => writer.write_fixed64(*v as u64),
            Value::Sint32(v) => writer.write_varint(u64::from(encode_zigzag32(*v))),
            Value::Sint64(v) => writer.write_varint(encode_zigzag64(*v)),
            Value::Record(record) => writer.write_length_delimited(&record.serialize()),
        }
    }

    /// Bytes this value occupies when written with its tag.
    fn encoded_size(&self, number: u32) -> usize {
        let payload = match self {
            Value::Double(_) | Value::Fixed64(_) | Value::Sfixed64(_) => 8,
            Value::Float(_) | Value::Fixed32(_) | Value::Sfixed32(_) => 4,
            Value::Int64(v) => varint_size(*v as u64),
            Value::Uint64(v) => varint_size(*v),
            Value::Int32(v) | Value::Enum(v) => varint_size(i64::from(*v) as u64),
            Value::Bool(_) => 1,
            Value::String(v) => length_delimited_size(v.len()),
            Value::Bytes(v) => length_delimited_size(v.len()),
            Value::Uint32(v) => varint_size(u64::from(*v)),
            Value::Sint32(v) => varint_size(u64::from(encode_zigzag32(*v))),
            Value::Sint64(v) => varint_size(encode_zigzag64(*v)),
            Value::Record(record) => length_delimited_size(record.serialized_size()),
        };
        tag_size(number) + payload
    }

    fn read_scalar(reader: &mut WireReader<'_>, field: &Field) -> WireResult<Value> {
        let value = match field.ty {
            FieldType::Double => Value::Double(f64::from_bits(reader.read_fixed64()?)),
            FieldType::Float => Value::Float(f32::from_bits(reader.read_fixed32()?)),
            FieldType::Int64 => Value::Int64(reader.read_varint()? as i64),
            FieldType::Uint64 => Value::Uint64(reader.read_varint()?),
            FieldType::Int32 => Value::Int32(reader.read_varint()? as i32),
            FieldType::Fixed64 => Value::Fixed64(reader.read_fixed64()?),
            FieldType::Fixed32 => Value::Fixed32(reader.read_fixed32()?),
            FieldType::Bool => Value::Bool(reader.read_varint()? != 0),
            FieldType::String => {
                let bytes = reader.read_length_delimited()?;
                let text = std::str::from_utf8(bytes)
                    .map_err(|_| WireError::InvalidUtf8(field.number))?;
                Value::String(text.to_string())
            }
            FieldType::Bytes => Value::Bytes(reader.read_length_delimited()?.to_vec()),
            FieldType::Uint32 => Value::Uint32(reader.read_varint()? as u32),
            FieldType::Enum => Value::Enum(reader.read_varint()? as i32),
            FieldType::Sfixed32 => Value::Sfixed32(reader.read_fixed32()? as i32),
            FieldType::Sfixed64 => Value::Sfixed64(reader.read_fixed64()? as i64),
            FieldType::Sint32 => Value::Sint32(decode_zigzag32(reader.read_varint()? as u32)),
            FieldType::Sint64 => Value::Sint64(decode_zigzag64(reader.read_varint()?)),
            FieldType::Message | FieldType::Group => {
                return Err(WireError::ValueMismatch(field.name.clone()));
            }
        };
        Ok(value)
    }
}

fn length_delimited_size(len: usize) -> usize {
    varint_size(len as u64) + len
}

fn empty_slots(descriptor: &RecordType) -> Vec<Slot> {
    descriptor
        .fields
        .iter()
        .map(|field| match field.cardinality() {
            Cardinality::Singular => Slot::Singular(None),
            Cardinality::Repeated => Slot::Repeated(Vec::new()),
        })
        .collect()
}

fn field_index(descriptor: &RecordType, name: &str) -> WireResult<usize> {
    descriptor
        .fields
        .iter()
        .position(|field| field.name == name)
        .ok_or_else(|| WireError::UnknownField(name.to_string()))
}

impl DynamicRecord {
    /// A record with no field set.
    pub fn empty(descriptor: Arc<RecordType>) -> Self {
        let slots = empty_slots(&descriptor);
        Self { descriptor, slots }
    }

    /// Parse a record of the named type.
    pub fn parse(registry: &TypeRegistry, type_name: &str, bytes: &[u8]) -> WireResult<Self> {
        let mut builder = registry.new_builder(type_name)?;
        builder.merge_from_bytes(registry, bytes)?;
        Ok(builder.build())
    }

    pub fn descriptor(&self) -> &RecordType {
        &self.descriptor
    }

    /// Whether a singular field is present, or a repeated field is non-empty.
    pub fn has(&self, name: &str) -> bool {
        match field_index(&self.descriptor, name).map(|index| &self.slots[index]) {
            Ok(Slot::Singular(value)) => value.is_some(),
            Ok(Slot::Repeated(values)) => !values.is_empty(),
            Err(_) => false,
        }
    }

    /// Value of a singular field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match field_index(&self.descriptor, name).map(|index| &self.slots[index]) {
            Ok(Slot::Singular(value)) => value.as_ref(),
            _ => None,
        }
    }

    /// Elements of a repeated field; empty for unknown or singular fields.
    pub fn get_repeated(&self, name: &str) -> &[Value] {
        match field_index(&self.descriptor, name).map(|index| &self.slots[index]) {
            Ok(Slot::Repeated(values)) => values,
            _ => &[],
        }
    }

    /// A builder initialised with this record's contents.
    pub fn to_builder(&self) -> RecordBuilder {
        RecordBuilder {
            descriptor: Arc::clone(&self.descriptor),
            slots: self.slots.clone(),
        }
    }

    /// Write every present field in declaration order.
    pub fn write_to(&self, writer: &mut WireWriter) {
        for (field, slot) in self.descriptor.fields.iter().zip(&self.slots) {
            match slot {
                Slot::Singular(Some(value)) => value.write_to(field.number, writer),
                Slot::Singular(None) => {}
                Slot::Repeated(values) => {
                    for value in values {
                        value.write_to(field.number, writer);
                    }
                }
            }
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Encoded length, computed without encoding.
    pub fn serialized_size(&self) -> usize {
        self.descriptor
            .fields
            .iter()
            .zip(&self.slots)
            .map(|(field, slot)| match slot {
                Slot::Singular(Some(value)) => value.encoded_size(field.number),
                Slot::Singular(None) => 0,
                Slot::Repeated(values) => values
                    .iter()
                    .map(|value| value.encoded_size(field.number))
                    .sum(),
            })
            .sum()
    }
}

impl RecordBuilder {
    pub fn new(descriptor: Arc<RecordType>) -> Self {
        let slots = empty_slots(&descriptor);
        Self { descriptor, slots }
    }

    pub fn descriptor(&self) -> &RecordType {
        &self.descriptor
    }

    /// Set a singular field, marking it present.
    pub fn set(&mut self, name: &str, value: Value) -> WireResult<&mut Self> {
        let index = self.checked_index(name, &value)?;
        match &mut self.slots[index] {
            Slot::Singular(slot) => *slot = Some(value),
            Slot::Repeated(_) => return Err(WireError::ValueMismatch(name.to_string())),
        }
        Ok(self)
    }

    /// Append one element to a repeated field.
    pub fn add(&mut self, name: &str, value: Value) -> WireResult<&mut Self> {
        let index = self.checked_index(name, &value)?;
        match &mut self.slots[index] {
            Slot::Repeated(values) => values.push(value),
            Slot::Singular(_) => return Err(WireError::ValueMismatch(name.to_string())),
        }
        Ok(self)
    }

    /// Clear a field: absent for singular fields, empty for repeated ones.
    pub fn clear(&mut self, name: &str) -> WireResult<&mut Self> {
        let index = field_index(&self.descriptor, name)?;
        match &mut self.slots[index] {
            Slot::Singular(slot) => *slot = None,
            Slot::Repeated(values) => values.clear(),
        }
        Ok(self)
    }

    pub fn has(&self, name: &str) -> bool {
        match field_index(&self.descriptor, name).map(|index| &self.slots[index]) {
            Ok(Slot::Singular(value)) => value.is_some(),
            Ok(Slot::Repeated(values)) => !values.is_empty(),
            Err(_) => false,
        }
    }

    /// Merge another record of the same type into this builder.
    ///
    /// Singular record fields present on both sides are merged recursively;
    /// other singular fields present in `other` replace the current value;
    /// repeated fields are appended after the existing elements.
    pub fn merge_from(&mut self, other: &DynamicRecord) -> WireResult<&mut Self> {
        if other.descriptor.name != self.descriptor.name {
            return Err(WireError::ValueMismatch(other.descriptor.name.clone()));
        }

        for (slot, incoming) in self.slots.iter_mut().zip(&other.slots) {
            match (slot, incoming) {
                (Slot::Singular(current), Slot::Singular(Some(value))) => {
                    let merged = match (current.as_ref(), value) {
                        (Some(Value::Record(existing)), Value::Record(update)) => {
                            let mut nested = existing.to_builder();
                            nested.merge_from(update)?;
                            Value::Record(nested.build())
                        }
                        _ => value.clone(),
                    };
                    *current = Some(merged);
                }
                (Slot::Singular(_), Slot::Singular(None)) => {}
                (Slot::Repeated(current), Slot::Repeated(values)) => {
                    current.extend(values.iter().cloned());
                }
                _ => return Err(WireError::ValueMismatch(other.descriptor.name.clone())),
            }
        }
        Ok(self)
    }

    /// Decode fields from `bytes` and merge them into this builder.
    ///
    /// Unknown field numbers are skipped. A singular record field seen more
    /// than once is merged, not replaced. Records nested more than
    /// [`RECURSION_LIMIT`] levels deep are rejected.
    pub fn merge_from_bytes(
        &mut self,
        registry: &TypeRegistry,
        bytes: &[u8],
    ) -> WireResult<&mut Self> {
        self.merge_nested(registry, bytes, 0)?;
        Ok(self)
    }

    fn merge_nested(
        &mut self,
        registry: &TypeRegistry,
        bytes: &[u8],
        depth: usize,
    ) -> WireResult<()> {
        let descriptor = Arc::clone(&self.descriptor);
        let mut reader = WireReader::new(bytes);

        while let Some((number, wire_type)) = reader.read_tag()? {
            let Some(index) = descriptor.field_position(number) else {
                reader.skip_field(number, wire_type)?;
                continue;
            };
            let field = &descriptor.fields[index];
            let expected = WireType::for_field_type(field.ty);
            if wire_type != expected {
                return Err(WireError::WireTypeMismatch {
                    number,
                    expected,
                    actual: wire_type,
                });
            }

            let value = if field.ty == FieldType::Message {
                if depth >= RECURSION_LIMIT {
                    return Err(WireError::RecursionLimit(RECURSION_LIMIT));
                }
                let payload = reader.read_length_delimited()?;
                let mut nested = match &self.slots[index] {
                    Slot::Singular(Some(Value::Record(existing))) => existing.to_builder(),
                    _ => registry.new_builder(field.type_name.as_deref().unwrap_or_default())?,
                };
                nested.merge_nested(registry, payload, depth + 1)?;
                Value::Record(nested.build())
            } else {
                Value::read_scalar(&mut reader, field)?
            };

            match &mut self.slots[index] {
                Slot::Singular(slot) => *slot = Some(value),
                Slot::Repeated(values) => values.push(value),
            }
        }
        Ok(())
    }

    /// Materialise the current state. The builder stays usable.
    pub fn build(&self) -> DynamicRecord {
        DynamicRecord {
            descriptor: Arc::clone(&self.descriptor),
            slots: self.slots.clone(),
        }
    }

    fn checked_index(&self, name: &str, value: &Value) -> WireResult<usize> {
        let index = field_index(&self.descriptor, name)?;
        if self.descriptor.fields[index].ty != value.field_type() {
            return Err(WireError::ValueMismatch(name.to_string()));
        }
        Ok(index)
    }
}

impl TypeRegistry {
    /// Index every record type of a schema by its package-relative dotted name.
    pub fn from_schema(schema: &SchemaFile) -> Self {
        let mut types = BTreeMap::new();
        for record in &schema.messages {
            register(&mut types, "", record);
        }
        Self {
            package: schema.package.clone(),
            types,
        }
    }

    /// Resolve `Outer.Inner` or `.package.Outer.Inner`.
    pub fn resolve(&self, type_name: &str) -> WireResult<Arc<RecordType>> {
        let relative = match type_name.strip_prefix('.') {
            Some(qualified) if self.package.is_empty() => qualified,
            Some(qualified) => qualified
                .strip_prefix(self.package.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(qualified),
            None => type_name,
        };
        self.types
            .get(relative)
            .cloned()
            .ok_or_else(|| WireError::UnknownType(type_name.to_string()))
    }

    pub fn new_builder(&self, type_name: &str) -> WireResult<RecordBuilder> {
        self.resolve(type_name).map(RecordBuilder::new)
    }

    /// Registered names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

fn register(types: &mut BTreeMap<String, Arc<RecordType>>, scope: &str, record: &RecordType) {
    let name = if scope.is_empty() {
        record.name.clone()
    } else {
        format!("{scope}.{}", record.name)
    };
    for nested in &record.nested {
        register(types, &name, nested);
    }
    types.insert(name, Arc::new(record.clone()));
}
