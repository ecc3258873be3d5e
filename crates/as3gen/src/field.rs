//! Field generators: one code-emission strategy per field classification.
//!
//! Each field of a record is classified by its [`ValueCategory`] and
//! [`Cardinality`]; [`make_field_generator`] selects the matching
//! [`FieldGenerator`], which the message generator then drives through
//! the seven [`Phase`]s.

mod enum_field;
mod message_field;
mod primitive_field;

pub use enum_field::{EnumFieldGenerator, RepeatedEnumFieldGenerator};
pub use message_field::{MessageFieldGenerator, RepeatedMessageFieldGenerator};
pub use primitive_field::{PrimitiveFieldGenerator, RepeatedPrimitiveFieldGenerator};

use crate::naming;
use crate::printer::{Printer, Variables};
use as3gen_core::{
    Cardinality, Field, GeneratorError, GeneratorResult, RecordType, ValueCategory,
};
use as3gen_wire::{WireType, make_tag};

/// Where a field's generated code lives.
#[derive(Debug, Clone, Copy)]
pub struct FieldScope<'a> {
    /// Package of the schema, stripped from qualified type references.
    pub package: &'a str,
    /// Builder class of the enclosing record.
    pub builder_class: &'a str,
}

/// Code-emission strategy for one field.
///
/// Every phase appends to the printer and returns `Ok(())` unless a
/// template fails to render.
pub trait FieldGenerator {
    /// The field this generator emits code for.
    fn descriptor(&self) -> &Field;

    /// Substitution variables, computed once at construction.
    fn variables(&self) -> &Variables;

    /// The element type used in arrays and loops.
    fn boxed_type(&self) -> &str;

    /// Phase 1: storage, presence flag and read accessors on the value class.
    fn generate_members(&self, printer: &mut Printer) -> GeneratorResult<()>;

    /// Phase 2: storage and mutation surface on the builder class.
    fn generate_builder_members(&self, printer: &mut Printer) -> GeneratorResult<()>;

    /// Phase 3: body of `mergeFrom(other)`.
    fn generate_merging_code(&self, printer: &mut Printer) -> GeneratorResult<()>;

    /// Phase 4: body of `build()`.
    fn generate_building_code(&self, printer: &mut Printer) -> GeneratorResult<()>;

    /// Phase 5: handling of one decoded occurrence in `mergeFromStream`.
    fn generate_parsing_code(&self, printer: &mut Printer) -> GeneratorResult<()>;

    /// Phase 6: body of `writeTo(output)`.
    fn generate_serialization_code(&self, printer: &mut Printer) -> GeneratorResult<()>;

    /// Phase 7: body of `getSerializedSize()`.
    fn generate_serialized_size_code(&self, printer: &mut Printer) -> GeneratorResult<()>;
}

/// The seven emission phases, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Members,
    BuilderMembers,
    Merging,
    Building,
    Parsing,
    Serialization,
    SerializedSize,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Members,
        Phase::BuilderMembers,
        Phase::Merging,
        Phase::Building,
        Phase::Parsing,
        Phase::Serialization,
        Phase::SerializedSize,
    ];

    /// Run this phase of `generator`.
    pub fn run(self, generator: &dyn FieldGenerator, printer: &mut Printer) -> GeneratorResult<()> {
        match self {
            Phase::Members => generator.generate_members(printer),
            Phase::BuilderMembers => generator.generate_builder_members(printer),
            Phase::Merging => generator.generate_merging_code(printer),
            Phase::Building => generator.generate_building_code(printer),
            Phase::Parsing => generator.generate_parsing_code(printer),
            Phase::Serialization => generator.generate_serialization_code(printer),
            Phase::SerializedSize => generator.generate_serialized_size_code(printer),
        }
    }
}

/// The six generator variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldVariant {
    Message,
    RepeatedMessage,
    Enum,
    RepeatedEnum,
    Primitive,
    RepeatedPrimitive,
}

/// Dispatch table from classification to variant.
pub fn select_variant(category: ValueCategory, cardinality: Cardinality) -> FieldVariant {
    match (category, cardinality) {
        (ValueCategory::Record, Cardinality::Singular) => FieldVariant::Message,
        (ValueCategory::Record, Cardinality::Repeated) => FieldVariant::RepeatedMessage,
        (ValueCategory::Enumerated, Cardinality::Singular) => FieldVariant::Enum,
        (ValueCategory::Enumerated, Cardinality::Repeated) => FieldVariant::RepeatedEnum,
        (ValueCategory::Primitive, Cardinality::Singular) => FieldVariant::Primitive,
        (ValueCategory::Primitive, Cardinality::Repeated) => FieldVariant::RepeatedPrimitive,
    }
}

/// Create the generator for `field`.
///
/// A field without a value category (a group, or a reference field with
/// no type name) is an internal dispatch error.
pub fn make_field_generator<'a>(
    field: &'a Field,
    scope: &FieldScope<'_>,
) -> GeneratorResult<Box<dyn FieldGenerator + 'a>> {
    let category = field
        .value_category()
        .ok_or_else(|| GeneratorError::InternalDispatch {
            field: field.name.clone(),
            detail: format!("type `{}` has no value category", field.ty),
        })?;

    let generator: Box<dyn FieldGenerator + 'a> =
        match select_variant(category, field.cardinality()) {
            FieldVariant::Message => Box::new(MessageFieldGenerator::new(field, scope)?),
            FieldVariant::RepeatedMessage => {
                Box::new(RepeatedMessageFieldGenerator::new(field, scope)?)
            }
            FieldVariant::Enum => Box::new(EnumFieldGenerator::new(field, scope)?),
            FieldVariant::RepeatedEnum => Box::new(RepeatedEnumFieldGenerator::new(field, scope)?),
            FieldVariant::Primitive => Box::new(PrimitiveFieldGenerator::new(field, scope)?),
            FieldVariant::RepeatedPrimitive => {
                Box::new(RepeatedPrimitiveFieldGenerator::new(field, scope)?)
            }
        };
    Ok(generator)
}

/// The generators for every field of a record, in declaration order.
pub struct FieldGeneratorMap<'a> {
    generators: Vec<Box<dyn FieldGenerator + 'a>>,
}

impl<'a> FieldGeneratorMap<'a> {
    pub fn new(record: &'a RecordType, scope: &FieldScope<'_>) -> GeneratorResult<Self> {
        record
            .fields
            .iter()
            .map(|field| make_field_generator(field, scope))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn FieldGenerator> {
        self.generators.iter().map(|generator| generator.as_ref())
    }

    /// Run one phase for every field, in field order.
    ///
    /// With `separate`, a blank line is printed between fields.
    pub fn run_phase(
        &self,
        phase: Phase,
        printer: &mut Printer,
        separate: bool,
    ) -> GeneratorResult<()> {
        for (index, generator) in self.iter().enumerate() {
            if separate && index > 0 {
                printer.print_raw("\n");
            }
            phase.run(generator, printer)?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<Box<dyn FieldGenerator + 'a>> for FieldGeneratorMap<'a> {
    fn from_iter<I: IntoIterator<Item = Box<dyn FieldGenerator + 'a>>>(iter: I) -> Self {
        Self {
            generators: iter.into_iter().collect(),
        }
    }
}

/// Variables shared by every variant.
pub(crate) fn common_variables(
    field: &Field,
    scope: &FieldScope<'_>,
    wire_type: WireType,
) -> Variables {
    let mut variables = Variables::new();
    variables.insert("name", naming::field_name(&field.name));
    variables.insert(
        "capitalized_name",
        naming::capitalized_field_name(&field.name),
    );
    variables.insert("number", field.number.to_string());
    variables.insert("tag", make_tag(field.number, wire_type).to_string());
    variables.insert("wire_type", (wire_type as u32).to_string());
    variables.insert("message_builder", scope.builder_class.to_string());
    variables
}

/// The referenced type name of a `message` or `enum` field.
pub(crate) fn referenced_type(field: &Field) -> GeneratorResult<&str> {
    field
        .type_name
        .as_deref()
        .ok_or_else(|| GeneratorError::InternalDispatch {
            field: field.name.clone(),
            detail: format!("`{}` field has no type name", field.ty),
        })
}

/// Rejects `null` in a setter; printed inside reference-typed mutators.
pub(crate) const NULL_CHECK: &str = "\
if (value == null) {
  throw new ArgumentError(\"$name$ must not be null\");
}
";

/// Rejects `null` array arguments to `addAll<Name>`.
pub(crate) const NULL_VALUES_CHECK: &str = "\
if (values == null) {
  throw new ArgumentError(\"$name$ values must not be null\");
}
";
