//! Generators for enum fields.
//!
//! Enum values are stored as `int` and written with the `Enum` runtime
//! helpers. A schema default names a constant on the enum class.

use super::primitive_field::{RepeatedValues, SingularValue};
use super::{FieldGenerator, FieldScope, common_variables, referenced_type};
use crate::as3_types::{ENUM_SUFFIX, ENUM_TYPE, enum_default_literal};
use crate::naming;
use crate::printer::{Printer, Variables};
use as3gen_core::{Field, GeneratorResult};
use as3gen_wire::WireType;

fn enum_variables(field: &Field, scope: &FieldScope<'_>) -> GeneratorResult<Variables> {
    let enum_class = naming::class_name_for_reference(referenced_type(field)?, scope.package);

    let mut variables = common_variables(field, scope, WireType::Varint);
    variables.insert("type", ENUM_TYPE.to_string());
    variables.insert("boxed_type", ENUM_TYPE.to_string());
    variables.insert("capitalized_type", ENUM_SUFFIX.to_string());
    variables.insert(
        "default",
        enum_default_literal(&enum_class, field.default_value.as_deref()),
    );
    variables.insert("enum_type", enum_class);
    Ok(variables)
}

/// Singular enum field.
pub struct EnumFieldGenerator<'a> {
    descriptor: &'a Field,
    variables: Variables,
}

impl<'a> EnumFieldGenerator<'a> {
    pub fn new(descriptor: &'a Field, scope: &FieldScope<'_>) -> GeneratorResult<Self> {
        Ok(Self {
            descriptor,
            variables: enum_variables(descriptor, scope)?,
        })
    }
}

impl FieldGenerator for EnumFieldGenerator<'_> {
    fn descriptor(&self) -> &Field {
        self.descriptor
    }

    fn variables(&self) -> &Variables {
        &self.variables
    }

    fn boxed_type(&self) -> &str {
        ENUM_TYPE
    }

    fn generate_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::members(printer, &self.variables)
    }

    fn generate_builder_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::builder_members(printer, &self.variables, false)
    }

    fn generate_merging_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::merging(printer, &self.variables)
    }

    fn generate_building_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::building(printer, &self.variables)
    }

    fn generate_parsing_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::parsing(printer, &self.variables)
    }

    fn generate_serialization_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::serialization(printer, &self.variables)
    }

    fn generate_serialized_size_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::serialized_size(printer, &self.variables)
    }
}

/// Repeated enum field.
pub struct RepeatedEnumFieldGenerator<'a> {
    descriptor: &'a Field,
    variables: Variables,
}

impl<'a> RepeatedEnumFieldGenerator<'a> {
    pub fn new(descriptor: &'a Field, scope: &FieldScope<'_>) -> GeneratorResult<Self> {
        Ok(Self {
            descriptor,
            variables: enum_variables(descriptor, scope)?,
        })
    }
}

impl FieldGenerator for RepeatedEnumFieldGenerator<'_> {
    fn descriptor(&self) -> &Field {
        self.descriptor
    }

    fn variables(&self) -> &Variables {
        &self.variables
    }

    fn boxed_type(&self) -> &str {
        ENUM_TYPE
    }

    fn generate_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::members(printer, &self.variables)
    }

    fn generate_builder_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::builder_members(printer, &self.variables, false)
    }

    fn generate_merging_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::merging(printer, &self.variables)
    }

    fn generate_building_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::building(printer, &self.variables)
    }

    fn generate_parsing_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::parsing(printer, &self.variables)
    }

    fn generate_serialization_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::serialization(printer, &self.variables)
    }

    fn generate_serialized_size_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::serialized_size(printer, &self.variables)
    }
}
