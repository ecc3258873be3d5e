//! Generators for scalar fields.
//!
//! The singular templates are shared with the enum generators, which
//! differ only in their variables. The repeated templates are shared by
//! every repeated variant.

use super::{
    FieldGenerator, FieldScope, NULL_CHECK, NULL_VALUES_CHECK, common_variables,
};
use crate::as3_types::{As3Type, default_literal, scalar_type};
use crate::printer::{Printer, Variables};
use as3gen_core::{Field, GeneratorError, GeneratorResult};
use as3gen_wire::WireType;

const SINGULAR_MEMBERS: &str = "\
internal var has$capitalized_name$_:Boolean = false;
internal var $name$_:$type$ = $default$;

public function has$capitalized_name$():Boolean {
  return has$capitalized_name$_;
}

public function get$capitalized_name$():$type$ {
  return $name$_;
}
";

const SINGULAR_BUILDER_ACCESSORS: &str = "\
private var has$capitalized_name$_:Boolean = false;
private var $name$_:$type$ = $default$;

public function has$capitalized_name$():Boolean {
  return has$capitalized_name$_;
}

public function get$capitalized_name$():$type$ {
  return $name$_;
}

public function set$capitalized_name$(value:$type$):$message_builder$ {
";

const SINGULAR_BUILDER_SETTER_BODY: &str = "\
has$capitalized_name$_ = true;
$name$_ = value;
return this;
";

const SINGULAR_BUILDER_CLEAR: &str = "\
}

public function clear$capitalized_name$():$message_builder$ {
  has$capitalized_name$_ = false;
  $name$_ = $default$;
  return this;
}
";

const SINGULAR_MERGING: &str = "\
if (other.has$capitalized_name$()) {
  set$capitalized_name$(other.get$capitalized_name$());
}
";

const SINGULAR_BUILDING: &str = "\
result.has$capitalized_name$_ = has$capitalized_name$_;
result.$name$_ = $name$_;
";

const SINGULAR_PARSING: &str = "\
set$capitalized_name$(input.read$capitalized_type$());
";

const SINGULAR_SERIALIZATION: &str = "\
if (has$capitalized_name$_) {
  output.write$capitalized_type$($number$, $name$_);
}
";

const SINGULAR_SERIALIZED_SIZE: &str = "\
if (has$capitalized_name$_) {
  size += CodedOutputStream.compute$capitalized_type$Size($number$, $name$_);
}
";

const REPEATED_STORAGE: &str = "\
internal var $name$_:Array = [];
";

const REPEATED_BUILDER_STORAGE: &str = "\
private var $name$_:Array = [];
";

const REPEATED_ACCESSORS: &str = "
public function get$capitalized_name$List():Array {
  return $name$_.concat();
}

public function get$capitalized_name$Count():int {
  return $name$_.length;
}

public function get$capitalized_name$(index:int):$type$ {
  return $name$_[index];
}
";

const REPEATED_INDEX_CHECK: &str = "\
if (index < 0 || index >= $name$_.length) {
  throw new RangeError(\"$name$ index out of range: \" + index);
}
";

const REPEATED_BUILDER_SET: &str = "
public function set$capitalized_name$(index:int, value:$type$):$message_builder$ {
";

const REPEATED_BUILDER_SET_BODY: &str = "\
$name$_[index] = value;
return this;
";

const REPEATED_BUILDER_ADD: &str = "\
}

public function add$capitalized_name$(value:$type$):$message_builder$ {
";

const REPEATED_BUILDER_ADD_BODY: &str = "\
$name$_.push(value);
return this;
";

const REPEATED_BUILDER_ADD_ALL: &str = "\
}

public function addAll$capitalized_name$(values:Array):$message_builder$ {
";

const REPEATED_BUILDER_ADD_ALL_BODY: &str = "\
for each (var value:$type$ in values) {
  add$capitalized_name$(value);
}
return this;
";

const REPEATED_BUILDER_CLEAR: &str = "\
}

public function clear$capitalized_name$():$message_builder$ {
  $name$_ = [];
  return this;
}
";

const REPEATED_MERGING: &str = "\
if (other.$name$_.length > 0) {
  addAll$capitalized_name$(other.$name$_);
}
";

const REPEATED_BUILDING: &str = "\
result.$name$_ = $name$_.concat();
";

const REPEATED_PARSING: &str = "\
add$capitalized_name$(input.read$capitalized_type$());
";

const REPEATED_SERIALIZATION: &str = "\
for each (var $name$Element:$type$ in $name$_) {
  output.write$capitalized_type$($number$, $name$Element);
}
";

const REPEATED_SERIALIZED_SIZE: &str = "\
for each (var $name$Element:$type$ in $name$_) {
  size += CodedOutputStream.compute$capitalized_type$Size($number$, $name$Element);
}
";

/// Print `head`, then `guards` and `body` one level deeper.
///
/// The closing brace is left to the next template.
pub(super) fn print_guarded(
    printer: &mut Printer,
    variables: &Variables,
    head: &str,
    guards: &[&str],
    body: &str,
) -> GeneratorResult<()> {
    printer.print(head, variables)?;
    printer.indent();
    for guard in guards {
        printer.print(guard, variables)?;
    }
    printer.print(body, variables)?;
    printer.outdent();
    Ok(())
}

/// Shared emission for singular scalar and enum fields.
pub(super) struct SingularValue;

impl SingularValue {
    pub(super) fn members(printer: &mut Printer, variables: &Variables) -> GeneratorResult<()> {
        printer.print(SINGULAR_MEMBERS, variables)
    }

    pub(super) fn builder_members(
        printer: &mut Printer,
        variables: &Variables,
        nullable: bool,
    ) -> GeneratorResult<()> {
        let guards: &[&str] = if nullable { &[NULL_CHECK] } else { &[] };
        print_guarded(
            printer,
            variables,
            SINGULAR_BUILDER_ACCESSORS,
            guards,
            SINGULAR_BUILDER_SETTER_BODY,
        )?;
        printer.print(SINGULAR_BUILDER_CLEAR, variables)
    }

    pub(super) fn merging(printer: &mut Printer, variables: &Variables) -> GeneratorResult<()> {
        printer.print(SINGULAR_MERGING, variables)
    }

    pub(super) fn building(printer: &mut Printer, variables: &Variables) -> GeneratorResult<()> {
        printer.print(SINGULAR_BUILDING, variables)
    }

    pub(super) fn parsing(printer: &mut Printer, variables: &Variables) -> GeneratorResult<()> {
        printer.print(SINGULAR_PARSING, variables)
    }

    pub(super) fn serialization(
        printer: &mut Printer,
        variables: &Variables,
    ) -> GeneratorResult<()> {
        printer.print(SINGULAR_SERIALIZATION, variables)
    }

    pub(super) fn serialized_size(
        printer: &mut Printer,
        variables: &Variables,
    ) -> GeneratorResult<()> {
        printer.print(SINGULAR_SERIALIZED_SIZE, variables)
    }
}

/// Shared emission for repeated fields.
///
/// Record elements use the same storage, mutators and loops; only their
/// parsing differs.
pub(super) struct RepeatedValues;

impl RepeatedValues {
    pub(super) fn members(printer: &mut Printer, variables: &Variables) -> GeneratorResult<()> {
        printer.print(REPEATED_STORAGE, variables)?;
        printer.print(REPEATED_ACCESSORS, variables)
    }

    pub(super) fn builder_members(
        printer: &mut Printer,
        variables: &Variables,
        nullable: bool,
    ) -> GeneratorResult<()> {
        let value_guards: &[&str] = if nullable { &[NULL_CHECK] } else { &[] };
        let set_guards: &[&str] = if nullable {
            &[REPEATED_INDEX_CHECK, NULL_CHECK]
        } else {
            &[REPEATED_INDEX_CHECK]
        };

        printer.print(REPEATED_BUILDER_STORAGE, variables)?;
        printer.print(REPEATED_ACCESSORS, variables)?;
        print_guarded(
            printer,
            variables,
            REPEATED_BUILDER_SET,
            set_guards,
            REPEATED_BUILDER_SET_BODY,
        )?;
        print_guarded(
            printer,
            variables,
            REPEATED_BUILDER_ADD,
            value_guards,
            REPEATED_BUILDER_ADD_BODY,
        )?;
        print_guarded(
            printer,
            variables,
            REPEATED_BUILDER_ADD_ALL,
            &[NULL_VALUES_CHECK],
            REPEATED_BUILDER_ADD_ALL_BODY,
        )?;
        printer.print(REPEATED_BUILDER_CLEAR, variables)
    }

    pub(super) fn merging(printer: &mut Printer, variables: &Variables) -> GeneratorResult<()> {
        printer.print(REPEATED_MERGING, variables)
    }

    pub(super) fn building(printer: &mut Printer, variables: &Variables) -> GeneratorResult<()> {
        printer.print(REPEATED_BUILDING, variables)
    }

    pub(super) fn parsing(printer: &mut Printer, variables: &Variables) -> GeneratorResult<()> {
        printer.print(REPEATED_PARSING, variables)
    }

    pub(super) fn serialization(
        printer: &mut Printer,
        variables: &Variables,
    ) -> GeneratorResult<()> {
        printer.print(REPEATED_SERIALIZATION, variables)
    }

    pub(super) fn serialized_size(
        printer: &mut Printer,
        variables: &Variables,
    ) -> GeneratorResult<()> {
        printer.print(REPEATED_SERIALIZED_SIZE, variables)
    }
}

fn scalar_variables(field: &Field, scope: &FieldScope<'_>) -> GeneratorResult<(Variables, As3Type)> {
    let as3_type = scalar_type(field.ty).ok_or_else(|| GeneratorError::InternalDispatch {
        field: field.name.clone(),
        detail: format!("`{}` is not a scalar type", field.ty),
    })?;

    let mut variables = common_variables(field, scope, WireType::for_field_type(field.ty));
    variables.insert("type", as3_type.name.to_string());
    variables.insert("boxed_type", as3_type.boxed().to_string());
    variables.insert("capitalized_type", as3_type.suffix.to_string());
    variables.insert(
        "default",
        default_literal(field.ty, &as3_type, field.default_value.as_deref()),
    );
    Ok((variables, as3_type))
}

/// Singular scalar field.
pub struct PrimitiveFieldGenerator<'a> {
    descriptor: &'a Field,
    variables: Variables,
    as3_type: As3Type,
}

impl<'a> PrimitiveFieldGenerator<'a> {
    pub fn new(descriptor: &'a Field, scope: &FieldScope<'_>) -> GeneratorResult<Self> {
        let (variables, as3_type) = scalar_variables(descriptor, scope)?;
        Ok(Self {
            descriptor,
            variables,
            as3_type,
        })
    }
}

impl FieldGenerator for PrimitiveFieldGenerator<'_> {
    fn descriptor(&self) -> &Field {
        self.descriptor
    }

    fn variables(&self) -> &Variables {
        &self.variables
    }

    fn boxed_type(&self) -> &str {
        self.as3_type.boxed()
    }

    fn generate_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::members(printer, &self.variables)
    }

    fn generate_builder_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        SingularValue::builder_members(printer, &self.variables, self.as3_type.is_reference)
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

/// Repeated scalar field.
pub struct RepeatedPrimitiveFieldGenerator<'a> {
    descriptor: &'a Field,
    variables: Variables,
    as3_type: As3Type,
}

impl<'a> RepeatedPrimitiveFieldGenerator<'a> {
    pub fn new(descriptor: &'a Field, scope: &FieldScope<'_>) -> GeneratorResult<Self> {
        let (variables, as3_type) = scalar_variables(descriptor, scope)?;
        Ok(Self {
            descriptor,
            variables,
            as3_type,
        })
    }
}

impl FieldGenerator for RepeatedPrimitiveFieldGenerator<'_> {
    fn descriptor(&self) -> &Field {
        self.descriptor
    }

    fn variables(&self) -> &Variables {
        &self.variables
    }

    fn boxed_type(&self) -> &str {
        self.as3_type.boxed()
    }

    fn generate_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::members(printer, &self.variables)
    }

    fn generate_builder_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::builder_members(printer, &self.variables, self.as3_type.is_reference)
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
