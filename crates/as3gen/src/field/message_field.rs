//! Generators for record-typed fields.
//!
//! A singular record field keeps either a built value or a live nested
//! builder on the enclosing builder; merging an incoming record combines
//! it with the current value field by field instead of replacing it.

use super::primitive_field::{RepeatedValues, print_guarded};
use super::{FieldGenerator, FieldScope, NULL_CHECK, common_variables, referenced_type};
use crate::as3_types::MESSAGE_SUFFIX;
use crate::naming;
use crate::printer::{Printer, Variables};
use as3gen_core::{Field, GeneratorResult};
use as3gen_wire::WireType;

const MEMBERS: &str = "\
internal var has$capitalized_name$_:Boolean = false;
internal var $name$_:$type$ = null;

public function has$capitalized_name$():Boolean {
  return has$capitalized_name$_;
}

public function get$capitalized_name$():$type$ {
  return $name$_ != null ? $name$_ : $default$;
}
";

const BUILDER_ACCESSORS: &str = "\
private var has$capitalized_name$_:Boolean = false;
private var $name$_:$type$ = null;
private var $name$Builder_:$type_builder$ = null;

public function has$capitalized_name$():Boolean {
  return has$capitalized_name$_;
}

public function get$capitalized_name$():$type$ {
  if ($name$Builder_ != null) {
    return $name$Builder_.build();
  }
  return $name$_ != null ? $name$_ : $default$;
}

public function set$capitalized_name$(value:$type$):$message_builder$ {
";

const BUILDER_SETTER_BODY: &str = "\
$name$_ = value;
$name$Builder_ = null;
has$capitalized_name$_ = true;
return this;
";

const BUILDER_NESTED: &str = "\
}

public function get$capitalized_name$Builder():$type_builder$ {
  if ($name$Builder_ == null) {
    $name$Builder_ = $type$.newBuilder();
    if ($name$_ != null) {
      $name$Builder_.mergeFrom($name$_);
    }
    $name$_ = null;
  }
  has$capitalized_name$_ = true;
  return $name$Builder_;
}

public function merge$capitalized_name$(value:$type$):$message_builder$ {
";

const BUILDER_MERGE_BODY: &str = "\
if ($name$Builder_ != null) {
  $name$Builder_.mergeFrom(value);
} else if (has$capitalized_name$_ && $name$_ != null && $name$_ != $default$) {
  $name$_ = $type$.newBuilder().mergeFrom($name$_).mergeFrom(value).build();
} else {
  $name$_ = value;
}
has$capitalized_name$_ = true;
return this;
";

const BUILDER_CLEAR: &str = "\
}

public function clear$capitalized_name$():$message_builder$ {
  $name$_ = null;
  $name$Builder_ = null;
  has$capitalized_name$_ = false;
  return this;
}
";

const MERGING: &str = "\
if (other.has$capitalized_name$()) {
  merge$capitalized_name$(other.get$capitalized_name$());
}
";

const BUILDING: &str = "\
if (has$capitalized_name$_) {
  result.has$capitalized_name$_ = true;
  result.$name$_ = $name$Builder_ != null ? $name$Builder_.build() : $name$_;
}
";

const PARSING: &str = "\
var $name$Builder:$type_builder$ = $type$.newBuilder();
if (has$capitalized_name$()) {
  $name$Builder.mergeFrom(get$capitalized_name$());
}
input.readMessage($name$Builder);
set$capitalized_name$($name$Builder.build());
";

const SERIALIZATION: &str = "\
if (has$capitalized_name$_) {
  output.write$capitalized_type$($number$, get$capitalized_name$());
}
";

const SERIALIZED_SIZE: &str = "\
if (has$capitalized_name$_) {
  size += CodedOutputStream.compute$capitalized_type$Size($number$, get$capitalized_name$());
}
";

const REPEATED_PARSING: &str = "\
var $name$Builder:$type_builder$ = $type$.newBuilder();
input.readMessage($name$Builder);
add$capitalized_name$($name$Builder.build());
";

/// Variables of a record field plus the referenced class name.
fn message_variables(field: &Field, scope: &FieldScope<'_>) -> GeneratorResult<(Variables, String)> {
    let class = naming::class_name_for_reference(referenced_type(field)?, scope.package);

    let mut variables = common_variables(field, scope, WireType::LengthDelimited);
    variables.insert("type", class.clone());
    variables.insert("boxed_type", class.clone());
    variables.insert("type_builder", naming::builder_class_name(&class));
    variables.insert("capitalized_type", MESSAGE_SUFFIX.to_string());
    variables.insert("default", format!("{class}.getDefaultInstance()"));
    Ok((variables, class))
}

/// Singular record field.
pub struct MessageFieldGenerator<'a> {
    descriptor: &'a Field,
    variables: Variables,
    class: String,
}

impl<'a> MessageFieldGenerator<'a> {
    pub fn new(descriptor: &'a Field, scope: &FieldScope<'_>) -> GeneratorResult<Self> {
        let (variables, class) = message_variables(descriptor, scope)?;
        Ok(Self {
            descriptor,
            variables,
            class,
        })
    }
}

impl FieldGenerator for MessageFieldGenerator<'_> {
    fn descriptor(&self) -> &Field {
        self.descriptor
    }

    fn variables(&self) -> &Variables {
        &self.variables
    }

    fn boxed_type(&self) -> &str {
        &self.class
    }

    fn generate_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        printer.print(MEMBERS, &self.variables)
    }

    fn generate_builder_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        let variables = &self.variables;
        print_guarded(printer, variables, BUILDER_ACCESSORS, &[NULL_CHECK], BUILDER_SETTER_BODY)?;
        print_guarded(printer, variables, BUILDER_NESTED, &[NULL_CHECK], BUILDER_MERGE_BODY)?;
        printer.print(BUILDER_CLEAR, variables)
    }

    fn generate_merging_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        printer.print(MERGING, &self.variables)
    }

    fn generate_building_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        printer.print(BUILDING, &self.variables)
    }

    fn generate_parsing_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        printer.print(PARSING, &self.variables)
    }

    fn generate_serialization_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        printer.print(SERIALIZATION, &self.variables)
    }

    fn generate_serialized_size_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        printer.print(SERIALIZED_SIZE, &self.variables)
    }
}

/// Repeated record field.
pub struct RepeatedMessageFieldGenerator<'a> {
    descriptor: &'a Field,
    variables: Variables,
    class: String,
}

impl<'a> RepeatedMessageFieldGenerator<'a> {
    pub fn new(descriptor: &'a Field, scope: &FieldScope<'_>) -> GeneratorResult<Self> {
        let (variables, class) = message_variables(descriptor, scope)?;
        Ok(Self {
            descriptor,
            variables,
            class,
        })
    }
}

impl FieldGenerator for RepeatedMessageFieldGenerator<'_> {
    fn descriptor(&self) -> &Field {
        self.descriptor
    }

    fn variables(&self) -> &Variables {
        &self.variables
    }

    fn boxed_type(&self) -> &str {
        &self.class
    }

    fn generate_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::members(printer, &self.variables)
    }

    fn generate_builder_members(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::builder_members(printer, &self.variables, true)
    }

    fn generate_merging_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::merging(printer, &self.variables)
    }

    fn generate_building_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::building(printer, &self.variables)
    }

    fn generate_parsing_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        printer.print(REPEATED_PARSING, &self.variables)
    }

    fn generate_serialization_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::serialization(printer, &self.variables)
    }

    fn generate_serialized_size_code(&self, printer: &mut Printer) -> GeneratorResult<()> {
        RepeatedValues::serialized_size(printer, &self.variables)
    }
}
