//! Emission of one record type: its value class and its builder class.

use crate::field::{FieldGeneratorMap, FieldScope, Phase};
use crate::naming;
use crate::printer::{Printer, Variables};
use as3gen_core::{GeneratorResult, Label, RecordType};

/// Visibility of an emitted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassAccess {
    /// Inside the package block, visible to other packages.
    Public,
    /// After the package block, visible only within its file.
    FileLocal,
}

impl ClassAccess {
    fn keyword(self) -> &'static str {
        match self {
            ClassAccess::Public => "public ",
            ClassAccess::FileLocal => "",
        }
    }
}

const VALUE_CLASS_HEAD: &str = "\
$access$final class $classname$ {
  private static const defaultInstance:$classname$ = new $classname$();

  public static function getDefaultInstance():$classname$ {
    return defaultInstance;
  }

  public function getDefaultInstanceForType():$classname$ {
    return defaultInstance;
  }

  public static function newBuilder():$builder$ {
    return new $builder$();
  }

  public function toBuilder():$builder$ {
    return newBuilder().mergeFrom(this);
  }

  public static function parseFrom(data:ByteArray):$classname$ {
    return newBuilder().mergeFromBytes(data).build();
  }

  public static function parseFromStream(input:CodedInputStream):$classname$ {
    return newBuilder().mergeFromStream(input).build();
  }
";

const SERIALIZED_SIZE_HEAD: &str = "\n\
private var memoizedSerializedSize:int = -1;

public function getSerializedSize():int {
  var size:int = memoizedSerializedSize;
  if (size != -1) {
    return size;
  }

  size = 0;
";

const SERIALIZED_SIZE_TAIL: &str = "\
memoizedSerializedSize = size;
return size;
";

const TO_BYTE_ARRAY: &str = "\n\
public function toByteArray():ByteArray {
  var data:ByteArray = new ByteArray();
  var output:CodedOutputStream = CodedOutputStream.newInstance(data);
  writeTo(output);
  output.flush();
  data.position = 0;
  return data;
}
";

const REQUIRED_CHECK: &str = "\
if (!has$capitalized_name$_) {
  return false;
}
";

const BUILDER_HEAD: &str = "\
$access$final class $builder$ {
  public function $builder$() {
  }
";

const MERGE_FROM_HEAD: &str = "\n\
public function mergeFrom(other:$classname$):$builder$ {
  if (other == $classname$.getDefaultInstance()) {
    return this;
  }
";

const MERGE_FROM_STREAM_HEAD: &str = "\n\
public function mergeFromBytes(data:ByteArray):$builder$ {
  return mergeFromStream(CodedInputStream.newInstance(data));
}

public function mergeFromStream(input:CodedInputStream):$builder$ {
  while (true) {
    var tag:int = input.readTag();
    switch (tag) {
      case 0:
        return this;
";

const SKIP_UNKNOWN_FIELD: &str = "\
default:
  if (!input.skipField(tag)) {
    return this;
  }
  break;
";

const MERGE_FROM_STREAM_TAIL: &str = "    }\n  }\n  return this;\n}\n";

const BUILD_HEAD: &str = "\n\
public function build():$classname$ {
  var result:$classname$ = new $classname$();
";

/// Field output for every phase, one buffer per phase.
struct PhaseText {
    sections: Vec<(Phase, String)>,
}

impl PhaseText {
    fn get(&self, phase: Phase) -> &str {
        self.sections
            .iter()
            .find(|(rendered, _)| *rendered == phase)
            .map(|(_, text)| text.as_str())
            .unwrap_or_default()
    }
}

/// Generates the classes for one record type.
pub struct MessageGenerator<'a> {
    record: &'a RecordType,
    package: &'a str,
    class_name: String,
    builder_class: String,
    fields: FieldGeneratorMap<'a>,
}

impl<'a> MessageGenerator<'a> {
    /// Create a generator for `record`, declared inside the class `scope` if nested.
    ///
    /// Fails when a field has no generator.
    pub fn new(
        record: &'a RecordType,
        scope: Option<&str>,
        package: &'a str,
    ) -> GeneratorResult<Self> {
        let class_name = naming::class_name(scope, &record.name);
        let builder_class = naming::builder_class_name(&class_name);
        let fields = FieldGeneratorMap::new(
            record,
            &FieldScope {
                package,
                builder_class: &builder_class,
            },
        )?;

        Ok(Self {
            record,
            package,
            class_name,
            builder_class,
            fields,
        })
    }

    pub fn record(&self) -> &'a RecordType {
        self.record
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn builder_class(&self) -> &str {
        &self.builder_class
    }

    /// Generators for the directly nested record types, in declaration order.
    pub fn nested(&self) -> GeneratorResult<Vec<MessageGenerator<'a>>> {
        self.record
            .nested
            .iter()
            .map(|nested| MessageGenerator::new(nested, Some(&self.class_name), self.package))
            .collect()
    }

    /// Emit the value class followed by the builder class.
    ///
    /// Field phases run in [`Phase::ALL`] order, each into its own buffer;
    /// the buffers are then placed into the class skeletons.
    pub fn generate(&self, printer: &mut Printer, access: ClassAccess) -> GeneratorResult<()> {
        let variables = self.variables(access);
        let phases = self.render_phases()?;
        self.generate_value_class(printer, &variables, &phases)?;
        printer.print_raw("\n");
        self.generate_builder_class(printer, &variables, &phases)
    }

    fn render_phases(&self) -> GeneratorResult<PhaseText> {
        let mut sections = Vec::with_capacity(Phase::ALL.len());
        for phase in Phase::ALL {
            let mut buffer = Printer::new();
            match phase {
                Phase::Members | Phase::BuilderMembers => {
                    self.fields.run_phase(phase, &mut buffer, true)?;
                }
                Phase::Parsing => self.render_cases(&mut buffer)?,
                _ => self.fields.run_phase(phase, &mut buffer, false)?,
            }
            sections.push((phase, buffer.into_string()));
        }
        Ok(PhaseText { sections })
    }

    /// One `case` block per field tag.
    fn render_cases(&self, printer: &mut Printer) -> GeneratorResult<()> {
        for generator in self.fields.iter() {
            printer.print("case $tag$: {\n", generator.variables())?;
            printer.indent();
            Phase::Parsing.run(generator, printer)?;
            printer.print_raw("break;\n");
            printer.outdent();
            printer.print_raw("}\n");
        }
        Ok(())
    }

    fn variables(&self, access: ClassAccess) -> Variables {
        let mut variables = Variables::new();
        variables.insert("access", access.keyword().to_string());
        variables.insert("classname", self.class_name.clone());
        variables.insert("builder", self.builder_class.clone());
        variables
    }

    fn generate_value_class(
        &self,
        printer: &mut Printer,
        variables: &Variables,
        phases: &PhaseText,
    ) -> GeneratorResult<()> {
        printer.print(VALUE_CLASS_HEAD, variables)?;
        printer.indent();

        if !self.fields.is_empty() {
            printer.print_raw("\n");
            printer.print_raw(phases.get(Phase::Members));
        }

        self.generate_is_initialized(printer)?;

        printer.print_raw("\npublic function writeTo(output:CodedOutputStream):void {\n");
        printer.indent();
        printer.print_raw(phases.get(Phase::Serialization));
        printer.outdent();
        printer.print_raw("}\n");

        printer.print(SERIALIZED_SIZE_HEAD, variables)?;
        printer.indent();
        printer.print_raw(phases.get(Phase::SerializedSize));
        printer.print(SERIALIZED_SIZE_TAIL, variables)?;
        printer.outdent();
        printer.print_raw("}\n");
        printer.print(TO_BYTE_ARRAY, variables)?;

        printer.outdent();
        printer.print_raw("}\n");
        Ok(())
    }

    /// `isInitialized()` is false while any required field is unset.
    fn generate_is_initialized(&self, printer: &mut Printer) -> GeneratorResult<()> {
        printer.print_raw("\npublic function isInitialized():Boolean {\n");
        printer.indent();
        for generator in self.fields.iter() {
            if generator.descriptor().label == Label::Required {
                printer.print(REQUIRED_CHECK, generator.variables())?;
            }
        }
        printer.print_raw("return true;\n");
        printer.outdent();
        printer.print_raw("}\n");
        Ok(())
    }

    fn generate_builder_class(
        &self,
        printer: &mut Printer,
        variables: &Variables,
        phases: &PhaseText,
    ) -> GeneratorResult<()> {
        printer.print(BUILDER_HEAD, variables)?;
        printer.indent();

        if !self.fields.is_empty() {
            printer.print_raw("\n");
            printer.print_raw(phases.get(Phase::BuilderMembers));
        }

        printer.print("\npublic function clear():$builder$ {\n", variables)?;
        printer.indent();
        for generator in self.fields.iter() {
            printer.print("clear$capitalized_name$();\n", generator.variables())?;
        }
        printer.print_raw("return this;\n");
        printer.outdent();
        printer.print_raw("}\n");

        printer.print(MERGE_FROM_HEAD, variables)?;
        printer.indent();
        printer.print_raw(phases.get(Phase::Merging));
        printer.print_raw("return this;\n");
        printer.outdent();
        printer.print_raw("}\n");

        self.generate_parsing(printer, variables, phases.get(Phase::Parsing))?;

        printer.print(BUILD_HEAD, variables)?;
        printer.indent();
        printer.print_raw(phases.get(Phase::Building));
        printer.print_raw("return result;\n");
        printer.outdent();
        printer.print_raw("}\n");

        printer.outdent();
        printer.print_raw("}\n");
        Ok(())
    }

    /// `mergeFromStream`: the field `cases`, then unknown tags skipped.
    fn generate_parsing(
        &self,
        printer: &mut Printer,
        variables: &Variables,
        cases: &str,
    ) -> GeneratorResult<()> {
        printer.print(MERGE_FROM_STREAM_HEAD, variables)?;

        // case labels sit three levels inside the function body
        for _ in 0..3 {
            printer.indent();
        }
        printer.print_raw(cases);
        printer.print(SKIP_UNKNOWN_FIELD, variables)?;
        for _ in 0..3 {
            printer.outdent();
        }

        printer.print(MERGE_FROM_STREAM_TAIL, variables)
    }
}
