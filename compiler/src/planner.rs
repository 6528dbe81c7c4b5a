use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};
use unreal_proto_schema::{File, FieldKind, Message, Syntax};

use crate::config::GeneratorConfig;
use crate::converter::{emit_declaration, emit_definition};
use crate::declarations::{emit_enum_once, emit_nested_enums, emit_struct};
use crate::naming::{to_pascal_case, Case};
use crate::printer::Printer;
use crate::type_map::struct_name;
use crate::utils::{file_dir, file_stem, pb_header, quote};

/// One output stream: a name relative to the output directory and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub name:    String,
    pub content: String,
}

/// `Point` → `FPoint.h`.
pub fn struct_file_name(message_name: &str) -> String {
    format!("{}.h", struct_name(message_name))
}

/// Bare names of the messages `message` needs the full definition of, in
/// field order without repeats. Map fields contribute their value type; the
/// message itself and map-entry messages never appear.
pub fn dependencies(message: Message<'_>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for field in message.fields() {
        let kind = match field.map_entry() {
            Some((_, value)) => value.kind(),
            None => field.kind(),
        };
        let FieldKind::Message(target) = kind else {
            continue;
        };
        if target.is_map_entry() || target.name() == message.name() {
            continue;
        }
        if seen.insert(target.name()) {
            deps.push(target.name().to_string());
        }
    }

    deps
}

/// Splits one schema file across its output files.
///
/// The enum and converter files keep the proto's directory
/// (`a/common.proto` → `a/CommonEnums.h`), so same-named protos in different
/// directories do not write over each other.
pub struct FilePlanner<'s, 'c> {
    file:      File<'s>,
    config:    &'c GeneratorConfig,
    base_name: String,
    dir:       &'s str,
}

impl<'s, 'c> FilePlanner<'s, 'c> {
    pub fn new(file: File<'s>, config: &'c GeneratorConfig) -> Self {
        let base_name = to_pascal_case(file_stem(file.name()), Case::Legacy);
        FilePlanner {
            file,
            config,
            base_name,
            dir: file_dir(file.name()),
        }
    }

    /// PascalCase file stem shared by the enum and converter files.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn enum_header_name(&self) -> String {
        format!("{}{}Enums.h", self.dir, self.base_name)
    }

    pub fn converter_header_name(&self) -> String {
        format!("{}{}Converter.h", self.dir, self.base_name)
    }

    pub fn converter_source_name(&self) -> String {
        format!("{}{}Converter.cpp", self.dir, self.base_name)
    }

    /// Messages that get a struct file and a converter, in declaration order.
    /// Nested messages follow their parent when `nested_structs` is set.
    pub fn struct_messages(&self) -> Vec<Message<'s>> {
        let mut visited = HashSet::new();
        let mut messages = Vec::new();
        for message in self.file.messages() {
            self.collect_messages(message, &mut visited, &mut messages);
        }
        messages
    }

    fn collect_messages(
        &self,
        message: Message<'s>,
        visited: &mut HashSet<&'s str>,
        out: &mut Vec<Message<'s>>,
    ) {
        if message.is_map_entry() || !visited.insert(message.full_name()) {
            return;
        }
        out.push(message);
        if self.config.nested_structs {
            for nested in message.nested_messages() {
                self.collect_messages(nested, visited, out);
            }
        }
    }

    /// Every output file: enums, one struct header per message, then the
    /// converter header and source.
    pub fn plan(&self) -> Vec<GeneratedFile> {
        let messages = self.struct_messages();
        warn_on_name_collisions(self.file.name(), &messages);
        if self.file.syntax() == Syntax::Editions {
            warn!(
                proto = self.file.name(),
                "editions file: singular fields are treated as explicit presence, \
                 field_presence features are not read"
            );
        }

        let mut files = Vec::with_capacity(messages.len() + 3);
        files.push(self.enum_file());
        for message in &messages {
            files.push(self.struct_file(*message));
        }
        files.push(self.converter_header(&messages));
        files.push(self.converter_source(&messages));

        debug!(
            proto = self.file.name(),
            files = files.len(),
            "planned output files"
        );
        files
    }

    fn enum_file(&self) -> GeneratedFile {
        let mut p = Printer::new();
        let generated = quote(&format!("{}Enums.generated.h", self.base_name));
        p.print(
            &[("gen", generated.as_str())],
            "#pragma once\n#include \"CoreMinimal.h\"\n#include $gen$\n\n",
        );

        let mut visited = HashSet::new();
        for enumeration in self.file.enums() {
            emit_enum_once(enumeration, &mut p, &mut visited);
        }
        for message in self.file.messages() {
            emit_nested_enums(message, &mut p, &mut visited);
        }

        GeneratedFile {
            name:    self.enum_header_name(),
            content: p.into_string(),
        }
    }

    fn struct_file(&self, message: Message<'s>) -> GeneratedFile {
        for field in message.fields().filter(|f| f.is_unresolved()) {
            warn!(
                message = message.full_name(),
                field = field.name(),
                type_name = field.proto().type_name(),
                "unresolved type reference, emitting it as FString"
            );
        }

        let mut p = Printer::new();
        let enum_header = quote(&self.enum_header_name());
        p.print(
            &[("eh", enum_header.as_str())],
            "#pragma once\n#include \"CoreMinimal.h\"\n#include $eh$\n",
        );
        for dependency in dependencies(message) {
            let header = quote(&struct_file_name(&dependency));
            p.print(&[("d", header.as_str())], "#include $d$\n");
        }
        let generated = quote(&format!("{}.generated.h", struct_name(message.name())));
        p.print(&[("gen", generated.as_str())], "#include $gen$\n\n");

        emit_struct(message, &mut p, self.config);

        debug!(message = message.full_name(), "emitted struct");
        GeneratedFile {
            name:    struct_file_name(message.name()),
            content: p.into_string(),
        }
    }

    fn converter_header(&self, messages: &[Message<'s>]) -> GeneratedFile {
        let mut p = Printer::new();
        let pb = quote(&pb_header(self.file.name()));
        p.print(
            &[("pb", pb.as_str())],
            "#pragma once\n#include \"CoreMinimal.h\"\n#include $pb$\n",
        );
        for message in messages {
            let header = quote(&struct_file_name(message.name()));
            p.print(&[("h", header.as_str())], "#include $h$\n");
        }

        p.print(
            &[("cn", self.config.converter_class.as_str())],
            "\nclass $cn$ {\npublic:\n",
        );
        p.indented(|p| {
            for message in messages {
                emit_declaration(*message, p);
            }
        });
        p.text("};\n");

        GeneratedFile {
            name:    self.converter_header_name(),
            content: p.into_string(),
        }
    }

    fn converter_source(&self, messages: &[Message<'s>]) -> GeneratedFile {
        let mut p = Printer::new();
        let header = quote(&self.converter_header_name());
        let pb = quote(&pb_header(self.file.name()));
        p.print(
            &[("ch", header.as_str()), ("pb", pb.as_str())],
            "#include $ch$\n#include $pb$\n\n",
        );
        for message in messages {
            emit_definition(*message, &mut p, self.config);
        }

        GeneratedFile {
            name:    self.converter_source_name(),
            content: p.into_string(),
        }
    }
}

/// Struct files are named by bare message name, so two messages sharing one
/// would overwrite each other's header. That is left to the schema author.
fn warn_on_name_collisions(proto: &str, messages: &[Message<'_>]) {
    let mut by_name: HashMap<&str, &str> = HashMap::new();
    for message in messages {
        if let Some(previous) = by_name.insert(message.name(), message.full_name()) {
            warn!(
                proto,
                first = previous,
                second = message.full_name(),
                "two messages map to the same struct name"
            );
        }
    }
}
