use std::collections::HashMap;

use prost_types::{DescriptorProto, EnumDescriptorProto, FileDescriptorProto};

use crate::message::{Enum, File, Message};

/// Language level of the file a definition was declared in.
/// Decides whether plain singular scalars track presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Proto2,
    Proto3,
    Editions,
}

impl Syntax {
    pub fn of(file: &FileDescriptorProto) -> Self {
        match file.syntax() {
            "proto3" => Syntax::Proto3,
            "editions" => Syntax::Editions,
            _ => Syntax::Proto2,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MessageEntry<'a> {
    pub proto:       &'a DescriptorProto,
    pub full_name:   String,
    /// Class name the protobuf C++ generator uses, e.g. `Outer_Inner`.
    pub scoped_name: String,
    pub package:     &'a str,
    pub syntax:      Syntax,
}

#[derive(Debug, Clone)]
pub(crate) struct EnumEntry<'a> {
    pub proto:     &'a EnumDescriptorProto,
    pub full_name: String,
}

/// Every message and enum of a set of files, keyed by fully qualified name
/// with the leading dot (`.pkg.Outer.Inner`), the form `type_name` uses.
#[derive(Debug, Default)]
pub struct SchemaIndex<'a> {
    messages: HashMap<String, MessageEntry<'a>>,
    enums:    HashMap<String, EnumEntry<'a>>,
}

impl<'a> SchemaIndex<'a> {
    pub fn new<I>(files: I) -> Self
    where
        I: IntoIterator<Item = &'a FileDescriptorProto>,
    {
        let mut index = SchemaIndex::default();
        for file in files {
            index.add_file(file);
        }
        index
    }

    fn add_file(&mut self, file: &'a FileDescriptorProto) {
        let package = file.package();
        let syntax = Syntax::of(file);
        let prefix = if package.is_empty() {
            String::new()
        } else {
            format!(".{}", package)
        };

        for enum_proto in &file.enum_type {
            self.add_enum(enum_proto, &prefix);
        }
        for message in &file.message_type {
            self.add_message(message, &prefix, "", package, syntax);
        }
    }

    fn add_message(
        &mut self,
        proto: &'a DescriptorProto,
        parent_full: &str,
        parent_scoped: &str,
        package: &'a str,
        syntax: Syntax,
    ) {
        let full_name = format!("{}.{}", parent_full, proto.name());
        let scoped_name = if parent_scoped.is_empty() {
            proto.name().to_string()
        } else {
            format!("{}_{}", parent_scoped, proto.name())
        };

        for enum_proto in &proto.enum_type {
            self.add_enum(enum_proto, &full_name);
        }
        for nested in &proto.nested_type {
            self.add_message(nested, &full_name, &scoped_name, package, syntax);
        }

        self.messages.insert(
            full_name.clone(),
            MessageEntry {
                proto,
                full_name,
                scoped_name,
                package,
                syntax,
            },
        );
    }

    fn add_enum(&mut self, proto: &'a EnumDescriptorProto, parent_full: &str) {
        let full_name = format!("{}.{}", parent_full, proto.name());
        self.enums.insert(
            full_name.clone(),
            EnumEntry { proto, full_name },
        );
    }

    /// View over one of the indexed files.
    pub fn file<'s>(&'s self, proto: &'s FileDescriptorProto) -> File<'s> {
        File::new(proto, self)
    }

    /// Looks up a message by fully qualified name (`.pkg.Name`).
    pub fn message(&self, full_name: &str) -> Option<Message<'_>> {
        self.messages
            .get(full_name)
            .map(|entry| Message::new(entry, self))
    }

    /// Looks up an enum by fully qualified name (`.pkg.Name`).
    pub fn enumeration(&self, full_name: &str) -> Option<Enum<'_>> {
        self.enums.get(full_name).map(|entry| Enum::new(entry))
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }
}
