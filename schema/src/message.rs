use prost_types::{DescriptorProto, EnumDescriptorProto, FileDescriptorProto, OneofDescriptorProto};

use crate::field::Field;
use crate::index::{EnumEntry, MessageEntry, SchemaIndex, Syntax};

/// One `.proto` file of the request.
#[derive(Debug, Clone, Copy)]
pub struct File<'s> {
    proto: &'s FileDescriptorProto,
    index: &'s SchemaIndex<'s>,
}

impl<'s> File<'s> {
    pub(crate) fn new(proto: &'s FileDescriptorProto, index: &'s SchemaIndex<'s>) -> Self {
        File { proto, index }
    }

    pub fn proto(&self) -> &'s FileDescriptorProto {
        self.proto
    }

    /// Path as protoc reports it, e.g. `game/player.proto`.
    pub fn name(&self) -> &'s str {
        self.proto.name()
    }

    pub fn package(&self) -> &'s str {
        self.proto.package()
    }

    pub fn syntax(&self) -> Syntax {
        Syntax::of(self.proto)
    }

    /// C++ namespace qualifier of the package with surrounding `::`.
    pub fn cpp_namespace(&self) -> String {
        cpp_namespace(self.package())
    }

    /// Top-level messages in declaration order, map entries included.
    pub fn messages(&self) -> impl Iterator<Item = Message<'s>> + 's {
        let index = self.index;
        let prefix = package_prefix(self.package());
        self.proto
            .message_type
            .iter()
            .filter_map(move |m| index.message(&format!("{}.{}", prefix, m.name())))
    }

    /// Top-level enums in declaration order.
    pub fn enums(&self) -> impl Iterator<Item = Enum<'s>> + 's {
        let index = self.index;
        let prefix = package_prefix(self.package());
        self.proto
            .enum_type
            .iter()
            .filter_map(move |e| index.enumeration(&format!("{}.{}", prefix, e.name())))
    }
}

fn package_prefix(package: &str) -> String {
    if package.is_empty() {
        String::new()
    } else {
        format!(".{}", package)
    }
}

/// Maps `a.b` to `::a::b::` and the empty package to `::`.
pub fn cpp_namespace(package: &str) -> String {
    if package.is_empty() {
        "::".to_string()
    } else {
        format!("::{}::", package.replace('.', "::"))
    }
}

/// A message definition, top-level or nested.
#[derive(Debug, Clone, Copy)]
pub struct Message<'s> {
    entry: &'s MessageEntry<'s>,
    index: &'s SchemaIndex<'s>,
}

impl<'s> Message<'s> {
    pub(crate) fn new(entry: &'s MessageEntry<'s>, index: &'s SchemaIndex<'s>) -> Self {
        Message { entry, index }
    }

    pub fn proto(&self) -> &'s DescriptorProto {
        self.entry.proto
    }

    pub(crate) fn index(&self) -> &'s SchemaIndex<'s> {
        self.index
    }

    /// Bare name, without package or enclosing messages.
    pub fn name(&self) -> &'s str {
        self.entry.proto.name()
    }

    pub fn full_name(&self) -> &'s str {
        &self.entry.full_name
    }

    /// Name of the protobuf-generated C++ class inside its namespace.
    pub fn cpp_name(&self) -> &'s str {
        &self.entry.scoped_name
    }

    /// Fully qualified protobuf-generated C++ class, e.g. `::game::Zone_Tile`.
    pub fn cpp_type(&self) -> String {
        format!("{}{}", cpp_namespace(self.package()), self.cpp_name())
    }

    pub fn package(&self) -> &'s str {
        self.entry.package
    }

    pub fn syntax(&self) -> Syntax {
        self.entry.syntax
    }

    /// True for the key/value entry message protoc synthesizes for a map field.
    pub fn is_map_entry(&self) -> bool {
        self.entry
            .proto
            .options
            .as_ref()
            .is_some_and(|options| options.map_entry())
    }

    pub fn fields(&self) -> impl Iterator<Item = Field<'s>> + 's {
        let parent = *self;
        self.entry
            .proto
            .field
            .iter()
            .map(move |proto| Field::new(proto, parent))
    }

    pub fn field_named(&self, name: &str) -> Option<Field<'s>> {
        self.fields().find(|field| field.name() == name)
    }

    /// Every oneof, synthetic ones included, in declaration order.
    pub fn oneofs(&self) -> impl Iterator<Item = Oneof<'s>> + 's {
        let parent = *self;
        self.entry
            .proto
            .oneof_decl
            .iter()
            .enumerate()
            .map(move |(i, proto)| Oneof::new(proto, i as i32, parent))
    }

    /// Oneofs declared by the user; synthetic proto3-optional wrappers skipped.
    pub fn real_oneofs(&self) -> impl Iterator<Item = Oneof<'s>> + 's {
        self.oneofs().filter(|oneof| !oneof.is_synthetic())
    }

    pub(crate) fn oneof_at(&self, index: i32) -> Option<Oneof<'s>> {
        let position = usize::try_from(index).ok()?;
        self.entry
            .proto
            .oneof_decl
            .get(position)
            .map(|proto| Oneof::new(proto, index, *self))
    }

    pub fn nested_messages(&self) -> impl Iterator<Item = Message<'s>> + 's {
        let index = self.index;
        let full_name = self.full_name();
        self.entry
            .proto
            .nested_type
            .iter()
            .filter_map(move |m| index.message(&format!("{}.{}", full_name, m.name())))
    }

    pub fn nested_enums(&self) -> impl Iterator<Item = Enum<'s>> + 's {
        let index = self.index;
        let full_name = self.full_name();
        self.entry
            .proto
            .enum_type
            .iter()
            .filter_map(move |e| index.enumeration(&format!("{}.{}", full_name, e.name())))
    }
}

impl PartialEq for Message<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.full_name() == other.full_name()
    }
}

impl Eq for Message<'_> {}

/// A `oneof` group of a message.
#[derive(Debug, Clone, Copy)]
pub struct Oneof<'s> {
    proto:  &'s OneofDescriptorProto,
    index:  i32,
    parent: Message<'s>,
}

impl<'s> Oneof<'s> {
    fn new(proto: &'s OneofDescriptorProto, index: i32, parent: Message<'s>) -> Self {
        Oneof {
            proto,
            index,
            parent,
        }
    }

    pub fn name(&self) -> &'s str {
        self.proto.name()
    }

    /// Position in the parent's `oneof_decl`, the value members carry in
    /// `oneof_index`.
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Member fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = Field<'s>> + 's {
        let index = self.index;
        self.parent
            .fields()
            .filter(move |field| field.proto().oneof_index == Some(index))
    }

    /// protoc injects a single-member oneof behind every proto3 `optional`
    /// field. Such a oneof only tracks presence.
    pub fn is_synthetic(&self) -> bool {
        self.fields()
            .next()
            .is_some_and(|field| field.proto().proto3_optional())
    }
}

/// An enum definition, top-level or nested.
#[derive(Debug, Clone, Copy)]
pub struct Enum<'s> {
    entry: &'s EnumEntry<'s>,
}

impl<'s> Enum<'s> {
    pub(crate) fn new(entry: &'s EnumEntry<'s>) -> Self {
        Enum { entry }
    }

    pub fn proto(&self) -> &'s EnumDescriptorProto {
        self.entry.proto
    }

    pub fn name(&self) -> &'s str {
        self.entry.proto.name()
    }

    pub fn full_name(&self) -> &'s str {
        &self.entry.full_name
    }

    /// `(name, number)` pairs in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&'s str, i32)> + 's {
        self.entry
            .proto
            .value
            .iter()
            .map(|value| (value.name(), value.number()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::field_descriptor_proto::{Label, Type};
    use prost_types::{FieldDescriptorProto, MessageOptions};

    fn scalar(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.to_owned()),
            number: Some(number),
            label: Some(Label::Optional as i32),
            r#type: Some(ty as i32),
            ..Default::default()
        }
    }

    #[test]
    fn namespaces_follow_package_segments() {
        assert_eq!(cpp_namespace(""), "::");
        assert_eq!(cpp_namespace("game"), "::game::");
        assert_eq!(cpp_namespace("game.net.v1"), "::game::net::v1::");
    }

    #[test]
    fn oneof_members_and_synthetic_detection() {
        let mut age = scalar("age", 3, Type::Int32);
        age.oneof_index = Some(1);
        age.proto3_optional = Some(true);
        let mut a = scalar("a", 1, Type::Int32);
        a.oneof_index = Some(0);
        let mut b = scalar("b", 2, Type::String);
        b.oneof_index = Some(0);

        let file = FileDescriptorProto {
            name: Some("m.proto".to_owned()),
            syntax: Some("proto3".to_owned()),
            message_type: vec![DescriptorProto {
                name: Some("M".to_owned()),
                field: vec![a, b, age],
                oneof_decl: vec![
                    OneofDescriptorProto {
                        name: Some("choice".to_owned()),
                        ..Default::default()
                    },
                    OneofDescriptorProto {
                        name: Some("_age".to_owned()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        };
        let index = SchemaIndex::new([&file]);
        let message = index.message(".M").unwrap();

        let oneofs: Vec<_> = message.oneofs().collect();
        assert_eq!(oneofs.len(), 2);
        assert!(!oneofs[0].is_synthetic());
        assert!(oneofs[1].is_synthetic());

        let members: Vec<_> = oneofs[0].fields().map(|f| f.name()).collect();
        assert_eq!(members, ["a", "b"]);

        let real: Vec<_> = message.real_oneofs().map(|o| o.name()).collect();
        assert_eq!(real, ["choice"]);
    }

    #[test]
    fn map_entry_flag_comes_from_options() {
        let file = FileDescriptorProto {
            name: Some("m.proto".to_owned()),
            message_type: vec![
                DescriptorProto {
                    name: Some("CountsEntry".to_owned()),
                    options: Some(MessageOptions {
                        map_entry: Some(true),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                DescriptorProto {
                    name: Some("Plain".to_owned()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let index = SchemaIndex::new([&file]);
        let flags: Vec<_> = index
            .file(&file)
            .messages()
            .map(|m| (m.name(), m.is_map_entry()))
            .collect();
        assert_eq!(flags, [("CountsEntry", true), ("Plain", false)]);
    }
}
