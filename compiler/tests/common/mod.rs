#![allow(dead_code)]

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MessageOptions, OneofDescriptorProto,
};
use unreal_proto_compiler::{generate_files, GeneratedFile, GeneratorConfig};

pub const PACKAGE: &str = "game";

pub fn proto3_file(
    name: &str,
    messages: Vec<DescriptorProto>,
    enums: Vec<EnumDescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_owned()),
        package: Some(PACKAGE.to_owned()),
        syntax: Some("proto3".to_owned()),
        message_type: messages,
        enum_type: enums,
        ..Default::default()
    }
}

pub fn proto2_file(name: &str, messages: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_owned()),
        package: Some(PACKAGE.to_owned()),
        message_type: messages,
        ..Default::default()
    }
}

pub fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_owned()),
        field: fields,
        ..Default::default()
    }
}

pub fn field(name: &str, number: i32, label: Label, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

pub fn scalar(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    field(name, number, Label::Optional, ty)
}

pub fn repeated(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    field(name, number, Label::Repeated, ty)
}

/// Reference to a message or enum by fully qualified name, `.game.Point`.
pub fn typed(name: &str, number: i32, label: Label, ty: Type, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_owned()),
        ..field(name, number, label, ty)
    }
}

pub fn message_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    typed(name, number, Label::Optional, Type::Message, type_name)
}

pub fn enum_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    typed(name, number, Label::Optional, Type::Enum, type_name)
}

pub fn in_oneof(mut field: FieldDescriptorProto, oneof_index: i32) -> FieldDescriptorProto {
    field.oneof_index = Some(oneof_index);
    field
}

/// proto3 `optional`: the field sits alone in a synthetic `_name` oneof.
pub fn proto3_optional(mut field: FieldDescriptorProto, oneof_index: i32) -> FieldDescriptorProto {
    field.oneof_index = Some(oneof_index);
    field.proto3_optional = Some(true);
    field
}

pub fn oneof(name: &str) -> OneofDescriptorProto {
    OneofDescriptorProto {
        name: Some(name.to_owned()),
        ..Default::default()
    }
}

/// The entry message protoc synthesizes for `map<K, V>`.
pub fn map_entry(name: &str, key: Type, value: FieldDescriptorProto) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_owned()),
        field: vec![scalar("key", 1, key), FieldDescriptorProto { name: Some("value".into()), number: Some(2), ..value }],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn enumeration(name: &str, values: &[(&str, i32)]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_owned()),
        value: values
            .iter()
            .map(|(value, number)| EnumValueDescriptorProto {
                name: Some((*value).to_owned()),
                number: Some(*number),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// Generates every output of the first file in `files`.
pub fn generate_first(files: &[FileDescriptorProto], config: &GeneratorConfig) -> Vec<GeneratedFile> {
    let first = files[0].name().to_owned();
    generate_files(files, &[first], config).expect("generation succeeds")
}

pub fn output<'f>(files: &'f [GeneratedFile], name: &str) -> &'f str {
    files
        .iter()
        .find(|file| file.name == name)
        .map(|file| file.content.as_str())
        .unwrap_or_else(|| panic!("no output named {}, got {:?}", name, names(files)))
}

pub fn names(files: &[GeneratedFile]) -> Vec<&str> {
    files.iter().map(|file| file.name.as_str()).collect()
}
