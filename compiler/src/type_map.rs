use std::collections::HashMap;

use lazy_static::lazy_static;
use unreal_proto_schema::{Field, FieldKind, Type};

use crate::naming::pascal;

pub const STRUCT_SIGIL: &str = "F";
pub const ENUM_SIGIL: &str = "E";
pub const HOST_STRING: &str = "FString";

lazy_static! {
    static ref PRIMITIVE_TYPES: HashMap<Type, &'static str> = {
        let mut types = HashMap::new();
        types.insert(Type::Double, "double");
        types.insert(Type::Float, "float");
        types.insert(Type::Int64, "int64");
        types.insert(Type::Uint64, "uint64");
        types.insert(Type::Int32, "int32");
        types.insert(Type::Bool, "bool");
        types.insert(Type::String, HOST_STRING);
        types
    };
}

/// `Point` → `FPoint`.
pub fn struct_name(message_name: &str) -> String {
    format!("{}{}", STRUCT_SIGIL, message_name)
}

/// `Color` → `EColor`.
pub fn enum_name(enum_name: &str) -> String {
    format!("{}{}", ENUM_SIGIL, enum_name)
}

/// Discriminant enum of a real oneof: `M` + `choice` → `EMChoiceType`.
pub fn oneof_enum_name(message_name: &str, oneof_name: &str) -> String {
    format!("{}{}{}Type", ENUM_SIGIL, message_name, pascal(oneof_name))
}

/// Struct member holding a oneof's discriminant: `choice` → `ChoiceType`.
pub fn oneof_member_name(oneof_name: &str) -> String {
    format!("{}Type", pascal(oneof_name))
}

/// Struct member of a field, shared by declarations and converters.
pub fn member_name(field: &Field<'_>) -> String {
    pascal(field.name())
}

/// Element type of a field, ignoring repeated/map/presence.
///
/// Any scalar tag missing from the table becomes `FString`; that keeps the
/// mapping total for tags this generator has no dedicated type for.
pub fn base_type(kind: &FieldKind<'_>) -> String {
    match kind {
        FieldKind::Message(message) => struct_name(message.name()),
        FieldKind::Enum(enumeration) => enum_name(enumeration.name()),
        FieldKind::Scalar(ty) => PRIMITIVE_TYPES.get(ty).copied().unwrap_or(HOST_STRING).to_string(),
        FieldKind::Unrecognized(_) => HOST_STRING.to_string(),
    }
}

/// Container shape of a field. Precedence: map, repeated, presence, plain.
#[derive(Debug, Clone, Copy)]
pub enum FieldShape<'s> {
    Map { key: Field<'s>, value: Field<'s> },
    Repeated,
    Optional,
    Plain,
}

impl<'s> FieldShape<'s> {
    pub fn of(field: &Field<'s>) -> Self {
        if field.is_map() {
            if let Some((key, value)) = field.map_entry() {
                return FieldShape::Map { key, value };
            }
            // An entry without key/value still arrives as a list of entries.
            return FieldShape::Repeated;
        }
        if field.is_repeated() {
            FieldShape::Repeated
        } else if field.has_presence() {
            FieldShape::Optional
        } else {
            FieldShape::Plain
        }
    }
}

pub fn map_type(key: &str, value: &str) -> String {
    format!("TMap<{}, {}>", key, value)
}

/// Wraps `base` for the non-map modifiers.
pub fn compose(base: &str, repeated: bool, has_presence: bool) -> String {
    if repeated {
        format!("TArray<{}>", base)
    } else if has_presence {
        format!("TOptional<{}>", base)
    } else {
        base.to_string()
    }
}

/// Declared type of a field's struct member.
pub fn full_type(field: &Field<'_>) -> String {
    match FieldShape::of(field) {
        FieldShape::Map { key, value } => {
            map_type(&base_type(&key.kind()), &base_type(&value.kind()))
        }
        FieldShape::Repeated => compose(&base_type(&field.kind()), true, false),
        FieldShape::Optional => compose(&base_type(&field.kind()), false, true),
        FieldShape::Plain => base_type(&field.kind()),
    }
}
