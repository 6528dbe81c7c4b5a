use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::FieldDescriptorProto;

use crate::index::Syntax;
use crate::message::{Enum, Message, Oneof};

/// Base type of a field, with message and enum references resolved.
///
/// `Scalar` carries every other tag, string included. A message or enum
/// reference that is missing from the index also stays a `Scalar` holding its
/// raw tag, and a tag this version of `prost-types` does not know ends up in
/// `Unrecognized`.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind<'s> {
    Scalar(Type),
    Message(Message<'s>),
    Enum(Enum<'s>),
    Unrecognized(i32),
}

impl FieldKind<'_> {
    pub fn is_string(&self) -> bool {
        matches!(self, FieldKind::Scalar(Type::String))
    }
}

/// A field of a message.
#[derive(Debug, Clone, Copy)]
pub struct Field<'s> {
    proto:  &'s FieldDescriptorProto,
    parent: Message<'s>,
}

impl<'s> Field<'s> {
    pub(crate) fn new(proto: &'s FieldDescriptorProto, parent: Message<'s>) -> Self {
        Field { proto, parent }
    }

    pub fn proto(&self) -> &'s FieldDescriptorProto {
        self.proto
    }

    pub fn name(&self) -> &'s str {
        self.proto.name()
    }

    /// Message this field is declared in.
    pub fn parent(&self) -> Message<'s> {
        self.parent
    }

    /// Raw type tag; `None` when unset or outside the known `Type` range.
    pub fn type_tag(&self) -> Option<Type> {
        self.proto.r#type.and_then(|raw| Type::try_from(raw).ok())
    }

    pub fn kind(&self) -> FieldKind<'s> {
        let ty = match self.proto.r#type {
            Some(raw) => match Type::try_from(raw) {
                Ok(ty) => ty,
                Err(_) => return FieldKind::Unrecognized(raw),
            },
            // protoc always sets the tag; an unset one means an unresolved
            // type name that can only refer to a message or enum.
            None => return self.resolve_unset(),
        };

        let index = self.parent.index();
        match ty {
            Type::Message | Type::Group => index
                .message(self.proto.type_name())
                .map(FieldKind::Message)
                .unwrap_or(FieldKind::Scalar(ty)),
            Type::Enum => index
                .enumeration(self.proto.type_name())
                .map(FieldKind::Enum)
                .unwrap_or(FieldKind::Scalar(ty)),
            other => FieldKind::Scalar(other),
        }
    }

    fn resolve_unset(&self) -> FieldKind<'s> {
        let index = self.parent.index();
        let name = self.proto.type_name();
        if let Some(message) = index.message(name) {
            FieldKind::Message(message)
        } else if let Some(enumeration) = index.enumeration(name) {
            FieldKind::Enum(enumeration)
        } else {
            FieldKind::Scalar(Type::Message)
        }
    }

    /// True when the reference names a message or enum the index cannot find.
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self.kind(),
            FieldKind::Scalar(Type::Message | Type::Group | Type::Enum)
        )
    }

    fn is_labelled_repeated(&self) -> bool {
        self.proto.label() == Label::Repeated
    }

    /// `map<K, V>`: a repeated field of a synthesized map-entry message.
    pub fn is_map(&self) -> bool {
        self.is_labelled_repeated()
            && matches!(self.kind(), FieldKind::Message(entry) if entry.is_map_entry())
    }

    /// Repeated and not a map.
    pub fn is_repeated(&self) -> bool {
        self.is_labelled_repeated() && !self.is_map()
    }

    /// The `key` and `value` fields of a map field's entry message.
    pub fn map_entry(&self) -> Option<(Field<'s>, Field<'s>)> {
        match self.kind() {
            FieldKind::Message(entry) if self.is_labelled_repeated() && entry.is_map_entry() => {
                Some((entry.field_named("key")?, entry.field_named("value")?))
            }
            _ => None,
        }
    }

    /// Oneof this field belongs to, synthetic or not.
    pub fn containing_oneof(&self) -> Option<Oneof<'s>> {
        self.parent.oneof_at(self.proto.oneof_index?)
    }

    /// User-declared oneof this field belongs to.
    pub fn real_oneof(&self) -> Option<Oneof<'s>> {
        self.containing_oneof().filter(|oneof| !oneof.is_synthetic())
    }

    /// Whether "unset" is observable apart from the default value.
    ///
    /// Members of a real oneof report `false`: the oneof's case carries their
    /// presence. Proto3 `optional`, singular messages and every singular field
    /// of a proto2 or editions file report `true`.
    ///
    /// Editions fields follow the edition 2023 default, explicit presence.
    /// `features.field_presence = IMPLICIT` is not seen: `prost-types` 0.13
    /// has no `FeatureSet` and drops the option while decoding.
    pub fn has_presence(&self) -> bool {
        if self.is_labelled_repeated() || self.real_oneof().is_some() {
            return false;
        }
        if self.proto.proto3_optional() {
            return true;
        }
        match self.kind() {
            FieldKind::Message(_) | FieldKind::Scalar(Type::Message | Type::Group) => true,
            _ => self.parent.syntax() != Syntax::Proto3,
        }
    }
}
