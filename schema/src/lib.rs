//! Read-only views over protobuf file descriptors.
//!
//! The descriptors handed to a protoc plugin reference each other by fully
//! qualified name (`.pkg.Outer.Inner`). [`SchemaIndex`] borrows every file of
//! a request once and resolves those names, so a [`Field`] can hand back the
//! [`Message`] or [`Enum`] it points at. Nothing here copies or mutates the
//! descriptors; every view lives as long as the index borrow.
//!
//! ```
//! use prost_types::{DescriptorProto, FileDescriptorProto};
//! use unreal_proto_schema::SchemaIndex;
//!
//! let file = FileDescriptorProto {
//!     name: Some("point.proto".to_owned()),
//!     package: Some("geo".to_owned()),
//!     message_type: vec![DescriptorProto {
//!         name: Some("Point".to_owned()),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let index = SchemaIndex::new([&file]);
//! let point = index.message(".geo.Point").unwrap();
//! assert_eq!(point.name(), "Point");
//! assert_eq!(index.file(&file).cpp_namespace(), "::geo::");
//! ```

pub mod field;
pub mod index;
pub mod message;

pub use field::{Field, FieldKind};
pub use index::{SchemaIndex, Syntax};
pub use message::{Enum, File, Message, Oneof};

pub use prost_types::field_descriptor_proto::{Label, Type};
