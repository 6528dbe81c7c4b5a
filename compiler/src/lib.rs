//! unreal-proto-compiler
//!
//! Turns protobuf descriptors into Unreal Engine sources:
//!  1) `UENUM`s for every schema enum, in one shared header,
//!  2) one `USTRUCT` header per message, with oneofs lowered to a
//!     discriminant enum plus flat members,
//!  3) a converter class whose static `Convert` overloads build each struct
//!     from its protobuf-generated C++ message,
//!  4) the protoc plugin request/response plumbing (`generate`,
//!     `generate_from_bytes`).
//!
//! Output is a pure function of the descriptors and the plugin parameter.

pub mod config;
pub mod converter;
pub mod declarations;
pub mod error;
pub mod generator;
pub mod naming;
pub mod planner;
pub mod printer;
pub mod type_map;
pub mod utils;

pub use config::GeneratorConfig;
pub use error::CompileError;
pub use generator::{generate, generate_files, generate_from_bytes, respond, write_files};
pub use planner::{FilePlanner, GeneratedFile};
