use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::CompileError;
use crate::utils::quote;

pub const DEFAULT_CONVERTER_CLASS: &str = "ProtoToUStructConverter";

lazy_static! {
    static ref CPP_IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles");
}

/// Options passed through protoc's plugin parameter,
/// `--unreal_out=converter_class=GameConverter,api_macro=MYGAME_API:out`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    /// Class holding the static `Convert` overloads.
    pub converter_class: String,
    /// Module export macro written as `struct MYGAME_API FName`.
    pub api_macro:       Option<String>,
    /// Also emit nested (non map-entry) messages as standalone structs.
    pub nested_structs:  bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            converter_class: DEFAULT_CONVERTER_CLASS.to_string(),
            api_macro:       None,
            nested_structs:  false,
        }
    }
}

impl GeneratorConfig {
    /// Parses a comma-separated `key=value` list. Empty input gives defaults.
    pub fn from_parameter(parameter: &str) -> Result<Self, CompileError> {
        let mut config = GeneratorConfig::default();

        for pair in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (pair, None),
            };

            match key {
                "converter_class" => {
                    config.converter_class = identifier(key, value)?.to_string();
                }
                "api_macro" => {
                    let value = identifier(key, value)?;
                    config.api_macro = Some(value.to_string());
                }
                "nested_structs" => {
                    config.nested_structs = flag(key, value)?;
                }
                other => {
                    return Err(CompileError::InvalidParameter(format!(
                        "unknown option {}",
                        quote(other)
                    )))
                }
            }
        }

        Ok(config)
    }

    /// `"MYGAME_API "` or the empty string, ready to splice before a type name.
    pub fn api_prefix(&self) -> String {
        match &self.api_macro {
            Some(api) => format!("{} ", api),
            None => String::new(),
        }
    }
}

impl FromStr for GeneratorConfig {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorConfig::from_parameter(s)
    }
}

fn identifier<'v>(key: &str, value: Option<&'v str>) -> Result<&'v str, CompileError> {
    match value {
        Some(value) if CPP_IDENTIFIER.is_match(value) => Ok(value),
        Some(value) => Err(CompileError::InvalidParameter(format!(
            "{} must be a C++ identifier, got {}",
            key,
            quote(value)
        ))),
        None => Err(CompileError::InvalidParameter(format!("{} needs a value", key))),
    }
}

fn flag(key: &str, value: Option<&str>) -> Result<bool, CompileError> {
    match value {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(CompileError::InvalidParameter(format!(
            "{} must be true or false, got {}",
            key,
            quote(other)
        ))),
    }
}
