//! Identifier conventions on both sides of the converter: Unreal's
//! PascalCase for everything we declare, and the names protoc's C++
//! generator gives the wire-side accessors and case constants.

/// How the letters after the first one of each `_`-separated word are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Keep them as written. Used for file-derived names.
    Legacy,
    /// Lower-case all-caps words so `USER_ID` and `user_id` agree.
    /// A word whose tail already contains a lower-case letter keeps its
    /// casing, so the transform is stable on its own output.
    Strict,
}

/// Converts a wire identifier to PascalCase: every `_`-separated word gets an
/// upper-case first letter and the underscores are dropped.
///
/// Both modes are idempotent on their own output, with one caveat for
/// `Strict`: a name whose words have no letters after the first (`x_y`,
/// `v1_v2`) comes out all-caps (`XY`) and reads as a shouted word the second
/// time round.
pub fn to_pascal_case(s: &str, case: Case) -> String {
    s.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| capitalize(word, case))
        .collect()
}

/// Strict-mode PascalCase, the form used for members and enum values.
pub fn pascal(s: &str) -> String {
    to_pascal_case(s, Case::Strict)
}

fn capitalize(word: &str, case: Case) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();
    let mut out = String::with_capacity(word.len());
    out.push(first.to_ascii_uppercase());
    match case {
        Case::Strict if !rest.chars().any(|c| c.is_ascii_lowercase()) => {
            out.push_str(&rest.to_ascii_lowercase())
        }
        _ => out.push_str(rest),
    }
    out
}

const CPP_KEYWORDS: &[&str] = &[
    "NULL", "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool",
    "break", "case", "catch", "char", "class", "compl", "const", "constexpr", "const_cast",
    "continue", "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum",
    "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if", "inline",
    "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr",
    "operator", "or", "or_eq", "private", "protected", "public", "register", "reinterpret_cast",
    "return", "short", "signed", "sizeof", "static", "static_assert", "static_cast", "struct",
    "switch", "template", "this", "thread_local", "throw", "true", "try", "typedef", "typeid",
    "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "wchar_t", "while",
    "xor", "xor_eq", "char16_t",
];

/// Accessor protoc generates for a field: lower-cased, with a trailing `_`
/// when that collides with a C++ keyword (`class` → `class_`).
pub fn wire_accessor(field_name: &str) -> String {
    let lower = field_name.to_ascii_lowercase();
    if CPP_KEYWORDS.contains(&lower.as_str()) {
        format!("{}_", lower)
    } else {
        lower
    }
}

/// Presence accessor, built from the escaped accessor name
/// (`default` → `has_default_`).
pub fn wire_has(field_name: &str) -> String {
    format!("has_{}", wire_accessor(field_name))
}

/// Oneof case accessor, `<name>_case`. protoc keeps the oneof name as written.
pub fn wire_case_accessor(oneof_name: &str) -> String {
    format!("{}_case", oneof_name)
}

/// Case constant protoc generates for a oneof member: `k` followed by the
/// camel-cased name. Letters after `_` or a digit are capitalized, the rest
/// keep their casing.
pub fn wire_case_constant(field_name: &str) -> String {
    let mut out = String::from("k");
    let mut cap_next = true;
    for c in field_name.chars() {
        if c.is_ascii_lowercase() {
            out.push(if cap_next { c.to_ascii_uppercase() } else { c });
            cap_next = false;
        } else if c.is_ascii_uppercase() {
            out.push(c);
            cap_next = false;
        } else if c.is_ascii_digit() {
            out.push(c);
            cap_next = true;
        } else {
            cap_next = true;
        }
    }
    out
}
