/// Quotes `text` as a double-quoted literal, escaping as needed.
/// Used for `#include` paths, which C++ and JSON quote alike.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Strips directories and the extension: `protos/game_state.proto` → `game_state`.
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

/// Directory part of a proto path with its trailing `/`: `a/b/c.proto` → `a/b/`.
pub fn file_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(slash) => &path[..=slash],
        None => "",
    }
}

/// Header protoc's C++ generator writes for `path`: `a/b.proto` → `a/b.pb.h`.
pub fn pb_header(path: &str) -> String {
    let base = path.strip_suffix(".proto").unwrap_or(path);
    format!("{}.pb.h", base)
}
