use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// A catalogue `Location` after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Canonical, fully decoded, OS-native path.
    Local(String),
    /// Entry served by a streaming service; never present on disk.
    Streaming,
}

/// Convert a raw catalogue location into a canonical local path.
///
/// `file:` URIs are stripped of their scheme and host and percent-decoded.
/// Invalid percent sequences are kept as-is. Anything else is taken to be a
/// plain path already, which keeps normalization idempotent.
pub fn normalize_location(raw: &str, streaming_prefixes: &[String]) -> Location {
    let raw = raw.trim();
    if is_streaming(raw, streaming_prefixes) {
        return Location::Streaming;
    }

    let path = match strip_file_scheme(raw) {
        Some(rest) => {
            let decoded = percent_decode(&rest);
            if is_streaming(&decoded, streaming_prefixes) {
                return Location::Streaming;
            }
            strip_drive_slash(&decoded).to_string()
        }
        None => raw.to_string(),
    };

    let native = to_native_separators(&path);
    Location::Local(lexical_normalize(Path::new(&native)).to_string_lossy().into_owned())
}

/// Rebuild `path` from its components: `.` segments and repeated separators
/// are dropped and `..` removes the segment before it. The file system is not
/// consulted, so symlinks are not resolved.
///
/// Catalogue paths and scan roots both go through this, so a walked file and
/// its catalogue entry are spelled the same way.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` above the root stays at the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component.as_os_str()),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn is_streaming(value: &str, streaming_prefixes: &[String]) -> bool {
    let lower = value.trim_start_matches('/').to_lowercase();
    streaming_prefixes
        .iter()
        .any(|prefix| lower.starts_with(&prefix.to_lowercase()))
}

/// Returns the path part of a `file:` URI, or `None` for anything else.
fn strip_file_scheme(raw: &str) -> Option<String> {
    let rest = strip_prefix_ignore_case(raw, "file://")?;

    if rest.starts_with('/') {
        return Some(rest.to_string());
    }
    // `file://localhost/...`, and also `file://localhosttidal:...` exports.
    if let Some(after_host) = strip_prefix_ignore_case(rest, "localhost") {
        return Some(after_host.to_string());
    }

    // Remote host: keep it as a UNC path.
    Some(format!("//{}", rest))
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        value.get(prefix.len()..)
    } else {
        None
    }
}

fn percent_decode(value: &str) -> String {
    let decoded = urlencoding::decode_binary(value.as_bytes());
    String::from_utf8_lossy(&decoded).into_owned()
}

/// `/C:/Music` -> `C:/Music`
fn strip_drive_slash(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':'
    {
        &path[1..]
    } else {
        path
    }
}

pub fn to_native_separators(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace('/', &MAIN_SEPARATOR.to_string())
    }
}
