use std::path::{Path, PathBuf};

/// Longest common prefix of `paths`, compared character by character.
///
/// The result is not aligned to path segments: `/music/ab` and `/music/ac`
/// give `/music/a`. Paths sharing nothing but a leading separator give `""`.
/// Use [`nearest_directory`] before treating the result as a folder.
pub fn common_root<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut iter = paths.into_iter();
    let mut prefix: &str = match iter.next() {
        Some(first) => first,
        None => return String::new(),
    };

    for path in iter {
        let shared = prefix
            .char_indices()
            .zip(path.chars())
            .find(|((_, a), b)| a != b)
            .map(|((idx, _), _)| idx)
            .unwrap_or(prefix.len().min(path.len()));
        prefix = &prefix[..shared];
        if prefix.is_empty() {
            break;
        }
    }

    // A bare leading separator is not a shared folder.
    if prefix.chars().all(|c| c == '/' || c == '\\') {
        return String::new();
    }
    prefix.to_string()
}

/// The deepest existing directory that `prefix` starts with.
///
/// Returns `prefix` itself when it is a directory, otherwise walks up its
/// ancestors. A prefix that split a segment (`/music/a`) resolves to the
/// enclosing folder (`/music`).
pub fn nearest_directory(prefix: &str) -> Option<PathBuf> {
    if prefix.is_empty() {
        return None;
    }
    Path::new(prefix)
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .find(|p| p.is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_root_shared_folder() {
        assert_eq!(common_root(["/a/b/c", "/a/b/d"]), "/a/b/");
    }

    #[test]
    fn test_common_root_single_path() {
        assert_eq!(common_root(["/a/b"]), "/a/b");
    }

    #[test]
    fn test_common_root_nothing_shared() {
        assert_eq!(common_root(["a/b", "x/y"]), "");
        assert_eq!(common_root(["C:\\music\\a.mp3", "D:\\music\\a.mp3"]), "");
    }

    #[test]
    fn test_common_root_only_separator_shared() {
        assert_eq!(common_root(["/a/b", "/x/y"]), "");
        assert_eq!(common_root(["\\\\nas\\a", "\\\\box\\b"]), "");
    }

    #[test]
    fn test_common_root_splits_segment() {
        assert_eq!(common_root(["/music/ab", "/music/ac"]), "/music/a");
    }

    #[test]
    fn test_common_root_shorter_path_is_prefix() {
        assert_eq!(common_root(["/music/long/a.mp3", "/music/lo"]), "/music/lo");
        assert_eq!(common_root(["/music/lo", "/music/long/a.mp3"]), "/music/lo");
    }

    #[test]
    fn test_common_root_multibyte() {
        assert_eq!(common_root(["/músic/é1", "/músic/é2"]), "/músic/é");
        assert_eq!(common_root(["/é", "/è"]), "");
    }

    #[test]
    fn test_common_root_empty_input() {
        assert_eq!(common_root(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_nearest_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let music = tmp.path().join("music");
        std::fs::create_dir_all(music.join("abc")).unwrap();

        let split = format!("{}", music.join("ab").display());
        assert_eq!(nearest_directory(&split), Some(music.clone()));

        let exact = format!("{}", music.join("abc").display());
        assert_eq!(nearest_directory(&exact), Some(music.join("abc")));

        assert_eq!(nearest_directory(""), None);
    }
}
