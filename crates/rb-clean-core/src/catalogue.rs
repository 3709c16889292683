use crate::config::{AppConfig, CasePolicy};
use crate::error::Error;
use crate::location::{normalize_location, Location};
use crate::skip::SkipFilter;
use roxmltree::{Document, ParsingOptions};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

const TRACK_TAG: &str = "TRACK";
const LOCATION_ATTR: &str = "Location";

/// One catalogue entry resolved to a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePath {
    /// The `Location` attribute as exported, for diagnostics.
    pub raw: String,
    pub canonical: String,
}

/// All reference paths that survived streaming and skip filtering.
///
/// Duplicates are kept in `iter()`, membership is answered from a hash index
/// folded according to the configured [`CasePolicy`].
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    paths: Vec<ReferencePath>,
    index: HashSet<String>,
    case: CasePolicy,
}

impl ReferenceSet {
    pub fn new(case: CasePolicy) -> Self {
        Self {
            paths: Vec::new(),
            index: HashSet::new(),
            case,
        }
    }

    pub fn insert(&mut self, reference: ReferencePath) {
        self.index.insert(self.case.fold(&reference.canonical));
        self.paths.push(reference);
    }

    pub fn contains(&self, path: &str) -> bool {
        match self.case {
            CasePolicy::Sensitive => self.index.contains(path),
            CasePolicy::Insensitive => self.index.contains(&path.to_lowercase()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferencePath> {
        self.paths.iter()
    }

    /// Canonical paths, sorted and deduplicated.
    pub fn unique_paths(&self) -> BTreeSet<&str> {
        self.paths.iter().map(|r| r.canonical.as_str()).collect()
    }

    pub fn case_policy(&self) -> CasePolicy {
        self.case
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueStats {
    pub tracks: usize,
    pub without_location: usize,
    pub streaming: usize,
    pub skipped: usize,
    pub references: usize,
}

/// Read and parse the catalogue at `path`.
pub fn load_catalogue(
    path: &Path,
    config: &AppConfig,
) -> Result<(ReferenceSet, CatalogueStats), Error> {
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::CatalogueNotFound(path.to_path_buf()),
        _ => Error::CatalogueRead {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let (references, stats) = parse_catalogue(&text, path, config)?;
    info!(
        "Loaded {} references from {} tracks ({} streaming, {} skipped, {} without location)",
        stats.references, stats.tracks, stats.streaming, stats.skipped, stats.without_location
    );
    Ok((references, stats))
}

/// Extract reference paths from catalogue XML. `path` is only used in errors.
pub fn parse_catalogue(
    text: &str,
    path: &Path,
    config: &AppConfig,
) -> Result<(ReferenceSet, CatalogueStats), Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options).map_err(|source| {
        Error::CatalogueMalformed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let skip = SkipFilter::new(&config.skip_substrings);
    let mut references = ReferenceSet::new(config.path_case);
    let mut stats = CatalogueStats::default();

    for track in doc.descendants().filter(|n| n.has_tag_name(TRACK_TAG)) {
        stats.tracks += 1;

        let raw = match track.attribute(LOCATION_ATTR) {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                stats.without_location += 1;
                continue;
            }
        };

        let canonical = match normalize_location(raw, &config.streaming_prefixes) {
            Location::Local(canonical) => canonical,
            Location::Streaming => {
                stats.streaming += 1;
                continue;
            }
        };

        if skip.should_skip(&canonical) {
            debug!("Skipping catalogue entry {}", canonical);
            stats.skipped += 1;
            continue;
        }

        references.insert(ReferencePath {
            raw: raw.to_string(),
            canonical,
        });
    }
    stats.references = references.len();

    if stats.tracks == 0 {
        return Err(Error::CatalogueEmpty {
            path: path.to_path_buf(),
            reason: "the file contains no TRACK entries".to_string(),
        });
    }
    if references.is_empty() {
        return Err(Error::CatalogueEmpty {
            path: path.to_path_buf(),
            reason: format!(
                "none of the {} TRACK entries refer to a local file outside the skipped folders",
                stats.tracks
            ),
        });
    }

    Ok((references, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::to_native_separators;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<DJ_PLAYLISTS Version="1.0.0">
  <PRODUCT Name="rekordbox" Version="6.8.5" Company="AlphaTheta"/>
  <COLLECTION Entries="5">
    <TRACK TrackID="1" Name="One" Location="file://localhost/music/house/One%20More%20Time.mp3"/>
    <TRACK TrackID="2" Name="Two" Location="file://localhost/music/private/two.mp3"/>
    <TRACK TrackID="3" Name="Three" Location="tidal:tracks:12345"/>
    <TRACK TrackID="4" Name="Four"/>
    <TRACK TrackID="5" Name="Five" Location="file://localhost/music/techno/five.wav"/>
  </COLLECTION>
  <PLAYLISTS>
    <NODE Type="0" Name="ROOT" Count="1">
      <NODE Name="Set" Type="1" KeyType="0" Entries="1">
        <TRACK Key="1"/>
      </NODE>
    </NODE>
  </PLAYLISTS>
</DJ_PLAYLISTS>"#;

    fn config(skip: &[&str]) -> AppConfig {
        AppConfig {
            skip_substrings: skip.iter().map(|s| s.to_string()).collect(),
            path_case: CasePolicy::Sensitive,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_parse_sample_catalogue() {
        let (refs, stats) =
            parse_catalogue(SAMPLE, Path::new("sample.xml"), &config(&["private"])).unwrap();

        assert_eq!(stats.tracks, 6);
        assert_eq!(stats.without_location, 2);
        assert_eq!(stats.streaming, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.references, 2);

        assert!(refs.contains(&to_native_separators("/music/house/One More Time.mp3")));
        assert!(refs.contains(&to_native_separators("/music/techno/five.wav")));
        assert!(!refs.contains(&to_native_separators("/music/private/two.mp3")));
    }

    #[test]
    fn test_streaming_excluded_regardless_of_skip_list() {
        let (refs, _) = parse_catalogue(SAMPLE, Path::new("sample.xml"), &config(&[])).unwrap();
        assert_eq!(refs.len(), 3);
        assert!(refs.iter().all(|r| !r.canonical.contains("tidal")));
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_catalogue("<DJ_PLAYLISTS><TRACK>", Path::new("bad.xml"), &config(&[]))
            .unwrap_err();
        assert!(matches!(err, Error::CatalogueMalformed { .. }));
    }

    #[test]
    fn test_no_tracks_is_empty() {
        let err = parse_catalogue(
            "<DJ_PLAYLISTS><COLLECTION/></DJ_PLAYLISTS>",
            Path::new("empty.xml"),
            &config(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::CatalogueEmpty { .. }));
    }

    #[test]
    fn test_only_streaming_tracks_is_empty() {
        let xml = r#"<DJ_PLAYLISTS><COLLECTION>
            <TRACK Location="tidal:tracks:1"/>
            <TRACK Location="soundcloud:tracks:2"/>
        </COLLECTION></DJ_PLAYLISTS>"#;
        let err = parse_catalogue(xml, Path::new("stream.xml"), &config(&[])).unwrap_err();
        match err {
            Error::CatalogueEmpty { reason, .. } => assert!(reason.contains("2 TRACK")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_case_insensitive_membership() {
        let mut refs = ReferenceSet::new(CasePolicy::Insensitive);
        refs.insert(ReferencePath {
            raw: "file://localhost/Music/A.mp3".to_string(),
            canonical: "/Music/A.mp3".to_string(),
        });
        assert!(refs.contains("/music/a.MP3"));

        let mut strict = ReferenceSet::new(CasePolicy::Sensitive);
        strict.insert(ReferencePath {
            raw: String::new(),
            canonical: "/Music/A.mp3".to_string(),
        });
        assert!(!strict.contains("/music/a.MP3"));
        assert!(strict.contains("/Music/A.mp3"));
    }

    #[test]
    fn test_duplicates_are_tolerated() {
        let mut refs = ReferenceSet::new(CasePolicy::Sensitive);
        for _ in 0..2 {
            refs.insert(ReferencePath {
                raw: String::new(),
                canonical: "/music/a.mp3".to_string(),
            });
        }
        assert_eq!(refs.len(), 2);
        assert_eq!(refs.unique_paths().len(), 1);
    }
}
