/// Substring based exclusion shared by catalogue loading and the filesystem scan.
///
/// Substrings are matched against the lowercased full path, which covers both
/// folder names and file names.
#[derive(Debug, Clone, Default)]
pub struct SkipFilter {
    substrings: Vec<String>,
}

impl SkipFilter {
    pub fn new<S: AsRef<str>>(substrings: &[S]) -> Self {
        let substrings = substrings
            .iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { substrings }
    }

    pub fn should_skip(&self, path: &str) -> bool {
        if self.substrings.is_empty() {
            return false;
        }
        let lower = path.to_lowercase();
        self.substrings.iter().any(|s| lower.contains(s.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.substrings.is_empty()
    }
}
