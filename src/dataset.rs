//! Designator dataset.
//!
//! The dataset maps a canonical designator string to its entry. It is stored in
//! a `BTreeMap` so iteration is sorted by key: pattern compilation walks the
//! dataset in this order, which keeps the compiled alternations deterministic.
//!
//! The on-disk record format is YAML keyed by canonical form:
//!
//! ```text
//! Limited Liability Company:
//!   abbr_std: LLC
//!   abbr: [LLC, L.L.C.]
//!   lang: en
//!   lead: false
//!   doc: free text
//! ```
//!
//! Every field is optional (`lead` defaults to `false`) and a bare key with a
//! null value is an entry with no abbreviations.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single known designator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignatorEntry {
    /// Canonical designator string; also the dataset key.
    pub canonical_form: String,
    /// Standard abbreviation, if the designator has one.
    pub standard_abbreviation: Option<String>,
    /// Alternate spellings matched alongside the canonical form.
    pub abbreviations: Vec<String>,
    /// Language tag (e.g. `"zh"`, `"ja"`, `"ru"`).
    pub language: Option<String>,
    /// True if the designator may precede the company name.
    pub lead: bool,
    /// Free text, unused by matching.
    pub doc: Option<String>,
}

impl DesignatorEntry {
    pub fn new(canonical_form: impl Into<String>) -> Self {
        DesignatorEntry {
            canonical_form: canonical_form.into(),
            standard_abbreviation: None,
            abbreviations: Vec::new(),
            language: None,
            lead: false,
            doc: None,
        }
    }

    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations = abbreviations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_standard_abbreviation(mut self, abbr: impl Into<String>) -> Self {
        self.standard_abbreviation = Some(abbr.into());
        self
    }

    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    pub fn leading(mut self) -> Self {
        self.lead = true;
        self
    }

    /// The canonical form followed by every abbreviation, in dataset order.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_form.as_str()).chain(self.abbreviations.iter().map(String::as_str))
    }

    /// The designator reported as the standard form: the standard
    /// abbreviation if present, otherwise the canonical form.
    pub fn standard_form(&self) -> &str {
        self.standard_abbreviation.as_deref().unwrap_or(&self.canonical_form)
    }

    fn validate(&self) -> Result<(), DatasetError> {
        if self.canonical_form.trim().is_empty() {
            return Err(DatasetError::EmptyCanonicalForm);
        }
        if self.abbreviations.iter().any(|a| a.trim().is_empty()) {
            return Err(DatasetError::EmptyAbbreviation { designator: self.canonical_form.clone() });
        }
        Ok(())
    }
}

/// Errors raised while loading or validating a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("dataset entry has an empty canonical form")]
    EmptyCanonicalForm,
    #[error("dataset entry {designator:?} has an empty abbreviation")]
    EmptyAbbreviation { designator: String },
}

/// YAML record shape, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntry {
    abbr_std: Option<String>,
    abbr: Vec<String>,
    lang: Option<String>,
    lead: bool,
    doc: Option<String>,
}

/// An immutable-after-load collection of designator entries.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: BTreeMap<String, DesignatorEntry>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Build a dataset from entries, keyed by their canonical forms.
    pub fn from_entries<I>(entries: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = DesignatorEntry>,
    {
        let mut ds = Dataset::new();
        for entry in entries {
            ds.insert(entry)?;
        }
        Ok(ds)
    }

    /// Parse a dataset from its YAML record format.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DatasetError> {
        let raw: BTreeMap<String, Option<RawEntry>> = serde_yaml::from_str(yaml)?;
        let mut ds = Dataset::new();
        for (key, raw) in raw {
            let raw = raw.unwrap_or_default();
            ds.insert(DesignatorEntry {
                canonical_form: key,
                standard_abbreviation: raw.abbr_std.filter(|s| !s.trim().is_empty()),
                abbreviations: raw.abbr,
                language: raw.lang.filter(|s| !s.trim().is_empty()),
                lead: raw.lead,
                doc: raw.doc,
            })?;
        }
        tracing::debug!(entries = ds.len(), "loaded designator dataset");
        Ok(ds)
    }

    /// Read and parse a YAML dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|source| DatasetError::Io { path: path.to_path_buf(), source })?;
        Self::from_yaml_str(&yaml)
    }

    /// Validate and insert `entry`, replacing any entry with the same key.
    pub fn insert(&mut self, entry: DesignatorEntry) -> Result<(), DatasetError> {
        entry.validate()?;
        self.entries.insert(entry.canonical_form.clone(), entry);
        Ok(())
    }

    pub fn get(&self, canonical_form: &str) -> Option<&DesignatorEntry> {
        self.entries.get(canonical_form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical-form order.
    pub fn iter(&self) -> impl Iterator<Item = &DesignatorEntry> {
        self.entries.values()
    }

    /// Re-check every entry; used by the parser before compiling.
    pub(crate) fn validate(&self) -> Result<(), DatasetError> {
        self.entries.values().try_for_each(DesignatorEntry::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
Limited Liability Company:
  abbr_std: LLC
  abbr:
    - LLC
    - L.L.C.
  lang: en
Общество с ограниченной ответственностью:
  abbr: [ООО]
  lang: ru
  lead: true
Bare Designator:
"#;

    #[test]
    fn parses_record_format() {
        let ds = Dataset::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(ds.len(), 3);

        let llc = ds.get("Limited Liability Company").unwrap();
        assert_eq!(llc.standard_abbreviation.as_deref(), Some("LLC"));
        assert_eq!(llc.abbreviations, vec!["LLC", "L.L.C."]);
        assert_eq!(llc.language.as_deref(), Some("en"));
        assert!(!llc.lead);

        let ooo = ds.get("Общество с ограниченной ответственностью").unwrap();
        assert!(ooo.lead);
        assert_eq!(ooo.standard_form(), "Общество с ограниченной ответственностью");

        let bare = ds.get("Bare Designator").unwrap();
        assert!(bare.abbreviations.is_empty());
        assert_eq!(bare.spellings().collect::<Vec<_>>(), vec!["Bare Designator"]);
    }

    #[test]
    fn rejects_empty_canonical_form() {
        let err = Dataset::from_entries([DesignatorEntry::new("  ")]).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyCanonicalForm));
    }

    #[test]
    fn rejects_empty_abbreviation() {
        let err = Dataset::from_yaml_str("GmbH:\n  abbr: ['']\n").unwrap_err();
        assert!(matches!(err, DatasetError::EmptyAbbreviation { ref designator } if designator == "GmbH"));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = Dataset::from_yaml_str("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, DatasetError::Yaml(_)));
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let err = Dataset::from_path("/nonexistent/designators.yml").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/designators.yml"));
    }

    #[test]
    fn iteration_is_sorted_by_key() {
        let ds = Dataset::from_entries([DesignatorEntry::new("Zeta"), DesignatorEntry::new("Alpha")]).unwrap();
        let keys: Vec<&str> = ds.iter().map(|e| e.canonical_form.as_str()).collect();
        assert_eq!(keys, vec!["Alpha", "Zeta"]);
    }
}
