//! Scientific name parsing.
//!
//! Binomial names are stored as a single `sciname` string ("Didelphis
//! virginiana"). The genus is its first word and is the key of the genus
//! grouping files; the species epithet is its last word.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Errors raised while parsing a scientific name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxonError {
    /// The name has no word characters to extract a genus from.
    #[error("malformed scientific name: '{0}'")]
    Malformed(String),
}

fn genus_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*(\w+)").expect("valid genus regex"))
}

fn epithet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\w+)\s*$").expect("valid epithet regex"))
}

/// A parsed binomial name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScientificName {
    full: String,
    genus: String,
    epithet: String,
}

impl ScientificName {
    /// Parse a scientific name.
    ///
    /// Surrounding whitespace is trimmed from the stored full name. A single
    /// word is accepted and used as both genus and epithet.
    pub fn parse(name: &str) -> Result<Self, TaxonError> {
        let genus = genus_pattern()
            .captures(name)
            .map(|c| c[1].to_string())
            .ok_or_else(|| TaxonError::Malformed(name.to_string()))?;
        let epithet = epithet_pattern()
            .captures(name)
            .map(|c| c[1].to_string())
            .ok_or_else(|| TaxonError::Malformed(name.to_string()))?;

        Ok(Self {
            full: name.trim().to_string(),
            genus,
            epithet,
        })
    }

    /// The full name as given, trimmed.
    pub fn as_str(&self) -> &str {
        &self.full
    }

    pub fn genus(&self) -> &str {
        &self.genus
    }

    pub fn epithet(&self) -> &str {
        &self.epithet
    }
}

impl fmt::Display for ScientificName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}
