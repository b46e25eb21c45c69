//! Species range records as stored in the genus grouping files.

use geo::MultiPolygon;

use crate::taxon::{ScientificName, TaxonError};

/// Attribute columns of a genus file, in storage order (geometry excluded).
pub const RECORD_COLUMNS: [&str; 9] = [
    "sciname",
    "genus",
    "species",
    "order",
    "family",
    "author",
    "year",
    "citation",
    "rec_source",
];

/// One species range row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRecord {
    pub sciname: String,
    pub genus: String,
    pub species: String,
    pub order: Option<String>,
    pub family: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub citation: Option<String>,
    pub rec_source: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

impl SpeciesRecord {
    /// Create a record from a scientific name, deriving genus and species.
    pub fn new(sciname: &str, geometry: MultiPolygon<f64>) -> Result<Self, TaxonError> {
        let name = ScientificName::parse(sciname)?;
        Ok(Self {
            sciname: name.as_str().to_string(),
            genus: name.genus().to_string(),
            species: name.epithet().to_string(),
            order: None,
            family: None,
            author: None,
            year: None,
            citation: None,
            rec_source: None,
            geometry,
        })
    }

    /// Set the higher taxonomy columns.
    pub fn with_taxonomy(mut self, order: impl Into<String>, family: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self.family = Some(family.into());
        self
    }

    /// Set the authority columns.
    pub fn with_authority(mut self, author: impl Into<String>, year: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self.year = Some(year.into());
        self
    }

    /// Value of an attribute column by name, `None` for unknown or unset columns.
    pub fn attribute(&self, column: &str) -> Option<&str> {
        match column {
            "sciname" => Some(&self.sciname),
            "genus" => Some(&self.genus),
            "species" => Some(&self.species),
            "order" => self.order.as_deref(),
            "family" => self.family.as_deref(),
            "author" => self.author.as_deref(),
            "year" => self.year.as_deref(),
            "citation" => self.citation.as_deref(),
            "rec_source" => self.rec_source.as_deref(),
            _ => None,
        }
    }

    /// Set an optional attribute column by name. Unknown columns are ignored.
    pub fn set_attribute(&mut self, column: &str, value: Option<String>) {
        match column {
            "order" => self.order = value,
            "family" => self.family = value,
            "author" => self.author = value,
            "year" => self.year = value,
            "citation" => self.citation = value,
            "rec_source" => self.rec_source = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::square;

    #[test]
    fn test_new_derives_genus_and_species() {
        let record = SpeciesRecord::new("Didelphis aurita", square(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(record.genus, "Didelphis");
        assert_eq!(record.species, "aurita");
        assert!(record.order.is_none());
    }

    #[test]
    fn test_attribute_accessors() {
        let mut record = SpeciesRecord::new("Didelphis aurita", square(0.0, 0.0, 1.0))
            .unwrap()
            .with_taxonomy("Didelphimorphia", "Didelphidae")
            .with_authority("Wied-Neuwied", "1826");
        record.set_attribute("rec_source", Some("MDD".to_string()));

        assert_eq!(record.attribute("order"), Some("Didelphimorphia"));
        assert_eq!(record.attribute("year"), Some("1826"));
        assert_eq!(record.attribute("rec_source"), Some("MDD"));
        assert_eq!(record.attribute("citation"), None);
        assert_eq!(record.attribute("nope"), None);
    }
}
