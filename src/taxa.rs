//! Read the taxa to place on the leaves of generated trees.
//!
//! Taxa are read from a text file with one label per line. All whitespace
//! is removed from each line and lines left empty are skipped.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use tracing::debug;

use crate::tree::PLACEHOLDER;

/// Characters with a meaning in newick strings, which cannot appear in labels.
/// This includes the symbol of unlabelled leaf slots.
pub const RESERVED_CHARACTERS: [char; 8] = ['(', ')', ',', ':', ';', '[', ']', PLACEHOLDER];

/// Errors that can occur when building a [`TaxonSet`].
#[derive(Error, Debug)]
pub enum TaxaError {
    /// No label was found in the input
    #[error("No taxon labels found.")]
    Empty,
    /// A label is the empty string
    #[error("Taxon labels cannot be empty.")]
    EmptyLabel,
    /// The same label was given more than once
    #[error("Taxon label '{0}' appears more than once.")]
    DuplicateTaxon(String),
    /// A label contains a character that would break the newick output
    #[error("Taxon label '{label}' contains '{character}', which is reserved in newick.")]
    ReservedCharacter {
        /// The offending label
        label: String,
        /// The reserved character found in it
        character: char,
    },
    /// There was a [`std::io::Error`] when reading the taxa
    #[error("Problem reading taxa")]
    IoError(#[from] std::io::Error),
}

/// An ordered set of unique taxon labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonSet {
    labels: Vec<String>,
}

impl TaxonSet {
    /// Build a set of taxa from labels, keeping their order.
    /// ```
    /// use randtree::taxa::{TaxaError, TaxonSet};
    ///
    /// let taxa = TaxonSet::new(["A", "B", "C"]).unwrap();
    /// assert_eq!(taxa.len(), 3);
    ///
    /// let duplicated = TaxonSet::new(["A", "B", "A"]);
    /// assert!(matches!(duplicated, Err(TaxaError::DuplicateTaxon(label)) if label == "A"));
    /// ```
    pub fn new<I, S>(labels: I) -> Result<Self, TaxaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(TaxaError::Empty);
        }

        Self::check_labels(&labels)?;

        Ok(Self { labels })
    }

    fn check_labels(labels: &[String]) -> Result<(), TaxaError> {
        let mut seen = HashSet::new();
        for label in labels.iter() {
            if label.is_empty() {
                return Err(TaxaError::EmptyLabel);
            }
            if let Some(character) = label.chars().find(|c| RESERVED_CHARACTERS.contains(c)) {
                return Err(TaxaError::ReservedCharacter {
                    label: label.clone(),
                    character,
                });
            }
            if !seen.insert(label.as_str()) {
                return Err(TaxaError::DuplicateTaxon(label.clone()));
            }
        }

        Ok(())
    }

    /// Read taxa from a line oriented reader.
    /// ```
    /// use randtree::taxa::TaxonSet;
    ///
    /// let input = "Homo sapiens\n\n  Pan troglodytes\t\nGorilla_gorilla\r\n";
    /// let taxa = TaxonSet::from_reader(input.as_bytes()).unwrap();
    ///
    /// assert_eq!(taxa.labels(), ["Homosapiens", "Pantroglodytes", "Gorilla_gorilla"]);
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TaxaError> {
        let mut labels = vec![];
        for line in reader.lines() {
            let label: String = line?.chars().filter(|c| !c.is_whitespace()).collect();
            if !label.is_empty() {
                labels.push(label);
            }
        }

        let taxa = Self::new(labels)?;
        debug!(n_taxa = taxa.len(), "Read taxa");

        Ok(taxa)
    }

    /// Read taxa from a text file with one label per line
    pub fn from_file(path: &Path) -> Result<Self, TaxaError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Returns the number of taxa
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// A set of taxa is never empty, this is here for completeness
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the labels in input order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterate over the labels in input order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
