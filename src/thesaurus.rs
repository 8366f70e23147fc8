//! Thesaurus seam - alternate-name lookup for schema identifiers
//!
//! A thesaurus supplies synonyms for table and column names so that a
//! downstream natural-language layer can match "clients" against a table
//! named `customers`. The core never ships a thesaurus of its own; it only
//! consumes the trait.

use serde::{Deserialize, Serialize};

/// Trait for synonym providers.
///
/// Implementations must never fail on unknown words - a word with no
/// alternates yields an empty list.
pub trait Thesaurus: Send + Sync {
    /// Alternate words for `word`, empty when there is nothing to add
    fn synonyms_of(&self, word: &str) -> Vec<String>;
}

/// One entry in an identifier's equivalence list.
///
/// The first entry is always the lowercase identifier itself as a
/// [`Equivalence::Word`]. A thesaurus contribution is kept as one
/// [`Equivalence::Group`] entry rather than flattened into words;
/// consumers match against either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Equivalence {
    /// A single alternate word
    Word(String),
    /// A batch of alternates contributed by the thesaurus in one call
    Group(Vec<String>),
}

/// Build the equivalence list for an identifier.
///
/// The lowercase form of `name` always comes first. When a thesaurus is
/// present, its result for the original-case `name` is appended as a
/// single group - even an empty one, so the list shape records that a
/// lookup happened.
pub fn build_equivalences(name: &str, thesaurus: Option<&dyn Thesaurus>) -> Vec<Equivalence> {
    let mut equivalences = vec![Equivalence::Word(name.to_lowercase())];
    if let Some(thesaurus) = thesaurus {
        equivalences.push(Equivalence::Group(thesaurus.synonyms_of(name)));
    }
    equivalences
}
