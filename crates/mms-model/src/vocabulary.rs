//! Bidirectional vocabulary tables.
//!
//! A vocabulary table pairs a **canonical** term with a **localized**
//! (marketplace-specific) term, e.g. `상의 ↔ tops` for categories or
//! `Nike ↔ 나이키` for brands. Lookups work in both directions and fall back
//! to case-insensitive matching.
//!
//! ## Bijection
//!
//! Round-tripping a term through a table only preserves information when no
//! two canonical terms share a localized term (and vice versa) and no term
//! appears on both sides. Terms compare case-insensitively. Tables are
//! hand-authored, so this is not assumed: conflicting pairs are recorded as
//! [`VocabularyCollision`]s (first pair wins) and [`VocabularyTable::is_bijective`]
//! reports whether any were seen.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ModelError, Result};

/// Which side of a pair collided with an earlier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionSide {
    /// The canonical term was already paired with a different localized term.
    Canonical,
    /// The localized term was already paired with a different canonical term.
    Localized,
    /// The term is already used on the other side of the table, so
    /// `translate` could not tell which direction to go.
    Crossed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyCollision {
    pub side: CollisionSide,
    /// The term that appeared twice.
    pub term: String,
    /// Counterpart kept from the first pair.
    pub kept: String,
    /// Counterpart of the rejected pair.
    pub rejected: String,
}

#[derive(Debug, Clone, Default)]
pub struct VocabularyTable {
    name: String,
    /// Accepted pairs in authored order.
    pairs: Vec<(String, String)>,
    forward: BTreeMap<String, String>,
    reverse: BTreeMap<String, String>,
    /// Case-folded canonical -> canonical.
    forward_folded: BTreeMap<String, String>,
    /// Case-folded localized -> localized.
    reverse_folded: BTreeMap<String, String>,
    collisions: Vec<VocabularyCollision>,
}

impl VocabularyTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_pairs<I, C, L>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        let mut table = Self::new(name);
        for (canonical, localized) in pairs {
            table.add_pair(canonical, localized);
        }
        table
    }

    /// Add a pair. Terms are trimmed; blank terms are ignored.
    ///
    /// Returns false when the pair was rejected as a collision.
    pub fn add_pair(&mut self, canonical: impl Into<String>, localized: impl Into<String>) -> bool {
        let canonical = canonical.into().trim().to_string();
        let localized = localized.into().trim().to_string();
        if canonical.is_empty() || localized.is_empty() {
            return false;
        }

        if self.forward.get(&canonical) == Some(&localized) {
            return true;
        }
        if let Some(collision) = self.find_collision(&canonical, &localized) {
            self.collisions.push(collision);
            return false;
        }

        self.forward_folded.insert(fold(&canonical), canonical.clone());
        self.reverse_folded.insert(fold(&localized), localized.clone());
        self.forward.insert(canonical.clone(), localized.clone());
        self.reverse.insert(localized.clone(), canonical.clone());
        self.pairs.push((canonical, localized));
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Accepted `(canonical, localized)` pairs in authored order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(canonical, localized)| (canonical.as_str(), localized.as_str()))
    }

    /// Canonical -> localized.
    pub fn to_localized(&self, canonical: &str) -> Option<&str> {
        let key = self.canonical_key(canonical.trim())?;
        self.forward.get(key).map(String::as_str)
    }

    /// Localized -> canonical.
    pub fn to_canonical(&self, localized: &str) -> Option<&str> {
        let key = self.localized_key(localized.trim())?;
        self.reverse.get(key).map(String::as_str)
    }

    /// Translate a term to the other side of the table.
    ///
    /// Canonical terms map to their localized form and localized terms to
    /// their canonical form, so applying `translate` twice returns the
    /// original spelling for every pair of a bijective table.
    pub fn translate(&self, term: &str) -> Option<&str> {
        self.to_localized(term).or_else(|| self.to_canonical(term))
    }

    /// Resolve any spelling (canonical or localized) to its canonical term.
    pub fn canonicalize(&self, term: &str) -> Option<&str> {
        let trimmed = term.trim();
        if let Some(key) = self.canonical_key(trimmed) {
            return Some(key);
        }
        self.to_canonical(trimmed)
    }

    pub fn is_bijective(&self) -> bool {
        self.collisions.is_empty()
    }

    pub fn collisions(&self) -> &[VocabularyCollision] {
        &self.collisions
    }

    /// First existing pair the new pair conflicts with. Terms compare
    /// case-insensitively, within a side and across sides.
    fn find_collision(&self, canonical: &str, localized: &str) -> Option<VocabularyCollision> {
        let collision = |side, term: &str, kept: &str, rejected: &str| VocabularyCollision {
            side,
            term: term.to_string(),
            kept: kept.to_string(),
            rejected: rejected.to_string(),
        };
        let paired_localized = |term: &str| {
            self.canonical_key(term)
                .and_then(|key| self.forward.get(key))
                .map(String::as_str)
        };
        let paired_canonical = |term: &str| {
            self.localized_key(term)
                .and_then(|key| self.reverse.get(key))
                .map(String::as_str)
        };

        if canonical != localized && fold(canonical) == fold(localized) {
            return Some(collision(CollisionSide::Crossed, localized, canonical, localized));
        }
        if let Some(kept) = paired_localized(canonical) {
            return Some(collision(CollisionSide::Canonical, canonical, kept, localized));
        }
        if let Some(kept) = paired_canonical(localized) {
            return Some(collision(CollisionSide::Localized, localized, kept, canonical));
        }
        if let Some(kept) = paired_canonical(canonical) {
            return Some(collision(CollisionSide::Crossed, canonical, kept, localized));
        }
        if let Some(kept) = paired_localized(localized) {
            return Some(collision(CollisionSide::Crossed, localized, kept, canonical));
        }
        None
    }

    fn canonical_key(&self, term: &str) -> Option<&str> {
        if let Some((key, _)) = self.forward.get_key_value(term) {
            return Some(key);
        }
        self.forward_folded.get(&fold(term)).map(String::as_str)
    }

    fn localized_key(&self, term: &str) -> Option<&str> {
        if let Some((key, _)) = self.reverse.get_key_value(term) {
            return Some(key);
        }
        self.reverse_folded.get(&fold(term)).map(String::as_str)
    }
}

fn fold(term: &str) -> String {
    term.to_lowercase()
}

/// Named set of vocabulary tables, built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Vocabularies {
    tables: BTreeMap<String, VocabularyTable>,
}

impl Vocabularies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: VocabularyTable) -> Result<()> {
        if self.tables.contains_key(table.name()) {
            return Err(ModelError::DuplicateVocabulary {
                name: table.name().to_string(),
            });
        }
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&VocabularyTable> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn tables(&self) -> impl Iterator<Item = &VocabularyTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> VocabularyTable {
        VocabularyTable::from_pairs(
            "category",
            [("상의", "tops"), ("원피스", "dresses"), ("신발", "shoes")],
        )
    }

    #[test]
    fn translates_both_directions() {
        let table = categories();
        assert_eq!(table.translate("상의"), Some("tops"));
        assert_eq!(table.translate("tops"), Some("상의"));
        assert_eq!(table.translate("TOPS"), Some("상의"));
        assert_eq!(table.translate(" 원피스 "), Some("dresses"));
        assert_eq!(table.translate("hats"), None);
    }

    #[test]
    fn canonicalize_accepts_any_spelling() {
        let brands = VocabularyTable::from_pairs("brand", [("Nike", "나이키")]);
        assert_eq!(brands.canonicalize("NIKE"), Some("Nike"));
        assert_eq!(brands.canonicalize("나이키"), Some("Nike"));
        assert_eq!(brands.canonicalize("Nike"), Some("Nike"));
        assert_eq!(brands.canonicalize("Puma"), None);
    }

    #[test]
    fn collisions_are_recorded_not_applied() {
        let mut table = categories();
        assert!(table.is_bijective());
        assert!(!table.add_pair("블라우스", "tops"));
        assert!(!table.add_pair("상의", "shirts"));
        assert!(table.add_pair("상의", "tops"));
        assert!(!table.is_bijective());
        assert_eq!(table.collisions().len(), 2);
        assert_eq!(table.collisions()[0].side, CollisionSide::Localized);
        assert_eq!(table.collisions()[0].kept, "상의");
        assert_eq!(table.translate("tops"), Some("상의"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn term_on_both_sides_is_a_collision() {
        let mut table = VocabularyTable::from_pairs("category", [("tops", "상의")]);
        assert!(!table.add_pair("상의", "blouses"));
        assert!(!table.add_pair("shirts", "TOPS"));
        assert!(!table.is_bijective());
        let sides: Vec<_> = table.collisions().iter().map(|c| c.side).collect();
        assert_eq!(sides, [CollisionSide::Crossed, CollisionSide::Crossed]);
        assert_eq!(table.collisions()[0].kept, "tops");
        assert_eq!(table.translate("tops"), Some("상의"));
        assert_eq!(table.translate("상의"), Some("tops"));

        let mut brands = VocabularyTable::new("brand");
        assert!(brands.add_pair("MLB", "MLB"));
        assert!(!brands.add_pair("Nike", "NIKE"));
        assert_eq!(brands.translate("MLB"), Some("MLB"));
    }

    #[test]
    fn case_variants_within_a_side_are_collisions() {
        let table = VocabularyTable::from_pairs("category", [("tops", "상의"), ("Tops", "탑")]);
        assert!(!table.is_bijective());
        assert_eq!(table.collisions()[0].side, CollisionSide::Canonical);
        assert_eq!(table.collisions()[0].kept, "상의");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn duplicate_table_names_are_rejected() {
        let mut vocabularies = Vocabularies::new();
        vocabularies.insert(categories()).unwrap();
        let err = vocabularies.insert(categories()).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateVocabulary { .. }));
    }
}
