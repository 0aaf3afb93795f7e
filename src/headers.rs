//! Multi-valued response headers and their case-insensitive fold.
//!
//! A response stores headers exactly as the handler spelled them: `X-Test`
//! and `x-test` are two separate entries in [`Headers`]. Folding merges them
//! into a [`HeaderTable`] keyed by the lower-cased name, which is the form the
//! adapter writes to the wire.

use indexmap::IndexMap;

// ── Headers ───────────────────────────────────────────────────────────────────

/// Header entries as stored on a response: exact name → values, both in
/// insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Headers {
    entries: IndexMap<String, Vec<String>>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `values` under the exact `name`, after any values already
    /// stored under that spelling.
    pub(crate) fn append<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.entries
            .entry(name.to_owned())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// Values stored under the exact `name`. Case-sensitive; use
    /// [`HeaderTable::get`] for HTTP semantics.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct stored names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges all entries into a case-insensitive [`HeaderTable`].
    pub fn fold(&self) -> HeaderTable {
        HeaderTable::fold_entries(self.iter())
    }
}

// ── HeaderTable ───────────────────────────────────────────────────────────────

/// The folded view of [`Headers`]: lower-cased name → every value contributed
/// under any casing of that name.
///
/// Names keep the order in which their first spelling appeared; values keep
/// the order in which they were added. Duplicate values are kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HeaderTable {
    entries: IndexMap<String, Vec<String>>,
}

impl HeaderTable {
    fn fold_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut folded: IndexMap<String, Vec<String>> = IndexMap::new();
        for (name, values) in entries {
            folded
                .entry(name.to_ascii_lowercase())
                .or_default()
                .extend(values.iter().cloned());
        }
        Self { entries: folded }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .get(name.to_ascii_lowercase().as_str())
            .map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Folds the table again. Already folded, so the result equals `self`.
    pub fn fold(&self) -> HeaderTable {
        Self::fold_entries(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(entries: &[(&str, &[&str])]) -> Headers {
        let mut h = Headers::new();
        for (name, values) in entries {
            h.append(name, values.iter().copied());
        }
        h
    }

    fn ordered(table: &HeaderTable) -> Vec<(String, Vec<String>)> {
        table.iter().map(|(k, v)| (k.to_owned(), v.to_vec())).collect()
    }

    #[test]
    fn stored_names_are_exact() {
        let h = headers(&[("X-Test", &["a"]), ("x-test", &["b"])]);
        assert_eq!(h.len(), 2);
        assert_eq!(h.get("X-Test"), Some(&["a".to_owned()][..]));
        assert_eq!(h.get("X-TEST"), None);
    }

    #[test]
    fn fold_merges_casings_in_order() {
        let h = headers(&[
            ("X-Test", &["a"]),
            ("Accept", &["*/*"]),
            ("x-test", &["b", "c"]),
            ("X-TEST", &["d"]),
        ]);
        let table = h.fold();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("x-test").unwrap(), ["a", "b", "c", "d"]);
        assert_eq!(table.get("ACCEPT").unwrap(), ["*/*"]);
        let names: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["x-test", "accept"]);
    }

    #[test]
    fn fold_keeps_duplicate_values() {
        let h = headers(&[("Vary", &["origin"]), ("vary", &["origin"])]);
        assert_eq!(h.fold().get("vary").unwrap(), ["origin", "origin"]);
    }

    #[test]
    fn fold_is_idempotent() {
        let h = headers(&[("B", &["1"]), ("a", &["2"]), ("b", &["3"]), ("A", &["4"])]);
        let once = h.fold();
        let twice = once.fold();
        assert_eq!(ordered(&once), ordered(&twice));
    }

    #[test]
    fn empty_fold() {
        let table = Headers::new().fold();
        assert!(table.is_empty());
        assert!(!table.contains("content-type"));
    }
}
