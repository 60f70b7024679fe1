//! Lookups over a [`PropertyTable`].
//!
//! Every query is a linear scan in insertion order. Names are compared byte for byte, so
//! `[Section]` and `[section]` are different sections. Nothing here fails: absence is `false`,
//! `0` or `None`.

use crate::table::{Property, PropertyTable};

impl<'a> PropertyTable<'a> {
    /// `true` if at least one property belongs to `section`.
    #[must_use]
    pub fn has_section(&self, section: &str) -> bool {
        self.iter().any(|property| property.section() == section)
    }

    #[must_use]
    pub fn has_property(&self, section: &str, key: &str) -> bool {
        self.matching(section, key).next().is_some()
    }

    /// First value stored for `key` in `section`. Later values of a multi-valued property are
    /// reachable through [`values`](Self::values) and [`nth_value`](Self::nth_value).
    #[must_use]
    pub fn value(&self, section: &str, key: &str) -> Option<&'a str> {
        self.values(section, key).next()
    }

    /// `true` if any value of `key` in `section` equals `expected`. A missing property and a
    /// differing value both give `false`.
    #[must_use]
    pub fn value_equals(&self, section: &str, key: &str, expected: &str) -> bool {
        self.values(section, key).any(|value| value == expected)
    }

    #[must_use]
    pub fn count_values(&self, section: &str, key: &str) -> usize {
        self.matching(section, key).count()
    }

    /// The `index`-th (0-based) value of `key` in `section`.
    #[must_use]
    pub fn nth_value(&self, section: &str, key: &str, index: usize) -> Option<&'a str> {
        self.values(section, key).nth(index)
    }

    /// Every value of `key` in `section`, in insertion order.
    pub fn values<'t>(
        &'t self,
        section: &'t str,
        key: &'t str,
    ) -> impl Iterator<Item = &'a str> + 't {
        self.matching(section, key).map(Property::value)
    }

    #[must_use]
    pub fn count_properties(&self, section: &str) -> usize {
        self.properties(section).count()
    }

    /// The `index`-th (0-based) `(key, value)` pair of `section`.
    #[must_use]
    pub fn nth_property(&self, section: &str, index: usize) -> Option<(&'a str, &'a str)> {
        self.properties(section).nth(index)
    }

    /// Every `(key, value)` pair of `section`, in insertion order.
    pub fn properties<'t>(
        &'t self,
        section: &'t str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 't {
        self.iter()
            .filter(move |property| property.section() == section)
            .map(|property| (property.key(), property.value()))
    }

    /// Distinct section names in order of first appearance.
    pub fn sections(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.properties
            .iter()
            .enumerate()
            .filter(move |&(i, property)| {
                !self.properties[..i]
                    .iter()
                    .any(|earlier| earlier.section() == property.section())
            })
            .map(|(_, property)| property.section())
    }

    fn matching<'t>(
        &'t self,
        section: &'t str,
        key: &'t str,
    ) -> impl Iterator<Item = &'t Property<'a>> + 't {
        self.iter()
            .filter(move |property| property.section() == section && property.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    const DOCUMENT: &str = "\
[a]
x = 1
y=2
[b]
x = 3
[a]
x = 4
";

    #[test]
    fn sections_exist_through_properties() {
        let table = parse("[empty]\n[a]\nk = v\n[trailing]\n").expect("valid document");

        assert!(table.has_section("a"));
        assert!(!table.has_section("empty"));
        assert!(!table.has_section("trailing"));
        assert!(!table.has_section("A"));
        assert_eq!(table.count_properties("empty"), 0);
    }

    #[test]
    fn first_value_wins() {
        let table = parse(DOCUMENT).expect("valid document");

        assert_eq!(table.value("a", "x"), Some("1"));
        assert_eq!(table.value("b", "x"), Some("3"));
        assert_eq!(table.value("b", "y"), None);
        assert!(table.has_property("a", "y"));
        assert!(!table.has_property("b", "y"));
    }

    #[test]
    fn multi_valued_property() {
        let table = parse(DOCUMENT).expect("valid document");

        assert_eq!(table.count_values("a", "x"), 2);
        assert_eq!(table.values("a", "x").collect::<Vec<_>>(), ["1", "4"]);
        assert_eq!(table.nth_value("a", "x", 0), table.value("a", "x"));
        assert_eq!(table.nth_value("a", "x", 1), Some("4"));
        assert_eq!(table.nth_value("a", "x", 2), None);
        assert_eq!(table.count_values("c", "x"), 0);
    }

    #[test]
    fn value_equality() {
        let table = parse(DOCUMENT).expect("valid document");

        assert!(table.value_equals("a", "x", "1"));
        assert!(table.value_equals("a", "x", "4"));
        assert!(!table.value_equals("a", "x", "3"));
        assert!(!table.value_equals("a", "missing", ""));
    }

    #[test]
    fn enumerate_section() {
        let table = parse(DOCUMENT).expect("valid document");

        assert_eq!(table.count_properties("a"), 3);
        assert_eq!(
            table.properties("a").collect::<Vec<_>>(),
            [("x", "1"), ("y", "2"), ("x", "4")]
        );
        assert_eq!(table.nth_property("a", 1), Some(("y", "2")));
        assert_eq!(table.nth_property("a", 3), None);
        assert_eq!(table.nth_property("c", 0), None);
    }

    #[test]
    fn sections_in_first_appearance_order() {
        let table = parse(DOCUMENT).expect("valid document");

        assert_eq!(table.sections().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn has_section_matches_count() {
        let table = parse(DOCUMENT).expect("valid document");

        for section in ["a", "b", "c", ""] {
            assert_eq!(
                table.has_section(section),
                table.count_properties(section) > 0
            );
        }
    }
}
