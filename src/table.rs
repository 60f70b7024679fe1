use log::debug;

use crate::error::{ParseError, Result, TableError};
use crate::limits::Limits;
use crate::parser::Parser;

/// Longest message kept by [`PropertyTable::last_error`], in bytes.
pub const MAX_ERROR_LEN: usize = 255;

/// A single `key = value` line, tagged with the section it was found in.
///
/// All three parts borrow from the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property<'a> {
    section: &'a str,
    key: &'a str,
    value: &'a str,
}

impl<'a> Property<'a> {
    #[must_use]
    pub(crate) fn new(section: &'a str, key: &'a str, value: &'a str) -> Self {
        Self {
            section,
            key,
            value,
        }
    }

    #[must_use]
    pub fn section(&self) -> &'a str {
        self.section
    }

    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// May be empty; a key written without a value still counts as present.
    #[must_use]
    pub fn value(&self) -> &'a str {
        self.value
    }
}

/// Ordered, capacity-bounded list of properties.
///
/// Insertion order is the only order. Repeated `(section, key)` pairs are kept as separate
/// entries and make up a multi-valued property. A section exists only through its
/// properties, so a header followed by nothing leaves no trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable<'a> {
    pub(crate) properties: Vec<Property<'a>>,
    limits: Limits,
    last_error: Option<String>,
}

impl<'a> PropertyTable<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            properties: Vec::new(),
            limits,
            last_error: None,
        }
    }

    #[must_use]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Every property in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Property<'a>> {
        self.properties.iter()
    }

    /// Message of the most recent failed [`load`](Self::load), cut to [`MAX_ERROR_LEN`] bytes.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear(&mut self) {
        self.properties.clear();
    }

    /// Replace the contents of the table with the properties found in `text`.
    ///
    /// The table is emptied first and stays empty when parsing fails; a partially parsed
    /// document is never observable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered. Its message is also kept for
    /// [`last_error`](Self::last_error).
    pub fn load(&mut self, text: &'a str) -> Result<()> {
        self.clear();
        self.last_error = None;

        match Parser::new(text).parse_into(self) {
            Ok(lines) => {
                debug!("parsed {} properties from {lines} lines", self.len());
                Ok(())
            }
            Err(error) => {
                debug!("parse aborted: {error}");
                self.clear();
                self.last_error = Some(truncate_message(error.to_string()));
                Err(error)
            }
        }
    }

    /// Add a property at the end of the table. Existing `(section, key)` pairs are not
    /// replaced; the new value is appended after them.
    ///
    /// # Errors
    ///
    /// Fails when the section name or key is empty or reaches `max_key_len`, the value reaches
    /// `max_value_len`, or the table already holds `max_properties` entries.
    pub fn append(
        &mut self,
        section: &'a str,
        key: &'a str,
        value: &'a str,
    ) -> Result<(), TableError> {
        check_name(section, self.limits)?;
        check_name(key, self.limits)?;

        if value.len() >= self.limits.max_value_len {
            return Err(TableError::ValueTooLong {
                section: section.to_owned(),
                key: key.to_owned(),
                value: value.to_owned(),
                len: value.len(),
                max: self.limits.max_value_len,
            });
        }

        if self.properties.len() >= self.limits.max_properties {
            return Err(TableError::TableFull {
                max: self.limits.max_properties,
            });
        }

        self.properties.push(Property::new(section, key, value));

        Ok(())
    }
}

impl<'a, 't> IntoIterator for &'t PropertyTable<'a> {
    type Item = &'t Property<'a>;
    type IntoIter = std::slice::Iter<'t, Property<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub(crate) fn check_name(name: &str, limits: Limits) -> Result<(), TableError> {
    if name.is_empty() {
        return Err(TableError::EmptyName);
    }

    if name.len() >= limits.max_key_len {
        return Err(TableError::KeyTooLong {
            name: name.to_owned(),
            len: name.len(),
            max: limits.max_key_len,
        });
    }

    Ok(())
}

fn truncate_message(mut message: String) -> String {
    if message.len() > MAX_ERROR_LEN {
        let mut end = MAX_ERROR_LEN;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_order_and_duplicates() {
        let mut table = PropertyTable::new();
        table.append("a", "k", "1").expect("room for three");
        table.append("b", "k", "2").expect("room for three");
        table.append("a", "k", "3").expect("room for three");

        let values = table.iter().map(Property::value).collect::<Vec<_>>();
        assert_eq!(values, ["1", "2", "3"]);
    }

    #[test]
    fn value_length_limit_is_exclusive() {
        let mut table = PropertyTable::with_limits(Limits::new().with_max_value_len(4));

        assert_eq!(table.append("s", "k", "abc"), Ok(()));
        assert_eq!(
            table.append("s", "k", "abcd"),
            Err(TableError::ValueTooLong {
                section: "s".to_owned(),
                key: "k".to_owned(),
                value: "abcd".to_owned(),
                len: 4,
                max: 4,
            })
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn key_and_section_length_limit() {
        let mut table = PropertyTable::with_limits(Limits::new().with_max_key_len(3));

        assert_eq!(table.append("ab", "cd", ""), Ok(()));
        assert!(matches!(
            table.append("abc", "k", ""),
            Err(TableError::KeyTooLong { len: 3, max: 3, .. })
        ));
        assert!(matches!(
            table.append("s", "abc", ""),
            Err(TableError::KeyTooLong { len: 3, max: 3, .. })
        ));
    }

    #[test]
    fn empty_section_or_key_is_refused() {
        let mut table = PropertyTable::new();

        assert_eq!(table.append("", "k", "v"), Err(TableError::EmptyName));
        assert_eq!(table.append("s", "", "v"), Err(TableError::EmptyName));
        assert_eq!(table.append("", "", "v"), Err(TableError::EmptyName));
        assert!(table.is_empty());
        assert!(!table.has_section(""));
        assert_eq!(table.to_string(), "");

        assert_eq!(table.append("s", "k", ""), Ok(()));
        assert_eq!(table.to_string(), "[s]\nk=\n");
    }

    #[test]
    fn table_full_on_boundary() {
        let mut table = PropertyTable::with_limits(Limits::new().with_max_properties(2));

        assert_eq!(table.append("s", "a", "1"), Ok(()));
        assert_eq!(table.append("s", "b", "2"), Ok(()));
        assert_eq!(
            table.append("s", "c", "3"),
            Err(TableError::TableFull { max: 2 })
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn failed_load_resets_and_keeps_message() {
        let mut table = PropertyTable::new();
        table.load("[a]\nx = 1\n").expect("valid document");
        assert_eq!(table.len(), 1);

        let error = table
            .load("[a]\nx = 1\n= 2\n")
            .expect_err("line starting with '=' has no key");

        assert!(table.is_empty());
        assert_eq!(table.last_error(), Some(error.to_string().as_str()));

        table.load("[b]\ny = 2\n").expect("valid document");
        assert_eq!(table.last_error(), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn long_error_message_is_truncated() {
        let text = format!("[s]\nk = {}\n", "é".repeat(300));
        let mut table = PropertyTable::new();

        assert!(table.load(&text).is_err());

        let message = table.last_error().expect("message retained");
        assert!(message.len() <= MAX_ERROR_LEN);
        assert!(message.starts_with("line 2: section \"s\" key \"k\""));
    }
}
