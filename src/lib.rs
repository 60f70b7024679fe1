#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
//! Small INI parser backed by a flat, capacity-bounded property table.
//!
//! ```text
//! ; comment
//! [server]
//! host = "example.org"   ; quoted with " or '
//! port = 8080            # inline comments only after unquoted values
//! alias = one
//! alias = two            ; repeated keys are kept in order
//! verbose                ; a key without a value has an empty value
//! ```
//!
//! The table borrows every section, key and value from the parsed text, so the text must
//! outlive it.
//!
//! ```
//! let table = flatini::parse("[server]\nalias = one\nalias = two\n")?;
//!
//! assert_eq!(table.value("server", "alias"), Some("one"));
//! assert_eq!(table.values("server", "alias").collect::<Vec<_>>(), ["one", "two"]);
//! assert_eq!(table.to_string(), "[server]\nalias=one\nalias=two\n");
//! # Ok::<(), flatini::ParseError>(())
//! ```

mod error;
mod limits;
mod parser;
mod query;
mod serialize;
mod table;

pub use error::{ParseError, Result, TableError};
pub use limits::Limits;
pub use serialize::SerializeOptions;
pub use table::{MAX_ERROR_LEN, Property, PropertyTable};

/// Parse `text` with the default [`Limits`].
///
/// # Errors
///
/// See [`PropertyTable::load`].
pub fn parse(text: &str) -> Result<PropertyTable<'_>> {
    parse_with_limits(text, Limits::default())
}

/// # Errors
///
/// See [`PropertyTable::load`].
pub fn parse_with_limits(text: &str, limits: Limits) -> Result<PropertyTable<'_>> {
    let mut table = PropertyTable::with_limits(limits);
    table.load(text)?;

    Ok(table)
}
