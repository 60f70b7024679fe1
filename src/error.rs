use thiserror::Error;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Reasons a [`PropertyTable`](crate::PropertyTable) refuses a new property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("section names and keys cannot be empty")]
    EmptyName,
    #[error("name {name:?} is {len} bytes long, the limit is {max} (exclusive)")]
    KeyTooLong { name: String, len: usize, max: usize },
    #[error(
        "section {section:?} key {key:?} value {value:?} is {len} bytes long, the limit is {max} (exclusive)"
    )]
    ValueTooLong {
        section: String,
        key: String,
        value: String,
        len: usize,
        max: usize,
    },
    #[error("property table is full ({max} properties)")]
    TableFull { max: usize },
}

/// The first failure of a parse. Parsing stops at the offending line.
///
/// `line` is the 1-based physical line number in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: malformed section header: {text}")]
    MalformedSection { line: usize, text: String },
    #[error("line {line}: property appears before any section header: {text}")]
    PropertyBeforeSection { line: usize, text: String },
    #[error("line {line}: malformed property: {text}")]
    MalformedProperty { line: usize, text: String },
    #[error("line {line}: section names and keys cannot be empty")]
    EmptyName { line: usize },
    #[error("line {line}: name {name:?} is {len} bytes long, the limit is {max} (exclusive)")]
    KeyTooLong {
        line: usize,
        name: String,
        len: usize,
        max: usize,
    },
    #[error(
        "line {line}: section {section:?} key {key:?} value {value:?} is {len} bytes long, the limit is {max} (exclusive)"
    )]
    ValueTooLong {
        line: usize,
        section: String,
        key: String,
        value: String,
        len: usize,
        max: usize,
    },
    #[error("line {line}: property table is full ({max} properties)")]
    TableFull { line: usize, max: usize },
}

impl ParseError {
    /// Physical line (1-based) the parse stopped on.
    #[must_use]
    pub fn line(&self) -> usize {
        match *self {
            Self::MalformedSection { line, .. }
            | Self::PropertyBeforeSection { line, .. }
            | Self::MalformedProperty { line, .. }
            | Self::EmptyName { line }
            | Self::KeyTooLong { line, .. }
            | Self::ValueTooLong { line, .. }
            | Self::TableFull { line, .. } => line,
        }
    }

    pub(crate) fn from_table(source: TableError, line: usize) -> Self {
        match source {
            TableError::EmptyName => Self::EmptyName { line },
            TableError::KeyTooLong { name, len, max } => Self::KeyTooLong {
                line,
                name,
                len,
                max,
            },
            TableError::ValueTooLong {
                section,
                key,
                value,
                len,
                max,
            } => Self::ValueTooLong {
                line,
                section,
                key,
                value,
                len,
                max,
            },
            TableError::TableFull { max } => Self::TableFull { line, max },
        }
    }
}
