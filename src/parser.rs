use log::trace;

use crate::error::{ParseError, Result};
use crate::table::{PropertyTable, check_name};

/// Represents an on-going parse.
///
/// Lines are sliced out of `text` without copying; every key, value and section name handed
/// to the table borrows from it.
#[derive(Debug, Clone)]
pub(crate) struct Parser<'a> {
    text: &'a str,
    position: usize,
    line: usize,
    section: Option<&'a str>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            line: 0,
            section: None,
        }
    }

    /// Feed every line to `table`, stopping at the first failure. Returns the number of
    /// physical lines read.
    pub fn parse_into(mut self, table: &mut PropertyTable<'a>) -> Result<usize> {
        while let Some(raw) = self.next_line() {
            self.parse_line(raw, table)?;
        }

        Ok(self.line)
    }

    /// Split on CR, LF or CRLF. A CRLF pair ends a single line.
    fn next_line(&mut self) -> Option<&'a str> {
        let rest = self.text.get(self.position..).filter(|rest| !rest.is_empty())?;
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());

        let terminator = if rest[end..].starts_with("\r\n") {
            2
        } else {
            usize::from(end < rest.len())
        };

        self.position += end + terminator;
        self.line += 1;

        Some(&rest[..end])
    }

    fn parse_line(&mut self, raw: &'a str, table: &mut PropertyTable<'a>) -> Result<()> {
        let line = trim(raw);

        if line.is_empty() || line.starts_with([';', '#']) {
            return Ok(());
        }

        if line.starts_with('[') && line.ends_with(']') {
            let name = parse_section_name(line).ok_or_else(|| ParseError::MalformedSection {
                line: self.line,
                text: line.to_owned(),
            })?;
            check_name(name, table.limits())
                .map_err(|source| ParseError::from_table(source, self.line))?;

            trace!("line {}: entering section {name:?}", self.line);
            self.section = Some(name);

            return Ok(());
        }

        let Some(section) = self.section else {
            return Err(ParseError::PropertyBeforeSection {
                line: self.line,
                text: line.to_owned(),
            });
        };

        let (key, value) = parse_property(line).ok_or_else(|| ParseError::MalformedProperty {
            line: self.line,
            text: line.to_owned(),
        })?;

        table
            .append(section, key, value)
            .map_err(|source| ParseError::from_table(source, self.line))
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn trim(s: &str) -> &str {
    s.trim_matches(is_blank)
}

/// Everything between the opening bracket and the first `]`, taken as-is.
fn parse_section_name(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?;
    let end = inner.find(']')?;

    Some(&inner[..end]).filter(|name| !name.is_empty())
}

/// Split an already trimmed line into key and value.
///
/// The value is, in order of preference: the text between a pair of double quotes, the text
/// between a pair of single quotes, or the rest of the line up to an inline comment. A line
/// without `=` is a key with an empty value. Only a line with nothing before the `=` fails.
fn parse_property(line: &str) -> Option<(&str, &str)> {
    let Some(equal) = line.find('=') else {
        return Some((line, ""));
    };

    if equal == 0 {
        return None;
    }

    let key = line[..equal].trim_end_matches(is_blank);
    let rest = line[equal + 1..].trim_start_matches(is_blank);
    let value = quoted(rest, '"')
        .or_else(|| quoted(rest, '\''))
        .unwrap_or_else(|| unquoted(rest));

    Some((key, value))
}

/// Quoted text stops at the first matching quote; there is no escape sequence. Anything after
/// the closing quote is ignored.
fn quoted(rest: &str, quote: char) -> Option<&str> {
    let inner = rest.strip_prefix(quote)?;
    let end = inner.find(quote)?;

    Some(&inner[..end])
}

fn unquoted(rest: &str) -> &str {
    let end = rest.find([';', '#']).unwrap_or(rest.len());

    rest[..end].trim_end_matches(is_blank)
}
