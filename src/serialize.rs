use std::fmt;

use crate::table::PropertyTable;

/// How values are written back out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Wrap values that would read back differently (inline comment markers, outer blanks,
    /// a leading quote, or a closing `]` that turns a `[key=value]` line into a section
    /// header) in quotes. Off by default, in which case such values do not survive a round
    /// trip.
    ///
    /// Double quotes are used unless the value contains one, then single quotes. A value
    /// holding both kinds has no quoted form and is still written bare.
    pub quote_values: bool,
}

impl SerializeOptions {
    #[must_use]
    pub const fn quoted() -> Self {
        Self { quote_values: true }
    }
}

impl PropertyTable<'_> {
    /// Write the table as INI text, one newline-terminated line per call to `sink`.
    ///
    /// Each section is written once, where it first appears, followed by all of its
    /// properties as `key=value`.
    pub fn serialize<F>(&self, sink: F)
    where
        F: FnMut(&str),
    {
        self.serialize_with(SerializeOptions::default(), sink);
    }

    pub fn serialize_with<F>(&self, options: SerializeOptions, mut sink: F)
    where
        F: FnMut(&str),
    {
        let mut line = String::new();

        for section in self.sections() {
            line.clear();
            line.push('[');
            line.push_str(section);
            line.push_str("]\n");
            sink(&line);

            for (key, value) in self.properties(section) {
                line.clear();
                line.push_str(key);
                line.push('=');
                push_value(&mut line, key, value, options);
                line.push('\n');
                sink(&line);
            }
        }
    }

    /// # Errors
    ///
    /// Fails only when `writer` does.
    pub fn write_to<W>(&self, options: SerializeOptions, writer: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let mut result = Ok(());

        self.serialize_with(options, |line| {
            if result.is_ok() {
                result = writer.write_str(line);
            }
        });

        result
    }
}

impl fmt::Display for PropertyTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(SerializeOptions::default(), f)
    }
}

fn push_value(line: &mut String, key: &str, value: &str, options: SerializeOptions) {
    let quote = if options.quote_values && needs_quotes(key, value) {
        ['"', '\''].into_iter().find(|&q| !value.contains(q))
    } else {
        None
    };

    match quote {
        Some(q) => {
            line.push(q);
            line.push_str(value);
            line.push(q);
        }
        None => line.push_str(value),
    }
}

fn needs_quotes(key: &str, value: &str) -> bool {
    let blank = |c: char| c == ' ' || c == '\t';

    value.contains([';', '#'])
        || value.starts_with(blank)
        || value.ends_with(blank)
        || value.starts_with(['"', '\''])
        || (key.starts_with('[') && value.ends_with(']'))
}
