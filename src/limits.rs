/// Capacity bounds of a [`PropertyTable`](crate::PropertyTable).
///
/// All bounds are hard. The length bounds are exclusive: with `max_value_len = 256` the
/// longest accepted value is 255 bytes. `max_properties` is the exact number of properties
/// a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_properties: usize,
    /// Applies to keys and section names.
    pub max_key_len: usize,
    pub max_value_len: usize,
}

impl Limits {
    pub const DEFAULT_MAX_PROPERTIES: usize = 512;
    pub const DEFAULT_MAX_KEY_LEN: usize = 256;
    pub const DEFAULT_MAX_VALUE_LEN: usize = 256;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_properties: Self::DEFAULT_MAX_PROPERTIES,
            max_key_len: Self::DEFAULT_MAX_KEY_LEN,
            max_value_len: Self::DEFAULT_MAX_VALUE_LEN,
        }
    }

    #[must_use]
    pub const fn with_max_properties(mut self, max_properties: usize) -> Self {
        self.max_properties = max_properties;
        self
    }

    #[must_use]
    pub const fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    #[must_use]
    pub const fn with_max_value_len(mut self, max_value_len: usize) -> Self {
        self.max_value_len = max_value_len;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}
