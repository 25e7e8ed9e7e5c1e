//! Codec Options
//!
//! Plain value structs; the codec keeps no global configuration.

/// Default nesting limit for both directions
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for [`decode_with`](crate::decoding::decode_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest container nesting accepted. The top-level term is depth 0.
    pub max_depth: usize,
    /// Accept bytes after the first complete term instead of failing
    pub allow_trailing: bool,
    /// Decode STRING_EXT holding valid UTF-8 as `Term::Text`. Other STRING_EXT
    /// payloads still decode as lists of integers.
    pub strings_as_text: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing: false,
            strings_as_text: false,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_allow_trailing(mut self, allow_trailing: bool) -> Self {
        self.allow_trailing = allow_trailing;
        self
    }

    pub fn with_strings_as_text(mut self, strings_as_text: bool) -> Self {
        self.strings_as_text = strings_as_text;
        self
    }
}

/// Wire form for `Term::Text`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 bytes in a BINARY_EXT
    #[default]
    Binary,
    /// UTF-8 bytes as a byte list: NIL_EXT when empty, STRING_EXT up to 65535 bytes,
    /// a LIST_EXT of small integers beyond
    ByteList,
    /// A LIST_EXT with one integer per Unicode scalar value
    CodePoints,
}

/// Options for [`encode_with`](crate::encoding::encode_with)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Deepest container nesting accepted. The top-level term is depth 0.
    pub max_depth: usize,
    pub text_encoding: TextEncoding,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            text_encoding: TextEncoding::default(),
        }
    }
}

impl EncodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_text_encoding(mut self, text_encoding: TextEncoding) -> Self {
        self.text_encoding = text_encoding;
        self
    }
}
