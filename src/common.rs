/// Limits to enforce while splitting a compact token
///
/// The default imposes no limit. Applications accepting tokens from
/// untrusted sources should bound at least `max_token_length`.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// Reject tokens longer than this many bytes, before any other check
    pub max_token_length: Option<usize>,

    /// Reject tokens whose encoded header segment is longer than this many bytes
    pub max_header_length: Option<usize>,
}

impl ParseOptions {
    /// Bound the total token length.
    pub fn with_max_token_length(mut self, max_token_length: usize) -> Self {
        self.max_token_length = Some(max_token_length);
        self
    }

    /// Bound the length of the encoded header.
    pub fn with_max_header_length(mut self, max_header_length: usize) -> Self {
        self.max_header_length = Some(max_header_length);
        self
    }
}
