// Query Processing
//
// *La Question* (The Question) - Turn raw query text into lowercase tokens

use lestockage::truncate_to_boundary;

/// Longest query text considered, in bytes
pub const MAX_QUERY_LENGTH: usize = 256;

/// Tokens beyond this count are ignored
pub const MAX_QUERY_TOKENS: usize = 16;

/// Tokenized query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Original query text, untouched
    pub original: String,

    /// Lowercased tokens, at most [`MAX_QUERY_TOKENS`]
    pub tokens: Vec<String>,
}

impl ParsedQuery {
    /// Number of tokens kept
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Whether more than one token was kept
    pub fn is_multi_term(&self) -> bool {
        self.tokens.len() > 1
    }
}

/// Parse a query into tokens.
///
/// The text is capped at [`MAX_QUERY_LENGTH`] bytes, ASCII-lowercased and
/// split on spaces; runs of spaces produce no empty tokens. Only space is a
/// separator, so a tab stays inside its token.
pub fn parse_query(query: &str) -> Result<ParsedQuery, Error> {
    let capped = truncate_to_boundary(query.to_string(), MAX_QUERY_LENGTH);
    let lowered = capped.to_ascii_lowercase();

    let tokens: Vec<String> = lowered
        .split(' ')
        .filter(|t| !t.is_empty())
        .take(MAX_QUERY_TOKENS)
        .map(str::to_string)
        .collect();

    if tokens.is_empty() {
        return Err(Error::EmptyQuery);
    }

    Ok(ParsedQuery {
        original: query.to_string(),
        tokens,
    })
}

/// Query errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Query contained no tokens
    #[error("Empty query")]
    EmptyQuery,
}
