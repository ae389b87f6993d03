//! Incremental tokenizer for version format strings.
//!
//! The tokenizer is an iterator so the same scan can drive a growable
//! buffer or a fixed-capacity one; the writer pulls one token at a time
//! and stops whenever its destination is full.

use thiserror::Error;

/// Errors in the format string itself.
///
/// There is no non-throwing formatting fallback: a broken format string
/// is always reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `'…'` or `"…"` literal with no closing quote.
    #[error("unterminated literal in format string at byte {0}")]
    UnterminatedLiteral(usize),
    /// A `\` or `%` with nothing after it.
    #[error("dangling escape at end of format string")]
    DanglingEscape,
}

/// The specifier alphabet. Runs of any other character are literal text.
const SPECIFIERS: &[char] = &['F', 'G', 'M', 'P', 'S', 'V', 'd', 'p', 'v', 'y'];

pub(crate) fn is_specifier(c: char) -> bool {
    SPECIFIERS.contains(&c)
}

/// One token of a version format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text, written through unchanged.
    Literal(&'a str),
    /// A single backslash-escaped character.
    Escaped(char),
    /// A maximal run of one specifier letter, with the optional digit
    /// argument that follows it (meaningful for `P`/`p` padding).
    Specifier {
        letter: char,
        count: usize,
        width: Option<usize>,
    },
}

/// Zero-padding widths larger than this are clamped; a format string is
/// never allowed to demand unbounded output for one number.
pub(crate) const MAX_PAD_WIDTH: usize = 99;

/// Streaming tokenizer over a format string.
pub struct Tokenizer<'a> {
    rest: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(format: &'a str) -> Self {
        Self {
            rest: format,
            pos: 0,
            failed: false,
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
        self.rest = &self.rest[bytes..];
    }

    fn fail(&mut self, error: FormatError) -> Option<Result<Token<'a>, FormatError>> {
        self.failed = true;
        Some(Err(error))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        let mut chars = self.rest.chars();
        let first = chars.next()?;
        match first {
            quote @ ('\'' | '"') => {
                let body = &self.rest[1..];
                match body.find(quote) {
                    Some(end) => {
                        let literal = &body[..end];
                        self.advance(1 + end + 1);
                        Some(Ok(Token::Literal(literal)))
                    }
                    None => self.fail(FormatError::UnterminatedLiteral(self.pos)),
                }
            }
            '\\' => match chars.next() {
                Some(c) => {
                    self.advance(1 + c.len_utf8());
                    Some(Ok(Token::Escaped(c)))
                }
                None => self.fail(FormatError::DanglingEscape),
            },
            // %X is a single-character specifier, shielding X from
            // repetition expansion.
            '%' => match chars.next() {
                Some(letter) => {
                    self.advance(1 + letter.len_utf8());
                    Some(Ok(Token::Specifier {
                        letter,
                        count: 1,
                        width: None,
                    }))
                }
                None => self.fail(FormatError::DanglingEscape),
            },
            letter if is_specifier(letter) => {
                // Specifier letters are ASCII, so chars == bytes here.
                let run = self.rest.bytes().take_while(|&b| b == letter as u8).count();
                let digits = self.rest[run..]
                    .bytes()
                    .take_while(u8::is_ascii_digit)
                    .count();
                let width = (digits > 0).then(|| {
                    self.rest[run..run + digits]
                        .parse()
                        .map_or(MAX_PAD_WIDTH, |w: usize| w.min(MAX_PAD_WIDTH))
                });
                self.advance(run + digits);
                Some(Ok(Token::Specifier {
                    letter,
                    count: run,
                    width,
                }))
            }
            _ => {
                let end = self
                    .rest
                    .find(|c: char| matches!(c, '\'' | '"' | '\\' | '%') || is_specifier(c))
                    .unwrap_or(self.rest.len());
                let literal = &self.rest[..end];
                self.advance(end);
                Some(Ok(Token::Literal(literal)))
            }
        }
    }
}
