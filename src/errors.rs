use thiserror::Error;

/// Errors reported by [`parse`](crate::parse).
///
/// Positions are char offsets into the parsed input, the same unit used
/// by token ranges. Only the structural variants are raised today; the
/// variants marked "reserved" are tolerated by the permissive scanners
/// instead of being reported, and exist so a stricter mode can surface
/// them without breaking the error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is empty or contains only whitespace.
    #[error("input contains no text to parse")]
    EmptyInput,
    /// Reserved: `parse` returns an empty list instead of raising this.
    #[error("no entries found in input")]
    NoEntriesFound,
    /// `@` was not followed by an alphabetic type name.
    #[error("invalid or empty entry type at offset {0}")]
    InvalidEntryType(usize),
    /// An entry other than `@preamble`/`@string` has no citation key.
    #[error("missing citation key for @{entry_type} entry at offset {position}")]
    MissingCitationKey {
        entry_type: String,
        position: usize,
    },
    /// The entry type was not followed by `{` or `(`.
    #[error("expected '{{' or '(' after entry type at offset {0}")]
    MissingOpeningBrace(usize),
    /// Reserved: balanced scans run to the end of input instead.
    #[error("unmatched braces at offset {0}")]
    UnmatchedBraces(usize),
    /// Reserved: malformed value fragments are dropped, not reported.
    #[error("invalid value for field '{field}' at offset {position}")]
    InvalidFieldValue { field: String, position: usize },
    /// Reserved: stray characters between entries are skipped.
    #[error("unexpected character '{character}' at offset {position}")]
    UnexpectedCharacter { character: char, position: usize },
}
