//! The tokenizer turns raw bib source text into a flat sequence of
//! typed, positioned tokens, meant for syntax-highlighting consumers.
//!
//! Given this entry:
//!
//! ```tex
//! @book{works:4,
//!   author = {Shakespeare, William},
//! }
//! ```
//!
//! [`tokenize`] emits EntryType(`@book`), Punctuation(`{`),
//! CitationKey(`works:4`), Punctuation(`,`), Whitespace,
//! FieldName(`author`), Whitespace, Operator(`=`), Whitespace,
//! StringValue(`{Shakespeare, William}`), Punctuation(`,`), Whitespace
//! and Punctuation(`}`). Concatenating the token texts in order always
//! reproduces the input exactly; there are no gaps and no overlaps.
//!
//! The tokenizer is deliberately not built on top of the entry parser
//! in [`crate::parser`]. The two walk the same grammar but serve
//! different output contracts: the parser produces nested records and
//! may drop or rewrite text, while highlighting needs every character
//! of the input covered by exactly one span.

use std::ops::Range;

use crate::latex;
use crate::types;

/// Classification of one token span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `@article`, `@book`, … including the `@`
    EntryType,
    /// the identifier following the opening delimiter of an entry
    CitationKey,
    /// a word followed by `=`
    FieldName,
    /// a `"…"` or `{…}` field value, swallowed as one flat span
    StringValue,
    /// a digit run in field-value position
    Number,
    /// `=` or the concatenation operator `#`
    Operator,
    /// braces, parentheses and commas
    Punctuation,
    /// `%` up to the end of the line
    Comment,
    /// `@preamble`, `@string` or `@comment`
    SpecialDirective,
    /// an unquoted field value or a month abbreviation like `jan`
    Constant,
    /// `\command` outside a field value
    LatexCommand,
    /// `$…$` or `$$…$$` including the delimiters
    MathMode,
    /// `\begin{name}` or `\end{name}` including the name group
    Environment,
    /// an accent command like `\'e` or `\"{o}`
    Accent,
    /// an escaped special character like `\&`
    LatexSpecialChar,
    /// a run of whitespace
    Whitespace,
    /// anything else
    Text,
}

/// One classified span of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// the exact substring covered by this token
    pub text: String,
    /// start/end of the span, in char offsets into the input
    pub range: Range<usize>,
}

/// Lightweight context carried between tokens. This is all the state
/// the tokenizer has; the same byte sequence tokenizes differently
/// depending on these flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenContext {
    /// set after an entry-type token, marks the next word as the key
    pub expecting_citation_key: bool,
    /// set after `=` or `#`, marks the next value-shaped token
    pub expecting_field_value: bool,
    /// nesting level of `{`/`(` punctuation, floored at zero
    pub brace_depth: usize,
}

/// Characters that form a [`TokenKind::LatexSpecialChar`] when escaped.
const SPECIAL_ESCAPES: [char; 7] = ['&', '%', '$', '#', '_', '{', '}'];

/// Commonly seen LaTeX command names. Documentation only: a command
/// outside this list still tokenizes as [`TokenKind::LatexCommand`].
pub const KNOWN_COMMANDS: [&str; 28] = [
    "begin",
    "end",
    "cite",
    "ref",
    "label",
    "item",
    "emph",
    "textbf",
    "textit",
    "texttt",
    "textsc",
    "underline",
    "footnote",
    "url",
    "href",
    "LaTeX",
    "TeX",
    "newline",
    "linebreak",
    "par",
    "section",
    "subsection",
    "chapter",
    "usepackage",
    "documentclass",
    "input",
    "bibliography",
    "bibliographystyle",
];

/// Is `name` one of the commonly seen LaTeX commands in
/// [`KNOWN_COMMANDS`]?
pub fn is_known_command(name: &str) -> bool {
    KNOWN_COMMANDS.contains(&name)
}

/// Tokenize `input` into a gap-free sequence of classified spans.
///
/// Never fails; every input, including the empty string, yields a
/// token sequence whose concatenated text equals the input.
pub fn tokenize(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut context = TokenContext::default();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        let (kind, end) = next_token(&chars, pos, &mut context);
        debug_assert!(end > pos, "tokenizer must always advance");
        tokens.push(Token {
            kind,
            text: chars[pos..end].iter().collect(),
            range: pos..end,
        });
        pos = end;
    }
    tokens
}

/// Decide the kind and extent of the token starting at `pos`. Every
/// branch returns an end greater than `pos`, which guarantees both
/// termination and total input coverage.
fn next_token(chars: &[char], pos: usize, context: &mut TokenContext) -> (TokenKind, usize) {
    let chr = chars[pos];

    if chr == '%' {
        let mut end = pos;
        while end < chars.len() && chars[end] != '\n' {
            end += 1;
        }
        return (TokenKind::Comment, end.max(pos + 1));
    }

    if chr.is_whitespace() {
        let mut end = pos;
        while end < chars.len() && chars[end].is_whitespace() {
            end += 1;
        }
        return (TokenKind::Whitespace, end);
    }

    if chr == '@' {
        let mut end = pos + 1;
        while end < chars.len() && (chars[end].is_alphabetic() || chars[end] == '*') {
            end += 1;
        }
        let name: String = chars[pos + 1..end].iter().collect();
        context.expecting_citation_key = true;
        let kind = match name.to_ascii_lowercase().as_str() {
            "preamble" | "string" | "comment" => TokenKind::SpecialDirective,
            _ => TokenKind::EntryType,
        };
        return (kind, end);
    }

    // a braced field value is swallowed flat, LaTeX inside it and all
    if chr == '{' && context.expecting_field_value {
        context.expecting_field_value = false;
        return (TokenKind::StringValue, scan_balanced(chars, pos));
    }

    if chr == '{' || chr == '(' {
        context.brace_depth += 1;
        return (TokenKind::Punctuation, pos + 1);
    }

    if chr == '}' || chr == ')' {
        context.brace_depth = context.brace_depth.saturating_sub(1);
        return (TokenKind::Punctuation, pos + 1);
    }

    if chr == ',' {
        context.expecting_field_value = false;
        return (TokenKind::Punctuation, pos + 1);
    }

    if chr == '=' || chr == '#' {
        context.expecting_field_value = true;
        return (TokenKind::Operator, pos + 1);
    }

    if chr == '"' {
        context.expecting_field_value = false;
        return (TokenKind::StringValue, scan_quoted(chars, pos));
    }

    if chr == '\\' {
        return scan_backslash(chars, pos);
    }

    if chr == '$' {
        return (TokenKind::MathMode, scan_math(chars, pos));
    }

    if chr.is_ascii_digit() && context.expecting_field_value {
        let mut end = pos;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }
        context.expecting_field_value = false;
        return (TokenKind::Number, end);
    }

    if chr.is_alphabetic() || chr == '_' {
        let mut end = pos;
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }
        let kind = classify_word(chars, pos, end, context);
        return (kind, end);
    }

    (TokenKind::Text, pos + 1)
}

fn is_word_char(chr: char) -> bool {
    chr.is_alphanumeric() || chr == '_' || chr == '-' || chr == ':'
}

/// Classify a word token based on the current context, or failing that,
/// on one-token lookahead past whitespace.
fn classify_word(chars: &[char], start: usize, end: usize, context: &mut TokenContext) -> TokenKind {
    if context.expecting_citation_key {
        context.expecting_citation_key = false;
        return TokenKind::CitationKey;
    }
    if context.expecting_field_value {
        // unquoted values are constants, month abbreviation or not
        context.expecting_field_value = false;
        return TokenKind::Constant;
    }
    let mut lookahead = end;
    while lookahead < chars.len() && chars[lookahead].is_whitespace() {
        lookahead += 1;
    }
    if lookahead < chars.len() && chars[lookahead] == '=' {
        return TokenKind::FieldName;
    }
    let word: String = chars[start..end].iter().collect();
    if types::month_name(&word).is_some() {
        return TokenKind::Constant;
    }
    TokenKind::Text
}

/// Everything starting with a backslash: escaped special characters,
/// accent commands, `\begin`/`\end` environments and plain commands.
fn scan_backslash(chars: &[char], pos: usize) -> (TokenKind, usize) {
    if pos + 1 >= chars.len() {
        // lone trailing backslash
        return (TokenKind::Text, pos + 1);
    }
    let next = chars[pos + 1];

    if SPECIAL_ESCAPES.contains(&next) {
        return (TokenKind::LatexSpecialChar, pos + 2);
    }

    if latex::is_accent_char(next) {
        if pos + 4 < chars.len()
            && chars[pos + 2] == '{'
            && chars[pos + 3].is_alphabetic()
            && chars[pos + 4] == '}'
        {
            return (TokenKind::Accent, pos + 5);
        }
        if pos + 2 < chars.len() && chars[pos + 2].is_alphabetic() {
            return (TokenKind::Accent, pos + 3);
        }
        return (TokenKind::Accent, pos + 2);
    }

    if next.is_alphabetic() {
        let mut end = pos + 1;
        while end < chars.len() && chars[end].is_alphabetic() {
            end += 1;
        }
        if end < chars.len() && chars[end] == '*' {
            end += 1;
        }
        let name: String = chars[pos + 1..end].iter().collect();
        if (name == "begin" || name == "end") && end < chars.len() && chars[end] == '{' {
            return (TokenKind::Environment, scan_balanced(chars, end));
        }
        return (TokenKind::LatexCommand, end);
    }

    (TokenKind::Text, pos + 1)
}

/// Consume a brace-balanced group starting at `start` (which must hold
/// `{`). Runs to the end of input if the group never closes.
fn scan_balanced(chars: &[char], start: usize) -> usize {
    let mut depth = 0usize;
    let mut pos = start;
    while pos < chars.len() {
        match chars[pos] {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return pos + 1;
                }
            }
            _ => {}
        }
        pos += 1;
    }
    chars.len()
}

/// Consume a `"…"` string starting at `start`, honoring `\"` escapes.
/// Runs to the end of input if the closing quote is missing.
fn scan_quoted(chars: &[char], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < chars.len() {
        match chars[pos] {
            '\\' => pos += 2,
            '"' => return pos + 1,
            _ => pos += 1,
        }
    }
    chars.len()
}

/// Consume `$…$` inline or `$$…$$` display math starting at `start`,
/// honoring backslash escapes. Runs to the end of input if unterminated.
fn scan_math(chars: &[char], start: usize) -> usize {
    let display = start + 1 < chars.len() && chars[start + 1] == '$';
    let mut pos = start + if display { 2 } else { 1 };
    while pos < chars.len() {
        match chars[pos] {
            '\\' => pos += 2,
            '$' => {
                if !display {
                    return pos + 1;
                }
                if pos + 1 < chars.len() && chars[pos + 1] == '$' {
                    return pos + 2;
                }
                pos += 1;
            }
            _ => pos += 1,
        }
    }
    chars.len()
}
