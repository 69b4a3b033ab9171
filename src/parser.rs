//! The entry parser turns raw bib source text into [`ParsedEntry`]
//! records.
//!
//! It scans the input directly rather than consuming the token stream
//! of [`crate::token`]: the tokenizer must cover every character for
//! highlighting, while the parser matches delimiters at a coarser grain
//! and rewrites field values (delimiter stripping, month expansion,
//! LaTeX conversion). Keeping the two scanners separate keeps each
//! contract simple.
//!
//! The parser is permissive by design. Real-world `.bib` files carry
//! stray commas, missing `=` signs and unclosed final braces; all of
//! that is tolerated so a best-effort import still succeeds. Only
//! structural defects (a missing type name, opening delimiter or
//! citation key) abort with a [`ParseError`].
//!
//! All scan helpers take the input and a start position and return the
//! new position, so each rule is a pure function over an explicit
//! cursor and can be tested in isolation.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::io::Read;
use std::path;
use std::str;

use crate::errors::ParseError;
use crate::latex;
use crate::types::{month_name, EntryType, ParseOptions, ParsedEntry};

/// Parse `input` into a list of entries.
///
/// `@comment` bodies and `@preamble`/`@string` directives are
/// recognized and skipped without producing an entry. Anything between
/// entries that does not start with `@` is ignored. Empty or
/// whitespace-only input is an error; input without any `@` yields an
/// empty list.
pub fn parse(input: &str, options: &ParseOptions) -> Result<Vec<ParsedEntry>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let chars: Vec<char> = input.chars().collect();
    let mut entries = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        pos = skip_ignored(&chars, pos);
        if pos >= chars.len() {
            break;
        }
        if chars[pos] == '@' {
            let (entry, next) = parse_entry(&chars, pos, options)?;
            if let Some(entry) = entry {
                entries.push(entry);
            }
            pos = next;
        } else {
            pos += 1;
        }
    }
    Ok(entries)
}

/// Like [`parse`], but suppresses the error.
pub fn parse_or_none(input: &str, options: &ParseOptions) -> Option<Vec<ParsedEntry>> {
    parse(input, options).ok()
}

/// Parser handle over an in-memory source string.
///
/// ```rust
/// use bibscan::Parser;
/// use std::str::FromStr;
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let p = Parser::from_str(r#"@book{tolkien1937, author = {J. R. R. Tolkien}}"#)?;
///     for entry in p.parse()? {
///         println!("{} {}", entry.entry_type, entry.citation_key);
///     }
///     Ok(())
/// }
/// ```
pub struct Parser {
    src: String,
    options: ParseOptions,
}

impl Parser {
    /// Use a file stored at `path` as source for the parsing process.
    pub fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Parser, io::Error> {
        let mut fd = fs::File::open(path)?;
        let mut buf = String::new();
        fd.read_to_string(&mut buf)?;
        Ok(Parser {
            src: buf,
            options: ParseOptions::default(),
        })
    }

    /// Use a string as source for the parsing process.
    pub fn from_string(data: String) -> Parser {
        Parser {
            src: data,
            options: ParseOptions::default(),
        }
    }

    /// Replace the default [`ParseOptions`].
    pub fn with_options(mut self, options: ParseOptions) -> Parser {
        self.options = options;
        self
    }

    /// Parse the source into entries.
    pub fn parse(&self) -> Result<Vec<ParsedEntry>, ParseError> {
        parse(&self.src, &self.options)
    }
}

impl str::FromStr for Parser {
    type Err = io::Error;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(Parser::from_string(data.to_string()))
    }
}

/// Parse one `@type{…}` construct starting at the `@` at `start`.
/// Returns `None` for `@comment` bodies and `@preamble`/`@string`
/// directives, plus the position after the entry.
fn parse_entry(
    chars: &[char],
    start: usize,
    options: &ParseOptions,
) -> Result<(Option<ParsedEntry>, usize), ParseError> {
    let mut pos = start + 1; // consume '@'
    let type_start = pos;
    while pos < chars.len() && chars[pos].is_alphabetic() {
        pos += 1;
    }
    if pos == type_start {
        return Err(ParseError::InvalidEntryType(type_start));
    }
    let type_name: String = chars[type_start..pos].iter().collect();

    pos = skip_ignored(chars, pos);
    if pos >= chars.len() || (chars[pos] != '{' && chars[pos] != '(') {
        return Err(ParseError::MissingOpeningBrace(pos));
    }
    let closing = if chars[pos] == '{' { '}' } else { ')' };
    pos += 1;

    // @comment bodies are skipped wholesale, braces balanced
    if type_name.eq_ignore_ascii_case("comment") {
        return Ok((None, skip_balanced_region(chars, pos, closing)));
    }

    pos = skip_ignored(chars, pos);
    let key_start = pos;
    while pos < chars.len()
        && chars[pos] != ','
        && chars[pos] != closing
        && !chars[pos].is_whitespace()
    {
        pos += 1;
    }
    let citation_key: String = chars[key_start..pos].iter().collect();
    let is_directive =
        type_name.eq_ignore_ascii_case("preamble") || type_name.eq_ignore_ascii_case("string");
    if citation_key.is_empty() && !is_directive {
        return Err(ParseError::MissingCitationKey {
            entry_type: type_name,
            position: key_start,
        });
    }

    pos = skip_ignored(chars, pos);
    if pos < chars.len() && chars[pos] == ',' {
        pos += 1;
    }

    let mut fields = HashMap::new();
    while pos < chars.len() && chars[pos] != closing {
        let iteration_start = pos;
        pos = skip_ignored(chars, pos);
        if pos >= chars.len() || chars[pos] == closing {
            break;
        }

        let name_start = pos;
        while pos < chars.len() && chars[pos] != '=' && !chars[pos].is_whitespace() {
            pos += 1;
        }
        let raw_name: String = chars[name_start..pos].iter().collect();
        if raw_name.is_empty() {
            // stray comma or noise, resynchronize at the next comma
            while pos < chars.len() && chars[pos] != ',' && chars[pos] != closing {
                pos += 1;
            }
            if pos < chars.len() && chars[pos] == ',' {
                pos += 1;
            }
            if pos == iteration_start {
                // no progress, force-advance so the loop terminates
                pos += 1;
            }
            continue;
        }
        let name = if options.normalize_field_names {
            raw_name.to_lowercase()
        } else {
            raw_name
        };

        pos = skip_ignored(chars, pos);
        if pos >= chars.len() || chars[pos] != '=' {
            // tolerate a missing '='; the consumed name guarantees progress
            continue;
        }
        pos += 1;

        let (mut value, value_end) = parse_field_value(chars, pos, closing);
        pos = value_end;
        if options.strip_delimiters {
            value = strip_delimiters(&value);
        }
        if options.convert_latex_to_unicode {
            value = convert_value(&value);
        }
        fields.insert(name, value); // duplicate names: last write wins

        pos = skip_ignored(chars, pos);
        if pos < chars.len() && chars[pos] == ',' {
            pos += 1;
        }
    }
    if pos < chars.len() && chars[pos] == closing {
        pos += 1;
    }

    if is_directive {
        return Ok((None, pos));
    }
    let mut entry = ParsedEntry::new(EntryType::from_name(&type_name), citation_key);
    entry.fields = fields;
    if options.preserve_raw_source {
        entry.raw_source = Some(chars[start..pos].iter().collect());
    }
    Ok((Some(entry), pos))
}

/// Accumulate a field value until `,` or the closing delimiter.
///
/// Quoted and braced fragments keep their delimiters (stripping is a
/// separate post-process step), `#` joins fragments without contributing
/// text, bare words expand month abbreviations, and whitespace between
/// fragments is dropped.
fn parse_field_value(chars: &[char], start: usize, closing: char) -> (String, usize) {
    let mut value = String::new();
    let mut pos = start;
    while pos < chars.len() && chars[pos] != ',' && chars[pos] != closing {
        let chr = chars[pos];
        if chr == '"' {
            let end = quoted_end(chars, pos);
            value.extend(&chars[pos..end]);
            pos = end;
        } else if chr == '{' {
            let end = braced_end(chars, pos);
            value.extend(&chars[pos..end]);
            pos = end;
        } else if chr == '#' {
            pos += 1;
        } else if chr.is_ascii_digit() {
            let run_start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            value.extend(&chars[run_start..pos]);
        } else if chr.is_alphabetic() {
            let run_start = pos;
            while pos < chars.len() && chars[pos].is_alphabetic() {
                pos += 1;
            }
            let word: String = chars[run_start..pos].iter().collect();
            match month_name(&word) {
                Some(full) => value.push_str(full),
                None => value.push_str(&word),
            }
        } else {
            // whitespace between fragments and stray punctuation
            pos += 1;
        }
    }
    (value, pos)
}

/// Trim and remove one outer pair of quotes or braces, quotes checked
/// first. Only a single layer is removed: `{{x}}` strips to `{x}`.
fn strip_delimiters(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return trimmed[1..trimmed.len() - 1].trim().to_string();
    }
    if is_wrapped_in_braces(trimmed) {
        return trimmed[1..trimmed.len() - 1].trim().to_string();
    }
    trimmed.to_string()
}

/// LaTeX-convert a field value. A brace layer still wrapping the value
/// after delimiter stripping protects its content; only the interior is
/// converted so the layer stays visible, `{{x}}` strips to `{x}`, never
/// to `x`.
fn convert_value(value: &str) -> String {
    if is_wrapped_in_braces(value) {
        let inner = &value[1..value.len() - 1];
        return format!("{{{}}}", latex::to_unicode(inner));
    }
    latex::to_unicode(value)
}

/// Does the first `{` of `value` match its final `}`? `{x},{y}` is not
/// wrapped: its first group closes before the end.
fn is_wrapped_in_braces(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < 2 || chars[0] != '{' || chars[chars.len() - 1] != '}' {
        return false;
    }
    let mut depth = 0i64;
    for (idx, chr) in chars.iter().enumerate() {
        match chr {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth <= 0 && idx != chars.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Skip whitespace and `%`-comments.
fn skip_ignored(chars: &[char], start: usize) -> usize {
    let mut pos = start;
    while pos < chars.len() {
        if chars[pos].is_whitespace() {
            pos += 1;
        } else if chars[pos] == '%' {
            while pos < chars.len() && chars[pos] != '\n' {
                pos += 1;
            }
        } else {
            break;
        }
    }
    pos
}

/// Position after the closing quote of the `"…"` string at `start`,
/// honoring `\"` escapes; end of input if unterminated.
fn quoted_end(chars: &[char], start: usize) -> usize {
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

/// Position after the brace-balanced group at `start` (which holds
/// `{`); end of input if the group never closes.
fn braced_end(chars: &[char], start: usize) -> usize {
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

/// Skip a `@comment` body: consume until the closing delimiter at
/// nesting depth zero, or the end of input.
fn skip_balanced_region(chars: &[char], start: usize, closing: char) -> usize {
    let mut depth = 0usize;
    let mut pos = start;
    while pos < chars.len() {
        match chars[pos] {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            chr if chr == closing && depth == 0 => return pos + 1,
            _ => {}
        }
        pos += 1;
    }
    chars.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::str::FromStr;

    fn parse_default(input: &str) -> Result<Vec<ParsedEntry>, ParseError> {
        parse(input, &ParseOptions::default())
    }

    #[test]
    fn test_tolkien() -> Result<(), Box<dyn error::Error>> {
        let p = Parser::from_str("@book{tolkien1937, author = {J. R. R. Tolkien}}")?;
        let entries = p.parse()?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, EntryType::Book);
        assert_eq!(entries[0].citation_key, "tolkien1937");
        assert_eq!(entries[0].field("author"), Some("J. R. R. Tolkien"));
        Ok(())
    }

    #[test]
    fn test_taocp() -> Result<(), Box<dyn error::Error>> {
        let src = r#"@book{DBLP:books/lib/Knuth97,
  author    = {Donald Ervin Knuth},
  title     = {The art of computer programming, Volume {I:} Fundamental Algorithms,
               3rd Edition},
  publisher = {Addison-Wesley},
  year      = {1997},
  url       = {https://www.worldcat.org/oclc/312910844},
  isbn      = {0201896834},
  bibsource = {{dblp computer science bibliography}, https://dblp.org}
}"#;
        let entries = parse_default(src)?;
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.entry_type, EntryType::Book);
        assert_eq!(entry.citation_key, "DBLP:books/lib/Knuth97");
        assert_eq!(entry.field("year"), Some("1997"));
        assert_eq!(
            entry.field("bibsource"),
            Some("{dblp computer science bibliography}, https://dblp.org")
        );
        Ok(())
    }

    #[test]
    fn test_basic_entry() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default(
            "@article{doe2024, author = {John Doe}, title = {Example}, year = {2024}}",
        )?;
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.entry_type, EntryType::Article);
        assert_eq!(entry.citation_key, "doe2024");
        assert_eq!(entry.field("author"), Some("John Doe"));
        assert_eq!(entry.field("title"), Some("Example"));
        assert_eq!(entry.field("year"), Some("2024"));
        Ok(())
    }

    #[test]
    fn test_case_insensitive_type_and_field_normalization() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@ARTICLE{t, TITLE={X}}")?;
        assert_eq!(entries[0].entry_type, EntryType::Article);
        assert_eq!(entries[0].field("title"), Some("X"));
        assert_eq!(entries[0].field("TITLE"), None);
        Ok(())
    }

    #[test]
    fn test_field_names_kept_verbatim_without_normalization() -> Result<(), Box<dyn error::Error>> {
        let options = ParseOptions {
            normalize_field_names: false,
            ..ParseOptions::default()
        };
        let entries = parse("@article{t, TITLE={X}}", &options)?;
        assert_eq!(entries[0].field("TITLE"), Some("X"));
        assert_eq!(entries[0].field("title"), None);
        Ok(())
    }

    #[test]
    fn test_custom_entry_type() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@lecture{l1, year = 2020}")?;
        assert_eq!(
            entries[0].entry_type,
            EntryType::Custom("lecture".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_parenthesized_entry() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@article(key1, year = {2020})")?;
        assert_eq!(entries[0].citation_key, "key1");
        assert_eq!(entries[0].field("year"), Some("2020"));
        Ok(())
    }

    #[test]
    fn test_delimiter_stripping_is_single_layer() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@article{t, title = {{x}}}")?;
        assert_eq!(entries[0].field("title"), Some("{x}"));
        Ok(())
    }

    #[test]
    fn test_protected_value_keeps_its_brace_layer() -> Result<(), Box<dyn error::Error>> {
        // the surviving layer is observable even with conversion on
        let entries = parse_default("@article{t, title = {{M\\\"uller}}}")?;
        assert_eq!(entries[0].field("title"), Some("{Müller}"));
        Ok(())
    }

    #[test]
    fn test_nested_braces_preserved() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@article{t, title = {Hello {Nested} World}}")?;
        let title = entries[0].field("title").unwrap();
        assert!(title.contains("Nested"), "got {title:?}");
        Ok(())
    }

    #[test]
    fn test_quoted_values() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@article{t, title = \"An Example\", year = \"2001\"}")?;
        assert_eq!(entries[0].field("title"), Some("An Example"));
        assert_eq!(entries[0].field("year"), Some("2001"));
        Ok(())
    }

    #[test]
    fn test_strip_disabled_keeps_delimiters() -> Result<(), Box<dyn error::Error>> {
        let options = ParseOptions {
            strip_delimiters: false,
            convert_latex_to_unicode: false,
            ..ParseOptions::default()
        };
        let entries = parse("@article{t, title = {X}, note = \"a\" # \"b\"}", &options)?;
        assert_eq!(entries[0].field("title"), Some("{X}"));
        // fragment delimiters are kept during the value scan
        assert_eq!(entries[0].field("note"), Some("\"a\"\"b\""));
        Ok(())
    }

    #[test]
    fn test_month_expansion() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@article{t, month = jan, note = dec}")?;
        assert_eq!(entries[0].field("month"), Some("January"));
        assert_eq!(entries[0].field("note"), Some("December"));
        Ok(())
    }

    #[test]
    fn test_concatenation() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@article{t, year = 19 # 97, editor = smith # jones}")?;
        assert_eq!(entries[0].field("year"), Some("1997"));
        // whitespace between concatenated fragments is dropped
        assert_eq!(entries[0].field("editor"), Some("smithjones"));
        Ok(())
    }

    #[test]
    fn test_latex_conversion_toggle() -> Result<(), Box<dyn error::Error>> {
        let src = "@article{t, author = {M\\\"uller}}";
        let entries = parse_default(src)?;
        assert_eq!(entries[0].field("author"), Some("Müller"));

        let options = ParseOptions {
            convert_latex_to_unicode: false,
            ..ParseOptions::default()
        };
        let entries = parse(src, &options)?;
        assert_eq!(entries[0].field("author"), Some("M\\\"uller"));
        Ok(())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_default(""), Err(ParseError::EmptyInput));
        assert_eq!(parse_default("   \n\t"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_input_without_entries_yields_empty_list() -> Result<(), Box<dyn error::Error>> {
        assert!(parse_default("no entries here")?.is_empty());
        assert!(parse_default("% only a comment")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_entry_type() {
        assert_eq!(parse_default("@{k}"), Err(ParseError::InvalidEntryType(1)));
        assert_eq!(
            parse_default("  @123{k}"),
            Err(ParseError::InvalidEntryType(3))
        );
    }

    #[test]
    fn test_missing_opening_brace() {
        assert_eq!(
            parse_default("@book key"),
            Err(ParseError::MissingOpeningBrace(6))
        );
    }

    #[test]
    fn test_missing_citation_key() {
        assert_eq!(
            parse_default("@book{, year = 1997}"),
            Err(ParseError::MissingCitationKey {
                entry_type: "book".to_string(),
                position: 6,
            })
        );
    }

    #[test]
    fn test_directives_produce_no_entries() -> Result<(), Box<dyn error::Error>> {
        let src = r#"
@comment{ignore {all of} this}
@string{dblp = "dblp computer science bibliography"}
@preamble{"\providecommand{\noop}[1]{}"}
@misc{kept, year = 2020}
"#;
        let entries = parse_default(src)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].citation_key, "kept");
        Ok(())
    }

    #[test]
    fn test_stray_text_between_entries() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("garbage @misc{a} more garbage @misc{b}")?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].citation_key, "a");
        assert_eq!(entries[1].citation_key, "b");
        Ok(())
    }

    #[test]
    fn test_comments_between_fields() -> Result<(), Box<dyn error::Error>> {
        let src = "@misc{k, % trailing note\n  year = 2020, % another\n  title = {T}}";
        let entries = parse_default(src)?;
        assert_eq!(entries[0].field("year"), Some("2020"));
        assert_eq!(entries[0].field("title"), Some("T"));
        Ok(())
    }

    #[test]
    fn test_unterminated_entry_is_tolerated() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@misc{k, year = 2020")?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field("year"), Some("2020"));
        Ok(())
    }

    #[test]
    fn test_stray_commas_and_missing_assign() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@misc{k,, title {lost}, year = 2020,}")?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field("year"), Some("2020"));
        assert_eq!(entries[0].field("title"), None);
        Ok(())
    }

    #[test]
    fn test_duplicate_fields_last_write_wins() -> Result<(), Box<dyn error::Error>> {
        let entries = parse_default("@misc{k, note = {a}, note = {b}}")?;
        assert_eq!(entries[0].field("note"), Some("b"));
        Ok(())
    }

    #[test]
    fn test_preserve_raw_source() -> Result<(), Box<dyn error::Error>> {
        let options = ParseOptions {
            preserve_raw_source: true,
            ..ParseOptions::default()
        };
        let src = "leading @misc{k, year = 2020} trailing";
        let entries = parse(src, &options)?;
        assert_eq!(
            entries[0].raw_source.as_deref(),
            Some("@misc{k, year = 2020}")
        );

        let entries = parse(src, &ParseOptions::default())?;
        assert_eq!(entries[0].raw_source, None);
        Ok(())
    }

    #[test]
    fn test_parse_or_none() {
        assert!(parse_or_none("", &ParseOptions::default()).is_none());
        let entries = parse_or_none("@misc{k}", &ParseOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_strip_delimiters_rules() {
        assert_eq!(strip_delimiters("  {x}  "), "x");
        assert_eq!(strip_delimiters("\"x\""), "x");
        assert_eq!(strip_delimiters("{{x}}"), "{x}");
        assert_eq!(strip_delimiters("{x},{y}"), "{x},{y}");
        assert_eq!(strip_delimiters("plain"), "plain");
        assert_eq!(strip_delimiters(""), "");
    }

    #[test]
    fn test_scan_helpers_are_pure_cursor_functions() {
        let chars: Vec<char> = "{a{b}c} rest".chars().collect();
        assert_eq!(braced_end(&chars, 0), 7);
        let chars: Vec<char> = "\"a\\\"b\" rest".chars().collect();
        assert_eq!(quoted_end(&chars, 0), 6);
        let chars: Vec<char> = "  % note\n  x".chars().collect();
        assert_eq!(skip_ignored(&chars, 0), 11);
    }
}
