use std::collections::HashMap;
use std::fmt;

use unicase::Ascii;

use crate::latex;

/// Month abbreviations that BibTeX treats as predefined constants,
/// together with the English month name they expand to.
pub(crate) const MONTHS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

/// Look up a word in the month-abbreviation table, case-insensitively.
/// Returns the full English month name, e.g. `"jan"` ↦ `"January"`.
pub(crate) fn month_name(word: &str) -> Option<&'static str> {
    let needle = Ascii::new(word);
    MONTHS
        .iter()
        .find(|(abbrev, _)| needle == Ascii::new(*abbrev))
        .map(|(_, full)| *full)
}

/// The type of a bib entry, e.g. “article” in `@article{…}`.
///
/// The standard types are matched case-insensitively when an entry is
/// parsed (`@ARTICLE` and `@article` both yield [`EntryType::Article`]).
/// Everything else is kept verbatim in [`EntryType::Custom`]; two custom
/// types compare equal only if their strings are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryType {
    Article,
    Book,
    Booklet,
    Conference,
    InBook,
    InCollection,
    InProceedings,
    Manual,
    MastersThesis,
    Misc,
    PhdThesis,
    Proceedings,
    TechReport,
    Unpublished,
    Online,
    Software,
    Dataset,
    /// Any type outside the standard set, stored as written in the source.
    Custom(String),
}

impl EntryType {
    /// Resolve a type name from a bib file. The lookup folds case; the
    /// fallback [`EntryType::Custom`] does not.
    pub fn from_name(name: &str) -> EntryType {
        match name.to_ascii_lowercase().as_str() {
            "article" => EntryType::Article,
            "book" => EntryType::Book,
            "booklet" => EntryType::Booklet,
            "conference" => EntryType::Conference,
            "inbook" => EntryType::InBook,
            "incollection" => EntryType::InCollection,
            "inproceedings" => EntryType::InProceedings,
            "manual" => EntryType::Manual,
            "mastersthesis" => EntryType::MastersThesis,
            "misc" => EntryType::Misc,
            "phdthesis" => EntryType::PhdThesis,
            "proceedings" => EntryType::Proceedings,
            "techreport" => EntryType::TechReport,
            "unpublished" => EntryType::Unpublished,
            "online" => EntryType::Online,
            "software" => EntryType::Software,
            "dataset" => EntryType::Dataset,
            _ => EntryType::Custom(name.to_string()),
        }
    }

    /// The canonical lowercase name of this type, e.g. `"article"`.
    pub fn name(&self) -> &str {
        match self {
            EntryType::Article => "article",
            EntryType::Book => "book",
            EntryType::Booklet => "booklet",
            EntryType::Conference => "conference",
            EntryType::InBook => "inbook",
            EntryType::InCollection => "incollection",
            EntryType::InProceedings => "inproceedings",
            EntryType::Manual => "manual",
            EntryType::MastersThesis => "mastersthesis",
            EntryType::Misc => "misc",
            EntryType::PhdThesis => "phdthesis",
            EntryType::Proceedings => "proceedings",
            EntryType::TechReport => "techreport",
            EntryType::Unpublished => "unpublished",
            EntryType::Online => "online",
            EntryType::Software => "software",
            EntryType::Dataset => "dataset",
            EntryType::Custom(name) => name,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Options steering the parsing process.
///
/// The defaults reproduce what most consumers want: normalized field
/// names, stripped value delimiters and Unicode field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep the original source slice of each entry in
    /// [`ParsedEntry::raw_source`]. Default: `false`.
    pub preserve_raw_source: bool,
    /// Lowercase field names, so `TITLE = {…}` is stored as `title`.
    /// Default: `true`.
    pub normalize_field_names: bool,
    /// Remove the one outer pair of `{…}` or `"…"` around field values
    /// and trim surrounding whitespace. Default: `true`.
    pub strip_delimiters: bool,
    /// Run field values through [`latex_to_unicode`](crate::latex_to_unicode),
    /// so `M\"uller` is stored as `Müller`. Default: `true`.
    pub convert_latex_to_unicode: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            preserve_raw_source: false,
            normalize_field_names: true,
            strip_delimiters: true,
            convert_latex_to_unicode: true,
        }
    }
}

/// One entry in a `.bib` file.
///
/// An entry is immutable once parsed; the `with_*` methods produce a
/// modified copy instead of mutating in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    /// entry type, e.g. [`EntryType::Article`]
    pub entry_type: EntryType,
    /// citation key, e.g. “DBLP:books/lib/Knuth97”
    pub citation_key: String,
    /// map of fields, e.g. “author” mapped to “Donald Ervin Knuth”
    pub fields: HashMap<String, String>,
    /// the original source slice of this entry, kept only when
    /// [`ParseOptions::preserve_raw_source`] is set
    pub raw_source: Option<String>,
}

impl ParsedEntry {
    pub fn new(entry_type: EntryType, citation_key: String) -> ParsedEntry {
        ParsedEntry {
            entry_type,
            citation_key,
            fields: HashMap::new(),
            raw_source: None,
        }
    }

    /// Value of the field with the given name, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|data| data.as_str())
    }

    /// Given the name of a field, return its value in the closest Unicode
    /// representation, assuming TeX semantics for the value. Useful when
    /// parsing ran with [`ParseOptions::convert_latex_to_unicode`] disabled.
    pub fn unicode_field(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(|data| latex::to_unicode(data))
    }

    /// A copy of this entry with a different entry type.
    pub fn with_entry_type(&self, entry_type: EntryType) -> ParsedEntry {
        let mut entry = self.clone();
        entry.entry_type = entry_type;
        entry
    }

    /// A copy of this entry with a different citation key.
    pub fn with_citation_key(&self, citation_key: &str) -> ParsedEntry {
        let mut entry = self.clone();
        entry.citation_key = citation_key.to_string();
        entry
    }

    /// A copy of this entry with one field added or replaced.
    pub fn with_field(&self, name: &str, data: &str) -> ParsedEntry {
        let mut entry = self.clone();
        entry.fields.insert(name.to_string(), data.to_string());
        entry
    }
}
