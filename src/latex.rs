//! Conversion between LaTeX escape sequences and Unicode text.
//!
//! Field data in `.bib` files usually carries TeX-like markup, e.g.
//! `M{\"u}ller` or `G\"odel--Bernays`. [`to_unicode`] resolves such
//! markup into plain Unicode text; [`to_latex`] escapes Unicode text
//! back into 7-bit-safe LaTeX. Both are total functions: unknown
//! commands and malformed sequences are copied through unchanged,
//! never reported as errors.
//!
//! [`to_latex`] only reverses the accent and special-character tables.
//! Greek letters and math symbols deliberately have no reverse mapping,
//! so `to_latex("α")` returns `"α"` unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Literal multi-character replacements, ordered longest-first within
/// each conflicting family so that e.g. `---` is consumed before `--`
/// and `\OE` before any shorter prefix. Applied by plain substring
/// replacement across the whole input, one table entry at a time.
const SPECIAL_SEQUENCES: [(&str, &str); 18] = [
    ("---", "\u{2014}"), // em-dash
    ("--", "\u{2013}"),  // en-dash
    ("``", "\u{201C}"),
    ("''", "\u{201D}"),
    ("\\ss", "ß"),
    ("\\ae", "æ"),
    ("\\AE", "Æ"),
    ("\\oe", "œ"),
    ("\\OE", "Œ"),
    ("\\aa", "å"),
    ("\\AA", "Å"),
    ("\\&", "&"),
    ("\\%", "%"),
    ("\\$", "$"),
    ("\\#", "#"),
    ("\\_", "_"),
    ("\\{", "{"),
    ("\\}", "}"),
];

/// Greek letter commands. Lookup is case-sensitive since lowercase and
/// uppercase letters use differently-cased command names.
const GREEK_COMMANDS: [(&str, &str); 41] = [
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("varepsilon", "ϵ"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("vartheta", "ϑ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("varpi", "ϖ"),
    ("rho", "ρ"),
    ("varrho", "ϱ"),
    ("sigma", "σ"),
    ("varsigma", "ς"),
    ("tau", "τ"),
    ("upsilon", "υ"),
    ("phi", "φ"),
    ("varphi", "ϕ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Theta", "Θ"),
    ("Lambda", "Λ"),
    ("Xi", "Ξ"),
    ("Pi", "Π"),
    ("Sigma", "Σ"),
    ("Upsilon", "Υ"),
    ("Phi", "Φ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
    ("omicron", "ο"),
];

const MATH_COMMANDS: [(&str, &str); 48] = [
    ("infty", "∞"),
    ("leq", "≤"),
    ("geq", "≥"),
    ("neq", "≠"),
    ("approx", "≈"),
    ("equiv", "≡"),
    ("pm", "±"),
    ("mp", "∓"),
    ("times", "×"),
    ("div", "÷"),
    ("cdot", "⋅"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("int", "∫"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("sqrt", "√"),
    ("in", "∈"),
    ("notin", "∉"),
    ("subset", "⊂"),
    ("supset", "⊃"),
    ("subseteq", "⊆"),
    ("supseteq", "⊇"),
    ("cup", "∪"),
    ("cap", "∩"),
    ("emptyset", "∅"),
    ("forall", "∀"),
    ("exists", "∃"),
    ("neg", "¬"),
    ("wedge", "∧"),
    ("vee", "∨"),
    ("to", "→"),
    ("rightarrow", "→"),
    ("leftarrow", "←"),
    ("Rightarrow", "⇒"),
    ("Leftarrow", "⇐"),
    ("leftrightarrow", "↔"),
    ("ldots", "…"),
    ("cdots", "⋯"),
    ("circ", "∘"),
    ("prime", "′"),
    ("propto", "∝"),
    ("sim", "∼"),
    ("simeq", "≃"),
    ("cong", "≅"),
    ("perp", "⊥"),
    ("parallel", "∥"),
    ("angle", "∠"),
];

/// Text-mode commands whose names are mostly single letters, resolved by
/// exact command-name match so `\o` never fires inside `\omega`.
const TEXT_COMMANDS: [(&str, &str); 10] = [
    ("o", "ø"),
    ("O", "Ø"),
    ("l", "ł"),
    ("L", "Ł"),
    ("dag", "†"),
    ("ddag", "‡"),
    ("S", "§"),
    ("P", "¶"),
    ("copyright", "©"),
    ("pounds", "£"),
];

/// The 13 accent commands with their per-letter substitution tables.
/// Letters missing from a table are not convertible with that accent
/// and the sequence stays as it was written.
const ACCENT_TABLES: [(char, &[(char, char)]); 13] = [
    (
        '\'', // acute
        &[
            ('a', 'á'),
            ('c', 'ć'),
            ('e', 'é'),
            ('i', 'í'),
            ('l', 'ĺ'),
            ('n', 'ń'),
            ('o', 'ó'),
            ('r', 'ŕ'),
            ('s', 'ś'),
            ('u', 'ú'),
            ('y', 'ý'),
            ('z', 'ź'),
            ('A', 'Á'),
            ('C', 'Ć'),
            ('E', 'É'),
            ('I', 'Í'),
            ('L', 'Ĺ'),
            ('N', 'Ń'),
            ('O', 'Ó'),
            ('R', 'Ŕ'),
            ('S', 'Ś'),
            ('U', 'Ú'),
            ('Y', 'Ý'),
            ('Z', 'Ź'),
        ],
    ),
    (
        '`', // grave
        &[
            ('a', 'à'),
            ('e', 'è'),
            ('i', 'ì'),
            ('o', 'ò'),
            ('u', 'ù'),
            ('A', 'À'),
            ('E', 'È'),
            ('I', 'Ì'),
            ('O', 'Ò'),
            ('U', 'Ù'),
        ],
    ),
    (
        '^', // circumflex
        &[
            ('a', 'â'),
            ('c', 'ĉ'),
            ('e', 'ê'),
            ('g', 'ĝ'),
            ('h', 'ĥ'),
            ('i', 'î'),
            ('j', 'ĵ'),
            ('o', 'ô'),
            ('s', 'ŝ'),
            ('u', 'û'),
            ('w', 'ŵ'),
            ('y', 'ŷ'),
            ('A', 'Â'),
            ('C', 'Ĉ'),
            ('E', 'Ê'),
            ('G', 'Ĝ'),
            ('H', 'Ĥ'),
            ('I', 'Î'),
            ('J', 'Ĵ'),
            ('O', 'Ô'),
            ('S', 'Ŝ'),
            ('U', 'Û'),
            ('W', 'Ŵ'),
            ('Y', 'Ŷ'),
        ],
    ),
    (
        '"', // umlaut
        &[
            ('a', 'ä'),
            ('e', 'ë'),
            ('i', 'ï'),
            ('o', 'ö'),
            ('u', 'ü'),
            ('y', 'ÿ'),
            ('A', 'Ä'),
            ('E', 'Ë'),
            ('I', 'Ï'),
            ('O', 'Ö'),
            ('U', 'Ü'),
            ('Y', 'Ÿ'),
        ],
    ),
    (
        '~', // tilde
        &[
            ('a', 'ã'),
            ('i', 'ĩ'),
            ('n', 'ñ'),
            ('o', 'õ'),
            ('u', 'ũ'),
            ('A', 'Ã'),
            ('I', 'Ĩ'),
            ('N', 'Ñ'),
            ('O', 'Õ'),
            ('U', 'Ũ'),
        ],
    ),
    (
        '=', // macron
        &[
            ('a', 'ā'),
            ('e', 'ē'),
            ('i', 'ī'),
            ('o', 'ō'),
            ('u', 'ū'),
            ('A', 'Ā'),
            ('E', 'Ē'),
            ('I', 'Ī'),
            ('O', 'Ō'),
            ('U', 'Ū'),
        ],
    ),
    (
        '.', // dot above
        &[
            ('a', 'ȧ'),
            ('c', 'ċ'),
            ('e', 'ė'),
            ('g', 'ġ'),
            ('o', 'ȯ'),
            ('z', 'ż'),
            ('A', 'Ȧ'),
            ('C', 'Ċ'),
            ('E', 'Ė'),
            ('G', 'Ġ'),
            ('I', 'İ'),
            ('O', 'Ȯ'),
            ('Z', 'Ż'),
        ],
    ),
    (
        'u', // breve
        &[
            ('a', 'ă'),
            ('e', 'ĕ'),
            ('g', 'ğ'),
            ('i', 'ĭ'),
            ('o', 'ŏ'),
            ('u', 'ŭ'),
            ('A', 'Ă'),
            ('E', 'Ĕ'),
            ('G', 'Ğ'),
            ('I', 'Ĭ'),
            ('O', 'Ŏ'),
            ('U', 'Ŭ'),
        ],
    ),
    (
        'v', // caron
        &[
            ('a', 'ǎ'),
            ('c', 'č'),
            ('d', 'ď'),
            ('e', 'ě'),
            ('g', 'ǧ'),
            ('i', 'ǐ'),
            ('l', 'ľ'),
            ('n', 'ň'),
            ('o', 'ǒ'),
            ('r', 'ř'),
            ('s', 'š'),
            ('t', 'ť'),
            ('u', 'ǔ'),
            ('z', 'ž'),
            ('A', 'Ǎ'),
            ('C', 'Č'),
            ('D', 'Ď'),
            ('E', 'Ě'),
            ('G', 'Ǧ'),
            ('I', 'Ǐ'),
            ('L', 'Ľ'),
            ('N', 'Ň'),
            ('O', 'Ǒ'),
            ('R', 'Ř'),
            ('S', 'Š'),
            ('T', 'Ť'),
            ('U', 'Ǔ'),
            ('Z', 'Ž'),
        ],
    ),
    (
        'H', // double acute
        &[('o', 'ő'), ('u', 'ű'), ('O', 'Ő'), ('U', 'Ű')],
    ),
    (
        'c', // cedilla
        &[
            ('c', 'ç'),
            ('g', 'ģ'),
            ('k', 'ķ'),
            ('l', 'ļ'),
            ('n', 'ņ'),
            ('r', 'ŗ'),
            ('s', 'ş'),
            ('t', 'ţ'),
            ('C', 'Ç'),
            ('G', 'Ģ'),
            ('K', 'Ķ'),
            ('L', 'Ļ'),
            ('N', 'Ņ'),
            ('R', 'Ŗ'),
            ('S', 'Ş'),
            ('T', 'Ţ'),
        ],
    ),
    (
        'k', // ogonek
        &[
            ('a', 'ą'),
            ('e', 'ę'),
            ('i', 'į'),
            ('o', 'ǫ'),
            ('u', 'ų'),
            ('A', 'Ą'),
            ('E', 'Ę'),
            ('I', 'Į'),
            ('O', 'Ǫ'),
            ('U', 'Ų'),
        ],
    ),
    (
        'r', // ring above
        &[('a', 'å'), ('u', 'ů'), ('A', 'Å'), ('U', 'Ů')],
    ),
];

static GREEK_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| GREEK_COMMANDS.iter().copied().collect());

static MATH_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| MATH_COMMANDS.iter().copied().collect());

static TEXT_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| TEXT_COMMANDS.iter().copied().collect());

static ACCENT_MAPS: LazyLock<HashMap<char, HashMap<char, char>>> = LazyLock::new(|| {
    ACCENT_TABLES
        .iter()
        .map(|(accent, table)| (*accent, table.iter().copied().collect()))
        .collect()
});

/// Reverse lookup from a Unicode character to its LaTeX escape.
///
/// Accented letters use the short unbraced form (`ü` ↦ `\"u`); ligatures
/// and letter-named commands are wrapped in a group (`ß` ↦ `{\ss}`) so a
/// following letter cannot merge into the command name. Literal braces
/// are excluded: a character-level escape cannot tell a literal brace
/// from a grouping one.
static REVERSE_MAP: LazyLock<HashMap<char, String>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (seq, replacement) in SPECIAL_SEQUENCES.iter() {
        // sequences ending in a letter cannot be emitted bare, a
        // following letter would merge into the command name
        if seq.ends_with(|chr: char| chr.is_ascii_alphabetic()) {
            continue;
        }
        let mut chars = replacement.chars();
        if let (Some(chr), None) = (chars.next(), chars.next()) {
            if chr == '{' || chr == '}' {
                continue;
            }
            map.entry(chr).or_insert_with(|| (*seq).to_string());
        }
    }
    for (accent, table) in ACCENT_TABLES.iter() {
        for (letter, accented) in table.iter() {
            map.entry(*accented)
                .or_insert_with(|| format!("\\{}{}", accent, letter));
        }
    }
    for (name, replacement) in SPECIAL_SEQUENCES
        .iter()
        .filter(|(seq, _)| seq.len() > 2 && seq.starts_with('\\'))
        .map(|(seq, replacement)| (&seq[1..], replacement))
        .chain(TEXT_COMMANDS.iter().map(|(n, r)| (*n, r)))
    {
        let mut chars = replacement.chars();
        if let (Some(chr), None) = (chars.next(), chars.next()) {
            map.entry(chr).or_insert_with(|| format!("{{\\{}}}", name));
        }
    }
    map
});

/// Is `chr` the name of one of the 13 accent commands?
pub(crate) fn is_accent_char(chr: char) -> bool {
    ACCENT_TABLES.iter().any(|(accent, _)| *accent == chr)
}

/// Resolve LaTeX markup in `input` to the closest Unicode representation.
///
/// Passes, in order: literal special sequences (longest first), Greek
/// letter and math symbol commands, accent commands in braced and
/// unbraced form, and finally removal of now-redundant `{}` groups.
/// Anything unrecognized survives unchanged; the function never fails.
///
/// ```
/// assert_eq!(bibscan::latex_to_unicode("G\\\"odel"), "Gödel");
/// ```
pub fn to_unicode(input: &str) -> String {
    let mut text = input.to_string();
    for (sequence, replacement) in SPECIAL_SEQUENCES.iter() {
        // escaped braces wait until the groups are gone, otherwise the
        // collapse pass would eat the literal characters they produce
        if *replacement == "{" || *replacement == "}" {
            continue;
        }
        if text.contains(sequence) {
            text = text.replace(sequence, replacement);
        }
    }
    text = replace_commands(&text);
    text = apply_accents(&text);
    let text = collapse_groups(&text);
    text.replace("\\{", "{").replace("\\}", "}")
}

/// Escape `input` character by character into LaTeX. Characters without
/// a reverse mapping (including Greek letters and math symbols) are
/// emitted unchanged.
pub fn to_latex(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for chr in input.chars() {
        match REVERSE_MAP.get(&chr) {
            Some(sequence) => result.push_str(sequence),
            None => result.push(chr),
        }
    }
    result
}

/// Replace `\name` commands whose full letter run matches a known Greek,
/// math or text command. `\alpha` converts, `\alphabet` does not.
fn replace_commands(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;
    while pos < chars.len() {
        if chars[pos] == '\\' && pos + 1 < chars.len() && chars[pos + 1].is_ascii_alphabetic() {
            let mut end = pos + 1;
            while end < chars.len() && chars[end].is_ascii_alphabetic() {
                end += 1;
            }
            let name: String = chars[pos + 1..end].iter().collect();
            let lookup = GREEK_MAP
                .get(name.as_str())
                .or_else(|| MATH_MAP.get(name.as_str()))
                .or_else(|| TEXT_MAP.get(name.as_str()));
            match lookup {
                Some(replacement) => result.push_str(replacement),
                None => {
                    result.push('\\');
                    result.push_str(&name);
                }
            }
            pos = end;
        } else {
            result.push(chars[pos]);
            pos += 1;
        }
    }
    result
}

/// Substitute accent commands, accepting both `\"{u}` and `\"u`.
/// A letter without an entry in the accent's table is left alone.
fn apply_accents(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;
    while pos < chars.len() {
        if chars[pos] == '\\' && pos + 1 < chars.len() {
            if let Some(table) = ACCENT_MAPS.get(&chars[pos + 1]) {
                // braced form \X{l}
                if pos + 4 < chars.len()
                    && chars[pos + 2] == '{'
                    && chars[pos + 4] == '}'
                {
                    if let Some(accented) = table.get(&chars[pos + 3]) {
                        result.push(*accented);
                        pos += 5;
                        continue;
                    }
                }
                // unbraced form \Xl
                if pos + 2 < chars.len() {
                    if let Some(accented) = table.get(&chars[pos + 2]) {
                        result.push(*accented);
                        pos += 3;
                        continue;
                    }
                }
            }
        }
        result.push(chars[pos]);
        pos += 1;
    }
    result
}

/// Delete empty `{}` groups and unwrap single-character `{X}` groups,
/// repeatedly, until a fixpoint is reached. A backslash escapes the
/// following character, so `\{` and `\}` never act as group delimiters.
fn collapse_groups(input: &str) -> String {
    let mut text = input.to_string();
    loop {
        let chars: Vec<char> = text.chars().collect();
        let mut result = String::with_capacity(text.len());
        let mut changed = false;
        let mut pos = 0;
        while pos < chars.len() {
            if chars[pos] == '\\' && pos + 1 < chars.len() {
                result.push(chars[pos]);
                result.push(chars[pos + 1]);
                pos += 2;
                continue;
            }
            if chars[pos] == '{' {
                if pos + 1 < chars.len() && chars[pos + 1] == '}' {
                    pos += 2;
                    changed = true;
                    continue;
                }
                if pos + 2 < chars.len()
                    && chars[pos + 2] == '}'
                    && chars[pos + 1] != '{'
                    && chars[pos + 1] != '}'
                    && chars[pos + 1] != '\\'
                {
                    result.push(chars[pos + 1]);
                    pos += 3;
                    changed = true;
                    continue;
                }
            }
            result.push(chars[pos]);
            pos += 1;
        }
        text = result;
        if !changed {
            return text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_commands() {
        assert_eq!(to_unicode("\\'e"), "é");
        assert_eq!(to_unicode("\\\"{o}"), "ö");
        assert_eq!(to_unicode("\\v{c}"), "č");
        assert_eq!(to_unicode("\\`a"), "à");
        assert_eq!(to_unicode("\\^{i}"), "î");
        assert_eq!(to_unicode("\\H{o}"), "ő");
        assert_eq!(to_unicode("\\c{c}"), "ç");
        assert_eq!(to_unicode("\\k{a}"), "ą");
        assert_eq!(to_unicode("\\r{u}"), "ů");
        assert_eq!(to_unicode("\\~n"), "ñ");
        assert_eq!(to_unicode("\\=a"), "ā");
        assert_eq!(to_unicode("\\.z"), "ż");
        assert_eq!(to_unicode("\\u{g}"), "ğ");
    }

    #[test]
    fn test_accent_in_word() {
        assert_eq!(to_unicode("M\\\"uller"), "Müller");
        assert_eq!(to_unicode("M{\\\"u}ller"), "Müller");
        assert_eq!(to_unicode("Dvo\\v{r}\\'ak"), "Dvořák");
    }

    #[test]
    fn test_unknown_accent_target_is_kept() {
        assert_eq!(to_unicode("\\'q"), "\\'q");
        // the accent stays, but group collapse still unwraps {q}
        assert_eq!(to_unicode("\\v{q}"), "\\vq");
    }

    #[test]
    fn test_dashes_longest_first() {
        assert_eq!(to_unicode("---"), "\u{2014}");
        assert_eq!(to_unicode("--"), "\u{2013}");
        assert_eq!(to_unicode("--- --"), "\u{2014} \u{2013}");
        assert_eq!(to_unicode("pages 3--7"), "pages 3\u{2013}7");
    }

    #[test]
    fn test_quotes_and_escaped_punctuation() {
        assert_eq!(to_unicode("``quoted''"), "\u{201C}quoted\u{201D}");
        assert_eq!(to_unicode("A \\& B, 5\\%"), "A & B, 5%");
        assert_eq!(to_unicode("\\$5 \\#2 a\\_b"), "$5 #2 a_b");
    }

    #[test]
    fn test_ligatures() {
        assert_eq!(to_unicode("Stra\\ss e"), "Straß e");
        assert_eq!(to_unicode("\\aa"), "å");
        assert_eq!(to_unicode("\\AE"), "Æ");
        assert_eq!(to_unicode("{\\oe}uvre"), "œuvre");
    }

    #[test]
    fn test_greek_letters() {
        assert_eq!(to_unicode("\\alpha"), "α");
        assert_eq!(to_unicode("\\Omega"), "Ω");
        assert_eq!(to_unicode("\\omega"), "ω");
        // exact command-name match only
        assert_eq!(to_unicode("\\alphabet"), "\\alphabet");
    }

    #[test]
    fn test_math_symbols() {
        assert_eq!(to_unicode("\\infty"), "∞");
        assert_eq!(to_unicode("\\leq"), "≤");
        assert_eq!(to_unicode("x \\to y"), "x → y");
    }

    #[test]
    fn test_single_letter_commands_do_not_fire_inside_longer_names() {
        assert_eq!(to_unicode("\\o"), "ø");
        assert_eq!(to_unicode("\\L"), "Ł");
        // \o must not fire inside \omega, \l not inside \leq
        assert_eq!(to_unicode("\\omega \\leq \\Omega"), "ω ≤ Ω");
    }

    #[test]
    fn test_unknown_command_passthrough() {
        let converted = to_unicode("\\unknowncommand");
        assert!(converted.contains("unknowncommand"));
        assert_eq!(to_unicode("\\relax foo"), "\\relax foo");
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(to_unicode("ends with \\"), "ends with \\");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_unicode(""), "");
        assert_eq!(to_latex(""), "");
    }

    #[test]
    fn test_escaped_braces_survive_group_collapse() {
        assert_eq!(to_unicode("\\{x\\}"), "{x}");
        assert_eq!(to_unicode("\\{\\alpha\\}"), "{α}");
        assert_eq!(to_unicode("see \\{ and \\}"), "see { and }");
    }

    #[test]
    fn test_group_collapse() {
        assert_eq!(to_unicode("{}"), "");
        assert_eq!(to_unicode("{X}"), "X");
        assert_eq!(to_unicode("{{X}}"), "X");
        assert_eq!(to_unicode("a{}b{c}d"), "abcd");
    }

    #[test]
    fn test_to_latex_accents() {
        assert_eq!(to_latex("Müller"), "M\\\"uller");
        assert_eq!(to_latex("é"), "\\'e");
        assert_eq!(to_latex("č"), "\\vc");
    }

    #[test]
    fn test_to_latex_specials() {
        assert_eq!(to_latex("A & B"), "A \\& B");
        assert_eq!(to_latex("—"), "---");
        assert_eq!(to_latex("–"), "--");
        assert_eq!(to_latex("ß"), "{\\ss}");
    }

    #[test]
    fn test_to_latex_has_no_greek_or_math_mapping() {
        assert_eq!(to_latex("α"), "α");
        assert_eq!(to_latex("∞"), "∞");
    }

    #[test]
    fn test_round_trip() {
        for text in ["Müller", "Gödel", "Dvořák", "å la carte", "miß — dash"] {
            assert_eq!(to_unicode(&to_latex(text)), text, "round trip of {text}");
        }
    }

    #[test]
    fn test_umlaut_round_trip_uses_unbraced_accent() {
        let latex = to_latex("Müller");
        assert_eq!(latex, "M\\\"uller");
        assert_eq!(to_unicode(&latex), "Müller");
    }
}
