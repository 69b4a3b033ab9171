//! This crate reads `.bib` files in pure, safe rust.
//!
//! `.bib` files are popular in reference management since many resources
//! allow to export metadata in a BibTeχ or BibLaTeχ file. One entry
//! in such a file can look like this:
//!
//! ```tex
//! @book{DBLP:books/aw/Knuth73a,
//!     author    = {Donald E. Knuth},
//!     title     = {The Art of Computer Programming, Volume {I:} Fundamental Algorithms,
//!                  2nd Edition},
//!     publisher = {Addison-Wesley},
//!     year      = {1973},
//!     url       = {https://www.worldcat.org/oclc/310903895},
//!     isbn      = {0201038218},
//!  }
//! ```
//!
//! In this example, we call `book` the entry type and
//! `DBLP:books/aw/Knuth73a` the citation key. Then we have a sequence of
//! fields with a name (like `year`) and a value (like `1973`). The formal
//! grammar is not well-specified, but the
//! [biblatex package documentation](https://ctan.ebinger.cc/tex-archive/macros/latex/contrib/biblatex/doc/biblatex.pdf)
//! and [Tame the BeaST](https://ftp.rrze.uni-erlangen.de/ctan/info/bibtex/tamethebeast/ttb_en.pdf)
//! provide some insights.
//!
//! The crate offers two independent scanners over that grammar:
//!
//! * [`parse`] reads the whole input into structured [`ParsedEntry`]
//!   records, resolving LaTeX escapes in field values along the way
//!   (configurable through [`ParseOptions`]);
//! * [`tokenize`] produces a flat, positioned [`Token`] stream whose
//!   concatenated text reproduces the input exactly, which is what a
//!   syntax highlighter needs.
//!
//! ```rust
//! use bibscan::{parse, ParseOptions};
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let src = r#"@book{tolkien1937, author = {J. R. R. Tolkien}, year = {1937}}"#;
//!     for entry in parse(src, &ParseOptions::default())? {
//!         println!("type = {}", entry.entry_type);
//!         println!("key  = {}", entry.citation_key);
//!         for (name, data) in entry.fields.iter() {
//!             println!("\t{}\t= {}", name, data);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Since field values often carry TeΧ-like markup, the conversion behind
//! the [`ParseOptions::convert_latex_to_unicode`] option is also exposed
//! directly as [`latex_to_unicode`] and its partial inverse
//! [`unicode_to_latex`]:
//!
//! ```rust
//! assert_eq!(bibscan::latex_to_unicode("Dvo\\v{r}\\'ak"), "Dvořák");
//! assert_eq!(bibscan::unicode_to_latex("Müller"), "M\\\"uller");
//! ```
//!
//! The entire source string is kept in memory and parsed at once; there
//! is no streaming mode.

mod errors;
mod latex;
mod parser;
mod token;
mod types;

pub use crate::errors::ParseError;
pub use crate::latex::to_latex as unicode_to_latex;
pub use crate::latex::to_unicode as latex_to_unicode;
pub use crate::parser::{parse, parse_or_none, Parser};
pub use crate::token::{is_known_command, tokenize, Token, TokenContext, TokenKind, KNOWN_COMMANDS};
pub use crate::types::{EntryType, ParseOptions, ParsedEntry};
