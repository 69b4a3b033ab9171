use std::error;
use std::fs;

use bibscan::{tokenize, ParseOptions, Parser, TokenKind};

use clap;
use clap::Parser as CLIParser;

#[cfg(not(feature = "serde_json"))]
#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Filepath to file to parse
    #[clap(short, long)]
    input: String,

    /// Return only entries with this citation key
    #[clap(short, long)]
    query_key: Option<String>,

    /// Dump the token stream instead of parsed entries
    #[clap(long)]
    tokens: bool,

    /// Keep LaTeX escapes in field values instead of converting to Unicode
    #[clap(long)]
    keep_latex: bool,
}

#[cfg(feature = "serde_json")]
#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Filepath to file to parse
    #[clap(short, long)]
    input: String,

    /// Return only entries with this citation key
    #[clap(short, long)]
    query_key: Option<String>,

    /// Dump the token stream instead of parsed entries
    #[clap(long)]
    tokens: bool,

    /// Keep LaTeX escapes in field values instead of converting to Unicode
    #[clap(long)]
    keep_latex: bool,

    #[clap(long)]
    json: bool,
}

fn options_from(s: &Settings) -> ParseOptions {
    ParseOptions {
        convert_latex_to_unicode: !s.keep_latex,
        ..ParseOptions::default()
    }
}

fn print_tokens(s: &Settings) -> Result<(), Box<dyn error::Error>> {
    let src = fs::read_to_string(&s.input)?;
    for token in tokenize(&src) {
        if token.kind == TokenKind::Whitespace {
            continue;
        }
        println!(
            "{:4}..{:<4} {:?}\t{}",
            token.range.start, token.range.end, token.kind, token.text
        );
    }
    Ok(())
}

fn print_human_readable(s: &Settings) -> Result<(), Box<dyn error::Error>> {
    let p = Parser::from_file(&s.input)?.with_options(options_from(s));
    for entry in p.parse()? {
        if let Some(query) = &s.query_key {
            if query != &entry.citation_key {
                continue;
            }
        }
        println!("type = {}", entry.entry_type);
        println!("key  = {}", entry.citation_key);
        for (name, data) in entry.fields.iter() {
            println!("\t{}\t= {}", name, data);
        }
    }

    Ok(())
}

#[cfg(feature = "serde_json")]
fn print_json(s: &Settings) -> Result<(), Box<dyn error::Error>> {
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize)]
    struct Entry {
        entry_type: String,
        citation_key: String,
        fields: HashMap<String, String>,
    }

    #[derive(Serialize, Deserialize)]
    struct Entries {
        data: Vec<Entry>,
    }

    let p = Parser::from_file(&s.input)?.with_options(options_from(s));
    let mut json_entries = Entries { data: Vec::new() };
    for entry in p.parse()? {
        if let Some(query) = &s.query_key {
            if query != &entry.citation_key {
                continue;
            }
        }

        json_entries.data.push(Entry {
            entry_type: entry.entry_type.name().to_string(),
            citation_key: entry.citation_key.clone(),
            fields: entry.fields.clone(),
        });
    }

    println!("{}", serde_json::to_string(&json_entries)?);

    Ok(())
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let settings = Settings::parse();

    if settings.tokens {
        return print_tokens(&settings);
    }

    #[cfg(feature = "serde_json")]
    {
        if settings.json {
            return print_json(&settings);
        }
    }

    print_human_readable(&settings)
}
