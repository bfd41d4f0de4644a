use super::load_document;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use scrivener_document::{Document, Paragraph};
use std::fmt::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Document to inspect (.json or plain text)
    pub document: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let document = load_document(&args.document)?;
    print_document(&document, &args.format)
}

pub fn print_document(document: &Document, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(document)?),
        "text" => {
            let mut out = String::new();
            write_document(&mut out, document)?;
            print!("{}", out);
        }
        other => anyhow::bail!("Unknown output format: {}. Use: text or json", other),
    }
    Ok(())
}

/// One line per paragraph, section boundaries as rules
pub fn write_document(out: &mut impl fmt::Write, document: &Document) -> fmt::Result {
    for (index, paragraph) in document.paragraphs.iter().enumerate() {
        if document.sections.iter().any(|s| s.start == index) {
            writeln!(out, "{} section", "──".dimmed())?;
        }
        writeln!(
            out,
            "{:>3} {:<10} {}",
            index,
            paragraph.kind().tag().cyan(),
            visible(paragraph.text())
        )?;
        for markup in paragraph.markups() {
            writeln!(
                out,
                "              {} {}..{}{}",
                markup.kind.tag().yellow(),
                markup.start,
                markup.end,
                markup
                    .attrs
                    .iter()
                    .map(|(k, v)| format!(" {}={:?}", k, v))
                    .collect::<String>()
            )?;
        }
    }
    if document.paragraphs.iter().all(Paragraph::is_blank) {
        writeln!(out, "    {}", "(empty document)".dimmed())?;
    }
    Ok(())
}

/// Show soft breaks and non-breaking spaces, which are invisible in a terminal
fn visible(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\n' => "⏎".to_string(),
            '\u{00A0}' => "·".to_string(),
            other => other.to_string(),
        })
        .collect()
}
