//! Replay script parsing
//!
//! One instruction per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! select 0:5            # caret
//! select 0:2-1:3        # range (anchor-focus, may run backwards)
//! backspace             # any named command
//! paste Hello world     # paste plain text (`\n\n` separates paragraphs)
//! type more words       # words pasted, spaces via spacebar.auto
//! undo
//! redo
//! ```

use anyhow::{anyhow, bail, Context, Result};
use scrivener_document::{Fragment, Position, Selection};
use scrivener_editor::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Select(Selection),
    Run(Command),
    Type(String),
    Undo,
    Redo,
}

pub fn parse_script(source: &str) -> Result<Vec<Instruction>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(n, line)| parse_line(line).with_context(|| format!("line {}: {}", n + 1, line.trim())))
        .collect()
}

fn parse_line(line: &str) -> Result<Instruction> {
    let line = line.trim_start();
    let (word, rest) = match line.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim_end(), ""),
    };

    match word {
        "select" => parse_selection(rest.trim()).map(Instruction::Select),
        "paste" => {
            let text = unescape(rest);
            Ok(Instruction::Run(Command::Paste(Fragment::from_plain_text(&text))))
        }
        "type" => Ok(Instruction::Type(unescape(rest))),
        "undo" => Ok(Instruction::Undo),
        "redo" => Ok(Instruction::Redo),
        name => Ok(Instruction::Run(Command::from_name(name)?)),
    }
}

fn parse_selection(text: &str) -> Result<Selection> {
    match text.split_once('-') {
        Some((start, end)) => Ok(Selection::new(parse_position(start)?, parse_position(end)?)),
        None => Ok(Selection::collapsed_at(parse_position(text)?)),
    }
}

fn parse_position(text: &str) -> Result<Position> {
    let (paragraph, offset) = text
        .trim()
        .split_once(':')
        .ok_or_else(|| anyhow!("expected PARAGRAPH:OFFSET, got {:?}", text))?;
    let paragraph = paragraph.parse().context("bad paragraph index")?;
    let offset = offset.parse().context("bad offset")?;
    Ok(Position::new(paragraph, offset))
}

/// Expand `\n` and `\\` escapes
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// An empty script is almost certainly the wrong file
pub fn check_script(instructions: &[Instruction]) -> Result<()> {
    if instructions.is_empty() {
        bail!("script has no instructions");
    }
    Ok(())
}
