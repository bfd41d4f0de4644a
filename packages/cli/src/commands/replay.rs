use super::inspect::print_document;
use super::load_document;
use super::script::{check_script, parse_script, Instruction};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use scrivener_document::{Fragment, Paragraph};
use scrivener_editor::{
    Command, CommandOutcome, Editor, EditorConfig, MemorySurface, Notification, Space, Surface,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Document to edit (.json or plain text)
    pub document: PathBuf,

    /// Script with one editing instruction per line
    #[arg(short, long)]
    pub script: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn replay(args: ReplayArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd).context("Cannot load scrivener.config.json")?;
    let document = load_document(&args.document)?;

    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let instructions = parse_script(&source)?;
    check_script(&instructions)?;

    let surface = MemorySurface::from_document(&document);
    let mut editor = Editor::new(document, surface, &config)?;

    info!(
        instructions = instructions.len(),
        undo_limit = config.undo_limit,
        "Replaying script"
    );
    let cuts = run_script(&mut editor, &instructions)?;

    for text in &cuts {
        println!("{} {:?}", "cut:".yellow().bold(), text);
    }
    print_document(&editor.document(), &args.format)
}

/// Run instructions in order; each line becomes its own undo step
pub fn run_script<S: Surface>(
    editor: &mut Editor<S>,
    instructions: &[Instruction],
) -> Result<Vec<String>> {
    let mut cuts = Vec::new();

    for (n, instruction) in instructions.iter().enumerate() {
        match instruction {
            Instruction::Select(selection) => editor
                .view_mut()
                .set_selection(*selection)
                .with_context(|| format!("instruction {}: select {}", n + 1, selection))?,
            Instruction::Run(command) => {
                let outcome = editor
                    .execute(command)
                    .with_context(|| format!("instruction {}: {}", n + 1, command.name()))?;
                if let CommandOutcome::Cut(text) = outcome {
                    cuts.push(text);
                }
            }
            Instruction::Type(text) => type_text(editor, text)
                .with_context(|| format!("instruction {}: type", n + 1))?,
            Instruction::Undo => {
                if !editor.undo()? {
                    warn!(instruction = n + 1, "Nothing to undo");
                }
            }
            Instruction::Redo => {
                if !editor.redo()? {
                    warn!(instruction = n + 1, "Nothing to redo");
                }
            }
        }
        editor.commit_history();
        editor.tick(Instant::now())?;

        for notification in editor.view_mut().drain_notifications() {
            match notification {
                Notification::Error { kind, message } => {
                    warn!(?kind, %message, "Editor reported an error")
                }
                other => debug!(?other, "Notification"),
            }
        }
    }
    Ok(cuts)
}

/// Words go in as pastes, the spaces between them through `spacebar.auto`
fn type_text<S: Surface>(editor: &mut Editor<S>, text: &str) -> Result<()> {
    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            editor.execute(&Command::Space(Space::Auto))?;
        }
        if !word.is_empty() {
            let fragment = Fragment::new(vec![Paragraph::new(word)]);
            editor.execute(&Command::Paste(fragment))?;
        }
    }
    Ok(())
}
