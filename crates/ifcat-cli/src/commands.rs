//! Command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::{debug, warn};

use ifcat_ident::FormatRegistry;
use ifcat_skein::Skein;

use crate::cli::{IdentArgs, SkeinDemoArgs};

/// Outcome of an `ident` run.
pub struct IdentSummary {
    pub scanned: usize,
    pub identified: usize,
}

/// Identify every requested file, printing one `<id>\t<path>` line per
/// file (`-` when unidentified).
pub fn run_ident(args: &IdentArgs) -> Result<IdentSummary> {
    let registry = FormatRegistry::new();
    let mut files = Vec::new();
    for path in &args.paths {
        collect_files(path, args.recursive, &mut files)?;
    }
    debug!(files = files.len(), "scanning");

    let mut summary = IdentSummary {
        scanned: 0,
        identified: 0,
    };
    for file in files {
        summary.scanned += 1;
        match registry.identify(&file) {
            Some(id) => {
                summary.identified += 1;
                println!("{id}\t{}", file.display());
            }
            None => println!("-\t{}", file.display()),
        }
    }
    debug!(
        scanned = summary.scanned,
        identified = summary.identified,
        "scan complete"
    );
    Ok(summary)
}

fn collect_files(path: &Path, recursive: bool, out: &mut Vec<PathBuf>) -> Result<()> {
    let metadata = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    if metadata.is_dir() {
        if !recursive {
            warn!(path = %path.display(), "skipping directory (use --recursive)");
            return Ok(());
        }
        let mut entries: Vec<PathBuf> = fs::read_dir(path)
            .with_context(|| format!("read directory {}", path.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort();
        for entry in entries {
            collect_files(&entry, recursive, out)?;
        }
    } else {
        out.push(path.to_path_buf());
    }
    Ok(())
}

/// List every registered story-file format.
pub fn run_formats() -> Result<()> {
    let registry = FormatRegistry::new();
    let mut table = Table::new();
    table.set_header(vec!["Format", "Extensions"]);
    apply_table_style(&mut table);
    for format in registry.formats() {
        table.add_row(vec![
            format.name().to_string(),
            format.extensions().join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Emit the canonical XML for a small recorded session.
pub fn run_skein_demo(args: &SkeinDemoArgs) -> Result<()> {
    let skein = demo_session();
    let document = skein.xml_data().context("serialize skein")?;
    match &args.output {
        Some(path) => fs::write(path, &document)
            .with_context(|| format!("write {}", path.display()))?,
        None => print!("{document}"),
    }
    Ok(())
}

fn demo_session() -> Skein {
    let mut skein = Skein::new();
    skein.output_text("The Cellar\nYou can just make out a trapdoor overhead.\n");
    skein.waiting_for_input();
    skein.input_command("look");
    skein.output_text("Stone walls, a dirt floor, and darkness in every corner.\n");
    skein.waiting_for_input();
    skein.input_command("go up");
    skein.output_text("The trapdoor is locked from the other side.\n");
    skein.waiting_for_input();
    skein.interpreter_restart();
    skein.input_command("look");
    skein.output_text("Stone walls, a dirt floor, and darkness in every corner.\n");
    skein.waiting_for_input();
    skein.input_command("shout");
    skein.output_text("Your voice echoes. Nobody answers.\n");
    skein.waiting_for_input();
    skein
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_session_shape() {
        let skein = demo_session();
        // root, look, go up, shout
        assert_eq!(skein.root().subtree_size(), 4);
        let look = skein.root().child_with_command("look").unwrap();
        assert!(!look.changed());
        assert_eq!(skein.root().children().len(), 2);
    }

    #[test]
    fn collect_files_skips_directories_without_recursive() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.taf"), b"x").unwrap();
        let mut out = Vec::new();
        collect_files(dir.path(), false, &mut out).unwrap();
        assert!(out.is_empty());

        collect_files(dir.path(), true, &mut out).unwrap();
        assert_eq!(out.len(), 1);
    }
}
