use std::{
    env,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;
use log::{debug, trace};

use crate::types::{CheckResult, ReferenceKind, ResolvedDependency, Warning};

/// Relativize a root-relative path to the current working directory for clickable links
fn relativize_to_cwd(root: &Path, relative_to_root: &str) -> String {
    let Ok(cwd) = env::current_dir() else {
        debug!("Failed to get current directory");
        return relative_to_root.to_string();
    };
    match make_relative(&root.join(relative_to_root), &cwd) {
        Some(rel_path) => {
            let result = rel_path.to_string_lossy().to_string();
            trace!("Relativized '{}' to '{}'", relative_to_root, result);
            result
        }
        None => relative_to_root.to_string(),
    }
}

/// Create a relative path from `base` to `target`. Returns `None` when the two paths do
/// not share a root.
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();

    if target.first() != base.first() {
        return None;
    }
    let common = target.iter().zip(&base).take_while(|(t, b)| t == b).count();

    let mut result = PathBuf::new();
    for _ in &base[common..] {
        result.push("..");
    }
    for component in &target[common..] {
        match component {
            Component::Normal(p) => result.push(p),
            Component::ParentDir => result.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

fn describe(dep: &ResolvedDependency) -> String {
    match dep.kind {
        ReferenceKind::Local => match &dep.resolved_path {
            Some(path) => format!("{} {} {}", dep.source, "→".dimmed(), path.dimmed()),
            None => format!("{} {}", dep.source.red(), "(missing)".red().bold()),
        },
        ReferenceKind::External => format!("{} {}", dep.source, "(external)".dimmed()),
        ReferenceKind::Fragment => format!("{} {}", dep.source, "(fragment)".dimmed()),
        ReferenceKind::Empty => format!("{} {}", "url()".yellow(), "(empty)".dimmed()),
    }
}

pub fn print_dependency_tree<W: Write>(
    writer: &mut W,
    result: &CheckResult,
    include_external: bool,
) -> io::Result<()> {
    debug!("Printing dependency tree for {} files", result.files.len());

    for report in &result.files {
        let shown: Vec<&ResolvedDependency> = report
            .dependencies
            .iter()
            .filter(|d| include_external || d.kind == ReferenceKind::Local)
            .collect();
        trace!(
            "File {} shows {} of {} references",
            report.file,
            shown.len(),
            report.dependencies.len()
        );

        let display_path = relativize_to_cwd(&result.root, &report.file);
        writeln!(
            writer,
            "{} ({} dependencies)",
            display_path.bright_white().bold(),
            shown.len().to_string().cyan()
        )?;

        for (idx, dep) in shown.iter().enumerate() {
            let prefix = if idx == shown.len() - 1 { "└──" } else { "├──" };
            writeln!(writer, "{}  {}", prefix.dimmed(), describe(dep))?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn print_no_issues_message<W: Write>(writer: &mut W, files_analyzed: usize) -> io::Result<()> {
    debug!("No dependency issues detected");
    writeln!(
        writer,
        "{} All stylesheet dependencies resolved ({} files)",
        "✓".green().bold(),
        files_analyzed
    )?;
    writer.flush()?;
    Ok(())
}

pub fn print_warnings<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Printing {} warnings", result.warnings.len());
    writeln!(writer, "{} Stylesheet dependency issues detected\n", "⚠".yellow().bold())?;

    // Warnings arrive sorted by file, so each file is one consecutive run
    for group in result.warnings.chunk_by(|a, b| a.from_file() == b.from_file()) {
        let display_path = relativize_to_cwd(&result.root, group[0].from_file());
        writeln!(writer, "{}", display_path.bright_white().bold())?;

        for (idx, warning) in group.iter().enumerate() {
            let prefix = if idx == group.len() - 1 { "└──" } else { "├──" };
            let line = match warning {
                Warning::Missing { source, .. } => {
                    format!("{} {}", source, "not found".red())
                }
                Warning::MalformedImport { message, .. } => message.red().to_string(),
                Warning::Unreadable { message, .. } => message.red().to_string(),
            };
            writeln!(writer, "{}  {}", prefix.dimmed(), line)?;
        }
        writeln!(writer)?;
    }

    print_summary(writer, &result.warnings)?;
    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, warnings: &[Warning]) -> io::Result<()> {
    let missing = warnings.iter().filter(|w| matches!(w, Warning::Missing { .. })).count();
    let malformed =
        warnings.iter().filter(|w| matches!(w, Warning::MalformedImport { .. })).count();
    let unreadable = warnings.iter().filter(|w| matches!(w, Warning::Unreadable { .. })).count();

    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Missing dependencies: {}", missing.to_string().yellow().bold())?;
    writeln!(writer, "  Malformed @import rules: {}", malformed.to_string().yellow().bold())?;
    if unreadable > 0 {
        writeln!(writer, "  Unreadable files: {}", unreadable.to_string().red().bold())?;
    }
    Ok(())
}

pub fn print_json<W: Write>(writer: &mut W, result: &CheckResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
