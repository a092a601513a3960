use crate::error::Result;
use crate::model::{Report, ReportOutput};
use crate::observer::Observer;
use console::style;
use log::Level;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the plain-text report to `path`, replacing any existing file.
pub fn write_report(report: &Report, path: &Path, observer: &dyn Observer) -> Result<()> {
    observer.log(Level::Info, &format!("Saving report to {}...", path.display()));
    let mut out = BufWriter::new(File::create(path)?);
    render_text(report, &mut out)?;
    out.flush()?;
    observer.log(
        Level::Info,
        &format!("Report successfully saved to {}", path.display()),
    );
    Ok(())
}

pub fn render_text<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    for (project, commits) in report.iter() {
        writeln!(out, "Project: {project}")?;
        for commit in commits {
            writeln!(out, "  - Author: {}", commit.author)?;
            writeln!(out, "    Message: {}", commit.message.trim_end_matches('\n'))?;
            writeln!(out, "    Date: {}", commit.date)?;
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json(output: &ReportOutput, path: &Path, observer: &dyn Observer) -> Result<()> {
    observer.log(Level::Info, &format!("Saving report to {}...", path.display()));
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, output)?;
    writeln!(out)?;
    out.flush()?;
    observer.log(
        Level::Info,
        &format!("Report successfully saved to {}", path.display()),
    );
    Ok(())
}

pub fn output_summary(report: &Report, path: &Path) {
    if report.is_empty() {
        println!("{}", style("No matching commits found").yellow());
    } else {
        println!(
            "Projects: {}, commits: {}",
            style(report.len()).cyan(),
            style(report.commit_count()).cyan()
        );
    }
    println!("Report written to {}", style(path.display()).bold());
}
