use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use console::style;
use cvsift_core::{BatchParseResult, ParsedResume, ParserConfig, ResumeParser};

use crate::export;

const STDIN: &str = "-";

pub fn run(config: &ParserConfig, paths: &[PathBuf], out: Option<&Path>, compact: bool) -> Result<()> {
    let parser = ResumeParser::new(config);
    let batch = if paths.len() == 1 && paths[0].as_path() == Path::new(STDIN) {
        parse_stdin(&parser)?
    } else {
        parser.parse_batch(paths)
    };

    for record in &batch.successful {
        print_summary(record);
    }
    for (path, e) in &batch.failed {
        eprintln!("{} {}: {e}", style("✗").red(), path);
    }

    match out {
        Some(dir) => {
            let manifest = export::export_batch(dir, &batch, compact)?;
            eprintln!(
                "{} Wrote {} files to {}",
                style("●").green(),
                export::written_files(dir, &manifest).len(),
                dir.display()
            );
        }
        None => println!("{}", export::to_json(&batch.successful, compact)?),
    }

    if !batch.is_complete() {
        bail!(
            "{} of {} documents could not be parsed",
            batch.failure_count(),
            batch.failure_count() + batch.success_count()
        );
    }
    Ok(())
}

fn parse_stdin(parser: &ResumeParser) -> Result<BatchParseResult> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;

    let mut batch = BatchParseResult::new();
    batch.successful.push(parser.parse_text(STDIN, &text));
    Ok(batch)
}

fn print_summary(record: &ParsedResume) {
    let name = record.name.as_deref().unwrap_or("(no name)");
    eprintln!(
        "{} {} {}",
        style("✓").green(),
        style(name).bold(),
        style(&record.source_path).dim()
    );
    eprintln!(
        "  Email: {}  Phone: {}",
        record.email.as_deref().unwrap_or("-"),
        record.phone.as_deref().unwrap_or("-")
    );
    if record.skills.is_empty() {
        eprintln!("  Skills: -");
    } else {
        let skills: Vec<&str> = record.skills.iter().map(String::as_str).collect();
        eprintln!("  Skills: {}", skills.join(", "));
    }
    eprintln!(
        "  Education: {}  Experience: {}",
        record.education.len(),
        record.experience.len()
    );
}
