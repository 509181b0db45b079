use std::path::Path;

use anyhow::Result;
use console::style;
use cvsift_core::{Capability, ParserConfig, ResumeParser};

pub fn run_text(config: &ParserConfig, path: &Path) -> Result<()> {
    let parser = ResumeParser::new(config);
    println!("{}", parser.load(path)?);
    Ok(())
}

pub fn run_sections(config: &ParserConfig, path: &Path) -> Result<()> {
    let parser = ResumeParser::new(config);
    for section in parser.sections(path)? {
        println!("{}", style(format!("[{}]", section.heading)).bold());
        println!("{}", section.content);
        println!();
    }
    Ok(())
}

pub fn run_entities(config: &ParserConfig, path: &Path) -> Result<()> {
    let parser = ResumeParser::new(config);
    let capability = parser.recognizer().capability();
    let analysis = parser.analyze(path)?;

    let mode = match capability {
        Capability::Full => "full",
        Capability::TokenizeOnly => "tokenize_only",
    };
    eprintln!(
        "{} Recognizer: {mode} ({} sentences, {} entities)",
        style("●").blue(),
        analysis.sentences.len(),
        analysis.entities.len()
    );

    for entity in &analysis.entities {
        println!("{}\t{}", entity.label, entity.text);
    }
    Ok(())
}
