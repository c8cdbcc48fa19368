//! Command line front end: prints FIRST and FOLLOW sets of a grammar.

use std::{
    fs,
    io::{self, BufRead},
};

use anyhow::{bail, Context, Result};
use clap::{App, Arg};
use grammar_first_follow::{AnalysisError, Grammar};
use log::{debug, LevelFilter};

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn main() -> Result<()> {
    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Computes FIRST and FOLLOW sets of a context-free grammar.")
        .arg(
            Arg::with_name("latex")
                .short("l")
                .long("latex")
                .help("Print in LaTeX format"),
        )
        .arg(
            Arg::with_name("json")
                .short("j")
                .long("json")
                .help("Print in JSON format")
                .conflicts_with("latex"),
        )
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::with_name("ARGS")
                .help(
                    "Outputs to print (prod, first, follow, ff; default ff) followed by an \
                     optional grammar file. Rules are read from stdin up to the first blank \
                     line if no file is given",
                )
                .multiple(true),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbosity") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let output_format = if matches.is_present("latex") {
        OutputFormat::LaTeX
    } else if matches.is_present("json") {
        OutputFormat::JSON
    } else {
        OutputFormat::Plain
    };
    let args: Vec<&str> = matches
        .values_of("ARGS")
        .map(|values| values.collect())
        .unwrap_or_default();
    let (outputs, grammar_file) = split_args(&args)?;

    let lines: Vec<String> = match grammar_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read grammar file {}", path))?
            .lines()
            .map(|l| l.to_string())
            .collect(),
        None => read_rules(io::stdin().lock())?,
    };
    debug!("Read {} grammar lines", lines.len());

    let g = Grammar::from_lines(&lines)?;
    let analysis = g.analyze().map_err(AnalysisError::from)?;

    for output in outputs {
        let text = match output {
            "prod" => {
                let t = g.to_production_output_vec();
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json()?,
                }
            }
            "first" | "follow" => {
                let t = if output == "first" {
                    g.to_first_output_vec(&analysis.first)
                } else {
                    g.to_follow_output_vec(&analysis.follow)
                };
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json()?,
                }
            }
            _ => {
                let t = g.to_first_follow_output_vec(&analysis);
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json()?,
                }
            }
        };
        println!("{}", text);
    }

    Ok(())
}

const OUTPUTS: [&str; 4] = ["prod", "first", "follow", "ff"];

/// Split the positional arguments into the leading output names and an
/// optional grammar file. Without any output name, `ff` is printed.
fn split_args<'a>(args: &[&'a str]) -> Result<(Vec<&'a str>, Option<&'a str>)> {
    let n = args.iter().take_while(|a| OUTPUTS.contains(*a)).count();
    let mut outputs = args[..n].to_vec();
    if outputs.is_empty() {
        outputs.push("ff");
    }
    match &args[n..] {
        [] => Ok((outputs, None)),
        [file] => Ok((outputs, Some(*file))),
        [_, extra, ..] => bail!(
            "Unexpected argument '{}'; outputs must come before the grammar file",
            extra
        ),
    }
}

/// Collect rule lines until the first blank line or the end of input.
fn read_rules(input: impl BufRead) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in input.lines() {
        let line = line.context("Failed to read grammar from stdin")?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{read_rules, split_args};

    #[test]
    fn rules_end_at_first_blank_line() {
        let lines = read_rules(Cursor::new("S -> a\n\nT -> b\n")).unwrap();
        assert_eq!(lines, vec!["S -> a"]);
    }

    #[test]
    fn whitespace_only_line_ends_rules() {
        let lines = read_rules(Cursor::new("S -> a T\nT -> b\n  \t \nU -> c\n")).unwrap();
        assert_eq!(lines, vec!["S -> a T", "T -> b"]);
    }

    #[test]
    fn rules_end_at_eof() {
        let lines = read_rules(Cursor::new("S -> a\nT -> b")).unwrap();
        assert_eq!(lines, vec!["S -> a", "T -> b"]);
        assert!(read_rules(Cursor::new("")).unwrap().is_empty());
    }

    #[test]
    fn outputs_then_grammar_file() {
        let (outputs, file) = split_args(&["first", "follow", "g.txt"]).unwrap();
        assert_eq!(outputs, vec!["first", "follow"]);
        assert_eq!(file, Some("g.txt"));
    }

    #[test]
    fn outputs_without_grammar_file() {
        let (outputs, file) = split_args(&["prod", "ff"]).unwrap();
        assert_eq!(outputs, vec!["prod", "ff"]);
        assert_eq!(file, None);
    }

    #[test]
    fn default_output() {
        let (outputs, file) = split_args(&["g.txt"]).unwrap();
        assert_eq!(outputs, vec!["ff"]);
        assert_eq!(file, Some("g.txt"));

        let (outputs, file) = split_args(&[]).unwrap();
        assert_eq!(outputs, vec!["ff"]);
        assert_eq!(file, None);
    }

    #[test]
    fn output_after_grammar_file_is_rejected() {
        assert!(split_args(&["first", "g.txt", "follow"]).is_err());
    }
}
