//! Rivit CLI - Inspect the structure of Rivit documents
//!
//! Usage:
//!   rivit [OPTIONS] <COMMAND> <FILE>
//!
//! Commands:
//!   parse     Show the parsed line constructs
//!   stats     Show document statistics
//!   inline    Parse every input line as inline text

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rivit_core::{Document, Line, List, Style, StyledText};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "rivit", version, about = "Rivit document parser and inspector")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Show the full tree and enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse and display document structure
    Parse(InputArgs),
    /// Show document statistics
    Stats(InputArgs),
    /// Treat each input line as inline text and show its styled runs
    Inline(InputArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Input file, or `-` for stdin
    file: String,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Parse(args) => {
            let input = read_input(&args.file)?;
            let doc = rivit_core::parse(&input);
            if cli.json {
                println!("{}", to_json(&doc)?);
            } else if cli.verbose {
                print!("{}", render_tree(&doc));
            } else {
                print!("{}", render_summary(&doc));
            }
        }
        Command::Stats(args) => {
            let input = read_input(&args.file)?;
            let doc = rivit_core::parse(&input);
            let stats = DocumentStats::from_document(&doc, &input);
            if cli.json {
                let json = serde_json::to_string_pretty(&stats)
                    .context("failed to serialize statistics")?;
                println!("{}", json);
            } else {
                print!("{}", stats.render());
            }
        }
        Command::Inline(args) => {
            let input = read_input(&args.file)?;
            let parsed: Vec<Vec<StyledText>> = input
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(rivit_core::parse_inline)
                .collect();
            if cli.json {
                let runs: Vec<Vec<JsonRun>> = parsed.iter().map(|r| convert_runs(r)).collect();
                let json =
                    serde_json::to_string_pretty(&runs).context("failed to serialize runs")?;
                println!("{}", json);
            } else {
                for (i, runs) in parsed.iter().enumerate() {
                    println!("[{}]", i + 1);
                    for run in runs {
                        println!("  {}", describe_run(run));
                    }
                }
            }
        }
    }

    Ok(())
}

fn read_input(file: &str) -> Result<String> {
    let input = if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read '{}'", file))?
    };

    log::debug!("read {} bytes from {}", input.len(), file);
    Ok(input)
}

// =============================================================================
// Text Output
// =============================================================================

fn render_summary(doc: &Document) -> String {
    if doc.span.is_empty() {
        return String::from("Empty input\n");
    }

    let mut out = format!("Lines: {}\n", doc.len());
    for (i, line) in doc.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i + 1, describe_line(line)));
    }
    out
}

fn describe_line(line: &Line) -> String {
    match line {
        Line::Header(text) => format!("Header: {}", text),
        Line::NavLink(target) => format!("NavLink: {}", target),
        Line::Paragraph(runs) => format!("Paragraph ({} runs)", runs.len()),
        Line::Embed(embed) => format!("Embed (path: {})", embed.path),
        Line::Block(block) => format!(
            "Block (indent {}, {} lines)",
            block.indent,
            block.body.len()
        ),
        Line::List(list) => format!(
            "List ({} items, {} total, depth {})",
            list.len(),
            list.item_count(),
            list.depth()
        ),
    }
}

fn render_tree(doc: &Document) -> String {
    let mut out = String::from("=== Rivit Document ===\n");
    out.push_str(&format!(
        "Span: {}..{} ({} bytes)\n",
        doc.span.start,
        doc.span.end,
        doc.span.len()
    ));

    for (i, line) in doc.iter().enumerate() {
        out.push_str(&format!("\n[{}] {}\n", i + 1, line.kind()));
        match line {
            Line::Header(text) => out.push_str(&format!("  Text: {}\n", text)),
            Line::NavLink(target) => out.push_str(&format!("  Target: {}\n", target)),
            Line::Paragraph(runs) => {
                out.push_str(&format!("  Content: {}\n", format_runs(runs)));
            }
            Line::Embed(embed) => {
                out.push_str(&format!("  Path: {}\n", embed.path));
                if !embed.alt.is_empty() {
                    out.push_str(&format!("  Alt: {}\n", format_runs(&embed.alt)));
                }
            }
            Line::Block(block) => {
                out.push_str(&format!("  Indent: {}\n", block.indent));
                for body_line in &block.body {
                    out.push_str(&format!("  | {}\n", body_line));
                }
            }
            Line::List(list) => render_list(list, 1, &mut out),
        }
    }

    out
}

fn render_list(list: &List, depth: usize, out: &mut String) {
    let prefix = "  ".repeat(depth);
    for item in list {
        out.push_str(&format!(
            "{}{} {}\n",
            prefix,
            "-".repeat(item.level),
            format_runs(&item.value)
        ));
        render_list(&item.sublist, depth + 1, out);
    }
}

/// Write runs back in Rivit inline syntax.
fn format_runs(runs: &[StyledText]) -> String {
    let mut result = String::new();
    for run in runs {
        match run.style {
            Style::None => result.push_str(&run.value),
            Style::Italic => {
                result.push('*');
                result.push_str(&run.value);
                result.push('*');
            }
            Style::Bold => {
                result.push_str("**");
                result.push_str(&run.value);
                result.push_str("**");
            }
            Style::Mono => {
                result.push('`');
                result.push_str(&run.value);
                result.push('`');
            }
            Style::InternalLink | Style::ExternalLink => {
                let (open, close) = if run.style == Style::InternalLink {
                    ('{', '}')
                } else {
                    ('[', ']')
                };
                result.push(open);
                result.push_str(&run.link);
                if !run.value.is_empty() {
                    result.push(' ');
                    result.push_str(&run.value);
                }
                result.push(close);
            }
        }
    }
    result
}

fn describe_run(run: &StyledText) -> String {
    if run.is_link() {
        format!("{}: {:?} -> {}", run.style, run.display_text(), run.link)
    } else {
        format!("{}: {:?}", run.style, run.value)
    }
}

// =============================================================================
// Stats Command
// =============================================================================

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
struct DocumentStats {
    lines: usize,
    headers: usize,
    nav_links: usize,
    paragraphs: usize,
    embeds: usize,
    blocks: usize,
    lists: usize,
    list_items: usize,
    max_list_depth: usize,
    runs: RunStats,
    bytes: usize,
    source_lines: usize,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
struct RunStats {
    plain: usize,
    italic: usize,
    bold: usize,
    mono: usize,
    internal_links: usize,
    external_links: usize,
}

impl RunStats {
    fn count(&mut self, runs: &[StyledText]) {
        for run in runs {
            match run.style {
                Style::None => self.plain += 1,
                Style::Italic => self.italic += 1,
                Style::Bold => self.bold += 1,
                Style::Mono => self.mono += 1,
                Style::InternalLink => self.internal_links += 1,
                Style::ExternalLink => self.external_links += 1,
            }
        }
    }
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            lines: doc.len(),
            bytes: doc.span.len(),
            source_lines: input.lines().count(),
            ..Self::default()
        };

        for line in doc {
            match line {
                Line::Header(_) => stats.headers += 1,
                Line::NavLink(_) => stats.nav_links += 1,
                Line::Paragraph(runs) => {
                    stats.paragraphs += 1;
                    stats.runs.count(runs);
                }
                Line::Embed(embed) => {
                    stats.embeds += 1;
                    stats.runs.count(&embed.alt);
                }
                Line::Block(_) => stats.blocks += 1,
                Line::List(list) => {
                    stats.lists += 1;
                    stats.list_items += list.item_count();
                    stats.max_list_depth = stats.max_list_depth.max(list.depth());
                    stats.count_list_runs(list);
                }
            }
        }

        stats
    }

    fn count_list_runs(&mut self, list: &List) {
        for item in list {
            self.runs.count(&item.value);
            self.count_list_runs(&item.sublist);
        }
    }

    fn render(&self) -> String {
        format!(
            "Document Statistics
-------------------
Content:
  Total lines:    {}
  Headers:        {}
  Nav links:      {}
  Paragraphs:     {}
  Embeds:         {}
  Blocks:         {}
  Lists:          {}
  List items:     {}
  Max list depth: {}

Inline runs:
  Plain:          {}
  Italic:         {}
  Bold:           {}
  Mono:           {}
  Internal links: {}
  External links: {}

Size:
  Bytes:          {}
  Source lines:   {}
",
            self.lines,
            self.headers,
            self.nav_links,
            self.paragraphs,
            self.embeds,
            self.blocks,
            self.lists,
            self.list_items,
            self.max_list_depth,
            self.runs.plain,
            self.runs.italic,
            self.runs.bold,
            self.runs.mono,
            self.runs.internal_links,
            self.runs.external_links,
            self.bytes,
            self.source_lines,
        )
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonDocument<'a> {
    lines: Vec<JsonLine<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonLine<'a> {
    Header { text: &'a str },
    NavLink { target: &'a str },
    Paragraph { content: Vec<JsonRun<'a>> },
    Embed { path: &'a str, alt: Vec<JsonRun<'a>> },
    Block { indent: usize, body: &'a [String] },
    List { items: Vec<JsonItem<'a>> },
}

#[derive(Serialize)]
struct JsonItem<'a> {
    level: usize,
    value: Vec<JsonRun<'a>>,
    sublist: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonRun<'a> {
    style: &'static str,
    value: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    link: &'a str,
}

fn is_empty(s: &&str) -> bool {
    s.is_empty()
}

fn to_json(doc: &Document) -> Result<String> {
    let json_doc = JsonDocument {
        lines: doc.iter().map(convert_line).collect(),
    };
    serde_json::to_string_pretty(&json_doc).context("failed to serialize document")
}

fn convert_line(line: &Line) -> JsonLine<'_> {
    match line {
        Line::Header(text) => JsonLine::Header { text },
        Line::NavLink(target) => JsonLine::NavLink { target },
        Line::Paragraph(runs) => JsonLine::Paragraph {
            content: convert_runs(runs),
        },
        Line::Embed(embed) => JsonLine::Embed {
            path: &embed.path,
            alt: convert_runs(&embed.alt),
        },
        Line::Block(block) => JsonLine::Block {
            indent: block.indent,
            body: &block.body,
        },
        Line::List(list) => JsonLine::List {
            items: convert_list(list),
        },
    }
}

fn convert_list(list: &List) -> Vec<JsonItem<'_>> {
    list.iter()
        .map(|item| JsonItem {
            level: item.level,
            value: convert_runs(&item.value),
            sublist: convert_list(&item.sublist),
        })
        .collect()
}

fn convert_runs(runs: &[StyledText]) -> Vec<JsonRun<'_>> {
    runs.iter()
        .map(|run| JsonRun {
            style: run.style.as_str(),
            value: &run.value,
            link: &run.link,
        })
        .collect()
}
