//! The `crossdown` binary.

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crossdown::{
    format_html_with_plugins, format_xml_with_plugins, parse_document, Arena, Options,
    ParseOptions, Plugins, RenderOptions,
};

#[cfg(feature = "syntect")]
use crossdown::plugins::syntect::{SyntectAdapter, SyntectAdapterBuilder};
#[cfg(feature = "syntect")]
use syntect::highlighting::ThemeSet;

/// Render CrossDown documents to HTML or XML.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// The CrossDown file(s) to parse; or standard input if none passed.
    files: Vec<PathBuf>,

    /// Write output to FILE instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Specify the output format.
    #[arg(long, value_enum, default_value = "html")]
    format: Format,

    /// Treat newlines in paragraphs as hard line breaks.
    #[arg(long)]
    hardbreaks: bool,

    /// Use GitHub-style `<pre lang>` for code blocks.
    #[arg(long)]
    github_pre_lang: bool,

    /// Include source position attributes in the output.
    #[arg(long)]
    sourcepos: bool,

    /// Highlight fenced code blocks using the given syntect theme.  Pass an
    /// empty string to disable highlighting.
    #[cfg(feature = "syntect")]
    #[arg(long, value_name = "THEME", default_value = "base16-ocean.dark")]
    syntax_highlighting: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Xml,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut input = String::new();
    if cli.files.is_empty() {
        io::stdin().read_to_string(&mut input)?;
    } else {
        for file in &cli.files {
            let mut f = fs::File::open(file)?;
            f.read_to_string(&mut input)?;
        }
    }

    let options = Options {
        parse: ParseOptions::default(),
        render: RenderOptions {
            hardbreaks: cli.hardbreaks,
            github_pre_lang: cli.github_pre_lang,
            sourcepos: cli.sourcepos,
        },
    };

    #[cfg(feature = "syntect")]
    let adapter: Option<SyntectAdapter> = match cli.syntax_highlighting.as_str() {
        "" => None,
        theme => {
            let theme_set = ThemeSet::load_defaults();
            if !theme_set.themes.contains_key(theme) {
                return Err(format!("unknown syntax highlighting theme: {}", theme).into());
            }
            Some(
                SyntectAdapterBuilder::new()
                    .theme(theme)
                    .theme_set(theme_set)
                    .build(),
            )
        }
    };

    #[cfg(feature = "syntect")]
    let plugins = {
        let mut plugins = Plugins::default();
        if let Some(ref adapter) = adapter {
            plugins.render.codefence_syntax_highlighter = Some(adapter);
        }
        plugins
    };
    #[cfg(not(feature = "syntect"))]
    let plugins = Plugins::default();

    let arena = Arena::new();
    let root = parse_document(&arena, &input, &options);

    let mut formatted = String::new();
    match cli.format {
        Format::Html => format_html_with_plugins(root, &options, &mut formatted, &plugins)?,
        Format::Xml => format_xml_with_plugins(root, &options, &mut formatted, &plugins)?,
    };

    match cli.output {
        None => io::stdout().write_all(formatted.as_bytes())?,
        Some(path) => fs::write(path, &formatted)?,
    };

    Ok(())
}
