use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use mdpage::Config;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Pdf,
    Svg,
    Typst,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Svg => "svg",
            Format::Typst => "typ",
        }
    }
}

#[derive(Parser)]
#[command(name = "mdpage")]
#[command(about = "Convert Markdown files to paginated documents")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output file (defaults to input name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file (defaults to the bundled config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };

    let markdown = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension(cli.format.extension()));

    match cli.format {
        Format::Pdf => {
            let pdf_bytes = mdpage::markdown_to_pdf_with_config(&markdown, &config)?;
            write(&output, pdf_bytes)?;
        }
        Format::Typst => {
            let markup = mdpage::markdown_to_typst_with_config(&markdown, &config)?;
            write(&output, markup)?;
        }
        Format::Svg => {
            let doc = mdpage::markdown_to_svg_with_config(&markdown, &config)?;
            log::info!(
                "{} pages at {}x{}pt",
                doc.pages.len(),
                doc.width_pt,
                doc.height_pt
            );
            if doc.pages.len() == 1 {
                write(&output, &doc.pages[0])?;
            } else {
                for (i, page) in doc.pages.iter().enumerate() {
                    write(&page_path(&output, i + 1), page)?;
                }
            }
        }
    }

    Ok(())
}

fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// `out.svg` -> `out-3.svg`
fn page_path(output: &Path, page: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{stem}-{page}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{page}"),
    };
    output.with_file_name(name)
}
