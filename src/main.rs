//! formbox - show a form described in JSON and print the answer
//!
//! The result is printed to stdout as
//! `{"status": "ok"|"cancel"|"close", "form_elements": {...}}`
//! once the terminal has been restored.

use anyhow::{bail, Context, Result};
use clap::Parser;
use formbox::{FormConfig, FormDescription};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "formbox", version, about = "Show a modal terminal form described in JSON")]
struct Cli {
    /// Form description as a JSON string
    json: Option<String>,

    /// Read the form description from a file ("-" for stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Window title, overriding the description's window_title
    #[arg(long)]
    title: Option<String>,

    /// Frame width in cells (defaults to the terminal width)
    #[arg(long, requires = "height")]
    width: Option<u16>,

    /// Frame height in cells (defaults to the terminal height)
    #[arg(long, requires = "width")]
    height: Option<u16>,

    /// Layout and theme settings as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file; nothing is logged without it
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(cli: &Cli) -> Result<()> {
    // The form owns the tty, so logs only ever go to a file
    let Some(path) = cli.log_file.as_ref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn read_description(cli: &Cli) -> Result<FormDescription> {
    let description = match (&cli.file, &cli.json) {
        (Some(path), _) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading form description from stdin")?;
            FormDescription::parse(&text)
        }
        (Some(path), _) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            FormDescription::from_reader(file)
        }
        (None, Some(json)) => FormDescription::parse(json),
        (None, None) => bail!("a JSON form description or --file is required"),
    };
    description.context("parsing form description")
}

fn load_config(cli: &Cli) -> Result<FormConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            FormConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => FormConfig::default(),
    };
    if let (Some(width), Some(height)) = (cli.width, cli.height) {
        config.frame_size = Some((width, height));
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;
    let builder = read_description(&cli)?
        .into_builder(cli.title.clone(), config)
        .context("building form")?;
    tracing::info!(title = builder.title(), elements = builder.elements().len(), "starting form");

    let result = builder.show().context("running form")?;
    println!("{}", result.to_json_pretty()?);
    Ok(())
}
