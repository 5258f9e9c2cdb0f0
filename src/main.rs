//! tagtree - render JSON document descriptions to HTML

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagtree::{SerializeConfig, Serializer, json};

#[derive(Parser)]
#[command(name = "tagtree")]
#[command(version, about = "Render JSON document descriptions to HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    tagtree page.json page.html       Render page.json to page.html
    tagtree --no-doctype < frag.json  Render a fragment from stdin to stdout")]
struct Cli {
    /// Input JSON description (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output HTML file (writes stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Do not emit <!DOCTYPE html>
    #[arg(long)]
    no_doctype: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match render(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn render(cli: &Cli) -> tagtree::Result<()> {
    let node = match &cli.input {
        Some(path) => json::from_reader(BufReader::new(File::open(path)?))?,
        None => json::from_reader(io::stdin().lock())?,
    };

    let serializer = Serializer::new().with_config(SerializeConfig {
        prepend_doctype: !cli.no_doctype,
        ..Default::default()
    });

    match &cli.output {
        Some(path) => serializer.write_to(&node, File::create(path)?)?,
        None => serializer.write_to(&node, io::stdout().lock())?,
    }
    Ok(())
}
