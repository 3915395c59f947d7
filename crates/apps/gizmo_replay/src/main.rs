use std::fs;
use std::path::PathBuf;

use clap::Parser;
use editor::EditorConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod script;

use script::{Script, replay};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a pointer script against the globe object editor")]
struct Args {
    /// Script file (JSON)
    #[arg(long)]
    script: PathBuf,

    /// Editor config file (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let script: Script = serde_json::from_str(&fs::read_to_string(&args.script)?)?;
    let config = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => EditorConfig::default(),
    };
    info!(script = %args.script.display(), steps = script.steps.len(), "loaded script");

    let report = replay(&script, &config)?;
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");

    Ok(())
}
