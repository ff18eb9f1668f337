use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;
use lettergate_core::{LetterStatus, Manifest};

use super::{load_config, local_wall_time, resolve_now};

#[derive(Args)]
pub struct ScheduleArgs {
    /// Letter manifest (TOML, one [[letter]] table per letter)
    #[arg(long)]
    manifest: PathBuf,
    /// Evaluate at this local time instead of now (YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    now: Option<String>,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ScheduleArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let now = resolve_now(args.now.as_deref())?;

    let content = std::fs::read_to_string(&args.manifest)
        .map_err(|e| format!("cannot read {}: {e}", args.manifest.display()))?;
    let manifest = Manifest::from_toml_str(&content)?;
    let statuses = manifest.evaluate(now, &Local, &config.letters.gate_labels());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for status in &statuses {
        println!("{}", render(status));
    }
    match manifest.next_unlock(now, &Local) {
        Some((letter, at)) => println!("next: {} at {}", letter.template, local_wall_time(at)),
        None => println!("next: nothing left to unlock"),
    }
    Ok(())
}

fn render(status: &LetterStatus) -> String {
    let name = match &status.title {
        Some(title) => format!("{} ({title})", status.template),
        None => status.template.clone(),
    };
    match (&status.status_text, &status.unlock_date) {
        (Some(text), _) => format!("{name}: {text}"),
        (None, Some(raw)) => format!("{name}: not gated (unrecognized date '{raw}')"),
        (None, None) => format!("{name}: not gated"),
    }
}
