use std::path::Path;

use chrono::Local;
use clap::Args;
use lettergate_core::gate::{evaluate, parse_unlock_instant};
use serde_json::json;

use super::{load_config, local_wall_time, resolve_now};

#[derive(Args)]
pub struct CountdownArgs {
    /// Unlock date (YYYY-MM-DD)
    date: String,
    /// Evaluate at this local time instead of now (YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    now: Option<String>,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CountdownArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let labels = config.letters.gate_labels();
    let now = resolve_now(args.now.as_deref())?;

    let unlock_at = parse_unlock_instant(&args.date, &Local);
    let gate = unlock_at.map(|at| evaluate(at, now));
    let status_text = gate.as_ref().map(|g| labels.status_text(g));

    if args.json {
        let out = json!({
            "date": args.date,
            "now": now.with_timezone(&Local),
            "unlock_at": unlock_at.map(|at| at.with_timezone(&Local)),
            "gate": gate,
            "status_text": status_text,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match (unlock_at, status_text) {
        (Some(at), Some(text)) => {
            println!("{text}");
            println!("unlocks at {}", local_wall_time(at));
        }
        _ => println!("'{}' is not a YYYY-MM-DD date; never gated", args.date),
    }
    Ok(())
}
