use std::path::Path;

use clap::Subcommand;
use lettergate_core::Config;

use super::load_config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "letters.unlocked_label", "music.volume")
        key: String,
    },
    /// Set a config value and write it back to --config
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config keys
    Keys,
    /// Print the full configuration as TOML
    Show,
    /// Write the default configuration to --config
    Init,
}

pub fn run(action: ConfigAction, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let path = path.ok_or("config set needs --config <FILE>")?;
            let mut config = load_config(Some(path))?;
            config.set(&key, &value)?;
            config.save_to(path)?;
            println!("ok");
        }
        ConfigAction::Keys => {
            for key in load_config(path)?.keys() {
                println!("{key}");
            }
        }
        ConfigAction::Show => {
            print!("{}", load_config(path)?.to_toml_string()?);
        }
        ConfigAction::Init => {
            let path = path.ok_or("config init needs --config <FILE>")?;
            if path.exists() {
                return Err(format!("{} already exists", path.display()).into());
            }
            Config::default().save_to(path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
