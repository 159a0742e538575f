use clap::Subcommand;
use fitstreak_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dot-separated key
    Get { key: String },
    /// Set a value by dot-separated key and persist
    Set { key: String, value: String },
    /// Print the full configuration as TOML
    List,
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown configuration key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
