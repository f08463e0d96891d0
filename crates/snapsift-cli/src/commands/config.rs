use clap::Subcommand;
use snapsift_core::ComboConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file
    Init,
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = ComboConfig::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            let config = ComboConfig::default();
            config.save()?;
            println!("wrote {}", ComboConfig::path()?.display());
        }
        ConfigAction::Path => {
            println!("{}", ComboConfig::path()?.display());
        }
    }
    Ok(())
}
