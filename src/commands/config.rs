use anyhow::Result;
use owo_colors::OwoColorize;
use rotaview_core::config::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let config_path = AppConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Schedule:   {}", config.schedule_path().display());
    println!(
        "  Overrides:  {}",
        config
            .overrides_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );

    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
