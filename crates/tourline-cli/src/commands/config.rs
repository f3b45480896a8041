use anyhow::Result;

use tourline_core::AppConfig;

/// Print the effective configuration, optionally writing the defaults first
pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if init {
        if path.exists() {
            println!("Config file already exists: {}", path.display());
        } else {
            AppConfig::default().save()?;
            println!("Wrote default config to {}", path.display());
        }
        println!();
    }

    let source = if path.exists() {
        path.display().to_string()
    } else {
        "(built-in defaults)".to_string()
    };
    println!("# Source: {}", source);
    println!("# Log file: {}", config.log_path().display());
    println!();
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
