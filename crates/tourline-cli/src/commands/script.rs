use anyhow::Result;
use serde::Serialize;

use tourline_core::script::default_tour;
use tourline_core::{AppConfig, Script, Viewport};

use crate::ScriptFormat;

/// TOML has no top-level arrays, so the script is wrapped in a table
#[derive(Serialize)]
struct ScriptFile<'a> {
    actions: &'a Script,
}

/// Print the built-in tour, laid out for an 80x24 viewport
pub fn run(config: &AppConfig, format: ScriptFormat) -> Result<()> {
    let script = default_tour(Viewport::new(80.0, 24.0));

    let output = match format {
        ScriptFormat::Json => serde_json::to_string_pretty(&script)?,
        ScriptFormat::Toml => toml::to_string_pretty(&ScriptFile { actions: &script })?,
    };
    println!("{}", output);

    let total: u64 = script
        .iter()
        .map(|action| action.duration(&config.tour).as_millis() as u64)
        .sum();
    eprintln!(
        "{} actions, about {:.1}s of scripted time before grace delays",
        script.len(),
        total as f64 / 1000.0
    );

    Ok(())
}
