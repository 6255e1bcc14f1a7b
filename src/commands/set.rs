use agenda_core::preferences::{ENABLE_CLICK_EVENT, NUM_DAYS, Scope, USE_24_HOUR};
use anyhow::{Context, Result};
use clap::ValueEnum;

use super::Workspace;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SettingKey {
    /// Show times as 13:00 instead of 1:00 PM
    #[value(name = "use-24-hour")]
    Use24Hour,
    /// How many days ahead the agenda shows
    NumDays,
    /// Whether `agenda open` opens events
    EnableClickEvent,
}

pub fn run(key: SettingKey, value: &str) -> Result<()> {
    let mut ws = Workspace::load()?;
    let scope = Scope::Global;

    match key {
        SettingKey::Use24Hour => ws.prefs.set_bool(&scope, USE_24_HOUR, parse_bool(value)?),
        SettingKey::EnableClickEvent => {
            ws.prefs.set_bool(&scope, ENABLE_CLICK_EVENT, parse_bool(value)?)
        }
        SettingKey::NumDays => {
            value
                .parse::<u32>()
                .with_context(|| format!("Invalid number of days '{}'", value))?;
            ws.prefs.set_string(&scope, NUM_DAYS, value);
        }
    }

    ws.prefs.save()?;
    println!("Saved to {}", ws.prefs.path().display());
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => anyhow::bail!("Expected true or false, got '{}'", value),
    }
}
