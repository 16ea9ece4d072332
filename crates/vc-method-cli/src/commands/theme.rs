use clap::Args;
use serde_json::{json, Value};

use crate::config::store::KeyValueStore;
use crate::config::{self, DisplayConfig};

/// Arguments for showing or changing the display theme
#[derive(Args, Debug)]
pub struct ThemeArgs {
    /// Switch to the dark palette
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,

    /// Switch to the light palette
    #[arg(long)]
    pub light: bool,
}

/// Print the stored theme, or persist a new one. The new theme takes effect on
/// the next invocation; the running process keeps the configuration it started with.
pub fn run_theme(
    args: ThemeArgs,
    store: &dyn KeyValueStore,
) -> Result<Value, Box<dyn std::error::Error>> {
    let requested = match (args.dark, args.light) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    let (current, saved) = match requested {
        Some(dark_mode) => {
            let updated = DisplayConfig { dark_mode };
            updated.save(store)?;
            (updated, true)
        }
        None => (DisplayConfig::load(store)?, false),
    };

    Ok(json!({
        "theme": current.theme_name(),
        "dark_mode": current.dark_mode,
        "saved": saved,
        "active_theme": config::get().theme_name(),
    }))
}
