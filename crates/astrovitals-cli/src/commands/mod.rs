pub mod config;
pub mod forecast;
pub mod monitor;
pub mod run;

use astrovitals_core::{DashboardConfig, Result};

/// Build the effective config: file (or defaults), then CLI overrides.
pub fn resolve_config(
    path: Option<&str>,
    seed: Option<u64>,
    fps: Option<u32>,
) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(p) => DashboardConfig::load(p)?,
        None => DashboardConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(fps) = fps {
        config.timing.fps = fps;
    }
    config.validate()?;
    Ok(config)
}

/// Like [`resolve_config`], but reports the error and exits.
pub fn load_config(path: Option<&str>, seed: Option<u64>, fps: Option<u32>) -> DashboardConfig {
    resolve_config(path, seed, fps).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}
