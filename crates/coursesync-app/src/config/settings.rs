//! Settings parser for .coursesync/config.toml

use super::types::Settings;
use coursesync_core::prelude::*;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_DIR: &str = ".coursesync";

/// Load settings from `.coursesync/config.toml`
///
/// A missing file yields defaults; an unreadable or invalid file is logged and
/// also yields defaults.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(CONFIG_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create a default config file in the .coursesync/ directory
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let config_dir = project_path.join(CONFIG_DIR);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .map_err(|e| Error::config(format!("Failed to create .coursesync dir: {}", e)))?;
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# coursesync configuration

[server]
base_url = "http://localhost:8000/"
request_timeout_secs = 30   # 0 = no timeout

[behavior]
notify_success = true       # Failures are always reported
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}
