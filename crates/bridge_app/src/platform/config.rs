use std::path::PathBuf;

use bridge_core::DEFAULT_BACKEND_URL;
use bridge_engine::DispatchSettings;

use super::logging::LogDestination;

const CONFIG_DIR_ENV: &str = "BRIDGE_CONFIG_DIR";
const LOG_ENV: &str = "BRIDGE_LOG";
const APP_DIR_NAME: &str = "backend_bridge";

/// Runtime settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_backend_url: String,
    pub storage_dir: PathBuf,
    pub log_destination: LogDestination,
    pub dispatch: DispatchSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from),
            std::env::var(LOG_ENV).ok().as_deref(),
        )
    }

    fn resolve(storage_override: Option<PathBuf>, log: Option<&str>) -> Self {
        let log_destination = match log {
            Some(raw) => LogDestination::parse(raw).unwrap_or_else(|| {
                eprintln!("Warning: unknown {} value {:?}, logging to terminal", LOG_ENV, raw);
                LogDestination::default()
            }),
            None => LogDestination::default(),
        };

        Self {
            default_backend_url: DEFAULT_BACKEND_URL.to_string(),
            storage_dir: storage_override
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(default_storage_dir),
            log_destination,
            dispatch: DispatchSettings::default(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
