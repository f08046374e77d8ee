use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "homeboard.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "homeboard", about = "Staff home board: student roster and roll taking")]
pub struct CliArgs {
    /// Base URL of the roster service.
    #[arg(long)]
    pub server_url: Option<String>,
    /// Path to a TOML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
    /// tracing env-filter directive, e.g. `info` or `desktop_gui=debug`.
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:4001".to_string(),
            request_timeout_secs: 15,
            log_filter: "info".to_string(),
        }
    }
}

impl StartupConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("homeboard").join(CONFIG_FILE_NAME))
}

/// Defaults, then the config file, then environment, then CLI flags.
pub fn load_startup_config(args: &CliArgs) -> anyhow::Result<StartupConfig> {
    let mut settings = StartupConfig::default();

    match &args.config {
        Some(path) => apply_file(&mut settings, path)?,
        None => {
            if let Some(path) = default_config_path().filter(|path| path.exists()) {
                apply_file(&mut settings, &path)?;
            }
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    apply_args(&mut settings, args);

    settings.server_url = normalize_server_url(&settings.server_url);
    Ok(settings)
}

fn apply_file(settings: &mut StartupConfig, path: &Path) -> anyhow::Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    let file_cfg: FileConfig = toml::from_str(&raw)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;

    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut StartupConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("HOMEBOARD_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
}

fn apply_args(settings: &mut StartupConfig, args: &CliArgs) {
    if let Some(v) = &args.server_url {
        settings.server_url = v.clone();
    }
    if let Some(v) = args.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = &args.log_filter {
        settings.log_filter = v.clone();
    }
}

pub fn normalize_server_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return StartupConfig::default().server_url;
    }
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
