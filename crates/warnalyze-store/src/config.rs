//! warnalyze configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use warnalyze_core::bank::QuestionBank;
use warnalyze_core::engine::EngineConfig;
use warnalyze_core::scoring::UnknownQuestionPolicy;

use crate::json_file::JsonFileRepository;

/// Name of the per-directory config file.
pub const CONFIG_FILE: &str = "warnalyze.toml";

/// Environment variable that overrides `store_path`.
pub const STORE_ENV: &str = "WARNALYZE_STORE";

/// Institution details printed on reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_institution")]
    pub institution: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub city: Option<String>,
}

fn default_institution() -> String {
    "Digital Health Screening Platform".to_string()
}
fn default_title() -> String {
    "Color Vision Screening Report".to_string()
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            institution: default_institution(),
            title: default_title(),
            city: None,
        }
    }
}

/// Top-level warnalyze configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarnalyzeConfig {
    /// JSON store file.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Custom plate bank; the built-in 24-plate bank when absent.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
    /// `drop` or `reject` answers for plates that are not in the bank.
    #[serde(default)]
    pub unknown_question_policy: UnknownQuestionPolicy,
    /// Plates drawn per session (whole bank when absent).
    #[serde(default)]
    pub questions_per_session: Option<usize>,
    /// Shuffle answer options within each plate.
    #[serde(default)]
    pub shuffle_options: bool,
    #[serde(default)]
    pub report: ReportSettings,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./warnalyze-data/store.json")
}

impl Default for WarnalyzeConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            question_bank: None,
            unknown_question_policy: UnknownQuestionPolicy::default(),
            questions_per_session: None,
            shuffle_options: false,
            report: ReportSettings::default(),
        }
    }
}

impl WarnalyzeConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            unknown_question_policy: self.unknown_question_policy,
            questions_per_session: self.questions_per_session,
            shuffle_options: self.shuffle_options,
        }
    }

    /// Load the configured plate bank, or the built-in one.
    pub fn load_bank(&self) -> Result<QuestionBank> {
        match &self.question_bank {
            Some(path) => QuestionBank::load(path),
            None => QuestionBank::builtin(),
        }
    }

    pub async fn open_store(&self) -> Result<JsonFileRepository> {
        JsonFileRepository::open(&self.store_path).await
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `warnalyze.toml` in the current directory
/// 2. `~/.config/warnalyze/config.toml`
///
/// `WARNALYZE_STORE` overrides the store path.
pub fn load_config_from(path: Option<&Path>) -> Result<WarnalyzeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<WarnalyzeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => WarnalyzeConfig::default(),
    };

    if let Ok(store) = std::env::var(STORE_ENV) {
        if !store.trim().is_empty() {
            config.store_path = PathBuf::from(store);
        }
    }

    config.store_path = resolve_path(&config.store_path);
    config.question_bank = config.question_bank.as_deref().map(resolve_path);

    tracing::debug!(
        source = ?config_path,
        store = %config.store_path.display(),
        "loaded configuration"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("warnalyze"))
}
