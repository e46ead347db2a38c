use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the per-project config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "kindred.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub pagerank: PageRankSettings,
    #[serde(default)]
    pub eigenvector: EigenvectorSettings,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub nodes: Option<PathBuf>,
    #[serde(default)]
    pub edges: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRankSettings {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_pagerank_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_pagerank_max_iter(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EigenvectorSettings {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_eigen_max_iter")]
    pub max_iter: usize,
}

impl Default for EigenvectorSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iter: default_eigen_max_iter(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub normalized: bool,
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            normalized: false,
            output: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    /// `pretty`, `text`, or `json`; `None` defers to TTY detection.
    pub resolved_output: Option<String>,
}

/// Load `kindred.toml` from `path`, or defaults when the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the user-level config from `<config_dir>/kindred/config.toml`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("kindred/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve project + user config and the output mode.
///
/// `config_path` overrides the default `./kindred.toml`.
///
/// # Errors
///
/// Returns an error if either config file is malformed.
pub fn resolve_config(working_dir: &Path, config_path: Option<&Path>) -> Result<EffectiveConfig> {
    let project_path = config_path.map_or_else(|| working_dir.join(PROJECT_CONFIG_FILE), Path::to_path_buf);
    let project = load_project_config(&project_path)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        env_format.as_deref(),
        project.report.output.as_deref(),
        user.output.as_deref(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    env_format: Option<&str>,
    project_output: Option<&str>,
    user_output: Option<&str>,
) -> Option<String> {
    [env_format, project_output, user_output]
        .into_iter()
        .flatten()
        .find_map(normalize_output_mode)
        .map(str::to_string)
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_pagerank_max_iter() -> usize {
    100
}

const fn default_eigen_max_iter() -> usize {
    1000
}

const fn default_top_n() -> usize {
    10
}
