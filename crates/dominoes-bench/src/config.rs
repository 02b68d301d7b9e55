use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_TARGET_SCORE: u32 = 200;
const DEFAULT_MAX_ATTEMPTS: usize = 10_000;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root benchmark configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchConfig {
    pub run_id: String,
    pub series: SeriesConfig,
    pub agents: Vec<AgentConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let cfg: BenchConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.series.validate()?;
        self.outputs.validate(&self.run_id)?;
        validate_agents(&self.agents)?;
        Ok(())
    }

    /// Resolve output templates (`{run_id}` placeholders) into paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Series scheduling block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeriesConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_target_score")]
    pub target_score: u32,
}

impl SeriesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "series.count".to_string(),
                message: "number of series must be greater than zero".to_string(),
            });
        }
        if self.target_score == 0 {
            return Err(ValidationError::InvalidField {
                field: "series.target_score".to_string(),
                message: "target score must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}

/// One seat's move-ordering strategy; agents are listed in seat order
/// North, East, South, West.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub kind: AgentKind,
    /// Moves that must be in the history before search-backed kinds
    /// activate.
    #[serde(default)]
    pub start_move: usize,
    /// Sampled deals per decision for `sampled_lookahead`; omit for
    /// exhaustive enumeration.
    #[serde(default)]
    pub samples: Option<usize>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Identity,
    Shuffle,
    Reverse,
    HeaviestFirst,
    DoublesFirst,
    Omniscient,
    SampledLookahead,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_agents(agents: &[AgentConfig]) -> Result<(), ValidationError> {
    if agents.len() != 4 {
        return Err(ValidationError::InvalidField {
            field: "agents".to_string(),
            message: format!("exactly four agents are required (one per seat), got {}", agents.len()),
        });
    }

    let mut seen = HashSet::new();
    for agent in agents {
        if agent.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "agents.name".to_string(),
                message: "agent name must not be empty".to_string(),
            });
        }

        if !seen.insert(agent.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "agents".to_string(),
                message: format!("agent name '{}' defined more than once", agent.name),
            });
        }

        if matches!(agent.kind, AgentKind::SampledLookahead) {
            if agent.samples == Some(0) {
                return Err(ValidationError::InvalidField {
                    field: format!("agents[{}].samples", agent.name),
                    message: "sample count must be greater than zero (omit for exhaustive)"
                        .to_string(),
                });
            }
            if agent.max_attempts == 0 {
                return Err(ValidationError::InvalidField {
                    field: format!("agents[{}].max_attempts", agent.name),
                    message: "sampling attempt budget must be greater than zero".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "smoke_4x100"
series:
  seed: 123
  count: 8
  target_score: 100
agents:
  - name: "plain"
    kind: "identity"
  - name: "heavy"
    kind: "heaviest_first"
  - name: "seer"
    kind: "omniscient"
    start_move: 12
  - name: "guesser"
    kind: "sampled_lookahead"
    start_move: 14
    samples: 25
outputs:
  jsonl: "bench/out/{run_id}/games.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let cfg: BenchConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.series.target_score, 100);
        assert_eq!(cfg.agents[2].start_move, 12);
        assert_eq!(cfg.agents[3].samples, Some(25));
        assert_eq!(cfg.agents[3].max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("bench/out/smoke_4x100/games.jsonl")
        );
    }

    #[test]
    fn target_score_defaults_when_omitted() {
        let yaml = BASIC_YAML.replace("  target_score: 100\n", "");
        let cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(cfg.series.target_score, DEFAULT_TARGET_SCORE);
    }

    #[test]
    fn rejects_wrong_agent_count() {
        let yaml = BASIC_YAML.replace(
            "  - name: \"plain\"\n    kind: \"identity\"\n",
            "",
        );
        let cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("three agents should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "agents"
        ));
    }

    #[test]
    fn rejects_duplicate_agent_names() {
        let yaml = BASIC_YAML.replace("name: \"heavy\"", "name: \"plain\"");
        let cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("duplicate names should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "agents"
        ));
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("smoke_4x100", "smoke 4x100");
        let cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn rejects_zero_samples() {
        let yaml = BASIC_YAML.replace("samples: 25", "samples: 0");
        let cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("zero samples should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "agents[guesser].samples"
        ));
    }

    #[test]
    fn rejects_zero_series() {
        let yaml = BASIC_YAML.replace("count: 8", "count: 0");
        let cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("zero series should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "series.count"
        ));
    }
}
