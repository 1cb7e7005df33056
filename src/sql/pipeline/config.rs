//! Processing configuration system for token pipelines
//!
//! This module defines named configurations that specify:
//! 1. Which token filters run in front of the target (raw stream, or hints removed)
//! 2. What the pipeline produces (statements, comment-stripped text, canonical text, or
//!    the first token)
//!
//! Configurations are plain data and can be loaded from JSON:
//!
//!     [{"name": "canonical", "description": "...", "filter": "raw",
//!       "target": {"kind": "canonical"}}]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named configuration specifying filters and target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub filter: FilterSpec,
    pub target: TargetSpec,
}

/// Which token filters to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterSpec {
    /// Tokens exactly as lexed
    #[default]
    Raw,

    /// `@{...}` hint blocks removed
    StripHints,
}

/// What to produce from the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TargetSpec {
    /// Statement texts with offsets, optionally with comments stripped from each
    Statements {
        #[serde(default)]
        strip_comments: bool,
    },

    /// Source text with comments removed and whitespace preserved
    StripComments,

    /// Canonical single-space form
    Canonical,

    /// The first token the filters let through
    FirstToken,
}

/// Configuration problems
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config '{name}' is invalid: {reason}")]
    Invalid { name: String, reason: &'static str },

    #[error("can't load configs: {0}")]
    Load(String),
}

impl ProcessingConfig {
    /// Reject filter/target combinations the pipeline cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reason = if self.name.is_empty() {
            "name must not be empty"
        } else if self.filter == FilterSpec::StripHints && self.target == TargetSpec::StripComments
        {
            "comment stripping copies source text and cannot remove hints"
        } else {
            return Ok(());
        };

        Err(ConfigError::Invalid {
            name: self.name.clone(),
            reason,
        })
    }
}

/// Registry of processing configurations
pub struct ConfigRegistry {
    configs: HashMap<String, ProcessingConfig>,
}

impl ConfigRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ConfigRegistry {
            configs: HashMap::new(),
        }
    }

    /// Register a configuration, replacing any with the same name
    pub fn register(&mut self, config: ProcessingConfig) {
        self.configs.insert(config.name.clone(), config);
    }

    /// Get a configuration by name
    pub fn get(&self, name: &str) -> Option<&ProcessingConfig> {
        self.configs.get(name)
    }

    /// Check if a configuration exists
    pub fn has(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// List all configurations (sorted by name)
    pub fn list_all(&self) -> Vec<&ProcessingConfig> {
        let mut configs: Vec<_> = self.configs.values().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        configs
    }

    /// Register every configuration in a JSON array. Nothing is registered if any entry is
    /// malformed or invalid.
    pub fn load_json(&mut self, json: &str) -> Result<usize, ConfigError> {
        let configs: Vec<ProcessingConfig> =
            serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))?;
        for config in &configs {
            config.validate()?;
        }

        let count = configs.len();
        for config in configs {
            self.register(config);
        }
        Ok(count)
    }

    /// Create registry with standard configurations
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ProcessingConfig {
            name: "separate-statements".into(),
            description: "Split into statements, comments kept".into(),
            filter: FilterSpec::Raw,
            target: TargetSpec::Statements {
                strip_comments: false,
            },
        });

        registry.register(ProcessingConfig {
            name: "separate-statements-stripped".into(),
            description: "Split into statements, comments stripped from each".into(),
            filter: FilterSpec::Raw,
            target: TargetSpec::Statements {
                strip_comments: true,
            },
        });

        registry.register(ProcessingConfig {
            name: "strip-comments".into(),
            description: "Remove comments, preserve whitespace".into(),
            filter: FilterSpec::Raw,
            target: TargetSpec::StripComments,
        });

        registry.register(ProcessingConfig {
            name: "simple-strip-comments".into(),
            description: "Canonical form, hints kept".into(),
            filter: FilterSpec::Raw,
            target: TargetSpec::Canonical,
        });

        registry.register(ProcessingConfig {
            name: "simple-skip-hints".into(),
            description: "Canonical form, hints removed".into(),
            filter: FilterSpec::StripHints,
            target: TargetSpec::Canonical,
        });

        registry.register(ProcessingConfig {
            name: "first-non-hint-token".into(),
            description: "First token after any leading hint".into(),
            filter: FilterSpec::StripHints,
            target: TargetSpec::FirstToken,
        });

        registry
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
