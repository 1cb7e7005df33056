//! Pipeline executor that runs processing configurations

use crate::sql::error::Error;
use crate::sql::lexing::Lexer;
use crate::sql::pipeline::config::{
    ConfigError, ConfigRegistry, FilterSpec, ProcessingConfig, TargetSpec,
};
use crate::sql::pipeline::{StripHints, TokenSeq, TokenStream};
use crate::sql::processor;
use crate::sql::statements::{self, RawStatement};
use crate::sql::token::Token;
use crate::sql::unlexing;
use log::debug;
use serde::{Serialize, Serializer};

/// Errors during pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    #[error("config '{0}' not found")]
    ConfigNotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Failed(#[from] Error),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Output from pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExecutionOutput<'src> {
    Text {
        text: String,
    },

    /// Segmentation result. A failed segmentation still yields the statements recovered
    /// before the failure, with the failure alongside.
    Statements {
        statements: Vec<RawStatement>,
        #[serde(
            serialize_with = "error_message",
            skip_serializing_if = "Option::is_none"
        )]
        error: Option<Error>,
    },

    Token {
        token: Token<'src>,
    },
}

fn error_message<S: Serializer>(error: &Option<Error>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.collect_str(error),
        None => serializer.serialize_none(),
    }
}

/// Executes processing configurations
pub struct PipelineExecutor {
    registry: ConfigRegistry,
}

impl PipelineExecutor {
    /// Create executor with default configurations
    pub fn new() -> Self {
        Self {
            registry: ConfigRegistry::with_defaults(),
        }
    }

    /// Create executor with custom registry
    pub fn with_registry(registry: ConfigRegistry) -> Self {
        Self { registry }
    }

    /// Execute a named configuration
    pub fn execute<'src>(
        &self,
        config_name: &str,
        filename: &str,
        source: &'src str,
    ) -> Result<ExecutionOutput<'src>, ProcessError> {
        let config = self
            .registry
            .get(config_name)
            .ok_or_else(|| ProcessError::ConfigNotFound(config_name.to_string()))?;
        config.validate()?;
        debug!(
            "running config '{}' ({:?} -> {:?}) on {} byte(s)",
            config.name,
            config.filter,
            config.target,
            source.len()
        );

        let tokens = TokenStream::new(Lexer::new(filename, source));
        match config.filter {
            FilterSpec::Raw => run_target(tokens, config),
            FilterSpec::StripHints => run_target(StripHints::new(tokens), config),
        }
    }

    /// Execute a named configuration and render the output as JSON
    pub fn execute_and_serialize(
        &self,
        config_name: &str,
        filename: &str,
        source: &str,
    ) -> Result<String, ProcessError> {
        let output = self.execute(config_name, filename, source)?;
        serde_json::to_string_pretty(&output)
            .map_err(|e| ProcessError::Serialization(e.to_string()))
    }

    /// List all available configurations
    pub fn list_configs(&self) -> Vec<&ProcessingConfig> {
        self.registry.list_all()
    }

    /// Get the registry
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn run_target<'src, S: TokenSeq<'src>>(
    tokens: S,
    config: &ProcessingConfig,
) -> Result<ExecutionOutput<'src>, ProcessError> {
    match config.target {
        TargetSpec::StripComments => Ok(ExecutionOutput::Text {
            text: unlexing::strip_comments(tokens)?,
        }),
        TargetSpec::Canonical => Ok(ExecutionOutput::Text {
            text: unlexing::unlex(tokens)?,
        }),
        TargetSpec::FirstToken => Ok(ExecutionOutput::Token {
            token: processor::first_token(tokens)?,
        }),
        TargetSpec::Statements { strip_comments } => {
            let (statements, error) = match statements::segment(tokens) {
                Ok(statements) => (statements, None),
                Err(err) => (err.statements, Some(err.error)),
            };
            let statements = if strip_comments {
                strip_each(statements, error.is_some())?
            } else {
                statements
            };
            Ok(ExecutionOutput::Statements { statements, error })
        }
    }
}

/// Strip comments from every statement. After a failed segmentation the last statement is
/// the unlexable fragment and is left as is.
fn strip_each(statements: Vec<RawStatement>, partial: bool) -> Result<Vec<RawStatement>, Error> {
    let last = statements.len().saturating_sub(1);
    statements
        .into_iter()
        .enumerate()
        .map(|(idx, statement)| {
            if partial && idx == last {
                Ok(statement)
            } else {
                statement.strip_comments()
            }
        })
        .collect()
}
