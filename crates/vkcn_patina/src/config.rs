//! Lint configuration.
//!
//! The shape of `vkcn.config.json`:
//!
//! ```json
//! {
//!   "settings": { "classAttrName": "/^(-?bar|baz|class)$/" },
//!   "rules": {
//!     "vkcn/no-dynamic-class-names": ["error", { "allowConditional": true }],
//!     "vkcn/no-convention-violation": "warn"
//!   }
//! }
//! ```

use crate::diagnostic::Severity;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use vkcn_carton::{NamePattern, PatternError};

/// Errors produced while turning a config into a linter.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
    #[error("invalid options for `{rule}`: {source}")]
    InvalidOptions {
        rule: &'static str,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Rule level as written in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    /// Severity of an enabled rule; `None` when off.
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

impl From<Severity> for RuleLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Self::Error,
            Severity::Warning => Self::Warn,
        }
    }
}

/// A rule entry: `"error"` or `["error", { ...options }]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Level(RuleLevel),
    WithOptions(RuleLevel, serde_json::Value),
}

impl RuleSetting {
    pub fn level(&self) -> RuleLevel {
        match self {
            Self::Level(level) | Self::WithOptions(level, _) => *level,
        }
    }

    pub fn options(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Level(_) => None,
            Self::WithOptions(_, options) => Some(options),
        }
    }
}

/// Settings shared by every rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    /// Which attributes hold class names: a name or `/pattern/flags`
    pub class_attr_name: Option<String>,
}

impl Settings {
    /// Compiled class attribute pattern; exactly `class` when unset.
    pub fn class_attr_pattern(&self) -> Result<NamePattern, ConfigError> {
        match &self.class_attr_name {
            Some(source) => Ok(NamePattern::parse(source)?),
            None => Ok(NamePattern::default()),
        }
    }
}

/// Top-level lint configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LintConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSetting>,
}

impl LintConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }
}
