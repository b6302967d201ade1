//! Rule trait and registry for lint rules.

use crate::component::{ClassTag, Component, StyleAnalysis};
use crate::config::{ConfigError, LintConfig, RuleLevel};
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::error::InvariantError;
use crate::rules::{NoConventionViolation, NoDynamicClassNames, NoUndefinedClassNames};

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "vkcn/no-dynamic-class-names")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Whether the rule can produce automatic fixes
    pub fixable: bool,
    /// Whether the rule offers suggestions
    pub has_suggestions: bool,
    /// Default severity
    pub default_severity: Severity,
}

/// Rule trait for implementing lint rules
///
/// Rules are called once per parsed style block and once per template tag
/// carrying a class attribute. Each hook receives the shared per-file
/// [`Component`] analysis and reports through the [`LintContext`].
pub trait Rule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Called for each style block that parsed
    #[allow(unused_variables)]
    fn check_style<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        component: &Component<'a>,
        style: &StyleAnalysis,
    ) -> Result<(), InvariantError> {
        Ok(())
    }

    /// Called for each template tag with at least one class attribute
    #[allow(unused_variables)]
    fn check_tag<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>, tag: &ClassTag) {}
}

/// An enabled rule and the severity it reports at.
pub struct RuleEntry {
    pub rule: Box<dyn Rule>,
    pub severity: Severity,
}

/// Registry holding all enabled lint rules
pub struct RuleRegistry {
    rules: Vec<RuleEntry>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule at its default severity
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let severity = rule.meta().default_severity;
        self.register_with_severity(rule, severity);
    }

    /// Register a rule at the given severity
    pub fn register_with_severity(&mut self, rule: Box<dyn Rule>, severity: Severity) {
        self.rules.push(RuleEntry { rule, severity });
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[RuleEntry] {
        &self.rules
    }

    /// Check if a rule is registered
    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|entry| entry.rule.meta().name == name)
    }

    /// Create registry with all built-in rules enabled at their defaults
    pub fn with_recommended() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NoConventionViolation::default()));
        registry.register(Box::new(NoDynamicClassNames::default()));
        registry.register(Box::new(NoUndefinedClassNames::default()));
        registry
    }

    /// Create registry from the `rules` section of a config.
    ///
    /// Rules the config does not mention stay enabled with default options;
    /// `"off"` removes a rule.
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        for name in config.rules.keys() {
            if !BUILTIN_RULES.iter().any(|meta| meta.name == name) {
                return Err(ConfigError::UnknownRule(name.clone()));
            }
        }

        let mut registry = Self::new();
        for meta in BUILTIN_RULES {
            let (level, options) = match config.rules.get(meta.name) {
                Some(setting) => (setting.level(), setting.options()),
                None => (RuleLevel::from(meta.default_severity), None),
            };
            let Some(severity) = level.severity() else {
                tracing::debug!(rule = meta.name, "rule turned off");
                continue;
            };
            let rule = build_rule(meta.name, options)?;
            registry.register_with_severity(rule, severity);
        }
        Ok(registry)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}

/// Metadata of every built-in rule, in registration order.
pub static BUILTIN_RULES: [&RuleMeta; 3] = [
    NoConventionViolation::META,
    NoDynamicClassNames::META,
    NoUndefinedClassNames::META,
];

fn build_rule(
    name: &'static str,
    options: Option<&serde_json::Value>,
) -> Result<Box<dyn Rule>, ConfigError> {
    fn parse<T: serde::de::DeserializeOwned + Default>(
        name: &'static str,
        options: Option<&serde_json::Value>,
    ) -> Result<T, ConfigError> {
        match options {
            None => Ok(T::default()),
            Some(value) => {
                T::deserialize(value).map_err(|source| ConfigError::InvalidOptions {
                    rule: name,
                    source,
                })
            }
        }
    }

    let rule: Box<dyn Rule> = match name {
        n if n == NoConventionViolation::META.name => {
            Box::new(NoConventionViolation::new(parse(name, options)?))
        }
        n if n == NoDynamicClassNames::META.name => {
            Box::new(NoDynamicClassNames::new(parse(name, options)?))
        }
        _ => Box::new(NoUndefinedClassNames::new(parse(name, options)?)?),
    };
    Ok(rule)
}
