//! # Inspections
//!
//! Named boolean questions about a [`Program`], used to grade a submission
//! against expected properties ("does `doble` use guards?").
//!
//! An [`Analyzer`] holds a registry from inspection name to an
//! [`Inspection`]. It starts with every [`BuiltinInspection`] and accepts
//! custom ones through [`Analyzer::register_inspection`]. Rules are
//! evaluated independently: an unknown or failing inspection only affects
//! its own [`AnalysisResult`].
//!
//! The analyzer also keeps type checkers by source language, so a front end
//! can run the checker that fits the program it produced. [`HASKELL`] maps
//! to [`crate::types::check`] from the start.

use std::collections::BTreeMap;
use std::fmt;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::ast::Program;

pub mod builtin;
pub mod mulang;

pub use builtin::BuiltinInspection;

/// Error text reported for a rule whose inspection is not registered.
pub const UNKNOWN_INSPECTION: &str = "Unknown inspection";

/// Language the signature-driven checker in [`crate::types`] is registered under.
pub const HASKELL: &str = "haskell";

/// A primitive rule argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

/// Arguments of a rule, keyed by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleArgs(BTreeMap<String, ArgValue>);

impl RuleArgs {
    pub fn new() -> Self {
        RuleArgs::default()
    }

    /// Arguments with only `name` set, the shape every built-in expects.
    pub fn named(name: impl Into<String>) -> Self {
        RuleArgs::new().with("name", ArgValue::String(name.into()))
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The binding an inspection is scoped to.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(ArgValue::as_str)
    }

    pub fn usage(&self) -> Option<&str> {
        self.get("usage").and_then(ArgValue::as_str)
    }

    /// Like [`RuleArgs::get`] for string arguments, failing when absent.
    pub fn require(&self, key: &'static str) -> Result<&str, InspectionError> {
        self.get(key)
            .and_then(ArgValue::as_str)
            .ok_or(InspectionError::MissingArgument(key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRule {
    pub inspection: String,
    #[serde(default)]
    pub args: RuleArgs,
    pub expected: bool,
}

impl InspectionRule {
    pub fn new(inspection: impl Into<String>, args: RuleArgs, expected: bool) -> Self {
        InspectionRule {
            inspection: inspection.into(),
            args,
            expected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub rule: InspectionRule,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionError {
    /// A required string argument is absent or not a string.
    MissingArgument(&'static str),
    Failed(String),
}

impl fmt::Display for InspectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InspectionError::MissingArgument(key) => {
                write!(f, "missing string argument `{}`", key)
            }
            InspectionError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for InspectionError {}

/// A named predicate over a program.
pub trait Inspection: Send + Sync {
    fn evaluate(&self, program: &Program, args: &RuleArgs) -> Result<bool, InspectionError>;
}

impl<F> Inspection for F
where
    F: Fn(&Program, &RuleArgs) -> Result<bool, InspectionError> + Send + Sync,
{
    fn evaluate(&self, program: &Program, args: &RuleArgs) -> Result<bool, InspectionError> {
        self(program, args)
    }
}

/// A whole-program checker returning rendered diagnostics.
pub type TypeCheckFn = Box<dyn Fn(&Program) -> Vec<String> + Send + Sync>;

/// Evaluates inspection rules against one program.
pub struct Analyzer<'p> {
    program: &'p Program,
    inspections: FxHashMap<String, Box<dyn Inspection>>,
    type_checkers: FxHashMap<String, TypeCheckFn>,
}

impl<'p> Analyzer<'p> {
    pub fn new(program: &'p Program) -> Self {
        let mut analyzer = Analyzer {
            program,
            inspections: FxHashMap::default(),
            type_checkers: FxHashMap::default(),
        };
        for builtin in BuiltinInspection::iter() {
            analyzer.register_inspection(builtin.to_string(), builtin);
        }
        analyzer.register_type_checker(HASKELL, crate::types::check);
        analyzer
    }

    /// Adds `checker` for `language`, replacing any previous one.
    /// Returns true if the language had no checker before.
    pub fn register_type_checker(
        &mut self,
        language: impl Into<String>,
        checker: impl Fn(&Program) -> Vec<String> + Send + Sync + 'static,
    ) -> bool {
        self.type_checkers
            .insert(language.into(), Box::new(checker))
            .is_none()
    }

    /// Runs the checker registered for `language`, if there is one.
    pub fn type_check(&self, language: &str) -> Option<Vec<String>> {
        self.type_checkers
            .get(language)
            .map(|checker| checker(self.program))
    }

    /// Adds `inspection` under `name`, replacing any previous one.
    /// Returns true if the name was not registered before.
    pub fn register_inspection(
        &mut self,
        name: impl Into<String>,
        inspection: impl Inspection + 'static,
    ) -> bool {
        self.inspections
            .insert(name.into(), Box::new(inspection))
            .is_none()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.inspections.contains_key(name)
    }

    pub fn run_inspection(&self, rule: &InspectionRule) -> AnalysisResult {
        let inspection = match self.inspections.get(&rule.inspection) {
            Some(inspection) => inspection,
            None => {
                return AnalysisResult {
                    rule: rule.clone(),
                    passed: false,
                    actual: None,
                    error: Some(UNKNOWN_INSPECTION.to_string()),
                }
            }
        };

        match inspection.evaluate(self.program, &rule.args) {
            Ok(actual) => AnalysisResult {
                rule: rule.clone(),
                passed: actual == rule.expected,
                actual: Some(actual),
                error: None,
            },
            Err(err) => {
                // The result carries no error text; the log keeps it.
                log::warn!("inspection `{}` failed: {}", rule.inspection, err);
                AnalysisResult {
                    rule: rule.clone(),
                    passed: false,
                    actual: None,
                    error: None,
                }
            }
        }
    }

    /// Results are index-aligned with `rules`.
    pub fn analyze(&self, rules: &[InspectionRule]) -> Vec<AnalysisResult> {
        rules.iter().map(|rule| self.run_inspection(rule)).collect()
    }
}
