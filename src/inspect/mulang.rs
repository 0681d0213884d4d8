//! Translation of Mulang-style expectations into [`InspectionRule`]s.
//!
//! ```yaml
//! expectations:
//!   - binding: doble
//!     inspection: HasBinding
//!   - binding: doble
//!     inspection: Not:UsesGuards
//!   - binding: doble
//!     inspection: Uses:map
//! ```
//!
//! Documents are YAML; a JSON document is read the same way.
//!
//! `Not:` makes the rule expect `false`; `Uses:<token>` becomes the `Uses`
//! inspection with `usage = token`. The binding becomes the `name`
//! argument. One malformed entry rejects the whole document.

use std::fmt;

use serde_json::Value;

use super::{InspectionRule, RuleArgs};

const NEGATION: &str = "Not:";
const USES: &str = "Uses:";

#[derive(Debug)]
pub enum MulangError {
    Yaml(serde_yaml::Error),
    /// The document has no `expectations` array.
    InvalidDocument,
    /// An entry lacks a string `inspection` or `binding`.
    MalformedExpectation { index: usize, entry: String },
}

impl fmt::Display for MulangError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MulangError::Yaml(err) => write!(f, "invalid YAML: {}", err),
            MulangError::InvalidDocument => {
                write!(f, "invalid Mulang document: expected `expectations` to be an array")
            }
            MulangError::MalformedExpectation { index, entry } => {
                write!(f, "malformed Mulang expectation #{}: {}", index, entry)
            }
        }
    }
}

impl std::error::Error for MulangError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MulangError::Yaml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for MulangError {
    fn from(err: serde_yaml::Error) -> Self {
        MulangError::Yaml(err)
    }
}

/// Parses a YAML (or JSON) expectations document and translates it.
pub fn translate_str(document: &str) -> Result<Vec<InspectionRule>, MulangError> {
    let document: Value = serde_yaml::from_str(document)?;
    translate(&document)
}

pub fn translate(document: &Value) -> Result<Vec<InspectionRule>, MulangError> {
    let expectations = document
        .get("expectations")
        .and_then(Value::as_array)
        .ok_or(MulangError::InvalidDocument)?;

    expectations
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let field = |key: &str| entry.get(key).and_then(Value::as_str);
            match (field("inspection"), field("binding")) {
                (Some(inspection), Some(binding)) => Ok(translate_one(inspection, binding)),
                _ => Err(MulangError::MalformedExpectation {
                    index,
                    entry: entry.to_string(),
                }),
            }
        })
        .collect()
}

fn translate_one(inspection: &str, binding: &str) -> InspectionRule {
    let (inspection, expected) = match inspection.strip_prefix(NEGATION) {
        Some(rest) => (rest, false),
        None => (inspection, true),
    };

    let mut args = RuleArgs::named(binding);
    let inspection = match inspection.strip_prefix(USES) {
        Some(usage) => {
            args = args.with("usage", usage);
            "Uses"
        }
        None => inspection,
    };

    InspectionRule::new(inspection, args, expected)
}
