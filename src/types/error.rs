//! # Type Error Definitions
//!
//! Errors produced while checking one clause against its signature:
//!
//! - two types that must agree do not (`TypeMismatch`)
//! - a type would have to contain itself (`OccursCheck`)
//! - an operator is applied outside its domain (`UnsupportedOperand`)
//! - a generic numeric literal is given a non-numeric type
//! - a constructor is unknown or used with the wrong number of arguments
//! - a clause has more parameters than its signature has inputs
//!
//! A [`Diagnostic`] attaches the function, clause and source location to a
//! [`TypeError`]; its `Display` form is what [`crate::types::check`] returns.

use std::fmt;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;
use crate::ast::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Two types required to be equal cannot be unified.
    TypeMismatch {
        expected: Type,
        found: Type,
        /// What was being compared, e.g. "return value"
        context: Option<String>,
    },

    /// Unification would create an infinite type such as `a = [a]`.
    OccursCheck { var: TypeVar, ty: Type },

    /// An operator whose operands must be numeric, integral, a list or a
    /// string received something else.
    UnsupportedOperand { operator: String, found: Type },

    /// A literal of the generic numeric kind must have a numeric type.
    NonNumericLiteral { found: Type },

    UnknownConstructor { name: String },

    ConstructorArity {
        name: String,
        expected: usize,
        found: usize,
    },

    UnknownField { constructor: String, field: String },

    /// The clause binds more parameters than the signature declares.
    TooManyParameters { expected: usize, found: usize },
}

impl TypeError {
    pub fn type_mismatch(expected: Type, found: Type) -> Self {
        TypeError::TypeMismatch {
            expected,
            found,
            context: None,
        }
    }

    /// Add context to this error (only affects `TypeMismatch`).
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let TypeError::TypeMismatch { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }

    pub fn from_unify_error(err: UnifyError) -> Self {
        match err {
            UnifyError::Mismatch { expected, found } => TypeError::type_mismatch(expected, found),
            UnifyError::OccursCheck { var, ty } => TypeError::OccursCheck { var, ty },
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeError::TypeMismatch {
                expected,
                found,
                context,
            } => {
                write!(f, "type mismatch")?;
                if let Some(ctx) = context {
                    write!(f, " in {}", ctx)?;
                }
                write!(f, ": expected {}, found {}", expected.pretty(), found.pretty())
            }
            TypeError::OccursCheck { var, ty } => write!(
                f,
                "cannot construct infinite type: {} = {}",
                Type::Var(var.clone()).pretty(),
                ty.pretty()
            ),
            TypeError::UnsupportedOperand { operator, found } => write!(
                f,
                "operator `{}` cannot be applied to values of type {}",
                operator,
                found.pretty()
            ),
            TypeError::NonNumericLiteral { found } => {
                write!(f, "numeric literal used as a value of type {}", found.pretty())
            }
            TypeError::UnknownConstructor { name } => {
                write!(f, "unknown data constructor `{}`", name)
            }
            TypeError::ConstructorArity {
                name,
                expected,
                found,
            } => write!(
                f,
                "constructor `{}` has {} field(s) but was given {}",
                name, expected, found
            ),
            TypeError::UnknownField { constructor, field } => {
                write!(f, "constructor `{}` has no field `{}`", constructor, field)
            }
            TypeError::TooManyParameters { expected, found } => write!(
                f,
                "clause has {} parameter(s) but its signature declares {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for TypeError {}

/// A type error located in a specific clause of a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub function: String,
    /// 1-based position of the clause within its function group.
    pub clause: usize,
    pub loc: SourceLocation,
    pub error: TypeError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Type error in `{}` (clause {}", self.function, self.clause)?;
        if self.loc != SourceLocation::default() {
            write!(f, ", line {}:{}", self.loc.start.line, self.loc.start.column)?;
        }
        write!(f, "): {}", self.error)
    }
}
