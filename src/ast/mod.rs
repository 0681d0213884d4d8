//! # Canonical AST
//!
//! The language-independent tree every other component consumes. A front end
//! (out of this crate) produces a [`Program`]; the traversal, inspection and
//! type engines only ever read it.
//!
//! ## Layout
//!
//! - [`Program`] - ordered top-level [`Declaration`]s
//! - [`expression`] - primitives, operations and the expression wrapper
//! - [`pattern`] - clause and lambda parameter patterns
//! - [`types`] - type terms as written in signatures, aliases and records
//!
//! ## Invariants
//!
//! Every node owns its children by value and there are no parent pointers,
//! so the tree is finite and acyclic. Function declarations arrive already
//! grouped: at most one [`FunctionGroup`] per name, clauses in source order.

use serde::{Deserialize, Serialize};

pub mod expression;
pub mod pattern;
pub mod types;

pub use expression::*;
pub use pattern::Pattern;
pub use types::{Constraint, DataConstructor, TypeNode};

/// Attribute marking a clause whose body is a list of guards.
pub const GUARDED_BODY: &str = "GuardedBody";
/// Attribute marking a clause whose body is a single expression.
pub const UNGUARDED_BODY: &str = "UnguardedBody";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }
}

/// Start and end of a node in the source text it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        SourceLocation { start, end }
    }
}

/// An identifier together with where it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub loc: SourceLocation,
}

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Symbol {
            value: value.into(),
            description: None,
            loc: SourceLocation::default(),
        }
    }

    pub fn at(value: impl Into<String>, loc: SourceLocation) -> Self {
        Symbol {
            value: value.into(),
            description: None,
            loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Program { declarations }
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionGroup> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Function(group) => Some(group),
            _ => None,
        })
    }

    /// Looks up the function group with the given name.
    pub fn function(&self, name: &str) -> Option<&FunctionGroup> {
        self.functions().find(|group| group.name.value == name)
    }
}

/// A top-level item of a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    TypeAlias(TypeAlias),
    TypeSignature(FunctionTypeSignature),
    Function(FunctionGroup),
    Record(Record),
}

/// Every clause declared under one function name.
///
/// Clause order is the pattern-matching priority order of the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionGroup {
    pub name: Symbol,
    pub contents: Vec<Clause>,
}

/// One pattern-matched alternative of a function.
///
/// A clause is guarded or unguarded depending on its `attributes`, which
/// carry either [`GUARDED_BODY`] or [`UNGUARDED_BODY`]. The shape of `body`
/// and `returns` is expected to agree with that attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub parameters: Vec<Pattern>,
    pub body: ClauseBody,
    #[serde(rename = "return")]
    pub returns: ClauseBody,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl Clause {
    /// An unguarded clause whose body and return are the same expression.
    pub fn unguarded(parameters: Vec<Pattern>, body: Expression) -> Self {
        Clause {
            parameters,
            body: ClauseBody::Unguarded(body.clone()),
            returns: ClauseBody::Unguarded(body),
            attributes: vec![UNGUARDED_BODY.to_string()],
        }
    }

    pub fn guarded(parameters: Vec<Pattern>, guards: Vec<Guard>) -> Self {
        Clause {
            parameters,
            body: ClauseBody::Guarded(guards.clone()),
            returns: ClauseBody::Guarded(guards),
            attributes: vec![GUARDED_BODY.to_string()],
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.attributes.iter().any(|attr| attr == GUARDED_BODY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClauseBody {
    Unguarded(Expression),
    Guarded(Vec<Guard>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    pub condition: Expression,
    pub body: Expression,
    #[serde(rename = "return")]
    pub returns: Expression,
}

impl Guard {
    pub fn new(condition: Expression, body: Expression) -> Self {
        Guard {
            condition,
            body: body.clone(),
            returns: body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionTypeSignature {
    pub name: Symbol,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    pub input_types: Vec<TypeNode>,
    pub return_type: TypeNode,
}

impl FunctionTypeSignature {
    pub fn new(name: impl Into<String>, input_types: Vec<TypeNode>, return_type: TypeNode) -> Self {
        FunctionTypeSignature {
            name: Symbol::new(name),
            constraints: Vec::new(),
            input_types,
            return_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub name: Symbol,
    pub value: TypeNode,
}

/// A data declaration: a named type with one or more constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: Symbol,
    pub contents: Vec<Constructor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Symbol>,
    pub value: TypeNode,
}

impl Field {
    pub fn named(name: impl Into<String>, value: TypeNode) -> Self {
        Field {
            name: Some(Symbol::new(name)),
            value,
        }
    }

    pub fn positional(value: TypeNode) -> Self {
        Field { name: None, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_attributes_decide_guardedness() {
        let unguarded = Clause::unguarded(vec![], Expression::number("Int", 1.0));
        assert!(!unguarded.is_guarded());

        let guarded = Clause::guarded(
            vec![],
            vec![Guard::new(
                Expression::boolean(true),
                Expression::number("Int", 1.0),
            )],
        );
        assert!(guarded.is_guarded());
    }

    #[test]
    fn test_program_function_lookup() {
        let program = Program::new(vec![
            Declaration::TypeAlias(TypeAlias {
                name: Symbol::new("Number"),
                value: TypeNode::constructor("Int"),
            }),
            Declaration::Function(FunctionGroup {
                name: Symbol::new("doble"),
                contents: vec![],
            }),
        ]);
        assert!(program.function("doble").is_some());
        assert!(program.function("Number").is_none());
    }

    #[test]
    fn test_program_json_shape() {
        let program = Program::new(vec![Declaration::TypeSignature(
            FunctionTypeSignature::new(
                "f",
                vec![TypeNode::constructor("Int")],
                TypeNode::constructor("Int"),
            ),
        )]);
        let json = serde_json::to_value(&program).unwrap();
        let signature = &json["declarations"][0]["TypeSignature"];
        assert_eq!(signature["name"]["value"], "f");
        assert_eq!(signature["inputTypes"][0]["Constructor"], "Int");

        let back: Program = serde_json::from_value(json).unwrap();
        assert_eq!(back, program);
    }
}
