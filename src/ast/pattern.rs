//! # Patterns
//!
//! Patterns appear as clause parameters and lambda parameters. They are
//! matched against argument values in clause order and may bind names.
//!
//! ```text
//! length []     = 0             -- List { elements: [] }
//! length (_:xs) = 1 + length xs -- Cons { head: Wildcard, tail: Variable xs }
//! ```
//!
//! For type checking, each pattern is aligned with the declared type of the
//! parameter it stands for (see [`crate::types::infer`]).

use serde::{Deserialize, Serialize};

use super::expression::Primitive;
use super::{SourceLocation, Symbol};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// `_`, matches anything and binds nothing.
    Wildcard,
    /// A number, char, string or boolean literal.
    Literal(Primitive),
    Variable(Symbol),
    /// `Just x`, `Point x y`
    Constructor { name: String, patterns: Vec<Pattern> },
    /// `[a, b]`
    List { elements: Vec<Pattern> },
    /// `(x:xs)`
    Cons {
        head: Box<Pattern>,
        tail: Box<Pattern>,
    },
    /// `all@(x:xs)`; the alias is a variable or wildcard pattern.
    As {
        alias: Box<Pattern>,
        pattern: Box<Pattern>,
    },
    Tuple { elements: Vec<Pattern> },
}

impl Pattern {
    pub fn variable(name: impl Into<String>) -> Self {
        Pattern::Variable(Symbol::new(name))
    }

    pub fn number(numeric_type: impl Into<String>, value: f64) -> Self {
        Pattern::Literal(Primitive::Number {
            numeric_type: numeric_type.into(),
            value,
            loc: SourceLocation::default(),
        })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Pattern::Literal(Primitive::String {
            value: value.into(),
            loc: SourceLocation::default(),
        })
    }

    pub fn constructor(name: impl Into<String>, patterns: Vec<Pattern>) -> Self {
        Pattern::Constructor {
            name: name.into(),
            patterns,
        }
    }

    pub fn list(elements: Vec<Pattern>) -> Self {
        Pattern::List { elements }
    }

    pub fn cons(head: Pattern, tail: Pattern) -> Self {
        Pattern::Cons {
            head: Box::new(head),
            tail: Box::new(tail),
        }
    }

    pub fn alias(alias: impl Into<String>, pattern: Pattern) -> Self {
        Pattern::As {
            alias: Box::new(Pattern::variable(alias)),
            pattern: Box::new(pattern),
        }
    }

    pub fn tuple(elements: Vec<Pattern>) -> Self {
        Pattern::Tuple { elements }
    }

    /// Names this pattern binds, left to right.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Pattern::Wildcard | Pattern::Literal(_) => {}
            Pattern::Variable(symbol) => names.push(&symbol.value),
            Pattern::Constructor { patterns, .. } => {
                patterns.iter().for_each(|p| p.collect_names(names))
            }
            Pattern::List { elements } | Pattern::Tuple { elements } => {
                elements.iter().for_each(|p| p.collect_names(names))
            }
            Pattern::Cons { head, tail } => {
                head.collect_names(names);
                tail.collect_names(names);
            }
            Pattern::As { alias, pattern } => {
                alias.collect_names(names);
                pattern.collect_names(names);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_names_in_order() {
        let pattern = Pattern::alias(
            "all",
            Pattern::cons(Pattern::variable("x"), Pattern::variable("xs")),
        );
        assert_eq!(pattern.bound_names(), vec!["all", "x", "xs"]);
    }

    #[test]
    fn test_wildcard_and_literal_bind_nothing() {
        let pattern = Pattern::tuple(vec![Pattern::Wildcard, Pattern::number("Int", 0.0)]);
        assert!(pattern.bound_names().is_empty());
    }
}
