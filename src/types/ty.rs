use std::fmt;

use itertools::Itertools;

pub const BOOL: &str = "Bool";
pub const CHAR: &str = "Char";
pub const STRING: &str = "String";

/// Numeric kinds a number literal may carry. They are distinct types:
/// no kind widens into another.
pub const NUMERIC_KINDS: &[&str] = &["Int", "Integer", "Float", "Double"];

/// Numeric kinds that support bitwise operators.
pub const INTEGRAL_KINDS: &[&str] = &["Int", "Integer"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVar {
    pub id: usize,
    pub name: Option<String>,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id, name: None }
    }

    pub fn with_name(id: usize, name: String) -> Self {
        Self {
            id,
            name: Some(name),
        }
    }
}

/// Type terms the checker works with, lowered from [`crate::ast::TypeNode`].
///
/// Functions are curried: `a -> b -> c` is `Func(a, Func(b, c))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Var(TypeVar),
    Con(String),
    App(Box<Type>, Vec<Type>),
    Func(Box<Type>, Box<Type>),
    List(Box<Type>),
    Tuple(Vec<Type>),
}

impl Type {
    pub fn con(name: &str) -> Self {
        Type::Con(name.to_string())
    }

    pub fn bool() -> Self {
        Type::con(BOOL)
    }

    pub fn func(t1: Type, t2: Type) -> Self {
        Type::Func(Box::new(t1), Box::new(t2))
    }

    /// `params[0] -> params[1] -> ... -> result`
    pub fn curried(params: Vec<Type>, result: Type) -> Self {
        params
            .into_iter()
            .rev()
            .fold(result, |acc, param| Type::func(param, acc))
    }

    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Con(name) => name.clone(),
            Type::Var(v) => {
                if let Some(name) = &v.name {
                    name.clone()
                } else {
                    format!("t{}", v.id)
                }
            }
            Type::App(base, args) => {
                format!(
                    "{} {}",
                    base.pretty_atom(),
                    args.iter().map(Type::pretty_atom).join(" ")
                )
            }
            Type::Func(t1, t2) => {
                let t1_str = if matches!(**t1, Type::Func(_, _)) {
                    format!("({})", t1.pretty())
                } else {
                    t1.pretty()
                };
                format!("{} -> {}", t1_str, t2.pretty())
            }
            Type::List(element) => format!("[{}]", element.pretty()),
            Type::Tuple(elements) => {
                format!("({})", elements.iter().map(Type::pretty).join(", "))
            }
        }
    }

    fn pretty_atom(&self) -> String {
        match self {
            Type::Func(_, _) | Type::App(_, _) => format!("({})", self.pretty()),
            _ => self.pretty(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
