use serde::{Deserialize, Serialize};

/// A type term as written in the source: signatures, aliases, record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeNode {
    Var(String),
    Constructor(String),
    Constraint(Constraint),
    Constrained {
        context: Vec<Constraint>,
        body: Box<TypeNode>,
    },
    Function {
        from: Vec<TypeNode>,
        to: Box<TypeNode>,
    },
    Application {
        base: Box<TypeNode>,
        args: Vec<TypeNode>,
    },
    List(Box<TypeNode>),
    Tuple(Vec<TypeNode>),
    Data {
        name: String,
        constructors: Vec<DataConstructor>,
    },
    IfThenElse {
        condition: Box<TypeNode>,
        then: Box<TypeNode>,
        #[serde(rename = "else")]
        otherwise: Box<TypeNode>,
    },
}

/// A class constraint such as `Num a`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub class_name: String,
    pub params: Vec<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConstructor {
    pub name: String,
    pub fields: Vec<TypeNode>,
}

impl TypeNode {
    pub fn var(name: impl Into<String>) -> Self {
        TypeNode::Var(name.into())
    }

    pub fn constructor(name: impl Into<String>) -> Self {
        TypeNode::Constructor(name.into())
    }

    pub fn function(from: Vec<TypeNode>, to: TypeNode) -> Self {
        TypeNode::Function {
            from,
            to: Box::new(to),
        }
    }

    pub fn list(element: TypeNode) -> Self {
        TypeNode::List(Box::new(element))
    }

    pub fn application(base: TypeNode, args: Vec<TypeNode>) -> Self {
        TypeNode::Application {
            base: Box::new(base),
            args,
        }
    }
}
