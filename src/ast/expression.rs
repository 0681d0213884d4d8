use std::fmt;

use serde::{Deserialize, Serialize};

use super::pattern::Pattern;
use super::{SourceLocation, Symbol};

/// Uniform wrapper around every expression form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub body: ExpressionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionBody {
    Primitive(Primitive),
    Operation(Operation),
    Tuple(TupleExpression),
    IfThenElse(IfThenElse),
    Cons(ConsExpression),
    Data(DataExpression),
    Composition(CompositionExpression),
    Lambda(LambdaExpression),
    Application(Application),
    InfixApplication(InfixApplication),
}

/// Leaf values, plus list literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Number {
        #[serde(rename = "numericType")]
        numeric_type: String,
        value: f64,
        #[serde(default)]
        loc: SourceLocation,
    },
    Boolean {
        value: bool,
        #[serde(default)]
        loc: SourceLocation,
    },
    Char {
        value: String,
        #[serde(default)]
        loc: SourceLocation,
    },
    String {
        value: String,
        #[serde(default)]
        loc: SourceLocation,
    },
    Null {
        #[serde(default)]
        loc: SourceLocation,
    },
    Undefined {
        #[serde(default)]
        loc: SourceLocation,
    },
    Symbol(Symbol),
    List {
        elements: Vec<Expression>,
        #[serde(default)]
        loc: SourceLocation,
    },
}

impl Primitive {
    pub fn loc(&self) -> &SourceLocation {
        match self {
            Primitive::Number { loc, .. }
            | Primitive::Boolean { loc, .. }
            | Primitive::Char { loc, .. }
            | Primitive::String { loc, .. }
            | Primitive::Null { loc }
            | Primitive::Undefined { loc }
            | Primitive::List { loc, .. } => loc,
            Primitive::Symbol(symbol) => &symbol.loc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">=")]
    GtEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitwiseOperator {
    #[serde(rename = "&")]
    And,
    #[serde(rename = "|")]
    Or,
    #[serde(rename = "^")]
    Xor,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Mul => "*",
            ArithmeticOperator::Div => "/",
            ArithmeticOperator::Mod => "%",
            ArithmeticOperator::Pow => "**",
        };
        write!(f, "{}", op)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::NotEq => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::LtEq => "<=",
            ComparisonOperator::GtEq => ">=",
        };
        write!(f, "{}", op)
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogicalOperator::And => write!(f, "&&"),
            LogicalOperator::Or => write!(f, "||"),
        }
    }
}

impl fmt::Display for BitwiseOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self {
            BitwiseOperator::And => "&",
            BitwiseOperator::Or => "|",
            BitwiseOperator::Xor => "^",
            BitwiseOperator::ShiftLeft => "<<",
            BitwiseOperator::ShiftRight => ">>",
        };
        write!(f, "{}", op)
    }
}

/// Binary operations, grouped by the family of their operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Arithmetic {
        operator: ArithmeticOperator,
        left: Box<Expression>,
        right: Box<Expression>,
        #[serde(default)]
        loc: SourceLocation,
    },
    Comparison {
        operator: ComparisonOperator,
        left: Box<Expression>,
        right: Box<Expression>,
        #[serde(default)]
        loc: SourceLocation,
    },
    Logical {
        operator: LogicalOperator,
        left: Box<Expression>,
        right: Box<Expression>,
        #[serde(default)]
        loc: SourceLocation,
    },
    Bitwise {
        operator: BitwiseOperator,
        left: Box<Expression>,
        right: Box<Expression>,
        #[serde(default)]
        loc: SourceLocation,
    },
    Concat {
        left: Box<Expression>,
        right: Box<Expression>,
        #[serde(default)]
        loc: SourceLocation,
    },
}

impl Operation {
    pub fn operands(&self) -> (&Expression, &Expression) {
        match self {
            Operation::Arithmetic { left, right, .. }
            | Operation::Comparison { left, right, .. }
            | Operation::Logical { left, right, .. }
            | Operation::Bitwise { left, right, .. }
            | Operation::Concat { left, right, .. } => (left, right),
        }
    }

    /// Operator as written in source, for diagnostics.
    pub fn operator(&self) -> String {
        match self {
            Operation::Arithmetic { operator, .. } => operator.to_string(),
            Operation::Comparison { operator, .. } => operator.to_string(),
            Operation::Logical { operator, .. } => operator.to_string(),
            Operation::Bitwise { operator, .. } => operator.to_string(),
            Operation::Concat { .. } => "++".to_string(),
        }
    }

    pub fn loc(&self) -> &SourceLocation {
        match self {
            Operation::Arithmetic { loc, .. }
            | Operation::Comparison { loc, .. }
            | Operation::Logical { loc, .. }
            | Operation::Bitwise { loc, .. }
            | Operation::Concat { loc, .. } => loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleExpression {
    pub elements: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfThenElse {
    pub condition: Box<Expression>,
    pub then: Box<Expression>,
    #[serde(rename = "else")]
    pub otherwise: Box<Expression>,
}

/// `head : tail`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsExpression {
    pub head: Box<Expression>,
    pub tail: Box<Expression>,
}

/// Construction of a record value, e.g. `Point { x = 1, y = 2 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataExpression {
    pub name: Symbol,
    pub contents: Vec<FieldExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExpression {
    pub name: Symbol,
    pub expression: Expression,
}

/// `left . right`, i.e. `\x -> left (right x)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionExpression {
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaExpression {
    pub parameters: Vec<Pattern>,
    pub body: Box<Expression>,
}

/// Application of a function to a single argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub function: Box<Expression>,
    pub parameter: Box<Expression>,
}

/// A named operator applied infix, e.g. ``x `div` y``.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfixApplication {
    pub operator: Symbol,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl From<ExpressionBody> for Expression {
    fn from(body: ExpressionBody) -> Self {
        Expression { body }
    }
}

impl From<Primitive> for Expression {
    fn from(primitive: Primitive) -> Self {
        ExpressionBody::Primitive(primitive).into()
    }
}

impl From<Operation> for Expression {
    fn from(operation: Operation) -> Self {
        ExpressionBody::Operation(operation).into()
    }
}

impl Expression {
    pub fn symbol(name: impl Into<String>) -> Self {
        Primitive::Symbol(Symbol::new(name)).into()
    }

    pub fn number(numeric_type: impl Into<String>, value: f64) -> Self {
        Primitive::Number {
            numeric_type: numeric_type.into(),
            value,
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn boolean(value: bool) -> Self {
        Primitive::Boolean {
            value,
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn char(value: impl Into<String>) -> Self {
        Primitive::Char {
            value: value.into(),
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn string(value: impl Into<String>) -> Self {
        Primitive::String {
            value: value.into(),
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn list(elements: Vec<Expression>) -> Self {
        Primitive::List {
            elements,
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn arithmetic(operator: ArithmeticOperator, left: Expression, right: Expression) -> Self {
        Operation::Arithmetic {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn comparison(operator: ComparisonOperator, left: Expression, right: Expression) -> Self {
        Operation::Comparison {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Self {
        Operation::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn concat(left: Expression, right: Expression) -> Self {
        Operation::Concat {
            left: Box::new(left),
            right: Box::new(right),
            loc: SourceLocation::default(),
        }
        .into()
    }

    pub fn tuple(elements: Vec<Expression>) -> Self {
        ExpressionBody::Tuple(TupleExpression { elements }).into()
    }

    pub fn if_then_else(condition: Expression, then: Expression, otherwise: Expression) -> Self {
        ExpressionBody::IfThenElse(IfThenElse {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
        .into()
    }

    pub fn cons(head: Expression, tail: Expression) -> Self {
        ExpressionBody::Cons(ConsExpression {
            head: Box::new(head),
            tail: Box::new(tail),
        })
        .into()
    }

    pub fn data(name: impl Into<String>, fields: Vec<(&str, Expression)>) -> Self {
        ExpressionBody::Data(DataExpression {
            name: Symbol::new(name),
            contents: fields
                .into_iter()
                .map(|(field, expression)| FieldExpression {
                    name: Symbol::new(field),
                    expression,
                })
                .collect(),
        })
        .into()
    }

    pub fn compose(left: Expression, right: Expression) -> Self {
        ExpressionBody::Composition(CompositionExpression {
            left: Box::new(left),
            right: Box::new(right),
        })
        .into()
    }

    pub fn lambda(parameters: Vec<Pattern>, body: Expression) -> Self {
        ExpressionBody::Lambda(LambdaExpression {
            parameters,
            body: Box::new(body),
        })
        .into()
    }

    pub fn apply(function: Expression, parameter: Expression) -> Self {
        ExpressionBody::Application(Application {
            function: Box::new(function),
            parameter: Box::new(parameter),
        })
        .into()
    }

    /// Curried application of `function` to every argument in order.
    pub fn call(function: Expression, arguments: Vec<Expression>) -> Self {
        arguments.into_iter().fold(function, Expression::apply)
    }

    pub fn infix(operator: impl Into<String>, left: Expression, right: Expression) -> Self {
        ExpressionBody::InfixApplication(InfixApplication {
            operator: Symbol::new(operator),
            left: Box::new(left),
            right: Box::new(right),
        })
        .into()
    }
}
