//! # Structural Traversal
//!
//! A single pre-order walk over any AST node. Both the inspection engine and
//! the type engine are built on it.
//!
//! ## Dispatch
//!
//! [`Node`] is a closed set of borrowed node shapes. For every node reached,
//! [`traverse`]:
//!
//! 1. calls the [`Visitor`] method matching the node's shape,
//! 2. calls the `wildcard` callback, unconditionally,
//! 3. recurses into the node's children in field order, passing the node as
//!    their parent.
//!
//! ```text
//! Expression                      visited first
//!   Operation (Arithmetic)        then its body
//!     Expression -> Symbol x      left operand subtree
//!     Expression -> Number 2      right operand subtree
//! ```
//!
//! The walk allocates nothing and keeps no state of its own; results are
//! produced by the visitor and the wildcard closure. There is no cycle
//! detection: the AST is a finite tree by construction.

use strum::{Display, IntoStaticStr};

use crate::ast::*;

/// A borrowed reference to any node of the AST.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Function(&'a FunctionGroup),
    Clause(&'a Clause),
    Guard(&'a Guard),
    TypeSignature(&'a FunctionTypeSignature),
    TypeAlias(&'a TypeAlias),
    Record(&'a Record),
    Constructor(&'a Constructor),
    Field(&'a Field),
    Constraint(&'a Constraint),
    Expression(&'a Expression),
    Primitive(&'a Primitive),
    Operation(&'a Operation),
    Tuple(&'a TupleExpression),
    IfThenElse(&'a IfThenElse),
    Cons(&'a ConsExpression),
    Data(&'a DataExpression),
    FieldExpression(&'a FieldExpression),
    Composition(&'a CompositionExpression),
    Lambda(&'a LambdaExpression),
    Application(&'a Application),
    InfixApplication(&'a InfixApplication),
    Pattern(&'a Pattern),
    TypeNode(&'a TypeNode),
    Symbol(&'a Symbol),
}

/// The concrete kind of a node, one tag per variant of every node enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum NodeKind {
    Program,
    Function,
    Clause,
    Guard,
    TypeSignature,
    TypeAlias,
    Record,
    Constructor,
    Field,
    Constraint,
    Expression,
    Number,
    Boolean,
    Char,
    String,
    Null,
    Undefined,
    Symbol,
    List,
    Arithmetic,
    Comparison,
    Logical,
    Bitwise,
    Concat,
    TupleExpression,
    IfThenElse,
    ConsExpression,
    DataExpression,
    FieldExpression,
    CompositionExpression,
    LambdaExpression,
    Application,
    InfixApplication,
    WildcardPattern,
    LiteralPattern,
    VariablePattern,
    ConstructorPattern,
    ListPattern,
    ConsPattern,
    AsPattern,
    TuplePattern,
    TypeVar,
    TypeConstructor,
    ConstrainedType,
    FunctionType,
    TypeApplication,
    ListType,
    TupleType,
    DataType,
    IfThenElseType,
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Program(_) => NodeKind::Program,
            Node::Function(_) => NodeKind::Function,
            Node::Clause(_) => NodeKind::Clause,
            Node::Guard(_) => NodeKind::Guard,
            Node::TypeSignature(_) => NodeKind::TypeSignature,
            Node::TypeAlias(_) => NodeKind::TypeAlias,
            Node::Record(_) => NodeKind::Record,
            Node::Constructor(_) => NodeKind::Constructor,
            Node::Field(_) => NodeKind::Field,
            Node::Constraint(_) => NodeKind::Constraint,
            Node::Expression(_) => NodeKind::Expression,
            Node::Primitive(primitive) => match primitive {
                Primitive::Number { .. } => NodeKind::Number,
                Primitive::Boolean { .. } => NodeKind::Boolean,
                Primitive::Char { .. } => NodeKind::Char,
                Primitive::String { .. } => NodeKind::String,
                Primitive::Null { .. } => NodeKind::Null,
                Primitive::Undefined { .. } => NodeKind::Undefined,
                Primitive::Symbol(_) => NodeKind::Symbol,
                Primitive::List { .. } => NodeKind::List,
            },
            Node::Operation(operation) => match operation {
                Operation::Arithmetic { .. } => NodeKind::Arithmetic,
                Operation::Comparison { .. } => NodeKind::Comparison,
                Operation::Logical { .. } => NodeKind::Logical,
                Operation::Bitwise { .. } => NodeKind::Bitwise,
                Operation::Concat { .. } => NodeKind::Concat,
            },
            Node::Tuple(_) => NodeKind::TupleExpression,
            Node::IfThenElse(_) => NodeKind::IfThenElse,
            Node::Cons(_) => NodeKind::ConsExpression,
            Node::Data(_) => NodeKind::DataExpression,
            Node::FieldExpression(_) => NodeKind::FieldExpression,
            Node::Composition(_) => NodeKind::CompositionExpression,
            Node::Lambda(_) => NodeKind::LambdaExpression,
            Node::Application(_) => NodeKind::Application,
            Node::InfixApplication(_) => NodeKind::InfixApplication,
            Node::Pattern(pattern) => match pattern {
                Pattern::Wildcard => NodeKind::WildcardPattern,
                Pattern::Literal(_) => NodeKind::LiteralPattern,
                Pattern::Variable(_) => NodeKind::VariablePattern,
                Pattern::Constructor { .. } => NodeKind::ConstructorPattern,
                Pattern::List { .. } => NodeKind::ListPattern,
                Pattern::Cons { .. } => NodeKind::ConsPattern,
                Pattern::As { .. } => NodeKind::AsPattern,
                Pattern::Tuple { .. } => NodeKind::TuplePattern,
            },
            Node::TypeNode(ty) => match ty {
                TypeNode::Var(_) => NodeKind::TypeVar,
                TypeNode::Constructor(_) => NodeKind::TypeConstructor,
                TypeNode::Constraint(_) => NodeKind::Constraint,
                TypeNode::Constrained { .. } => NodeKind::ConstrainedType,
                TypeNode::Function { .. } => NodeKind::FunctionType,
                TypeNode::Application { .. } => NodeKind::TypeApplication,
                TypeNode::List(_) => NodeKind::ListType,
                TypeNode::Tuple(_) => NodeKind::TupleType,
                TypeNode::Data { .. } => NodeKind::DataType,
                TypeNode::IfThenElse { .. } => NodeKind::IfThenElseType,
            },
            Node::Symbol(_) => NodeKind::Symbol,
        }
    }

    /// The textual `value` of identifier, string and char leaves.
    pub fn value(&self) -> Option<&'a str> {
        match self {
            Node::Symbol(symbol) => Some(&symbol.value),
            Node::Primitive(Primitive::Symbol(symbol)) => Some(&symbol.value),
            Node::Primitive(Primitive::String { value, .. })
            | Node::Primitive(Primitive::Char { value, .. }) => Some(value),
            _ => None,
        }
    }
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Declaration> for Node<'a> {
    fn from(declaration: &'a Declaration) -> Self {
        match declaration {
            Declaration::TypeAlias(alias) => Node::TypeAlias(alias),
            Declaration::TypeSignature(signature) => Node::TypeSignature(signature),
            Declaration::Function(group) => Node::Function(group),
            Declaration::Record(record) => Node::Record(record),
        }
    }
}

impl<'a> From<&'a FunctionGroup> for Node<'a> {
    fn from(group: &'a FunctionGroup) -> Self {
        Node::Function(group)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}

impl<'a> From<&'a Pattern> for Node<'a> {
    fn from(pattern: &'a Pattern) -> Self {
        Node::Pattern(pattern)
    }
}

impl<'a> From<&'a TypeNode> for Node<'a> {
    fn from(ty: &'a TypeNode) -> Self {
        Node::TypeNode(ty)
    }
}

impl<'a> From<&'a ExpressionBody> for Node<'a> {
    fn from(body: &'a ExpressionBody) -> Self {
        match body {
            ExpressionBody::Primitive(primitive) => Node::Primitive(primitive),
            ExpressionBody::Operation(operation) => Node::Operation(operation),
            ExpressionBody::Tuple(tuple) => Node::Tuple(tuple),
            ExpressionBody::IfThenElse(cond) => Node::IfThenElse(cond),
            ExpressionBody::Cons(cons) => Node::Cons(cons),
            ExpressionBody::Data(data) => Node::Data(data),
            ExpressionBody::Composition(composition) => Node::Composition(composition),
            ExpressionBody::Lambda(lambda) => Node::Lambda(lambda),
            ExpressionBody::Application(application) => Node::Application(application),
            ExpressionBody::InfixApplication(infix) => Node::InfixApplication(infix),
        }
    }
}

/// Per-shape handlers. Every method defaults to doing nothing, so a visitor
/// only implements the shapes it is interested in.
#[allow(unused_variables)]
pub trait Visitor<'a> {
    fn program(&mut self, node: &'a Program, parent: Option<Node<'a>>) {}
    fn function(&mut self, node: &'a FunctionGroup, parent: Option<Node<'a>>) {}
    fn clause(&mut self, node: &'a Clause, parent: Option<Node<'a>>) {}
    fn guard(&mut self, node: &'a Guard, parent: Option<Node<'a>>) {}
    fn type_signature(&mut self, node: &'a FunctionTypeSignature, parent: Option<Node<'a>>) {}
    fn type_alias(&mut self, node: &'a TypeAlias, parent: Option<Node<'a>>) {}
    fn record(&mut self, node: &'a Record, parent: Option<Node<'a>>) {}
    fn constructor(&mut self, node: &'a Constructor, parent: Option<Node<'a>>) {}
    fn field(&mut self, node: &'a Field, parent: Option<Node<'a>>) {}
    fn constraint(&mut self, node: &'a Constraint, parent: Option<Node<'a>>) {}
    fn expression(&mut self, node: &'a Expression, parent: Option<Node<'a>>) {}
    fn primitive(&mut self, node: &'a Primitive, parent: Option<Node<'a>>) {}
    fn operation(&mut self, node: &'a Operation, parent: Option<Node<'a>>) {}
    fn tuple(&mut self, node: &'a TupleExpression, parent: Option<Node<'a>>) {}
    fn if_then_else(&mut self, node: &'a IfThenElse, parent: Option<Node<'a>>) {}
    fn cons(&mut self, node: &'a ConsExpression, parent: Option<Node<'a>>) {}
    fn data(&mut self, node: &'a DataExpression, parent: Option<Node<'a>>) {}
    fn field_expression(&mut self, node: &'a FieldExpression, parent: Option<Node<'a>>) {}
    fn composition(&mut self, node: &'a CompositionExpression, parent: Option<Node<'a>>) {}
    fn lambda(&mut self, node: &'a LambdaExpression, parent: Option<Node<'a>>) {}
    fn application(&mut self, node: &'a Application, parent: Option<Node<'a>>) {}
    fn infix_application(&mut self, node: &'a InfixApplication, parent: Option<Node<'a>>) {}
    fn pattern(&mut self, node: &'a Pattern, parent: Option<Node<'a>>) {}
    fn type_node(&mut self, node: &'a TypeNode, parent: Option<Node<'a>>) {}
    fn symbol(&mut self, node: &'a Symbol, parent: Option<Node<'a>>) {}
}

/// A visitor with no specific handlers, used when only the wildcard matters.
pub struct NoopVisitor;

impl<'a> Visitor<'a> for NoopVisitor {}

fn dispatch<'a, V>(visitor: &mut V, node: Node<'a>, parent: Option<Node<'a>>)
where
    V: Visitor<'a> + ?Sized,
{
    match node {
        Node::Program(n) => visitor.program(n, parent),
        Node::Function(n) => visitor.function(n, parent),
        Node::Clause(n) => visitor.clause(n, parent),
        Node::Guard(n) => visitor.guard(n, parent),
        Node::TypeSignature(n) => visitor.type_signature(n, parent),
        Node::TypeAlias(n) => visitor.type_alias(n, parent),
        Node::Record(n) => visitor.record(n, parent),
        Node::Constructor(n) => visitor.constructor(n, parent),
        Node::Field(n) => visitor.field(n, parent),
        Node::Constraint(n) => visitor.constraint(n, parent),
        Node::Expression(n) => visitor.expression(n, parent),
        Node::Primitive(n) => visitor.primitive(n, parent),
        Node::Operation(n) => visitor.operation(n, parent),
        Node::Tuple(n) => visitor.tuple(n, parent),
        Node::IfThenElse(n) => visitor.if_then_else(n, parent),
        Node::Cons(n) => visitor.cons(n, parent),
        Node::Data(n) => visitor.data(n, parent),
        Node::FieldExpression(n) => visitor.field_expression(n, parent),
        Node::Composition(n) => visitor.composition(n, parent),
        Node::Lambda(n) => visitor.lambda(n, parent),
        Node::Application(n) => visitor.application(n, parent),
        Node::InfixApplication(n) => visitor.infix_application(n, parent),
        Node::Pattern(n) => visitor.pattern(n, parent),
        Node::TypeNode(n) => visitor.type_node(n, parent),
        Node::Symbol(n) => visitor.symbol(n, parent),
    }
}

/// Walks `node` and everything below it in pre-order.
///
/// The shape-specific visitor method fires first, then `wildcard`; both see
/// the same `parent`. Children are visited in field order with `node` as
/// their parent.
pub fn traverse<'a, V, W>(
    node: Node<'a>,
    visitor: &mut V,
    wildcard: &mut W,
    parent: Option<Node<'a>>,
) where
    V: Visitor<'a> + ?Sized,
    W: FnMut(Node<'a>, Option<Node<'a>>),
{
    dispatch(visitor, node, parent);
    wildcard(node, parent);

    let mut go = |child: Node<'a>| traverse(child, &mut *visitor, &mut *wildcard, Some(node));

    match node {
        Node::Program(program) => program.declarations.iter().for_each(|d| go(d.into())),
        Node::Function(group) => {
            go(Node::Symbol(&group.name));
            group.contents.iter().for_each(|c| go(Node::Clause(c)));
        }
        Node::Clause(clause) => {
            clause.parameters.iter().for_each(|p| go(p.into()));
            for body in [&clause.body, &clause.returns] {
                match body {
                    ClauseBody::Unguarded(expression) => go(expression.into()),
                    ClauseBody::Guarded(guards) => guards.iter().for_each(|g| go(Node::Guard(g))),
                }
            }
        }
        Node::Guard(guard) => {
            go((&guard.condition).into());
            go((&guard.body).into());
            go((&guard.returns).into());
        }
        Node::TypeSignature(signature) => {
            go(Node::Symbol(&signature.name));
            signature
                .constraints
                .iter()
                .for_each(|c| go(Node::Constraint(c)));
            signature.input_types.iter().for_each(|t| go(t.into()));
            go((&signature.return_type).into());
        }
        Node::TypeAlias(alias) => {
            go(Node::Symbol(&alias.name));
            go((&alias.value).into());
        }
        Node::Record(record) => {
            go(Node::Symbol(&record.name));
            record
                .contents
                .iter()
                .for_each(|c| go(Node::Constructor(c)));
        }
        Node::Constructor(constructor) => {
            constructor.fields.iter().for_each(|f| go(Node::Field(f)))
        }
        Node::Field(field) => {
            if let Some(name) = &field.name {
                go(Node::Symbol(name));
            }
            go((&field.value).into());
        }
        Node::Constraint(constraint) => constraint.params.iter().for_each(|t| go(t.into())),
        Node::Expression(expression) => go((&expression.body).into()),
        Node::Primitive(primitive) => {
            if let Primitive::List { elements, .. } = primitive {
                elements.iter().for_each(|e| go(e.into()));
            }
        }
        Node::Operation(operation) => {
            let (left, right) = operation.operands();
            go(left.into());
            go(right.into());
        }
        Node::Tuple(tuple) => tuple.elements.iter().for_each(|e| go(e.into())),
        Node::IfThenElse(cond) => {
            go((&*cond.condition).into());
            go((&*cond.then).into());
            go((&*cond.otherwise).into());
        }
        Node::Cons(cons) => {
            go((&*cons.head).into());
            go((&*cons.tail).into());
        }
        Node::Data(data) => {
            go(Node::Symbol(&data.name));
            data.contents
                .iter()
                .for_each(|f| go(Node::FieldExpression(f)));
        }
        Node::FieldExpression(field) => {
            go(Node::Symbol(&field.name));
            go((&field.expression).into());
        }
        Node::Composition(composition) => {
            go((&*composition.left).into());
            go((&*composition.right).into());
        }
        Node::Lambda(lambda) => {
            lambda.parameters.iter().for_each(|p| go(p.into()));
            go((&*lambda.body).into());
        }
        Node::Application(application) => {
            go((&*application.function).into());
            go((&*application.parameter).into());
        }
        Node::InfixApplication(infix) => {
            go(Node::Symbol(&infix.operator));
            go((&*infix.left).into());
            go((&*infix.right).into());
        }
        Node::Pattern(pattern) => match pattern {
            Pattern::Wildcard => {}
            Pattern::Literal(primitive) => go(Node::Primitive(primitive)),
            Pattern::Variable(symbol) => go(Node::Symbol(symbol)),
            Pattern::Constructor { patterns, .. } => patterns.iter().for_each(|p| go(p.into())),
            Pattern::List { elements } | Pattern::Tuple { elements } => {
                elements.iter().for_each(|p| go(p.into()))
            }
            Pattern::Cons { head, tail } => {
                go((&**head).into());
                go((&**tail).into());
            }
            Pattern::As { alias, pattern } => {
                go((&**alias).into());
                go((&**pattern).into());
            }
        },
        Node::TypeNode(ty) => match ty {
            TypeNode::Var(_) | TypeNode::Constructor(_) => {}
            TypeNode::Constraint(constraint) => {
                constraint.params.iter().for_each(|t| go(t.into()))
            }
            TypeNode::Constrained { context, body } => {
                context.iter().for_each(|c| go(Node::Constraint(c)));
                go((&**body).into());
            }
            TypeNode::Function { from, to } => {
                from.iter().for_each(|t| go(t.into()));
                go((&**to).into());
            }
            TypeNode::Application { base, args } => {
                go((&**base).into());
                args.iter().for_each(|t| go(t.into()));
            }
            TypeNode::List(element) => go((&**element).into()),
            TypeNode::Tuple(elements) => elements.iter().for_each(|t| go(t.into())),
            TypeNode::Data { constructors, .. } => constructors
                .iter()
                .flat_map(|c| c.fields.iter())
                .for_each(|t| go(t.into())),
            TypeNode::IfThenElse {
                condition,
                then,
                otherwise,
            } => {
                go((&**condition).into());
                go((&**then).into());
                go((&**otherwise).into());
            }
        },
        Node::Symbol(_) => {}
    }
}

/// Walks `node` with shape-specific handlers only.
pub fn walk<'a, V>(node: Node<'a>, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    traverse(node, visitor, &mut |_, _| {}, None);
}

/// Walks `node` calling `f` on every node with its parent.
pub fn walk_all<'a, F>(node: Node<'a>, mut f: F)
where
    F: FnMut(Node<'a>, Option<Node<'a>>),
{
    traverse(node, &mut NoopVisitor, &mut f, None);
}
