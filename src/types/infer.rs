use fxhash::{FxHashMap, FxHashSet};

use super::env::{GlobalEnv, TypeEnv};
use super::error::TypeError;
use super::subst::Substitution;
use super::ty::{Type, TypeVar, BOOL, CHAR, INTEGRAL_KINDS, NUMERIC_KINDS, STRING};
use super::unify::{unify, Aliases, UnifyError};
use crate::ast::*;

/// Numeric kind front ends use for literals whose kind is not known.
pub const GENERIC_NUMBER: &str = "number";

/// Inference state for one `check` run.
///
/// Aliases are lowered once when the state is created. The substitution
/// is per clause: call [`Infer::reset`] before checking the next one. The
/// variable counter keeps growing, so variables never clash across clauses.
///
/// Literals of the generic numeric kind get a variable recorded in
/// `numeric`; such a variable may only ever resolve to another variable or
/// to one of [`NUMERIC_KINDS`].
pub struct Infer<'g> {
    globals: &'g GlobalEnv<'g>,
    aliases: Aliases,
    subst: Substitution,
    numeric: FxHashSet<TypeVar>,
    next_var: usize,
}

impl<'g> Infer<'g> {
    pub fn new(globals: &'g GlobalEnv<'g>) -> Self {
        let mut infer = Infer {
            globals,
            aliases: Aliases::new(),
            subst: Substitution::empty(),
            numeric: FxHashSet::default(),
            next_var: 0,
        };

        let mut aliases = Aliases::new();
        for (name, node) in &globals.aliases {
            let lowered = infer.lower(node, &mut FxHashMap::default());
            aliases.insert(name.to_string(), lowered);
        }
        infer.aliases = aliases;
        infer
    }

    /// Forget every binding made while checking the previous clause.
    pub fn reset(&mut self) {
        self.subst = Substitution::empty();
        self.numeric.clear();
    }

    pub fn resolve(&self, ty: &Type) -> Type {
        self.subst.apply(ty)
    }

    fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar::new(id)
    }

    fn fresh(&mut self) -> Type {
        Type::Var(self.fresh_var())
    }

    /// Lowers a written type term. Type variables with the same name share
    /// one fresh variable through `vars`.
    pub fn lower(&mut self, node: &TypeNode, vars: &mut FxHashMap<String, TypeVar>) -> Type {
        match node {
            TypeNode::Var(name) => {
                if let Some(var) = vars.get(name) {
                    return Type::Var(var.clone());
                }
                let var = TypeVar::with_name(self.fresh_var().id, name.clone());
                vars.insert(name.clone(), var.clone());
                Type::Var(var)
            }
            TypeNode::Constructor(name) => Type::Con(name.clone()),
            TypeNode::Constraint(constraint) => Type::App(
                Box::new(Type::Con(constraint.class_name.clone())),
                constraint
                    .params
                    .iter()
                    .map(|param| self.lower(param, vars))
                    .collect(),
            ),
            TypeNode::Constrained { body, .. } => self.lower(body, vars),
            TypeNode::Function { from, to } => {
                let params = from.iter().map(|param| self.lower(param, vars)).collect();
                let result = self.lower(to, vars);
                Type::curried(params, result)
            }
            TypeNode::Application { base, args } => {
                let base = self.lower(base, vars);
                let args = args.iter().map(|arg| self.lower(arg, vars)).collect();
                Type::App(Box::new(base), args)
            }
            TypeNode::List(element) => Type::list(self.lower(element, vars)),
            TypeNode::Tuple(elements) => Type::Tuple(
                elements
                    .iter()
                    .map(|element| self.lower(element, vars))
                    .collect(),
            ),
            TypeNode::Data { name, .. } => Type::Con(name.clone()),
            TypeNode::IfThenElse { .. } => self.fresh(),
        }
    }

    /// Fresh copies of a signature's input types and return type.
    pub fn instantiate(&mut self, signature: &FunctionTypeSignature) -> (Vec<Type>, Type) {
        let mut vars = FxHashMap::default();
        let inputs = signature
            .input_types
            .iter()
            .map(|input| self.lower(input, &mut vars))
            .collect();
        let result = self.lower(&signature.return_type, &mut vars);
        (inputs, result)
    }

    fn fresh_numeric(&mut self) -> Type {
        let var = self.fresh_var();
        self.numeric.insert(var.clone());
        Type::Var(var)
    }

    /// Unifies both types under the current substitution and records the
    /// result. Mismatches report the two whole types, fully resolved. A
    /// unifier that would give a numeric literal a non-numeric type is
    /// rejected and leaves the substitution untouched.
    pub fn constrain(&mut self, expected: &Type, found: &Type) -> Result<(), TypeError> {
        let expected = self.subst.apply(expected);
        let found = self.subst.apply(found);
        match unify(&expected, &found, &self.aliases) {
            Ok(s) => {
                let subst = self.subst.compose(&s);
                self.check_numeric(&subst)?;
                self.subst = subst;
                Ok(())
            }
            Err(UnifyError::Mismatch { .. }) => {
                Err(TypeError::type_mismatch(expected, found))
            }
            Err(err) => Err(TypeError::from_unify_error(err)),
        }
    }

    fn check_numeric(&self, subst: &Substitution) -> Result<(), TypeError> {
        for var in &self.numeric {
            let resolved = subst.apply(&Type::Var(var.clone()));
            let numeric = match self.aliases.expand(&resolved) {
                Type::Var(_) => true,
                Type::Con(name) => NUMERIC_KINDS.contains(&name.as_str()),
                _ => false,
            };
            if !numeric {
                return Err(TypeError::NonNumericLiteral { found: resolved });
            }
        }
        Ok(())
    }

    fn constructor_type(&mut self, name: &str) -> Option<Type> {
        let info = self.globals.constructors.get(name).copied()?;
        let mut vars = FxHashMap::default();
        let fields = info
            .fields
            .iter()
            .map(|field| self.lower(&field.value, &mut vars))
            .collect();
        Some(Type::curried(fields, Type::con(info.record)))
    }

    /// Resolves a name used as a value or infix operator.
    fn lookup(&mut self, env: &TypeEnv, name: &str) -> Type {
        if let Some(ty) = env.lookup(name) {
            return ty.clone();
        }
        if let Some(signature) = self.globals.signatures.get(name).copied() {
            let (inputs, result) = self.instantiate(signature);
            return Type::curried(inputs, result);
        }
        if let Some(ty) = self.constructor_type(name) {
            return ty;
        }
        if let Some(ty) = self.builtin(name) {
            return ty;
        }
        log::trace!("`{}` is not declared, typing it with a fresh variable", name);
        self.fresh()
    }

    /// The name is bound by the program rather than by the built-in table.
    fn is_declared(&self, env: &TypeEnv, name: &str) -> bool {
        env.lookup(name).is_some()
            || self.globals.signatures.contains_key(name)
            || self.globals.constructors.contains_key(name)
    }

    fn builtin(&mut self, name: &str) -> Option<Type> {
        let ty = match name {
            "True" | "False" => Type::bool(),
            "+" | "-" | "*" | "/" | "^" | "**" | "div" | "mod" | "rem" | "quot" => {
                let a = self.fresh();
                Type::curried(vec![a.clone(), a.clone()], a)
            }
            "==" | "/=" | "!=" | "<" | ">" | "<=" | ">=" => {
                let a = self.fresh();
                Type::curried(vec![a.clone(), a], Type::bool())
            }
            "&&" | "||" => Type::curried(vec![Type::bool(), Type::bool()], Type::bool()),
            "not" => Type::func(Type::bool(), Type::bool()),
            "++" => {
                let list = Type::list(self.fresh());
                Type::curried(vec![list.clone(), list.clone()], list)
            }
            ":" => {
                let a = self.fresh();
                let list = Type::list(a.clone());
                Type::curried(vec![a, list.clone()], list)
            }
            "." => {
                let (a, b, c) = (self.fresh(), self.fresh(), self.fresh());
                Type::curried(
                    vec![Type::func(b.clone(), c.clone()), Type::func(a.clone(), b)],
                    Type::func(a, c),
                )
            }
            _ => return None,
        };
        Some(ty)
    }

    /// Binds the names in `pattern` against the type it is matched with.
    pub fn bind_pattern(
        &mut self,
        pattern: &Pattern,
        expected: &Type,
        env: &mut TypeEnv,
    ) -> Result<(), TypeError> {
        match pattern {
            Pattern::Wildcard => Ok(()),

            Pattern::Variable(symbol) => {
                env.insert(symbol.value.clone(), expected.clone());
                Ok(())
            }

            Pattern::Literal(literal) => {
                let found = self.infer_primitive(env, literal)?;
                self.constrain(expected, &found)
                    .map_err(|e| e.with_context("literal pattern"))
            }

            Pattern::Constructor { name, patterns } => {
                if (name == "True" || name == "False") && patterns.is_empty() {
                    return self.constrain(expected, &Type::bool());
                }
                let info = self
                    .globals
                    .constructors
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| TypeError::UnknownConstructor { name: name.clone() })?;
                if info.fields.len() != patterns.len() {
                    return Err(TypeError::ConstructorArity {
                        name: name.clone(),
                        expected: info.fields.len(),
                        found: patterns.len(),
                    });
                }
                self.constrain(expected, &Type::con(info.record))
                    .map_err(|e| e.with_context(format!("pattern `{}`", name)))?;

                let mut vars = FxHashMap::default();
                for (field, sub_pattern) in info.fields.iter().zip(patterns) {
                    let field_ty = self.lower(&field.value, &mut vars);
                    self.bind_pattern(sub_pattern, &field_ty, env)?;
                }
                Ok(())
            }

            Pattern::List { elements } => {
                let element = self.fresh();
                self.constrain(expected, &Type::list(element.clone()))
                    .map_err(|e| e.with_context("list pattern"))?;
                for sub_pattern in elements {
                    self.bind_pattern(sub_pattern, &element, env)?;
                }
                Ok(())
            }

            Pattern::Cons { head, tail } => {
                let element = self.fresh();
                let list = Type::list(element.clone());
                self.constrain(expected, &list)
                    .map_err(|e| e.with_context("cons pattern"))?;
                self.bind_pattern(head, &element, env)?;
                self.bind_pattern(tail, &list, env)
            }

            Pattern::As { alias, pattern } => {
                self.bind_pattern(alias, expected, env)?;
                self.bind_pattern(pattern, expected, env)
            }

            Pattern::Tuple { elements } => {
                let types: Vec<Type> = elements.iter().map(|_| self.fresh()).collect();
                self.constrain(expected, &Type::Tuple(types.clone()))
                    .map_err(|e| e.with_context("tuple pattern"))?;
                for (sub_pattern, ty) in elements.iter().zip(&types) {
                    self.bind_pattern(sub_pattern, ty, env)?;
                }
                Ok(())
            }
        }
    }

    pub fn infer_expr(&mut self, env: &TypeEnv, expr: &Expression) -> Result<Type, TypeError> {
        match &expr.body {
            ExpressionBody::Primitive(primitive) => self.infer_primitive(env, primitive),

            ExpressionBody::Operation(operation) => self.infer_operation(env, operation),

            ExpressionBody::Tuple(tuple) => {
                let mut types = Vec::with_capacity(tuple.elements.len());
                for element in &tuple.elements {
                    types.push(self.infer_expr(env, element)?);
                }
                Ok(Type::Tuple(types))
            }

            ExpressionBody::IfThenElse(branch) => {
                let condition = self.infer_expr(env, &branch.condition)?;
                self.constrain(&Type::bool(), &condition)
                    .map_err(|e| e.with_context("if condition"))?;
                let then = self.infer_expr(env, &branch.then)?;
                let otherwise = self.infer_expr(env, &branch.otherwise)?;
                self.constrain(&then, &otherwise)
                    .map_err(|e| e.with_context("else branch"))?;
                Ok(self.resolve(&then))
            }

            ExpressionBody::Cons(cons) => {
                let head = self.infer_expr(env, &cons.head)?;
                let tail = self.infer_expr(env, &cons.tail)?;
                let list = Type::list(head);
                self.constrain(&list, &tail)
                    .map_err(|e| e.with_context("tail of `:`"))?;
                Ok(self.resolve(&list))
            }

            ExpressionBody::Data(data) => self.infer_data(env, data),

            ExpressionBody::Composition(composition) => {
                let left = self.infer_expr(env, &composition.left)?;
                let right = self.infer_expr(env, &composition.right)?;
                let (a, b, c) = (self.fresh(), self.fresh(), self.fresh());
                self.constrain(&Type::func(b.clone(), c.clone()), &left)
                    .map_err(|e| e.with_context("left side of `.`"))?;
                self.constrain(&Type::func(a.clone(), b), &right)
                    .map_err(|e| e.with_context("right side of `.`"))?;
                Ok(self.resolve(&Type::func(a, c)))
            }

            ExpressionBody::Lambda(lambda) => {
                let mut scope = TypeEnv::with_parent(env.clone());
                let mut params = Vec::with_capacity(lambda.parameters.len());
                for parameter in &lambda.parameters {
                    let ty = self.fresh();
                    self.bind_pattern(parameter, &ty, &mut scope)?;
                    params.push(ty);
                }
                let body = self.infer_expr(&scope, &lambda.body)?;
                Ok(self.resolve(&Type::curried(params, body)))
            }

            ExpressionBody::Application(application) => {
                let function = self.infer_expr(env, &application.function)?;
                let argument = self.infer_expr(env, &application.parameter)?;
                let result = self.fresh();
                self.constrain(&function, &Type::func(argument, result.clone()))
                    .map_err(|e| e.with_context("application"))?;
                Ok(self.resolve(&result))
            }

            ExpressionBody::InfixApplication(infix) => {
                let name = infix.operator.value.as_str();
                if name == "++" && !self.is_declared(env, name) {
                    let left = self.infer_expr(env, &infix.left)?;
                    let right = self.infer_expr(env, &infix.right)?;
                    return self.infer_concat(name, &left, &right);
                }
                let operator = self.lookup(env, name);
                let left = self.infer_expr(env, &infix.left)?;
                let right = self.infer_expr(env, &infix.right)?;
                let result = self.fresh();
                self.constrain(
                    &operator,
                    &Type::curried(vec![left, right], result.clone()),
                )
                .map_err(|e| e.with_context(format!("operator `{}`", infix.operator.value)))?;
                Ok(self.resolve(&result))
            }
        }
    }

    fn infer_primitive(&mut self, env: &TypeEnv, primitive: &Primitive) -> Result<Type, TypeError> {
        match primitive {
            Primitive::Number { numeric_type, .. } => {
                if numeric_type.is_empty() || numeric_type == GENERIC_NUMBER {
                    Ok(self.fresh_numeric())
                } else {
                    Ok(Type::Con(numeric_type.clone()))
                }
            }
            Primitive::Boolean { .. } => Ok(Type::con(BOOL)),
            Primitive::Char { .. } => Ok(Type::con(CHAR)),
            Primitive::String { .. } => Ok(Type::con(STRING)),
            Primitive::Null { .. } | Primitive::Undefined { .. } => Ok(self.fresh()),
            Primitive::Symbol(symbol) => Ok(self.lookup(env, &symbol.value)),
            Primitive::List { elements, .. } => {
                let element = self.fresh();
                for item in elements {
                    let found = self.infer_expr(env, item)?;
                    self.constrain(&element, &found)
                        .map_err(|e| e.with_context("list element"))?;
                }
                Ok(self.resolve(&Type::list(element)))
            }
        }
    }

    fn infer_operation(&mut self, env: &TypeEnv, operation: &Operation) -> Result<Type, TypeError> {
        let (left, right) = operation.operands();
        let left = self.infer_expr(env, left)?;
        let right = self.infer_expr(env, right)?;
        let operator = operation.operator();

        match operation {
            Operation::Arithmetic { .. } | Operation::Bitwise { .. } => {
                self.constrain(&left, &right)
                    .map_err(|e| e.with_context(format!("operands of `{}`", operator)))?;
                let kinds = match operation {
                    Operation::Bitwise { .. } => INTEGRAL_KINDS,
                    _ => NUMERIC_KINDS,
                };
                self.check_operand(&operator, &left, |ty| match ty {
                    Type::Con(name) => kinds.contains(&name.as_str()),
                    _ => false,
                })
            }
            Operation::Comparison { .. } => {
                self.constrain(&left, &right)
                    .map_err(|e| e.with_context(format!("operands of `{}`", operator)))?;
                Ok(Type::bool())
            }
            Operation::Logical { .. } => {
                self.constrain(&Type::bool(), &left)
                    .map_err(|e| e.with_context(format!("left operand of `{}`", operator)))?;
                self.constrain(&Type::bool(), &right)
                    .map_err(|e| e.with_context(format!("right operand of `{}`", operator)))?;
                Ok(Type::bool())
            }
            Operation::Concat { .. } => self.infer_concat(&operator, &left, &right),
        }
    }

    /// `++` joins two lists or two strings of the same type.
    fn infer_concat(&mut self, operator: &str, left: &Type, right: &Type) -> Result<Type, TypeError> {
        self.constrain(left, right)
            .map_err(|e| e.with_context(format!("operands of `{}`", operator)))?;
        self.check_operand(operator, left, |ty| match ty {
            Type::List(_) => true,
            Type::Con(name) => name == STRING,
            _ => false,
        })
    }

    /// Accepts an operand that is still a variable or satisfies `allowed`
    /// after alias expansion, and returns its resolved type.
    fn check_operand(
        &self,
        operator: &str,
        operand: &Type,
        allowed: impl Fn(&Type) -> bool,
    ) -> Result<Type, TypeError> {
        let resolved = self.resolve(operand);
        let expanded = self.aliases.expand(&resolved);
        if matches!(expanded, Type::Var(_)) || allowed(&expanded) {
            Ok(resolved)
        } else {
            Err(TypeError::UnsupportedOperand {
                operator: operator.to_string(),
                found: resolved,
            })
        }
    }

    fn infer_data(&mut self, env: &TypeEnv, data: &DataExpression) -> Result<Type, TypeError> {
        let name = &data.name.value;
        let info = self
            .globals
            .constructors
            .get(name.as_str())
            .copied()
            .ok_or_else(|| TypeError::UnknownConstructor { name: name.clone() })?;

        let positional = info.fields.iter().all(|field| field.name.is_none());
        if positional && info.fields.len() != data.contents.len() {
            return Err(TypeError::ConstructorArity {
                name: name.clone(),
                expected: info.fields.len(),
                found: data.contents.len(),
            });
        }

        let mut vars = FxHashMap::default();
        for (index, field_expr) in data.contents.iter().enumerate() {
            let declared = if positional {
                info.fields.get(index)
            } else {
                info.fields.iter().find(|field| {
                    field
                        .name
                        .as_ref()
                        .map_or(false, |field_name| field_name.value == field_expr.name.value)
                })
            };
            let declared = declared.ok_or_else(|| TypeError::UnknownField {
                constructor: name.clone(),
                field: field_expr.name.value.clone(),
            })?;

            let expected = self.lower(&declared.value, &mut vars);
            let found = self.infer_expr(env, &field_expr.expression)?;
            self.constrain(&expected, &found).map_err(|e| {
                e.with_context(format!("field `{}` of `{}`", field_expr.name.value, name))
            })?;
        }

        Ok(Type::con(info.record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> Type {
        Type::con("Int")
    }

    fn program() -> Program {
        Program::new(vec![
            Declaration::TypeSignature(FunctionTypeSignature::new(
                "doble",
                vec![TypeNode::constructor("Int")],
                TypeNode::constructor("Int"),
            )),
            Declaration::TypeSignature(FunctionTypeSignature::new(
                "size",
                vec![TypeNode::list(TypeNode::var("a"))],
                TypeNode::constructor("Int"),
            )),
            Declaration::TypeAlias(TypeAlias {
                name: Symbol::new("Name"),
                value: TypeNode::constructor("String"),
            }),
            Declaration::Record(Record {
                name: Symbol::new("Person"),
                contents: vec![Constructor {
                    name: "Person".to_string(),
                    fields: vec![
                        Field::named("name", TypeNode::constructor("Name")),
                        Field::named("age", TypeNode::constructor("Int")),
                    ],
                }],
            }),
            Declaration::Record(Record {
                name: Symbol::new("Point"),
                contents: vec![Constructor {
                    name: "Point".to_string(),
                    fields: vec![
                        Field::positional(TypeNode::constructor("Int")),
                        Field::positional(TypeNode::constructor("Int")),
                    ],
                }],
            }),
        ])
    }

    fn infer_in(program: &Program, expr: &Expression) -> Result<Type, TypeError> {
        let globals = GlobalEnv::build(program);
        let mut infer = Infer::new(&globals);
        let ty = infer.infer_expr(&TypeEnv::empty(), expr)?;
        Ok(infer.resolve(&ty))
    }

    fn infer(expr: &Expression) -> Result<Type, TypeError> {
        infer_in(&program(), expr)
    }

    #[test]
    fn test_infer_literals() {
        assert_eq!(infer(&Expression::number("Int", 1.0)), Ok(int()));
        assert_eq!(infer(&Expression::boolean(true)), Ok(Type::bool()));
        assert_eq!(infer(&Expression::char("c")), Ok(Type::con("Char")));
        assert_eq!(infer(&Expression::string("hi")), Ok(Type::con("String")));
    }

    #[test]
    fn test_generic_number_is_a_variable() {
        let ty = infer(&Expression::number(GENERIC_NUMBER, 1.0)).unwrap();
        assert!(matches!(ty, Type::Var(_)));
    }

    #[test]
    fn test_generic_number_takes_a_numeric_kind() {
        let list = Expression::list(vec![
            Expression::number(GENERIC_NUMBER, 1.0),
            Expression::number("Double", 2.5),
        ]);
        assert_eq!(infer(&list), Ok(Type::list(Type::con("Double"))));
    }

    #[test]
    fn test_generic_number_is_never_bool_or_string() {
        let condition = Expression::if_then_else(
            Expression::number(GENERIC_NUMBER, 1.0),
            Expression::string("a"),
            Expression::string("b"),
        );
        assert_eq!(
            infer(&condition),
            Err(TypeError::NonNumericLiteral { found: Type::bool() })
        );

        let mixed = Expression::list(vec![
            Expression::number(GENERIC_NUMBER, 1.0),
            Expression::string("a"),
        ]);
        let err = infer(&mixed).unwrap_err();
        assert_eq!(err.to_string(), "numeric literal used as a value of type String");
    }

    #[test]
    fn test_infix_concat_on_strings() {
        let strings = Expression::infix("++", Expression::string("a"), Expression::string("!"));
        assert_eq!(infer(&strings), Ok(Type::con("String")));

        let lists = Expression::infix(
            "++",
            Expression::list(vec![Expression::boolean(true)]),
            Expression::list(vec![]),
        );
        assert_eq!(infer(&lists), Ok(Type::list(Type::bool())));

        let numbers = Expression::infix(
            "++",
            Expression::number("Int", 1.0),
            Expression::number("Int", 2.0),
        );
        assert!(matches!(
            infer(&numbers),
            Err(TypeError::UnsupportedOperand { .. })
        ));
    }

    #[test]
    fn test_numeric_kinds_do_not_widen() {
        let expr = Expression::arithmetic(
            ArithmeticOperator::Add,
            Expression::number("Int", 1.0),
            Expression::number("Double", 1.5),
        );
        assert!(matches!(infer(&expr), Err(TypeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_list_elements_unify() {
        let list = Expression::list(vec![Expression::string("a"), Expression::string("b")]);
        assert_eq!(infer(&list), Ok(Type::list(Type::con("String"))));

        let mixed = Expression::list(vec![Expression::number("Int", 1.0), Expression::string("a")]);
        let err = infer(&mixed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch in list element: expected Int, found String"
        );
    }

    #[test]
    fn test_arithmetic_rejects_strings() {
        let expr = Expression::arithmetic(
            ArithmeticOperator::Mul,
            Expression::string("a"),
            Expression::string("b"),
        );
        assert!(matches!(
            infer(&expr),
            Err(TypeError::UnsupportedOperand { .. })
        ));
    }

    #[test]
    fn test_comparison_and_logical() {
        let expr = Expression::logical(
            LogicalOperator::And,
            Expression::comparison(
                ComparisonOperator::Lt,
                Expression::number("Int", 1.0),
                Expression::number("Int", 2.0),
            ),
            Expression::boolean(false),
        );
        assert_eq!(infer(&expr), Ok(Type::bool()));
    }

    #[test]
    fn test_concat_strings_and_lists() {
        let strings = Expression::concat(Expression::string("a"), Expression::string("b"));
        assert_eq!(infer(&strings), Ok(Type::con("String")));

        let numbers = Expression::concat(
            Expression::number("Int", 1.0),
            Expression::number("Int", 2.0),
        );
        assert!(matches!(
            infer(&numbers),
            Err(TypeError::UnsupportedOperand { .. })
        ));
    }

    #[test]
    fn test_if_requires_bool_condition() {
        let expr = Expression::if_then_else(
            Expression::number("Int", 1.0),
            Expression::string("a"),
            Expression::string("b"),
        );
        assert!(matches!(infer(&expr), Err(TypeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_application_of_signature() {
        let expr = Expression::call(
            Expression::symbol("doble"),
            vec![Expression::number("Int", 3.0)],
        );
        assert_eq!(infer(&expr), Ok(int()));

        let bad = Expression::call(Expression::symbol("doble"), vec![Expression::string("x")]);
        assert!(infer(&bad).is_err());
    }

    #[test]
    fn test_signature_variables_are_instantiated_per_use() {
        let expr = Expression::tuple(vec![
            Expression::call(
                Expression::symbol("size"),
                vec![Expression::list(vec![Expression::string("a")])],
            ),
            Expression::call(
                Expression::symbol("size"),
                vec![Expression::list(vec![Expression::boolean(true)])],
            ),
        ]);
        assert_eq!(infer(&expr), Ok(Type::Tuple(vec![int(), int()])));
    }

    #[test]
    fn test_lambda_type() {
        let expr = Expression::lambda(
            vec![Pattern::variable("x")],
            Expression::arithmetic(
                ArithmeticOperator::Add,
                Expression::symbol("x"),
                Expression::number("Int", 1.0),
            ),
        );
        assert_eq!(infer(&expr), Ok(Type::func(int(), int())));
    }

    #[test]
    fn test_composition_type() {
        let expr = Expression::compose(Expression::symbol("doble"), Expression::symbol("size"));
        let ty = infer(&expr).unwrap();
        match ty {
            Type::Func(param, result) => {
                assert!(matches!(*param, Type::List(_)));
                assert_eq!(*result, int());
            }
            other => panic!("expected a function type, got {}", other),
        }
    }

    #[test]
    fn test_infix_uses_operator_table() {
        let expr = Expression::infix(
            "div",
            Expression::number("Int", 10.0),
            Expression::number("Int", 2.0),
        );
        assert_eq!(infer(&expr), Ok(int()));

        let cons = Expression::infix(
            ":",
            Expression::number("Int", 1.0),
            Expression::list(vec![]),
        );
        assert_eq!(infer(&cons), Ok(Type::list(int())));
    }

    #[test]
    fn test_cons_expression() {
        let expr = Expression::cons(
            Expression::string("a"),
            Expression::list(vec![Expression::number("Int", 1.0)]),
        );
        assert!(matches!(infer(&expr), Err(TypeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_data_expression_named_fields() {
        let expr = Expression::data(
            "Person",
            vec![
                ("name", Expression::string("Ada")),
                ("age", Expression::number("Int", 36.0)),
            ],
        );
        assert_eq!(infer(&expr), Ok(Type::con("Person")));

        let wrong = Expression::data("Person", vec![("age", Expression::string("old"))]);
        assert_eq!(
            infer(&wrong).unwrap_err().to_string(),
            "type mismatch in field `age` of `Person`: expected Int, found String"
        );

        let unknown = Expression::data("Person", vec![("email", Expression::string("a@b"))]);
        assert!(matches!(
            infer(&unknown),
            Err(TypeError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_data_expression_positional_fields() {
        let expr = Expression::data("Point", vec![("0", Expression::number("Int", 1.0))]);
        assert!(matches!(
            infer(&expr),
            Err(TypeError::ConstructorArity {
                expected: 2,
                found: 1,
                ..
            })
        ));
        let missing = Expression::data("Nope", vec![]);
        assert!(matches!(
            infer(&missing),
            Err(TypeError::UnknownConstructor { .. })
        ));
    }

    #[test]
    fn test_constructor_as_function() {
        let expr = Expression::call(
            Expression::symbol("Point"),
            vec![Expression::number("Int", 1.0), Expression::number("Int", 2.0)],
        );
        assert_eq!(infer(&expr), Ok(Type::con("Point")));
    }

    #[test]
    fn test_bind_cons_and_tuple_patterns() {
        let program = program();
        let globals = GlobalEnv::build(&program);
        let mut infer = Infer::new(&globals);
        let mut env = TypeEnv::empty();

        let pattern = Pattern::cons(Pattern::variable("x"), Pattern::variable("xs"));
        infer
            .bind_pattern(&pattern, &Type::list(int()), &mut env)
            .unwrap();
        assert_eq!(infer.resolve(env.lookup("x").unwrap()), int());
        assert_eq!(infer.resolve(env.lookup("xs").unwrap()), Type::list(int()));

        let tuple = Pattern::tuple(vec![Pattern::Wildcard, Pattern::variable("y")]);
        let err = infer.bind_pattern(&tuple, &int(), &mut env).unwrap_err();
        assert!(matches!(err, TypeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_bind_constructor_pattern_through_alias() {
        let program = program();
        let globals = GlobalEnv::build(&program);
        let mut infer = Infer::new(&globals);
        let mut env = TypeEnv::empty();

        let pattern = Pattern::constructor(
            "Person",
            vec![Pattern::variable("n"), Pattern::Wildcard],
        );
        infer
            .bind_pattern(&pattern, &Type::con("Person"), &mut env)
            .unwrap();
        assert_eq!(env.lookup("n"), Some(&Type::con("Name")));

        // `Name` expands to `String`, so a string literal pattern fits
        let mut scope = TypeEnv::empty();
        infer
            .bind_pattern(&Pattern::string("Ada"), &Type::con("Name"), &mut scope)
            .unwrap();
    }

    #[test]
    fn test_bind_literal_pattern_mismatch() {
        let program = program();
        let globals = GlobalEnv::build(&program);
        let mut infer = Infer::new(&globals);
        let err = infer
            .bind_pattern(&Pattern::string("0"), &int(), &mut TypeEnv::empty())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch in literal pattern: expected Int, found String"
        );
    }
}
