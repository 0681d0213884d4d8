//! # Signature Checking
//!
//! Checks every function that has a declared signature against each of its
//! clauses. Functions without a signature are not checked at all.
//!
//! ## Phases
//!
//! 1. **Environment**: one traversal collects signatures, record
//!    constructors and type aliases into a [`GlobalEnv`].
//! 2. **Clauses**: a second traversal visits every [`FunctionGroup`]. For
//!    each clause the signature is instantiated with fresh variables, the
//!    parameter patterns are bound against the declared inputs, and the
//!    return expression is unified with what is left of the signature.
//!
//! Errors never abort the run. A failing clause produces one diagnostic
//! (one per failing guard for guarded clauses) and checking moves on.
//!
//! ## Example
//!
//! ```text
//! f :: Int -> Int
//! f x = "hi"
//! ```
//!
//! gives
//!
//! ```text
//! Type error in `f` (clause 1): type mismatch in return value: expected Int, found String
//! ```

use super::env::{GlobalEnv, TypeEnv};
use super::error::{Diagnostic, TypeError};
use super::infer::Infer;
use super::ty::Type;
use crate::ast::{Clause, ClauseBody, Expression, FunctionGroup, FunctionTypeSignature, Program};
use crate::traverse::{walk, Node, Visitor};

/// Type checks `program`, returning one rendered diagnostic per error in
/// the order functions and clauses appear. Empty means the program is
/// well typed.
pub fn check(program: &Program) -> Vec<String> {
    diagnostics(program)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Same as [`check`], keeping the diagnostics structured.
pub fn diagnostics(program: &Program) -> Vec<Diagnostic> {
    let globals = GlobalEnv::build(program);
    let mut checker = TypeChecker::new(&globals);
    walk(program.into(), &mut checker);
    checker.finish()
}

pub struct TypeChecker<'g> {
    globals: &'g GlobalEnv<'g>,
    infer: Infer<'g>,
    diagnostics: Vec<Diagnostic>,
}

impl<'g> TypeChecker<'g> {
    pub fn new(globals: &'g GlobalEnv<'g>) -> Self {
        TypeChecker {
            globals,
            infer: Infer::new(globals),
            diagnostics: Vec::new(),
        }
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn check_function(&mut self, group: &FunctionGroup) {
        let signature = match self.globals.signatures.get(group.name.value.as_str()) {
            Some(signature) => *signature,
            None => {
                log::debug!("`{}` has no signature, skipping", group.name.value);
                return;
            }
        };

        log::debug!(
            "checking `{}` ({} clause(s))",
            group.name.value,
            group.contents.len()
        );

        for (index, clause) in group.contents.iter().enumerate() {
            self.infer.reset();
            for error in self.check_clause(signature, clause) {
                self.diagnostics.push(Diagnostic {
                    function: group.name.value.clone(),
                    clause: index + 1,
                    loc: group.name.loc,
                    error,
                });
            }
        }
    }

    /// Only `return` is typed; `body` carries the same expressions for
    /// inspections and is not checked again.
    fn check_clause(&mut self, signature: &FunctionTypeSignature, clause: &Clause) -> Vec<TypeError> {
        let (mut inputs, result) = self.infer.instantiate(signature);
        if clause.parameters.len() > inputs.len() {
            return vec![TypeError::TooManyParameters {
                expected: inputs.len(),
                found: clause.parameters.len(),
            }];
        }

        // Inputs not matched by a parameter belong to the returned function.
        let rest = inputs.split_off(clause.parameters.len());
        let expected = Type::curried(rest, result);

        let mut env = TypeEnv::empty();
        for (pattern, ty) in clause.parameters.iter().zip(&inputs) {
            if let Err(err) = self.infer.bind_pattern(pattern, ty, &mut env) {
                return vec![err];
            }
        }

        match &clause.returns {
            ClauseBody::Unguarded(expr) => self
                .check_return(&env, expr, &expected, "return value")
                .err()
                .into_iter()
                .collect(),
            ClauseBody::Guarded(guards) => {
                let mut errors = Vec::new();
                for guard in guards {
                    let condition = self
                        .infer
                        .infer_expr(&env, &guard.condition)
                        .and_then(|found| {
                            self.infer
                                .constrain(&Type::bool(), &found)
                                .map_err(|e| e.with_context("guard condition"))
                        });
                    if let Err(err) = condition {
                        errors.push(err);
                    }
                    if let Err(err) = self.check_return(&env, &guard.returns, &expected, "guard result") {
                        errors.push(err);
                    }
                }
                errors
            }
        }
    }

    fn check_return(
        &mut self,
        env: &TypeEnv,
        expr: &Expression,
        expected: &Type,
        context: &str,
    ) -> Result<(), TypeError> {
        let found = self.infer.infer_expr(env, expr)?;
        self.infer
            .constrain(expected, &found)
            .map_err(|e| e.with_context(context))
    }
}

impl<'a, 'g> Visitor<'a> for TypeChecker<'g> {
    fn function(&mut self, node: &'a FunctionGroup, _: Option<Node<'a>>) {
        self.check_function(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn int() -> TypeNode {
        TypeNode::constructor("Int")
    }

    fn function(name: &str, clauses: Vec<Clause>) -> Declaration {
        Declaration::Function(FunctionGroup {
            name: Symbol::new(name),
            contents: clauses,
        })
    }

    fn signature(name: &str, inputs: Vec<TypeNode>, result: TypeNode) -> Declaration {
        Declaration::TypeSignature(FunctionTypeSignature::new(name, inputs, result))
    }

    fn times_two() -> Expression {
        Expression::arithmetic(
            ArithmeticOperator::Mul,
            Expression::symbol("x"),
            Expression::number("Int", 2.0),
        )
    }

    #[test]
    fn test_well_typed_function() {
        let program = Program::new(vec![
            signature("f", vec![int()], int()),
            function("f", vec![Clause::unguarded(vec![Pattern::variable("x")], times_two())]),
        ]);
        assert!(check(&program).is_empty());
    }

    #[test]
    fn test_return_mismatch() {
        let program = Program::new(vec![
            signature("f", vec![int()], int()),
            function(
                "f",
                vec![Clause::unguarded(
                    vec![Pattern::variable("x")],
                    Expression::string("hi"),
                )],
            ),
        ]);
        assert_eq!(
            check(&program),
            vec![
                "Type error in `f` (clause 1): type mismatch in return value: expected Int, found String"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_function_without_signature_is_skipped() {
        let program = Program::new(vec![function(
            "g",
            vec![Clause::unguarded(vec![], Expression::string("anything"))],
        )]);
        assert!(check(&program).is_empty());
    }

    #[test]
    fn test_partial_clause_returns_function() {
        // add :: Int -> Int -> Int
        // add x = \y -> x + y
        let program = Program::new(vec![
            signature("add", vec![int(), int()], int()),
            function(
                "add",
                vec![Clause::unguarded(
                    vec![Pattern::variable("x")],
                    Expression::lambda(
                        vec![Pattern::variable("y")],
                        Expression::arithmetic(
                            ArithmeticOperator::Add,
                            Expression::symbol("x"),
                            Expression::symbol("y"),
                        ),
                    ),
                )],
            ),
        ]);
        assert!(check(&program).is_empty());
    }

    #[test]
    fn test_too_many_parameters() {
        let program = Program::new(vec![
            signature("f", vec![int()], int()),
            function(
                "f",
                vec![Clause::unguarded(
                    vec![Pattern::variable("x"), Pattern::variable("y")],
                    Expression::symbol("x"),
                )],
            ),
        ]);
        let found = diagnostics(&program);
        assert_eq!(found.len(), 1);
        assert!(matches!(
            found[0].error,
            TypeError::TooManyParameters {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_each_guard_is_checked() {
        // sign :: Int -> String
        // sign x | x > 0 = "positive"
        //        | 1     = 0
        let program = Program::new(vec![
            signature("sign", vec![int()], TypeNode::constructor("String")),
            function(
                "sign",
                vec![Clause::guarded(
                    vec![Pattern::variable("x")],
                    vec![
                        Guard::new(
                            Expression::comparison(
                                ComparisonOperator::Gt,
                                Expression::symbol("x"),
                                Expression::number("Int", 0.0),
                            ),
                            Expression::string("positive"),
                        ),
                        Guard::new(
                            Expression::number("Int", 1.0),
                            Expression::number("Int", 0.0),
                        ),
                    ],
                )],
            ),
        ]);
        let found = check(&program);
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("guard condition: expected Bool, found Int"));
        assert!(found[1].contains("guard result: expected String, found Int"));
    }

    #[test]
    fn test_clauses_are_checked_independently() {
        let program = Program::new(vec![
            signature("f", vec![int()], int()),
            function(
                "f",
                vec![
                    Clause::unguarded(vec![Pattern::number("Int", 0.0)], Expression::string("zero")),
                    Clause::unguarded(vec![Pattern::variable("x")], times_two()),
                    Clause::unguarded(vec![Pattern::string("s")], Expression::number("Int", 1.0)),
                ],
            ),
        ]);
        let found = diagnostics(&program);
        assert_eq!(
            found.iter().map(|d| d.clause).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_only_return_side_is_typed() {
        let mut clause = Clause::unguarded(vec![Pattern::variable("x")], times_two());
        clause.body = ClauseBody::Unguarded(Expression::string("not checked"));
        let program = Program::new(vec![signature("f", vec![int()], int()), function("f", vec![clause])]);
        assert!(check(&program).is_empty());

        let mut clause = Clause::unguarded(vec![Pattern::variable("x")], times_two());
        clause.returns = ClauseBody::Unguarded(Expression::string("checked"));
        let program = Program::new(vec![signature("f", vec![int()], int()), function("f", vec![clause])]);
        assert_eq!(check(&program).len(), 1);
    }

    #[test]
    fn test_diagnostic_carries_name_location() {
        let loc = SourceLocation::new(Position::new(3, 1, 20), Position::new(3, 2, 21));
        let program = Program::new(vec![
            signature("f", vec![], int()),
            Declaration::Function(FunctionGroup {
                name: Symbol::at("f", loc),
                contents: vec![Clause::unguarded(vec![], Expression::boolean(true))],
            }),
        ]);
        let found = diagnostics(&program);
        assert_eq!(found[0].loc, loc);
        assert!(check(&program)[0].starts_with("Type error in `f` (clause 1, line 3:1)"));
    }
}
