use strum::{Display, EnumIter, IntoStaticStr};

use super::{Inspection, InspectionError, RuleArgs};
use crate::ast::{FunctionGroup, FunctionTypeSignature, Program, Record, TypeAlias};
use crate::traverse::{walk, walk_all, Node, NodeKind, Visitor};

/// Inspections every [`super::Analyzer`] starts with. All of them are
/// scoped to the binding given in the `name` argument; their registry name
/// is the variant name. A missing or non-string `name` (or `usage`) matches
/// nothing, so the inspection evaluates to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, IntoStaticStr)]
pub enum BuiltinInspection {
    /// A function, alias, record or signature with that name exists.
    HasBinding,
    /// Some clause of the function is guarded.
    UsesGuards,
    /// The function contains a wildcard pattern.
    UsesAnonymousVariable,
    /// The function has more than one clause. The misspelling is part of
    /// the rule vocabulary graders already use.
    HasPatternMathing,
    /// Some identifier, string or char in the function equals `usage`.
    Uses,
    HasLambdaExpression,
    HasArithmetic,
    HasComposition,
}

impl Inspection for BuiltinInspection {
    fn evaluate(&self, program: &Program, args: &RuleArgs) -> Result<bool, InspectionError> {
        let name = match args.name() {
            Some(name) => name,
            None => return Ok(false),
        };
        let result = match self {
            BuiltinInspection::HasBinding => has_binding(program, name),
            BuiltinInspection::UsesGuards => program
                .function(name)
                .iter()
                .any(|group| group.contents.iter().any(|clause| clause.is_guarded())),
            BuiltinInspection::UsesAnonymousVariable => {
                contains_kind(program, name, NodeKind::WildcardPattern)
            }
            BuiltinInspection::HasPatternMathing => program
                .function(name)
                .iter()
                .any(|group| group.contents.len() > 1),
            BuiltinInspection::Uses => {
                let usage = match args.usage() {
                    Some(usage) => usage,
                    None => return Ok(false),
                };
                program.function(name).into_iter().any(|group| {
                    let mut uses = false;
                    walk_all(group.into(), |node, _| {
                        uses |= node.value() == Some(usage);
                    });
                    uses
                })
            }
            BuiltinInspection::HasLambdaExpression => {
                contains_kind(program, name, NodeKind::LambdaExpression)
            }
            BuiltinInspection::HasArithmetic => contains_kind(program, name, NodeKind::Arithmetic),
            BuiltinInspection::HasComposition => {
                contains_kind(program, name, NodeKind::CompositionExpression)
            }
        };
        Ok(result)
    }
}

struct BindingFinder<'n> {
    name: &'n str,
    found: bool,
}

impl<'a, 'n> Visitor<'a> for BindingFinder<'n> {
    fn function(&mut self, node: &'a FunctionGroup, _: Option<Node<'a>>) {
        self.found |= node.name.value == self.name;
    }

    fn type_alias(&mut self, node: &'a TypeAlias, _: Option<Node<'a>>) {
        self.found |= node.name.value == self.name;
    }

    fn record(&mut self, node: &'a Record, _: Option<Node<'a>>) {
        self.found |= node.name.value == self.name;
    }

    fn type_signature(&mut self, node: &'a FunctionTypeSignature, _: Option<Node<'a>>) {
        self.found |= node.name.value == self.name;
    }
}

fn has_binding(program: &Program, name: &str) -> bool {
    let mut finder = BindingFinder { name, found: false };
    walk(program.into(), &mut finder);
    finder.found
}

/// Whether a node of `kind` appears anywhere under the function `name`.
fn contains_kind(program: &Program, name: &str, kind: NodeKind) -> bool {
    program.function(name).into_iter().any(|group| {
        let mut found = false;
        walk_all(group.into(), |node, _| found |= node.kind() == kind);
        found
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use strum::IntoEnumIterator;

    fn function(name: &str, clauses: Vec<Clause>) -> Declaration {
        Declaration::Function(FunctionGroup {
            name: Symbol::new(name),
            contents: clauses,
        })
    }

    fn program() -> Program {
        Program::new(vec![
            Declaration::TypeAlias(TypeAlias {
                name: Symbol::new("Name"),
                value: TypeNode::constructor("String"),
            }),
            // f _ [] = []
            // f g (x:xs) | x > 0 = map (\y -> y * 2) xs
            function(
                "f",
                vec![
                    Clause::unguarded(
                        vec![Pattern::Wildcard, Pattern::list(vec![])],
                        Expression::list(vec![]),
                    ),
                    Clause::guarded(
                        vec![
                            Pattern::variable("g"),
                            Pattern::cons(Pattern::variable("x"), Pattern::variable("xs")),
                        ],
                        vec![Guard::new(
                            Expression::comparison(
                                ComparisonOperator::Gt,
                                Expression::symbol("x"),
                                Expression::number("Int", 0.0),
                            ),
                            Expression::call(
                                Expression::symbol("map"),
                                vec![
                                    Expression::lambda(
                                        vec![Pattern::variable("y")],
                                        Expression::arithmetic(
                                            ArithmeticOperator::Mul,
                                            Expression::symbol("y"),
                                            Expression::number("Int", 2.0),
                                        ),
                                    ),
                                    Expression::symbol("xs"),
                                ],
                            ),
                        )],
                    ),
                ],
            ),
            // h = show . length
            function(
                "h",
                vec![Clause::unguarded(
                    vec![],
                    Expression::compose(Expression::symbol("show"), Expression::symbol("length")),
                )],
            ),
        ])
    }

    fn eval(inspection: BuiltinInspection, args: RuleArgs) -> Result<bool, InspectionError> {
        inspection.evaluate(&program(), &args)
    }

    #[test]
    fn test_registry_names() {
        let names: Vec<&'static str> = BuiltinInspection::iter().map(Into::into).collect();
        assert_eq!(
            names,
            vec![
                "HasBinding",
                "UsesGuards",
                "UsesAnonymousVariable",
                "HasPatternMathing",
                "Uses",
                "HasLambdaExpression",
                "HasArithmetic",
                "HasComposition",
            ]
        );
    }

    #[test]
    fn test_has_binding() {
        assert_eq!(eval(BuiltinInspection::HasBinding, RuleArgs::named("f")), Ok(true));
        assert_eq!(eval(BuiltinInspection::HasBinding, RuleArgs::named("Name")), Ok(true));
        assert_eq!(eval(BuiltinInspection::HasBinding, RuleArgs::named("x")), Ok(false));
    }

    #[test]
    fn test_scoped_to_named_function() {
        use BuiltinInspection::*;
        for inspection in [UsesGuards, UsesAnonymousVariable, HasPatternMathing, HasLambdaExpression, HasArithmetic] {
            assert_eq!(eval(inspection, RuleArgs::named("f")), Ok(true), "{}", inspection);
            assert_eq!(eval(inspection, RuleArgs::named("h")), Ok(false), "{}", inspection);
        }
        assert_eq!(eval(HasComposition, RuleArgs::named("h")), Ok(true));
        assert_eq!(eval(HasComposition, RuleArgs::named("f")), Ok(false));
    }

    #[test]
    fn test_uses() {
        let uses = |name: &str, usage: &str| {
            eval(BuiltinInspection::Uses, RuleArgs::named(name).with("usage", usage))
        };
        assert_eq!(uses("f", "map"), Ok(true));
        assert_eq!(uses("f", "filter"), Ok(false));
        assert_eq!(uses("h", "length"), Ok(true));
        assert_eq!(uses("h", "map"), Ok(false));
    }

    #[test]
    fn test_missing_arguments_match_nothing() {
        assert_eq!(eval(BuiltinInspection::UsesGuards, RuleArgs::new()), Ok(false));
        assert_eq!(eval(BuiltinInspection::Uses, RuleArgs::named("f")), Ok(false));
        let numeric_name = RuleArgs::new().with("name", crate::inspect::ArgValue::Number(3.0));
        assert_eq!(eval(BuiltinInspection::HasBinding, numeric_name), Ok(false));
    }
}
