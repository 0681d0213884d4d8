#![allow(dead_code)]

use assay::ast::*;

pub fn int() -> TypeNode {
    TypeNode::constructor("Int")
}

pub fn signature(name: &str, inputs: Vec<TypeNode>, result: TypeNode) -> Declaration {
    Declaration::TypeSignature(FunctionTypeSignature::new(name, inputs, result))
}

pub fn function(name: &str, clauses: Vec<Clause>) -> Declaration {
    Declaration::Function(FunctionGroup {
        name: Symbol::new(name),
        contents: clauses,
    })
}

pub fn record(name: &str, constructors: Vec<(&str, Vec<Field>)>) -> Declaration {
    Declaration::Record(Record {
        name: Symbol::new(name),
        contents: constructors
            .into_iter()
            .map(|(constructor, fields)| Constructor {
                name: constructor.to_string(),
                fields,
            })
            .collect(),
    })
}

pub fn alias(name: &str, value: TypeNode) -> Declaration {
    Declaration::TypeAlias(TypeAlias {
        name: Symbol::new(name),
        value,
    })
}

pub fn var(name: &str) -> Expression {
    Expression::symbol(name)
}

pub fn num(value: f64) -> Expression {
    Expression::number("Int", value)
}

pub fn arith(operator: ArithmeticOperator, left: Expression, right: Expression) -> Expression {
    Expression::arithmetic(operator, left, right)
}

/// `doble :: Int -> Int` / `doble x = x * 2`
pub fn doble() -> Program {
    Program::new(vec![
        signature("doble", vec![int()], int()),
        function(
            "doble",
            vec![Clause::unguarded(
                vec![Pattern::variable("x")],
                arith(ArithmeticOperator::Mul, var("x"), num(2.0)),
            )],
        ),
    ])
}

/// [`doble`] as a front end would emit it, with the name's position.
pub const DOBLE_JSON: &str = r#"{
  "declarations": [
    {
      "TypeSignature": {
        "name": { "value": "doble" },
        "inputTypes": [{ "Constructor": "Int" }],
        "returnType": { "Constructor": "Int" }
      }
    },
    {
      "Function": {
        "name": { "value": "doble", "loc": { "start": { "line": 2, "column": 1, "offset": 21 }, "end": { "line": 2, "column": 6, "offset": 26 } } },
        "contents": [
          {
            "parameters": [{ "Variable": { "value": "x" } }],
            "body": { "Unguarded": { "body": { "Operation": { "Arithmetic": {
              "operator": "*",
              "left": { "body": { "Primitive": { "Symbol": { "value": "x" } } } },
              "right": { "body": { "Primitive": { "Number": { "numericType": "Int", "value": 2 } } } }
            } } } } },
            "return": { "Unguarded": { "body": { "Operation": { "Arithmetic": {
              "operator": "*",
              "left": { "body": { "Primitive": { "Symbol": { "value": "x" } } } },
              "right": { "body": { "Primitive": { "Number": { "numericType": "Int", "value": 2 } } } }
            } } } } },
            "attributes": ["UnguardedBody"]
          }
        ]
      }
    }
  ]
}"#;
