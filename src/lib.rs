//! # Assay - Static Inspection and Type Checking for Functional Programs
//!
//! Assay grades and type checks programs written in Haskell-like languages.
//! It does not parse source text: a per-language front end produces the
//! canonical [`ast::Program`], and everything here reads that tree.
//!
//! ## Architecture Overview
//!
//! 1. **AST** (`ast`) - the language-independent program model, serializable with `serde`
//! 2. **Traversal** (`traverse`) - one pre-order walker with per-shape handlers plus a wildcard
//! 3. **Inspections** (`inspect`) - named boolean questions about a program, used for grading
//! 4. **Type Checking** (`types`) - unification-based checking of clauses against signatures
//!
//! ## Pipeline Flow
//!
//! ```text
//! Front end (out of crate)
//!     ↓
//! ast::Program
//!     ├── [Analyzer] + InspectionRule[] → AnalysisResult[]
//!     └── [check]                       → diagnostic strings
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Closed Node Set
//! Traversal dispatches over [`traverse::Node`], a closed enum of borrowed
//! node shapes. Visitors implement only the methods they care about; the
//! "visit everything" callback is a separate closure parameter.
//!
//! ### Optional Typing
//! Only functions with a declared signature are checked. Everything else
//! is accepted as is, so partially annotated submissions still grade.
//!
//! ### Call-Local State
//! Every `analyze` and `check` call builds its own environments and
//! substitution. Nothing is global, so separate programs can be checked on
//! separate threads.
//!
//! ## Module Structure
//!
//! - [`ast`] - Program model
//! - [`traverse`] - Pre-order traversal
//! - [`inspect`] - Inspection registry, built-in inspections and Mulang rule translation
//! - [`types`] - Type terms, unification and signature checking
//!
//! ## Example
//!
//! ```text
//! doble :: Int -> Int
//! doble x = x * 2
//! ```
//!
//! ```
//! use assay::ast::*;
//! use assay::inspect::{Analyzer, InspectionRule, RuleArgs};
//!
//! let program = Program::new(vec![
//!     Declaration::TypeSignature(FunctionTypeSignature::new(
//!         "doble",
//!         vec![TypeNode::constructor("Int")],
//!         TypeNode::constructor("Int"),
//!     )),
//!     Declaration::Function(FunctionGroup {
//!         name: Symbol::new("doble"),
//!         contents: vec![Clause::unguarded(
//!             vec![Pattern::variable("x")],
//!             Expression::arithmetic(
//!                 ArithmeticOperator::Mul,
//!                 Expression::symbol("x"),
//!                 Expression::number("Int", 2.0),
//!             ),
//!         )],
//!     }),
//! ]);
//!
//! let results = Analyzer::new(&program).analyze(&[InspectionRule::new(
//!     "HasArithmetic",
//!     RuleArgs::named("doble"),
//!     true,
//! )]);
//! assert!(results[0].passed);
//! assert!(assay::types::check(&program).is_empty());
//! ```

pub mod ast;
pub mod inspect;
pub mod traverse;
pub mod types;
