//! Signature checking by unification.
//!
//! [`check`] is the entry point. The submodules are layered bottom-up:
//! [`ty`] and [`subst`] define type terms and substitutions, [`unify`]
//! solves equations between them, [`infer`] types patterns and
//! expressions, and [`check`](mod@check) drives it all per clause.

pub mod check;
pub mod env;
pub mod error;
pub mod infer;
pub mod subst;
pub mod ty;
pub mod unify;

pub use check::{check, diagnostics, TypeChecker};
pub use env::{GlobalEnv, TypeEnv};
pub use error::{Diagnostic, TypeError};
pub use subst::Substitution;
pub use ty::{Type, TypeVar};
pub use unify::{unify, Aliases, UnifyError};
