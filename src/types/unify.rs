use std::fmt;

use fxhash::{FxHashMap, FxHashSet};

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { expected: Type, found: Type },
    OccursCheck { var: TypeVar, ty: Type },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnifyError::Mismatch { expected, found } => {
                write!(
                    f,
                    "type mismatch: expected {}, found {}",
                    expected.pretty(),
                    found.pretty()
                )
            }
            UnifyError::OccursCheck { var, ty } => {
                write!(
                    f,
                    "occurs check: cannot construct infinite type {} = {}",
                    Type::Var(var.clone()).pretty(),
                    ty.pretty()
                )
            }
        }
    }
}

impl std::error::Error for UnifyError {}

/// Type aliases declared in the program, already lowered to [`Type`].
#[derive(Debug, Clone, Default)]
pub struct Aliases(FxHashMap<String, Type>);

impl Aliases {
    pub fn new() -> Self {
        Aliases::default()
    }

    /// Later definitions replace earlier ones.
    pub fn insert(&mut self, name: String, ty: Type) {
        self.0.insert(name, ty);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Replaces alias names at the head of `ty` until the head is no longer
    /// an alias. Each alias is expanded at most once, so cyclic aliases stop
    /// at the first repetition.
    pub fn expand(&self, ty: &Type) -> Type {
        let mut seen = FxHashSet::default();
        let mut current = ty.clone();
        loop {
            let next = match &current {
                Type::Con(name) if seen.insert(name.clone()) => self.0.get(name).cloned(),
                Type::App(base, args) => match &**base {
                    Type::Con(name) if seen.insert(name.clone()) => self
                        .0
                        .get(name)
                        .map(|target| Type::App(Box::new(target.clone()), args.clone())),
                    _ => None,
                },
                _ => None,
            };
            match next {
                Some(expanded) => current = expanded,
                None => return current,
            }
        }
    }
}

/// Check if a type variable occurs within a type.
///
/// Binding `'t0` to `['t0]` would describe an infinite type; unification
/// refuses such bindings instead of looping.
fn occurs_in(var: &TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Con(_) => false,
        Type::Var(v) => v == var,
        Type::App(base, args) => occurs_in(var, base) || args.iter().any(|a| occurs_in(var, a)),
        Type::Func(t1, t2) => occurs_in(var, t1) || occurs_in(var, t2),
        Type::List(element) => occurs_in(var, element),
        Type::Tuple(elements) => elements.iter().any(|e| occurs_in(var, e)),
    }
}

fn bind(var: &TypeVar, ty: &Type) -> Result<Substitution, UnifyError> {
    if occurs_in(var, ty) {
        Err(UnifyError::OccursCheck {
            var: var.clone(),
            ty: ty.clone(),
        })
    } else {
        Ok(Substitution::singleton(var.clone(), ty.clone()))
    }
}

/// Unify two types, finding a substitution that makes them equal.
///
/// ```text
/// unify(Int, Int)                 = ∅
/// unify('t0, Int)                 = [t0 := Int]
/// unify('t0 -> 't1, Int -> Bool)  = [t0 := Int, t1 := Bool]
/// unify(Number, Int)              = ∅     where `type Number = Int`
/// unify(Int, String)              = Mismatch
/// unify('t0, ['t0])               = OccursCheck
/// ```
///
/// Named types are compared only after alias expansion. For function types
/// the substitution found for the parameters is applied to the results
/// before they are unified, and the two are composed in that order.
///
/// Aliases that refer to themselves through a type constructor
/// (`type A = [A]`) expand forever, so a pair of types already being
/// unified through an expansion is a mismatch when it comes around again.
pub fn unify(t1: &Type, t2: &Type, aliases: &Aliases) -> Result<Substitution, UnifyError> {
    unify_guarded(t1, t2, aliases, &mut FxHashSet::default())
}

fn unify_guarded(
    t1: &Type,
    t2: &Type,
    aliases: &Aliases,
    expanding: &mut FxHashSet<(Type, Type)>,
) -> Result<Substitution, UnifyError> {
    log::trace!("unify {} ~ {}", t1, t2);

    match (t1, t2) {
        (Type::Var(v1), Type::Var(v2)) if v1 == v2 => return Ok(Substitution::empty()),
        (Type::Var(v), t) | (t, Type::Var(v)) => return bind(v, t),
        (Type::Con(a), Type::Con(b)) if a == b => return Ok(Substitution::empty()),
        _ => {}
    }

    let e1 = aliases.expand(t1);
    let e2 = aliases.expand(t2);
    if e1 != *t1 || e2 != *t2 {
        let pair = (t1.clone(), t2.clone());
        if !expanding.insert(pair.clone()) {
            return Err(UnifyError::Mismatch {
                expected: t1.clone(),
                found: t2.clone(),
            });
        }
        let result = unify_guarded(&e1, &e2, aliases, expanding);
        expanding.remove(&pair);
        return result;
    }

    match (t1, t2) {
        (Type::Func(t1a, t1b), Type::Func(t2a, t2b)) => {
            let s1 = unify_guarded(t1a, t2a, aliases, expanding)?;
            let s2 = unify_guarded(&s1.apply(t1b), &s1.apply(t2b), aliases, expanding)?;
            Ok(s1.compose(&s2))
        }

        (Type::List(a), Type::List(b)) => unify_guarded(a, b, aliases, expanding),

        (Type::Tuple(xs), Type::Tuple(ys)) if xs.len() == ys.len() => {
            unify_many(xs.iter().zip(ys), aliases, expanding)
        }

        (Type::App(b1, a1), Type::App(b2, a2)) if a1.len() == a2.len() => unify_many(
            std::iter::once((&**b1, &**b2)).chain(a1.iter().zip(a2)),
            aliases,
            expanding,
        ),

        _ => Err(UnifyError::Mismatch {
            expected: t1.clone(),
            found: t2.clone(),
        }),
    }
}

/// Unifies pairs left to right, threading the substitution through.
fn unify_many<'t>(
    pairs: impl Iterator<Item = (&'t Type, &'t Type)>,
    aliases: &Aliases,
    expanding: &mut FxHashSet<(Type, Type)>,
) -> Result<Substitution, UnifyError> {
    let mut subst = Substitution::empty();
    for (a, b) in pairs {
        let s = unify_guarded(&subst.apply(a), &subst.apply(b), aliases, expanding)?;
        subst = subst.compose(&s);
    }
    Ok(subst)
}
