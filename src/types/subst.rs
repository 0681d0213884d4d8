use fxhash::FxHashMap;

use super::ty::{Type, TypeVar};

/// Mapping from type variables to the types they were bound to.
///
/// Bindings are kept acyclic by the occurs check in unification, so
/// [`Substitution::apply`] can chase chains of variables to a fixed point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(pub FxHashMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(FxHashMap::default())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut map = FxHashMap::default();
        map.insert(var, ty);
        Substitution(map)
    }

    /// Resolves every bound variable in `ty`, transitively.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Con(_) => ty.clone(),
            Type::Var(v) => match self.0.get(v) {
                Some(bound) => self.apply(bound),
                None => ty.clone(),
            },
            Type::App(base, args) => Type::App(
                Box::new(self.apply(base)),
                args.iter().map(|arg| self.apply(arg)).collect(),
            ),
            Type::Func(t1, t2) => Type::func(self.apply(t1), self.apply(t2)),
            Type::List(element) => Type::list(self.apply(element)),
            Type::Tuple(elements) => {
                Type::Tuple(elements.iter().map(|e| self.apply(e)).collect())
            }
        }
    }

    /// `self` followed by `other`: applying the result is the same as
    /// applying `self` and then `other`.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = FxHashMap::default();

        for (var, ty) in &self.0 {
            result.insert(var.clone(), other.apply(ty));
        }

        for (var, ty) in &other.0 {
            if !result.contains_key(var) {
                result.insert(var.clone(), ty.clone());
            }
        }

        Substitution(result)
    }

    pub fn insert(&mut self, var: TypeVar, ty: Type) {
        self.0.insert(var, ty);
    }
}
