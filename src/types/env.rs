use fxhash::FxHashMap;

use super::ty::Type;
use crate::ast::{Field, FunctionTypeSignature, Program, Record, TypeAlias, TypeNode};
use crate::traverse::{walk, Node, Visitor};

/// Types of the names bound by patterns in the clause being checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: FxHashMap<String, Type>,
    parent: Option<Box<TypeEnv>>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv::default()
    }

    pub fn with_parent(parent: TypeEnv) -> Self {
        TypeEnv {
            bindings: FxHashMap::default(),
            parent: Some(Box::new(parent)),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    pub fn insert(&mut self, name: String, ty: Type) {
        self.bindings.insert(name, ty);
    }
}

/// Where a data constructor comes from.
#[derive(Debug, Clone, Copy)]
pub struct ConstructorInfo<'a> {
    pub record: &'a str,
    pub fields: &'a [Field],
}

/// Program-wide declarations, collected in one pass before any clause is
/// checked. When a name is declared twice the later declaration wins.
#[derive(Debug, Default)]
pub struct GlobalEnv<'a> {
    pub signatures: FxHashMap<&'a str, &'a FunctionTypeSignature>,
    pub constructors: FxHashMap<&'a str, ConstructorInfo<'a>>,
    pub aliases: FxHashMap<&'a str, &'a TypeNode>,
}

impl<'a> GlobalEnv<'a> {
    pub fn build(program: &'a Program) -> Self {
        let mut env = GlobalEnv::default();
        walk(program.into(), &mut env);
        env
    }
}

impl<'a> Visitor<'a> for GlobalEnv<'a> {
    fn type_signature(&mut self, node: &'a FunctionTypeSignature, _: Option<Node<'a>>) {
        if self.signatures.insert(&node.name.value, node).is_some() {
            log::debug!("signature of `{}` redeclared, keeping the last one", node.name.value);
        }
    }

    fn type_alias(&mut self, node: &'a TypeAlias, _: Option<Node<'a>>) {
        if self.aliases.insert(&node.name.value, &node.value).is_some() {
            log::debug!("alias `{}` redeclared, keeping the last one", node.name.value);
        }
    }

    fn record(&mut self, node: &'a Record, _: Option<Node<'a>>) {
        for constructor in &node.contents {
            let info = ConstructorInfo {
                record: &node.name.value,
                fields: &constructor.fields,
            };
            if self.constructors.insert(&constructor.name, info).is_some() {
                log::debug!(
                    "constructor `{}` redeclared, keeping the one of `{}`",
                    constructor.name,
                    node.name.value
                );
            }
        }
    }
}
