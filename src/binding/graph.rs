/// The type graph: an arena of types, symbols, scopes and packages.
///
/// Every cross-reference is a plain index ([`TypeId`], [`SymbolId`],
/// [`ScopeId`], [`PackageId`]) into one of the four vectors owned by
/// [`TypeGraph`], so recursive structures (a struct embedding a pointer to
/// a type whose methods return the struct) need no reference counting.
///
/// The universe scope is built first by [`TypeGraph::new`], which makes
/// predeclared ids identical across every graph.
use std::collections::BTreeMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::universe;
use crate::syntax::ChanDir;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Handle of a [`Type`].
    TypeId
);
arena_id!(
    /// Handle of a [`Symbol`].
    SymbolId
);
arena_id!(
    /// Handle of a [`Scope`].
    ScopeId
);
arena_id!(
    /// Handle of a [`Package`].
    PackageId
);

/// A Go type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Type {
    /// The type of an expression the front end could not check.
    Invalid,
    /// A predeclared basic type (`int`, `string`, `untyped nil`, ...).
    Basic { name: String },
    /// A defined type.  `methods` are the methods declared on it, in
    /// declaration order.
    Named {
        obj: SymbolId,
        underlying: TypeId,
        #[serde(default)]
        methods: Vec<SymbolId>,
    },
    Pointer { elem: TypeId },
    Struct {
        #[serde(default)]
        fields: Vec<SymbolId>,
    },
    /// `methods` is the flattened method set: explicitly declared methods
    /// and those contributed by `embedded` interfaces.
    Interface {
        #[serde(default)]
        methods: Vec<SymbolId>,
        #[serde(default)]
        embedded: Vec<TypeId>,
    },
    /// A function or method signature.  For methods `recv` is the
    /// receiver type; for interface methods it is the declaring interface.
    Signature {
        #[serde(default)]
        recv: Option<TypeId>,
        #[serde(default)]
        params: Vec<TypeId>,
        #[serde(default)]
        results: Vec<TypeId>,
        #[serde(default)]
        variadic: bool,
    },
    Slice { elem: TypeId },
    Array { len: u64, elem: TypeId },
    Map { key: TypeId, value: TypeId },
    Chan { dir: ChanDir, elem: TypeId },
    Tuple { elems: Vec<TypeId> },
}

/// What a [`Symbol`] denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "symbol")]
pub enum SymbolKind {
    /// A function or method.  Methods have a receiver in their signature.
    Func,
    /// A variable or parameter.
    Var,
    /// A struct field; `embedded` for anonymous fields.
    Field { embedded: bool },
    Const,
    TypeName,
    /// An import name; `imported` is the package it refers to.
    PkgName { imported: PackageId },
    /// A predeclared function such as `make` or `len`.
    Builtin,
    Nil,
    Label,
}

/// A named entity the front end bound identifiers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    /// Declaring package; `None` for universe symbols.
    #[serde(default)]
    pub package: Option<PackageId>,
    /// Scope the symbol is declared in; `None` for fields and methods.
    #[serde(default)]
    pub parent: Option<ScopeId>,
    #[serde(default)]
    pub ty: Option<TypeId>,
    #[serde(flatten)]
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            package: None,
            parent: None,
            ty: None,
            kind,
        }
    }

    pub fn in_package(mut self, package: PackageId) -> Self {
        self.package = Some(package);
        self
    }

    pub fn with_type(mut self, ty: TypeId) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, SymbolKind::Field { .. })
    }
}

/// A lexical scope mapping names to symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default)]
    pub parent: Option<ScopeId>,
    #[serde(default)]
    pub names: BTreeMap<String, SymbolId>,
}

/// A checked package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Import path, e.g. `net/http`.
    pub path: String,
    /// Package clause name, e.g. `http`.
    pub name: String,
    pub scope: ScopeId,
    /// Whether the front end finished checking the package without fatal
    /// errors.
    #[serde(default = "complete_by_default")]
    pub complete: bool,
}

fn complete_by_default() -> bool {
    true
}

/// A dangling reference found while validating a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("{owner} refers to missing {what} {index}")]
    Dangling {
        owner: String,
        what: &'static str,
        index: usize,
    },
    #[error("graph does not start with the universe scope")]
    MissingUniverse,
}

/// Arena owning every type, symbol, scope and package of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGraph {
    types: Vec<Type>,
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    packages: Vec<Package>,
}

impl Index<TypeId> for TypeGraph {
    type Output = Type;

    fn index(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }
}

impl Index<SymbolId> for TypeGraph {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }
}

impl Index<ScopeId> for TypeGraph {
    type Output = Scope;

    fn index(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }
}

impl Index<PackageId> for TypeGraph {
    type Output = Package;

    fn index(&self, id: PackageId) -> &Package {
        &self.packages[id.index()]
    }
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeGraph {
    /// A graph holding only the universe scope.
    pub fn new() -> Self {
        let mut graph = Self {
            types: Vec::new(),
            symbols: Vec::new(),
            scopes: vec![Scope::default()],
            packages: Vec::new(),
        };
        universe::populate(&mut graph);
        graph
    }

    /// The scope of predeclared identifiers.
    pub const fn universe(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }

    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &Package)> + '_ {
        self.packages
            .iter()
            .enumerate()
            .map(|(i, p)| (PackageId(i as u32), p))
    }

    // ─── Construction ───────────────────────────────────────────────────

    pub fn add_type(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId(self.types.len() as u32 - 1)
    }

    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        self.symbols.push(symbol);
        SymbolId(self.symbols.len() as u32 - 1)
    }

    pub fn add_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope {
            parent,
            names: BTreeMap::new(),
        });
        ScopeId(self.scopes.len() as u32 - 1)
    }

    /// Register a package with a fresh top-level scope nested in the
    /// universe.
    pub fn add_package(&mut self, path: impl Into<String>, name: impl Into<String>) -> PackageId {
        let scope = self.add_scope(Some(self.universe()));
        self.packages.push(Package {
            path: path.into(),
            name: name.into(),
            scope,
            complete: true,
        });
        PackageId(self.packages.len() as u32 - 1)
    }

    pub fn set_complete(&mut self, package: PackageId, complete: bool) {
        self.packages[package.index()].complete = complete;
    }

    /// Insert `symbol` into `scope`, recording the scope as its parent.
    ///
    /// Returns the symbol previously bound to the same name, if any.
    pub fn declare(&mut self, scope: ScopeId, symbol: SymbolId) -> Option<SymbolId> {
        self.symbols[symbol.index()].parent = Some(scope);
        let name = self.symbols[symbol.index()].name.clone();
        self.scopes[scope.index()].names.insert(name, symbol)
    }

    /// Declare `name` as a top-level symbol of `package`.
    pub fn declare_in_package(
        &mut self,
        package: PackageId,
        name: impl Into<String>,
        kind: SymbolKind,
        ty: Option<TypeId>,
    ) -> SymbolId {
        let mut symbol = Symbol::new(name, kind).in_package(package);
        symbol.ty = ty;
        let id = self.add_symbol(symbol);
        let scope = self[package].scope;
        self.declare(scope, id);
        id
    }

    /// Declare a defined type in `package`'s scope.
    ///
    /// The underlying type starts out [`Type::Invalid`]; complete it with
    /// [`set_underlying`](Self::set_underlying).
    pub fn declare_named(&mut self, package: PackageId, name: impl Into<String>) -> TypeId {
        let invalid = self.add_type(Type::Invalid);
        let obj = self.declare_in_package(package, name, SymbolKind::TypeName, None);
        let named = self.add_type(Type::Named {
            obj,
            underlying: invalid,
            methods: Vec::new(),
        });
        self.set_symbol_type(obj, named);
        named
    }

    pub fn set_symbol_type(&mut self, symbol: SymbolId, ty: TypeId) {
        self.symbols[symbol.index()].ty = Some(ty);
    }

    pub fn set_underlying(&mut self, named: TypeId, to: TypeId) {
        if let Type::Named { underlying, .. } = &mut self.types[named.index()] {
            *underlying = to;
        }
    }

    pub fn add_method(&mut self, named: TypeId, method: SymbolId) {
        if let Type::Named { methods, .. } = &mut self.types[named.index()] {
            methods.push(method);
        }
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.add_type(Type::Pointer { elem })
    }

    // ─── Queries ────────────────────────────────────────────────────────

    /// Look `name` up in the universe scope.
    pub fn lookup_universe(&self, name: &str) -> Option<SymbolId> {
        self.lookup(self.universe(), name)
    }

    /// Look `name` up in `scope` only (no parent chain).
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self[scope].names.get(name).copied()
    }

    /// The predeclared type called `name`.
    pub fn basic(&self, name: &str) -> Option<TypeId> {
        let obj = self.lookup_universe(name)?;
        match self[obj].kind {
            SymbolKind::TypeName => self[obj].ty,
            _ => None,
        }
    }

    /// Strip one pointer indirection.
    pub fn deref(&self, ty: TypeId) -> TypeId {
        match self[ty] {
            Type::Pointer { elem } => elem,
            _ => ty,
        }
    }

    /// The underlying type of a defined type, or the type itself.
    pub fn underlying(&self, ty: TypeId) -> TypeId {
        match self[ty] {
            Type::Named { underlying, .. } => underlying,
            _ => ty,
        }
    }

    /// The type-name symbol of a defined type.
    pub fn named_obj(&self, ty: TypeId) -> Option<SymbolId> {
        match self[ty] {
            Type::Named { obj, .. } => Some(obj),
            _ => None,
        }
    }

    /// Import path of the package declaring `symbol`.
    pub fn package_path(&self, symbol: SymbolId) -> Option<&str> {
        self[symbol].package.map(|p| self[p].path.as_str())
    }

    /// Whether `symbol` is the object bound to its own name in its
    /// package's top-level scope.
    pub fn is_package_level(&self, symbol: SymbolId) -> bool {
        let Some(package) = self[symbol].package else {
            return false;
        };
        self.lookup(self[package].scope, &self[symbol].name) == Some(symbol)
    }

    // ─── Validation ─────────────────────────────────────────────────────

    /// Check that every handle stored in the graph points at an existing
    /// entry.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.scopes.is_empty() || self.scopes[0].parent.is_some() {
            return Err(GraphError::MissingUniverse);
        }
        let check = |owner: &dyn Fn() -> String, what: &'static str, index: usize, len: usize| {
            if index < len {
                Ok(())
            } else {
                Err(GraphError::Dangling {
                    owner: owner(),
                    what,
                    index,
                })
            }
        };
        let types = self.types.len();
        let symbols = self.symbols.len();
        let scopes = self.scopes.len();
        let packages = self.packages.len();

        for (i, ty) in self.types.iter().enumerate() {
            let owner = || format!("type {}", i);
            let mut type_refs: Vec<TypeId> = Vec::new();
            let mut symbol_refs: Vec<SymbolId> = Vec::new();
            match ty {
                Type::Invalid | Type::Basic { .. } => {}
                Type::Named {
                    obj,
                    underlying,
                    methods,
                } => {
                    symbol_refs.push(*obj);
                    symbol_refs.extend(methods);
                    type_refs.push(*underlying);
                }
                Type::Pointer { elem } | Type::Slice { elem } | Type::Array { elem, .. } => {
                    type_refs.push(*elem)
                }
                Type::Chan { elem, .. } => type_refs.push(*elem),
                Type::Struct { fields } => symbol_refs.extend(fields),
                Type::Interface { methods, embedded } => {
                    symbol_refs.extend(methods);
                    type_refs.extend(embedded);
                }
                Type::Signature {
                    recv,
                    params,
                    results,
                    ..
                } => {
                    type_refs.extend(recv);
                    type_refs.extend(params);
                    type_refs.extend(results);
                }
                Type::Map { key, value } => type_refs.extend([*key, *value]),
                Type::Tuple { elems } => type_refs.extend(elems),
            }
            for t in type_refs {
                check(&owner, "type", t.index(), types)?;
            }
            for s in symbol_refs {
                check(&owner, "symbol", s.index(), symbols)?;
            }
        }

        for (i, symbol) in self.symbols.iter().enumerate() {
            let owner = || format!("symbol {} ({})", i, symbol.name);
            if let Some(p) = symbol.package {
                check(&owner, "package", p.index(), packages)?;
            }
            if let Some(s) = symbol.parent {
                check(&owner, "scope", s.index(), scopes)?;
            }
            if let Some(t) = symbol.ty {
                check(&owner, "type", t.index(), types)?;
            }
            if let SymbolKind::PkgName { imported } = symbol.kind {
                check(&owner, "package", imported.index(), packages)?;
            }
        }

        for (i, scope) in self.scopes.iter().enumerate() {
            let owner = || format!("scope {}", i);
            if let Some(parent) = scope.parent {
                check(&owner, "scope", parent.index(), scopes)?;
            }
            for symbol in scope.names.values() {
                check(&owner, "symbol", symbol.index(), symbols)?;
            }
        }

        for (i, package) in self.packages.iter().enumerate() {
            let owner = || format!("package {} ({})", i, package.path);
            check(&owner, "scope", package.scope.index(), scopes)?;
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
