/// Binding information produced by the Go front end.
///
/// The front end parses and type-checks a package and hands over, for one
/// file, three side tables keyed by [`NodeId`]:
///
/// - **defs**: identifiers that declare a symbol,
/// - **uses**: identifiers that refer to a symbol,
/// - **selections**: `x.f` selector expressions that select a field or a
///   method, with the embedding path that reaches it.
///
/// Symbols and types live in the [`TypeGraph`] arena (see [`graph`]).
pub mod graph;
mod universe;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use graph::{
    GraphError, Package, PackageId, Scope, ScopeId, Symbol, SymbolId, SymbolKind, Type, TypeGraph,
    TypeId,
};

use crate::syntax::{NodeId, SyntaxTree};

/// How a selector expression was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionKind {
    /// `x.f` is a struct field.
    FieldVal,
    /// `x.f` is a method bound to a value.
    MethodVal,
    /// `T.f` is a method expression.
    MethodExpr,
}

/// A resolved `x.f` selector.
///
/// `index` is the embedding path: every entry but the last selects an
/// embedded field of the type reached so far, starting from `recv`.  The
/// last entry selects the field (for [`SelectionKind::FieldVal`]) or the
/// method of the type reached (otherwise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub kind: SelectionKind,
    /// Type of `x`.
    pub recv: TypeId,
    /// The selected field or method.
    pub obj: SymbolId,
    pub index: Vec<u32>,
}

/// Identifier and selector bindings for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingTables {
    #[serde(default, with = "pairs")]
    pub defs: HashMap<NodeId, SymbolId>,
    #[serde(default, with = "pairs")]
    pub uses: HashMap<NodeId, SymbolId>,
    #[serde(default, with = "pairs")]
    pub selections: HashMap<NodeId, Selection>,
}

/// Everything the front end hands over for one query: the file's syntax
/// tree, its bindings, and the type graph of its package and imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedFile {
    /// The package the file belongs to.
    pub package: PackageId,
    pub tree: SyntaxTree,
    #[serde(default)]
    pub tables: BindingTables,
    pub graph: TypeGraph,
    /// Messages the front end reported while checking the package.
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

/// Serialize a `HashMap<NodeId, V>` as a list of `[node, value]` pairs
/// sorted by node, so dumps are deterministic.
mod pairs {
    use std::collections::HashMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::syntax::NodeId;

    pub fn serialize<V, S>(map: &HashMap<NodeId, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        let mut entries: Vec<(&NodeId, &V)> = map.iter().collect();
        entries.sort_by_key(|(node, _)| **node);
        serializer.collect_seq(entries)
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<HashMap<NodeId, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let entries = Vec::<(NodeId, V)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
