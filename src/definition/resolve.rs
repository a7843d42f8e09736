/// Definition resolution entry point.
///
/// Given a node path this module:
///   1. Answers import specs directly from the quoted path literal.
///   2. Picks the identifier the query is about (the leaf identifier, or
///      the `Sel` of a selector leaf).
///   3. Resolves identifiers that *declare* a symbol: functions, methods,
///      package-level names and struct fields.
///   4. Hands identifiers that *use* a symbol to [`super::member`].
use tracing::debug;

use crate::Backend;
use crate::binding::{
    BindingTables, CheckedFile, PackageId, SymbolId, SymbolKind, Type, TypeGraph, TypeId,
};
use crate::locate::{NodePath, path_enclosing_offset};
use crate::syntax::{NodeId, NodeKind, SyntaxTree};
use crate::types::{DefinitionDescriptor, NotFound};

/// Pseudo-package reported for predeclared identifiers.
pub(crate) const BUILTIN_PACKAGE: &str = "builtin";

impl Backend {
    /// Handle a definition query at byte `offset` of the checked file.
    pub fn resolve_definition(
        &self,
        file: &CheckedFile,
        offset: u32,
    ) -> Result<DefinitionDescriptor, NotFound> {
        let (path, exact) = path_enclosing_offset(&file.tree, offset);
        debug!(offset, exact, depth = path.len(), "located enclosing path");
        resolve(&path, file)
    }
}

/// Resolve the identifier at the bottom of `path`.
pub fn resolve(path: &NodePath, file: &CheckedFile) -> Result<DefinitionDescriptor, NotFound> {
    Resolver::new(path, file).resolve()
}

/// Borrowed view of one query.
pub(crate) struct Resolver<'a> {
    pub(crate) tree: &'a SyntaxTree,
    pub(crate) tables: &'a BindingTables,
    pub(crate) graph: &'a TypeGraph,
    pub(crate) package: PackageId,
    path: &'a NodePath,
    /// The identifier followed by its ancestors, innermost first.
    ancestors: Vec<NodeId>,
}

impl<'a> Resolver<'a> {
    fn new(path: &'a NodePath, file: &'a CheckedFile) -> Self {
        Self {
            tree: &file.tree,
            tables: &file.tables,
            graph: &file.graph,
            package: file.package,
            path,
            ancestors: Vec::new(),
        }
    }

    fn resolve(mut self) -> Result<DefinitionDescriptor, NotFound> {
        if let Some(spec) = self
            .path
            .leaf_first()
            .find(|&n| matches!(self.tree.kind(n), NodeKind::ImportSpec))
        {
            return self.import_spec(spec);
        }

        let (ident, selector) = self.leaf_identifier()?;
        self.ancestors = match selector {
            Some(sel) if sel == self.path.leaf() => {
                std::iter::once(ident).chain(self.path.leaf_first()).collect()
            }
            _ => self.path.leaf_first().collect(),
        };
        let name = self.tree.ident_name(ident).unwrap_or_default();
        debug!(name, ?selector, "resolving identifier");

        if let Some(&obj) = self.tables.defs.get(&ident) {
            return self.resolve_def(obj);
        }
        if let Some(&obj) = self.tables.uses.get(&ident) {
            return self.resolve_use(ident, selector, obj);
        }
        Err(NotFound::new(format!("no type information for identifier {:?}", name)))
    }

    /// The identifier the query is about and the selector whose `Sel` it
    /// is, if any.
    fn leaf_identifier(&self) -> Result<(NodeId, Option<NodeId>), NotFound> {
        let leaf = self.path.leaf();
        if let Some(parts) = self.tree.selector(leaf) {
            return Ok((parts.sel, Some(leaf)));
        }
        if self.tree.ident_name(leaf).is_none() {
            return Err(NotFound::new(format!(
                "no identifier found (innermost node is {})",
                self.tree.kind(leaf).label()
            )));
        }
        let selector = self
            .path
            .ancestor(1)
            .filter(|&parent| self.tree.selector(parent).is_some_and(|p| p.sel == leaf));
        Ok((leaf, selector))
    }

    /// The identifier's `depth`-th ancestor (`0` is the identifier).
    pub(crate) fn ancestor(&self, depth: usize) -> Option<NodeId> {
        self.ancestors.get(depth).copied()
    }

    fn import_spec(&self, spec: NodeId) -> Result<DefinitionDescriptor, NotFound> {
        let literal = self
            .tree
            .import_path(spec)
            .ok_or_else(|| NotFound::new("import spec has no path literal"))?;
        let path = unquote(literal)
            .ok_or_else(|| NotFound::new(format!("malformed import path {}", literal)))?;
        debug!(%path, "import spec");
        Ok(DefinitionDescriptor::package(path))
    }

    // ─── Declarations ───────────────────────────────────────────────────

    fn resolve_def(&self, obj: SymbolId) -> Result<DefinitionDescriptor, NotFound> {
        let symbol = &self.graph[obj];

        if symbol.kind == SymbolKind::Func
            && let Some(ty) = symbol.ty
            && let Type::Signature { recv, .. } = &self.graph[ty]
        {
            let Some(recv) = *recv else {
                debug!(name = %symbol.name, "top-level func");
                return Ok(self.describe_object(obj));
            };
            let named = self.graph.deref(recv);
            let container = self.graph.named_obj(named).ok_or_else(|| {
                NotFound::new(format!("receiver of method {} is not a named type", symbol.name))
            })?;
            debug!(name = %symbol.name, "method declaration");
            return Ok(DefinitionDescriptor::member(
                self.package_label(obj),
                self.graph[container].name.clone(),
                symbol.name.clone(),
            ));
        }

        if symbol.parent == Some(self.graph[self.package].scope) {
            return Ok(self.describe_object(obj));
        }

        if symbol.is_field()
            && let Some(type_name) = self.enclosing_type_decl()
        {
            return Ok(DefinitionDescriptor::member(
                self.package_label(obj),
                type_name,
                symbol.name.clone(),
            ));
        }

        self.describe_type(symbol.ty).ok_or_else(|| {
            NotFound::new(format!(
                "unable to identify definition of {:?}",
                symbol.name
            ))
        })
    }

    /// The name of the type declaration whose field list holds the
    /// identifier: `Field → FieldList → StructType|InterfaceType →
    /// TypeSpec`.
    fn enclosing_type_decl(&self) -> Option<String> {
        let field = self.ancestor(1)?;
        let list = self.ancestor(2)?;
        let body = self.ancestor(3)?;
        let spec = self.ancestor(4)?;
        if !matches!(self.tree.kind(field), NodeKind::Field)
            || !matches!(self.tree.kind(list), NodeKind::FieldList { .. })
            || !matches!(
                self.tree.kind(body),
                NodeKind::StructType { .. } | NodeKind::InterfaceType { .. }
            )
        {
            return None;
        }
        let name = self.tree.type_spec_name(spec)?;
        self.tree.ident_name(name).map(str::to_string)
    }

    // ─── Descriptors ────────────────────────────────────────────────────

    /// Import path of the package declaring `obj`, or `builtin`.
    pub(crate) fn package_label(&self, obj: SymbolId) -> String {
        self.graph
            .package_path(obj)
            .unwrap_or(BUILTIN_PACKAGE)
            .to_string()
    }

    /// `{Package, Name}` straight from the symbol.
    pub(crate) fn describe_object(&self, obj: SymbolId) -> DefinitionDescriptor {
        DefinitionDescriptor::top_level(self.package_label(obj), self.graph[obj].name.clone())
    }

    /// `{Package, Name}` of the type of a value, after stripping one
    /// pointer.  Only defined and basic types have a name.
    pub(crate) fn describe_type(&self, ty: Option<TypeId>) -> Option<DefinitionDescriptor> {
        let ty = self.graph.deref(ty?);
        match &self.graph[ty] {
            Type::Named { obj, .. } => Some(self.describe_object(*obj)),
            Type::Basic { name } if !name.starts_with("untyped ") => {
                Some(DefinitionDescriptor::top_level(BUILTIN_PACKAGE, name.clone()))
            }
            _ => None,
        }
    }
}

/// Interpret a Go string literal, either `"interpreted"` or `` `raw` ``.
pub(crate) fn unquote(literal: &str) -> Option<String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return Some(raw.replace('\r', ""));
    }

    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut bytes: Vec<u8> = Vec::new();
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => {}
            _ => {
                flush_bytes(&mut bytes, &mut out)?;
                out.push(c);
                continue;
            }
        }
        let escape = chars.next()?;
        let simple = match escape {
            'a' => Some('\x07'),
            'b' => Some('\x08'),
            'f' => Some('\x0c'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\x0b'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            _ => None,
        };
        if let Some(c) = simple {
            flush_bytes(&mut bytes, &mut out)?;
            out.push(c);
            continue;
        }
        match escape {
            'x' => bytes.push(u8::from_str_radix(&take(&mut chars, 2)?, 16).ok()?),
            '0'..='7' => {
                let rest = take(&mut chars, 2)?;
                let value = u32::from_str_radix(&format!("{}{}", escape, rest), 8).ok()?;
                bytes.push(u8::try_from(value).ok()?);
            }
            'u' | 'U' => {
                let digits = if escape == 'u' { 4 } else { 8 };
                let value = u32::from_str_radix(&take(&mut chars, digits)?, 16).ok()?;
                flush_bytes(&mut bytes, &mut out)?;
                out.push(char::from_u32(value)?);
            }
            _ => return None,
        }
    }
    flush_bytes(&mut bytes, &mut out)?;
    Some(out)
}

fn take(chars: &mut std::str::Chars<'_>, n: usize) -> Option<String> {
    let taken: String = chars.by_ref().take(n).collect();
    (taken.chars().count() == n).then_some(taken)
}

/// Byte escapes must form valid UTF-8 once a run of them ends.
fn flush_bytes(bytes: &mut Vec<u8>, out: &mut String) -> Option<()> {
    if !bytes.is_empty() {
        out.push_str(std::str::from_utf8(bytes).ok()?);
        bytes.clear();
    }
    Some(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
