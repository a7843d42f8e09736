/// Resolution of identifiers that *use* a symbol.
///
/// Cases, first match wins:
///   - a struct field key in a composite literal (`T{F: 1}`)
///   - a package qualifier (`http` in `http.Get`)
///   - a bare identifier: package-level names, then predeclared names,
///     then the name of the value's type
///   - the `Sel` of a selector with a recorded selection: the type that
///     declares the (possibly promoted) field or method
///   - the `Sel` of a qualified reference (`http.DefaultClient`)
use tracing::debug;

use super::embedding::declaring_type;
use super::resolve::{BUILTIN_PACKAGE, Resolver};
use crate::binding::{Selection, SymbolId, SymbolKind};
use crate::syntax::{NodeId, NodeKind};
use crate::types::{DefinitionDescriptor, NotFound};

impl Resolver<'_> {
    pub(super) fn resolve_use(
        &self,
        ident: NodeId,
        selector: Option<NodeId>,
        obj: SymbolId,
    ) -> Result<DefinitionDescriptor, NotFound> {
        let symbol = &self.graph[obj];

        if symbol.is_field()
            && let Some(container) = self.composite_literal_type(ident)
        {
            debug!(container, "struct literal key");
            return Ok(DefinitionDescriptor::member(
                self.package_label(obj),
                container,
                symbol.name.clone(),
            ));
        }

        if let SymbolKind::PkgName { imported } = symbol.kind {
            return Ok(DefinitionDescriptor::package(
                self.graph[imported].path.clone(),
            ));
        }

        let Some(selector) = selector else {
            return self.resolve_unqualified(ident, obj);
        };
        match self.tables.selections.get(&selector) {
            Some(selection) => self.resolve_selection(obj, selection),
            None => {
                // Qualified reference to another package's top-level name.
                debug!(name = %symbol.name, "qualified reference");
                Ok(self.describe_object(obj))
            }
        }
    }

    /// The type name of the composite literal in which `ident` is a
    /// `key: value` key.  Package-qualified types yield their `Sel`.
    fn composite_literal_type(&self, ident: NodeId) -> Option<&str> {
        let pair = self.ancestor(1)?;
        let lit = self.ancestor(2)?;
        if self.tree.key_value_key(pair) != Some(ident) {
            return None;
        }
        let ty = self.tree.composite_type(lit)?;
        match self.tree.kind(ty) {
            NodeKind::Ident { name } => Some(name),
            NodeKind::SelectorExpr => {
                let parts = self.tree.selector(ty)?;
                self.tree.ident_name(parts.sel)
            }
            _ => None,
        }
    }

    fn resolve_unqualified(
        &self,
        ident: NodeId,
        obj: SymbolId,
    ) -> Result<DefinitionDescriptor, NotFound> {
        let name = self.tree.ident_name(ident).unwrap_or_default();
        let scope = self.graph[self.package].scope;

        if self.graph.lookup(scope, name) == Some(obj) {
            return Ok(self.describe_object(obj));
        }
        if self.graph.lookup_universe(name) == Some(obj) {
            return Ok(DefinitionDescriptor::top_level(BUILTIN_PACKAGE, name));
        }
        if let Some(desc) = self.describe_type(self.graph[obj].ty) {
            return Ok(desc);
        }

        // Neither a package-level name nor a value of a named type.
        debug!(name, "describing the symbol itself");
        Ok(self.describe_object(obj))
    }

    fn resolve_selection(
        &self,
        obj: SymbolId,
        selection: &Selection,
    ) -> Result<DefinitionDescriptor, NotFound> {
        let declaring = declaring_type(self.graph, selection)?;
        let name = &self.graph[obj].name;

        if declaring.member.is_none() {
            // The index does not reach a member: describe the value's type.
            return self.describe_type(self.graph[obj].ty).ok_or_else(|| {
                NotFound::new(format!("method or field {:?} not found", name))
            });
        }

        Ok(DefinitionDescriptor::member(
            self.package_label(declaring.type_name),
            self.graph[declaring.type_name].name.clone(),
            name.clone(),
        ))
    }
}
