/// Arena-allocated syntax tree for one Go source file.
///
/// The front end hands over a [`SyntaxTree`]: a flat vector of
/// [`SyntaxNode`]s addressed by [`NodeId`], numbered in preorder (a parent
/// always has a smaller id than its children).  Each node records its byte
/// [`Span`], its [`NodeKind`] and its structural children in the order the
/// front end walked them.
///
/// Bare tokens (`func`, braces, `:=`, ...) are not stored as nodes; the
/// locator derives them from the positions carried by [`NodeKind`].
///
/// Typed views over the few node shapes the resolver navigates
/// (selectors, function declarations, import specs, composite literals)
/// are derived from the children on demand, so the tree has a single
/// source of truth.
mod kind;

use std::ops::Index;

use serde::{Deserialize, Serialize};

pub use kind::{ChanDir, NodeKind, Token};

use crate::types::Span;

/// Handle of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub span: Span,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<NodeId>,
}

/// A structural problem found while building or loading a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,
    #[error("node {child} referenced by node {parent} does not exist")]
    Dangling { parent: usize, child: usize },
    #[error("node {child} is not numbered after its parent {parent}")]
    NotPreorder { parent: usize, child: usize },
    #[error("node {child} has more than one parent")]
    SharedChild { child: usize },
    #[error("node {child} {child_span} lies outside its parent {parent} {parent_span}")]
    ChildOutsideParent {
        parent: usize,
        parent_span: Span,
        child: usize,
        child_span: Span,
    },
    #[error("children {left} and {right} of node {parent} overlap")]
    Overlap {
        parent: usize,
        left: usize,
        right: usize,
    },
    #[error("builder finished with {open} unclosed node(s)")]
    Unbalanced { open: usize },
}

/// An immutable syntax tree.  Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl Index<NodeId> for SyntaxTree {
    type Output = SyntaxNode;

    fn index(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }
}

/// Parts of a `x.Sel` selector expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorParts {
    pub x: NodeId,
    pub sel: NodeId,
}

/// Parts of a function declaration, in lexical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncDeclParts {
    pub recv: Option<NodeId>,
    pub name: NodeId,
    pub ty: NodeId,
    pub body: Option<NodeId>,
}

/// Parts of a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncTypeParts {
    pub func_pos: Option<u32>,
    pub params: NodeId,
    pub results: Option<NodeId>,
}

impl SyntaxTree {
    /// Build a tree from preorder-numbered nodes, validating it.
    pub fn from_nodes(nodes: Vec<SyntaxNode>) -> Result<Self, TreeError> {
        let tree = Self { nodes };
        tree.validate()?;
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    pub fn span(&self, id: NodeId) -> Span {
        self[id].span
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self[id].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self[id].children
    }

    /// The identifier's name, if `id` is an identifier.
    pub fn ident_name(&self, id: NodeId) -> Option<&str> {
        match &self[id].kind {
            NodeKind::Ident { name } => Some(name),
            _ => None,
        }
    }

    // ─── Typed views ────────────────────────────────────────────────────

    pub fn selector(&self, id: NodeId) -> Option<SelectorParts> {
        match (&self[id].kind, self.children(id)) {
            (NodeKind::SelectorExpr, [x, sel]) if self.ident_name(*sel).is_some() => {
                Some(SelectorParts { x: *x, sel: *sel })
            }
            _ => None,
        }
    }

    /// Split a `FuncDecl` into receiver, name, signature and body.
    ///
    /// The receiver is the parameter list that precedes the name.
    pub fn func_decl(&self, id: NodeId) -> Option<FuncDeclParts> {
        if !matches!(self[id].kind, NodeKind::FuncDecl) {
            return None;
        }
        let mut recv = None;
        let mut name = None;
        let mut ty = None;
        let mut body = None;
        for &child in self.children(id) {
            match &self[child].kind {
                NodeKind::Ident { .. } => name = Some(child),
                NodeKind::FieldList { .. } if name.is_none() => recv = Some(child),
                NodeKind::FuncType { .. } => ty = Some(child),
                NodeKind::BlockStmt { .. } => body = Some(child),
                _ => {}
            }
        }
        Some(FuncDeclParts {
            recv,
            name: name?,
            ty: ty?,
            body,
        })
    }

    pub fn func_type(&self, id: NodeId) -> Option<FuncTypeParts> {
        let NodeKind::FuncType { func_pos } = self[id].kind else {
            return None;
        };
        let mut lists = self
            .children(id)
            .iter()
            .copied()
            .filter(|&c| matches!(self[c].kind, NodeKind::FieldList { .. }));
        let params = lists.next()?;
        Some(FuncTypeParts {
            func_pos,
            params,
            results: lists.next(),
        })
    }

    /// The path literal of an import spec.
    pub fn import_path(&self, id: NodeId) -> Option<&str> {
        if !matches!(self[id].kind, NodeKind::ImportSpec) {
            return None;
        }
        let last = *self.children(id).last()?;
        match &self[last].kind {
            NodeKind::BasicLit { value } => Some(value),
            _ => None,
        }
    }

    /// The name identifier of a type spec.
    pub fn type_spec_name(&self, id: NodeId) -> Option<NodeId> {
        if !matches!(self[id].kind, NodeKind::TypeSpec) {
            return None;
        }
        self.children(id)
            .first()
            .copied()
            .filter(|&c| self.ident_name(c).is_some())
    }

    /// The explicit type of a composite literal (`T` in `T{...}`).
    pub fn composite_type(&self, id: NodeId) -> Option<NodeId> {
        let NodeKind::CompositeLit { lbrace, .. } = self[id].kind else {
            return None;
        };
        self.children(id)
            .first()
            .copied()
            .filter(|&c| self.span(c).end <= lbrace)
    }

    /// The key of a `key: value` element.
    pub fn key_value_key(&self, id: NodeId) -> Option<NodeId> {
        match (&self[id].kind, self.children(id)) {
            (NodeKind::KeyValueExpr { .. }, [key, _]) => Some(*key),
            _ => None,
        }
    }

    // ─── Validation ─────────────────────────────────────────────────────

    /// Check the structural invariants the locator relies on.
    ///
    /// Every child id exists, is numbered after its parent and has exactly
    /// one parent; every child span lies inside its parent's span; and
    /// siblings do not overlap.  `FuncDecl` is exempt from the overlap
    /// check because its signature starts at the `func` keyword, before
    /// the receiver and the name.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        let mut has_parent = vec![false; self.nodes.len()];
        for (parent, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                let child = child.index();
                if child >= self.nodes.len() {
                    return Err(TreeError::Dangling { parent, child });
                }
                if child <= parent {
                    return Err(TreeError::NotPreorder { parent, child });
                }
                if std::mem::replace(&mut has_parent[child], true) {
                    return Err(TreeError::SharedChild { child });
                }
                let child_span = self.nodes[child].span;
                if !node.span.encloses(child_span) {
                    return Err(TreeError::ChildOutsideParent {
                        parent,
                        parent_span: node.span,
                        child,
                        child_span,
                    });
                }
            }
            if matches!(node.kind, NodeKind::FuncDecl) {
                continue;
            }
            for pair in node.children.windows(2) {
                let (left, right) = (pair[0], pair[1]);
                if self.nodes[left.index()].span.end > self.nodes[right.index()].span.start {
                    return Err(TreeError::Overlap {
                        parent,
                        left: left.index(),
                        right: right.index(),
                    });
                }
            }
        }
        Ok(())
    }
}

// ─── Builder ────────────────────────────────────────────────────────────────

/// Builds a [`SyntaxTree`] in preorder.
///
/// Interior nodes are opened with [`start_node`](Self::start_node) and
/// closed with [`finish_node`](Self::finish_node); leaves are added in one
/// step with [`leaf`](Self::leaf).  Every node is attached to the innermost
/// open node.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if let Some(&parent) = self.open.last() {
            self.nodes[parent.index()].children.push(id);
        }
        self.nodes.push(SyntaxNode {
            span,
            kind,
            children: Vec::new(),
        });
        id
    }

    /// Open an interior node starting at `start`.
    pub fn start_node(&mut self, kind: NodeKind, start: u32) -> NodeId {
        let id = self.push(kind, Span::new(start, start));
        self.open.push(id);
        id
    }

    /// Close the innermost open node at `end`.
    ///
    /// Returns `None` when no node is open.
    pub fn finish_node(&mut self, end: u32) -> Option<NodeId> {
        let id = self.open.pop()?;
        self.nodes[id.index()].span.end = end;
        Some(id)
    }

    /// Add a childless node.
    pub fn leaf(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.push(kind, span)
    }

    /// Validate and return the finished tree.
    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        if !self.open.is_empty() {
            return Err(TreeError::Unbalanced {
                open: self.open.len(),
            });
        }
        SyntaxTree::from_nodes(self.nodes)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
