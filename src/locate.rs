/// Narrow a byte offset down to the innermost enclosing syntax node.
///
/// [`path_enclosing_interval`] walks from the root of a [`SyntaxTree`]
/// towards the leaves, at each level picking the single child whose
/// whitespace-augmented interval contains the target, and records every
/// node it visits.  Bare tokens (keywords, braces, operators) take part in
/// the search as synthetic leaves so that a click on `func` or `:=` stops
/// at the construct owning the token instead of an ambiguous parent.
///
/// The search cannot fail: when the target falls outside the root (leading
/// or trailing whitespace of the file) the path is just the root.
use tracing::trace;

use crate::syntax::{ChanDir, NodeId, NodeKind, SyntaxTree};
use crate::types::Span;

/// A child taking part in the narrowing search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    /// A real subtree.
    Node { id: NodeId, span: Span },
    /// A bare token owned by the parent.  Always terminal.
    Token(Span),
}

impl Child {
    pub fn span(&self) -> Span {
        match *self {
            Child::Node { span, .. } | Child::Token(span) => span,
        }
    }

    fn node(tree: &SyntaxTree, id: NodeId) -> Self {
        Child::Node {
            id,
            span: tree.span(id),
        }
    }
}

fn tok(pos: u32, len: usize) -> Child {
    Child::Token(Span::at(pos, len))
}

/// The nodes enclosing a position, root first.  Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(Vec<NodeId>);

impl NodePath {
    /// Wrap a root-first list of nodes.  Returns `None` for an empty list.
    pub fn new(nodes: Vec<NodeId>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self(nodes))
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn root(&self) -> NodeId {
        self.0[0]
    }

    /// The innermost node.
    pub fn leaf(&self) -> NodeId {
        self.0[self.0.len() - 1]
    }

    /// The node `depth` levels above the leaf (`0` is the leaf itself).
    pub fn ancestor(&self, depth: usize) -> Option<NodeId> {
        self.0.len().checked_sub(depth + 1).map(|i| self.0[i])
    }

    /// Iterate from the leaf up to the root.
    pub fn leaf_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().rev().copied()
    }
}

/// The children of `id` sorted by position, including synthetic token
/// leaves.
pub fn children_of(tree: &SyntaxTree, id: NodeId) -> Vec<Child> {
    let node = &tree[id];

    // A function declaration's signature starts at the `func` keyword,
    // which precedes the receiver, so the structural children are not in
    // lexical order.  Inline the signature and order everything by hand.
    if let Some(parts) = tree.func_decl(id) {
        let sig = tree.func_type(parts.ty);
        let mut children = Vec::new();
        if let Some(pos) = sig.and_then(|s| s.func_pos) {
            children.push(tok(pos, "func".len()));
        }
        if let Some(recv) = parts.recv {
            children.push(Child::node(tree, recv));
        }
        children.push(Child::node(tree, parts.name));
        if let Some(sig) = sig {
            children.push(Child::node(tree, sig.params));
            if let Some(results) = sig.results {
                children.push(Child::node(tree, results));
            }
        }
        if let Some(body) = parts.body {
            children.push(Child::node(tree, body));
        }
        return children;
    }

    let mut children: Vec<Child> = node
        .children
        .iter()
        .map(|&child| Child::node(tree, child))
        .collect();

    match &node.kind {
        NodeKind::ArrayType { lbrack, rbrack } => {
            children.extend([tok(*lbrack, 1), tok(*rbrack, 1)]);
        }
        NodeKind::AssignStmt { tok: t, tok_pos }
        | NodeKind::BranchStmt { tok: t, tok_pos }
        | NodeKind::IncDecStmt { tok: t, tok_pos } => {
            children.push(tok(*tok_pos, t.text_len()));
        }
        NodeKind::BasicLit { value } => {
            children.push(tok(node.span.start, value.len()));
        }
        NodeKind::BinaryExpr { op, op_pos } | NodeKind::UnaryExpr { op, op_pos } => {
            children.push(tok(*op_pos, op.text_len()));
        }
        NodeKind::BlockStmt { lbrace, rbrace } | NodeKind::CompositeLit { lbrace, rbrace } => {
            children.extend([tok(*lbrace, 1), tok(*rbrace, 1)]);
        }
        NodeKind::CallExpr {
            lparen,
            rparen,
            ellipsis_pos,
        } => {
            children.extend([tok(*lparen, 1), tok(*rparen, 1)]);
            if let Some(pos) = ellipsis_pos {
                children.push(tok(*pos, "...".len()));
            }
        }
        NodeKind::CaseClause {
            case_pos,
            colon,
            is_default,
        }
        | NodeKind::CommClause {
            case_pos,
            colon,
            is_default,
        } => {
            let keyword = if *is_default { "default" } else { "case" };
            children.extend([tok(*case_pos, keyword.len()), tok(*colon, 1)]);
        }
        NodeKind::ChanType { begin, dir } => {
            let text = match dir {
                ChanDir::Recv => "<-chan",
                ChanDir::Send => "chan<-",
                ChanDir::Both => "chan",
            };
            children.push(tok(*begin, text.len()));
        }
        NodeKind::DeferStmt { defer_pos } => children.push(tok(*defer_pos, "defer".len())),
        NodeKind::Ellipsis { ellipsis_pos } => children.push(tok(*ellipsis_pos, "...".len())),
        NodeKind::FieldList { opening, closing } => {
            children.extend(opening.iter().chain(closing).map(|&pos| tok(pos, 1)));
        }
        NodeKind::File { package_pos } => children.push(tok(*package_pos, "package".len())),
        NodeKind::ForStmt { for_pos } => children.push(tok(*for_pos, "for".len())),
        NodeKind::FuncType { func_pos } => {
            if let Some(pos) = func_pos {
                children.push(tok(*pos, "func".len()));
            }
        }
        NodeKind::GenDecl {
            tok: t,
            tok_pos,
            lparen,
            rparen,
        } => {
            children.push(tok(*tok_pos, t.text_len()));
            if let (Some(lparen), Some(rparen)) = (lparen, rparen) {
                children.extend([tok(*lparen, 1), tok(*rparen, 1)]);
            }
        }
        NodeKind::GoStmt { go_pos } => children.push(tok(*go_pos, "go".len())),
        NodeKind::Ident { name } => children.push(tok(node.span.start, name.len())),
        NodeKind::IfStmt { if_pos } => children.push(tok(*if_pos, "if".len())),
        NodeKind::IndexExpr { lbrack, rbrack } | NodeKind::SliceExpr { lbrack, rbrack } => {
            children.extend([tok(*lbrack, 1), tok(*rbrack, 1)]);
        }
        NodeKind::InterfaceType { interface_pos } => {
            children.push(tok(*interface_pos, "interface".len()));
        }
        NodeKind::KeyValueExpr { colon } | NodeKind::LabeledStmt { colon } => {
            children.push(tok(*colon, 1));
        }
        NodeKind::MapType { map_pos } => children.push(tok(*map_pos, "map".len())),
        NodeKind::ParenExpr { lparen, rparen } => {
            children.extend([tok(*lparen, 1), tok(*rparen, 1)]);
        }
        NodeKind::RangeStmt { for_pos, tok: t } => {
            children.push(tok(*for_pos, "for".len()));
            if let Some((t, pos)) = t {
                children.push(tok(*pos, t.text_len()));
            }
        }
        NodeKind::ReturnStmt { return_pos } => children.push(tok(*return_pos, "return".len())),
        NodeKind::SelectStmt { select_pos } => children.push(tok(*select_pos, "select".len())),
        NodeKind::SendStmt { arrow } => children.push(tok(*arrow, "<-".len())),
        NodeKind::StarExpr { star_pos } => children.push(tok(*star_pos, 1)),
        NodeKind::StructType { struct_pos } => children.push(tok(*struct_pos, "struct".len())),
        NodeKind::SwitchStmt { switch_pos } | NodeKind::TypeSwitchStmt { switch_pos } => {
            children.push(tok(*switch_pos, "switch".len()));
        }
        NodeKind::TypeAssertExpr { lparen, rparen } => {
            // The `.` sits immediately before the `(`.
            children.extend([
                tok(lparen.saturating_sub(1), 1),
                tok(*lparen, 1),
                tok(*rparen, 1),
            ]);
        }
        NodeKind::Comment
        | NodeKind::CommentGroup
        | NodeKind::FuncLit
        | NodeKind::SelectorExpr
        | NodeKind::BadExpr
        | NodeKind::BadStmt
        | NodeKind::BadDecl
        | NodeKind::DeclStmt
        | NodeKind::EmptyStmt
        | NodeKind::ExprStmt
        | NodeKind::Field
        | NodeKind::ImportSpec
        | NodeKind::ValueSpec
        | NodeKind::TypeSpec
        | NodeKind::FuncDecl => {}
    }

    children.sort_by_key(|child| child.span().start);
    children
}

/// Find the path of nodes enclosing `[start, end)`, root first, and whether
/// the innermost node matches the interval exactly.
///
/// A zero-width interval is widened to one byte.  When the interval lies
/// outside the root, the path is `[root]` and the match is inexact.
pub fn path_enclosing_interval(tree: &SyntaxTree, start: u32, end: u32) -> (NodePath, bool) {
    let (mut start, mut end) = if start > end { (end, start) } else { (start, end) };
    if start == end {
        end = start.saturating_add(1);
    }

    let root = tree.root();
    let root_span = tree.span(root);
    if !(start < root_span.end && end > root_span.start) {
        trace!(start, end, "interval lies outside the file's declarations");
        return (NodePath(vec![root]), false);
    }

    let mut path = Vec::new();
    let mut node = root;
    let exact = 'search: loop {
        path.push(node);
        let span = tree.span(node);
        trace!(kind = tree.kind(node).label(), %span, "visit");

        // Intersect [start, end) with the node's interval.
        start = start.max(span.start);
        end = end.min(span.end);

        let children = children_of(tree, node);
        let count = children.len();
        for (i, child) in children.iter().enumerate() {
            let child_span = child.span();

            // [aug_start, aug_end) absorbs the whitespace around the child.
            // The outermost children extend to the parent's own bounds.
            let aug_start = if i > 0 {
                children[i - 1].span().end
            } else {
                span.start
            };
            let mut aug_end = span.end;
            if i + 1 < count {
                let next_start = children[i + 1].span().start;
                // Does [start, end) lie strictly between this child and the next?
                if start >= child_span.end && end <= next_start {
                    break 'search false;
                }
                aug_end = next_start;
            }

            if aug_start <= start && end <= aug_end {
                match *child {
                    Child::Token(_) => break 'search true,
                    Child::Node { id, .. } => {
                        node = id;
                        continue 'search;
                    }
                }
            }

            // [start, end) straddles several children.
            if start < child_span.end && end > aug_end {
                break;
            }
        }

        // No single child contained [start, end), so this node is the
        // result.  It is exact only if the intervals coincide.
        break start == span.start && end == span.end;
    };

    (NodePath(path), exact)
}

/// [`path_enclosing_interval`] for a single offset.
pub fn path_enclosing_offset(tree: &SyntaxTree, offset: u32) -> (NodePath, bool) {
    path_enclosing_interval(tree, offset, offset)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
