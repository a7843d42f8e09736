#![allow(dead_code)]

use godefinfo::binding::{
    BindingTables, CheckedFile, PackageId, ScopeId, Selection, SelectionKind, Symbol, SymbolId, SymbolKind,
    Type, TypeGraph, TypeId,
};
use godefinfo::syntax::{NodeId, NodeKind, SyntaxTree, Token, TreeBuilder};
use godefinfo::{Backend, DefinitionDescriptor, NotFound, Span};

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

// ─── Source-driven tree builder ─────────────────────────────────────────────

/// Builds a syntax tree over real source text, finding every position by
/// searching forward from a cursor.
///
/// Needles that start with an identifier character only match whole
/// words, so `ident("T")` skips the `T` in `Transport`.
pub struct GoSource {
    pub src: &'static str,
    builder: TreeBuilder,
    cursor: usize,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_word_at(src: &str, at: usize, len: usize) -> bool {
    let bytes = src.as_bytes();
    (at == 0 || !is_ident_byte(bytes[at - 1]))
        && (at + len >= bytes.len() || !is_ident_byte(bytes[at + len]))
}

fn find_from(src: &str, from: usize, needle: &str) -> Option<usize> {
    let word = needle.bytes().next().is_some_and(is_ident_byte);
    let mut from = from;
    loop {
        let at = from + src[from..].find(needle)?;
        if !word || is_word_at(src, at, needle.len()) {
            return Some(at);
        }
        from = at + 1;
    }
}

/// Offset of the `nth` (0-based) occurrence of `needle` in `src`.
pub fn offset_in(src: &str, needle: &str, nth: usize) -> u32 {
    let mut at = 0;
    for i in 0..=nth {
        let from = if i == 0 { 0 } else { at + 1 };
        at = find_from(src, from, needle)
            .unwrap_or_else(|| panic!("occurrence {} of {:?} not found", nth, needle));
    }
    at as u32
}

impl GoSource {
    pub fn new(src: &'static str) -> Self {
        Self {
            src,
            builder: TreeBuilder::new(),
            cursor: 0,
        }
    }

    /// Offset of the next `needle` at or after the cursor.
    pub fn peek(&self, needle: &str) -> u32 {
        find_from(self.src, self.cursor, needle).unwrap_or_else(|| {
            panic!("{:?} not found after offset {}", needle, self.cursor)
        }) as u32
    }

    /// Offset of the last `needle` in the source.
    pub fn last(&self, needle: &str) -> u32 {
        self.src.rfind(needle).expect("needle not in source") as u32
    }

    fn seek(&mut self, needle: &str) -> u32 {
        let at = self.peek(needle);
        self.cursor = at as usize;
        at
    }

    /// Open a node starting at the next `at`.
    pub fn open(&mut self, kind: NodeKind, at: &str) -> NodeId {
        let start = self.seek(at);
        self.builder.start_node(kind, start)
    }

    /// Open a node at an explicit offset, leaving the cursor alone.
    pub fn open_at(&mut self, kind: NodeKind, start: u32) -> NodeId {
        self.builder.start_node(kind, start)
    }

    /// Close the innermost node just after the next `through`.
    pub fn close(&mut self, through: &str) -> NodeId {
        let end = self.peek(through) + through.len() as u32;
        self.cursor = end as usize;
        self.builder.finish_node(end).expect("no open node")
    }

    /// Close the innermost node where the last consumed token ended.
    pub fn close_here(&mut self) -> NodeId {
        self.builder
            .finish_node(self.cursor as u32)
            .expect("no open node")
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        let start = self.seek(name);
        self.cursor += name.len();
        self.builder
            .leaf(NodeKind::ident(name), Span::at(start, name.len()))
    }

    pub fn lit(&mut self, text: &str) -> NodeId {
        let start = self.seek(text);
        self.cursor += text.len();
        self.builder
            .leaf(NodeKind::basic_lit(text), Span::at(start, text.len()))
    }

    pub fn finish(self) -> SyntaxTree {
        self.builder.finish().expect("fixture tree is valid")
    }

    // ─── Common shapes ──────────────────────────────────────────────────

    /// `type <name> ` + body built by `body`, as a one-spec `GenDecl`.
    pub fn type_decl(&mut self, name: &str, body: impl FnOnce(&mut Self)) -> NodeId {
        let tok_pos = self.peek("type");
        self.open(
            NodeKind::GenDecl {
                tok: Token::Type,
                tok_pos,
                lparen: None,
                rparen: None,
            },
            "type",
        );
        self.open(NodeKind::TypeSpec, name);
        let ident = self.ident(name);
        body(self);
        self.close_here();
        self.close_here();
        ident
    }

    /// A `{ ... }` field list whose fields are built by `fields`.
    pub fn braced_fields(&mut self, fields: impl FnOnce(&mut Self)) {
        let opening = self.peek("{");
        let closing = self.peek("}");
        self.open(
            NodeKind::FieldList {
                opening: Some(opening),
                closing: Some(closing),
            },
            "{",
        );
        fields(self);
        self.close("}");
    }

    /// `struct { ... }`.
    pub fn struct_type(&mut self, fields: impl FnOnce(&mut Self)) {
        let struct_pos = self.peek("struct");
        self.open(NodeKind::StructType { struct_pos }, "struct");
        self.braced_fields(fields);
        self.close_here();
    }

    /// `interface { ... }`.
    pub fn interface_type(&mut self, fields: impl FnOnce(&mut Self)) {
        let interface_pos = self.peek("interface");
        self.open(NodeKind::InterfaceType { interface_pos }, "interface");
        self.braced_fields(fields);
        self.close_here();
    }

    /// A field `<name> <type>` where the type is an identifier.
    pub fn named_field(&mut self, name: &str, ty: &str) -> (NodeId, NodeId) {
        self.open(NodeKind::Field, name);
        let name = self.ident(name);
        let ty = self.ident(ty);
        self.close_here();
        (name, ty)
    }

    /// An embedded field `<ty>`.
    pub fn embedded_field(&mut self, ty: &str) -> NodeId {
        self.open(NodeKind::Field, ty);
        let ident = self.ident(ty);
        self.close_here();
        ident
    }

    /// An interface method `<name>()`.
    pub fn interface_method(&mut self, name: &str) -> NodeId {
        self.open(NodeKind::Field, name);
        let ident = self.ident(name);
        self.empty_params(None);
        self.close_here();
        ident
    }

    /// A `FuncType` with an empty `()` parameter list.
    pub fn empty_params(&mut self, func_pos: Option<u32>) {
        let lparen = self.peek("(");
        let rparen = self.peek(")");
        match func_pos {
            Some(pos) => self.open_at(NodeKind::FuncType { func_pos }, pos),
            None => self.open(NodeKind::FuncType { func_pos }, "("),
        };
        self.open(
            NodeKind::FieldList {
                opening: Some(lparen),
                closing: Some(rparen),
            },
            "(",
        );
        self.close(")");
        self.close_here();
    }

    /// An empty `{}` block.
    pub fn empty_block(&mut self) {
        let lbrace = self.peek("{");
        let rbrace = self.peek("}");
        self.open(NodeKind::BlockStmt { lbrace, rbrace }, "{");
        self.close("}");
    }

    /// `<name> := ` + the value built by `value`.
    pub fn define(&mut self, name: &str, value: impl FnOnce(&mut Self) -> NodeId) -> (NodeId, NodeId) {
        let tok_pos = self.peek(":=");
        self.open(
            NodeKind::AssignStmt {
                tok: Token::Define,
                tok_pos,
            },
            name,
        );
        let ident = self.ident(name);
        let value = value(self);
        self.close_here();
        (ident, value)
    }

    /// `T{}` where `T` is an identifier; returns the type identifier.
    pub fn empty_composite(&mut self, ty: &str) -> NodeId {
        let lbrace = self.peek("{");
        let rbrace = self.peek("}");
        self.open(NodeKind::CompositeLit { lbrace, rbrace }, ty);
        let ident = self.ident(ty);
        self.close("}");
        ident
    }

    /// `(&T{})`; returns the type identifier.
    pub fn paren_addr_of(&mut self, ty: &str) -> NodeId {
        let lparen = self.peek("(");
        let rparen = self.peek(")");
        self.open(NodeKind::ParenExpr { lparen, rparen }, "(");
        let op_pos = self.peek("&");
        self.open(
            NodeKind::UnaryExpr {
                op: Token::And,
                op_pos,
            },
            "&",
        );
        let ident = self.empty_composite(ty);
        self.close_here();
        self.close(")");
        ident
    }

    /// `(&T{}).<member>`; returns the selector, the type identifier and
    /// the member identifier.
    pub fn addr_selector(&mut self, ty: &str, member: &str) -> (NodeId, NodeId, NodeId) {
        let sel = self.open(NodeKind::SelectorExpr, "(");
        let lit = self.paren_addr_of(ty);
        let member = self.ident(member);
        self.close_here();
        (sel, lit, member)
    }

    /// `T(nil).<member>`; returns the selector and the identifiers for
    /// the type, `nil` and the member.
    pub fn nil_conversion_selector(
        &mut self,
        ty: &str,
        member: &str,
    ) -> (NodeId, NodeId, NodeId, NodeId) {
        let sel = self.open(NodeKind::SelectorExpr, ty);
        let lparen = self.peek("(");
        let rparen = self.peek(")");
        self.open(
            NodeKind::CallExpr {
                lparen,
                rparen,
                ellipsis_pos: None,
            },
            ty,
        );
        let ty = self.ident(ty);
        let nil = self.ident("nil");
        self.close(")");
        let member = self.ident(member);
        self.close_here();
        (sel, ty, nil, member)
    }
}

// ─── The fixture package ────────────────────────────────────────────────────

/// Import path of the fixture package.
pub const PKG: &str = "example.com/p";

pub const SRC: &str = r#"package p

import "net/http"

type T struct {
    F0 int
    S
    *P
    K
}

type S struct{ F1 int }

type P struct {
    I
    F2 int
}

type I interface {
    L
    M8()
}

type K interface{ M10() }

type L interface{ M11() }

func (T) M0() {}

func (s *S) M1() {}

func F() error {
    v := (&T{}).F1
    w := T{}.F1
    x := (&T{}).M11
    y := I(nil).M11
    z := T{F0: v + w}
    c := http.DefaultClient.Transport.RoundTrip
    m := make([]string, 0)
    a := (&T{}).M0
    b := (&T{}).M1
    d := L(nil).M11
    return nil
}
"#;

/// Offset of the `nth` occurrence of `needle` in [`SRC`].
pub fn offset(needle: &str, nth: usize) -> u32 {
    offset_in(SRC, needle, nth)
}

/// Resolve the start of the `nth` occurrence of `needle` in [`SRC`].
pub fn resolve_at(needle: &str, nth: usize) -> Result<DefinitionDescriptor, NotFound> {
    let file = fixture();
    create_test_backend().resolve_definition(&file, offset(needle, nth))
}

/// Identifiers and selectors of the fixture tree that carry bindings.
struct Nodes {
    t_name: NodeId,
    f0_def: NodeId,
    t_int: NodeId,
    t_embed_s: NodeId,
    t_embed_p: NodeId,
    t_embed_k: NodeId,
    s_name: NodeId,
    f1_def: NodeId,
    s_int: NodeId,
    p_name: NodeId,
    p_embed_i: NodeId,
    f2_def: NodeId,
    p_int: NodeId,
    i_name: NodeId,
    i_embed_l: NodeId,
    m8_def: NodeId,
    k_name: NodeId,
    m10_def: NodeId,
    l_name: NodeId,
    m11_def: NodeId,
    m0_recv: NodeId,
    m0_def: NodeId,
    recv_s: NodeId,
    recv_s_type: NodeId,
    m1_def: NodeId,
    f_def: NodeId,
    error_use: NodeId,
    v_def: NodeId,
    v_lit: NodeId,
    v_sel: NodeId,
    v_f1: NodeId,
    w_def: NodeId,
    w_lit: NodeId,
    w_sel: NodeId,
    w_f1: NodeId,
    x_def: NodeId,
    x_lit: NodeId,
    x_sel: NodeId,
    x_m11: NodeId,
    y_def: NodeId,
    y_sel: NodeId,
    y_i: NodeId,
    y_nil: NodeId,
    y_m11: NodeId,
    z_def: NodeId,
    z_lit: NodeId,
    z_f0: NodeId,
    z_v: NodeId,
    z_w: NodeId,
    c_def: NodeId,
    http_use: NodeId,
    default_client: NodeId,
    transport_sel: NodeId,
    transport: NodeId,
    round_trip_sel: NodeId,
    round_trip: NodeId,
    m_def: NodeId,
    make_use: NodeId,
    string_use: NodeId,
    a_def: NodeId,
    a_lit: NodeId,
    a_sel: NodeId,
    a_m0: NodeId,
    b_def: NodeId,
    b_lit: NodeId,
    b_sel: NodeId,
    b_m1: NodeId,
    d_def: NodeId,
    d_sel: NodeId,
    d_l: NodeId,
    d_nil: NodeId,
    d_m11: NodeId,
    return_nil: NodeId,
}

fn build_tree() -> (SyntaxTree, Nodes) {
    let mut g = GoSource::new(SRC);
    let package_pos = g.peek("package");
    g.open_at(NodeKind::File { package_pos }, package_pos);
    g.ident("p");

    let tok_pos = g.peek("import");
    g.open(
        NodeKind::GenDecl {
            tok: Token::Import,
            tok_pos,
            lparen: None,
            rparen: None,
        },
        "import",
    );
    g.open(NodeKind::ImportSpec, "\"net/http\"");
    g.lit("\"net/http\"");
    g.close_here();
    g.close_here();

    let mut t = (None, None, None, None, None);
    let t_name = g.type_decl("T", |g| {
        g.struct_type(|g| {
            let (f0, int) = g.named_field("F0", "int");
            let s = g.embedded_field("S");
            let star_pos = g.peek("*");
            g.open(NodeKind::Field, "*");
            g.open(NodeKind::StarExpr { star_pos }, "*");
            let p = g.ident("P");
            g.close_here();
            g.close_here();
            let k = g.embedded_field("K");
            t = (Some(f0), Some(int), Some(s), Some(p), Some(k));
        })
    });

    let mut s_fields = None;
    let s_name = g.type_decl("S", |g| {
        g.struct_type(|g| s_fields = Some(g.named_field("F1", "int")))
    });

    let mut p_fields = None;
    let p_name = g.type_decl("P", |g| {
        g.struct_type(|g| {
            let i = g.embedded_field("I");
            let f2 = g.named_field("F2", "int");
            p_fields = Some((i, f2));
        })
    });

    let mut i_fields = None;
    let i_name = g.type_decl("I", |g| {
        g.interface_type(|g| {
            let l = g.embedded_field("L");
            let m8 = g.interface_method("M8");
            i_fields = Some((l, m8));
        })
    });

    let mut m10_def = None;
    let k_name = g.type_decl("K", |g| {
        g.interface_type(|g| m10_def = Some(g.interface_method("M10")))
    });

    let mut m11_def = None;
    let l_name = g.type_decl("L", |g| {
        g.interface_type(|g| m11_def = Some(g.interface_method("M11")))
    });

    // func (T) M0() {}
    let func_pos = g.peek("func");
    g.open(NodeKind::FuncDecl, "func");
    let lparen = g.peek("(");
    let rparen = g.peek(")");
    g.open(
        NodeKind::FieldList {
            opening: Some(lparen),
            closing: Some(rparen),
        },
        "(",
    );
    let m0_recv = g.embedded_field("T");
    g.close(")");
    let m0_def = g.ident("M0");
    g.empty_params(Some(func_pos));
    g.empty_block();
    g.close_here();

    // func (s *S) M1() {}
    let func_pos = g.peek("func");
    g.open(NodeKind::FuncDecl, "func");
    let lparen = g.peek("(");
    let rparen = g.peek(")");
    g.open(
        NodeKind::FieldList {
            opening: Some(lparen),
            closing: Some(rparen),
        },
        "(",
    );
    g.open(NodeKind::Field, "s");
    let recv_s = g.ident("s");
    let star_pos = g.peek("*");
    g.open(NodeKind::StarExpr { star_pos }, "*");
    let recv_s_type = g.ident("S");
    g.close_here();
    g.close_here();
    g.close(")");
    let m1_def = g.ident("M1");
    g.empty_params(Some(func_pos));
    g.empty_block();
    g.close_here();

    // func F() error { ... }
    let func_pos = g.peek("func");
    g.open(NodeKind::FuncDecl, "func");
    let f_def = g.ident("F");
    let lparen = g.peek("(");
    let rparen = g.peek(")");
    g.open_at(
        NodeKind::FuncType {
            func_pos: Some(func_pos),
        },
        func_pos,
    );
    g.open(
        NodeKind::FieldList {
            opening: Some(lparen),
            closing: Some(rparen),
        },
        "(",
    );
    g.close(")");
    g.open(
        NodeKind::FieldList {
            opening: None,
            closing: None,
        },
        "error",
    );
    let error_use = g.embedded_field("error");
    g.close_here();
    g.close_here();

    let lbrace = g.peek("{");
    let rbrace = g.last("}");
    g.open(NodeKind::BlockStmt { lbrace, rbrace }, "{");

    // v := (&T{}).F1
    let mut v = (None, None);
    let (v_def, v_sel) = g.define("v", |g| {
        let sel = g.open(NodeKind::SelectorExpr, "(");
        let lit = g.paren_addr_of("T");
        let f1 = g.ident("F1");
        g.close_here();
        v = (Some(lit), Some(f1));
        sel
    });

    // w := T{}.F1
    let mut w = (None, None);
    let (w_def, w_sel) = g.define("w", |g| {
        let sel = g.open(NodeKind::SelectorExpr, "T");
        let lit = g.empty_composite("T");
        let f1 = g.ident("F1");
        g.close_here();
        w = (Some(lit), Some(f1));
        sel
    });

    // x := (&T{}).M11
    let mut x = (None, None);
    let (x_def, x_sel) = g.define("x", |g| {
        let (sel, lit, m11) = g.addr_selector("T", "M11");
        x = (Some(lit), Some(m11));
        sel
    });

    // y := I(nil).M11
    let mut y = (None, None, None);
    let (y_def, y_sel) = g.define("y", |g| {
        let (sel, i, nil, m11) = g.nil_conversion_selector("I", "M11");
        y = (Some(i), Some(nil), Some(m11));
        sel
    });

    // z := T{F0: v + w}
    let mut z = (None, None, None, None);
    let (z_def, _) = g.define("z", |g| {
        let lbrace = g.peek("{");
        let rbrace = g.peek("}");
        let lit = g.open(NodeKind::CompositeLit { lbrace, rbrace }, "T");
        let ty = g.ident("T");
        let colon = g.peek(":");
        g.open(NodeKind::KeyValueExpr { colon }, "F0");
        let f0 = g.ident("F0");
        let op_pos = g.peek("+");
        g.open(
            NodeKind::BinaryExpr {
                op: Token::Add,
                op_pos,
            },
            "v",
        );
        let v = g.ident("v");
        let w = g.ident("w");
        g.close_here();
        g.close_here();
        g.close("}");
        z = (Some(ty), Some(f0), Some(v), Some(w));
        lit
    });

    // c := http.DefaultClient.Transport.RoundTrip
    let mut c = (None, None, None, None, None);
    let (c_def, round_trip_sel) = g.define("c", |g| {
        let outer = g.open(NodeKind::SelectorExpr, "http");
        let middle = g.open(NodeKind::SelectorExpr, "http");
        g.open(NodeKind::SelectorExpr, "http");
        let http = g.ident("http");
        let dc = g.ident("DefaultClient");
        g.close_here();
        let transport = g.ident("Transport");
        g.close_here();
        let round_trip = g.ident("RoundTrip");
        g.close_here();
        c = (Some(http), Some(dc), Some(middle), Some(transport), Some(round_trip));
        outer
    });

    // m := make([]string, 0)
    let mut m = (None, None);
    let (m_def, _) = g.define("m", |g| {
        let lparen = g.peek("(");
        let rparen = g.peek(")");
        let call = g.open(
            NodeKind::CallExpr {
                lparen,
                rparen,
                ellipsis_pos: None,
            },
            "make",
        );
        let make = g.ident("make");
        let lbrack = g.peek("[");
        let rbrack = g.peek("]");
        g.open(NodeKind::ArrayType { lbrack, rbrack }, "[");
        let string = g.ident("string");
        g.close_here();
        g.lit("0");
        g.close(")");
        m = (Some(make), Some(string));
        call
    });

    // a := (&T{}).M0
    let mut a = (None, None);
    let (a_def, a_sel) = g.define("a", |g| {
        let (sel, lit, m0) = g.addr_selector("T", "M0");
        a = (Some(lit), Some(m0));
        sel
    });

    // b := (&T{}).M1
    let mut b = (None, None);
    let (b_def, b_sel) = g.define("b", |g| {
        let (sel, lit, m1) = g.addr_selector("T", "M1");
        b = (Some(lit), Some(m1));
        sel
    });

    // d := L(nil).M11
    let mut d = (None, None, None);
    let (d_def, d_sel) = g.define("d", |g| {
        let (sel, l, nil, m11) = g.nil_conversion_selector("L", "M11");
        d = (Some(l), Some(nil), Some(m11));
        sel
    });

    // return nil
    let return_pos = g.peek("return");
    g.open(NodeKind::ReturnStmt { return_pos }, "return");
    let return_nil = g.ident("nil");
    g.close_here();

    g.close("}");
    g.close_here();
    g.close_here();

    let tree = g.finish();
    let (f0_def, t_int, t_embed_s, t_embed_p, t_embed_k) = t;
    let (f1_def, s_int) = s_fields.unwrap();
    let (p_embed_i, (f2_def, p_int)) = p_fields.unwrap();
    let (i_embed_l, m8_def) = i_fields.unwrap();
    let nodes = Nodes {
        t_name,
        f0_def: f0_def.unwrap(),
        t_int: t_int.unwrap(),
        t_embed_s: t_embed_s.unwrap(),
        t_embed_p: t_embed_p.unwrap(),
        t_embed_k: t_embed_k.unwrap(),
        s_name,
        f1_def,
        s_int,
        p_name,
        p_embed_i,
        f2_def,
        p_int,
        i_name,
        i_embed_l,
        m8_def,
        k_name,
        m10_def: m10_def.unwrap(),
        l_name,
        m11_def: m11_def.unwrap(),
        m0_recv,
        m0_def,
        recv_s,
        recv_s_type,
        m1_def,
        f_def,
        error_use,
        v_def,
        v_lit: v.0.unwrap(),
        v_sel,
        v_f1: v.1.unwrap(),
        w_def,
        w_lit: w.0.unwrap(),
        w_sel,
        w_f1: w.1.unwrap(),
        x_def,
        x_lit: x.0.unwrap(),
        x_sel,
        x_m11: x.1.unwrap(),
        y_def,
        y_sel,
        y_i: y.0.unwrap(),
        y_nil: y.1.unwrap(),
        y_m11: y.2.unwrap(),
        z_def,
        z_lit: z.0.unwrap(),
        z_f0: z.1.unwrap(),
        z_v: z.2.unwrap(),
        z_w: z.3.unwrap(),
        c_def,
        http_use: c.0.unwrap(),
        default_client: c.1.unwrap(),
        transport_sel: c.2.unwrap(),
        transport: c.3.unwrap(),
        round_trip_sel,
        round_trip: c.4.unwrap(),
        m_def,
        make_use: m.0.unwrap(),
        string_use: m.1.unwrap(),
        a_def,
        a_lit: a.0.unwrap(),
        a_sel,
        a_m0: a.1.unwrap(),
        b_def,
        b_lit: b.0.unwrap(),
        b_sel,
        b_m1: b.1.unwrap(),
        d_def,
        d_sel,
        d_l: d.0.unwrap(),
        d_nil: d.1.unwrap(),
        d_m11: d.2.unwrap(),
        return_nil,
    };
    (tree, nodes)
}

fn signature(graph: &mut TypeGraph, recv: Option<TypeId>, results: Vec<TypeId>) -> TypeId {
    graph.add_type(Type::Signature {
        recv,
        params: Vec::new(),
        results,
        variadic: false,
    })
}

fn method(graph: &mut TypeGraph, pkg: PackageId, name: &str, recv: TypeId) -> SymbolId {
    let sig = signature(graph, Some(recv), Vec::new());
    graph.add_symbol(
        Symbol::new(name, SymbolKind::Func)
            .in_package(pkg)
            .with_type(sig),
    )
}

fn field(graph: &mut TypeGraph, pkg: PackageId, name: &str, ty: TypeId, embedded: bool) -> SymbolId {
    graph.add_symbol(
        Symbol::new(name, SymbolKind::Field { embedded })
            .in_package(pkg)
            .with_type(ty),
    )
}

fn interface(graph: &mut TypeGraph, methods: Vec<SymbolId>, embedded: Vec<TypeId>) -> TypeId {
    graph.add_type(Type::Interface { methods, embedded })
}

/// The fixture file, checked: package `example.com/p` plus a `net/http`
/// subset.
pub fn fixture() -> CheckedFile {
    let (tree, n) = build_tree();
    let mut graph = TypeGraph::new();
    let error = graph.basic("error").unwrap();
    let int = graph.basic("int").unwrap();
    let universe = |graph: &TypeGraph, name: &str| graph.lookup_universe(name).unwrap();

    // net/http
    let http = graph.add_package("net/http", "http");
    let request = graph.declare_named(http, "Request");
    let response = graph.declare_named(http, "Response");
    for named in [request, response] {
        let body = graph.add_type(Type::Struct { fields: Vec::new() });
        graph.set_underlying(named, body);
    }
    let round_tripper = graph.declare_named(http, "RoundTripper");
    let ptr_request = graph.pointer(request);
    let ptr_response = graph.pointer(response);
    let round_trip_sig = graph.add_type(Type::Signature {
        recv: Some(round_tripper),
        params: vec![ptr_request],
        results: vec![ptr_response, error],
        variadic: false,
    });
    let round_trip = graph.add_symbol(
        Symbol::new("RoundTrip", SymbolKind::Func)
            .in_package(http)
            .with_type(round_trip_sig),
    );
    let rt_iface = interface(&mut graph, vec![round_trip], Vec::new());
    graph.set_underlying(round_tripper, rt_iface);
    let client = graph.declare_named(http, "Client");
    let transport = field(&mut graph, http, "Transport", round_tripper, false);
    let client_struct = graph.add_type(Type::Struct {
        fields: vec![transport],
    });
    graph.set_underlying(client, client_struct);
    let ptr_client = graph.pointer(client);
    let default_client =
        graph.declare_in_package(http, "DefaultClient", SymbolKind::Var, Some(ptr_client));

    // example.com/p
    let p = graph.add_package(PKG, "p");
    let t = graph.declare_named(p, "T");
    let s = graph.declare_named(p, "S");
    let pp = graph.declare_named(p, "P");
    let i = graph.declare_named(p, "I");
    let k = graph.declare_named(p, "K");
    let l = graph.declare_named(p, "L");
    let obj = |graph: &TypeGraph, ty: TypeId| graph.named_obj(ty).unwrap();

    let m11 = method(&mut graph, p, "M11", l);
    let l_iface = interface(&mut graph, vec![m11], Vec::new());
    graph.set_underlying(l, l_iface);
    let m10 = method(&mut graph, p, "M10", k);
    let k_iface = interface(&mut graph, vec![m10], Vec::new());
    graph.set_underlying(k, k_iface);
    // Flattened and sorted by name: M11 (from L), then M8.
    let m8 = method(&mut graph, p, "M8", i);
    let i_iface = interface(&mut graph, vec![m11, m8], vec![l]);
    graph.set_underlying(i, i_iface);

    let f1 = field(&mut graph, p, "F1", int, false);
    let s_struct = graph.add_type(Type::Struct { fields: vec![f1] });
    graph.set_underlying(s, s_struct);

    let p_i = field(&mut graph, p, "I", i, true);
    let f2 = field(&mut graph, p, "F2", int, false);
    let p_struct = graph.add_type(Type::Struct {
        fields: vec![p_i, f2],
    });
    graph.set_underlying(pp, p_struct);

    let ptr_p = graph.pointer(pp);
    let f0 = field(&mut graph, p, "F0", int, false);
    let t_s = field(&mut graph, p, "S", s, true);
    let t_p = field(&mut graph, p, "P", ptr_p, true);
    let t_k = field(&mut graph, p, "K", k, true);
    let t_struct = graph.add_type(Type::Struct {
        fields: vec![f0, t_s, t_p, t_k],
    });
    graph.set_underlying(t, t_struct);
    let ptr_t = graph.pointer(t);

    let m0 = method(&mut graph, p, "M0", t);
    graph.add_method(t, m0);
    let ptr_s = graph.pointer(s);
    let m1 = method(&mut graph, p, "M1", ptr_s);
    graph.add_method(s, m1);

    let f_sig = signature(&mut graph, None, vec![error]);
    let f = graph.declare_in_package(p, "F", SymbolKind::Func, Some(f_sig));

    // File scope holds the import name; function scopes hold locals.
    let package_scope = graph[p].scope;
    let file_scope = graph.add_scope(Some(package_scope));
    let http_name = graph.add_symbol(
        Symbol::new("http", SymbolKind::PkgName { imported: http }).in_package(p),
    );
    graph.declare(file_scope, http_name);

    let local = |graph: &mut TypeGraph, scope: ScopeId, name: &str, ty: TypeId| {
        let sym = graph.add_symbol(Symbol::new(name, SymbolKind::Var).in_package(p).with_type(ty));
        graph.declare(scope, sym);
        sym
    };
    let m1_scope = graph.add_scope(Some(file_scope));
    let recv_s = local(&mut graph, m1_scope, "s", ptr_s);
    let f_scope = graph.add_scope(Some(file_scope));
    let v = local(&mut graph, f_scope, "v", int);
    let w = local(&mut graph, f_scope, "w", int);
    let method_value = signature(&mut graph, None, Vec::new());
    let x = local(&mut graph, f_scope, "x", method_value);
    let y = local(&mut graph, f_scope, "y", method_value);
    let z = local(&mut graph, f_scope, "z", t);
    let c_ty = graph.add_type(Type::Signature {
        recv: None,
        params: vec![ptr_request],
        results: vec![ptr_response, error],
        variadic: false,
    });
    let c = local(&mut graph, f_scope, "c", c_ty);
    let string = graph.basic("string").unwrap();
    let strings = graph.add_type(Type::Slice { elem: string });
    let m = local(&mut graph, f_scope, "m", strings);
    let a = local(&mut graph, f_scope, "a", method_value);
    let b = local(&mut graph, f_scope, "b", method_value);
    let d = local(&mut graph, f_scope, "d", method_value);

    let mut tables = BindingTables::default();
    for (node, sym) in [
        (n.t_name, obj(&graph, t)),
        (n.f0_def, f0),
        (n.t_embed_s, t_s),
        (n.t_embed_p, t_p),
        (n.t_embed_k, t_k),
        (n.s_name, obj(&graph, s)),
        (n.f1_def, f1),
        (n.p_name, obj(&graph, pp)),
        (n.p_embed_i, p_i),
        (n.f2_def, f2),
        (n.i_name, obj(&graph, i)),
        (n.m8_def, m8),
        (n.k_name, obj(&graph, k)),
        (n.m10_def, m10),
        (n.l_name, obj(&graph, l)),
        (n.m11_def, m11),
        (n.m0_def, m0),
        (n.recv_s, recv_s),
        (n.m1_def, m1),
        (n.f_def, f),
        (n.v_def, v),
        (n.w_def, w),
        (n.x_def, x),
        (n.y_def, y),
        (n.z_def, z),
        (n.c_def, c),
        (n.m_def, m),
        (n.a_def, a),
        (n.b_def, b),
        (n.d_def, d),
    ] {
        tables.defs.insert(node, sym);
    }

    let int_obj = universe(&graph, "int");
    let nil_obj = universe(&graph, "nil");
    for (node, sym) in [
        (n.t_int, int_obj),
        (n.s_int, int_obj),
        (n.p_int, int_obj),
        (n.i_embed_l, obj(&graph, l)),
        (n.m0_recv, obj(&graph, t)),
        (n.recv_s_type, obj(&graph, s)),
        (n.error_use, universe(&graph, "error")),
        (n.v_lit, obj(&graph, t)),
        (n.v_f1, f1),
        (n.w_lit, obj(&graph, t)),
        (n.w_f1, f1),
        (n.x_lit, obj(&graph, t)),
        (n.x_m11, m11),
        (n.y_i, obj(&graph, i)),
        (n.y_nil, nil_obj),
        (n.y_m11, m11),
        (n.z_lit, obj(&graph, t)),
        (n.z_f0, f0),
        (n.z_v, v),
        (n.z_w, w),
        (n.http_use, http_name),
        (n.default_client, default_client),
        (n.transport, transport),
        (n.round_trip, round_trip),
        (n.make_use, universe(&graph, "make")),
        (n.string_use, universe(&graph, "string")),
        (n.a_lit, obj(&graph, t)),
        (n.a_m0, m0),
        (n.b_lit, obj(&graph, t)),
        (n.b_m1, m1),
        (n.d_l, obj(&graph, l)),
        (n.d_nil, nil_obj),
        (n.d_m11, m11),
        (n.return_nil, nil_obj),
    ] {
        tables.uses.insert(node, sym);
    }

    let select = |kind, recv, obj, index: &[u32]| Selection {
        kind,
        recv,
        obj,
        index: index.to_vec(),
    };
    for (node, selection) in [
        (n.v_sel, select(SelectionKind::FieldVal, ptr_t, f1, &[1, 0])),
        (n.w_sel, select(SelectionKind::FieldVal, t, f1, &[1, 0])),
        (n.x_sel, select(SelectionKind::MethodVal, ptr_t, m11, &[2, 0, 0])),
        (n.y_sel, select(SelectionKind::MethodVal, i, m11, &[0])),
        (
            n.transport_sel,
            select(SelectionKind::FieldVal, ptr_client, transport, &[0]),
        ),
        (
            n.round_trip_sel,
            select(SelectionKind::MethodVal, round_tripper, round_trip, &[0]),
        ),
        // Declared on T itself.
        (n.a_sel, select(SelectionKind::MethodVal, ptr_t, m0, &[0])),
        // Pointer-receiver method of the embedded S.
        (n.b_sel, select(SelectionKind::MethodVal, ptr_t, m1, &[1, 0])),
        (n.d_sel, select(SelectionKind::MethodVal, l, m11, &[0])),
    ] {
        tables.selections.insert(node, selection);
    }

    CheckedFile {
        package: p,
        tree,
        tables,
        graph,
        diagnostics: Vec::new(),
    }
}
