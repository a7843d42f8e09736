//! Node kinds and lexical tokens of the Go syntax tree.
//!
//! A [`NodeKind`] carries only what the tree structure cannot express: the
//! positions of keywords and punctuation owned by the node (so the locator
//! can synthesize token leaves for them) and scalar payloads such as an
//! identifier's name.  Child nodes live in [`SyntaxNode::children`].
//!
//! [`SyntaxNode::children`]: super::SyntaxNode::children

use serde::{Deserialize, Serialize};

/// Operator and keyword tokens whose source text sizes a token leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    // Operators
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
    LAnd,
    LOr,
    Arrow,
    Inc,
    Dec,
    Eql,
    Lss,
    Gtr,
    Assign,
    Not,
    Neq,
    Leq,
    Geq,
    Define,
    Tilde,

    // Keywords
    Break,
    Continue,
    Goto,
    Fallthrough,
    Import,
    Const,
    Type,
    Var,
}

impl Token {
    /// The token's source text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Token::Add => "+",
            Token::Sub => "-",
            Token::Mul => "*",
            Token::Quo => "/",
            Token::Rem => "%",
            Token::And => "&",
            Token::Or => "|",
            Token::Xor => "^",
            Token::Shl => "<<",
            Token::Shr => ">>",
            Token::AndNot => "&^",
            Token::AddAssign => "+=",
            Token::SubAssign => "-=",
            Token::MulAssign => "*=",
            Token::QuoAssign => "/=",
            Token::RemAssign => "%=",
            Token::AndAssign => "&=",
            Token::OrAssign => "|=",
            Token::XorAssign => "^=",
            Token::ShlAssign => "<<=",
            Token::ShrAssign => ">>=",
            Token::AndNotAssign => "&^=",
            Token::LAnd => "&&",
            Token::LOr => "||",
            Token::Arrow => "<-",
            Token::Inc => "++",
            Token::Dec => "--",
            Token::Eql => "==",
            Token::Lss => "<",
            Token::Gtr => ">",
            Token::Assign => "=",
            Token::Not => "!",
            Token::Neq => "!=",
            Token::Leq => "<=",
            Token::Geq => ">=",
            Token::Define => ":=",
            Token::Tilde => "~",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Goto => "goto",
            Token::Fallthrough => "fallthrough",
            Token::Import => "import",
            Token::Const => "const",
            Token::Type => "type",
            Token::Var => "var",
        }
    }

    /// Length of the token's source text in bytes.
    pub const fn text_len(self) -> usize {
        self.as_str().len()
    }
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanDir {
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
    /// `chan T`
    Both,
}

/// The syntactic category of a node, plus the positions of the bare tokens
/// it owns.
///
/// Positions are byte offsets of the first byte of the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeKind {
    // ─── Files and comments ─────────────────────────────────────────────
    File { package_pos: u32 },
    Comment,
    CommentGroup,

    // ─── Expressions ────────────────────────────────────────────────────
    Ident { name: String },
    BasicLit { value: String },
    Ellipsis { ellipsis_pos: u32 },
    FuncLit,
    CompositeLit { lbrace: u32, rbrace: u32 },
    ParenExpr { lparen: u32, rparen: u32 },
    SelectorExpr,
    IndexExpr { lbrack: u32, rbrack: u32 },
    SliceExpr { lbrack: u32, rbrack: u32 },
    TypeAssertExpr { lparen: u32, rparen: u32 },
    CallExpr {
        lparen: u32,
        rparen: u32,
        #[serde(default)]
        ellipsis_pos: Option<u32>,
    },
    StarExpr { star_pos: u32 },
    UnaryExpr { op: Token, op_pos: u32 },
    BinaryExpr { op: Token, op_pos: u32 },
    KeyValueExpr { colon: u32 },
    BadExpr,

    // ─── Types ──────────────────────────────────────────────────────────
    ArrayType { lbrack: u32, rbrack: u32 },
    StructType { struct_pos: u32 },
    FuncType {
        #[serde(default)]
        func_pos: Option<u32>,
    },
    InterfaceType { interface_pos: u32 },
    MapType { map_pos: u32 },
    ChanType { begin: u32, dir: ChanDir },
    Field,
    FieldList {
        #[serde(default)]
        opening: Option<u32>,
        #[serde(default)]
        closing: Option<u32>,
    },

    // ─── Statements ─────────────────────────────────────────────────────
    BadStmt,
    DeclStmt,
    EmptyStmt,
    LabeledStmt { colon: u32 },
    ExprStmt,
    SendStmt { arrow: u32 },
    IncDecStmt { tok: Token, tok_pos: u32 },
    AssignStmt { tok: Token, tok_pos: u32 },
    GoStmt { go_pos: u32 },
    DeferStmt { defer_pos: u32 },
    ReturnStmt { return_pos: u32 },
    BranchStmt { tok: Token, tok_pos: u32 },
    BlockStmt { lbrace: u32, rbrace: u32 },
    IfStmt { if_pos: u32 },
    CaseClause {
        case_pos: u32,
        colon: u32,
        /// `default:` rather than `case ...:`.
        is_default: bool,
    },
    SwitchStmt { switch_pos: u32 },
    TypeSwitchStmt { switch_pos: u32 },
    CommClause {
        case_pos: u32,
        colon: u32,
        is_default: bool,
    },
    SelectStmt { select_pos: u32 },
    ForStmt { for_pos: u32 },
    RangeStmt {
        for_pos: u32,
        /// `=` or `:=` when the range has a key/value assignment.
        #[serde(default)]
        tok: Option<(Token, u32)>,
    },

    // ─── Specs and declarations ─────────────────────────────────────────
    ImportSpec,
    ValueSpec,
    TypeSpec,
    GenDecl {
        tok: Token,
        tok_pos: u32,
        #[serde(default)]
        lparen: Option<u32>,
        #[serde(default)]
        rparen: Option<u32>,
    },
    FuncDecl,
    BadDecl,
}

impl NodeKind {
    /// Short kind label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::File { .. } => "File",
            NodeKind::Comment => "Comment",
            NodeKind::CommentGroup => "CommentGroup",
            NodeKind::Ident { .. } => "Ident",
            NodeKind::BasicLit { .. } => "BasicLit",
            NodeKind::Ellipsis { .. } => "Ellipsis",
            NodeKind::FuncLit => "FuncLit",
            NodeKind::CompositeLit { .. } => "CompositeLit",
            NodeKind::ParenExpr { .. } => "ParenExpr",
            NodeKind::SelectorExpr => "SelectorExpr",
            NodeKind::IndexExpr { .. } => "IndexExpr",
            NodeKind::SliceExpr { .. } => "SliceExpr",
            NodeKind::TypeAssertExpr { .. } => "TypeAssertExpr",
            NodeKind::CallExpr { .. } => "CallExpr",
            NodeKind::StarExpr { .. } => "StarExpr",
            NodeKind::UnaryExpr { .. } => "UnaryExpr",
            NodeKind::BinaryExpr { .. } => "BinaryExpr",
            NodeKind::KeyValueExpr { .. } => "KeyValueExpr",
            NodeKind::BadExpr => "BadExpr",
            NodeKind::ArrayType { .. } => "ArrayType",
            NodeKind::StructType { .. } => "StructType",
            NodeKind::FuncType { .. } => "FuncType",
            NodeKind::InterfaceType { .. } => "InterfaceType",
            NodeKind::MapType { .. } => "MapType",
            NodeKind::ChanType { .. } => "ChanType",
            NodeKind::Field => "Field",
            NodeKind::FieldList { .. } => "FieldList",
            NodeKind::BadStmt => "BadStmt",
            NodeKind::DeclStmt => "DeclStmt",
            NodeKind::EmptyStmt => "EmptyStmt",
            NodeKind::LabeledStmt { .. } => "LabeledStmt",
            NodeKind::ExprStmt => "ExprStmt",
            NodeKind::SendStmt { .. } => "SendStmt",
            NodeKind::IncDecStmt { .. } => "IncDecStmt",
            NodeKind::AssignStmt { .. } => "AssignStmt",
            NodeKind::GoStmt { .. } => "GoStmt",
            NodeKind::DeferStmt { .. } => "DeferStmt",
            NodeKind::ReturnStmt { .. } => "ReturnStmt",
            NodeKind::BranchStmt { .. } => "BranchStmt",
            NodeKind::BlockStmt { .. } => "BlockStmt",
            NodeKind::IfStmt { .. } => "IfStmt",
            NodeKind::CaseClause { .. } => "CaseClause",
            NodeKind::SwitchStmt { .. } => "SwitchStmt",
            NodeKind::TypeSwitchStmt { .. } => "TypeSwitchStmt",
            NodeKind::CommClause { .. } => "CommClause",
            NodeKind::SelectStmt { .. } => "SelectStmt",
            NodeKind::ForStmt { .. } => "ForStmt",
            NodeKind::RangeStmt { .. } => "RangeStmt",
            NodeKind::ImportSpec => "ImportSpec",
            NodeKind::ValueSpec => "ValueSpec",
            NodeKind::TypeSpec => "TypeSpec",
            NodeKind::GenDecl { .. } => "GenDecl",
            NodeKind::FuncDecl => "FuncDecl",
            NodeKind::BadDecl => "BadDecl",
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        NodeKind::Ident { name: name.into() }
    }

    pub fn basic_lit(value: impl Into<String>) -> Self {
        NodeKind::BasicLit {
            value: value.into(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
