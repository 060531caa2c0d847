//! AST node types for LiteHDL.
//!
//! The tree mirrors the surface syntax: a single module header followed by
//! port blocks, signal declarations, `comb`/`sync` blocks and instances.
//! Every node carries a [`Span`]. Parse errors leave `Error(Span)` nodes in
//! [`Item`], [`Connection`], [`Stmt`] and [`Expr`] so the rest of the file can
//! still be checked.

use litehdl_common::Ident;
use litehdl_source::Span;
use serde::{Deserialize, Serialize};

// ============================================================================
// Top level
// ============================================================================

/// A parsed `.lhdl` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFileAst {
    /// The module, or `None` if the header could not be parsed.
    pub module: Option<ModuleDecl>,
    /// The whole file.
    pub span: Span,
}

/// `module Name(P=1, ...):` and its body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDecl {
    /// Module name.
    pub name: Ident,
    /// Span of the name.
    pub name_span: Span,
    /// Header parameters, in order.
    pub params: Vec<Param>,
    /// Body items, in order.
    pub items: Vec<Item>,
    /// Header through the end of the body.
    pub span: Span,
}

/// A header parameter, `NAME=default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name.
    pub name: Ident,
    /// Default value. The parser only accepts an integer literal here.
    pub default: Expr,
    /// Source span.
    pub span: Span,
}

// ============================================================================
// Module items
// ============================================================================

/// Which way a port block points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockDirection {
    /// `in:`
    In,
    /// `out:`
    Out,
}

/// An item of the module body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Item {
    /// `in:` or `out:` followed by port declarations.
    Ports {
        /// Direction of every port in the block.
        direction: BlockDirection,
        /// Declarations, in order.
        decls: Vec<Decl>,
        /// Source span.
        span: Span,
    },
    /// `name: type` outside a port block.
    Signal(Decl),
    /// `comb:` block.
    Comb {
        /// Statements.
        body: Vec<Stmt>,
        /// Source span.
        span: Span,
    },
    /// `sync(clk[, rst]):` block.
    Sync {
        /// First argument.
        clock: Expr,
        /// Optional second argument.
        reset: Option<Expr>,
        /// Statements.
        body: Vec<Stmt>,
        /// Source span.
        span: Span,
    },
    /// `inst = Module(G=v, ...):` with its port connections.
    Instance(InstanceDecl),
    /// `pass`
    Pass(Span),
    /// Recovered parse error.
    Error(Span),
}

impl Item {
    /// Source span of the item.
    pub fn span(&self) -> Span {
        match self {
            Item::Ports { span, .. } | Item::Comb { span, .. } | Item::Sync { span, .. } => *span,
            Item::Signal(decl) => decl.span,
            Item::Instance(inst) => inst.span,
            Item::Pass(span) | Item::Error(span) => *span,
        }
    }
}

/// `name: type`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decl {
    /// Declared name.
    pub name: Ident,
    /// Span of the name.
    pub name_span: Span,
    /// Type annotation.
    pub ty: TypeExpr,
    /// Source span.
    pub span: Span,
}

/// A type annotation: a tag followed by zero or more `[dim]` subscripts,
/// e.g. `bit`, `u[8]`, `v[W][16]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeExpr {
    /// The tag (`bit`, `v`, `u`, `s`, ...).
    pub tag: Ident,
    /// Subscripts, outermost first: `v[8][16]` gives `[8, 16]`.
    pub dims: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

/// `u_add = Adder(W=8):` and its body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceDecl {
    /// Instance label.
    pub name: Ident,
    /// Instantiated module.
    pub module: Ident,
    /// Generic bindings from the keyword arguments.
    pub generics: Vec<KeywordArg>,
    /// Port connections.
    pub connections: Vec<Connection>,
    /// Source span.
    pub span: Span,
}

/// `NAME=value` in an instance header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordArg {
    /// Generic name.
    pub name: Ident,
    /// Value.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

/// One line (or nested block) of an instance body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Connection {
    /// `in:` / `out:` sub-block of named connections.
    Group {
        /// Direction written on the sub-block.
        direction: BlockDirection,
        /// Connections inside the block.
        conns: Vec<NamedConn>,
        /// Source span.
        span: Span,
    },
    /// `port = expr` (or `port => expr`), possibly several on one line.
    Named {
        /// Connections on the line.
        conns: Vec<NamedConn>,
        /// Source span.
        span: Span,
    },
    /// `expr, expr, ...`
    Positional {
        /// Expressions, in port order.
        exprs: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// `pass`
    Pass(Span),
    /// Recovered parse error.
    Error(Span),
}

/// `port = expr`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedConn {
    /// Port of the instantiated module.
    pub port: Ident,
    /// Actual connected to it.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

// ============================================================================
// Statements
// ============================================================================

/// A statement inside `comb:` or `sync(...)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    /// `target = value`
    Assign {
        /// Left-hand side. Always a name, index or slice.
        target: Expr,
        /// Right-hand side.
        value: Expr,
        /// Source span.
        span: Span,
    },
    /// `if` / `elif` / `else` chain.
    If(IfStmt),
    /// `pass`
    Pass(Span),
    /// Recovered parse error.
    Error(Span),
}

impl Stmt {
    /// Source span of the statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign { span, .. } => *span,
            Stmt::If(stmt) => stmt.span,
            Stmt::Pass(span) | Stmt::Error(span) => *span,
        }
    }
}

/// `if test: ... elif test: ... else: ...`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfStmt {
    /// Condition.
    pub test: Expr,
    /// Body when the condition holds.
    pub then_body: Vec<Stmt>,
    /// `elif` clauses, in order.
    pub elifs: Vec<ElifClause>,
    /// `else` body, if written.
    pub else_body: Option<Vec<Stmt>>,
    /// Source span.
    pub span: Span,
}

/// `elif test: body`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElifClause {
    /// Condition.
    pub test: Expr,
    /// Body.
    pub body: Vec<Stmt>,
    /// Source span.
    pub span: Span,
}

// ============================================================================
// Expressions
// ============================================================================

/// Binary operators, kept apart by spelling because word and symbol forms
/// bind differently (`a & b == c` vs `a and b == c`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `or`
    Or,
    /// `and`
    And,
    /// `xor`
    Xor,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl BinaryOp {
    /// Whether this is a relational operator.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
        )
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `not`
    Not,
    /// `~`
    Invert,
}

/// An expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    /// A name.
    Name {
        /// The identifier.
        name: Ident,
        /// Source span.
        span: Span,
    },
    /// An integer literal.
    Int {
        /// Value.
        value: u64,
        /// Source span.
        span: Span,
    },
    /// A quoted literal; `text` excludes the quotes.
    Str {
        /// Contents.
        text: String,
        /// Source span.
        span: Span,
    },
    /// `lhs op rhs`
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `op operand`
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `func(args...)`
    Call {
        /// Callee name.
        func: Ident,
        /// Arguments.
        args: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// `base[index]`
    Index {
        /// Indexed value.
        base: Box<Expr>,
        /// Index.
        index: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `base[high:low]`; either bound may be omitted.
    Slice {
        /// Sliced value.
        base: Box<Expr>,
        /// Upper bound.
        high: Option<Box<Expr>>,
        /// Lower bound.
        low: Option<Box<Expr>>,
        /// Source span.
        span: Span,
    },
    /// `(inner)`
    Paren {
        /// Inner expression.
        inner: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `(a, b, ...)`
    Tuple {
        /// Elements.
        items: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// Recovered parse error.
    Error(Span),
}

impl Expr {
    /// Source span of the expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Name { span, .. }
            | Expr::Int { span, .. }
            | Expr::Str { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Call { span, .. }
            | Expr::Index { span, .. }
            | Expr::Slice { span, .. }
            | Expr::Paren { span, .. }
            | Expr::Tuple { span, .. } => *span,
            Expr::Error(span) => *span,
        }
    }

    /// Strips any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        match self {
            Expr::Paren { inner, .. } => inner.unparen(),
            other => other,
        }
    }
}
