//! Expression rendering.

use litehdl_common::{Ident, Interner};
use litehdl_ir::{BinaryOp, Bound, CallKind, Expr};

/// Renders IR expressions as VHDL text.
#[derive(Clone, Copy)]
pub struct ExprTranslator<'a> {
    interner: &'a Interner,
}

fn binary_op_text(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        BinaryOp::Xor => "xor",
        BinaryOp::Eq => "=",
        BinaryOp::Ne => "/=",
        BinaryOp::Lt => "<",
        BinaryOp::Gt => ">",
        BinaryOp::Le => "<=",
        BinaryOp::Ge => ">=",
    }
}

impl<'a> ExprTranslator<'a> {
    /// Creates a translator resolving names through `interner`.
    pub fn new(interner: &'a Interner) -> Self {
        Self { interner }
    }

    /// The text of an interned name.
    pub fn name(&self, ident: Ident) -> &'a str {
        self.interner.resolve(ident)
    }

    /// Renders a range bound: `7` or `WIDTH-1`.
    pub fn bound(&self, bound: Bound) -> String {
        match bound {
            Bound::Literal(n) => n.to_string(),
            Bound::SymbolMinusOne(name) => format!("{}-1", self.name(name)),
        }
    }

    /// Renders an expression.
    ///
    /// Binary operations are always parenthesized, so precedence in the
    /// output never depends on VHDL's own operator rules.
    pub fn translate(&self, expr: &Expr) -> String {
        match expr {
            Expr::Ident(name) => self.name(*name).to_string(),
            Expr::IntLiteral(n) => n.to_string(),
            Expr::BitLiteral(bit) => format!("'{bit}'"),
            Expr::BitString(bits) => format!("\"{bits}\""),
            Expr::Binary { op, lhs, rhs } => format!(
                "({} {} {})",
                self.translate(lhs),
                binary_op_text(*op),
                self.translate(rhs)
            ),
            Expr::Not(operand) => match operand.as_ref() {
                Expr::Not(_) => format!("not ({})", self.translate(operand)),
                _ => format!("not {}", self.translate(operand)),
            },
            Expr::Call { func, arg } => {
                let name = match func {
                    CallKind::ToVector => "std_logic_vector",
                    CallKind::ToUnsigned => "unsigned",
                    CallKind::ToSigned => "signed",
                    CallKind::ToInteger => "to_integer",
                    CallKind::Other(name) => self.name(*name),
                };
                match arg {
                    Some(arg) => format!("{name}({})", self.translate(arg)),
                    None => format!("{name}()"),
                }
            }
            Expr::Slice { base, high, low } => {
                let bound = |b: &Option<Box<Expr>>| match b {
                    Some(e) => self.translate(e),
                    None => "0".to_string(),
                };
                format!(
                    "{}({} downto {})",
                    self.translate(base),
                    bound(high),
                    bound(low)
                )
            }
            Expr::Index { base, index } => match index.as_ref() {
                Expr::IntLiteral(n) => format!("{}({n})", self.translate(base)),
                other => format!(
                    "{}(to_integer({}))",
                    self.translate(base),
                    self.translate(other)
                ),
            },
        }
    }

    /// Renders the condition of an `if`.
    ///
    /// A bare name tests for `'1'` and a negated bare name for `'0'`; any
    /// other expression is rendered as is.
    pub fn render_condition(&self, test: &Expr) -> String {
        match test {
            Expr::Ident(name) => format!("{} = '1'", self.name(*name)),
            Expr::Not(operand) => match operand.as_ref() {
                Expr::Ident(name) => format!("{} = '0'", self.name(*name)),
                _ => self.translate(test),
            },
            _ => self.translate(test),
        }
    }
}
