//! Pratt expression parser.
//!
//! Operator precedence follows the host language the surface syntax is
//! borrowed from, lowest first:
//!
//! | Level | Operators                     | Assoc |
//! |-------|-------------------------------|-------|
//! | 1     | `or`                          | left  |
//! | 2     | `and`                         | left  |
//! | 3     | `not` (prefix)                |       |
//! | 4     | `==` `!=` `<` `>` `<=` `>=`   | none  |
//! | 5     | `\|`                          | left  |
//! | 6     | `^` `xor`                     | left  |
//! | 7     | `&`                           | left  |
//! | 8     | `<<` `>>` (rejected)          | left  |
//! | 9     | `+` `-`                       | left  |
//! | 10    | `*` (`/` `//` `%` rejected)   | left  |
//! | 11    | `~` (prefix)                  |       |
//! | 12    | `**` (rejected)               | right |
//! | 13    | call, index, slice (postfix)  | left  |

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::lexer::int_value;
use crate::parser::LiteParser;
use crate::token::LiteToken;

/// Right binding power of `not`.
const NOT_BP: u8 = 5;
/// Right binding power of `~` and the rejected unary `+`/`-`.
const UNARY_BP: u8 = 21;

/// Deepest expression nesting accepted before the parser gives up on the
/// line. Later passes recurse over the tree, so this bounds their stack use
/// too.
pub(crate) const MAX_EXPR_DEPTH: usize = 256;

/// What an infix token builds.
#[derive(Clone, Copy)]
enum Infix {
    Op(BinaryOp),
    Unsupported,
}

/// Left and right binding powers of an infix token.
fn infix_binding_power(kind: LiteToken) -> Option<(Infix, u8, u8)> {
    use Infix::*;
    let entry = match kind {
        LiteToken::Or => (Op(BinaryOp::Or), 1, 2),
        LiteToken::And => (Op(BinaryOp::And), 3, 4),
        LiteToken::EqEq => (Op(BinaryOp::Eq), 7, 8),
        LiteToken::NotEq => (Op(BinaryOp::Ne), 7, 8),
        LiteToken::Lt => (Op(BinaryOp::Lt), 7, 8),
        LiteToken::Gt => (Op(BinaryOp::Gt), 7, 8),
        LiteToken::LtEq => (Op(BinaryOp::Le), 7, 8),
        LiteToken::GtEq => (Op(BinaryOp::Ge), 7, 8),
        LiteToken::Pipe => (Op(BinaryOp::BitOr), 9, 10),
        LiteToken::Caret => (Op(BinaryOp::BitXor), 11, 12),
        LiteToken::Xor => (Op(BinaryOp::Xor), 11, 12),
        LiteToken::Ampersand => (Op(BinaryOp::BitAnd), 13, 14),
        LiteToken::ShiftLeft | LiteToken::ShiftRight => (Unsupported, 15, 16),
        LiteToken::Plus => (Op(BinaryOp::Add), 17, 18),
        LiteToken::Minus => (Op(BinaryOp::Sub), 17, 18),
        LiteToken::Star => (Op(BinaryOp::Mul), 19, 20),
        LiteToken::Slash | LiteToken::DoubleSlash | LiteToken::Percent => (Unsupported, 19, 20),
        LiteToken::DoubleStar => (Unsupported, 24, 23),
        _ => return None,
    };
    Some(entry)
}

impl LiteParser<'_> {
    /// Parses a complete expression.
    pub fn parse_expr(&mut self) -> Expr {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Expr {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            return self.nesting_too_deep();
        }
        self.expr_depth += 1;
        let expr = self.parse_expr_bp_inner(min_bp);
        self.expr_depth -= 1;
        if self.expr_depth == 0 {
            self.nesting_overflow = false;
        }
        expr
    }

    /// Reports the nesting limit once and skips the rest of the logical line.
    fn nesting_too_deep(&mut self) -> Expr {
        let start = self.current_span();
        if !self.nesting_overflow {
            self.error_at(
                format!("expression nested too deeply (limit is {MAX_EXPR_DEPTH} levels)"),
                start,
            );
            self.nesting_overflow = true;
        }
        while !self.at_layout() {
            self.advance();
        }
        Expr::Error(start.merge(self.prev_span()))
    }

    fn parse_expr_bp_inner(&mut self, min_bp: u8) -> Expr {
        let mut lhs = self.parse_prefix_expr();

        while let Some((infix, l_bp, r_bp)) = infix_binding_power(self.current()) {
            if l_bp < min_bp {
                break;
            }
            let op_kind = self.current();
            let op_span = self.current_span();
            self.advance();
            let rhs = self.parse_expr_bp(r_bp);
            let span = lhs.span().merge(rhs.span());

            lhs = match infix {
                Infix::Op(op) => {
                    if op.is_comparison()
                        && matches!(&lhs, Expr::Binary { op: prev, .. } if prev.is_comparison())
                    {
                        self.error_at(
                            "comparison operators cannot be chained; combine them with `and`",
                            op_span,
                        );
                    }
                    Expr::Binary {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                        span,
                    }
                }
                Infix::Unsupported => {
                    self.error_at(
                        format!("operator {} is not supported", op_kind.describe()),
                        op_span,
                    );
                    Expr::Error(span)
                }
            };
        }

        lhs
    }

    fn parse_prefix_expr(&mut self) -> Expr {
        let start = self.current_span();
        match self.current() {
            LiteToken::Not => {
                self.advance();
                let operand = self.parse_expr_bp(NOT_BP);
                Expr::Unary {
                    op: UnaryOp::Not,
                    span: start.merge(operand.span()),
                    operand: Box::new(operand),
                }
            }
            LiteToken::Tilde => {
                self.advance();
                let operand = self.parse_expr_bp(UNARY_BP);
                Expr::Unary {
                    op: UnaryOp::Invert,
                    span: start.merge(operand.span()),
                    operand: Box::new(operand),
                }
            }
            LiteToken::Minus | LiteToken::Plus => {
                let kind = self.current();
                self.advance();
                let operand = self.parse_expr_bp(UNARY_BP);
                self.error_at(format!("unary {} is not supported", kind.describe()), start);
                Expr::Error(start.merge(operand.span()))
            }
            _ => self.parse_postfix_expr(),
        }
    }

    /// A primary followed by any number of calls, indexes and slices.
    fn parse_postfix_expr(&mut self) -> Expr {
        let mut expr = self.parse_primary();
        loop {
            match self.current() {
                LiteToken::LeftParen => expr = self.parse_call(expr),
                LiteToken::LeftBracket => expr = self.parse_subscript(expr),
                _ => return expr,
            }
        }
    }

    fn parse_call(&mut self, callee: Expr) -> Expr {
        let start = callee.span();
        self.advance();
        let mut args = Vec::new();
        while !self.at(LiteToken::RightParen) && !self.at_layout() {
            args.push(self.parse_expr());
            if !self.eat(LiteToken::Comma) {
                break;
            }
        }
        self.expect(LiteToken::RightParen);
        let span = start.merge(self.prev_span());

        match callee {
            Expr::Name { name, .. } => Expr::Call {
                func: name,
                args,
                span,
            },
            Expr::Error(_) => Expr::Error(span),
            other => {
                self.error_at("only named functions can be called", other.span());
                Expr::Error(span)
            }
        }
    }

    /// `[index]`, `[high:low]`, `[:low]`, `[high:]` or `[:]`.
    fn parse_subscript(&mut self, base: Expr) -> Expr {
        let start = base.span();
        self.advance();

        let (high, sliced) = if self.eat(LiteToken::Colon) {
            (None, true)
        } else {
            let first = self.parse_expr();
            let sliced = self.eat(LiteToken::Colon);
            (Some(first), sliced)
        };

        if !sliced {
            self.expect(LiteToken::RightBracket);
            let span = start.merge(self.prev_span());
            return match high {
                Some(index) => Expr::Index {
                    base: Box::new(base),
                    index: Box::new(index),
                    span,
                },
                None => Expr::Error(span),
            };
        }

        let low = if self.at(LiteToken::RightBracket) {
            None
        } else {
            Some(Box::new(self.parse_expr()))
        };
        self.expect(LiteToken::RightBracket);
        Expr::Slice {
            base: Box::new(base),
            high: high.map(Box::new),
            low,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_primary(&mut self) -> Expr {
        let span = self.current_span();
        match self.current() {
            LiteToken::Identifier => {
                let (name, span) = self.expect_ident();
                Expr::Name { name, span }
            }
            LiteToken::IntLiteral => {
                let text = self.current_text();
                self.advance();
                match int_value(text) {
                    Some(value) => Expr::Int { value, span },
                    None => Expr::Error(span),
                }
            }
            LiteToken::StringLiteral => {
                let text = self.current_text();
                let inner = text.get(1..text.len().saturating_sub(1)).unwrap_or("");
                self.advance();
                Expr::Str {
                    text: inner.to_string(),
                    span,
                }
            }
            LiteToken::LeftParen => self.parse_paren_or_tuple(),
            LiteToken::Error => {
                self.advance();
                Expr::Error(span)
            }
            _ => {
                self.expected("expression");
                if !self.at_layout() {
                    self.advance();
                }
                Expr::Error(span)
            }
        }
    }

    /// `(expr)` or `(expr, expr, ...)`.
    fn parse_paren_or_tuple(&mut self) -> Expr {
        let start = self.current_span();
        self.advance();
        if self.eat(LiteToken::RightParen) {
            self.error_at("empty parentheses are not an expression", start.merge(self.prev_span()));
            return Expr::Error(start.merge(self.prev_span()));
        }

        let first = self.parse_expr();
        if !self.at(LiteToken::Comma) {
            self.expect(LiteToken::RightParen);
            return Expr::Paren {
                inner: Box::new(first),
                span: start.merge(self.prev_span()),
            };
        }

        let mut items = vec![first];
        while self.eat(LiteToken::Comma) {
            if self.at(LiteToken::RightParen) {
                break;
            }
            items.push(self.parse_expr());
        }
        self.expect(LiteToken::RightParen);
        Expr::Tuple {
            items,
            span: start.merge(self.prev_span()),
        }
    }
}
