//! Statement parsing for `comb:` and `sync(...)` bodies.

use crate::ast::{ElifClause, Expr, IfStmt, Stmt};
use crate::parser::LiteParser;
use crate::token::LiteToken;

impl LiteParser<'_> {
    /// Parses one statement, including its trailing newline.
    pub(crate) fn parse_stmt(&mut self) -> Stmt {
        let start = self.current_span();
        match self.current() {
            LiteToken::If => Stmt::If(self.parse_if()),
            LiteToken::Pass => {
                self.advance();
                self.end_line();
                Stmt::Pass(start)
            }
            LiteToken::Elif | LiteToken::Else => {
                self.error(format!("{} without a matching `if`", self.current().describe()));
                self.recover_line();
                Stmt::Error(start)
            }
            LiteToken::In
            | LiteToken::Out
            | LiteToken::Comb
            | LiteToken::Sync
            | LiteToken::Module => {
                self.error(format!(
                    "{} is not allowed inside a process body",
                    self.current().describe()
                ));
                self.recover_line();
                Stmt::Error(start)
            }
            _ => self.parse_assign(),
        }
    }

    /// `target = value`
    fn parse_assign(&mut self) -> Stmt {
        let start = self.current_span();
        let target = self.parse_expr();

        if self.at(LiteToken::AugAssign) {
            self.error(format!(
                "augmented assignment `{}` is not supported; write `x = x op y`",
                self.current_text()
            ));
            self.recover_line();
            return Stmt::Error(start);
        }
        if !self.at(LiteToken::Assign) {
            if !matches!(target, Expr::Error(_)) {
                self.expected("`=` (statements must be assignments)");
            }
            self.recover_line();
            return Stmt::Error(start);
        }
        self.advance();

        if !matches!(
            target.unparen(),
            Expr::Name { .. } | Expr::Index { .. } | Expr::Slice { .. } | Expr::Error(_)
        ) {
            self.error_at("cannot assign to this expression", target.span());
        }

        let value = self.parse_expr();
        if self.at(LiteToken::Assign) {
            self.error("chained assignment is not supported");
            self.recover_line();
            return Stmt::Error(start);
        }
        let span = start.merge(self.prev_span());
        self.end_line();
        Stmt::Assign {
            target,
            value,
            span,
        }
    }

    /// A statement body after `:`.
    fn parse_body(&mut self) -> Vec<Stmt> {
        if self.block_colon() {
            self.parse_suite("statements", |p| p.parse_stmt())
        } else {
            Vec::new()
        }
    }

    /// `if test:` with any `elif` / `else` clauses.
    fn parse_if(&mut self) -> IfStmt {
        let start = self.current_span();
        self.advance();
        let test = self.parse_expr();
        let then_body = self.parse_body();

        let mut elifs = Vec::new();
        while self.at(LiteToken::Elif) {
            let clause_start = self.current_span();
            self.advance();
            let test = self.parse_expr();
            let body = self.parse_body();
            elifs.push(ElifClause {
                test,
                body,
                span: clause_start.merge(self.prev_span()),
            });
        }

        let else_body = if self.eat(LiteToken::Else) {
            Some(self.parse_body())
        } else {
            None
        };

        IfStmt {
            test,
            then_body,
            elifs,
            else_body,
            span: start.merge(self.prev_span()),
        }
    }
}
