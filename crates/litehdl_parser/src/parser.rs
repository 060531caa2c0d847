//! Core parser infrastructure and module-level LiteHDL rules.
//!
//! [`LiteParser`] provides the primitive operations (advance, eat, expect),
//! line- and block-based error recovery, and the indented-suite helper used
//! by every block construct. Module headers, port blocks, declarations,
//! `comb`/`sync` blocks and instances are parsed here; statements live in
//! `stmt.rs` and expressions in `expr.rs`.

use crate::ast::*;
use crate::token::{LiteToken, Token};
use litehdl_common::{Ident, Interner};
use litehdl_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Label};
use litehdl_source::Span;

/// Code of every parser diagnostic.
pub const SYNTAX_ERROR: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// A recursive descent parser over a LiteHDL token stream.
///
/// Errors are reported to the sink and left in the tree as `Error` nodes.
/// After an error the parser skips to the end of the logical line (and past
/// any block that line opened), so one run reports every independent mistake.
pub struct LiteParser<'src> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    source: &'src str,
    pub(crate) interner: &'src Interner,
    sink: &'src DiagnosticSink,
    /// Current expression nesting depth.
    pub(crate) expr_depth: usize,
    /// Set once the nesting limit was hit; silences the cascade of
    /// unclosed-bracket errors until the outermost expression returns.
    pub(crate) nesting_overflow: bool,
}

impl<'src> LiteParser<'src> {
    /// Creates a parser. `tokens` must end with [`LiteToken::Eof`], as
    /// produced by [`lex`](crate::lexer::lex).
    pub fn new(
        tokens: Vec<Token>,
        source: &'src str,
        interner: &'src Interner,
        sink: &'src DiagnosticSink,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            interner,
            sink,
            expr_depth: 0,
            nesting_overflow: false,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    /// Kind of the current token.
    pub(crate) fn current(&self) -> LiteToken {
        self.peek_kind(0)
    }

    /// Kind of the token `n` positions ahead (`Eof` past the end).
    pub(crate) fn peek_kind(&self, n: usize) -> LiteToken {
        self.tokens
            .get(self.pos + n)
            .map_or(LiteToken::Eof, |t| t.kind)
    }

    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(Span::DUMMY, |t| t.span)
    }

    pub(crate) fn current_text(&self) -> &'src str {
        let span = self.current_span();
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    pub(crate) fn at(&self, kind: LiteToken) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(LiteToken::Eof)
    }

    /// Whether the current token ends a logical line or block.
    pub(crate) fn at_layout(&self) -> bool {
        matches!(
            self.current(),
            LiteToken::Newline | LiteToken::Indent | LiteToken::Dedent | LiteToken::Eof
        )
    }

    pub(crate) fn prev_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => self.current_span(),
        }
    }

    pub(crate) fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    /// Consumes the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: LiteToken) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `kind` or reports what was found instead.
    pub(crate) fn expect(&mut self, kind: LiteToken) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.expected(kind.describe());
            false
        }
    }

    /// Consumes an identifier, returning it with its span. On failure reports
    /// an error and returns a `<missing>` placeholder.
    pub(crate) fn expect_ident(&mut self) -> (Ident, Span) {
        let span = self.current_span();
        if self.at(LiteToken::Identifier) {
            let ident = self.interner.get_or_intern(self.current_text());
            self.advance();
            (ident, span)
        } else {
            self.expected("identifier");
            (self.interner.get_or_intern("<missing>"), span)
        }
    }

    // ========================================================================
    // Error handling and recovery
    // ========================================================================

    pub(crate) fn emit(&self, diag: Diagnostic) {
        self.sink.emit(diag);
    }

    /// Reports `msg` at `span`.
    pub(crate) fn error_at(&self, msg: impl Into<String>, span: Span) {
        self.emit(Diagnostic::error(SYNTAX_ERROR, msg, span));
    }

    /// Reports `msg` at the current token.
    pub(crate) fn error(&self, msg: impl Into<String>) {
        self.error_at(msg, self.current_span());
    }

    /// Reports "expected X, found Y". Silent on lexer error tokens, which
    /// were already reported.
    pub(crate) fn expected(&self, what: &str) {
        if self.at(LiteToken::Error) || self.nesting_overflow {
            return;
        }
        let found = match self.current() {
            LiteToken::Identifier => format!("`{}`", self.current_text()),
            other => other.describe().to_string(),
        };
        self.emit(
            Diagnostic::error(
                SYNTAX_ERROR,
                format!("expected {what}, found {found}"),
                self.current_span(),
            )
            .with_label(Label::primary(self.current_span(), format!("expected {what}"))),
        );
    }

    /// Skips to the start of the next logical line. If the skipped line
    /// opened an indented block, the block is skipped too. Stops without
    /// consuming at the end of the enclosing block.
    pub(crate) fn recover_line(&mut self) {
        loop {
            match self.current() {
                LiteToken::Eof | LiteToken::Dedent => return,
                LiteToken::Newline => {
                    self.advance();
                    if self.at(LiteToken::Indent) {
                        self.skip_block();
                    }
                    return;
                }
                LiteToken::Indent => {
                    self.skip_block();
                    return;
                }
                _ => self.advance(),
            }
        }
    }

    /// Skips an indented block, starting at its `Indent`.
    pub(crate) fn skip_block(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                LiteToken::Eof => return,
                LiteToken::Indent => depth += 1,
                LiteToken::Dedent => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Requires the end of a simple line.
    pub(crate) fn end_line(&mut self) {
        if !self.eat(LiteToken::Newline) {
            self.expected("end of line");
            self.recover_line();
        }
    }

    /// Requires the `:` that opens a block. Returns `false` if the header was
    /// abandoned, in which case the block body has already been skipped.
    pub(crate) fn block_colon(&mut self) -> bool {
        if self.eat(LiteToken::Colon) {
            return true;
        }
        self.expected("`:`");
        if self.at(LiteToken::Newline) {
            return true;
        }
        self.recover_line();
        false
    }

    /// Parses the body after a block header's `:`.
    ///
    /// Either a single item on the same line (`comb: y = a`) or a newline
    /// followed by an indented run of items. `item` must consume at least its
    /// own line.
    pub(crate) fn parse_suite<T>(
        &mut self,
        what: &str,
        mut item: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        if !self.eat(LiteToken::Newline) {
            return vec![item(self)];
        }
        if !self.eat(LiteToken::Indent) {
            self.error_at(format!("expected an indented block of {what}"), self.prev_span());
            return Vec::new();
        }
        let mut items = Vec::new();
        while !self.at(LiteToken::Dedent) && !self.at_eof() {
            let before = self.pos;
            items.push(item(self));
            if self.pos == before {
                self.advance();
            }
        }
        self.eat(LiteToken::Dedent);
        items
    }

    // ========================================================================
    // File and module
    // ========================================================================

    /// Parses a whole file: exactly one module.
    pub fn parse_source_file(&mut self) -> SourceFileAst {
        let start = self.current_span();
        let mut module: Option<ModuleDecl> = None;

        while !self.at_eof() {
            match self.current() {
                LiteToken::Module => {
                    if let Some(first_span) = module.as_ref().map(|m| m.name_span) {
                        self.emit(
                            Diagnostic::error(
                                SYNTAX_ERROR,
                                "only one module per file is supported",
                                self.current_span(),
                            )
                            .with_label(Label::secondary(first_span, "first module declared here")),
                        );
                        self.recover_line();
                    } else {
                        module = Some(self.parse_module());
                    }
                }
                LiteToken::Indent => {
                    self.error("unexpected indentation");
                    self.skip_block();
                }
                LiteToken::Newline | LiteToken::Dedent => self.advance(),
                _ => {
                    self.expected("`module`");
                    self.recover_line();
                }
            }
        }

        if module.is_none() && !self.sink.has_errors() {
            self.error("file contains no module; expected `module Name():`");
        }

        SourceFileAst {
            module,
            span: start.merge(self.prev_span()),
        }
    }

    /// `module Name(P=1, ...):` followed by the body.
    fn parse_module(&mut self) -> ModuleDecl {
        let start = self.current_span();
        self.expect(LiteToken::Module);
        let (name, name_span) = self.expect_ident();

        let mut params = Vec::new();
        if self.expect(LiteToken::LeftParen) {
            while !self.at(LiteToken::RightParen) && !self.at_layout() {
                if let Some(param) = self.parse_param() {
                    params.push(param);
                }
                if !self.eat(LiteToken::Comma) {
                    break;
                }
            }
            self.expect(LiteToken::RightParen);
        }

        let items = if self.block_colon() {
            self.parse_suite("module items", |p| p.parse_item())
        } else {
            Vec::new()
        };

        ModuleDecl {
            name,
            name_span,
            params,
            items,
            span: start.merge(self.prev_span()),
        }
    }

    /// `NAME=integer`
    fn parse_param(&mut self) -> Option<Param> {
        let start = self.current_span();
        if !self.at(LiteToken::Identifier) {
            self.expected("parameter name");
            self.advance();
            return None;
        }
        let (name, _) = self.expect_ident();
        if !self.eat(LiteToken::Assign) {
            self.emit(
                Diagnostic::error(
                    SYNTAX_ERROR,
                    format!(
                        "parameter `{}` has no default value",
                        self.interner.resolve(name)
                    ),
                    start,
                )
                .with_note("header parameters become VHDL generics and need an integer default")
                .with_help("ports are declared in `in:` and `out:` blocks inside the module"),
            );
            return None;
        }
        let default = self.parse_expr();
        match default {
            Expr::Int { .. } => Some(Param {
                name,
                default,
                span: start.merge(self.prev_span()),
            }),
            Expr::Error(_) => None,
            other => {
                self.error_at("generic default must be an integer literal", other.span());
                None
            }
        }
    }

    // ========================================================================
    // Module items
    // ========================================================================

    fn parse_item(&mut self) -> Item {
        let start = self.current_span();
        match self.current() {
            LiteToken::In | LiteToken::Out => self.parse_port_block(),
            LiteToken::Comb => self.parse_comb(),
            LiteToken::Sync => self.parse_sync(),
            LiteToken::Pass => {
                self.advance();
                self.end_line();
                Item::Pass(start)
            }
            LiteToken::Identifier => match self.peek_kind(1) {
                LiteToken::Colon => Item::Signal(self.parse_decl()),
                LiteToken::Assign => Item::Instance(self.parse_instance()),
                _ => {
                    self.advance();
                    self.error_at(
                        "expected `:` for a signal declaration or `=` for an instance",
                        self.current_span(),
                    );
                    self.recover_line();
                    Item::Error(start)
                }
            },
            LiteToken::Module => {
                self.error("modules cannot be nested");
                self.recover_line();
                Item::Error(start)
            }
            LiteToken::If | LiteToken::Elif | LiteToken::Else => {
                self.error("statements must be inside a `comb:` or `sync(...)` block");
                self.recover_line();
                Item::Error(start)
            }
            _ => {
                self.expected("a port block, signal declaration, `comb:`, `sync(...)` or instance");
                self.recover_line();
                Item::Error(start)
            }
        }
    }

    fn block_direction(&self) -> BlockDirection {
        if self.at(LiteToken::Out) {
            BlockDirection::Out
        } else {
            BlockDirection::In
        }
    }

    /// `in:` / `out:` with `name: type` lines.
    fn parse_port_block(&mut self) -> Item {
        let start = self.current_span();
        let direction = self.block_direction();
        self.advance();
        let decls = if self.block_colon() {
            self.parse_suite("port declarations", |p| p.parse_port_line())
                .into_iter()
                .flatten()
                .collect()
        } else {
            Vec::new()
        };
        Item::Ports {
            direction,
            decls,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_port_line(&mut self) -> Option<Decl> {
        if self.eat(LiteToken::Pass) {
            self.end_line();
            return None;
        }
        if self.at(LiteToken::Identifier) && self.peek_kind(1) == LiteToken::Colon {
            return Some(self.parse_decl());
        }
        self.expected("port declaration `name: type`");
        self.recover_line();
        None
    }

    /// `name: type`
    pub(crate) fn parse_decl(&mut self) -> Decl {
        let start = self.current_span();
        let (name, name_span) = self.expect_ident();
        self.expect(LiteToken::Colon);
        let ty = self.parse_type();
        let span = start.merge(self.prev_span());
        self.end_line();
        Decl {
            name,
            name_span,
            ty,
            span,
        }
    }

    /// `tag`, `tag[dim]`, `tag[dim][dim]`, ...
    fn parse_type(&mut self) -> TypeExpr {
        let start = self.current_span();
        let (tag, _) = self.expect_ident();
        let mut dims = Vec::new();
        while self.eat(LiteToken::LeftBracket) {
            dims.push(self.parse_expr());
            self.expect(LiteToken::RightBracket);
        }
        TypeExpr {
            tag,
            dims,
            span: start.merge(self.prev_span()),
        }
    }

    /// `comb:` block.
    fn parse_comb(&mut self) -> Item {
        let start = self.current_span();
        self.advance();
        let body = if self.block_colon() {
            self.parse_suite("statements", |p| p.parse_stmt())
        } else {
            Vec::new()
        };
        Item::Comb {
            body,
            span: start.merge(self.prev_span()),
        }
    }

    /// `sync(clock[, reset]):` block.
    fn parse_sync(&mut self) -> Item {
        let start = self.current_span();
        self.advance();

        let mut args = Vec::new();
        if self.expect(LiteToken::LeftParen) {
            while !self.at(LiteToken::RightParen) && !self.at_layout() {
                args.push(self.parse_expr());
                if !self.eat(LiteToken::Comma) {
                    break;
                }
            }
            self.expect(LiteToken::RightParen);
        }
        let args_span = start.merge(self.prev_span());
        if args.is_empty() {
            self.error_at("`sync` needs a clock argument, e.g. `sync(clk)`", args_span);
        } else if args.len() > 2 {
            self.error_at(
                format!("`sync` takes a clock and an optional reset, found {} arguments", args.len()),
                args_span,
            );
        }

        let body = if self.block_colon() {
            self.parse_suite("statements", |p| p.parse_stmt())
        } else {
            Vec::new()
        };

        let mut args = args.into_iter();
        Item::Sync {
            clock: args.next().unwrap_or(Expr::Error(args_span)),
            reset: args.next(),
            body,
            span: start.merge(self.prev_span()),
        }
    }

    /// `inst = Module(G=v, ...):` with its connection body.
    fn parse_instance(&mut self) -> InstanceDecl {
        let start = self.current_span();
        let (name, _) = self.expect_ident();
        self.expect(LiteToken::Assign);
        let (module, _) = self.expect_ident();

        let mut generics = Vec::new();
        if self.expect(LiteToken::LeftParen) {
            while !self.at(LiteToken::RightParen) && !self.at_layout() {
                if self.at(LiteToken::Identifier) && self.peek_kind(1) == LiteToken::Assign {
                    let arg_start = self.current_span();
                    let (name, _) = self.expect_ident();
                    self.advance();
                    let value = self.parse_expr();
                    generics.push(KeywordArg {
                        name,
                        value,
                        span: arg_start.merge(self.prev_span()),
                    });
                } else {
                    let arg = self.parse_expr();
                    self.error_at("instance arguments must be written `NAME=value`", arg.span());
                }
                if !self.eat(LiteToken::Comma) {
                    break;
                }
            }
            self.expect(LiteToken::RightParen);
        }

        let connections = if self.block_colon() {
            self.parse_suite("port connections", |p| p.parse_connection())
        } else {
            Vec::new()
        };

        InstanceDecl {
            name,
            module,
            generics,
            connections,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_connection(&mut self) -> Connection {
        let start = self.current_span();
        match self.current() {
            LiteToken::In | LiteToken::Out if self.peek_kind(1) == LiteToken::Colon => {
                let direction = self.block_direction();
                self.advance();
                let conns = if self.block_colon() {
                    self.parse_suite("named connections", |p| p.parse_named_line())
                        .into_iter()
                        .flatten()
                        .collect()
                } else {
                    Vec::new()
                };
                Connection::Group {
                    direction,
                    conns,
                    span: start.merge(self.prev_span()),
                }
            }
            LiteToken::Pass => {
                self.advance();
                self.end_line();
                Connection::Pass(start)
            }
            LiteToken::Identifier
                if matches!(self.peek_kind(1), LiteToken::Assign | LiteToken::Arrow) =>
            {
                let conns = self.parse_named_line();
                Connection::Named {
                    conns,
                    span: start.merge(self.prev_span()),
                }
            }
            _ => {
                let mut exprs = vec![self.parse_expr()];
                while self.eat(LiteToken::Comma) {
                    if self.at(LiteToken::Newline) {
                        break;
                    }
                    exprs.push(self.parse_expr());
                }
                let span = start.merge(self.prev_span());
                if exprs.iter().any(|e| matches!(e, Expr::Error(_))) {
                    self.recover_line();
                    return Connection::Error(span);
                }
                self.end_line();
                Connection::Positional { exprs, span }
            }
        }
    }

    /// `port = expr[, port = expr ...]` up to the end of the line.
    fn parse_named_line(&mut self) -> Vec<NamedConn> {
        let mut conns = Vec::new();
        if self.eat(LiteToken::Pass) {
            self.end_line();
            return conns;
        }
        loop {
            let start = self.current_span();
            if !self.at(LiteToken::Identifier) {
                self.expected("connection `port = signal`");
                self.recover_line();
                return conns;
            }
            let (port, _) = self.expect_ident();
            if !self.eat(LiteToken::Assign) && !self.eat(LiteToken::Arrow) {
                self.expected("`=` or `=>`");
                self.recover_line();
                return conns;
            }
            let value = self.parse_expr();
            conns.push(NamedConn {
                port,
                value,
                span: start.merge(self.prev_span()),
            });
            if !self.eat(LiteToken::Comma) || self.at(LiteToken::Newline) {
                break;
            }
        }
        self.end_line();
        conns
    }
}
