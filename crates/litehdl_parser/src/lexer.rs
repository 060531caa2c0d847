//! Indentation-aware lexer for LiteHDL source text.
//!
//! Produces a flat token stream in which block structure is explicit:
//! a logical line ends with [`LiteToken::Newline`], and changes of leading
//! whitespace produce [`LiteToken::Indent`] / [`LiteToken::Dedent`] pairs.
//! Blank and comment-only lines never affect indentation, and line breaks
//! inside `(...)` or `[...]` are ignored. Errors are reported to the
//! [`DiagnosticSink`] with code `E100` and produce [`LiteToken::Error`] tokens.

use crate::token::{lookup_keyword, LiteToken, Token};
use litehdl_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use litehdl_source::{FileId, Span};

/// Columns a tab advances to (the next multiple of this width).
const TAB_WIDTH: usize = 4;

/// Lexes `source` into tokens.
///
/// The result always ends with [`LiteToken::Eof`], preceded by a closing
/// `Newline` for the last logical line and one `Dedent` per open block.
pub fn lex(source: &str, file: FileId, sink: &DiagnosticSink) -> Vec<Token> {
    let mut lexer = Lexer {
        text: source,
        source: source.as_bytes(),
        pos: 0,
        file,
        sink,
        indents: vec![0],
        depth: 0,
        tokens: Vec::new(),
    };
    lexer.lex_all();
    lexer.tokens
}

/// Value of an integer literal as written in the source.
///
/// Accepts decimal, `0x`, `0o` and `0b` forms with single `_` separators
/// between digits (a prefixed form may also put one right after the prefix).
/// Returns `None` if the text is malformed or the value does not fit in a
/// `u64`.
pub fn int_value(text: &str) -> Option<u64> {
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0o" | "0O") => (&text[2..], 8),
        Some("0b" | "0B") => (&text[2..], 2),
        _ => (text, 10),
    };
    if !separators_valid(digits) {
        return None;
    }
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    u64::from_str_radix(&cleaned, radix).ok()
}

/// `_` may not end the digits or follow another `_`.
fn separators_valid(digits: &str) -> bool {
    !digits.ends_with('_') && !digits.contains("__")
}

struct Lexer<'a> {
    text: &'a str,
    source: &'a [u8],
    pos: usize,
    file: FileId,
    sink: &'a DiagnosticSink,
    /// Columns of the open blocks. The bottom entry is always 0.
    indents: Vec<usize>,
    /// Nesting of `(` and `[`.
    depth: usize,
    tokens: Vec<Token>,
}

impl Lexer<'_> {
    fn lex_all(&mut self) {
        let mut line_start = true;
        loop {
            if line_start && self.depth == 0 {
                if !self.lex_indentation() {
                    break;
                }
                line_start = false;
            }
            self.skip_inline_whitespace_and_comment();
            if self.at_end() {
                break;
            }
            match self.peek() {
                b'\n' => {
                    self.pos += 1;
                    if self.depth == 0 {
                        self.push(LiteToken::Newline, self.pos - 1, self.pos);
                        line_start = true;
                    }
                }
                b'\\' if self.continues_line() => {}
                _ => {
                    let token = self.next_token();
                    self.tokens.push(token);
                }
            }
        }
        self.finish();
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start as u32, self.pos as u32)
    }

    fn push(&mut self, kind: LiteToken, start: usize, end: usize) {
        self.tokens.push(Token {
            kind,
            span: Span::new(self.file, start as u32, end as u32),
        });
    }

    fn error(&self, msg: impl Into<String>, span: Span) {
        self.sink.emit(Diagnostic::error(
            DiagnosticCode::new(Category::Error, 100),
            msg,
            span,
        ));
    }

    /// Measures the indentation of the next non-blank line and emits layout
    /// tokens for it. Returns `false` if only blank lines remain.
    fn lex_indentation(&mut self) -> bool {
        loop {
            let line_start = self.pos;
            let mut col = 0;
            while !self.at_end() {
                match self.peek() {
                    b' ' => col += 1,
                    b'\t' => col = (col / TAB_WIDTH + 1) * TAB_WIDTH,
                    b'\r' | b'\x0c' => {}
                    _ => break,
                }
                self.pos += 1;
            }
            if self.at_end() {
                return false;
            }
            match self.peek() {
                b'\n' => self.pos += 1,
                b'#' => self.skip_comment(),
                _ => {
                    self.apply_indentation(col, line_start);
                    return true;
                }
            }
        }
    }

    fn apply_indentation(&mut self, col: usize, line_start: usize) {
        let current = self.indents.last().copied().unwrap_or(0);
        if col > current {
            self.indents.push(col);
            self.push(LiteToken::Indent, line_start, self.pos);
            return;
        }
        while self.indents.last().is_some_and(|&top| col < top) {
            self.indents.pop();
            self.push(LiteToken::Dedent, self.pos, self.pos);
        }
        if self.indents.last() != Some(&col) {
            self.error(
                "unindent does not match any outer indentation level",
                Span::new(self.file, line_start as u32, self.pos as u32),
            );
        }
    }

    fn skip_comment(&mut self) {
        while !self.at_end() && self.peek() != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_inline_whitespace_and_comment(&mut self) {
        while matches!(self.peek(), b' ' | b'\t' | b'\r' | b'\x0c') {
            self.pos += 1;
        }
        if self.peek() == b'#' {
            self.skip_comment();
        }
    }

    /// Consumes a backslash line continuation. Returns `false` (consuming
    /// nothing) if the backslash is not followed by a line break.
    fn continues_line(&mut self) -> bool {
        let skip = match (self.peek_at(1), self.peek_at(2)) {
            (b'\n', _) => 2,
            (b'\r', b'\n') => 3,
            _ => return false,
        };
        self.pos += skip;
        true
    }

    fn finish(&mut self) {
        let eof = self.source.len();
        if self
            .tokens
            .last()
            .is_some_and(|t| !matches!(t.kind, LiteToken::Newline | LiteToken::Dedent))
        {
            self.push(LiteToken::Newline, eof, eof);
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(LiteToken::Dedent, eof, eof);
        }
        self.push(LiteToken::Eof, eof, eof);
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let b = self.peek();
        let kind = if b.is_ascii_alphabetic() || b == b'_' {
            self.lex_word()
        } else if b.is_ascii_digit() {
            self.lex_number()
        } else if b == b'\'' || b == b'"' {
            self.lex_string()
        } else {
            self.lex_operator()
        };
        match kind {
            LiteToken::LeftParen | LiteToken::LeftBracket => self.depth += 1,
            LiteToken::RightParen | LiteToken::RightBracket => {
                self.depth = self.depth.saturating_sub(1)
            }
            _ => {}
        }
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn eat_word_chars(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.pos += 1;
        }
    }

    fn lex_word(&mut self) -> LiteToken {
        let start = self.pos;
        self.eat_word_chars();
        lookup_keyword(&self.text[start..self.pos]).unwrap_or(LiteToken::Identifier)
    }

    fn lex_number(&mut self) -> LiteToken {
        let start = self.pos;
        let (radix_name, radix) = match (self.peek(), self.peek_at(1)) {
            (b'0', b'x' | b'X') => ("hexadecimal", 16),
            (b'0', b'o' | b'O') => ("octal", 8),
            (b'0', b'b' | b'B') => ("binary", 2),
            _ => ("decimal", 10),
        };
        if radix != 10 {
            self.pos += 2;
        }
        let digits_start = self.pos;
        self.eat_word_chars();
        let text = &self.text[start..self.pos];
        if int_value(text).is_some() {
            return LiteToken::IntLiteral;
        }

        let digits = &self.text[digits_start..self.pos];
        let well_formed = digits.chars().any(|c| c != '_')
            && separators_valid(digits)
            && digits.chars().all(|c| c == '_' || c.is_digit(radix));
        let span = self.span_from(start);
        if well_formed {
            self.error(format!("integer literal `{text}` is too large"), span);
        } else {
            self.error(format!("invalid {radix_name} literal `{text}`"), span);
        }
        LiteToken::Error
    }

    fn lex_string(&mut self) -> LiteToken {
        let start = self.pos;
        let quote = self.peek();
        self.pos += 1;
        while !self.at_end() && self.peek() != quote && self.peek() != b'\n' {
            self.pos += 1;
        }
        if self.peek() == quote {
            self.pos += 1;
            LiteToken::StringLiteral
        } else {
            self.error("unterminated string literal", self.span_from(start));
            LiteToken::Error
        }
    }

    fn lex_operator(&mut self) -> LiteToken {
        use LiteToken::*;
        let (kind, len) = match (self.peek(), self.peek_at(1), self.peek_at(2)) {
            (b'*', b'*', b'=') | (b'/', b'/', b'=') | (b'<', b'<', b'=') | (b'>', b'>', b'=') => {
                (AugAssign, 3)
            }
            (b'*', b'*', _) => (DoubleStar, 2),
            (b'/', b'/', _) => (DoubleSlash, 2),
            (b'<', b'<', _) => (ShiftLeft, 2),
            (b'>', b'>', _) => (ShiftRight, 2),
            (b'=', b'=', _) => (EqEq, 2),
            (b'=', b'>', _) => (Arrow, 2),
            (b'!', b'=', _) => (NotEq, 2),
            (b'<', b'=', _) => (LtEq, 2),
            (b'>', b'=', _) => (GtEq, 2),
            (b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^', b'=', _) => (AugAssign, 2),
            (b'(', _, _) => (LeftParen, 1),
            (b')', _, _) => (RightParen, 1),
            (b'[', _, _) => (LeftBracket, 1),
            (b']', _, _) => (RightBracket, 1),
            (b':', _, _) => (Colon, 1),
            (b',', _, _) => (Comma, 1),
            (b'=', _, _) => (Assign, 1),
            (b'~', _, _) => (Tilde, 1),
            (b'&', _, _) => (Ampersand, 1),
            (b'|', _, _) => (Pipe, 1),
            (b'^', _, _) => (Caret, 1),
            (b'+', _, _) => (Plus, 1),
            (b'-', _, _) => (Minus, 1),
            (b'*', _, _) => (Star, 1),
            (b'/', _, _) => (Slash, 1),
            (b'%', _, _) => (Percent, 1),
            (b'<', _, _) => (Lt, 1),
            (b'>', _, _) => (Gt, 1),
            _ => {
                let start = self.pos;
                let ch = self.text[start..].chars().next().unwrap_or('\0');
                self.pos += ch.len_utf8().max(1);
                self.error(
                    format!("unexpected character `{}`", ch.escape_debug()),
                    self.span_from(start),
                );
                return Error;
            }
        };
        self.pos += len;
        kind
    }
}
