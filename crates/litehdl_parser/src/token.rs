//! Token kinds for the LiteHDL lexer.
//!
//! Literal values are not stored in tokens; the parser slices them out of the
//! source text with the token's [`Span`]. Layout is explicit: the lexer turns
//! line breaks and indentation changes into [`LiteToken::Newline`],
//! [`LiteToken::Indent`] and [`LiteToken::Dedent`].

use litehdl_source::Span;
use serde::{Deserialize, Serialize};

/// A LiteHDL token kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LiteToken {
    // === Keywords ===
    /// `module`
    Module,
    /// `in`
    In,
    /// `out`
    Out,
    /// `comb`
    Comb,
    /// `sync`
    Sync,
    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `pass`
    Pass,
    /// `and`
    And,
    /// `or`
    Or,
    /// `xor`
    Xor,
    /// `not`
    Not,

    // === Literals and names ===
    /// Identifier.
    Identifier,
    /// Integer literal (`42`, `0xff`, `0b1010`, `1_000`).
    IntLiteral,
    /// Quoted literal, `'1'` or `"1010"`.
    StringLiteral,

    // === Delimiters ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `=`
    Assign,
    /// `=>`
    Arrow,

    // === Operators ===
    /// `~`
    Tilde,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,

    // === Operators the DSL rejects ===
    /// `/`
    Slash,
    /// `//`
    DoubleSlash,
    /// `%`
    Percent,
    /// `**`
    DoubleStar,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// Augmented assignment such as `+=` or `|=`.
    AugAssign,

    // === Layout ===
    /// End of a logical line.
    Newline,
    /// Indentation increased.
    Indent,
    /// Indentation decreased by one level.
    Dedent,

    // === Special ===
    /// Malformed input, already reported by the lexer.
    Error,
    /// End of input.
    Eof,
}

impl LiteToken {
    /// Whether this token is a reserved word.
    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|&(_, kind)| kind == self)
    }

    /// Human-readable description used in "expected X, found Y" messages.
    pub fn describe(self) -> &'static str {
        match self {
            LiteToken::Module => "`module`",
            LiteToken::In => "`in`",
            LiteToken::Out => "`out`",
            LiteToken::Comb => "`comb`",
            LiteToken::Sync => "`sync`",
            LiteToken::If => "`if`",
            LiteToken::Elif => "`elif`",
            LiteToken::Else => "`else`",
            LiteToken::Pass => "`pass`",
            LiteToken::And => "`and`",
            LiteToken::Or => "`or`",
            LiteToken::Xor => "`xor`",
            LiteToken::Not => "`not`",
            LiteToken::Identifier => "identifier",
            LiteToken::IntLiteral => "integer literal",
            LiteToken::StringLiteral => "string literal",
            LiteToken::LeftParen => "`(`",
            LiteToken::RightParen => "`)`",
            LiteToken::LeftBracket => "`[`",
            LiteToken::RightBracket => "`]`",
            LiteToken::Colon => "`:`",
            LiteToken::Comma => "`,`",
            LiteToken::Assign => "`=`",
            LiteToken::Arrow => "`=>`",
            LiteToken::Tilde => "`~`",
            LiteToken::Ampersand => "`&`",
            LiteToken::Pipe => "`|`",
            LiteToken::Caret => "`^`",
            LiteToken::Plus => "`+`",
            LiteToken::Minus => "`-`",
            LiteToken::Star => "`*`",
            LiteToken::EqEq => "`==`",
            LiteToken::NotEq => "`!=`",
            LiteToken::Lt => "`<`",
            LiteToken::Gt => "`>`",
            LiteToken::LtEq => "`<=`",
            LiteToken::GtEq => "`>=`",
            LiteToken::Slash => "`/`",
            LiteToken::DoubleSlash => "`//`",
            LiteToken::Percent => "`%`",
            LiteToken::DoubleStar => "`**`",
            LiteToken::ShiftLeft => "`<<`",
            LiteToken::ShiftRight => "`>>`",
            LiteToken::AugAssign => "augmented assignment",
            LiteToken::Newline => "end of line",
            LiteToken::Indent => "indented block",
            LiteToken::Dedent => "end of block",
            LiteToken::Error => "invalid token",
            LiteToken::Eof => "end of file",
        }
    }
}

const KEYWORDS: &[(&str, LiteToken)] = &[
    ("module", LiteToken::Module),
    ("in", LiteToken::In),
    ("out", LiteToken::Out),
    ("comb", LiteToken::Comb),
    ("sync", LiteToken::Sync),
    ("if", LiteToken::If),
    ("elif", LiteToken::Elif),
    ("else", LiteToken::Else),
    ("pass", LiteToken::Pass),
    ("and", LiteToken::And),
    ("or", LiteToken::Or),
    ("xor", LiteToken::Xor),
    ("not", LiteToken::Not),
];

/// Returns the keyword token for `word`, if it is one. Keywords are case-sensitive.
pub fn lookup_keyword(word: &str) -> Option<LiteToken> {
    KEYWORDS
        .iter()
        .find(|&&(text, _)| text == word)
        .map(|&(_, kind)| kind)
}

/// A token with its location.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Kind.
    pub kind: LiteToken,
    /// Bytes covered. Layout tokens may be empty.
    pub span: Span,
}
