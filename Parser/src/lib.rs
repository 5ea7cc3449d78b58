use core::ast::{Ast, AstBody};
use core::tokens::{TokenIdx, TokenKind, TokenList};
use core::utils::parse_number_lexeme;
use core::value::{ArenaText, ComptimeOperator, ObjectRef, Operator, Value};
use core::{Allocator, BumpArena};
use std::ptr::NonNull;

pub mod errors;

pub use errors::ParseError;

pub type NodeResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over a finished token stream, emitting
/// [`Ast`] nodes — and the symbol/string atom objects they embed — into
/// the caller-supplied arena. Mirrors the teacher's context-struct idiom:
/// all mutable parse state (the cursor, the allocator) lives on `Parser`
/// itself rather than in file-scope statics.
pub struct Parser<'a> {
    tokens: TokenList<'a>,
    current: TokenIdx,
    arena: &'a BumpArena,
}

impl<'a> Parser<'a> {
    /// Parses the entire token stream into a single top-level expression.
    pub fn parse(tokens: TokenList<'a>, arena: &'a BumpArena) -> NodeResult<&'a Ast<'a>> {
        let mut parser = Parser {
            tokens,
            current: 0,
            arena,
        };

        if parser.is_done() {
            return Err(ParseError::new("Nothing to parse.", parser.current));
        }

        let ast = parser.parse_expr();
        tracing::debug!(tokens = parser.tokens.len(), ok = ast.is_ok(), "parsed");
        ast
    }

    fn is_done(&self) -> bool {
        self.current >= self.tokens.len() || self.tokens[self.current].kind == TokenKind::Eof
    }

    fn peek_kind(&self) -> TokenKind {
        if self.current >= self.tokens.len() {
            TokenKind::Eof
        } else {
            self.tokens[self.current].kind
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn advance(&mut self) {
        if !self.is_done() {
            self.current += 1;
        }
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error_at(&self, token: TokenIdx, message: impl Into<String>) -> ParseError {
        ParseError::new(message, token)
    }

    /// Arena-allocates a symbol/string atom's backing text, returning an
    /// arena-backed reference. Never refcounted — it dies with the arena.
    fn alloc_arena_text(&self, text: ArenaText) -> ObjectRef {
        let stored: &'a ArenaText = self.arena.alloc(text);
        ObjectRef::Arena(NonNull::from(stored))
    }

    /// `Expr := Quote? (List | Atom)`. The quote flag is resolved onto the
    /// owned node before it's committed to the arena, since quoting applies
    /// once to the whole expression and `Ast` nodes are immutable once
    /// allocated.
    fn parse_expr(&mut self) -> NodeResult<&'a Ast<'a>> {
        let quoted = self.matches(TokenKind::Quote);
        let mut ast = if self.matches(TokenKind::ParenStart) {
            self.parse_list()?
        } else {
            self.parse_atom()?
        };
        ast.quoted = quoted;
        Ok(self.arena.alloc(ast))
    }

    /// `List := Expr (Cons Expr | Elements) ParenEnd`.
    fn parse_list(&mut self) -> NodeResult<Ast<'a>> {
        let head = self.parse_expr()?;

        let tail = if self.matches(TokenKind::Cons) {
            self.parse_expr()?
        } else {
            self.parse_list_elements()?
        };

        if !self.matches(TokenKind::ParenEnd) {
            return Err(self.error_at(self.current, "Unterminated list parentheses"));
        }

        Ok(Ast::cons(head, tail))
    }

    /// `Elements := ParenEnd /* synthesized nil */ | Expr Elements`, i.e.
    /// the proper-list tail: right-nested conses ending in a synthesized
    /// `Nil` whose token is the closing parenthesis.
    fn parse_list_elements(&mut self) -> NodeResult<&'a Ast<'a>> {
        if self.check(TokenKind::ParenEnd) {
            let nil = Ast::atom(Value::Nil, self.current);
            return Ok(self.arena.alloc(nil));
        }

        let head = self.parse_expr()?;
        let tail = self.parse_list_elements()?;
        Ok(self.arena.alloc(Ast::cons(head, tail)))
    }

    /// `Atom := Nil | Number | String | Symbol | Plus | Minus | Star | Slash
    /// | Print | Set | Fun | Defun`. Even on error, the parser advances past
    /// the offending token so a caller driving repeated top-level parses
    /// doesn't spin on the same token.
    fn parse_atom(&mut self) -> NodeResult<Ast<'a>> {
        let tok_idx = self.current;
        let tok = self.tokens[tok_idx];

        let result = match tok.kind {
            TokenKind::Nil => Ok(Ast::atom(Value::Nil, tok_idx)),
            TokenKind::Number => match parse_number_lexeme(tok.lexeme) {
                Some(n) => Ok(Ast::atom(Value::F64(n), tok_idx)),
                None => Err(self.error_at(tok_idx, "Malformed number literal")),
            },
            TokenKind::String => {
                let unquoted = &tok.lexeme[1..tok.lexeme.len() - 1];
                let r = self.alloc_arena_text(ArenaText::Str(unquoted.to_string()));
                Ok(Ast::atom(Value::Object(r), tok_idx))
            }
            TokenKind::Symbol => {
                let r = self.alloc_arena_text(ArenaText::Symbol(tok.lexeme.to_string()));
                Ok(Ast::atom(Value::Object(r), tok_idx))
            }
            TokenKind::Plus => Ok(Ast::atom(Value::Operator(Operator::Add), tok_idx)),
            TokenKind::Minus => Ok(Ast::atom(Value::Operator(Operator::Sub), tok_idx)),
            TokenKind::Star => Ok(Ast::atom(Value::Operator(Operator::Mul), tok_idx)),
            TokenKind::Slash => Ok(Ast::atom(Value::Operator(Operator::Div), tok_idx)),
            TokenKind::Print => Ok(Ast::atom(Value::Operator(Operator::Print), tok_idx)),
            TokenKind::Set => Ok(Ast::atom(Value::Operator(Operator::SetGlobal), tok_idx)),
            TokenKind::Fun => Ok(Ast::atom(
                Value::ComptimeOperator(ComptimeOperator::Fun),
                tok_idx,
            )),
            TokenKind::Defun => Ok(Ast::atom(
                Value::ComptimeOperator(ComptimeOperator::Defun),
                tok_idx,
            )),
            _ => Err(self.error_at(tok_idx, "Unexpected token while parsing atom")),
        };

        self.advance();
        result
    }
}

/// `true` for a cons whose body is a proper-list spine: every tail is
/// either another cons or the literal `Nil` atom. Used by the bytecode
/// generator to detect a dotted pair terminating a would-be function call.
pub fn is_proper_list_tail(ast: &Ast) -> bool {
    match &ast.body {
        AstBody::Atom(Value::Nil) => true,
        AstBody::Cons { tail, .. } => is_proper_list_tail(tail),
        _ => false,
    }
}
