use core::tokens::{Token, TokenKind};

mod keyword;

pub mod errors;

pub use errors::LexError;

/// Converts source text into a finite token stream terminating in `Eof`
/// (or stopping early on the first `Error` token, reported as a
/// [`LexError`]). A standard hand-written character scanner; the nontrivial
/// engineering lives downstream in the parser and bytecode generator.
pub struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    current: usize,
    token_start: usize,
    line: u32,
    line_start: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            current: 0,
            token_start: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Lexes the entire source into a token vector ending in `Eof`, or
    /// returns the first [`LexError`] encountered.
    pub fn lex(source: &'src str) -> Result<Vec<Token<'src>>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tracing::debug!(count = tokens.len(), "lexed token stream");
        Ok(tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.bytes.len()
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes[self.current]
        }
    }

    fn advance(&mut self) -> u8 {
        let c = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        c
    }

    fn column(&self) -> u32 {
        (self.token_start - self.line_start) as u32
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.token_start..self.current]
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' => {
                    self.advance();
                }
                b'\n' => {
                    self.advance();
                    self.line += 1;
                    self.line_start = self.current;
                }
                _ => return,
            }
        }
    }

    fn make(&self, kind: TokenKind) -> Token<'src> {
        Token::new(kind, self.lexeme(), self.line, self.column())
    }

    fn number(&mut self) -> Token<'src> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == b'.' {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        self.make(TokenKind::Number)
    }

    fn identifier(&mut self) -> Token<'src> {
        while self.peek().is_ascii_alphanumeric() {
            self.advance();
        }
        self.make(keyword::keyword_or_symbol(self.lexeme()))
    }

    fn string(&mut self) -> Result<Token<'src>, LexError> {
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
                self.line_start = self.current + 1;
            }
            self.advance();
        }
        if self.is_at_end() {
            return Err(LexError::new(
                "Unterminated string.",
                self.line,
                self.column(),
            ));
        }
        self.advance(); // closing quote
        Ok(self.make(TokenKind::String))
    }

    fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        self.skip_whitespace();
        self.token_start = self.current;

        if self.is_at_end() {
            return Ok(self.make(TokenKind::Eof));
        }

        let c = self.advance();

        if c.is_ascii_digit() {
            return Ok(self.number());
        }
        if c.is_ascii_alphabetic() {
            return Ok(self.identifier());
        }

        let tok = match c {
            b'(' => {
                if self.peek() == b')' {
                    self.advance();
                    self.make(TokenKind::Nil)
                } else {
                    self.make(TokenKind::ParenStart)
                }
            }
            b')' => self.make(TokenKind::ParenEnd),
            b'.' => self.make(TokenKind::Cons),
            b'\'' => self.make(TokenKind::Quote),
            b'+' => self.make(TokenKind::Plus),
            b'-' => self.make(TokenKind::Minus),
            b'*' => self.make(TokenKind::Star),
            b'/' => self.make(TokenKind::Slash),
            b'"' => return self.string(),
            _ => {
                return Err(LexError::new(
                    "Unexpected character.",
                    self.line,
                    self.column(),
                ))
            }
        };
        Ok(tok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::lex(src)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn empty_parens_become_a_single_nil_token() {
        assert_eq!(kinds("()"), vec![TokenKind::Nil, TokenKind::Eof]);
    }

    #[test]
    fn arithmetic_call() {
        assert_eq!(
            kinds("(+ 1 2)"),
            vec![
                TokenKind::ParenStart,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::ParenEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(
            kinds("print set fun defun"),
            vec![
                TokenKind::Print,
                TokenKind::Set,
                TokenKind::Fun,
                TokenKind::Defun,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn similar_prefix_is_still_a_symbol() {
        assert_eq!(kinds("printer"), vec![TokenKind::Symbol, TokenKind::Eof]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::lex("\"abc").unwrap_err();
        assert_eq!(err.message, "Unterminated string.");
    }

    #[test]
    fn string_literal_keeps_its_quotes_in_the_lexeme() {
        let tokens = Lexer::lex("\"hi\"").unwrap();
        assert_eq!(tokens[0].lexeme, "\"hi\"");
    }

    #[test]
    fn newline_advances_line_and_resets_column() {
        let tokens = Lexer::lex("a\nb").unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[1].column, 0);
    }
}
