use core::tokens::TokenKind;

/// Matches a symbol lexeme against the reserved-word set, by first
/// character then suffix, the way the source tokenizer this was distilled
/// from does it: a symbol is reserved only if the whole lexeme matches one
/// of the fixed keyword strings, otherwise it's an ordinary symbol.
pub fn keyword_or_symbol(lexeme: &str) -> TokenKind {
    match lexeme {
        "print" => TokenKind::Print,
        "set" => TokenKind::Set,
        "fun" => TokenKind::Fun,
        "defun" => TokenKind::Defun,
        _ => TokenKind::Symbol,
    }
}
