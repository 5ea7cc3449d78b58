//! Error reporting: one-line summary, position, and a source snippet with
//! a `^` caret under the offending span. Grounded on the legacy
//! `src/errors.rs` ANSI reporter, trimmed down for a pipeline with no call
//! frames or stack traces to walk.

use core::tokens::TokenList;

/// Prints `message` in bold red, then — if `location` is `Some((line,
/// column))` — the offending source line with a caret under `column`.
/// Runtime errors (which carry no token) pass `None` and get just the
/// message.
pub fn report(message: &str, location: Option<(u32, u32)>, source: &str, color: bool) {
    if color {
        eprintln!("\x1b[31;1merror:\x1b[0m\x1b[1m {message}\x1b[0m");
    } else {
        eprintln!("error: {message}");
    }

    let Some((line, column)) = location else {
        return;
    };

    let Some(src_line) = source.split('\n').nth((line - 1) as usize) else {
        return;
    };

    eprintln!(" {:>4} | {src_line}", line);
    let caret_padding = " ".repeat(column as usize);
    if color {
        eprintln!("      | {caret_padding}\x1b[31;1m^\x1b[0m");
    } else {
        eprintln!("      | {caret_padding}^");
    }
}

/// Looks up a token's `(line, column)` for use as `report`'s `location`.
pub fn token_location(tokens: &TokenList, idx: usize) -> Option<(u32, u32)> {
    tokens.get(idx).map(|_| tokens.location(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_location_resolves_an_in_range_index() {
        let tokens = core::tokens::TokenList::new(&[core::tokens::Token::new(
            core::tokens::TokenKind::Number,
            "1",
            1,
            0,
        )]);
        assert_eq!(token_location(&tokens, 0), Some((1, 0)));
    }

    #[test]
    fn token_location_is_none_out_of_range() {
        let tokens = core::tokens::TokenList::new(&[]);
        assert_eq!(token_location(&tokens, 0), None);
    }
}
