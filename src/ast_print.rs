//! Renders a parsed [`Ast`] back out as text, for the `--print-ast` flag.
//! Shares the `(head . tail)` dotted-pair notation `plv::format_value` uses
//! for runtime values, prefixed with `'` wherever a node's `quoted` flag is
//! set, so the printed form shows exactly what the parser attached to each
//! node rather than re-deriving it from surface syntax.

use core::ast::{Ast, AstBody};
use objects::ObjectHeap;

pub fn print_ast(ast: &Ast, heap: &ObjectHeap) -> String {
    let mut out = String::new();
    if ast.quoted {
        out.push('\'');
    }
    match &ast.body {
        AstBody::Atom(value) => out.push_str(&plv::format_value(*value, heap)),
        AstBody::Cons { head, tail } => {
            out.push('(');
            out.push_str(&print_ast(head, heap));
            out.push_str(" . ");
            out.push_str(&print_ast(tail, heap));
            out.push(')');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::tokens::TokenList;
    use core::{Allocator, BumpArena};

    #[test]
    fn quoted_list_keeps_its_leading_quote_mark() {
        let tokens = lexer::Lexer::lex("'(1 . 2)").unwrap();
        let list = TokenList::new(&tokens);
        let arena = BumpArena::new(4096, 1);
        let heap = ObjectHeap::new();
        let ast = parser::Parser::parse(list, &arena).unwrap();
        assert_eq!(print_ast(ast, &heap), "'(1 . 2)");
    }
}
