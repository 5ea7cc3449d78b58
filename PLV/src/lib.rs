use core::value::Value;
use objects::ObjectHeap;

mod disassembler;

pub use disassembler::disassemble;

/// Renders a value in its canonical form — the same one the `print`
/// builtin writes to stdout: `Nil → ()`, `F64 →` its Rust `Display`,
/// `Bool → true/false`, `String → "..."`, `Symbol → <name>`, `Cons →
/// (head . tail)` recursively, `Operator → +,-,*,/,print`. Used by the
/// disassembler and `--print-ast`/`--disassemble` tooling.
pub fn format_value(value: Value, heap: &ObjectHeap) -> String {
    heap.display_plain(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::value::{ArenaText, ObjectRef};
    use core::{Allocator, BumpArena};
    use std::ptr::NonNull;

    fn arena_ref(arena: &BumpArena, text: ArenaText) -> ObjectRef {
        ObjectRef::Arena(NonNull::from(arena.alloc(text)))
    }

    #[test]
    fn nil_prints_as_empty_parens() {
        let heap = ObjectHeap::new();
        assert_eq!(format_value(Value::Nil, &heap), "()");
    }

    #[test]
    fn strings_are_quoted() {
        let heap = ObjectHeap::new();
        let arena = BumpArena::new(4096, 1);
        let r = arena_ref(&arena, ArenaText::Str("hi".to_string()));
        assert_eq!(format_value(Value::Object(r), &heap), "\"hi\"");
    }

    #[test]
    fn symbols_render_with_angle_brackets() {
        let heap = ObjectHeap::new();
        let arena = BumpArena::new(4096, 1);
        let r = arena_ref(&arena, ArenaText::Symbol("foo".to_string()));
        assert_eq!(format_value(Value::Object(r), &heap), "<foo>");
    }

    #[test]
    fn cons_cells_render_as_dotted_pairs_recursively() {
        let mut heap = ObjectHeap::new();
        let inner = heap.alloc_cons(Value::F64(2.0), Value::Nil);
        let outer = heap.alloc_cons(Value::F64(1.0), Value::Object(inner));
        assert_eq!(format_value(Value::Object(outer), &heap), "(1 . (2 . ()))");
    }
}
