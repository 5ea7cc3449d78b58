use core::ast::{Ast, AstBody, AstVisitor};
use core::bytecode::OpCode;
use core::chunk::Chunk;
use core::value::{Operator, Value};

pub mod errors;

pub use errors::GenError;

pub type GenResult<T> = Result<T, GenError>;

/// Lowers a parsed [`Ast`] into a [`Chunk`] of bytecode. Owns the `Chunk`
/// being built — the same "context struct instead of file-scope globals"
/// treatment the parser uses for its cursor.
pub struct Generator {
    chunk: Chunk,
}

impl Generator {
    /// Emits bytecode for a single top-level expression.
    pub fn generate<'a>(ast: &'a Ast<'a>) -> GenResult<Chunk> {
        let mut gen = Generator { chunk: Chunk::new() };
        gen.visit(ast)?;
        tracing::debug!(bytes = gen.chunk.len(), "generated bytecode");
        Ok(gen.chunk)
    }

    fn emit_atom(&mut self, ast: &Ast, value: Value) -> GenResult<()> {
        match value {
            Value::Nil => {
                self.chunk.push_op(OpCode::Nil, ast.token);
            }
            Value::F64(n) => {
                self.chunk.push_op(OpCode::F64, ast.token);
                self.chunk.push_f64_le(n, ast.token);
            }
            Value::Bool(b) => {
                let op = if b { OpCode::True } else { OpCode::False };
                self.chunk.push_op(op, ast.token);
            }
            Value::Object(_) => {
                let idx = self.chunk.add_constant(value);
                self.chunk.push_op(OpCode::Constant16, ast.token);
                self.chunk.push_u16_le(idx, ast.token);
            }
            Value::Operator(op) => {
                self.chunk.push_op(OpCode::BuiltinFn, ast.token);
                self.chunk.push_byte(op as u8, ast.token);
            }
            Value::ComptimeOperator(_) | Value::Function { .. } => {
                return Err(GenError::new("Unsupported value type in an atom.", ast.token));
            }
        }
        Ok(())
    }

    /// A quoted cons spine is a data constructor: recursively emit tail,
    /// then head, then `ConsCell`. Quoting is not re-examined at nested
    /// cons nodes reached through this recursion — quoting a list quotes
    /// everything inside it, the same way `'` quotes its whole operand in
    /// any Lisp descendant.
    fn emit_data<'a>(&mut self, ast: &Ast<'a>, head: &'a Ast<'a>, tail: &'a Ast<'a>) -> GenResult<()> {
        self.emit_data_node(tail)?;
        self.emit_data_node(head)?;
        self.chunk.push_op(OpCode::ConsCell, ast.token);
        Ok(())
    }

    fn emit_data_node<'a>(&mut self, node: &'a Ast<'a>) -> GenResult<()> {
        match &node.body {
            AstBody::Atom(value) => self.emit_atom(node, *value),
            AstBody::Cons { head, tail } => self.emit_data(node, head, tail),
        }
    }

    /// An unquoted cons spine is a function call: collect the proper
    /// list's elements, emit them in reverse (the VM pops top-first), emit
    /// the head, then try the builtin-fn inlining rewrite.
    fn emit_call<'a>(&mut self, ast: &Ast<'a>, head: &'a Ast<'a>, tail: &'a Ast<'a>) -> GenResult<()> {
        let args = collect_call_args(tail)?;
        for arg in args.iter().rev() {
            self.visit(*arg)?;
        }
        self.visit(head)?;

        let direct = match self.chunk.last_bytes(2) {
            Some([tag, op]) if *tag == OpCode::BuiltinFn as u8 => {
                Operator::try_from(*op).ok().and_then(Operator::direct_opcode)
            }
            _ => None,
        };

        match direct {
            Some(op) => self.chunk.rewrite_trailing(2, op as u8, ast.token),
            None => {
                self.chunk.push_op(OpCode::FunctionCall, ast.token);
            }
        }
        Ok(())
    }
}

impl<'a> AstVisitor<'a> for Generator {
    type Output = GenResult<()>;

    fn visit_atom(&mut self, ast: &Ast<'a>, value: Value) -> Self::Output {
        self.emit_atom(ast, value)
    }

    fn visit_cons(&mut self, ast: &Ast<'a>, head: &'a Ast<'a>, tail: &'a Ast<'a>) -> Self::Output {
        if ast.quoted {
            self.emit_data(ast, head, tail)
        } else {
            self.emit_call(ast, head, tail)
        }
    }
}

/// Walks a proper-list tail spine, collecting each element's head node.
/// The spine links themselves are not independent expressions — only
/// their heads are — so this walks `AstBody` directly rather than
/// redispatching each link through `AstVisitor::visit`.
fn collect_call_args<'a>(tail: &'a Ast<'a>) -> GenResult<Vec<&'a Ast<'a>>> {
    let mut args = Vec::new();
    let mut node = tail;
    loop {
        match &node.body {
            AstBody::Atom(Value::Nil) => break,
            AstBody::Cons { head, tail } => {
                args.push(*head);
                node = tail;
            }
            _ => {
                return Err(GenError::new(
                    "A proper list was unexpectedly terminated by a non-nil atom.",
                    node.token,
                ));
            }
        }
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::tokens::TokenList;
    use core::{Allocator, BumpArena};
    use lexer::Lexer;
    use parser::Parser;

    fn compile(src: &str) -> GenResult<Chunk> {
        let tokens = Lexer::lex(src).unwrap();
        let list = TokenList::new(&tokens);
        let arena = BumpArena::new(4096, 1);
        let ast = Parser::parse(list, &arena).expect("parse should succeed");
        Generator::generate(ast)
    }

    #[test]
    fn subtraction_is_emitted_tail_before_head() {
        let chunk = compile("(- 1 2)").unwrap();

        let mut expected = Vec::new();
        expected.push(OpCode::F64 as u8);
        expected.extend_from_slice(&2.0f64.to_le_bytes());
        expected.push(OpCode::F64 as u8);
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        expected.push(OpCode::Sub as u8);

        assert_eq!(chunk.code(), expected.as_slice());
    }

    #[test]
    fn builtin_call_collapses_to_a_direct_opcode() {
        let chunk = compile("(+ 1 2)").unwrap();
        assert!(chunk.code().iter().all(|&b| b != OpCode::BuiltinFn as u8));
        assert_eq!(*chunk.code().last().unwrap(), OpCode::Add as u8);
    }

    #[test]
    fn quoted_list_is_emitted_as_nested_cons_cells() {
        let chunk = compile("'(1 2)").unwrap();
        let cons_cells = chunk.code().iter().filter(|&&b| b == OpCode::ConsCell as u8).count();
        assert_eq!(cons_cells, 2);
        assert!(chunk.code().iter().all(|&b| b != OpCode::FunctionCall as u8));
    }

    #[test]
    fn non_builtin_call_head_emits_function_call() {
        let chunk = compile("(foo 1 2)").unwrap();
        assert_eq!(*chunk.code().last().unwrap(), OpCode::FunctionCall as u8);
    }

    #[test]
    fn dotted_pair_call_is_a_malformed_list_error() {
        let err = compile("(+ 1 . 2)").unwrap_err();
        assert_eq!(err.message, "A proper list was unexpectedly terminated by a non-nil atom.");
    }

    #[test]
    fn quoting_a_nested_list_still_emits_it_as_data() {
        let chunk = compile("'(1 (+ 2 3))").unwrap();
        assert!(chunk.code().iter().all(|&b| b != OpCode::FunctionCall as u8));
        let cons_cells = chunk.code().iter().filter(|&&b| b == OpCode::ConsCell as u8).count();
        assert_eq!(cons_cells, 3);
    }

    #[test]
    fn nil_literal_emits_the_nil_opcode() {
        let chunk = compile("()").unwrap();
        assert_eq!(chunk.code(), &[OpCode::Nil as u8]);
    }
}
