use std::fmt::Write as _;

use core::bytecode::OpCode;
use core::chunk::Chunk;
use core::value::Operator;

/// Walks `chunk`'s byte buffer opcode by opcode, rendering one line per
/// instruction with its offset, name, and decoded operand. Used by the
/// `--disassemble` CLI flag and by tests that assert on emitted shape.
pub fn disassemble(chunk: &Chunk) -> String {
    let code = chunk.code();
    let mut out = String::new();
    let mut ip = 0usize;

    while ip < code.len() {
        let byte = code[ip];
        let op = match OpCode::try_from(byte) {
            Ok(op) => op,
            Err(byte) => {
                writeln!(out, "{ip:04}  UNKNOWN({byte:#04x})").expect("writing to a String cannot fail");
                ip += 1;
                continue;
            }
        };

        let operand = describe_operand(chunk, op, ip);
        writeln!(out, "{ip:04}  {:<12}{operand}", op.name()).expect("writing to a String cannot fail");
        ip += 1 + op.operand_width();
    }

    out
}

fn describe_operand(chunk: &Chunk, op: OpCode, ip: usize) -> String {
    let code = chunk.code();
    match op {
        OpCode::F64 => {
            let bytes: [u8; 8] = code[ip + 1..ip + 9].try_into().expect("F64 operand is 8 bytes");
            format!("{}", f64::from_le_bytes(bytes))
        }
        OpCode::Constant16 => {
            let idx = u16::from_le_bytes([code[ip + 1], code[ip + 2]]);
            match chunk.constants().get(idx as usize) {
                Some(value) => format!("#{idx} ({value:?})"),
                None => format!("#{idx} (out of range)"),
            }
        }
        OpCode::BuiltinFn => match Operator::try_from(code[ip + 1]) {
            Ok(operator) => operator.as_str().to_string(),
            Err(byte) => format!("?{byte}"),
        },
        OpCode::Global | OpCode::SetGlobal | OpCode::JumpIfTrue | OpCode::JumpIfFalse | OpCode::Jump => {
            u16::from_le_bytes([code[ip + 1], code[ip + 2]]).to_string()
        }
        _ => String::new(),
    }
}
