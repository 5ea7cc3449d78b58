use crate::bytecode::OpCode;

/// One of the builtin operators with a dedicated opcode. `SetGlobal` is
/// carried for representational completeness (the `set` reserved word
/// round-trips through the atom parser and the diagnostics printer) but has
/// no bytecode opcode or VM dispatch arm of its own yet — see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Print,
    SetGlobal,
}

impl Operator {
    /// The canonical printed form, used by the diagnostics value printer.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Print => "print",
            Operator::SetGlobal => "set",
        }
    }

    /// The direct single-byte opcode this operator collapses to when it's
    /// the head of an unquoted call (the generator's builtin-fn inlining).
    /// `None` for operators with no dedicated opcode, e.g. `SetGlobal`.
    pub fn direct_opcode(self) -> Option<OpCode> {
        match self {
            Operator::Add => Some(OpCode::Add),
            Operator::Sub => Some(OpCode::Sub),
            Operator::Mul => Some(OpCode::Mul),
            Operator::Div => Some(OpCode::Div),
            Operator::Print => Some(OpCode::Print),
            Operator::SetGlobal => None,
        }
    }
}

impl TryFrom<u8> for Operator {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        if byte > Operator::SetGlobal as u8 {
            return Err(byte);
        }
        // SAFETY: `byte` was just checked to be within the enum's range,
        // and `Operator` is `#[repr(u8)]` with no gaps.
        Ok(unsafe { std::mem::transmute::<u8, Operator>(byte) })
    }
}

/// An operator that only has meaning at compile time and never reaches the
/// VM as a runtime value. Both variants round-trip through the atom parser
/// and the diagnostics printer but have no bytecode opcode; a function call
/// headed by either reaches the generator's unsupported-operator error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComptimeOperator {
    Fun,
    Defun,
}

impl ComptimeOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            ComptimeOperator::Fun => "fun",
            ComptimeOperator::Defun => "defun",
        }
    }
}

/// A symbol name or string literal's text, allocated directly in the parse
/// arena that produced the [`Ast`](crate::ast::Ast) atom referencing it.
/// Never refcounted — it lives and dies with that arena, reclaimed in bulk
/// on reset rather than individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaText {
    Str(String),
    Symbol(String),
}

impl ArenaText {
    pub fn text(&self) -> &str {
        match self {
            ArenaText::Str(s) | ArenaText::Symbol(s) => s,
        }
    }
}

/// A handle to a heap object, one of two storage strategies depending on
/// the object's lifecycle:
///
/// - `Arena`: a raw pointer to an [`ArenaText`] living in a parse arena —
///   a symbol or string atom, never refcounted, freed only when that arena
///   resets.
/// - `Heap`: an index into a runtime [`ObjectHeap`](objects::ObjectHeap)'s
///   refcounted pool — a cons cell built by the VM.
///
/// Kept in `core` (rather than the `objects` crate that owns the pool) so
/// `Value` can reference it without a circular crate dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    Arena(std::ptr::NonNull<ArenaText>),
    Heap(usize),
}

impl ObjectRef {
    /// Dereferences an arena-backed reference; `None` for a `Heap` ref.
    ///
    /// # Safety
    /// The arena that produced this reference must still be alive and must
    /// not have been reset since.
    pub unsafe fn as_arena_text(&self) -> Option<&ArenaText> {
        match self {
            ObjectRef::Arena(ptr) => Some(ptr.as_ref()),
            ObjectRef::Heap(_) => None,
        }
    }

    pub fn as_heap_index(&self) -> Option<usize> {
        match self {
            ObjectRef::Heap(idx) => Some(*idx),
            ObjectRef::Arena(_) => None,
        }
    }
}

/// The tagged value type shared between AST atoms (compile-time literals)
/// and VM stack slots (runtime values).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Nil,
    F64(f64),
    Bool(bool),
    Object(ObjectRef),
    Operator(Operator),
    ComptimeOperator(ComptimeOperator),
    Function { location: u32 },
}

impl Value {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Value::F64(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_object(self) -> Option<ObjectRef> {
        match self {
            Value::Object(r) => Some(r),
            _ => None,
        }
    }

    pub fn kind_name(self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::F64(_) => "f64",
            Value::Bool(_) => "bool",
            Value::Object(_) => "object",
            Value::Operator(_) => "operator",
            Value::ComptimeOperator(_) => "comptime_operator",
            Value::Function { .. } => "function",
        }
    }
}
