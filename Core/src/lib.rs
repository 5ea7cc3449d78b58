pub mod ast;
pub mod bytecode;
pub mod chunk;
pub mod tokens;
pub mod utils;
pub mod value;

pub use arena::{asserts, Allocator, BumpArena, HeapAllocator};

/// The current version of the interpreter.
pub const VERSION: &str = "0.1.0";
/// Default iteration guard for the VM's main loop, capping how many
/// instructions a single `run` will dispatch before treating the program as
/// runaway.
pub const DEFAULT_ITERATION_GUARD: usize = 1_000_000;
