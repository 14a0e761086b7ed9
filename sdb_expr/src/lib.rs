// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod disambiguation;
pub mod evaluation;
pub mod lexical;
pub mod machine;
pub mod pipeline;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use config::RuntimeConfig;
pub use evaluation::EvalError;
pub use lexical::LexerError;
pub use machine::{
    EvalContext, GuestMemory, MemoryError, PhysicalMemory, RegisterFile, RiscvRegisters, Word,
};
pub use pipeline::{expr, expr_with_flag, ExprEngine, ExprError, ExprResult};
pub use tokens::{Token, TokenKind, TokenStream};
pub use utils::Span;
