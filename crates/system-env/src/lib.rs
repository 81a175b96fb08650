mod context;
mod cpu;
mod env;
mod error;

pub use context::*;
pub use cpu::*;
pub use env::*;
pub use error::*;
