mod resolve;
mod rewrite;
mod target;

pub use resolve::*;
pub use rewrite::*;
pub use target::*;
