mod rewrite;
mod rewrite_error;

pub use rewrite::*;
pub use rewrite_error::*;
