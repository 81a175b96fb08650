mod range;
mod spec_error;
mod version;

pub use range::*;
pub use spec_error::*;
pub use version::*;
