mod client;
mod client_error;
mod config;
mod config_error;
mod dispatch_error;
mod dispatcher;
pub mod flow;
mod install_error;
mod installer;
mod layout;
mod manifest;
mod manifest_error;
mod process;
mod release_resolver;
mod resolve_error;
mod target;
mod target_error;

pub use async_trait::async_trait;
pub use client::*;
pub use client_error::*;
pub use config::*;
pub use config_error::*;
pub use dispatch_error::*;
pub use dispatcher::*;
pub use install_error::*;
pub use installer::*;
pub use layout::*;
pub use manifest::*;
pub use manifest_error::*;
pub use process::*;
pub use release_resolver::*;
pub use resolve_error::*;
pub use starbase_styles::color;
pub use system_env;
pub use target::*;
pub use target_error::*;
pub use version_spec;
