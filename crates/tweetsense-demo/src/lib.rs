pub mod cli;
pub mod config;
pub mod content;
pub mod context;
pub mod pages;
pub mod render;
pub mod server;
pub mod state;

pub use cli::*;
pub use config::*;
pub use context::*;
pub use server::*;
pub use state::*;
