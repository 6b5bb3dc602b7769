//! # CLI Commands
//!
//! One module per subcommand. Each takes the shared [`AppState`] and writes
//! its result to stdout.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── list.rs     ◄─── catalog-cli list [--query] [--json]
//! ├── add.rs      ◄─── catalog-cli add --name --type ...
//! └── cache.rs    ◄─── catalog-cli cache
//! ```
//!
//! [`AppState`]: crate::state::AppState

pub mod add;
pub mod cache;
pub mod list;
