//! Handlers for the CLI subcommands.
//!
//! Parsing and flag validation live in the parser module; these types
//! receive the merged settings and do the actual work.

pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
