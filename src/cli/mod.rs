//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Shapes | Create and query | `add`, `list`, `show`, `delete` |
//! | Collection | Whole-store operations | `clear`, `stats`, `count` |
//! | Files | Data file handling | `export`, `import`, `info` |
//! | Units | Length conversion | `convert 12 in cm` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. Use `--verbose` (or `-v`)
//! for debug events, or set `RUST_LOG`:
//! ```bash
//! geoshapes --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod file_cmd;
mod output;
mod shape_cmd;

pub use app::{execute, run, Cli, Commands};
pub use output::{shape_json, Output, OutputFormat};
