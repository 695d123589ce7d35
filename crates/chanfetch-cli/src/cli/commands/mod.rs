//! CLI command handlers, one file per subcommand.

mod completions;
mod download;
mod extract;

pub use completions::{run_completions, run_manpage};
pub use download::run_download;
pub use extract::run_extract;
