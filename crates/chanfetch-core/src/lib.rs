pub mod config;
pub mod logging;

pub mod catalog;
pub mod control;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod lock;
pub mod pacing;
pub mod pipeline;
pub mod scheduler;
pub mod state;
pub mod ytdlp;
