// Wed Jan 15 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, Command, ConfigArgs, RunArgs};
pub use handler::CommandHandler;
