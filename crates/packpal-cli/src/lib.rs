pub mod config;
pub mod request;

pub use config::Config;
pub use request::{handle_line, ChatTurn, HistoryReply, Request};
