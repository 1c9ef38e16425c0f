//! Session driver: turns text commands into game actions and lets the bot
//! answer them.

mod command;
mod driver;

pub use command::{Command, CommandError};
pub use driver::{Session, SessionEvent};
