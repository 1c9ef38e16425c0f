//! Terminal front end: the interactive board view and the plain-text board
//! snapshot written after every action.

mod app;
pub mod board_widget;
mod game_view;
pub mod snapshot;

pub use app::App;
