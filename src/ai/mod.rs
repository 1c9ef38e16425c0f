mod agent;
pub mod greedy;
mod match_play;
mod random;

pub use agent::Agent;
pub use greedy::GreedyAgent;
pub use match_play::{play_match, play_series, MatchRecord, Turn};
pub use random::RandomAgent;
