use crate::game::GameState;

/// Universal interface for all bots.
pub trait Agent {
    /// Pick a placement for the side to move, or `None` when it has to pass.
    /// Implementations never mutate the game; the caller applies the choice.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
