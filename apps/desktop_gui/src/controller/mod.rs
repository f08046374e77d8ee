//! Controller layer: actions, search filter, toolbar, board state machine, and command orchestration.

pub mod actions;
pub mod events;
pub mod filter;
pub mod orchestration;
pub mod reducer;
pub mod toolbar;
