//! Built-in commands.
//!
//! Their wording is deliberately plain; games wanting richer text register
//! their own commands under the same kinds.
mod change_state;
mod transfer;

pub use change_state::ChangeStateCommand;
pub use transfer::TransferCommand;

pub const NOT_FOUND: &str = "You can't find that here.";
pub const NOT_HELD: &str = "You don't have that.";
pub const NO_MATCHING_STATE: &str = "It can't be changed that way.";
