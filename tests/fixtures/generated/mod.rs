// Generated by mdlc. Do not edit.

#[path = "common.rs"]
pub mod common_mdl;
pub use common_mdl::*;

#[path = "game.rs"]
pub mod game_mdl;
pub use game_mdl::*;
