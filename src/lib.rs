//////////////////////////
// lib.rs
//////////////////////////

pub mod board;
pub mod engine;
pub mod rules;
pub mod types;

pub use types::*;
pub use board::Board;
pub use engine::{automated_move, score_move};
