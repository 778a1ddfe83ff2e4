//! Sparrow round orchestration
//!
//! Deterministic seeding, a turn-by-turn round runner and a rayon-backed
//! batch simulator on top of `sparrow-engine`.

pub mod game_loop;
pub mod seeding;
pub mod simulator;
