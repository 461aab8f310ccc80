//! Library entry for integration tests & external tooling.
//! Exposes plugin modules and a prelude for common types.

pub mod plugins {
    pub mod arena;
    pub mod ball;
    pub mod categories;
    pub mod contacts;
    pub mod core_sim;
    pub mod game_audio;
    pub mod game_state;
    pub mod hud;
    pub mod lines;
    pub mod particles;
    pub mod swipe;
    pub mod targets;
}
pub mod prelude;
