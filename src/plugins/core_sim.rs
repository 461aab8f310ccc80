use bevy::prelude::*;
use bevy::time::Fixed;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;

// Core simulation timing & shared gameplay configuration.
#[derive(Resource, Default, Debug)]
pub struct SimState {
    pub tick: u64,
    pub elapsed_seconds: f32,
}
impl SimState {
    pub fn advance_fixed(&mut self) {
        self.tick += 1;
        self.elapsed_seconds = self.tick as f32 / 60.0;
    }
}

/// Gameplay tuning values. Loaded from `assets/tuning.ron` on native targets;
/// the in-code defaults are used when the file is missing or malformed.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub play_width: f32,
    pub play_height: f32,
    pub gravity_y: f32, // pixel units per second squared
    pub ball_radius: f32,
    pub min_swipe_length: f32,
    pub max_line_count: usize,
    pub line_lifetime: f32,
    pub line_thickness: f32,
    pub target_radius: f32,
    pub target_edge_inset: f32,
    pub target_bonus_points: u32,
    pub initial_drop_impulse: f32,
    pub bounce_boost: f32,
    pub bounds_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            play_width: 400.0,
            play_height: 700.0,
            gravity_y: -600.0,
            ball_radius: 15.0,
            min_swipe_length: 20.0,
            max_line_count: 20,
            line_lifetime: 3.0,
            line_thickness: 5.0,
            target_radius: 15.0,
            target_edge_inset: 20.0,
            target_bonus_points: 5,
            initial_drop_impulse: 5.0,
            bounce_boost: 2.0,
            bounds_margin: 20.0,
        }
    }
}

impl Tuning {
    pub fn play_size(&self) -> Vec2 {
        Vec2::new(self.play_width, self.play_height)
    }

    /// Ball rest position at round start: horizontally centered, 100 units
    /// below the top of the play area.
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(self.play_width * 0.5, self.play_height - 100.0)
    }
}

pub fn load_tuning() -> Tuning {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(data) = fs::read_to_string("assets/tuning.ron") {
            match ron::from_str::<Tuning>(&data) {
                Ok(t) => return t,
                Err(e) => warn!("failed to parse assets/tuning.ron: {e}"),
            }
        }
    }
    Tuning::default()
}

pub struct CoreSimPlugin;
impl Plugin for CoreSimPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimState::default())
            .insert_resource(load_tuning())
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_systems(FixedUpdate, tick_state);
    }
}

pub fn tick_state(mut sim: ResMut<SimState>) {
    sim.advance_fixed();
}
