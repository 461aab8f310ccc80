// Round lifecycle: phase transitions, scoring, swipe handling, full reset.
//
// The round state machine exclusively triggers resets on the line and target
// collections; neither manager reaches into the other.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::plugins::ball::Ball;
use crate::plugins::core_sim::{SimState, Tuning};
use crate::plugins::hud::GameOverLabel;
use crate::plugins::lines::{clear_lines, try_spawn_line, ActiveLines};
use crate::plugins::swipe::{RestartTapEvent, SwipeEvent};
use crate::plugins::targets::{reset_targets, TargetRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    NotStarted,
    Playing,
    GameOver,
}

#[derive(Resource, Debug)]
pub struct RoundState {
    pub phase: RoundPhase,
}
impl Default for RoundState {
    fn default() -> Self {
        Self {
            phase: RoundPhase::NotStarted,
        }
    }
}

/// Monotonic within a round; only `award` mutates it outside of round reset.
#[derive(Resource, Debug, Default)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn award(&mut self, points: u32) {
        self.value += points;
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    fn reset(&mut self) {
        self.value = 0;
    }
}

pub struct GameStatePlugin;
impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RoundState::default())
            .insert_resource(Score::default())
            .add_event::<SwipeEvent>()
            .add_event::<RestartTapEvent>()
            .add_systems(Update, (handle_swipe, reset_round).chain());
    }
}

// Swipe end: while the round is over, a gesture only requests a restart.
// Otherwise delegate to line creation; a successful line earns a point, and
// the first one starts the round by releasing the ball with a small downward
// impulse.
fn handle_swipe(
    mut commands: Commands,
    mut ev_swipe: EventReader<SwipeEvent>,
    mut ev_restart: EventWriter<RestartTapEvent>,
    mut round: ResMut<RoundState>,
    mut score: ResMut<Score>,
    mut active: ResMut<ActiveLines>,
    tuning: Res<Tuning>,
    sim: Res<SimState>,
    mut q_ball: Query<(Entity, &mut ExternalImpulse), With<Ball>>,
) {
    for swipe in ev_swipe.read() {
        if round.phase == RoundPhase::GameOver {
            ev_restart.send(RestartTapEvent);
            continue;
        }

        if !try_spawn_line(
            &mut commands,
            &mut active,
            &tuning,
            swipe.start,
            swipe.end,
            sim.elapsed_seconds,
        ) {
            continue;
        }

        score.award(1);

        if round.phase == RoundPhase::NotStarted {
            round.phase = RoundPhase::Playing;
            if let Ok((ball, mut impulse)) = q_ball.get_single_mut() {
                commands.entity(ball).insert(RigidBody::Dynamic);
                impulse.impulse += Vec2::new(0.0, -tuning.initial_drop_impulse);
            }
            info!("round started");
        }
    }
}

// Tap while game over: full round reset. Clears segments, rebuilds targets,
// zeroes the score, and parks the ball back at its spawn, immovable again.
fn reset_round(
    mut commands: Commands,
    mut ev_restart: EventReader<RestartTapEvent>,
    mut round: ResMut<RoundState>,
    mut score: ResMut<Score>,
    mut active: ResMut<ActiveLines>,
    mut registry: ResMut<TargetRegistry>,
    tuning: Res<Tuning>,
    mut q_ball: Query<(Entity, &mut Transform, &mut Velocity, &mut ExternalImpulse), With<Ball>>,
    q_over_label: Query<Entity, With<GameOverLabel>>,
) {
    for _ in ev_restart.read() {
        if round.phase != RoundPhase::GameOver {
            continue;
        }

        clear_lines(&mut commands, &mut active);
        reset_targets(&mut commands, &mut registry, &tuning);
        score.reset();

        if let Ok((ball, mut transform, mut velocity, mut impulse)) = q_ball.get_single_mut() {
            transform.translation = tuning.ball_spawn().extend(transform.translation.z);
            velocity.linvel = Vec2::ZERO;
            velocity.angvel = 0.0;
            impulse.impulse = Vec2::ZERO;
            impulse.torque_impulse = 0.0;
            commands.entity(ball).insert(RigidBody::Fixed);
        }

        for label in &q_over_label {
            commands.entity(label).despawn_recursive();
        }

        round.phase = RoundPhase::NotStarted;
        info!("round reset");
    }
}
