// Ball marker & per-frame out-of-bounds safety clamp.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::plugins::core_sim::Tuning;
use crate::plugins::game_state::{RoundPhase, RoundState};

#[derive(Component)]
pub struct Ball;

pub struct BallPlugin;
impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            clamp_ball.after(crate::plugins::core_sim::tick_state),
        );
    }
}

// Tunneling guard: if the simulator pushes the ball past the side walls,
// bring it back inside the margin and reflect its horizontal velocity.
fn clamp_ball(
    round: Res<RoundState>,
    tuning: Res<Tuning>,
    mut q_ball: Query<(&mut Transform, &mut Velocity), With<Ball>>,
) {
    if round.phase == RoundPhase::GameOver {
        return;
    }
    let Ok((mut transform, mut velocity)) = q_ball.get_single_mut() else {
        return;
    };
    let margin = tuning.bounds_margin;
    let x = transform.translation.x;
    if x < -margin || x > tuning.play_width + margin {
        info!("ball escaped play area at x={x:.1}, clamping");
        transform.translation.x = x.clamp(margin, tuning.play_width - margin);
        velocity.linvel.x = -velocity.linvel.x;
    }
}
