// Gameplay feedback events & short-lived 2D spark effects.

use bevy::prelude::*;
use rand::prelude::*;

pub struct ParticlePlugin;

// Events emitted by gameplay code
#[derive(Event)]
pub struct BounceEvent {
    pub pos: Vec2,
}

#[derive(Event)]
pub struct TargetHitEvent {
    pub pos: Vec2,
    pub points: u32,
}

#[derive(Event)]
pub struct GameOverEvent {
    pub pos: Vec2,
}

#[derive(Component)]
struct Particle {
    lifetime: f32,
    age: f32,
    vel: Vec2,
}

impl Plugin for ParticlePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BounceEvent>()
            .add_event::<TargetHitEvent>()
            .add_event::<GameOverEvent>()
            .add_systems(
                Update,
                (spawn_bounce_sparks, spawn_target_bursts, update_particles),
            );
    }
}

// Single white spark at the contact point, like a brief flash.
fn spawn_bounce_sparks(mut ev: EventReader<BounceEvent>, mut commands: Commands) {
    for e in ev.read() {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::WHITE,
                    custom_size: Some(Vec2::splat(10.0)),
                    ..default()
                },
                transform: Transform::from_translation(e.pos.extend(3.0)),
                ..default()
            },
            Particle {
                lifetime: 0.3,
                age: 0.0,
                vel: Vec2::ZERO,
            },
        ));
    }
}

// Small yellow burst scattered from the struck target.
fn spawn_target_bursts(mut ev: EventReader<TargetHitEvent>, mut commands: Commands) {
    for e in ev.read() {
        let mut rng = thread_rng();
        for _ in 0..12 {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(40.0..120.0);
            commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: Color::srgb(0.95, 0.85, 0.1),
                        custom_size: Some(Vec2::splat(rng.gen_range(3.0..6.0))),
                        ..default()
                    },
                    transform: Transform::from_translation(e.pos.extend(3.0)),
                    ..default()
                },
                Particle {
                    lifetime: rng.gen_range(0.3..0.6),
                    age: 0.0,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                },
            ));
        }
    }
}

fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Transform, &mut Sprite, &mut Particle)>,
) {
    let dt = time.delta_seconds();
    for (entity, mut transform, mut sprite, mut particle) in &mut q {
        particle.age += dt;
        if particle.age >= particle.lifetime {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        transform.translation += (particle.vel * dt).extend(0.0);
        let progress = particle.age / particle.lifetime;
        sprite.color.set_alpha(1.0 - progress);
    }
}
