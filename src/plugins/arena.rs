// World construction: camera, background, ground, edge walls, ball spawn,
// and gravity configuration.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::plugins::ball::Ball;
use crate::plugins::categories::{collision_groups, BodyTag};
use crate::plugins::core_sim::Tuning;

const GROUND_THICKNESS: f32 = 10.0;

pub struct ArenaPlugin;
impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (configure_gravity, setup_arena, spawn_ball));
    }
}

// Reduced gravity for a floatier, bouncier feel.
fn configure_gravity(rapier_cfg: Option<ResMut<RapierConfiguration>>, tuning: Res<Tuning>) {
    if let Some(mut cfg) = rapier_cfg {
        cfg.gravity = Vect::new(0.0, tuning.gravity_y);
    }
}

fn setup_arena(mut commands: Commands, tuning: Res<Tuning>) {
    let size = tuning.play_size();
    let center = size * 0.5;

    let mut camera = Camera2dBundle::default();
    camera.transform.translation.x = center.x;
    camera.transform.translation.y = center.y;
    commands.spawn(camera);

    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::BLACK,
            custom_size: Some(size),
            ..default()
        },
        transform: Transform::from_translation(center.extend(-10.0)),
        ..default()
    });

    // Ground strip along the bottom; touching it ends the round.
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::srgba(0.9, 0.1, 0.1, 0.3),
                custom_size: Some(Vec2::new(size.x, GROUND_THICKNESS)),
                ..default()
            },
            transform: Transform::from_xyz(center.x, GROUND_THICKNESS, 0.0),
            ..default()
        },
        RigidBody::Fixed,
        Collider::cuboid(size.x * 0.5, GROUND_THICKNESS * 0.5),
        Restitution::coefficient(0.0),
        Friction::coefficient(1.0),
        BodyTag::Ground,
        collision_groups(BodyTag::Ground),
    ));

    // Bouncy edge walls: left, right, top. The bottom stays open so the ball
    // can only leave the round via the ground.
    let walls = [
        (
            Vec2::new(0.0, center.y),
            Vec2::new(0.0, -center.y),
            Vec2::new(0.0, center.y),
        ),
        (
            Vec2::new(size.x, center.y),
            Vec2::new(0.0, -center.y),
            Vec2::new(0.0, center.y),
        ),
        (
            Vec2::new(center.x, size.y),
            Vec2::new(-center.x, 0.0),
            Vec2::new(center.x, 0.0),
        ),
    ];
    for (position, a, b) in walls {
        commands.spawn((
            TransformBundle::from(Transform::from_translation(position.extend(0.0))),
            RigidBody::Fixed,
            Collider::segment(a, b),
            Restitution::coefficient(0.95),
            Friction::coefficient(0.0),
            BodyTag::Edge,
            collision_groups(BodyTag::Edge),
        ));
    }

    // Thin visual indicators for the side walls.
    for x in [2.0, size.x - 2.0] {
        commands.spawn(SpriteBundle {
            sprite: Sprite {
                color: Color::srgba(0.2, 0.3, 0.9, 0.5),
                custom_size: Some(Vec2::new(4.0, size.y)),
                ..default()
            },
            transform: Transform::from_xyz(x, center.y, -5.0),
            ..default()
        });
    }
}

// The ball starts immovable; the first accepted swipe makes it dynamic.
fn spawn_ball(mut commands: Commands, tuning: Res<Tuning>) {
    let radius = tuning.ball_radius;
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::srgb(0.9, 0.15, 0.15),
                custom_size: Some(Vec2::splat(radius * 2.0)),
                ..default()
            },
            transform: Transform::from_translation(tuning.ball_spawn().extend(2.0)),
            ..default()
        },
        RigidBody::Fixed,
        Collider::ball(radius),
        Restitution::coefficient(0.95),
        Friction::coefficient(0.1),
        Damping {
            linear_damping: 0.1,
            angular_damping: 0.1,
        },
        Velocity::zero(),
        ExternalImpulse::default(),
        ActiveEvents::COLLISION_EVENTS,
        BodyTag::Ball,
        collision_groups(BodyTag::Ball),
        Ball,
    ));
}
