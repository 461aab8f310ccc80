// Bonus targets: fixed layout, per-round hit deduplication, reset.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

use crate::plugins::categories::{collision_groups, BodyTag};
use crate::plugins::core_sim::Tuning;

#[derive(Component)]
pub struct Target;

// Idle scale pulse so targets read as pickups.
#[derive(Component)]
pub struct TargetPulse {
    pub phase: f32,
}

/// Hit feedback: flash, shrink, despawn. Presentation only; scoring has
/// already happened by the time this component is attached.
#[derive(Component, Default)]
pub struct TargetFade {
    pub age: f32,
}

const FADE_FLASH_SECONDS: f32 = 0.2;
const FADE_TOTAL_SECONDS: f32 = 0.5;

/// Owns the target entity list and the per-round hit-set. Membership is keyed
/// by entity identity; a despawned target is never re-queried because rapier
/// stops reporting contacts for it.
#[derive(Resource, Default)]
pub struct TargetRegistry {
    targets: Vec<Entity>,
    hit: HashSet<Entity>,
}

impl TargetRegistry {
    /// Returns the bonus to award, or None when the target was already hit
    /// this round (no side effects in that case).
    pub fn register_hit(&mut self, target: Entity, bonus: u32) -> Option<u32> {
        if self.hit.contains(&target) {
            return None;
        }
        self.hit.insert(target);
        Some(bonus)
    }

    pub fn is_hit(&self, target: Entity) -> bool {
        self.hit.contains(&target)
    }

    pub fn targets(&self) -> &[Entity] {
        &self.targets
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn hit_count(&self) -> usize {
        self.hit.len()
    }
}

/// Six fixed positions: three per side wall at 25%/50%/75% of play height.
pub fn layout_positions(tuning: &Tuning) -> [Vec2; 6] {
    let inset = tuning.target_edge_inset;
    let size = tuning.play_size();
    [
        Vec2::new(inset, size.y * 0.25),
        Vec2::new(inset, size.y * 0.5),
        Vec2::new(inset, size.y * 0.75),
        Vec2::new(size.x - inset, size.y * 0.25),
        Vec2::new(size.x - inset, size.y * 0.5),
        Vec2::new(size.x - inset, size.y * 0.75),
    ]
}

pub fn spawn_targets(commands: &mut Commands, registry: &mut TargetRegistry, tuning: &Tuning) {
    for (i, position) in layout_positions(tuning).into_iter().enumerate() {
        let entity = commands
            .spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: Color::srgb(0.95, 0.85, 0.1),
                        custom_size: Some(Vec2::splat(tuning.target_radius * 2.0)),
                        ..default()
                    },
                    transform: Transform::from_translation(position.extend(5.0)),
                    ..default()
                },
                RigidBody::Fixed,
                Collider::ball(tuning.target_radius),
                Restitution::coefficient(1.0),
                BodyTag::Target,
                collision_groups(BodyTag::Target),
                Target,
                TargetPulse {
                    phase: i as f32 * 0.7,
                },
            ))
            .id();
        registry.targets.push(entity);
    }
}

/// Clears the hit-set, removes surviving targets, and rebuilds the full
/// layout. Callable any number of times; always yields 6 fresh unhit targets.
pub fn reset_targets(commands: &mut Commands, registry: &mut TargetRegistry, tuning: &Tuning) {
    registry.hit.clear();
    for entity in registry.targets.drain(..) {
        // Hit targets may already be gone via the fade animation.
        if let Some(entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn_recursive();
        }
    }
    spawn_targets(commands, registry, tuning);
}

pub struct TargetsPlugin;
impl Plugin for TargetsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TargetRegistry::default())
            .add_systems(Startup, setup_targets)
            .add_systems(Update, (pulse_targets, animate_target_fade));
    }
}

fn setup_targets(
    mut commands: Commands,
    mut registry: ResMut<TargetRegistry>,
    tuning: Res<Tuning>,
) {
    spawn_targets(&mut commands, &mut registry, &tuning);
}

fn pulse_targets(
    time: Res<Time>,
    mut q: Query<(&mut Transform, &mut TargetPulse), Without<TargetFade>>,
) {
    for (mut transform, mut pulse) in &mut q {
        pulse.phase += time.delta_seconds();
        let scale = 1.0 + 0.1 * (pulse.phase * std::f32::consts::TAU).sin();
        transform.scale = Vec3::splat(scale);
    }
}

fn animate_target_fade(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Transform, &mut Sprite, &mut TargetFade)>,
) {
    for (entity, mut transform, mut sprite, mut fade) in &mut q {
        fade.age += time.delta_seconds();
        if fade.age < FADE_FLASH_SECONDS {
            // Two quick alpha dips.
            let t = fade.age / FADE_FLASH_SECONDS;
            let alpha = if (t * 4.0) as u32 % 2 == 0 { 0.2 } else { 1.0 };
            sprite.color.set_alpha(alpha);
        } else if fade.age < FADE_TOTAL_SECONDS {
            let t = (fade.age - FADE_FLASH_SECONDS) / (FADE_TOTAL_SECONDS - FADE_FLASH_SECONDS);
            transform.scale = Vec3::splat((1.0 - t).max(0.1));
            sprite.color.set_alpha(1.0 - t);
        } else {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_hit_awards_once() {
        let mut registry = TargetRegistry::default();
        let target = Entity::from_raw(1);
        assert_eq!(registry.register_hit(target, 5), Some(5));
        assert_eq!(registry.register_hit(target, 5), None);
        assert_eq!(registry.hit_count(), 1);
    }

    #[test]
    fn distinct_targets_award_independently() {
        let mut registry = TargetRegistry::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        assert_eq!(registry.register_hit(a, 5), Some(5));
        assert_eq!(registry.register_hit(b, 5), Some(5));
        assert_eq!(registry.hit_count(), 2);
    }
}
