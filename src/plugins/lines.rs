// Player-drawn deflector segments: creation, capacity eviction, timed decay.
//
// Two removal triggers act on the same collection (lifetime decay and FIFO
// eviction past the capacity bound). The ActiveLines deque is the single
// owner of despawn decisions: an entry is popped exactly once and its despawn
// is existence-guarded, so neither trigger can double-remove a segment the
// other already took.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::VecDeque;

use crate::plugins::categories::{collision_groups, BodyTag};
use crate::plugins::core_sim::{SimState, Tuning};

#[derive(Component)]
pub struct LineSegment {
    pub spawned_at: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct LineEntry {
    pub entity: Entity,
    pub spawned_at: f32,
}

/// Tracked segments in insertion order (oldest at the front).
#[derive(Resource, Default)]
pub struct ActiveLines {
    entries: VecDeque<LineEntry>,
}

impl ActiveLines {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entities(&self) -> Vec<Entity> {
        self.entries.iter().map(|e| e.entity).collect()
    }

    pub fn oldest(&self) -> Option<&LineEntry> {
        self.entries.front()
    }
}

/// Validate a swipe and spawn a static deflector segment for it.
///
/// Rejects swipes of length <= the minimum threshold with no side effects.
/// After insertion the oldest surviving segment is evicted while the count
/// exceeds the capacity bound, regardless of its remaining lifetime.
pub fn try_spawn_line(
    commands: &mut Commands,
    active: &mut ActiveLines,
    tuning: &Tuning,
    start: Vec2,
    end: Vec2,
    now: f32,
) -> bool {
    let delta = end - start;
    let length = delta.length();
    if length <= tuning.min_swipe_length {
        return false;
    }

    let angle = delta.y.atan2(delta.x);
    let midpoint = start + delta * 0.5;
    let entity = commands
        .spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::WHITE,
                    custom_size: Some(Vec2::new(length, tuning.line_thickness)),
                    ..default()
                },
                transform: Transform::from_translation(midpoint.extend(1.0))
                    .with_rotation(Quat::from_rotation_z(angle)),
                ..default()
            },
            RigidBody::Fixed,
            Collider::cuboid(length * 0.5, tuning.line_thickness * 0.5),
            Restitution::coefficient(0.95),
            Friction::coefficient(0.0),
            BodyTag::Line,
            collision_groups(BodyTag::Line),
            LineSegment { spawned_at: now },
        ))
        .id();
    active.entries.push_back(LineEntry {
        entity,
        spawned_at: now,
    });

    while active.entries.len() > tuning.max_line_count {
        if let Some(oldest) = active.entries.pop_front() {
            despawn_guarded(commands, oldest.entity);
        }
    }
    true
}

/// Detach and forget every tracked segment. Used on round reset.
pub fn clear_lines(commands: &mut Commands, active: &mut ActiveLines) {
    while let Some(entry) = active.entries.pop_front() {
        despawn_guarded(commands, entry.entity);
    }
}

fn despawn_guarded(commands: &mut Commands, entity: Entity) {
    if let Some(entity_commands) = commands.get_entity(entity) {
        entity_commands.despawn_recursive();
    }
}

pub struct LinesPlugin;
impl Plugin for LinesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveLines::default())
            .add_systems(
                FixedUpdate,
                decay_lines.after(crate::plugins::core_sim::tick_state),
            )
            .add_systems(Update, fade_lines);
    }
}

// Lifetime decay. Lifetime is uniform and insertion is time-ordered, so the
// expired entries are always a prefix of the deque.
fn decay_lines(
    mut commands: Commands,
    mut active: ResMut<ActiveLines>,
    tuning: Res<Tuning>,
    sim: Res<SimState>,
) {
    while let Some(front) = active.entries.front() {
        if sim.elapsed_seconds - front.spawned_at < tuning.line_lifetime {
            break;
        }
        let Some(entry) = active.entries.pop_front() else {
            break;
        };
        despawn_guarded(&mut commands, entry.entity);
    }
}

// Visual fade over the segment lifetime.
fn fade_lines(
    sim: Res<SimState>,
    tuning: Res<Tuning>,
    mut q: Query<(&LineSegment, &mut Sprite)>,
) {
    for (segment, mut sprite) in &mut q {
        let age = sim.elapsed_seconds - segment.spawned_at;
        let alpha = (1.0 - age / tuning.line_lifetime).clamp(0.0, 1.0);
        sprite.color.set_alpha(alpha);
    }
}
