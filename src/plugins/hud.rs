// Score label, floating bonus labels, and the game-over banner.

use bevy::prelude::*;

use crate::plugins::game_state::Score;
use crate::plugins::particles::{GameOverEvent, TargetHitEvent};

#[derive(Component)]
pub struct ScoreLabel;

#[derive(Component)]
pub struct GameOverLabel;

#[derive(Component)]
struct BonusLabel {
    age: f32,
}

const BONUS_LABEL_SECONDS: f32 = 0.8;
const BONUS_LABEL_RISE: f32 = 50.0;

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_score_label).add_systems(
            Update,
            (
                update_score_label,
                show_game_over,
                spawn_bonus_labels,
                float_bonus_labels,
            ),
        );
    }
}

fn spawn_score_label(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_section(
            "Score: 0",
            TextStyle {
                font_size: 24.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(8.0),
            ..default()
        }),
        ScoreLabel,
    ));
}

fn update_score_label(score: Res<Score>, mut q_text: Query<&mut Text, With<ScoreLabel>>) {
    if !score.is_changed() {
        return;
    }
    if let Ok(mut text) = q_text.get_single_mut() {
        text.sections[0].value = format!("Score: {}", score.value());
    }
}

// One banner per game over; the round reset despawns it.
fn show_game_over(
    mut commands: Commands,
    mut ev_over: EventReader<GameOverEvent>,
    q_existing: Query<(), With<GameOverLabel>>,
) {
    for _ in ev_over.read() {
        if !q_existing.is_empty() {
            continue;
        }
        commands
            .spawn((
                NodeBundle {
                    style: Style {
                        position_type: PositionType::Absolute,
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    ..default()
                },
                GameOverLabel,
            ))
            .with_children(|parent| {
                parent.spawn(
                    TextBundle::from_section(
                        "Game Over! Tap to Restart",
                        TextStyle {
                            font_size: 30.0,
                            color: Color::WHITE,
                            ..default()
                        },
                    )
                    .with_background_color(Color::srgba(0.0, 0.0, 0.0, 0.7)),
                );
            });
    }
}

fn spawn_bonus_labels(mut commands: Commands, mut ev_hit: EventReader<TargetHitEvent>) {
    for e in ev_hit.read() {
        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    format!("+{}", e.points),
                    TextStyle {
                        font_size: 20.0,
                        color: Color::srgb(0.95, 0.85, 0.1),
                        ..default()
                    },
                ),
                transform: Transform::from_translation(e.pos.extend(11.0)),
                ..default()
            },
            BonusLabel { age: 0.0 },
        ));
    }
}

fn float_bonus_labels(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Transform, &mut Text, &mut BonusLabel)>,
) {
    let dt = time.delta_seconds();
    for (entity, mut transform, mut text, mut label) in &mut q {
        label.age += dt;
        if label.age >= BONUS_LABEL_SECONDS {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        transform.translation.y += BONUS_LABEL_RISE / BONUS_LABEL_SECONDS * dt;
        let alpha = 1.0 - label.age / BONUS_LABEL_SECONDS;
        for section in text.sections.iter_mut() {
            section.style.color.set_alpha(alpha);
        }
    }
}
