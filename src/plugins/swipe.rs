// Pointer boundary: turns mouse/touch press-release pairs into world-space
// swipe events, and presses during game over into restart taps.
//
// Event types live here; registration happens in GameStatePlugin, the
// consumer side.

use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::plugins::game_state::{RoundPhase, RoundState};

/// One completed swipe gesture, in play-area coordinates.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwipeEvent {
    pub start: Vec2,
    pub end: Vec2,
}

/// A tap delivered while the round is over.
#[derive(Event, Debug, Clone, Copy)]
pub struct RestartTapEvent;

#[derive(Default)]
struct DragState {
    mouse_start: Option<Vec2>,
    touch: Option<(u64, Vec2)>,
}

pub struct SwipePlugin;
impl Plugin for SwipePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, track_pointer);
    }
}

fn track_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    mut ev_touch: EventReader<TouchInput>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform)>,
    round: Res<RoundState>,
    mut drag: Local<DragState>,
    mut ev_swipe: EventWriter<SwipeEvent>,
    mut ev_restart: EventWriter<RestartTapEvent>,
) {
    let Ok((camera, camera_transform)) = q_camera.get_single() else {
        return;
    };
    let to_world = |screen: Vec2| camera.viewport_to_world_2d(camera_transform, screen);

    // Touch (mobile)
    for touch in ev_touch.read() {
        match touch.phase {
            TouchPhase::Started => {
                if round.phase == RoundPhase::GameOver {
                    ev_restart.send(RestartTapEvent);
                } else if drag.touch.is_none() {
                    if let Some(start) = to_world(touch.position) {
                        drag.touch = Some((touch.id, start));
                    }
                }
            }
            TouchPhase::Ended => {
                if let Some((id, start)) = drag.touch {
                    if id == touch.id {
                        drag.touch = None;
                        if let Some(end) = to_world(touch.position) {
                            ev_swipe.send(SwipeEvent { start, end });
                        }
                    }
                }
            }
            TouchPhase::Canceled => {
                if drag.touch.map(|(id, _)| id) == Some(touch.id) {
                    drag.touch = None;
                }
            }
            TouchPhase::Moved => {}
        }
    }

    // Mouse (desktop)
    let cursor_world = q_window
        .get_single()
        .ok()
        .and_then(|w| w.cursor_position())
        .and_then(to_world);

    if buttons.just_pressed(MouseButton::Left) {
        if round.phase == RoundPhase::GameOver {
            ev_restart.send(RestartTapEvent);
        } else {
            drag.mouse_start = cursor_world;
        }
    }
    if buttons.just_released(MouseButton::Left) {
        if let (Some(start), Some(end)) = (drag.mouse_start.take(), cursor_world) {
            ev_swipe.send(SwipeEvent { start, end });
        }
    }
}
