use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use swipe_drop::prelude::*;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Swipe Drop".into(),
                resolution: (400.0, 700.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))
        .add_plugins(CoreSimPlugin)     // timing + tuning
        .add_plugins(ParticlePlugin)    // feedback events & sparks (register events before consumers)
        .add_plugins(GameAudioPlugin)   // sfx
        .add_plugins(ArenaPlugin)       // camera, ground, walls, ball
        .add_plugins(SwipePlugin)       // pointer -> swipe events
        .add_plugins(LinesPlugin)       // deflector segment lifecycle
        .add_plugins(TargetsPlugin)     // bonus targets
        .add_plugins(ContactsPlugin)    // contact classification & dispatch
        .add_plugins(GameStatePlugin)   // round state machine & scoring
        .add_plugins(BallPlugin)        // out-of-bounds clamp
        .add_plugins(HudPlugin)         // labels
        .run();
}
