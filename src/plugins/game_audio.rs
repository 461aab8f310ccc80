use bevy::audio::{AudioBundle, AudioSource, PlaybackMode, PlaybackSettings, Volume};
use bevy::prelude::*;

use crate::plugins::particles::{BounceEvent, GameOverEvent, TargetHitEvent};

pub struct GameAudioPlugin;

#[derive(Resource, Clone)]
struct SfxHandles {
    bounce: Handle<AudioSource>,
    target_hit: Handle<AudioSource>,
    game_over: Handle<AudioSource>,
}

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_audio_assets)
            .add_systems(Update, play_event_sfx);
    }
}

// Asset-relative paths, expected under assets/.
const BOUNCE_SFX: &str = "audio/bounce.ogg";
const TARGET_HIT_SFX: &str = "audio/target_hit.ogg";
const GAME_OVER_SFX: &str = "audio/game_over.ogg";

fn load_audio_assets(mut commands: Commands, assets: Res<AssetServer>) {
    #[cfg(not(target_arch = "wasm32"))]
    for path in [BOUNCE_SFX, TARGET_HIT_SFX, GAME_OVER_SFX] {
        if !std::path::Path::new("assets").join(path).exists() {
            warn!("missing sound file assets/{path}; that cue will be silent");
        }
    }
    commands.insert_resource(SfxHandles {
        bounce: assets.load(BOUNCE_SFX),
        target_hit: assets.load(TARGET_HIT_SFX),
        game_over: assets.load(GAME_OVER_SFX),
    });
}

fn play_event_sfx(
    sfx: Option<Res<SfxHandles>>,
    mut commands: Commands,
    mut ev_bounce: EventReader<BounceEvent>,
    mut ev_hit: EventReader<TargetHitEvent>,
    mut ev_game_over: EventReader<GameOverEvent>,
) {
    let Some(sfx) = sfx else {
        return;
    };

    for _ in ev_bounce.read() {
        commands.spawn(AudioBundle {
            source: sfx.bounce.clone(),
            settings: PlaybackSettings {
                mode: PlaybackMode::Despawn,
                volume: Volume::new(0.8),
                ..default()
            },
        });
    }
    for _ in ev_hit.read() {
        commands.spawn(AudioBundle {
            source: sfx.target_hit.clone(),
            settings: PlaybackSettings {
                mode: PlaybackMode::Despawn,
                volume: Volume::new(0.9),
                ..default()
            },
        });
    }
    for _ in ev_game_over.read() {
        commands.spawn(AudioBundle {
            source: sfx.game_over.clone(),
            settings: PlaybackSettings {
                mode: PlaybackMode::Despawn,
                volume: Volume::new(1.0),
                ..default()
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sfx_paths_are_distinct_ogg_cues() {
        let paths = [BOUNCE_SFX, TARGET_HIT_SFX, GAME_OVER_SFX];
        for path in paths {
            assert!(path.starts_with("audio/"), "cue outside audio dir: {path}");
            assert!(path.ends_with(".ogg"), "cue not ogg: {path}");
        }
        assert_ne!(paths[0], paths[1]);
        assert_ne!(paths[1], paths[2]);
        assert_ne!(paths[0], paths[2]);
    }
}
