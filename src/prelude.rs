//! Convenience re-exports for frequently used types & plugins.
pub use crate::plugins::arena::ArenaPlugin;
pub use crate::plugins::ball::{Ball, BallPlugin};
pub use crate::plugins::categories::{collision_groups, BodyTag};
pub use crate::plugins::contacts::{classify, BallContact, ContactAction, ContactsPlugin};
pub use crate::plugins::core_sim::{CoreSimPlugin, SimState, Tuning};
pub use crate::plugins::game_audio::GameAudioPlugin;
pub use crate::plugins::game_state::{GameStatePlugin, RoundPhase, RoundState, Score};
pub use crate::plugins::hud::{GameOverLabel, HudPlugin};
pub use crate::plugins::lines::{ActiveLines, LineSegment, LinesPlugin};
pub use crate::plugins::particles::{BounceEvent, GameOverEvent, ParticlePlugin, TargetHitEvent};
pub use crate::plugins::swipe::{RestartTapEvent, SwipeEvent, SwipePlugin};
pub use crate::plugins::targets::{Target, TargetRegistry, TargetsPlugin};
