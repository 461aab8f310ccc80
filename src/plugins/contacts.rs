// Contact classification & dispatch.
//
// The rapier bridge turns begin-contact events between tagged bodies into
// BallContact events carrying the other body's tag, the contact point, and a
// normal oriented away from the touched surface. Classification is a closed
// enum match over tag pairs; exactly one action fires per contact.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::plugins::ball::Ball;
use crate::plugins::categories::BodyTag;
use crate::plugins::core_sim::Tuning;
use crate::plugins::game_state::{RoundPhase, RoundState, Score};
use crate::plugins::particles::{BounceEvent, GameOverEvent, TargetHitEvent};
use crate::plugins::targets::{TargetFade, TargetRegistry};

/// A begin-contact between the ball and another tagged body.
#[derive(Event, Debug, Clone, Copy)]
pub struct BallContact {
    pub other: Entity,
    pub tag: BodyTag,
    pub point: Vec2,
    /// Unit normal pointing from the touched body toward the ball.
    pub normal: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    EndRound,
    StrikeTarget,
    Bounce,
}

/// Map a pair of body tags to the gameplay action it triggers, if any.
/// Tag pairs are mutually exclusive by construction: a body carries exactly
/// one tag.
pub fn classify(a: BodyTag, b: BodyTag) -> Option<ContactAction> {
    use BodyTag::*;
    let other = match (a, b) {
        (Ball, other) => other,
        (other, Ball) => other,
        _ => return None,
    };
    match other {
        Ground => Some(ContactAction::EndRound),
        Target => Some(ContactAction::StrikeTarget),
        Line | Edge => Some(ContactAction::Bounce),
        Ball => None,
    }
}

pub struct ContactsPlugin;
impl Plugin for ContactsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>()
            .add_event::<BallContact>()
            .add_systems(
                Update,
                (collect_ball_contacts, dispatch_ball_contacts).chain(),
            );
    }
}

// Bridge from rapier collision events to tagged gameplay contacts. The
// contact normal comes from the live contact manifold when available, with a
// center-to-center fallback.
fn collect_ball_contacts(
    mut ev_collisions: EventReader<CollisionEvent>,
    rapier: Option<Res<RapierContext>>,
    tuning: Res<Tuning>,
    q_bodies: Query<(&BodyTag, &GlobalTransform)>,
    mut ev_contacts: EventWriter<BallContact>,
) {
    for ev in ev_collisions.read() {
        let CollisionEvent::Started(e1, e2, _flags) = ev else {
            continue;
        };
        let (Ok((tag1, t1)), Ok((tag2, t2))) = (q_bodies.get(*e1), q_bodies.get(*e2)) else {
            continue;
        };
        let (ball, other, other_tag, ball_pos, other_pos) = match (tag1, tag2) {
            (BodyTag::Ball, _) => (*e1, *e2, *tag2, t1, t2),
            (_, BodyTag::Ball) => (*e2, *e1, *tag1, t2, t1),
            _ => continue,
        };

        let ball_pos = ball_pos.translation().truncate();
        let other_pos = other_pos.translation().truncate();
        let mut normal = (ball_pos - other_pos).normalize_or_zero();
        let mut point = (ball_pos + other_pos) * 0.5;

        if let Some(rapier) = rapier.as_ref() {
            if let Some(pair) = rapier.contact_pair(ball, other) {
                if let Some((manifold, _contact)) = pair.find_deepest_contact() {
                    // Manifold normals point from the pair's first collider
                    // to the second; orient toward the ball.
                    normal = if pair.collider1() == ball {
                        -manifold.normal()
                    } else {
                        manifold.normal()
                    };
                    point = ball_pos - normal * tuning.ball_radius;
                }
            }
        }

        ev_contacts.send(BallContact {
            other,
            tag: other_tag,
            point,
            normal,
        });
    }
}

fn dispatch_ball_contacts(
    mut commands: Commands,
    mut ev_contacts: EventReader<BallContact>,
    mut round: ResMut<RoundState>,
    mut score: ResMut<Score>,
    mut registry: ResMut<TargetRegistry>,
    tuning: Res<Tuning>,
    mut q_ball: Query<(Entity, &mut Velocity, &mut ExternalImpulse), With<Ball>>,
    q_transforms: Query<&GlobalTransform>,
    mut ev_bounce: EventWriter<BounceEvent>,
    mut ev_hit: EventWriter<TargetHitEvent>,
    mut ev_over: EventWriter<GameOverEvent>,
) {
    let Ok((ball, mut velocity, mut impulse)) = q_ball.get_single_mut() else {
        return;
    };
    for contact in ev_contacts.read() {
        match classify(BodyTag::Ball, contact.tag) {
            Some(ContactAction::EndRound) => {
                // Idempotent: redundant ground contacts after game over are
                // no-ops.
                if round.phase == RoundPhase::GameOver {
                    continue;
                }
                round.phase = RoundPhase::GameOver;
                velocity.linvel = Vec2::ZERO;
                velocity.angvel = 0.0;
                impulse.impulse = Vec2::ZERO;
                impulse.torque_impulse = 0.0;
                commands.entity(ball).insert(RigidBody::Fixed);
                info!("game over: ball touched the ground");
                ev_over.send(GameOverEvent { pos: contact.point });
            }
            Some(ContactAction::StrikeTarget) => {
                let Some(points) = registry.register_hit(contact.other, tuning.target_bonus_points)
                else {
                    continue;
                };
                score.award(points);
                let pos = q_transforms
                    .get(contact.other)
                    .map(|t| t.translation().truncate())
                    .unwrap_or(contact.point);
                ev_hit.send(TargetHitEvent { pos, points });
                commands.entity(contact.other).insert(TargetFade::default());
            }
            Some(ContactAction::Bounce) => {
                // Fixed supplemental impulse along the contact normal to
                // counteract restitution energy loss.
                impulse.impulse += contact.normal * tuning.bounce_boost;
                ev_bounce.send(BounceEvent { pos: contact.point });
            }
            None => {}
        }
    }
}
