// Physics body roles & collision filtering.
//
// Every gameplay body carries exactly one BodyTag; contact classification
// matches on tag pairs instead of bitmask arithmetic. The rapier collision
// groups below mirror the tags so the broad phase only reports the pairs the
// game cares about (everything interacts with the ball, nothing else).

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyTag {
    Ball,
    Line,
    Edge,
    Ground,
    Target,
}

pub const BALL_GROUP: Group = Group::GROUP_1;
pub const LINE_GROUP: Group = Group::GROUP_2;
pub const EDGE_GROUP: Group = Group::GROUP_3;
pub const GROUND_GROUP: Group = Group::GROUP_4;
pub const TARGET_GROUP: Group = Group::GROUP_5;

/// Membership/filter pair for a body of the given role.
pub fn collision_groups(tag: BodyTag) -> CollisionGroups {
    match tag {
        BodyTag::Ball => CollisionGroups::new(
            BALL_GROUP,
            LINE_GROUP
                .union(EDGE_GROUP)
                .union(GROUND_GROUP)
                .union(TARGET_GROUP),
        ),
        BodyTag::Line => CollisionGroups::new(LINE_GROUP, BALL_GROUP),
        BodyTag::Edge => CollisionGroups::new(EDGE_GROUP, BALL_GROUP),
        BodyTag::Ground => CollisionGroups::new(GROUND_GROUP, BALL_GROUP),
        BodyTag::Target => CollisionGroups::new(TARGET_GROUP, BALL_GROUP),
    }
}
