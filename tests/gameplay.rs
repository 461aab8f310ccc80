// Headless round-lifecycle tests: swipe handling, line lifecycle, target
// scoring, contact dispatch, reset. Contacts are injected as BallContact
// events, the same payload the rapier bridge produces.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalImpulse, RigidBody, Velocity};
use swipe_drop::prelude::*;

fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CoreSimPlugin)
        .add_plugins(ParticlePlugin)
        .add_plugins(ArenaPlugin)
        .add_plugins(LinesPlugin)
        .add_plugins(TargetsPlugin)
        .add_plugins(ContactsPlugin)
        .add_plugins(GameStatePlugin)
        .add_plugins(BallPlugin);
    app
}

fn ball_entity(app: &mut App) -> Entity {
    let mut q = app.world_mut().query_filtered::<Entity, With<Ball>>();
    q.single(app.world())
}

fn tagged_entity(app: &mut App, tag: BodyTag) -> Entity {
    let mut q = app.world_mut().query::<(Entity, &BodyTag)>();
    q.iter(app.world())
        .find(|(_, t)| **t == tag)
        .map(|(e, _)| e)
        .expect("no entity with requested tag")
}

fn swipe(app: &mut App, start: Vec2, end: Vec2) {
    app.world_mut().send_event(SwipeEvent { start, end });
    app.update();
}

fn ground_contact(app: &mut App) {
    let ground = tagged_entity(app, BodyTag::Ground);
    app.world_mut().send_event(BallContact {
        other: ground,
        tag: BodyTag::Ground,
        point: Vec2::new(200.0, 10.0),
        normal: Vec2::Y,
    });
    app.update();
}

#[test]
fn short_swipe_is_rejected() {
    let mut app = build_app();
    app.update();
    swipe(&mut app, Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0));
    assert_eq!(app.world().resource::<ActiveLines>().count(), 0);
    assert_eq!(app.world().resource::<Score>().value(), 0);
    assert_eq!(
        app.world().resource::<RoundState>().phase,
        RoundPhase::NotStarted
    );
}

#[test]
fn first_swipe_starts_the_round() {
    let mut app = build_app();
    app.update();
    swipe(&mut app, Vec2::new(100.0, 100.0), Vec2::new(100.0, 200.0));

    assert_eq!(app.world().resource::<ActiveLines>().count(), 1);
    assert_eq!(app.world().resource::<Score>().value(), 1);
    assert_eq!(
        app.world().resource::<RoundState>().phase,
        RoundPhase::Playing
    );

    let ball = ball_entity(&mut app);
    assert_eq!(
        *app.world().get::<RigidBody>(ball).unwrap(),
        RigidBody::Dynamic
    );
    let impulse = app.world().get::<ExternalImpulse>(ball).unwrap();
    assert_eq!(impulse.impulse, Vec2::new(0.0, -5.0));
}

#[test]
fn line_capacity_evicts_oldest_first() {
    let mut app = build_app();
    app.update();

    let mut created = Vec::new();
    for i in 0..25 {
        let y = 100.0 + i as f32;
        swipe(&mut app, Vec2::new(50.0, y), Vec2::new(200.0, y));
        let entities = app.world().resource::<ActiveLines>().entities();
        assert!(entities.len() <= 20, "capacity bound exceeded");
        created.push(*entities.last().unwrap());
    }

    let survivors = app.world().resource::<ActiveLines>().entities();
    assert_eq!(survivors.len(), 20);
    assert_eq!(survivors, created[5..].to_vec());
    // Evicted segments are detached from the world.
    for evicted in &created[..5] {
        assert!(app.world().get_entity(*evicted).is_none());
    }
}

#[test]
fn lines_decay_after_lifetime() {
    let mut app = build_app();
    app.update();
    swipe(&mut app, Vec2::new(50.0, 100.0), Vec2::new(200.0, 100.0));

    let (entity, spawned_at) = {
        let active = app.world().resource::<ActiveLines>();
        let entry = active.oldest().unwrap();
        (entry.entity, entry.spawned_at)
    };

    // Step the fixed clock just short of the lifetime: still alive.
    while app.world().resource::<SimState>().elapsed_seconds < spawned_at + 2.9 {
        app.world_mut().run_schedule(FixedUpdate);
    }
    assert_eq!(app.world().resource::<ActiveLines>().count(), 1);

    // Past the lifetime: removed from tracking and from the world.
    while app.world().resource::<SimState>().elapsed_seconds < spawned_at + 3.1 {
        app.world_mut().run_schedule(FixedUpdate);
    }
    assert_eq!(app.world().resource::<ActiveLines>().count(), 0);
    assert!(app.world().get_entity(entity).is_none());
}

#[test]
fn target_awards_points_once() {
    let mut app = build_app();
    app.update();

    let target = app.world().resource::<TargetRegistry>().targets()[0];
    let contact = BallContact {
        other: target,
        tag: BodyTag::Target,
        point: Vec2::new(20.0, 175.0),
        normal: Vec2::X,
    };

    app.world_mut().send_event(contact);
    app.update();
    assert_eq!(app.world().resource::<Score>().value(), 5);
    assert!(app.world().resource::<TargetRegistry>().is_hit(target));

    app.world_mut().send_event(contact);
    app.update();
    assert_eq!(app.world().resource::<Score>().value(), 5);
    assert_eq!(app.world().resource::<TargetRegistry>().hit_count(), 1);
}

#[derive(Resource, Default)]
struct GameOverCount(u32);

fn count_game_overs(mut count: ResMut<GameOverCount>, mut ev: EventReader<GameOverEvent>) {
    count.0 += ev.read().count() as u32;
}

#[test]
fn ground_contact_ends_round_once() {
    let mut app = build_app();
    app.init_resource::<GameOverCount>()
        .add_systems(Update, count_game_overs);
    app.update();
    swipe(&mut app, Vec2::new(100.0, 100.0), Vec2::new(100.0, 200.0));

    ground_contact(&mut app);
    app.update(); // let the counter drain the event
    assert_eq!(
        app.world().resource::<RoundState>().phase,
        RoundPhase::GameOver
    );
    let ball = ball_entity(&mut app);
    assert_eq!(
        *app.world().get::<RigidBody>(ball).unwrap(),
        RigidBody::Fixed
    );
    assert_eq!(app.world().get::<Velocity>(ball).unwrap().linvel, Vec2::ZERO);
    assert_eq!(app.world().resource::<GameOverCount>().0, 1);

    // Redundant ground contact while already over: no second trigger.
    ground_contact(&mut app);
    app.update();
    assert_eq!(app.world().resource::<GameOverCount>().0, 1);
}

#[test]
fn tap_after_game_over_resets_everything() {
    let mut app = build_app();
    app.update();

    swipe(&mut app, Vec2::new(100.0, 100.0), Vec2::new(100.0, 200.0));
    let target = app.world().resource::<TargetRegistry>().targets()[0];
    app.world_mut().send_event(BallContact {
        other: target,
        tag: BodyTag::Target,
        point: Vec2::new(20.0, 175.0),
        normal: Vec2::X,
    });
    app.update();
    ground_contact(&mut app);
    assert_eq!(app.world().resource::<Score>().value(), 6);

    app.world_mut().send_event(RestartTapEvent);
    app.update();

    assert_eq!(
        app.world().resource::<RoundState>().phase,
        RoundPhase::NotStarted
    );
    assert_eq!(app.world().resource::<Score>().value(), 0);
    assert_eq!(app.world().resource::<ActiveLines>().count(), 0);

    let registry = app.world().resource::<TargetRegistry>();
    assert_eq!(registry.target_count(), 6);
    assert_eq!(registry.hit_count(), 0);
    let fresh_targets = registry.targets().to_vec();
    for target in fresh_targets {
        assert!(app.world().get_entity(target).is_some());
    }

    let ball = ball_entity(&mut app);
    let tuning = app.world().resource::<Tuning>().clone();
    let transform = app.world().get::<Transform>(ball).unwrap();
    assert_eq!(transform.translation.truncate(), tuning.ball_spawn());
    assert_eq!(
        *app.world().get::<RigidBody>(ball).unwrap(),
        RigidBody::Fixed
    );
    assert_eq!(app.world().get::<Velocity>(ball).unwrap().linvel, Vec2::ZERO);
}

#[test]
fn escaped_ball_is_clamped_back_inside() {
    let mut app = build_app();
    app.insert_resource(Tuning {
        play_width: 300.0,
        ..Tuning::default()
    });
    app.update();

    let ball = ball_entity(&mut app);
    app.world_mut()
        .get_mut::<Transform>(ball)
        .unwrap()
        .translation
        .x = -30.0;
    app.world_mut().get_mut::<Velocity>(ball).unwrap().linvel.x = -50.0;

    app.world_mut().run_schedule(FixedUpdate);

    let transform = app.world().get::<Transform>(ball).unwrap();
    assert_eq!(transform.translation.x, 20.0);
    assert_eq!(app.world().get::<Velocity>(ball).unwrap().linvel.x, 50.0);
}
