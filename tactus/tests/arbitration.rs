use std::sync::Arc;
use tactus::{
    Behavior, GestureState, Notification, Orchestrator, RecognizerId, RelationPolicy,
    recognizers::{Manual, NativeView, NativeViewConfig},
    testing::{TouchSequence, entered_states, states_of},
};

mod common;
use common::{
    INNER, LEFT, OUTER, RIGHT, crowded, overlapping_active, pan, pinch, play, rotation, scene,
    split_scene, tap,
};

use GestureState::{Active, Began, Cancelled, End, Failed, Undetermined};

fn native(id: u32, config: NativeViewConfig) -> tactus::GestureRecognizer<Behavior> {
    Behavior::from(NativeView::new(config)).into_recognizer(RecognizerId(id))
}

#[test]
fn quick_press_is_a_tap() {
    let tree = scene();
    let (mut o, _) = crowded();

    let mut t = TouchSequence::new().with_step_ms(50);
    let out = play(&mut o, &tree, &[t.down(0, 100.0, 100.0), t.up(0)]);

    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began, Active, End]);
    for loser in 2..=4 {
        assert_eq!(
            entered_states(&out, RecognizerId(loser)),
            vec![Began, Cancelled],
            "recognizer {loser}"
        );
    }
}

#[test]
fn drag_is_a_pan() {
    let tree = scene();
    let (mut o, handles) = crowded();

    let mut t = TouchSequence::new();
    let out = play(
        &mut o,
        &tree,
        &[
            t.down(0, 100.0, 100.0),
            t.move_to(0, 130.0, 100.0),
            t.move_to(0, 150.0, 100.0),
            t.up(0),
        ],
    );

    assert_eq!(entered_states(&out, RecognizerId(2)), vec![Began, Active, End]);
    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began, Cancelled]);
    assert_eq!(entered_states(&out, RecognizerId(3)), vec![Began, Cancelled]);
    assert_eq!(entered_states(&out, RecognizerId(4)), vec![Began, Cancelled]);
    assert!(o.is_active(handles[1]));

    let updates: Vec<_> = out
        .iter()
        .filter_map(|n| match n {
            Notification::Update { recognizer, event } => Some((*recognizer, event.action)),
            _ => None,
        })
        .collect();
    assert_eq!(
        updates,
        vec![
            (RecognizerId(2), tactus::PointerAction::Move),
            (RecognizerId(2), tactus::PointerAction::Move),
        ]
    );
}

#[test]
fn outer_pan_waits_for_inner_tap_to_fail() {
    let tree = scene();
    let mut o = Orchestrator::new();
    let policy = RelationPolicy::builder().wait_for(RecognizerId(1)).build();
    let b = o
        .attach(pan(2).with_policy(Arc::new(policy)), OUTER)
        .unwrap();
    let a = o
        .attach(tap(1).with_cancel_when_outside(true), INNER)
        .unwrap();

    let mut t = TouchSequence::new();
    let mut out = play(&mut o, &tree, &[t.down(0, 60.0, 60.0), t.move_to(0, 80.0, 60.0)]);
    assert!(o.is_awaiting(b));
    assert_eq!(o.state(b), Some(Began));
    assert_eq!(o.state(a), Some(Began));

    out.extend(o.dispatch(&tree, &t.move_to(0, 200.0, 60.0)));
    assert_eq!(states_of(&out, RecognizerId(1)), vec![(Began, Undetermined), (Failed, Began)]);
    assert_eq!(states_of(&out, RecognizerId(2)), vec![(Began, Undetermined), (Active, Began)]);
    assert!(o.is_active(b));

    out.extend(play(&mut o, &tree, &[t.move_to(0, 220.0, 60.0), t.up(0)]));
    assert_eq!(entered_states(&out, RecognizerId(2)), vec![Began, Active, End]);
}

#[test]
fn outer_pan_loses_when_inner_tap_succeeds() {
    let tree = scene();
    let mut o = Orchestrator::new();
    let policy = RelationPolicy::builder().wait_for(RecognizerId(1)).build();
    o.attach(pan(2).with_policy(Arc::new(policy)), OUTER).unwrap();
    o.attach(tap(1), INNER).unwrap();

    let mut t = TouchSequence::new();
    let out = play(
        &mut o,
        &tree,
        &[t.down(0, 60.0, 60.0), t.move_to(0, 80.0, 60.0), t.up(0)],
    );

    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began, Active, End]);
    assert_eq!(entered_states(&out, RecognizerId(2)), vec![Began, Cancelled]);
}

#[test]
fn blocking_declared_on_the_other_side() {
    let tree = scene();
    let mut o = Orchestrator::new();
    let policy = RelationPolicy::builder().blocks(RecognizerId(2)).build();
    let p = o.attach(pan(2), OUTER).unwrap();
    o.attach(tap(1).with_policy(Arc::new(policy)), OUTER).unwrap();

    let mut t = TouchSequence::new();
    play(&mut o, &tree, &[t.down(0, 100.0, 100.0), t.move_to(0, 140.0, 100.0)]);
    assert!(o.is_awaiting(p));
}

#[test]
fn simultaneous_relation_lets_both_run() {
    let tree = scene();
    let mut o = Orchestrator::new();
    let policy = RelationPolicy::builder().simultaneous_with(RecognizerId(2)).build();
    o.attach(pan(1).with_policy(Arc::new(policy)), OUTER).unwrap();
    o.attach(pan(2), OUTER).unwrap();

    let mut t = TouchSequence::new();
    let out = play(&mut o, &tree, &[t.down(0, 100.0, 100.0), t.move_to(0, 140.0, 100.0)]);
    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began, Active]);
    assert_eq!(entered_states(&out, RecognizerId(2)), vec![Began, Active]);
}

#[test]
fn native_views_run_together_unless_exclusive() {
    let tree = scene();
    let open = NativeViewConfig::default().activate_on_start(true);

    let mut o = Orchestrator::new();
    o.attach(native(1, open), OUTER).unwrap();
    o.attach(native(2, open), OUTER).unwrap();
    let mut t = TouchSequence::new();
    let out = o.dispatch(&tree, &t.down(0, 100.0, 100.0));
    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began, Active]);
    assert_eq!(entered_states(&out, RecognizerId(2)), vec![Began, Active]);
    assert!(
        out.iter()
            .any(|n| matches!(n, Notification::Touch { recognizer, .. } if *recognizer == RecognizerId(2)))
    );

    let mut o = Orchestrator::new();
    o.attach(native(1, open.disallow_interruption(true)), OUTER)
        .unwrap();
    o.attach(native(2, open), OUTER).unwrap();
    let mut t = TouchSequence::new();
    let out = o.dispatch(&tree, &t.down(0, 100.0, 100.0));
    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began, Active]);
    assert_eq!(states_of(&out, RecognizerId(2)), vec![(Cancelled, Undetermined)]);
}

#[test]
fn manual_gesture_is_driven_by_the_host() {
    let tree = scene();
    let mut o = Orchestrator::new();
    let manual = o
        .attach(Behavior::from(Manual).into_recognizer(RecognizerId(1)), OUTER)
        .unwrap();
    o.attach(pan(2), OUTER).unwrap();

    let mut t = TouchSequence::new();
    let out = o.dispatch(&tree, &t.down(0, 100.0, 100.0));
    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began]);

    assert!(o.activate(manual));
    let out = o.take_notifications();
    assert_eq!(states_of(&out, RecognizerId(1)), vec![(Active, Began)]);
    assert_eq!(states_of(&out, RecognizerId(2)), vec![(Cancelled, Began)]);

    let out = play(&mut o, &tree, &[t.move_to(0, 150.0, 100.0), t.up(0)]);
    assert_eq!(entered_states(&out, RecognizerId(1)), vec![End]);
    assert!(!o.is_any_active());
}

/// Pan 1 on the left half and pan 2 on the right half, each active on its own
/// pointer, then a third pointer lands where the halves overlap.
fn shared_third_pointer(
    left: tactus::GestureRecognizer<Behavior>,
) -> (Orchestrator, [tactus::RecognizerHandle; 2], Vec<Notification>) {
    let tree = split_scene();
    let mut o = Orchestrator::new();
    let a = o.attach(left, LEFT).unwrap();
    let b = o.attach(pan(2), RIGHT).unwrap();

    let mut t = TouchSequence::new();
    let mut out = play(
        &mut o,
        &tree,
        &[
            t.down(0, 20.0, 150.0),
            t.move_to(0, 60.0, 150.0),
            t.down(1, 280.0, 150.0),
            t.move_to(1, 240.0, 150.0),
        ],
    );
    assert!(o.is_active(a) && o.is_active(b));

    out.extend(play(
        &mut o,
        &tree,
        &[t.down(2, 150.0, 150.0), t.move_all_by(10.0, 0.0)],
    ));
    (o, [a, b], out)
}

#[test]
fn shared_pointer_cancels_the_later_activation() {
    let (o, [a, b], out) = shared_third_pointer(pan(1));

    assert_eq!(o.state(a), Some(Active));
    assert_eq!(entered_states(&out, RecognizerId(2)), vec![Began, Active, Cancelled]);
    assert_eq!(o.state(b), Some(Cancelled));
    assert_eq!(overlapping_active(&o, &[a, b]), None);
}

#[test]
fn shared_pointer_cancels_a_yielding_incumbent() {
    let policy = RelationPolicy::builder().cancelled_by(RecognizerId(2)).build();
    let (o, [a, b], out) = shared_third_pointer(pan(1).with_policy(Arc::new(policy)));

    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began, Active, Cancelled]);
    assert_eq!(o.state(b), Some(Active));
    assert_eq!(o.state(a), Some(Cancelled));
}

#[test]
fn shared_pointer_keeps_simultaneous_pair() {
    let policy = RelationPolicy::builder().simultaneous_with(RecognizerId(2)).build();
    let (o, [a, b], _) = shared_third_pointer(pan(1).with_policy(Arc::new(policy)));

    assert_eq!(o.state(a), Some(Active));
    assert_eq!(o.state(b), Some(Active));
}

#[test]
fn pinch_and_rotation_run_together() {
    let tree = scene();
    let mut o = Orchestrator::new();
    let policy = RelationPolicy::builder().simultaneous_with(RecognizerId(2)).build();
    let p = o.attach(pinch(1).with_policy(Arc::new(policy)), OUTER).unwrap();
    let r = o.attach(rotation(2), OUTER).unwrap();

    let mut t = TouchSequence::new();
    let out = play(
        &mut o,
        &tree,
        &[
            t.down(0, 100.0, 150.0),
            t.down(1, 200.0, 150.0),
            t.move_to(1, 150.0, 250.0),
        ],
    );

    assert_eq!(entered_states(&out, RecognizerId(1)), vec![Began, Active]);
    assert_eq!(entered_states(&out, RecognizerId(2)), vec![Began, Active]);
    assert!(o.is_active(p) && o.is_active(r));

    let out = o.dispatch(&tree, &t.up(1));
    assert_eq!(entered_states(&out, RecognizerId(1)), vec![End]);
    assert_eq!(entered_states(&out, RecognizerId(2)), vec![End]);
}
