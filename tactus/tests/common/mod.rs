#![allow(dead_code)]

use proptest::prelude::*;
use tactus::{
    Behavior, GestureRecognizer, GestureState, Notification, Orchestrator, PointerEvent,
    RecognizerHandle, RecognizerId, Rect, TargetId,
    recognizers::{
        Fling, FlingConfig, LongPress, LongPressConfig, Pan, PanConfig, Pinch, Rotation, Tap,
        TapConfig,
    },
    testing::{FrameTree, TouchSequence},
};

// ============================================================================
// Scene
// ============================================================================

pub const OUTER: TargetId = TargetId(1);
pub const INNER: TargetId = TargetId(2);

/// A 300x300 outer target with a 100x100 inner target at (50, 50).
pub fn scene() -> FrameTree {
    let mut tree = FrameTree::new();
    tree.insert(OUTER, Rect::from_origin_size(0.0, 0.0, 300.0, 300.0))
        .insert(INNER, Rect::from_origin_size(50.0, 50.0, 100.0, 100.0));
    tree
}

pub const LEFT: TargetId = TargetId(3);
pub const RIGHT: TargetId = TargetId(4);

/// Two 200x300 targets side by side, overlapping on x in 100..200.
pub fn split_scene() -> FrameTree {
    let mut tree = FrameTree::new();
    tree.insert(LEFT, Rect::from_origin_size(0.0, 0.0, 200.0, 300.0))
        .insert(RIGHT, Rect::from_origin_size(100.0, 0.0, 200.0, 300.0));
    tree
}

pub fn tap(id: u32) -> GestureRecognizer<Behavior> {
    Behavior::from(Tap::new(TapConfig::default()).unwrap()).into_recognizer(RecognizerId(id))
}

pub fn pan(id: u32) -> GestureRecognizer<Behavior> {
    Behavior::from(Pan::new(PanConfig::default()).unwrap()).into_recognizer(RecognizerId(id))
}

pub fn long_press(id: u32) -> GestureRecognizer<Behavior> {
    Behavior::from(LongPress::new(LongPressConfig::default()).unwrap())
        .into_recognizer(RecognizerId(id))
}

pub fn fling(id: u32) -> GestureRecognizer<Behavior> {
    Behavior::from(Fling::new(FlingConfig::default()).unwrap()).into_recognizer(RecognizerId(id))
}

pub fn pinch(id: u32) -> GestureRecognizer<Behavior> {
    Behavior::from(Pinch::default()).into_recognizer(RecognizerId(id))
}

pub fn rotation(id: u32) -> GestureRecognizer<Behavior> {
    Behavior::from(Rotation::default()).into_recognizer(RecognizerId(id))
}

/// Tap, pan, long press and fling, all on the outer target.
pub fn crowded() -> (Orchestrator, Vec<RecognizerHandle>) {
    let mut orchestrator = Orchestrator::new();
    let handles = vec![
        orchestrator.attach(tap(1), OUTER).unwrap(),
        orchestrator.attach(pan(2), OUTER).unwrap(),
        orchestrator.attach(long_press(3), OUTER).unwrap(),
        orchestrator.attach(fling(4), OUTER).unwrap(),
    ];
    (orchestrator, handles)
}

/// Pans and taps on both halves of the split scene.
pub fn split() -> (Orchestrator, Vec<RecognizerHandle>) {
    let mut orchestrator = Orchestrator::new();
    let handles = vec![
        orchestrator.attach(pan(1), LEFT).unwrap(),
        orchestrator.attach(pan(2), RIGHT).unwrap(),
        orchestrator.attach(tap(3), LEFT).unwrap(),
        orchestrator.attach(long_press(4), RIGHT).unwrap(),
    ];
    (orchestrator, handles)
}

/// Recognizers reported `Active` that track a common pointer.
pub fn overlapping_active(
    orchestrator: &Orchestrator,
    handles: &[RecognizerHandle],
) -> Option<(RecognizerId, RecognizerId)> {
    let active: Vec<&GestureRecognizer<Behavior>> = handles
        .iter()
        .filter(|h| orchestrator.state(**h) == Some(GestureState::Active))
        .filter_map(|h| orchestrator.get(*h))
        .collect();
    for (n, a) in active.iter().enumerate() {
        for b in &active[n + 1..] {
            if a.core().tracker().shares_pointer_with(b.core().tracker()) {
                return Some((a.id(), b.id()));
            }
        }
    }
    None
}

pub fn play(
    orchestrator: &mut Orchestrator,
    tree: &FrameTree,
    events: &[PointerEvent],
) -> Vec<Notification> {
    events
        .iter()
        .flat_map(|event| orchestrator.dispatch(tree, event))
        .collect()
}

/// Each `(new, old)` continues from the previous report and is a legal move.
///
/// A finished recognizer silently starts over at `Undetermined` when the next
/// interaction begins.
pub fn is_consistent(states: &[(GestureState, GestureState)]) -> bool {
    let mut last = GestureState::Undetermined;
    for &(new, old) in states {
        if old == GestureState::Undetermined && last.is_finished() {
            last = GestureState::Undetermined;
        }
        if old != last || !old.can_transition_to(new) {
            return false;
        }
        last = new;
    }
    true
}

// ============================================================================
// Generated touch streams
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Step {
    Press { x: f32, y: f32 },
    Drag { dx: f32, dy: f32 },
    Lift { nth: usize },
    Wait { ms: u64 },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => (5.0f32..295.0, 5.0f32..295.0).prop_map(|(x, y)| Step::Press { x, y }),
        3 => (-40.0f32..40.0, -40.0f32..40.0).prop_map(|(dx, dy)| Step::Drag { dx, dy }),
        1 => (0usize..3).prop_map(|nth| Step::Lift { nth }),
        1 => (0u64..700).prop_map(|ms| Step::Wait { ms }),
    ]
}

pub fn steps_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step_strategy(), 1..40)
}

/// Turn steps into a well-formed stream: at most three pointers, pointers
/// stay on the outer target, everything lifts at the end.
pub fn stream(steps: &[Step]) -> Vec<PointerEvent> {
    let mut touches = TouchSequence::new();
    let mut events = Vec::new();
    let mut next_id = 0u32;

    for step in steps {
        match *step {
            Step::Press { x, y } if touches.pointers().len() < 3 => {
                events.push(touches.down(next_id, x, y));
                next_id += 1;
            }
            Step::Press { .. } => {}
            Step::Drag { dx, dy } if !touches.pointers().is_empty() => {
                let inside = touches.pointers().iter().all(|p| {
                    (1.0..299.0).contains(&(p.x + dx)) && (1.0..299.0).contains(&(p.y + dy))
                });
                if inside {
                    events.push(touches.move_all_by(dx, dy));
                }
            }
            Step::Drag { .. } => {}
            Step::Lift { nth } => {
                let ids: Vec<u32> = touches.pointers().iter().map(|p| p.id.0).collect();
                if let Some(id) = ids.get(nth % ids.len().max(1)) {
                    events.push(touches.up(*id));
                }
            }
            Step::Wait { ms } => {
                touches.advance(ms);
            }
        }
    }

    let remaining: Vec<u32> = touches.pointers().iter().map(|p| p.id.0).collect();
    for id in remaining {
        events.push(touches.up(id));
    }
    events
}
