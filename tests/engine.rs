use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use kinetic::prelude::*;

fn setup() -> (Rc<RefCell<PropertyMap>>, ManualScheduler, Animation) {
    let _ = env_logger::builder().is_test(true).try_init();
    let target = Rc::new(RefCell::new(
        PropertyMap::new()
            .with("opacity", 1.0)
            .with("margin", "0px")
            .with("color", "rgb(0,0,0)"),
    ));
    let scheduler = ManualScheduler::new();
    let animation = animate(target.clone(), Rc::new(scheduler.clone()));
    (target, scheduler, animation)
}

#[test]
fn test_unit_rendering_follows_property() {
    let (target, scheduler, a) = setup();
    a.set("opacity", 0.0)
        .unwrap()
        .set("margin", 5.0)
        .unwrap()
        .duration(Duration::from_millis(100))
        .run();
    scheduler.step(Duration::from_millis(50));
    // opacity is unit-less, margin renders in px
    assert_eq!(target.borrow().get("opacity").unwrap().to_string(), "0.5");
    assert_eq!(target.borrow().get("margin").unwrap().to_string(), "2.5px");
}

#[test]
fn test_chain_runs_links_in_order() {
    let (target, scheduler, a) = setup();
    a.set("opacity", 0.5)
        .unwrap()
        .duration(Duration::from_millis(40));

    let a_ends = Rc::new(Cell::new(0));
    let counter = a_ends.clone();
    a.on_end(move || counter.set(counter.get() + 1));

    let b = a.then();
    b.set("opacity", 0.0).unwrap();

    assert!(a.is_running());
    assert!(!b.is_running());

    // drive a to completion; its end event must fire exactly once and
    // start b in the same round
    while !a.is_done() {
        scheduler.step(Duration::from_millis(16));
    }
    assert_eq!(a_ends.get(), 1);
    assert!(b.is_running());

    scheduler.run_until_idle(Duration::from_millis(16));
    assert_eq!(a_ends.get(), 1);
    assert!(b.is_done());
    assert_eq!(target.borrow().get("opacity").unwrap().to_string(), "0");
}

#[test]
fn test_deferred_link_does_not_run_early() {
    let (_, scheduler, a) = setup();
    a.set("opacity", 0.0)
        .unwrap()
        .duration(Duration::from_millis(100));

    let evaluations = Rc::new(Cell::new(0));
    let counter = evaluations.clone();

    let b = a.then();
    b.set("opacity", 1.0).unwrap();
    b.ease(TimingFunction::custom(move |t| {
        counter.set(counter.get() + 1);
        t
    }));

    // while a is still in flight, b's easing has never been consulted
    scheduler.step(Duration::from_millis(50));
    assert!(a.is_running());
    assert!(!b.is_running());
    assert_eq!(evaluations.get(), 0);

    scheduler.step(Duration::from_millis(50));
    assert!(a.is_done());
    assert!(b.is_running());
    assert!(evaluations.get() > 0);
}

#[test]
fn test_chain_lookahead_reads_predecessor_end_value() {
    let (_, _, a) = setup();
    a.set("margin", 10.0).unwrap();
    let b = a.then();
    b.add("margin", 5.0).unwrap();
    assert_eq!(b.frame(1.0)["margin"].to_string(), "15px");
}

#[test]
fn test_grandchild_lookahead_through_empty_link() {
    let (_, _, a) = setup();
    a.x(5.0).unwrap();
    let b = a.then();
    let c = b.then();
    c.x(-2.0).unwrap();
    // b declares nothing, so c animates from a's end state: x from 5
    // to -2 passes through 1.5 at the midpoint
    assert_eq!(
        c.frame(0.5)["transform"].to_string(),
        "translateX(1.5px) translateY(0px) translateZ(0px) rotate(0deg) \
         skewX(0deg) skewY(0deg) scaleX(1) scaleY(1)"
    );
}

#[test]
fn test_pop_continues_declaring_on_predecessor() {
    let (_, _, a) = setup();
    a.set("opacity", 0.5).unwrap();
    let b = a.then();
    let c = b.then();
    c.set("opacity", 0.0).unwrap();
    assert!(c.pop().ptr_eq(&b));
    // b is still idle (it waits on a), so declarations through pop()
    // land on it
    c.pop().set("margin", 4.0).unwrap();
    assert_eq!(b.frame(1.0)["margin"].to_string(), "4px");
}

#[test]
fn test_dropped_chain_tail_is_cancelled() {
    let (target, scheduler, a) = setup();
    a.set("opacity", 0.0)
        .unwrap()
        .duration(Duration::from_millis(20));
    {
        let b = a.then();
        b.set("margin", 9.0).unwrap();
    }
    // the tail handle is gone, so completion finds nothing to start
    scheduler.run_until_idle(Duration::from_millis(16));
    assert!(a.is_done());
    assert_eq!(target.borrow().get("margin").unwrap().to_string(), "0px");
}

#[test]
fn test_then_run_starts_registered_animation() {
    let (target, scheduler, a) = setup();
    let b = animate(target.clone(), Rc::new(scheduler.clone()));
    b.set("margin", 8.0)
        .unwrap()
        .duration(Duration::from_millis(20));

    a.set("opacity", 0.0)
        .unwrap()
        .duration(Duration::from_millis(20))
        .then_run(&b);
    assert!(a.is_running());
    assert!(!b.is_running());

    scheduler.run_until_idle(Duration::from_millis(16));
    assert!(a.is_done());
    assert!(b.is_done());
    assert_eq!(target.borrow().get("margin").unwrap().to_string(), "8px");
}

#[test]
fn test_color_interpolation_end_to_end() {
    let (target, scheduler, a) = setup();
    a.set("color", "rgb(255,255,255)")
        .unwrap()
        .duration(Duration::from_millis(100))
        .run();
    scheduler.step(Duration::from_millis(50));
    assert_eq!(
        target.borrow().get("color").unwrap().to_string(),
        "rgb(128,128,128)"
    );
    scheduler.run_until_idle(Duration::from_millis(16));
    assert_eq!(
        target.borrow().get("color").unwrap().to_string(),
        "rgb(255,255,255)"
    );
}

#[test]
fn test_transform_seeded_from_missing_property() {
    let (target, scheduler, a) = setup();
    a.translate(10.0, 20.0)
        .unwrap()
        .rotate(90.0)
        .unwrap()
        .duration(Duration::from_millis(20))
        .run();
    scheduler.run_until_idle(Duration::from_millis(16));
    assert_eq!(
        target.borrow().get("transform").unwrap().to_string(),
        "translateX(10px) translateY(20px) translateZ(0px) rotate(90deg) \
         skewX(0deg) skewY(0deg) scaleX(1) scaleY(1)"
    );
}

#[test]
fn test_final_frame_matches_full_progress() {
    let (_, _, a) = setup();
    a.set("opacity", 0.2)
        .unwrap()
        .x(3.0)
        .unwrap()
        .ease(TimingFunction::EaseInOut);
    a.reset();
    assert_eq!(a.final_frame(), a.frame(1.0));
}

#[test]
fn test_declaration_rejected_mid_run() {
    let (_, scheduler, a) = setup();
    a.set("opacity", 0.0)
        .unwrap()
        .duration(Duration::from_millis(100))
        .run();
    scheduler.step(Duration::from_millis(10));
    assert!(matches!(
        a.set("margin", 5.0),
        Err(AnimationError::AnimationRunning { .. })
    ));

    // once done, declarations are allowed again
    scheduler.run_until_idle(Duration::from_millis(16));
    assert!(a.set("margin", 5.0).is_ok());
}

#[test]
fn test_frame_scheduler_drives_to_completion() {
    let target = Rc::new(RefCell::new(PropertyMap::new().with("opacity", 1.0)));
    let scheduler = Rc::new(kinetic::FrameScheduler::with_interval(
        Duration::from_millis(1),
    ));
    let a = animate(target.clone(), scheduler.clone());
    a.set("opacity", 0.0)
        .unwrap()
        .duration(Duration::from_millis(10))
        .run();
    scheduler.run_until_idle();
    assert!(a.is_done());
    assert_eq!(target.borrow().get("opacity").unwrap().to_string(), "0");
}
