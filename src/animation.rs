use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::deferred::Deferred;
use crate::error::AnimationError;
use crate::scheduler::Scheduler;
use crate::target::{AliasResolver, NoAliases, Target};
use crate::timing::TimingFunction;
use crate::transform::TransformList;
use crate::tween::{resolve, Tween, TweenKind};
use crate::value::{RawValue, Value};

/// A computed mapping of property name to interpolated value at some
/// progress point.
pub type Frame = BTreeMap<String, Value>;

const DEFAULT_DURATION: Duration = Duration::from_millis(300);

struct EndListener {
    callback: Box<dyn FnMut()>,
    once: bool,
}

struct Inner {
    tracks: BTreeMap<String, Tween>,
    duration: Duration,
    easing: TimingFunction,
    running: bool,
    done: bool,
    /// Scratch output mapping, reused across frame calls.
    scratch: Frame,
    /// Snapshot of the frame at progress 1, recomputed on every reset.
    final_frame: Frame,
    has_reset: bool,
    listeners: Vec<EndListener>,
    /// Chain predecessor; current-value queries consult its final frame
    /// before falling through to the live target.
    parent: Option<Animation>,
    /// Scheduler time when the active run started.
    epoch: Duration,
    /// Cancellation token for the active tick loop. Replaced on every
    /// run so a re-entrant `run()` orphans the previous loop.
    cancel: Option<Rc<Cell<bool>>>,
}

/// The orchestration unit: a set of per-property tracks driven from
/// progress 0 to 1 over a duration by a shared easing function.
///
/// `Animation` is a cheap clonable handle; clones share state. The
/// engine is single-threaded and cooperative: one tick loop per running
/// animation, suspension only at tick granularity.
#[derive(Clone)]
pub struct Animation {
    inner: Rc<RefCell<Inner>>,
    target: Rc<RefCell<dyn Target>>,
    scheduler: Rc<dyn Scheduler>,
    aliases: Rc<dyn AliasResolver>,
}

impl Animation {
    pub fn new(target: Rc<RefCell<dyn Target>>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::assemble(target, scheduler, Rc::new(NoAliases), None)
    }

    /// Swap in a property-name alias resolver (vendor prefixing and the
    /// like). Applies to declarations made after the call.
    pub fn with_aliases(self, aliases: Rc<dyn AliasResolver>) -> Self {
        Self { aliases, ..self }
    }

    fn assemble(
        target: Rc<RefCell<dyn Target>>,
        scheduler: Rc<dyn Scheduler>,
        aliases: Rc<dyn AliasResolver>,
        parent: Option<Animation>,
    ) -> Self {
        let (duration, easing) = match &parent {
            Some(parent) => {
                let inner = parent.inner.borrow();
                (inner.duration, inner.easing.clone())
            }
            None => (DEFAULT_DURATION, TimingFunction::default()),
        };
        Self {
            inner: Rc::new(RefCell::new(Inner {
                tracks: BTreeMap::new(),
                duration,
                easing,
                running: false,
                done: false,
                scratch: Frame::new(),
                final_frame: Frame::new(),
                has_reset: false,
                listeners: Vec::new(),
                parent,
                epoch: Duration::ZERO,
                cancel: None,
            })),
            target,
            scheduler,
            aliases,
        }
    }

    /// Whether two handles refer to the same animation.
    pub fn ptr_eq(&self, other: &Animation) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    pub fn is_done(&self) -> bool {
        self.inner.borrow().done
    }

    fn is_deferred(&self) -> bool {
        self.inner.borrow().parent.is_some()
    }

    fn downgrade(&self) -> WeakHandle {
        WeakHandle {
            inner: Rc::downgrade(&self.inner),
            target: self.target.clone(),
            scheduler: self.scheduler.clone(),
            aliases: self.aliases.clone(),
        }
    }

    fn guard_idle(&self, property: &str) -> Result<(), AnimationError> {
        if self.inner.borrow().running {
            Err(AnimationError::AnimationRunning {
                property: property.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Current value of a property: the chain predecessor's final frame
    /// when it defines the property, otherwise the live target.
    fn current(&self, property: &str) -> Option<RawValue> {
        let parent = self.inner.borrow().parent.clone();
        if let Some(parent) = parent {
            if let Some(value) = parent.final_frame().remove(property) {
                return Some(value.to_raw());
            }
        }
        self.target.borrow().read(property)
    }

    /// The frame this animation will end at. After a reset this is the
    /// stored snapshot; before one it is projected from track end
    /// values overlaid on the predecessor's final frame, so chained
    /// animations can look ahead without any frame computation.
    pub fn final_frame(&self) -> Frame {
        let (has_reset, parent) = {
            let inner = self.inner.borrow();
            (inner.has_reset, inner.parent.clone())
        };
        if has_reset {
            return self.inner.borrow().final_frame.clone();
        }
        let mut frame = match parent {
            Some(parent) => parent.final_frame(),
            None => Frame::new(),
        };
        for (name, tween) in &self.inner.borrow().tracks {
            frame.insert(name.clone(), tween.end_value());
        }
        frame
    }

    /// Declare that `property` animates from its current value to `to`.
    /// Only allowed while idle.
    pub fn set(&self, property: &str, to: impl Into<RawValue>) -> Result<&Self, AnimationError> {
        let property = self.aliases.resolve(property);
        self.guard_idle(&property)?;
        let current = self
            .current(&property)
            .ok_or_else(|| AnimationError::MissingProperty {
                property: property.clone(),
            })?;
        let kind = resolve(&current, &property).ok_or_else(|| AnimationError::UnresolvedType {
            property: property.clone(),
            value: current.to_string(),
        })?;
        let tween = Tween::new(&property, kind, &current, &to.into())?;
        self.inner.borrow_mut().tracks.insert(property, tween);
        Ok(self)
    }

    /// Increment `property` by `n` from its current numeric value.
    pub fn add(&self, property: &str, n: f64) -> Result<&Self, AnimationError> {
        self.shift(property, n)
    }

    /// Decrement `property` by `n` from its current numeric value.
    pub fn sub(&self, property: &str, n: f64) -> Result<&Self, AnimationError> {
        self.shift(property, -n)
    }

    fn shift(&self, property: &str, n: f64) -> Result<&Self, AnimationError> {
        let property = self.aliases.resolve(property);
        self.guard_idle(&property)?;
        let current = self
            .current(&property)
            .ok_or_else(|| AnimationError::MissingProperty {
                property: property.clone(),
            })?;
        let base = current
            .as_number()
            .ok_or_else(|| AnimationError::UnresolvedType {
                property: property.clone(),
                value: current.to_string(),
            })?;
        let tween = Tween::new(
            &property,
            TweenKind::Pixel,
            &RawValue::Number(base),
            &RawValue::Number(base + n),
        )?;
        self.inner.borrow_mut().tracks.insert(property, tween);
        Ok(self)
    }

    /// Force-get the transform track (seeded current -> current, or
    /// identity when the target has none) and mutate its end-state
    /// component list. Successive calls within one idle window compose
    /// onto the same end state.
    fn with_transform<F>(&self, mutate: F) -> Result<&Self, AnimationError>
    where
        F: FnOnce(&mut TransformList),
    {
        let property = self.aliases.resolve("transform");
        self.guard_idle(&property)?;
        if !self.inner.borrow().tracks.contains_key(&property) {
            let current = self
                .current(&property)
                .unwrap_or_else(|| RawValue::Text("none".to_string()));
            let kind =
                resolve(&current, &property).ok_or_else(|| AnimationError::UnresolvedType {
                    property: property.clone(),
                    value: current.to_string(),
                })?;
            let tween = Tween::new(&property, kind, &current, &current)?;
            self.inner.borrow_mut().tracks.insert(property.clone(), tween);
        }
        let mut inner = self.inner.borrow_mut();
        match inner
            .tracks
            .get_mut(&property)
            .and_then(|tween| tween.transform_to_mut())
        {
            Some(list) => {
                mutate(list);
                drop(inner);
                Ok(self)
            }
            None => Err(AnimationError::UnresolvedType {
                property,
                value: "non-transform track".to_string(),
            }),
        }
    }

    /// Translate the x and y axes (px).
    pub fn translate(&self, x: f64, y: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| {
            t.translate.0 = x;
            t.translate.1 = y;
        })
    }

    /// Translate on the x axis.
    pub fn translate_x(&self, n: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.translate.0 = n)
    }

    /// Translate on the y axis.
    pub fn translate_y(&self, n: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.translate.1 = n)
    }

    /// Translate on the z axis.
    pub fn translate_z(&self, n: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.translate.2 = n)
    }

    /// Shorthand for [`Animation::translate_x`].
    pub fn x(&self, n: f64) -> Result<&Self, AnimationError> {
        self.translate_x(n)
    }

    /// Shorthand for [`Animation::translate_y`].
    pub fn y(&self, n: f64) -> Result<&Self, AnimationError> {
        self.translate_y(n)
    }

    /// Rotate by `degrees`, clockwise.
    pub fn rotate(&self, degrees: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.rotate = degrees)
    }

    /// Skew the x and y axes (degrees).
    pub fn skew(&self, x: f64, y: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.skew = (x, y))
    }

    pub fn skew_x(&self, n: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.skew.0 = n)
    }

    pub fn skew_y(&self, n: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.skew.1 = n)
    }

    /// Scale the x and y axes.
    pub fn scale(&self, x: f64, y: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.scale = (x, y))
    }

    pub fn scale_x(&self, n: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.scale.0 = n)
    }

    pub fn scale_y(&self, n: f64) -> Result<&Self, AnimationError> {
        self.with_transform(|t| t.scale.1 = n)
    }

    /// Uniform scale on both axes.
    pub fn scale_uniform(&self, n: f64) -> Result<&Self, AnimationError> {
        self.scale(n, n)
    }

    /// Set the animation duration.
    pub fn duration(&self, duration: Duration) -> &Self {
        self.inner.borrow_mut().duration = duration;
        self
    }

    /// Set the easing function shared by all tracks.
    pub fn ease(&self, timing: TimingFunction) -> &Self {
        self.inner.borrow_mut().easing = timing;
        self
    }

    /// Compute the frame at `progress` (clamped to [0, 1]). Pure over
    /// the track state: tracks are never mutated, only the reused
    /// scratch mapping is written. The easing is evaluated outside the
    /// state borrow, so a custom curve may call back into the handle.
    pub fn frame(&self, progress: f64) -> Frame {
        let progress = progress.clamp(0.0, 1.0);
        let easing = self.inner.borrow().easing.clone();
        let eased = easing.evaluate(progress);
        let mut inner = self.inner.borrow_mut();
        let Inner {
            tracks, scratch, ..
        } = &mut *inner;
        for (name, tween) in tracks.iter() {
            scratch.insert(name.clone(), tween.value_at(eased));
        }
        scratch.clone()
    }

    /// Rewind so the animation can run (again): clears the done flag
    /// and the scratch mapping, then recomputes the final-frame
    /// snapshot from `frame(1)` overlaid on the predecessor's final
    /// frame. The recomputation here is what lets chained animations
    /// observe the value a property will end at before this one has
    /// actually run.
    pub fn reset(&self) -> &Self {
        let parent = {
            let mut inner = self.inner.borrow_mut();
            inner.done = false;
            inner.scratch.clear();
            inner.parent.clone()
        };
        let mut snapshot = match parent {
            Some(parent) => parent.final_frame(),
            None => Frame::new(),
        };
        snapshot.extend(self.frame(1.0));
        let mut inner = self.inner.borrow_mut();
        inner.final_frame = snapshot;
        inner.has_reset = true;
        self
    }

    /// Run the animation with the configured duration.
    pub fn run(&self) -> &Self {
        self.start(None);
        self
    }

    /// Run the animation with a one-off duration override.
    pub fn run_for(&self, duration: Duration) -> &Self {
        self.start(Some(duration));
        self
    }

    fn start(&self, duration: Option<Duration>) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(duration) = duration {
                inner.duration = duration;
            }
            // Orphan any loop from a previous run.
            if let Some(token) = inner.cancel.take() {
                token.set(true);
            }
            inner.running = true;
        }
        self.reset();
        let token = Rc::new(Cell::new(false));
        {
            let mut inner = self.inner.borrow_mut();
            inner.epoch = self.scheduler.now();
            inner.cancel = Some(token.clone());
            log::debug!(
                "run: {} track(s) over {:?}",
                inner.tracks.len(),
                inner.duration
            );
        }
        schedule_tick(self.clone(), token);
    }

    fn tick(&self, token: &Rc<Cell<bool>>) {
        if token.get() {
            return;
        }
        let (epoch, duration) = {
            let inner = self.inner.borrow();
            (inner.epoch, inner.duration)
        };
        let elapsed = self.scheduler.now().saturating_sub(epoch);
        let progress = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };
        let frame = self.frame(progress);
        {
            let mut target = self.target.borrow_mut();
            for (name, value) in &frame {
                target.write(name, &value.to_string());
            }
        }
        if progress >= 1.0 {
            {
                let mut inner = self.inner.borrow_mut();
                inner.running = false;
                inner.done = true;
                inner.cancel = None;
            }
            log::debug!("done after {:?}", elapsed);
            self.emit_end();
        } else {
            log::trace!("frame at progress {progress:.3}");
            schedule_tick(self.clone(), token.clone());
        }
    }

    /// Fire the end event. One-shot listeners are dropped after firing;
    /// persistent ones fire again on the next completed run.
    fn emit_end(&self) {
        let fired = std::mem::take(&mut self.inner.borrow_mut().listeners);
        let mut keep = Vec::new();
        for mut listener in fired {
            (listener.callback)();
            if !listener.once {
                keep.push(listener);
            }
        }
        let mut inner = self.inner.borrow_mut();
        // Preserve listeners registered while the event was firing.
        keep.append(&mut inner.listeners);
        inner.listeners = keep;
    }

    /// Subscribe to the end event. Listeners persist across runs and
    /// fire at most once per completed run, strictly after the final
    /// frame has been applied.
    pub fn on_end<F: FnMut() + 'static>(&self, callback: F) -> &Self {
        self.push_listener(callback, false);
        self
    }

    fn push_listener<F: FnMut() + 'static>(&self, callback: F, once: bool) {
        self.inner.borrow_mut().listeners.push(EndListener {
            callback: Box::new(callback),
            once,
        });
    }

    /// Create a deferred animation that runs when this one completes.
    /// The receiver is lazily started if it is an idle base animation,
    /// so `a.then()` alone is enough to start a chain; a deferred
    /// receiver instead waits for its own predecessor.
    ///
    /// The end listener keeps only a weak handle to the link: the
    /// caller must hold the returned [`Deferred`] until it runs, or
    /// the link is cancelled when the last handle to it is dropped.
    pub fn then(&self) -> Deferred {
        let child = Self::assemble(
            self.target.clone(),
            self.scheduler.clone(),
            self.aliases.clone(),
            Some(self.clone()),
        );
        let next = child.downgrade();
        self.push_listener(
            move || {
                if let Some(next) = next.upgrade() {
                    log::debug!("chain: starting deferred animation");
                    next.run();
                }
            },
            true,
        );
        self.kick();
        Deferred::new(child, self.clone())
    }

    /// Register an existing animation to run when this one completes,
    /// returning `self` for further declarations on the receiver.
    pub fn then_run(&self, next: &Animation) -> &Self {
        let next = next.downgrade();
        self.push_listener(
            move || {
                if let Some(next) = next.upgrade() {
                    next.run();
                }
            },
            true,
        );
        self.kick();
        self
    }

    fn kick(&self) {
        if !self.is_running() && !self.is_deferred() {
            self.run();
        }
    }
}

// Inner holds boxed listeners, so Debug is written by hand.
impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animation")
            .field("tracks", &inner.tracks.len())
            .field("duration", &inner.duration)
            .field("running", &inner.running)
            .field("done", &inner.done)
            .finish_non_exhaustive()
    }
}

/// Non-owning handle used by end listeners, so a chain link dropped by
/// the caller does not keep its successors alive through the listener
/// and parent/child handles never form a strong cycle.
struct WeakHandle {
    inner: Weak<RefCell<Inner>>,
    target: Rc<RefCell<dyn Target>>,
    scheduler: Rc<dyn Scheduler>,
    aliases: Rc<dyn AliasResolver>,
}

impl WeakHandle {
    fn upgrade(&self) -> Option<Animation> {
        Some(Animation {
            inner: self.inner.upgrade()?,
            target: self.target.clone(),
            scheduler: self.scheduler.clone(),
            aliases: self.aliases.clone(),
        })
    }
}

fn schedule_tick(animation: Animation, token: Rc<Cell<bool>>) {
    let scheduler = animation.scheduler.clone();
    scheduler.schedule(Box::new(move || animation.tick(&token)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::target::{PropertyMap, StaticAliases};

    fn setup() -> (Rc<RefCell<PropertyMap>>, ManualScheduler, Animation) {
        let target = Rc::new(RefCell::new(
            PropertyMap::new()
                .with("opacity", 1.0)
                .with("margin", "0px")
                .with("color", "rgb(0,0,0)"),
        ));
        let scheduler = ManualScheduler::new();
        let animation = Animation::new(target.clone(), Rc::new(scheduler.clone()));
        (target, scheduler, animation)
    }

    #[test]
    fn test_frame_endpoints() {
        let (_, _, animation) = setup();
        animation.set("margin", 10.0).unwrap();
        assert_eq!(animation.frame(0.0)["margin"].to_string(), "0px");
        assert_eq!(animation.frame(1.0)["margin"].to_string(), "10px");
    }

    #[test]
    fn test_frame_monotonic_for_linear_ease() {
        let (_, _, animation) = setup();
        animation.set("margin", 10.0).unwrap();
        let mut last = -1.0;
        for i in 0..=10 {
            let frame = animation.frame(i as f64 / 10.0);
            let Value::Number { value, .. } = frame["margin"] else {
                panic!("expected numeric value");
            };
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_frame_is_pure() {
        let (_, _, animation) = setup();
        animation.set("opacity", 0.0).unwrap().set("margin", 8.0).unwrap();
        assert_eq!(animation.frame(0.3), animation.frame(0.3));
    }

    #[test]
    fn test_frame_clamps_progress() {
        let (_, _, animation) = setup();
        animation.set("margin", 10.0).unwrap();
        assert_eq!(animation.frame(2.0), animation.frame(1.0));
        assert_eq!(animation.frame(-1.0), animation.frame(0.0));
    }

    #[test]
    fn test_reset_snapshots_final_frame() {
        let (_, _, animation) = setup();
        animation.set("opacity", 0.0).unwrap().set("margin", 5.0).unwrap();
        animation.reset();
        assert_eq!(animation.frame(1.0), animation.final_frame());
    }

    #[test]
    fn test_set_rejected_while_running() {
        let (_, _, animation) = setup();
        animation.set("opacity", 0.0).unwrap();
        animation.run();
        let err = animation.set("margin", 5.0).unwrap_err();
        assert_eq!(
            err,
            AnimationError::AnimationRunning {
                property: "margin".to_string(),
            }
        );
        assert!(animation.rotate(90.0).is_err());
        assert!(animation.add("margin", 1.0).is_err());
    }

    #[test]
    fn test_unresolved_type_reported_at_declaration() {
        let target = Rc::new(RefCell::new(PropertyMap::new().with("display", "block")));
        let scheduler = ManualScheduler::new();
        let animation = Animation::new(target, Rc::new(scheduler));
        let err = animation.set("display", "none").unwrap_err();
        assert!(matches!(err, AnimationError::UnresolvedType { .. }));
    }

    #[test]
    fn test_missing_property() {
        let (_, _, animation) = setup();
        let err = animation.set("border-width", 2.0).unwrap_err();
        assert_eq!(
            err,
            AnimationError::MissingProperty {
                property: "border-width".to_string(),
            }
        );
    }

    #[test]
    fn test_add_and_sub() {
        let (_, _, animation) = setup();
        animation.add("margin", 6.0).unwrap();
        assert_eq!(animation.frame(1.0)["margin"].to_string(), "6px");
        animation.sub("margin", 2.0).unwrap();
        assert_eq!(animation.frame(1.0)["margin"].to_string(), "-2px");
    }

    #[test]
    fn test_structural_mutators_compose() {
        let (_, _, animation) = setup();
        animation.translate(10.0, 20.0).unwrap();
        animation.scale_uniform(2.0).unwrap();
        animation.rotate(45.0).unwrap();
        let frame = animation.frame(1.0);
        let Value::Transform(end) = &frame["transform"] else {
            panic!("expected transform value");
        };
        assert_eq!(end.translate, (10.0, 20.0, 0.0));
        assert_eq!(end.scale, (2.0, 2.0));
        assert_eq!(end.rotate, 45.0);
        // frame(0) stays at the seeded identity
        let Value::Transform(start) = &animation.frame(0.0)["transform"] else {
            panic!("expected transform value");
        };
        assert_eq!(*start, TransformList::IDENTITY);
    }

    #[test]
    fn test_repeated_component_call_refines_target() {
        let (_, _, animation) = setup();
        animation.x(5.0).unwrap();
        animation.x(7.0).unwrap();
        let Value::Transform(end) = &animation.frame(1.0)["transform"] else {
            panic!("expected transform value");
        };
        assert_eq!(end.translate.0, 7.0);
    }

    #[test]
    fn test_run_applies_frames_and_completes() {
        let (target, scheduler, animation) = setup();
        animation
            .set("opacity", 0.0)
            .unwrap()
            .duration(Duration::from_millis(100))
            .run();
        assert!(animation.is_running());

        scheduler.step(Duration::from_millis(50));
        assert_eq!(
            target.borrow().get("opacity"),
            Some(&RawValue::Text("0.5".to_string()))
        );
        assert!(animation.is_running());

        scheduler.step(Duration::from_millis(50));
        assert!(!animation.is_running());
        assert!(animation.is_done());
        assert_eq!(
            target.borrow().get("opacity"),
            Some(&RawValue::Text("0".to_string()))
        );
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let (target, scheduler, animation) = setup();
        animation.set("margin", 5.0).unwrap().run_for(Duration::ZERO);
        scheduler.step(Duration::ZERO);
        assert!(animation.is_done());
        assert_eq!(
            target.borrow().get("margin"),
            Some(&RawValue::Text("5px".to_string()))
        );
    }

    #[test]
    fn test_end_fires_once_per_run() {
        let (_, scheduler, animation) = setup();
        let ends = Rc::new(Cell::new(0));
        let counter = ends.clone();
        animation
            .set("opacity", 0.0)
            .unwrap()
            .on_end(move || counter.set(counter.get() + 1))
            .duration(Duration::from_millis(20))
            .run();
        scheduler.run_until_idle(Duration::from_millis(16));
        assert_eq!(ends.get(), 1);

        // Persistent listeners fire again on a re-run.
        animation.run();
        scheduler.run_until_idle(Duration::from_millis(16));
        assert_eq!(ends.get(), 2);
    }

    #[test]
    fn test_rerun_orphans_previous_loop() {
        let (_, scheduler, animation) = setup();
        animation
            .set("opacity", 0.0)
            .unwrap()
            .duration(Duration::from_millis(100))
            .run();
        scheduler.step(Duration::from_millis(10));
        animation.run();
        // Old and new loop callbacks are both queued; only the new one
        // survives its cancellation check.
        scheduler.run_until_idle(Duration::from_millis(50));
        assert!(animation.is_done());
    }

    #[test]
    fn test_debug_reports_lifecycle_state() {
        let (_, _, animation) = setup();
        animation.set("opacity", 0.0).unwrap();
        let repr = format!("{animation:?}");
        assert!(repr.contains("tracks: 1"));
        assert!(repr.contains("running: false"));
    }

    #[test]
    fn test_custom_ease_may_inspect_the_animation() {
        let (_, _, animation) = setup();
        animation.set("margin", 10.0).unwrap();
        let handle = animation.clone();
        animation.ease(TimingFunction::custom(move |t| {
            assert!(!handle.is_running());
            t
        }));
        assert_eq!(animation.frame(1.0)["margin"].to_string(), "10px");
    }

    #[test]
    fn test_aliased_property_names() {
        let target = Rc::new(RefCell::new(PropertyMap::new()));
        let scheduler = ManualScheduler::new();
        let aliases = StaticAliases::new().alias("transform", "-webkit-transform");
        let animation =
            Animation::new(target, Rc::new(scheduler)).with_aliases(Rc::new(aliases));
        animation.x(4.0).unwrap();
        let frame = animation.frame(1.0);
        assert!(frame.contains_key("-webkit-transform"));
        assert!(!frame.contains_key("transform"));
    }
}
