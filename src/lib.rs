//! Kinetic is a small property animation engine: declare where named
//! properties should end up, and the engine drives them there frame by
//! frame through typed interpolation.
//!
//! Core model:
//! - an [`Animation`] collects per-property tracks against a [`Target`]
//!   (anything with readable/writable named properties)
//! - each track's interpolator kind (pixel scalar, transform component
//!   list, RGB color) is resolved once from the property's current
//!   value and fixed for the track's life
//! - a shared [`TimingFunction`] reparameterizes progress before
//!   interpolation
//! - frames are computed, rendered to text, and written back to the
//!   target by a tick loop posted through a [`Scheduler`]
//! - [`Animation::then`] builds chains whose links start on their
//!   predecessor's end event and can look ahead at the values the
//!   predecessor will end with
//!
//! Everything is single threaded and cooperative: handles are cheap
//! `Rc` clones, not `Send`.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use kinetic::{animate, ManualScheduler, PropertyMap};
//!
//! let target = Rc::new(RefCell::new(
//!     PropertyMap::new().with("opacity", 1.0).with("margin", "0px"),
//! ));
//! let scheduler = ManualScheduler::new();
//!
//! let fade = animate(target.clone(), Rc::new(scheduler.clone()));
//! fade.set("opacity", 0.0)?
//!     .add("margin", 10.0)?
//!     .duration(Duration::from_millis(100))
//!     .run();
//!
//! scheduler.run_until_idle(Duration::from_millis(16));
//! assert_eq!(target.borrow().get("opacity").unwrap().to_string(), "0");
//! assert_eq!(target.borrow().get("margin").unwrap().to_string(), "10px");
//! # Ok::<(), kinetic::AnimationError>(())
//! ```

use std::cell::RefCell;
use std::rc::Rc;

mod animatable;
mod animation;
mod deferred;
mod error;
mod scheduler;
mod target;
mod timing;
mod transform;
mod tween;
mod value;

pub use animatable::Animatable;
pub use animation::{Animation, Frame};
pub use deferred::Deferred;
pub use error::AnimationError;
pub use scheduler::{FrameScheduler, ManualScheduler, Scheduler, Tick};
pub use target::{AliasResolver, NoAliases, PropertyMap, StaticAliases, Target};
pub use timing::TimingFunction;
pub use transform::TransformList;
pub use tween::TweenKind;
pub use value::{RawValue, Rgb, Unit, Value};

/// Create an animation against `target`, driven by `scheduler`.
pub fn animate(target: Rc<RefCell<dyn Target>>, scheduler: Rc<dyn Scheduler>) -> Animation {
    Animation::new(target, scheduler)
}

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{
        animate, Animation, AnimationError, Deferred, Frame, ManualScheduler, PropertyMap,
        Scheduler, Target, TimingFunction,
    };
}
