use std::ops::Deref;

use crate::animation::Animation;

/// A chain link produced by [`Animation::then`]: an animation that
/// starts when its predecessor completes instead of on an explicit
/// `run()`. Derefs to [`Animation`], so the whole declaration surface
/// is available on the link itself.
#[derive(Clone)]
pub struct Deferred {
    child: Animation,
    parent: Animation,
}

impl Deferred {
    pub(crate) fn new(child: Animation, parent: Animation) -> Self {
        Self { child, parent }
    }

    /// Step back to the predecessor so declarations can continue on it
    /// after a chain has been set up.
    pub fn pop(&self) -> Animation {
        self.parent.clone()
    }
}

impl Deref for Deferred {
    type Target = Animation;

    fn deref(&self) -> &Animation {
        &self.child
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::scheduler::ManualScheduler;
    use crate::target::PropertyMap;

    use super::*;

    #[test]
    fn test_pop_returns_predecessor() {
        let target = Rc::new(RefCell::new(PropertyMap::new().with("opacity", 1.0)));
        let scheduler = ManualScheduler::new();
        let a = Animation::new(target, Rc::new(scheduler));
        a.set("opacity", 0.0).unwrap();
        let b = a.then();
        assert!(b.pop().ptr_eq(&a));
        assert!(!b.ptr_eq(&a));
    }

    #[test]
    fn test_deref_exposes_declarations() {
        let target = Rc::new(RefCell::new(PropertyMap::new().with("opacity", 1.0)));
        let scheduler = ManualScheduler::new();
        let a = Animation::new(target, Rc::new(scheduler));
        a.set("opacity", 0.0).unwrap();
        let b = a.then();
        b.set("opacity", 0.5).unwrap();
        assert_eq!(b.frame(1.0)["opacity"].to_string(), "0.5");
    }
}
