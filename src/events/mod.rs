//! # Events Module
//!
//! Priority-ordered event dispatch.
//!
//! [`EventRegistry`] is an explicit object: create one at process start and
//! hand it to whoever needs it. There is no global registry; tests build their
//! own or call [`EventRegistry::reset`].
//!
//! Listeners with a lower priority value run first
//! ([`PRIORITY_HIGH`] = 10, [`PRIORITY_NORMAL`] = 100, [`PRIORITY_LOW`] = 200);
//! listeners sharing a priority run in registration order. A listener that
//! returns [`ControlFlow::Break`](std::ops::ControlFlow::Break) stops the
//! remaining listeners and makes [`EventRegistry::trigger`] return `false`.

mod registry;

pub use registry::{
    EventRegistry, Listener, ListenerId, PerformanceLog, PRIORITY_HIGH, PRIORITY_LOW,
    PRIORITY_NORMAL,
};
