//! Ready-made observers for the Graphwalk traversal engine
//!
//! This crate provides implementations of the [`TraversalObserver`] trait
//! defined in graphwalk-core. They cover the common consumption patterns:
//! capturing runs for inspection, logging them, or forwarding each step to
//! an arbitrary callback (the hook a rendering front end attaches to).
//!
//! [`TraversalObserver`]: graphwalk_core::TraversalObserver

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod callback;
pub mod logging;
pub mod recording;

pub use callback::CallbackObserver;
pub use logging::TracingObserver;
pub use recording::{RecordedRun, RecordedStep, RecordingObserver};
