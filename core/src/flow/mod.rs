// farmacart/src/flow/mod.rs

//! A small ordered step runner used for the multi-step cart operations.
//!
//! A flow is a list of named steps over a shared `ContextData<T>`. Each step has one async
//! handler that returns `FlowControl::Continue` or `FlowControl::Stop`, and may carry a
//! skip predicate evaluated right before it runs. Every step executes inside its own
//! tracing span so a failed add-to-cart can be traced to the step that rejected it.

pub mod context_data;
pub mod control;
pub mod runner;
pub mod step;

pub use context_data::ContextData;
pub use control::{FlowControl, FlowOutcome};
pub use runner::{Flow, StepHandler};
pub use step::{SkipCondition, StepDef};
