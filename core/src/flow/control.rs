// farmacart/src/flow/control.rs

/// Returned by a step handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  Continue,
  /// Halt the flow without error. Later steps do not run.
  Stop,
}

/// Outcome of a whole flow run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  Completed,
  Stopped { at_step: &'static str },
}
