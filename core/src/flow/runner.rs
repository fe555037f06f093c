// farmacart/src/flow/runner.rs
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use tracing::{event, instrument, Instrument, Level};

use super::{ContextData, FlowControl, FlowOutcome, StepDef};
use crate::error::{CartError, CartResult};

/// Async handler bound to one step. Receives a clone of the flow's shared context.
pub type StepHandler<T> =
  Box<dyn Fn(ContextData<T>) -> Pin<Box<dyn Future<Output = CartResult<FlowControl>> + Send>> + Send + Sync>;

pub struct Flow<T: Send + Sync + 'static> {
  name: &'static str,
  steps: Vec<StepDef<T>>,
  handlers: HashMap<&'static str, StepHandler<T>>,
}

impl<T: Send + Sync + 'static> Flow<T> {
  pub fn new(name: &'static str, steps: Vec<StepDef<T>>) -> Self {
    Self {
      name,
      steps,
      handlers: HashMap::new(),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn step_names(&self) -> Vec<&'static str> {
    self.steps.iter().map(|s| s.name).collect()
  }

  /// Binds the handler for `step_name`. Panics if the step was never declared,
  /// since that can only be a typo in the flow definition.
  pub fn on<F, Fut>(&mut self, step_name: &'static str, handler: F) -> &mut Self
  where
    F: Fn(ContextData<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CartResult<FlowControl>> + Send + 'static,
  {
    assert!(
      self.steps.iter().any(|s| s.name == step_name),
      "flow '{}' has no step named '{}'",
      self.name,
      step_name
    );
    self
      .handlers
      .insert(step_name, Box::new(move |ctx| Box::pin(handler(ctx))));
    self
  }

  #[instrument(name = "Flow::run", skip_all, fields(flow = self.name, num_steps = self.steps.len()), err(Display))]
  pub async fn run(&self, ctx: ContextData<T>) -> CartResult<FlowOutcome> {
    for (step_index, step) in self.steps.iter().enumerate() {
      if step.should_skip(&ctx) {
        event!(Level::DEBUG, step_name = step.name, "Step skipped by its condition.");
        continue;
      }

      let handler = self.handlers.get(step.name).ok_or_else(|| CartError::StepMissing {
        step_name: step.name.to_string(),
      })?;

      let span = tracing::info_span!("flow_step", step_name = step.name, step_index);
      match handler(ctx.clone()).instrument(span).await {
        Ok(FlowControl::Continue) => {}
        Ok(FlowControl::Stop) => {
          event!(Level::DEBUG, step_name = step.name, "Flow stopped by step.");
          return Ok(FlowOutcome::Stopped { at_step: step.name });
        }
        Err(e) => {
          event!(Level::DEBUG, step_name = step.name, error = %e, "Step failed.");
          return Err(e);
        }
      }
    }
    Ok(FlowOutcome::Completed)
  }
}
