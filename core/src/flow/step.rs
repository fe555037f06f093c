// farmacart/src/flow/step.rs
use std::sync::Arc;

use super::ContextData;

/// Predicate evaluated just before a step; `true` skips it.
pub type SkipCondition<T> = Arc<dyn Fn(&T) -> bool + Send + Sync + 'static>;

#[derive(Clone)]
pub struct StepDef<T: Send + Sync + 'static> {
  pub name: &'static str,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: Send + Sync + 'static> StepDef<T> {
  pub fn new(name: &'static str) -> Self {
    Self { name, skip_if: None }
  }

  pub fn skip_if(mut self, condition: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
    self.skip_if = Some(Arc::new(condition));
    self
  }

  pub(crate) fn should_skip(&self, ctx: &ContextData<T>) -> bool {
    match &self.skip_if {
      Some(condition) => ctx.with(|data| condition(data)),
      None => false,
    }
  }
}

impl<T: Send + Sync + 'static> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
