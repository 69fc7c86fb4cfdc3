use std::sync::Arc;

use crate::function::function::Function;
use crate::function::functionerror::FunctionError;

/// Immutable view of a [`Task`] at one version.
#[derive(Clone)]
pub struct TaskData {
    pub function: Arc<dyn Function>,
    pub left_border: f64,
    pub right_border: f64,
    pub step: f64,
    pub version: u64,
}

/// Integration job parameters handed between a producer and a consumer.
///
/// Every `update` bumps a monotonic version so a consumer can tell a fresh
/// job from one it already processed. The holder does no locking; callers
/// sharing it across threads wrap it themselves.
pub struct Task {
    current: Option<TaskData>,
    tasks_count: usize,
    version: u64,
}

impl Task {
    pub fn new(tasks_count: usize) -> Result<Task, FunctionError> {
        let mut task = Task { current: None, tasks_count: 1, version: 0 };
        task.set_tasks_count(tasks_count)?;
        Ok(task)
    }

    pub fn update(&mut self, function: Arc<dyn Function>, left_border: f64, right_border: f64, step: f64) {
        self.version += 1;
        self.current = Some(TaskData {
            function,
            left_border,
            right_border,
            step,
            version: self.version,
        });
    }

    /// `None` until the first `update`.
    pub fn snapshot(&self) -> Option<TaskData> {
        self.current.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn tasks_count(&self) -> usize {
        self.tasks_count
    }

    pub fn set_tasks_count(&mut self, tasks_count: usize) -> Result<(), FunctionError> {
        if tasks_count < 1 {
            return Err(FunctionError::invalid_argument("tasks count must be positive"));
        }
        self.tasks_count = tasks_count;
        Ok(())
    }
}
