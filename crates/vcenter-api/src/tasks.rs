//! Task status retrieval and the blocking poll loop.
//!
//! Mutations submitted with `vmw-task=true` return a task identifier;
//! `wait_for_task` polls it at a fixed interval until a terminal state,
//! bounded by an overall deadline. No backoff and no retries -- the first
//! failure aborts the run.

use std::time::Duration;

use serde::Deserialize;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::client::VcenterClient;
use crate::error::Error;

/// Lifecycle state of a server-side task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Running,
    Blocked,
    Succeeded,
    Failed,
}

impl TaskStatus {
    /// Pending, running, and blocked tasks are still in flight.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Task record from `GET /api/cis/tasks/{task}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInfo {
    pub status: TaskStatus,
    #[serde(default)]
    pub error: Option<TaskErrorInfo>,
}

/// Failure detail attached to a FAILED task.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskErrorInfo {
    #[serde(default)]
    pub message: String,
}

impl VcenterClient {
    /// Fetch one task record: `GET /api/cis/tasks/{task}`
    pub async fn get_task(&self, task: &str) -> Result<TaskInfo, Error> {
        let url = self.api_url(&format!("cis/tasks/{task}"))?;
        self.get(url).await
    }

    /// Poll `task` every `poll_interval` until it reaches a terminal state.
    ///
    /// Returns `Ok(())` on SUCCEEDED, `Error::TaskFailed` on FAILED, and
    /// `Error::TaskTimeout` if no terminal state is reached within `timeout`.
    pub async fn wait_for_task(
        &self,
        task: &str,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<(), Error> {
        let deadline = Instant::now() + timeout;

        loop {
            let info = self.get_task(task).await?;
            debug!(task, status = ?info.status, "task poll");

            match info.status {
                TaskStatus::Succeeded => return Ok(()),
                TaskStatus::Failed => {
                    return Err(Error::TaskFailed {
                        task: task.to_string(),
                        message: info
                            .error
                            .map(|e| e.message)
                            .filter(|m| !m.is_empty())
                            .unwrap_or_else(|| "no error detail reported".into()),
                    });
                }
                TaskStatus::Pending | TaskStatus::Running | TaskStatus::Blocked => {
                    if Instant::now() + poll_interval > deadline {
                        return Err(Error::TaskTimeout {
                            task: task.to_string(),
                            waited_secs: timeout.as_secs(),
                        });
                    }
                    sleep(poll_interval).await;
                }
            }
        }
    }
}
