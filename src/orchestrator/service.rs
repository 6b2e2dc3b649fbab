//! Asynchronous trigger → compute → publish flow.

use super::publisher::ResultPublisher;
use super::sources::{ServiceSource, VolunteerSource};
use crate::assignment::{AssignmentResult, AssignmentSolver, ServiceDetails, Volunteer};
use crate::error::AssignResult;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::runtime::{Builder, Handle};
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

pub const NO_VOLUNTEERS_MESSAGE: &str = "No volunteers with preferences available for assignment.";
pub const NO_SERVICES_MESSAGE: &str = "No services available for assignment.";

/// Computes an assignment for a non-empty snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait Optimizer: Send + Sync {
    fn optimize(
        &self,
        volunteers: &BTreeMap<String, Volunteer>,
        services: &[ServiceDetails],
    ) -> AssignResult<AssignmentResult>;
}

impl Optimizer for AssignmentSolver {
    fn optimize(
        &self,
        volunteers: &BTreeMap<String, Volunteer>,
        services: &[ServiceDetails],
    ) -> AssignResult<AssignmentResult> {
        self.solve(volunteers, services)
    }
}

/// Runs assignment searches off the caller's task and publishes every
/// outcome.
///
/// Each run snapshots both sources, so runs share nothing mutable.
/// Overlapping triggers run concurrently and publish independently.
#[derive(Clone)]
pub struct AssignmentOrchestrator {
    volunteers: Arc<dyn VolunteerSource>,
    services: Arc<dyn ServiceSource>,
    optimizer: Arc<dyn Optimizer>,
    publisher: Arc<dyn ResultPublisher>,
    runtime: Option<Handle>,
}

impl AssignmentOrchestrator {
    pub fn new(
        volunteers: Arc<dyn VolunteerSource>,
        services: Arc<dyn ServiceSource>,
        optimizer: Arc<dyn Optimizer>,
        publisher: Arc<dyn ResultPublisher>,
    ) -> Self {
        Self {
            volunteers,
            services,
            optimizer,
            publisher,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Runs triggered searches on `handle` instead of the runtime that was
    /// current at construction.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Starts one run in the background and returns immediately.
    ///
    /// Callable from any thread. Runs go to the captured runtime, else the
    /// caller's runtime, else a dedicated thread with its own runtime. The
    /// outcome reaches the caller only through the publisher.
    pub fn trigger(&self) {
        info!("optimization trigger received");
        let orchestrator = self.clone();
        let handle = self.runtime.clone().or_else(|| Handle::try_current().ok());
        match handle {
            Some(handle) => {
                handle.spawn(async move {
                    orchestrator.run().await;
                });
            }
            None => {
                debug!("no runtime available; running on a dedicated thread");
                std::thread::spawn(move || {
                    match Builder::new_current_thread().enable_all().build() {
                        Ok(runtime) => {
                            runtime.block_on(orchestrator.run());
                        }
                        Err(err) => error!(error = %err, "failed to start optimization runtime"),
                    }
                });
            }
        }
    }

    /// Runs one search to completion on the blocking pool, publishes the
    /// outcome exactly once, and returns what was published.
    ///
    /// Failures and panics inside the search become a published result
    /// whose message carries the cause; they never reach the caller.
    pub async fn run(&self) -> AssignmentResult {
        let volunteers = Arc::clone(&self.volunteers);
        let services = Arc::clone(&self.services);
        let optimizer = Arc::clone(&self.optimizer);

        let outcome = tokio::task::spawn_blocking(move || {
            compute(volunteers.as_ref(), services.as_ref(), optimizer.as_ref())
        })
        .await;

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                error!(error = %err, "optimization failed");
                AssignmentResult::empty(format!("Error during optimization: {err}"))
            }
            Err(err) => {
                let reason = join_failure(err);
                error!(reason = %reason, "optimization task aborted");
                AssignmentResult::empty(format!(
                    "Critical error during optimization process: {reason}"
                ))
            }
        };

        self.publisher.publish(result.clone());
        result
    }
}

fn compute(
    volunteers: &dyn VolunteerSource,
    services: &dyn ServiceSource,
    optimizer: &dyn Optimizer,
) -> AssignResult<AssignmentResult> {
    let volunteers = volunteers.volunteers();
    let services = services.services();

    if volunteers.is_empty() {
        warn!("no volunteers with preferences to assign");
        return Ok(AssignmentResult::empty(NO_VOLUNTEERS_MESSAGE));
    }
    if services.is_empty() {
        warn!("no services available for assignment");
        return Ok(AssignmentResult::empty(NO_SERVICES_MESSAGE));
    }

    let result = optimizer.optimize(&volunteers, &services)?;
    info!(total_cost = result.total_cost, "optimization finished");
    Ok(result)
}

/// Human-readable cause of a search task that did not return.
fn join_failure(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "search panicked".to_string()
    }
}
