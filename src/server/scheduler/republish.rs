use tokio_cron_scheduler::{Job, JobSchedulerError};

use crate::server::state::AppState;

/// Every 5 minutes.
const SCHEDULE: &str = "0 */5 * * * *";

/// Republishes the online set so a missed or overwritten write heals itself.
pub fn job(state: AppState) -> Result<Job, JobSchedulerError> {
    Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            tracing::debug!("Republishing online friend codes");
            state.store.republish().await;
        })
    })
}
