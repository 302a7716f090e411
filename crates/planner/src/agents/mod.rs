//! Single-shot grounded search agents.
//!
//! Each agent asks the model once per attempt, picks one result at random
//! and retries immediately on any failure. When every attempt fails the
//! agent returns a fixed placeholder, so callers always get a record.

mod flights;
mod hotels;

pub use flights::{pick_flight, FlightAgent, FlightQuote};
pub use hotels::{pick_hotel, HotelAgent, HotelQuote};

use std::future::Future;

use tw_domain::trace::TraceEvent;

#[derive(thiserror::Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Generation(#[from] tw_domain::Error),

    #[error("response did not contain usable results")]
    NoResults,
}

/// Run `attempt` up to `max_attempts` times. `None` means every attempt
/// failed; the fallback has already been logged.
pub(crate) async fn with_retries<T, F, Fut>(agent: &str, max_attempts: u32, mut attempt: F) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AgentError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut last_error = String::new();

    for n in 1..=max_attempts {
        match attempt(n).await {
            Ok(v) => return Some(v),
            Err(e) => {
                tracing::warn!(agent, attempt = n, max_attempts, error = %e, "agent attempt failed");
                last_error = e.to_string();
            }
        }
    }

    tracing::error!(agent, attempts = max_attempts, "all agent attempts failed, using placeholder");
    TraceEvent::AgentFallback {
        agent: agent.to_string(),
        attempts: max_attempts,
        last_error,
    }
    .emit();
    None
}
