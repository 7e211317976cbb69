//! # LLM Client Module
//!
//! Builds the completion model used by the structured extractor, with
//! built-in rate limiting to prevent API quota exhaustion.
//!
//! ## Key Components
//!
//! - `RateLimitedCompletionModel`: A wrapper that adds rate limiting to any completion model
//! - `gemini_completion_model`: Gemini model wrapped in a per-minute quota
//!
//! The API key is passed in explicitly; nothing here reads the environment.

use std::num::NonZeroU32;

use governor::{Quota, RateLimiter};
use rig::providers::gemini;

#[cfg(test)]
pub mod mock_model;
pub mod ratelimited_completion;

pub use ratelimited_completion::RateLimitedCompletionModel;

/// Rate-limited Gemini completion model
pub type GeminiCompletionModel = RateLimitedCompletionModel<gemini::completion::CompletionModel>;

/// Create a Gemini completion model limited to `requests_per_minute`
///
/// A quota of zero is raised to one request per minute.
pub fn gemini_completion_model(
    api_key: &str,
    model: &str,
    requests_per_minute: u32,
) -> GeminiCompletionModel {
    let gemini_client = gemini::Client::new(api_key);
    RateLimitedCompletionModel::new(
        gemini_client.completion_model(model),
        RateLimiter::direct(per_minute_quota(requests_per_minute)),
    )
}

fn per_minute_quota(requests_per_minute: u32) -> Quota {
    Quota::per_minute(NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quota_is_raised_to_one() {
        assert_eq!(per_minute_quota(0), Quota::per_minute(NonZeroU32::MIN));
        assert_eq!(
            per_minute_quota(30),
            Quota::per_minute(NonZeroU32::new(30).unwrap())
        );
    }
}
