use std::sync::Arc;

use governor::DefaultDirectRateLimiter;
use rig::completion::{
    self, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
};
use tracing::{debug_span, info_span, Instrument};

/// Raw provider response carried through the rate limiter
pub struct RateLimitResponse<T> {
    #[allow(dead_code)]
    response: T,
}

/// Completion model that waits on a shared quota before every request
#[derive(Clone)]
pub struct RateLimitedCompletionModel<M: CompletionModel> {
    model: M,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl<M> RateLimitedCompletionModel<M>
where
    M: CompletionModel,
{
    pub fn new(model: M, limiter: DefaultDirectRateLimiter) -> Self {
        Self {
            model,
            limiter: Arc::new(limiter),
        }
    }
}

impl<M: CompletionModel> CompletionModel for RateLimitedCompletionModel<M> {
    type Response = RateLimitResponse<M::Response>;

    async fn completion(
        &self,
        completion_request: CompletionRequest,
    ) -> Result<completion::CompletionResponse<Self::Response>, CompletionError> {
        self.limiter
            .until_ready()
            .instrument(debug_span!("limiter"))
            .await;
        let response = self
            .model
            .completion(completion_request)
            .instrument(info_span!("completion"))
            .await;
        response.map(|response| CompletionResponse {
            choice: response.choice,
            raw_response: RateLimitResponse {
                response: response.raw_response,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock_model::MockCompletionModel;
    use governor::{Quota, RateLimiter};
    use rig::completion::AssistantContent;
    use std::num::NonZeroU32;

    #[tokio::test]
    async fn test_passes_choice_through() {
        let mock = MockCompletionModel::new();
        mock.set_text_response("hello").await;
        let model = RateLimitedCompletionModel::new(
            mock,
            RateLimiter::direct(Quota::per_minute(NonZeroU32::new(60).unwrap())),
        );

        let response = model.completion_request("hi").send().await.unwrap();

        let texts: Vec<String> = response
            .choice
            .iter()
            .filter_map(|c| match c {
                AssistantContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["hello".to_string()]);
    }
}
