//! Effect handlers for the TUI runtime.
//!
//! Handlers perform the async work behind an effect and return its result.
//! They never touch UI state.

use std::sync::Arc;
use std::time::Duration;

use tabgate_core::identity::{IdentityError, IdentityProvider, SignInChannel, SignInRequest};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::events::IdentityResult;

/// Runs one identity exchange, honoring cancellation during the wait.
pub async fn identity_exchange(
    provider: Arc<dyn IdentityProvider>,
    request: SignInRequest,
    delay: Duration,
    cancel: Option<CancellationToken>,
) -> IdentityResult {
    let channel: SignInChannel = request.channel;
    let cancel = cancel.unwrap_or_default();

    let outcome = tokio::select! {
        () = cancel.cancelled() => {
            debug!(%channel, "identity exchange cancelled");
            Err(IdentityError::Cancelled)
        }
        () = tokio::time::sleep(delay) => provider.authenticate(&request),
    };

    IdentityResult { channel, outcome }
}

#[cfg(test)]
mod tests {
    use tabgate_core::identity::{AppleOutcome, SimulatedProvider};

    use super::*;

    fn request(channel: SignInChannel) -> SignInRequest {
        SignInRequest {
            channel,
            phone: Some("+393401234567".into()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exchange_completes_after_delay() {
        let provider: Arc<dyn IdentityProvider> = Arc::new(SimulatedProvider::default());
        let result = identity_exchange(
            provider,
            request(SignInChannel::Sms),
            Duration::from_millis(600),
            None,
        )
        .await;
        assert_eq!(result.channel, SignInChannel::Sms);
        assert!(result.outcome.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_exchange_reports_cancelled() {
        let provider: Arc<dyn IdentityProvider> = Arc::new(SimulatedProvider::default());
        let token = CancellationToken::new();
        token.cancel();
        let result = identity_exchange(
            provider,
            request(SignInChannel::WhatsApp),
            Duration::from_secs(60),
            Some(token),
        )
        .await;
        assert_eq!(result.outcome, Err(IdentityError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn apple_failure_is_rejected() {
        let provider: Arc<dyn IdentityProvider> =
            Arc::new(SimulatedProvider::new(AppleOutcome::Failure));
        let result = identity_exchange(
            provider,
            request(SignInChannel::Apple),
            Duration::ZERO,
            None,
        )
        .await;
        assert!(matches!(result.outcome, Err(IdentityError::Rejected { .. })));
    }
}
