use crate::error::DiscoveryError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Caller-owned cancellation and deadline for one discovery call.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Non-blocking probe; cancellation is reported before an elapsed deadline.
    pub fn check(&self) -> Result<(), DiscoveryError> {
        if self.cancel.is_cancelled() {
            return Err(DiscoveryError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(DiscoveryError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drives `fut` until it finishes or the context is cancelled or expires.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, DiscoveryError> {
        self.check()?;
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DiscoveryError::Cancelled),
            _ = deadline => Err(DiscoveryError::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}
