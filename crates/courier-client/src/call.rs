use std::fmt;
use std::sync::Arc;

use courier_core::Outcome;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::delivery::DeliveryContext;

/// A request that has not been sent yet
///
/// Nothing happens until the call is subscribed. It then produces exactly one
/// [`Outcome`], handed to the callback on the decoder's delivery context.
/// A call is not a future, so the outcome is never observed anywhere but the
/// delivery context.
#[must_use = "a call does nothing until it is subscribed"]
pub struct Call<T> {
    pipeline: BoxFuture<'static, Outcome<T>>,
    delivery: Arc<dyn DeliveryContext>,
}

impl<T> Call<T>
where
    T: Send + 'static,
{
    pub(crate) fn new(pipeline: BoxFuture<'static, Outcome<T>>, delivery: Arc<dyn DeliveryContext>) -> Self {
        Self { pipeline, delivery }
    }

    /// Start the request and run `on_outcome` on the delivery context when
    /// it completes
    ///
    /// Must be called from within a Tokio runtime. Cancelling the returned
    /// [`Subscription`] (or dropping it) before the outcome is delivered
    /// aborts the request and `on_outcome` is never called.
    pub fn subscribe<F>(self, on_outcome: F) -> Subscription
    where
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let Self { pipeline, delivery } = self;

        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                () = task_token.cancelled() => {
                    tracing::debug!("call cancelled before completion");
                    return;
                }
                outcome = pipeline => outcome,
            };

            if task_token.is_cancelled() {
                return;
            }

            delivery.dispatch(Box::new(move || {
                if task_token.is_cancelled() {
                    tracing::debug!("call cancelled before delivery");
                    return;
                }
                on_outcome(outcome);
            }));
        });

        Subscription {
            token,
            detached: false,
        }
    }
}

impl<T> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call").finish_non_exhaustive()
    }
}

/// Handle to a subscribed call
///
/// Dropping the handle cancels the call unless it was detached.
#[must_use = "dropping a subscription cancels the call"]
#[derive(Debug)]
pub struct Subscription {
    token: CancellationToken,
    detached: bool,
}

impl Subscription {
    /// Cancel the in-flight request; no outcome is delivered afterwards
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Let the call run to completion without holding the handle
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.detached {
            self.token.cancel();
        }
    }
}
