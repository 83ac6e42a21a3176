//! Tower integration for retry-rail.
//!
//! [`RetryLayer`] wraps a cloneable service so every call runs through a
//! tokio-backed [`RetryExecutor`]: the request is cloned for each attempt,
//! failures are classified through [`FailureSource`], and the final failure
//! is returned as [`RetryError`].
//!
//! # Feature Flag
//!
//! Requires the `tower` feature:
//!
//! ```toml
//! [dependencies]
//! retry-rail = { version = "0.1", features = ["tower"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use retry_rail::notify::TracingNotifier;
//! use retry_rail::tower::RetryLayer;
//! use retry_rail::types::RetryConfig;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(RetryLayer::new(RetryConfig::default(), TracingNotifier))
//!     .service(catalog_client);
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use tower::{Layer, Service, ServiceExt};

use crate::async_ext::{RetryExecutor, RetryOptions};
use crate::notify::Notifier;
use crate::traits::FailureSource;
use crate::types::{RetryConfig, RetryError};

/// A Tower [`Layer`] that retries the wrapped service.
#[derive(Clone, Debug)]
pub struct RetryLayer<N> {
    config: RetryConfig,
    notifier: N,
}

impl<N> RetryLayer<N> {
    #[inline]
    pub const fn new(config: RetryConfig, notifier: N) -> Self {
        Self { config, notifier }
    }

    #[inline]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl<S, N: Clone> Layer<S> for RetryLayer<N> {
    type Service = RetryService<S, N>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        RetryService {
            inner,
            config: self.config,
            notifier: self.notifier.clone(),
        }
    }
}

/// A Tower [`Service`] created by [`RetryLayer`].
#[derive(Clone, Debug)]
pub struct RetryService<S, N> {
    inner: S,
    config: RetryConfig,
    notifier: N,
}

impl<S, N> RetryService<S, N> {
    #[inline]
    pub const fn new(inner: S, config: RetryConfig, notifier: N) -> Self {
        Self {
            inner,
            config,
            notifier,
        }
    }

    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Future returned by [`RetryService`].
pub type RetryFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, RetryError<E>>> + Send>>;

impl<S, N, Request> Service<Request> for RetryService<S, N>
where
    S: Service<Request> + Clone + Send + 'static,
    S::Response: Send + 'static,
    S::Error: FailureSource + Send + 'static,
    S::Future: Send + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
    Request: Clone + Send + 'static,
{
    type Response = S::Response;
    type Error = RetryError<S::Error>;
    type Future = RetryFuture<S::Response, S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(|e| {
            let failure = e.classify();
            RetryError::new(e, failure, 0, false, None)
        })
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // Keep the instance `poll_ready` drove for this call, leave a fresh clone behind.
        let clone = self.inner.clone();
        let service = core::mem::replace(&mut self.inner, clone);
        let executor = RetryExecutor::with_tokio(self.config, self.notifier.clone());

        Box::pin(async move {
            executor
                .execute_with_retry(
                    move || service.clone().oneshot(request.clone()),
                    RetryOptions::new(),
                )
                .await
        })
    }
}
