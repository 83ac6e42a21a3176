use core::fmt;

type Callback<'a, A> = Box<dyn FnOnce(&A) + Send + 'a>;

/// Per-invocation options for
/// [`RetryExecutor::execute_with_retry`](super::RetryExecutor::execute_with_retry).
///
/// Every callback fires at most once per invocation.
///
/// # Example
///
/// ```rust
/// use retry_rail::async_ext::RetryOptions;
/// use retry_rail::types::ClassifiedFailure;
///
/// let options = RetryOptions::<u32, ClassifiedFailure>::new()
///     .on_success(|order_id| println!("placed order {order_id}"))
///     .on_error(|err| eprintln!("checkout failed: {err}"))
///     .custom_error_message("Checkout failed. Your cart was kept.");
///
/// assert!(options.notifies_on_error());
/// ```
pub struct RetryOptions<'a, T, E> {
    pub(crate) on_success: Option<Callback<'a, T>>,
    pub(crate) on_error: Option<Callback<'a, E>>,
    pub(crate) on_max_retries_reached: Option<Callback<'a, E>>,
    pub(crate) notify_on_error: bool,
    pub(crate) custom_error_message: Option<String>,
}

impl<T, E> Default for RetryOptions<'_, T, E> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
            on_max_retries_reached: None,
            notify_on_error: true,
            custom_error_message: None,
        }
    }
}

impl<'a, T, E> RetryOptions<'a, T, E> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the result of the successful attempt.
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'a,
    {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Called with the last error when the invocation fails for good.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'a,
    {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Called before `on_error` when the attempt budget was used up.
    pub fn on_max_retries_reached<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'a,
    {
        self.on_max_retries_reached = Some(Box::new(f));
        self
    }

    /// Enables or disables the retry warning and the final error notification.
    #[inline]
    pub fn notify_on_error(mut self, notify: bool) -> Self {
        self.notify_on_error = notify;
        self
    }

    /// Replaces the classified user message of the final failure.
    #[inline]
    pub fn custom_error_message(mut self, message: impl Into<String>) -> Self {
        self.custom_error_message = Some(message.into());
        self
    }

    #[inline]
    pub fn notifies_on_error(&self) -> bool {
        self.notify_on_error
    }
}

impl<T, E> fmt::Debug for RetryOptions<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field(
                "on_max_retries_reached",
                &self.on_max_retries_reached.is_some(),
            )
            .field("notify_on_error", &self.notify_on_error)
            .field("custom_error_message", &self.custom_error_message)
            .finish()
    }
}
