//! Online/offline tracking.
//!
//! A [`ConnectivityObserver`] subscribes to the two transition events of a
//! [`ConnectivityHost`], keeps the current state, and tells a [`Notifier`]
//! when the connection is lost or restored. Detaching (or dropping) the
//! observer unsubscribes both listeners.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use retry_rail::connectivity::{ConnectivityObserver, ManualHost};
//! use retry_rail::notify::{RecordingNotifier, Severity};
//!
//! let host = Arc::new(ManualHost::new(true));
//! let sink = Arc::new(RecordingNotifier::new());
//! let observer = ConnectivityObserver::attach(host.clone(), sink.clone());
//!
//! host.set_online(false);
//! assert!(!observer.is_online());
//! assert_eq!(sink.count(Severity::Error), 1);
//!
//! host.set_online(true);
//! assert_eq!(sink.count(Severity::Success), 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::notify::Notifier;
use crate::types::messages;

/// Direction of a connectivity change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    Online,
    Offline,
}

impl Transition {
    #[inline]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Handle returned by [`ConnectivityHost::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked for a transition event.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Environment that reports connectivity: a browser window, an OS network
/// monitor, a test double.
pub trait ConnectivityHost {
    /// Current connectivity flag.
    fn is_online(&self) -> bool;

    /// Registers `listener` for `transition` events.
    fn add_listener(&self, transition: Transition, listener: Listener) -> ListenerId;

    /// Unregisters a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

impl<H: ConnectivityHost + ?Sized> ConnectivityHost for Arc<H> {
    #[inline]
    fn is_online(&self) -> bool {
        (**self).is_online()
    }

    #[inline]
    fn add_listener(&self, transition: Transition, listener: Listener) -> ListenerId {
        (**self).add_listener(transition, listener)
    }

    #[inline]
    fn remove_listener(&self, id: ListenerId) {
        (**self).remove_listener(id);
    }
}

#[derive(Default)]
struct HostState {
    online: bool,
    next_id: u64,
    listeners: Vec<(ListenerId, Transition, Listener)>,
}

/// In-process host driven by explicit calls.
///
/// Embedders bridge their platform's network notifications into
/// [`set_online`](Self::set_online); tests drive it directly.
#[derive(Default)]
pub struct ManualHost {
    state: Mutex<HostState>,
}

impl ManualHost {
    pub fn new(online: bool) -> Self {
        Self {
            state: Mutex::new(HostState {
                online,
                ..HostState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Updates the flag and fires the matching transition if it changed.
    pub fn set_online(&self, online: bool) {
        let changed = {
            let mut state = self.state();
            let changed = state.online != online;
            state.online = online;
            changed
        };
        if changed {
            let transition = if online {
                Transition::Online
            } else {
                Transition::Offline
            };
            self.fire(transition);
        }
    }

    /// Sets the flag to match `transition` and fires it unconditionally.
    pub fn emit(&self, transition: Transition) {
        self.state().online = transition.is_online();
        self.fire(transition);
    }

    pub fn listener_count(&self) -> usize {
        self.state().listeners.len()
    }

    // Listeners run outside the lock so they may call back into the host.
    fn fire(&self, transition: Transition) {
        let listeners: Vec<Listener> = self
            .state()
            .listeners
            .iter()
            .filter(|(_, t, _)| *t == transition)
            .map(|(_, _, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl ConnectivityHost for ManualHost {
    fn is_online(&self) -> bool {
        self.state().online
    }

    fn add_listener(&self, transition: Transition, listener: Listener) -> ListenerId {
        let mut state = self.state();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, transition, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.state()
            .listeners
            .retain(|(existing, _, _)| *existing != id);
    }
}

impl fmt::Debug for ManualHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("ManualHost")
            .field("online", &state.online)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

/// Tracks the connectivity of a host and notifies on transitions.
///
/// Events that do not change the tracked state are ignored, so a repeated
/// `offline` event produces a single error notification.
pub struct ConnectivityObserver<H: ConnectivityHost> {
    host: H,
    online: Arc<AtomicBool>,
    subscriptions: Option<[ListenerId; 2]>,
}

impl<H: ConnectivityHost> ConnectivityObserver<H> {
    /// Reads the initial state from `host` and subscribes to both transitions.
    pub fn attach<N>(host: H, notifier: N) -> Self
    where
        N: Notifier + Send + Sync + 'static,
    {
        let online = Arc::new(AtomicBool::new(host.is_online()));
        let notifier = Arc::new(notifier);

        let on_online = {
            let online = Arc::clone(&online);
            let notifier = Arc::clone(&notifier);
            Arc::new(move || {
                if !online.swap(true, Ordering::AcqRel) {
                    #[cfg(feature = "tracing")]
                    tracing::info!("connectivity restored");
                    notifier.success(messages::CONNECTION_RESTORED);
                }
            })
        };
        let on_offline = {
            let online = Arc::clone(&online);
            Arc::new(move || {
                if online.swap(false, Ordering::AcqRel) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("connectivity lost");
                    notifier.error(messages::CONNECTION_LOST);
                }
            })
        };

        let online_id = host.add_listener(Transition::Online, on_online);
        let offline_id = host.add_listener(Transition::Offline, on_offline);

        Self {
            host,
            online,
            subscriptions: Some([online_id, offline_id]),
        }
    }

    #[inline]
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.subscriptions.is_some()
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Unsubscribes both listeners. Equivalent to dropping the observer.
    pub fn detach(mut self) {
        self.unsubscribe();
    }

    fn unsubscribe(&mut self) {
        if let Some(ids) = self.subscriptions.take() {
            for id in ids {
                self.host.remove_listener(id);
            }
        }
    }
}

impl<H: ConnectivityHost> Drop for ConnectivityObserver<H> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl<H: ConnectivityHost + fmt::Debug> fmt::Debug for ConnectivityObserver<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectivityObserver")
            .field("host", &self.host)
            .field("online", &self.is_online())
            .field("attached", &self.is_attached())
            .finish()
    }
}
