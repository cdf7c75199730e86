//! Navigation monitoring for single-page hosts.
//!
//! Hosts change the address through history mutation rather than page
//! loads. A [`NavigationHost`] reports the current address and calls back
//! after every mutation; [`NavigationMonitor`] turns those calls into
//! deduplicated [`NavigationEvent`]s and can wait for a provisional address
//! to settle into canonical form.
//!
//! Adapters:
//! - [`MemoryHistory`] - Programmatic history for tests and native hosts
//! - `BrowserHistory` - Wraps `window.history` (wasm32 only)

#[cfg(target_arch = "wasm32")]
mod browser;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;
pub use memory::MemoryHistory;

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::models::{Address, NavigationEvent};
use crate::utils::runtime::sleep;

// =============================================================================
// Host Capability
// =============================================================================

/// Undo handle returned by [`NavigationHost::install`].
///
/// Runs its restore action exactly once, on [`Detach::run`] or drop.
pub struct Detach(Option<Box<dyn FnOnce()>>);

impl Detach {
    pub fn new(restore: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(restore)))
    }

    /// A handle with nothing to undo.
    pub fn noop() -> Self {
        Self(None)
    }

    pub fn run(mut self) {
        if let Some(restore) = self.0.take() {
            restore();
        }
    }
}

impl Drop for Detach {
    fn drop(&mut self) {
        if let Some(restore) = self.0.take() {
            restore();
        }
    }
}

/// Address-change subscription capability of a host application.
pub trait NavigationHost {
    /// Current address of the host.
    fn current(&self) -> Address;

    /// Call `notify` after every push, replace and back/forward operation
    /// has completed, until the returned handle is detached.
    fn install(&self, notify: Rc<dyn Fn()>) -> Detach;
}

// =============================================================================
// Monitor
// =============================================================================

/// Outcome of [`NavigationMonitor::wait_for_canonical`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settled {
    /// The address reached canonical form in time
    Canonical(Address),
    /// The bound elapsed; holds the address at that moment
    TimedOut(Address),
}

impl Settled {
    pub fn into_address(self) -> Address {
        match self {
            Self::Canonical(address) | Self::TimedOut(address) => address,
        }
    }
}

/// Active subscription created by [`NavigationMonitor::watch`].
///
/// Dropping it detaches as well.
pub struct Watch {
    restore: Detach,
}

impl Watch {
    /// Stop observing and restore the host.
    pub fn detach(self) {
        self.restore.run();
    }
}

/// Detects address changes on a [`NavigationHost`].
pub struct NavigationMonitor<H> {
    host: Rc<H>,
}

impl<H: NavigationHost + 'static> NavigationMonitor<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self { host }
    }

    pub fn current(&self) -> Address {
        self.host.current()
    }

    /// Invoke `callback` once per actual change of `path + query`.
    ///
    /// Host operations that leave the address unchanged (such as pushing
    /// the current address again) produce no event.
    pub fn watch<F>(&self, callback: F) -> Watch
    where
        F: Fn(NavigationEvent) + 'static,
    {
        let last = RefCell::new(self.host.current());
        let host = Rc::downgrade(&self.host);

        let notify: Rc<dyn Fn()> = Rc::new(move || {
            let Some(host) = host.upgrade() else {
                return;
            };
            let now = host.current();
            let from = {
                let mut last = last.borrow_mut();
                if *last == now {
                    return;
                }
                std::mem::replace(&mut *last, now.clone())
            };
            callback(NavigationEvent { from, to: now });
        });

        Watch {
            restore: self.host.install(notify),
        }
    }

    /// Poll until the address is canonical or `timeout_ms` has elapsed.
    ///
    /// Never fails: on timeout the address current at that moment is
    /// returned as [`Settled::TimedOut`].
    pub async fn wait_for_canonical(&self, timeout_ms: u32, poll_ms: u32) -> Settled {
        let poll_ms = poll_ms.max(1);
        let mut waited = 0;

        loop {
            let address = self.host.current();
            if address.is_canonical() {
                return Settled::Canonical(address);
            }
            if waited >= timeout_ms {
                debug!("address {} did not stabilize within {}ms", address, timeout_ms);
                return Settled::TimedOut(address);
            }
            let step = poll_ms.min(timeout_ms - waited);
            sleep(step).await;
            waited += step;
        }
    }
}
