//! Navigation-synchronized metadata controller.
//!
//! # State machine
//!
//! ```text
//! Idle --start--> Hidden | Fetching(addr) --fetch--> Displaying(block) | Hidden
//!   ^                                                        |
//!   +----------------------------stop------------------------+
//! ```
//!
//! Every asynchronous step (stabilization wait, fetch) runs as a task
//! tagged with a ticket. A completion is applied only while its ticket
//! is current: the controller is still started in the same epoch and the
//! ticket's address is the last address acted on. Anything else is an
//! overtaken result and is dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;

use super::fetcher::DocumentFetcher;
use super::frontmatter;
use crate::config::SyncConfig;
use crate::models::{Address, ControllerState, FetchOutcome, MetadataBlock, NavigationEvent};
use crate::navigation::{NavigationHost, NavigationMonitor, Watch};
use crate::utils::HttpClient;
use crate::utils::runtime::spawn_local;

// =============================================================================
// Presentation Seam
// =============================================================================

/// Consumer of the controller's output (panel, sidebar widget, ...).
pub trait Presenter {
    /// Called on every transition into `Displaying`.
    fn show(&self, block: &MetadataBlock);
    /// Called on every transition into `Hidden`, and on stop.
    fn hide(&self);
}

impl<T: Presenter> Presenter for Rc<T> {
    fn show(&self, block: &MetadataBlock) {
        (**self).show(block)
    }

    fn hide(&self) {
        (**self).hide()
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Identity of an asynchronous task.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Ticket {
    epoch: u64,
    address: Address,
}

struct Inner<H, C, P> {
    monitor: NavigationMonitor<H>,
    fetcher: DocumentFetcher<C>,
    presenter: P,
    config: SyncConfig,
    state: RefCell<ControllerState>,
    /// The only state shared between tasks
    last_acted: RefCell<Option<Address>>,
    epoch: Cell<u64>,
    started: Cell<bool>,
    watch: RefCell<Option<Watch>>,
}

/// Keeps a [`Presenter`] in sync with the metadata of the host's current
/// page.
///
/// Tasks are spawned with [`spawn_local`]; natively the controller must be
/// started from inside a `tokio::task::LocalSet`.
pub struct SyncController<H, C, P> {
    inner: Rc<Inner<H, C, P>>,
}

impl<H, C, P> SyncController<H, C, P>
where
    H: NavigationHost + 'static,
    C: HttpClient + 'static,
    P: Presenter + 'static,
{
    pub fn new(host: Rc<H>, client: C, presenter: P, config: SyncConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                monitor: NavigationMonitor::new(host),
                fetcher: DocumentFetcher::from_config(client, &config),
                presenter,
                config,
                state: RefCell::new(ControllerState::Idle),
                last_acted: RefCell::new(None),
                epoch: Cell::new(0),
                started: Cell::new(false),
                watch: RefCell::new(None),
            }),
        }
    }

    /// Subscribe to navigation and evaluate the current address at once.
    ///
    /// The initial address is taken as already canonical, so no
    /// stabilization wait happens here. Calling `start` twice is a no-op.
    pub fn start(&self) {
        let inner = &self.inner;
        if inner.started.replace(true) {
            return;
        }
        inner.epoch.set(inner.epoch.get() + 1);

        let weak: Weak<Inner<H, C, P>> = Rc::downgrade(inner);
        let watch = inner.monitor.watch(move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.on_navigation(event);
            }
        });
        *inner.watch.borrow_mut() = Some(watch);

        let current = inner.monitor.current();
        inner.act_on(current, false);
    }

    /// Detach from navigation and return to `Idle`.
    ///
    /// In-flight tasks are not aborted; their results are discarded.
    pub fn stop(&self) {
        let inner = &self.inner;
        if !inner.started.replace(false) {
            return;
        }
        inner.epoch.set(inner.epoch.get() + 1);

        let watch = inner.watch.borrow_mut().take();
        if let Some(watch) = watch {
            watch.detach();
        }
        *inner.last_acted.borrow_mut() = None;
        *inner.state.borrow_mut() = ControllerState::Idle;
        inner.presenter.hide();
    }

    pub fn state(&self) -> ControllerState {
        self.inner.state.borrow().clone()
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.get()
    }

    pub fn presenter(&self) -> &P {
        &self.inner.presenter
    }

    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }
}

impl<H, C, P> Inner<H, C, P>
where
    H: NavigationHost + 'static,
    C: HttpClient + 'static,
    P: Presenter + 'static,
{
    fn on_navigation(self: &Rc<Self>, event: NavigationEvent) {
        if !self.started.get() {
            return;
        }
        // Arriving from a provisional address: the host may still rewrite it
        let settle = event.to.is_canonical() && !event.from.is_canonical();
        self.act_on(event.to, settle);
    }

    fn act_on(self: &Rc<Self>, address: Address, settle: bool) {
        *self.last_acted.borrow_mut() = Some(address.clone());

        if !address.is_canonical() {
            self.transition(ControllerState::Hidden);
            return;
        }

        let ticket = Ticket {
            epoch: self.epoch.get(),
            address,
        };
        let this = Rc::clone(self);
        spawn_local(async move { this.run(ticket, settle).await });
    }

    async fn run(self: Rc<Self>, mut ticket: Ticket, settle: bool) {
        if settle {
            let settled = self
                .monitor
                .wait_for_canonical(self.config.stabilize_timeout_ms, self.config.stabilize_poll_ms)
                .await;
            if !self.is_current(&ticket) {
                debug!("discarding stabilization for {}", ticket.address);
                return;
            }

            let address = settled.into_address();
            if !address.is_canonical() {
                self.transition(ControllerState::Hidden);
                return;
            }
            if address != ticket.address {
                *self.last_acted.borrow_mut() = Some(address.clone());
                ticket.address = address;
            }
        }

        // Overtaken before the task first ran
        if !self.is_current(&ticket) {
            debug!("discarding queued fetch for {}", ticket.address);
            return;
        }

        let Some(page_id) = ticket.address.page_id() else {
            return;
        };
        let revision = ticket.address.revision_id();

        self.transition(ControllerState::Fetching(ticket.address.clone()));
        let outcome = self.fetcher.fetch(page_id, revision.as_deref()).await;

        if !self.is_current(&ticket) {
            debug!("discarding stale fetch for {}", ticket.address);
            return;
        }

        let block = match outcome {
            FetchOutcome::Success(doc) => frontmatter::extract(doc.as_str()),
            FetchOutcome::Empty | FetchOutcome::Failure(_) => None,
        };
        match block {
            Some(block) => self.transition(ControllerState::Displaying(block)),
            None => self.transition(ControllerState::Hidden),
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        self.started.get()
            && self.epoch.get() == ticket.epoch
            && self.last_acted.borrow().as_ref() == Some(&ticket.address)
    }

    fn transition(&self, next: ControllerState) {
        match &next {
            ControllerState::Displaying(block) => self.presenter.show(block),
            ControllerState::Hidden => self.presenter.hide(),
            ControllerState::Idle | ControllerState::Fetching(_) => {}
        }
        *self.state.borrow_mut() = next;
    }
}
