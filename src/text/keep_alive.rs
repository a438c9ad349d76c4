//! Host keep-alive bookkeeping
//!
//! Some hosts tear the plugin process down as soon as the current script returns,
//! even while exports are still in flight. The host offers a single switch to keep
//! the process around. This registry owns that switch: every piece of pending work
//! registers a request, the switch is turned on with the first one and off again
//! once the last one is released.
//!
//! The registry is a plain value with a single owner. There is no process-wide
//! state; whoever drives the exports holds the registry.

use std::collections::BTreeSet;

/// The host's keep-alive switch.
pub trait KeepAliveHost {
    fn set_keep_alive(&mut self, keep_alive: bool);
}

/// A host without a keep-alive switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopHost;

impl KeepAliveHost for NoopHost {
    fn set_keep_alive(&mut self, _keep_alive: bool) {}
}

/// Identifies one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Tracks outstanding requests and drives the host switch.
#[derive(Debug)]
pub struct KeepAliveRegistry<H> {
    host: H,
    outstanding: BTreeSet<RequestId>,
    next_id: u64,
    engaged: bool,
}

impl<H: KeepAliveHost> KeepAliveRegistry<H> {
    pub fn new(host: H) -> Self {
        KeepAliveRegistry {
            host,
            outstanding: BTreeSet::new(),
            next_id: 0,
            engaged: false,
        }
    }

    /// Register a new request, engaging the host switch if it was off.
    pub fn acquire(&mut self) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        if !self.engaged {
            self.host.set_keep_alive(true);
            self.engaged = true;
            log::debug!("host keep-alive engaged");
        }
        self.outstanding.insert(id);
        id
    }

    /// Release a request. Returns `false` for ids that were not outstanding,
    /// which leaves everything untouched.
    pub fn release(&mut self, id: RequestId) -> bool {
        if !self.outstanding.remove(&id) {
            return false;
        }
        if self.outstanding.is_empty() && self.engaged {
            self.host.set_keep_alive(false);
            self.engaged = false;
            log::debug!("host keep-alive released");
        }
        true
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: KeepAliveHost + Default> Default for KeepAliveRegistry<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}
