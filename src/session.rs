//! Per-session proof memo
//!
//! A wallet session asks "is the connected account eligible?" many times
//! (every re-render, every reconnect). The answer is computed once per
//! connected address and then handed out as the same immutable value.

use crate::tree::{Eligibility, TreeState};
use crate::Result;
use alloy_primitives::Address;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Memoizes the eligibility of the currently connected account
pub struct ProofSession {
    state: Arc<TreeState>,
    current: Mutex<Option<(Address, Arc<Eligibility>)>>,
}

impl ProofSession {
    pub fn new(state: Arc<TreeState>) -> Self {
        ProofSession {
            state,
            current: Mutex::new(None),
        }
    }

    /// Eligibility for `address`, computed at most once while it stays
    /// connected. Switching to another address replaces the memo.
    ///
    /// A corrupted tree yields an error every time and nothing is cached.
    pub fn eligibility(&self, address: &Address) -> Result<Arc<Eligibility>> {
        let mut current = self.current.lock();

        if let Some((connected, eligibility)) = current.as_ref() {
            if connected == address {
                return Ok(Arc::clone(eligibility));
            }
        }

        let eligibility = Arc::new(self.state.query(address)?);
        debug!(
            %address,
            eligible = eligibility.is_eligible(),
            "computed session eligibility"
        );
        *current = Some((*address, Arc::clone(&eligibility)));
        Ok(eligibility)
    }

    /// The connected address and its memoized answer, if any
    pub fn current(&self) -> Option<(Address, Arc<Eligibility>)> {
        self.current.lock().clone()
    }

    /// Forget the connected account
    pub fn disconnect(&self) {
        self.current.lock().take();
    }

    pub fn state(&self) -> &Arc<TreeState> {
        &self.state
    }
}
