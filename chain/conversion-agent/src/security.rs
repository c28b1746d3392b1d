//! Security primitives for the conversion agent
//!
//! Reentrancy guard around the conversion flow and the single-owner
//! capability check gating every administrative operation.

use types::ids::Address;

use crate::errors::AgentError;

/// Reentrancy guard preventing nested calls into the conversion flow.
///
/// The flow acquires the guard before touching the exchange and releases it
/// on every exit path. A nested acquire fails and is counted, so the lock
/// holder can report the rejected attempts once it finishes.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyGuard {
    locked: bool,
    rejected: u32,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked (reentrancy attempt).
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            self.rejected = self.rejected.saturating_add(1);
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Number of attempts rejected since the last call, resetting the count.
    pub fn take_rejected(&mut self) -> u32 {
        std::mem::take(&mut self.rejected)
    }
}

/// Single-owner capability.
///
/// The owner is fixed at construction; there is no transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerCapability {
    owner: Address,
}

impl OwnerCapability {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        *caller == self.owner
    }

    /// Fail with `Unauthorized` unless `caller` is the owner.
    pub fn ensure(&self, caller: &Address) -> Result<(), AgentError> {
        if !self.is_owner(caller) {
            return Err(AgentError::Unauthorized { caller: *caller });
        }
        Ok(())
    }
}
