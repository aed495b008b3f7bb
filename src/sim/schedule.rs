//! Deferred effects resolved on the simulation clock
//!
//! Every entry is stamped with the epoch it was created in. A reset bumps
//! the epoch, so anything queued before it can never fire afterwards.

/// Tolerance for treating a countdown as elapsed (absorbs float drift
/// from summing many small frame times)
pub const FIRE_EPSILON: f32 = 1e-6;

/// Effects that happen some time after their cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Put a fresh target on the field
    RespawnTarget,
    /// Remove the projectile from this launch if it is still live
    ExpireProjectile { shot: u32 },
    /// Allow the next launch
    Rearm,
}

/// A pending deferred effect
#[derive(Debug, Clone)]
pub struct Scheduled {
    pub epoch: u32,
    /// Seconds left before firing
    pub remaining: f32,
    pub action: Deferred,
}

/// Ordered queue of pending effects
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<Scheduled>,
}

impl Schedule {
    pub fn push(&mut self, epoch: u32, delay: f32, action: Deferred) {
        self.entries.push(Scheduled {
            epoch,
            remaining: delay,
            action,
        });
    }

    /// Age every entry by `dt` and return the ones that came due, in the
    /// order they were scheduled. Entries from other epochs are dropped.
    pub fn advance(&mut self, epoch: u32, dt: f32) -> Vec<Deferred> {
        let mut due = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.epoch != epoch {
                log::debug!("Dropping stale {:?} from epoch {}", entry.action, entry.epoch);
                return false;
            }
            entry.remaining -= dt;
            if entry.remaining <= FIRE_EPSILON {
                due.push(entry.action);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
