use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, MutexGuard};

// ---------------------------------------------------------------------------
// Domain
// ---------------------------------------------------------------------------

/// A resource domain guarded by its own gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    Contributors,
    Images,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contributors => write!(f, "contributors"),
            Self::Images => write!(f, "images"),
        }
    }
}

// ---------------------------------------------------------------------------
// ResourceGate
// ---------------------------------------------------------------------------

/// A binary mutual-exclusion gate for one resource domain.
///
/// Entering blocks the calling task until the gate is free; there is no
/// timeout and entering cannot fail. Not re-entrant: a task that enters
/// twice without dropping the first guard deadlocks.
pub struct ResourceGate {
    domain: Domain,
    lock: Mutex<()>,
}

impl ResourceGate {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            lock: Mutex::new(()),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Wait for the gate and hold it until the guard is dropped.
    pub async fn enter(&self) -> GateGuard<'_> {
        let waiting = Instant::now();
        let guard = self.lock.lock().await;
        tracing::trace!(
            domain = %self.domain,
            waited_us = waiting.elapsed().as_micros() as u64,
            "gate entered"
        );
        GateGuard {
            _guard: guard,
            domain: self.domain,
            entered: Instant::now(),
        }
    }

    /// Take the gate only if it is free right now.
    pub fn try_enter(&self) -> Option<GateGuard<'_>> {
        self.lock.try_lock().ok().map(|guard| GateGuard {
            _guard: guard,
            domain: self.domain,
            entered: Instant::now(),
        })
    }
}

impl fmt::Debug for ResourceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceGate")
            .field("domain", &self.domain)
            .field("held", &self.lock.try_lock().is_err())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// GateGuard
// ---------------------------------------------------------------------------

/// Proof of holding a gate. The gate is released when this is dropped,
/// including on early returns and `?` propagation.
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct GateGuard<'a> {
    _guard: MutexGuard<'a, ()>,
    domain: Domain,
    entered: Instant,
}

impl GateGuard<'_> {
    pub fn domain(&self) -> Domain {
        self.domain
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        tracing::trace!(
            domain = %self.domain,
            held_us = self.entered.elapsed().as_micros() as u64,
            "gate released"
        );
    }
}

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

/// The pair of gates owned by one service instance.
#[derive(Clone, Debug)]
pub struct Gates {
    pub contributors: Arc<ResourceGate>,
    pub images: Arc<ResourceGate>,
}

impl Gates {
    pub fn new() -> Self {
        Self {
            contributors: Arc::new(ResourceGate::new(Domain::Contributors)),
            images: Arc::new(ResourceGate::new(Domain::Images)),
        }
    }

    /// The gate for `domain`.
    pub fn gate(&self, domain: Domain) -> &Arc<ResourceGate> {
        match domain {
            Domain::Contributors => &self.contributors,
            Domain::Images => &self.images,
        }
    }
}

impl Default for Gates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn guard_releases_on_drop() {
        let gate = ResourceGate::new(Domain::Contributors);
        {
            let held = gate.enter().await;
            assert_eq!(held.domain(), Domain::Contributors);
            assert!(gate.try_enter().is_none());
        }
        assert!(gate.try_enter().is_some());
    }

    #[tokio::test]
    async fn guard_releases_on_error_path() {
        async fn guarded(gate: &ResourceGate, fail: bool) -> Result<(), &'static str> {
            let _held = gate.enter().await;
            if fail {
                return Err("boom");
            }
            Ok(())
        }
        let gate = ResourceGate::new(Domain::Images);
        assert!(guarded(&gate, true).await.is_err());
        assert!(gate.try_enter().is_some());
    }

    #[tokio::test]
    async fn gates_are_independent() {
        let gates = Gates::new();
        let _contributors = gates.contributors.enter().await;
        assert!(gates.images.try_enter().is_some());
        assert!(gates.gate(Domain::Contributors).try_enter().is_none());
    }

    #[tokio::test]
    async fn separate_instances_do_not_share_gates() {
        let a = Gates::new();
        let b = Gates::new();
        let _held = a.images.enter().await;
        assert!(b.images.try_enter().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn holders_never_overlap() {
        let gate = Arc::new(ResourceGate::new(Domain::Contributors));
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let inside = Arc::clone(&inside);
                let max_seen = Arc::clone(&max_seen);
                tokio::spawn(async move {
                    let _held = gate.enter().await;
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for task in tasks {
            task.await.expect("task should not panic");
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn debug_reports_held_state() {
        let gate = ResourceGate::new(Domain::Images);
        assert!(format!("{gate:?}").contains("held: false"));
        let _held = gate.enter().await;
        assert!(format!("{gate:?}").contains("held: true"));
    }

    #[test]
    fn domain_display() {
        assert_eq!(Domain::Contributors.to_string(), "contributors");
        assert_eq!(Domain::Images.to_string(), "images");
    }
}
