use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One stay of a view on screen, as handed out by [`Mounted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit(u64);

/// Tracks which visit of a view is on screen. Every `mount`/`unmount` starts
/// a new generation; even generations are on screen. A response is applied
/// only if the visit that sent it is still the current one.
#[derive(Debug, Clone, Default)]
pub struct Mounted {
    generation: Arc<AtomicU64>,
}

impl Mounted {
    pub fn current(&self) -> Visit {
        Visit(self.generation.load(Ordering::Acquire))
    }

    pub fn is_live(&self) -> bool {
        self.current().0 % 2 == 0
    }

    pub fn is_current(&self, visit: Visit) -> bool {
        visit.0 % 2 == 0 && self.current() == visit
    }

    /// Starts a new visit, even if the previous one was never left.
    pub fn mount(&self) -> Visit {
        let next = |g: u64| if g % 2 == 0 { g + 2 } else { g + 1 };
        let prev = self
            .generation
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |g| Some(next(g)))
            .unwrap_or_else(|g| g);
        Visit(next(prev))
    }

    pub fn unmount(&self) {
        // Already off screen: nothing to end.
        let _ = self
            .generation
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |g| {
                (g % 2 == 0).then_some(g + 1)
            });
    }
}

/// One-mutation-at-a-time lock for a view. Acquiring is synchronous, so the
/// view is already marked pending when the request future is created;
/// dropping the guard re-enables the controls on every exit path.
///
/// The lock belongs to the visit that took it. A request still in flight
/// from an earlier visit does not block the current one.
#[derive(Debug, Clone, Default)]
pub struct PendingLock {
    /// 0 when free, otherwise the holder's generation + 1.
    holder: Arc<AtomicU64>,
    mounted: Mounted,
}

impl PendingLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_view(mounted: Mounted) -> Self {
        Self {
            holder: Arc::default(),
            mounted,
        }
    }

    /// `None` while another mutation of the current visit holds the lock.
    pub fn try_acquire(&self) -> Option<PendingGuard> {
        let visit = self.mounted.current();
        let mine = visit.0 + 1;
        self.holder
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |held| {
                (held != mine).then_some(mine)
            })
            .ok()?;
        Some(PendingGuard {
            holder: Arc::clone(&self.holder),
            mine,
            visit,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.holder.load(Ordering::Acquire) == self.mounted.current().0 + 1
    }
}

#[derive(Debug)]
pub struct PendingGuard {
    holder: Arc<AtomicU64>,
    mine: u64,
    visit: Visit,
}

impl PendingGuard {
    /// The visit this mutation was started from.
    pub fn visit(&self) -> Visit {
        self.visit
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        // A later visit may have taken the lock over; leave it alone then.
        let _ = self
            .holder
            .compare_exchange(self.mine, 0, Ordering::AcqRel, Ordering::Acquire);
    }
}
