use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use fk_core::ScreenState;

/// Shared reconciliation state: the applied screen and the pass counter.
///
/// Every pass takes a generation from [`ReconcileContext::begin_pass`]. Only
/// the newest generation may apply its result; older passes finish and are
/// discarded. Nothing is cancelled.
pub struct ReconcileContext {
    screen: Mutex<ScreenState>,
    generation: AtomicU64,
}

impl ReconcileContext {
    /// Starts at [`ScreenState::Loading`] with no passes issued.
    pub fn new() -> Self {
        Self {
            screen: Mutex::new(ScreenState::Loading),
            generation: AtomicU64::new(0),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Currently applied screen.
    pub async fn screen(&self) -> ScreenState {
        *self.screen.lock().await
    }

    /// Issue the next generation. Invalidates every earlier pass.
    pub fn begin_pass(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Apply `screen` if `generation` is still the newest, running `commit`
    /// under the same lock first. A stale pass runs neither. Returns whether
    /// it was applied.
    pub async fn apply_with<F>(&self, generation: u64, screen: ScreenState, commit: F) -> bool
    where
        F: FnOnce(),
    {
        let mut guard = self.screen.lock().await;
        if self.latest_generation() != generation {
            return false;
        }
        commit();
        *guard = screen;
        true
    }

    pub async fn apply(&self, generation: u64, screen: ScreenState) -> bool {
        self.apply_with(generation, screen, || {}).await
    }

    /// Claim a generation without a pass. Every pass already in flight is
    /// stale once this returns, including one that is mid-apply.
    pub async fn invalidate(&self) -> u64 {
        let _guard = self.screen.lock().await;
        self.begin_pass()
    }
}

impl Default for ReconcileContext {
    fn default() -> Self {
        Self::new()
    }
}
