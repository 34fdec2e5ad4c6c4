use crate::auth::ScreenState;

#[async_trait::async_trait]
pub trait ScreenEventPort: Send + Sync {
    /// Called whenever a reconciliation pass applies a new screen.
    async fn emit_screen_changed(&self, screen: ScreenState, generation: u64);
}
