/// Source of step counts.
pub trait ActivityPort: Send + Sync {
    fn steps_today(&self, user_id: &str) -> u32;
}
