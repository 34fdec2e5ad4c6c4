use rand::Rng;

use fk_core::ports::ActivityPort;

/// Step source used until a pedometer integration exists. Returns a random
/// count in `3000..8000` on every call.
pub struct SimulatedActivity;

impl ActivityPort for SimulatedActivity {
    fn steps_today(&self, _user_id: &str) -> u32 {
        rand::rng().random_range(3000..8000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_stay_in_range() {
        for _ in 0..100 {
            let steps = SimulatedActivity.steps_today("u1");
            assert!((3000..8000).contains(&steps));
        }
    }
}
