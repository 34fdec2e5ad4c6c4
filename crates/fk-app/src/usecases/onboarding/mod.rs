mod complete;
mod flow;

pub use complete::{CompleteOnboarding, OnboardingCompletion};
pub use flow::OnboardingFlow;
