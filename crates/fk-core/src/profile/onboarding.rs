//! Onboarding state machine.
//!
//! Defines a pure state transition function for the three-step onboarding
//! form. Side effects are returned as [`OnboardingAction`]s for the caller to
//! execute.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::auth::SignupPrefill;
use crate::profile::{ActivityLevel, DietPreference, Gender, Goal, Profile};

pub const AGE_RANGE: RangeInclusive<u32> = 13..=100;
pub const HEIGHT_RANGE_CM: RangeInclusive<u32> = 100..=250;
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 30.0..=300.0;

/// Form step, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum OnboardingStep {
    /// Name, gender, age.
    Personal,
    /// Height and weight.
    Body,
    /// Goal, activity level, diet preference.
    Goals,
}

impl OnboardingStep {
    pub const COUNT: u8 = 3;

    /// 1-based position.
    pub fn number(&self) -> u8 {
        match self {
            OnboardingStep::Personal => 1,
            OnboardingStep::Body => 2,
            OnboardingStep::Goals => 3,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    fn next(&self) -> Option<Self> {
        match self {
            OnboardingStep::Personal => Some(OnboardingStep::Body),
            OnboardingStep::Body => Some(OnboardingStep::Goals),
            OnboardingStep::Goals => None,
        }
    }

    fn previous(&self) -> Option<Self> {
        match self {
            OnboardingStep::Personal => None,
            OnboardingStep::Body => Some(OnboardingStep::Personal),
            OnboardingStep::Goals => Some(OnboardingStep::Body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingField {
    Name,
    Age,
    Height,
    Weight,
}

impl std::fmt::Display for OnboardingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OnboardingField::Name => "name",
            OnboardingField::Age => "age",
            OnboardingField::Height => "height",
            OnboardingField::Weight => "weight",
        })
    }
}

/// Field-level validation errors. Display strings are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
pub enum OnboardingError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a number for {field}")]
    InvalidNumber { field: OnboardingField },
    #[error("Please enter a valid age between 13 and 100")]
    AgeOutOfRange,
    #[error("Please enter a valid height between 100-250 cm")]
    HeightOutOfRange,
    #[error("Please enter a valid weight between 30-300 kg")]
    WeightOutOfRange,
}

impl OnboardingError {
    /// Field the error should be shown next to, if any.
    pub fn field(&self) -> Option<OnboardingField> {
        match self {
            OnboardingError::MissingFields => None,
            OnboardingError::InvalidNumber { field } => Some(*field),
            OnboardingError::AgeOutOfRange => Some(OnboardingField::Age),
            OnboardingError::HeightOutOfRange => Some(OnboardingField::Height),
            OnboardingError::WeightOutOfRange => Some(OnboardingField::Weight),
        }
    }
}

/// Raw form input. Numeric fields hold the text as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingForm {
    pub name: String,
    pub gender: Gender,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    pub diet_preference: DietPreference,
}

impl OnboardingForm {
    /// Empty form with the name pre-populated from a sign-up prefill.
    pub fn with_prefill(prefill: Option<&SignupPrefill>) -> Self {
        Self {
            name: prefill
                .and_then(|p| p.name.clone())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Validate the fields that belong to `step`.
    pub fn validate_step(&self, step: OnboardingStep) -> Result<(), OnboardingError> {
        match step {
            OnboardingStep::Personal => {
                if self.name.trim().is_empty() || self.age.trim().is_empty() {
                    return Err(OnboardingError::MissingFields);
                }
                let age = parse_whole(&self.age, OnboardingField::Age)?;
                if !AGE_RANGE.contains(&age) {
                    return Err(OnboardingError::AgeOutOfRange);
                }
                Ok(())
            }
            OnboardingStep::Body => {
                if self.height.trim().is_empty() || self.weight.trim().is_empty() {
                    return Err(OnboardingError::MissingFields);
                }
                let height = parse_whole(&self.height, OnboardingField::Height)?;
                if !HEIGHT_RANGE_CM.contains(&height) {
                    return Err(OnboardingError::HeightOutOfRange);
                }
                let weight = parse_weight(&self.weight)?;
                if !WEIGHT_RANGE_KG.contains(&weight) {
                    return Err(OnboardingError::WeightOutOfRange);
                }
                Ok(())
            }
            OnboardingStep::Goals => Ok(()),
        }
    }

    /// Validate every step and build the completed profile.
    ///
    /// On failure returns the first failing step along with its error.
    pub fn to_profile(&self) -> Result<Profile, (OnboardingStep, OnboardingError)> {
        for step in [
            OnboardingStep::Personal,
            OnboardingStep::Body,
            OnboardingStep::Goals,
        ] {
            self.validate_step(step).map_err(|e| (step, e))?;
        }

        let age = parse_whole(&self.age, OnboardingField::Age).map_err(|e| (OnboardingStep::Personal, e))?;
        let height =
            parse_whole(&self.height, OnboardingField::Height).map_err(|e| (OnboardingStep::Body, e))?;
        let weight = parse_weight(&self.weight).map_err(|e| (OnboardingStep::Body, e))?;

        Ok(Profile {
            user_id: None,
            email: None,
            name: self.name.trim().to_string(),
            gender: self.gender,
            age,
            height,
            weight,
            goal: self.goal,
            activity_level: self.activity_level,
            diet_preference: self.diet_preference,
            completed: true,
            timestamp: None,
        })
    }
}

/// Whole-number fields keep the leading digits, so `"175.5"` reads as 175.
/// Input without leading digits is rejected.
fn parse_whole(raw: &str, field: OnboardingField) -> Result<u32, OnboardingError> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end]
        .parse::<u32>()
        .map_err(|_| OnboardingError::InvalidNumber { field })
}

fn parse_weight(raw: &str) -> Result<f64, OnboardingError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or(OnboardingError::InvalidNumber {
            field: OnboardingField::Weight,
        })
}

/// Onboarding flow state.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum OnboardingState {
    /// Editing a step, with the last validation error if any.
    Editing {
        step: OnboardingStep,
        error: Option<OnboardingError>,
    },
    /// Profile accepted.
    Done,
}

impl OnboardingState {
    pub fn start() -> Self {
        OnboardingState::Editing {
            step: OnboardingStep::Personal,
            error: None,
        }
    }
}

/// Events that drive the onboarding flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingEvent {
    /// Advance past the current step.
    Next { form: OnboardingForm },
    /// Go back one step.
    Back,
    /// Submit the final step.
    Submit { form: OnboardingForm },
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingAction {
    /// Persist the completed profile and mark onboarding completed.
    PersistProfile { profile: Profile },
}

/// Pure onboarding state machine.
pub struct OnboardingStateMachine;

impl OnboardingStateMachine {
    pub fn transition(
        state: OnboardingState,
        event: OnboardingEvent,
    ) -> (OnboardingState, Vec<OnboardingAction>) {
        match (state, event) {
            (OnboardingState::Editing { step, .. }, OnboardingEvent::Next { form }) => {
                match step.next() {
                    Some(next) => match form.validate_step(step) {
                        Ok(()) => (
                            OnboardingState::Editing {
                                step: next,
                                error: None,
                            },
                            Vec::new(),
                        ),
                        Err(error) => (
                            OnboardingState::Editing {
                                step,
                                error: Some(error),
                            },
                            Vec::new(),
                        ),
                    },
                    // Next on the last step behaves like submit.
                    None => Self::submit(form),
                }
            }
            (OnboardingState::Editing { step, .. }, OnboardingEvent::Back) => {
                let step = step.previous().unwrap_or(step);
                (OnboardingState::Editing { step, error: None }, Vec::new())
            }
            (
                OnboardingState::Editing {
                    step: OnboardingStep::Goals,
                    ..
                },
                OnboardingEvent::Submit { form },
            ) => Self::submit(form),
            (state, _event) => (state, Vec::new()),
        }
    }

    fn submit(form: OnboardingForm) -> (OnboardingState, Vec<OnboardingAction>) {
        match form.to_profile() {
            Ok(profile) => (
                OnboardingState::Done,
                vec![OnboardingAction::PersistProfile { profile }],
            ),
            Err((step, error)) => (
                OnboardingState::Editing {
                    step,
                    error: Some(error),
                },
                Vec::new(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(age: &str, height: &str, weight: &str) -> OnboardingForm {
        OnboardingForm {
            name: "Sam".to_string(),
            age: age.to_string(),
            height: height.to_string(),
            weight: weight.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_values_outside_bounds() {
        let cases = [
            (form("12", "175", "70"), OnboardingStep::Personal, OnboardingError::AgeOutOfRange),
            (form("101", "175", "70"), OnboardingStep::Personal, OnboardingError::AgeOutOfRange),
            (form("25", "99", "70"), OnboardingStep::Body, OnboardingError::HeightOutOfRange),
            (form("25", "175", "301"), OnboardingStep::Body, OnboardingError::WeightOutOfRange),
        ];

        for (form, step, expected) in cases {
            assert_eq!(form.validate_step(step), Err(expected));
        }
    }

    #[test]
    fn accepts_inclusive_bounds() {
        assert!(form("13", "175", "70").validate_step(OnboardingStep::Personal).is_ok());
        assert!(form("100", "175", "70").validate_step(OnboardingStep::Personal).is_ok());
        assert!(form("25", "100", "70").validate_step(OnboardingStep::Body).is_ok());
        assert!(form("25", "250", "300").validate_step(OnboardingStep::Body).is_ok());
        assert!(form("25", "175", "30").validate_step(OnboardingStep::Body).is_ok());
    }

    #[test]
    fn missing_fields_block_step() {
        let mut missing_name = form("25", "175", "70");
        missing_name.name = "  ".to_string();
        assert_eq!(
            missing_name.validate_step(OnboardingStep::Personal),
            Err(OnboardingError::MissingFields)
        );
        assert_eq!(
            form("25", "", "70").validate_step(OnboardingStep::Body),
            Err(OnboardingError::MissingFields)
        );
    }

    #[test]
    fn non_numeric_input_is_a_field_error() {
        let error = form("abc", "175", "70")
            .validate_step(OnboardingStep::Personal)
            .unwrap_err();
        assert_eq!(error.field(), Some(OnboardingField::Age));
    }

    #[test]
    fn fractional_age_and_height_are_truncated() {
        let profile = form("25.9", "175.5", "70.5").to_profile().unwrap();
        assert_eq!(profile.age, 25);
        assert_eq!(profile.height, 175);
        assert_eq!(profile.weight, 70.5);

        assert_eq!(
            form("12.9", "175", "70").validate_step(OnboardingStep::Personal),
            Err(OnboardingError::AgeOutOfRange)
        );
        assert_eq!(
            form("25", ".5", "70").validate_step(OnboardingStep::Body),
            Err(OnboardingError::InvalidNumber {
                field: OnboardingField::Height
            })
        );
    }

    #[test]
    fn next_advances_only_when_step_is_valid() {
        let (state, actions) = OnboardingStateMachine::transition(
            OnboardingState::start(),
            OnboardingEvent::Next {
                form: form("12", "", ""),
            },
        );
        assert_eq!(
            state,
            OnboardingState::Editing {
                step: OnboardingStep::Personal,
                error: Some(OnboardingError::AgeOutOfRange)
            }
        );
        assert!(actions.is_empty());

        let (state, _) = OnboardingStateMachine::transition(
            state,
            OnboardingEvent::Next {
                form: form("25", "", ""),
            },
        );
        assert_eq!(
            state,
            OnboardingState::Editing {
                step: OnboardingStep::Body,
                error: None
            }
        );
    }

    #[test]
    fn back_from_first_step_stays_put() {
        let (state, _) =
            OnboardingStateMachine::transition(OnboardingState::start(), OnboardingEvent::Back);
        assert_eq!(state, OnboardingState::start());
    }

    #[test]
    fn submit_on_last_step_emits_profile() {
        let state = OnboardingState::Editing {
            step: OnboardingStep::Goals,
            error: None,
        };
        let (next, actions) = OnboardingStateMachine::transition(
            state,
            OnboardingEvent::Submit {
                form: form("25", "175", "70"),
            },
        );

        assert_eq!(next, OnboardingState::Done);
        match actions.as_slice() {
            [OnboardingAction::PersistProfile { profile }] => {
                assert_eq!(profile.age, 25);
                assert_eq!(profile.height, 175);
                assert_eq!(profile.weight, 70.0);
                assert!(profile.completed);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn submit_before_last_step_is_ignored() {
        let (state, actions) = OnboardingStateMachine::transition(
            OnboardingState::start(),
            OnboardingEvent::Submit {
                form: form("25", "175", "70"),
            },
        );
        assert_eq!(state, OnboardingState::start());
        assert!(actions.is_empty());
    }

    #[test]
    fn submit_with_stale_invalid_field_returns_to_failing_step() {
        let state = OnboardingState::Editing {
            step: OnboardingStep::Goals,
            error: None,
        };
        let (next, actions) = OnboardingStateMachine::transition(
            state,
            OnboardingEvent::Submit {
                form: form("25", "175", "301"),
            },
        );
        assert_eq!(
            next,
            OnboardingState::Editing {
                step: OnboardingStep::Body,
                error: Some(OnboardingError::WeightOutOfRange)
            }
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn prefill_populates_name() {
        let prefill = SignupPrefill::from_email("new+1@example.com");
        let form = OnboardingForm::with_prefill(Some(&prefill));
        assert_eq!(form.name, "new+1");
        assert!(form.age.is_empty());
    }
}
