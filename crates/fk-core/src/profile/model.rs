use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(format!("unknown {} value: {other}", stringify!($name))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(
    /// Gender selection from the first onboarding step.
    Gender { Male => "male", Female => "female", Other => "other" } default Male
);

choice_enum!(
    /// Fitness goal.
    Goal { Lose => "lose", Gain => "gain", Maintain => "maintain" } default Maintain
);

choice_enum!(
    /// Weekly activity level.
    ActivityLevel {
        Sedentary => "sedentary",
        Light => "light",
        Moderate => "moderate",
        Very => "very",
    } default Moderate
);

choice_enum!(
    /// Diet preference.
    DietPreference {
        None => "none",
        Vegetarian => "vegetarian",
        Vegan => "vegan",
        Keto => "keto",
        Paleo => "paleo",
    } default None
);

/// User profile as cached locally and exchanged with the profile service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    /// Centimetres.
    pub height: u32,
    /// Kilograms.
    pub weight: f64,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    pub diet_preference: DietPreference,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Profile-completion status reported by the profile service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileStatus {
    pub exists: bool,
    pub completed: bool,
}

impl ProfileStatus {
    pub fn missing() -> Self {
        Self::default()
    }

    /// Derive status from the `profile` member of a profile response.
    ///
    /// A profile counts as completed only when `completed` is literally `true`.
    pub fn from_profile_json(profile: Option<&serde_json::Value>) -> Self {
        match profile {
            Some(value) if !value.is_null() => Self {
                exists: true,
                completed: value
                    .get("completed")
                    .and_then(serde_json::Value::as_bool)
                    .unwrap_or(false),
            },
            _ => Self::missing(),
        }
    }
}
