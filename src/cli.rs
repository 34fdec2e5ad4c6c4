//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fk_core::profile::{ActivityLevel, DietPreference, Gender, Goal};
use fk_server::bootstrap::{resolve_config, serve, tracing::init_tracing_subscriber};

use crate::client::{self, OnboardingInput};

#[derive(Parser)]
#[command(name = "fitkro")]
#[command(version)]
#[command(about = "Fit Kro fitness companion")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve,

    /// Print the screen the client would show
    Screen {
        /// Developer override as a query string, e.g. `auth=1` or `onboarding=1`
        #[arg(long = "override", value_name = "QUERY")]
        overrides: Option<String>,
    },

    /// Create an account. Demo addresses (`@demo`, `@test`, `@example`) stay local
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and clear local auth state
    SignOut,

    /// Fill in and submit the onboarding form
    Onboard {
        /// Defaults to the name saved at sign-up
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "male")]
        gender: Gender,
        #[arg(long)]
        age: String,
        /// Centimetres
        #[arg(long)]
        height: String,
        /// Kilograms
        #[arg(long)]
        weight: String,
        #[arg(long, default_value = "maintain")]
        goal: Goal,
        #[arg(long, default_value = "moderate")]
        activity: ActivityLevel,
        #[arg(long, default_value = "none")]
        diet: DietPreference,
    },
}

pub fn run() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;
    init_tracing_subscriber(&config.log_dir)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Serve => serve(&config).await,
            Commands::Screen { overrides } => client::screen(&config, overrides.as_deref()).await,
            Commands::SignUp { email, password } => {
                client::sign_up(&config, &email, &password).await
            }
            Commands::SignIn { email, password } => {
                client::sign_in(&config, &email, &password).await
            }
            Commands::SignOut => client::sign_out(&config).await,
            Commands::Onboard {
                name,
                gender,
                age,
                height,
                weight,
                goal,
                activity,
                diet,
            } => {
                let input = OnboardingInput {
                    name,
                    gender,
                    age,
                    height,
                    weight,
                    goal,
                    activity_level: activity,
                    diet_preference: diet,
                };
                client::onboard(&config, input).await
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn onboard_parses_choice_values() {
        let cli = Cli::parse_from([
            "fitkro", "onboard", "--age", "25", "--height", "175", "--weight", "70", "--goal",
            "lose", "--activity", "very",
        ]);

        match cli.command {
            Commands::Onboard { goal, activity, gender, .. } => {
                assert_eq!(goal, Goal::Lose);
                assert_eq!(activity, ActivityLevel::Very);
                assert_eq!(gender, Gender::Male);
            }
            _ => panic!("expected onboard"),
        }
    }

    #[test]
    fn unknown_choice_is_rejected() {
        let result = Cli::try_parse_from([
            "fitkro", "onboard", "--age", "25", "--height", "175", "--weight", "70", "--diet",
            "carnivore",
        ]);
        assert!(result.is_err());
    }
}
