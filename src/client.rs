//! Client commands: each one wires the client use cases, runs a flow and
//! prints the resulting screen.

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::info;

use fk_app::usecases::OnboardingFlow;
use fk_core::config::AppConfig;
use fk_core::ports::ScreenEventPort;
use fk_core::profile::{ActivityLevel, DietPreference, Gender, Goal};
use fk_core::{
    Credentials, OnboardingEvent, OnboardingState, OnboardingStep, ScreenOverride, ScreenState,
};
use fk_server::bootstrap::{wire_client, ClientHandles};

/// Logs every applied screen. The command prints the final one itself.
pub struct PrintedScreenEvents;

#[async_trait]
impl ScreenEventPort for PrintedScreenEvents {
    async fn emit_screen_changed(&self, screen: ScreenState, generation: u64) {
        info!(%screen, generation, "screen changed");
    }
}

fn handles(config: &AppConfig) -> Result<ClientHandles> {
    Ok(wire_client(config, Arc::new(PrintedScreenEvents))?)
}

fn print_screen(screen: ScreenState) {
    println!("screen: {screen}");
}

pub async fn screen(config: &AppConfig, overrides: Option<&str>) -> Result<()> {
    let handles = handles(config)?;
    let overrides = overrides
        .map(ScreenOverride::from_query)
        .unwrap_or_default();
    print_screen(handles.reconciler.reconcile(&overrides).await);
    Ok(())
}

pub async fn sign_up(config: &AppConfig, email: &str, password: &str) -> Result<()> {
    let handles = handles(config)?;
    let credentials = Credentials::new(email, password)?;

    let outcome = handles.sign_up.execute(&credentials).await?;
    let screen = handles.auth_actions.handle_auth_success(outcome).await;

    if let Some(name) = handles
        .deps
        .auth_state
        .load()
        .signup_prefill
        .and_then(|prefill| prefill.name)
    {
        println!("name: {name}");
    }
    print_screen(screen);
    Ok(())
}

pub async fn sign_in(config: &AppConfig, email: &str, password: &str) -> Result<()> {
    let handles = handles(config)?;
    let credentials = Credentials::new(email, password)?;

    let outcome = handles.sign_in.execute(&credentials).await?;
    print_screen(handles.auth_actions.handle_auth_success(outcome).await);
    Ok(())
}

pub async fn sign_out(config: &AppConfig) -> Result<()> {
    let handles = handles(config)?;
    print_screen(handles.sign_out.execute().await);
    Ok(())
}

/// Form values from the command line. Numbers stay text so the onboarding
/// validation reports them the same way the form does.
pub struct OnboardingInput {
    pub name: Option<String>,
    pub gender: Gender,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    pub diet_preference: DietPreference,
}

pub async fn onboard(config: &AppConfig, input: OnboardingInput) -> Result<()> {
    let handles = handles(config)?;

    let current = handles.reconciler.reconcile(&ScreenOverride::none()).await;
    if current != ScreenState::Onboarding {
        bail!("Onboarding is not available right now (current screen: {current})");
    }

    let prefill = handles.deps.auth_state.load().signup_prefill;
    let flow = OnboardingFlow::new(handles.complete_onboarding.clone(), prefill.as_ref());

    let mut form = flow.initial_form();
    if let Some(name) = input.name {
        form.name = name;
    }
    form.gender = input.gender;
    form.age = input.age;
    form.height = input.height;
    form.weight = input.weight;
    form.goal = input.goal;
    form.activity_level = input.activity_level;
    form.diet_preference = input.diet_preference;

    // Walk the steps like the form does, stopping at the first rejection.
    let mut completion = None;
    loop {
        let event = match flow.state().await {
            OnboardingState::Editing { step, .. } if step.is_last() => {
                OnboardingEvent::Submit { form: form.clone() }
            }
            OnboardingState::Editing { .. } => OnboardingEvent::Next { form: form.clone() },
            OnboardingState::Done => break,
        };
        let (state, done) = flow.dispatch(event).await;
        if let OnboardingState::Editing {
            step,
            error: Some(err),
        } = state
        {
            bail!("Step {} of {}: {err}", step.number(), OnboardingStep::COUNT);
        }
        if done.is_some() {
            completion = done;
        }
    }

    let Some(completion) = completion else {
        bail!("Onboarding finished without saving a profile");
    };
    if let Some(warning) = &completion.warning {
        eprintln!("warning: {warning}");
    }
    if !completion.synced_remote {
        info!("profile kept locally only");
    }
    print_screen(completion.screen);
    Ok(())
}
