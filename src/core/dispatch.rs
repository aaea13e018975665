//! Drives resolved profiles through synthesis and execution.
//!
//! Profiles are processed strictly in order, one at a time. A failing
//! profile never stops the ones after it; every profile gets exactly one
//! [`Outcome`].

use crate::core::executor::ExternalTool;
use crate::core::synth::{self, PasswordForm};
use crate::models::profile::Profile;
use crate::models::request::{Mode, RequestSpec};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// Final result for one requested profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub profile: String,
    pub mode: Mode,
    pub status: Status,
    pub dry_run: bool,
    /// Arguments of the last attempt (the only attempt in dry-run).
    pub args: Vec<String>,
    /// Invocations of the external tool made for this profile.
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn succeeded(&self) -> bool {
        self.status == Status::Success
    }

    /// One-line human description of what happened.
    pub fn detail(&self) -> String {
        if self.dry_run {
            return "dry-run, not executed".to_string();
        }
        if let Some(err) = &self.error {
            return err.clone();
        }
        match self.exit_code {
            Some(code) => format!(
                "exit code {} after {} attempt{}",
                code,
                self.attempts,
                if self.attempts == 1 { "" } else { "s" }
            ),
            None => "not executed".to_string(),
        }
    }
}

/// Per-mount password retry policy.
///
/// `TryEmpty -> Finished(Success) | PromptInteractive -> Finished(_)`.
/// Profiles without `tryemptypass` start at `PromptInteractive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountStep {
    TryEmpty,
    PromptInteractive,
    Finished(Status),
}

impl MountStep {
    pub fn start(profile: &Profile) -> Self {
        match synth::initial_password_form(profile) {
            PasswordForm::Empty => Self::TryEmpty,
            PasswordForm::Interactive => Self::PromptInteractive,
        }
    }

    /// The password form to run next, or `None` once finished.
    pub fn password_form(self) -> Option<PasswordForm> {
        match self {
            Self::TryEmpty => Some(PasswordForm::Empty),
            Self::PromptInteractive => Some(PasswordForm::Interactive),
            Self::Finished(_) => None,
        }
    }

    /// Feed the result of the attempt made in this step.
    pub fn advance(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (Self::TryEmpty, true) | (Self::PromptInteractive, true) => {
                Self::Finished(Status::Success)
            }
            (Self::TryEmpty, false) => Self::PromptInteractive,
            (Self::PromptInteractive, false) => Self::Finished(Status::Failure),
            (finished @ Self::Finished(_), _) => finished,
        }
    }
}

/// Outcomes of one run, in request order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.outcomes.iter().all(Outcome::succeeded)
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }
}

/// Process every profile in `spec`, in order.
pub fn run(spec: &RequestSpec, tool: &mut dyn ExternalTool) -> RunReport {
    let mut outcomes = Vec::with_capacity(spec.profiles.len());
    for profile in &spec.profiles {
        let outcome = if spec.dry_run {
            simulate(profile, spec.mode, &tool.program())
        } else {
            match spec.mode {
                Mode::Mount => mount(profile, tool),
                Mode::Dismount => dismount(profile, tool),
            }
        };
        if outcome.succeeded() {
            debug!(profile = %outcome.profile, mode = %outcome.mode, "profile done");
        } else {
            warn!(profile = %outcome.profile, mode = %outcome.mode, detail = %outcome.detail(), "profile failed");
        }
        outcomes.push(outcome);
    }
    RunReport { outcomes }
}

fn simulate(profile: &Profile, mode: Mode, program: &str) -> Outcome {
    let args = synth::synthesize_primary(profile, mode);
    info!(
        profile = %profile.name,
        %mode,
        command = %synth::render_command(program, &args),
        "dry-run"
    );
    Outcome {
        profile: profile.name.to_string(),
        mode,
        status: Status::Success,
        dry_run: true,
        args,
        attempts: 0,
        exit_code: None,
        error: None,
    }
}

fn dismount(profile: &Profile, tool: &mut dyn ExternalTool) -> Outcome {
    let args = synth::synthesize_dismount(profile);
    let (status, exit_code, error) = attempt(profile, Mode::Dismount, &args, tool);
    Outcome {
        profile: profile.name.to_string(),
        mode: Mode::Dismount,
        status,
        dry_run: false,
        args,
        attempts: 1,
        exit_code,
        error,
    }
}

fn mount(profile: &Profile, tool: &mut dyn ExternalTool) -> Outcome {
    let mut step = MountStep::start(profile);
    let mut attempts = 0;
    let mut last_args = Vec::new();
    let mut last_code = None;
    let mut last_error = None;

    while let Some(form) = step.password_form() {
        let args = synth::synthesize_mount(profile, form);
        let (status, exit_code, error) = attempt(profile, Mode::Mount, &args, tool);
        attempts += 1;
        step = step.advance(status == Status::Success);
        if step == MountStep::PromptInteractive && form == PasswordForm::Empty {
            warn!(profile = %profile.name, "empty password rejected, prompting for password");
        }
        last_args = args;
        last_code = exit_code;
        last_error = error;
    }

    let status = match step {
        MountStep::Finished(status) => status,
        _ => Status::Failure,
    };
    Outcome {
        profile: profile.name.to_string(),
        mode: Mode::Mount,
        status,
        dry_run: false,
        args: last_args,
        attempts,
        exit_code: last_code,
        error: last_error,
    }
}

fn attempt(
    profile: &Profile,
    mode: Mode,
    args: &[String],
    tool: &mut dyn ExternalTool,
) -> (Status, Option<i32>, Option<String>) {
    debug!(
        profile = %profile.name,
        %mode,
        command = %synth::render_command(&tool.program(), args),
        "invoking external tool"
    );
    match tool.execute(mode, args) {
        Ok(0) => (Status::Success, Some(0), None),
        Ok(code) => (Status::Failure, Some(code), None),
        Err(err) => (Status::Failure, None, Some(format!("{:#}", err))),
    }
}
