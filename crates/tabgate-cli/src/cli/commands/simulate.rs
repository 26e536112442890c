//! `tabgate simulate`: drive the navigation shell without a terminal.
//!
//! Each step is applied in order and one JSON line is printed per step.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::Serialize;
use tabgate_core::config::Config;
use tabgate_core::{NavigationShell, PromptResult, ShellSnapshot, SignInOutcome};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Tap(String),
    Success,
    Fail(String),
    Cancel,
    SignIn,
    Logout,
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(id) = s.strip_prefix("tap:") {
            if id.is_empty() {
                bail!("empty tab id in step '{s}'");
            }
            return Ok(Step::Tap(id.to_string()));
        }

        let step = match s {
            "" => bail!("empty step"),
            "success" => Step::Success,
            "cancel" => Step::Cancel,
            "signin" => Step::SignIn,
            "logout" => Step::Logout,
            _ => match s.strip_prefix("fail:") {
                Some(reason) => Step::Fail(reason.to_string()),
                None if s == "fail" => Step::Fail(String::new()),
                None => Step::Tap(s.to_string()),
            },
        };
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Tap(id) if is_reserved(id) => write!(f, "tap:{id}"),
            Step::Tap(id) => f.write_str(id),
            Step::Success => f.write_str("success"),
            Step::Fail(reason) => write!(f, "fail:{reason}"),
            Step::Cancel => f.write_str("cancel"),
            Step::SignIn => f.write_str("signin"),
            Step::Logout => f.write_str("logout"),
        }
    }
}

/// Tab ids that only parse back as a tap with the `tap:` prefix.
fn is_reserved(id: &str) -> bool {
    matches!(id, "success" | "cancel" | "signin" | "logout" | "fail") || id.contains(':')
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: String,
    #[serde(flatten)]
    pub snapshot: ShellSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// Applies one step and reports the resulting shell state.
pub fn apply(shell: &mut NavigationShell, step: &Step) -> StepReport {
    let mut rejected = None;
    let mut failure = None;

    match step {
        Step::Tap(id) => {
            if let Err(err) = shell.on_tab_tapped(id) {
                rejected = Some(err.to_string());
            }
        }
        Step::Success => {
            shell.on_sign_in_prompt_result(SignInOutcome::Success);
        }
        Step::Fail(reason) => {
            if let PromptResult::Failed(f) =
                shell.on_sign_in_prompt_result(SignInOutcome::Failure(reason.clone()))
            {
                failure = Some(f.reason);
            }
        }
        Step::Cancel => {
            shell.on_sign_in_prompt_result(SignInOutcome::Cancelled);
        }
        Step::SignIn => {
            shell.open_sign_in();
        }
        Step::Logout => shell.logout(),
    }

    StepReport {
        step: step.to_string(),
        snapshot: shell.snapshot(),
        rejected,
        failure,
    }
}

pub fn run(config: &Config, raw_steps: &[String]) -> Result<()> {
    let steps = raw_steps
        .iter()
        .map(|s| s.parse::<Step>())
        .collect::<Result<Vec<_>>>()?;

    let mut shell = NavigationShell::new(config.tab_set()?);
    debug!(steps = steps.len(), "running simulation");
    for step in &steps {
        let report = apply(&mut shell, step);
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tabgate_core::{GateState, TabSet};

    use super::*;

    #[test]
    fn parses_steps() {
        assert_eq!("cart".parse::<Step>().unwrap(), Step::Tap("cart".into()));
        assert_eq!("success".parse::<Step>().unwrap(), Step::Success);
        assert_eq!(
            "fail:no network".parse::<Step>().unwrap(),
            Step::Fail("no network".into())
        );
        assert!("".parse::<Step>().is_err());
    }

    #[test]
    fn tap_prefix_reaches_tabs_named_like_commands() {
        assert_eq!(
            "tap:success".parse::<Step>().unwrap(),
            Step::Tap("success".into())
        );
        assert_eq!("tap:cart".parse::<Step>().unwrap(), Step::Tap("cart".into()));
        assert!("tap:".parse::<Step>().is_err());

        assert_eq!(Step::Tap("success".into()).to_string(), "tap:success");
        assert_eq!(Step::Tap("cart".into()).to_string(), "cart");
    }

    #[test]
    fn blocked_then_success_lands_on_requested_tab() {
        let mut shell = NavigationShell::new(TabSet::standard());

        let blocked = apply(&mut shell, &Step::Tap("cart".into()));
        assert_eq!(blocked.snapshot.selected.as_str(), "home");
        assert_eq!(blocked.snapshot.gate, GateState::Prompting);
        assert!(blocked.snapshot.prompt_visible);

        let done = apply(&mut shell, &Step::Success);
        assert_eq!(done.snapshot.selected.as_str(), "cart");
        assert!(done.snapshot.signed_in);
        assert!(done.snapshot.pending.is_none());
    }

    #[test]
    fn unknown_tab_is_reported_not_applied() {
        let mut shell = NavigationShell::new(TabSet::standard());
        let report = apply(&mut shell, &Step::Tap("settings".into()));
        assert!(report.rejected.unwrap().contains("settings"));
        assert_eq!(report.snapshot.selected.as_str(), "home");
        assert_eq!(report.snapshot.gate, GateState::Idle);
    }

    #[test]
    fn failure_surfaces_reason_and_keeps_prompt() {
        let mut shell = NavigationShell::new(TabSet::standard());
        apply(&mut shell, &Step::Tap("profile".into()));
        let report = apply(&mut shell, &Step::Fail("denied".into()));
        assert_eq!(report.failure.as_deref(), Some("denied"));
        assert!(report.snapshot.prompt_visible);
        assert_eq!(
            report.snapshot.pending.as_ref().map(|t| t.as_str()),
            Some("profile")
        );
    }
}
