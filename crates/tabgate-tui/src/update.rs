//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! The sign-in sheet is never opened or closed directly by a key handler:
//! after every event `sync_prompt` makes the overlay follow the gate.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tabgate_core::identity::SignInChannel;
use tabgate_core::{Decision, PromptResult, SignInOutcome};
use tracing::{debug, info};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::{IdentityResult, UiEvent};
use crate::features::onboarding::{self, OnboardingAction};
use crate::features::auth::{self, OnboardingReport};
use crate::features::tabs;
use crate::mutations::{SignInOrigin, StateMutation};
use crate::overlays::alert::failure_title;
use crate::overlays::{
    AlertState, GoToTabState, Overlay, OverlayRequest, OverlayTransition, OverlayUpdate,
    PrefixPickerState, SignInSheetState,
};
use crate::state::{AppState, Screen, TuiState};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            app.tui.expire_status(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::IdentityCompleted(completed) => {
            if app
                .tui
                .tasks
                .state_mut(TaskKind::IdentityExchange)
                .finish_if_active(completed.id)
            {
                handle_identity_completed(app, completed.result)
            } else {
                debug!(task = completed.id.0, "dropping stale identity result");
                vec![]
            }
        }
    };
    sync_prompt(app);
    effects
}

/// Keeps the sign-in sheet in step with the gate.
fn sync_prompt(app: &mut AppState) {
    let visible = app.tui.shell.prompt_visible();
    let showing = app.overlay.as_ref().is_some_and(Overlay::is_sign_in);
    if visible && !showing {
        app.tui.screen = Screen::Tabs;
        app.overlay = Some(Overlay::SignIn(SignInSheetState::open(&app.tui)));
    } else if !visible && showing {
        app.overlay = None;
    }
}

fn handle_identity_completed(app: &mut AppState, result: IdentityResult) -> Vec<UiEffect> {
    if app.tui.exchange_origin.take() == Some(SignInOrigin::Onboarding) {
        handle_onboarding_identity(app, result);
        return vec![];
    }

    let channel = result.channel;
    let report = auth::handle_identity_result(&mut app.tui.shell, result);
    match report.prompt {
        PromptResult::Resumed(_) => {
            info!(%channel, "signed in");
            app.tui.identity_status = report.profile;
            app.tui.screen = Screen::Tabs;
            app.tui.set_status(report.message);
        }
        PromptResult::Failed(_) => {
            if let Some(sheet) = app.overlay.as_mut().and_then(Overlay::as_sign_in_mut) {
                sheet.show_failure(channel, report.message);
            } else {
                raise_failure(app, channel, report.message);
            }
        }
        PromptResult::Dismissed => app.tui.set_status(report.message),
    }
    vec![]
}

/// Onboarding sign-in only reports back; the tab shell is left alone.
fn handle_onboarding_identity(app: &mut AppState, result: IdentityResult) {
    let channel = result.channel;
    app.tui.onboarding.exchanging = None;

    match auth::onboarding_report(result) {
        OnboardingReport::SignedIn(status) => {
            info!(%channel, "onboarding sign-in succeeded");
            app.tui.set_status(status);
        }
        OnboardingReport::Cancelled => app.tui.set_status("Sign-in cancelled."),
        OnboardingReport::Failed(message) => raise_failure(app, channel, message),
    }
}

fn raise_failure(app: &mut AppState, channel: SignInChannel, message: String) {
    open_overlay_request(
        app,
        OverlayRequest::Alert {
            title: failure_title(channel).to_string(),
            message,
        },
    );
}

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for mutation in mutations {
        match mutation {
            StateMutation::TapTab(id) => tap_tab(tui, &id),
            StateMutation::BeginSignIn {
                origin,
                channel,
                phone,
            } => {
                if let Some(token) = tui.tasks.identity_exchange.take_cancel() {
                    effects.push(UiEffect::CancelTask {
                        kind: TaskKind::IdentityExchange,
                        token: Some(token),
                    });
                }
                let task = tui.task_seq.next_id();
                tui.tasks.identity_exchange.begin(task);
                tui.exchange_origin = Some(origin);
                debug!(task = task.0, ?origin, %channel, "starting identity exchange");
                effects.push(UiEffect::StartIdentityExchange {
                    task,
                    channel,
                    phone,
                });
            }
            StateMutation::PromptOutcome(outcome) => {
                if outcome == SignInOutcome::Cancelled {
                    effects.push(UiEffect::CancelTask {
                        kind: TaskKind::IdentityExchange,
                        token: tui.tasks.identity_exchange.take_cancel(),
                    });
                    tui.exchange_origin = None;
                }
                let result = tui.shell.on_sign_in_prompt_result(outcome);
                if result == PromptResult::Dismissed {
                    tui.set_status("Sign-in cancelled.");
                }
            }
            StateMutation::SetOnboardingPrefix(index) => {
                tui.onboarding.form.select_prefix(index);
            }
            StateMutation::Status(text) => tui.set_status(text),
        }
    }
    effects
}

fn tap_tab(tui: &mut TuiState, id: &str) {
    match tui.shell.on_tab_tapped(id) {
        Ok(Decision::Allow(_)) => tui.screen = Screen::Tabs,
        Ok(Decision::Block { .. }) => {}
        Err(err) => tui.set_status(err.to_string()),
    }
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    let OverlayUpdate {
        transition,
        mutations,
    } = update;

    let effects = apply_mutations(&mut app.tui, mutations);
    match transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => app.overlay = None,
        OverlayTransition::Open(request) => open_overlay_request(app, request),
    }
    effects
}

fn open_overlay_request(app: &mut AppState, request: OverlayRequest) {
    app.overlay = Some(match request {
        OverlayRequest::PrefixPicker => {
            Overlay::PrefixPicker(PrefixPickerState::open(&app.tui.onboarding.form))
        }
        OverlayRequest::GoToTab => Overlay::GoToTab(GoToTabState::open(&app.tui)),
        OverlayRequest::Alert { title, message } => {
            Overlay::Alert(AlertState::new(title, message))
        }
    });
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(key);
        return apply_overlay_update(app, update);
    }

    match app.tui.screen {
        Screen::Onboarding => handle_onboarding_key(app, key),
        Screen::Tabs => handle_tabs_key(app, key),
    }
}

fn handle_onboarding_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match onboarding::handle_onboarding_key(&mut app.tui.onboarding, key) {
        OnboardingAction::None => vec![],
        OnboardingAction::Quit => vec![UiEffect::Quit],
        OnboardingAction::OpenPrefixPicker => {
            open_overlay_request(app, OverlayRequest::PrefixPicker);
            vec![]
        }
        OnboardingAction::EnterTabs => {
            app.tui.mount_shell();
            app.tui.screen = Screen::Tabs;
            debug!("entered tab shell");
            vec![]
        }
        OnboardingAction::Mutate(mutation) => apply_mutations(&mut app.tui, vec![mutation]),
    }
}

fn handle_tabs_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match tabs::handle_tabs_key(&app.tui.shell, key) {
        tabs::TabsAction::None => {}
        tabs::TabsAction::Quit => return vec![UiEffect::Quit],
        tabs::TabsAction::Tap(id) => tap_tab(&mut app.tui, &id),
        tabs::TabsAction::OpenGoTo => open_overlay_request(app, OverlayRequest::GoToTab),
        tabs::TabsAction::OpenSignIn => {
            app.tui.shell.open_sign_in();
        }
        tabs::TabsAction::Logout => {
            app.tui.shell.logout();
            app.tui.identity_status = None;
            app.tui.set_status("Signed out.");
            info!("signed out");
        }
        tabs::TabsAction::BackToOnboarding => {
            app.tui.mount_shell();
            app.tui.screen = Screen::Onboarding;
        }
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use tabgate_core::config::Config;
    use tabgate_core::identity::{IdentityError, IdentityProfile, SignInChannel};
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::features::onboarding::FormField;

    fn app() -> AppState {
        AppState::new(&Config::default()).unwrap()
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn started_task(effects: &[UiEffect]) -> TaskId {
        effects
            .iter()
            .find_map(|effect| match effect {
                UiEffect::StartIdentityExchange { task, .. } => Some(*task),
                _ => None,
            })
            .expect("identity exchange effect")
    }

    fn complete(app: &mut AppState, id: TaskId, outcome: Result<IdentityProfile, IdentityError>) {
        update(
            app,
            UiEvent::IdentityCompleted(TaskCompleted {
                id,
                result: IdentityResult {
                    channel: SignInChannel::Sms,
                    outcome,
                },
            }),
        );
    }

    fn profile() -> IdentityProfile {
        IdentityProfile {
            user_id: "42".into(),
            email: None,
            full_name: None,
        }
    }

    /// Skip, then tap the cart tab while signed out.
    fn blocked_on_cart() -> AppState {
        let mut app = app();
        app.tui.onboarding.focus = FormField::Skip;
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('2'));
        app
    }

    fn submit_sms(app: &mut AppState) -> TaskId {
        let sheet = app
            .overlay
            .as_mut()
            .and_then(Overlay::as_sign_in_mut)
            .expect("sign-in sheet");
        sheet.focus = FormField::Sms;
        started_task(&press(app, KeyCode::Enter))
    }

    #[test]
    fn blocked_tap_opens_sheet_and_keeps_selection() {
        let app = blocked_on_cart();
        assert!(app.overlay.as_ref().is_some_and(Overlay::is_sign_in));
        assert_eq!(app.tui.shell.selected_id().as_str(), "home");
        assert_eq!(
            app.tui.shell.pending_tab().map(|t| t.as_str()),
            Some("cart")
        );
    }

    #[test]
    fn successful_exchange_resumes_pending_tab() {
        let mut app = blocked_on_cart();
        let task = submit_sms(&mut app);
        assert!(app.tui.tasks.identity_exchange.is_running());

        complete(&mut app, task, Ok(profile()));

        assert!(app.overlay.is_none());
        assert!(app.tui.shell.is_signed_in());
        assert_eq!(app.tui.shell.selected_id().as_str(), "cart");
        assert!(app.tui.identity_status.as_deref().unwrap().contains("ID: 42"));
    }

    #[test]
    fn esc_cancels_prompt_and_running_exchange() {
        let mut app = blocked_on_cart();
        let task = submit_sms(&mut app);

        let token = CancellationToken::new();
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::IdentityExchange,
                started: TaskStarted {
                    id: task,
                    cancel: Some(token.clone()),
                },
            },
        );

        let effects = press(&mut app, KeyCode::Esc);
        let cancel = effects.into_iter().find_map(|effect| match effect {
            UiEffect::CancelTask { token, .. } => token,
            _ => None,
        });
        assert!(cancel.is_some());
        assert!(app.overlay.is_none());
        assert!(app.tui.shell.pending_tab().is_none());
        assert_eq!(app.tui.shell.selected_id().as_str(), "home");

        // The late result of the cancelled exchange must not sign the user in.
        complete(&mut app, task, Ok(profile()));
        assert!(!app.tui.shell.is_signed_in());
        assert!(app.overlay.is_none());
    }

    #[test]
    fn failed_exchange_keeps_sheet_with_alert() {
        let mut app = blocked_on_cart();
        let task = submit_sms(&mut app);

        complete(
            &mut app,
            task,
            Err(IdentityError::Rejected {
                channel: SignInChannel::Sms,
                reason: "timeout".into(),
            }),
        );

        let Some(Overlay::SignIn(sheet)) = &app.overlay else {
            panic!("sheet should stay open");
        };
        assert!(sheet.exchanging.is_none());
        assert!(matches!(sheet.modal, Some(crate::overlays::sign_in::SheetModal::Alert(_))));
        assert_eq!(
            app.tui.shell.pending_tab().map(|t| t.as_str()),
            Some("cart")
        );
        assert!(!app.tui.shell.is_signed_in());
    }

    #[test]
    fn goto_blocked_tab_prompts_and_resumes() {
        let mut app = blocked_on_cart();
        // Close the sheet, then request profile through the go-to overlay.
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('g'));
        for c in "profile".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.overlay.as_ref().is_some_and(Overlay::is_sign_in));
        let task = submit_sms(&mut app);
        complete(&mut app, task, Ok(profile()));
        assert_eq!(app.tui.shell.selected_id().as_str(), "profile");
    }

    #[test]
    fn onboarding_sign_in_only_reports_status() {
        let mut app = app();
        app.tui.onboarding.focus = FormField::Sms;
        let task = started_task(&press(&mut app, KeyCode::Enter));
        assert!(app.tui.onboarding.exchanging.is_some());

        complete(&mut app, task, Ok(profile()));
        assert_eq!(app.tui.screen, Screen::Onboarding);
        assert!(app.tui.onboarding.exchanging.is_none());
        assert!(!app.tui.shell.is_signed_in());
        assert!(app.tui.identity_status.is_none());
        assert!(app.overlay.is_none());
        let status = app.tui.status.as_ref().expect("status");
        assert!(status.text.starts_with("Signed in! ID: 42"));
    }

    #[test]
    fn reentering_tabs_starts_a_fresh_signed_out_shell() {
        let mut app = blocked_on_cart();
        let task = submit_sms(&mut app);
        complete(&mut app, task, Ok(profile()));
        assert!(app.tui.shell.is_signed_in());
        assert!(app.tui.identity_status.is_some());

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.tui.screen, Screen::Onboarding);

        app.tui.onboarding.focus = FormField::Skip;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tui.screen, Screen::Tabs);
        assert!(app.tui.identity_status.is_none());

        press(&mut app, KeyCode::Char('2'));
        assert!(app.overlay.as_ref().is_some_and(Overlay::is_sign_in));
        assert!(!app.tui.shell.is_signed_in());
        assert_eq!(app.tui.shell.selected_id().as_str(), "home");
        assert_eq!(
            app.tui.shell.pending_tab().map(|t| t.as_str()),
            Some("cart")
        );
    }

    #[test]
    fn onboarding_failure_raises_alert() {
        let mut app = app();
        app.tui.onboarding.focus = FormField::Apple;
        let task = started_task(&press(&mut app, KeyCode::Enter));

        update(
            &mut app,
            UiEvent::IdentityCompleted(TaskCompleted {
                id: task,
                result: IdentityResult {
                    channel: SignInChannel::Apple,
                    outcome: Err(IdentityError::Rejected {
                        channel: SignInChannel::Apple,
                        reason: "denied".into(),
                    }),
                },
            }),
        );

        let Some(Overlay::Alert(alert)) = &app.overlay else {
            panic!("expected alert");
        };
        assert_eq!(alert.title, crate::overlays::alert::APPLE_ERROR_TITLE);
        assert_eq!(app.tui.screen, Screen::Onboarding);
        assert!(app.tui.onboarding.exchanging.is_none());
    }

    #[test]
    fn logout_from_profile_returns_to_fallback() {
        let mut app = blocked_on_cart();
        let task = submit_sms(&mut app);
        complete(&mut app, task, Ok(profile()));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tui.shell.selected_id().as_str(), "profile");

        press(&mut app, KeyCode::Char('o'));
        assert!(!app.tui.shell.is_signed_in());
        assert_eq!(app.tui.shell.selected_id().as_str(), "home");
        assert!(app.tui.identity_status.is_none());
    }

    #[test]
    fn direct_sign_in_from_tabs() {
        let mut app = app();
        app.tui.screen = Screen::Tabs;
        press(&mut app, KeyCode::Char('s'));
        assert!(app.overlay.as_ref().is_some_and(Overlay::is_sign_in));

        let task = submit_sms(&mut app);
        complete(&mut app, task, Ok(profile()));
        assert!(app.tui.shell.is_signed_in());
        assert_eq!(app.tui.shell.selected_id().as_str(), "home");
    }

    #[test]
    fn ctrl_c_quits_from_any_overlay() {
        let mut app = blocked_on_cart();
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }
}
