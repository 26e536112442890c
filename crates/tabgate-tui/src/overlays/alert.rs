//! Single-button alert, used for identity-provider failures.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use tabgate_core::identity::SignInChannel;
use unicode_width::UnicodeWidthStr;

use super::render_utils::{InputHint, OverlayConfig, render_overlay};

pub const APPLE_ERROR_TITLE: &str = "Sign in with Apple Error";

/// Alert title for a failed exchange on `channel`.
pub fn failure_title(channel: SignInChannel) -> &'static str {
    match channel {
        SignInChannel::Apple => APPLE_ERROR_TITLE,
        SignInChannel::WhatsApp | SignInChannel::Sms => "Sign-in Error",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub title: String,
    pub message: String,
}

impl AlertState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Returns true when the alert should be dismissed.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ' | 'o')
        )
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        const WIDTH: u16 = 48;
        let text_width = usize::from(WIDTH - 4);
        let wrapped_rows: usize = self
            .message
            .lines()
            .map(|l| l.width().div_ceil(text_width).max(1))
            .sum();
        let height = (wrapped_rows as u16).saturating_add(4);

        let hints = [InputHint::new("Enter", "OK")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &self.title,
                border_color: Color::Red,
                width: WIDTH,
                height,
                hints: &hints,
            },
        );

        let body = Rect::new(
            layout.body.x + 1,
            layout.body.y,
            layout.body.width.saturating_sub(2),
            layout.body.height,
        );
        let lines: Vec<Line> = self.message.lines().map(Line::from).collect();
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(Color::White))
                .wrap(Wrap { trim: true }),
            body,
        );
    }
}
