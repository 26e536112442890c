//! Onboarding feature view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tabgate_core::identity::SignInChannel;
use tabgate_core::phone::PhoneForm;

use super::state::{FormField, OnboardingState};
use crate::common::SPINNER_FRAMES;

/// Brand accent used for the primary action and the banner.
pub const BRAND_GREEN: Color = Color::Green;

pub const TERMS_TEXT: &str =
    "By continuing, you accept our Terms & Conditions, Privacy Policy and Cookies Policy.";

const CARD_WIDTH: u16 = 54;
const BANNER_HEIGHT: u16 = 5;

/// Renders the welcome screen.
pub fn render_onboarding(frame: &mut Frame, state: &OnboardingState, spinner: usize, area: Rect) {
    let width = CARD_WIDTH.min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let column = Rect::new(x, area.y, width, area.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BANNER_HEIGHT), Constraint::Min(1)])
        .split(column);

    let banner = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "glovo",
            Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().style(Style::default().bg(Color::Yellow)));
    frame.render_widget(banner, chunks[0]);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from("Let's start with your phone number").alignment(Alignment::Center),
        Line::from(""),
    ];
    lines.extend(form_lines(
        &state.form,
        state.focus,
        FormField::ONBOARDING,
        state.exchanging,
        spinner,
    ));

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(card, chunks[1]);
}

/// Builds the prefix/phone row, the channel buttons and the footer.
///
/// Shared by the welcome screen and the sign-in sheet; `fields` decides
/// whether the Skip action is shown.
pub fn form_lines(
    form: &PhoneForm,
    focus: FormField,
    fields: &[FormField],
    exchanging: Option<SignInChannel>,
    spinner: usize,
) -> Vec<Line<'static>> {
    let prefix = Span::styled(
        format!(" {} ▾ ", form.prefix().code),
        control_style(focus == FormField::Prefix, Color::White),
    );
    let phone_text = if form.digits().is_empty() {
        "Phone number".to_string()
    } else {
        form.digits().to_string()
    };
    let phone_style = if form.digits().is_empty() {
        control_style(focus == FormField::Phone, Color::DarkGray)
    } else {
        control_style(focus == FormField::Phone, Color::White)
    };
    let cursor = if focus == FormField::Phone { "█" } else { " " };

    let mut lines = vec![
        Line::from(vec![
            prefix,
            Span::raw("  "),
            Span::styled(format!(" {phone_text:<20}"), phone_style),
            Span::styled(cursor, Style::default().fg(Color::White)),
        ])
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(vec![
            button("WhatsApp", focus == FormField::WhatsApp, Color::White),
            Span::raw("   "),
            button("SMS", focus == FormField::Sms, BRAND_GREEN),
        ])
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "──────── or with ────────",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(button(
            " Sign in with Apple",
            focus == FormField::Apple,
            Color::White,
        ))
        .alignment(Alignment::Center),
        Line::from(""),
    ];

    if let Some(channel) = exchanging {
        let frame = SPINNER_FRAMES[spinner % SPINNER_FRAMES.len()];
        lines.push(
            Line::from(Span::styled(
                format!("{frame} Signing in with {}...", channel_short_name(channel)),
                Style::default().fg(Color::Yellow),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(Line::from(""));
    }

    lines.push(
        Line::from(Span::styled(
            TERMS_TEXT,
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
    );

    if fields.contains(&FormField::Skip) {
        lines.push(Line::from(""));
        lines.push(
            Line::from(button(
                "Skip",
                focus == FormField::Skip,
                Color::Cyan,
            ))
            .alignment(Alignment::Center),
        );
    }

    lines
}

fn channel_short_name(channel: SignInChannel) -> &'static str {
    match channel {
        SignInChannel::WhatsApp => "WhatsApp",
        SignInChannel::Sms => "SMS",
        SignInChannel::Apple => "Apple",
    }
}

fn control_style(focused: bool, fg: Color) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg).bg(Color::Rgb(40, 40, 40))
    }
}

fn button(label: &str, focused: bool, accent: Color) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };
    Span::styled(format!("[ {label} ]"), style)
}
