// ABOUTME: Main onboarding wizard component
// Renders the stepper header, the current step's visible fields and the navigation footer

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::state::{FocusTarget, WizardStep};
use crate::app::{AppState, StatusMessage};
use crate::models::{CatalogKind, Field, MultiSelect, OnboardingType};

// Color palette from TUI style guide
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);

const TITLE: &str = "Illumio Cloud Secure Integration";

/// The main onboarding wizard component
pub struct OnboardingComponent;

impl OnboardingComponent {
    pub fn new() -> Self {
        Self
    }

    /// Main render function
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        // Clear background
        frame.render_widget(Clear, area);

        let container = Block::default().style(Style::default().bg(DARK_BG));
        frame.render_widget(container, area);

        // Main layout: header, content, footer, status
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header with stepper
                Constraint::Min(10),   // Step content
                Constraint::Length(2), // Navigation footer
                Constraint::Length(1), // Status line
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        self.render_step_content(frame, layout[1], state);
        self.render_navigation(frame, layout[2], state);
        self.render_status(frame, layout[3], state);
    }

    /// Render the header with title and step progress
    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, header_layout[0]);

        self.render_progress(frame, header_layout[1], state.step());
    }

    /// Render the stepper: done, current and pending markers
    fn render_progress(&self, frame: &mut Frame, area: Rect, current: WizardStep) {
        let steps = WizardStep::all();
        let current_idx = current.index();
        let mut spans = Vec::new();

        for (idx, step) in steps.iter().enumerate() {
            let (icon, style) = if idx < current_idx {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if idx == current_idx {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };

            spans.push(Span::styled(icon, style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("{}. {}", idx + 1, step.title()),
                if idx == current_idx {
                    Style::default().fg(SOFT_WHITE)
                } else {
                    Style::default().fg(MUTED_GRAY)
                },
            ));

            if idx < steps.len() - 1 {
                spans.push(Span::styled(" ── ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        let progress = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(progress, area);
    }

    /// Render the current step inside a titled panel
    fn render_step_content(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let step = state.step();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", step.title()))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        for field in state.wizard.visible_fields() {
            lines.extend(self.field_lines(field, state));
            lines.push(Line::from(""));
        }

        let content = Paragraph::new(lines);
        let padded = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(2)
            .vertical_margin(1)
            .constraints([Constraint::Min(1)])
            .split(inner);
        frame.render_widget(content, padded[0]);
    }

    fn label_line(field: Field, focused: bool) -> Line<'static> {
        let marker = if focused { "▸ " } else { "  " };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(GOLD)),
            Span::styled(
                field.label(),
                Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
            ),
        ])
    }

    fn helper_line(text: &'static str) -> Line<'static> {
        Line::from(Span::styled(format!("    {text}"), Style::default().fg(MUTED_GRAY)))
    }

    fn row_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SOFT_WHITE)
        }
    }

    /// Lines for one visible field
    fn field_lines(&self, field: Field, state: &AppState) -> Vec<Line<'static>> {
        let focused = state.focused_target();
        let is_focused = focused == Some(FocusTarget::Field(field));
        let values = state.wizard.state();
        let catalog = state.wizard.catalog();

        match field {
            Field::OnboardingType => {
                let mut spans = vec![Span::raw("    ")];
                for option in OnboardingType::all() {
                    let selected = *option == values.onboarding_type;
                    let radio = if selected { "(•) " } else { "( ) " };
                    spans.push(Span::styled(
                        format!("{radio}{}", option.label()),
                        if selected {
                            Self::row_style(is_focused)
                        } else {
                            Style::default().fg(MUTED_GRAY)
                        },
                    ));
                    spans.push(Span::raw("   "));
                }
                vec![Self::label_line(field, is_focused), Line::from(spans)]
            }
            Field::SubscriptionId => {
                let shown = catalog
                    .name_of(CatalogKind::Subscriptions, &values.subscription_id)
                    .map_or_else(|| "Select a subscription".to_string(), str::to_string);
                vec![
                    Self::label_line(field, is_focused),
                    Line::from(vec![
                        Span::styled("    ◂ ", Style::default().fg(SUBDUED_BORDER)),
                        Span::styled(shown, Self::row_style(is_focused)),
                        Span::styled(" ▸", Style::default().fg(SUBDUED_BORDER)),
                    ]),
                ]
            }
            Field::TenantId | Field::AppName => {
                let text = values.text(field).unwrap_or_default();
                let display = if is_focused {
                    let split = text
                        .char_indices()
                        .nth(state.cursor_position)
                        .map_or(text.len(), |(i, _)| i);
                    let (before, after) = text.split_at(split);
                    format!("{before}│{after}")
                } else {
                    text.to_string()
                };
                let helper = if field == Field::TenantId {
                    "Your Azure AD tenant ID"
                } else {
                    "Name for the Entra ID application used for SSO integration"
                };
                vec![
                    Self::label_line(field, is_focused),
                    Line::from(vec![
                        Span::styled("    [ ", Style::default().fg(SUBDUED_BORDER)),
                        Span::styled(display, Self::row_style(is_focused)),
                        Span::styled(" ]", Style::default().fg(SUBDUED_BORDER)),
                    ]),
                    Self::helper_line(helper),
                ]
            }
            Field::EnableFlowLogs => {
                let check = if values.enable_flow_logs { "[x] " } else { "[ ] " };
                let marker = if is_focused { "▸ " } else { "  " };
                vec![Line::from(vec![
                    Span::styled(marker, Style::default().fg(GOLD)),
                    Span::styled(format!("{check}{}", field.label()), Self::row_style(is_focused)),
                ])]
            }
            Field::SelectedVNets | Field::SelectedStorageAccounts => {
                let (collection, kind) = if field == Field::SelectedVNets {
                    (MultiSelect::VirtualNetworks, CatalogKind::VirtualNetworks)
                } else {
                    (MultiSelect::StorageAccounts, CatalogKind::StorageAccounts)
                };
                let list_focused = matches!(focused, Some(FocusTarget::Item(c, _)) if c == collection);
                let selection = values.selection(collection);

                let mut lines = vec![Self::label_line(field, list_focused)];
                for (idx, item) in catalog.items(kind).iter().enumerate() {
                    let row_focused = focused == Some(FocusTarget::Item(collection, idx));
                    let check = if selection.contains(&item.id) { "[x] " } else { "[ ] " };
                    lines.push(Line::from(vec![
                        Span::styled(
                            if row_focused { "  ▸ " } else { "    " },
                            Style::default().fg(GOLD),
                        ),
                        Span::styled(format!("{check}{}", item.name), Self::row_style(row_focused)),
                    ]));
                }
                if catalog.items(kind).is_empty() {
                    lines.push(Self::helper_line("(none available)"));
                }
                lines
            }
        }
    }

    /// Render navigation footer
    fn render_navigation(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let can_go_back = state.wizard.can_go_back();
        let mut spans = vec![
            Span::styled("[", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(
                "Esc",
                if can_go_back {
                    Style::default().fg(GOLD)
                } else {
                    Style::default().fg(MUTED_GRAY)
                },
            ),
            Span::styled("]", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(
                " Previous",
                if can_go_back {
                    Style::default().fg(SOFT_WHITE)
                } else {
                    Style::default().fg(SUBDUED_BORDER)
                },
            ),
            Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)),
        ];

        let button_text = if state.wizard.is_final_step() { "Create" } else { "Next" };
        spans.push(Span::styled("[", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled("Enter", Style::default().fg(GOLD)));
        spans.push(Span::styled("]", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled(
            format!(" {button_text}"),
            Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
        ));

        spans.push(Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled("Tab", Style::default().fg(GOLD)));
        spans.push(Span::styled(" move  ", Style::default().fg(MUTED_GRAY)));
        spans.push(Span::styled("Space", Style::default().fg(GOLD)));
        spans.push(Span::styled(" select  ", Style::default().fg(MUTED_GRAY)));
        spans.push(Span::styled("Ctrl-C", Style::default().fg(GOLD)));
        spans.push(Span::styled(" cancel", Style::default().fg(MUTED_GRAY)));

        let nav = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(nav, inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(status) = &state.status else {
            return;
        };
        let (text, color) = match status {
            StatusMessage::Info(msg) => (msg.as_str(), SELECTION_GREEN),
            StatusMessage::Error(msg) => (msg.as_str(), ERROR_RED),
        };
        let line = Paragraph::new(Span::styled(text.to_string(), Style::default().fg(color)))
            .alignment(Alignment::Center);
        frame.render_widget(line, area);
    }
}

impl Default for OnboardingComponent {
    fn default() -> Self {
        Self::new()
    }
}
