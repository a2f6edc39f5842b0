use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::dashboard::Tab;
use crate::store;

use super::app::App;

pub(super) fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(f.area());

    draw_tab_bar(f, app, chunks[0]);

    match app.dash.tab {
        Tab::Dashboard => draw_channels(f, app, chunks[1]),
        Tab::History => draw_history(f, app, chunks[1]),
        Tab::Settings => draw_settings(f, app, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);

    if let Some(pending) = &app.confirm {
        let area = centered(f.area(), 60, 5);
        f.render_widget(Clear, area);
        let text = vec![
            Line::from(format!(
                "Revert {} to v{}?",
                pending.doc_name, pending.positional
            )),
            Line::from(""),
            Line::from("y/Enter: revert    n/Esc: cancel"),
        ];
        f.render_widget(
            Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("confirm")),
            area,
        );
    }
}

fn draw_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " syncdeck ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    for tab in [Tab::Dashboard, Tab::History, Tab::Settings] {
        let style = if tab == app.dash.tab {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::raw(" "));
    }
    if app.dash.refreshing {
        spans.push(Span::styled("refreshing…", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_channels(f: &mut Frame, app: &App, area: Rect) {
    if app.dash.loading {
        f.render_widget(Paragraph::new("loading…"), area);
        return;
    }
    if let Some(err) = &app.dash.error {
        f.render_widget(
            Paragraph::new(format!("error: {} (press r to retry)", err))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let summary = app.dash.summary(app.message_count);
    let items: Vec<ListItem> = app
        .dash
        .channels()
        .iter()
        .map(|c| {
            let slack = if c.slack_channel_id.is_empty() {
                String::new()
            } else {
                format!("  #{}", c.slack_channel_id)
            };
            ListItem::new(Line::from(vec![
                Span::styled(c.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(
                    "  {} version(s)  updated {}{}",
                    c.action_count, c.last_update, slack
                )),
            ]))
        })
        .collect();

    let title = format!(
        "channels ({} docs, {} versions, {} messages)",
        summary.active_documents, summary.total_versions, summary.total_messages
    );
    let mut state = ListState::default();
    if !app.dash.channels().is_empty() {
        state.select(Some(app.selected_channel));
    }
    f.render_stateful_widget(
        List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray)),
        area,
        &mut state,
    );
}

fn draw_history(f: &mut Frame, app: &App, area: Rect) {
    let entries = app.dash.history();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|e| {
            ListItem::new(format!(
                "{}  {}  v{} ({})  {:+} chars",
                e.timestamp, e.doc_name, e.positional_version, e.version_id, e.chars_added
            ))
        })
        .collect();

    let title = match &app.dash.selected_doc {
        Some(id) => format!("history: {} (Enter clears filter)", id),
        None => "history: all documents".to_string(),
    };
    let mut state = ListState::default();
    if !entries.is_empty() {
        state.select(Some(app.selected_entry));
    }
    f.render_stateful_widget(
        List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray)),
        area,
        &mut state,
    );
}

fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let client_id = store::client_id().unwrap_or("-");
    let short: String = client_id.chars().take(12).collect();

    let mut lines = vec![
        Line::from(format!("api url: {}", app.cfg.base_url)),
        Line::from(format!(
            "folder: {}",
            app.cfg.folder_id.as_deref().unwrap_or("-")
        )),
        Line::from(format!(
            "team: {}",
            app.cfg.team_id.as_deref().unwrap_or("-")
        )),
        Line::from(format!("fanout limit: {}", app.cfg.fanout())),
        Line::from(format!("client id: {}…", short)),
        Line::from(""),
    ];
    for note in app.dash.log().iter().rev().take(8) {
        lines.push(Line::from(Span::styled(
            note.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("settings")),
        area,
    );
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = "q quit  Tab switch  r refresh  s resync  u force-update  v revert  Enter filter";
    let mut lines = vec![Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some(notice) = &app.notice {
        lines.insert(
            0,
            Line::from(Span::styled(
                format!("{} (Esc to dismiss)", notice),
                Style::default().fg(Color::Yellow),
            )),
        );
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}
