//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::core::Clock;
use crate::jobs::{JobCard, JobStatus};
use crate::tracking::{format_minutes, ActivityLabel, TrackerWidget, IDLE_DISPLAY};
use crate::tui::app::{App, LoginField, Screen};
use crate::tui::event::HELP;

/// Render the application UI.
pub fn render<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>) {
    match app.screen {
        Screen::Login => render_login(frame, app),
        Screen::Board => render_board(frame, app),
    }
}

const fn status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::Pending => Color::White,
        JobStatus::InProgress => Color::Cyan,
        JobStatus::OnHold => Color::Yellow,
        JobStatus::Completed => Color::Green,
    }
}

const fn activity_color(activity: ActivityLabel) -> Color {
    match activity {
        ActivityLabel::Work => Color::Green,
        ActivityLabel::Break => Color::Yellow,
        ActivityLabel::Waiting => Color::Red,
        ActivityLabel::QualityCheck => Color::Cyan,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_login<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>) {
    let area = centered(frame.area(), 48, 11);
    frame.render_widget(Clear, area);

    let field = |label: &str, value: String, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{label:>10}: "), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{value}{cursor}"), style),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field(
            "Username",
            app.login.username.clone(),
            app.login.focus == LoginField::Username,
        ),
        Line::from(""),
        field(
            "Password",
            "*".repeat(app.login.password.chars().count()),
            app.login.focus == LoginField::Password,
        ),
        Line::from(""),
    ];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &app.login.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab:switch | Enter:sign in | Esc:quit",
        Style::default().fg(Color::DarkGray),
    )));

    let form = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" shopdash sign in ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(form, area);
}

fn render_board<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(body[1]);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, body[0]);
    render_detail(frame, app.selected_job(), side[0]);
    render_tracker(frame, app, side[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_header<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let operator = app
        .operator
        .as_ref()
        .map_or("", |o| o.display_name.as_str());
    let mut title = format!(" Job Board ({} jobs) | {operator} ", app.jobs.len());
    let running = app.running_count();
    if running > 0 {
        title.push_str(&format!("| {running} tracking "));
    }

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_list<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .jobs
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let is_selected = i == app.selected;

            let icon = match job.status {
                JobStatus::Pending => "[ ]",
                JobStatus::InProgress => "[>]",
                JobStatus::OnHold => "[=]",
                JobStatus::Completed => "[x]",
            };

            let spans = vec![
                Span::styled(
                    format!("{icon} "),
                    Style::default().fg(status_color(job.status)),
                ),
                Span::styled(
                    format!("{} ", job.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    job.service.as_str(),
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
            ];

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame<'_>, job: Option<&JobCard>, area: Rect) {
    let block = Block::default().title(" Job Card ").borders(Borders::ALL);

    let Some(job) = job else {
        frame.render_widget(Paragraph::new("No job selected").block(block), area);
        return;
    };

    let label = |s: &'static str| Span::styled(format!("{s:>9}: "), Style::default().fg(Color::DarkGray));
    let time = |t: Option<chrono::DateTime<chrono::Utc>>| {
        t.map_or_else(|| "-".to_string(), |t| t.format("%m-%d %H:%M").to_string())
    };

    let lines = vec![
        Line::from(vec![
            label("Job"),
            Span::styled(job.id.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![label("Service"), Span::raw(job.service.clone())]),
        Line::from(vec![
            label("Status"),
            Span::styled(job.status.to_string(), Style::default().fg(status_color(job.status))),
        ]),
        Line::from(vec![label("Time in"), Span::raw(time(job.time_in))]),
        Line::from(vec![label("Time out"), Span::raw(time(job.time_out))]),
        Line::from(vec![label("Worked"), Span::raw(format_minutes(job.worked_minutes))]),
        Line::from(vec![label("Notes"), Span::raw(job.notes.clone())]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_tracker<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let tracker = app.selected_tracker();
    let display = tracker.map_or(IDLE_DISPLAY, TrackerWidget::display);
    let running = tracker.and_then(|w| w.timer().active()).map(|s| s.activity);

    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);
    let start_style = if app.can_start_selected() { enabled } else { disabled };
    let stop_style = if app.can_stop_selected() { enabled } else { disabled };

    let mut lines = vec![
        Line::from(Span::styled(
            display.to_string(),
            Style::default().add_modifier(Modifier::BOLD).fg(
                running.map_or(Color::DarkGray, activity_color),
            ),
        )),
        Line::from(running.map_or_else(
            || "idle".to_string(),
            |a| a.display_name().to_string(),
        )),
        Line::from(vec![
            Span::styled("[s]tart [b]reak [w]ait [c]heck  ", start_style),
            Span::styled("[p]ause [x] stop", stop_style),
        ]),
        Line::from(""),
    ];

    if let Some(tracker) = tracker {
        for entry in tracker.entries().iter().rev().take(6) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("#{:<3}", entry.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<14}", entry.activity.display_name()),
                    Style::default().fg(activity_color(entry.activity)),
                ),
                Span::raw(format!(
                    "{} {:>7}",
                    entry.started_at.format("%H:%M"),
                    format_minutes(entry.duration_minutes)
                )),
            ]));
        }
        let timer = tracker.timer();
        lines.push(Line::from(format!(
            "Work {}  Break {}",
            format_minutes(timer.total_work_minutes()),
            format_minutes(timer.total_break_minutes())
        )));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Tracker ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if running.is_some() {
                Color::Green
            } else {
                Color::White
            })),
    );

    frame.render_widget(panel, area);
}

fn render_status_bar<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
