use ratatui::{prelude::*, widgets::*};

use crate::constants::{APP_NAME, APP_VERSION};
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::ActivityKind;

/// Draw the whole screen from a render snapshot
pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(5),    // Users
            Constraint::Length(3), // Draft input
            Constraint::Length(7), // Activity
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(f, state, chunks[0]);
    draw_users(f, state, chunks[1]);
    draw_draft(f, state, chunks[2]);
    draw_activity(f, state, chunks[3]);
    draw_status_bar(f, state, chunks[4]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} v{} ", APP_NAME, APP_VERSION),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::raw(" "),
        Span::styled(state.base_url.clone(), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("  [{}]", state.sync_policy.as_str()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_users(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.input_mode == InputMode::Normal;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" Users ({}) ", state.users.len()));

    if state.users.is_empty() {
        let hint = match &state.load_error {
            _ if state.loaded => {
                String::from("No users yet. Press 'e' to type a name, Enter to add.")
            }
            Some(error) if state.in_flight == 0 => {
                format!("Could not load users: {}. Press 'r' to retry.", error)
            }
            _ => String::from("Loading users..."),
        };
        let paragraph = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .users
        .iter()
        .map(|user| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>6} ", user.id.to_string()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(user.name.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_draft(f: &mut Frame, state: &RenderState, area: Rect) {
    let editing = state.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" New user name (e:edit Enter:add) ");

    let input = Paragraph::new(state.draft.as_str()).block(block);
    f.render_widget(input, area);

    if editing {
        let column = state.draft[..state.cursor_position].chars().count();
        let column = u16::try_from(column).unwrap_or(u16::MAX);
        let max_x = area.x.saturating_add(area.width.saturating_sub(2));
        let cursor_x = area.x.saturating_add(column).saturating_add(1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y.saturating_add(1)));
    }
}

fn draw_activity(f: &mut Frame, state: &RenderState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = state.activity.len().saturating_sub(visible);

    let lines: Vec<Line> = state
        .activity
        .iter()
        .skip(skip)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    entry.message.clone(),
                    Style::default().fg(activity_color(entry.kind)),
                ),
            ])
        })
        .collect();

    let activity = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Activity "));
    f.render_widget(activity, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        String::from(" ESC:stop editing | arrows:move | Enter:add ")
    } else if state.in_flight > 0 {
        format!(" {} request(s) in flight... ", state.in_flight)
    } else {
        String::from(
            " ↑/↓:select | e:edit | Enter:add | d:delete | r:reload | ?:help | q:quit ",
        )
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 USER LIST - Keyboard Shortcuts

 LIST
   ↑ / ↓  or  k / j   Select user
   d / Delete         Delete selected user
   r                  Reload from server

 NEW USER
   e / i              Edit name
   Enter / a          Add user
   Esc                Stop editing

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

/// Activity line color
pub fn activity_color(kind: ActivityKind) -> Color {
    match kind {
        ActivityKind::Info => Color::Gray,
        ActivityKind::Success => Color::Green,
        ActivityKind::Error => Color::Red,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
