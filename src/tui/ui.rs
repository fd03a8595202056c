use crate::tui::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Application list
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    draw_application_list(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);

    match app.mode {
        Mode::Help => draw_help_window(frame),
        Mode::Rename => draw_rename_window(frame, app),
        Mode::ConfirmDelete => draw_confirm_delete_window(frame, app),
        Mode::Normal => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.view();

    let name = match &view.app {
        Some(application) => Span::styled(
            application.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("No application selected", Style::default().fg(Color::DarkGray)),
    };
    let role = match view.role {
        Some(role) => format!("  [{}]", role),
        None => "  [no role]".to_string(),
    };

    let mut spans = vec![name, Span::styled(role, Style::default().fg(Color::Yellow))];
    if view.is_loading {
        spans.push(Span::styled("  loading…", Style::default().fg(Color::Magenta)));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Application"));

    frame.render_widget(header, area);
}

fn draw_application_list(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.view();

    let items: Vec<ListItem> = view
        .applications
        .iter()
        .map(|application| {
            let role = application
                .role
                .map(|role| role.to_string())
                .unwrap_or_else(|| "-".to_string());
            let mut spans = vec![
                Span::styled(
                    format!("{:<32}", application.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(format!("{:<14}", role), Style::default().fg(Color::Yellow)),
            ];
            if !application.description.is_empty() {
                spans.push(Span::styled(
                    application.description.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Applications"))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    list_state.select(app.selected_index());

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.view();

    let (text, color) = if let Some(error) = &view.last_error {
        (format!("Error: {}", error), Color::Red)
    } else if let Some(status) = &app.status {
        (status.clone(), Color::Magenta)
    } else {
        let text = match app.mode {
            Mode::Rename => {
                "RENAME | Enter: confirm | Esc/Ctrl+C: cancel | ←→: cursor | Ctrl+W: delete word"
                    .to_string()
            }
            Mode::ConfirmDelete => "DELETE | y: confirm | n/Esc: cancel".to_string(),
            _ => format!(
                "Applications: {} | ↑↓/j/k: select | r: rename | d: delete | R: reload | ?: help | q: quit",
                view.applications.len()
            ),
        };
        (text, Color::Yellow)
    };

    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(color));

    frame.render_widget(footer, area);
}

fn draw_rename_window(frame: &mut Frame, app: &App) {
    let (before_cursor, after_cursor) = app.edit_state.split_at_cursor();
    let line = Line::from(vec![
        Span::raw(before_cursor.to_string()),
        Span::styled("█", Style::default().fg(Color::Cyan)),
        Span::raw(after_cursor.to_string()),
    ]);

    let editor = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Rename application ")
            .style(Style::default().fg(Color::Cyan)),
    );

    let area = fixed_height_rect(60, 3, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(editor, area);
}

fn draw_confirm_delete_window(frame: &mut Frame, app: &App) {
    let name = app
        .view()
        .app
        .as_ref()
        .map(|application| application.name.clone())
        .unwrap_or_else(|| "the selected application".to_string());

    let prompt = Paragraph::new(format!("Delete {}? (y/n)", name))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Delete application ")
                .style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    let area = fixed_height_rect(60, 3, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = vec![
        "Application Header - Keyboard Commands",
        "",
        "NAVIGATION:",
        "  ↑↓ / j/k          Select previous/next application",
        "  Home/End / g/G    Select first/last application",
        "",
        "MANAGEMENT (owners and administrators):",
        "  r / e             Rename the selected application",
        "  d / Delete        Delete the selected application",
        "",
        "OTHER:",
        "  R                 Reload the application list",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit application",
        "",
        "Press ? or Esc to close this help window",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });

    let area = centered_rect(70, 60, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
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

    horizontal_center(percent_x, popup_layout[1])
}

fn fixed_height_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    horizontal_center(percent_x, popup_layout[1])
}

fn horizontal_center(percent_x: u16, r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(r)[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{Application, Role, User};
    use crate::store::state::AppState;
    use crate::store::store::Store;
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn create_test_app(selected: Option<&str>) -> App {
        let store = Rc::new(Store::new(AppState::new(
            vec![
                Application::new("app-1", "Billing", Some(Role::Owner)),
                Application::new("app-2", "Search", None),
            ],
            selected.map(str::to_string),
            User::default(),
        )));
        App::new(store)
    }

    #[test]
    fn test_header_shows_selected_application_and_role() {
        let app = create_test_app(Some("app-1"));
        let screen = render(&app);

        assert!(screen.contains("Billing"));
        assert!(screen.contains("[Owner]"));
        assert!(screen.contains("Search"));
        assert!(screen.contains("Applications: 2"));
    }

    #[test]
    fn test_rename_window_shows_buffer() {
        let mut app = create_test_app(Some("app-1"));
        app.mode = Mode::Rename;
        app.edit_state.start("Payments");

        let screen = render(&app);
        assert!(screen.contains("Rename application"));
        assert!(screen.contains("Payments█"));
    }

    #[test]
    fn test_footer_prefers_store_error() {
        let mut app = create_test_app(None);
        app.mode = Mode::ConfirmDelete;
        app.facade.delete();

        let screen = render(&app);
        assert!(screen.contains("Error: No application selected"));
        assert!(screen.contains("Delete the selected application? (y/n)"));
    }
}
