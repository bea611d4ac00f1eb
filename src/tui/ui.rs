use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen, StatusKind};

pub fn draw(frame: &mut Frame, app: &App) {
    // Main horizontal split: sidebar menu, then the active screen
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // Sidebar: menu
            Constraint::Min(0),     // Active screen
        ])
        .split(frame.area());

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(0),    // Screen body
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[1]);

    render_menu(frame, app, main_chunks[0]);
    render_heading(frame, app, right_chunks[0]);

    if app.screen.is_form() {
        render_form(frame, app, right_chunks[1]);
    } else {
        render_posts(frame, app, right_chunks[1]);
    }

    render_status(frame, app, right_chunks[2]);

    // Render help popup if active
    if app.show_help {
        render_help(frame);
    }
}

fn render_menu(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = app
        .menu()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(entry.label()),
            ])
        })
        .collect();

    lines.push(Line::raw(""));
    let who = match app.session.username() {
        Some(name) => format!(" Signed in as {name}"),
        None => " Not signed in".to_string(),
    };
    lines.push(Line::styled(who, Style::default().fg(Color::DarkGray)));

    let block = Block::default()
        .title(" Menu ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_heading(frame: &mut Frame, app: &App, area: Rect) {
    let heading = match app.screen {
        Screen::Feed | Screen::AllPosts => app.heading.as_str(),
        other => other.title(),
    };

    let block = Block::default()
        .title(" TechScribe ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(heading)
        .block(block)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, area);
}

fn render_posts(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45), // Post list
            Constraint::Percentage(55), // Selected post
        ])
        .split(area);

    if app.posts.is_empty() {
        let message = match app.session.selection.selected_author.as_deref() {
            Some(author) if app.screen == Screen::Feed => format!("No posts found by {author}."),
            _ => "No posts found.".to_string(),
        };
        let paragraph = Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .posts
        .iter()
        .map(|post| {
            let line = Line::from(vec![
                Span::styled(format!("#{:<4} ", post.id), Style::default().fg(Color::Yellow)),
                Span::styled(format!("[{}] ", post.author), Style::default().fg(Color::Blue)),
                Span::styled(post.title.as_str(), Style::default().fg(Color::White)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let (title, body) = match app.selected_post() {
        Some(post) => (
            format!(" {} by {} ", post.title, post.author),
            post.content.as_str(),
        ),
        None => (" Post ".to_string(), ""),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(body)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[1]);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for (i, field) in app.form.fields.iter().enumerate() {
        let focused = i == app.form.focus;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused { "_" } else { "" };

        lines.push(Line::styled(format!(" {}:", field.label), label_style));
        lines.push(Line::raw(format!(" > {}{cursor}", field.display())));
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        " Tab: next field   Enter: submit   Esc: back",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => Color::Cyan,
                StatusKind::Success => Color::Green,
                StatusKind::Warning => Color::Yellow,
            };
            (status.text.clone(), color)
        }
        None if app.screen == Screen::Feed => (
            "j/k:nav  Enter:posts by author  b:all posts  1-9:menu  ?:help  q:quit".to_string(),
            Color::DarkGray,
        ),
        None if app.screen.is_form() => ("Esc:back  Ctrl-C:quit".to_string(), Color::DarkGray),
        None => ("j/k:nav  1-9:menu  ?:help  q:quit".to_string(), Color::DarkGray),
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(color));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = [
        "",
        " Navigation:",
        "   j / ↓    Move down",
        "   k / ↑    Move up",
        "   < / >    Jump to first / last post",
        "   1-9      Open menu entry",
        "",
        " Feed:",
        "   Enter    View posts by this author",
        "   b / Esc  Back to all posts",
        "   r        Reload",
        "",
        " Forms:",
        "   Tab      Next field",
        "   Enter    Submit",
        "   Esc      Back to feed",
        "",
        " General:",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(paragraph, area);
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

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::db::Database;
    use crate::tui::AppAction;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn feed_shows_menu_and_posts() {
        let db = Database::open_in_memory().await.unwrap();
        db.posts().create("Hello world", "body", "alice").await.unwrap();
        let app = App::with_database(&db).await.unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Latest Posts"));
        assert!(text.contains("Hello world"));
        assert!(text.contains("Register"));
        assert!(text.contains("Not signed in"));
    }

    #[tokio::test]
    async fn password_is_masked_on_screen() {
        let db = Database::open_in_memory().await.unwrap();
        let mut app = App::with_database(&db).await.unwrap();
        app.handle_action(AppAction::SelectMenu(1)).await.unwrap();
        app.handle_action(AppAction::NextField).await.unwrap();
        for c in "topsecret".chars() {
            app.handle_action(AppAction::InputChar(c)).await.unwrap();
        }

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("User Login"));
        assert!(!text.contains("topsecret"));
        assert!(text.contains("*********"));
    }
}
