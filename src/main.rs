use std::io;
use std::time::Duration;

use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod db;
mod error;
mod feed;
mod models;
mod session;
mod tui;

use app::App;
use config::Config;
use db::Database;
use error::Result;
use feed::FeedView;
use models::Post;
use session::FeedSelection;
use tui::{draw, handle_key_event};

enum Command {
    Interactive,
    /// `--feed [AUTHOR]`
    PrintFeed(Option<String>),
    /// `--posts`
    PrintPosts,
    /// `--authors`
    PrintAuthors,
}

fn parse_args(args: &[String]) -> Command {
    match args.get(1).map(String::as_str) {
        Some("--feed") => Command::PrintFeed(args.get(2).cloned()),
        Some("--posts") => Command::PrintPosts,
        Some("--authors") => Command::PrintAuthors,
        _ => Command::Interactive,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging to stderr so the TUI is left alone
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    match parse_args(&args) {
        Command::PrintFeed(author) => {
            let db = Database::open(&config.db_path).await?;
            let posts = db.posts();
            let mut selection = FeedSelection {
                selected_author: author,
            };
            let feed = FeedView::new(&posts, &mut selection);
            println!("{}\n", feed.heading());
            print_posts(&feed.view_feed().await?);
            return Ok(());
        }
        Command::PrintPosts => {
            let db = Database::open(&config.db_path).await?;
            print_posts(&db.posts().list_all().await?);
            return Ok(());
        }
        Command::PrintAuthors => {
            let db = Database::open(&config.db_path).await?;
            for author in db.posts().authors().await? {
                println!("{author}");
            }
            return Ok(());
        }
        Command::Interactive => {}
    }

    // Initialize app
    let mut app = App::new(&config).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts found.");
        return;
    }
    for post in posts {
        println!("Post ID: {}", post.id);
        println!("Title: {}", post.title);
        println!("Author: {}", post.author);
        println!("Content: {}", post.content);
        println!("---");
    }
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Poll for events with timeout so the loop stays responsive
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) =
                        handle_key_event(key, app.input_active(), app.show_help)
                    {
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
