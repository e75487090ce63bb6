use anyhow::Result;
use clap::Parser;
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{error, info};

use starfeed::app::App;
use starfeed::cli::CliArgs;
use starfeed::config::Config;
use starfeed::github::{self, FetchEvent};

fn main() -> Result<()> {
    // Initialize tracing with env filter
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting starfeed");

    let cli_args = CliArgs::parse();
    let config_path = cli_args.config.clone();
    let config = Config::from_cli_and_file(cli_args, config_path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Application error: {}", err);
        println!("Error: {}", err);
    }

    info!("starfeed shut down cleanly");
    Ok(())
}

fn run<B: Backend>(terminal: &mut Terminal<B>, config: Config) -> Result<()> {
    let (fetch_tx, fetch_rx): (Sender<FetchEvent>, Receiver<FetchEvent>) = unbounded();
    let mut app = App::new(config);

    // Initial load: one request for page 1
    start_fetch(&mut app, &fetch_tx);

    loop {
        // Apply outcomes of background fetches
        while let Ok(fetch_event) = fetch_rx.try_recv() {
            app.apply_fetch_event(fetch_event);
        }

        let size = terminal.size()?;
        app.handle_resize(size.width, size.height);

        terminal.draw(|f| app.ui(f))?;

        // Pagination trigger: the last card is in view and nothing is loading
        if app.wants_next_page() {
            app.advance_page();
            start_fetch(&mut app, &fetch_tx);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => {
                            info!("Quit requested by user");
                            app.should_quit = true;
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            info!("Ctrl+C pressed, quitting");
                            app.should_quit = true;
                        }
                        KeyCode::Esc => {
                            info!("Escape pressed, quitting");
                            app.should_quit = true;
                        }
                        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn start_fetch(app: &mut App, sender: &Sender<FetchEvent>) {
    let page = app.begin_fetch();
    github::fetch_page_background(page, app.config.days_window, sender.clone());
}
