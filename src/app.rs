use crate::config::Config;
use crate::github::{FetchEvent, RepoSummary};
use tracing::{error, info};

/// Lines one card occupies: name, description, owner/stars, separator.
pub const LINES_PER_CARD: usize = 4;

pub const NO_DESCRIPTION: &str = "No description available.";

/// Star count in thousands with one decimal, raw division with no rounding
/// threshold: 999 -> "1.0k", 12345 -> "12.3k".
pub fn format_stars(count: u64) -> String {
    format!("{:.1}k", count as f64 / 1000.0)
}

pub fn description_text(repo: &RepoSummary) -> &str {
    repo.description.as_deref().unwrap_or(NO_DESCRIPTION)
}

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    /// Append-only feed; items are never removed, updated, or deduplicated.
    pub repos: Vec<RepoSummary>,
    /// Next page to request. Starts at 1, only ever increments.
    pub page: u32,
    /// True exactly while a fetch is outstanding.
    pub loading: bool,
    pub scroll_offset: usize,
    pub terminal_height: u16,
}

impl App {
    pub fn new(config: Config) -> App {
        App {
            should_quit: false,
            config,
            repos: Vec::new(),
            page: 1,
            loading: false,
            scroll_offset: 0,
            terminal_height: 24,
        }
    }

    /// Mark a fetch as outstanding and return the page number to request.
    /// The caller hands that page to the background fetcher.
    pub fn begin_fetch(&mut self) -> u32 {
        info!("Fetching page {}", self.page);
        self.loading = true;
        self.page
    }

    /// Apply the outcome of a fetch. Success appends the returned items in
    /// order; failure leaves the feed unchanged. Both clear the loading flag
    /// so the UI never appears stuck.
    pub fn apply_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::PageLoaded { page, repos } => {
                info!("Page {} loaded with {} repositories", page, repos.len());
                self.repos.extend(repos);
            }
            FetchEvent::FetchFailed { page, error } => {
                error!("Fetching page {} failed: {}", page, error);
            }
        }
        self.loading = false;
    }

    /// True when the last card has scrolled into the visible window, at
    /// least one card exists, and no fetch is outstanding. With zero cards
    /// nothing is observed and pagination stalls until items arrive.
    pub fn wants_next_page(&self) -> bool {
        !self.loading && self.last_card_visible()
    }

    pub fn advance_page(&mut self) {
        self.page += 1;
    }

    fn last_card_visible(&self) -> bool {
        let total = self.total_card_lines();
        total > 0 && total <= self.scroll_offset + self.content_height()
    }

    fn total_card_lines(&self) -> usize {
        self.repos.len() * LINES_PER_CARD
    }

    /// Rows available for cards: terminal height minus title, footer, and
    /// the content block's borders.
    fn content_height(&self) -> usize {
        (self.terminal_height as usize).saturating_sub(8)
    }

    pub fn handle_resize(&mut self, _width: u16, height: u16) {
        self.terminal_height = height;
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_card_lines() {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        }
    }

    pub fn ui(&self, f: &mut ratatui::Frame) {
        use ratatui::{
            layout::{Constraint, Direction, Layout},
            prelude::Stylize,
            style::{Color, Modifier, Style},
            text::{Line, Span},
            widgets::{Block, Borders, Paragraph},
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(1),    // Main content
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        // Title with the query window
        let title_text = format!("Trending Repos    last {} days", self.config.days_window);
        let title = Paragraph::new(title_text)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(title, chunks[0]);

        // Main content - one card per repository
        let content_lines = if self.repos.is_empty() {
            if self.loading {
                vec![Line::from("Loading...")]
            } else {
                vec![Line::from("No repositories loaded yet.")]
            }
        } else {
            let mut lines = Vec::new();

            for repo in &self.repos {
                lines.push(Line::from(Span::styled(
                    repo.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    description_text(repo).to_string(),
                    Style::default().fg(Color::Gray),
                )));

                let mut spans = vec![Span::raw(repo.owner.login.clone())];
                if self.config.ui.show_avatar_url {
                    spans.push(Span::styled(
                        format!("  {}", repo.owner.avatar_url),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                let stars = if self.config.ui.show_star_icon {
                    format!("  ★ {}", format_stars(repo.stargazers_count))
                } else {
                    format!("  {}", format_stars(repo.stargazers_count))
                };
                spans.push(Span::styled(stars, Style::default().fg(Color::Yellow)));
                lines.push(Line::from(spans));

                lines.push(Line::from("")); // Empty line between cards
            }

            if self.loading {
                lines.push(Line::from(Span::styled(
                    "Loading...",
                    Style::default().fg(Color::Gray),
                )));
            }

            lines
        };

        // Apply scrolling: calculate visible area and slice content
        let available_height = chunks[1].height.saturating_sub(2) as usize; // Minus borders
        let visible_lines = if content_lines.len() > available_height && available_height > 0 {
            let start = self.scroll_offset.min(content_lines.len().saturating_sub(1));
            let end = (start + available_height).min(content_lines.len());
            content_lines[start..end].to_vec()
        } else {
            content_lines
        };

        let main_content = Paragraph::new(visible_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Repositories"),
            )
            .style(Style::default().fg(Color::White));
        f.render_widget(main_content, chunks[1]);

        // Footer with keybindings
        let footer = Paragraph::new(Line::from(vec![
            "Press ".into(),
            "↑↓".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            "/".into(),
            "j,k".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            " to scroll, ".into(),
            "q".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            " to quit".into(),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
        f.render_widget(footer, chunks[2]);
    }
}
