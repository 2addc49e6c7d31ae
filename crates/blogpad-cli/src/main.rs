mod app;

use anyhow::{Context, Result, bail};
use app::{App, InputMode};
use blogpad_config::{Config, load_toml, preferences_path, save_toml};
use blogpad_engine::EditorSession;
use blogpad_engine::models::ListingState;
use blogpad_engine::render::{self, html};
use blogpad_engine::store::{FsPostStore, LocalAuth, PostStore, User, fs::validate_data_dir};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

fn usage(program: &str) {
    eprintln!("Usage: {program} [data-folder-path]");
    eprintln!("       {program} render <post-id>");
    eprintln!("       {program} new <title>");
}

fn load_config() -> Result<Config> {
    match Config::load()? {
        Some(config) => Ok(config),
        None => bail!(
            "no config file found, create one at {}",
            Config::config_path().display()
        ),
    }
}

fn main() -> Result<()> {
    // The reader owns the terminal, so only warnings reach stderr by default
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    match args.as_slice() {
        [_, cmd, post_id] if cmd == "render" => render_post(post_id),
        [_, cmd, title] if cmd == "new" => new_post(title),
        [_, data_path] => run_reader(PathBuf::from(data_path), false),
        [_] => match Config::load() {
            Ok(Some(config)) => run_reader(config.data_path, true),
            Ok(None) => {
                eprintln!("Error: No data path provided and no config file found");
                usage(&args[0]);
                eprintln!("Or create a config file at {}", Config::config_path().display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                usage(&args[0]);
                process::exit(1);
            }
        },
        _ => {
            usage(args.first().map_or("blogpad-cli", String::as_str));
            process::exit(1);
        }
    }
}

/// Print a stored post's body as HTML
fn render_post(post_id: &str) -> Result<()> {
    let config = load_config()?;
    let store = FsPostStore::open(&config.data_path)?;
    let post = store
        .get(post_id)?
        .with_context(|| format!("no post with id {post_id}"))?;

    let blocks = post.block_list();
    print!("{}", html::to_html(&render::render_blocks(blocks.as_slice())));
    Ok(())
}

/// Create an empty post as the configured author
fn new_post(title: &str) -> Result<()> {
    let config = load_config()?;
    let email = config
        .author
        .clone()
        .context("set `author` in the config file to create posts")?;
    let auth = LocalAuth::signed_in(User {
        id: email.clone(),
        email,
    });
    let mut store = FsPostStore::open(&config.data_path)?;

    let mut session = EditorSession::open_new();
    session.draft_mut().title = title.to_string();
    let post = session.save(&mut store, &auth)?;
    println!("{}", post.id);
    Ok(())
}

fn load_listing_state() -> ListingState {
    match load_toml::<ListingState>(&preferences_path()) {
        Ok(state) => state.unwrap_or_default(),
        Err(e) => {
            log::warn!("ignoring unreadable preferences: {e}");
            ListingState::default()
        }
    }
}

fn run_reader(data_path: PathBuf, from_config: bool) -> Result<()> {
    if let Err(e) = validate_data_dir(&data_path) {
        let source = if from_config {
            format!(" from config file '{}'", Config::config_path().display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Data path '{}'{} is invalid: {e}",
            data_path.display(),
            source
        );
        process::exit(1);
    }

    let store = FsPostStore::open(&data_path)?;
    let mut app = App::new(store.list()?, load_listing_state());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = save_toml(&app.listing, &preferences_path()) {
        log::warn!("could not save preferences: {e}");
    }

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key.code)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| ListItem::new(Line::from(row.label())))
        .collect();

    let title = format!(
        "Posts ({:?}, {:?})",
        app.listing.view_mode, app.listing.sort_order
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, chunks[0], &mut app.list_state);

    let content: Vec<Line> = app
        .content
        .iter()
        .map(|line| Line::from(vec![Span::raw(line.clone())]))
        .collect();

    let post = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title("Post"))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(post, chunks[1]);

    let help = match app.mode {
        InputMode::Search => Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.listing.search_query.clone()),
            Span::raw("  (Enter: done | Esc: clear)"),
        ]),
        InputMode::Browse => Line::from(
            "q: Quit | ↑/k ↓/j: Move | s: Sort | v: Grid/Grouped | /: Search | Esc: Clear search",
        ),
    };

    f.render_widget(Paragraph::new(help), rows[1]);
}
