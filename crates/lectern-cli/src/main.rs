use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lectern_config::Config;
use lectern_engine::{
    Chapter, RenderOptions, TagRegistry, io::ContentSource, io::FsContentSource, reconstruct,
    render::footnotes, render::verse_plain_text, render_chapter,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{env, io::stdout, path::PathBuf, process};

struct App {
    chapters: Vec<Chapter>,
    registry: TagRegistry,
    options: RenderOptions,
    chapter_list_state: ListState,
    current_content: Vec<String>,
    scroll: u16,
}

impl App {
    fn new(chapters: Vec<Chapter>, registry: TagRegistry, options: RenderOptions) -> Self {
        let mut app = Self {
            chapters,
            registry,
            options,
            chapter_list_state: ListState::default(),
            current_content: Vec::new(),
            scroll: 0,
        };

        // Select first chapter if available
        if !app.chapters.is_empty() {
            app.chapter_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        app
    }

    fn next_chapter(&mut self) {
        let i = match self.chapter_list_state.selected() {
            Some(i) => (i + 1) % self.chapters.len(),
            None => 0,
        };
        self.chapter_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_chapter(&mut self) {
        let i = match self.chapter_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.chapters.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.chapter_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(10);
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(10);
    }

    fn update_content_for_selection(&mut self) {
        self.scroll = 0;
        if let Some(index) = self.chapter_list_state.selected()
            && let Some(chapter) = self.chapters.get(index)
        {
            self.current_content = self.render_chapter_content(chapter);
        }
    }

    fn render_chapter_content(&self, chapter: &Chapter) -> Vec<String> {
        let notes = footnotes::collect(chapter, &self.registry);
        let mut lines = Vec::new();

        for section in &chapter.sections {
            if !section.title.is_empty() {
                lines.push(section.title.clone());
                lines.push(String::new());
            }
            for verse in &section.verses {
                let text = verse_plain_text(
                    verse,
                    chapter.number,
                    &self.registry,
                    &self.options,
                    &notes,
                );
                let mut verse_lines = text.lines();
                if let Some(first) = verse_lines.next() {
                    lines.push(format!("{} {}", verse.verse_number, first));
                }
                lines.extend(verse_lines.map(String::from));
            }
            lines.push(String::new());
        }

        if self.options.show_footnotes && !notes.is_empty() {
            lines.push(format!("Footnotes for {} {}", chapter.book, chapter.number));
            for footnote in &notes.footnotes {
                lines.push(format!("[{}] {}", footnote.ordinal, footnote.content));
            }
        }

        lines
    }
}

struct Cli {
    content_path: PathBuf,
    outline_path: PathBuf,
    export: Option<String>,
    config: Option<Config>,
}

fn parse_args() -> Cli {
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let mut export = None;
    let mut positional = Vec::new();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--export" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --export requires a chapter name, e.g. --export 'Genesis 1'");
                    process::exit(1);
                }
                export = Some(args[i + 1].clone());
                i += 2;
            }
            arg if arg.starts_with("--") => {
                eprintln!("Error: unknown option {arg}");
                usage(&args[0]);
            }
            _ => {
                positional.push(args[i].clone());
                i += 1;
            }
        }
    }

    match positional.len() {
        2 => Cli {
            content_path: PathBuf::from(&positional[0]),
            outline_path: PathBuf::from(&positional[1]),
            export,
            config: None,
        },
        0 => match Config::load() {
            Ok(Some(config)) => Cli {
                content_path: config.content_path.clone(),
                outline_path: config.outline_path.clone(),
                export,
                config: Some(config),
            },
            Ok(None) => {
                eprintln!("Error: No content paths provided and no config file found");
                eprintln!("Usage: {} <content-file> <outline-file>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <content-file> <outline-file>", args[0]);
                process::exit(1);
            }
        },
        _ => usage(&args[0]),
    }
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--export <chapter-name>] [content-file outline-file]");
    process::exit(1)
}

fn load_chapters(cli: &Cli) -> Result<Vec<Chapter>> {
    let config = cli.config.clone().unwrap_or_else(default_config);
    let source = FsContentSource::new();

    let outline = source
        .fetch_outline(&cli.outline_path.to_string_lossy())
        .with_context(|| format!("failed to load outline {}", cli.outline_path.display()))?;
    let content = source
        .fetch_text(&cli.content_path.to_string_lossy())
        .with_context(|| format!("failed to load content {}", cli.content_path.display()))?;

    let outline_chapters = match &config.book {
        Some(book) => outline
            .chapters_for_book(book)
            .into_iter()
            .cloned()
            .collect(),
        None => outline.chapters,
    };

    let result = reconstruct(&content, &outline_chapters, &config.reconstruct_options())?;
    for advisory in &result.advisories {
        tracing::warn!("{advisory}");
    }
    Ok(result.chapters)
}

fn default_config() -> Config {
    Config {
        content_path: PathBuf::new(),
        outline_path: PathBuf::new(),
        book: None,
        reader: Default::default(),
        tags: Vec::new(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();
    let config = cli.config.clone().unwrap_or_else(default_config);
    let registry = config.registry();
    let options = config.render_options();

    let chapters = match load_chapters(&cli) {
        Ok(chapters) => chapters,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    if let Some(name) = &cli.export {
        let chapter = chapters
            .iter()
            .find(|c| c.name == *name)
            .ok_or_else(|| anyhow!("no chapter named '{name}' in the outline"))?;
        let rendered = render_chapter(chapter, &registry, &options);
        println!("{}", rendered.to_html());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(chapters, registry, options);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_chapter(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_chapter(),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_down(),
                KeyCode::PageUp | KeyCode::Char('b') => app.scroll_up(),
                KeyCode::Home => app.scroll = 0,
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Chapter list panel
    let chapter_items: Vec<ListItem> = app
        .chapters
        .iter()
        .map(|chapter| ListItem::new(vec![Line::from(vec![Span::raw(chapter.name.clone())])]))
        .collect();

    let chapter_list = List::new(chapter_items)
        .block(Block::default().borders(Borders::ALL).title("Chapters"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(chapter_list, chunks[0], &mut app.chapter_list_state);

    // Text panel
    let content_text = if app.current_content.is_empty() {
        vec![Line::from("Select a chapter to read")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Text"))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(content, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous chapter | "),
        Span::raw("↓/j: Next chapter | "),
        Span::raw("PgUp/PgDn: Scroll"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
