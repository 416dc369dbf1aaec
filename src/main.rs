//! Binary entry point — bootstrap the board and run the event loop.
//!
//! Loads a board file (or the built-in demo), registers every portal found
//! on the page, and hands control to the terminal event loop.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use portboard::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use portboard::config::BoardFile;
use portboard::core::{id::IdGen, portal::Portal};
use portboard::ui::{board::BoardWidget, layout::AppLayout, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Drag-and-drop portlet board")]
struct Cli {
    /// Board file to open (TOML).  Defaults to the built-in demo board.
    board: Option<PathBuf>,

    /// Skip mouse capture.  The board renders but no portal is registered,
    /// so cards cannot be dragged.
    #[arg(long = "no-mouse")]
    no_mouse: bool,
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute the board
        .init();

    let cli = Cli::parse();

    // ── build the page ────────────────────────────────────────
    let board = match &cli.board {
        Some(path) => BoardFile::load(path)?,
        None => BoardFile::sample(),
    };
    let classes = board.class_config();
    let (mut tree, page) = board.instantiate();

    // Register every portal-class node on the page, gated on drag support.
    // Without it the board still renders — it just stays inert.
    let mut portals = Vec::new();
    if !cli.no_mouse {
        let mut idgen = IdGen::new();
        for root in tree.query_class(page, &classes.portal) {
            portals.push(Portal::register(&mut tree, root, classes.clone(), &mut idgen));
        }
    }

    if let Some(portal) = portals.first() {
        let first_column = tree
            .query_class(portal.root(), &classes.column)
            .first()
            .map(|&c| tree.get(c).id.clone());
        if let Some(column_id) = first_column {
            let count = portal.column_portlets(&tree, &column_id)?.len();
            tracing::debug!(
                portal = %portal.id(),
                column = %column_id,
                portlets = count,
                "portal registered"
            );
        }
    }

    let mut state = AppState::new(tree, page, classes, portals);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    if !cli.no_mouse {
        execute!(out, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            // Remember where the board landed so mouse hit-testing matches
            // what is on screen.
            state.board_area = layout.board_area;

            let dragged = state
                .drag_portal
                .and_then(|i| state.portals[i].dragged_portlet());
            let widget =
                BoardWidget::new(&state.tree, state.page, &state.classes).dragged(dragged);
            frame.render_widget(widget, layout.board_area);

            let status_text = state
                .status_message
                .as_deref()
                .unwrap_or_else(|| handler::status_hint());
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        match events.recv().await {
            Some(AppEvent::Key(k)) => handler::handle_key(&mut state, k),
            Some(AppEvent::Mouse(m)) => handler::handle_mouse(&mut state, m),
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) => {}
            None => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    if !cli.no_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
