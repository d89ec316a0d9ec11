//! Interactive landing page driven by a page-behavior controller.
//!
//! Run the binary to browse the page in the terminal: the burger opens the
//! navigation drawer, "Contact us" opens the popup, the manager cards swipe
//! in a carousel on narrow terminals and sections fade in as you scroll.
//! Run with `--dump` to initialize headless and print the page state.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tracing::info;

use crate::app::{
    event::{frame_clock, next_event, spawn_event_reader, AppEvent},
    handler, page,
    runtime::Gates,
    state::PageState,
};
use crate::core::{
    landing::{self, LandingOptions},
    viewport::Viewport,
};
use crate::ui::{
    layout::AppLayout,
    page_widget::PageWidget,
    popup::{ContactPopup, NavDrawer},
    theme::Theme,
};

/// Frame interval for ticks (smooth scroll animation).
const TICK_RATE: Duration = Duration::from_millis(33);

/// How long the input reader blocks before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Terminal size assumed when there is no terminal to ask (`--dump` in a pipe).
const FALLBACK_TERMINAL: (u16, u16) = (120, 40);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Landing page behaviors in the terminal")]
struct Cli {
    /// Initial viewport width in pixels (defaults to the terminal width).
    #[arg(long)]
    width: Option<f64>,

    /// Number of manager cards on the page.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(0..=64))]
    cards: u16,

    /// Initialize the page, print its state and exit.
    #[arg(long)]
    dump: bool,

    /// Write the default config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    if cli.write_config {
        let path = config::AppConfig::default().save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── build the page ────────────────────────────────────────
    let user_config = config::AppConfig::load();
    let (columns, rows) = crossterm::terminal::size().unwrap_or(FALLBACK_TERMINAL);
    let mut viewport = Viewport::new(
        f64::from(columns) * user_config.px_per_column,
        f64::from(rows.saturating_sub(1)) * user_config.px_per_row,
    );
    if let Some(width) = cli.width.filter(|w| w.is_finite() && *w > 0.0) {
        viewport.width = width;
    }
    let options = LandingOptions {
        cards: usize::from(cli.cards),
        scrollbar_size: user_config.px_per_column,
        ..LandingOptions::default()
    };
    let doc = landing::build(viewport, &options);
    let mut state = PageState::new(doc, user_config);
    page::init_app(&mut state)?;

    if cli.dump {
        print!("{}", page::describe(&state));
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let (tx, mut events) = tokio::sync::mpsc::unbounded_channel::<AppEvent>();
    let mut gates = Gates::new(tx.clone(), &state.config);
    spawn_event_reader(INPUT_POLL, tx);
    let mut frames = frame_clock(TICK_RATE);
    info!(
        width = state.doc.viewport.width,
        height = state.doc.viewport.height,
        "event loop started"
    );

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            state.hit_regions.clear();

            let page_widget = PageWidget::new(
                &state.doc,
                state.config.px_per_column,
                state.config.px_per_row,
            );
            frame.render_stateful_widget(page_widget, layout.page_area, &mut state.hit_regions);

            if let Some(nav) = state.drawer.element().filter(|_| state.drawer.is_open()) {
                let drawer = NavDrawer {
                    doc: &state.doc,
                    nav,
                };
                frame.render_stateful_widget(drawer, layout.page_area, &mut state.hit_regions);
            }
            if let Some(popup) = state.popup.element().filter(|_| state.popup.is_open()) {
                let contact = ContactPopup {
                    doc: &state.doc,
                    popup,
                };
                frame.render_stateful_widget(contact, layout.page_area, &mut state.hit_regions);
            }

            let hint = state.config.status_bar_hint();
            let (status_text, style) = match state.status_message.as_deref() {
                Some(msg) => (msg, Theme::status_message_style()),
                None => (hint.as_str(), Theme::status_bar_style()),
            };
            frame.render_widget(Paragraph::new(status_text).style(style), layout.status_area);
        })?;

        let Some(event) = next_event(&mut events, &mut frames).await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Resize(w, h) => handler::handle_terminal_resize(&mut state, w, h),
            AppEvent::Tick => page::tick(&mut state),
            AppEvent::Settled(gate) => page::handle_settled(&mut state, gate),
        }
        gates.schedule_all(state.pending_gates.drain(..));

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
