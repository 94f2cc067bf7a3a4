//! A terminal portfolio: one scrolling page with project cards that fade in
//! as they come into view, a light/dark theme and working contact forms.
//!
//! Run the binary to open the page.  Set `FOLIO_WEB3FORMS_KEY` (or pass
//! `--access-key`) to enable sending the forms.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Stderr};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, widgets::Widget, Frame, Terminal};
use tokio::sync::mpsc;

use crate::app::{
    event::{self, spawn_event_reader, AppEvent},
    handler,
    runtime::spawn_submission,
    state::{ActiveView, AppState},
};
use crate::core::{
    content::Portfolio,
    nav::Section,
    relay::{FormRelay, RelayConfig, Web3FormsRelay},
    storage::{default_storage_path, FileStore, KeyValueStore},
    theme::{ThemeController, ThemeMode},
};
use crate::ui::{
    layout::AppLayout,
    navbar::Navbar,
    page::{blit, PageCanvas, PageView},
    popup,
    status::{status_hint, StatusBar},
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Terminal portfolio page")]
struct Cli {
    /// Use this theme for the session without saving it (`light` or `dark`).
    #[arg(long)]
    theme: Option<ThemeMode>,

    /// web3forms access key used when sending the forms.
    #[arg(long, env = "FOLIO_WEB3FORMS_KEY", hide_env_values = true)]
    access_key: Option<String>,

    /// Override the form relay endpoint.
    #[arg(long)]
    relay_endpoint: Option<String>,

    /// Open scrolled to a section (`about`, `projects`, `skills`, `resume`,
    /// `project-request`, `contact`).
    #[arg(long, value_parser = parse_section)]
    section: Option<Section>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the settings and storage file locations and exit.
    #[arg(long)]
    print_config_path: bool,

    /// Write the default settings file (overwriting it) and exit.
    #[arg(long)]
    write_default_config: bool,
}

fn parse_section(s: &str) -> Result<Section, String> {
    Section::from_anchor(s).ok_or_else(|| format!("unknown section '{s}'"))
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

/// Build the relay client.  A missing key or a bad endpoint leaves the
/// forms offline rather than stopping the app.
fn build_relay(endpoint: &str, access_key: Option<&str>) -> Option<Arc<dyn FormRelay>> {
    let config = match RelayConfig::new(endpoint, access_key) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("contact forms offline: {e}");
            return None;
        }
    };
    match Web3FormsRelay::new(config) {
        Ok(relay) => Some(Arc::new(relay)),
        Err(e) => {
            tracing::warn!("contact forms offline: {e}");
            None
        }
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let theme = state.theme_palette();
    let layout = AppLayout::from_area(frame.area());
    let active = state.active_section();

    // ── page ───────────────────────────────────────────────────
    let editing = match state.active_view {
        ActiveView::Editing(kind) => Some(kind),
        _ => None,
    };
    let view = PageView {
        portfolio: &state.portfolio,
        theme: &theme,
        tracker: &state.tracker,
        fade: &state.fade,
        focused_card: state.focused_card,
        desk: &state.desk,
        editing,
        errors: state.field_errors.as_ref().map(|(k, e)| (*k, e.as_slice())),
        active_section: active,
        tick: state.tick,
    };
    let page_layout = &state.page_layout;
    let canvas_area = Rect::new(0, 0, page_layout.width, page_layout.height);
    let mut canvas = Buffer::empty(canvas_area);
    PageCanvas {
        view: &view,
        layout: page_layout,
    }
    .render(canvas_area, &mut canvas);
    blit(&canvas, state.scroll.offset(), layout.page_area, frame.buffer_mut());

    // ── chrome ─────────────────────────────────────────────────
    frame.render_widget(
        Navbar {
            brand: state.portfolio.profile.name,
            theme: &theme,
            active,
            menu_open: state.menu.is_open(),
        },
        layout.navbar_area,
    );
    let hint = status_hint(&state.config);
    frame.render_widget(
        StatusBar {
            message: state.status_message.as_deref(),
            hint: &hint,
            section: active,
            sending: state.desk.is_pending(),
            tick: state.tick,
            theme: &theme,
        },
        layout.status_area,
    );

    // ── overlays, bottom to top ────────────────────────────────
    if state.menu.is_open() {
        frame.render_widget(
            popup::MenuDropdown {
                highlighted: state.menu.highlighted(),
                active,
                theme: &theme,
            },
            layout.page_area,
        );
    }
    if let Some(index) = state.overlay.active() {
        if let Some(project) = state.portfolio.project(index) {
            frame.render_widget(
                popup::ProjectPopup {
                    project,
                    position: (index, state.portfolio.projects.len()),
                    theme: &theme,
                },
                layout.page_area,
            );
        }
    }
    if state.active_view == ActiveView::Help {
        frame.render_widget(
            popup::HelpPopup {
                config: &state.config,
                theme: &theme,
            },
            layout.page_area,
        );
    }
    if state.desk.has_outcome() {
        if let Some(result) = state.desk.result() {
            frame.render_widget(
                popup::ResultPopup {
                    result,
                    theme: &theme,
                    tick: state.tick,
                },
                layout.page_area,
            );
        }
    }
}

// ───────────────────────────────────────── event loop ────────

fn dispatch(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Resize(w, h) => state.resize(w, h),
        AppEvent::Tick => state.on_tick(),
        AppEvent::Submission { ticket, outcome } => handler::handle_submission(state, ticket, outcome),
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    tx: &mpsc::UnboundedSender<AppEvent>,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, state))?;

        // Hand queued submissions to the relay after the "Sending..." frame
        // is on screen.
        if let Some(pending) = state.outbox.take() {
            if let Some(relay) = &state.relay {
                spawn_submission(tx.clone(), Arc::clone(relay), pending);
            }
        }

        let Some(event) = events.recv().await else {
            break;
        };
        dispatch(state, event);
        // Drain everything already queued before redrawing.
        while let Ok(event) = events.try_recv() {
            dispatch(state, event);
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    if cli.print_config_path {
        println!("{}", config::settings_path().display());
        println!("{}", default_storage_path().display());
        return Ok(());
    }
    if cli.write_default_config {
        let path = config::settings_path();
        config::AppConfig::default().save_to_path(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mut user_config = config::AppConfig::load();
    if let Some(endpoint) = cli.relay_endpoint {
        user_config.relay_endpoint = endpoint;
    }

    let portfolio = Portfolio::builtin()?;
    let store: Box<dyn KeyValueStore> = Box::new(FileStore::open(default_storage_path()));
    let mut theme = ThemeController::restore(store);
    if let Some(mode) = cli.theme {
        theme.set_session_override(mode);
    }
    let relay = build_relay(&user_config.relay_endpoint, cli.access_key.as_deref());
    let tick_rate = Duration::from_millis(user_config.tick_ms);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    let mut state = AppState::new(
        portfolio,
        user_config,
        theme,
        relay,
        Rect::new(0, 0, size.width, size.height),
    );
    if let Some(section) = cli.section {
        let top = state.page_layout.section_top(section).min(state.max_scroll());
        state.scroll.jump_to(top);
        state.observe_viewport();
    }

    // ── event loop ────────────────────────────────────────────
    let (tx, mut events) = event::channel();
    spawn_event_reader(tx.clone(), tick_rate);
    let result = run(&mut terminal, &mut state, &tx, &mut events).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
