//! Terminal page for insanity-meter.
//!
//! Usage:
//!   cargo run --bin insanity-tui -- --server http://127.0.0.1:8787

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{execute, terminal};
use insanity_meter::events::RatedEvent;
use insanity_meter::ui::api::DEFAULT_SERVER_URL;
use insanity_meter::ui::terminal::{RestoreGuard, install_panic_restore, restore_terminal};
use insanity_meter::ui::{CompareClient, FetchError, MeterState, view};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

type Outcome = Result<Vec<RatedEvent>, FetchError>;

#[derive(Parser)]
#[command(name = "insanity-tui")]
#[command(about = "How insane is this? Terminal page for insanity-meter", long_about = None)]
struct Cli {
    /// Base URL of the insanity-meter server
    #[arg(long, env = "INSANITY_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,
    /// Write diagnostics to this file (the terminal is taken by the page)
    #[arg(long, env = "INSANITY_TUI_LOG")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("insanity_meter=info,insanity_tui=info")),
            )
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let client = CompareClient::new(&cli.server)?;
    tracing::info!("insanity-tui talking to {}", client.endpoint());

    install_panic_restore();
    terminal::enable_raw_mode()?;
    let _restore = RestoreGuard::new(restore_terminal);
    execute!(io::stdout(), terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(io::stdout());
    let mut term = Terminal::new(backend)?;

    run(&mut term, &client)
}

fn run<B: Backend>(term: &mut Terminal<B>, client: &CompareClient) -> anyhow::Result<()> {
    let (tx, rx): (Sender<Outcome>, Receiver<Outcome>) = mpsc::channel();
    let mut state = MeterState::new();

    loop {
        while let Ok(outcome) = rx.try_recv() {
            state.finish(outcome, Instant::now());
        }

        let now = Instant::now();
        term.draw(|f| view::draw(f, &state, now))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(k) = event::read()? else {
            continue;
        };
        if k.kind != KeyEventKind::Press {
            continue;
        }
        match k.code {
            KeyCode::Esc => break,
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Enter => {
                if let Some(query) = state.begin_submit() {
                    submit(client.clone(), query, tx.clone());
                }
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(c) => state.query.push(c),
            _ => {}
        }
    }

    Ok(())
}

/// One request per submission, off the draw loop.
fn submit(client: CompareClient, query: String, tx: Sender<Outcome>) {
    std::thread::spawn(move || {
        let outcome = client.fetch(&query);
        let _ = tx.send(outcome);
    });
}
