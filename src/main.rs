use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mcdo_menu::{
    DishId, Intent, MenuScreen, OrderError,
    config::{Args, Config},
    order::HttpTransport,
    render::redraw_screen,
    session::{SessionEvent, run_session},
};


// Turn one stdin line into an intent; `None` for blank or unknown input
fn parse_command(line: &str) -> Option<Intent> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };
    match (cmd, arg) {
        ("add", id) if !id.is_empty() => Some(Intent::AddDish(DishId::new(id))),
        ("remove", id) if !id.is_empty() => Some(Intent::RemoveDish(DishId::new(id))),
        ("toggle", name) if !name.is_empty() => Some(Intent::ToggleCategory(name.to_string())),
        ("search", "") => Some(Intent::EnterSearch),
        ("back", "") => Some(Intent::ExitSearch),
        ("type", text) => Some(Intent::SearchInput(text.to_string())),
        ("order", "") => Some(Intent::SubmitOrder),
        _ => None,
    }
}

// Read commands from stdin until EOF or `quit`
async fn input_task(intents: mpsc::UnboundedSender<Intent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim() == "quit" {
            break;
        }
        match parse_command(&line) {
            Some(intent) => {
                if intents.send(intent).is_err() {
                    break;
                }
            }
            None => warn!(%line, "unknown command (add/remove <id>, toggle <category>, search, type <text>, back, order, quit)"),
        }
    }
}

// Only delivery failures are worth another `order`; refusals are not
fn worth_retrying(err: &OrderError) -> bool {
    match err {
        OrderError::Http(_) | OrderError::Rejected(_) => true,
        OrderError::EmptyCart | OrderError::InFlight => false,
    }
}

// Redraw on every update and report order outcomes
async fn render_task(mut events: mpsc::UnboundedReceiver<SessionEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Updated(view) => redraw_screen(&view),
            SessionEvent::OrderSent => info!("order sent"),
            SessionEvent::OrderFailed(err) if worth_retrying(&err) => {
                warn!(error = %err, "order not sent, type `order` to retry")
            }
            SessionEvent::OrderFailed(err) => warn!(error = %err, "order not sent"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::try_from(Args::parse())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = config.load_catalog().context("loading catalog")?;
    info!(categories = catalog.categories.len(), dishes = catalog.dishes.len(), "menu loaded");

    let transport = Arc::new(HttpTransport::new(config.endpoint.clone(), config.timeout)?);

    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let renderer = tokio::spawn(render_task(event_rx));
    tokio::spawn(input_task(intent_tx));

    let screen = run_session(MenuScreen::new(catalog), intent_rx, transport, event_tx).await;
    renderer.await.context("render task")?;

    info!(
        lines = screen.cart().entries().len(),
        total = screen.total_price(),
        "leaving menu, cart discarded"
    );
    Ok(())
}
