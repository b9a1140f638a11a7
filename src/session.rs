use std::{future::Future, pin::Pin, sync::Arc};

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    error::OrderError,
    order::OrderTransport,
    screen::{Command, Intent, MenuScreen, MenuView},
    search::Debouncer,
};

type PendingOrder = Pin<Box<dyn Future<Output = Result<(), OrderError>> + Send>>;


// Notifications sent from the session loop to whoever draws the screen
#[derive(Debug)]
pub enum SessionEvent {
    Updated(MenuView),
    OrderSent,
    OrderFailed(OrderError),
}


// Drive one screen until the intent channel closes. Single cooperative
// loop: intents, the search debounce timer and at most one order request.
pub async fn run_session<T: OrderTransport>(
    mut screen: MenuScreen,
    mut intents: mpsc::UnboundedReceiver<Intent>,
    transport: Arc<T>,
    events: mpsc::UnboundedSender<SessionEvent>,
) -> MenuScreen {
    let mut debouncer = Debouncer::default();
    let mut pending: Option<PendingOrder> = None;

    let _ = events.send(SessionEvent::Updated(screen.view()));

    loop {
        tokio::select! {
            intent = intents.recv() => {
                let Some(intent) = intent else { break };
                match screen.apply(intent) {
                    Command::None => {}
                    Command::ArmSearch => debouncer.arm(),
                    Command::CancelSearch => debouncer.cancel(),
                    Command::Submit(payload) => {
                        info!(lines = payload.orders.len(), total = screen.total_price(), "submitting order");
                        let transport = Arc::clone(&transport);
                        pending = Some(Box::pin(async move { transport.submit(&payload).await }));
                    }
                    Command::Refused(err) => {
                        debug!(error = %err, "order refused");
                        let _ = events.send(SessionEvent::OrderFailed(err));
                    }
                }
                let _ = events.send(SessionEvent::Updated(screen.view()));
            }

            // Debounce fires: evaluate the last query once
            _ = debouncer.fired() => {
                if screen.search_elapsed() {
                    let _ = events.send(SessionEvent::Updated(screen.view()));
                }
            }

            outcome = async {
                match pending.as_mut() {
                    Some(order) => order.await,
                    None => std::future::pending().await,
                }
            }, if pending.is_some() => {
                pending = None;
                settle(&mut screen, outcome, &events);
            }
        }
    }

    // Teardown: no stale search updates, but let a sent order finish
    debouncer.cancel();
    if let Some(order) = pending.take() {
        let outcome = order.await;
        settle(&mut screen, outcome, &events);
    }
    screen
}

fn settle(screen: &mut MenuScreen, outcome: Result<(), OrderError>, events: &mpsc::UnboundedSender<SessionEvent>) {
    screen.order_settled(&outcome);
    let event = match outcome {
        Ok(()) => SessionEvent::OrderSent,
        Err(err) => {
            error!(error = %err, "order submission failed");
            SessionEvent::OrderFailed(err)
        }
    };
    let _ = events.send(event);
    let _ = events.send(SessionEvent::Updated(screen.view()));
}
