use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::mpsc;

use super::controller::{BookingWidget, SlotRequest};
use super::render::Renderer;
use crate::models::TimeSlot;
use crate::services::slots::{FetchError, SlotFetcher};
use crate::time::TimeOfDay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    DateChanged(NaiveDate),
    StartChanged(Option<TimeOfDay>),
    EndChanged(Option<TimeOfDay>),
}

type FetchDone = (SlotRequest, Result<Vec<TimeSlot>, FetchError>);

/// Runs the widget on an event loop until the event source closes.
///
/// Every date change spawns one fetch; in-flight fetches are never
/// cancelled, and their results re-enter the loop where the widget drops
/// the stale ones. Outstanding fetches are drained before the widget is
/// handed back.
pub async fn run<R: Renderer>(
    mut widget: BookingWidget<R>,
    fetcher: Arc<dyn SlotFetcher>,
    mut events: mpsc::Receiver<WidgetEvent>,
) -> BookingWidget<R> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FetchDone>();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(WidgetEvent::DateChanged(date)) => {
                    let req = widget.select_date(date);
                    let fetcher = Arc::clone(&fetcher);
                    let tx = done_tx.clone();
                    tokio::spawn(async move {
                        let result = fetcher.fetch_slots(req.tutor_id, req.date).await;
                        let _ = tx.send((req, result));
                    });
                }
                Some(WidgetEvent::StartChanged(start)) => {
                    if let Err(e) = widget.select_start(start) {
                        tracing::warn!(error = %e, "ignoring start selection");
                    }
                }
                Some(WidgetEvent::EndChanged(end)) => {
                    if let Err(e) = widget.select_end(end) {
                        tracing::warn!(error = %e, "ignoring end selection");
                    }
                }
                None => break,
            },
            Some((req, result)) = done_rx.recv() => {
                widget.apply_slots(&req, result);
            }
        }
    }

    drop(done_tx);
    while let Some((req, result)) = done_rx.recv().await {
        widget.apply_slots(&req, result);
    }

    tracing::debug!("widget event source closed");
    widget
}
