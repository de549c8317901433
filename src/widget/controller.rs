use chrono::NaiveDate;

use super::render::{Notice, Renderer, SelectOption, NO_AVAILABILITY_LABEL};
use crate::models::{BookSessionRequest, TimeSlot, Tutor};
use crate::services::pricing;
use crate::services::slots::{FetchError, SlotFetcher};
use crate::time::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    DateSelected,
    SlotsLoaded,
    StartChosen,
    EndChosen,
}

/// Which slots contribute end times once a start is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndFilter {
    /// Slots starting exactly at the chosen start.
    #[default]
    MatchingStart,
    /// Slots starting at or before the chosen start.
    CoveringStart,
}

impl EndFilter {
    fn admits(self, slot_start: TimeOfDay, chosen: TimeOfDay) -> bool {
        match self {
            EndFilter::MatchingStart => slot_start == chosen,
            EndFilter::CoveringStart => slot_start <= chosen,
        }
    }
}

/// Read-only settings injected by the hosting page.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub tutor_id: i64,
    pub hourly_rate: f64,
    pub end_filter: EndFilter,
}

impl WidgetConfig {
    pub fn new(tutor_id: i64, hourly_rate: f64) -> Self {
        Self {
            tutor_id,
            hourly_rate: hourly_rate.max(0.0),
            end_filter: EndFilter::default(),
        }
    }

    pub fn with_end_filter(mut self, end_filter: EndFilter) -> Self {
        self.end_filter = end_filter;
        self
    }
}

impl From<&Tutor> for WidgetConfig {
    fn from(tutor: &Tutor) -> Self {
        Self::new(tutor.id, tutor.hourly_rate)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub selected_date: Option<NaiveDate>,
    pub selected_start: Option<TimeOfDay>,
    pub selected_end: Option<TimeOfDay>,
    pub available_slots: Vec<TimeSlot>,
}

/// Ticket for one availability fetch. Only the ticket matching the
/// current selection may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest {
    pub generation: u64,
    pub tutor_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no date selected")]
    NoDateSelected,

    #[error("an end time needs a start time first")]
    StartNotChosen,

    #[error("{0} is not an available start time")]
    UnknownStart(TimeOfDay),

    #[error("end time {end} is not after start time {start}")]
    EndNotAfterStart { start: TimeOfDay, end: TimeOfDay },

    #[error("{0} is not an available end time")]
    UnknownEnd(TimeOfDay),
}

pub struct BookingWidget<R: Renderer> {
    config: WidgetConfig,
    state: WidgetState,
    phase: Phase,
    generation: u64,
    start_options: Vec<TimeOfDay>,
    end_options: Vec<TimeOfDay>,
    renderer: R,
}

impl<R: Renderer> BookingWidget<R> {
    pub fn new(config: WidgetConfig, mut renderer: R) -> Self {
        renderer.set_start_options(&[]);
        renderer.set_end_options(&[]);
        renderer.set_price(pricing::ZERO_PRICE);

        Self {
            config,
            state: WidgetState::default(),
            phase: Phase::Idle,
            generation: 0,
            start_options: vec![],
            end_options: vec![],
            renderer,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn start_options(&self) -> &[TimeOfDay] {
        &self.start_options
    }

    pub fn end_options(&self) -> &[TimeOfDay] {
        &self.end_options
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn price(&self) -> String {
        pricing::display_price(
            self.config.hourly_rate,
            self.state.selected_start,
            self.state.selected_end,
        )
    }

    /// The booking to submit once date, start and end are all chosen.
    pub fn booking_request(&self, student_id: i64) -> Option<BookSessionRequest> {
        let date = self.state.selected_date?;
        let slot = TimeSlot::new(self.state.selected_start?, self.state.selected_end?)?;
        Some(BookSessionRequest::new(student_id, date, slot))
    }

    /// Starts a new date selection and returns the fetch to issue for it.
    ///
    /// Start/end selections and the price reset immediately; the previously
    /// loaded slots stay until a fetch for this date succeeds.
    pub fn select_date(&mut self, date: NaiveDate) -> SlotRequest {
        self.generation += 1;
        self.state.selected_date = Some(date);
        self.state.selected_start = None;
        self.state.selected_end = None;
        self.start_options.clear();
        self.end_options.clear();
        self.phase = Phase::DateSelected;

        self.renderer.set_start_options(&[]);
        self.renderer.set_end_options(&[]);
        self.render_price();

        SlotRequest {
            generation: self.generation,
            tutor_id: self.config.tutor_id,
            date,
        }
    }

    pub fn is_current(&self, req: &SlotRequest) -> bool {
        req.generation == self.generation && self.state.selected_date == Some(req.date)
    }

    /// Applies a fetch result. Returns `false` when the result is stale and
    /// was dropped.
    pub fn apply_slots(
        &mut self,
        req: &SlotRequest,
        result: Result<Vec<TimeSlot>, FetchError>,
    ) -> bool {
        if !self.is_current(req) {
            tracing::debug!(
                date = %req.date,
                generation = req.generation,
                current = self.generation,
                "dropping stale availability response"
            );
            return false;
        }

        match result {
            Ok(slots) => {
                let mut starts: Vec<TimeOfDay> = slots.iter().map(|s| s.start()).collect();
                starts.sort();
                starts.dedup();

                self.state.available_slots = slots;
                self.start_options = starts;
                self.phase = Phase::SlotsLoaded;

                if self.start_options.is_empty() {
                    self.renderer
                        .set_start_options(&[SelectOption::info(NO_AVAILABILITY_LABEL)]);
                } else {
                    let options = to_options(&self.start_options);
                    self.renderer.set_start_options(&options);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, date = %req.date, "failed to load available times");
                self.renderer.notify(&Notice::FetchFailed(e));
            }
        }
        true
    }

    /// Selects a date and waits for its slots: one fetch per call.
    pub async fn load_date(&mut self, fetcher: &dyn SlotFetcher, date: NaiveDate) -> bool {
        let req = self.select_date(date);
        let result = fetcher.fetch_slots(req.tutor_id, req.date).await;
        self.apply_slots(&req, result)
    }

    pub fn select_start(&mut self, start: Option<TimeOfDay>) -> Result<(), SelectionError> {
        let Some(start) = start else {
            self.clear_start();
            return Ok(());
        };

        if self.state.selected_date.is_none() {
            return Err(SelectionError::NoDateSelected);
        }
        if !self.start_options.contains(&start) {
            return Err(SelectionError::UnknownStart(start));
        }

        self.state.selected_start = Some(start);
        self.state.selected_end = None;
        self.end_options = self.end_candidates(start);
        self.phase = Phase::StartChosen;

        let options = to_options(&self.end_options);
        self.renderer.set_end_options(&options);
        self.render_price();
        Ok(())
    }

    pub fn select_end(&mut self, end: Option<TimeOfDay>) -> Result<(), SelectionError> {
        let Some(start) = self.state.selected_start else {
            return match end {
                Some(_) => Err(SelectionError::StartNotChosen),
                None => Ok(()),
            };
        };

        match end {
            None => {
                self.state.selected_end = None;
                self.phase = Phase::StartChosen;
            }
            Some(end) => {
                if end <= start {
                    return Err(SelectionError::EndNotAfterStart { start, end });
                }
                if !self.end_options.contains(&end) {
                    return Err(SelectionError::UnknownEnd(end));
                }
                self.state.selected_end = Some(end);
                self.phase = Phase::EndChosen;
            }
        }

        self.render_price();
        Ok(())
    }

    fn clear_start(&mut self) {
        self.state.selected_start = None;
        self.state.selected_end = None;
        self.end_options.clear();
        if matches!(self.phase, Phase::StartChosen | Phase::EndChosen) {
            self.phase = Phase::SlotsLoaded;
        }

        self.renderer.set_end_options(&[]);
        self.render_price();
    }

    fn end_candidates(&self, start: TimeOfDay) -> Vec<TimeOfDay> {
        let mut ends: Vec<TimeOfDay> = self
            .state
            .available_slots
            .iter()
            .filter(|s| self.config.end_filter.admits(s.start(), start) && s.end() > start)
            .map(|s| s.end())
            .collect();
        ends.sort();
        ends.dedup();
        ends
    }

    fn render_price(&mut self) {
        let price = self.price();
        self.renderer.set_price(&price);
    }
}

fn to_options(times: &[TimeOfDay]) -> Vec<SelectOption> {
    times.iter().copied().map(SelectOption::time).collect()
}
