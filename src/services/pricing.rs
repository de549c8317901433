use crate::time::TimeOfDay;

pub const CURRENCY_SYMBOL: &str = "€";

/// Shown whenever either end of the session is unset.
pub const ZERO_PRICE: &str = "€0.00";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInput {
    pub hourly_rate: f64,
    pub duration_hours: f64,
}

impl PricingInput {
    pub fn new(hourly_rate: f64, start: TimeOfDay, end: TimeOfDay) -> Self {
        let minutes = f64::from(end.minutes()) - f64::from(start.minutes());
        Self {
            hourly_rate,
            duration_hours: minutes / 60.0,
        }
    }

    pub fn price(&self) -> f64 {
        self.hourly_rate * self.duration_hours
    }
}

/// Rounds to cents with ties away from zero, so `3.125` becomes `3.13`.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `€` followed by exactly two decimals.
pub fn format_price(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{:.2}", round_to_cents(amount))
}

/// Display price for an optional start/end pair.
pub fn display_price(hourly_rate: f64, start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format_price(PricingInput::new(hourly_rate, start, end).price()),
        _ => ZERO_PRICE.to_string(),
    }
}

/// Session price as charged against a booking.
pub fn session_price(hourly_rate: f64, start: TimeOfDay, end: TimeOfDay) -> f64 {
    round_to_cents(PricingInput::new(hourly_rate, start, end).price())
}
