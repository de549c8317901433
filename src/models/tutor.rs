use serde::{Deserialize, Serialize};

pub const DEFAULT_HOURLY_RATE: f64 = 25.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutor {
    pub id: i64,
    pub name: String,
    pub hourly_rate: f64,
}
