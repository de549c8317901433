use crate::services::slots::FetchError;
use crate::time::TimeOfDay;

pub const NO_AVAILABILITY_LABEL: &str = "No available times for this date";

/// One entry of a time dropdown. `value: None` marks an informational,
/// non-selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Option<TimeOfDay>,
    pub label: String,
}

impl SelectOption {
    pub fn time(t: TimeOfDay) -> Self {
        Self {
            value: Some(t),
            label: t.to_12h_label(),
        }
    }

    pub fn info(label: impl Into<String>) -> Self {
        Self {
            value: None,
            label: label.into(),
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FetchFailed(FetchError),
}

/// Display surface the widget draws onto.
pub trait Renderer {
    fn set_start_options(&mut self, options: &[SelectOption]);
    fn set_end_options(&mut self, options: &[SelectOption]);
    fn set_price(&mut self, price: &str);
    fn notify(&mut self, notice: &Notice);
}
