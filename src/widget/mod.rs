//! Availability & pricing widget: date, start-time and end-time selectors
//! plus the derived session price, independent of any UI toolkit.

pub mod controller;
pub mod driver;
pub mod render;

pub use controller::{
    BookingWidget, EndFilter, Phase, SelectionError, SlotRequest, WidgetConfig, WidgetState,
};
pub use driver::{run, WidgetEvent};
pub use render::{Notice, Renderer, SelectOption, NO_AVAILABILITY_LABEL};
