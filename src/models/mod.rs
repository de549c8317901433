pub mod availability;
pub mod booking;
pub mod slot;
pub mod tutor;

pub use availability::AvailabilityWindow;
pub use booking::{BookSessionRequest, Booking, BookingCreated, BookingStatus, Payment, PaymentStatus};
pub use slot::{AvailableTimesRequest, AvailableTimesResponse, TimeSlot, TutorRef};
pub use tutor::{Tutor, DEFAULT_HOURLY_RATE};
