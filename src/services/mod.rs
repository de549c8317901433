pub mod availability;
pub mod bookings;
pub mod pricing;
pub mod sessions;
pub mod slots;
