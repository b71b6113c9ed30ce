pub mod appointment;
pub mod duration_minutes;
pub mod kept_slot;

pub use appointment::{Appointment, AvailableSlot, NewAppointment};
pub use kept_slot::KeptSlot;
