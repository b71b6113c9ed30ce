pub mod appointment;
pub mod kept_slot;
