pub mod appointment_slot;
pub mod identity;
pub mod notification;
