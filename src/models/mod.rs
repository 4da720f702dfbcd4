//! Wire-format entities consumed from the MediConnect API.
//!
//! Authoritative definitions live server-side; these structs mirror the JSON
//! the API actually ships (camelCase fields, SCREAMING-CASE enum strings).
//! Nothing here is cached across views; each view fetches its own copy.

pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod stats;

pub use appointment::{AdminAppointment, Appointment};
pub use doctor::Doctor;
pub use enums::{AppointmentStatus, InvalidEnum, Role};
pub use stats::AdminStats;
