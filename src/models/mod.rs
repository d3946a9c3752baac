pub mod apartment;

pub use apartment::{ApartmentFields, ApartmentId, ApartmentRecord, ApartmentStatus};
