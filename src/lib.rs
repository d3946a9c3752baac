pub mod clients;
pub mod config;
pub mod display;
pub mod form;
pub mod logger;
pub mod models;
pub mod shell;
pub mod store;
pub mod sync;

pub use clients::{ApartmentApi, ApiError, HttpApartmentApi};
pub use form::{FormField, FormMode, FormSession};
pub use store::RecordStore;
pub use sync::{SyncController, SyncError};
