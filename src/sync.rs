use log::{debug, error, info};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::clients::{ApartmentApi, ApiError};
use crate::form::{FieldError, FormField, FormMode, FormSession};
use crate::models::{ApartmentId, ApartmentRecord};
use crate::store::{DuplicateId, RecordStore};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Invalid(#[from] FieldError),

    #[error("apartment {0} is not in the current list")]
    UnknownRecord(ApartmentId),

    #[error("operation failed: {0}")]
    OperationFailed(#[from] ApiError),

    #[error("operation failed: {0}")]
    InconsistentSnapshot(#[from] DuplicateId),
}

impl SyncError {
    /// True for failures coming back from the backend round trip.
    pub fn is_operation_failed(&self) -> bool {
        matches!(
            self,
            SyncError::OperationFailed(_) | SyncError::InconsistentSnapshot(_)
        )
    }
}

/// Keeps the local apartment list in step with the backend.
///
/// Every mutation is a single request followed by a full reload of the list. The
/// store is never patched locally, the backend decides what a record looks like
/// after a change (toggled status, normalised fields, rejected input).
///
/// Methods take `&self`, so an `Arc<SyncController<_>>` can have several calls in
/// flight. They are not queued against each other; the refresh that finishes last
/// decides what the store holds.
pub struct SyncController<A> {
    api: A,
    store: RecordStore,
    session: Mutex<FormSession>,
}

impl<A: ApartmentApi> SyncController<A> {
    pub fn new(api: A) -> SyncController<A> {
        SyncController {
            api,
            store: RecordStore::new(),
            session: Mutex::new(FormSession::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub async fn form(&self) -> FormSession {
        self.session.lock().await.clone()
    }

    pub async fn set_field(&self, field: FormField, value: &str) -> Result<(), SyncError> {
        self.session.lock().await.set_field(field, value)?;
        Ok(())
    }

    /// Loads the record with `id` from the current list into the form.
    pub async fn begin_edit(&self, id: &ApartmentId) -> Result<(), SyncError> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| SyncError::UnknownRecord(id.clone()))?;
        self.session.lock().await.begin_edit(&record);
        debug!("Editing apartment {id}");
        Ok(())
    }

    pub async fn reset_form(&self) {
        self.session.lock().await.reset();
    }

    /// First load after startup.
    pub async fn mount(&self) -> Result<(), SyncError> {
        self.refresh().await
    }

    /// Replaces the store with the backend's current list. On failure the previous
    /// list stays.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        let result = match self.api.list().await {
            Ok(records) => self.store.replace(records).map_err(SyncError::from),
            Err(e) => Err(e.into()),
        };

        match &result {
            Ok(()) => debug!("Fetched {} apartments", self.store.len()),
            Err(e) => error!("Error fetching apartments: {e}"),
        }
        result
    }

    /// Sends the form as a create or an update depending on its mode.
    ///
    /// On success the form goes back to an empty create form and the list is
    /// reloaded. On failure neither the form nor the list change.
    pub async fn submit(&self) -> Result<Option<ApartmentRecord>, SyncError> {
        let session = self.form().await;

        let payload = session.to_payload().map_err(|e| {
            error!("Error submitting form: {e}");
            SyncError::from(e)
        })?;

        let result = match session.mode() {
            FormMode::Edit(id) => self.api.update(&id, &payload).await,
            FormMode::Create => self.api.create(&payload).await,
        };

        let echoed = match result {
            Ok(echoed) => echoed,
            Err(e) => {
                error!("Error submitting form: {e}");
                return Err(e.into());
            }
        };

        match session.mode() {
            FormMode::Edit(id) => info!("Updated apartment {id}"),
            FormMode::Create => info!("Created apartment {}", payload.name),
        }

        self.session.lock().await.reset();
        self.refresh_after_mutation().await;
        Ok(echoed)
    }

    pub async fn remove(&self, id: &ApartmentId) -> Result<(), SyncError> {
        if let Err(e) = self.api.delete(id).await {
            error!("Error deleting apartment {id}: {e}");
            return Err(e.into());
        }

        info!("Deleted apartment {id}");
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Asks the backend to flip the status of `id`. The new value is never computed
    /// here.
    pub async fn toggle_status(&self, id: &ApartmentId) -> Result<(), SyncError> {
        if let Err(e) = self.api.toggle_status(id).await {
            error!("Error toggling status of apartment {id}: {e}");
            return Err(e.into());
        }

        info!("Toggled status of apartment {id}");
        self.refresh_after_mutation().await;
        Ok(())
    }

    // The mutation already went through, a failed reload only leaves the list stale.
    async fn refresh_after_mutation(&self) {
        let _ = self.refresh().await;
    }
}
