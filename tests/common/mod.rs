#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use rentwise::models::{ApartmentFields, ApartmentId, ApartmentRecord, ApartmentStatus};
use rentwise::{ApartmentApi, ApiError};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(ApartmentFields),
    Update(ApartmentId, ApartmentFields),
    Delete(ApartmentId),
    Toggle(ApartmentId),
}

/// Backend stand-in holding the collection in memory. It assigns ids, flips
/// statuses and records every call it receives.
pub struct InMemoryApartmentApi {
    records: RwLock<Vec<ApartmentRecord>>,
    calls: RwLock<Vec<Call>>,
    next_id: AtomicU64,
    unreachable: AtomicBool,
    list_unreachable: AtomicBool,
}

pub fn fields(name: &str, location: &str, rent: f64, status: ApartmentStatus) -> ApartmentFields {
    ApartmentFields {
        name: name.to_string(),
        location: location.to_string(),
        rent,
        status,
    }
}

fn unreachable_error(path: &str) -> ApiError {
    ApiError::Transport {
        url: format!("memory://api/apartments{path}"),
        detail: "connection refused".to_string(),
    }
}

fn not_found(id: &ApartmentId) -> ApiError {
    ApiError::NotFound {
        url: format!("memory://api/apartments/{id}"),
    }
}

impl InMemoryApartmentApi {
    pub fn new() -> InMemoryApartmentApi {
        InMemoryApartmentApi {
            records: RwLock::new(Vec::new()),
            calls: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            unreachable: AtomicBool::new(false),
            list_unreachable: AtomicBool::new(false),
        }
    }

    /// Seeds records with ids 1, 2, 3... in order.
    pub async fn with_records(seed: Vec<ApartmentFields>) -> InMemoryApartmentApi {
        let api = InMemoryApartmentApi::new();
        for fields in seed {
            api.insert(fields).await;
        }
        api
    }

    async fn insert(&self, fields: ApartmentFields) -> ApartmentRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = ApartmentRecord {
            id: ApartmentId::from(id),
            name: fields.name,
            location: fields.location,
            rent: fields.rent,
            status: fields.status,
        };
        self.records.write().await.push(record.clone());
        record
    }

    /// Every call fails as if the network were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Only list calls fail.
    pub fn set_list_unreachable(&self, unreachable: bool) {
        self.list_unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.read().await.clone()
    }

    pub async fn mutation_calls(&self) -> Vec<Call> {
        self.calls()
            .await
            .into_iter()
            .filter(|c| *c != Call::List)
            .collect()
    }

    pub async fn list_calls(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| **c == Call::List)
            .count()
    }

    pub async fn server_records(&self) -> Vec<ApartmentRecord> {
        self.records.read().await.clone()
    }

    async fn record_call(&self, call: Call) -> Result<(), ApiError> {
        let is_list = call == Call::List;
        self.calls.write().await.push(call);

        if self.unreachable.load(Ordering::SeqCst)
            || (is_list && self.list_unreachable.load(Ordering::SeqCst))
        {
            return Err(unreachable_error(""));
        }
        Ok(())
    }
}

#[async_trait]
impl ApartmentApi for InMemoryApartmentApi {
    async fn list(&self) -> Result<Vec<ApartmentRecord>, ApiError> {
        self.record_call(Call::List).await?;
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, fields: &ApartmentFields) -> Result<Option<ApartmentRecord>, ApiError> {
        self.record_call(Call::Create(fields.clone())).await?;
        Ok(Some(self.insert(fields.clone()).await))
    }

    async fn update(
        &self,
        id: &ApartmentId,
        fields: &ApartmentFields,
    ) -> Result<Option<ApartmentRecord>, ApiError> {
        self.record_call(Call::Update(id.clone(), fields.clone()))
            .await?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| not_found(id))?;
        record.name = fields.name.clone();
        record.location = fields.location.clone();
        record.rent = fields.rent;
        record.status = fields.status;
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &ApartmentId) -> Result<(), ApiError> {
        self.record_call(Call::Delete(id.clone())).await?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn toggle_status(&self, id: &ApartmentId) -> Result<(), ApiError> {
        self.record_call(Call::Toggle(id.clone())).await?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| not_found(id))?;
        record.status = record.status.toggled();
        Ok(())
    }
}
