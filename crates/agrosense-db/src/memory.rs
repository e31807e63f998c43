//! In-memory stores with the same contracts as the PostgreSQL ones.
//!
//! Each store keeps its state behind one mutex that is never held across an
//! await, so every operation is atomic exactly like its single-statement SQL
//! counterpart. [`set_unavailable`](MemoryUserStore::set_unavailable) makes
//! every call fail with [`StoreError::Unavailable`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use agrosense_models::{NewSensorReading, Parcel, SensorReading, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::parcels::{DeleteOutcome, NewParcel, ParcelStore};
use crate::readings::{InsertOutcome, ReadingStore};
use crate::users::{NewUser, UserCredentials, UserStore};

#[derive(Debug, Default)]
struct Availability(AtomicBool);

impl Availability {
    fn set_unavailable(&self, down: bool) {
        self.0.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.0.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<UserCredentials>>,
    availability: Availability,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.availability.set_unavailable(down);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        self.availability.check()?;
        let mut users = lock(&self.users);

        if users.iter().any(|u| u.user.username == user.username) {
            return Err(StoreError::Conflict(format!("username {}", user.username)));
        }

        let stored = User {
            id: Uuid::new_v4(),
            username: user.username,
            role: user.role,
            created_at: Utc::now(),
        };
        users.push(UserCredentials {
            user: stored.clone(),
            password_hash: user.password_hash,
        });

        Ok(stored)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        self.availability.check()?;
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.user.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.availability.check()?;
        let mut users: Vec<User> = lock(&self.users).iter().map(|u| u.user.clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.availability.check()
    }
}

#[derive(Debug, Default)]
struct ReadingTable {
    // Insertion order.
    rows: Vec<SensorReading>,
    by_timestamp: HashMap<DateTime<Utc>, Uuid>,
}

#[derive(Debug, Default)]
pub struct MemoryReadingStore {
    table: Mutex<ReadingTable>,
    availability: Availability,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.availability.set_unavailable(down);
    }

    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadingStore for MemoryReadingStore {
    async fn append(&self, reading: &NewSensorReading) -> Result<Uuid, StoreError> {
        self.availability.check()?;
        let id = Uuid::new_v4();
        lock(&self.table).rows.push(reading.clone().into_stored(id));
        Ok(id)
    }

    async fn insert_if_absent(
        &self,
        reading: &NewSensorReading,
    ) -> Result<InsertOutcome, StoreError> {
        self.availability.check()?;
        let mut table = lock(&self.table);

        if let Some(existing) = table.by_timestamp.get(&reading.timestamp) {
            return Ok(InsertOutcome::Existing(*existing));
        }

        let id = Uuid::new_v4();
        table.by_timestamp.insert(reading.timestamp, id);
        table.rows.push(reading.clone().into_stored(id));
        Ok(InsertOutcome::Inserted(id))
    }

    async fn list_desc(&self) -> Result<Vec<SensorReading>, StoreError> {
        self.availability.check()?;
        let mut rows: Vec<SensorReading> = lock(&self.table).rows.iter().rev().cloned().collect();
        // Stable sort over reversed insertion order: newest insert wins ties.
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.availability.check()
    }
}

#[derive(Debug, Default)]
pub struct MemoryParcelStore {
    // Insertion order doubles as creation order.
    parcels: Mutex<Vec<Parcel>>,
    availability: Availability,
}

impl MemoryParcelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.availability.set_unavailable(down);
    }
}

#[async_trait]
impl ParcelStore for MemoryParcelStore {
    async fn insert(&self, parcel: NewParcel) -> Result<Parcel, StoreError> {
        self.availability.check()?;
        let mut parcels = lock(&self.parcels);

        if parcels.iter().any(|p| p.id == parcel.id) {
            return Err(StoreError::Conflict(format!("parcel {}", parcel.id)));
        }

        let stored = Parcel {
            id: parcel.id,
            name: parcel.name,
            location: parcel.location,
            deleted: false,
            created_at: Utc::now(),
        };
        parcels.push(stored.clone());
        Ok(stored)
    }

    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DeleteOutcome>, StoreError> {
        self.availability.check()?;
        let mut parcels = lock(&self.parcels);

        Ok(parcels.iter_mut().find(|p| p.id == id).map(|p| {
            if p.deleted {
                DeleteOutcome::AlreadyDeleted(p.clone())
            } else {
                p.deleted = true;
                DeleteOutcome::Deleted(p.clone())
            }
        }))
    }

    async fn list(&self, deleted: bool) -> Result<Vec<Parcel>, StoreError> {
        self.availability.check()?;
        let mut parcels: Vec<Parcel> = lock(&self.parcels)
            .iter()
            .filter(|p| p.deleted == deleted)
            .cloned()
            .collect();
        parcels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(parcels)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.availability.check()
    }
}
