use async_trait::async_trait;
use mongodb::bson::{self, doc};
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{AppointmentStore, sort_chronologically};
use crate::errors::{StoreError, StoreResult};
use crate::models::appointment::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
use crate::models::calendar_date;
use crate::models::coordinate::Coordinate;

const COLLECTION: &str = "appointments";

/// Appointment as stored in MongoDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppointmentDocument {
    #[serde(rename = "_id")]
    id: String,
    owner_id: String,
    name: String,
    address: String,
    lat: f64,
    lng: f64,
    date: String, // YYYY-MM-DD
    time: String,
    duration: u32,
    notes: String,
    status: AppointmentStatus,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl AppointmentDocument {
    fn from_appointment(appointment: &Appointment, created_at: bson::DateTime) -> Self {
        AppointmentDocument {
            id: appointment.id.clone(),
            owner_id: appointment.owner_id.clone(),
            name: appointment.name.clone(),
            address: appointment.address.clone(),
            lat: appointment.location.lat(),
            lng: appointment.location.lng(),
            date: appointment.date.format("%Y-%m-%d").to_string(),
            time: appointment.time.clone(),
            duration: appointment.duration,
            notes: appointment.notes.clone(),
            status: appointment.status,
            created_at,
            updated_at: bson::DateTime::now(),
        }
    }
}

impl TryFrom<AppointmentDocument> for Appointment {
    type Error = StoreError;

    fn try_from(d: AppointmentDocument) -> Result<Self, Self::Error> {
        let location = Coordinate::new(d.lat, d.lng)
            .map_err(|e| StoreError::Backend(format!("document {}: {e}", d.id)))?;
        let date = calendar_date::parse(&d.date)
            .ok_or_else(|| StoreError::Backend(format!("document {}: bad date {}", d.id, d.date)))?;

        Ok(Appointment {
            id: d.id,
            owner_id: d.owner_id,
            name: d.name,
            address: d.address,
            location,
            date,
            time: d.time,
            duration: d.duration,
            notes: d.notes,
            status: d.status,
        })
    }
}

pub struct MongoStore {
    collection: Collection<AppointmentDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;

        let collection = db.collection::<AppointmentDocument>(COLLECTION);
        collection
            .create_index(IndexModel::builder().keys(doc! { "owner_id": 1 }).build())
            .await?;

        info!("connected to mongodb database {}", database);
        Ok(MongoStore { collection })
    }

    async fn find_document(&self, id: &str) -> StoreResult<AppointmentDocument> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl AppointmentStore for MongoStore {
    async fn fetch_for_owner(&self, owner_id: &str) -> StoreResult<Vec<Appointment>> {
        let mut cursor = self.collection.find(doc! { "owner_id": owner_id }).await?;

        let mut appointments = Vec::new();
        while cursor.advance().await? {
            let document = cursor.deserialize_current()?;
            appointments.push(Appointment::try_from(document)?);
        }

        sort_chronologically(&mut appointments);
        Ok(appointments)
    }

    async fn create(&self, owner_id: &str, appointment: NewAppointment) -> StoreResult<Appointment> {
        let appointment =
            appointment.into_appointment(Uuid::new_v4().to_string(), owner_id.to_string());
        let document = AppointmentDocument::from_appointment(&appointment, bson::DateTime::now());

        self.collection.insert_one(&document).await?;
        Ok(appointment)
    }

    async fn update(&self, id: &str, patch: AppointmentPatch) -> StoreResult<Appointment> {
        let existing = self.find_document(id).await?;
        let created_at = existing.created_at;

        let mut appointment = Appointment::try_from(existing)?;
        patch.apply(&mut appointment);

        let document = AppointmentDocument::from_appointment(&appointment, created_at);
        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &document)
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(appointment)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
