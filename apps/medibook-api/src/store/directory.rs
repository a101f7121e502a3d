//! Doctor / appointment / patient directory.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::appointment::{Appointment, UpdateAppointment};
use crate::models::doctor::{Doctor, UpdateDoctor};
use crate::models::patient::Patient;

/// Live resource counts, always computed fresh from the store.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct DirectoryCounts {
    pub doctors: u64,
    pub appointments: u64,
    pub patients: u64,
}

/// Abstraction over the platform's document collections for doctors,
/// appointments, and patients. The write handlers own id/timestamp
/// assignment; the store persists records as given.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn insert_doctor(&self, doctor: Doctor) -> Result<(), ApiError>;
    async fn get_doctor(&self, id: &str) -> Result<Option<Doctor>, ApiError>;
    async fn update_doctor(
        &self,
        id: &str,
        changes: UpdateDoctor,
    ) -> Result<Option<Doctor>, ApiError>;
    async fn delete_doctor(&self, id: &str) -> Result<bool, ApiError>;
    /// All doctors, ascending by creation time.
    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError>;

    async fn insert_appointment(&self, appointment: Appointment) -> Result<(), ApiError>;
    async fn update_appointment(
        &self,
        id: &str,
        changes: UpdateAppointment,
    ) -> Result<Option<Appointment>, ApiError>;
    /// All appointments, ascending by creation time.
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError>;

    async fn insert_patient(&self, patient: Patient) -> Result<(), ApiError>;

    /// Current doctor/appointment/patient counts.
    async fn counts(&self) -> Result<DirectoryCounts, ApiError>;
}

// ---------------------------------------------------------------------------
// In-memory implementation (for tests / single-process deployments)
// ---------------------------------------------------------------------------

pub struct MemoryDirectoryStore {
    doctors: DashMap<String, Doctor>,
    appointments: DashMap<String, Appointment>,
    patients: DashMap<String, Patient>,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self {
            doctors: DashMap::new(),
            appointments: DashMap::new(),
            patients: DashMap::new(),
        }
    }
}

impl Default for MemoryDirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn insert_doctor(&self, doctor: Doctor) -> Result<(), ApiError> {
        self.doctors.insert(doctor.id.clone(), doctor);
        Ok(())
    }

    async fn get_doctor(&self, id: &str) -> Result<Option<Doctor>, ApiError> {
        Ok(self.doctors.get(id).map(|d| d.clone()))
    }

    async fn update_doctor(
        &self,
        id: &str,
        changes: UpdateDoctor,
    ) -> Result<Option<Doctor>, ApiError> {
        let Some(mut entry) = self.doctors.get_mut(id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            entry.name = name;
        }
        if let Some(speciality) = changes.speciality {
            entry.speciality = speciality;
        }
        if let Some(fees) = changes.fees {
            entry.fees = fees;
        }
        if let Some(available) = changes.available {
            entry.available = available;
        }
        Ok(Some(entry.clone()))
    }

    async fn delete_doctor(&self, id: &str) -> Result<bool, ApiError> {
        Ok(self.doctors.remove(id).is_some())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        let mut doctors: Vec<Doctor> = self.doctors.iter().map(|d| d.clone()).collect();
        doctors.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(doctors)
    }

    async fn insert_appointment(&self, appointment: Appointment) -> Result<(), ApiError> {
        self.appointments.insert(appointment.id.clone(), appointment);
        Ok(())
    }

    async fn update_appointment(
        &self,
        id: &str,
        changes: UpdateAppointment,
    ) -> Result<Option<Appointment>, ApiError> {
        let Some(mut entry) = self.appointments.get_mut(id) else {
            return Ok(None);
        };
        if let Some(cancelled) = changes.cancelled {
            entry.cancelled = cancelled;
        }
        if let Some(payment) = changes.payment {
            entry.payment = payment;
        }
        if let Some(is_completed) = changes.is_completed {
            entry.is_completed = is_completed;
        }
        Ok(Some(entry.clone()))
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let mut appointments: Vec<Appointment> =
            self.appointments.iter().map(|a| a.clone()).collect();
        appointments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(appointments)
    }

    async fn insert_patient(&self, patient: Patient) -> Result<(), ApiError> {
        self.patients.insert(patient.id.clone(), patient);
        Ok(())
    }

    async fn counts(&self) -> Result<DirectoryCounts, ApiError> {
        Ok(DirectoryCounts {
            doctors: self.doctors.len() as u64,
            appointments: self.appointments.len() as u64,
            patients: self.patients.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use medibook_common::PrefixedId;

    fn make_doctor(name: &str) -> Doctor {
        Doctor {
            id: Doctor::generate(),
            name: name.to_string(),
            speciality: "General physician".to_string(),
            fees: 5000,
            available: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn counts_track_inserts_and_deletes() {
        let store = MemoryDirectoryStore::new();
        let doctor = make_doctor("Dr. A");
        let doctor_id = doctor.id.clone();

        store.insert_doctor(doctor).await.unwrap();
        store
            .insert_patient(Patient {
                id: Patient::generate(),
                name: "Pat".to_string(),
                email: "pat@example.com".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let counts = store.counts().await.unwrap();
        assert_eq!(counts.doctors, 1);
        assert_eq!(counts.patients, 1);
        assert_eq!(counts.appointments, 0);

        assert!(store.delete_doctor(&doctor_id).await.unwrap());
        let counts = store.counts().await.unwrap();
        assert_eq!(counts.doctors, 0);
    }

    #[tokio::test]
    async fn update_doctor_applies_partial_changes() {
        let store = MemoryDirectoryStore::new();
        let doctor = make_doctor("Dr. B");
        let doctor_id = doctor.id.clone();
        store.insert_doctor(doctor).await.unwrap();

        let updated = store
            .update_doctor(
                &doctor_id,
                UpdateDoctor {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(!updated.available);
        assert_eq!(updated.name, "Dr. B");

        let missing = store
            .update_doctor("doc_missing", UpdateDoctor::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn list_doctors_sorts_by_creation_time() {
        let store = MemoryDirectoryStore::new();
        let first = make_doctor("Dr. First");
        let mut second = make_doctor("Dr. Second");
        second.created_at = first.created_at + chrono::Duration::seconds(1);

        // Insert out of order.
        store.insert_doctor(second).await.unwrap();
        store.insert_doctor(first).await.unwrap();

        let doctors = store.list_doctors().await.unwrap();
        assert_eq!(doctors[0].name, "Dr. First");
        assert_eq!(doctors[1].name, "Dr. Second");
    }
}
