use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use super::model::{CreatePatientRequest, Patient, UpdatePatientRequest};

/// In-memory patient registry.
///
/// Stands in for the persistence layer, which lives outside this service's
/// scope; only the authorization behavior around it is of interest here.
#[derive(Debug, Clone, Default)]
pub struct PatientStore {
    entries: Arc<RwLock<HashMap<i64, Patient>>>,
    next_id: Arc<AtomicI64>,
}

impl PatientStore {
    pub async fn create(&self, request: CreatePatientRequest) -> Patient {
        let patient = Patient {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            user_id: request.user_id,
            full_name: request.full_name,
            date_of_birth: request.date_of_birth,
            phone: request.phone,
        };
        self.entries
            .write()
            .await
            .insert(patient.id, patient.clone());
        patient
    }

    pub async fn list(&self) -> Vec<Patient> {
        let mut patients: Vec<Patient> = self.entries.read().await.values().cloned().collect();
        patients.sort_by_key(|p| p.id);
        patients
    }

    pub async fn get(&self, id: i64) -> Option<Patient> {
        self.entries.read().await.get(&id).cloned()
    }

    pub async fn update(&self, id: i64, request: UpdatePatientRequest) -> Option<Patient> {
        let mut entries = self.entries.write().await;
        let patient = entries.get_mut(&id)?;
        if let Some(full_name) = request.full_name {
            patient.full_name = full_name;
        }
        if let Some(phone) = request.phone {
            patient.phone = Some(phone);
        }
        Some(patient.clone())
    }

    pub async fn delete(&self, id: i64) -> bool {
        self.entries.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(user_id: i64) -> CreatePatientRequest {
        CreatePatientRequest {
            user_id,
            full_name: "Jane Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = PatientStore::default();
        let a = store.create(request(100)).await;
        let b = store.create(request(101)).await;
        assert!(b.id > a.id);
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = PatientStore::default();
        let created = store.create(request(100)).await;

        let updated = store
            .update(
                created.id,
                UpdatePatientRequest {
                    full_name: Some("Jane Smith".to_string()),
                    phone: Some("555-0100".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name, "Jane Smith");
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));

        assert!(store.delete(created.id).await);
        assert!(!store.delete(created.id).await);
        assert!(store.get(created.id).await.is_none());
    }
}
