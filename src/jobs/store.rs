//! Job-card store.
//!
//! The tracker widget only talks to jobs through [`JobStore`]; the demo
//! dashboard backs it with [`InMemoryJobStore`].

use chrono::{DateTime, Utc};
use tracing::debug;

use super::fixtures;
use super::types::{Customer, JobCard, JobStatus, Technician, Vehicle};
use crate::error::ShopError;

/// Read/update access to job cards and their reference data.
#[cfg_attr(test, mockall::automock)]
pub trait JobStore {
    /// All job cards, in board order.
    fn jobs(&self) -> Vec<JobCard>;

    /// A single job card.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if no job has this id.
    fn job(&self, id: &str) -> Result<JobCard, ShopError>;

    /// Replace the stored record with `card` (matched by id).
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if no job has this id.
    fn update(&mut self, card: JobCard) -> Result<(), ShopError>;

    /// Customer by id, if known.
    fn customer(&self, id: &str) -> Option<Customer>;

    /// Vehicle by id, if known.
    fn vehicle(&self, id: &str) -> Option<Vehicle>;

    /// Technician by id, if known.
    fn technician(&self, id: &str) -> Option<Technician>;

    /// All technicians on the roster.
    fn technicians(&self) -> Vec<Technician>;
}

/// Job store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Vec<JobCard>,
    customers: Vec<Customer>,
    vehicles: Vec<Vehicle>,
    technicians: Vec<Technician>,
}

impl InMemoryJobStore {
    /// Create a store from explicit records.
    #[must_use]
    pub const fn new(
        jobs: Vec<JobCard>,
        customers: Vec<Customer>,
        vehicles: Vec<Vehicle>,
        technicians: Vec<Technician>,
    ) -> Self {
        Self {
            jobs,
            customers,
            vehicles,
            technicians,
        }
    }

    /// Load the demo fixtures, with timestamps relative to now.
    #[must_use]
    pub fn demo() -> Self {
        Self::demo_at(Utc::now())
    }

    /// Load the demo fixtures, with timestamps relative to `now`.
    #[must_use]
    pub fn demo_at(now: DateTime<Utc>) -> Self {
        Self::new(
            fixtures::jobs(now),
            fixtures::customers(),
            fixtures::vehicles(),
            fixtures::technicians(),
        )
    }

    /// Jobs with the given status.
    #[must_use]
    pub fn jobs_with_status(&self, status: JobStatus) -> Vec<JobCard> {
        self.jobs
            .iter()
            .filter(|j| j.status == status)
            .cloned()
            .collect()
    }
}

impl JobStore for InMemoryJobStore {
    fn jobs(&self) -> Vec<JobCard> {
        self.jobs.clone()
    }

    fn job(&self, id: &str) -> Result<JobCard, ShopError> {
        self.jobs
            .iter()
            .find(|j| j.id.eq_ignore_ascii_case(id))
            .cloned()
            .ok_or_else(|| ShopError::NotFound(format!("job {id}")))
    }

    fn update(&mut self, card: JobCard) -> Result<(), ShopError> {
        let slot = self
            .jobs
            .iter_mut()
            .find(|j| j.id == card.id)
            .ok_or_else(|| ShopError::NotFound(format!("job {}", card.id)))?;

        debug!(job = %card.id, status = card.status.as_str(), worked = card.worked_minutes, "job updated");
        *slot = card;
        Ok(())
    }

    fn customer(&self, id: &str) -> Option<Customer> {
        self.customers.iter().find(|c| c.id == id).cloned()
    }

    fn vehicle(&self, id: &str) -> Option<Vehicle> {
        self.vehicles.iter().find(|v| v.id == id).cloned()
    }

    fn technician(&self, id: &str) -> Option<Technician> {
        self.technicians.iter().find(|t| t.id == id).cloned()
    }

    fn technicians(&self) -> Vec<Technician> {
        self.technicians.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_store_lookup() {
        let store = InMemoryJobStore::demo();

        let job = store.job("JC-1001").unwrap();
        assert_eq!(job.service, "Brake pad replacement");
        assert!(store.customer(&job.customer_id).is_some());
        assert!(store.vehicle(&job.vehicle_id).is_some());
        assert!(store.technician(&job.technician_id).is_some());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = InMemoryJobStore::demo();
        assert_eq!(store.job("jc-1002").unwrap().id, "JC-1002");
    }

    #[test]
    fn test_missing_job() {
        let store = InMemoryJobStore::demo();
        assert!(matches!(store.job("JC-9999"), Err(ShopError::NotFound(_))));
    }

    #[test]
    fn test_update_replaces_record() {
        let mut store = InMemoryJobStore::demo();

        let mut job = store.job("JC-1001").unwrap();
        job.status = JobStatus::InProgress;
        job.worked_minutes = 12;
        store.update(job).unwrap();

        let reloaded = store.job("JC-1001").unwrap();
        assert_eq!(reloaded.status, JobStatus::InProgress);
        assert_eq!(reloaded.worked_minutes, 12);
    }

    #[test]
    fn test_update_unknown_job() {
        let mut store = InMemoryJobStore::demo();
        let mut job = store.job("JC-1001").unwrap();
        job.id = "JC-0000".to_string();
        assert!(matches!(store.update(job), Err(ShopError::NotFound(_))));
    }

    #[test]
    fn test_jobs_with_status() {
        let store = InMemoryJobStore::demo();
        let pending = store.jobs_with_status(JobStatus::Pending);
        assert!(!pending.is_empty());
        assert!(pending.iter().all(|j| j.status == JobStatus::Pending));
    }
}
