//! Job-card records and the people and vehicles they reference.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ShopError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub id: String,
    pub customer_id: String,
    pub vehicle_id: String,
    pub technician_id: String,
    /// Requested service, e.g. "Brake pad replacement"
    pub service: String,
    pub status: JobStatus,
    #[serde(default)]
    pub priority: Priority,
    /// First time tracking started on this job
    #[serde(default)]
    pub time_in: Option<DateTime<Utc>>,
    /// Last time tracking was stopped on this job
    #[serde(default)]
    pub time_out: Option<DateTime<Utc>>,
    /// Closed work minutes recorded at the last stop
    #[serde(default)]
    pub worked_minutes: i64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    OnHold,
    Completed,
}

impl JobStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::OnHold, Self::Completed];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
        }
    }

    /// Check if the job still needs work.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in progress"),
            Self::OnHold => write!(f, "on hold"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "active" => Ok(Self::InProgress),
            "on_hold" | "hold" => Ok(Self::OnHold),
            "completed" | "done" => Ok(Self::Completed),
            other => Err(ShopError::Parse(format!("unknown job status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub customer_id: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub plate: String,
}

impl Vehicle {
    /// "2019 Toyota Corolla (KA-01-AB-1234)"
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} {} ({})", self.year, self.make, self.model, self.plate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: String,
    pub name: String,
    pub specialty: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_parse() {
        assert_eq!("pending".parse::<JobStatus>().unwrap(), JobStatus::Pending);
        assert_eq!("in-progress".parse::<JobStatus>().unwrap(), JobStatus::InProgress);
        assert_eq!("On Hold".parse::<JobStatus>().unwrap(), JobStatus::OnHold);
        assert_eq!("done".parse::<JobStatus>().unwrap(), JobStatus::Completed);
        assert!("lost".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_job_status_round_trips_as_str() {
        for status in JobStatus::ALL {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_job_card_json_shape() {
        let card = JobCard {
            id: "JC-1".to_string(),
            customer_id: "C-1".to_string(),
            vehicle_id: "V-1".to_string(),
            technician_id: "T-1".to_string(),
            service: "Oil change".to_string(),
            status: JobStatus::InProgress,
            priority: Priority::High,
            time_in: None,
            time_out: None,
            worked_minutes: 42,
            notes: String::new(),
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["workedMinutes"], 42);
        assert_eq!(json["priority"], "high");
    }

    #[test]
    fn test_vehicle_label() {
        let vehicle = Vehicle {
            id: "V-1".to_string(),
            customer_id: "C-1".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2019,
            plate: "KA-01-AB-1234".to_string(),
        };
        assert_eq!(vehicle.label(), "2019 Toyota Corolla (KA-01-AB-1234)");
    }
}
