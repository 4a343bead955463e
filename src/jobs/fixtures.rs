//! Demo shop data.
//!
//! Timestamps are laid out relative to a reference instant so that reports
//! over "today" and "this week" always have something to show.

use chrono::{DateTime, Duration, Utc};

use super::types::{Customer, JobCard, JobStatus, Priority, Technician, Vehicle};

pub fn customers() -> Vec<Customer> {
    [
        ("C-001", "Anita Rao", "+91 98450 11223", Some("anita.rao@example.com")),
        ("C-002", "Marcus Lee", "+1 415 555 0142", Some("marcus.lee@example.com")),
        ("C-003", "Sofia Marin", "+34 612 555 019", None),
        ("C-004", "Tom Becker", "+49 151 5550 7788", Some("t.becker@example.com")),
    ]
    .into_iter()
    .map(|(id, name, phone, email)| Customer {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.map(str::to_string),
    })
    .collect()
}

pub fn vehicles() -> Vec<Vehicle> {
    [
        ("V-101", "C-001", "Toyota", "Corolla", 2019, "KA-01-AB-1234"),
        ("V-102", "C-002", "Ford", "F-150", 2021, "7XYZ123"),
        ("V-103", "C-003", "Seat", "Leon", 2017, "4821-KLM"),
        ("V-104", "C-004", "Volkswagen", "Golf", 2020, "B-TB-2020"),
        ("V-105", "C-001", "Honda", "City", 2015, "KA-05-MN-9876"),
    ]
    .into_iter()
    .map(|(id, customer_id, make, model, year, plate)| Vehicle {
        id: id.to_string(),
        customer_id: customer_id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        plate: plate.to_string(),
    })
    .collect()
}

pub fn technicians() -> Vec<Technician> {
    [
        ("T-01", "Ravi Kumar", "Engine & drivetrain"),
        ("T-02", "Jenna Ortiz", "Brakes & suspension"),
        ("T-03", "Ole Hansen", "Electrical & diagnostics"),
    ]
    .into_iter()
    .map(|(id, name, specialty)| Technician {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
    })
    .collect()
}

/// Job cards, with `time_in`/`time_out` offsets counted back from `now`.
pub fn jobs(now: DateTime<Utc>) -> Vec<JobCard> {
    // (id, customer, vehicle, technician, service, status, priority,
    //  time_in hours ago, worked minutes, notes)
    let rows: [(&str, &str, &str, &str, &str, JobStatus, Priority, Option<i64>, i64, &str); 8] = [
        ("JC-1001", "C-001", "V-101", "T-02", "Brake pad replacement", JobStatus::Pending, Priority::High, None, 0, "Squeal from front left"),
        ("JC-1002", "C-002", "V-102", "T-01", "Oil & filter change", JobStatus::InProgress, Priority::Normal, Some(2), 0, "Car on lift 2"),
        ("JC-1003", "C-003", "V-103", "T-03", "Check engine light diagnosis", JobStatus::OnHold, Priority::Normal, Some(26), 50, "Waiting on O2 sensor"),
        ("JC-1004", "C-004", "V-104", "T-02", "Suspension inspection", JobStatus::Completed, Priority::Low, Some(30), 75, ""),
        ("JC-1005", "C-001", "V-105", "T-01", "Timing belt replacement", JobStatus::Completed, Priority::High, Some(72), 210, "Water pump replaced too"),
        ("JC-1006", "C-002", "V-102", "T-03", "Battery & alternator test", JobStatus::Completed, Priority::Normal, Some(120), 40, ""),
        ("JC-1007", "C-003", "V-103", "T-02", "Wheel alignment", JobStatus::Completed, Priority::Normal, Some(400), 60, ""),
        ("JC-1008", "C-004", "V-104", "T-01", "Annual service", JobStatus::Pending, Priority::Low, None, 0, "Customer drops off Friday"),
    ];

    rows.into_iter()
        .map(
            |(id, customer, vehicle, technician, service, status, priority, hours_ago, worked, notes)| {
                let time_in = hours_ago.map(|h| now - Duration::hours(h));
                let time_out = match status {
                    JobStatus::Completed | JobStatus::OnHold => {
                        time_in.map(|t| t + Duration::minutes(worked + 20))
                    }
                    JobStatus::Pending | JobStatus::InProgress => None,
                };

                JobCard {
                    id: id.to_string(),
                    customer_id: customer.to_string(),
                    vehicle_id: vehicle.to_string(),
                    technician_id: technician.to_string(),
                    service: service.to_string(),
                    status,
                    priority,
                    time_in,
                    time_out,
                    worked_minutes: worked,
                    notes: notes.to_string(),
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_references_resolve() {
        let customers = customers();
        let vehicles = vehicles();
        let technicians = technicians();

        for job in jobs(Utc::now()) {
            assert!(customers.iter().any(|c| c.id == job.customer_id), "{}", job.id);
            assert!(vehicles.iter().any(|v| v.id == job.vehicle_id), "{}", job.id);
            assert!(technicians.iter().any(|t| t.id == job.technician_id), "{}", job.id);
        }
        for vehicle in &vehicles {
            assert!(customers.iter().any(|c| c.id == vehicle.customer_id));
        }
    }

    #[test]
    fn test_pending_jobs_have_no_time_in() {
        for job in jobs(Utc::now()) {
            if job.status == JobStatus::Pending {
                assert!(job.time_in.is_none());
                assert_eq!(job.worked_minutes, 0);
            }
        }
    }
}
