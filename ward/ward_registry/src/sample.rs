//! Seed dataset loaded on start-up unless the caller asks for an empty
//! registry.

use ward_record::{PatientRecord, Priority};

pub fn sample_patients() -> Vec<PatientRecord> {
    vec![
        PatientRecord::new(
            101,
            "John Doe",
            45,
            "Heart Attack",
            Priority::Emergency,
            "2024-01-15",
            "Dr. Smith",
        ),
        PatientRecord::new(
            102,
            "Jane Smith",
            32,
            "Broken Arm",
            Priority::Critical,
            "2024-01-16",
            "Dr. Johnson",
        ),
        PatientRecord::new(
            103,
            "Bob Wilson",
            67,
            "Diabetes",
            Priority::NonCritical,
            "2024-01-14",
            "Dr. Williams",
        ),
        PatientRecord::new(
            104,
            "Alice Brown",
            28,
            "Pneumonia",
            Priority::Critical,
            "2024-01-17",
            "Dr. Smith",
        ),
        PatientRecord::new(
            105,
            "Charlie Davis",
            55,
            "Stroke",
            Priority::Emergency,
            "2024-01-18",
            "Dr. Johnson",
        ),
    ]
}

/// `n` synthetic patients with ids `first..first + n`, cycling through the
/// tiers and spreading admissions over January.
pub fn synthetic_patients(first: i64, n: usize) -> Vec<PatientRecord> {
    (0..n)
        .map(|i| {
            let id = first + i as i64;
            let priority = Priority::ALL[i % Priority::ALL.len()];
            PatientRecord::new(
                id,
                format!("Patient {id}"),
                18 + (i % 70) as u32,
                if i % 2 == 0 { "Observation" } else { "Fracture" },
                priority,
                format!("2024-01-{:02}", 1 + i % 28),
                "Dr. Rota",
            )
        })
        .collect()
}
