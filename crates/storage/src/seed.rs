use shared::domain::{Employee, EmployeeId};

const SEED: [(&str, &str, &str, &str); 10] = [
    ("1", "John Doe", "Developer", "john@example.com"),
    ("2", "Jane Smith", "Designer", "jane@example.com"),
    ("3", "Robert Brown", "Manager", "robert@example.com"),
    ("4", "Emily Johnson", "HR", "emily@example.com"),
    ("5", "Michael Lee", "DevOps", "michael@example.com"),
    ("6", "Sarah Wilson", "QA", "sarah@example.com"),
    ("7", "David Miller", "Product Owner", "david@example.com"),
    ("8", "Emma Davis", "Marketing", "emma@example.com"),
    ("9", "Daniel White", "Support", "daniel@example.com"),
    ("10", "Sophia Martin", "Finance", "sophia@example.com"),
];

/// The fixed records a fresh directory starts with.
pub fn seed_employees() -> Vec<Employee> {
    SEED.iter()
        .map(|(id, name, role, email)| Employee {
            id: EmployeeId::from(*id),
            name: (*name).to_string(),
            email: (*email).to_string(),
            role: (*role).to_string(),
        })
        .collect()
}
