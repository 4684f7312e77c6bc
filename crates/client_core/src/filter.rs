use shared::domain::Employee;

/// Case-insensitive substring match on name, email or role.
pub fn matches_filter(employee: &Employee, text: &str) -> bool {
    let needle = text.to_lowercase();
    [&employee.name, &employee.email, &employee.role]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Rows visible for the given search text, in collection order.
pub fn filter_employees(employees: &[Employee], text: &str) -> Vec<Employee> {
    if text.is_empty() {
        return employees.to_vec();
    }
    employees
        .iter()
        .filter(|employee| matches_filter(employee, text))
        .cloned()
        .collect()
}
