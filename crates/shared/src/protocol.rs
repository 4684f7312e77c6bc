use serde::{Deserialize, Serialize};

use crate::domain::Employee;

/// Path prefix every record route is mounted under.
pub const API_PREFIX: &str = "/api";

pub fn employees_route() -> String {
    format!("{API_PREFIX}/employees")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesResponse {
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_route_lives_under_api_prefix() {
        assert_eq!(employees_route(), "/api/employees");
    }
}
