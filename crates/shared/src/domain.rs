use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for EmployeeId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl Employee {
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
        }
    }

    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Create body: an employee without its store-assigned id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl EmployeeDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Update body. Absent fields keep their stored value; an `id` sent by the
/// client is dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }

    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(email) = &self.email {
            employee.email = email.clone();
        }
        if let Some(role) = &self.role {
            employee.role = role.clone();
        }
    }
}

impl From<EmployeeDraft> for EmployeePatch {
    fn from(value: EmployeeDraft) -> Self {
        Self {
            name: Some(value.name),
            email: Some(value.email),
            role: Some(value.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_id_serializes_as_bare_string() {
        let employee = Employee {
            id: EmployeeId::from(7u64),
            name: "Amy".into(),
            email: "amy@x.com".into(),
            role: "QA".into(),
        };
        let json = serde_json::to_value(&employee).expect("json");
        assert_eq!(json["id"], "7");
    }

    #[test]
    fn patch_ignores_client_supplied_id() {
        let patch: EmployeePatch =
            serde_json::from_str(r#"{"id":"99","role":"Lead"}"#).expect("patch");
        let mut employee = Employee {
            id: EmployeeId::from("3"),
            name: "Robert Brown".into(),
            email: "robert@example.com".into(),
            role: "Manager".into(),
        };
        patch.apply_to(&mut employee);
        assert_eq!(employee.id.as_str(), "3");
        assert_eq!(employee.role, "Lead");
        assert_eq!(employee.name, "Robert Brown");
    }
}
