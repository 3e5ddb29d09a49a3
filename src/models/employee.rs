//! Employee model and its lifecycle rules.

use serde::{Deserialize, Deserializer, Serialize};

/// Youngest age accepted when an employee is created.
pub const MIN_VALID_AGE: i32 = 18;
/// Oldest age accepted when an employee is created.
pub const MAX_VALID_AGE: i32 = 65;

/// Lifecycle status of an employee.
///
/// A missing status (absent JSON field, NULL column) is read as `Active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn is_active(self) -> bool {
        self == EmployeeStatus::Active
    }

    /// Column representation of the status.
    pub fn as_bool(self) -> bool {
        self.is_active()
    }
}

impl From<Option<bool>> for EmployeeStatus {
    fn from(active: Option<bool>) -> Self {
        match active {
            Some(false) => EmployeeStatus::Inactive,
            Some(true) | None => EmployeeStatus::Active,
        }
    }
}

fn status_or_default<'de, D>(deserializer: D) -> Result<EmployeeStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<EmployeeStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// An employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned identifier; `None` until the employee is saved.
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub age: i32,
    /// Free-form, matched exactly when filtering.
    pub gender: String,
    pub salary: i32,
    /// Company this employee works for. Not checked against stored companies.
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Creates an unsaved, active employee with no company.
    pub fn new(name: impl Into<String>, age: i32, gender: impl Into<String>, salary: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            gender: gender.into(),
            salary,
            company_id: None,
            status: EmployeeStatus::Active,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_company(mut self, company_id: i64) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = status;
        self
    }

    /// True when the age falls outside `[MIN_VALID_AGE, MAX_VALID_AGE]`.
    pub fn has_invalid_age(&self) -> bool {
        self.age < MIN_VALID_AGE || self.age > MAX_VALID_AGE
    }

    /// True when the employee has been deactivated.
    pub fn is_inactive(&self) -> bool {
        self.status == EmployeeStatus::Inactive
    }
}

/// Partial update of an employee. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub salary: Option<i32>,
}

impl EmployeePatch {
    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn salary(mut self, salary: i32) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.salary.is_none()
    }

    /// Overwrites the fields of `employee` that this patch carries.
    ///
    /// Name, gender, company and status are never touched.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(age) = self.age {
            employee.age = age;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Employee {
        Employee::new("Alice", 20, "Female", 3000)
    }

    #[test]
    fn test_age_boundaries() {
        for (age, invalid) in [(17, true), (18, false), (40, false), (65, false), (66, true)] {
            let employee = Employee { age, ..alice() };
            assert_eq!(employee.has_invalid_age(), invalid, "age {}", age);
        }
    }

    #[test]
    fn test_is_inactive() {
        assert!(!alice().is_inactive());
        assert!(alice().with_status(EmployeeStatus::Inactive).is_inactive());
    }

    #[test]
    fn test_status_from_column() {
        assert_eq!(EmployeeStatus::from(None), EmployeeStatus::Active);
        assert_eq!(EmployeeStatus::from(Some(true)), EmployeeStatus::Active);
        assert_eq!(EmployeeStatus::from(Some(false)), EmployeeStatus::Inactive);
    }

    #[test]
    fn test_deserialize_without_status_is_active() {
        let employee: Employee = serde_json::from_str(
            r#"{"name":"Bob","age":30,"gender":"Male","salary":5000}"#,
        )
        .unwrap();
        assert_eq!(employee.id, None);
        assert_eq!(employee.company_id, None);
        assert_eq!(employee.status, EmployeeStatus::Active);

        let employee: Employee = serde_json::from_str(
            r#"{"name":"Bob","age":30,"gender":"Male","salary":5000,"status":null}"#,
        )
        .unwrap();
        assert_eq!(employee.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&alice().with_status(EmployeeStatus::Inactive)).unwrap();
        assert!(json.contains("\"status\":\"inactive\""));
    }

    #[test]
    fn test_patch_applies_present_fields_only() {
        let mut employee = alice().with_id(1).with_company(3);

        EmployeePatch::default().salary(9000).apply_to(&mut employee);
        assert_eq!(employee.salary, 9000);
        assert_eq!(employee.age, 20);

        EmployeePatch::default().age(30).apply_to(&mut employee);
        assert_eq!(employee.age, 30);
        assert_eq!(employee.salary, 9000);

        assert_eq!(employee.name, "Alice");
        assert_eq!(employee.gender, "Female");
        assert_eq!(employee.company_id, Some(3));
        assert_eq!(employee.id, Some(1));
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut employee = alice();
        let patch = EmployeePatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut employee);
        assert_eq!(employee, alice());
    }
}
