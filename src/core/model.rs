use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Backend-assigned identifier of a persisted employee.
///
/// Narrowed to a 64-bit integer, which is what the reference backend issues.
/// A record whose `employeeId` is a string or a fraction fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EmployeeId {
    fn from(value: i64) -> Self {
        EmployeeId(value)
    }
}

/// Salary as the backend sends it. Kept as a JSON number so that integer
/// salaries are written back as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salary(Number);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a number")]
pub struct SalaryParseError(String);

impl Salary {
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(f64::NAN)
    }

    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        match (self.0.as_i64(), other.0.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl From<i64> for Salary {
    fn from(value: i64) -> Self {
        Salary(Number::from(value))
    }
}

impl FromStr for Salary {
    type Err = SalaryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Ok(Salary(Number::from(int)));
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Salary)
            .ok_or_else(|| SalaryParseError(s.to_string()))
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted employee record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub name: String,
    pub manager: String,
    pub salary: Salary,
}

/// An employee that has not been saved yet and therefore has no identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub manager: String,
    pub salary: Salary,
}

impl NewEmployee {
    pub fn with_id(self, employee_id: EmployeeId) -> Employee {
        Employee {
            employee_id,
            name: self.name,
            manager: self.manager,
            salary: self.salary,
        }
    }
}
