use crate::core::model::{Employee, EmployeeId, NewEmployee, Salary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Manager,
    Salary,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are mandatory!")]
    MissingFields,
    #[error("Salary must be a number!")]
    InvalidSalary,
}

/// What a valid draft turns into when submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewEmployee),
    Update(Employee),
}

/// The single record bound to the form inputs. Carries an identifier only
/// while an existing row is being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    employee_id: Option<EmployeeId>,
    name: String,
    manager: String,
    salary: String,
    error: Option<ValidationError>,
}

impl Draft {
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Manager => &self.manager,
            Field::Salary => &self.salary,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.employee_id.is_some()
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Manager => self.manager = value,
            Field::Salary => self.salary = value,
        }
        self.error = None;
    }

    pub fn start_edit(&mut self, record: &Employee) {
        *self = Draft {
            employee_id: Some(record.employee_id),
            name: record.name.clone(),
            manager: record.manager.clone(),
            salary: record.salary.to_string(),
            error: None,
        };
    }

    pub fn reset(&mut self) {
        *self = Draft::default();
    }

    /// Builds the request for this draft without touching the network.
    pub fn submission(&self) -> Result<Submission, ValidationError> {
        if self.name.is_empty() || self.manager.is_empty() || self.salary.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let salary: Salary = self
            .salary
            .parse()
            .map_err(|_| ValidationError::InvalidSalary)?;
        let employee = NewEmployee {
            name: self.name.clone(),
            manager: self.manager.clone(),
            salary,
        };
        Ok(match self.employee_id {
            Some(id) => Submission::Update(employee.with_id(id)),
            None => Submission::Create(employee),
        })
    }

    pub fn reject(&mut self, error: ValidationError) {
        self.error = Some(error);
    }
}
