use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use employee_manager::core::{
    ApiError, Employee, EmployeeApi, EmployeeId, Event, Field, NewEmployee, Salary, Session,
    session::drive,
};
use reqwest::{Method, StatusCode};

/// One request as seen by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(NewEmployee),
    Update(Employee),
    Delete(EmployeeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct Backend {
    employees: Vec<Employee>,
    next_id: i64,
    calls: Vec<Call>,
    failing: Vec<Operation>,
}

impl Backend {
    fn record(&mut self, call: Call, operation: Operation) -> Result<(), ApiError> {
        self.calls.push(call);
        if self.failing.contains(&operation) {
            return Err(ApiError::Status {
                method: Method::GET,
                url: "http://fake/employees".into(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: format!("{operation:?} failed"),
            });
        }
        Ok(())
    }
}

/// In-memory backend that records every call it receives.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    backend: Arc<Mutex<Backend>>,
}

impl FakeApi {
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let next_id = employees.iter().map(|e| e.employee_id.0).max().unwrap_or(0) + 1;
        let backend = Backend {
            employees,
            next_id,
            ..Backend::default()
        };
        Self {
            backend: Arc::new(Mutex::new(backend)),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.backend.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.backend.lock().unwrap().calls.clear();
    }

    /// Makes every later request of this kind fail with a 500.
    pub fn fail(&self, operation: Operation) {
        self.backend.lock().unwrap().failing.push(operation);
    }

    pub fn stored(&self) -> Vec<Employee> {
        self.backend.lock().unwrap().employees.clone()
    }
}

impl EmployeeApi for FakeApi {
    fn list(&self) -> impl Future<Output = Result<Vec<Employee>, ApiError>> + Send + 'static {
        let backend = self.backend.clone();
        async move {
            let mut backend = backend.lock().unwrap();
            backend.record(Call::List, Operation::List)?;
            Ok::<_, ApiError>(backend.employees.clone())
        }
    }

    fn create(
        &self,
        employee: NewEmployee,
    ) -> impl Future<Output = Result<Employee, ApiError>> + Send + 'static {
        let backend = self.backend.clone();
        async move {
            let mut backend = backend.lock().unwrap();
            backend.record(Call::Create(employee.clone()), Operation::Create)?;
            let id = EmployeeId(backend.next_id.max(1));
            backend.next_id = id.0 + 1;
            let created = employee.with_id(id);
            backend.employees.push(created.clone());
            Ok::<_, ApiError>(created)
        }
    }

    fn update(
        &self,
        employee: Employee,
    ) -> impl Future<Output = Result<Employee, ApiError>> + Send + 'static {
        let backend = self.backend.clone();
        async move {
            let mut backend = backend.lock().unwrap();
            backend.record(Call::Update(employee.clone()), Operation::Update)?;
            if let Some(existing) = backend
                .employees
                .iter_mut()
                .find(|e| e.employee_id == employee.employee_id)
            {
                *existing = employee.clone();
            }
            Ok::<_, ApiError>(employee)
        }
    }

    fn delete(
        &self,
        id: EmployeeId,
    ) -> impl Future<Output = Result<String, ApiError>> + Send + 'static {
        let backend = self.backend.clone();
        async move {
            let mut backend = backend.lock().unwrap();
            backend.record(Call::Delete(id), Operation::Delete)?;
            backend.employees.retain(|e| e.employee_id != id);
            Ok::<_, ApiError>("Employee deleted".to_string())
        }
    }
}

pub fn employee(id: i64, name: &str, manager: &str, salary: i64) -> Employee {
    Employee {
        employee_id: EmployeeId(id),
        name: name.to_string(),
        manager: manager.to_string(),
        salary: Salary::from(salary),
    }
}

/// `count` employees named "Person 1", "Person 2", ...
pub fn staff(count: i64) -> Vec<Employee> {
    (1..=count)
        .map(|i| employee(i, &format!("Person {i}"), "Boss", 1000 * i))
        .collect()
}

/// A session that has already completed its initial load against `api`.
pub async fn mounted_session(api: &FakeApi) -> Session {
    let mut session = Session::default();
    drive(&mut session, api, Event::Mounted, |_| false).await;
    api.clear_calls();
    session
}

pub fn fill(session: &mut Session, name: &str, manager: &str, salary: &str) {
    session.handle(Event::FieldChanged(Field::Name, name.into()));
    session.handle(Event::FieldChanged(Field::Manager, manager.into()));
    session.handle(Event::FieldChanged(Field::Salary, salary.into()));
}

