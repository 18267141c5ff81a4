mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from employee_manager for tests
pub use employee_manager::core::{
    ApiError, Employee, EmployeeApi, EmployeeId, Event, Field, NewEmployee, NoticeLevel, PageNav,
    Salary, Session, session::drive,
};
