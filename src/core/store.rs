use crate::core::model::{Employee, EmployeeId};

/// Identifies one issued refresh. Later refreshes carry larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// In-memory copy of the employee list as last fetched from the backend.
///
/// The list is only ever replaced as a whole. Each refresh is numbered so a
/// response that arrives after a newer one has been applied is discarded.
#[derive(Debug, Default)]
pub struct EmployeeStore {
    employees: Vec<Employee>,
    issued: u64,
    applied: u64,
    settled: u64,
}

impl EmployeeStore {
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_id == id)
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Replaces the list with the result of `ticket`. Returns `false` when a
    /// newer refresh has already been applied.
    pub fn apply(&mut self, ticket: RefreshTicket, employees: Vec<Employee>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.employees = employees;
        self.applied = ticket.0;
        self.settled = self.settled.max(ticket.0);
        true
    }

    /// Records a failed refresh. The current list stays in place. Returns
    /// `false` when the failure is older than the list already shown.
    pub fn fail(&mut self, ticket: RefreshTicket) -> bool {
        self.settled = self.settled.max(ticket.0);
        ticket.0 > self.applied
    }

    pub fn is_loading(&self) -> bool {
        self.issued > self.settled
    }

    /// Whether any refresh has succeeded yet.
    pub fn is_loaded(&self) -> bool {
        self.applied > 0
    }
}
