//! Filtering, sorting and paging of the employee list for display.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::core::model::Employee;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    EmployeeId,
    Name,
    Manager,
    Salary,
    Edit,
    Delete,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::EmployeeId,
        Column::Name,
        Column::Manager,
        Column::Salary,
        Column::Edit,
        Column::Delete,
    ];

    /// Columns backed by record fields; these are searched and sortable.
    pub const DATA: [Column; 4] = [
        Column::EmployeeId,
        Column::Name,
        Column::Manager,
        Column::Salary,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::EmployeeId => "EmployeeId",
            Column::Name => "Name",
            Column::Manager => "Manager",
            Column::Salary => "Salary",
            Column::Edit => "Edit",
            Column::Delete => "Delete",
        }
    }

    pub fn is_data(self) -> bool {
        !matches!(self, Column::Edit | Column::Delete)
    }

    /// Display text of a data cell, `None` for action columns.
    pub fn cell_text(self, employee: &Employee) -> Option<String> {
        match self {
            Column::EmployeeId => Some(employee.employee_id.to_string()),
            Column::Name => Some(employee.name.clone()),
            Column::Manager => Some(employee.manager.clone()),
            Column::Salary => Some(employee.salary.to_string()),
            Column::Edit | Column::Delete => None,
        }
    }

    fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            Column::EmployeeId => a.employee_id.cmp(&b.employee_id),
            Column::Name => compare_text(&a.name, &b.name),
            Column::Manager => compare_text(&a.manager, &b.manager),
            Column::Salary => a.salary.cmp_numeric(&b.salary),
            Column::Edit | Column::Delete => Ordering::Equal,
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column '{0}' (expected id, name, manager or salary)")]
pub struct UnknownColumn(String);

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" | "employeeid" => Ok(Column::EmployeeId),
            "name" => Ok(Column::Name),
            "manager" => Ok(Column::Manager),
            "salary" => Ok(Column::Salary),
            _ => Err(UnknownColumn(s.to_string())),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    pub column: Column,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
}

/// One page of rows ready for display.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub rows: Vec<&'a Employee>,
    pub index: usize,
    pub count: usize,
    /// Rows left after filtering, across all pages.
    pub matching: usize,
}

impl Page<'_> {
    pub fn can_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_next(&self) -> bool {
        self.index + 1 < self.count
    }
}

/// View state of the employee table: global filter, sort column and page.
#[derive(Debug, Clone)]
pub struct TableView {
    page_size: usize,
    page_index: usize,
    filter: String,
    sort: Option<SortBy>,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableView {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page_index: 0,
            filter: String::new(),
            sort: None,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortBy> {
        self.sort
    }

    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.page_index = 0;
    }

    /// Cycles a column through ascending, descending and unsorted.
    /// Selecting a different column starts it at ascending. Any change of
    /// order goes back to the first page.
    pub fn toggle_sort(&mut self, column: Column) {
        if !column.is_data() {
            return;
        }
        self.sort = match self.sort {
            Some(SortBy {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(SortBy {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortBy {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(SortBy {
                column,
                direction: SortDirection::Ascending,
            }),
        };
        self.page_index = 0;
    }

    pub fn set_sort(&mut self, sort: Option<SortBy>) {
        self.sort = sort.filter(|s| s.column.is_data());
        self.page_index = 0;
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        if self.filter.is_empty() {
            return true;
        }
        let needle = self.filter.to_lowercase();
        Column::DATA
            .iter()
            .filter_map(|column| column.cell_text(employee))
            .any(|text| text.to_lowercase().contains(&needle))
    }

    /// All rows passing the filter, in display order.
    pub fn rows<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        let mut rows: Vec<&Employee> = employees.iter().filter(|e| self.matches(e)).collect();
        if let Some(SortBy { column, direction }) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = column.compare(a, b);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    fn page_count_for(&self, matching: usize) -> usize {
        matching.div_ceil(self.page_size)
    }

    pub fn page_count(&self, employees: &[Employee]) -> usize {
        self.page_count_for(self.rows(employees).len())
    }

    pub fn page<'a>(&self, employees: &'a [Employee]) -> Page<'a> {
        let rows = self.rows(employees);
        let matching = rows.len();
        let count = self.page_count_for(matching);
        let index = self.page_index.min(count.saturating_sub(1));
        let rows = rows
            .into_iter()
            .skip(index * self.page_size)
            .take(self.page_size)
            .collect();
        Page {
            rows,
            index,
            count,
            matching,
        }
    }

    pub fn navigate(&mut self, nav: PageNav, employees: &[Employee]) {
        let count = self.page_count(employees);
        let last = count.saturating_sub(1);
        let current = self.page_index.min(last);
        self.page_index = match nav {
            PageNav::First => 0,
            PageNav::Previous => current.saturating_sub(1),
            PageNav::Next => (current + 1).min(last),
            PageNav::Last => last,
        };
    }

    /// Jumps to a page directly, clamped to the available range.
    pub fn go_to(&mut self, index: usize, employees: &[Employee]) {
        let last = self.page_count(employees).saturating_sub(1);
        self.page_index = index.min(last);
    }

    /// Pulls the page index back into range after the row count shrank.
    pub fn clamp(&mut self, employees: &[Employee]) {
        self.go_to(self.page_index, employees);
    }
}
