pub mod api;
pub mod draft;
pub mod model;
pub mod notice;
pub mod session;
pub mod store;
pub mod table;

pub use api::{ApiError, EmployeeApi, HttpEmployeeApi};
pub use draft::{Draft, Field, Submission, ValidationError};
pub use model::{Employee, EmployeeId, NewEmployee, Salary};
pub use notice::{Notice, NoticeLevel, Notices};
pub use session::{ApiCall, Effect, Event, Outcome, Session};
pub use store::{EmployeeStore, RefreshTicket};
pub use table::{Column, Page, PageNav, SortBy, SortDirection, TableView};
