//! Record subcommands of the command-line front end.
//!
//! Each command mounts a fresh [`Session`], replays itself as session events
//! and leaves the result in the session for [`report`] to print.

use std::io::Write;

use anyhow::Context;
use clap::Subcommand;

use crate::core::{
    Column, EmployeeApi, EmployeeId, Event, Field, NoticeLevel, Session, SortBy, SortDirection,
    session::drive,
};

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum RecordCommand {
    /// Print one page of the employee table
    List {
        /// Only show rows containing this text in any column
        #[arg(short, long)]
        search: Option<String>,
        /// Sort column (id, name, manager, salary), append `:desc` to reverse
        #[arg(long, value_name = "COLUMN[:desc]")]
        sort: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create a new employee
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        manager: String,
        #[arg(long)]
        salary: String,
    },
    /// Change an existing employee; omitted fields keep their current value
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        manager: Option<String>,
        #[arg(long)]
        salary: Option<String>,
    },
    /// Delete an employee
    Delete {
        #[arg(long)]
        id: i64,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Loads the list, then applies `command` to `session`.
///
/// A failed initial load stops before the command runs; the error is left in
/// the session's notices. `confirm` is asked before deleting unless
/// `--yes` was given.
pub async fn execute<A, F>(
    session: &mut Session,
    api: &A,
    command: RecordCommand,
    mut confirm: F,
) -> anyhow::Result<()>
where
    A: EmployeeApi,
    F: FnMut(EmployeeId) -> bool,
{
    drive(session, api, Event::Mounted, |_| false).await;
    if session.notices().errors().next().is_some() {
        return Ok(());
    }

    match command {
        RecordCommand::List { search, sort, page } => {
            if let Some(search) = search {
                session.handle(Event::FilterChanged(search));
            }
            if let Some(sort) = sort {
                session.handle(Event::SortSet(Some(parse_sort(&sort)?)));
            }
            session.handle(Event::PageSelected(page.saturating_sub(1)));
        }
        RecordCommand::Add {
            name,
            manager,
            salary,
        } => {
            for (field, value) in [
                (Field::Name, name),
                (Field::Manager, manager),
                (Field::Salary, salary),
            ] {
                session.handle(Event::FieldChanged(field, value));
            }
            drive(session, api, Event::SubmitRequested, |_| false).await;
        }
        RecordCommand::Update {
            id,
            name,
            manager,
            salary,
        } => {
            let id = EmployeeId(id);
            let record = session
                .store()
                .find(id)
                .cloned()
                .with_context(|| format!("No employee with id {id}"))?;
            session.handle(Event::EditRequested(record));
            for (field, value) in [
                (Field::Name, name),
                (Field::Manager, manager),
                (Field::Salary, salary),
            ] {
                if let Some(value) = value {
                    session.handle(Event::FieldChanged(field, value));
                }
            }
            drive(session, api, Event::SubmitRequested, |_| false).await;
        }
        RecordCommand::Delete { id, yes } => {
            drive(session, api, Event::DeleteRequested(EmployeeId(id)), |id| {
                yes || confirm(id)
            })
            .await;
        }
    }
    Ok(())
}

/// Parses `column`, `column:asc` or `column:desc`.
pub fn parse_sort(spec: &str) -> anyhow::Result<SortBy> {
    let (column, direction) = match spec.split_once(':') {
        Some((column, "desc")) => (column, SortDirection::Descending),
        Some((column, "asc")) => (column, SortDirection::Ascending),
        Some((_, other)) => anyhow::bail!("Unknown sort direction '{other}'"),
        None => (spec, SortDirection::Ascending),
    };
    Ok(SortBy {
        column: column.parse()?,
        direction,
    })
}

/// Writes notices and the current table page; fails when any error was raised.
pub fn report(session: &Session, out: &mut impl Write, err: &mut impl Write) -> anyhow::Result<()> {
    if let Some(error) = session.draft().error() {
        anyhow::bail!("{error}");
    }
    for notice in session.notices().iter() {
        match notice.level {
            NoticeLevel::Info => writeln!(out, "{}", notice.text)?,
            NoticeLevel::Error => writeln!(err, "error: {}", notice.text)?,
        }
    }

    write!(out, "{}", render_page(session))?;

    let failures = session.notices().errors().count();
    if failures > 0 {
        anyhow::bail!("{failures} request(s) failed");
    }
    Ok(())
}

/// The visible page as aligned plain-text columns with a position footer.
pub fn render_page(session: &Session) -> String {
    let page = session.page();
    let columns = Column::DATA;
    let cells: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|employee| {
            columns
                .iter()
                .map(|column| column.cell_text(employee).unwrap_or_default())
                .collect()
        })
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.header().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, &width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut text = String::from("\n");
    text.push_str(&line(columns.iter().map(|c| c.header()).collect()));
    text.push('\n');
    for row in &cells {
        text.push_str(&line(row.iter().map(String::as_str).collect()));
        text.push('\n');
    }
    if page.rows.is_empty() {
        text.push_str("(no employees)\n");
    }
    text.push_str(&format!(
        "\nPage {} of {} ({} matching, {} total)\n",
        if page.count == 0 { 0 } else { page.index + 1 },
        page.count,
        page.matching,
        session.employees().len()
    ));
    text
}
