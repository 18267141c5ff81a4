use iced::{
    Alignment::Center,
    Element, Length,
    widget::{Column, Row, button, column, container, row, text, text_input},
};
use iced_widget::container::bordered_box;

use crate::core::{
    Draft, Field,
    notice::{NoticeLevel, Notices},
    session::Event,
    table::{Column as TableColumn, Page, PageNav, SortBy, SortDirection},
};

fn labelled_input<'a>(label: &'a str, value: &str, field: Field) -> Element<'a, Event> {
    column![
        text(label),
        text_input(label, value)
            .on_input(move |value| Event::FieldChanged(field, value))
            .on_submit(Event::SubmitRequested)
            .padding(6),
    ]
    .spacing(4)
    .width(Length::Fill)
    .into()
}

pub fn employee_form<'a>(draft: &Draft, submitting: bool) -> Element<'a, Event> {
    let submit_label = if draft.is_editing() { "Update" } else { "Add" };
    let fields = row![
        labelled_input("Name", draft.value(Field::Name), Field::Name),
        labelled_input("Manager", draft.value(Field::Manager), Field::Manager),
        labelled_input("Salary", draft.value(Field::Salary), Field::Salary),
    ]
    .spacing(12);
    let buttons = row![
        button(submit_label).on_press_maybe((!submitting).then_some(Event::SubmitRequested)),
        button("Cancel").on_press_maybe(draft.is_editing().then_some(Event::CancelRequested)),
    ]
    .spacing(12);

    container(column![fields, buttons].spacing(12))
        .style(bordered_box)
        .padding(12)
        .into()
}

pub fn notices<'a>(notices: &Notices) -> Element<'a, Event> {
    let rows = notices.iter().map(|notice| -> Element<'a, Event> {
        let message = match notice.level {
            NoticeLevel::Info => text(notice.text.clone()).style(text::success),
            NoticeLevel::Error => text(notice.text.clone()).style(text::danger),
        };
        row![
            message.width(Length::Fill),
            button("Dismiss")
                .style(button::text)
                .on_press(Event::NoticeDismissed(notice.id)),
        ]
        .align_y(Center)
        .into()
    });
    Column::with_children(rows).spacing(4).into()
}

pub fn search<'a>(filter: &str) -> Element<'a, Event> {
    text_input("Search Employee Here", filter)
        .on_input(Event::FilterChanged)
        .padding(6)
        .into()
}

fn header_label(column: TableColumn, sort: Option<SortBy>) -> String {
    match sort {
        Some(SortBy {
            column: sorted,
            direction,
        }) if sorted == column => match direction {
            SortDirection::Ascending => format!("{} ↓", column.header()),
            SortDirection::Descending => format!("{} ↑", column.header()),
        },
        _ => column.header().to_string(),
    }
}

fn cell<'a>(content: impl Into<Element<'a, Event>>) -> Element<'a, Event> {
    container(content)
        .width(Length::FillPortion(1))
        .padding(4)
        .into()
}

pub fn employee_table<'a>(
    page: &Page<'_>,
    sort: Option<SortBy>,
    loading: bool,
) -> Element<'a, Event> {
    let header = Row::with_children(TableColumn::ALL.iter().map(|&column| {
        if column.is_data() {
            cell(
                button(text(header_label(column, sort)))
                    .style(button::text)
                    .on_press(Event::SortToggled(column)),
            )
        } else {
            cell(text(column.header()))
        }
    }));

    let mut rows: Vec<Element<'a, Event>> = vec![container(header).style(bordered_box).into()];
    for employee in &page.rows {
        let cells = TableColumn::ALL.iter().map(|&column| match column {
            TableColumn::Edit => cell(
                button("Edit").on_press(Event::EditRequested((*employee).clone())),
            ),
            TableColumn::Delete => cell(
                button("Delete")
                    .style(button::danger)
                    .on_press(Event::DeleteRequested(employee.employee_id)),
            ),
            data => cell(text(data.cell_text(employee).unwrap_or_default())),
        });
        rows.push(Row::with_children(cells).align_y(Center).into());
    }
    if page.rows.is_empty() {
        let placeholder = if loading { "Loading..." } else { "No employees found" };
        rows.push(container(text(placeholder)).padding(8).into());
    }

    Column::with_children(rows).spacing(2).into()
}

pub fn pager<'a>(page: &Page<'_>) -> Element<'a, Event> {
    let nav = |label: &'a str, enabled: bool, target: PageNav| {
        button(label).on_press_maybe(enabled.then_some(Event::PageRequested(target)))
    };
    let position = if page.count == 0 {
        "0 of 0".to_string()
    } else {
        format!("{} of {}", page.index + 1, page.count)
    };

    row![
        nav("First", page.can_previous(), PageNav::First),
        nav("Prev", page.can_previous(), PageNav::Previous),
        text(position),
        nav("Next", page.can_next(), PageNav::Next),
        nav("Last", page.can_next(), PageNav::Last),
    ]
    .spacing(12)
    .align_y(Center)
    .into()
}
