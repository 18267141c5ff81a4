use iced::{
    Element, Length, Task,
    widget::{Column, button, container, row, scrollable, text},
};
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

use super::{Message, widgets};
use crate::core::{
    EmployeeId, HttpEmployeeApi, Session,
    session::{self, Effect, Event},
    table::DEFAULT_PAGE_SIZE,
};

pub struct EmployeeManagerApp {
    session: Session,
    api: HttpEmployeeApi,
}

impl EmployeeManagerApp {
    pub fn new(api: HttpEmployeeApi) -> (Self, Task<Message>) {
        let mut app = Self {
            session: Session::new(DEFAULT_PAGE_SIZE),
            api,
        };
        let effects = app.session.handle(Event::Mounted);
        let task = app.run_effects(effects);
        (app, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Session(event) => {
                let effects = self.session.handle(event);
                self.run_effects(effects)
            }
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| match effect {
            Effect::Call(call) => Task::perform(session::perform(&self.api, call), Message::Session),
            Effect::ConfirmDelete(id) => Task::perform(confirm_delete(id), move |confirmed| {
                Message::Session(if confirmed {
                    Event::DeleteConfirmed(id)
                } else {
                    Event::DeleteDeclined(id)
                })
            }),
        }))
    }

    pub fn view(&self) -> Element<'_, Message> {
        let session = &self.session;
        let page = session.page();

        let mut children: Vec<Element<'_, Event>> = vec![
            row![
                text("Employee Manager").size(28).width(Length::Fill),
                button("Reload").on_press(Event::RefreshRequested),
            ]
            .into(),
        ];
        if let Some(error) = session.draft().error() {
            children.push(text(error.to_string()).style(text::danger).into());
        }
        children.push(widgets::employee_form(session.draft(), session.is_submitting()));
        if !session.notices().is_empty() {
            children.push(widgets::notices(session.notices()));
        }
        children.push(widgets::search(session.table().filter()));
        children.push(widgets::employee_table(
            &page,
            session.table().sort(),
            session.store().is_loading(),
        ));
        children.push(widgets::pager(&page));

        let content: Element<'_, Event> = Column::with_children(children)
            .spacing(16)
            .padding(20)
            .into();

        container(scrollable(content.map(Message::Session)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

async fn confirm_delete(id: EmployeeId) -> bool {
    let answer = AsyncMessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Delete employee")
        .set_description(format!("Are you sure you want to delete employee {id}?"))
        .set_buttons(MessageButtons::YesNo)
        .show()
        .await;
    matches!(answer, MessageDialogResult::Yes)
}
