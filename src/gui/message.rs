use crate::core::Event;

#[derive(Debug, Clone)]
pub enum Message {
    Session(Event),
}
