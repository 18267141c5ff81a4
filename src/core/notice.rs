use std::collections::VecDeque;

const MAX_NOTICES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub text: String,
}

/// Dismissible messages shown to the user, newest last.
#[derive(Debug, Default)]
pub struct Notices {
    items: VecDeque<Notice>,
    next_id: u64,
}

impl Notices {
    pub fn info(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, text.into())
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Error, text.into())
    }

    fn push(&mut self, level: NoticeLevel, text: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.items.len() == MAX_NOTICES {
            self.items.pop_front();
        }
        self.items.push_back(Notice { id, level, text });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter().filter(|n| n.level == NoticeLevel::Error)
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_removes_only_that_notice() {
        let mut notices = Notices::default();
        let first = notices.info("saved");
        let second = notices.error("boom");
        assert!(notices.dismiss(first));
        assert!(!notices.dismiss(first));
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.latest().map(|n| n.id), Some(second));
        assert_eq!(notices.errors().count(), 1);
    }

    #[test]
    fn oldest_notices_are_dropped() {
        let mut notices = Notices::default();
        for i in 0..(MAX_NOTICES + 3) {
            notices.info(format!("notice {i}"));
        }
        assert_eq!(notices.len(), MAX_NOTICES);
        assert_eq!(notices.iter().next().map(|n| n.text.as_str()), Some("notice 3"));
    }
}
