use std::cmp::Ordering;

use clap::ValueEnum;
use log::debug;

use super::{
    helpers::parse_api_time,
    surface::{ListId, ListItem, Surface},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortMode {
    /// Oldest first
    Old,
    /// Newest first
    #[default]
    New,
}

/// One row of a term or document list. `date` is the literal date the API
/// sent, `text` is what the row shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: u32,
    pub date: String,
    pub text: String,
    pub hidden: bool,
}

impl ListEntry {
    pub fn new(id: u32, date: &str, text: String) -> ListEntry {
        ListEntry {
            id,
            date: date.to_owned(),
            text,
            hidden: false,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ListView {
    entries: Vec<ListEntry>,
}

impl ListView {
    pub fn new(entries: Vec<ListEntry>) -> ListView {
        ListView { entries }
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn visible(&self) -> impl Iterator<Item = &ListEntry> {
        self.entries.iter().filter(|entry| !entry.hidden)
    }

    pub fn get(&self, id: u32) -> Option<&ListEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn filter_by_name(&mut self, query: &str) {
        let query = query.to_lowercase();
        for entry in self.entries.iter_mut() {
            entry.hidden = !entry.text.to_lowercase().contains(&query);
        }
    }

    /// Matches the literal date text, so `2025-03` picks a whole month.
    pub fn filter_by_date(&mut self, query: &str) {
        let query = query.to_lowercase();
        for entry in self.entries.iter_mut() {
            entry.hidden = !entry.date.to_lowercase().contains(&query);
        }
    }

    /// Stable: equal timestamps keep their order. Rows with unreadable dates
    /// go last in both modes.
    pub fn sort_by_date(&mut self, mode: SortMode) {
        debug!("Sorting {} entries, mode {:?}", self.entries.len(), mode);
        let mut keyed = self
            .entries
            .drain(..)
            .map(|entry| (parse_api_time(&entry.date).ok(), entry))
            .collect::<Vec<_>>();
        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => match mode {
                SortMode::Old => a.cmp(b),
                SortMode::New => b.cmp(a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        self.entries = keyed.into_iter().map(|(_, entry)| entry).collect();
    }

    pub fn render<V: Surface>(&self, view: &mut V, list: ListId) {
        view.render_list(
            list,
            self.entries
                .iter()
                .map(|entry| ListItem {
                    key: entry.id.to_string(),
                    text: entry.text.clone(),
                    visible: !entry.hidden,
                })
                .collect(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ListView {
        ListView::new(vec![
            ListEntry::new(1, "2025-03-10T08:00:00", "2025-03-10 08:00 Algebra Dr. Jane Smith".to_string()),
            ListEntry::new(2, "2025-01-05T10:00:00", "2025-01-05 10:00 Physics Prof. Adam Nowak".to_string()),
            ListEntry::new(3, "2025-03-10T08:00:00", "2025-03-10 08:00 Chemistry Dr. Jane Smith".to_string()),
            ListEntry::new(4, "2025-02-20 12:30:00", "2025-02-20 12:30 Biology Mgr. Ewa Kowalska".to_string()),
        ])
    }

    fn ids(list: &ListView) -> Vec<u32> {
        list.entries().iter().map(|entry| entry.id).collect()
    }

    #[test]
    fn name_filter_hides_without_removing() {
        let mut list = sample();
        list.filter_by_name("jane SMITH");
        assert_eq!(list.entries().len(), 4);
        assert_eq!(list.visible().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
        list.filter_by_name("");
        assert_eq!(list.visible().count(), 4);
    }

    #[test]
    fn date_filter_matches_literal_text() {
        let mut list = sample();
        list.filter_by_date("2025-03");
        assert_eq!(list.visible().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
        list.filter_by_date("2025-02-20 12");
        assert_eq!(list.visible().map(|e| e.id).collect::<Vec<_>>(), vec![4]);
        list.filter_by_date("");
        assert_eq!(list.visible().count(), 4);
    }

    #[test]
    fn sort_old_and_new_keep_ties_in_order() {
        let mut list = sample();
        list.sort_by_date(SortMode::Old);
        assert_eq!(ids(&list), vec![2, 4, 1, 3]);
        list.sort_by_date(SortMode::New);
        assert_eq!(ids(&list), vec![1, 3, 4, 2]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut once = sample();
        once.sort_by_date(SortMode::New);
        let mut twice = once.clone();
        twice.sort_by_date(SortMode::New);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn unreadable_dates_go_last() {
        let mut list = sample();
        list.entries.insert(0, ListEntry::new(9, "tbd", "tbd Ethics".to_string()));
        list.sort_by_date(SortMode::Old);
        assert_eq!(ids(&list).last(), Some(&9));
        list.sort_by_date(SortMode::New);
        assert_eq!(ids(&list).last(), Some(&9));
    }

    #[test]
    fn render_keeps_hidden_rows_hidden() {
        use crate::planner::surface::MemorySurface;

        let mut list = sample();
        list.filter_by_name("physics");
        let mut view = MemorySurface::default();
        list.render(&mut view, ListId::Items);
        assert_eq!(view.list(ListId::Items).len(), 4);
        assert_eq!(
            view.visible_texts(ListId::Items),
            vec!["2025-01-05 10:00 Physics Prof. Adam Nowak"]
        );
    }
}
