//! List Filter
//!
//! A local, non-persisted view predicate. Changing it never touches the
//! record store.

use super::todo::TodoItem;

/// Which items the view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "completed" => Some(Filter::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, UserId};
    use chrono::Utc;
    use uuid::Uuid;

    fn item(text: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: Uuid::new_v4(),
            user_id: UserId::new("u1"),
            text: text.to_string(),
            completed,
            created_at: Utc::now(),
            due_date: None,
            priority: Priority::Medium,
            notes: String::new(),
        }
    }

    #[test]
    fn test_filters_partition_the_list() {
        let items = vec![
            item("a", false),
            item("b", true),
            item("c", false),
            item("d", true),
            item("e", true),
        ];

        let active: Vec<_> = items.iter().filter(|i| Filter::Active.matches(i)).collect();
        let completed: Vec<_> = items.iter().filter(|i| Filter::Completed.matches(i)).collect();
        let all: Vec<_> = items.iter().filter(|i| Filter::All.matches(i)).collect();

        assert!(active.iter().all(|i| !i.completed));
        assert!(completed.iter().all(|i| i.completed));
        assert_eq!(all.len(), items.len());
        // disjoint partitions whose union is the full set
        assert_eq!(active.len() + completed.len(), items.len());
        assert!(active.iter().all(|a| !completed.iter().any(|c| c.id == a.id)));
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!(Filter::from_str("active"), Some(Filter::Active));
        assert_eq!(Filter::from_str("completed"), Some(Filter::Completed));
        assert_eq!(Filter::from_str("all"), Some(Filter::All));
        assert_eq!(Filter::from_str("done"), None);
        assert_eq!(Filter::Active.as_str(), "active");
    }
}
