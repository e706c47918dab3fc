//! User Intents
//!
//! One line of input maps to one intent. Parsing is purely local and never
//! touches the stores.

use chrono::NaiveDate;

use crate::domain::{Filter, Priority, TodoDraft};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SignUp { email: String, password: String },
    SignIn { email: String, password: String },
    SignOut,
    Add(TodoDraft),
    /// 1-based position in the visible list
    Toggle(usize),
    Delete(usize),
    Open(usize),
    Close,
    SetPriority(Priority),
    SetDue(NaiveDate),
    SetNotes(String),
    Filter(Filter),
    List,
    Help,
    Quit,
}

impl Intent {
    pub fn parse(line: &str) -> Option<Intent> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "signup" => {
                let (email, password) = rest.split_once(char::is_whitespace)?;
                Some(Intent::SignUp {
                    email: email.to_string(),
                    password: password.trim().to_string(),
                })
            }
            "signin" | "login" => {
                let (email, password) = rest.split_once(char::is_whitespace)?;
                Some(Intent::SignIn {
                    email: email.to_string(),
                    password: password.trim().to_string(),
                })
            }
            "signout" | "logout" => Some(Intent::SignOut),
            "add" => Some(Intent::Add(parse_draft(rest))),
            "toggle" | "done" => Some(Intent::Toggle(rest.parse().ok()?)),
            "del" | "delete" | "rm" => Some(Intent::Delete(rest.parse().ok()?)),
            "open" => Some(Intent::Open(rest.parse().ok()?)),
            "close" => Some(Intent::Close),
            "set" => parse_set(rest),
            "filter" => Some(Intent::Filter(Filter::from_str(rest)?)),
            "list" | "ls" => Some(Intent::List),
            "help" => Some(Intent::Help),
            "quit" | "exit" => Some(Intent::Quit),
            _ => None,
        }
    }
}

/// `add <text> [due=YYYY-MM-DD] [prio=low|medium|high] [notes=<rest of line>]`
///
/// Empty text is not rejected here; the controller is the one gate for that.
fn parse_draft(rest: &str) -> TodoDraft {
    // notes= consumes everything after it, spaces included
    let (head, notes) = match rest.split_once("notes=") {
        Some((head, notes)) => (head, notes.to_string()),
        None => (rest, String::new()),
    };

    let mut draft = TodoDraft::new("");
    draft.notes = notes;

    let mut text_words: Vec<&str> = Vec::new();
    for word in head.split_whitespace() {
        if let Some(date) = word.strip_prefix("due=") {
            draft.due_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        } else if let Some(priority) = word.strip_prefix("prio=") {
            draft.priority = Priority::from_str(priority);
        } else {
            text_words.push(word);
        }
    }
    draft.text = text_words.join(" ");
    draft
}

fn parse_set(rest: &str) -> Option<Intent> {
    let (field, value) = rest.split_once(char::is_whitespace)?;
    let value = value.trim();
    match field {
        "priority" | "prio" => Some(Intent::SetPriority(Priority::from_str(value))),
        "due" => Some(Intent::SetDue(
            NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?,
        )),
        "notes" => Some(Intent::SetNotes(value.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_commands() {
        assert_eq!(
            Intent::parse("signin a@example.com hunter2"),
            Some(Intent::SignIn {
                email: "a@example.com".to_string(),
                password: "hunter2".to_string(),
            })
        );
        assert_eq!(Intent::parse("logout"), Some(Intent::SignOut));
        // missing password
        assert_eq!(Intent::parse("signin a@example.com"), None);
    }

    #[test]
    fn test_parse_plain_add() {
        let Some(Intent::Add(draft)) = Intent::parse("add Buy milk") else {
            panic!("expected Add");
        };
        assert_eq!(draft.text, "Buy milk");
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.due_date, None);
        assert_eq!(draft.notes, "");
    }

    #[test]
    fn test_parse_add_with_options() {
        let Some(Intent::Add(draft)) =
            Intent::parse("add Pay rent due=2024-06-30 prio=high notes=transfer before noon")
        else {
            panic!("expected Add");
        };
        assert_eq!(draft.text, "Pay rent");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(draft.notes, "transfer before noon");
    }

    #[test]
    fn test_parse_positional_commands() {
        assert_eq!(Intent::parse("toggle 3"), Some(Intent::Toggle(3)));
        assert_eq!(Intent::parse("del 1"), Some(Intent::Delete(1)));
        assert_eq!(Intent::parse("open 2"), Some(Intent::Open(2)));
        assert_eq!(Intent::parse("toggle x"), None);
    }

    #[test]
    fn test_parse_set_and_filter() {
        assert_eq!(Intent::parse("set priority high"), Some(Intent::SetPriority(Priority::High)));
        assert_eq!(
            Intent::parse("set due 2024-06-11"),
            Some(Intent::SetDue(NaiveDate::from_ymd_opt(2024, 6, 11).unwrap()))
        );
        assert_eq!(Intent::parse("set due soon"), None);
        assert_eq!(
            Intent::parse("set notes ring the landlord"),
            Some(Intent::SetNotes("ring the landlord".to_string()))
        );
        assert_eq!(Intent::parse("filter active"), Some(Intent::Filter(Filter::Active)));
        assert_eq!(Intent::parse("filter nonsense"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Intent::parse("frobnicate"), None);
        assert_eq!(Intent::parse(""), None);
    }
}
