//! Rendering
//!
//! Plain-text rendering of the controller state. Positions shown to the
//! user are 1-based indexes into the currently visible list.

use chrono::Local;

use crate::app::AppController;
use crate::domain::TodoItem;

pub fn greeting() {
    println!("taskpad — type 'help' for commands");
}

/// Full redraw: session line, list, and detail panel when one is open
pub fn screen(controller: &AppController) {
    if controller.is_loading() {
        println!("Restoring session...");
        return;
    }
    match controller.session() {
        None => {
            println!("Not signed in. Use 'signup <email> <password>' and 'signin <email> <password>'.");
        }
        Some(session) => {
            println!("Signed in as {}", session.email);
            list(controller);
            if controller.selected().is_some() {
                detail(controller);
            }
        }
    }
}

pub fn list(controller: &AppController) {
    let items = controller.visible();
    if items.is_empty() {
        println!("No todos to show.");
        return;
    }
    println!("-- {} --", controller.filter().as_str());
    for (index, item) in items.iter().enumerate() {
        println!("{}", line(index + 1, item));
    }
}

pub fn detail(controller: &AppController) {
    let Some(item) = controller.selected() else { return };
    println!("--- {} ---", item.text);
    println!("priority: {}", item.priority.as_str());
    match item.due_date {
        Some(due) => println!("due:      {} ({})", due, due_phrase(item)),
        None => println!("due:      none"),
    }
    if !item.notes.is_empty() {
        println!("notes:    {}", item.notes);
    }
    println!("created:  {}", item.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
}

pub fn help() {
    println!("commands:");
    println!("  signup <email> <password>      create an account");
    println!("  signin <email> <password>      sign in");
    println!("  signout                        sign out");
    println!("  add <text> [due=YYYY-MM-DD] [prio=low|medium|high] [notes=...]");
    println!("  toggle <n>                     flip completion of item n");
    println!("  del <n>                        delete item n");
    println!("  open <n> / close               open or close the detail panel");
    println!("  set priority|due|notes <...>   edit the open item");
    println!("  filter all|active|completed    switch the view");
    println!("  list                           redraw");
    println!("  quit");
}

fn line(position: usize, item: &TodoItem) -> String {
    let mark = if item.completed { "x" } else { " " };
    let mut out = format!("[{}] {}. {} ({})", mark, position, item.text, item.priority.as_str());
    if let Some(due) = item.due_date {
        out.push_str(&format!("  due {} ({})", due, due_phrase(item)));
    }
    out
}

fn due_phrase(item: &TodoItem) -> String {
    let today = Local::now().date_naive();
    match item.days_until_due(today) {
        Some(0) => "due today".to_string(),
        Some(1) => "1 day left".to_string(),
        Some(days) if days > 1 => format!("{} days left", days),
        Some(days) => format!("{} days overdue", -days),
        None => String::new(),
    }
}
