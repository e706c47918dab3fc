//! Terminal View
//!
//! Renders controller state and turns input lines into intents. The loop is
//! the single thread of control: one `select!` over stdin and the session
//! watch channel, events handled one at a time.

mod intent;
mod render;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::app::AppController;
use crate::domain::TodoPatch;
use intent::Intent;

pub async fn run(mut controller: AppController) {
    render::greeting();
    // Loading indicator while the session restore is pending
    render::screen(&controller);
    controller.init().await;

    // Subscribe after init so a restored session is not applied twice
    let mut session_rx = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render::screen(&controller);

    loop {
        tokio::select! {
            changed = session_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = session_rx.borrow_and_update().clone();
                controller.apply_session(session).await;
                render::screen(&controller);
            }
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                let Some(intent) = Intent::parse(&line) else {
                    if !line.trim().is_empty() {
                        println!("Unrecognized command. Type 'help' for the list.");
                    }
                    continue;
                };
                debug!("intent: {:?}", intent);
                if dispatch(&mut controller, intent).await {
                    break;
                }
            }
        }
    }
}

/// Apply one intent. Returns true when the loop should stop.
async fn dispatch(controller: &mut AppController, intent: Intent) -> bool {
    match intent {
        Intent::SignUp { email, password } => {
            if controller.sign_up(&email, &password).await {
                println!("Signed up. You can sign in now.");
            }
        }
        Intent::SignIn { email, password } => {
            // The session change arrives through the watch channel and
            // repopulates the list from there
            controller.sign_in(&email, &password).await;
        }
        Intent::SignOut => controller.sign_out().await,
        Intent::Add(draft) => {
            if controller.create(draft).await {
                render::list(controller);
            }
        }
        Intent::Toggle(n) => {
            if let Some(id) = nth_visible(controller, n) {
                controller.toggle_completion(id).await;
                render::list(controller);
            }
        }
        Intent::Delete(n) => {
            if let Some(id) = nth_visible(controller, n) {
                controller.delete(id).await;
                render::screen(&controller);
            }
        }
        Intent::Open(n) => {
            if let Some(id) = nth_visible(controller, n) {
                controller.select(id);
                render::detail(controller);
            }
        }
        Intent::Close => controller.clear_selection(),
        Intent::SetPriority(priority) => {
            if let Some(id) = controller.selected().map(|t| t.id) {
                controller.update(id, TodoPatch::priority(priority)).await;
                render::detail(controller);
            } else {
                println!("No item open. Use 'open <n>' first.");
            }
        }
        Intent::SetDue(date) => {
            if let Some(id) = controller.selected().map(|t| t.id) {
                controller.update(id, TodoPatch::due_date(date)).await;
                render::detail(controller);
            } else {
                println!("No item open. Use 'open <n>' first.");
            }
        }
        Intent::SetNotes(notes) => {
            if let Some(id) = controller.selected().map(|t| t.id) {
                controller.update(id, TodoPatch::notes(notes)).await;
                render::detail(controller);
            } else {
                println!("No item open. Use 'open <n>' first.");
            }
        }
        Intent::Filter(filter) => {
            controller.set_filter(filter);
            render::list(controller);
        }
        Intent::List => render::screen(&controller),
        Intent::Help => render::help(),
        Intent::Quit => return true,
    }
    false
}

/// Resolve a 1-based position in the currently visible list to an id
fn nth_visible(controller: &AppController, n: usize) -> Option<uuid::Uuid> {
    let id = controller.visible().get(n.checked_sub(1)?).map(|t| t.id);
    if id.is_none() {
        println!("No item #{} in the current view.", n);
    }
    id
}
