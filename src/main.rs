// src/main.rs

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use agrichat::api::ApiClient;
use agrichat::config::Config;
use agrichat::constants::SUGGESTED_PROMPTS;
use agrichat::conversation::ConversationController;
use agrichat::models::{Author, ChatMessage};
use agrichat::session_store::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let api = ApiClient::new(&config.base_url);
    let store = Arc::new(SessionStore::new(api.clone()));
    let mut controller = ConversationController::new(api, Arc::clone(&store));

    if let Err(err) = store.refresh().await {
        log::warn!("initial session list fetch failed: {}", err);
    }

    println!("{}", "agrichat".bold().green());
    println!("Ask about planting times, yields, and crop suitability. Try:");
    for prompt in SUGGESTED_PROMPTS {
        println!("  {}", prompt.dimmed());
    }
    println!("Commands: :sessions  :open <n>  :new  :delete <n>  :clear  :quit\n");

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(&line)?;

        if let Some(command) = line.strip_prefix(':') {
            if !run_command(command, &store, &mut controller).await {
                break;
            }
        } else {
            let seen = controller.messages().len();
            controller.send_message(&line).await;
            // Echo only what the turn added beyond the user's own text.
            for message in &controller.messages()[seen..] {
                if message.author == Author::Assistant {
                    print_message(message);
                }
            }
        }
    }

    Ok(())
}

/// Executes one `:command`. Returns false when the loop should exit.
async fn run_command(
    command: &str,
    store: &Arc<SessionStore>,
    controller: &mut ConversationController,
) -> bool {
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit"), _) => return false,
        (Some("sessions"), _) => {
            if let Err(err) = store.refresh().await {
                log::warn!("session list refresh failed: {}", err);
            }
            let sessions = store.sessions().await;
            if sessions.is_empty() {
                println!("{}", "no sessions yet".dimmed());
            }
            for (i, session) in sessions.iter().enumerate() {
                let marker = if controller.active_session_id() == Some(session.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{} {:>3}. {}  {}", marker, i + 1, session.title, session.created_at.dimmed());
            }
        }
        (Some("open"), Some(index)) => match session_at(store, index).await {
            Some(id) => {
                controller.load_session(&id).await;
                for message in controller.messages() {
                    print_message(message);
                }
            }
            None => println!("{}", "no such session".red()),
        },
        (Some("new"), _) => {
            controller.start_new_session().await;
            println!("{}", "started a new chat".dimmed());
        }
        (Some("clear"), _) => {
            // Walk away from the current conversation without touching the
            // backend; the session itself stays listed.
            controller.clear_conversation();
            println!("{}", "conversation cleared".dimmed());
        }
        (Some("delete"), Some(index)) => match session_at(store, index).await {
            Some(id) => match store.delete_session(&id).await {
                Ok(()) => {
                    controller.handle_session_deleted(&id);
                    println!("{}", "session deleted".dimmed());
                }
                Err(err) => println!("{}", format!("delete failed: {}", err).red()),
            },
            None => println!("{}", "no such session".red()),
        },
        _ => println!(
            "{}",
            "commands: :sessions  :open <n>  :new  :delete <n>  :clear  :quit".dimmed()
        ),
    }
    true
}

/// Resolves a 1-based list index from `:sessions` to a session id.
async fn session_at(store: &Arc<SessionStore>, index: &str) -> Option<String> {
    let index: usize = index.parse().ok()?;
    let sessions = store.sessions().await;
    sessions.get(index.checked_sub(1)?).map(|s| s.id.clone())
}

fn print_message(message: &ChatMessage) {
    match message.author {
        Author::User => println!("{} {}", "you:".yellow().bold(), message.text),
        Author::Assistant => println!("{} {}", "bot:".green().bold(), message.text),
    }
}
