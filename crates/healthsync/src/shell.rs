// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `healthsync` without a subcommand: the interactive shell.
//!
//! The shell is the triage chat with slash commands layered on top. It
//! keeps running across a forced logout: a rejected token prints the
//! expiry notice once and drops the user back at the login prompt.

use colored::Colorize;
use healthsync_chat::ChatPane;
use healthsync_core::{ChatMessage, HealthSyncError, Sender};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::portal::Portal;
use crate::{appointments, auth, booking, dashboard, records};

const SHELL_HELP: &str = "\
Anything you type is sent to the triage assistant. Commands:
  /new            start a fresh conversation
  /rooms          list earlier conversations
  /room <n>       show an earlier conversation
  /book           book an appointment
  /dashboard      show portal statistics
  /appointments   list your appointments
  /records        show your health records
  /note <id>      write a doctor note for a patient (doctors only)
  /logout         sign out
  /quit           exit the shell";

/// Runs the interactive shell until the user quits.
pub async fn run_shell(portal: &Portal) -> Result<(), HealthSyncError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| HealthSyncError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "healthsync shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    loop {
        if portal.gate.current().is_none() {
            if let Err(e) = auth::run_login(portal, None, None).await {
                eprintln!("{}: {e}", "error".red());
                continue;
            }
        }

        let mut pane = ChatPane::new(portal.client.clone(), portal.gate.clone());
        if let Err(e) = pane.load_history().await {
            if e.is_unauthorized() {
                portal.expire().await;
                continue;
            }
            return Err(e);
        }
        debug!(room = pane.room_number(), "chat pane opened");
        for message in pane.messages() {
            println!("{}", render_message(message));
        }

        if chat_loop(portal, &mut pane, &mut rl).await? {
            // Signed out or expired; fall through to the login prompt.
            continue;
        }
        println!("{}", "goodbye".dimmed());
        return Ok(());
    }
}

/// The signed-in REPL. Returns `true` when the session ended and the
/// shell should offer a fresh login, `false` when the user quit.
async fn chat_loop(
    portal: &Portal,
    pane: &mut ChatPane,
    rl: &mut DefaultEditor,
) -> Result<bool, HealthSyncError> {
    let prompt = format!("{}> ", "healthsync".green());
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(false),
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                return Ok(false);
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let result = match line {
            "/quit" | "/exit" => return Ok(false),
            "/logout" => {
                portal.sign_out().await?;
                println!("Signed out.");
                return Ok(true);
            }
            "/help" => {
                println!("{SHELL_HELP}");
                Ok(())
            }
            "/new" => {
                pane.new_chat();
                for message in pane.messages() {
                    println!("{}", render_message(message));
                }
                Ok(())
            }
            "/rooms" => {
                show_rooms(pane);
                Ok(())
            }
            "/dashboard" => dashboard::run_dashboard(portal).await,
            "/appointments" => appointments::run_appointments(portal).await,
            "/records" => records::run_records(portal, None).await,
            "/book" => run_book(portal, pane, rl).await,
            "/room" => Err(HealthSyncError::Validation("Usage: /room <number>".into())),
            "/note" => Err(HealthSyncError::Validation("Usage: /note <patient id>".into())),
            _ => match line.split_once(char::is_whitespace) {
                Some(("/room", n)) => show_room(pane, n.trim()),
                Some(("/note", n)) => match n.trim().parse::<i64>() {
                    Ok(patient) => records::run_note(portal, Some(patient)).await,
                    Err(_) => Err(HealthSyncError::Validation(
                        "Usage: /note <patient id>".into(),
                    )),
                },
                _ if line.starts_with('/') => Err(HealthSyncError::Validation(
                    "Unknown command. Type /help for the list.".into(),
                )),
                _ => send_message(pane, line).await,
            },
        };

        if let Err(e) = result {
            if e.is_unauthorized() {
                portal.expire().await;
                return Ok(true);
            }
            eprintln!("{}: {e}", "error".red());
        }
    }
}

/// Sends one chat message and prints the bot's side of the exchange.
async fn send_message(pane: &mut ChatPane, input: &str) -> Result<(), HealthSyncError> {
    let already_shown = pane.messages().len();
    pane.send(input).await?;

    // The user's own line is on screen already; show only what the send
    // appended beyond it.
    for message in pane.messages().iter().skip(already_shown) {
        if message.sender == Sender::Bot {
            println!("{}", render_message(message));
        }
    }
    if pane.should_offer_booking() {
        println!(
            "{}",
            "The assistant recommends seeing a doctor. Type /book to schedule an appointment."
                .yellow()
        );
    }
    Ok(())
}

/// The booking sub-flow, with the booking offer suppressed while open.
async fn run_book(
    portal: &Portal,
    pane: &mut ChatPane,
    rl: &mut DefaultEditor,
) -> Result<(), HealthSyncError> {
    pane.set_scheduling(true);
    let outcome = booking::run_booking(portal, rl).await;
    pane.set_scheduling(false);
    if outcome? {
        pane.clear_triage_advice();
    }
    Ok(())
}

fn show_rooms(pane: &ChatPane) {
    if pane.rooms().is_empty() {
        println!("No earlier conversations.");
        return;
    }
    println!("Earlier conversations:");
    for room in pane.rooms() {
        println!("  room {} ({} messages)", room.room_number, room.chats.len() * 2);
    }
}

fn show_room(pane: &ChatPane, raw: &str) -> Result<(), HealthSyncError> {
    let room: u32 = raw
        .parse()
        .map_err(|_| HealthSyncError::Validation("Usage: /room <number>".into()))?;
    match pane.room_messages(room) {
        Some(messages) => {
            println!("room {room}:");
            for message in &messages {
                println!("{}", render_message(message));
            }
            Ok(())
        }
        None => Err(HealthSyncError::Validation(format!(
            "No conversation in room {room}."
        ))),
    }
}

fn render_message(message: &ChatMessage) -> String {
    match message.sender {
        Sender::Bot => format!("{} {}", "bot:".cyan(), message.text),
        Sender::User => format!("{} {}", "you:".dimmed(), message.text),
    }
}
