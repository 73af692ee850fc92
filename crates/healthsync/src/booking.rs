// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The interactive booking screen: doctor list, month grid, slot picker.

use chrono::Utc;
use colored::Colorize;
use healthsync_booking::{
    APPOINTMENT_CREATED_MESSAGE, AppointmentConfirmer, BookingSelection, BookingWidget,
    TIME_SLOTS, day_month_year, failure_text,
};
use healthsync_core::HealthSyncError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::portal::Portal;

const BOOKING_HELP: &str = "\
booking commands:
  doctor <n>   pick a doctor from the list
  day <n>      pick a day in the displayed month
  slot <n>     pick a time slot
  next, prev   change the displayed month
  confirm      book the selected doctor, date, and time
  cancel       leave without booking";

/// Runs the booking screen until the user confirms or cancels.
///
/// Returns `true` when an appointment was created. A rejected token
/// propagates so the caller can end the session.
pub async fn run_booking(portal: &Portal, rl: &mut DefaultEditor) -> Result<bool, HealthSyncError> {
    let (mut widget, mut events) = BookingWidget::new(
        portal.client.clone(),
        portal.gate.clone(),
        Utc::now().date_naive(),
    );
    widget.load_doctors().await?;
    let confirmer = AppointmentConfirmer::new(
        portal.client.clone(),
        portal.gate.clone(),
        portal.config.appointment.telemedicine_url.clone(),
    );
    let mut selection = BookingSelection::default();

    println!("{}", render_widget(&widget));
    println!("{BOOKING_HELP}");

    loop {
        let line = match rl.readline("book> ") {
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

        while let Ok(event) = events.try_recv() {
            selection.apply(event);
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, Some(argument.trim())),
            None => (line, None),
        };
        match (command, argument) {
            ("doctor", Some(n)) => match parse_index(n) {
                Some(index) if widget.select_doctor(index).is_some() => {
                    println!("{}", render_widget(&widget));
                }
                _ => eprintln!("{}", "No such doctor. Pick a number from the list.".red()),
            },
            ("day", Some(n)) => match n.parse::<u32>().ok().and_then(|d| widget.select_date(d)) {
                Some(date) => {
                    println!("Selected {}.", day_month_year(date));
                }
                None => eprintln!("{}", "That day is not in the displayed month.".red()),
            },
            ("slot", Some(n)) => match parse_index(n).and_then(|i| widget.select_slot(i)) {
                Some(slot) => println!("Selected {slot}."),
                None => eprintln!("{}", "No such slot. Pick a number from the list.".red()),
            },
            ("next", None) => {
                widget.next_month();
                println!("{}", widget.grid());
            }
            ("prev", None) => {
                widget.previous_month();
                println!("{}", widget.grid());
            }
            ("confirm", None) => {
                while let Ok(event) = events.try_recv() {
                    selection.apply(event);
                }
                match confirmer.confirm(&selection).await {
                    Ok(()) => {
                        println!("{}", APPOINTMENT_CREATED_MESSAGE.green());
                        widget.clear_selection();
                        selection.clear();
                        return Ok(true);
                    }
                    Err(e) if e.is_unauthorized() => return Err(e),
                    // The widget stays open with the picks intact so the
                    // user can adjust and retry.
                    Err(e) => eprintln!("{}", failure_text(&e).red()),
                }
            }
            ("cancel", None) | ("quit", None) | ("exit", None) => return Ok(false),
            ("help", None) => println!("{BOOKING_HELP}"),
            _ => eprintln!("{}", "Unknown booking command. Type help for the list.".red()),
        }
    }
}

/// One-based list index from user input.
fn parse_index(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

/// The full booking screen: doctors, the month grid, and the slot list,
/// with `>` marking the current picks.
fn render_widget(widget: &BookingWidget) -> String {
    let mut out = String::from("Doctors:\n");
    if widget.doctors().is_empty() {
        out.push_str("  (no doctors available)\n");
    }
    for (i, doctor) in widget.doctors().iter().enumerate() {
        let marker = if widget.selected_doctor().map(|d| d.id) == Some(doctor.id) {
            '>'
        } else {
            ' '
        };
        out.push_str(&format!(
            "{marker} {}. {} ({}, {} yrs)\n",
            i + 1,
            doctor.full_name(),
            doctor.specialization,
            doctor.years_experience
        ));
    }
    out.push_str(&format!("\n{}\n\nSlots:\n", widget.grid()));
    for (i, slot) in TIME_SLOTS.iter().enumerate() {
        let marker = if widget.selected_slot() == Some(*slot) {
            '>'
        } else {
            ' '
        };
        out.push_str(&format!("{marker} {}. {slot}\n", i + 1));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use healthsync_api::PortalClient;
    use healthsync_session::SessionGate;

    #[test]
    fn parse_index_is_one_based() {
        assert_eq!(parse_index("1"), Some(0));
        assert_eq!(parse_index("8"), Some(7));
        assert_eq!(parse_index("0"), None);
        assert_eq!(parse_index("x"), None);
    }

    #[tokio::test]
    async fn empty_widget_renders_a_placeholder_doctor_list() {
        let client = PortalClient::new("http://localhost:1", 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 19).unwrap();
        let (widget, _rx) = BookingWidget::new(client, Arc::new(SessionGate::new()), today);

        let screen = render_widget(&widget);
        assert!(screen.contains("(no doctors available)"));
        assert!(screen.contains("March 2025"));
        assert!(screen.contains("8. 05:30pm"));
    }
}
