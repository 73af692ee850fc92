// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed slot list offered for every appointment, and the 12-hour
//! clock parsing used when a selection is confirmed.

use chrono::NaiveTime;
use healthsync_core::HealthSyncError;

/// Bookable start times. Not fetched; the portal offers the same slots
/// for every doctor and day.
pub const TIME_SLOTS: [&str; 8] = [
    "10:30am", "11:30am", "02:30pm", "03:00pm", "03:30pm", "04:30pm", "05:00pm", "05:30pm",
];

/// Parses a `HH:MMam`/`HH:MMpm` slot into a clock time.
///
/// Case-insensitive. 12 AM maps to hour 0 and 12 PM stays hour 12; the
/// remaining PM hours shift by twelve.
pub fn parse_slot(slot: &str) -> Result<NaiveTime, HealthSyncError> {
    let invalid = || HealthSyncError::Validation(format!("invalid time slot: {slot}"));
    let lower = slot.trim().to_ascii_lowercase();
    let (clock, pm) = if let Some(rest) = lower.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = lower.strip_suffix("am") {
        (rest, false)
    } else {
        return Err(invalid());
    };
    let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.trim().parse().map_err(|_| invalid())?;
    let minute: u32 = minute.trim().parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hour) {
        return Err(invalid());
    }
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (hour, true) => hour + 12,
        (hour, false) => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
