// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Appointment booking for the HealthSync portal client.
//!
//! [`BookingWidget`] drives the pick-a-doctor/date/slot flow and streams
//! selection changes to the opening screen; [`AppointmentConfirmer`]
//! turns the folded [`BookingSelection`] into the single booking call.

pub mod calendar;
pub mod confirm;
pub mod slots;
pub mod widget;

pub use calendar::{MonthGrid, WEEKDAY_HEADERS, day_month_year};
pub use confirm::{
    APPOINTMENT_CREATED_MESSAGE, AppointmentConfirmer, INCOMPLETE_SELECTION_MESSAGE, failure_text,
};
pub use slots::TIME_SLOTS;
pub use widget::{BookingSelection, BookingWidget, SelectionEvent};
