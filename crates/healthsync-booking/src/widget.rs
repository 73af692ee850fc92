// SPDX-FileCopyrightText: 2026 HealthSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The booking widget: doctor list, month grid, and slot picker.
//!
//! The widget keeps selection state only for rendering highlights. Every
//! change is forwarded on an event channel the moment it happens, and the
//! screen that opened the widget folds those events into the
//! [`BookingSelection`] it will eventually confirm.

use std::sync::Arc;

use chrono::NaiveDate;
use healthsync_api::PortalClient;
use healthsync_core::{Doctor, HealthSyncError};
use healthsync_session::SessionGate;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::calendar::MonthGrid;
use crate::slots::TIME_SLOTS;

/// One selection change, forwarded to the opening screen as it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Doctor(Doctor),
    Date(NaiveDate),
    Slot(String),
}

/// The triple a booking needs. Owned by the screen that opened the
/// widget, fed by [`SelectionEvent`]s, consumed by the confirm step.
#[derive(Debug, Clone, Default)]
pub struct BookingSelection {
    pub doctor: Option<Doctor>,
    pub date: Option<NaiveDate>,
    pub slot: Option<String>,
}

impl BookingSelection {
    /// Folds one widget event into the selection.
    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::Doctor(doctor) => self.doctor = Some(doctor),
            SelectionEvent::Date(date) => self.date = Some(date),
            SelectionEvent::Slot(slot) => self.slot = Some(slot),
        }
    }

    /// True once doctor, date, and slot are all set.
    pub fn is_complete(&self) -> bool {
        self.doctor.is_some() && self.date.is_some() && self.slot.is_some()
    }

    /// Drops all three picks, e.g. after a successful booking.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Doctor, date, and slot picking for one booking session.
///
/// Submission is not the widget's job; the screen confirms the folded
/// selection through [`AppointmentConfirmer`](crate::AppointmentConfirmer).
pub struct BookingWidget {
    client: PortalClient,
    gate: Arc<SessionGate>,
    doctors: Vec<Doctor>,
    grid: MonthGrid,
    selected_doctor: Option<usize>,
    selected_date: Option<NaiveDate>,
    selected_slot: Option<usize>,
    events: mpsc::UnboundedSender<SelectionEvent>,
}

impl BookingWidget {
    /// Creates a widget showing the month containing `today`, plus the
    /// receiving end of its selection events.
    pub fn new(
        client: PortalClient,
        gate: Arc<SessionGate>,
        today: NaiveDate,
    ) -> (Self, mpsc::UnboundedReceiver<SelectionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let widget = Self {
            client,
            gate,
            doctors: Vec::new(),
            grid: MonthGrid::containing(today),
            selected_doctor: None,
            selected_date: None,
            selected_slot: None,
            events,
        };
        (widget, receiver)
    }

    /// Fetches the doctor list once and selects the first doctor by
    /// default.
    ///
    /// A rejected token propagates so the caller can end the session.
    /// Any other failure is non-fatal: the widget logs it and renders an
    /// empty doctor list.
    pub async fn load_doctors(&mut self) -> Result<(), HealthSyncError> {
        let session = self.gate.require()?;
        match self.client.doctors(&session.token).await {
            Ok(doctors) => {
                self.doctors = doctors;
                if !self.doctors.is_empty() {
                    self.select_doctor(0);
                }
                debug!(count = self.doctors.len(), "doctor list loaded");
                Ok(())
            }
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                warn!(error = %e, "failed to fetch doctors");
                Ok(())
            }
        }
    }

    /// Highlights the doctor at `index` in the fetched list and notifies
    /// the screen. Returns the doctor, or `None` when out of range.
    pub fn select_doctor(&mut self, index: usize) -> Option<Doctor> {
        let doctor = self.doctors.get(index)?.clone();
        self.selected_doctor = Some(index);
        self.emit(SelectionEvent::Doctor(doctor.clone()));
        Some(doctor)
    }

    /// Highlights `day` in the displayed month and notifies the screen.
    /// Returns the date, or `None` when the month has no such day.
    pub fn select_date(&mut self, day: u32) -> Option<NaiveDate> {
        let date = self.grid.date_of(day)?;
        self.selected_date = Some(date);
        self.emit(SelectionEvent::Date(date));
        Some(date)
    }

    /// Highlights the slot at `index` in [`TIME_SLOTS`] and notifies the
    /// screen. Returns the slot, or `None` when out of range.
    pub fn select_slot(&mut self, index: usize) -> Option<&'static str> {
        let slot = TIME_SLOTS.get(index).copied()?;
        self.selected_slot = Some(index);
        self.emit(SelectionEvent::Slot(slot.to_string()));
        Some(slot)
    }

    /// Shows the previous month. Pure recomputation, no network call;
    /// an already-picked date survives navigation.
    pub fn previous_month(&mut self) {
        self.grid = self.grid.previous();
    }

    /// Shows the next month.
    pub fn next_month(&mut self) {
        self.grid = self.grid.next();
    }

    /// Resets all three highlights, e.g. after a successful booking.
    pub fn clear_selection(&mut self) {
        self.selected_doctor = None;
        self.selected_date = None;
        self.selected_slot = None;
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.selected_doctor.and_then(|i| self.doctors.get(i))
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_slot(&self) -> Option<&'static str> {
        self.selected_slot.and_then(|i| TIME_SLOTS.get(i).copied())
    }

    fn emit(&self, event: SelectionEvent) {
        if self.events.send(event).is_err() {
            debug!("selection receiver dropped; change kept for rendering only");
        }
    }
}
