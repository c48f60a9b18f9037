use chrono::NaiveDate;

use crate::domain::appointment::{
    for_patient, in_week, on_day, revenue, summarize, week_of, Appointment, AppointmentStatus,
    WeekSummary,
};
use crate::domain::patient::{count_by_status, patient_display_name, Patient};
use crate::domain::session_note::{filter_notes, NoteFilter, SessionNote};

// ============================================================================
// Practice Views - joins of already loaded records
// ============================================================================
//
// Pure functions: the `Practice` loads the stores, these assemble the
// result. Dangling patient references render as "Patient inconnu".
//
// ============================================================================

/// An appointment with the name of the patient it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEntry {
    pub appointment: Appointment,
    pub patient_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    /// Scheduled for `date`, earliest first
    pub todays_appointments: Vec<AgendaEntry>,
    pub completed_today: usize,
    pub active_patients: usize,
    /// All completed sessions
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientOverview {
    pub patient: Patient,
    pub appointments: Vec<Appointment>,
    /// Newest first
    pub session_notes: Vec<SessionNote>,
    pub completed_sessions: usize,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub entries: Vec<AgendaEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekAgenda {
    /// Monday to Sunday
    pub days: Vec<AgendaDay>,
    pub summary: WeekSummary,
    pub estimated_revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub note: SessionNote,
    pub patient_name: String,
    pub appointment: Option<Appointment>,
}

fn agenda_entries(patients: &[Patient], appointments: Vec<Appointment>) -> Vec<AgendaEntry> {
    appointments
        .into_iter()
        .map(|appointment| AgendaEntry {
            patient_name: patient_display_name(patients, appointment.patient_id),
            appointment,
        })
        .collect()
}

pub fn build_dashboard(
    patients: &[Patient],
    appointments: &[Appointment],
    today: NaiveDate,
    session_price: u32,
) -> DashboardSummary {
    let todays = on_day(appointments, today);

    let completed_today = todays
        .iter()
        .filter(|appointment| appointment.status == AppointmentStatus::Completed)
        .count();
    let scheduled: Vec<Appointment> = todays
        .into_iter()
        .filter(|appointment| appointment.status == AppointmentStatus::Scheduled)
        .collect();

    DashboardSummary {
        date: today,
        todays_appointments: agenda_entries(patients, scheduled),
        completed_today,
        active_patients: count_by_status(patients).active,
        revenue: revenue(appointments, session_price),
    }
}

pub fn build_overview(
    patient: Patient,
    appointments: &[Appointment],
    notes: &[SessionNote],
    session_price: u32,
) -> PatientOverview {
    let appointments = for_patient(appointments, patient.id);
    let session_notes = filter_notes(
        notes,
        std::slice::from_ref(&patient),
        &NoteFilter::for_patient(patient.id),
    );
    let completed_sessions = appointments
        .iter()
        .filter(|appointment| appointment.status == AppointmentStatus::Completed)
        .count();
    let revenue = revenue(&appointments, session_price);

    PatientOverview {
        patient,
        appointments,
        session_notes,
        completed_sessions,
        revenue,
    }
}

pub fn build_week(
    patients: &[Patient],
    appointments: &[Appointment],
    day: NaiveDate,
    session_price: u32,
) -> WeekAgenda {
    let days = week_of(day)
        .into_iter()
        .map(|date| AgendaDay {
            date,
            entries: agenda_entries(patients, on_day(appointments, date)),
        })
        .collect();

    let week = in_week(appointments, day);

    WeekAgenda {
        days,
        summary: summarize(&week),
        estimated_revenue: revenue(&week, session_price),
    }
}

pub fn build_note_feed(
    notes: &[SessionNote],
    patients: &[Patient],
    appointments: &[Appointment],
    filter: &NoteFilter,
) -> Vec<NoteEntry> {
    filter_notes(notes, patients, filter)
        .into_iter()
        .map(|note| NoteEntry {
            patient_name: patient_display_name(patients, note.patient_id),
            appointment: note.appointment_id.and_then(|id| {
                appointments
                    .iter()
                    .find(|appointment| appointment.id == id)
                    .cloned()
            }),
            note,
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================
