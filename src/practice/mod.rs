use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::domain::appointment::{
    Appointment, AppointmentStatus, AppointmentStore, NewAppointment,
};
use crate::domain::patient::PatientStore;
use crate::domain::session_note::{NoteFilter, SessionNoteStore};
use crate::fixtures::FixtureSet;
use crate::metrics::Metrics;
use crate::store::{Latency, RecordId, StoreResult};

pub mod settings;
pub mod views;

pub use settings::*;
pub use views::*;

// ============================================================================
// Practice - composition root
// ============================================================================
//
// Owns for one session:
// - One store per record type, seeded from a private copy of the fixtures
// - The practice settings
// - The metrics registry shared by the stores
//
// Views load the stores they need concurrently and join in memory.
// There are no cross-store transactions.
//
// ============================================================================

#[derive(Clone)]
pub struct Practice {
    patients: PatientStore,
    appointments: AppointmentStore,
    session_notes: SessionNoteStore,
    settings: Arc<RwLock<PracticeSettings>>,
    metrics: Arc<Metrics>,
}

impl Practice {
    pub fn new(fixtures: &FixtureSet, latency: Latency, metrics: Arc<Metrics>) -> Self {
        let practice = Self {
            patients: PatientStore::with_metrics(
                fixtures.patients.clone(),
                latency.clone(),
                metrics.clone(),
            ),
            appointments: AppointmentStore::with_metrics(
                fixtures.appointments.clone(),
                latency.clone(),
                metrics.clone(),
            ),
            session_notes: SessionNoteStore::with_metrics(
                fixtures.session_notes.clone(),
                latency.clone(),
                metrics.clone(),
            ),
            settings: Arc::new(RwLock::new(PracticeSettings::default())),
            metrics,
        };

        tracing::info!(?latency, "🏥 Practice initialized");
        practice
    }

    /// Load the configured fixtures and build a practice with its own registry
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let fixtures = match &config.fixture_dir {
            Some(dir) => FixtureSet::from_dir(dir)?,
            None => FixtureSet::bundled()?,
        };
        let metrics = Arc::new(Metrics::new()?);

        Ok(Self::new(&fixtures, config.latency(), metrics))
    }

    pub fn patients(&self) -> &PatientStore {
        &self.patients
    }

    pub fn appointments(&self) -> &AppointmentStore {
        &self.appointments
    }

    pub fn session_notes(&self) -> &SessionNoteStore {
        &self.session_notes
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub async fn settings(&self) -> PracticeSettings {
        self.settings.read().await.clone()
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> PracticeSettings {
        let mut settings = self.settings.write().await;
        settings.apply_patch(patch);

        tracing::info!("⚙️ Practice settings updated");
        settings.clone()
    }

    async fn session_price(&self) -> u32 {
        self.settings.read().await.business.session_price
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub async fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        let (patients, appointments) =
            tokio::join!(self.patients.get_all(), self.appointments.get_all());
        let price = self.session_price().await;

        let summary = build_dashboard(&patients, &appointments, today, price);
        tracing::debug!(
            %today,
            scheduled = summary.todays_appointments.len(),
            completed = summary.completed_today,
            "Dashboard computed"
        );
        summary
    }

    /// `None` when the patient does not exist
    pub async fn patient_overview(&self, id: RecordId) -> Option<PatientOverview> {
        let (patient, appointments, notes) = tokio::join!(
            self.patients.get_by_id(id),
            self.appointments.get_all(),
            self.session_notes.get_all()
        );
        let price = self.session_price().await;

        patient.map(|patient| build_overview(patient, &appointments, &notes, price))
    }

    pub async fn agenda_week(&self, day: NaiveDate) -> WeekAgenda {
        let (patients, appointments) =
            tokio::join!(self.patients.get_all(), self.appointments.get_all());
        let price = self.session_price().await;

        build_week(&patients, &appointments, day, price)
    }

    pub async fn note_feed(&self, filter: &NoteFilter) -> Vec<NoteEntry> {
        let (notes, patients, appointments) = tokio::join!(
            self.session_notes.get_all(),
            self.patients.get_all(),
            self.appointments.get_all()
        );

        build_note_feed(&notes, &patients, &appointments, filter)
    }

    // ========================================================================
    // Appointment transitions
    // ========================================================================

    pub async fn complete_appointment(&self, id: RecordId) -> StoreResult<Appointment> {
        let appointment = self.appointments.complete(id).await?;
        tracing::info!(id, patient_id = appointment.patient_id, "✅ Session completed");
        Ok(appointment)
    }

    pub async fn cancel_appointment(&self, id: RecordId) -> StoreResult<Appointment> {
        let appointment = self.appointments.cancel(id).await?;
        tracing::info!(id, patient_id = appointment.patient_id, "❌ Session cancelled");
        Ok(appointment)
    }

    /// Mark every scheduled appointment starting within the reminder lead
    /// time as reminded. Nothing is sent when both channels are off.
    pub async fn send_reminders(&self, now: DateTime<Utc>) -> StoreResult<Vec<Appointment>> {
        let notifications = self.settings.read().await.notifications.clone();
        if !notifications.email_reminders && !notifications.sms_reminders {
            return Ok(Vec::new());
        }

        let horizon = now + chrono::Duration::hours(i64::from(notifications.reminder_time));
        let due: Vec<RecordId> = self
            .appointments
            .get_all()
            .await
            .into_iter()
            .filter(|appointment| {
                appointment.status == AppointmentStatus::Scheduled
                    && !appointment.reminder_sent
                    && appointment.date >= now
                    && appointment.date <= horizon
            })
            .map(|appointment| appointment.id)
            .collect();

        let mut reminded = Vec::with_capacity(due.len());
        for id in due {
            let appointment = self.appointments.mark_reminder_sent(id).await?;
            tracing::info!(id, patient_id = appointment.patient_id, "🔔 Reminder sent");
            reminded.push(appointment);
        }
        Ok(reminded)
    }

    /// Draft for a new appointment using the practice's session duration
    pub async fn appointment_draft(
        &self,
        patient_id: RecordId,
        date: DateTime<Utc>,
    ) -> NewAppointment {
        let mut draft = NewAppointment::new(patient_id, date);
        draft.duration = self.settings.read().await.business.session_duration;
        draft
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
