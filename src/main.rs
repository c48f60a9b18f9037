use chrono::{Duration, Utc};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use theraflow::domain::patient::{NewPatient, PatientPatch, PatientStatus};
use theraflow::domain::session_note::{NewSessionNote, NoteFilter, NoteTemplate};
use theraflow::{AppConfig, Practice};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,theraflow=debug"))
        )
        .init();

    tracing::info!("🚀 Starting TheraFlow practice demo");

    let config = AppConfig::from_env()?;
    tracing::info!(
        latency_min_ms = config.latency_min_ms,
        latency_max_ms = config.latency_max_ms,
        fixture_dir = ?config.fixture_dir,
        "Configuration loaded"
    );

    let practice = Practice::from_config(&config)?;
    tracing::info!(
        "📊 Metrics registry created with {} metrics",
        practice.metrics().registry().gather().len()
    );

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    tracing::info!("📝 Demonstrating a session lifecycle");

    let mut draft = NewPatient::named("Ada", "Lovelace");
    draft.notes = Some("Première consultation".to_string());
    let patient = practice.patients().create(draft).await?;
    tracing::info!("✅ Patient created: {} ({})", patient.full_name(), patient.id);

    let start = Utc::now() + Duration::hours(2);
    let draft = practice.appointment_draft(patient.id, start).await;
    let appointment = practice.appointments().create(draft).await?;
    tracing::info!("✅ Appointment scheduled: {} at {}", appointment.id, appointment.date);

    let reminded = practice.send_reminders(Utc::now()).await?;
    tracing::info!("🔔 {} reminder(s) sent", reminded.len());

    let today = start.date_naive();
    let dashboard = practice.dashboard(today).await;
    tracing::info!(
        scheduled = dashboard.todays_appointments.len(),
        active_patients = dashboard.active_patients,
        revenue = dashboard.revenue,
        "Dashboard before the session"
    );

    practice.complete_appointment(appointment.id).await?;

    let note = practice
        .session_notes()
        .create(
            NewSessionNote::new(patient.id, "Bonne réceptivité, travail sur la respiration.")
                .for_appointment(appointment.id)
                .with_template(NoteTemplate::Sophrologie),
        )
        .await?;
    tracing::info!("✅ Session note written: {}", note.id);

    let dashboard = practice.dashboard(today).await;
    tracing::info!(
        completed_today = dashboard.completed_today,
        revenue = dashboard.revenue,
        "Dashboard after the session"
    );

    let week = practice.agenda_week(today).await;
    for day in &week.days {
        for entry in &day.entries {
            tracing::info!(
                "📅 {} {}-{} {} ({})",
                day.date,
                entry.appointment.date.format("%H:%M"),
                entry.appointment.ends_at().format("%H:%M"),
                entry.patient_name,
                entry.appointment.status.as_str()
            );
        }
    }

    let feed = practice.note_feed(&NoteFilter::for_patient(patient.id)).await;
    tracing::info!("🗒️ {} note(s) for {}", feed.len(), patient.full_name());

    practice
        .patients()
        .update(patient.id, PatientPatch::status(PatientStatus::Archived))
        .await?;
    tracing::info!("✅ Patient archived: {}", patient.id);

    if let Err(err) = practice.appointments().delete(9_999).await {
        tracing::warn!("Expected failure: {}", err);
    }

    tracing::info!("🎉 Demo complete!");

    println!("{}", practice.metrics().render_text()?);

    Ok(())
}
