use chrono::{Datelike, Duration, NaiveDate};

use super::record::Appointment;
use super::value_objects::AppointmentStatus;
use crate::store::RecordId;

// ============================================================================
// Appointment Queries - agenda and revenue over a loaded appointment list
// ============================================================================
//
// Days are compared on the UTC calendar date of `Appointment::date`.
// ============================================================================

pub fn for_patient(appointments: &[Appointment], patient_id: RecordId) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| appointment.patient_id == patient_id)
        .cloned()
        .collect()
}

/// Appointments starting on `day`, earliest first
pub fn on_day(appointments: &[Appointment], day: NaiveDate) -> Vec<Appointment> {
    let mut found: Vec<Appointment> = appointments
        .iter()
        .filter(|appointment| appointment.date.date_naive() == day)
        .cloned()
        .collect();
    found.sort_by_key(|appointment| appointment.date);
    found
}

/// The seven days (Monday first) of the week containing `day`
pub fn week_of(day: NaiveDate) -> [NaiveDate; 7] {
    let monday = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

pub fn in_week(appointments: &[Appointment], day: NaiveDate) -> Vec<Appointment> {
    let days = week_of(day);
    let (first, last) = (days[0], days[6]);

    let mut found: Vec<Appointment> = appointments
        .iter()
        .filter(|appointment| {
            let date = appointment.date.date_naive();
            date >= first && date <= last
        })
        .cloned()
        .collect();
    found.sort_by_key(|appointment| appointment.date);
    found
}

/// Per-status counts over one week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekSummary {
    pub total: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl WeekSummary {
    pub fn of(appointments: &[Appointment], day: NaiveDate) -> Self {
        summarize(&in_week(appointments, day))
    }
}

pub fn summarize(appointments: &[Appointment]) -> WeekSummary {
    appointments.iter().fold(
        WeekSummary {
            total: appointments.len(),
            ..WeekSummary::default()
        },
        |mut summary, appointment| {
            match appointment.status {
                AppointmentStatus::Scheduled => summary.scheduled += 1,
                AppointmentStatus::Completed => summary.completed += 1,
                AppointmentStatus::Cancelled => summary.cancelled += 1,
            }
            summary
        },
    )
}

/// Sum of completed sessions. A missing payment counts at `default_price`;
/// an explicit amount of zero stays zero.
pub fn revenue(appointments: &[Appointment], default_price: u32) -> u64 {
    appointments
        .iter()
        .filter(|appointment| appointment.status == AppointmentStatus::Completed)
        .map(|appointment| {
            appointment
                .payment
                .as_ref()
                .map_or(default_price, |payment| payment.amount)
        })
        .map(u64::from)
        .sum()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appointment::{NewAppointment, Payment};
    use crate::store::Resource;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn appointment(
        id: RecordId,
        patient_id: RecordId,
        date: DateTime<Utc>,
        status: AppointmentStatus,
        amount: Option<u32>,
    ) -> Appointment {
        let mut draft = NewAppointment::new(patient_id, date);
        draft.status = status;
        draft.payment = amount.map(|amount| Payment {
            amount,
            method: None,
            paid: true,
        });
        Appointment::from_draft(id, draft, Utc::now())
    }

    // 2024-06-03 is a Monday
    fn agenda() -> Vec<Appointment> {
        vec![
            appointment(1, 1, at(3, 14), AppointmentStatus::Completed, Some(80)),
            appointment(2, 2, at(3, 9), AppointmentStatus::Completed, None),
            appointment(3, 1, at(5, 10), AppointmentStatus::Scheduled, None),
            appointment(4, 3, at(9, 16), AppointmentStatus::Cancelled, Some(60)),
            appointment(5, 2, at(10, 9), AppointmentStatus::Scheduled, None),
            appointment(6, 3, at(3, 11), AppointmentStatus::Completed, Some(0)),
        ]
    }

    fn ids(appointments: &[Appointment]) -> Vec<RecordId> {
        appointments.iter().map(|a| a.id).collect()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_for_patient() {
        assert_eq!(ids(&for_patient(&agenda(), 1)), vec![1, 3]);
        assert!(for_patient(&agenda(), 42).is_empty());
    }

    #[test]
    fn test_on_day_sorted_by_start() {
        assert_eq!(ids(&on_day(&agenda(), day(3))), vec![2, 6, 1]);
        assert!(on_day(&agenda(), day(4)).is_empty());
    }

    #[test]
    fn test_week_starts_on_monday() {
        let days = week_of(day(6));
        assert_eq!(days[0], day(3));
        assert_eq!(days[6], day(9));

        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_of(day(9))[0], day(3));
    }

    #[test]
    fn test_in_week_bounds() {
        assert_eq!(ids(&in_week(&agenda(), day(5))), vec![2, 6, 1, 3, 4]);
        assert_eq!(ids(&in_week(&agenda(), day(10))), vec![5]);
    }

    #[test]
    fn test_week_summary() {
        let summary = WeekSummary::of(&agenda(), day(3));
        assert_eq!(
            summary,
            WeekSummary {
                total: 5,
                scheduled: 1,
                completed: 3,
                cancelled: 1,
            }
        );
    }

    #[test]
    fn test_revenue_uses_default_price_only_when_payment_missing() {
        // 80 + default 60 + explicit 0; the cancelled payment is ignored
        assert_eq!(revenue(&agenda(), 60), 140);
        assert_eq!(revenue(&[], 60), 0);
    }
}
