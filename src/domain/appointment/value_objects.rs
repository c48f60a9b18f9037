use serde::{Deserialize, Serialize};

// ============================================================================
// Appointment Value Objects
// ============================================================================

/// Session length used when none is given, in minutes
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

/// Payment collected for a session. `amount` is in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub amount: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub paid: bool,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appointment_status_wire_names() {
        for (status, wire) in [
            (AppointmentStatus::Scheduled, "\"scheduled\""),
            (AppointmentStatus::Completed, "\"completed\""),
            (AppointmentStatus::Cancelled, "\"cancelled\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            assert_eq!(serde_json::from_str::<AppointmentStatus>(wire).unwrap(), status);
        }
    }

    #[test]
    fn test_payment_minimal_json() {
        let payment: Payment = serde_json::from_str(r#"{"amount": 70}"#).unwrap();
        assert_eq!(payment.amount, 70);
        assert_eq!(payment.method, None);
        assert!(!payment.paid);
    }
}
