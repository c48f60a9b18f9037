use serde::{Deserialize, Serialize};

use crate::domain::appointment::DEFAULT_SESSION_MINUTES;

// ============================================================================
// Practice Settings
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSettings {
    pub profile: PractitionerProfile,
    pub business: BusinessSettings,
    pub notifications: NotificationSettings,
    pub booking: BookingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub speciality: String,
}

impl Default for PractitionerProfile {
    fn default() -> Self {
        Self {
            name: "Dr. Marie Dubois".to_string(),
            email: "marie.dubois@theraflow.com".to_string(),
            phone: "+33 1 23 45 67 89".to_string(),
            address: "123 Rue de la Paix, 75001 Paris".to_string(),
            speciality: "Hypnothérapie & Sophrologie".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSettings {
    /// Minutes
    pub session_duration: u32,
    /// Whole currency units
    pub session_price: u32,
    pub currency: String,
    pub timezone: String,
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            session_duration: DEFAULT_SESSION_MINUTES,
            session_price: 60,
            currency: "EUR".to_string(),
            timezone: "Europe/Paris".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_reminders: bool,
    pub sms_reminders: bool,
    /// Hours before the session
    pub reminder_time: u32,
    pub email_reports: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_reminders: true,
            sms_reminders: false,
            reminder_time: 24,
            email_reports: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSettings {
    /// Days ahead a session can be booked
    pub booking_window: u32,
    /// Hours before the session a cancellation is accepted
    pub cancellation_policy: u32,
    pub auto_confirm: bool,
    pub online_booking: bool,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            booking_window: 30,
            cancellation_policy: 24,
            auto_confirm: true,
            online_booking: false,
        }
    }
}

/// Section-level update: a provided section replaces the current one
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub profile: Option<PractitionerProfile>,
    pub business: Option<BusinessSettings>,
    pub notifications: Option<NotificationSettings>,
    pub booking: Option<BookingSettings>,
}

impl PracticeSettings {
    pub fn apply_patch(&mut self, patch: SettingsPatch) {
        if let Some(profile) = patch.profile {
            self.profile = profile;
        }
        if let Some(business) = patch.business {
            self.business = business;
        }
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
        if let Some(booking) = patch.booking {
            self.booking = booking;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PracticeSettings::default();

        assert_eq!(settings.profile.name, "Dr. Marie Dubois");
        assert_eq!(settings.business.session_duration, 60);
        assert_eq!(settings.business.session_price, 60);
        assert_eq!(settings.business.currency, "EUR");
        assert!(settings.notifications.email_reminders);
        assert!(!settings.notifications.sms_reminders);
        assert_eq!(settings.booking.booking_window, 30);
        assert!(!settings.booking.online_booking);
    }

    #[test]
    fn test_patch_replaces_only_given_sections() {
        let mut settings = PracticeSettings::default();

        settings.apply_patch(SettingsPatch {
            business: Some(BusinessSettings {
                session_price: 75,
                ..BusinessSettings::default()
            }),
            ..SettingsPatch::default()
        });

        assert_eq!(settings.business.session_price, 75);
        assert_eq!(settings.profile, PractitionerProfile::default());
        assert_eq!(settings.booking, BookingSettings::default());
    }

    #[test]
    fn test_patch_from_json() {
        let patch: SettingsPatch = serde_json::from_str(
            r#"{"booking": {
                "bookingWindow": 60,
                "cancellationPolicy": 48,
                "autoConfirm": false,
                "onlineBooking": true
            }}"#,
        )
        .unwrap();

        let mut settings = PracticeSettings::default();
        settings.apply_patch(patch);

        assert_eq!(settings.booking.booking_window, 60);
        assert!(settings.booking.online_booking);
        assert!(settings.notifications.email_reminders);
    }
}
