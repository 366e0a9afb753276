//! Health advice and notification policy for PM2.5 exposure.

use serde::{Deserialize, Serialize};

const GOOD_MAX: f64 = 25.0;
const MODERATE_MAX: f64 = 37.0;
const SENSITIVE_MAX: f64 = 50.0;
const NOTIFY_HAZARDOUS_ABOVE: f64 = 90.0;

/// Self-declared conditions from a user's health profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCondition {
    Asthma,
    Copd,
    Heart,
    Diabetes,
    Allergy,
    /// 65 years or older
    Elderly,
    /// Under 5 years
    Children,
    Pregnant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirQualityLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Hazardous,
}

impl AirQualityLevel {
    pub fn from_pm25(pm25: f64) -> Self {
        if pm25 <= GOOD_MAX {
            AirQualityLevel::Good
        } else if pm25 <= MODERATE_MAX {
            AirQualityLevel::Moderate
        } else if pm25 <= SENSITIVE_MAX {
            AirQualityLevel::UnhealthyForSensitive
        } else {
            AirQualityLevel::Hazardous
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AirQualityLevel::Good => "Good air quality",
            AirQualityLevel::Moderate => "Moderate air quality",
            AirQualityLevel::UnhealthyForSensitive => "Unhealthy for sensitive groups",
            AirQualityLevel::Hazardous => "Hazardous! Avoid going outside",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            AirQualityLevel::Good => &[
                "Outdoor activities are fine as usual",
                "Good conditions for exercise",
                "No mask needed",
            ],
            AirQualityLevel::Moderate => &[
                "People with health conditions should reduce outdoor activity",
                "Watch for unusual symptoms",
                "Consider a mask for long periods outside",
            ],
            AirQualityLevel::UnhealthyForSensitive => &[
                "Sensitive groups should avoid outdoor activity",
                "Wear an N95 mask when leaving home",
                "Keep windows closed and run an air purifier indoors",
                "Drink enough water",
            ],
            AirQualityLevel::Hazardous => &[
                "Stay indoors with all windows and doors closed",
                "Run an air purifier continuously",
                "Wear an N95 mask if you must go outside",
                "See a doctor immediately if breathing becomes difficult",
                "Drink warm water frequently",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAdvice {
    pub pm25: f64,
    pub level: AirQualityLevel,
    pub title: String,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive_group_warning: Option<String>,
}

/// Build advice for a PM2.5 value and the user's declared conditions.
pub fn advise(pm25: f64, conditions: &[HealthCondition]) -> HealthAdvice {
    let level = AirQualityLevel::from_pm25(pm25);
    let sensitive_group_warning = (!conditions.is_empty() && pm25 > MODERATE_MAX).then(|| {
        "You are in a sensitive group. Take extra care and follow the recommendations strictly."
            .to_string()
    });

    HealthAdvice {
        pm25,
        level,
        title: level.title().to_string(),
        recommendations: level
            .recommendations()
            .iter()
            .map(|item| item.to_string())
            .collect(),
        sensitive_group_warning,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSeverity {
    High,
    Hazardous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: NotificationSeverity,
}

/// Decide whether a high-PM2.5 notification should be raised.
///
/// Delivery is left to the client; this only produces the content.
pub fn notification_for(pm25: f64, location: &str, has_conditions: bool) -> Option<Notification> {
    if pm25 <= MODERATE_MAX {
        return None;
    }

    let (severity, title) = if pm25 > NOTIFY_HAZARDOUS_ABOVE {
        (NotificationSeverity::Hazardous, "Warning! PM2.5 is at a hazardous level")
    } else {
        (NotificationSeverity::High, "Alert: high PM2.5")
    };

    let mut body = format!("PM2.5 in {} is {} µg/m³", location, pm25);
    if has_conditions {
        body.push_str("\nYou have a health condition, please take extra care");
    }

    Some(Notification {
        title: title.to_string(),
        body,
        severity,
    })
}
