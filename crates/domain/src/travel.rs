use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trip request
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The trip form submitted by the client. One shape feeds itinerary,
/// flight, and hotel generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripForm {
    #[serde(default)]
    pub source: String,
    pub destination: String,
    #[serde(rename = "departureDate", default)]
    pub departure_date: String,
    #[serde(rename = "arrivalDate", default)]
    pub arrival_date: String,
    pub days: u32,
    #[serde(default)]
    pub trip_theme: String,
    #[serde(default)]
    pub user_mood: String,
    #[serde(default)]
    pub vibe_keywords: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
    #[serde(default)]
    pub been_here_before: bool,
}

impl TripForm {
    /// Free-text preference line used both for persona matching and as
    /// the `user_pref` slot of the draft prompt.
    pub fn preference_text(&self) -> String {
        format!(
            "Trip theme: {}. User mood: {}. Preferred activities: {}. Avoid: {}",
            self.trip_theme,
            self.user_mood,
            self.activities.join(", "),
            self.avoid.join(", "),
        )
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Search results
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One flight picked by the flight agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOption {
    /// Airline name.
    pub name: String,
    pub location: String,
    /// Display price including currency symbol, e.g. `"₹4,500"`.
    pub price: String,
    pub date: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub source: String,
    pub destination: String,
}

/// One hotel picked by the hotel agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOption {
    pub name: String,
    pub location: String,
    /// Price per night in whole currency units.
    pub price: u32,
    pub check_in: String,
    pub check_out: String,
    pub rating: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_text_joins_lists() {
        let form = TripForm {
            destination: "Goa".into(),
            days: 2,
            trip_theme: "beach".into(),
            user_mood: "relaxed".into(),
            activities: vec!["surfing".into(), "seafood".into()],
            avoid: vec!["crowds".into()],
            ..Default::default()
        };
        assert_eq!(
            form.preference_text(),
            "Trip theme: beach. User mood: relaxed. Preferred activities: surfing, seafood. Avoid: crowds"
        );
    }

    #[test]
    fn trip_form_reads_camel_case_dates() {
        let form: TripForm = serde_json::from_str(
            r#"{"source":"Bangalore","destination":"Vizag","departureDate":"27 June 2025",
                "arrivalDate":"30 June 2025","days":3}"#,
        )
        .unwrap();
        assert_eq!(form.departure_date, "27 June 2025");
        assert_eq!(form.arrival_date, "30 June 2025");
        assert!(form.activities.is_empty());
    }

    #[test]
    fn flight_serializes_camel_case() {
        let flight = FlightOption {
            name: "IndiGo".into(),
            location: "Bangalore".into(),
            price: "₹4,500".into(),
            date: "27 June 2025".into(),
            departure_time: "08:30".into(),
            arrival_time: "10:45".into(),
            source: "Bangalore".into(),
            destination: "Vizag".into(),
        };
        let v = serde_json::to_value(&flight).unwrap();
        assert_eq!(v["departureTime"], "08:30");
        assert_eq!(v["arrivalTime"], "10:45");
    }
}
