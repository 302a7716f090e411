use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Itinerary document
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Fields the model adds beyond the known shape are carried in `extra`
// so a parse → enrich → serialize pass does not drop them.

/// A full multi-day plan as produced by the itinerary pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub days: Vec<DayPlan>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based position of the day within the trip.
    pub day: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub time: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Day and activity counts of a document, used to compare a document
/// before and after an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryShape {
    pub days: usize,
    pub activities_per_day: Vec<usize>,
}

impl ItineraryShape {
    pub fn total_activities(&self) -> usize {
        self.activities_per_day.iter().sum()
    }
}

impl ItineraryDocument {
    pub fn from_value(value: &Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_value(&self) -> crate::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn shape(&self) -> ItineraryShape {
        ItineraryShape {
            days: self.days.len(),
            activities_per_day: self.days.iter().map(|d| d.activities.len()).collect(),
        }
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    /// True when day indices read 1, 2, ..., n in document order.
    pub fn has_contiguous_days(&self) -> bool {
        self.days
            .iter()
            .enumerate()
            .all(|(i, d)| d.day as usize == i + 1)
    }

    /// Iterate all activities mutably, paired with their (day, slot) position.
    pub fn activities_mut(&mut self) -> impl Iterator<Item = ((usize, usize), &mut Activity)> {
        self.days.iter_mut().enumerate().flat_map(|(di, day)| {
            day.activities
                .iter_mut()
                .enumerate()
                .map(move |(ai, act)| ((di, ai), act))
        })
    }

    /// Mutable access to one activity by its (day, slot) position.
    pub fn activity_at_mut(&mut self, pos: (usize, usize)) -> Option<&mut Activity> {
        self.days.get_mut(pos.0)?.activities.get_mut(pos.1)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "title": "Kyoto in Three Days",
            "overview": "Temples, tea, gardens",
            "days": [
                {"day": 1, "title": "East", "narrative": "Gion walk", "activities": [
                    {"time": "9:00 AM", "name": "Kiyomizu-dera", "location": "Higashiyama",
                     "category": "attraction", "notes": "Go early"},
                    {"time": "12:30 PM", "name": "Lunch", "location": "Gion",
                     "category": "meal", "meal_type": "lunch", "notes": "Soba"}
                ]},
                {"day": 2, "title": "West", "narrative": "Bamboo", "activities": [
                    {"time": "8:00 AM", "name": "Arashiyama", "location": "Ukyo",
                     "category": "nature", "notes": "", "tags": ["photo"]}
                ]}
            ],
            "budget": "moderate"
        })
    }

    #[test]
    fn parses_and_counts() {
        let doc = ItineraryDocument::from_value(&sample()).unwrap();
        assert_eq!(doc.days.len(), 2);
        assert_eq!(doc.activity_count(), 3);
        assert!(doc.has_contiguous_days());
        assert_eq!(doc.shape().activities_per_day, vec![2, 1]);
        assert_eq!(doc.days[0].activities[1].meal_type.as_deref(), Some("lunch"));
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let doc = ItineraryDocument::from_value(&sample()).unwrap();
        let back = doc.to_value().unwrap();
        assert_eq!(back["budget"], "moderate");
        assert_eq!(back["days"][1]["activities"][0]["tags"][0], "photo");
        assert!(back["days"][0]["activities"][0].get("image").is_none());
    }

    #[test]
    fn gap_in_days_is_detected() {
        let mut doc = ItineraryDocument::from_value(&sample()).unwrap();
        doc.days[1].day = 3;
        assert!(!doc.has_contiguous_days());
    }

    #[test]
    fn activity_positions_are_stable() {
        let mut doc = ItineraryDocument::from_value(&sample()).unwrap();
        let positions: Vec<(usize, usize)> = doc.activities_mut().map(|(p, _)| p).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0)]);

        doc.activity_at_mut((1, 0)).unwrap().image = Some("https://img/x.jpg".into());
        assert_eq!(doc.days[1].activities[0].image.as_deref(), Some("https://img/x.jpg"));
        assert!(doc.activity_at_mut((5, 0)).is_none());
    }
}
