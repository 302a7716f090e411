use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

use tw_domain::config::{ModelRole, PlannerConfig};
use tw_domain::travel::{HotelOption, TripForm};

use super::{with_retries, AgentError};
use crate::extract::extract_jsonl;
use crate::gateway::ModelGateway;
use crate::prompts;

#[derive(Debug, Clone, PartialEq)]
pub struct HotelQuote {
    pub name: String,
    pub location: String,
    pub price_per_night: u32,
    pub rating: f32,
}

pub struct HotelAgent {
    gateway: ModelGateway,
    config: PlannerConfig,
}

impl HotelAgent {
    pub fn new(gateway: ModelGateway, config: PlannerConfig) -> Self {
        Self { gateway, config }
    }

    /// Find one hotel at the destination for the trip dates.
    pub async fn search(&self, form: &TripForm) -> HotelOption {
        let (min, max) = (self.config.hotel_price_min, self.config.hotel_price_max);
        let prompt = prompts::hotels(&form.destination, min, max);
        tracing::info!(
            city = %form.destination,
            check_in = %form.departure_date,
            check_out = %form.arrival_date,
            price_min = min,
            price_max = max,
            "hotel search started"
        );

        let picked = with_retries("hotels", self.config.agent_max_attempts, |_| {
            let prompt = prompt.clone();
            async move {
                let text = self
                    .gateway
                    .ask(
                        ModelRole::Agents,
                        prompt,
                        true,
                        self.config.agent_thinking_budget,
                    )
                    .await?;
                let quotes = parse_quotes(&text);
                pick_hotel(&quotes, &mut rand::thread_rng()).ok_or(AgentError::NoResults)
            }
        })
        .await;

        match picked {
            Some(q) => {
                tracing::info!(hotel = %q.name, price = q.price_per_night, "hotel selected");
                HotelOption {
                    name: q.name,
                    location: q.location,
                    price: q.price_per_night,
                    check_in: form.departure_date.clone(),
                    check_out: form.arrival_date.clone(),
                    rating: q.rating,
                }
            }
            None => placeholder(form, &self.config),
        }
    }
}

fn placeholder(form: &TripForm, config: &PlannerConfig) -> HotelOption {
    let (lo, hi) = (config.hotel_price_min, config.hotel_price_max);
    HotelOption {
        name: "Grand Palace Hotel".into(),
        location: format!("City Center, {}", form.destination),
        price: ((u64::from(lo) + u64::from(hi)) / 2) as u32,
        check_in: form.departure_date.clone(),
        check_out: form.arrival_date.clone(),
        rating: 4.2,
    }
}

/// Whole currency units from `1500`, `"1500"` or `"₹1,500"`.
fn coerce_price(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u32),
        Value::String(s) => {
            let int_part = s.split('.').next().unwrap_or_default();
            let digits: String = int_part.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

fn coerce_rating(v: &Value) -> Option<f32> {
    match v {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read JSONL hotel lines; lines missing a field are dropped.
fn parse_quotes(text: &str) -> Vec<HotelQuote> {
    extract_jsonl(text)
        .iter()
        .filter_map(|line| {
            let name = line.get("name")?.as_str()?.trim().to_string();
            let location = line.get("location")?.as_str()?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(HotelQuote {
                name,
                location,
                price_per_night: coerce_price(line.get("price_per_night")?)?,
                rating: coerce_rating(line.get("rating")?)?,
            })
        })
        .collect()
}

pub fn pick_hotel<R: Rng + ?Sized>(quotes: &[HotelQuote], rng: &mut R) -> Option<HotelQuote> {
    quotes.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_string_fields() {
        assert_eq!(coerce_price(&json!("1500")), Some(1500));
        assert_eq!(coerce_price(&json!("₹1,283")), Some(1283));
        assert_eq!(coerce_price(&json!("1499.50")), Some(1499));
        assert_eq!(coerce_price(&json!(1046)), Some(1046));
        assert_eq!(coerce_price(&json!("call")), None);
        assert_eq!(coerce_rating(&json!("4.2")), Some(4.2));
        assert_eq!(coerce_rating(&json!(3.9)), Some(3.9));
    }

    #[test]
    fn parses_lines_and_skips_bad_ones() {
        let text = "Here are hotels:\n\
            {\"name\": \"Hotel Sigma Suites\", \"price_per_night\": \"1283\", \"rating\": \"4.2\", \"location\": \"Gandhi Nagar, Bangalore\"}\n\
            {\"name\": \"No Price\", \"rating\": \"4.0\", \"location\": \"X\"}\n\
            not json\n\
            {\"name\": \"Magaji Residency\", \"price_per_night\": 1046, \"rating\": 3.9, \"location\": \"Jayanagar, Bangalore\"}";
        let quotes = parse_quotes(text);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].price_per_night, 1283);
        assert_eq!(quotes[1].name, "Magaji Residency");
    }

    #[test]
    fn placeholder_price_is_range_midpoint() {
        let form = TripForm {
            destination: "Goa".into(),
            departure_date: "2025-06-24".into(),
            arrival_date: "2025-06-29".into(),
            days: 5,
            ..TripForm::default()
        };
        let p = placeholder(&form, &PlannerConfig::default());
        assert_eq!(p.name, "Grand Palace Hotel");
        assert_eq!(p.location, "City Center, Goa");
        assert_eq!(p.price, 1750);
        assert_eq!(p.check_out, "2025-06-29");
        assert_eq!(p.rating, 4.2);
    }
}
