use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde_json::Value;

use tw_domain::config::{ModelRole, PlannerConfig};
use tw_domain::travel::{FlightOption, TripForm};

use super::{with_retries, AgentError};
use crate::extract::extract_and_parse;
use crate::gateway::ModelGateway;
use crate::prompts;

/// One fare as reported by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightQuote {
    pub airline: String,
    pub price: String,
    pub departure_time: String,
    pub arrival_time: String,
}

pub struct FlightAgent {
    gateway: ModelGateway,
    config: PlannerConfig,
}

impl FlightAgent {
    pub fn new(gateway: ModelGateway, config: PlannerConfig) -> Self {
        Self { gateway, config }
    }

    /// Find one flight for the trip's outbound leg.
    pub async fn search(&self, form: &TripForm) -> FlightOption {
        let prompt = prompts::flights(
            &form.source,
            &form.destination,
            &form.departure_date,
            &self.config.default_airlines,
        );
        tracing::info!(
            source = %form.source,
            destination = %form.destination,
            date = %form.departure_date,
            "flight search started"
        );

        let picked = with_retries("flights", self.config.agent_max_attempts, |_| {
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
                let quotes = parse_quotes(&text)?;
                pick_flight(&quotes, &mut rand::thread_rng()).ok_or(AgentError::NoResults)
            }
        })
        .await;

        match picked {
            Some(q) => {
                tracing::info!(airline = %q.airline, price = %q.price, "flight selected");
                FlightOption {
                    name: q.airline,
                    location: form.source.clone(),
                    price: q.price,
                    date: form.departure_date.clone(),
                    departure_time: q.departure_time,
                    arrival_time: q.arrival_time,
                    source: form.source.clone(),
                    destination: form.destination.clone(),
                }
            }
            None => placeholder(form),
        }
    }
}

fn placeholder(form: &TripForm) -> FlightOption {
    FlightOption {
        name: "IndiGo".into(),
        location: form.source.clone(),
        price: "₹4,500".into(),
        date: form.departure_date.clone(),
        departure_time: "08:30".into(),
        arrival_time: "10:45".into(),
        source: form.source.clone(),
        destination: form.destination.clone(),
    }
}

/// Read `{airline: [{price, departure_time, arrival_time}, ..], ..}`.
/// Fares missing a field are dropped.
fn parse_quotes(text: &str) -> Result<Vec<FlightQuote>, AgentError> {
    let extraction = extract_and_parse(text, "flights");
    let Some(Value::Object(airlines)) = extraction.value else {
        return Err(AgentError::NoResults);
    };

    let mut quotes = Vec::new();
    for (airline, fares) in airlines {
        let Some(fares) = fares.as_array() else {
            continue;
        };
        for fare in fares {
            let field = |k: &str| match fare.get(k) {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            if let (Some(price), Some(dep), Some(arr)) =
                (field("price"), field("departure_time"), field("arrival_time"))
            {
                quotes.push(FlightQuote {
                    airline: airline.clone(),
                    price,
                    departure_time: dep,
                    arrival_time: arr,
                });
            }
        }
    }
    Ok(quotes)
}

/// Pick an airline uniformly among those with fares, then one of its fares.
pub fn pick_flight<R: Rng + ?Sized>(quotes: &[FlightQuote], rng: &mut R) -> Option<FlightQuote> {
    let mut airlines: Vec<&str> = quotes.iter().map(|q| q.airline.as_str()).collect();
    airlines.sort_unstable();
    airlines.dedup();
    let airline = *airlines.choose(rng)?;
    quotes
        .iter()
        .filter(|q| q.airline == airline)
        .choose(rng)
        .cloned()
}
