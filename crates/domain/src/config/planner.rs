use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Planner (pipeline + search agents)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Attempts made by the flight/hotel agents before the placeholder.
    #[serde(default = "d_3")]
    pub agent_max_attempts: u32,
    /// Thinking budget for agent searches (-1 = let the model decide).
    #[serde(default = "d_minus_1")]
    pub agent_thinking_budget: Option<i32>,
    /// Airlines searched when the request does not name any.
    #[serde(default = "d_airlines")]
    pub default_airlines: Vec<String>,
    #[serde(default = "d_1000")]
    pub hotel_price_min: u32,
    #[serde(default = "d_2500")]
    pub hotel_price_max: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            agent_max_attempts: 3,
            agent_thinking_budget: Some(-1),
            default_airlines: d_airlines(),
            hotel_price_min: 1000,
            hotel_price_max: 2500,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_3() -> u32 {
    3
}
fn d_minus_1() -> Option<i32> {
    Some(-1)
}
fn d_airlines() -> Vec<String> {
    vec!["IndiGo".into(), "Air India".into(), "Air India Express".into()]
}
fn d_1000() -> u32 {
    1000
}
fn d_2500() -> u32 {
    2500
}
