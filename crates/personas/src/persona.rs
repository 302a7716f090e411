//! The fixed persona set and the itinerary style each one asks for.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Persona
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A travel style. The key doubles as the style template identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Nightlife,
    Family,
    Luxury,
    Backpacker,
    Cultural,
    Adventure,
    Romantic,
    Business,
    Wellness,
    Foodie,
}

/// One activity row of a style's sample day.
#[derive(Debug, Clone, Copy)]
pub struct SampleSlot {
    pub time: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub meal_type: Option<&'static str>,
}

const fn slot(time: &'static str, name: &'static str, category: &'static str) -> SampleSlot {
    SampleSlot { time, name, category, meal_type: None }
}

const fn meal(time: &'static str, name: &'static str, meal_type: &'static str) -> SampleSlot {
    SampleSlot { time, name, category: "meal", meal_type: Some(meal_type) }
}

impl Persona {
    pub const ALL: [Persona; 10] = [
        Persona::Nightlife,
        Persona::Family,
        Persona::Luxury,
        Persona::Backpacker,
        Persona::Cultural,
        Persona::Adventure,
        Persona::Romantic,
        Persona::Business,
        Persona::Wellness,
        Persona::Foodie,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Persona::Nightlife => "nightlife",
            Persona::Family => "family",
            Persona::Luxury => "luxury",
            Persona::Backpacker => "backpacker",
            Persona::Cultural => "cultural",
            Persona::Adventure => "adventure",
            Persona::Romantic => "romantic",
            Persona::Business => "business",
            Persona::Wellness => "wellness",
            Persona::Foodie => "foodie",
        }
    }

    pub fn from_key(key: &str) -> Option<Persona> {
        Persona::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Nightlife => "Nightlife Enthusiast",
            Persona::Family => "Family Traveler",
            Persona::Luxury => "Luxury Traveler",
            Persona::Backpacker => "Backpacker/Budget",
            Persona::Cultural => "Cultural Explorer",
            Persona::Adventure => "Adventure Seeker",
            Persona::Romantic => "Romantic Couple",
            Persona::Business => "Business Traveler",
            Persona::Wellness => "Wellness Retreat",
            Persona::Foodie => "Foodie",
        }
    }

    /// Text that gets embedded for the catalog.
    pub fn description(&self) -> &'static str {
        match self {
            Persona::Nightlife => "Loves bars, clubs, late-night activities, happy hours, party scenes, social drinking, nightclubs, rooftop bars, night markets, late dinners, weekend parties",
            Persona::Family => "Traveling with kids, family-friendly activities, structured schedules, early bedtime, child-safe attractions, family restaurants, parks, interactive museums, educational experiences",
            Persona::Luxury => "High-end experiences, fine dining, premium hotels, spa treatments, private tours, upscale shopping, luxury brands, exclusive access, first-class service, expensive restaurants",
            Persona::Backpacker => "Budget travel, backpacking, hostels, street food, free activities, local experiences, authentic culture, cheap eats, walking tours, social travelers, budget-friendly",
            Persona::Cultural => "Museums, historical sites, art galleries, cultural workshops, traditional cuisine, local customs, heritage sites, educational tours, historical learning, cultural immersion",
            Persona::Adventure => "Outdoor activities, hiking, extreme sports, water sports, rock climbing, adventure tours, physical challenges, nature experiences, adrenaline activities, active travel",
            Persona::Romantic => "Romantic dinners, couple activities, sunset views, intimate settings, wine tasting, scenic walks, honeymoon, anniversary, romantic getaway, candlelit dinners",
            Persona::Business => "Efficient travel, business meetings, networking, professional venues, quick meals, time-optimized, work-friendly spaces, corporate travel, business centers",
            Persona::Wellness => "Yoga, meditation, spa treatments, healthy food, mindfulness, relaxation, organic cuisine, wellness centers, mental health, stress relief, holistic healing",
            Persona::Foodie => "Food tours, cooking classes, local cuisine, street food, restaurants, culinary experiences, food markets, wine tasting, gastronomic adventures, chef experiences",
        }
    }

    /// Who the itinerary is for, as phrased in the draft prompt.
    pub fn audience(&self) -> &'static str {
        match self {
            Persona::Nightlife => "someone who enjoys nightlife and late-night activities",
            Persona::Family => "a family with structured meal times and kid-friendly activities",
            Persona::Luxury => "a luxury traveler who prefers premium experiences and relaxed pace",
            Persona::Backpacker => "a budget-conscious backpacker who loves authentic local experiences",
            Persona::Cultural => "a cultural enthusiast who wants deep, educational experiences",
            Persona::Adventure => "an adventure seeker who wants action-packed, outdoor experiences",
            Persona::Romantic => "a romantic couple seeking intimate and memorable experiences",
            Persona::Business => "a business traveler with limited time seeking efficient experiences",
            Persona::Wellness => "someone seeking wellness, relaxation, and mindful travel",
            Persona::Foodie => "a food enthusiast who wants to explore local cuisine deeply",
        }
    }

    pub fn focus(&self) -> &'static str {
        match self {
            Persona::Nightlife => "Late breakfast/brunch, happy hours, post-dinner nightlife, bars, clubs, night markets, late-night food spots",
            Persona::Family => "Family restaurants, kid-friendly attractions, regular meal schedules, early evening activities, parks, interactive museums",
            Persona::Luxury => "High-end restaurants, premium experiences, spa treatments, private tours, luxury shopping, upscale lounges",
            Persona::Backpacker => "Street food, free attractions, local markets, authentic experiences, budget bars, social spaces, walking tours",
            Persona::Cultural => "Museums, historical sites, cultural workshops, traditional cuisine, art galleries, cultural performances, educational experiences",
            Persona::Adventure => "Hiking, water sports, extreme activities, outdoor adventures, energy foods, nature experiences, physical challenges",
            Persona::Romantic => "Romantic restaurants, couple activities, sunset views, wine experiences, intimate settings, scenic walks, private experiences",
            Persona::Business => "Efficient attractions, business-friendly venues, quick meals, networking opportunities, professional settings, time-optimized visits",
            Persona::Wellness => "Yoga, meditation, healthy cuisine, spa treatments, nature experiences, slow travel, mindfulness, organic food",
            Persona::Foodie => "Food markets, cooking classes, street food, local breweries, signature restaurants, food tours, culinary workshops",
        }
    }

    /// The example day shown to the model as the rhythm to follow.
    pub fn sample_day(&self) -> &'static [SampleSlot] {
        match self {
            Persona::Nightlife => const { &[
                meal("11:00 AM", "Brunch Spot", "breakfast"),
                slot("1:00 PM", "Main Attraction", "attraction"),
                slot("4:00 PM", "Afternoon Activity", "attraction"),
                meal("6:30 PM", "Happy Hour/Drinks", "drinks"),
                meal("9:00 PM", "Dinner", "dinner"),
                slot("11:00 PM", "Night Bar/Club", "nightlife"),
            ] },
            Persona::Family => const { &[
                meal("8:00 AM", "Family Breakfast", "breakfast"),
                slot("9:30 AM", "Morning Activity", "attraction"),
                meal("12:30 PM", "Lunch Break", "lunch"),
                slot("2:00 PM", "Afternoon Activity", "attraction"),
                meal("4:00 PM", "Snack Time", "snack"),
                meal("6:30 PM", "Family Dinner", "dinner"),
                slot("8:00 PM", "Evening Walk/Light Activity", "activity"),
            ] },
            Persona::Luxury => const { &[
                meal("9:30 AM", "Gourmet Breakfast", "breakfast"),
                slot("11:00 AM", "Private Tour/Premium Attraction", "attraction"),
                meal("2:00 PM", "Fine Dining Lunch", "lunch"),
                slot("4:00 PM", "Spa/Wellness Activity", "activity"),
                meal("8:00 PM", "Upscale Dinner Experience", "dinner"),
                slot("10:00 PM", "Premium Bar/Lounge", "nightlife"),
            ] },
            Persona::Backpacker => const { &[
                meal("9:00 AM", "Local Street Food Breakfast", "breakfast"),
                slot("10:00 AM", "Free Walking Tour", "attraction"),
                meal("1:00 PM", "Market Food/Street Lunch", "lunch"),
                slot("2:30 PM", "Free Museum/Park", "attraction"),
                slot("5:00 PM", "Local Cafe/Social Hub", "activity"),
                meal("7:30 PM", "Authentic Local Dinner", "dinner"),
                slot("9:00 PM", "Local Bar/Hostel Social", "nightlife"),
            ] },
            Persona::Cultural => const { &[
                meal("8:30 AM", "Traditional Breakfast", "breakfast"),
                slot("9:30 AM", "Historical Museum/Site", "attraction"),
                meal("12:30 PM", "Cultural Restaurant", "lunch"),
                slot("2:00 PM", "Art Gallery/Cultural Center", "attraction"),
                slot("4:30 PM", "Cultural Workshop/Experience", "activity"),
                meal("7:00 PM", "Traditional Cuisine Dinner", "dinner"),
                slot("8:30 PM", "Cultural Show/Performance", "entertainment"),
            ] },
            Persona::Adventure => const { &[
                meal("6:30 AM", "Quick Energy Breakfast", "breakfast"),
                slot("7:30 AM", "Morning Hike/Outdoor Adventure", "adventure"),
                meal("11:30 AM", "Packed Lunch/Trail Food", "lunch"),
                slot("12:30 PM", "Water Sports/Extreme Activity", "adventure"),
                meal("3:30 PM", "Energy Snack/Recovery", "snack"),
                slot("4:00 PM", "Rock Climbing/Adventure Sport", "adventure"),
                meal("7:30 PM", "Hearty Dinner", "dinner"),
                slot("9:00 PM", "Campfire/Stargazing", "activity"),
            ] },
            Persona::Romantic => const { &[
                meal("9:00 AM", "Romantic Breakfast for Two", "breakfast"),
                slot("10:30 AM", "Couples Activity/Scenic Walk", "attraction"),
                meal("1:30 PM", "Intimate Lunch", "lunch"),
                slot("3:00 PM", "Couples Spa/Wine Tasting", "activity"),
                meal("5:30 PM", "Sunset Cocktails", "drinks"),
                meal("8:00 PM", "Candlelight Dinner", "dinner"),
                slot("10:00 PM", "Moonlight Walk/Night Views", "activity"),
            ] },
            Persona::Business => const { &[
                meal("7:30 AM", "Quick Business Breakfast", "breakfast"),
                slot("8:30 AM", "Major Attraction (Efficient Visit)", "attraction"),
                slot("11:00 AM", "Business District/Professional Site", "attraction"),
                meal("1:00 PM", "Business Lunch/Networking Venue", "lunch"),
                slot("2:30 PM", "Key Cultural Site (1 hour)", "attraction"),
                meal("4:00 PM", "Coffee/Work-Friendly Cafe", "drinks"),
                meal("7:00 PM", "Professional Dinner", "dinner"),
                slot("8:30 PM", "Hotel Bar/Networking", "nightlife"),
            ] },
            Persona::Wellness => const { &[
                slot("8:00 AM", "Mindful Morning/Yoga", "activity"),
                meal("9:30 AM", "Healthy Breakfast", "breakfast"),
                slot("11:00 AM", "Nature Walk/Garden Visit", "attraction"),
                meal("1:00 PM", "Fresh, Light Lunch", "lunch"),
                slot("2:30 PM", "Spa Treatment/Massage", "activity"),
                meal("4:30 PM", "Herbal Tea/Meditation", "drinks"),
                meal("7:00 PM", "Organic Dinner", "dinner"),
                slot("8:30 PM", "Sunset Meditation/Reflection", "activity"),
            ] },
            Persona::Foodie => const { &[
                meal("8:30 AM", "Local Market Breakfast Tour", "breakfast"),
                slot("10:00 AM", "Food Market Exploration", "attraction"),
                meal("11:30 AM", "Street Food Tasting", "snack"),
                slot("1:30 PM", "Traditional Cooking Class", "activity"),
                meal("3:30 PM", "Cooking Class Lunch (What You Made)", "lunch"),
                meal("5:00 PM", "Local Brewery/Wine Tasting", "drinks"),
                meal("8:00 PM", "Signature Restaurant Experience", "dinner"),
                meal("10:00 PM", "Dessert/Late Night Food Spot", "snack"),
            ] },
        }
    }

    /// The JSON skeleton the draft stage must fill in.
    pub fn skeleton(&self) -> Value {
        let activities: Vec<Value> = self
            .sample_day()
            .iter()
            .map(|s| {
                let mut a = json!({
                    "time": s.time,
                    "name": s.name,
                    "location": "....",
                    "category": s.category,
                });
                if let Some(m) = s.meal_type {
                    a["meal_type"] = json!(m);
                }
                a["notes"] = json!("....");
                a
            })
            .collect();

        json!({
            "title": "....",
            "overview": "....",
            "days": [{
                "day": 1,
                "title": "....",
                "narrative": "....",
                "activities": activities,
            }],
        })
    }

    /// Draft-stage prompt for this style.
    pub fn style_prompt(&self, days: u32, user_pref: &str) -> String {
        let skeleton =
            serde_json::to_string_pretty(&self.skeleton()).unwrap_or_else(|_| "{}".into());
        format!(
            "User likes {user_pref}, use the list above --> dont worry about the hotel bookings \
             and all, just make an itinerary based on the above lists\n\
             make a {days} Day itinerary in the following format. This is for {audience}.\n\n\
             IMPORTANT: Keep all titles, overviews, narratives, and notes as crisp one-liners \
             with minimal words (max 5-8 words).\n\n\
             {skeleton}\n\n\
             Focus on: {focus}.\n\
             No extra text just the JSON above.\n",
            audience = self.audience(),
            focus = self.focus(),
        )
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The built-in (key, description) list used to warm the catalog.
pub fn builtin_catalog() -> Vec<(Persona, String)> {
    Persona::ALL
        .iter()
        .map(|p| (*p, p.description().to_string()))
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
