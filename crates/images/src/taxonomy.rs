//! Keyword fallback images, used when search finds nothing usable.

/// Shown when neither search nor the taxonomy has an image.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1488646953014-85cb44e25828?w=800";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCategory {
    Food,
    Transport,
    Culture,
    Nature,
    Entertainment,
    Lodging,
}

impl ImageCategory {
    /// Checked in this order; the first match wins.
    pub const ALL: [ImageCategory; 6] = [
        ImageCategory::Food,
        ImageCategory::Transport,
        ImageCategory::Lodging,
        ImageCategory::Culture,
        ImageCategory::Nature,
        ImageCategory::Entertainment,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ImageCategory::Food => &[
                "breakfast", "lunch", "dinner", "brunch", "restaurant", "cafe", "café", "breweries",
                "food", "market", "bakery", "brewery", "bar", "street food", "tea", "coffee",
                "meal", "dining", "eat",
            ],
            ImageCategory::Transport => &[
                "airport", "flight", "train", "station", "transfer", "drive", "taxi", "bus",
                "ferry", "depart", "arrive", "check-out", "travel to",
            ],
            ImageCategory::Lodging => &["hotel", "check-in", "check in", "resort", "hostel", "stay"],
            ImageCategory::Culture => &[
                "temple", "shrine", "museum", "palace", "fort", "church", "cathedral",
                "mosque", "monument", "gallery", "heritage", "historic", "castle", "old town",
            ],
            ImageCategory::Nature => &[
                "park", "garden", "beach", "lake", "mountain", "hike", "hiking", "trek", "waterfall",
                "forest", "river", "hill", "viewpoint", "sunset", "sunrise", "island",
            ],
            ImageCategory::Entertainment => &[
                "show", "concert", "club", "nightlife", "theatre", "theater", "amusement",
                "game", "cinema", "festival", "shopping", "mall", "cruise",
            ],
        }
    }

    pub fn image_url(&self) -> &'static str {
        match self {
            ImageCategory::Food => {
                "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=800"
            }
            ImageCategory::Transport => {
                "https://images.unsplash.com/photo-1436491865332-7a61a109cc05?w=800"
            }
            ImageCategory::Culture => {
                "https://images.unsplash.com/photo-1533929736458-ca588d08c8be?w=800"
            }
            ImageCategory::Nature => {
                "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800"
            }
            ImageCategory::Entertainment => {
                "https://images.unsplash.com/photo-1514525253161-7a46d19cd819?w=800"
            }
            ImageCategory::Lodging => {
                "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800"
            }
        }
    }
}

/// Classify an activity by its name and category text. Keywords match
/// whole words, optionally pluralised, so "temple" finds "Temples" but
/// "bar" does not find "Barcelona".
pub fn classify(name: &str, category: &str) -> Option<ImageCategory> {
    let text = format!("{name} {category}").to_lowercase();
    let tokens = tokenize(&text);
    ImageCategory::ALL
        .into_iter()
        .find(|c| c.keywords().iter().any(|k| contains_phrase(&tokens, k)))
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|t| !t.is_empty())
        .collect()
}

fn word_matches(token: &str, keyword: &str) -> bool {
    token == keyword
        || token.strip_suffix('s') == Some(keyword)
        || token.strip_suffix("es") == Some(keyword)
}

/// Multi-word keywords must appear as consecutive tokens.
fn contains_phrase(tokens: &[&str], keyword: &str) -> bool {
    let words = tokenize(keyword);
    if words.is_empty() || words.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(words.len())
        .any(|w| w.iter().zip(&words).all(|(t, k)| word_matches(t, k)))
}

/// The taxonomy image for an activity, or the placeholder.
pub fn fallback_image(name: &str, category: &str) -> &'static str {
    classify(name, category)
        .map(|c| c.image_url())
        .unwrap_or(PLACEHOLDER_IMAGE)
}
