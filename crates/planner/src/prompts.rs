//! Stage prompts. The persona-styled draft prompt lives on
//! [`tw_personas::Persona::style_prompt`].

/// Discover stage: categorised attractions for a city.
pub fn discover(city: &str) -> String {
    format!(
        "Given that you have to plan a trip to {city}, can you divide the types of things that \
         we can do there i need a JSON which will be something like:\n\
         we need the list of famous attractions neatly classified\n\
         so search for famous attractions not just the ones mentioned above, create more \
         classifications apart from what are given above\n\
         {{ \"Museums\": [\" \"], \"Parks\": [\" \"], \"Restaurants/breweries\": [\" \"], \
         \"Temples\": [\" \"], \"Treks/beaches/natural attractions\": [\" \"], \
         \"Amusement Parks/Game Zones\": [\" \"] }}\n\
         NO extra text, just the JSON above - If you cant find anything just give an empty list\n"
    )
}

/// Optimize stage: reorder by proximity, keep every item.
pub const OPTIMIZE: &str = "keep the items same but now try to optimize the itinerary based on \
their locations and distances. Make sure it adheres JSON structure, no unnecessary \\n characters.";

/// Single-turn edit of an existing itinerary.
pub fn patch(itinerary_json: &str, instruction: &str) -> String {
    format!(
        "You are given a trip itinerary as follows:\n\
         {itinerary_json}\n\
         there will be a user request, based on which you have to make changes in the itinerary. \
         Make sure to change only the affected cells, keep the remaining as it is\n\
         <user_query>\n\
         {instruction}\n\
         </user_query>"
    )
}

pub fn flights(source: &str, destination: &str, date: &str, airlines: &[String]) -> String {
    let airlines = airlines.join(", ");
    format!(
        "Search Google Flights for current flight information:\n\
         Route: {source} to {destination}\n\
         Date: {date}\n\
         Airlines: {airlines}\n\n\
         IMPORTANT INSTRUCTIONS:\n\
         - Use live Google Flights search to get current pricing and availability\n\
         - Search from morning (early hours) to night (late hours) for comprehensive coverage\n\
         - Include all available flight times and current prices\n\
         - Format time in 24-hour format (HH:MM)\n\
         - Include price with currency symbol (₹ for INR)\n\n\
         OUTPUT FORMAT (JSON only, no explanatory text):\n\
         {{\"airline_1\": [{{\"price\": \"₹4500\", \"departure_time\": \"06:25\", \"arrival_time\": \"08:30\"}}, \
         {{\"price\": \"₹4200\", \"departure_time\": \"14:30\", \"arrival_time\": \"16:35\"}}], \
         \"airline_2\": [{{\"price\": \"₹5000\", \"departure_time\": \"09:15\", \"arrival_time\": \"11:20\"}}]}}\n\n\
         Search now and provide the live results in the exact JSON format above."
    )
}

pub fn hotels(city: &str, price_min: u32, price_max: u32) -> String {
    format!(
        "Search Google Hotels for current hotel information:\n\
         Location: {city}\n\
         Price Range: ₹{price_min} to ₹{price_max} per night\n\n\
         IMPORTANT INSTRUCTIONS:\n\
         - Use live Google Hotels search to get current pricing and availability\n\
         - Search for hotels within the specified price range only\n\
         - Include hotel ratings (out of 5), exact location/area within the city\n\
         - Include price per night with currency symbol (₹ for INR)\n\
         - Focus on well-reviewed hotels with good ratings\n\
         - Include specific area/neighborhood information within the city\n\n\
         OUTPUT FORMAT (JSONL only, no explanatory text):\n\
         Each line should be a separate JSON object with this exact structure:\n\
         {{\"name\": \"Hotel Name\", \"price_per_night\": \"1500\", \"rating\": \"4.2\", \"location\": \"Specific Area, City\"}}\n\n\
         Search now and provide live results in exact JSONL format above."
    )
}

pub fn suggestions(city: &str) -> String {
    format!(
        "given the city as {city} give me 6-7 suggestions. the suggestions should be phrases or \
         1 words like - Hiking, Solo Traveling, Art Galleries etc... depending on the city, and the \
         vibe of the trip. Keep the suggestions a little diverse too, dont cram things which are alike.\n\
         Strictly adhere to the format, no extra text\n\
         OUTPUT FORMAT:\n\
         sug1;sug2;sug3;sug4;sug5;\n"
    )
}
