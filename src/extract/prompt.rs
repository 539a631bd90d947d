const SYSTEM_PROMPT: &str = include_str!("system_prompt.txt");

use tracing::debug;

/// Rendered in place of the location list when the caller has none.
pub const NO_KNOWN_LOCATIONS: &str = "(no known locations)";

/// Builds the system instruction for one extraction. Deterministic for a
/// given `current_time` and `known_locations`.
pub fn build(current_time: &str, known_locations: &[String]) -> String {
    let prompt = SYSTEM_PROMPT
        .replace("{{CURRENT_TIME}}", current_time)
        .replace("{{KNOWN_LOCATIONS}}", &render_locations(known_locations));
    debug!("Using system prompt: \n{}", prompt);
    prompt
}

fn render_locations(known_locations: &[String]) -> String {
    if known_locations.is_empty() {
        return NO_KNOWN_LOCATIONS.to_string();
    }
    known_locations
        .iter()
        .map(|location| format!("\"{}\"", location))
        .collect::<Vec<_>>()
        .join(", ")
}
