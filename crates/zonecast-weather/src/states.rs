//! US states and territories, keyed by the area codes the NWS zone directory accepts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct State {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

const fn state(name: &'static str, abbreviation: &'static str) -> State {
    State { name, abbreviation }
}

pub const US_STATES: &[State] = &[
    state("Alabama", "AL"),
    state("Alaska", "AK"),
    state("American Samoa", "AS"),
    state("Arizona", "AZ"),
    state("Arkansas", "AR"),
    state("California", "CA"),
    state("Colorado", "CO"),
    state("Connecticut", "CT"),
    state("Delaware", "DE"),
    state("District Of Columbia", "DC"),
    state("Florida", "FL"),
    state("Georgia", "GA"),
    state("Guam", "GU"),
    state("Hawaii", "HI"),
    state("Idaho", "ID"),
    state("Illinois", "IL"),
    state("Indiana", "IN"),
    state("Iowa", "IA"),
    state("Kansas", "KS"),
    state("Kentucky", "KY"),
    state("Louisiana", "LA"),
    state("Maine", "ME"),
    state("Maryland", "MD"),
    state("Massachusetts", "MA"),
    state("Michigan", "MI"),
    state("Minnesota", "MN"),
    state("Mississippi", "MS"),
    state("Missouri", "MO"),
    state("Montana", "MT"),
    state("Nebraska", "NE"),
    state("Nevada", "NV"),
    state("New Hampshire", "NH"),
    state("New Jersey", "NJ"),
    state("New Mexico", "NM"),
    state("New York", "NY"),
    state("North Carolina", "NC"),
    state("North Dakota", "ND"),
    state("Northern Mariana Islands", "MP"),
    state("Ohio", "OH"),
    state("Oklahoma", "OK"),
    state("Oregon", "OR"),
    state("Pennsylvania", "PA"),
    state("Puerto Rico", "PR"),
    state("Rhode Island", "RI"),
    state("South Carolina", "SC"),
    state("South Dakota", "SD"),
    state("Tennessee", "TN"),
    state("Texas", "TX"),
    state("Utah", "UT"),
    state("Vermont", "VT"),
    state("Virgin Islands", "VI"),
    state("Virginia", "VA"),
    state("Washington", "WA"),
    state("West Virginia", "WV"),
    state("Wisconsin", "WI"),
    state("Wyoming", "WY"),
];

/// Look up a state by exact abbreviation or name, ignoring case.
pub fn find_state(query: &str) -> Option<&'static State> {
    let query = query.trim();
    US_STATES.iter().find(|s| {
        s.abbreviation.eq_ignore_ascii_case(query) || s.name.eq_ignore_ascii_case(query)
    })
}

/// Autocomplete: states whose name or abbreviation starts with `prefix`.
pub fn search_states(prefix: &str) -> Vec<&'static State> {
    let prefix = prefix.trim().to_lowercase();
    US_STATES
        .iter()
        .filter(|s| {
            s.name.to_lowercase().starts_with(&prefix)
                || s.abbreviation.to_lowercase().starts_with(&prefix)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_state_by_code_and_name() {
        assert_eq!(find_state("wa").map(|s| s.name), Some("Washington"));
        assert_eq!(find_state("New York").map(|s| s.abbreviation), Some("NY"));
        assert_eq!(find_state(" pr ").map(|s| s.name), Some("Puerto Rico"));
        assert!(find_state("Atlantis").is_none());
    }

    #[test]
    fn test_search_states_prefix() {
        let hits: Vec<&str> = search_states("new").iter().map(|s| s.abbreviation).collect();
        assert_eq!(hits, vec!["NH", "NJ", "NM", "NY"]);

        assert_eq!(search_states("").len(), US_STATES.len());
    }

    #[test]
    fn test_abbreviations_are_unique() {
        let mut codes: Vec<&str> = US_STATES.iter().map(|s| s.abbreviation).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), US_STATES.len());
    }
}
