/// Generic and commercial venues that never count as a find, no matter
/// how highly the provider rates them.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "bar",
    "nightclub",
    "pub",
    "club",
    "hotel",
    "mall",
    "casino",
    "tourist",
    "resort",
    "chain",
    "fast food",
    "restaurant",
    "brewery",
    "winery",
    "liquor",
    "strip club",
    "convenience",
    "supermarket",
    "grocery",
    "pharmacy",
    "pharmacies",
    "bank",
    "atm",
    "car rental",
    "car dealership",
    "car wash",
    "gas station",
    "parking",
    "airport",
    "bus station",
    "train station",
    "subway",
    "transit",
    "taxi",
    "ferry",
    "cruise",
    "travel agency",
    "tour operator",
    "daycare",
    "party rental",
];

/// Binary include/exclude: a candidate is out if its name or any category
/// tag contains a block-list keyword, case-insensitively.
pub fn is_unique_place(name: &str, types: &[String]) -> bool {
    let name = name.to_lowercase();
    !EXCLUDE_KEYWORDS.iter().any(|kw| {
        name.contains(kw) || types.iter().any(|t| t.to_lowercase().contains(kw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blocks_keyword_in_name() {
        assert!(!is_unique_place("Rooftop Bar Lounge", &[]));
        assert!(!is_unique_place("Grand Hotel Panorama", &[]));
    }

    #[test]
    fn blocks_keyword_in_category_tag() {
        assert!(!is_unique_place("The Vault", &tags(&["bar", "point_of_interest"])));
        assert!(!is_unique_place("Lucky Star", &tags(&["casino"])));
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(!is_unique_place("CASINO ROYALE", &[]));
        assert!(!is_unique_place("Quiet Place", &tags(&["Tourist_Attraction"])));
    }

    #[test]
    fn keyword_matches_as_substring() {
        // Substring semantics: "bar" blocks longer words too.
        assert!(!is_unique_place("Barbican Conservatory", &[]));
    }

    #[test]
    fn passes_unlisted_places() {
        assert!(is_unique_place("Secret Garden", &tags(&["park", "point_of_interest"])));
        assert!(is_unique_place("Abandoned Lighthouse", &[]));
    }
}
