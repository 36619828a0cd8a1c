use rand::Rng;

/// Phrase templates the provider query is built from. Picking one at
/// random varies result flavor across repeated identical searches.
const PHRASES: &[&str] = &[
    "unique things to do in [location]",
    "hidden gems near [location]",
    "unusual places in [location]",
];

/// The caller supplies the `Rng` so tests can seed the choice.
pub fn compose_search_phrase(location: &str, rng: &mut impl Rng) -> String {
    let template = PHRASES[rng.gen_range(0..PHRASES.len())];
    template.replace("[location]", location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn substitutes_location_into_a_known_template() {
        let mut rng = StdRng::seed_from_u64(7);
        let phrase = compose_search_phrase("Lisbon", &mut rng);
        assert!(phrase.contains("Lisbon"));
        assert!(PHRASES
            .iter()
            .any(|t| t.replace("[location]", "Lisbon") == phrase));
    }

    #[test]
    fn same_seed_gives_same_phrase() {
        let a = compose_search_phrase("Oslo", &mut StdRng::seed_from_u64(42));
        let b = compose_search_phrase("Oslo", &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn all_templates_are_reachable() {
        let mut seen = std::collections::HashSet::new();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..200 {
            let phrase = compose_search_phrase("x", &mut rng);
            seen.insert(phrase);
        }
        assert_eq!(seen.len(), PHRASES.len());
    }
}
