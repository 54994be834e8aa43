//! Static cuisine knowledge: keyword profiles, preparation verbs,
//! representative dishes, plus ingredient pairing and substitution tables.
//!
//! Everything here is compile-time data consulted by the search strategies
//! and the relevance scorer. No I/O.

/// Keyword and phrasing profile for one cuisine tag.
#[derive(Debug)]
pub struct CuisineProfile {
    pub name: &'static str,
    /// Strong signals that a recipe belongs to this cuisine.
    pub primary_keywords: &'static [&'static str],
    /// Weaker supporting signals (typical seasonings, techniques).
    pub secondary_keywords: &'static [&'static str],
    /// Preparation verbs used by the cooking-method search layer.
    pub prep_verbs: &'static [&'static str],
    /// Representative dishes used by the cuisine-category search layer.
    pub dish_names: &'static [&'static str],
}

impl CuisineProfile {
    /// Iterate primary then secondary keywords.
    pub fn all_keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.primary_keywords
            .iter()
            .chain(self.secondary_keywords.iter())
            .copied()
    }
}

static PROFILES: &[CuisineProfile] = &[
    CuisineProfile {
        name: "korean",
        primary_keywords: &["korean", "kimchi", "gochujang", "bulgogi", "bibimbap"],
        secondary_keywords: &["sesame", "garlic", "spicy", "soy", "scallion"],
        prep_verbs: &["stir-fried", "braised", "grilled", "fermented"],
        dish_names: &["kimchi jjigae", "bibimbap", "bulgogi", "japchae"],
    },
    CuisineProfile {
        name: "japanese",
        primary_keywords: &["japanese", "miso", "teriyaki", "sushi", "tempura"],
        secondary_keywords: &["dashi", "soy", "mirin", "umami", "ginger"],
        prep_verbs: &["simmered", "grilled", "steamed", "fried"],
        dish_names: &["miso soup", "teriyaki chicken", "oyakodon", "nikujaga"],
    },
    CuisineProfile {
        name: "chinese",
        primary_keywords: &["chinese", "szechuan", "cantonese", "wok"],
        secondary_keywords: &["ginger", "garlic", "soy", "oyster sauce", "five spice"],
        prep_verbs: &["stir-fried", "steamed", "braised", "deep-fried"],
        dish_names: &["fried rice", "mapo tofu", "chow mein", "dumplings"],
    },
    CuisineProfile {
        name: "italian",
        primary_keywords: &["italian", "pasta", "risotto", "parmesan"],
        secondary_keywords: &["tomato", "basil", "olive oil", "garlic", "mozzarella"],
        prep_verbs: &["baked", "sauteed", "simmered", "roasted"],
        dish_names: &["spaghetti", "risotto", "lasagna", "minestrone"],
    },
    CuisineProfile {
        name: "french",
        primary_keywords: &["french", "provencal", "gratin", "ratatouille"],
        secondary_keywords: &["butter", "cream", "wine", "herbs", "shallot"],
        prep_verbs: &["braised", "sauteed", "roasted", "poached"],
        dish_names: &["ratatouille", "quiche", "gratin", "pot-au-feu"],
    },
    CuisineProfile {
        name: "thai",
        primary_keywords: &["thai", "curry", "pad thai", "tom yum"],
        secondary_keywords: &["coconut", "lemongrass", "lime", "chili", "fish sauce"],
        prep_verbs: &["stir-fried", "steamed", "grilled", "simmered"],
        dish_names: &["pad thai", "green curry", "tom yum", "larb"],
    },
    CuisineProfile {
        name: "indian",
        primary_keywords: &["indian", "curry", "masala", "tandoori"],
        secondary_keywords: &["turmeric", "cumin", "coriander", "ghee", "yogurt"],
        prep_verbs: &["simmered", "roasted", "fried", "braised"],
        dish_names: &["curry", "dal", "biryani", "korma"],
    },
    CuisineProfile {
        name: "mexican",
        primary_keywords: &["mexican", "taco", "salsa", "tortilla"],
        secondary_keywords: &["lime", "cilantro", "beans", "chili", "avocado"],
        prep_verbs: &["grilled", "roasted", "fried", "braised"],
        dish_names: &["tacos", "quesadilla", "enchiladas", "fajitas"],
    },
];

/// Neutral profile used when the request names no cuisine or an unknown one.
static DEFAULT_PROFILE: CuisineProfile = CuisineProfile {
    name: "any",
    primary_keywords: &[],
    secondary_keywords: &["fresh", "homemade", "easy"],
    prep_verbs: &["stir-fried", "roasted", "simmered", "grilled"],
    dish_names: &["stir fry", "soup", "salad", "casserole"],
};

/// Look up the profile for a cuisine tag, falling back to the neutral one.
pub fn profile_for(cuisine: Option<&str>) -> &'static CuisineProfile {
    match cuisine {
        Some(tag) => PROFILES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(tag.trim()))
            .unwrap_or(&DEFAULT_PROFILE),
        None => &DEFAULT_PROFILE,
    }
}

struct PairingEntry {
    ingredient: &'static str,
    /// Entry applies only for this cuisine; `None` entries are generic.
    cuisine: Option<&'static str>,
    partners: &'static [&'static str],
}

static PAIRING_TABLE: &[PairingEntry] = &[
    PairingEntry {
        ingredient: "cabbage",
        cuisine: Some("korean"),
        partners: &["pork belly", "gochujang"],
    },
    PairingEntry {
        ingredient: "cabbage",
        cuisine: None,
        partners: &["pork", "carrot"],
    },
    PairingEntry {
        ingredient: "chicken",
        cuisine: Some("japanese"),
        partners: &["egg", "soy sauce"],
    },
    PairingEntry {
        ingredient: "chicken",
        cuisine: None,
        partners: &["garlic", "onion"],
    },
    PairingEntry {
        ingredient: "pork",
        cuisine: None,
        partners: &["ginger", "cabbage"],
    },
    PairingEntry {
        ingredient: "beef",
        cuisine: None,
        partners: &["onion", "pepper"],
    },
    PairingEntry {
        ingredient: "tofu",
        cuisine: Some("chinese"),
        partners: &["ground pork", "chili"],
    },
    PairingEntry {
        ingredient: "tofu",
        cuisine: None,
        partners: &["scallion", "mushroom"],
    },
    PairingEntry {
        ingredient: "eggplant",
        cuisine: None,
        partners: &["miso", "garlic"],
    },
    PairingEntry {
        ingredient: "potato",
        cuisine: None,
        partners: &["onion", "butter"],
    },
    PairingEntry {
        ingredient: "egg",
        cuisine: None,
        partners: &["tomato", "cheese"],
    },
    PairingEntry {
        ingredient: "mushroom",
        cuisine: None,
        partners: &["butter", "garlic"],
    },
    PairingEntry {
        ingredient: "spinach",
        cuisine: None,
        partners: &["egg", "garlic"],
    },
    PairingEntry {
        ingredient: "daikon",
        cuisine: Some("japanese"),
        partners: &["pork", "miso"],
    },
    PairingEntry {
        ingredient: "milk",
        cuisine: None,
        partners: &["potato", "cheese"],
    },
];

/// Partners that work with nearly anything, used when the table has no
/// entry for an ingredient.
static UNIVERSAL_PARTNERS: &[&str] = &["garlic", "onion"];

/// Commonly co-occurring ingredients for the pairing search layer.
///
/// A cuisine-specific entry wins over a generic one for the same
/// ingredient.
pub fn pairing_partners(ingredient: &str, cuisine: &str) -> &'static [&'static str] {
    let needle = ingredient.trim().to_lowercase();
    let mut generic = None;
    for entry in PAIRING_TABLE {
        if !needle.contains(entry.ingredient) {
            continue;
        }
        match entry.cuisine {
            Some(c) if c.eq_ignore_ascii_case(cuisine) => return entry.partners,
            None => generic = generic.or(Some(entry.partners)),
            _ => {}
        }
    }
    generic.unwrap_or(UNIVERSAL_PARTNERS)
}

static SUBSTITUTION_TABLE: &[(&str, &[&str])] = &[
    ("cabbage", &["napa cabbage", "bok choy"]),
    ("napa cabbage", &["cabbage", "bok choy"]),
    ("spinach", &["komatsuna", "chard"]),
    ("lettuce", &["cabbage", "spinach"]),
    ("chicken", &["turkey", "pork"]),
    ("pork", &["chicken", "beef"]),
    ("beef", &["pork", "lamb"]),
    ("tofu", &["tempeh", "paneer"]),
    ("daikon", &["turnip", "radish"]),
    ("potato", &["sweet potato", "taro"]),
    ("mushroom", &["shiitake", "oyster mushroom"]),
    ("eggplant", &["zucchini", "bell pepper"]),
    ("cucumber", &["zucchini", "celery"]),
    ("milk", &["soy milk", "oat milk"]),
    ("yogurt", &["sour cream", "buttermilk"]),
    ("onion", &["leek", "shallot"]),
    ("carrot", &["parsnip", "pumpkin"]),
];

/// Taxonomically similar ingredients for the similar-ingredient layer.
///
/// Returns an empty slice for ingredients without a table entry; the
/// layer is skipped in that case.
pub fn similar_ingredients(ingredient: &str) -> &'static [&'static str] {
    let needle = ingredient.trim().to_lowercase();
    // Longest key wins so "napa cabbage" is not shadowed by "cabbage"
    SUBSTITUTION_TABLE
        .iter()
        .filter(|(key, _)| needle.contains(key))
        .max_by_key(|(key, _)| key.len())
        .map(|(_, subs)| *subs)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_for_known_cuisine() {
        let profile = profile_for(Some("korean"));
        assert_eq!(profile.name, "korean");
        assert!(profile.primary_keywords.contains(&"kimchi"));

        // Case and whitespace insensitive
        let profile = profile_for(Some(" Korean "));
        assert_eq!(profile.name, "korean");
    }

    #[test]
    fn test_profile_for_unknown_falls_back() {
        assert_eq!(profile_for(Some("martian")).name, "any");
        assert_eq!(profile_for(None).name, "any");
    }

    #[test]
    fn test_every_profile_can_drive_all_layers() {
        for profile in PROFILES {
            assert!(
                !profile.prep_verbs.is_empty(),
                "{} has no prep verbs",
                profile.name
            );
            assert!(
                !profile.dish_names.is_empty(),
                "{} has no dish names",
                profile.name
            );
            assert!(!profile.primary_keywords.is_empty());
        }
        assert!(!DEFAULT_PROFILE.prep_verbs.is_empty());
        assert!(!DEFAULT_PROFILE.dish_names.is_empty());
    }

    #[test]
    fn test_all_keywords_chains_both_lists() {
        let profile = profile_for(Some("italian"));
        let keywords: Vec<&str> = profile.all_keywords().collect();
        assert!(keywords.contains(&"pasta"));
        assert!(keywords.contains(&"basil"));
    }

    #[test]
    fn test_pairing_prefers_cuisine_entry() {
        let partners = pairing_partners("cabbage", "korean");
        assert_eq!(partners, &["pork belly", "gochujang"]);

        let partners = pairing_partners("cabbage", "italian");
        assert_eq!(partners, &["pork", "carrot"]);
    }

    #[test]
    fn test_pairing_matches_within_longer_names() {
        let partners = pairing_partners("napa cabbage", "korean");
        assert_eq!(partners, &["pork belly", "gochujang"]);
    }

    #[test]
    fn test_pairing_unknown_uses_universal() {
        let partners = pairing_partners("dragonfruit", "any");
        assert_eq!(partners, UNIVERSAL_PARTNERS);
    }

    #[test]
    fn test_similar_ingredients_lookup() {
        assert_eq!(similar_ingredients("cabbage"), &["napa cabbage", "bok choy"]);
        assert_eq!(similar_ingredients("CHICKEN "), &["turkey", "pork"]);
    }

    #[test]
    fn test_similar_ingredients_longest_key_wins() {
        assert_eq!(
            similar_ingredients("napa cabbage"),
            &["cabbage", "bok choy"]
        );
    }

    #[test]
    fn test_similar_ingredients_unknown_is_empty() {
        assert!(similar_ingredients("dragonfruit").is_empty());
    }
}
