//! Static lookup tables for the apps storefront.
//!
//! ## Page tokens
//!
//! Search and developer listings paginate with an opaque `pagTok` form value.
//! The storefront issues these tokens with no public derivation, so they are
//! shipped as a fixed table indexed by page number. They are an external,
//! unverifiable dependency on the storefront's session-token scheme: if the
//! storefront rotates its scheme, later pages silently return the first page
//! or nothing at all. Index 0 is the empty token (first page).
//!
//! ## Collections, categories, age ranges
//!
//! Public names accepted by the entry points mapped to the identifiers used in
//! storefront URLs and query strings.

/// Opaque continuation tokens, indexed by page number.
pub const PAGE_TOKENS: [&str; 13] = [
    "",
    "GAEiAggU:S:ANO1ljLtUJw",
    "GAEiAggo:S:ANO1ljIeRQQ",
    "GAEiAgg8:S:ANO1ljIM1CI",
    "GAEiAghQ:S:ANO1ljLxWBY",
    "GAEiAghk:S:ANO1ljJkC4I",
    "GAEiAgh4:S:ANO1ljJfGC4",
    "GAEiAwiMAQ==:S:ANO1ljL7Yco",
    "GAEiAwigAQ==:S:ANO1ljLMTko",
    "GAEiAwi0AQ==:S:ANO1ljJ2maA",
    "GAEiAwjIAQ==:S:ANO1ljIG2D4",
    "GAEiAwjcAQ==:S:ANO1ljJ9Wk0",
    "GAEiAwjwAQ==:S:ANO1ljLFcVI",
];

/// Highest page index with a known token.
pub const MAX_PAGE_TOKEN_INDEX: usize = PAGE_TOKENS.len() - 1;

/// Collection name → storefront collection id.
pub const COLLECTIONS: &[(&str, &str)] = &[
    ("NEW_FREE", "topselling_new_free"),
    ("NEW_PAID", "topselling_new_paid"),
    ("TOP_FREE", "topselling_free"),
    ("TOP_PAID", "topselling_paid"),
    ("TOP_GROSSING", "topgrossing"),
    ("TRENDING", "movers_shakers"),
];

/// Category ids accepted in collection listings. Names are the ids themselves.
pub const CATEGORIES: &[&str] = &[
    "ANDROID_WEAR",
    "ART_AND_DESIGN",
    "AUTO_AND_VEHICLES",
    "BEAUTY",
    "BOOKS_AND_REFERENCE",
    "BUSINESS",
    "COMICS",
    "COMMUNICATION",
    "DATING",
    "EDUCATION",
    "ENTERTAINMENT",
    "EVENTS",
    "FINANCE",
    "FOOD_AND_DRINK",
    "HEALTH_AND_FITNESS",
    "HOUSE_AND_HOME",
    "LIBRARIES_AND_DEMO",
    "LIFESTYLE",
    "MAPS_AND_NAVIGATION",
    "MEDICAL",
    "MUSIC_AND_AUDIO",
    "NEWS_AND_MAGAZINES",
    "PARENTING",
    "PERSONALIZATION",
    "PHOTOGRAPHY",
    "PRODUCTIVITY",
    "SHOPPING",
    "SOCIAL",
    "SPORTS",
    "TOOLS",
    "TRAVEL_AND_LOCAL",
    "VIDEO_PLAYERS",
    "WEATHER",
    "GAME",
    "GAME_ACTION",
    "GAME_ADVENTURE",
    "GAME_ARCADE",
    "GAME_BOARD",
    "GAME_CARD",
    "GAME_CASINO",
    "GAME_CASUAL",
    "GAME_EDUCATIONAL",
    "GAME_MUSIC",
    "GAME_PUZZLE",
    "GAME_RACING",
    "GAME_ROLE_PLAYING",
    "GAME_SIMULATION",
    "GAME_SPORTS",
    "GAME_STRATEGY",
    "GAME_TRIVIA",
    "GAME_WORD",
    "FAMILY",
    "FAMILY_ACTION",
    "FAMILY_BRAINGAMES",
    "FAMILY_CREATE",
    "FAMILY_EDUCATION",
    "FAMILY_MUSICVIDEO",
    "FAMILY_PRETEND",
];

/// Age-range name → `age` query value. Only meaningful for `FAMILY*` categories.
pub const AGE_RANGES: &[(&str, &str)] = &[
    ("FIVE_UNDER", "AGE_RANGE1"),
    ("SIX_EIGHT", "AGE_RANGE2"),
    ("NINE_UP", "AGE_RANGE3"),
];

/// Looks up the continuation token for `page`, `None` past the table.
#[must_use]
pub fn page_token(page: usize) -> Option<&'static str> {
    PAGE_TOKENS.get(page).copied()
}

/// Resolves a public collection name (e.g. `"TOP_FREE"`) to its storefront id.
#[must_use]
pub fn collection_id(name: &str) -> Option<&'static str> {
    COLLECTIONS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, id)| *id)
}

/// Returns the canonical category id when `name` is a known category.
#[must_use]
pub fn category_id(name: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|c| **c == name).copied()
}

#[must_use]
pub fn age_range_id(name: &str) -> Option<&'static str> {
    AGE_RANGES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, id)| *id)
}
