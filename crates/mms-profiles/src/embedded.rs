//! Embedded profile and vocabulary data.
//!
//! Built-in profiles and vocabularies are compiled into the binary with
//! `include_str!()` so the tool works offline and without path resolution.
//!
//! # Adding a marketplace
//!
//! Drop a profile JSON into `data/profiles/` and list it in [`PROFILE_FILES`].
//! Profiles that should not ship with the binary can instead be placed in the
//! directory named by `MMS_PROFILES_DIR`.

// =============================================================================
// Vocabulary tables
// =============================================================================

/// Category taxonomy: canonical English term to Korean storefront term.
pub const CATEGORY_VOCABULARY: &str = include_str!("../data/vocabulary/category.csv");

/// Brand spellings: canonical English spelling to Korean spelling.
pub const BRAND_VOCABULARY: &str = include_str!("../data/vocabulary/brand.csv");

// =============================================================================
// Profiles
// =============================================================================

pub const SHOPIFY_PRODUCTS: &str = include_str!("../data/profiles/shopify-products.json");

pub const NAVER_SMARTSTORE: &str = include_str!("../data/profiles/naver-smartstore.json");

pub const NAVER_SMARTSTORE_FASHION: &str =
    include_str!("../data/profiles/naver-smartstore-fashion.json");

pub const COUPANG_WING: &str = include_str!("../data/profiles/coupang-wing.json");

pub const ELEVENST_SELLER: &str = include_str!("../data/profiles/elevenst-seller.json");

/// `(table name, CSV content)` for every built-in vocabulary.
pub const VOCABULARY_FILES: &[(&str, &str)] = &[
    ("category", CATEGORY_VOCABULARY),
    ("brand", BRAND_VOCABULARY),
];

/// `(file name, JSON content)` for every built-in profile, in registration order.
pub const PROFILE_FILES: &[(&str, &str)] = &[
    ("shopify-products.json", SHOPIFY_PRODUCTS),
    ("naver-smartstore.json", NAVER_SMARTSTORE),
    ("naver-smartstore-fashion.json", NAVER_SMARTSTORE_FASHION),
    ("coupang-wing.json", COUPANG_WING),
    ("elevenst-seller.json", ELEVENST_SELLER),
];
