//! Deterministic demo catalogue for the reference backend.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use super::product::{Product, ProductStatus};

const ADJECTIVES: &[&str] = &[
    "Walnut", "Compact", "Classic", "Brushed", "Foldable", "Wireless", "Ceramic", "Linen",
    "Vintage", "Modular", "Portable", "Matte",
];

const NOUNS: &[&str] = &[
    "Desk Lamp", "Kettle", "Bookshelf", "Headphones", "Notebook", "Backpack", "Mug",
    "Office Chair", "Speaker", "Cutting Board", "Throw Blanket", "Wall Clock",
];

/// Published records are stamped somewhere in this window before `now`.
const PUBLISHED_WINDOW_DAYS: i64 = 180;

/// Generates `count` products from `seed`. The same inputs always produce
/// the same catalogue.
pub fn generate(count: usize, seed: u64, now: DateTime<Utc>) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| random_product(&mut rng, now)).collect()
}

fn random_product(rng: &mut StdRng, now: DateTime<Utc>) -> Product {
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Plain");
    let noun = NOUNS.choose(rng).copied().unwrap_or("Item");
    let status = ProductStatus::ALL
        .choose(rng)
        .copied()
        .unwrap_or_default();
    let published_at = match status {
        ProductStatus::Draft => None,
        ProductStatus::Active | ProductStatus::Archived => {
            let seconds = rng.gen_range(0..PUBLISHED_WINDOW_DAYS * 24 * 60 * 60);
            Some(now - Duration::seconds(seconds))
        }
    };

    Product {
        id: id.simple().to_string(),
        name: format!("{} {}", adjective, noun),
        price: Decimal::new(rng.gen_range(1_000..=200_000), 2),
        stock: rng.gen_range(0..=1000),
        status,
        published_at,
    }
}
