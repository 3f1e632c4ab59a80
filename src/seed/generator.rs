//! Deterministic synthetic data. Value pools are precomputed from static word
//! lists so document generation stays cheap inside timed write operations,
//! and a fixed RNG seed makes the corpus reproducible across runs.

use mongodb::bson::DateTime;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::models::{Address, Category, LineItem, Order, Payment, StatusEntry};

pub const PAYMENT_METHODS: &[&str] = &[
    "credit_card",
    "debit_card",
    "paypal",
    "apple_pay",
    "google_pay",
];

/// Order lifecycle, in progression order. Status history entries walk this
/// list up to the order's final status.
pub const ORDER_STATUSES: &[&str] = &[
    "pending",
    "confirmed",
    "processing",
    "shipped",
    "delivered",
    "cancelled",
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "company.co",
    "example.com",
    "fastmail.com",
    "proton.me",
    "icloud.com",
];

const FIRST_NAMES: &[&str] = &[
    "james", "mary", "robert", "patricia", "john", "jennifer", "michael", "linda", "david",
    "elizabeth", "william", "barbara", "richard", "susan", "joseph", "jessica", "thomas", "sarah",
    "carlos", "nancy", "daniel", "lisa", "matthew", "betty", "anthony", "margaret", "marco",
    "sandra", "mark", "ashley",
];

const LAST_NAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "rodriguez",
    "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson", "thomas", "taylor",
    "moore", "jackson", "martin", "lee", "perez", "thompson", "white", "harris", "sanchez",
    "clark", "ramirez", "lewis", "walker",
];

const STREET_NAMES: &[&str] = &[
    "Oak", "Maple", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill", "Park", "Main",
    "Walnut", "Spring", "River", "Sunset", "Highland", "Franklin", "Church", "Mill", "Center",
    "Union",
];

const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Blvd", "Dr", "Ln", "Rd", "Way", "Ct"];

const CITIES: &[&str] = &[
    "Springfield", "Riverton", "Fairview", "Georgetown", "Ashland", "Clinton", "Madison",
    "Salem", "Bristol", "Clayton", "Dayton", "Franklin", "Greenville", "Kingston", "Milton",
    "Newport", "Oxford", "Arlington", "Burlington", "Dover",
];

const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Ergonomic", "Rustic", "Sleek", "Compact", "Durable", "Premium", "Modular", "Wireless",
    "Portable", "Heavy-Duty", "Lightweight", "Refurbished", "Handcrafted", "Industrial",
    "Vintage",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Keyboard", "Lamp", "Backpack", "Speaker", "Notebook", "Charger", "Monitor", "Desk",
    "Chair", "Headset", "Bottle", "Camera", "Router", "Tablet", "Stand",
];

const CATEGORY_WORDS: &[&str] = &[
    "electronics", "garden", "books", "toys", "grocery", "apparel", "outdoors", "automotive",
    "health", "beauty", "office", "music", "sports", "kitchen", "pets", "jewelry", "tools",
    "baby", "games", "furniture",
];

// Millisecond timestamps bounding generated dates: 2023-01-01 to 2025-06-01.
const TS_START_MS: i64 = 1_672_531_200_000;
const TS_END_MS: i64 = 1_748_736_000_000;

const HOUR_MS: i64 = 3_600_000;

pub struct DataGenerator {
    rng: StdRng,
}

impl DataGenerator {
    pub fn new(seed: u64) -> Self {
        DataGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn make_category(&mut self, index: u64) -> Category {
        let word = choose(&mut self.rng, CATEGORY_WORDS);
        Category {
            name: format!("{word}-{index}"),
            slug: format!("{word}-{index}"),
            view_count: self.rng.gen_range(0..=500_000),
            is_active: self.rng.gen_bool(0.8),
            benchmark: false,
        }
    }

    pub fn make_order(&mut self, index: u64) -> Order {
        let status = choose(&mut self.rng, ORDER_STATUSES);
        let created_at_ms = self.rng.gen_range(TS_START_MS..TS_END_MS);
        let item_count = self.rng.gen_range(2..=5);
        let line_items: Vec<LineItem> = (0..item_count).map(|_| self.line_item()).collect();
        let total: i64 = line_items
            .iter()
            .map(|li| li.unit_price_cents * li.quantity)
            .sum();

        Order {
            order_number: format!("ORD-{index:08}"),
            customer_email: self.email(),
            status: status.to_string(),
            total_cents: total,
            item_count: line_items.len() as i64,
            created_at: DateTime::from_millis(created_at_ms),
            updated_at: DateTime::from_millis(
                created_at_ms + self.rng.gen_range(0..=72) * HOUR_MS,
            ),
            shipping_address: self.address(),
            payment: Payment {
                method: choose(&mut self.rng, PAYMENT_METHODS).to_string(),
                last_four: format!("{}", self.rng.gen_range(1000..=9999)),
                charged_cents: total,
            },
            line_items,
            status_history: self.status_history(status, created_at_ms),
            benchmark: false,
        }
    }

    fn email(&mut self) -> String {
        format!(
            "{}.{}@{}",
            choose(&mut self.rng, FIRST_NAMES),
            choose(&mut self.rng, LAST_NAMES),
            choose(&mut self.rng, EMAIL_DOMAINS),
        )
    }

    fn address(&mut self) -> Address {
        Address {
            street: format!(
                "{} {} {}",
                self.rng.gen_range(1..=9999),
                choose(&mut self.rng, STREET_NAMES),
                choose(&mut self.rng, STREET_SUFFIXES),
            ),
            city: choose(&mut self.rng, CITIES).to_string(),
            state: choose(&mut self.rng, STATES).to_string(),
            zip_code: format!("{:05}", self.rng.gen_range(501..=99950)),
            country: "US".to_string(),
        }
    }

    fn line_item(&mut self) -> LineItem {
        LineItem {
            sku: format!("SKU-{}", self.rng.gen_range(10_000..=99_999)),
            name: format!(
                "{} {}",
                choose(&mut self.rng, PRODUCT_ADJECTIVES),
                choose(&mut self.rng, PRODUCT_NOUNS),
            ),
            quantity: self.rng.gen_range(1..=10),
            unit_price_cents: self.rng.gen_range(299..=49_999),
        }
    }

    /// Walks the status progression up to and including `final_status`, with
    /// 1-48 hours between transitions.
    fn status_history(&mut self, final_status: &str, created_at_ms: i64) -> Vec<StatusEntry> {
        let last = ORDER_STATUSES
            .iter()
            .position(|&s| s == final_status)
            .unwrap_or(0);
        let mut at = created_at_ms;
        ORDER_STATUSES[..=last]
            .iter()
            .map(|&status| {
                let entry = StatusEntry {
                    status: status.to_string(),
                    changed_at: DateTime::from_millis(at),
                };
                at += self.rng.gen_range(1..=48) * HOUR_MS;
                entry
            })
            .collect()
    }
}

fn choose<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    // Pools are non-empty constants.
    pool.choose(rng).copied().unwrap_or(pool[0])
}
