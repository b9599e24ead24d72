use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::atomic::{AtomicU64, Ordering};

const FIRST_NAMES: &[&str] = &[
    "amber", "brian", "carla", "dmitri", "elena", "felix", "greta", "hana", "ivan", "june",
    "karim", "lena", "marco", "nadia", "oscar", "priya", "quinn", "rosa", "stefan", "tara",
    "umar", "vera", "wendel", "yuki",
];

const LAST_NAMES: &[&str] = &[
    "adler", "brook", "castillo", "duarte", "eriksen", "fischer", "gupta", "hong", "ishida",
    "jansen", "kovac", "larsen", "moreno", "novak", "okafor", "petrov", "quist", "rahman",
    "silva", "tanaka", "ueda", "vargas", "weber", "zhang",
];

const DOMAINS: &[&str] = &["example.com", "example.net", "example.org", "mail.test"];

const WORDS: &[&str] = &[
    "quiet", "signal", "harbor", "copper", "window", "garden", "meadow", "summer", "letter",
    "planet", "circle", "bridge", "simple", "yellow", "branch", "stream", "market", "castle",
    "orange", "silver", "forest", "morning", "evening", "travel", "record", "moment", "corner",
    "island", "winter", "autumn",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "compact", "ergonomic", "rustic", "sleek", "durable", "gorgeous", "lightweight", "refined",
    "practical", "modern",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "steel", "granite", "cotton", "walnut", "ceramic", "leather", "bamboo", "copper", "linen",
    "marble",
];

const PRODUCT_ITEMS: &[&str] = &[
    "chair", "lamp", "keyboard", "bottle", "wallet", "backpack", "clock", "mug", "notebook",
    "speaker",
];

/// Generates synthetic user and product data for request payloads.
///
/// A per-provider sequence number is folded into usernames and emails so
/// that values never collide within a run, matching what the target service
/// expects from a create request.
pub struct FakeData {
    seq: AtomicU64,
}

impl FakeData {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    pub fn username(&self) -> String {
        let mut rng = rand::thread_rng();
        let first = FIRST_NAMES.choose(&mut rng).unwrap_or(&"user");
        let last = LAST_NAMES.choose(&mut rng).unwrap_or(&"anon");
        format!("{first}_{last}{}", self.next_seq())
    }

    /// Email with a dotted local part, e.g. `carla.novak17@example.net`.
    pub fn email(&self) -> String {
        let mut rng = rand::thread_rng();
        let first = FIRST_NAMES.choose(&mut rng).unwrap_or(&"user");
        let last = LAST_NAMES.choose(&mut rng).unwrap_or(&"anon");
        let domain = DOMAINS.choose(&mut rng).unwrap_or(&"example.com");
        format!("{first}.{last}{}@{domain}", self.next_seq())
    }

    pub fn sentence(&self) -> String {
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(6..=10);
        let mut words: Vec<&str> = (0..len)
            .map(|_| *WORDS.choose(&mut rng).unwrap_or(&"word"))
            .collect();
        let mut out = capitalize(words.remove(0));
        for w in words {
            out.push(' ');
            out.push_str(w);
        }
        out.push('.');
        out
    }

    pub fn product_name(&self) -> String {
        let mut rng = rand::thread_rng();
        let adj = PRODUCT_ADJECTIVES.choose(&mut rng).unwrap_or(&"plain");
        let material = PRODUCT_MATERIALS.choose(&mut rng).unwrap_or(&"steel");
        let item = PRODUCT_ITEMS.choose(&mut rng).unwrap_or(&"widget");
        format!(
            "{} {} {}",
            capitalize(adj),
            capitalize(material),
            capitalize(item)
        )
    }
}

impl Default for FakeData {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
