//! Sample data for seeding data services.
//!
//! Two sources of records live here:
//!
//! - **Generators** ([`FixtureGenerator`]) synthesize random but plausible
//!   records. [`MockedDataService`](crate::MockedDataService) uses them to
//!   pre-populate its store.
//! - **Samples** (`sample_*` functions) are small fixed record sets with
//!   explicit identifiers, for seeding with
//!   [`InMemoryDataService::with_records`](crate::InMemoryDataService::with_records).
//!
//! Generated records carry id `0`; the service assigns identifiers when it
//! stores them.

use crate::entity::{Entity, Id};
use crate::error::{Error, Result};
use crate::models::{Book, Customer, LibraryUser, Product};
use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const FIRST_NAMES: &[&str] = &[
    "John", "Joe", "Bill", "Kevin", "George", "Patrick", "Ellen", "Jane", "Nikki", "Sandra",
    "Kate", "Gwenn",
];

const LAST_NAMES: &[&str] = &[
    "Doe", "Black", "Murray", "Spacey", "Lucas", "Stewart", "Paige", "Brown", "Carson",
    "Bullock", "Moss", "Stefani",
];

const EMAIL_SEPARATORS: &[&str] = &["", "-", "_", "."];

const EMAIL_DOMAINS: &[&str] = &[
    "@seznam.cz",
    "@email.cz",
    "@gmail.com",
    "@yahoo.com",
    "@centrum.cz",
    "@hotmail.com",
    "@outlook.com",
];

const PRODUCT_NAMES: &[&str] = &["Driller", "Car", "Toilet", "Gun", "Baseball cap", "Shoes"];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Awesome",
    "Useful",
    "Great",
    "Amazing",
    "Cheap",
    "Handy",
    "Comfortable",
    "Easy-to-use",
    "Efficient",
    "Trendy",
    "Cool",
    "Powerful",
];

/// Most extra adjectives added after the leading one in a product description.
const MAX_EXTRA_ADJECTIVES: usize = 4;

/// Source of generated records of kind `T`.
pub trait FixtureGenerator<T: Entity>: Send {
    /// Generate `count` new records, all with id `0`.
    ///
    /// # Errors
    /// Returns `Err` if the generator cannot produce that many records
    fn generate(&mut self, count: usize) -> Result<Vec<T>>;
}

/// Entity kinds that ship with a default generator.
pub trait Fixture: Entity {
    type Generator: FixtureGenerator<Self>;

    /// Records generated when the configuration does not say otherwise.
    const DEFAULT_COUNT: usize;

    /// Build the default generator for this kind from `config`.
    ///
    /// # Errors
    /// Returns `Error::ConfigError` if `config` is invalid
    fn generator(config: &MockConfig) -> Result<Self::Generator>;
}

/// Configuration for mocked data services.
///
/// # Example
///
/// ```
/// use data_kit::fixture::MockConfig;
///
/// let config = MockConfig::default()
///     .with_count(10)
///     .with_price_range(5.0, 20.0)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MockConfig {
    /// Number of records to generate. `None` uses the kind's default.
    pub count: Option<usize>,

    /// Lowest generated product price.
    pub price_min: f32,

    /// Highest generated product price.
    pub price_max: f32,

    /// Seed for reproducible fixtures. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        MockConfig {
            count: None,
            price_min: 2.0,
            price_max: 150.0,
            seed: None,
        }
    }
}

impl MockConfig {
    /// Generate exactly `count` records.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the product price range.
    pub fn with_price_range(mut self, min: f32, max: f32) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Make generation reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    /// Returns `Error::ConfigError` for a non-finite, negative or inverted
    /// price range
    pub fn validate(&self) -> Result<()> {
        if !self.price_min.is_finite() || !self.price_max.is_finite() {
            return Err(Error::ConfigError("price range must be finite".to_string()));
        }
        if self.price_min < 0.0 {
            return Err(Error::ConfigError(format!(
                "minimum price {} is negative",
                self.price_min
            )));
        }
        if self.price_min > self.price_max {
            return Err(Error::ConfigError(format!(
                "minimum price {} is above maximum price {}",
                self.price_min, self.price_max
            )));
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

// ============================================================================
// Customers
// ============================================================================

/// Generates customers with random names and matching email addresses.
pub struct CustomerGenerator {
    rng: StdRng,
}

impl CustomerGenerator {
    pub fn new(rng: StdRng) -> Self {
        CustomerGenerator { rng }
    }

    /// Generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// `"{first} {last}"`, each part picked uniformly.
    pub fn name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("John");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Doe");
        format!("{} {}", first, last)
    }

    /// Email derived from `full_name`.
    ///
    /// A lower-cased prefix of the first and of the last name part, joined
    /// by a random separator, followed by a random domain. Example:
    /// `"Jane Moss"` → `"ja.mo@gmail.com"`.
    pub fn email(&mut self, full_name: &str) -> String {
        let mut parts = full_name.split_whitespace();
        let first = parts.next().unwrap_or("user");
        let last = parts.last().unwrap_or(first);

        let first = self.truncated(first);
        let separator = EMAIL_SEPARATORS.choose(&mut self.rng).copied().unwrap_or("");
        let last = self.truncated(last);
        let domain = EMAIL_DOMAINS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("@seznam.cz");

        format!("{}{}{}{}", first, separator, last, domain)
    }

    /// Lower-cased prefix of `part`, at least one character long and shorter
    /// than `part` whenever `part` has more than one character.
    fn truncated(&mut self, part: &str) -> String {
        let len = part.chars().count();
        let take = if len > 1 {
            self.rng.random_range(1..len)
        } else {
            len
        };
        part.chars().take(take).collect::<String>().to_lowercase()
    }
}

impl FixtureGenerator<Customer> for CustomerGenerator {
    fn generate(&mut self, count: usize) -> Result<Vec<Customer>> {
        Ok((0..count)
            .map(|_| {
                let name = self.name();
                let email = self.email(&name);
                Customer::new(name, email)
            })
            .collect())
    }
}

impl Fixture for Customer {
    type Generator = CustomerGenerator;
    const DEFAULT_COUNT: usize = 3;

    fn generator(config: &MockConfig) -> Result<CustomerGenerator> {
        config.validate()?;
        Ok(CustomerGenerator::new(config.rng()))
    }
}

// ============================================================================
// Products
// ============================================================================

/// Generates products with unique base names, adjective-laden descriptions
/// and random prices.
pub struct ProductGenerator {
    rng: StdRng,
    price_min: f32,
    price_max: f32,
}

impl ProductGenerator {
    /// # Errors
    /// Returns `Error::ConfigError` if the price range is invalid
    pub fn new(rng: StdRng, price_min: f32, price_max: f32) -> Result<Self> {
        MockConfig::default()
            .with_price_range(price_min, price_max)
            .validate()?;
        Ok(ProductGenerator {
            rng,
            price_min,
            price_max,
        })
    }

    /// Most products one batch can hold; base names are never repeated
    /// within a batch.
    pub fn capacity() -> usize {
        PRODUCT_NAMES.len()
    }

    /// One to five distinct adjectives followed by the lower-cased product
    /// name, e.g. `"Cheap handy trendy shoes"`.
    pub fn description(&mut self, product_name: &str) -> String {
        let count = 1 + self.rng.random_range(0..=MAX_EXTRA_ADJECTIVES);
        let mut words: Vec<String> = PRODUCT_ADJECTIVES
            .choose_multiple(&mut self.rng, count)
            .enumerate()
            .map(|(i, adjective)| {
                if i == 0 {
                    adjective.to_string()
                } else {
                    adjective.to_lowercase()
                }
            })
            .collect();
        words.push(product_name.to_lowercase());
        words.join(" ")
    }

    /// Uniform price in the configured range, rounded to 2 decimal places.
    pub fn price(&mut self) -> f32 {
        let (min, max) = (f64::from(self.price_min), f64::from(self.price_max));
        let raw = if max > min {
            self.rng.random_range(min..=max)
        } else {
            min
        };
        ((raw * 100.0).round() / 100.0) as f32
    }
}

impl FixtureGenerator<Product> for ProductGenerator {
    fn generate(&mut self, count: usize) -> Result<Vec<Product>> {
        if count > Self::capacity() {
            return Err(Error::ConfigError(format!(
                "cannot generate {} unique products, only {} base names available",
                count,
                Self::capacity()
            )));
        }

        let names: Vec<&str> = PRODUCT_NAMES
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();

        Ok(names
            .into_iter()
            .map(|name| {
                let description = self.description(name);
                let price = self.price();
                Product::new(name, description, price)
            })
            .collect())
    }
}

impl Fixture for Product {
    type Generator = ProductGenerator;
    const DEFAULT_COUNT: usize = 4;

    fn generator(config: &MockConfig) -> Result<ProductGenerator> {
        ProductGenerator::new(config.rng(), config.price_min, config.price_max)
    }
}

// ============================================================================
// Fixed samples
// ============================================================================

fn customer(id: Id, name: &str, email: &str) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn product(id: Id, name: &str, description: &str, price: f32) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
    }
}

fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, min, sec))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// Two customers with identifiers 1 and 2.
pub fn sample_customers() -> Vec<Customer> {
    vec![
        customer(1, "John Doe", "jdoe@seznam.cz"),
        customer(2, "Austin Powers", "ap007@email.cz"),
    ]
}

/// Three products with identifiers 1 to 3.
pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, "T-Shirt", "Red item-shirt size XXL", 1.25),
        product(2, "Jacket", "Brown insulated ski jacket", 2.50),
        product(3, "Cap", "Baseball cap with peak", 1.00),
    ]
}

/// Two books; book 2 is lent to library user 2.
pub fn sample_books() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            title: Some("The Bells".to_string()),
            author: Some("E. A. Poe".to_string()),
            year: 2001,
            isbn: Some("978-3-16-148410-0".to_string()),
            borrowed_by_user_id: None,
        },
        Book {
            id: 2,
            title: Some("Fairy Tale".to_string()),
            author: Some("Stephen King".to_string()),
            year: 2002,
            isbn: Some("191-1-52-359781-3".to_string()),
            borrowed_by_user_id: Some(2),
        },
    ]
}

/// Two library users; user 2 holds book 2.
pub fn sample_library_users() -> Vec<LibraryUser> {
    vec![
        LibraryUser {
            id: 1,
            name: Some("John Doe".to_string()),
            email: Some("xyz@seznam.cz".to_string()),
            date_joined: utc(2022, 8, 15, 9, 34, 10),
            borrowed_books: Vec::new(),
        },
        LibraryUser {
            id: 2,
            name: Some("Jane Smith".to_string()),
            email: Some("janeSm@email.cz".to_string()),
            date_joined: utc(2023, 10, 23, 13, 28, 30),
            borrowed_books: vec![2],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_customer_generator_is_plausible() {
        let mut generator = CustomerGenerator::seeded(7);
        let customers = generator.generate(20).expect("Failed to generate");

        assert_eq!(customers.len(), 20);
        for customer in &customers {
            assert_eq!(customer.id, 0);

            let parts: Vec<&str> = customer.name.split(' ').collect();
            assert_eq!(parts.len(), 2);
            assert!(FIRST_NAMES.contains(&parts[0]));
            assert!(LAST_NAMES.contains(&parts[1]));

            assert!(EMAIL_DOMAINS.iter().any(|d| customer.email.ends_with(d)));
            assert_eq!(customer.email, customer.email.to_lowercase());
            assert!(customer.validate().is_ok());
        }
    }

    #[test]
    fn test_email_prefixes_are_truncated() {
        let mut generator = CustomerGenerator::seeded(1);

        for _ in 0..50 {
            let email = generator.email("Gwenn Stefani");
            let local = email.split('@').next().expect("Email has no local part");
            assert!(local.starts_with('g'));
            // at most 4 + 1 + 6 characters
            assert!(local.len() <= 11);
            assert!(!local.contains("gwenn"));
        }
    }

    #[test]
    fn test_same_seed_same_customers() {
        let a = CustomerGenerator::seeded(99).generate(5).expect("Failed to generate");
        let b = CustomerGenerator::seeded(99).generate(5).expect("Failed to generate");
        assert_eq!(a, b);
    }

    #[test]
    fn test_product_names_unique_within_batch() {
        let config = MockConfig::default().with_seed(3);
        let mut generator = Product::generator(&config).expect("Failed to build generator");

        let products = generator
            .generate(ProductGenerator::capacity())
            .expect("Failed to generate");
        let names: HashSet<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), products.len());
    }

    #[test]
    fn test_product_generator_capacity() {
        let config = MockConfig::default().with_seed(3);
        let mut generator = Product::generator(&config).expect("Failed to build generator");

        let err = generator
            .generate(ProductGenerator::capacity() + 1)
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_product_description_and_price() {
        let config = MockConfig::default()
            .with_seed(11)
            .with_price_range(10.0, 20.0);
        let mut generator = Product::generator(&config).expect("Failed to build generator");

        for product in generator.generate(4).expect("Failed to generate") {
            let words: Vec<&str> = product.description.split(' ').collect();
            let name_words = product.name.split(' ').count();
            let adjectives = words.len() - name_words;
            assert!((1..=1 + MAX_EXTRA_ADJECTIVES).contains(&adjectives));
            assert!(product
                .description
                .ends_with(&product.name.to_lowercase()));

            let unique: HashSet<&str> = words[..adjectives].iter().copied().collect();
            assert_eq!(unique.len(), adjectives);

            assert!((10.0..=20.0).contains(&product.price));
            let cents = product.price * 100.0;
            assert!((cents - cents.round()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_fixed_price_range() {
        let mut generator =
            ProductGenerator::new(StdRng::seed_from_u64(0), 5.0, 5.0).expect("Failed to build");
        assert_eq!(generator.price(), 5.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(MockConfig::default().validate().is_ok());
        assert!(matches!(
            MockConfig::default().with_price_range(10.0, 1.0).validate(),
            Err(Error::ConfigError(_))
        ));
        assert!(MockConfig::default()
            .with_price_range(-1.0, 1.0)
            .validate()
            .is_err());
        assert!(MockConfig::default()
            .with_price_range(0.0, f32::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_samples_have_identifiers() {
        assert!(sample_customers().iter().all(|c| c.id != 0));
        assert!(sample_products().iter().all(|p| p.id != 0));
        assert_eq!(sample_books()[1].borrowed_by_user_id, Some(2));

        let users = sample_library_users();
        assert_eq!(users[1].borrowed_books, vec![2]);
        assert_eq!(users[0].date_joined.to_rfc3339(), "2022-08-15T09:34:10+00:00");
    }
}
