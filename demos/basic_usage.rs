//! Basic usage example of the data services.

use data_kit::error::Result;
use data_kit::fixture::{sample_customers, MockConfig};
use data_kit::models::{Customer, Product};
use data_kit::observability::CountingMetrics;
use data_kit::{DataService, InMemoryDataService, Library, MockedDataService};
use std::sync::Arc;

/// What a request handler looks like: it only knows the trait.
async fn show_customer<S: DataService<Customer>>(service: &S, id: u32) -> Result<()> {
    match service.get_by_id(id).await? {
        Some(customer) => println!("   ✓ {} -> {} <{}>", id, customer.name, customer.email),
        None => println!("   ✗ {} -> not found (404)", id),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .try_init()
        .ok();

    println!("\n=== Data Kit - Basic Example ===\n");

    // 1. Create the service once, with sample records
    println!("1. Creating in-memory customer service...");
    let metrics = Arc::new(CountingMetrics::new());
    let customers =
        InMemoryDataService::with_records(sample_customers())?.with_metrics(metrics.clone());
    println!("   ✓ {} customers loaded\n", customers.count().await?);

    // 2. Reads
    println!("2. Looking customers up:");
    show_customer(&customers, 1).await?;
    show_customer(&customers, 7).await?;
    println!();

    // 3. Add - the service assigns the identifier
    println!("3. Adding a customer:");
    let amy = customers.add(Customer::new("Amy Pond", "amy@seznam.cz")).await?;
    println!("   ✓ Created {} with id {} (201)\n", amy.name, amy.id);

    // 4. Update and delete
    println!("4. Updating and deleting:");
    let renamed = Customer {
        name: "Amelia Pond".to_string(),
        ..amy.clone()
    };
    if let Some(updated) = customers.update(renamed).await? {
        println!("   ✓ Updated {} -> {}", updated.id, updated.name);
    }
    if customers.delete(2).await?.is_some() {
        println!("   ✓ Deleted 2 (204)");
    }
    if customers.delete(2).await?.is_none() {
        println!("   ✓ Deleting 2 again -> not found (404)\n");
    }

    // 5. Another kind on the same store
    println!("5. Products share the store, not the identifiers:");
    let products = customers.for_kind::<Product>();
    let cap = products
        .add(Product::new("Cap", "Baseball cap with peak", 1.0))
        .await?;
    println!("   ✓ Product {} has id {}", cap.name, cap.id);
    customers.store().log_stats().await;
    println!("   ✓ Store: {:?}\n", customers.store().stats().await.per_kind);

    // 6. Mocked service
    println!("6. Mocked product service:");
    let config = MockConfig::default()
        .with_count(4)
        .with_price_range(5.0, 50.0);
    let mocked = MockedDataService::<Product>::with_config(&config)?;
    for product in mocked.get_all().await? {
        println!(
            "   ✓ {} {} - {} (${:.2})",
            product.id, product.name, product.description, product.price
        );
    }
    let stats = mocked.inner().store().stats().await;
    println!("   ✓ Mocked store holds {} records\n", stats.total_records);

    // 7. Library lending
    println!("7. Library lending:");
    let library = Library::with_samples()?;
    match library.borrow_book(2, 1).await {
        Ok(_) => println!("   ✗ Book 2 should already be lent"),
        Err(e) => println!("   ✓ {}", e),
    }
    library.return_book(2).await?;
    if let Some(book) = library.borrow_book(2, 1).await? {
        println!(
            "   ✓ {:?} now borrowed by user {:?}",
            book.title, book.borrowed_by_user_id
        );
    }
    if let Some(user) = library.delete_user(1).await? {
        println!("   ✓ {:?} left; their books are back on the shelf\n", user.name);
    }

    println!("Requests served: {:?}", metrics.counts());
    println!("\n=== Example Complete ===\n");

    Ok(())
}
