//! Registry behaviour against real catalog files and counting sources.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use rust_decimal_macros::dec;
use tally_catalog::{
    CatalogConfig, CatalogError, CatalogResult, ConfigSource, LoadedProduct, ProductRegistry,
    ProductSource,
};
use tally_core::{Money, ProductRecord, Settings};

const CATALOG: &str = r#"
[products.test]
name = "Test Product"
price = "50.00"
tags = ["test"]
sale = "spring"

[products.test.settings]
original_setting = "original"

[products.jacket]
name = "Rain Jacket"
price = "149.99"
tags = ["outerwear"]
sale = "clearance"

[sales.spring]
[[sales.spring.discounts]]
tags = ["test"]
percentage = "10"

[sales.spring.discounts.override_settings]
overridden_setting = "overridden"

[sales.clearance]
[[sales.clearance.discounts]]
tags = ["outerwear"]
percentage = "0.5"
round_down = true
"#;

/// Wraps a source and counts how often it is consulted.
struct CountingSource {
    inner: ConfigSource,
    loads: Arc<AtomicUsize>,
    delay: Duration,
}

impl ProductSource for CountingSource {
    fn load(&self, sku: &str) -> CatalogResult<LoadedProduct> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.inner.load(sku)
    }
}

fn counting_registry(delay: Duration) -> (ProductRegistry, Arc<AtomicUsize>) {
    let loads = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        inner: ConfigSource::new(CatalogConfig::from_toml_str(CATALOG).unwrap()),
        loads: Arc::clone(&loads),
        delay,
    };
    (ProductRegistry::new(source), loads)
}

#[test]
fn test_discounted_product_from_catalog() {
    let registry = ProductRegistry::from_config(CatalogConfig::from_toml_str(CATALOG).unwrap());
    let product = registry.get("test").unwrap();

    assert_eq!(product.sku(), "test");
    assert_eq!(product.original_price().amount(), dec!(50.00));
    assert_eq!(product.current_price().amount(), dec!(45.00));
    assert_eq!(product.discount_percentage().value(), dec!(10));
    assert_eq!(product.discount_dollars().amount(), dec!(5.00));
    assert_eq!(
        product.setting("original_setting").and_then(|v| v.as_str()),
        Some("original")
    );
    assert_eq!(
        product.setting("overridden_setting").and_then(|v| v.as_str()),
        Some("overridden")
    );
}

#[test]
fn test_round_down_sale_from_catalog() {
    let registry = ProductRegistry::from_config(CatalogConfig::from_toml_str(CATALOG).unwrap());
    let jacket = registry.get("jacket").unwrap();

    assert_eq!(jacket.discount_dollars().amount(), dec!(0.75));
    assert_eq!(jacket.current_price().amount(), dec!(149.00));
}

#[test]
fn test_repeat_get_returns_same_instance_and_loads_once() {
    let (registry, loads) = counting_registry(Duration::ZERO);

    let first = registry.get("test").unwrap();
    let second = registry.get("test").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(registry.is_cached("test"));
    assert_eq!(registry.cached_count(), 1);
}

#[test]
fn test_concurrent_first_access_loads_once() {
    let (registry, loads) = counting_registry(Duration::from_millis(20));
    let barrier = Barrier::new(8);

    let products: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    registry.get("test").unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(products.iter().all(|p| Arc::ptr_eq(p, &products[0])));
}

#[test]
fn test_missing_sku_is_not_found_and_retried() {
    let (registry, loads) = counting_registry(Duration::ZERO);

    let err = registry.get("ghost").unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
    assert!(registry.get("ghost").is_err());

    assert_eq!(loads.load(Ordering::SeqCst), 2);
    assert_eq!(registry.cached_count(), 0);
}

#[test]
fn test_create_bypasses_cache() {
    let (registry, loads) = counting_registry(Duration::ZERO);

    let product = ProductRegistry::create(
        "test",
        "Handmade",
        Money::from_cents(1000),
        vec![],
        Settings::new(),
    );

    assert_eq!(product.current_price(), Money::from_cents(1000));
    assert!(!registry.is_cached("test"));
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_custom_source() {
    struct Fixed;

    impl ProductSource for Fixed {
        fn load(&self, sku: &str) -> CatalogResult<LoadedProduct> {
            let record = ProductRecord::new(sku, "Fixed", Money::from_cents(500), vec![], Settings::new());
            let discount = ProductRegistry::new_discount(
                tally_core::Percentage::new(dec!(20)),
                false,
                Settings::new(),
            );
            Ok((record, Some(discount)))
        }
    }

    let registry = ProductRegistry::new(Fixed);
    let product = registry.get("anything").unwrap();
    assert_eq!(product.sku(), "anything");
    assert_eq!(product.current_price(), Money::from_cents(400));
}

#[test]
fn test_load_from_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let registry = ProductRegistry::load(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(registry.get("test").unwrap().current_price(), Money::from_cents(4500));
}

#[test]
fn test_load_from_json_file() {
    let json = r#"{
        "products": { "mug": { "name": "Mug", "price": 12.5, "sale": "all" } },
        "sales": { "all": { "discounts": [ { "tags": ["x"], "percentage": 50 } ] } }
    }"#;
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let registry = ProductRegistry::load(Some(file.path().to_path_buf())).unwrap();
    let mug = registry.get("mug").unwrap();
    // No tags, so the sale's discount never matches
    assert!(!mug.has_discount());
    assert_eq!(mug.current_price().amount(), dec!(12.50));
}

#[test]
fn test_json_null_override_falls_through() {
    let json = r#"{
        "products": {
            "tee": { "name": "Tee", "price": "20.00", "tags": ["apparel"], "sale": "summer",
                     "settings": { "badge": "regular" } }
        },
        "sales": {
            "summer": { "discounts": [ { "tags": ["apparel"], "percentage": 10,
                                         "override_settings": { "badge": null } } ] }
        }
    }"#;
    let config = CatalogConfig::from_json_str(json).unwrap();
    let registry = ProductRegistry::from_config(config);
    let tee = registry.get("tee").unwrap();

    assert!(tee.has_discount());
    assert_eq!(tee.current_price().amount(), dec!(18.00));
    assert_eq!(tee.setting("badge").and_then(|v| v.as_str()), Some("regular"));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CatalogConfig::load(Some(dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_invalid_catalog_file_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"[products.a]\nname = \"A\"\nprice = 1\nsale = \"missing\"\n")
        .unwrap();

    let err = ProductRegistry::load(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidConfig(_)));
}
