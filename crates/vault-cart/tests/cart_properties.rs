//! End-to-end cart behaviour over real stores.
//!
//! Every scenario runs against both the in-memory store and the file
//! store, reloading through a fresh engine where a page reload would.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use vault_cart::prelude::*;
use vault_store::{FileStore, MemoryStore, PersistenceStore};

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(std::env::temp_dir().join(format!("vault-cart-it-{}-{}", std::process::id(), n)))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn product(id: &str, price: i64) -> ProductSnapshot {
    ProductSnapshot::new(id, format!("Listing {id}"), Money::from_major_units(price))
}

fn hydrated<S: PersistenceStore>(store: S) -> CartEngine<S> {
    let mut engine = CartEngine::new(store);
    engine.hydrate();
    engine
}

fn with_each_store(check: impl Fn(&dyn PersistenceStore)) {
    let memory = MemoryStore::new();
    check(&memory);

    let tmp = TempDir::new();
    let file = FileStore::open(&tmp.0).unwrap();
    check(&file);
}

#[test]
fn test_hydration_is_idempotent() {
    with_each_store(|store| {
        let mut writer = hydrated(store);
        writer.add_to_cart(product("p1", 500), 2);
        writer.add_to_cart(product("p2", 100), 1);

        let mut engine = CartEngine::new(store);
        let first = engine.hydrate().clone();
        let second = engine.hydrate().clone();
        let fresh = hydrated(store).cart().clone();

        assert_eq!(first, second);
        assert_eq!(first, fresh);
        assert_eq!(first.items_count(), 3);
    });
}

#[test]
fn test_legacy_array_migrates() {
    with_each_store(|store| {
        store
            .set(CART_STORAGE_KEY, r#"[{"id":"a","price":10,"quantity":2}]"#)
            .unwrap();

        let mut engine = hydrated(store);
        assert_eq!(engine.items().len(), 1);
        assert_eq!(engine.cart_item_quantity(&"a".into()), 2);

        // Next write normalizes to the envelope
        engine.add_to_cart(product("b", 1), 1);
        let raw = store.get(CART_STORAGE_KEY).unwrap().unwrap();
        let decoded = vault_cart::envelope::decode(&raw).unwrap();
        assert_eq!(decoded.shape, CartShape::Envelope);
        assert_eq!(decoded.version.as_deref(), Some(CART_VERSION));
    });
}

#[test]
fn test_additive_add() {
    with_each_store(|store| {
        let mut engine = hydrated(store);
        engine.add_to_cart(product("p1", 500), 1);
        engine.add_to_cart(product("p1", 500), 2);

        assert_eq!(engine.items().len(), 1);
        assert_eq!(engine.cart_item_quantity(&"p1".into()), 3);
        assert_eq!(engine.cart_total(), Money::from_major_units(1500));

        assert_eq!(hydrated(store).cart_total(), Money::from_major_units(1500));
    });
}

#[test]
fn test_quantity_floor_removes() {
    with_each_store(|store| {
        let mut engine = hydrated(store);
        engine.add_to_cart(product("p1", 10), 1);
        engine.update_quantity(&"p1".into(), 0);

        assert!(engine.items().iter().all(|i| i.id().as_str() != "p1"));
        assert_eq!(engine.cart_item_quantity(&"p1".into()), 0);
        assert_eq!(hydrated(store).cart_item_quantity(&"p1".into()), 0);
    });
}

#[test]
fn test_effective_stock_accounting() {
    with_each_store(|store| {
        let mut engine = hydrated(store);
        engine.add_to_cart(product("p1", 10), 2);
        let id = ProductId::new("p1");

        assert_eq!(engine.effective_available_stock(&id, 5), 3);
        assert_eq!(engine.effective_available_stock(&id, 2), 0);
        assert!(!engine.can_add_to_cart(&id, 2, 1));
    });
}

#[test]
fn test_clear_is_visible_to_reload() {
    with_each_store(|store| {
        let mut engine = hydrated(store);
        engine.add_to_cart(product("p1", 10), 4);
        engine.clear_cart();

        assert!(!store.exists(CART_STORAGE_KEY).unwrap());
        assert!(hydrated(store).cart().is_empty());
    });
}

#[test]
fn test_total_and_count() {
    with_each_store(|store| {
        let mut engine = hydrated(store);
        engine.add_to_cart(product("a", 100), 2);
        engine.add_to_cart(product("b", 50), 3);

        assert_eq!(engine.cart_total(), Money::from_major_units(350));
        assert_eq!(engine.cart_items_count(), 5);
    });
}

#[test]
fn test_corrupt_store_does_not_fail() {
    with_each_store(|store| {
        store.set(CART_STORAGE_KEY, "{not json").unwrap();
        let mut engine = CartEngine::new(store);
        assert!(engine.hydrate().is_empty());
    });
}

#[test]
fn test_checkout_pruning_flow() {
    with_each_store(|store| {
        let catalog = InMemoryCatalog::new()
            .with("a", StockLevel::new(5, 5))
            .with("b", StockLevel::new(5, 5))
            .with("c", StockLevel::new(5, 5));

        let mut engine = hydrated(store);
        for id in ["a", "b", "c"] {
            assert!(add_with_stock_check(&mut engine, &catalog, product(id, 20), 1).is_added());
        }

        // Backend reports b and c as sold in the meantime
        let removed = engine.remove_many(&[ProductId::new("b"), ProductId::new("c")]);
        assert_eq!(removed, 2);
        assert_eq!(hydrated(store).cart_total(), Money::from_major_units(20));
    });
}

#[test]
fn test_second_tab_last_write_wins() {
    let store = MemoryStore::new();
    let mut tab_a = hydrated(store.clone());
    let mut tab_b = hydrated(store.clone());

    tab_a.add_to_cart(product("a", 10), 1);
    tab_b.add_to_cart(product("b", 10), 1);

    let reloaded = hydrated(store);
    assert_eq!(reloaded.cart_item_quantity(&"a".into()), 0);
    assert_eq!(reloaded.cart_item_quantity(&"b".into()), 1);
}
