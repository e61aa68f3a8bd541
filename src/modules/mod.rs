pub mod books;
pub mod pets;

use std::sync::Arc;

use catalog_db::DocumentStore;
use catalog_kernel::ModuleRegistry;

/// Register the books and pets modules, both backed by `store`
pub fn register_all(registry: &mut ModuleRegistry, store: Arc<dyn DocumentStore>) {
    registry.register(books::create_module(store.clone()));
    registry.register(pets::create_module(store));
}
