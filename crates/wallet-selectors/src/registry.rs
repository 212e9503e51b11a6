//! Per-parameter selector instances.
//!
//! Parameterized selectors (`make_select_*`) build a new memoized instance per
//! call. A [`SelectorRegistry`] keeps one shared instance per parameter so
//! repeated lookups for the same address reuse a cache, while different
//! addresses never share one.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

pub struct SelectorRegistry<K, S>
where
	K: Eq + Hash,
{
	name: &'static str,
	selectors: DashMap<K, Arc<S>>,
}

impl<K, S> SelectorRegistry<K, S>
where
	K: Eq + Hash + Clone,
{
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			selectors: DashMap::new(),
		}
	}

	/// Returns the instance for `key`, building it with `make` on first use.
	pub fn get_or_insert_with<F>(&self, key: K, make: F) -> Arc<S>
	where
		F: FnOnce(&K) -> S,
	{
		if let Some(existing) = self.selectors.get(&key) {
			return Arc::clone(existing.value());
		}

		let entry = self.selectors.entry(key.clone()).or_insert_with(|| {
			tracing::trace!(registry = self.name, "Creating selector instance");
			Arc::new(make(&key))
		});
		Arc::clone(entry.value())
	}
}
