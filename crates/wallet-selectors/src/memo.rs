//! Memoization layer shared by the account and transaction selectors.
//!
//! A [`Selector`] pairs an input projection with a combiner. The projection
//! is cheap (it clones `Arc`s or copies small values out of the state); the
//! combiner does the real work and only runs when the projected inputs differ
//! from the previous call. Unchanged inputs return the cached `Arc` itself,
//! so callers can rely on pointer identity.

use arc_swap::ArcSwapOption;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use wallet_types::{Address, ChainId, RootState};

/// Identity comparison for selector inputs.
///
/// `Arc`s compare by pointer: the state tree is replaced, never mutated, so a
/// new pointer is the change signal. Plain values compare by value.
pub trait Memo {
	fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Memo for Arc<T> {
	fn same(&self, other: &Self) -> bool {
		Arc::ptr_eq(self, other)
	}
}

impl<T: Memo> Memo for Option<T> {
	fn same(&self, other: &Self) -> bool {
		match (self, other) {
			(Some(a), Some(b)) => a.same(b),
			(None, None) => true,
			_ => false,
		}
	}
}

impl<A: Memo, B: Memo> Memo for (A, B) {
	fn same(&self, other: &Self) -> bool {
		self.0.same(&other.0) && self.1.same(&other.1)
	}
}

impl<A: Memo, B: Memo, C: Memo> Memo for (A, B, C) {
	fn same(&self, other: &Self) -> bool {
		self.0.same(&other.0) && self.1.same(&other.1) && self.2.same(&other.2)
	}
}

macro_rules! memo_by_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl Memo for $ty {
				fn same(&self, other: &Self) -> bool {
					self == other
				}
			}
		)*
	};
}

memo_by_value!(bool, u32, u64, usize, String, Address, ChainId);

type InputFn<I> = dyn Fn(&RootState) -> I + Send + Sync;
type CombineFn<I, O> = dyn Fn(&I) -> O + Send + Sync;

struct Entry<I, O> {
	inputs: I,
	output: Arc<O>,
}

/// Memoized derivation over the state tree. Caches a single entry.
pub struct Selector<I, O> {
	name: Cow<'static, str>,
	input: Box<InputFn<I>>,
	combiner: Box<CombineFn<I, O>>,
	last: ArcSwapOption<Entry<I, O>>,
}

impl<I, O> Selector<I, O>
where
	I: Memo,
{
	pub fn new<F, C>(name: impl Into<Cow<'static, str>>, input: F, combiner: C) -> Self
	where
		F: Fn(&RootState) -> I + Send + Sync + 'static,
		C: Fn(&I) -> O + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			input: Box::new(input),
			combiner: Box::new(combiner),
			last: ArcSwapOption::empty(),
		}
	}

	/// Runs the selector against `state`.
	///
	/// Returns the cached output when the projected inputs are the same as on
	/// the previous call, otherwise recomputes and replaces the cache entry.
	pub fn select(&self, state: &RootState) -> Arc<O> {
		let inputs = (self.input)(state);

		if let Some(entry) = self.last.load_full() {
			if entry.inputs.same(&inputs) {
				return Arc::clone(&entry.output);
			}
		}

		tracing::trace!(selector = %self.name, "Recomputing selector");
		let output = Arc::new((self.combiner)(&inputs));
		self.last.store(Some(Arc::new(Entry {
			inputs,
			output: Arc::clone(&output),
		})));
		output
	}
}

impl<I, O> fmt::Debug for Selector<I, O> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Selector")
			.field("name", &self.name)
			.field("cached", &self.last.load().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use wallet_types::testing::{readonly_account, state_with};

	fn counting_selector(calls: Arc<AtomicUsize>) -> Selector<Arc<wallet_types::AccountsMap>, usize> {
		Selector::new(
			"account_count",
			|state: &RootState| Arc::clone(&state.wallet.accounts),
			move |accounts| {
				calls.fetch_add(1, Ordering::SeqCst);
				accounts.len()
			},
		)
	}

	#[test]
	fn test_returns_cached_output_for_same_inputs() {
		let calls = Arc::new(AtomicUsize::new(0));
		let selector = counting_selector(Arc::clone(&calls));
		let state = state_with([readonly_account("0x01")], None, []);

		let first = selector.select(&state);
		let second = selector.select(&state);

		assert_eq!(*first, 1);
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_unrelated_update_keeps_cache() {
		let calls = Arc::new(AtomicUsize::new(0));
		let selector = counting_selector(Arc::clone(&calls));
		let state = state_with([readonly_account("0x01")], None, []);

		let first = selector.select(&state);
		let next = state.with_active_account(Some("0x01".into()));
		let second = selector.select(&next);

		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_recomputes_when_input_reference_changes() {
		let calls = Arc::new(AtomicUsize::new(0));
		let selector = counting_selector(Arc::clone(&calls));
		let state = state_with([readonly_account("0x01")], None, []);

		let first = selector.select(&state);
		// Equal content, new allocation
		let next = state.with_accounts((*state.wallet.accounts).clone());
		let second = selector.select(&next);

		assert_eq!(first, second);
		assert!(!Arc::ptr_eq(&first, &second));
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn test_memo_value_and_option_semantics() {
		assert!(Some(ChainId::MAINNET).same(&Some(ChainId(1))));
		assert!(!Some(Address::from("0x01")).same(&None));
		assert!(Option::<u64>::None.same(&None));
		let shared = Arc::new(5u64);
		assert!((Arc::clone(&shared), true).same(&(Arc::clone(&shared), true)));
		assert!(!(Arc::new(5u64), true).same(&(Arc::new(5u64), true)));
	}
}
