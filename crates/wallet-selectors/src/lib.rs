//! Selector layer for the wallet state tree.
//!
//! Selectors are pure functions of a [`RootState`](wallet_types::RootState).
//! They never mutate state and never fail: missing data yields `None`,
//! `false`, an empty collection or a documented default.
//!
//! Derived selectors are memoized (see [`memo`]). Module-level selectors keep
//! one process-wide cache each; `make_select_*` factories return a fresh
//! [`Selector`] per call, and the `select_*(state, address)` helpers share
//! one instance per address through a [`SelectorRegistry`].

/// Account, active account and wallet settings selectors.
pub mod accounts;
/// Single-entry memoization used by every derived selector.
pub mod memo;
/// Per-parameter selector instances.
pub mod registry;
/// Transaction lookup, recipient and incomplete-transaction selectors.
pub mod transactions;

pub use accounts::*;
pub use memo::{Memo, Selector};
pub use registry::SelectorRegistry;
pub use transactions::*;
