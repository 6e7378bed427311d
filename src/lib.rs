#![deny(missing_docs)]

//! This crate implements [OrderedTreeMap], an ordered map meant to serve as the
//! in-memory index of a document store: keys are indexed field values, values are
//! opaque document locators.
//!
//! One difference from [std::collections::BTreeMap] is the detached [Cursor], which
//! borrows nothing from the map, so the map can be modified while a scan is parked;
//! the cursor then reports [StaleCursorError] on its next advance. Another is that
//! the ordering can be supplied as a comparison function instead of relying on [Ord],
//! see [OrderedTreeMap::with_comparator].
//!
//! Most of the implementation is in the [map] module, see [map::OrderedTreeMap].
//!
//! # Example
//!
//! ```
//!     use btree_index::OrderedTreeMap;
//!     let mut index = OrderedTreeMap::new();
//!     index.insert("England", 1001);
//!     index.insert("France", 1002);
//!     assert_eq!(index.get(&"France"), Some(&1002));
//! ```
//!
//!# Features
//!
//! This crate supports the following cargo features:
//! - `serde` : enables serialisation of [OrderedTreeMap] via serde crate.

/// Module with version of OrderedTreeMap that allows the minimum degree to be specified as generic constant.
pub mod map;

// Types independent of the degree.

pub use map::{CmpFn, Comparator, NaturalOrder, StaleCursorError};

/// Default minimum degree ( each node holds between DT - 1 and 2 * DT - 1 entries ).
pub const DT: usize = 500;

/// OrderedTreeMap with default minimum degree [DT].
pub type OrderedTreeMap<K, V, C = NaturalOrder> = map::OrderedTreeMap<K, V, DT, C>;

/// Consuming iterator returned by [OrderedTreeMap::into_iter].
pub type IntoIter<K, V> = map::IntoIter<K, V, DT>;

/// Iterator returned by [OrderedTreeMap::iter].
pub type Iter<'a, K, V> = map::Iter<'a, K, V, DT>;

/// Iterator returned by [OrderedTreeMap::keys].
pub type Keys<'a, K, V> = map::Keys<'a, K, V, DT>;

/// Iterator returned by [OrderedTreeMap::values].
pub type Values<'a, K, V> = map::Values<'a, K, V, DT>;

/// Cursor returned by [OrderedTreeMap::cursor].
pub type Cursor<K, V> = map::Cursor<K, V, DT>;

// Tests.

/* mimalloc cannot be used with miri */
#[cfg(all(test, not(miri)))]
use mimalloc::MiMalloc;

#[cfg(all(test, not(miri)))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
