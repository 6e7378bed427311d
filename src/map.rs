use std::{cmp::Ordering, fmt, fmt::Debug, iter::FusedIterator, marker::PhantomData, mem, vec};

use thiserror::Error;

/// Ordered map backed by a B-tree of minimum degree `T`, intended as the
/// in-memory index of a document store: keys are indexed field values, values
/// are opaque document locators.
///
/// Each node stores its entries in a sorted array with room for `2 * T - 1`
/// of them, allocated once when the node is created. `T` must be at least 2.
///
/// General guide to implementation:
///
/// The map has a length, a modification count, an ordering strategy
/// [`Comparator`] and an optional root node. [`OrderedTreeMap::insert`] works
/// top-down: a full root is split before the descent starts, a full child is
/// split before it is entered, so a single downward pass always ends at a
/// leaf with room to spare.
///
/// Iteration keeps an explicit stack of (node, entry index) frames. [`Iter`]
/// borrows the map for its whole life. [`Cursor`] instead records only the
/// index path and a snapshot of the modification count, so the map can be
/// mutated while a cursor is parked, and the next advance of the cursor
/// reports [`StaleCursorError`] rather than yielding misplaced entries.
pub struct OrderedTreeMap<K, V, const T: usize, C = NaturalOrder> {
    len: usize,
    mods: u64,
    root: Option<Box<Node<K, V, T>>>,
    cmp: C,
}

impl<K, V, const T: usize> Default for OrderedTreeMap<K, V, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, const T: usize> OrderedTreeMap<K, V, T> {
    /// Returns a new, empty map ordered by the [`Ord`] implementation of `K`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            len: Self::CHECK_T,
            mods: 0,
            root: None,
            cmp: NaturalOrder,
        }
    }
}

impl<K, V, F, const T: usize> OrderedTreeMap<K, V, T, CmpFn<F>>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Returns a new, empty map ordered by the supplied comparison function,
    /// which must be a total order over the keys. `K` itself does not need
    /// to implement [`Ord`].
    #[must_use]
    pub fn with_comparator(cmp: F) -> Self {
        Self {
            len: Self::CHECK_T,
            mods: 0,
            root: None,
            cmp: CmpFn(cmp),
        }
    }
}

impl<K, V, const T: usize, C> OrderedTreeMap<K, V, T, C> {
    /// This should produce a compile-time error if T is too small.
    const CHECK_T: usize = {
        assert!(T >= 2);
        0
    };

    /// Get number of key-value pairs in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the map empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert key-value pair into map, or if key is already in map, replaces value and returns old value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        if self.root.as_deref().is_some_and(Node::full) {
            self.grow_root();
        }
        let cmp = &self.cmp;
        let mut node: &mut Node<K, V, T> =
            self.root.get_or_insert_with(|| Box::new(Node::leaf()));
        loop {
            // Split-ahead keeps every entered node non-full.
            debug_assert!(!node.full());
            match node.entries.binary_search_by(|e| cmp.compare(&e.0, &key)) {
                Ok(i) => return Some(mem::replace(&mut node.entries[i].1, value)),
                Err(i) if node.is_leaf() => {
                    node.entries.insert(i, (key, value));
                    self.len += 1;
                    self.mods += 1;
                    return None;
                }
                Err(mut i) => {
                    if node.children[i].full() {
                        node.split_child(i);
                        self.mods += 1;
                        // The median promoted out of the child may be the key.
                        match cmp.compare(&key, &node.entries[i].0) {
                            Ordering::Less => {}
                            Ordering::Equal => {
                                return Some(mem::replace(&mut node.entries[i].1, value));
                            }
                            Ordering::Greater => i += 1,
                        }
                    }
                    node = &mut node.children[i];
                }
            }
        }
    }

    /// Get reference to the value corresponding to the key.
    ///
    /// The key is taken as `&K` rather than a borrowed form because the
    /// lookup goes through the map's [`Comparator`], which is only defined
    /// over `K` itself.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        C: Comparator<K>,
    {
        self.root.as_deref()?.find(key, &self.cmp)
    }

    /// Get mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V>
    where
        C: Comparator<K>,
    {
        self.root.as_deref_mut()?.find_mut(key, &self.cmp)
    }

    /// Does the map contain an entry for the specified key.
    pub fn contains_key(&self, key: &K) -> bool
    where
        C: Comparator<K>,
    {
        self.get(key).is_some()
    }

    /// Get references to the first key and value.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(child) = node.children.first() {
            node = child;
        }
        let (k, v) = node.entries.first()?;
        Some((k, v))
    }

    /// Get references to the last key and value.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(child) = node.children.last() {
            node = child;
        }
        let (k, v) = node.entries.last()?;
        Some((k, v))
    }

    /// Get iterator of references to key-value pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, T> {
        let mut iter = Iter {
            len: self.len,
            stack: StkVec::new(),
        };
        if let Some(root) = self.root.as_deref() {
            iter.push_left_edge(root);
        }
        iter
    }

    /// Get iterator of references to keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, T> {
        Keys(self.iter())
    }

    /// Get iterator of references to values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, T> {
        Values(self.iter())
    }

    /// Get a detached cursor parked before the first entry.
    ///
    /// The cursor borrows nothing, so the map is free to change while the
    /// cursor is parked; [`Cursor::next`] then fails with
    /// [`StaleCursorError`] instead of scanning a reshaped tree.
    #[must_use]
    pub fn cursor(&self) -> Cursor<K, V, T> {
        let mut path = StkVec::new();
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            path.push(0);
            node = n.children.first();
        }
        Cursor {
            path,
            mods: self.mods,
            _marker: PhantomData,
        }
    }

    // Hangs a full root under a fresh empty root and splits it. This is the
    // only place where the height of the tree increases.
    fn grow_root(&mut self) {
        if let Some(old_root) = self.root.take() {
            let mut root = Node::internal();
            root.children.push(*old_root);
            root.split_child(0);
            self.root = Some(Box::new(root));
            self.mods += 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn check(&self)
    where
        C: Comparator<K>,
    {
        let Some(root) = self.root.as_deref() else {
            assert_eq!(self.len, 0, "empty tree but len is nonzero");
            return;
        };
        assert!(!root.entries.is_empty(), "root node has no entries");
        let mut leaf_depth = None;
        let mut count = 0;
        let mut last = None;
        root.check_node(&self.cmp, true, 0, &mut leaf_depth, &mut count, &mut last);
        assert_eq!(count, self.len, "len does not match number of entries");
    }

    /// Entry count of every node, one row per level, in tree order.
    #[cfg(test)]
    pub(crate) fn shape(&self) -> Vec<Vec<usize>> {
        let mut levels = Vec::new();
        let mut level: Vec<&Node<K, V, T>> = match self.root.as_deref() {
            Some(root) => vec![root],
            None => return levels,
        };
        while !level.is_empty() {
            levels.push(level.iter().map(|n| n.entries.len()).collect());
            level = level.iter().flat_map(|n| n.children.iter()).collect();
        }
        levels
    }
} // End impl OrderedTreeMap

impl<K, V, const T: usize, C> Clone for OrderedTreeMap<K, V, T, C>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            mods: self.mods,
            root: self.root.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<K: Ord, V, const T: usize> FromIterator<(K, V)> for OrderedTreeMap<K, V, T> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> OrderedTreeMap<K, V, T> {
        let mut map = OrderedTreeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K, V, const T: usize, C> Extend<(K, V)> for OrderedTreeMap<K, V, T, C>
where
    C: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, const T: usize, C> IntoIterator for OrderedTreeMap<K, V, T, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, T>;

    /// Convert `OrderedTreeMap` to [`IntoIter`].
    fn into_iter(self) -> IntoIter<K, V, T> {
        IntoIter::new(self)
    }
}

impl<'a, K, V, const T: usize, C> IntoIterator for &'a OrderedTreeMap<K, V, T, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, T>;
    fn into_iter(self) -> Iter<'a, K, V, T> {
        self.iter()
    }
}

impl<K: Debug, V: Debug, const T: usize, C> Debug for OrderedTreeMap<K, V, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(feature = "serde")]
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize,
};

#[cfg(feature = "serde")]
impl<K, V, const T: usize, C> Serialize for OrderedTreeMap<K, V, T, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedTreeMapVisitor<K, V, const T: usize> {
    marker: PhantomData<fn() -> OrderedTreeMap<K, V, T>>,
}

#[cfg(feature = "serde")]
impl<K, V, const T: usize> OrderedTreeMapVisitor<K, V, T> {
    fn new() -> Self {
        OrderedTreeMapVisitor {
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, const T: usize> Visitor<'de> for OrderedTreeMapVisitor<K, V, T>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = OrderedTreeMap<K, V, T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("OrderedTreeMap")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = OrderedTreeMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, const T: usize> Deserialize<'de> for OrderedTreeMap<K, V, T>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedTreeMapVisitor::new())
    }
}

// Key ordering.

/// Ordering strategy for map keys.
pub trait Comparator<K> {
    /// Compare two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders keys by a comparison function, see [`OrderedTreeMap::with_comparator`].
#[derive(Clone, Copy)]
pub struct CmpFn<F>(F);

impl<K, F> Comparator<K> for CmpFn<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

// Vector types.

/// Height bound for iterator and cursor stacks. With `T >= 2` a tree this
/// tall holds more entries than an address space can.
const MAX_HEIGHT: usize = 64;

type StkVec<T> = arrayvec::ArrayVec<T, MAX_HEIGHT>;

// Tree node.

/// Sorted entries plus child subtrees. A leaf has no children, an inner node
/// has one child more than it has entries.
#[derive(Clone, Debug)]
struct Node<K, V, const T: usize> {
    entries: Vec<(K, V)>,
    children: Vec<Node<K, V, T>>,
}

impl<K, V, const T: usize> Node<K, V, T> {
    const MAX_ENTRIES: usize = 2 * T - 1;
    const MAX_CHILDREN: usize = 2 * T;

    // Storage is reserved up front so a node never reallocates.
    fn leaf() -> Self {
        Self {
            entries: Vec::with_capacity(Self::MAX_ENTRIES),
            children: Vec::new(),
        }
    }

    fn internal() -> Self {
        Self {
            entries: Vec::with_capacity(Self::MAX_ENTRIES),
            children: Vec::with_capacity(Self::MAX_CHILDREN),
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn full(&self) -> bool {
        self.entries.len() == Self::MAX_ENTRIES
    }

    /// Split the full child at `i`, promoting its median entry into `self`.
    ///
    /// The child keeps the lower `T - 1` entries and `T` children, the new
    /// right sibling takes the rest and is linked in at `i + 1`.
    fn split_child(&mut self, i: usize) {
        let child = &mut self.children[i];
        debug_assert!(child.full());
        let mut sibling = if child.is_leaf() {
            Node::leaf()
        } else {
            Node::internal()
        };
        sibling.entries.extend(child.entries.drain(T..));
        if !child.is_leaf() {
            sibling.children.extend(child.children.drain(T..));
        }
        let med = child.entries.pop().unwrap();
        debug_assert_eq!(child.entries.len(), T - 1);
        debug_assert_eq!(sibling.entries.len(), T - 1);
        self.entries.insert(i, med);
        self.children.insert(i + 1, sibling);
    }

    fn find<C: Comparator<K>>(&self, key: &K, cmp: &C) -> Option<&V> {
        match self.entries.binary_search_by(|e| cmp.compare(&e.0, key)) {
            Ok(i) => Some(&self.entries[i].1),
            Err(_) if self.is_leaf() => None,
            Err(i) => self.children[i].find(key, cmp),
        }
    }

    fn find_mut<C: Comparator<K>>(&mut self, key: &K, cmp: &C) -> Option<&mut V> {
        match self.entries.binary_search_by(|e| cmp.compare(&e.0, key)) {
            Ok(i) => Some(&mut self.entries[i].1),
            Err(_) if self.is_leaf() => None,
            Err(i) => self.children[i].find_mut(key, cmp),
        }
    }

    #[cfg(test)]
    fn check_node<'a, C: Comparator<K>>(
        &'a self,
        cmp: &C,
        is_root: bool,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        count: &mut usize,
        last: &mut Option<&'a K>,
    ) {
        assert!(self.entries.len() <= Self::MAX_ENTRIES, "node is over full");
        if !is_root {
            assert!(self.entries.len() >= T - 1, "non-root node is under full");
        }
        if self.is_leaf() {
            match *leaf_depth {
                Some(d) => assert_eq!(d, depth, "leaves at unequal depths"),
                None => *leaf_depth = Some(depth),
            }
        } else {
            assert_eq!(
                self.children.len(),
                self.entries.len() + 1,
                "wrong number of children"
            );
        }
        for (i, (k, _)) in self.entries.iter().enumerate() {
            if let Some(child) = self.children.get(i) {
                child.check_node(cmp, false, depth + 1, leaf_depth, count, last);
            }
            if let Some(prev) = *last {
                assert_eq!(cmp.compare(prev, k), Ordering::Less, "keys out of order");
            }
            *last = Some(k);
            *count += 1;
        }
        if let Some(child) = self.children.last() {
            child.check_node(cmp, false, depth + 1, leaf_depth, count, last);
        }
    }
}

// Iterators.

/// Consuming iterator returned by [`OrderedTreeMap::into_iter`].
pub struct IntoIter<K, V, const T: usize> {
    len: usize,
    stack: StkVec<OwnedFrame<K, V, T>>,
}

struct OwnedFrame<K, V, const T: usize> {
    entries: vec::IntoIter<(K, V)>,
    children: vec::IntoIter<Node<K, V, T>>,
}

impl<K, V, const T: usize> IntoIter<K, V, T> {
    fn new<C>(map: OrderedTreeMap<K, V, T, C>) -> Self {
        let mut iter = IntoIter {
            len: map.len,
            stack: StkVec::new(),
        };
        if let Some(root) = map.root {
            iter.push_left_edge(*root);
        }
        iter
    }

    fn push_left_edge(&mut self, mut node: Node<K, V, T>) {
        loop {
            let Node { entries, children } = node;
            let mut children = children.into_iter();
            let first = children.next();
            self.stack.push(OwnedFrame {
                entries: entries.into_iter(),
                children,
            });
            match first {
                Some(child) => node = child,
                None => return,
            }
        }
    }
}

impl<K, V, const T: usize> Iterator for IntoIter<K, V, T> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            if let Some(entry) = frame.entries.next() {
                if let Some(child) = frame.children.next() {
                    self.push_left_edge(child);
                }
                self.len -= 1;
                return Some(entry);
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}
impl<K, V, const T: usize> ExactSizeIterator for IntoIter<K, V, T> {
    fn len(&self) -> usize {
        self.len
    }
}
impl<K, V, const T: usize> FusedIterator for IntoIter<K, V, T> {}

/// Iterator returned by [`OrderedTreeMap::iter`].
///
/// Each stack frame pairs a node with the index of the next entry to yield
/// there; a frame below another is the child subtree the walk is currently
/// inside.
#[derive(Clone)]
pub struct Iter<'a, K, V, const T: usize> {
    len: usize,
    stack: StkVec<(&'a Node<K, V, T>, usize)>,
}

impl<'a, K, V, const T: usize> Iter<'a, K, V, T> {
    fn push_left_edge(&mut self, mut node: &'a Node<K, V, T>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => return,
            }
        }
    }
}

impl<'a, K, V, const T: usize> Iterator for Iter<'a, K, V, T> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let (node, i) = *frame;
            if i < node.entries.len() {
                frame.1 += 1;
                if let Some(child) = node.children.get(i + 1) {
                    self.push_left_edge(child);
                }
                self.len -= 1;
                let (k, v) = &node.entries[i];
                return Some((k, v));
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}
impl<'a, K, V, const T: usize> ExactSizeIterator for Iter<'a, K, V, T> {
    fn len(&self) -> usize {
        self.len
    }
}
impl<'a, K, V, const T: usize> FusedIterator for Iter<'a, K, V, T> {}

/// Iterator returned by [`OrderedTreeMap::keys`].
#[derive(Clone)]
pub struct Keys<'a, K, V, const T: usize>(Iter<'a, K, V, T>);

impl<'a, K, V, const T: usize> Iterator for Keys<'a, K, V, T> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<'a, K, V, const T: usize> ExactSizeIterator for Keys<'a, K, V, T> {
    fn len(&self) -> usize {
        self.0.len()
    }
}
impl<'a, K, V, const T: usize> FusedIterator for Keys<'a, K, V, T> {}

/// Iterator returned by [`OrderedTreeMap::values`].
#[derive(Clone)]
pub struct Values<'a, K, V, const T: usize>(Iter<'a, K, V, T>);

impl<'a, K, V, const T: usize> Iterator for Values<'a, K, V, T> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<'a, K, V, const T: usize> ExactSizeIterator for Values<'a, K, V, T> {
    fn len(&self) -> usize {
        self.0.len()
    }
}
impl<'a, K, V, const T: usize> FusedIterator for Values<'a, K, V, T> {}

// Cursors.

/// Error returned by [`Cursor::next`] when the map has been structurally
/// modified since the cursor was created.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("cursor is stale: created at revision {seen}, map is at revision {now}")]
pub struct StaleCursorError {
    /// Modification count the cursor was created at.
    pub seen: u64,
    /// Modification count of the map at the failed advance.
    pub now: u64,
}

/// Detached scanning position over an [`OrderedTreeMap`], returned by
/// [`OrderedTreeMap::cursor`].
///
/// Unlike [`Iter`] a cursor borrows nothing from the map. It records the
/// index path to its position and a snapshot of the modification count, and
/// resolves both against the map passed to [`Cursor::next`]. Inserts that
/// reshape the tree in between, value overwrites excepted, leave the saved
/// path meaningless, so the advance fails with [`StaleCursorError`] instead
/// of yielding misplaced entries.
///
/// A cursor is only meaningful with the map that created it.
pub struct Cursor<K, V, const T: usize> {
    // One index per level: the next entry to yield in the bottom frame, the
    // child taken in every frame above it.
    path: StkVec<usize>,
    mods: u64,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, const T: usize> Cursor<K, V, T> {
    /// Advance to the next entry in ascending key order, or `Ok(None)` once
    /// the map is exhausted.
    pub fn next<'a, C>(
        &mut self,
        map: &'a OrderedTreeMap<K, V, T, C>,
    ) -> Result<Option<(&'a K, &'a V)>, StaleCursorError> {
        if self.mods != map.mods {
            return Err(StaleCursorError {
                seen: self.mods,
                now: map.mods,
            });
        }
        let Some(root) = map.root.as_deref() else {
            return Ok(None);
        };
        // Chase the saved path down from the root to rebuild the frames.
        let mut chain: StkVec<&Node<K, V, T>> = StkVec::new();
        let mut node = root;
        for d in 0..self.path.len() {
            chain.push(node);
            if d + 1 < self.path.len() {
                node = &node.children[self.path[d]];
            }
        }
        loop {
            let Some(&node) = chain.last() else {
                return Ok(None);
            };
            let i = self.path[chain.len() - 1];
            if i < node.entries.len() {
                self.path[chain.len() - 1] += 1;
                if let Some(mut child) = node.children.get(i + 1) {
                    // Park on the leftmost entry right of entry i.
                    loop {
                        self.path.push(0);
                        match child.children.first() {
                            Some(c) => child = c,
                            None => break,
                        }
                    }
                }
                let (k, v) = &node.entries[i];
                return Ok(Some((k, v)));
            }
            chain.pop();
            self.path.pop();
        }
    }
}
