use std::cmp::Ordering;

/// Identifier of a single item.
pub type Item = usize;

/// Memory-efficient itemset storage using flat arrays
#[derive(Debug, Clone, Default)]
pub struct ItemsetStorage {
    items: Vec<Item>,
    offsets: Vec<(usize, usize)>,
    supports: Vec<usize>,
}

impl ItemsetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(estimated_items: usize, estimated_itemsets: usize) -> Self {
        Self {
            items: Vec::with_capacity(estimated_items),
            offsets: Vec::with_capacity(estimated_itemsets),
            supports: Vec::with_capacity(estimated_itemsets),
        }
    }

    /// Appends an itemset that is already strictly ascending.
    pub fn push(&mut self, items: &[Item], support: usize) -> usize {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        let start = self.items.len();
        self.items.extend_from_slice(items);
        self.offsets.push((start, items.len()));
        self.supports.push(support);
        self.offsets.len() - 1
    }

    pub fn get_itemset(&self, idx: usize) -> &[Item] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub fn support(&self, idx: usize) -> usize {
        self.supports[idx]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// All itemsets of one size, kept in lexicographic order.
///
/// Used both for the candidates of a level, whose supports stay at 0
/// until counted, and for the frequent itemsets that survive the filter.
#[derive(Debug, Clone)]
pub struct ItemsetLevel {
    storage: ItemsetStorage,
    pub itemset_size: usize,
}

impl ItemsetLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            storage: ItemsetStorage::new(),
            itemset_size,
        }
    }

    pub fn with_capacity(itemset_size: usize, estimated_itemsets: usize) -> Self {
        let estimated_items = estimated_itemsets * itemset_size;
        Self {
            storage: ItemsetStorage::with_capacity(estimated_items, estimated_itemsets),
            itemset_size,
        }
    }

    pub fn add_itemset(&mut self, items: &[Item], support: usize) -> usize {
        debug_assert_eq!(items.len(), self.itemset_size);
        debug_assert!(
            self.storage.is_empty()
                || self.get_itemset(self.storage.len() - 1) < items,
            "itemsets must be appended in lexicographic order"
        );
        self.storage.push(items, support)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn get_itemset(&self, idx: usize) -> &[Item] {
        self.storage.get_itemset(idx)
    }

    pub fn support(&self, idx: usize) -> usize {
        self.storage.support(idx)
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[Item]> {
        (0..self.storage.len()).map(move |idx| self.get_itemset(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[Item], usize)> {
        (0..self.storage.len()).map(move |idx| (self.get_itemset(idx), self.support(idx)))
    }

    /// Binary search over the lexicographic order.
    pub fn position(&self, itemset: &[Item]) -> Option<usize> {
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.get_itemset(mid).cmp(itemset) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Some(mid),
            }
        }
        None
    }

    pub fn contains(&self, itemset: &[Item]) -> bool {
        self.position(itemset).is_some()
    }
}

/// Append-only accumulator of every frequent itemset found, one level per size.
#[derive(Debug, Clone, Default)]
pub struct FrequentItemsets {
    levels: Vec<ItemsetLevel>,
}

impl FrequentItemsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the frequent itemsets of the next size.
    ///
    /// Empty levels are dropped so that `levels()[k - 1]` always holds size `k`.
    /// Returns whether the level was stored.
    pub fn push_level(&mut self, level: ItemsetLevel) -> bool {
        if level.is_empty() {
            return false;
        }
        debug_assert_eq!(
            level.itemset_size,
            self.levels.len() + 1,
            "levels must be pushed in increasing itemset size"
        );
        self.levels.push(level);
        true
    }

    pub fn levels(&self) -> &[ItemsetLevel] {
        &self.levels
    }

    /// Frequent itemsets of size `itemset_size`, if any were found.
    pub fn level(&self, itemset_size: usize) -> Option<&ItemsetLevel> {
        itemset_size
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx))
    }

    pub fn max_itemset_size(&self) -> usize {
        self.levels.len()
    }

    /// Total number of frequent itemsets over all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(ItemsetLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Itemsets level by level, lexicographic within a level.
    pub fn iter(&self) -> impl Iterator<Item = (&[Item], usize)> {
        self.levels.iter().flat_map(ItemsetLevel::iter)
    }

    pub fn support_of(&self, itemset: &[Item]) -> Option<usize> {
        let level = self.level(itemset.len())?;
        level.position(itemset).map(|idx| level.support(idx))
    }
}
