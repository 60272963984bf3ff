//! Capacity-bounded entity store.

/// Ordered collection of entities that never grows past its cap.
///
/// Store order is draw order.
#[derive(Debug, Clone)]
pub struct Store<T> {
    items: Vec<T>,
    cap: usize,
}

impl<T> Store<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap.min(1024)),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    /// Append an entity. Returns `false` and drops it when the store is full.
    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Append an entity, evicting the oldest ones to make room.
    pub fn push_evicting(&mut self, item: T) {
        if self.cap == 0 {
            return;
        }
        let overflow = (self.items.len() + 1).saturating_sub(self.cap);
        self.items.drain(..overflow);
        self.items.push(item);
    }

    /// Replace the contents with up to `cap` entities.
    pub fn refill(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.clear();
        self.items.extend(items.into_iter().take(self.cap));
    }

    /// Keep only the entities for which `keep` returns true.
    pub fn retain_mut(&mut self, keep: impl FnMut(&mut T) -> bool) {
        self.items.retain_mut(keep);
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.items.get_mut(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T> IntoIterator for &'a Store<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Store<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
