//! Slab-backed doubly linked recency list shared by the caches.
//!
//! Slots are indices into a parallel entry store kept by the caller;
//! this list only orders them. Head is most recently used, tail is the
//! eviction candidate.

#[derive(Debug, Clone, Copy, Default)]
struct Links {
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct LruList {
    links: Vec<Links>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl LruList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocates a slot and attaches it at the head.
    pub(crate) fn insert_front(&mut self) -> usize {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.links.push(Links::default());
                self.links.len() - 1
            }
        };
        self.attach_front(slot);
        slot
    }

    fn attach_front(&mut self, slot: usize) {
        self.links[slot] = Links {
            prev: None,
            next: self.head,
        };
        if let Some(head) = self.head {
            self.links[head].prev = Some(slot);
        } else {
            self.tail = Some(slot);
        }
        self.head = Some(slot);
    }

    fn detach(&mut self, slot: usize) {
        let Links { prev, next } = self.links[slot];
        match prev {
            Some(prev) => self.links[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.links[next].prev = prev,
            None => self.tail = prev,
        }
        self.links[slot] = Links::default();
    }

    /// Moves an attached slot to the head.
    pub(crate) fn touch(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.detach(slot);
        self.attach_front(slot);
    }

    /// Detaches and frees a slot.
    pub(crate) fn remove(&mut self, slot: usize) {
        self.detach(slot);
        self.free.push(slot);
    }

    /// Detaches and frees the tail, returning its slot.
    pub(crate) fn evict_tail(&mut self) -> Option<usize> {
        let tail = self.tail?;
        self.remove(tail);
        Some(tail)
    }

    pub(crate) fn clear(&mut self) {
        self.links.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    #[cfg(test)]
    pub(crate) fn order(&self) -> Vec<usize> {
        let mut slots = Vec::new();
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            slots.push(slot);
            cursor = self.links[slot].next;
        }
        slots
    }
}
