//! Translation lookaside buffer with second-chance replacement.
//!
//! The TLB is a small fully-associative cache of `page -> frame` mappings sitting in front
//! of the page table. Entries live in a fixed ring; a clock hand walks the ring on every
//! insertion looking for a victim:
//!
//! - An entry with its reference bit clear is replaced.
//! - An entry with its reference bit set loses the bit and is skipped (its second chance).
//!
//! Reference bits are set on insertion and on every hit, so a full pass over a ring of
//! referenced entries clears them all and the scan always ends within two passes.

use log::debug;

use crate::{FrameNumber, PageNumber, layout};

/// A slot of the TLB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TlbEntry {
    /// The cached mapping, or `None` for a slot that was never filled.
    mapping: Option<(PageNumber, FrameNumber)>,
    /// Second-chance reference bit.
    referenced: bool,
}

impl TlbEntry {
    /// An unused slot: no mapping, reference bit clear.
    pub const EMPTY: Self = Self {
        mapping: None,
        referenced: false,
    };

    /// Returns the logical page cached in this slot.
    pub fn page(&self) -> Option<PageNumber> {
        self.mapping.map(|(page, _)| page)
    }

    /// Returns the frame cached in this slot.
    pub fn frame(&self) -> Option<FrameNumber> {
        self.mapping.map(|(_, frame)| frame)
    }

    /// Returns the cached `(page, frame)` pair.
    pub fn mapping(&self) -> Option<(PageNumber, FrameNumber)> {
        self.mapping
    }

    /// Returns whether the reference bit is set.
    pub fn is_referenced(&self) -> bool {
        self.referenced
    }
}

/// Position of the clock hand within a ring of `N` slots.
///
/// The hand only ever moves forward, wrapping from `N - 1` back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockHand<const N: usize>(usize);

impl<const N: usize> ClockHand<N> {
    /// Returns the slot the hand points at.
    #[inline]
    pub const fn position(self) -> usize {
        self.0
    }

    /// Moves the hand to the next slot.
    #[inline]
    fn advance(&mut self) {
        self.0 = (self.0 + 1) % N;
    }
}

/// A fully-associative TLB of `N` entries.
pub struct Tlb<const N: usize = { layout::TLB_ENTRIES }> {
    entries: [TlbEntry; N],
    hand: ClockHand<N>,
}

impl<const N: usize> Tlb<N> {
    /// Creates a TLB with every slot empty and the clock hand at slot 0.
    ///
    /// # Panics
    ///
    /// Panics if `N` is zero.
    pub fn new() -> Self {
        assert!(N > 0, "TLB must have at least one entry");
        Self {
            entries: [TlbEntry::EMPTY; N],
            hand: ClockHand::default(),
        }
    }

    /// Looks up `page`, setting the entry's reference bit on a hit.
    ///
    /// Entries are never reordered by a lookup.
    pub fn lookup(&mut self, page: PageNumber) -> Option<FrameNumber> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.page() == Some(page))?;
        entry.referenced = true;
        entry.frame()
    }

    /// Caches `page -> frame`, replacing an entry chosen by the clock hand.
    ///
    /// Returns the mapping that was evicted, if the chosen slot held one.
    ///
    /// Callers only insert after a miss, so `page` is never already cached.
    pub fn insert(
        &mut self,
        page: PageNumber,
        frame: FrameNumber,
    ) -> Option<(PageNumber, FrameNumber)> {
        debug_assert!(!self.contains(page), "page {page} is already cached");

        loop {
            let slot = self.hand.position();
            let entry = &mut self.entries[slot];
            self.hand.advance();

            if entry.referenced {
                entry.referenced = false;
                continue;
            }

            let evicted = entry.mapping.replace((page, frame));
            entry.referenced = true;

            if let Some((old_page, old_frame)) = evicted {
                debug!(
                    "TLB slot {slot}: evicted page {old_page} (frame {old_frame}) for page {page} (frame {frame})"
                );
            }
            return evicted;
        }
    }

    /// Returns whether `page` is cached, without touching its reference bit.
    pub fn contains(&self, page: PageNumber) -> bool {
        self.entries.iter().any(|entry| entry.page() == Some(page))
    }

    /// Returns the TLB slots in ring order.
    pub fn entries(&self) -> &[TlbEntry; N] {
        &self.entries
    }

    /// Returns the current clock hand.
    pub fn hand(&self) -> ClockHand<N> {
        self.hand
    }

    /// Returns the number of slots holding a mapping.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.mapping.is_some())
            .count()
    }

    /// Returns whether no slot holds a mapping.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in this TLB.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Tlb<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize) -> PageNumber {
        PageNumber::new(n)
    }

    fn frame(n: usize) -> FrameNumber {
        FrameNumber::new(n)
    }

    /// Fills every slot of the TLB with page `i` -> frame `i + 100`.
    fn filled<const N: usize>() -> Tlb<N> {
        let mut tlb = Tlb::<N>::new();
        for i in 0..N {
            assert_eq!(tlb.insert(page(i), frame(i + 100)), None);
        }
        tlb
    }

    fn reference_bits<const N: usize>(tlb: &Tlb<N>) -> Vec<bool> {
        tlb.entries().iter().map(TlbEntry::is_referenced).collect()
    }

    mod lookup {
        use super::*;

        #[test]
        fn empty_tlb_misses() {
            let mut tlb: Tlb = Tlb::new();
            assert_eq!(tlb.capacity(), 16);
            assert!(tlb.is_empty());
            assert_eq!(tlb.lookup(page(0)), None);
        }

        #[test]
        fn hit_returns_cached_frame() {
            let mut tlb = Tlb::<4>::new();
            tlb.insert(page(7), frame(3));

            assert_eq!(tlb.lookup(page(7)), Some(frame(3)));
            assert_eq!(tlb.lookup(page(8)), None);
        }

        #[test]
        fn hit_sets_reference_bit() {
            let mut tlb = filled::<4>();
            // Inserting a fifth page sweeps all bits clear and replaces slot 0.
            tlb.insert(page(50), frame(50));
            assert_eq!(reference_bits(&tlb), vec![true, false, false, false]);

            assert_eq!(tlb.lookup(page(2)), Some(frame(102)));
            assert_eq!(reference_bits(&tlb), vec![true, false, true, false]);
        }

        #[test]
        fn hit_does_not_reorder() {
            let mut tlb = filled::<4>();
            let before = *tlb.entries();
            tlb.lookup(page(3));
            let pages: Vec<_> = tlb.entries().iter().map(TlbEntry::page).collect();
            let expected: Vec<_> = before.iter().map(TlbEntry::page).collect();
            assert_eq!(pages, expected);
        }

        #[test]
        fn contains_leaves_reference_bit_alone() {
            let mut tlb = filled::<2>();
            tlb.insert(page(9), frame(9));
            assert_eq!(reference_bits(&tlb), vec![true, false]);

            assert!(tlb.contains(page(1)));
            assert_eq!(reference_bits(&tlb), vec![true, false]);
        }
    }

    mod insert {
        use super::*;

        #[test]
        fn fills_empty_slots_in_order() {
            let mut tlb = Tlb::<4>::new();
            for i in 0..3 {
                assert_eq!(tlb.insert(page(i), frame(i)), None);
                assert_eq!(tlb.entries()[i].mapping(), Some((page(i), frame(i))));
                assert_eq!(tlb.hand().position(), i + 1);
            }
            assert_eq!(tlb.len(), 3);
            assert!(tlb.entries()[3].page().is_none());
        }

        #[test]
        fn new_entry_is_referenced() {
            let mut tlb = Tlb::<4>::new();
            tlb.insert(page(1), frame(1));
            assert!(tlb.entries()[0].is_referenced());
        }

        #[test]
        fn full_ring_of_referenced_entries_is_swept_once() {
            let mut tlb = filled::<16>();
            assert_eq!(tlb.hand().position(), 0);
            assert!(reference_bits(&tlb).iter().all(|&bit| bit));

            let evicted = tlb.insert(page(500), frame(500));

            // Every bit cleared once around, then the original slot takes the new entry.
            assert_eq!(evicted, Some((page(0), frame(100))));
            assert_eq!(tlb.entries()[0].mapping(), Some((page(500), frame(500))));
            assert!(tlb.entries()[0].is_referenced());
            assert!(tlb.entries()[1..].iter().all(|entry| !entry.is_referenced()));
            assert_eq!(tlb.hand().position(), 1);
            assert_eq!(tlb.len(), 16);
        }

        #[test]
        fn skips_referenced_entries() {
            let mut tlb = filled::<4>();
            tlb.insert(page(10), frame(10)); // evicts slot 0, hand now at 1
            tlb.lookup(page(1)); // give slot 1 a second chance

            let evicted = tlb.insert(page(11), frame(11));

            assert_eq!(evicted, Some((page(2), frame(102))));
            assert_eq!(tlb.entries()[1].mapping(), Some((page(1), frame(101))));
            assert!(!tlb.entries()[1].is_referenced());
            assert_eq!(tlb.entries()[2].mapping(), Some((page(11), frame(11))));
            assert_eq!(tlb.hand().position(), 3);
        }

        #[test]
        fn unreferenced_slot_at_hand_is_replaced_immediately() {
            let mut tlb = filled::<4>();
            tlb.insert(page(10), frame(10)); // all bits swept, hand at 1

            let evicted = tlb.insert(page(11), frame(11));

            assert_eq!(evicted, Some((page(1), frame(101))));
            assert_eq!(tlb.hand().position(), 2);
        }

        #[test]
        fn hand_wraps_around() {
            let mut tlb = filled::<3>();
            for i in 0..7 {
                tlb.insert(page(200 + i), frame(200 + i));
            }
            assert!(tlb.hand().position() < 3);
            assert_eq!(tlb.len(), 3);
        }

        #[test]
        fn never_holds_duplicate_pages() {
            let mut tlb: Tlb = Tlb::new();
            // Reference pattern that cycles through more pages than the TLB holds.
            for step in 0..500usize {
                let p = page((step * 7) % 40);
                if tlb.lookup(p).is_none() {
                    tlb.insert(p, frame(p.as_usize()));
                }

                let mut pages: Vec<_> = tlb.entries().iter().filter_map(TlbEntry::page).collect();
                let total = pages.len();
                pages.sort();
                pages.dedup();
                assert_eq!(pages.len(), total);
                assert!(total <= 16);
            }
        }

        #[test]
        fn single_entry_tlb() {
            let mut tlb = Tlb::<1>::new();
            tlb.insert(page(1), frame(1));
            assert_eq!(tlb.insert(page(2), frame(2)), Some((page(1), frame(1))));
            assert_eq!(tlb.lookup(page(2)), Some(frame(2)));
            assert_eq!(tlb.hand().position(), 0);
        }
    }
}
