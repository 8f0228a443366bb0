//! Translation statistics.

use crate::Outcome;

/// Running counters over every translation performed.
///
/// Each translation is exactly one of a TLB hit, a page table hit or a page fault, so
/// `tlb_hits + page_table_hits + page_faults == translations` at all times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub translations: u64,
    pub tlb_hits: u64,
    pub page_table_hits: u64,
    pub page_faults: u64,
}

impl Statistics {
    /// Counts one translation with the given outcome.
    pub fn record(&mut self, outcome: Outcome) {
        self.translations += 1;
        match outcome {
            Outcome::TlbHit => self.tlb_hits += 1,
            Outcome::PageTableHit => self.page_table_hits += 1,
            Outcome::PageFault => self.page_faults += 1,
        }
    }

    /// Returns the fraction of translations that faulted, or 0 if nothing was translated.
    pub fn fault_rate(&self) -> f64 {
        ratio(self.page_faults, self.translations)
    }

    /// Returns the fraction of translations served by the TLB, or 0 if nothing was translated.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.tlb_hits, self.translations)
    }

    /// Returns the number of translations that missed the TLB.
    pub fn tlb_misses(&self) -> u64 {
        self.page_table_hits + self.page_faults
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let stats = Statistics::default();
        assert_eq!(stats.translations, 0);
        assert_eq!(stats.fault_rate(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn outcomes_are_exclusive() {
        let mut stats = Statistics::default();
        stats.record(Outcome::PageFault);
        stats.record(Outcome::TlbHit);
        stats.record(Outcome::TlbHit);
        stats.record(Outcome::PageTableHit);

        assert_eq!(stats.translations, 4);
        assert_eq!(stats.page_faults, 1);
        assert_eq!(stats.tlb_hits, 2);
        assert_eq!(stats.page_table_hits, 1);
        assert_eq!(stats.tlb_misses(), 2);
        assert_eq!(
            stats.tlb_hits + stats.page_table_hits + stats.page_faults,
            stats.translations
        );
    }

    #[test]
    fn rates() {
        let mut stats = Statistics::default();
        stats.record(Outcome::PageFault);
        for _ in 0..3 {
            stats.record(Outcome::TlbHit);
        }

        assert_eq!(stats.fault_rate(), 0.25);
        assert_eq!(stats.hit_rate(), 0.75);
    }
}
