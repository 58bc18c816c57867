//! Byte frequency counting.

/// Occurrence count for every byte value of an input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Present bytes with their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut counts = [0u64; 256];
        for (byte, count) in iter {
            counts[byte as usize] += count;
        }
        Self { counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_table() {
        let table = FrequencyTable::from_bytes(b"Hello, world!");

        assert_eq!(table.get(b'l'), 3);
        assert_eq!(table.get(b'o'), 2);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.total(), 13);
        assert_eq!(table.distinct(), 10);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_iter_ascending() {
        let table = FrequencyTable::from_bytes(&[200, 3, 3, 0, 200, 200]);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0, 1), (3, 2), (200, 3)]);
    }

    #[test]
    fn test_from_iter_accumulates() {
        let table: FrequencyTable = vec![(7, 2), (7, 3), (1, 1)].into_iter().collect();
        assert_eq!(table.get(7), 5);
        assert_eq!(table.get(1), 1);
    }
}
