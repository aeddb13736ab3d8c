//! Binary search over the on-disk index.
//!
//! Records `[1, count)` are sorted by their normalized stored key. Many
//! modules put an introductory "title" record at ordinal 0 that sorts out of
//! band, so the bisection never probes ordinal 0; it is checked separately
//! once the sorted range has been exhausted.

use std::cmp::Ordering;

use log::trace;

use super::types::error::Result;
use super::types::models::Position;

/// A sequence of keys, sorted except possibly at ordinal 0.
pub trait SortedKeys {
    fn key_count(&mut self) -> usize;

    /// The key at `ordinal`, already in its comparable (search) form.
    fn search_key_at(&mut self, ordinal: usize) -> Result<String>;
}

/// Finds `target` (in search form) among `keys`.
pub fn search<S: SortedKeys + ?Sized>(keys: &mut S, target: &str) -> Result<Position> {
    let total = keys.key_count();

    // Start one beyond both ends of the sorted range.
    let mut low = 0usize;
    let mut high = total;

    while high - low > 1 {
        let mid = low + (high - low) / 2;
        let probe = keys.search_key_at(mid)?;
        trace!("Probe {} [{}, {}): {:?}", mid, low, high, probe);
        match probe.as_str().cmp(target) {
            Ordering::Less => low = mid,
            Ordering::Greater => high = mid,
            Ordering::Equal => return Ok(Position::Found(mid)),
        }
    }

    if total > 0 && keys.search_key_at(0)? == target {
        return Ok(Position::Found(0));
    }

    Ok(Position::Absent { insertion: high })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory keys that count how often each ordinal is read.
    struct Keys {
        keys: Vec<String>,
        reads: Vec<usize>,
    }

    impl Keys {
        fn new(keys: &[&str]) -> Self {
            Self {
                keys: keys.iter().map(|k| k.to_string()).collect(),
                reads: vec![0; keys.len()],
            }
        }
    }

    impl SortedKeys for Keys {
        fn key_count(&mut self) -> usize {
            self.keys.len()
        }

        fn search_key_at(&mut self, ordinal: usize) -> Result<String> {
            self.reads[ordinal] += 1;
            Ok(self.keys[ordinal].clone())
        }
    }

    #[test]
    fn finds_every_sorted_key() {
        let mut keys = Keys::new(&["ZTITLE", "ALPHA", "BETA", "DELTA", "GAMMA", "OMEGA"]);
        for (i, k) in ["ALPHA", "BETA", "DELTA", "GAMMA", "OMEGA"].iter().enumerate() {
            assert_eq!(search(&mut keys, k).unwrap(), Position::Found(i + 1));
        }
    }

    #[test]
    fn out_of_order_title_is_found_at_zero() {
        let mut keys = Keys::new(&["ZTITLE", "ALPHA", "BETA", "DELTA"]);
        assert_eq!(search(&mut keys, "ZTITLE").unwrap(), Position::Found(0));
    }

    #[test]
    fn absent_keys_report_insertion_point() {
        let mut keys = Keys::new(&["ZTITLE", "B", "D", "F"]);
        let cases = [("C", 2), ("E", 3), ("G", 4), ("A", 1)];
        for (target, insertion) in cases {
            let pos = search(&mut keys, target).unwrap();
            assert_eq!(pos, Position::Absent { insertion }, "target {target}");
            let raw = pos.to_raw();
            assert!(raw < 0);
            assert_eq!((-raw - 1) as usize, insertion);
        }
    }

    #[test]
    fn empty_index_never_reads() {
        let mut keys = Keys::new(&[]);
        assert_eq!(search(&mut keys, "ANY").unwrap().to_raw(), -1);
    }

    #[test]
    fn single_record_checks_only_ordinal_zero() {
        let mut keys = Keys::new(&["ONLY"]);
        assert_eq!(search(&mut keys, "ONLY").unwrap(), Position::Found(0));
        assert_eq!(search(&mut keys, "OTHER").unwrap(), Position::Absent { insertion: 1 });
    }

    #[test]
    fn logarithmic_probe_count() {
        let names: Vec<String> = (0..1024).map(|i| format!("K{i:05}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut keys = Keys::new(&refs);
        search(&mut keys, "K00777").unwrap();
        let total: usize = keys.reads.iter().sum();
        assert!(total <= 12, "too many probes: {total}");
    }
}
