use crate::award::AwardTable;
use crate::entry::Entry;

/// Record of the one entry a correction pass moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub ingestion_index: usize,
    /// Score the reader reported before it was replaced by the sentinel.
    pub reported_points: f64,
    /// Rank the reported score earned.
    pub from_position: usize,
    /// Rank the entry was reinserted at.
    pub to_position: usize,
}

/// Moves a flagged entry back to the rank its ingestion order implies.
pub struct ReinsertionCorrector<'a> {
    awards: &'a AwardTable,
    sentinel_points: f64,
}

impl<'a> ReinsertionCorrector<'a> {
    pub fn new(awards: &'a AwardTable, sentinel_points: f64) -> Self {
        Self { awards, sentinel_points }
    }

    /// Correct the first flagged entry in `entries`, which must already be in
    /// candidate order with positions 1..N. Later flagged entries are left
    /// alone. Returns `None`, touching nothing, when no entry is flagged.
    pub fn correct(&self, entries: &mut [Entry]) -> Option<Correction> {
        let idx = entries.iter().position(|e| e.flagged)?;

        let target = &mut entries[idx];
        let correction = Correction {
            ingestion_index: target.ingestion_index,
            reported_points: target.points,
            from_position: target.position,
            to_position: target.expected_position,
        };
        target.points = self.sentinel_points;
        target.corrected = true;

        // Close the gap the entry leaves behind, then open one at its
        // expected slot.
        for (i, entry) in entries.iter_mut().enumerate() {
            if i == idx {
                entry.position = correction.to_position;
                continue;
            }
            if entry.position > correction.from_position {
                entry.position -= 1;
            }
            if entry.position >= correction.to_position {
                entry.position += 1;
            }
        }

        entries.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.ingestion_index.cmp(&b.ingestion_index))
        });
        for (rank, entry) in entries.iter_mut().enumerate() {
            entry.position = rank + 1;
            entry.award = self.awards.award_for(entry.position);
        }

        tracing::info!(
            ingestion_index = correction.ingestion_index,
            reported_points = correction.reported_points,
            from = correction.from_position,
            to = correction.to_position,
            "anomalous reading reinserted at its ingestion-order rank"
        );
        Some(correction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankingConfig;
    use crate::detect::AnomalyDetector;
    use crate::entry::RawReading;

    fn detected(points: &[&str]) -> Vec<Entry> {
        let config = RankingConfig::default();
        let mut es: Vec<Entry> = points
            .iter()
            .enumerate()
            .map(|(i, p)| Entry::from_reading(&RawReading::new(format!("p{i}"), *p, i)))
            .collect();
        AnomalyDetector::new(&config).detect(&mut es);
        es
    }

    fn positions_by_index(es: &[Entry]) -> Vec<usize> {
        let mut v: Vec<(usize, usize)> = es.iter().map(|e| (e.ingestion_index, e.position)).collect();
        v.sort();
        v.into_iter().map(|(_, p)| p).collect()
    }

    #[test]
    fn flagged_entry_lands_on_expected_position() {
        let awards = AwardTable::default();
        let mut es = detected(&["5000", "4800", "99999", "4700"]);
        let c = ReinsertionCorrector::new(&awards, 333.0).correct(&mut es).unwrap();

        assert_eq!(c.ingestion_index, 2);
        assert_eq!(c.reported_points, 99999.0);
        assert_eq!((c.from_position, c.to_position), (1, 3));

        let rows: Vec<(f64, usize)> = es.iter().map(|e| (e.points, e.position)).collect();
        assert_eq!(rows, vec![(5000.0, 1), (4800.0, 2), (333.0, 3), (4700.0, 4)]);
        assert!(es[2].corrected && es[2].flagged);
    }

    #[test]
    fn entries_between_old_and_new_rank_shift_by_one() {
        let awards = AwardTable::default();
        let mut es = detected(&["5000", "4900", "4800", "4700", "99999", "4600"]);
        let before = positions_by_index(&es);
        ReinsertionCorrector::new(&awards, 333.0).correct(&mut es).unwrap();
        let after = positions_by_index(&es);

        assert_eq!(before, vec![2, 3, 4, 5, 1, 6]);
        assert_eq!(after, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn awards_follow_new_positions() {
        let awards = AwardTable::new(vec![50, 40, 30]).unwrap();
        let mut es = detected(&["5000", "4800", "99999", "4700"]);
        ReinsertionCorrector::new(&awards, 333.0).correct(&mut es).unwrap();
        let got: Vec<u32> = es.iter().map(|e| e.award).collect();
        assert_eq!(got, vec![50, 40, 30, 0]);
    }

    #[test]
    fn only_first_flagged_entry_is_corrected() {
        let awards = AwardTable::default();
        let mut es = detected(&["5000", "5000", "5000", "5000", "900000", "800000"]);
        assert_eq!(es.iter().filter(|e| e.flagged).count(), 2);

        let c = ReinsertionCorrector::new(&awards, 333.0).correct(&mut es).unwrap();
        assert_eq!(c.ingestion_index, 4);

        let second = es.iter().find(|e| e.ingestion_index == 5).unwrap();
        assert_eq!(second.points, 800000.0);
        assert!(second.flagged && !second.corrected);
        assert_eq!(second.position, 1);

        let first = es.iter().find(|e| e.ingestion_index == 4).unwrap();
        assert_eq!(first.points, 333.0);
        assert_eq!(first.position, 5);

        let mut positions: Vec<usize> = es.iter().map(|e| e.position).collect();
        positions.sort();
        assert_eq!(positions, (1..=6).collect::<Vec<_>>());
    }

    #[test]
    fn no_flag_means_no_change() {
        let awards = AwardTable::default();
        let mut es = detected(&["5000", "4800", "4700"]);
        let before = es.clone();
        assert!(ReinsertionCorrector::new(&awards, 333.0).correct(&mut es).is_none());
        assert_eq!(es, before);
    }

    #[test]
    fn entry_ranked_below_its_slot_moves_up() {
        let awards = AwardTable::default();
        let mut points = vec!["1000000", "1100000", "1050000"];
        points.extend(std::iter::repeat("5000").take(100));
        let mut es = detected(&points);
        assert_eq!(es.iter().filter(|e| e.flagged).count(), 1);

        let c = ReinsertionCorrector::new(&awards, 333.0).correct(&mut es).unwrap();
        assert_eq!(c.ingestion_index, 0);
        assert_eq!((c.from_position, c.to_position), (3, 1));

        let order: Vec<usize> = es.iter().map(|e| e.ingestion_index).collect();
        assert_eq!(order, (0..103).collect::<Vec<_>>());
        assert_eq!(positions_by_index(&es), (1..=103).collect::<Vec<_>>());
        assert_eq!(es[0].points, 333.0);
        assert_eq!(es[0].award, 100);
    }
}
