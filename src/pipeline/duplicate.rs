//! Batch-wide duplicate removal for accepted CVP records.
//!
//! Two records are duplicates when their trimmed text is equal ignoring
//! case. Runs once over the whole batch, after every source has produced
//! its candidates, so the first occurrence in source order wins.

use std::collections::HashSet;

use crate::models::CvpRecord;

/// Drop every record whose `dedup_key` was already seen. Order-preserving.
pub fn dedupe_by_text(records: Vec<CvpRecord>) -> Vec<CvpRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let before = records.len();

    let kept: Vec<CvpRecord> = records
        .into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect();

    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), kept = kept.len(), "Duplicate records removed");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrence() {
        let records = vec![
            CvpRecord::new("We cut cost for operators", "a.pdf", Some(1)),
            CvpRecord::new("we cut cost for operators  ", "b.pdf", Some(4)),
            CvpRecord::new("Something else entirely", "b.pdf", None),
        ];

        let kept = dedupe_by_text(records);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].source, "a.pdf");
        assert_eq!(kept[0].page, Some(1));
        assert_eq!(kept[1].text, "Something else entirely");
    }

    #[test]
    fn no_two_survivors_share_a_key() {
        let texts = ["Alpha", "ALPHA", "beta", "Beta ", "gamma", "alpha"];
        let records = texts.iter().map(|t| CvpRecord::new(t, "s", None)).collect();

        let kept = dedupe_by_text(records);
        let keys: HashSet<String> = kept.iter().map(CvpRecord::dedup_key).collect();
        assert_eq!(keys.len(), kept.len());
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn inner_whitespace_is_significant() {
        let records = vec![
            CvpRecord::new("fast  network", "s", None),
            CvpRecord::new("fast network", "s", None),
        ];
        assert_eq!(dedupe_by_text(records).len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(dedupe_by_text(Vec::new()).is_empty());
    }
}
