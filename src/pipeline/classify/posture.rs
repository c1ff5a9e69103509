use super::lexicon::{POINTS_OF_DIFFERENCE, POINTS_OF_PARITY};
use crate::models::{CvpRecord, Posture};

/// Point of difference vs point of parity.
///
/// `Pod` when difference language strictly outweighs parity language,
/// `Pop` when only parity language is present. A tie and the absence of
/// both signals are indistinguishable here: both are `None`.
pub fn classify_posture(text: &str) -> Option<Posture> {
    let lowered = text.to_lowercase();
    let pod = POINTS_OF_DIFFERENCE.count_hits(&lowered);
    let pop = POINTS_OF_PARITY.count_hits(&lowered);

    if pod > pop {
        Some(Posture::Pod)
    } else if pop > 0 && pod == 0 {
        Some(Posture::Pop)
    } else {
        None
    }
}

/// Reclassify every record, overwriting earlier results.
pub fn classify_postures(records: &mut [CvpRecord]) {
    for record in records.iter_mut() {
        record.pop = classify_posture(&record.text);
    }
    tracing::debug!(records = records.len(), "Posture classification applied");
}
