use super::lexicon::{FIRM_RESOURCES, MARKET_RESOURCES};
use crate::models::{CvpRecord, ResourceClass};

/// Where the value in a statement comes from: the firm's own resources,
/// the market's, or both. `None` when neither lexicon hits.
pub fn classify_resource(text: &str) -> Option<ResourceClass> {
    let lowered = text.to_lowercase();
    let firm = FIRM_RESOURCES.count_hits(&lowered);
    let market = MARKET_RESOURCES.count_hits(&lowered);

    match (firm > 0, market > 0) {
        (true, true) => Some(ResourceClass::Mixed),
        (true, false) => Some(ResourceClass::Firm),
        (false, true) => Some(ResourceClass::Market),
        (false, false) => None,
    }
}

/// Reclassify every record, overwriting earlier results.
pub fn classify_resources(records: &mut [CvpRecord]) {
    for record in records.iter_mut() {
        record.resource_class = classify_resource(&record.text);
    }
    tracing::debug!(records = records.len(), "Resource classification applied");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firm_only() {
        assert_eq!(
            classify_resource("Our internal platform and technical expertise cut downtime"),
            Some(ResourceClass::Firm)
        );
    }

    #[test]
    fn market_only() {
        assert_eq!(
            classify_resource("Built with our client community and brand insight"),
            Some(ResourceClass::Market)
        );
    }

    #[test]
    fn both_is_mixed() {
        assert_eq!(
            classify_resource("Our platform grows with every customer"),
            Some(ResourceClass::Mixed)
        );
    }

    #[test]
    fn neither_is_unset() {
        assert_eq!(classify_resource("Faster and cheaper than before"), None);
    }

    #[test]
    fn reclassification_overwrites() {
        let mut records = vec![CvpRecord::new("Faster and cheaper than before", "a.txt", None)];
        records[0].resource_class = Some(ResourceClass::Firm);

        classify_resources(&mut records);
        assert_eq!(records[0].resource_class, None);
    }
}
