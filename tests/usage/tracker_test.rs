#[cfg(test)]
mod tests {
    use std::fmt;

    use fossi::{
        EngineConfig, LipidPanel, MemoryUsageSink, Sex, UsageEvent, UsageSink, UsageTracker,
        evaluate, evaluate_cohort,
    };

    use crate::utils::{female_reference, male_reference, reference, reference_record};

    #[derive(Debug)]
    struct Offline;

    impl fmt::Display for Offline {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("usage store offline")
        }
    }

    impl std::error::Error for Offline {}

    struct FailingSink;

    impl UsageSink for FailingSink {
        type Error = Offline;

        fn record(&self, _event: &UsageEvent) -> Result<(), Self::Error> {
            Err(Offline)
        }

        fn total_count(&self) -> Result<u64, Self::Error> {
            Err(Offline)
        }
    }

    #[test]
    fn test_repeated_input_is_counted_once() {
        let sink = MemoryUsageSink::new();
        let mut tracker = UsageTracker::new(Some(&sink));
        let patient = female_reference();
        let (risk, _) = evaluate(&patient).unwrap();

        assert!(tracker.observe(&patient, &risk));
        assert!(!tracker.observe(&patient, &risk));
        assert_eq!(tracker.session_count(), 1);

        let changed = reference(Sex::Female, LipidPanel::mmol(2.0, 1.0));
        let (risk2, _) = evaluate(&changed).unwrap();
        assert!(tracker.observe(&changed, &risk2));
        assert_eq!(tracker.session_count(), 2);
        assert_eq!(tracker.global_count(), Some(2));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].session_id, tracker.session_id());
        assert_eq!(events[0].risk_label, "High");
        assert_ne!(events[0].id, events[1].id);
    }

    #[test]
    fn test_sink_failures_do_not_stop_counting() {
        let mut tracker = UsageTracker::new(Some(FailingSink));
        let patient = male_reference();
        let (risk, _) = evaluate(&patient).unwrap();

        assert!(tracker.observe(&patient, &risk));
        assert_eq!(tracker.session_count(), 1);
        assert_eq!(tracker.global_count(), None);
    }

    #[test]
    fn test_tracker_without_sink() {
        let mut tracker: UsageTracker<MemoryUsageSink> = UsageTracker::new(None);
        let patient = male_reference();
        let (risk, _) = evaluate(&patient).unwrap();
        assert!(tracker.observe(&patient, &risk));
        assert_eq!(tracker.global_count(), None);
        assert!(tracker.sink().is_none());
    }

    #[test]
    fn test_cohort_rows_are_counted_once_per_change() {
        let mut bad = reference_record("male");
        bad.hdl = 0.0;
        let records = vec![
            reference_record("female"),
            reference_record("female"),
            bad,
            reference_record("male"),
        ];
        let report = evaluate_cohort(&records, &EngineConfig::new()).unwrap();

        let sink = MemoryUsageSink::new();
        let mut tracker = UsageTracker::new(Some(&sink));
        assert_eq!(tracker.observe_cohort(&records, &report), 2);
        assert_eq!(tracker.session_count(), 2);
        assert_eq!(tracker.global_count(), Some(2));

        let labels: Vec<String> = sink.events().into_iter().map(|e| e.risk_label).collect();
        assert_eq!(labels, vec!["High".to_string(), "Grey zone (<0.71)".to_string()]);
    }
}
