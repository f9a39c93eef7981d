#[cfg(test)]
mod tests {
    use fossi::algorithm::cohort::{CohortResult, category_counts};
    use fossi::{EngineConfig, InputError, RiskCategory, Sex, evaluate_cohort};

    use crate::utils::reference_record;

    #[test]
    fn test_cohort_preserves_order_and_reports_rejections() {
        let mut bad = reference_record("female");
        bad.hdl = 0.0;
        let records = vec![
            reference_record("female"),
            reference_record("male"),
            bad,
            reference_record("nonbinary"),
        ];

        let report = evaluate_cohort(&records, &EngineConfig::default()).unwrap();
        let indices: Vec<usize> = report.outcomes.iter().map(|o| o.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        match &report.outcomes[0].result {
            CohortResult::Scored(row) => {
                assert_eq!(row.sex, Sex::Female);
                assert_eq!(row.category, RiskCategory::High);
            }
            CohortResult::Rejected(reason) => panic!("unexpected rejection: {reason}"),
        }
        assert_eq!(
            report.first_rejection(),
            Some((2, "hdl must be greater than zero, got 0"))
        );

        assert_eq!(report.summary.evaluated, 2);
        assert_eq!(report.summary.rejected, 2);
        assert_eq!(report.summary.by_category.get("High"), Some(&1));
        assert_eq!(report.summary.by_category.get("Grey zone (<0.71)"), Some(&1));
        assert!(report.summary.mean_score.contains_key(&Sex::Male));
    }

    #[test]
    fn test_category_counts_follow_severity_order() {
        let records = vec![reference_record("female"), reference_record("female")];
        let report = evaluate_cohort(&records, &EngineConfig::default()).unwrap();
        let counts = category_counts(&report.rows(), Sex::Female);
        assert_eq!(
            counts,
            vec![
                (RiskCategory::Low, 0),
                (RiskCategory::Intermediate, 0),
                (RiskCategory::High, 2),
                (RiskCategory::VeryHigh, 0),
            ]
        );
    }

    #[test]
    fn test_invalid_config_fails_whole_cohort() {
        let config = EngineConfig::new().with_samples(1);
        assert!(matches!(
            evaluate_cohort(&[reference_record("male")], &config),
            Err(InputError::InvalidSampleCount { .. })
        ));
    }

    #[test]
    fn test_summary_render() {
        let report =
            evaluate_cohort(&[reference_record("male")], &EngineConfig::default()).unwrap();
        let text = report.summary.render();
        assert!(text.contains("Evaluated: 1"));
        assert!(text.contains("Mean FOSSI (Male): 0.36"));
    }
}
