#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use fossi::algorithm::fossi::units::normalize_panel;
    use fossi::{DerivedIndices, compute_indices};

    use crate::utils::{female_reference, male_reference};

    #[test]
    fn test_female_reference_indices() {
        let patient = female_reference();
        let lipids = normalize_panel(&patient.lipids()).unwrap();
        let indices = compute_indices(&patient, &lipids).unwrap();

        assert_abs_diff_eq!(indices.cmi(), 1.16375, epsilon = 1e-12);
        // (98 / 95.17) × (1.9 / 0.81) × 1.52
        let vai = indices.vai().expect("female indices carry VAI");
        assert_abs_diff_eq!(vai, 3.671_454_7, epsilon = 1e-6);
    }

    #[test]
    fn test_male_reference_indices() {
        let patient = male_reference();
        let lipids = normalize_panel(&patient.lipids()).unwrap();
        let indices = compute_indices(&patient, &lipids).unwrap();

        assert!(matches!(indices, DerivedIndices::Male { .. }));
        assert_abs_diff_eq!(indices.cmi(), 1.16375, epsilon = 1e-12);
        assert_eq!(indices.vai(), None);
    }

    #[test]
    fn test_cmi_is_sex_independent() {
        let f = female_reference();
        let m = male_reference();
        let fl = normalize_panel(&f.lipids()).unwrap();
        let ml = normalize_panel(&m.lipids()).unwrap();
        assert_eq!(
            compute_indices(&f, &fl).unwrap().cmi(),
            compute_indices(&m, &ml).unwrap().cmi()
        );
    }
}
