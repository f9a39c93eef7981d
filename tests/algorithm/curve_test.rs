#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use fossi::algorithm::fossi::curve::{
        FEMALE_DOMAIN, MALE_BASELINE, MALE_DOMAIN, MALE_TOP, female_probability,
    };
    use fossi::{CurveConfig, InputError, Sex, build_curve, build_curve_with, interpolate};

    #[test]
    fn test_female_curve_shape() {
        let curve = build_curve(Sex::Female);
        assert!(curve.points().len() >= 500);
        assert_eq!(curve.domain(), FEMALE_DOMAIN);
        assert_eq!(curve.points().first().unwrap().x, 2.5);
        assert_eq!(curve.points().last().unwrap().x, 16.5);
        assert_eq!(curve.cutoffs(), &[5.84, 7.88, 9.58]);
        assert_eq!(
            curve.zone_labels(),
            &["Low", "Intermediate", "High", "Very high"]
        );
        assert!(curve.patient().is_none());
    }

    #[test]
    fn test_female_curve_is_non_decreasing_and_bounded() {
        let curve = build_curve(Sex::Female);
        for pair in curve.points().windows(2) {
            assert!(pair[0].x < pair[1].x);
            assert!(pair[0].probability <= pair[1].probability);
        }
        assert!(
            curve
                .points()
                .iter()
                .all(|p| (0.0..=1.0).contains(&p.probability))
        );
    }

    #[test]
    fn test_male_curve_saturates() {
        let curve = build_curve(Sex::Male);
        assert_eq!(curve.domain(), MALE_DOMAIN);
        assert_eq!(curve.cutoffs(), &[0.71]);
        assert_eq!(curve.zone_labels(), &["Grey/Low", "High"]);

        for pair in curve.points().windows(2) {
            assert!(pair[0].probability <= pair[1].probability);
        }
        for p in curve.points() {
            if p.x < 0.45 {
                assert_eq!(p.probability, MALE_BASELINE);
            } else if p.x > 0.71 {
                assert_eq!(p.probability, MALE_TOP);
            }
        }
    }

    #[test]
    fn test_interpolation_clamps_outside_domain() {
        for sex in [Sex::Female, Sex::Male] {
            let curve = build_curve(sex);
            let first = curve.points().first().unwrap().probability;
            let last = curve.points().last().unwrap().probability;
            assert_eq!(interpolate(&curve, -100.0).probability, first);
            assert_eq!(interpolate(&curve, 100.0).probability, last);
        }
    }

    #[test]
    fn test_interpolation_is_linear_between_samples() {
        let curve = build_curve(Sex::Female);
        let (a, b) = (curve.points()[200], curve.points()[201]);
        let mid = interpolate(&curve, (a.x + b.x) / 2.0);
        assert_abs_diff_eq!(
            mid.probability,
            (a.probability + b.probability) / 2.0,
            epsilon = 1e-12
        );
        // Dense sampling keeps the chord close to the sigmoid
        assert_abs_diff_eq!(mid.probability, female_probability(mid.x), epsilon = 1e-4);
    }

    #[test]
    fn test_interpolated_point_keeps_score_as_x() {
        let curve = build_curve(Sex::Male);
        let point = interpolate(&curve, 1.7);
        assert_eq!(point.x, 1.7);
        assert_eq!(point.probability, MALE_TOP);
    }

    #[test]
    fn test_custom_sampling() {
        let curve = build_curve_with(Sex::Male, &CurveConfig::with_samples(61)).unwrap();
        assert_eq!(curve.points().len(), 61);
        assert_abs_diff_eq!(curve.points()[10].x, 0.5, epsilon = 1e-12);

        assert_eq!(
            build_curve_with(Sex::Female, &CurveConfig::with_samples(50)),
            Err(InputError::InvalidSampleCount {
                sex: "female",
                samples: 50,
                min: 500
            })
        );
    }
}
