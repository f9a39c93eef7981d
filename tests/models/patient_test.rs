#[cfg(test)]
mod tests {
    use fossi::{InputError, LipidPanel, LipidUnit, PatientInput, PatientRecord, Sex};
    use pretty_assertions::assert_eq;

    use crate::utils::{female_reference, reference_record};

    fn patient_with(
        age: u32,
        bmi: f64,
        height: f64,
        waist: f64,
    ) -> Result<PatientInput, InputError> {
        PatientInput::new(Sex::Male, age, bmi, height, waist, LipidPanel::mmol(1.5, 1.2), false)
    }

    fn patient_with_lipids(lipids: LipidPanel) -> Result<PatientInput, InputError> {
        PatientInput::new(Sex::Female, 62, 31.0, 160.0, 98.0, lipids, true)
    }

    #[test]
    fn test_range_limits_are_inclusive() {
        assert!(patient_with(18, 10.0, 120.0, 50.0).is_ok());
        assert!(patient_with(100, 60.0, 220.0, 180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_fields() {
        let field = |r: Result<PatientInput, InputError>| match r {
            Err(InputError::OutOfRange { field, .. }) => field,
            other => panic!("expected OutOfRange, got {other:?}"),
        };
        assert_eq!(field(patient_with(17, 25.0, 170.0, 90.0)), "age");
        assert_eq!(field(patient_with(101, 25.0, 170.0, 90.0)), "age");
        assert_eq!(field(patient_with(40, 9.9, 170.0, 90.0)), "bmi");
        assert_eq!(field(patient_with(40, 25.0, 119.0, 90.0)), "height_cm");
        assert_eq!(field(patient_with(40, 25.0, 170.0, 181.0)), "waist_cm");
    }

    #[test]
    fn test_extreme_lipids_rejected_at_construction() {
        assert!(matches!(
            patient_with_lipids(LipidPanel::mg_dl(1e308, 1e-300)),
            Err(InputError::OutOfRange { field: "triglycerides", .. })
        ));
        assert!(matches!(
            patient_with_lipids(LipidPanel::mg_dl(168.0, 1e-300)),
            Err(InputError::OutOfRange { field: "hdl", .. })
        ));
        assert!(matches!(
            patient_with_lipids(LipidPanel::mmol(1.9, 10.5)),
            Err(InputError::OutOfRange { field: "hdl", .. })
        ));
        assert!(patient_with_lipids(LipidPanel::mmol(20.0, 0.1)).is_ok());
    }

    #[test]
    fn test_json_record_round_trip() {
        let json = r#"{
            "sex": "male",
            "age": 55,
            "bmi": 27.4,
            "height_cm": 178.0,
            "waist_cm": 101.0,
            "triglycerides": 150.0,
            "hdl": 42.0,
            "lipid_unit": "mg/dL",
            "hypertension": true
        }"#;
        let patient: PatientInput = serde_json::from_str(json).unwrap();
        assert_eq!(patient.sex(), Sex::Male);
        assert_eq!(patient.lipids().unit, LipidUnit::MgPerDl);
        assert!(patient.hypertension());

        let back = serde_json::to_string(&patient).unwrap();
        let again: PatientInput = serde_json::from_str(&back).unwrap();
        assert_eq!(patient, again);
    }

    #[test]
    fn test_json_validation_runs_on_deserialize() {
        let json = r#"{"sex":"female","age":62,"bmi":31.0,"height_cm":160.0,
            "waist_cm":98.0,"triglycerides":-1.0,"hdl":1.0}"#;
        let err = serde_json::from_str::<PatientInput>(json).unwrap_err();
        assert!(err.to_string().contains("triglycerides must be greater than zero"));
    }

    #[test]
    fn test_missing_unit_defaults_to_mmol() {
        let mut record = reference_record("F");
        record.lipid_unit = None;
        let patient = PatientInput::try_from(&record).unwrap();
        assert_eq!(patient, female_reference());
    }

    #[test]
    fn test_unknown_tokens() {
        let mut record: PatientRecord = reference_record("female");
        record.lipid_unit = Some("g/L".to_string());
        assert_eq!(
            PatientInput::try_from(&record),
            Err(InputError::UnknownUnit("g/L".to_string()))
        );
    }
}
