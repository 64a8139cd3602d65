use proptest::prelude::*;
use torque_symptoms::SymptomMatcher;

proptest! {
    #[test]
    fn confidence_always_within_unit_interval(text in "[a-zA-Z ']{0,80}") {
        let m = SymptomMatcher::new();
        for hit in m.match_text(&text, 0.0) {
            prop_assert!(hit.confidence > 0.0 && hit.confidence <= 1.0);
        }
    }

    #[test]
    fn matching_ignores_case(text in "[a-zA-Z ]{0,60}") {
        let m = SymptomMatcher::new();
        prop_assert_eq!(m.match_default(&text.to_uppercase()), m.match_default(&text.to_lowercase()));
    }

    #[test]
    fn everything_returned_clears_threshold(text in "[a-z ]{0,60}", threshold in 0.0_f64..1.0) {
        let m = SymptomMatcher::new();
        for hit in m.match_text(&text, threshold) {
            prop_assert!(hit.confidence >= threshold);
        }
    }

    #[test]
    fn normalize_never_drops_non_blank_input(text in "[a-z]{1,20}") {
        let m = SymptomMatcher::new();
        prop_assert_eq!(m.normalize_symptoms(&[text.as_str()]).len(), 1);
    }
}
