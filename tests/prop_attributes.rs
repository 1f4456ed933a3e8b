use bulkseed::GenContext;
use bulkseed::attributes::{AttrType, CustomAttributeSpec, ValueStyle, random_value};
use bulkseed::Value;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_quantity_within_bounds(lo in 1i64..500, span in 0i64..500, seed in any::<u64>()) {
        let hi = lo + span;
        let attr = CustomAttributeSpec::new("q", AttrType::Quantity).with_range(lo, hi);
        let mut ctx = GenContext::from_seed(Some(seed));
        for _ in 0..20 {
            match random_value(&attr, &ValueStyle::STANDARD, &mut ctx) {
                Value::Int(q) => prop_assert!(q >= lo && q <= hi),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn prop_inverted_quantity_bounds_swap(lo in 1i64..500, span in 1i64..500, seed in any::<u64>()) {
        let attr = CustomAttributeSpec::new("q", AttrType::Quantity).with_range(lo + span, lo);
        let mut ctx = GenContext::from_seed(Some(seed));
        if let Value::Int(q) = random_value(&attr, &ValueStyle::STANDARD, &mut ctx) {
            prop_assert!(q >= lo && q <= lo + span);
        }
    }

    #[test]
    fn prop_constant_value_is_returned(text in "[a-zA-Z0-9 ]{0,24}", seed in any::<u64>()) {
        let attr = CustomAttributeSpec::new("c", AttrType::Text).fixed(text.clone());
        let mut ctx = GenContext::from_seed(Some(seed));
        prop_assert_eq!(random_value(&attr, &ValueStyle::STANDARD, &mut ctx), Value::Text(text));
    }
}
