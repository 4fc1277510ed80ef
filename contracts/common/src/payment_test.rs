use proptest::prelude::*;

use super::payment::required_value;

proptest! {
    /// The native route demands the fee itself: one unit more or less is a
    /// different value.
    #[test]
    fn native_route_requires_exact_fee(fee in 1i128..i128::MAX) {
        prop_assert_eq!(required_value(true, fee), fee);
        prop_assert_ne!(required_value(true, fee), fee - 1);
        prop_assert_ne!(required_value(true, fee), fee + 1);
    }

    /// Token payments never accept an attached value.
    #[test]
    fn token_route_requires_nothing_attached(fee in 0i128..i128::MAX) {
        prop_assert_eq!(required_value(false, fee), 0);
    }
}
