//! Property-based tests for the outcome combinators

use proptest::prelude::*;
use userkit_application::result::{combine2, combine_results, UseCaseResult};

fn arb_result() -> impl Strategy<Value = UseCaseResult<u32>> {
    prop_oneof![
        any::<u32>().prop_map(UseCaseResult::success),
        "[A-Z_]{1,12}".prop_map(|code| UseCaseResult::failure("failed", code)),
    ]
}

proptest! {
    #[test]
    fn combine_succeeds_iff_all_succeed(results in prop::collection::vec(arb_result(), 0..8)) {
        let all_ok = results.iter().all(|r| r.is_success());
        let combined = combine_results(results);
        prop_assert_eq!(combined.is_success(), all_ok);
    }

    #[test]
    fn combine_keeps_order_and_length(values in prop::collection::vec(any::<u32>(), 0..8)) {
        let combined = combine_results(
            values.iter().copied().map(UseCaseResult::success).collect(),
        );
        prop_assert_eq!(combined.into_data().unwrap(), values);
    }

    #[test]
    fn combine_returns_the_leftmost_failure(
        prefix in prop::collection::vec(any::<u32>(), 0..4),
        code in "[A-Z_]{1,12}",
        suffix in prop::collection::vec(arb_result(), 0..4),
    ) {
        let mut results: Vec<UseCaseResult<u32>> =
            prefix.into_iter().map(UseCaseResult::success).collect();
        results.push(UseCaseResult::failure("failed", code.clone()));
        results.extend(suffix);

        let combined = combine_results(results);
        prop_assert_eq!(combined.error().unwrap().code.clone(), code);
    }

    #[test]
    fn combine2_agrees_with_combine_on_success(a in any::<u32>(), b in any::<u32>()) {
        let paired = combine2(UseCaseResult::success(a), UseCaseResult::success(b));
        prop_assert_eq!(paired.into_data(), Some((a, b)));
    }

    #[test]
    fn map_preserves_the_variant(result in arb_result()) {
        let mapped = result.clone().map(|v| v as u64 + 1);
        prop_assert_eq!(mapped.is_success(), result.is_success());
        if let Some(error) = result.error() {
            prop_assert_eq!(&mapped.error().unwrap().code, &error.code);
        }
    }
}
