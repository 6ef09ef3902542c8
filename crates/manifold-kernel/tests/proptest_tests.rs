//! Property tests for real formatting and link structure.

use manifold_kernel::number::{format_real, round_significant};
use manifold_kernel::{CensusKernel, ManifoldEngine};
use proptest::prelude::*;

proptest! {
    #[test]
    fn full_precision_output_round_trips(x in -1.0e12f64..1.0e12) {
        let printed = format_real(x, None);
        prop_assert_eq!(printed.parse::<f64>().unwrap(), x);
    }

    #[test]
    fn truncated_output_parses_to_rounded_value(x in -1.0e12f64..1.0e12, digits in 1u32..15) {
        let printed = format_real(x, Some(digits));
        let parsed: f64 = printed.parse().unwrap();
        prop_assert_eq!(parsed, round_significant(x, digits));
    }

    #[test]
    fn rounding_is_idempotent(x in -1.0e6f64..1.0e6, digits in 1u32..12) {
        let once = round_significant(x, digits);
        prop_assert_eq!(round_significant(once, digits), once);
    }
}

#[test]
fn every_census_manifold_serializes() {
    let k = CensusKernel::new();
    for name in k.census() {
        let bytes = k.to_bytes(&name).unwrap();
        assert!(bytes.len() > 7, "{name} should serialize to a header plus name");
    }
}

#[test]
fn every_census_volume_is_positive() {
    let k = CensusKernel::new();
    for name in k.census() {
        assert!(k.volume(&name).unwrap() > 0.0, "{name} should be hyperbolic");
    }
}
