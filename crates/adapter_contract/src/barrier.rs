//! Barrier classification.
//!
//! Single barriers take their direction from the option side: calls use
//! the upper level (up-and-in/up-and-out), puts the lower level
//! (down-and-in/down-and-out). Double barriers need both levels with spot
//! strictly between them.

use crate::fields::FieldValidator;
use crate::request::{RawContractRequest, LOWER_BARRIER, UPPER_BARRIER};
use crate::spec::{BarrierDirection, BarrierSpec, ExoticType, OptionSide};

/// Infers barrier direction and checks barrier levels against spot.
///
/// # Examples
/// ```
/// use adapter_contract::{BarrierClassifier, BarrierDirection, ExoticType, OptionSide, RawContractRequest};
///
/// let request = RawContractRequest::from_pairs([("UPPER_BARRIER", "1.20")]);
/// let spec = BarrierClassifier::classify(OptionSide::Call, ExoticType::KnockOutBarrier, 1.10, &request)
///     .unwrap()
///     .unwrap();
/// assert_eq!(spec.direction, Some(BarrierDirection::UpOut));
/// assert_eq!(spec.upper, Some(1.20));
///
/// let request = RawContractRequest::from_pairs([("UPPER_BARRIER", "1.00")]);
/// let errors = BarrierClassifier::classify(OptionSide::Call, ExoticType::KnockOutBarrier, 1.10, &request)
///     .unwrap_err();
/// assert_eq!(errors, vec!["UPPER_BARRIER must be > SPOT."]);
/// ```
pub struct BarrierClassifier;

impl BarrierClassifier {
    /// Classifies the barrier terms of `request`.
    ///
    /// Returns `Ok(None)` for vanilla contracts, whose barrier fields are
    /// ignored, and every barrier error otherwise.
    pub fn classify(
        side: OptionSide,
        exotic: ExoticType,
        spot: f64,
        request: &RawContractRequest,
    ) -> Result<Option<BarrierSpec>, Vec<String>> {
        if exotic.is_single_barrier() {
            Self::single(side, exotic, spot, request).map(Some)
        } else if exotic.is_double_barrier() {
            Self::double(spot, request).map(Some)
        } else {
            Ok(None)
        }
    }

    fn single(
        side: OptionSide,
        exotic: ExoticType,
        spot: f64,
        request: &RawContractRequest,
    ) -> Result<BarrierSpec, Vec<String>> {
        let knock_in = exotic == ExoticType::KnockInBarrier;
        match side {
            OptionSide::Call => {
                let upper = Self::upper(spot, request).map_err(|e| vec![e])?;
                Ok(BarrierSpec {
                    direction: Some(if knock_in {
                        BarrierDirection::UpIn
                    } else {
                        BarrierDirection::UpOut
                    }),
                    upper: Some(upper),
                    lower: None,
                })
            }
            OptionSide::Put => {
                let lower = Self::lower(spot, request).map_err(|e| vec![e])?;
                Ok(BarrierSpec {
                    direction: Some(if knock_in {
                        BarrierDirection::DownIn
                    } else {
                        BarrierDirection::DownOut
                    }),
                    upper: None,
                    lower: Some(lower),
                })
            }
        }
    }

    fn double(spot: f64, request: &RawContractRequest) -> Result<BarrierSpec, Vec<String>> {
        match (Self::upper(spot, request), Self::lower(spot, request)) {
            (Ok(upper), Ok(lower)) => Ok(BarrierSpec {
                direction: None,
                upper: Some(upper),
                lower: Some(lower),
            }),
            (upper, lower) => Err([upper.err(), lower.err()].into_iter().flatten().collect()),
        }
    }

    fn upper(spot: f64, request: &RawContractRequest) -> Result<f64, String> {
        let level =
            FieldValidator::positive_float(UPPER_BARRIER, request.get(UPPER_BARRIER))?.get();
        if level <= spot {
            return Err(format!("{} must be > SPOT.", UPPER_BARRIER));
        }
        Ok(level)
    }

    fn lower(spot: f64, request: &RawContractRequest) -> Result<f64, String> {
        let level =
            FieldValidator::positive_float(LOWER_BARRIER, request.get(LOWER_BARRIER))?.get();
        if level >= spot {
            return Err(format!("{} must be < SPOT.", LOWER_BARRIER));
        }
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barriers(upper: &str, lower: &str) -> RawContractRequest {
        RawContractRequest::from_pairs([(UPPER_BARRIER, upper), (LOWER_BARRIER, lower)])
    }

    #[test]
    fn test_direction_table() {
        let request = barriers("110", "90");
        let cases = [
            (OptionSide::Call, ExoticType::KnockOutBarrier, BarrierDirection::UpOut),
            (OptionSide::Call, ExoticType::KnockInBarrier, BarrierDirection::UpIn),
            (OptionSide::Put, ExoticType::KnockOutBarrier, BarrierDirection::DownOut),
            (OptionSide::Put, ExoticType::KnockInBarrier, BarrierDirection::DownIn),
        ];
        for (side, exotic, direction) in cases {
            let spec = BarrierClassifier::classify(side, exotic, 100.0, &request)
                .unwrap()
                .unwrap();
            assert_eq!(spec.direction, Some(direction));
        }
    }

    #[test]
    fn test_put_barrier_above_spot_rejected() {
        let errors = BarrierClassifier::classify(
            OptionSide::Put,
            ExoticType::KnockInBarrier,
            100.0,
            &barriers("", "105"),
        )
        .unwrap_err();
        assert_eq!(errors, vec!["LOWER_BARRIER must be < SPOT."]);
    }

    #[test]
    fn test_double_barrier_collects_both_errors() {
        let errors = BarrierClassifier::classify(
            OptionSide::Call,
            ExoticType::Kiko,
            100.0,
            &barriers("95", ""),
        )
        .unwrap_err();
        assert_eq!(
            errors,
            vec!["UPPER_BARRIER must be > SPOT.", "LOWER_BARRIER is empty"]
        );
    }

    #[test]
    fn test_double_barrier_same_rule_for_puts() {
        let spec = BarrierClassifier::classify(
            OptionSide::Put,
            ExoticType::KnockOutDoubleBarrier,
            100.0,
            &barriers("120", "80"),
        )
        .unwrap()
        .unwrap();
        assert_eq!(spec.direction, None);
        assert_eq!((spec.lower, spec.upper), (Some(80.0), Some(120.0)));
    }

    #[test]
    fn test_vanilla_ignores_barrier_fields() {
        let result = BarrierClassifier::classify(
            OptionSide::Call,
            ExoticType::Vanilla,
            100.0,
            &barriers("garbage", "-1"),
        );
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_barrier_field_precedence() {
        let errors = BarrierClassifier::classify(
            OptionSide::Call,
            ExoticType::KnockOutBarrier,
            100.0,
            &barriers("abc", ""),
        )
        .unwrap_err();
        assert_eq!(errors, vec!["Invalid UPPER_BARRIER. Must be a float."]);
    }
}
