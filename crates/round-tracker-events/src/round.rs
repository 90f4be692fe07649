//! Round coercion and round-input parsing.

use round_tracker_models::Round;

use crate::error::{
    Result, StoreError, ROUND_NEGATIVE, ROUND_NOT_A_NUMBER, ROUND_OUT_OF_RANGE,
};

/// Something that can be coerced to a round number.
///
/// Integers convert directly, floats must be finite and whole, strings must
/// hold a whole number.
pub trait IntoRound {
    /// Converts `self` into a round, or fails with a validation error.
    fn into_round(self) -> Result<Round>;
}

impl IntoRound for Round {
    fn into_round(self) -> Result<Round> {
        Ok(self)
    }
}

impl IntoRound for u16 {
    fn into_round(self) -> Result<Round> {
        Ok(Round::from(self))
    }
}

impl IntoRound for i32 {
    fn into_round(self) -> Result<Round> {
        i64::from(self).into_round()
    }
}

impl IntoRound for i64 {
    fn into_round(self) -> Result<Round> {
        if self < 0 {
            return Err(StoreError::validation(ROUND_NEGATIVE));
        }
        Round::try_from(self).map_err(|_| StoreError::validation(ROUND_OUT_OF_RANGE))
    }
}

impl IntoRound for u64 {
    fn into_round(self) -> Result<Round> {
        Round::try_from(self).map_err(|_| StoreError::validation(ROUND_OUT_OF_RANGE))
    }
}

impl IntoRound for usize {
    fn into_round(self) -> Result<Round> {
        Round::try_from(self).map_err(|_| StoreError::validation(ROUND_OUT_OF_RANGE))
    }
}

impl IntoRound for f64 {
    fn into_round(self) -> Result<Round> {
        if !self.is_finite() || self.fract() != 0.0 {
            return Err(StoreError::validation(ROUND_NOT_A_NUMBER));
        }
        if self < 0.0 {
            return Err(StoreError::validation(ROUND_NEGATIVE));
        }
        if self > f64::from(Round::MAX) {
            return Err(StoreError::validation(ROUND_OUT_OF_RANGE));
        }
        Ok(self as Round)
    }
}

impl IntoRound for &str {
    fn into_round(self) -> Result<Round> {
        self.trim()
            .parse::<i64>()
            .map_err(|_| StoreError::validation(ROUND_NOT_A_NUMBER))?
            .into_round()
    }
}

impl IntoRound for &String {
    fn into_round(self) -> Result<Round> {
        self.as_str().into_round()
    }
}

impl IntoRound for String {
    fn into_round(self) -> Result<Round> {
        self.as_str().into_round()
    }
}

/// Supplies the live round number of a session.
pub trait CurrentRound {
    /// Returns the round the session is on right now.
    fn current_round(&self) -> Round;
}

impl CurrentRound for Round {
    fn current_round(&self) -> Round {
        *self
    }
}

impl<T: CurrentRound + ?Sized> CurrentRound for &T {
    fn current_round(&self) -> Round {
        (**self).current_round()
    }
}

/// Parses user round input.
///
/// `"+N"` is a signed offset from the current round (`"+-2"` steps back
/// two rounds), anything else an absolute round. The result is not clamped
/// or compared against the current round; callers that want "must be in the
/// future" check it themselves.
///
/// # Errors
/// Returns a validation error if the numeric part is not a whole number or
/// the resulting round is negative.
pub fn parse_round_input<R: CurrentRound + ?Sized>(input: &str, current: &R) -> Result<Round> {
    let input = input.trim();

    match input.strip_prefix('+') {
        Some(offset) => {
            let offset: i64 = offset
                .trim()
                .parse()
                .map_err(|_| StoreError::validation(ROUND_NOT_A_NUMBER))?;
            i64::from(current.current_round())
                .checked_add(offset)
                .ok_or_else(|| StoreError::validation(ROUND_OUT_OF_RANGE))?
                .into_round()
        }
        None => input.into_round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Combat {
        round: Round,
    }

    impl CurrentRound for Combat {
        fn current_round(&self) -> Round {
            self.round
        }
    }

    fn message(err: StoreError) -> String {
        match err {
            StoreError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_offset() {
        let combat = Combat { round: 5 };
        assert_eq!(parse_round_input("+2", &combat).unwrap(), 7);
        assert_eq!(parse_round_input("+0", &combat).unwrap(), 5);
        assert_eq!(parse_round_input("+ 2", &combat).unwrap(), 7);
    }

    #[test]
    fn test_parse_negative_offset() {
        let combat = Combat { round: 5 };
        assert_eq!(parse_round_input("+-2", &combat).unwrap(), 3);
        assert_eq!(parse_round_input("+-5", &combat).unwrap(), 0);

        let err = parse_round_input("+-9", &combat).unwrap_err();
        assert_eq!(message(err), ROUND_NEGATIVE);
    }

    #[test]
    fn test_parse_absolute() {
        let combat = Combat { round: 5 };
        assert_eq!(parse_round_input("10", &combat).unwrap(), 10);
        assert_eq!(parse_round_input(" 3 ", &combat).unwrap(), 3);
    }

    #[test]
    fn test_parse_does_not_clamp_to_current() {
        let combat = Combat { round: 5 };
        assert_eq!(parse_round_input("2", &combat).unwrap(), 2);
        assert_eq!(parse_round_input("0", &combat).unwrap(), 0);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        let combat = Combat { round: 5 };

        for input in ["abc", "", "+", "+x", "+2.5", "2.5", "1e3"] {
            let err = parse_round_input(input, &combat).unwrap_err();
            assert!(err.is_validation(), "input {input:?}");
        }
        assert_eq!(
            message(parse_round_input("abc", &combat).unwrap_err()),
            ROUND_NOT_A_NUMBER
        );
    }

    #[test]
    fn test_parse_offset_overflow() {
        let err = parse_round_input("+1", &Round::MAX).unwrap_err();
        assert_eq!(message(err), ROUND_OUT_OF_RANGE);

        let err = parse_round_input("+9223372036854775807", &5u32).unwrap_err();
        assert_eq!(message(err), ROUND_OUT_OF_RANGE);
    }

    #[test]
    fn test_plain_round_as_current() {
        assert_eq!(parse_round_input("+3", &4u32).unwrap(), 7);
    }

    #[test]
    fn test_into_round_floats() {
        assert_eq!(4.0f64.into_round().unwrap(), 4);
        assert_eq!(message(f64::NAN.into_round().unwrap_err()), ROUND_NOT_A_NUMBER);
        assert_eq!(
            message(f64::INFINITY.into_round().unwrap_err()),
            ROUND_NOT_A_NUMBER
        );
        assert_eq!(message(1.5f64.into_round().unwrap_err()), ROUND_NOT_A_NUMBER);
        assert_eq!(message((-1.0f64).into_round().unwrap_err()), ROUND_NEGATIVE);
    }

    #[test]
    fn test_into_round_integers_and_strings() {
        assert_eq!(7i64.into_round().unwrap(), 7);
        assert_eq!(message((-3i32).into_round().unwrap_err()), ROUND_NEGATIVE);
        assert_eq!(
            message(u64::MAX.into_round().unwrap_err()),
            ROUND_OUT_OF_RANGE
        );
        assert_eq!("12".into_round().unwrap(), 12);
        assert_eq!(String::from("8").into_round().unwrap(), 8);
        assert_eq!(message("NaN".into_round().unwrap_err()), ROUND_NOT_A_NUMBER);
    }
}
