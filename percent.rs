use std::fmt;

/// A percentage held in tenths, so `50.2` is stored exactly as `502`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Default)]
pub struct Percent {
    tenths: u16,
}

impl Percent {
    pub const fn from_tenths(tenths: u16) -> Self {
        Percent { tenths }
    }

    pub const fn zero() -> Self {
        Percent { tenths: 0 }
    }

    /// `numerator / denominator` as a percentage, rounded half away from
    /// zero to one decimal (15/16 = 93.75% becomes `93.8`).
    pub fn from_ratio(numerator: u32, denominator: u32) -> Self {
        Percent {
            tenths: round_ratio(1000 * numerator, denominator) as u16,
        }
    }

    pub fn tenths(&self) -> u16 {
        self.tenths
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

/// `numerator / denominator` rounded to the nearest integer, ties going up.
/// Both are non-negative, so up is away from zero. Panics if `denominator`
/// is zero.
pub fn round_ratio(numerator: u32, denominator: u32) -> u32 {
    (2 * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ratio() {
        assert_eq!(round_ratio(10, 4), 3);
        assert_eq!(round_ratio(9, 4), 2);
        assert_eq!(round_ratio(11, 4), 3);
        assert_eq!(round_ratio(0, 7), 0);
        assert_eq!(round_ratio(245, 2), 123);
    }

    #[test]
    fn test_from_ratio_rounds_ties_up() {
        assert_eq!(Percent::from_ratio(15, 16), Percent::from_tenths(938));
        assert_eq!(Percent::from_ratio(1225, 10000), Percent::from_tenths(123));
        assert_eq!(Percent::from_ratio(1224, 10000), Percent::from_tenths(122));
        assert_eq!(Percent::from_ratio(256, 510), Percent::from_tenths(502));
        assert_eq!(Percent::from_ratio(510, 510), Percent::from_tenths(1000));
    }

    #[test]
    fn test_display_keeps_one_decimal() {
        assert_eq!(Percent::from_tenths(1000).to_string(), "100.0");
        assert_eq!(Percent::from_tenths(502).to_string(), "50.2");
        assert_eq!(Percent::zero().to_string(), "0.0");
    }
}
