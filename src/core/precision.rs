// Number of fractional digits a reported figure keeps.
//
// Out of range requests are normalized to the default instead of failing.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Precision(u32);

impl Precision {
    pub const MAX: u32 = 6;
    pub const DEFAULT: Precision = Precision(0);

    pub fn new(digits: i64) -> Self {
        match u32::try_from(digits) {
            Ok(digits) if digits <= Self::MAX => Precision(digits),
            _ => {
                tracing::warn!(digits, max = Self::MAX, "precision out of range, using default");
                Self::DEFAULT
            }
        }
    }

    pub fn digits(&self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
