//! Option exercise definitions.
//!
//! Exercises carry calendar dates; engines convert them to times through
//! the process's term structures.

use pricer_core::types::Date;

/// Option exercise.
///
/// # Variants
/// - `European`: Exercise only at expiry
/// - `American`: Exercise on any date in `[earliest, expiry]`
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::Exercise;
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let expiry = Date::from_ymd(2024, 7, 2).unwrap();
///
/// assert!(Exercise::european(expiry).is_european());
/// assert_eq!(Exercise::american(today, expiry).last_date(), expiry);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exercise {
    /// European style: exercise only at expiry.
    European {
        /// Exercise date
        expiry: Date,
    },

    /// American style: exercise at any time up to expiry.
    American {
        /// First admissible exercise date
        earliest: Date,
        /// Last admissible exercise date
        expiry: Date,
    },
}

impl Exercise {
    /// Creates a European exercise at `expiry`.
    #[inline]
    pub fn european(expiry: Date) -> Self {
        Exercise::European { expiry }
    }

    /// Creates an American exercise between `earliest` and `expiry`.
    #[inline]
    pub fn american(earliest: Date, expiry: Date) -> Self {
        Exercise::American { earliest, expiry }
    }

    /// Returns whether this is a European exercise.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, Exercise::European { .. })
    }

    /// Returns whether this is an American exercise.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, Exercise::American { .. })
    }

    /// Final exercise date.
    #[inline]
    pub fn last_date(&self) -> Date {
        match self {
            Exercise::European { expiry } | Exercise::American { expiry, .. } => *expiry,
        }
    }

    /// Style name used in engine error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Exercise::European { .. } => "European",
            Exercise::American { .. } => "American",
        }
    }
}
