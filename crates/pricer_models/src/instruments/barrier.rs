//! Barrier classifications for single and double barrier options.

use std::fmt;

/// Single barrier type: direction of the level relative to spot and
/// whether touching it activates or extinguishes the option.
///
/// # Examples
/// ```
/// use pricer_models::instruments::BarrierType;
///
/// assert!(BarrierType::UpOut.is_up());
/// assert!(BarrierType::DownIn.is_knock_in());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierType {
    /// Activated when spot falls to the barrier.
    DownIn,
    /// Activated when spot rises to the barrier.
    UpIn,
    /// Extinguished when spot falls to the barrier.
    DownOut,
    /// Extinguished when spot rises to the barrier.
    UpOut,
}

impl BarrierType {
    /// Barrier sits above spot.
    #[inline]
    pub fn is_up(&self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::UpOut)
    }

    /// Touching the barrier activates the option.
    #[inline]
    pub fn is_knock_in(&self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::DownIn)
    }

    /// Whether `spot` has already reached the barrier.
    #[inline]
    pub fn triggered(&self, spot: f64, barrier: f64) -> bool {
        if self.is_up() {
            spot >= barrier
        } else {
            spot <= barrier
        }
    }
}

impl fmt::Display for BarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BarrierType::DownIn => "DownIn",
            BarrierType::UpIn => "UpIn",
            BarrierType::DownOut => "DownOut",
            BarrierType::UpOut => "UpOut",
        };
        write!(f, "{}", name)
    }
}

/// Double barrier type.
///
/// `Kiko` is knocked in at the lower barrier and out at the upper one;
/// `Koki` is the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoubleBarrierType {
    /// Activated when either barrier is touched.
    KnockIn,
    /// Extinguished when either barrier is touched.
    KnockOut,
    /// Lower barrier knocks in, upper knocks out.
    Kiko,
    /// Lower barrier knocks out, upper knocks in.
    Koki,
}

impl fmt::Display for DoubleBarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DoubleBarrierType::KnockIn => "KnockIn",
            DoubleBarrierType::KnockOut => "KnockOut",
            DoubleBarrierType::Kiko => "KIKO",
            DoubleBarrierType::Koki => "KOKI",
        };
        write!(f, "{}", name)
    }
}
