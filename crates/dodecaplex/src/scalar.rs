//! Symbolic coordinate magnitudes and labeled values.
//!
//! Purpose
//! - Every coordinate of both solids is ± one of eleven closed-form constants.
//!   Tagging them symbolically lets orbit dedup compare tags instead of floats
//!   that were derived along different paths.
//! - Each magnitude has exactly one derivation from `PHI` and `SQRT_5`, so the
//!   same tag always yields the same `f64`.

use std::fmt;

use nalgebra::Vector4;

/// √5.
pub const SQRT_5: f64 = 2.236_067_977_499_789_7;
/// Golden ratio Φ = (1 + √5) / 2.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Absolute value of a seed coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Magnitude {
    Zero,
    HalfInvPhi,
    InvPhiSq,
    Half,
    InvPhi,
    HalfPhi,
    One,
    Phi,
    Two,
    Sqrt5,
    PhiSq,
}

impl Magnitude {
    pub const ALL: [Magnitude; 11] = [
        Magnitude::Zero,
        Magnitude::HalfInvPhi,
        Magnitude::InvPhiSq,
        Magnitude::Half,
        Magnitude::InvPhi,
        Magnitude::HalfPhi,
        Magnitude::One,
        Magnitude::Phi,
        Magnitude::Two,
        Magnitude::Sqrt5,
        Magnitude::PhiSq,
    ];

    /// Numeric value; 1/Φ = Φ − 1 and Φ² = Φ + 1 keep every derivation additive.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Magnitude::Zero => 0.0,
            Magnitude::InvPhiSq => 2.0 - PHI,
            Magnitude::HalfInvPhi => (PHI - 1.0) / 2.0,
            Magnitude::Half => 0.5,
            Magnitude::InvPhi => PHI - 1.0,
            Magnitude::HalfPhi => PHI / 2.0,
            Magnitude::One => 1.0,
            Magnitude::Phi => PHI,
            Magnitude::Two => 2.0,
            Magnitude::Sqrt5 => SQRT_5,
            Magnitude::PhiSq => PHI + 1.0,
        }
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Magnitude::Zero => "0",
            Magnitude::InvPhiSq => "1/Φ²",
            Magnitude::HalfInvPhi => "1/2Φ",
            Magnitude::Half => "1/2",
            Magnitude::InvPhi => "1/Φ",
            Magnitude::HalfPhi => "Φ/2",
            Magnitude::One => "1",
            Magnitude::Phi => "Φ",
            Magnitude::Two => "2",
            Magnitude::Sqrt5 => "√5",
            Magnitude::PhiSq => "Φ²",
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed magnitude tag. Zero is never negative, so `-0` and `0` compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub magnitude: Magnitude,
    pub negative: bool,
}

impl Coord {
    #[inline]
    pub fn new(magnitude: Magnitude, negative: bool) -> Self {
        Self {
            magnitude,
            negative: negative && magnitude != Magnitude::Zero,
        }
    }

    #[inline]
    pub fn positive(magnitude: Magnitude) -> Self {
        Self::new(magnitude, false)
    }

    #[inline]
    pub fn negated(self) -> Self {
        Self::new(self.magnitude, !self.negative)
    }

    #[inline]
    pub fn value(self) -> f64 {
        if self.negative {
            -self.magnitude.value()
        } else {
            self.magnitude.value()
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { " " };
        f.pad(&format!("{sign}{}", self.magnitude.label()))
    }
}

/// Four symbolic coordinates; the exact identity of a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolicPoint(pub [Coord; 4]);

impl SymbolicPoint {
    #[inline]
    pub fn to_vector(&self) -> Vector4<f64> {
        let c = &self.0;
        Vector4::new(c[0].value(), c[1].value(), c[2].value(), c[3].value())
    }

    pub fn labeled(&self) -> Labeled<Vector4<f64>> {
        Labeled::new(self.to_vector(), self.to_string())
    }
}

impl fmt::Display for SymbolicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.0;
        write!(f, "({:>5}, {:>5}, {:>5}, {:>5})", c[0], c[1], c[2], c[3])
    }
}

/// A value paired with a human-readable label.
#[derive(Clone, Debug, PartialEq)]
pub struct Labeled<T> {
    pub value: T,
    pub label: String,
}

impl<T> Labeled<T> {
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

impl<T> fmt::Display for Labeled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
