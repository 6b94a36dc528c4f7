//! RGB colour

use crate::base::{Float, EPSILON_BLACK};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign};

/// An RGB triple of single-precision components. Radiance, importance and
/// reflectance values are all carried as colours.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Colour {
    /// Red component.
    pub r: f32,

    /// Green component.
    pub g: f32,

    /// Blue component.
    pub b: f32,
}

impl Colour {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    /// White (1, 1, 1).
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Red (1, 0, 0).
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0 };

    /// Green (0, 1, 0).
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0 };

    /// Blue (0, 0, 1).
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0 };

    /// Creates a new colour.
    ///
    /// * `r` - Red component.
    /// * `g` - Green component.
    /// * `b` - Blue component.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Returns true when the largest component is below `EPSILON_BLACK`.
    pub fn is_black(&self) -> bool {
        self.r.max(self.g).max(self.b) < EPSILON_BLACK
    }

    /// Returns true if any component is NaN.
    pub fn has_nans(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan()
    }
}

impl Add for Colour {
    type Output = Self;

    /// Adds the colours component-wise.
    ///
    /// * `other` - The colour to add.
    fn add(self, other: Self) -> Self::Output {
        Self::Output::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl AddAssign for Colour {
    /// Performs the `+=` operation component-wise.
    ///
    /// * `other` - The colour to add.
    fn add_assign(&mut self, other: Self) {
        *self = Self::new(self.r + other.r, self.g + other.g, self.b + other.b);
    }
}

impl Mul for Colour {
    type Output = Self;

    /// Multiplies the colours component-wise.
    ///
    /// * `other` - The colour to multiply with.
    fn mul(self, other: Self) -> Self::Output {
        Self::Output::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

impl MulAssign for Colour {
    /// Performs the `*=` operation component-wise.
    ///
    /// * `other` - The colour to multiply with.
    fn mul_assign(&mut self, other: Self) {
        *self = Self::new(self.r * other.r, self.g * other.g, self.b * other.b);
    }
}

impl Mul<f32> for Colour {
    type Output = Self;

    /// Scales the colour.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: f32) -> Self::Output {
        Self::Output::new(self.r * f, self.g * f, self.b * f)
    }
}

impl Mul<Float> for Colour {
    type Output = Self;

    /// Scales the colour by a double-precision factor.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        self * (f as f32)
    }
}

impl Div<f32> for Colour {
    type Output = Self;

    /// Scales the colour by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: f32) -> Self::Output {
        Self::Output::new(self.r / f, self.g / f, self.b / f)
    }
}

impl Div<Float> for Colour {
    type Output = Self;

    /// Scales the colour by the reciprocal of a double-precision factor.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self::Output {
        self / (f as f32)
    }
}

impl fmt::Display for Colour {
    /// Formats the colour as `(r, g, b)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
