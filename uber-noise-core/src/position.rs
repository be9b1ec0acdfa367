//! Sample positions.
//!
//! A [`Position`] always has `x` and `y`; `z` and `w` are optional and their
//! presence picks the kernel dimension. Evaluation takes positions by value,
//! so no engine ever holds on to a "current" position.

use glam::{DVec2, DVec3, DVec4};

use crate::error::CoordinateError;

/// A 2D, 3D or 4D sample position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Optional Z coordinate; present means at least 3D.
    pub z: Option<f64>,
    /// Optional W coordinate; only used together with `z`.
    pub w: Option<f64>,
}

impl Position {
    /// A 2D position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            w: None,
        }
    }

    /// Returns a copy with `z` set.
    #[must_use]
    pub const fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Returns a copy with `w` set.
    #[must_use]
    pub const fn with_w(mut self, w: f64) -> Self {
        self.w = Some(w);
        self
    }

    /// Number of kernel dimensions this position samples.
    ///
    /// A `w` without a `z` is ignored.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        match (self.z, self.w) {
            (Some(_), Some(_)) => 4,
            (Some(_), None) => 3,
            (None, _) => 2,
        }
    }

    /// Multiplies every present component by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z.map(|z| z * factor),
            w: self.w.map(|w| w * factor),
        }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Position {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y).with_z(z)
    }
}

impl From<(f64, f64, f64, f64)> for Position {
    fn from((x, y, z, w): (f64, f64, f64, f64)) -> Self {
        Self::new(x, y).with_z(z).with_w(w)
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y).with_z(z)
    }
}

impl From<[f64; 4]> for Position {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self::new(x, y).with_z(z).with_w(w)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y).with_z(v.z)
    }
}

impl From<DVec4> for Position {
    fn from(v: DVec4) -> Self {
        Self::new(v.x, v.y).with_z(v.z).with_w(v.w)
    }
}

impl TryFrom<&[f64]> for Position {
    type Error = CoordinateError;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        match *coords {
            [x, y] => Ok(Self::new(x, y)),
            [x, y, z] => Ok(Self::new(x, y).with_z(z)),
            [x, y, z, w] => Ok(Self::new(x, y).with_z(z).with_w(w)),
            _ => Err(CoordinateError::Arity(coords.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_follows_present_components() {
        assert_eq!(Position::from((1.0, 2.0)).dimension(), 2);
        assert_eq!(Position::from([1.0, 2.0, 3.0]).dimension(), 3);
        assert_eq!(Position::from(DVec4::ONE).dimension(), 4);
        assert_eq!(Position::new(0.0, 0.0).with_w(1.0).dimension(), 2);
    }

    #[test]
    fn slices_of_wrong_length_are_rejected() {
        assert_eq!(
            Position::try_from(&[1.0][..]),
            Err(CoordinateError::Arity(1))
        );
        assert_eq!(
            Position::try_from(&[0.0; 5][..]),
            Err(CoordinateError::Arity(5))
        );
        assert_eq!(
            Position::try_from(&[1.0, 2.0, 3.0][..]),
            Ok(Position::new(1.0, 2.0).with_z(3.0))
        );
    }

    #[test]
    fn scaling_skips_absent_components() {
        let p = Position::new(1.0, -2.0).with_z(0.5).scaled(2.0);
        assert_eq!(p, Position::new(2.0, -4.0).with_z(1.0));
        assert_eq!(p.w, None);
    }
}
