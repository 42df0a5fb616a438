//! Absolute lengths, kept in millimeters and PDF points at the same time.
//!
//! Every layout calculation downstream works in points (the PDF user-space unit),
//! while configuration and callers usually think in millimeters. A `Length` carries
//! both so neither side has to convert by hand.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Millimeters per PDF point (1/72 inch).
pub const MM_PER_PT: f32 = 0.352777778;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseLengthError {
    #[error("Invalid length literal '{literal}': {reason}")]
    InvalidNumber { literal: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Millimeter,
    Point,
}

/// An absolute length. Pure value type: arithmetic always yields a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    mm: f32,
    pt: f32,
}

impl Length {
    pub const ZERO: Length = Length { mm: 0.0, pt: 0.0 };

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_mm(mm: f32) -> Self {
        Self {
            mm,
            pt: mm / MM_PER_PT,
        }
    }

    pub fn from_pt(pt: f32) -> Self {
        Self {
            mm: pt * MM_PER_PT,
            pt,
        }
    }

    pub fn mm(self) -> f32 {
        self.mm
    }

    pub fn pt(self) -> f32 {
        self.pt
    }

    pub fn is_zero(self) -> bool {
        self.pt == 0.0
    }

    /// Parses `"<number> pt"`, `"<number> mm"` or a bare number (millimeters).
    ///
    /// The unit suffix is case-sensitive. An empty number part is zero, so `"pt"`
    /// and `""` both parse to [`Length::ZERO`].
    pub fn parse(input: &str) -> Result<Self, ParseLengthError> {
        let trimmed = input.trim();
        let (number, unit) = if let Some(rest) = trimmed.strip_suffix("pt") {
            (rest, Unit::Point)
        } else if let Some(rest) = trimmed.strip_suffix("mm") {
            (rest, Unit::Millimeter)
        } else {
            (trimmed, Unit::Millimeter)
        };

        let number = number.trim();
        if number.is_empty() {
            return Ok(Length::ZERO);
        }

        let value = number
            .parse::<f32>()
            .map_err(|e| ParseLengthError::InvalidNumber {
                literal: input.to_string(),
                reason: e.to_string(),
            })?;

        Ok(match unit {
            Unit::Point => Length::from_pt(value),
            Unit::Millimeter => Length::from_mm(value),
        })
    }

    pub fn subtract(self, other: Length) -> Length {
        self - other
    }

    pub fn max(self, other: Length) -> Length {
        if self.pt >= other.pt { self } else { other }
    }

    pub fn min(self, other: Length) -> Length {
        if self.pt <= other.pt { self } else { other }
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length::from_pt(self.pt + rhs.pt)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length::from_pt(self.pt - rhs.pt)
    }
}

impl Mul<f32> for Length {
    type Output = Length;

    fn mul(self, rhs: f32) -> Length {
        Length::from_pt(self.pt * rhs)
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, |acc, v| acc + v)
    }
}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Length::parse(s)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm", self.mm)
    }
}

impl Serialize for Length {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{} pt", self.pt))
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LengthVisitor;
        impl de::Visitor<'_> for LengthVisitor {
            type Value = Length;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a length like '12 pt', '5mm' or a number of millimeters")
            }

            fn visit_str<E>(self, value: &str) -> Result<Length, E>
            where
                E: de::Error,
            {
                Length::parse(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Length, E>
            where
                E: de::Error,
            {
                Ok(Length::from_mm(value as f32))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Length, E>
            where
                E: de::Error,
            {
                Ok(Length::from_mm(value as f32))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Length, E>
            where
                E: de::Error,
            {
                Ok(Length::from_mm(value as f32))
            }
        }
        deserializer.deserialize_any(LengthVisitor)
    }
}
