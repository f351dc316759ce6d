//! Length units
//!
//! Shapes are stored in meters. Units convert lengths linearly, areas with
//! the factor squared and volumes with the factor cubed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown unit '{0}' (expected m, cm, mm, km, in or ft)")]
pub struct UnitError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    Meters,
    Centimeters,
    Millimeters,
    Kilometers,
    Inches,
    Feet,
}

impl Unit {
    pub const ALL: [Unit; 6] = [
        Unit::Meters,
        Unit::Centimeters,
        Unit::Millimeters,
        Unit::Kilometers,
        Unit::Inches,
        Unit::Feet,
    ];

    /// Length of one of this unit, in meters
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Meters => 1.0,
            Unit::Centimeters => 0.01,
            Unit::Millimeters => 0.001,
            Unit::Kilometers => 1000.0,
            Unit::Inches => 0.0254,
            Unit::Feet => 0.3048,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Centimeters => "cm",
            Unit::Millimeters => "mm",
            Unit::Kilometers => "km",
            Unit::Inches => "in",
            Unit::Feet => "ft",
        }
    }

    /// Converts a length from this unit to `to`
    pub fn convert(&self, value: f64, to: Unit) -> f64 {
        self.convert_pow(value, to, 1)
    }

    /// Converts an area from this unit squared to `to` squared
    pub fn convert_area(&self, value: f64, to: Unit) -> f64 {
        self.convert_pow(value, to, 2)
    }

    /// Converts a volume from this unit cubed to `to` cubed
    pub fn convert_volume(&self, value: f64, to: Unit) -> f64 {
        self.convert_pow(value, to, 3)
    }

    fn convert_pow(&self, value: f64, to: Unit, power: i32) -> f64 {
        if *self == to {
            return value;
        }
        value * (self.factor() / to.factor()).powi(power)
    }

    /// Formats a value with this unit's symbol (e.g. `2.50 cm`)
    pub fn format(&self, value: f64, precision: usize) -> String {
        format!("{:.*} {}", precision, value, self.symbol())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Unit::Meters),
            "cm" | "centimeter" | "centimeters" => Ok(Unit::Centimeters),
            "mm" | "millimeter" | "millimeters" => Ok(Unit::Millimeters),
            "km" | "kilometer" | "kilometers" => Ok(Unit::Kilometers),
            "in" | "inch" | "inches" => Ok(Unit::Inches),
            "ft" | "foot" | "feet" => Ok(Unit::Feet),
            _ => Err(UnitError(s.to_string())),
        }
    }
}
