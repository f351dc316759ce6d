//! Output formatting for CLI commands

use serde::Serialize;

use crate::domain::{Shape, Unit};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    precision: usize,
}

impl Output {
    pub fn new(format: OutputFormat, precision: usize) -> Self {
        Self { format, precision }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints a warning to stderr
    pub fn warn(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("Warning: {}", message),
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({ "warning": message }));
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Callers normally format text themselves
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Formats a length in `unit`
    pub fn length(&self, meters: f64, unit: Unit) -> String {
        unit.format(Unit::Meters.convert(meters, unit), self.precision)
    }

    /// Formats an already converted value with a unit suffix such as `m²`
    pub fn quantity(&self, value: f64, unit: Unit, power: u8) -> String {
        let suffix = match power {
            2 => "²",
            3 => "³",
            _ => "",
        };
        format!("{:.*} {}{}", self.precision, value, unit.symbol(), suffix)
    }

    /// One-line metric summary of a shape in `unit`
    pub fn metrics(&self, shape: &Shape, unit: Unit) -> String {
        let m = shape.measurements().convert(Unit::Meters, unit);
        let mut parts = Vec::new();

        if let Some(area) = m.area {
            parts.push(format!("area {}", self.quantity(area, unit, 2)));
        }
        if let Some(perimeter) = m.perimeter {
            parts.push(format!("perimeter {}", self.quantity(perimeter, unit, 1)));
        }
        if let Some(volume) = m.volume {
            parts.push(format!("volume {}", self.quantity(volume, unit, 3)));
        }
        if let Some(surface) = m.surface_area {
            parts.push(format!("surface {}", self.quantity(surface, unit, 2)));
        }

        parts.join(", ")
    }
}

/// JSON view of a shape, with dimension and metrics in `unit`
pub fn shape_json(shape: &Shape, unit: Unit) -> serde_json::Value {
    let mut value = serde_json::json!({
        "id": shape.id(),
        "name": shape.name(),
        "tipo": shape.dimensionality(),
        "unit": unit.symbol(),
    });

    if let serde_json::Value::Object(map) = &mut value {
        map.insert(
            shape.kind().dimension_name().to_string(),
            serde_json::json!(Unit::Meters.convert(shape.dimension(), unit)),
        );
        if let Ok(serde_json::Value::Object(metrics)) =
            serde_json::to_value(shape.measurements().convert(Unit::Meters, unit))
        {
            map.extend(metrics);
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShapeId;

    fn circle() -> Shape {
        Shape::circle(ShapeId::new(3).unwrap(), 1.0).unwrap()
    }

    #[test]
    fn metrics_line_uses_unit() {
        let output = Output::new(OutputFormat::Text, 2);
        assert_eq!(
            output.metrics(&circle(), Unit::Meters),
            "area 3.14 m², perimeter 6.28 m"
        );
    }

    #[test]
    fn length_converts_from_meters() {
        let output = Output::new(OutputFormat::Text, 1);
        assert_eq!(output.length(0.25, Unit::Centimeters), "25.0 cm");
    }

    #[test]
    fn shape_json_carries_dimension_key() {
        let json = shape_json(&circle(), Unit::Centimeters);

        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Circle");
        assert_eq!(json["tipo"], "2D");
        assert_eq!(json["unit"], "cm");
        assert!((json["radius"].as_f64().unwrap() - 100.0).abs() < 1e-9);
        assert!(json.get("side").is_none());
        assert!(json.get("volume").is_none());
        assert!(json["area"].as_f64().unwrap() > 31415.0);
    }
}
