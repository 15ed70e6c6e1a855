// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Floor-plan record and pins.

use super::annotation::Point;
use serde::{Deserialize, Serialize};

/// A labeled marker on a floor plan, in normalized coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub x: f64,
    pub y: f64,
    pub description: String,
}

impl Pin {
    pub fn new(at: Point, description: impl Into<String>) -> Self {
        Self {
            x: at.x,
            y: at.y,
            description: description.into(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Image plus pins, always stored and rewritten as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanRecord {
    /// Image embedded as a `data:` URL.
    pub image_base64: String,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl FloorPlanRecord {
    pub fn new(image_base64: String) -> Self {
        Self {
            image_base64,
            pins: Vec::new(),
        }
    }

    /// Copy of this record with `pins` in place of the current list.
    pub fn with_pins(&self, pins: Vec<Pin>) -> Self {
        Self {
            image_base64: self.image_base64.clone(),
            pins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_shape() {
        let record = FloorPlanRecord {
            image_base64: "data:image/png;base64,AAAA".to_string(),
            pins: vec![Pin::new(Point::new(0.2, 0.3), "Server Room")],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["imageBase64"], "data:image/png;base64,AAAA");
        assert_eq!(json["pins"][0]["description"], "Server Room");
        assert_eq!(json["pins"][0]["x"], 0.2);
    }

    #[test]
    fn test_missing_pins_defaults_to_empty() {
        let record: FloorPlanRecord = serde_json::from_str(r#"{"imageBase64":"data:,"}"#).unwrap();
        assert!(record.pins.is_empty());
    }
}
