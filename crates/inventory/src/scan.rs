//! Inbound detection events.
//!
//! Camera, barcode reader and the produce detector are black boxes; all the
//! inventory sees is the events below, delivered over an event bus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_events::Event;

use crate::category::Category;

/// Labels the produce detector is trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Produce {
    Apple,
    Banana,
    Carrot,
    Cucumber,
    Grapes,
    Onion,
    Oranges,
    Tomato,
}

impl Produce {
    pub const ALL: [Produce; 8] = [
        Produce::Apple,
        Produce::Banana,
        Produce::Carrot,
        Produce::Cucumber,
        Produce::Grapes,
        Produce::Onion,
        Produce::Oranges,
        Produce::Tomato,
    ];

    /// Map a raw detector label. Matching is exact; anything else is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Raw label as emitted by the detector.
    pub fn label(&self) -> &'static str {
        match self {
            Produce::Apple => "apple",
            Produce::Banana => "banana",
            Produce::Carrot => "carrot",
            Produce::Cucumber => "cucumber",
            Produce::Grapes => "grapes",
            Produce::Onion => "onion",
            Produce::Oranges => "oranges",
            Produce::Tomato => "tomato",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Produce::Apple | Produce::Banana | Produce::Grapes | Produce::Oranges => {
                Category::Fruit
            }
            Produce::Carrot | Produce::Cucumber | Produce::Onion | Produce::Tomato => {
                Category::Vegetables
            }
        }
    }

    /// Item name a detected produce is filed under.
    pub fn display_name(&self) -> &'static str {
        match self {
            Produce::Apple => "Apples",
            Produce::Banana => "Bananas",
            Produce::Carrot => "Carrots",
            Produce::Cucumber => "Cucumbers",
            Produce::Grapes => "Grapes",
            Produce::Onion => "Onions",
            Produce::Oranges => "Oranges",
            Produce::Tomato => "Tomatos",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanEvent {
    BarcodeDetected {
        code: String,
        detected_at: DateTime<Utc>,
    },
    /// `produce` is `None` when the detector fired but the label is unknown.
    ObjectDetected {
        produce: Option<Produce>,
        detected_at: DateTime<Utc>,
    },
}

impl ScanEvent {
    pub fn barcode(code: impl Into<String>) -> Self {
        ScanEvent::BarcodeDetected {
            code: code.into(),
            detected_at: Utc::now(),
        }
    }

    pub fn object(produce: Option<Produce>) -> Self {
        ScanEvent::ObjectDetected {
            produce,
            detected_at: Utc::now(),
        }
    }

    /// Object detection straight from a raw detector label.
    pub fn object_label(label: &str) -> Self {
        Self::object(Produce::from_label(label))
    }
}

impl Event for ScanEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ScanEvent::BarcodeDetected { .. } => "scan.barcode.detected",
            ScanEvent::ObjectDetected { .. } => "scan.object.detected",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ScanEvent::BarcodeDetected { detected_at, .. } => *detected_at,
            ScanEvent::ObjectDetected { detected_at, .. } => *detected_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_back_to_produce() {
        for produce in Produce::ALL {
            assert_eq!(Produce::from_label(produce.label()), Some(produce));
        }
        assert_eq!(Produce::from_label("Apple"), None);
        assert_eq!(Produce::from_label("pineapple"), None);
    }

    #[test]
    fn produce_lands_in_fruit_or_vegetables() {
        assert_eq!(Produce::Grapes.category(), Category::Fruit);
        assert_eq!(Produce::Tomato.category(), Category::Vegetables);
        assert_eq!(Produce::Tomato.display_name(), "Tomatos");
        for produce in Produce::ALL {
            assert!(matches!(
                produce.category(),
                Category::Fruit | Category::Vegetables
            ));
        }
    }

    #[test]
    fn event_types_are_stable() {
        assert_eq!(ScanEvent::barcode("123").event_type(), "scan.barcode.detected");
        let unknown = ScanEvent::object_label("rock");
        assert_eq!(unknown.event_type(), "scan.object.detected");
        assert!(matches!(unknown, ScanEvent::ObjectDetected { produce: None, .. }));
    }

    #[test]
    fn occurred_at_is_the_detection_time() {
        let before = Utc::now();
        let scan = ScanEvent::barcode("123");
        let ScanEvent::BarcodeDetected { detected_at, .. } = &scan else {
            panic!("expected barcode scan");
        };
        assert_eq!(scan.occurred_at(), *detected_at);
        assert!(scan.occurred_at() >= before);
    }
}
