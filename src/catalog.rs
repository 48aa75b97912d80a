//! The chronicle catalog: events, their dates, and their slides.
//!
//! The catalog is immutable after loading. It is deserialized from JSON
//! (a user-supplied file or the embedded default) and validated once;
//! everything downstream may assume every event carries at least one slide.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Embedded default catalog, used when no file is given on the command line.
const DEFAULT_CATALOG: &str = include_str!("../assets/default.json");

/// A dated sub-milestone within an event.
///
/// Its position in the parent's list drives the proportional rail
/// placement; ordering is meaningful only relative to siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateMark {
    pub year: i32,
    pub label: String,
}

/// One carousel page within an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    /// Reference to the pictured source, rendered as a framed placeholder.
    pub image: String,
    pub description: String,
    /// Optional annotation shown under the description.
    #[serde(default)]
    pub note: Option<String>,
}

/// A top-level chronicle entry: a year heading, nested date marks,
/// and a slide carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub year: i32,
    pub title: String,
    #[serde(default)]
    pub dates: Vec<DateMark>,
    pub slides: Vec<Slide>,
}

impl Event {
    pub fn heading(&self) -> String {
        format!("{}: {}", self.year, self.title)
    }
}

/// The full, ordered chronicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub events: Vec<Event>,
}

impl Catalog {
    /// Load and validate a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;
        catalog
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))?;
        Ok(catalog)
    }

    /// The embedded default chronicle.
    pub fn default_catalog() -> Result<Self> {
        let catalog: Catalog =
            serde_json::from_str(DEFAULT_CATALOG).context("Failed to parse embedded catalog")?;
        catalog
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid embedded catalog: {}", e))?;
        Ok(catalog)
    }

    /// Check the structural invariants the rest of the program relies on.
    ///
    /// A slideless event would make the carousel's modulo arithmetic
    /// undefined, so it is rejected here rather than guarded everywhere.
    pub fn validate(&self) -> Result<(), String> {
        if self.events.is_empty() {
            return Err("catalog has no events".to_string());
        }
        for (i, event) in self.events.iter().enumerate() {
            if event.slides.is_empty() {
                return Err(format!(
                    "event {} ({}) has no slides",
                    i,
                    event.heading()
                ));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Date count per event, in catalog order. Input to the resolver.
    pub fn date_counts(&self) -> Vec<usize> {
        self.events.iter().map(|e| e.dates.len()).collect()
    }

    /// Slide count per event, in catalog order.
    pub fn slide_counts(&self) -> Vec<usize> {
        self.events.iter().map(|e| e.slides.len()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(title: &str) -> Slide {
        Slide {
            title: title.to_string(),
            image: "archive/test.jpg".to_string(),
            description: "A test slide.".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_default_catalog_loads() {
        let catalog = Catalog::default_catalog().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.events.iter().all(|e| !e.slides.is_empty()));
    }

    #[test]
    fn test_validation_rejects_slideless_event() {
        let catalog = Catalog {
            events: vec![Event {
                year: 1960,
                title: "Empty".to_string(),
                dates: Vec::new(),
                slides: Vec::new(),
            }],
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_catalog() {
        let catalog = Catalog { events: Vec::new() };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_dateless_event() {
        let catalog = Catalog {
            events: vec![Event {
                year: 1970,
                title: "No dates".to_string(),
                dates: Vec::new(),
                slides: vec![slide("Only slide")],
            }],
        };
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_counts() {
        let catalog = Catalog::default_catalog().unwrap();
        assert_eq!(catalog.date_counts().len(), catalog.len());
        assert!(catalog.slide_counts().iter().all(|&n| n >= 1));
    }

    #[test]
    fn test_note_is_optional_in_json() {
        let text = r#"{
            "events": [{
                "year": 2000,
                "title": "Millennium",
                "dates": [],
                "slides": [{
                    "title": "Y2K",
                    "image": "archive/y2k.jpg",
                    "description": "The bug that wasn't."
                }]
            }]
        }"#;
        let catalog: Catalog = serde_json::from_str(text).unwrap();
        assert!(catalog.events[0].slides[0].note.is_none());
        assert!(catalog.validate().is_ok());
    }
}
