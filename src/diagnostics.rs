//! Injected diagnostics sink
//!
//! The core reports labels and tile markers for observability only; it
//! functions identically with the no-op sink.

use crate::core::types::{RoomId, TileCoord};

/// RGB color for debug output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What a debug label or marker is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Destination,
    Path,
    Food,
    Threat,
    Shelter,
    Behavior,
}

impl Subject {
    /// Consistent color per subject so traces are readable at a glance
    pub fn color(&self) -> Color {
        match self {
            Subject::Destination => Color::new(255, 80, 80),
            Subject::Path => Color::new(80, 160, 255),
            Subject::Food => Color::new(120, 220, 120),
            Subject::Threat => Color::new(255, 40, 160),
            Subject::Shelter => Color::new(240, 200, 60),
            Subject::Behavior => Color::new(220, 220, 220),
        }
    }
}

/// Receiver for debug labels and markers
pub trait Diagnostics {
    /// Post or update a keyed text label
    fn label(&mut self, key: &str, value: &str, color: Color);

    /// Post or update a keyed tile marker
    fn marker(&mut self, key: &str, color: Color, room: RoomId, tile: TileCoord);
}

/// Sink that drops everything
#[derive(Debug, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn label(&mut self, _key: &str, _value: &str, _color: Color) {}
    fn marker(&mut self, _key: &str, _color: Color, _room: RoomId, _tile: TileCoord) {}
}

/// Sink that records everything; used by tests
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    pub labels: Vec<(String, String)>,
    pub markers: Vec<(String, RoomId, TileCoord)>,
}

impl Diagnostics for RecordingDiagnostics {
    fn label(&mut self, key: &str, value: &str, _color: Color) {
        self.labels.push((key.to_string(), value.to_string()));
    }

    fn marker(&mut self, key: &str, _color: Color, room: RoomId, tile: TileCoord) {
        self.markers.push((key.to_string(), room, tile));
    }
}
