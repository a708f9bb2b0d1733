//! Marker configuration and placed marker handles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::LatLng;
use crate::theme::Color;
use crate::traits::{MapSurface, MarkerId};

/// The role a marker plays within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Start,
    End,
    /// The moving position marker.
    Car,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarkerKind::Start => "start",
            MarkerKind::End => "end",
            MarkerKind::Car => "car",
        };
        f.write_str(name)
    }
}

/// Visual content of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "color", rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Map pin, used for start and end markers.
    Pin(Color),
    Car(Color),
}

impl MarkerIcon {
    pub fn color(&self) -> Color {
        match self {
            MarkerIcon::Pin(color) | MarkerIcon::Car(color) => *color,
        }
    }

    /// Inline SVG markup for surfaces that render HTML/SVG content.
    pub fn svg(&self) -> String {
        match self {
            MarkerIcon::Pin(color) => format!(
                r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="36" viewBox="0 0 24 36"><path d="M12 0C5.4 0 0 5.4 0 12c0 9 12 24 12 24s12-15 12-24C24 5.4 18.6 0 12 0z" fill="{color}"/><circle cx="12" cy="12" r="5" fill="#ffffff"/></svg>"##
            ),
            MarkerIcon::Car(color) => format!(
                r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 32 32"><circle cx="16" cy="16" r="15" fill="#ffffff" stroke="{color}" stroke-width="2"/><path d="M8 18l2-6h12l2 6v5h-3v-2H11v2H8z" fill="{color}"/></svg>"##
            ),
        }
    }
}

/// Options for one marker. `icon` overrides the surface's default content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    pub position: LatLng,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<MarkerIcon>,
    #[serde(default)]
    pub z_index: Option<i32>,
}

impl MarkerOptions {
    /// Options for a plain marker at `position`.
    pub fn at(position: LatLng) -> Self {
        Self {
            position,
            title: None,
            icon: None,
            z_index: None,
        }
    }

    /// Sets the hover title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the icon; without one the surface draws its default marker.
    pub fn with_icon(mut self, icon: MarkerIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets the stacking order relative to other markers.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

/// A marker that has been placed on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    kind: MarkerKind,
    options: MarkerOptions,
}

impl Marker {
    /// Places a marker on `surface`.
    pub fn place<S: MapSurface + ?Sized>(surface: &mut S, kind: MarkerKind, options: MarkerOptions) -> Self {
        let id = surface.place(&options, kind);
        Self { id, kind, options }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn position(&self) -> LatLng {
        self.options.position
    }

    pub fn options(&self) -> &MarkerOptions {
        &self.options
    }

    pub fn set_position<S: MapSurface + ?Sized>(&mut self, surface: &mut S, position: LatLng) {
        self.options.position = position;
        surface.set_marker_position(self.id, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(MarkerKind::Start.to_string(), "start");
        assert_eq!(MarkerKind::Car.to_string(), "car");
    }

    #[test]
    fn test_icon_svg_carries_colour() {
        let color = Color::rgb(0xe6, 0x19, 0x4b);
        let pin = MarkerIcon::Pin(color).svg();
        let car = MarkerIcon::Car(color).svg();

        assert!(pin.contains("#e6194b"));
        assert!(car.contains("#e6194b"));
        assert_ne!(pin, car);
    }

    #[test]
    fn test_options_builder() {
        let options = MarkerOptions::at(LatLng::new(1.0, 2.0))
            .with_title("depot")
            .with_icon(MarkerIcon::Pin(Color::rgb(0, 0, 0)))
            .with_z_index(3);

        assert_eq!(options.title.as_deref(), Some("depot"));
        assert_eq!(options.icon, Some(MarkerIcon::Pin(Color::rgb(0, 0, 0))));
        assert_eq!(options.z_index, Some(3));
    }

    #[test]
    fn test_options_from_json() {
        let options: MarkerOptions = serde_json::from_str(
            r##"{"position": {"lat": 37.77, "lng": -122.42}, "icon": {"type": "car", "color": "#3cb44b"}}"##,
        )
        .unwrap();

        assert_eq!(options.position, LatLng::new(37.77, -122.42));
        assert_eq!(options.icon, Some(MarkerIcon::Car(Color::rgb(0x3c, 0xb4, 0x4b))));
        assert_eq!(options.title, None);
    }
}
