//! "Photos near this one" browsing
//!
//! A [`ProximityNavigator`] is created for one anchor photo and keeps the
//! photos within a radius of that anchor. Stepping moves the viewed photo
//! through that list; it never re-centres on the viewed photo. A new anchor
//! means a new navigator.

use dronemap_geo::{distances_from, Coordinate};

use crate::photo::PhotoRecord;

/// Photos within `radius_meters` of `anchor` (inclusive), in collection order.
///
/// An anchor without a position yields an empty list, as do photos without a
/// position or timestamp.
///
/// # Panics
///
/// Panics if `radius_meters` is negative or NaN.
pub fn find_nearby<'a>(
    anchor: &PhotoRecord,
    photos: &'a [PhotoRecord],
    radius_meters: f64,
) -> Vec<&'a PhotoRecord> {
    assert!(
        radius_meters >= 0.0,
        "radius_meters must be a non-negative number, got {radius_meters}"
    );
    let Some(center) = anchor.position() else {
        return Vec::new();
    };

    let (candidates, positions): (Vec<&PhotoRecord>, Vec<Coordinate>) = photos
        .iter()
        .filter_map(|photo| photo.fix().map(|(position, _)| (photo, position)))
        .unzip();

    candidates
        .into_iter()
        .zip(distances_from(&center, &positions))
        .filter(|(_, km)| km * 1000.0 <= radius_meters)
        .map(|(photo, _)| photo)
        .collect()
}

/// Browsing session centred on one anchor photo
#[derive(Debug, Clone)]
pub struct ProximityNavigator<'a> {
    anchor: &'a PhotoRecord,
    radius_meters: f64,
    nearby: Vec<&'a PhotoRecord>,
    current: Option<usize>,
}

impl<'a> ProximityNavigator<'a> {
    /// Start a session viewing the anchor itself.
    ///
    /// # Panics
    ///
    /// Panics if `radius_meters` is negative or NaN.
    pub fn new(anchor: &'a PhotoRecord, photos: &'a [PhotoRecord], radius_meters: f64) -> Self {
        let nearby = find_nearby(anchor, photos, radius_meters);
        let current = position_of(&nearby, &anchor.id);
        Self {
            anchor,
            radius_meters,
            nearby,
            current,
        }
    }

    /// Recompute the nearby set from scratch; the view returns to the anchor.
    ///
    /// # Panics
    ///
    /// Panics if `radius_meters` is negative or NaN.
    pub fn rescan(&mut self, photos: &'a [PhotoRecord], radius_meters: f64) {
        *self = Self::new(self.anchor, photos, radius_meters);
    }

    /// The photo this session is centred on
    pub fn anchor(&self) -> &'a PhotoRecord {
        self.anchor
    }

    /// Radius used for the current nearby set
    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Photos within the radius of the anchor, in collection order
    pub fn nearby(&self) -> &[&'a PhotoRecord] {
        &self.nearby
    }

    /// Index of the viewed photo in [`Self::nearby`], if it is in the set
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The viewed photo, if it is in the nearby set
    pub fn current(&self) -> Option<&'a PhotoRecord> {
        self.current.map(|i| self.nearby[i])
    }

    /// View the photo with `id`. Returns false and leaves the view unchanged
    /// if no nearby photo has that id.
    pub fn select(&mut self, id: &str) -> bool {
        match position_of(&self.nearby, id) {
            Some(index) => {
                self.current = Some(index);
                true
            }
            None => false,
        }
    }

    /// True unless the viewed photo is the last one
    pub fn has_next(&self) -> bool {
        match self.current {
            Some(i) => i + 1 < self.nearby.len(),
            None => !self.nearby.is_empty(),
        }
    }

    /// True unless the viewed photo is the first one or outside the set
    pub fn has_previous(&self) -> bool {
        matches!(self.current, Some(i) if i > 0)
    }

    /// Step forward. At the last photo this does nothing.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a PhotoRecord> {
        if self.has_next() {
            self.current = Some(self.current.map_or(0, |i| i + 1));
        }
        self.current()
    }

    /// Step backward. At the first photo this does nothing.
    pub fn previous(&mut self) -> Option<&'a PhotoRecord> {
        if self.has_previous() {
            self.current = self.current.map(|i| i - 1);
        }
        self.current()
    }
}

fn position_of(nearby: &[&PhotoRecord], id: &str) -> Option<usize> {
    nearby.iter().position(|p| p.id == id)
}
