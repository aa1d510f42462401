//! Active touch contacts

use std::collections::TryReserveError;

use tracing::trace;

/// Capacity of the touch list
pub const MAX_TOUCHES: usize = 16;

/// Coordinate value meaning "unset / not pressed"
pub const NO_TOUCH: i16 = -0x8000;

/// Which transformed coordinates a pointer query reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSpace {
    /// Relative to the active render viewport
    Viewport,
    /// Relative to the whole display surface
    Full,
}

/// One active contact
///
/// `fixed_*` and `full_*` are only meaningful after the frame's poll has
/// normalized this point. Until then they hold [`NO_TOUCH`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Platform contact id, used by the event source to track the point
    pub contact: u64,
    /// Raw position as delivered by the event source
    pub screen_x: f32,
    pub screen_y: f32,
    /// Raw position after display scaling, as fed to the viewport transform
    pub native_x: f32,
    pub native_y: f32,
    pub fixed_x: i16,
    pub fixed_y: i16,
    pub full_x: i16,
    pub full_y: i16,
}

impl TouchPoint {
    /// Creates a contact at a raw screen position with unset transformed coordinates
    pub fn new(contact: u64, screen_x: f32, screen_y: f32) -> Self {
        Self {
            contact,
            screen_x,
            screen_y,
            native_x: screen_x,
            native_y: screen_y,
            fixed_x: NO_TOUCH,
            fixed_y: NO_TOUCH,
            full_x: NO_TOUCH,
            full_y: NO_TOUCH,
        }
    }

    /// Transformed coordinates in the requested space
    pub fn coords(&self, space: PointerSpace) -> (i16, i16) {
        match space {
            PointerSpace::Viewport => (self.fixed_x, self.fixed_y),
            PointerSpace::Full => (self.full_x, self.full_y),
        }
    }

    /// True unless either coordinate in `space` is [`NO_TOUCH`]
    pub fn is_pressed(&self, space: PointerSpace) -> bool {
        let (x, y) = self.coords(space);
        x != NO_TOUCH && y != NO_TOUCH
    }
}

/// Ordered, bounded list of contacts. The index of a point is its identity for the frame.
#[derive(Debug, Clone)]
pub struct TouchList {
    points: Vec<TouchPoint>,
}

impl TouchList {
    /// Reserves room for [`MAX_TOUCHES`] contacts
    pub fn try_new() -> Result<Self, TryReserveError> {
        let mut points = Vec::new();
        points.try_reserve_exact(MAX_TOUCHES)?;
        Ok(Self { points })
    }

    /// Appends a contact. Returns false and drops it when the list is full.
    pub fn push(&mut self, point: TouchPoint) -> bool {
        if self.points.len() >= MAX_TOUCHES {
            trace!(contact = point.contact, "touch list full, dropping contact");
            return false;
        }
        self.points.push(point);
        true
    }

    /// Moves a tracked contact to a new raw position
    pub fn update(&mut self, contact: u64, screen_x: f32, screen_y: f32) -> bool {
        match self.points.iter_mut().find(|p| p.contact == contact) {
            Some(point) => {
                point.screen_x = screen_x;
                point.screen_y = screen_y;
                true
            }
            None => false,
        }
    }

    /// Removes a contact, keeping the remaining points in order
    pub fn remove(&mut self, contact: u64) -> bool {
        match self.points.iter().position(|p| p.contact == contact) {
            Some(index) => {
                self.points.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&TouchPoint> {
        self.points.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TouchPoint> {
        self.points.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TouchPoint> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TouchPoint> {
        self.points.iter_mut()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_point_is_not_pressed() {
        let point = TouchPoint::new(1, 10.0, 20.0);
        assert!(!point.is_pressed(PointerSpace::Viewport));
        assert!(!point.is_pressed(PointerSpace::Full));
    }

    #[test]
    fn test_pressed_requires_both_coordinates() {
        let mut point = TouchPoint::new(1, 0.0, 0.0);
        point.fixed_x = 0;
        assert!(!point.is_pressed(PointerSpace::Viewport));
        point.fixed_y = -12;
        assert!(point.is_pressed(PointerSpace::Viewport));
        // Full space still unset
        assert!(!point.is_pressed(PointerSpace::Full));
    }

    #[test]
    fn test_overflow_is_ignored() {
        let mut list = TouchList::try_new().unwrap();
        for contact in 0..MAX_TOUCHES as u64 {
            assert!(list.push(TouchPoint::new(contact, 0.0, 0.0)));
        }
        assert!(!list.push(TouchPoint::new(99, 0.0, 0.0)));
        assert_eq!(list.len(), MAX_TOUCHES);
        assert!(list.iter().all(|p| p.contact != 99));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut list = TouchList::try_new().unwrap();
        list.push(TouchPoint::new(7, 0.0, 0.0));
        list.push(TouchPoint::new(8, 0.0, 0.0));
        list.push(TouchPoint::new(9, 0.0, 0.0));

        assert!(list.remove(8));
        assert!(!list.remove(8));
        let contacts: Vec<u64> = list.iter().map(|p| p.contact).collect();
        assert_eq!(contacts, vec![7, 9]);
    }

    #[test]
    fn test_update_moves_contact() {
        let mut list = TouchList::try_new().unwrap();
        list.push(TouchPoint::new(3, 1.0, 1.0));
        assert!(list.update(3, 5.0, 6.0));
        assert!(!list.update(4, 5.0, 6.0));
        let point = list.get(0).unwrap();
        assert_eq!((point.screen_x, point.screen_y), (5.0, 6.0));
    }
}
