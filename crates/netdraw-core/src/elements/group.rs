//! Spatial groups ("rooms").

use super::{GroupId, Spatial};
use kurbo::{Point, Rect, Size};

/// A rectangle overlay that visually clusters devices.
///
/// Groups own nothing: membership is visual overlap only.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Top-left corner position.
    pub position: Point,
    pub size: Size,
}

impl Group {
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            size,
        }
    }

    /// Square resize handle centred on the bottom-right corner.
    pub fn resize_handle(&self, handle_size: f64) -> Rect {
        let corner = Point::new(self.position.x + self.size.width, self.position.y + self.size.height);
        let half = handle_size / 2.0;
        Rect::new(corner.x - half, corner.y - half, corner.x + half, corner.y + half)
    }

    /// Whether a rectangle lies entirely inside this group.
    pub fn encloses(&self, rect: Rect) -> bool {
        let bounds = self.bounds();
        rect.x0 >= bounds.x0 && rect.y0 >= bounds.y0 && rect.x1 <= bounds.x1 && rect.y1 <= bounds.y1
    }
}

impl Spatial for Group {
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_handle() {
        let group = Group::new("g1", "Room A", Point::new(0.0, 0.0), Size::new(200.0, 100.0));
        let handle = group.resize_handle(12.0);
        assert!(handle.contains(Point::new(200.0, 100.0)));
        assert!(handle.contains(Point::new(195.0, 95.0)));
        assert!(!handle.contains(Point::new(180.0, 100.0)));
    }

    #[test]
    fn test_encloses() {
        let group = Group::new("g1", "Room A", Point::new(0.0, 0.0), Size::new(200.0, 100.0));
        assert!(group.encloses(Rect::new(10.0, 10.0, 50.0, 50.0)));
        assert!(!group.encloses(Rect::new(180.0, 10.0, 250.0, 50.0)));
    }
}
