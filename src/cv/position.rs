use opencv::core::Rect;

/// Offset of a face center from the frame center, normalized to [-1, 1] on
/// each axis, plus the raw bounding-box area in pixels.
///
/// The default value is the all-zero sentinel used when no face was
/// detected; it is not a real centered, zero-area detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RelativePosition {
    pub x: f64,
    pub y: f64,
    pub area: f64,
}

impl RelativePosition {
    /// Derives the position of `face` within a frame of the given dimensions.
    ///
    /// Centers and half-extents use integer division before the final
    /// floating-point normalization. Values are not clamped: a box hanging
    /// past a frame edge can push an offset slightly outside [-1, 1].
    pub fn of(face: Rect, frame_width: i32, frame_height: i32) -> Self {
        let cx = face.x + face.width / 2;
        let cy = face.y + face.height / 2;
        let half_w = frame_width / 2;
        let half_h = frame_height / 2;
        Self {
            x: (cx - half_w) as f64 / half_w as f64,
            y: (cy - half_h) as f64 / half_h as f64,
            area: (face.width * face.height) as f64,
        }
    }
}

/// Picks the rectangle with the largest area. Ties go to the earliest
/// rectangle in detector enumeration order.
pub fn largest_face(faces: &[Rect]) -> Option<Rect> {
    let mut best: Option<Rect> = None;
    for &face in faces {
        let area = face.width * face.height;
        if best.is_none_or(|b| area > b.width * b.height) {
            best = Some(face);
        }
    }
    best
}
