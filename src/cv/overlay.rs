use opencv::core::{Mat, Point, Rect, Scalar};
use opencv::imgproc;

use super::position::RelativePosition;

/// Outlines the selected face on the color frame in blue.
pub fn draw_face_box(frame: &mut Mat, face: Rect) -> opencv::Result<()> {
    imgproc::rectangle(
        frame,
        face,
        Scalar::new(255., 0., 0., 0.),
        2,
        imgproc::LINE_8,
        0,
    )
}

/// Writes the normalized offsets at a fixed screen position, two decimals.
pub fn draw_position_label(frame: &mut Mat, position: &RelativePosition) -> opencv::Result<()> {
    let label = format!("Rel Pos: ({:.2}, {:.2})", position.x, position.y);
    imgproc::put_text(
        frame,
        &label,
        Point::new(10, 30),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.7,
        Scalar::new(0., 255., 0., 0.),
        2,
        imgproc::LINE_8,
        false,
    )
}
