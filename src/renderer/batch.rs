//! Per-frame triangle batch
//!
//! Draw calls are tessellated in field space and collected here; the pipeline
//! maps them to clip space when the frame is submitted.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use crate::color::Color;
use crate::sim::Rect;

/// Segments used for the avatar circle
const CIRCLE_SEGMENTS: u32 = 24;

#[derive(Debug, Default)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn push_rect(&mut self, rect: &Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.vertices
            .extend_from_slice(&shapes::rect(rect, color.to_rgba_f32()));
    }

    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices.extend(shapes::circle(
            center,
            radius,
            color.to_rgba_f32(),
            CIRCLE_SEGMENTS,
        ));
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Map a field-space point to normalized device coordinates, letterboxing
/// the field inside the viewport while preserving its aspect ratio.
pub fn field_to_ndc(field: Vec2, viewport: (u32, u32), p: Vec2) -> Vec2 {
    let (w, h) = viewport;
    let view_aspect = w.max(1) as f32 / h.max(1) as f32;
    let field_aspect = field.x / field.y;

    let (sx, sy) = if view_aspect > field_aspect {
        // Wider than the field: bars left and right
        (field_aspect / view_aspect, 1.0)
    } else {
        (1.0, view_aspect / field_aspect)
    };

    Vec2::new(
        (p.x / field.x * 2.0 - 1.0) * sx,
        (1.0 - p.y / field.y * 2.0) * sy,
    )
}

/// Vertex slots to allocate for `count` vertices: powers of two, at least a
/// screenful of obstacles, so the GPU buffer is rarely reallocated
pub fn buffer_capacity(count: usize) -> usize {
    count.max(1024).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Vec2 = Vec2::new(400.0, 600.0);

    #[test]
    fn test_batch_collects_shapes() {
        let mut batch = VertexBatch::default();
        batch.push_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), Color::rgb(0, 0, 0));
        assert_eq!(batch.vertices().len(), 6);
        batch.push_circle(Vec2::new(5.0, 5.0), 3.0, Color::rgb(255, 255, 0));
        assert_eq!(batch.vertices().len(), 6 + CIRCLE_SEGMENTS as usize * 3);
        batch.clear();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_empty_rect_skipped() {
        let mut batch = VertexBatch::default();
        batch.push_rect(&Rect::new(0.0, 0.0, 60.0, 0.0), Color::rgb(0, 0, 0));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_ndc_matching_aspect() {
        let vp = (400, 600);
        assert_eq!(field_to_ndc(FIELD, vp, Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(field_to_ndc(FIELD, vp, FIELD), Vec2::new(1.0, -1.0));
        assert_eq!(field_to_ndc(FIELD, vp, FIELD / 2.0), Vec2::ZERO);
    }

    #[test]
    fn test_ndc_letterbox_wide_viewport() {
        // 1200x600 is twice as wide as needed for a 2:3 field scaled to height
        let p = field_to_ndc(FIELD, (1200, 600), FIELD);
        assert!((p.x - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(p.y, -1.0);
    }

    #[test]
    fn test_ndc_letterbox_tall_viewport() {
        let p = field_to_ndc(FIELD, (400, 1200), Vec2::ZERO);
        assert_eq!(p.x, -1.0);
        assert!((p.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_buffer_capacity() {
        assert_eq!(buffer_capacity(0), 1024);
        assert_eq!(buffer_capacity(1024), 1024);
        assert_eq!(buffer_capacity(1025), 2048);
        assert!(buffer_capacity(5000) >= 5000);
    }
}
