use dreamspace::util::stable_unit;
use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

pub(super) const NODE_WORLD_RADIUS: f64 = 5.0;

const PERSON_COLOR: Color32 = Color32::from_rgb(255, 80, 80);
const DEFAULT_COLOR: Color32 = Color32::from_rgb(0, 164, 255);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn type_color(node_type: &str) -> Color32 {
    if node_type == "person" {
        return PERSON_COLOR;
    }
    if node_type.is_empty() {
        return DEFAULT_COLOR;
    }
    let shift = stable_unit(node_type) * 0.35;
    blend_color(DEFAULT_COLOR, Color32::from_rgb(120, 90, 255), shift)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::BLACK);

    // faint crosshair on the viewer axis
    let center = rect.center();
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 50));
    painter.line_segment(
        [Pos2::new(center.x - 8.0, center.y), Pos2::new(center.x + 8.0, center.y)],
        stroke,
    );
    painter.line_segment(
        [Pos2::new(center.x, center.y - 8.0), Pos2::new(center.x, center.y + 8.0)],
        stroke,
    );
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn screen_radius(scale: f64, depth: f64, focal_length: f64) -> f32 {
    (NODE_WORLD_RADIUS * scale * focal_length / depth).clamp(1.5, 600.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn people_are_red() {
        assert_eq!(type_color("person"), PERSON_COLOR);
        assert_eq!(type_color(""), DEFAULT_COLOR);
    }

    #[test]
    fn radius_shrinks_with_depth() {
        assert!(screen_radius(1.0, 100.0, 600.0) > screen_radius(1.0, 1000.0, 600.0));
        assert_eq!(screen_radius(1.0, 1.0e9, 600.0), 1.5);
    }

    #[test]
    fn offscreen_circle_is_hidden() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0));
        assert!(circle_visible(rect, Pos2::new(105.0, 50.0), 10.0));
        assert!(!circle_visible(rect, Pos2::new(130.0, 50.0), 10.0));
    }
}
