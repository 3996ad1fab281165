//! [`Surface`] implementation on top of an egui [`Painter`].

use super::surface::{HAlign, RectMode, Style, StyleStack, Surface, VAlign};
use eframe::egui::{
    Align, Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2,
};

/// Draws surface primitives into an egui painter.
pub struct PainterSurface<'p> {
    painter: &'p Painter,
    font_id: FontId,
    styles: StyleStack,
}

impl<'p> PainterSurface<'p> {
    pub fn new(painter: &'p Painter) -> Self {
        Self {
            painter,
            font_id: FontId::proportional(12.0),
            styles: StyleStack::new(Style::default()),
        }
    }

    pub fn with_font(mut self, font_id: FontId) -> Self {
        self.font_id = font_id;
        self
    }

    fn current_stroke(&self) -> Stroke {
        let style = self.style();
        match style.stroke {
            Some(color) => Stroke::new(style.stroke_weight, color),
            None => Stroke::NONE,
        }
    }
}

fn align2(horizontal: HAlign, vertical: VAlign) -> Align2 {
    let h = match horizontal {
        HAlign::Left => Align::Min,
        HAlign::Center => Align::Center,
        HAlign::Right => Align::Max,
    };
    // egui has no baseline anchor; bottom is the closest match
    let v = match vertical {
        VAlign::Top => Align::Min,
        VAlign::Center => Align::Center,
        VAlign::Baseline | VAlign::Bottom => Align::Max,
    };
    Align2([h, v])
}

impl Surface for PainterSurface<'_> {
    fn styles(&self) -> &StyleStack {
        &self.styles
    }

    fn styles_mut(&mut self) -> &mut StyleStack {
        &mut self.styles
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let stroke = self.current_stroke();
        if stroke.is_empty() {
            return;
        }
        self.painter
            .line_segment([Pos2::new(x1, y1), Pos2::new(x2, y2)], stroke);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, corner_radius: f32) {
        let size = Vec2::new(w, h);
        let rect = match self.style().rect_mode {
            RectMode::Corner => Rect::from_min_size(Pos2::new(x, y), size),
            RectMode::Center => Rect::from_center_size(Pos2::new(x, y), size),
        };
        let fill = self.style().fill.unwrap_or(Color32::TRANSPARENT);
        let stroke = self.current_stroke();
        self.painter
            .rect(rect, corner_radius, fill, stroke, StrokeKind::Inside);
    }

    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let center = Pos2::new(x, y);
        let radius = Vec2::new(w / 2.0, h / 2.0);
        if let Some(fill) = self.style().fill {
            self.painter.add(Shape::ellipse_filled(center, radius, fill));
        }
        let stroke = self.current_stroke();
        if !stroke.is_empty() {
            self.painter.add(Shape::ellipse_stroke(center, radius, stroke));
        }
    }

    fn text_width(&self, text: &str) -> f32 {
        self.painter
            .layout_no_wrap(text.to_string(), self.font_id.clone(), Color32::BLACK)
            .size()
            .x
    }

    fn text(&mut self, text: &str, x: f32, y: f32) {
        let style = self.style();
        let (horizontal, vertical) = style.text_align;
        let color = style.fill.unwrap_or(Color32::BLACK);
        self.painter.text(
            Pos2::new(x, y),
            align2(horizontal, vertical),
            text,
            self.font_id.clone(),
            color,
        );
    }
}
