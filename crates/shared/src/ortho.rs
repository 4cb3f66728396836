//! Declarative orthographic drawings (top / front / side) shown by the landing animation.
//!
//! Coordinates live in a 100×100 view box with Y pointing down.

use std::time::Duration;

/// Вид ортографической проекции
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Top,
    Front,
    Side,
}

impl ViewKind {
    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Top => "TOP",
            ViewKind::Front => "FRONT",
            ViewKind::Side => "SIDE",
        }
    }
}

/// Примитив чертежа
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrthoShape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        delay_ms: u64,
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        /// Скрытые рёбра рисуются пунктиром
        hidden: bool,
        delay_ms: u64,
    },
}

impl OrthoShape {
    pub fn delay(&self) -> Duration {
        match self {
            OrthoShape::Rect { delay_ms, .. } | OrthoShape::Line { delay_ms, .. } => {
                Duration::from_millis(*delay_ms)
            }
        }
    }

    /// Shape is drawn once the view has been visible for at least its delay
    pub fn is_revealed(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay()
    }
}

/// Описание одного вида
#[derive(Debug, Clone, Copy)]
pub struct OrthoView {
    pub kind: ViewKind,
    pub shapes: &'static [OrthoShape],
}

impl OrthoView {
    pub fn revealed(&self, elapsed: Duration) -> impl Iterator<Item = &'static OrthoShape> {
        self.shapes.iter().filter(move |s| s.is_revealed(elapsed))
    }
}

const TOP_SHAPES: &[OrthoShape] = &[
    OrthoShape::Rect { x: 20.0, y: 20.0, width: 60.0, height: 60.0, delay_ms: 0 },
    OrthoShape::Rect { x: 35.0, y: 35.0, width: 30.0, height: 30.0, delay_ms: 200 },
    OrthoShape::Line { from: [20.0, 20.0], to: [35.0, 35.0], hidden: false, delay_ms: 400 },
    OrthoShape::Line { from: [80.0, 20.0], to: [65.0, 35.0], hidden: false, delay_ms: 450 },
    OrthoShape::Line { from: [80.0, 80.0], to: [65.0, 65.0], hidden: false, delay_ms: 500 },
    OrthoShape::Line { from: [20.0, 80.0], to: [35.0, 65.0], hidden: false, delay_ms: 550 },
];

const FRONT_SHAPES: &[OrthoShape] = &[
    OrthoShape::Rect { x: 20.0, y: 30.0, width: 60.0, height: 50.0, delay_ms: 100 },
    OrthoShape::Line { from: [20.0, 45.0], to: [80.0, 45.0], hidden: false, delay_ms: 300 },
    OrthoShape::Line { from: [35.0, 30.0], to: [35.0, 80.0], hidden: true, delay_ms: 500 },
    OrthoShape::Line { from: [65.0, 30.0], to: [65.0, 80.0], hidden: true, delay_ms: 550 },
];

const SIDE_SHAPES: &[OrthoShape] = &[
    OrthoShape::Rect { x: 30.0, y: 30.0, width: 40.0, height: 50.0, delay_ms: 200 },
    OrthoShape::Line { from: [30.0, 45.0], to: [70.0, 45.0], hidden: false, delay_ms: 400 },
    OrthoShape::Line { from: [42.0, 30.0], to: [42.0, 80.0], hidden: true, delay_ms: 600 },
    OrthoShape::Line { from: [58.0, 30.0], to: [58.0, 80.0], hidden: true, delay_ms: 650 },
];

/// Три фиксированных вида, в порядке отображения
pub const ORTHOGRAPHIC_VIEWS: [OrthoView; 3] = [
    OrthoView { kind: ViewKind::Top, shapes: TOP_SHAPES },
    OrthoView { kind: ViewKind::Front, shapes: FRONT_SHAPES },
    OrthoView { kind: ViewKind::Side, shapes: SIDE_SHAPES },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_inside_view_box() {
        for view in &ORTHOGRAPHIC_VIEWS {
            for shape in view.shapes {
                let points = match *shape {
                    OrthoShape::Rect { x, y, width, height, .. } => {
                        vec![[x, y], [x + width, y + height]]
                    }
                    OrthoShape::Line { from, to, .. } => vec![from, to],
                };
                for [px, py] in points {
                    assert!((0.0..=100.0).contains(&px) && (0.0..=100.0).contains(&py));
                }
            }
        }
    }

    #[test]
    fn test_reveal_by_delay() {
        let front = &ORTHOGRAPHIC_VIEWS[1];
        assert_eq!(front.kind, ViewKind::Front);
        assert_eq!(front.revealed(Duration::ZERO).count(), 0);
        assert_eq!(front.revealed(Duration::from_millis(300)).count(), 2);
        assert_eq!(front.revealed(Duration::from_secs(1)).count(), front.shapes.len());
    }
}
