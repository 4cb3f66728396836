//! Процедурная геометрия: пунктирные рёбра и контур выдавливаемого куба

use glam::Vec3;

/// Длина штриха по умолчанию
pub const DEFAULT_DASH: f32 = 0.12;
/// Промежуток между штрихами по умолчанию
pub const DEFAULT_GAP: f32 = 0.06;

/// Высота выдавливания в начале анимации
pub const MIN_EXTRUSION_HEIGHT: f32 = 0.1;
/// Высота выдавливания при progress = 1
pub const MAX_EXTRUSION_HEIGHT: f32 = 2.0;
/// Верхние рёбра появляются только выше этой высоты
pub const TOP_EDGE_THRESHOLD: f32 = 0.5;
/// Upper bound on dashes per edge; finer patterns produce no segments
pub const MAX_DASH_SEGMENTS: usize = 10_000;

/// Рёбра куба как пары индексов углов из [`cube_corners`]
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0), // bottom
    (4, 5), (5, 6), (6, 7), (7, 4), // top
    (0, 4), (1, 5), (2, 6), (3, 7), // vertical
];

/// Отрезок пунктирной линии
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashedSegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl DashedSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Split the edge `start..end` into dashes of length `dash` separated by `gap`.
///
/// Walks the parametric distance `t` in steps of `(dash + gap) / length` and
/// emits `t..min(t + dash / length, 1)`. Zero-length edges, non-positive
/// periods and patterns needing more than [`MAX_DASH_SEGMENTS`] dashes produce
/// no segments.
pub fn dashed_segments(start: Vec3, end: Vec3, dash: f32, gap: f32) -> Vec<DashedSegment> {
    let total = start.distance(end);
    if total <= f32::EPSILON || dash <= 0.0 || gap < 0.0 || !total.is_finite() {
        return Vec::new();
    }

    let step = (dash + gap) / total;
    let dash_t = dash / total;
    let count = (1.0 / step).ceil();
    if !count.is_finite() || count > MAX_DASH_SEGMENTS as f32 {
        return Vec::new();
    }
    let count = count as usize;

    let mut segments = Vec::with_capacity(count);
    for i in 0..count {
        // index-based to avoid accumulating float error in t
        let t = i as f32 * step;
        if t >= 1.0 {
            break;
        }
        let t_end = (t + dash_t).min(1.0);
        segments.push(DashedSegment {
            start: start.lerp(end, t),
            end: start.lerp(end, t_end),
        });
    }
    segments
}

/// Cubic ease-out: fast start, slow finish
pub fn ease_out_cubic(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Map normalized animation progress to extrusion height
pub fn extrusion_height(progress: f32) -> f32 {
    MIN_EXTRUSION_HEIGHT + ease_out_cubic(progress) * (MAX_EXTRUSION_HEIGHT - MIN_EXTRUSION_HEIGHT)
}

/// Восемь углов параллелепипеда: нижняя грань (0..4), затем верхняя (4..8)
pub fn cube_corners(half_width: f32, bottom: f32, top: f32, half_depth: f32) -> [Vec3; 8] {
    [
        Vec3::new(-half_width, bottom, -half_depth),
        Vec3::new(half_width, bottom, -half_depth),
        Vec3::new(half_width, bottom, half_depth),
        Vec3::new(-half_width, bottom, half_depth),
        Vec3::new(-half_width, top, -half_depth),
        Vec3::new(half_width, top, -half_depth),
        Vec3::new(half_width, top, half_depth),
        Vec3::new(-half_width, top, half_depth),
    ]
}

/// Контур выдавливаемого куба для одного кадра
#[derive(Debug, Clone, Default)]
pub struct CubeOutline {
    pub height: f32,
    /// Основание (сплошные линии)
    pub solid: Vec<DashedSegment>,
    /// Вертикальные и верхние рёбра (пунктир)
    pub dashed: Vec<DashedSegment>,
    /// Позиции маркеров углов
    pub corners: Vec<Vec3>,
}

impl CubeOutline {
    pub fn has_top(&self) -> bool {
        self.height > TOP_EDGE_THRESHOLD
    }
}

/// Build the outline of a square footprint extruded to `height`.
pub fn extrusion_outline(height: f32, footprint: f32, dash: f32, gap: f32) -> CubeOutline {
    let half = footprint * 0.5;
    let corners = cube_corners(half, 0.0, height, half);
    let show_top = height > TOP_EDGE_THRESHOLD;

    let solid = CUBE_EDGES[0..4]
        .iter()
        .map(|&(a, b)| DashedSegment {
            start: corners[a],
            end: corners[b],
        })
        .collect();

    let mut dashed = Vec::new();
    for &(a, b) in &CUBE_EDGES[8..12] {
        dashed.extend(dashed_segments(corners[a], corners[b], dash, gap));
    }
    if show_top {
        for &(a, b) in &CUBE_EDGES[4..8] {
            dashed.extend(dashed_segments(corners[a], corners[b], dash, gap));
        }
    }

    let corner_count = if show_top { 8 } else { 4 };

    CubeOutline {
        height,
        solid,
        dashed,
        corners: corners[..corner_count].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    /// Parametric position of `p` along `start..end`
    fn param(start: Vec3, end: Vec3, p: Vec3) -> f32 {
        let dir = end - start;
        (p - start).dot(dir) / dir.length_squared()
    }

    #[test]
    fn test_zero_length_edge_has_no_segments() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(dashed_segments(p, p, 0.1, 0.05).is_empty());
    }

    #[test]
    fn test_invalid_dash_has_no_segments() {
        assert!(dashed_segments(Vec3::ZERO, Vec3::X, 0.0, 0.1).is_empty());
        assert!(dashed_segments(Vec3::ZERO, Vec3::X, -0.1, 0.1).is_empty());
        assert!(dashed_segments(Vec3::ZERO, Vec3::X, 0.1, -0.2).is_empty());
    }

    #[test]
    fn test_segment_count_and_bounds() {
        let cases = [
            (Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 0.1, 0.05),
            (Vec3::new(-1.0, 0.5, 2.0), Vec3::new(3.0, -2.0, 0.0), 0.3, 0.2),
            (Vec3::ZERO, Vec3::new(0.0, 0.7, 0.0), 0.25, 0.1),
            (Vec3::ONE, Vec3::new(1.0, 1.0, 11.0), 1.0, 0.0),
        ];

        for (start, end, dash, gap) in cases {
            let total = start.distance(end);
            let segments = dashed_segments(start, end, dash, gap);
            let expected = (total / (dash + gap)).floor() as i64;
            let got = segments.len() as i64;
            assert!(
                (got - expected).abs() <= 1,
                "count {got} vs expected {expected} for {start:?}->{end:?}"
            );

            let mut last_t = -1.0;
            for seg in &segments {
                assert!(seg.length() <= dash + EPS, "segment longer than dash");
                let t0 = param(start, end, seg.start);
                let t1 = param(start, end, seg.end);
                assert!(t0 >= -EPS && t1 <= 1.0 + EPS, "segment outside the edge");
                assert!(t0 > last_t, "segments not monotonic");
                last_t = t0;
            }
        }
    }

    #[test]
    fn test_last_segment_clamped_to_endpoint() {
        let end = Vec3::new(1.0, 0.0, 0.0);
        let segments = dashed_segments(Vec3::ZERO, end, 0.3, 0.1);
        // t = 0, 0.4, 0.8 -> last dash would end at 1.1 without the clamp
        assert_eq!(segments.len(), 3);
        assert!((segments[2].end - end).length() < EPS);
    }

    #[test]
    fn test_too_fine_pattern_has_no_segments() {
        assert!(dashed_segments(Vec3::ZERO, Vec3::X, 1e-30, 0.0).is_empty());
        assert!(dashed_segments(Vec3::ZERO, Vec3::X, f32::NAN, 0.1).is_empty());
        assert!(dashed_segments(Vec3::ZERO, Vec3::X * 1000.0, 0.01, 0.0).is_empty());

        let near_limit = dashed_segments(Vec3::ZERO, Vec3::X, 2.0 / MAX_DASH_SEGMENTS as f32, 0.0);
        assert!(!near_limit.is_empty());
        assert!(near_limit.len() <= MAX_DASH_SEGMENTS);
    }

    #[test]
    fn test_extrusion_height_range() {
        assert_eq!(extrusion_height(0.0), MIN_EXTRUSION_HEIGHT);
        assert_eq!(extrusion_height(1.0), 2.0);
        assert_eq!(extrusion_height(5.0), 2.0);
        assert_eq!(extrusion_height(-1.0), MIN_EXTRUSION_HEIGHT);
    }

    #[test]
    fn test_extrusion_height_monotonic() {
        let mut prev = extrusion_height(0.0);
        for i in 1..=100 {
            let h = extrusion_height(i as f32 / 100.0);
            assert!(h >= prev);
            prev = h;
        }
    }

    #[test]
    fn test_ease_out_is_fast_start() {
        // halfway through the animation the cube is already most of the way up
        assert!(ease_out_cubic(0.5) > 0.8);
    }

    #[test]
    fn test_outline_top_threshold() {
        let low = extrusion_outline(0.4, 2.0, DEFAULT_DASH, DEFAULT_GAP);
        assert!(!low.has_top());
        assert_eq!(low.corners.len(), 4);
        assert_eq!(low.solid.len(), 4);

        let high = extrusion_outline(1.5, 2.0, DEFAULT_DASH, DEFAULT_GAP);
        assert!(high.has_top());
        assert_eq!(high.corners.len(), 8);
        assert!(high.dashed.len() > low.dashed.len());
        assert!(high.dashed.iter().all(|s| s.start.y <= 1.5 + EPS && s.end.y <= 1.5 + EPS));
    }
}
