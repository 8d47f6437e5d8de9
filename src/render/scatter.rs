//! Software 3D scatter plot
//!
//! Points are projected orthographically from a fixed camera, the same view a
//! 3D scatter plot uses by default (30° elevation, -60° azimuth). The
//! `[-lim, lim]` viewport cube is drawn as a wireframe so the axis range is
//! visible and constant across frames.
//!
//! ## Screen mapping
//!
//! The cube's projection never exceeds `lim·√3` from the centre, so that
//! distance is mapped to the shorter canvas half-side minus a margin.

use image::{Rgba, RgbaImage};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::traits::{FrameContext, RenderError, Renderer};
use crate::shapes::Point;

/// Display settings for the scatter renderer
///
/// Colours are stored as u8 triples so the settings file stays plain JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Canvas size in pixels
    pub width: u32,
    pub height: u32,

    /// Dot radius in pixels
    pub point_radius: f32,

    pub point_color: [u8; 3],
    pub background: [u8; 3],
    pub box_color: [u8; 3],

    /// Camera elevation above the xy plane, degrees
    pub elevation: f64,
    /// Camera angle around the z axis, degrees
    pub azimuth: f64,

    /// Darken points further from the camera
    pub depth_shade: bool,
    /// Draw the viewport cube
    pub show_box: bool,

    /// Fraction of the canvas left empty around the cube
    pub margin: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 480,
            height: 480,
            point_radius: 2.0,
            point_color: [31, 119, 180],
            background: [255, 255, 255],
            box_color: [190, 190, 190],
            elevation: 30.0,
            azimuth: -60.0,
            depth_shade: true,
            show_box: true,
            margin: 0.08,
        }
    }
}

/// Camera basis and screen mapping for one frame
struct View {
    right: Vector3<f64>,
    up: Vector3<f64>,
    toward: Vector3<f64>,
    scale: f64,
    cx: f64,
    cy: f64,
}

impl View {
    fn new(settings: &RenderSettings, lim: f64) -> Self {
        let (se, ce) = settings.elevation.to_radians().sin_cos();
        let (sa, ca) = settings.azimuth.to_radians().sin_cos();

        let half = settings.width.min(settings.height) as f64 / 2.0;
        let reach = lim * 3.0_f64.sqrt();

        Self {
            right: Vector3::new(-sa, ca, 0.0),
            up: Vector3::new(-se * ca, -se * sa, ce),
            toward: Vector3::new(ce * ca, ce * sa, se),
            scale: half * (1.0 - settings.margin.clamp(0.0, 0.9)) / reach,
            cx: settings.width as f64 / 2.0,
            cy: settings.height as f64 / 2.0,
        }
    }

    /// Screen position and depth (larger is nearer the camera)
    fn project(&self, p: &Point) -> (f64, f64, f64) {
        let v = p.coords;
        (
            self.cx + v.dot(&self.right) * self.scale,
            self.cy - v.dot(&self.up) * self.scale,
            v.dot(&self.toward),
        )
    }
}

/// Scatter renderer producing RGBA stills
#[derive(Clone, Debug, Default)]
pub struct ScatterRenderer {
    pub settings: RenderSettings,
}

impl ScatterRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Blend the point colour towards the background for far points
    fn shade(&self, depth: f64, lim: f64) -> Rgba<u8> {
        let [r, g, b] = self.settings.point_color;
        if !self.settings.depth_shade {
            return Rgba([r, g, b, 255]);
        }

        let reach = lim * 3.0_f64.sqrt();
        let nearness = ((depth + reach) / (2.0 * reach)).clamp(0.0, 1.0);
        let strength = 0.35 + 0.65 * nearness;

        let [br, bg, bb] = self.settings.background;
        let mix = |fg: u8, bg: u8| -> u8 {
            (bg as f64 + (fg as f64 - bg as f64) * strength).round() as u8
        };
        Rgba([mix(r, br), mix(g, bg), mix(b, bb), 255])
    }

    fn draw_box(&self, canvas: &mut RgbaImage, view: &View, lim: f64) {
        let [r, g, b] = self.settings.box_color;
        let color = Rgba([r, g, b, 255]);

        let corner = |i: usize| {
            let pick = |bit: usize| if i & bit != 0 { lim } else { -lim };
            Point::new(pick(1), pick(2), pick(4))
        };

        // Edges join corners that differ in exactly one coordinate
        for i in 0..8 {
            for bit in [1, 2, 4] {
                if i & bit == 0 {
                    let (x0, y0, _) = view.project(&corner(i));
                    let (x1, y1, _) = view.project(&corner(i | bit));
                    draw_line(canvas, (x0, y0), (x1, y1), color);
                }
            }
        }
    }
}

impl Renderer for ScatterRenderer {
    fn render(&self, points: &[Point], ctx: &FrameContext) -> Result<RgbaImage, RenderError> {
        let (width, height) = (self.settings.width, self.settings.height);
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }
        if !(ctx.lim.is_finite() && ctx.lim > 0.0) {
            return Err(RenderError::InvalidExtent(ctx.lim));
        }

        let [r, g, b] = self.settings.background;
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
        let view = View::new(&self.settings, ctx.lim);

        if self.settings.show_box {
            self.draw_box(&mut canvas, &view, ctx.lim);
        }

        // Painter's order: far points first so near ones overdraw them
        let mut projected: Vec<(f64, f64, f64)> = points.iter().map(|p| view.project(p)).collect();
        projected.sort_by(|a, b| a.2.total_cmp(&b.2));

        let radius = self.settings.point_radius.max(0.5) as f64;
        for (x, y, depth) in projected {
            draw_disc(&mut canvas, x, y, radius, self.shade(depth, ctx.lim));
        }

        log::trace!(
            "Rendered frame {}/{} ({} points)",
            ctx.index,
            ctx.total,
            points.len()
        );
        Ok(canvas)
    }
}

fn put(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_line(canvas: &mut RgbaImage, from: (f64, f64), to: (f64, f64), color: Rgba<u8>) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (from.0 + dx * t).round() as i64;
        let y = (from.1 + dy * t).round() as i64;
        put(canvas, x, y, color);
    }
}

fn draw_disc(canvas: &mut RgbaImage, cx: f64, cy: f64, radius: f64, color: Rgba<u8>) {
    let r2 = radius * radius;
    let (x0, x1) = ((cx - radius).floor() as i64, (cx + radius).ceil() as i64);
    let (y0, y1) = ((cy - radius).floor() as i64, (cy + radius).ceil() as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let (ddx, ddy) = (x as f64 - cx, y as f64 - cy);
            if ddx * ddx + ddy * ddy <= r2 {
                put(canvas, x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Rotation;

    fn ctx(lim: f64) -> FrameContext {
        FrameContext {
            index: 1,
            total: 1,
            lim,
            rotation: Rotation::identity(),
        }
    }

    fn plain_settings() -> RenderSettings {
        RenderSettings {
            width: 64,
            height: 48,
            show_box: false,
            depth_shade: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_canvas_size_and_background() {
        let renderer = ScatterRenderer::new(plain_settings());
        let still = renderer.render(&[], &ctx(1.0)).unwrap();

        assert_eq!(still.dimensions(), (64, 48));
        assert!(still.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_origin_lands_in_centre() {
        let renderer = ScatterRenderer::new(plain_settings());
        let still = renderer.render(&[Point::origin()], &ctx(1.0)).unwrap();

        assert_eq!(*still.get_pixel(32, 24), Rgba([31, 119, 180, 255]));
        assert_eq!(*still.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_viewport_corners_stay_on_canvas() {
        let settings = RenderSettings {
            width: 100,
            height: 100,
            ..Default::default()
        };
        let view = View::new(&settings, 2.0);
        for x in [-2.0, 2.0] {
            for y in [-2.0, 2.0] {
                for z in [-2.0, 2.0] {
                    let (sx, sy, _) = view.project(&Point::new(x, y, z));
                    assert!((0.0..100.0).contains(&sx));
                    assert!((0.0..100.0).contains(&sy));
                }
            }
        }
    }

    #[test]
    fn test_box_is_drawn() {
        let settings = RenderSettings {
            show_box: true,
            ..plain_settings()
        };
        let renderer = ScatterRenderer::new(settings);
        let still = renderer.render(&[], &ctx(1.0)).unwrap();
        assert!(still.pixels().any(|p| *p == Rgba([190, 190, 190, 255])));
    }

    #[test]
    fn test_depth_shading_fades_far_points() {
        let renderer = ScatterRenderer::new(RenderSettings::default());
        let near = renderer.shade(1.0, 1.0);
        let far = renderer.shade(-1.0, 1.0);
        // Far points sit closer to the white background
        assert!(far.0[0] > near.0[0]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let renderer = ScatterRenderer::new(RenderSettings {
            width: 0,
            ..Default::default()
        });
        assert_eq!(
            renderer.render(&[], &ctx(1.0)),
            Err(RenderError::EmptyCanvas { width: 0, height: 480 })
        );

        let renderer = ScatterRenderer::default();
        assert_eq!(
            renderer.render(&[], &ctx(0.0)),
            Err(RenderError::InvalidExtent(0.0))
        );
    }
}
