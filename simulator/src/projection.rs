//! Flattening 3-D positions onto the console grid.
//!
//! Plane convention: the first named axis runs along the screen columns,
//! the second up the screen rows. So `XY` is (x, y), `YZ` is (y, z) and `XZ` is (x, z).

use crate::bodies::Vec3;
use crate::error::{Result, SimulationError};
use crate::time::DAY;

use euclid::default::Point2D;
use serde::Deserialize;

/// Grid columns when nothing else is asked for.
pub const DEFAULT_COLUMNS: u32 = 17;
/// Grid rows when nothing else is asked for.
pub const DEFAULT_ROWS: u32 = 21;
/// Metres from the middle of the grid to its edge at zoom 1.
pub const DEFAULT_RENDER_SIZE: f64 = 4.0e8;

/// Which pair of world axes ends up on the screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    XY,
    YZ,
    XZ,
}

impl Plane {
    /// (column, row) components of `v` for this plane.
    pub fn split(self, v: Vec3) -> (f64, f64) {
        match self {
            Plane::XY => (v.x, v.y),
            Plane::YZ => (v.y, v.z),
            Plane::XZ => (v.x, v.z),
        }
    }
}

impl std::str::FromStr for Plane {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(Plane::XY),
            "yz" => Ok(Plane::YZ),
            "xz" => Ok(Plane::XZ),
            other => Err(format!("unknown plane {:?}, expected xy, yz or xz", other)),
        }
    }
}

/// Map `position` to a grid cell.
///
/// `half_width` and `half_height` are the number of cells from the middle of the grid
/// to its edge; the world origin always lands on `(half_width, half_height)`.
/// The row counts upward. Cells outside the grid are returned as-is for the caller to clip.
pub fn project(
    position: Vec3,
    plane: Plane,
    zoom: f64,
    half_width: u32,
    half_height: u32,
    render_size: f64,
) -> Point2D<i64> {
    let (h, v) = plane.split(position);
    Point2D::new(
        to_cell(h, zoom, half_width, render_size),
        to_cell(v, zoom, half_height, render_size),
    )
}

fn to_cell(coord: f64, zoom: f64, half: u32, render_size: f64) -> i64 {
    let half = f64::from(half);
    let pixel_size = (render_size / half) / zoom;
    (coord / pixel_size + half).floor() as i64
}

/// Rough direction of travel, for drawing trails.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slope {
    SteepUp,
    ModerateUp,
    Flat,
    ModerateDown,
    SteepDown,
}

impl Slope {
    /// Stand-in denominator when the real one is zero.
    pub const EPSILON: f64 = 1e-6;

    /// Bucket `v / (h + 1)`, where (h, v) are the velocity's screen components.
    pub fn classify(velocity: Vec3, plane: Plane) -> Self {
        let (h, v) = plane.split(velocity);
        let mut denominator = h + 1.0;
        if denominator == 0.0 {
            denominator = Self::EPSILON;
        }
        let slope = v / denominator;

        if slope >= 2.0 {
            Slope::SteepUp
        } else if slope >= 0.5 {
            Slope::ModerateUp
        } else if slope > -0.5 {
            Slope::Flat
        } else if slope > -2.0 {
            Slope::ModerateDown
        } else {
            Slope::SteepDown
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Slope::SteepUp | Slope::SteepDown => '|',
            Slope::ModerateUp => '/',
            Slope::Flat => '-',
            Slope::ModerateDown => '\\',
        }
    }
}

/// How frames get drawn. Change it with the `with_*` functions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    plane: Plane,
    zoom: f64,
    columns: u32,
    rows: u32,
    render_size: f64,
    /// Simulated seconds between frames.
    render_step: f64,
    /// Draw where things have been, too.
    trajectory: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            plane: Plane::XY,
            zoom: 1.0,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            render_size: DEFAULT_RENDER_SIZE,
            render_step: DAY,
            trajectory: false,
        }
    }
}

impl RenderConfig {
    pub fn new(
        plane: Plane,
        zoom: f64,
        columns: u32,
        rows: u32,
        render_size: f64,
        render_step: f64,
        trajectory: bool,
    ) -> Result<Self> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!("zoom must be positive, got {}", zoom)));
        }
        // A grid narrower than 2 cells has no middle to centre on
        if columns < 2 || rows < 2 {
            return Err(SimulationError::InvalidConfig(format!(
                "grid must be at least 2x2, got {}x{}",
                columns, rows
            )));
        }
        if !render_size.is_finite() || render_size <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "render_size must be positive, got {}",
                render_size
            )));
        }
        if !render_step.is_finite() || render_step <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "render_step must be positive, got {}",
                render_step
            )));
        }
        Ok(Self {
            plane,
            zoom,
            columns,
            rows,
            render_size,
            render_step,
            trajectory,
        })
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn render_size(&self) -> f64 {
        self.render_size
    }

    pub fn render_step(&self) -> f64 {
        self.render_step
    }

    pub fn trajectory(&self) -> bool {
        self.trajectory
    }

    pub fn half_width(&self) -> u32 {
        self.columns / 2
    }

    pub fn half_height(&self) -> u32 {
        self.rows / 2
    }

    pub fn with_plane(self, plane: Plane) -> Self {
        Self { plane, ..self }
    }

    pub fn with_zoom(self, zoom: f64) -> Result<Self> {
        Self::new(
            self.plane,
            zoom,
            self.columns,
            self.rows,
            self.render_size,
            self.render_step,
            self.trajectory,
        )
    }

    pub fn with_render_step(self, render_step: f64) -> Result<Self> {
        Self::new(
            self.plane,
            self.zoom,
            self.columns,
            self.rows,
            self.render_size,
            render_step,
            self.trajectory,
        )
    }

    pub fn with_trajectory(self, trajectory: bool) -> Self {
        Self { trajectory, ..self }
    }

    /// Grid cell for `position` under this config.
    pub fn project(&self, position: Vec3) -> Point2D<i64> {
        project(
            position,
            self.plane,
            self.zoom,
            self.half_width(),
            self.half_height(),
            self.render_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_lands_in_the_middle() {
        for &zoom in &[0.25, 1.0, 3.0, 1000.0] {
            let p = project(Vec3::zero(), Plane::XY, zoom, 8, 10, DEFAULT_RENDER_SIZE);
            assert_eq!(p, Point2D::new(8, 10));
        }
    }

    #[test]
    fn edge_of_render_lands_on_edge_of_grid() {
        let p = project(Vec3::new(4.0e8, -4.0e8, 0.0), Plane::XY, 1.0, 8, 10, 4.0e8);
        assert_eq!(p, Point2D::new(16, 0));
    }

    #[test]
    fn zoom_magnifies() {
        let near = project(Vec3::new(1.0e8, 0.0, 0.0), Plane::XY, 1.0, 8, 10, 4.0e8);
        let zoomed = project(Vec3::new(1.0e8, 0.0, 0.0), Plane::XY, 2.0, 8, 10, 4.0e8);
        assert_eq!(near.x, 10);
        assert_eq!(zoomed.x, 12);
    }

    #[test]
    fn planes_pick_axes() {
        let pos = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Plane::XY.split(pos), (1.0, 2.0));
        assert_eq!(Plane::YZ.split(pos), (2.0, 3.0));
        assert_eq!(Plane::XZ.split(pos), (1.0, 3.0));
        assert_eq!("Xz".parse::<Plane>(), Ok(Plane::XZ));
        assert!("zx".parse::<Plane>().is_err());
    }

    #[test]
    fn slope_buckets() {
        let v = |x: f64, y: f64| Vec3::new(x, y, 0.0);
        assert_eq!(Slope::classify(v(0.0, 5.0), Plane::XY), Slope::SteepUp);
        assert_eq!(Slope::classify(v(1.0, 2.0), Plane::XY), Slope::ModerateUp);
        assert_eq!(Slope::classify(v(100.0, 1.0), Plane::XY), Slope::Flat);
        assert_eq!(Slope::classify(v(1.0, -2.0), Plane::XY), Slope::ModerateDown);
        assert_eq!(Slope::classify(v(0.0, -5.0), Plane::XY), Slope::SteepDown);
        // h + 1 == 0 falls back to the epsilon instead of dividing by zero
        assert_eq!(Slope::classify(v(-1.0, 1.0), Plane::XY), Slope::SteepUp);
        assert_eq!(Slope::classify(v(-1.0, 0.0), Plane::XY), Slope::Flat);
    }

    #[test]
    fn render_config_validation() {
        let cfg = RenderConfig::default();
        assert_eq!((cfg.half_width(), cfg.half_height()), (8, 10));
        assert!(cfg.with_zoom(0.0).is_err());
        assert!(cfg.with_render_step(-1.0).is_err());
        let xz = cfg.with_plane(Plane::XZ).with_trajectory(true);
        assert_eq!(xz.plane(), Plane::XZ);
        assert!(xz.trajectory());
        assert_eq!(cfg.plane(), Plane::XY);
    }
}
