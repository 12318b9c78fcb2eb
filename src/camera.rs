use crate::geometry::GridGeometry;

const MIN_ZOOM: f32 = 0.01;
const MAX_ZOOM: f32 = 20.0;

/// Camera state for pan/zoom exploration of the grid.
///
/// World coordinates are grid pixels (see [`GridGeometry`]); screen
/// coordinates are physical window pixels with the origin at the top left.
/// `zoom` is screen pixels per world unit.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Center of the view in world space.
    pub center_x: f32,
    pub center_y: f32,
    pub zoom: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// When locked, pointer drags edit the grid instead of panning.
    pub locked: bool,
    home: (f32, f32),
}

/// Uniform data sent to the GPU for camera-based rendering.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub center_x: f32,
    pub center_y: f32,
    pub zoom: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub grid_cols: f32,
    pub grid_rows: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub line_width: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl Camera {
    /// Create a camera looking at `(center_x, center_y)`, which also becomes
    /// the home position for [`Camera::reset`].
    pub fn new(center_x: f32, center_y: f32) -> Self {
        Self {
            center_x,
            center_y,
            zoom: 1.0,
            viewport_width: 1.0,
            viewport_height: 1.0,
            locked: false,
            home: (center_x, center_y),
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
    }

    pub fn world_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.center_x) * self.zoom + self.viewport_width / 2.0,
            (y - self.center_y) * self.zoom + self.viewport_height / 2.0,
        )
    }

    pub fn screen_to_world(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.viewport_width / 2.0) / self.zoom + self.center_x,
            (y - self.viewport_height / 2.0) / self.zoom + self.center_y,
        )
    }

    /// Pan by a screen-space drag of `(dx, dy)` pixels; the world follows the
    /// pointer. Ignored while locked.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if self.locked {
            return;
        }
        self.center_x -= dx / self.zoom;
        self.center_y -= dy / self.zoom;
    }

    /// Zoom by `factor` keeping the world point under `(screen_x, screen_y)` fixed.
    pub fn zoom_at(&mut self, factor: f32, screen_x: f32, screen_y: f32) {
        let (wx, wy) = self.screen_to_world(screen_x, screen_y);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let (nx, ny) = self.screen_to_world(screen_x, screen_y);
        self.center_x += wx - nx;
        self.center_y += wy - ny;
    }

    /// Move the view so world point `(x, y)` sits at the viewport centre.
    /// Zoom is unchanged.
    pub fn center_on(&mut self, x: f32, y: f32) {
        self.center_x = x;
        self.center_y = y;
    }

    /// Reset the camera to the home position at zoom 1.
    pub fn reset(&mut self) {
        (self.center_x, self.center_y) = self.home;
        self.zoom = 1.0;
    }

    /// Build the GPU uniform for the current camera state.
    pub fn uniform(&self, geometry: &GridGeometry, line_width: f32) -> CameraUniform {
        CameraUniform {
            center_x: self.center_x,
            center_y: self.center_y,
            zoom: self.zoom,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            grid_cols: geometry.cols as f32,
            grid_rows: geometry.rows as f32,
            cell_width: geometry.cell_width,
            cell_height: geometry.cell_height,
            line_width,
            _pad0: 0.0,
            _pad1: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn camera() -> Camera {
        let mut cam = Camera::new(500.0, 250.0);
        cam.set_viewport(800.0, 600.0);
        cam
    }

    #[test]
    fn test_camera_default() {
        let cam = camera();
        assert!(close(cam.zoom, 1.0));
        assert!(!cam.locked);
        let (sx, sy) = cam.world_to_screen(500.0, 250.0);
        assert!(close(sx, 400.0) && close(sy, 300.0));
    }

    #[test]
    fn test_screen_world_roundtrip() {
        let mut cam = camera();
        cam.zoom = 2.5;
        let (wx, wy) = cam.screen_to_world(123.0, 456.0);
        let (sx, sy) = cam.world_to_screen(wx, wy);
        assert!(close(sx, 123.0) && close(sy, 456.0));
    }

    #[test]
    fn test_camera_pan() {
        let mut cam = camera();
        cam.zoom = 2.0;
        cam.pan(100.0, -50.0);
        assert!(close(cam.center_x, 450.0));
        assert!(close(cam.center_y, 275.0));
    }

    #[test]
    fn test_locked_camera_does_not_pan() {
        let mut cam = camera();
        cam.locked = true;
        cam.pan(100.0, 100.0);
        assert!(close(cam.center_x, 500.0));
        assert!(close(cam.center_y, 250.0));
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor() {
        let mut cam = camera();
        let before = cam.screen_to_world(100.0, 200.0);
        cam.zoom_at(1.5, 100.0, 200.0);
        let after = cam.screen_to_world(100.0, 200.0);
        assert!(close(before.0, after.0) && close(before.1, after.1));
        assert!(close(cam.zoom, 1.5));
    }

    #[test]
    fn test_camera_zoom_clamp() {
        let mut cam = camera();
        for _ in 0..100 {
            cam.zoom_at(0.5, 400.0, 300.0);
        }
        assert!(cam.zoom >= MIN_ZOOM);
        for _ in 0..100 {
            cam.zoom_at(2.0, 400.0, 300.0);
        }
        assert!(cam.zoom <= MAX_ZOOM);
    }

    #[test]
    fn test_camera_reset() {
        let mut cam = camera();
        cam.zoom_at(3.0, 10.0, 10.0);
        cam.pan(40.0, 40.0);
        cam.reset();
        assert!(close(cam.center_x, 500.0));
        assert!(close(cam.center_y, 250.0));
        assert!(close(cam.zoom, 1.0));
    }

    #[test]
    fn test_center_on() {
        let mut cam = camera();
        cam.zoom_at(2.0, 100.0, 100.0);
        let zoom = cam.zoom;
        cam.center_on(1250.0, 75.0);
        let (sx, sy) = cam.world_to_screen(1250.0, 75.0);
        assert!(close(sx, 400.0));
        assert!(close(sy, 300.0));
        assert!(close(cam.zoom, zoom));
        cam.reset();
        assert!(close(cam.center_x, 500.0));
    }

    #[test]
    fn test_camera_uniform() {
        let cam = camera();
        let geometry = GridGeometry::new(10, 20, 25.0, 25.0);
        let u = cam.uniform(&geometry, 1.5);
        assert!(close(u.grid_cols, 20.0));
        assert!(close(u.grid_rows, 10.0));
        assert!(close(u.center_x, 500.0));
        assert!(close(u.viewport_width, 800.0));
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
    }
}
