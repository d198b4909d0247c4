
use dreamspace::engine::Camera;
use glam::{DMat4, DVec3};

const DEFAULT_DISTANCE: f64 = 100.0;
const MIN_DISTANCE: f64 = 5.0;
const MAX_DISTANCE: f64 = 2500.0;
const PITCH_LIMIT: f64 = 1.55;

pub(super) struct OrbitCamera {
    pub yaw: f64,
    pub pitch: f64,
    pub distance: f64,
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub sensitivity: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: DEFAULT_DISTANCE,
            fov: 75f64.to_radians(),
            near: 0.1,
            far: 3000.0,
            sensitivity: 0.005,
        }
    }
}

impl OrbitCamera {
    pub fn reset(&mut self) {
        *self = Self {
            sensitivity: self.sensitivity,
            ..Self::default()
        };
    }

    pub fn position(&self) -> DVec3 {
        DVec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position(), DVec3::ZERO, DVec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        DMat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    pub fn engine_camera(&self, aspect: f64) -> Camera {
        Camera::new(self.projection_matrix(aspect) * self.view_matrix())
    }

    pub fn depth_of(&self, point: DVec3) -> f64 {
        -self.view_matrix().transform_point3(point).z
    }

    pub fn focal_length(&self, height: f64) -> f64 {
        (height / 2.0) / (self.fov / 2.0).tan()
    }

    pub fn orbit(&mut self, dx: f64, dy: f64) {
        self.yaw -= dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, scroll: f64) {
        let factor = (1.0 - scroll * 0.0018).clamp(0.85, 1.15);
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
