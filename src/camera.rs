use glam::{Mat4, Vec3};

/// First-person fly camera.
///
/// Orientation is yaw/pitch driven; `look` folds mouse deltas into the front
/// vector and `move_*` steps the position along the current basis at the
/// configured speed.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    speed: f32,

    pub fov: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            speed: 0.05,
            fov: 45.0,
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_front(&mut self, front: Vec3) {
        self.front = front;
    }

    /// Movement step per frame, typically scaled by the frame delta.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), 800.0 / 600.0, 0.1, 200.0)
    }

    pub fn move_forward(&mut self) {
        self.position += self.speed * self.front;
    }

    pub fn move_backward(&mut self) {
        self.position -= self.speed * self.front;
    }

    pub fn move_left(&mut self) {
        self.position -= self.speed * self.front.cross(self.up).normalize();
    }

    pub fn move_right(&mut self) {
        self.position += self.speed * self.front.cross(self.up).normalize();
    }

    /// Apply mouse-look deltas in degrees, clamp the pitch away from the
    /// poles and rebuild the front vector.
    pub fn look(&mut self, yaw_offset: f32, pitch_offset: f32) {
        self.yaw += yaw_offset;
        self.pitch = (self.pitch + pitch_offset).clamp(-89.0, 89.0);

        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
    }

    /// Scroll zoom, clamped to [1, 45] degrees of field of view.
    pub fn zoom(&mut self, offset: f32) {
        self.fov = (self.fov - offset).clamp(1.0, 45.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_field_of_view_is_45_degrees() {
        let camera = Camera::new();
        assert_eq!(camera.fov, 45.0);
    }

    #[test]
    fn forward_then_backward_returns_to_start() {
        let mut camera = Camera::new();
        camera.set_position(Vec3::new(0.0, 3.0, 3.0));
        camera.set_speed(0.7);

        let start = camera.position();
        camera.move_forward();
        camera.move_backward();

        assert!((camera.position() - start).length() < 1e-6);
    }

    #[test]
    fn strafing_moves_along_the_right_axis() {
        let mut camera = Camera::new();
        camera.set_speed(1.0);

        camera.move_right();
        // default front is -z, so right is +x
        assert!((camera.position() - Vec3::new(1.0, 0.0, 3.0)).length() < 1e-6);

        camera.move_left();
        assert!((camera.position() - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped_at_the_poles() {
        let mut camera = Camera::new();
        camera.look(0.0, 200.0);
        assert_eq!(camera.pitch, 89.0);

        camera.look(0.0, -400.0);
        assert_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn looking_straight_ahead_keeps_the_default_front() {
        let mut camera = Camera::new();
        camera.look(0.0, 0.0);

        assert!((camera.front() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn zoom_narrows_and_clamps_the_field_of_view() {
        let mut camera = Camera::new();
        camera.zoom(10.0);
        assert_eq!(camera.fov, 35.0);

        camera.zoom(100.0);
        assert_eq!(camera.fov, 1.0);

        camera.zoom(-100.0);
        assert_eq!(camera.fov, 45.0);
    }
}
