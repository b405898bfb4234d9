// src/engine_lib/controller.rs

use winit::{
    event::{WindowEvent, DeviceEvent, ElementState},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, CursorGrabMode},
};
use glam::Vec2;
use crate::engine_lib::level_types::Level;
use crate::engine_lib::walk::{update_camera_in_level, WalkState};

pub struct CameraController {
    pub forward_input: f32,
    pub strafe_input: f32,
    pub camera_yaw_delta_keyboard: f32,
    pub camera_pitch_delta_keyboard: f32,

    pub mouse_dx_accum: f32,
    pub mouse_dy_accum: f32,

    pub move_speed: f32,
    pub turn_speed: f32,
    pub mouse_sensitivity: f32,
    pub cursor_grabbed: bool,
}

impl CameraController {
    pub fn new(move_speed: f32, turn_speed: f32, sensitivity: f32, initial_grab: bool) -> Self {
        Self {
            forward_input: 0.0,
            strafe_input: 0.0,
            camera_yaw_delta_keyboard: 0.0,
            camera_pitch_delta_keyboard: 0.0,
            mouse_dx_accum: 0.0,
            mouse_dy_accum: 0.0,
            move_speed,
            turn_speed,
            mouse_sensitivity: sensitivity,
            cursor_grabbed: initial_grab,
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state == ElementState::Pressed && key_event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    self.toggle_cursor_grab(window);
                    return true;
                }
                let pressed = key_event.state == ElementState::Pressed;
                let axis = |value: f32| if pressed { value } else { 0.0 };
                match key_event.physical_key {
                    PhysicalKey::Code(KeyCode::KeyW) => { self.forward_input = axis(1.0); true }
                    PhysicalKey::Code(KeyCode::KeyS) => { self.forward_input = axis(-1.0); true }
                    PhysicalKey::Code(KeyCode::KeyD) => { self.strafe_input = axis(1.0); true }
                    PhysicalKey::Code(KeyCode::KeyA) => { self.strafe_input = axis(-1.0); true }
                    PhysicalKey::Code(KeyCode::ArrowLeft) => { self.camera_yaw_delta_keyboard = axis(1.0); true }
                    PhysicalKey::Code(KeyCode::ArrowRight) => { self.camera_yaw_delta_keyboard = axis(-1.0); true }
                    PhysicalKey::Code(KeyCode::ArrowUp) => { self.camera_pitch_delta_keyboard = axis(1.0); true }
                    PhysicalKey::Code(KeyCode::ArrowDown) => { self.camera_pitch_delta_keyboard = axis(-1.0); true }
                    _ => false,
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if !self.cursor_grabbed && *state == ElementState::Pressed && *button == winit::event::MouseButton::Left {
                    self.grab_cursor(window, true);
                    return true;
                }
                false
            }
            WindowEvent::Focused(focused) => {
                if !*focused && self.cursor_grabbed {
                    self.grab_cursor(window, false);
                }
                false
            }
            _ => false,
        }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if !self.cursor_grabbed {
            self.mouse_dx_accum = 0.0;
            self.mouse_dy_accum = 0.0;
            return;
        }
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.mouse_dx_accum += *dx as f32;
            self.mouse_dy_accum += *dy as f32;
        }
    }

    pub fn toggle_cursor_grab(&mut self, window: &Window) {
        self.grab_cursor(window, !self.cursor_grabbed);
    }

    fn grab_cursor(&mut self, window: &Window, grab: bool) {
        if grab == self.cursor_grabbed {
            return;
        }
        if grab {
            if window.set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_e| window.set_cursor_grab(CursorGrabMode::Locked))
                .is_ok() {
                window.set_cursor_visible(false);
                self.cursor_grabbed = true;
            } else {
                log::warn!("Could not grab cursor");
            }
        } else if window.set_cursor_grab(CursorGrabMode::None).is_ok() {
            window.set_cursor_visible(true);
            self.cursor_grabbed = false;
            self.mouse_dx_accum = 0.0;
            self.mouse_dy_accum = 0.0;
        } else {
            log::warn!("Could not release cursor");
        }
    }

    /// Turns the camera, then proposes a ground-plane move for the level to validate.
    pub fn apply_to_walk(&mut self, level: &Level, walk: &mut WalkState, dt: f32) {
        let rot_speed_keyboard = self.turn_speed * dt;
        let camera = &mut walk.camera;

        camera.yaw -= self.mouse_dx_accum * self.mouse_sensitivity;
        camera.yaw += self.camera_yaw_delta_keyboard * rot_speed_keyboard;
        let pitch = camera.pitch
            - self.mouse_dy_accum * self.mouse_sensitivity
            + self.camera_pitch_delta_keyboard * rot_speed_keyboard;
        camera.set_pitch(pitch);

        self.mouse_dx_accum = 0.0;
        self.mouse_dy_accum = 0.0;

        let step = self.move_speed * dt;
        let delta = camera.forward_xz() * self.forward_input * step + camera.right_xz() * self.strafe_input * step;
        if delta == Vec2::ZERO {
            return;
        }

        let proposed = camera.xz() + delta;
        update_camera_in_level(level, walk, proposed);
    }
}
