// src/app.rs

use std::sync::Arc;
use glam::Vec3;
use winit::{
    event::{WindowEvent, DeviceEvent},
    window::Window,
};
use crate::ui::{build_ui, FrameStats};
use sector_engine::config::Config;
use sector_engine::engine_lib::{Camera, CameraController, Level, WalkState};
use sector_engine::rendering_lib::{render_level, FrameGeometry, Renderer, WGSL_SHADER_SOURCE};

const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.05, g: 0.05, b: 0.1, a: 1.0 };
const ZNEAR: f32 = 0.05;
const ZFAR: f32 = 200.0;
const FPS_WINDOW_SECS: f32 = 0.5;

pub struct WalkthroughApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    level: Level,
    geometry: FrameGeometry,
    walk: WalkState,
    camera_controller: CameraController,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    is_focused: bool,
    reported_dropped: usize,
    frame_count: u32,
    frame_time_accum: f32,
    fps: f32,
}

impl WalkthroughApp {
    pub async fn new(window: Arc<Window>, settings: &Config, level: Level) -> Result<Self, Box<dyn std::error::Error>> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("no compatible GPU adapter")?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter().copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or("surface reports no formats")?;
        let alpha_mode = surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = Renderer::new(
            &device, config.format, WGSL_SHADER_SOURCE,
            settings.max_vertices,
            config.width, config.height,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device, config.format, None, 1,
        );

        let spawn = settings.spawn_point(&level);
        let camera = Camera::new(Vec3::new(spawn.x, settings.eye_height, spawn.y), settings.fov, ZNEAR, ZFAR);
        let walk = WalkState::new(&level, camera, settings.eye_height);
        if walk.current_sector.is_none() {
            log::warn!("Spawn point ({:.2}, {:.2}) is outside every sector", spawn.x, spawn.y);
        }

        let is_focused = window.has_focus();
        let mut camera_controller = CameraController::new(
            settings.move_speed,
            settings.turn_speed,
            settings.mouse_sensitivity,
            false,
        );
        if is_focused {
            camera_controller.toggle_cursor_grab(&window);
        }

        log::info!(
            "Walking '{}' from {} ({} sectors, {} walls)",
            level.name, level.source_path, level.sector_count(), level.wall_count()
        );

        Ok(Self {
            surface, device, queue, config, size,
            renderer,
            geometry: FrameGeometry::with_capacity(settings.max_vertices),
            level, walk, camera_controller,
            egui_ctx, egui_state, egui_renderer,
            is_focused,
            reported_dropped: 0,
            frame_count: 0,
            frame_time_accum: 0.0,
            fps: 0.0,
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> { self.size }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.device, new_size.width, new_size.height);
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn update(&mut self, dt: f32) {
        self.frame_count += 1;
        self.frame_time_accum += dt;
        if self.frame_time_accum >= FPS_WINDOW_SECS {
            self.fps = self.frame_count as f32 / self.frame_time_accum;
            self.frame_count = 0;
            self.frame_time_accum = 0.0;
        }

        if self.is_focused {
            self.camera_controller.apply_to_walk(&self.level, &mut self.walk, dt);
        }

        render_level(&self.level, &mut self.geometry);
        let dropped = self.geometry.dropped();
        if dropped != self.reported_dropped {
            if dropped > 0 {
                log::warn!(
                    "Vertex buffer full: dropped {} of {} vertices",
                    dropped,
                    dropped + self.geometry.len()
                );
            }
            self.reported_dropped = dropped;
        }
    }

    fn frame_stats(&self) -> FrameStats<'_> {
        let camera = &self.walk.camera;
        FrameStats {
            level_name: &self.level.name,
            sector_count: self.level.sector_count(),
            fps: self.fps,
            position: camera.position.to_array(),
            yaw_deg: camera.yaw.to_degrees().rem_euclid(360.0),
            sector: self.walk.current_sector(&self.level).map(|s| (s.id, s.light_intensity)),
            vertex_count: self.geometry.len(),
            vertex_capacity: self.geometry.capacity(),
            dropped_vertices: self.geometry.dropped(),
            collided: self.walk.last_move_collided,
            collision_count: self.walk.collision_count,
            cursor_grabbed: self.camera_controller.cursor_grabbed,
        }
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        let view_proj = self.walk.camera.view_projection(self.size.width as f32, self.size.height as f32);
        self.renderer.prepare(&self.queue, &self.geometry, view_proj);
        self.renderer.render(&mut encoder, &view, CLEAR_COLOR);

        let raw_input = self.egui_state.take_egui_input(window);
        let stats = self.frame_stats();
        let full_output = self.egui_ctx.run(raw_input, |ctx| { build_ui(ctx, &stats); });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if self.egui_state.on_window_event(window, event).consumed { return true; }
        if self.camera_controller.handle_window_event(event, window) { return true; }
        match event {
            WindowEvent::Focused(focused) => { self.is_focused = *focused; false }
            _ => false,
        }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        self.camera_controller.handle_device_event(event);
    }

    pub fn shutdown(&mut self) {
        log::info!(
            "Leaving '{}' after {} blocked moves",
            self.level.name, self.walk.collision_count
        );
        self.level.cleanup();
        self.geometry.clear();
    }
}
