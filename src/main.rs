// src/main.rs

mod app;
mod ui;

use clap::Parser;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopWindowTarget, EventLoop},
    window::WindowBuilder,
};
use app::WalkthroughApp;
use sector_engine::config::Config;
use sector_engine::demo_level::create_demo_level;
use sector_engine::engine_lib::Level;

fn load_level(config: &Config) -> Option<Level> {
    match Level::load_from_file(&config.level) {
        Ok(level) if level.is_empty() => {
            log::warn!("No sectors loaded from {}, using the built-in level", config.level.display());
            Some(create_demo_level())
        }
        Ok(level) => Some(level),
        Err(e) => {
            log::error!("Failed to load {}: {}", config.level.display(), e);
            None
        }
    }
}

pub async fn run(config: Config) {
    let Some(level) = load_level(&config) else {
        std::process::exit(1);
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Could not create event loop: {}", e);
            std::process::exit(1);
        }
    };
    let window = match WindowBuilder::new()
        .with_title(format!("Sector Engine - {}", level.name))
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .build(&event_loop)
    {
        Ok(window) => std::sync::Arc::new(window),
        Err(e) => {
            log::error!("Could not create window: {}", e);
            std::process::exit(1);
        }
    };

    let mut app_state = match WalkthroughApp::new(window.clone(), &config, level).await {
        Ok(app) => app,
        Err(e) => {
            log::error!("Graphics initialisation failed: {}", e);
            std::process::exit(1);
        }
    };
    let mut last_time = std::time::Instant::now();

    let result = event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    match event {
                        WindowEvent::CloseRequested => {
                            target.exit();
                        }
                        WindowEvent::Resized(physical_size) => {
                            app_state.resize(*physical_size);
                        }
                        WindowEvent::Focused(is_focused) => {
                            app_state.set_focused(*is_focused);
                        }
                        _ => {}
                    }
                }
            }
            Event::DeviceEvent { event: device_event, .. } => {
                app_state.handle_device_event(&device_event);
            }
            Event::AboutToWait => {
                let now = std::time::Instant::now();
                let dt = (now - last_time).as_secs_f32();
                last_time = now;

                app_state.update(dt);
                match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app_state.resize(app_state.get_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        target.exit();
                    }
                    Err(e) => log::warn!("Surface error: {:?}", e),
                }

                if !target.exiting() {
                    window.request_redraw();
                }
            }
            Event::LoopExiting => {
                app_state.shutdown();
            }
            _ => {}
        }
    });

    if let Err(e) = result {
        log::error!("Event loop terminated: {}", e);
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Config::parse()).await;
}
