// src/ui.rs
use egui;

/// Snapshot of the walkthrough shown in the overlay each frame.
pub struct FrameStats<'a> {
    pub level_name: &'a str,
    pub sector_count: usize,
    pub fps: f32,
    pub position: [f32; 3],
    pub yaw_deg: f32,
    pub sector: Option<(i32, f32)>,
    pub vertex_count: usize,
    pub vertex_capacity: usize,
    pub dropped_vertices: usize,
    pub collided: bool,
    pub collision_count: u64,
    pub cursor_grabbed: bool,
}

pub fn build_ui(ctx: &egui::Context, stats: &FrameStats) {
    egui::Window::new("Level Info")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.label(format!("Level: {} ({} sectors)", stats.level_name, stats.sector_count));
                ui.label(format!("FPS: {:.0}", stats.fps));
                ui.separator();

                let [x, y, z] = stats.position;
                ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", x, y, z));
                ui.label(format!("Heading: {:.0}°", stats.yaw_deg));
                match stats.sector {
                    Some((id, light)) => ui.label(format!("Sector {} (light {:.2})", id, light)),
                    None => ui.colored_label(egui::Color32::YELLOW, "Outside all sectors"),
                };
                if stats.collided {
                    ui.colored_label(egui::Color32::LIGHT_RED, "Blocked by wall");
                } else {
                    ui.label(format!("Collisions: {}", stats.collision_count));
                }

                ui.separator();
                ui.label(format!("Vertices: {} / {}", stats.vertex_count, stats.vertex_capacity));
                if stats.dropped_vertices > 0 {
                    ui.colored_label(
                        egui::Color32::LIGHT_RED,
                        format!("Dropped: {} (raise --max-vertices)", stats.dropped_vertices),
                    );
                }

                ui.separator();
                ui.label("🎮 Keyboard Controls:");
                ui.label("   W/S: Walk Forward/Back");
                ui.label("   A/D: Strafe");
                ui.label("   Arrow Keys: Look Up/Down/Left/Right");
                ui.label("   Mouse (when grabbed): Look");
                if stats.cursor_grabbed {
                    ui.label("   Escape: Release Mouse Cursor");
                } else {
                    ui.label("   Escape or Click: Grab Mouse Cursor");
                }
            });
        });
}
