// ui.rs - Maps egui input onto FrameInput and draws the engine's pixel buffer

use std::time::Instant;

use eframe::egui;
use egui::{Color32, Key, Pos2, Rect, TextureHandle, TextureOptions, Vec2};

use conway::{FrameInput, FrameOutcome, RunState, Simulation};

pub const STATUS_BAR_HEIGHT: f32 = 28.0;

/// Number keys stamp the matching entry of PATTERNS.
const STAMP_KEYS: [Key; 7] = [Key::Num1, Key::Num2, Key::Num3, Key::Num4, Key::Num5, Key::Num6, Key::Num7];

pub struct LifeApp {
    simulation: Simulation,
    scale: f32,
    texture: Option<TextureHandle>,
    board_rect: Option<Rect>,    // Where the board was drawn last frame
}

impl LifeApp {
    pub fn new(simulation: Simulation, scale: f32) -> Self {
        Self { simulation, scale, texture: None, board_rect: None }
    }

    fn gather_input(&self, ctx: &egui::Context) -> FrameInput {
        ctx.input(|i| FrameInput {
            toggle_pause: i.key_pressed(Key::Space),
            step_forward: i.key_pressed(Key::N),
            step_back:    i.key_pressed(Key::P),
            quit:         i.key_pressed(Key::Q) || i.key_pressed(Key::Escape),
            pointer:      i.pointer.hover_pos().and_then(|pos| self.cell_at(pos)),
            left_down:    i.pointer.primary_down(),
            right_down:   i.pointer.secondary_down(),
            stamp:        STAMP_KEYS.iter().position(|&key| i.key_pressed(key)),
            clear:        i.key_pressed(Key::C),
        })
    }

    /// Screen position to grid cell; may land off the grid.
    fn cell_at(&self, pos: Pos2) -> Option<(i64, i64)> {
        let rect = self.board_rect?;
        let offset = (pos - rect.min) / self.scale;
        Some((offset.x.floor() as i64, offset.y.floor() as i64))
    }

    fn upload_frame(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let engine = self.simulation.engine();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [engine.width(), engine.height()],
            self.simulation.pixels(),
        );
        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, TextureOptions::NEAREST);
            return texture.id();
        }
        let texture = ctx.load_texture("cells", image, TextureOptions::NEAREST);
        let id = texture.id();
        self.texture = Some(texture);
        id
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let input = self.gather_input(ctx);
        if self.simulation.frame(&input, Instant::now()) == FrameOutcome::Quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let texture_id = self.upload_frame(ctx);
        let status = self.simulation.status();
        let cells = self.simulation.engine().width() * self.simulation.engine().height();

        egui::TopBottomPanel::bottom("status")
            .exact_height(STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let state = match status.state {
                        RunState::Running => "▶ Running",
                        RunState::Paused => "⏸ Paused",
                    };
                    ui.label(state);
                    ui.separator();
                    ui.label(format!("Generation: {}", status.generation));
                    ui.label(format!("History: {}/{}", status.cursor + 1, status.history_len));
                    ui.separator();
                    ui.label(format!("Live cells: {}", status.population));
                    ui.label(format!("Population: {:.1}%", status.population as f32 / cells as f32 * 100.0));
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let engine = self.simulation.engine();
                let size = Vec2::new(engine.width() as f32, engine.height() as f32) * self.scale;
                let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
                painter.image(
                    texture_id,
                    response.rect,
                    Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
                self.board_rect = Some(response.rect);
            });

        // Keep frames coming so ticks and held buttons are seen
        ctx.request_repaint();
    }
}
