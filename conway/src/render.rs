// render.rs - RGBA pixel buffers mirrored from a generation

use crate::grid::Generation;

pub const ALIVE_RGBA: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
pub const DEAD_RGBA: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];
pub const BYTES_PER_PIXEL: usize = 4;

/// Double-buffered frame: writes go to the shadow, [`PixelBuffers::commit`]
/// copies it wholesale into the active buffer handed to the renderer.
#[derive(Debug, Clone)]
pub struct PixelBuffers {
    width: usize,
    height: usize,
    shadow: Vec<u8>,
    active: Vec<u8>,
}

impl PixelBuffers {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height * BYTES_PER_PIXEL;
        Self { width, height, shadow: vec![0; len], active: vec![0; len] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The committed frame.
    pub fn active(&self) -> &[u8] {
        &self.active
    }

    /// Stages one cell's pixel.
    pub fn write_cell(&mut self, index: usize, alive: bool) {
        let offset = index * BYTES_PER_PIXEL;
        let rgba = if alive { ALIVE_RGBA } else { DEAD_RGBA };
        self.shadow[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    pub fn commit(&mut self) {
        self.active.copy_from_slice(&self.shadow);
    }

    /// Stages every cell of `generation`, then commits.
    pub fn sync(&mut self, generation: &Generation) {
        for (index, &alive) in generation.cells().iter().enumerate() {
            self.write_cell(index, alive);
        }
        self.commit();
    }
}
