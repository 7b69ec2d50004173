use std::path::Path;

use backdrop_platform::{DrawSurface, Rgba8, ViewportSize};
use glam::Vec2;
use tracing::{debug, info};

use crate::SoftError;

/// RGBA8 pixel buffer that plays the role of the full-viewport canvas.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    size: ViewportSize,
    background: Rgba8,
    pixels: Vec<Rgba8>,
    draw_calls: u64,
}

impl Framebuffer {
    pub fn new(size: ViewportSize, background: Rgba8) -> Self {
        Self {
            size,
            background,
            pixels: vec![background; pixel_count(size)],
            draw_calls: 0,
        }
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    pub fn set_background(&mut self, background: Rgba8) {
        self.background = background;
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    /// Number of `fill_circle` calls since creation.
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    pub fn save_png(&self, path: &Path) -> Result<(), SoftError> {
        if self.size.is_empty() {
            return Err(SoftError::EmptyFramebuffer {
                width: self.size.width,
                height: self.size.height,
            });
        }
        image::save_buffer(
            path,
            bytemuck::cast_slice(&self.pixels),
            self.size.width,
            self.size.height,
            image::ColorType::Rgba8,
        )?;
        info!(
            "snapshot {}x{} written to {}",
            self.size.width,
            self.size.height,
            path.display()
        );
        Ok(())
    }
}

impl DrawSurface for Framebuffer {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn resize(&mut self, size: ViewportSize) {
        if size == self.size {
            return;
        }
        debug!(
            "framebuffer {}x{} -> {}x{}",
            self.size.width, self.size.height, size.width, size.height
        );
        self.size = size;
        self.pixels = vec![self.background; pixel_count(size)];
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba8) {
        self.draw_calls += 1;
        if radius <= 0.0 || self.size.is_empty() {
            return;
        }
        let extent = self.size.extent();
        let lo = (center - Vec2::splat(radius)).floor().clamp(Vec2::ZERO, extent);
        let hi = (center + Vec2::splat(radius)).ceil().clamp(Vec2::ZERO, extent);
        let radius_sq = radius * radius;
        let width = self.size.width as usize;

        for y in lo.y as u32..hi.y as u32 {
            let dy = y as f32 + 0.5 - center.y;
            let row = y as usize * width;
            for x in lo.x as u32..hi.x as u32 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= radius_sq {
                    self.pixels[row + x as usize] = color;
                }
            }
        }
    }
}

fn pixel_count(size: ViewportSize) -> usize {
    size.width as usize * size.height as usize
}
