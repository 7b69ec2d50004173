//! Host abstraction traits so `backdrop-core` stays independent of any real window system.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Pixel dimensions of a window or drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn extent(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Straight 8-bit RGBA, laid out exactly as it sits in a framebuffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Ticket for one requested display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Ticket for one registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeSubscription(pub u64);

/// Full-viewport, non-interactive drawing target that sits behind everything else.
pub trait DrawSurface {
    fn size(&self) -> ViewportSize;
    fn resize(&mut self, size: ViewportSize);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba8);
}

/// Display-refresh primitive: one callback per requested frame, cancellable until it fires.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Window size plus resize notification registry.
pub trait ResizeSource {
    fn window_size(&self) -> ViewportSize;
    fn subscribe_resize(&mut self) -> ResizeSubscription;
    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription);
}

/// Everything the particle engine needs from its environment.
pub trait Host: FrameScheduler + ResizeSource {
    /// `None` until the drawing surface has been mounted.
    fn surface(&mut self) -> Option<&mut dyn DrawSurface>;
}
