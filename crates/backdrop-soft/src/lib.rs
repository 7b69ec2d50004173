//! CPU-only host for the backdrop engine: framebuffer surface, manual refresh clock, window.

mod clock;
mod framebuffer;
mod host;

pub use clock::ManualClock;
pub use framebuffer::Framebuffer;
pub use host::SoftHost;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoftError {
    #[error("cannot export an empty {width}x{height} framebuffer")]
    EmptyFramebuffer { width: u32, height: u32 },
    #[error("failed to write snapshot: {0}")]
    Image(#[from] image::ImageError),
}
