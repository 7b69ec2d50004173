use std::collections::HashSet;

use backdrop_platform::{
    DrawSurface, FrameHandle, FrameScheduler, Host, ResizeSource, ResizeSubscription, Rgba8,
    ViewportSize,
};
use tracing::{debug, info};

use crate::clock::ManualClock;
use crate::framebuffer::Framebuffer;

/// A window with an optional canvas in it, driven by hand.
#[derive(Debug)]
pub struct SoftHost {
    window: ViewportSize,
    background: Rgba8,
    surface: Option<Framebuffer>,
    clock: ManualClock,
    subscribers: HashSet<ResizeSubscription>,
    next_subscription: u64,
}

impl SoftHost {
    /// Window without a mounted surface yet.
    pub fn new(window: ViewportSize, background: Rgba8) -> Self {
        Self {
            window,
            background,
            surface: None,
            clock: ManualClock::new(),
            subscribers: HashSet::new(),
            next_subscription: 0,
        }
    }

    pub fn mounted(window: ViewportSize, background: Rgba8) -> Self {
        let mut host = Self::new(window, background);
        host.mount();
        host
    }

    pub fn mount(&mut self) {
        if self.surface.is_none() {
            self.surface = Some(Framebuffer::new(self.window, self.background));
            debug!("surface mounted");
        }
    }

    pub fn unmount(&mut self) -> Option<Framebuffer> {
        self.surface.take()
    }

    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.surface.as_ref()
    }

    pub fn window(&self) -> ViewportSize {
        self.window
    }

    /// Changes the window size. Returns `true` if anyone is listening for it.
    pub fn resize_window(&mut self, size: ViewportSize) -> bool {
        self.window = size;
        info!(
            width = size.width,
            height = size.height,
            listeners = self.subscribers.len(),
            "window resized"
        );
        !self.subscribers.is_empty()
    }

    /// The next display refresh, if any frame is outstanding.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.clock.next_due()
    }

    pub fn pending_frames(&self) -> usize {
        self.clock.pending()
    }

    pub fn resize_listeners(&self) -> usize {
        self.subscribers.len()
    }
}

impl FrameScheduler for SoftHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.clock.request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.clock.cancel_frame(handle);
    }
}

impl ResizeSource for SoftHost {
    fn window_size(&self) -> ViewportSize {
        self.window
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        self.next_subscription += 1;
        let subscription = ResizeSubscription(self.next_subscription);
        self.subscribers.insert(subscription);
        subscription
    }

    fn unsubscribe_resize(&mut self, subscription: ResizeSubscription) {
        self.subscribers.remove(&subscription);
    }
}

impl Host for SoftHost {
    fn surface(&mut self) -> Option<&mut dyn DrawSurface> {
        self.surface
            .as_mut()
            .map(|surface| surface as &mut dyn DrawSurface)
    }
}

#[cfg(test)]
mod tests {
    use super::SoftHost;
    use backdrop_platform::{Host, ResizeSource, Rgba8, ViewportSize};

    #[test]
    fn surface_only_exists_once_mounted() {
        let mut host = SoftHost::new(ViewportSize::new(10, 10), Rgba8::opaque(1, 2, 3));
        assert!(host.surface().is_none());
        host.mount();
        let surface = host.surface().unwrap();
        assert_eq!(surface.size(), ViewportSize::new(10, 10));
    }

    #[test]
    fn resize_reports_listeners() {
        let mut host = SoftHost::mounted(ViewportSize::new(10, 10), Rgba8::TRANSPARENT);
        assert!(!host.resize_window(ViewportSize::new(20, 20)));
        let sub = host.subscribe_resize();
        assert!(host.resize_window(ViewportSize::new(30, 30)));
        assert_eq!(host.window_size(), ViewportSize::new(30, 30));
        host.unsubscribe_resize(sub);
        assert_eq!(host.resize_listeners(), 0);
    }
}
