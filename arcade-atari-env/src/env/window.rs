use anyhow::Result;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

const SCALE: u32 = 3;

pub(super) struct AtariWindow {
    pub(super) event_loop: EventLoop<()>,
    window: Window,
    pixels: Pixels,
}

impl AtariWindow {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title("arcade")
            .with_inner_size(winit::dpi::LogicalSize::new(
                (width * SCALE) as f64,
                (height * SCALE) as f64,
            ))
            .build(&event_loop)?;
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self {
            event_loop,
            window,
            pixels,
        })
    }

    pub fn get_frame(&mut self) -> &mut [u8] {
        self.pixels.get_frame()
    }

    pub fn render_and_request_redraw(&mut self) -> Result<()> {
        self.pixels.render()?;
        self.window.request_redraw();
        Ok(())
    }
}
