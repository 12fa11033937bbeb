//! SDL2 window that displays a [`PixelBuffer`].
//!
//! SDL is used strictly as a display surface and input source; nothing
//! here draws. Each frame the demo renders into its own buffer and
//! hands it to [`Window::present`], which streams the bytes into a
//! texture and blits it.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::render::PixelBuffer;

pub const FPS: u64 = 60;

/// Keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    B,
    W,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    KeyDown(Key),
}

/// Caps the main loop to a fixed frame rate.
pub struct FrameLimiter {
    frame_target: std::time::Duration,
    previous_frame: std::time::Instant,
}

impl FrameLimiter {
    pub fn new(fps: u64) -> Self {
        Self {
            frame_target: std::time::Duration::from_millis(1000 / fps),
            previous_frame: std::time::Instant::now(),
        }
    }

    /// Sleeps off the remainder of the frame budget and returns the
    /// elapsed time since the previous call, in seconds.
    pub fn wait_and_get_delta(&mut self) -> f32 {
        let elapsed = self.previous_frame.elapsed();
        if elapsed < self.frame_target {
            std::thread::sleep(self.frame_target - elapsed);
        }

        let delta = self.previous_frame.elapsed();
        self.previous_frame = std::time::Instant::now();
        delta.as_secs_f32()
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before texture_creator so it drops first; it borrows
    // from the boxed creator.
    texture: sdl2::render::Texture<'static>,
    _texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // We ensure texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };

        // ABGR8888 reads as [R, G, B, A] bytes on little-endian, which
        // is exactly the PixelBuffer layout.
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture,
            _texture_creator: texture_creator,
            event_pump,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Drain pending SDL events into window events.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    let key = match keycode {
                        Keycode::Escape => Some(Key::Escape),
                        Keycode::B => Some(Key::B),
                        Keycode::W => Some(Key::W),
                        _ => None,
                    };
                    if let Some(key) = key {
                        events.push(WindowEvent::KeyDown(key));
                    }
                }
                _ => {}
            }
        }

        events
    }

    /// Blit a rendered frame to the screen.
    pub fn present(&mut self, buffer: &PixelBuffer) -> Result<(), String> {
        self.texture
            .update(None, buffer.as_bytes(), (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(
            &self.texture,
            None,
            Some(Rect::new(0, 0, self.width, self.height)),
        )?;
        self.canvas.present();

        Ok(())
    }
}
