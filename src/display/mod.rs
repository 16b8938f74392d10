mod canvas;
mod pixel_buffer;

pub use canvas::{frame_color, Canvas};
pub use pixel_buffer::{pack_rgb, unpack_rgba, PixelBuffer};

#[cfg(feature = "sdl")]
pub use self::sdl::{Display, InputEvent, RenderTarget};

#[cfg(feature = "sdl")]
mod sdl {
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;
    use sdl2::pixels::PixelFormatEnum;
    use sdl2::render::{Canvas as SdlCanvas, Texture, TextureCreator};
    use sdl2::video::{Window, WindowContext};
    use sdl2::{EventPump, TimerSubsystem};

    use super::PixelBuffer;

    pub struct Display {
        canvas: SdlCanvas<Window>,
        event_pump: EventPump,
        timer: TimerSubsystem,
        width: u32,
        height: u32,
    }

    pub struct RenderTarget<'a> {
        texture: Texture<'a>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum InputEvent {
        Quit,
        KeyDown(Keycode),
    }

    impl Display {
        /// Create the window and renderer
        /// vsync=true: locked to monitor refresh (typically 60fps)
        /// vsync=false: uncapped framerate for performance testing
        pub fn with_options(
            title: &str,
            width: u32,
            height: u32,
            vsync: bool,
        ) -> Result<(Self, TextureCreator<WindowContext>), String> {
            let sdl_context = sdl2::init()?;
            let video_subsystem = sdl_context.video()?;
            let timer = sdl_context.timer()?;

            let window = video_subsystem
                .window(title, width, height)
                .position_centered()
                .allow_highdpi()
                .build()
                .map_err(|e| e.to_string())?;

            let mut canvas_builder = window.into_canvas().accelerated();
            if vsync {
                canvas_builder = canvas_builder.present_vsync();
            }
            let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

            let texture_creator = canvas.texture_creator();
            let event_pump = sdl_context.event_pump()?;

            Ok((
                Self {
                    canvas,
                    event_pump,
                    timer,
                    width,
                    height,
                },
                texture_creator,
            ))
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        /// Milliseconds since SDL was initialized
        pub fn ticks(&self) -> u64 {
            u64::from(self.timer.ticks())
        }

        pub fn present(
            &mut self,
            target: &mut RenderTarget,
            buffer: &PixelBuffer,
        ) -> Result<(), String> {
            target
                .texture
                .update(None, buffer.as_bytes(), buffer.pitch())
                .map_err(|e| e.to_string())?;

            self.canvas.copy(&target.texture, None, None)?;
            self.canvas.present();
            Ok(())
        }

        pub fn poll_events(&mut self) -> Vec<InputEvent> {
            let mut events = Vec::new();

            for event in self.event_pump.poll_iter() {
                match event {
                    Event::Quit { .. } => events.push(InputEvent::Quit),
                    Event::KeyDown {
                        keycode: Some(k), ..
                    } => events.push(InputEvent::KeyDown(k)),
                    _ => {},
                }
            }

            events
        }
    }

    impl<'a> RenderTarget<'a> {
        /// Streaming RGBA8888 texture matching the pixel buffer layout
        pub fn with_size(
            texture_creator: &'a TextureCreator<WindowContext>,
            width: u32,
            height: u32,
        ) -> Result<Self, String> {
            let texture = texture_creator
                .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
                .map_err(|e| e.to_string())?;
            Ok(Self { texture })
        }
    }
}
