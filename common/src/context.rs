use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use glium::backend::glutin::SimpleWindowBuilder;
use glium::glutin::surface::WindowSurface;
use glium::{Display, Frame, Surface};
use log::{info, warn};
use nalgebra::Point2;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use crate::colors::{self, ColorExt};
use crate::config::WindowConfig;
use crate::input::Input;
use crate::platform::Platform;

struct OpenGLContext {
    window: Option<Window>,
    display: Option<Display<WindowSurface>>,
    window_attributes: WindowAttributes,
    input: Input,
    close_requested: bool,
}

impl ApplicationHandler for OpenGLContext {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (window, display) = SimpleWindowBuilder::new()
            .set_window_builder(self.window_attributes.clone())
            .build(event_loop);

        let size = window.inner_size();
        info!("Created {}x{} window", size.width, size.height);

        capture_cursor(&window);

        self.window = Some(window);
        self.display = Some(display);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(Window::id) != Some(window_id) {
            return;
        }

        self.input.process_window_event(&event);

        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::Resized(new_size) => {
                if let Some(display) = &self.display {
                    display.resize((new_size.width, new_size.height));
                }
            }
            _ => (),
        }

        if self.input.key_pressed(KeyCode::Escape) {
            self.close_requested = true;
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.input.process_device_event(&event);
    }
}

fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

    if let Err(error) = grabbed {
        warn!("Could not grab the cursor: {}", error);
    }

    window.set_cursor_visible(false);
}

/// A single window with an OpenGL context, driven by pumping the winit event loop once per frame.
pub struct WindowPlatform {
    event_loop: EventLoop<()>,
    context: OpenGLContext,
}

impl WindowPlatform {
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let mut event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false);

        let mut context = OpenGLContext {
            window: None,
            display: None,
            window_attributes,
            input: Input::new(),
            close_requested: false,
        };

        // The window and display are only created once the platform resumes the application
        while context.display.is_none() {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut context)
            {
                return Err(eyre!(
                    "Event loop exited with code {} before a window was created",
                    code
                ));
            }
        }

        Ok(Self {
            event_loop,
            context,
        })
    }

    pub fn display(&self) -> Result<&Display<WindowSurface>> {
        self.context
            .display
            .as_ref()
            .ok_or_else(|| eyre!("The OpenGL display has not been created"))
    }
}

impl Platform for WindowPlatform {
    type Frame = Frame;

    fn poll_events(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.context);

        if let PumpStatus::Exit(code) = status {
            info!("Event loop exited with code {}", code);
            self.context.close_requested = true;
        }
    }

    fn should_close(&self) -> bool {
        self.context.close_requested
    }

    fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        self.context.input.key_down(key_code)
    }

    fn take_cursor_samples(&mut self) -> Vec<Point2<f64>> {
        self.context.input.take_cursor_samples()
    }

    fn begin_frame(&mut self) -> Result<Frame> {
        let [red, green, blue] = colors::BACKGROUND.to_rgb_array();

        let mut frame = self.display()?.draw();
        frame.clear_color_and_depth((red, green, blue, 1.0), 1.0);

        Ok(frame)
    }

    fn swap_buffers(&mut self, frame: Frame) -> Result<()> {
        Ok(frame.finish()?)
    }
}
