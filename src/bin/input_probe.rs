//! Opens a window and logs what the input engine resolves each frame

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use frame_input::EngineConfig;
use frame_input::health;
use frame_input::input::{
    Backends, BindingTable, Device, DriverState, FixedDisplay, InputCollector, Keymap,
    QueryContext, Viewport, joypad, mouse_id, pointer,
};

#[derive(Parser)]
#[command(name = "input-probe", about = "Inspect unified input state", version)]
struct Args {
    /// Config profile to load (defaults to FRAME_INPUT_PROFILE, then "release")
    #[arg(long)]
    profile: Option<String>,

    /// Run the health checks, print the report and exit
    #[arg(long)]
    health: bool,
}

struct Probe {
    config: EngineConfig,
    binds: BindingTable,
    window: Option<Window>,
    driver: DriverState,
    collector: InputCollector,
    display: FixedDisplay,
    mapping_blocked: bool,
    last_mask: i16,
}

impl Probe {
    fn new(config: EngineConfig, binds: BindingTable) -> Result<Self> {
        let mut driver = DriverState::default();
        driver
            .init(Keymap::APPLE_HID, config.scale_mode)
            .context("Failed to initialize input engine")?;

        Ok(Self {
            mapping_blocked: config.keyboard_mapping_blocked,
            config,
            binds,
            window: None,
            driver,
            collector: InputCollector::new(),
            display: FixedDisplay::without_viewport(1.0),
            last_mask: 0,
        })
    }

    fn sync_display(&mut self, window: &Window) {
        let size = window.inner_size();
        let scale_factor = window.scale_factor() as f32;
        self.display = FixedDisplay::new(scale_factor, Viewport::full(size.width, size.height));
        self.collector.set_scale_factor(scale_factor);
    }

    /// One frame: poll, read back every device class, then reset accumulators
    fn frame(&mut self) {
        self.driver.poll(&self.display);

        let backends = Backends::default().with_info(self.config.joypad_info(0));
        let ctx = QueryContext::new(backends, &self.binds, &self.display)
            .with_mapping_blocked(self.mapping_blocked);
        let driver = &mut self.driver;
        let mut read = |device: Device, index: u32, id: u32| {
            driver.query(&ctx, 0, device.raw(), index, id)
        };

        let mask = read(Device::Joypad, 0, joypad::MASK);
        if mask != self.last_mask {
            info!(
                port = 0,
                mask = %format!("{:#06x}", mask as u16),
                "Joypad buttons changed"
            );
            self.last_mask = mask;
        }

        let (dx, dy) = (read(Device::Mouse, 0, mouse_id::X), read(Device::Mouse, 0, mouse_id::Y));
        if dx != 0 || dy != 0 {
            let x = read(Device::MouseScreen, 0, mouse_id::X);
            let y = read(Device::MouseScreen, 0, mouse_id::Y);
            debug!(dx, dy, x, y, "Mouse moved");
        }

        let (up, down) = (
            read(Device::Mouse, 0, mouse_id::WHEELUP),
            read(Device::Mouse, 0, mouse_id::WHEELDOWN),
        );
        if up != 0 || down != 0 {
            debug!(up, down, "Mouse wheel");
        }

        let count = read(Device::Pointer, 0, pointer::COUNT);
        for index in 0..count.max(0) as u32 {
            debug!(
                index,
                x = read(Device::Pointer, index, pointer::X),
                y = read(Device::Pointer, index, pointer::Y),
                screen_x = read(Device::PointerScreen, index, pointer::X),
                screen_y = read(Device::PointerScreen, index, pointer::Y),
                pressed = read(Device::Pointer, index, pointer::PRESSED),
                "Touch"
            );
        }

        if let Some(engine) = self.driver.engine_mut() {
            self.collector.end_frame(engine);
        }
    }
}

impl ApplicationHandler for Probe {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Input Probe")
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );
                self.sync_display(&window);
                self.window = Some(window);
            }
            Err(e) => {
                warn!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Feed raw events to the engine before anything else looks at them
        if let Some(engine) = self.driver.engine_mut() {
            self.collector.handle_window_event(&event, engine);
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                self.driver.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.display.viewport = Some(Viewport::full(size.width, size.height));
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.display.scale_factor = scale_factor as f32;
            }
            // F1 toggles game focus
            WindowEvent::KeyboardInput { event, .. }
                if event.state.is_pressed()
                    && !event.repeat
                    && event.physical_key == PhysicalKey::Code(KeyCode::F1) =>
            {
                self.mapping_blocked = !self.mapping_blocked;
                info!(blocked = self.mapping_blocked, "Keyboard mapping toggled");
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.health {
        let report = health::run_all_checks();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    let loaded = match &args.profile {
        Some(profile) => EngineConfig::load(profile),
        None => EngineConfig::load_from_env(),
    };
    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using default configuration");
        EngineConfig::default()
    });
    let binds = config
        .binding_table()
        .context("Invalid port bindings in configuration")?;

    let mut probe = Probe::new(config, binds)?;

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut probe)
        .context("Event loop terminated with an error")?;

    Ok(())
}
