use anyhow::Result;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{ffi::CString, num::NonZeroU32, process, ptr};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use fanmesh::{
    config::{AppConfig, DEFAULT_CONFIG_PATH},
    render::{
        display::{catch_display_panic, highest_sample_count, NO_GL_CONFIG},
        FanMesh, FramePipeline, GlFunctions, ShaderProgram, ShaderSource,
    },
    InitError,
};

struct App {
    // Surface and context go before the window they were created from.
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl App {
    fn new(config: &AppConfig) -> Result<(Self, EventLoop<()>, GlFunctions), InitError> {
        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .with_resizable(false);

        let template = ConfigTemplateBuilder::new();
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = catch_display_panic(|| {
            display_builder.build(&event_loop, template, |configs| {
                highest_sample_count(configs, |config| config.num_samples())
                    .unwrap_or_else(|| panic!("{}", NO_GL_CONFIG))
            })
        })?
        .map_err(|e| InitError::Display(e.to_string()))?;

        let window =
            window.ok_or_else(|| InitError::Display("no window was created".to_string()))?;
        let raw_window_handle = window.raw_window_handle();

        let (major, minor) = config.rendering.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };
        let gl_context = not_current.make_current(&gl_surface)?;

        if config.rendering.vsync {
            if let Err(e) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                warn!("Failed to enable vsync: {}", e);
            }
        }

        // The context is current on this thread for the rest of the program.
        let gl = unsafe {
            GlFunctions::load_with(|symbol| match CString::new(symbol) {
                Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()),
                Err(_) => ptr::null(),
            })
        };

        Ok((
            Self {
                gl_surface,
                gl_context,
                window,
            },
            event_loop,
            gl,
        ))
    }

    fn resize(&self, pipeline: &FramePipeline<'_, GlFunctions>, size: PhysicalSize<u32>) {
        // Minimized windows report a zero size.
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.gl_surface.resize(&self.gl_context, width, height);
            pipeline.resize(size.width, size.height);
        }
    }

    fn present(&self) -> Result<(), glutin::error::Error> {
        self.gl_surface.swap_buffers(&self.gl_context)
    }
}

fn run() -> Result<()> {
    let config = AppConfig::load(DEFAULT_CONFIG_PATH);
    let level = config
        .as_ref()
        .map(AppConfig::log_level)
        .unwrap_or(LevelFilter::Info);
    SimpleLogger::new().with_level(level).init()?;
    let config = config?;

    info!("Initializing application...");
    let (app, event_loop, gl) = App::new(&config)?;

    if !gl.function_table_loaded() {
        error!("Failed to load the OpenGL function table");
    }
    match gl.version() {
        Some(version) => info!("OpenGL {}", version),
        None => warn!("OpenGL version string unavailable"),
    }

    let mesh = FanMesh::upload(&gl);

    let source = ShaderSource::from_file(&config.rendering.shader_path).unwrap_or_else(|e| {
        error!("Failed to parse {}: {}", config.rendering.shader_path, e);
        ShaderSource::default()
    });
    let program = ShaderProgram::create(&gl, source);
    let pipeline = FramePipeline::new(&gl, program, mesh, config.rendering.clear_color);

    event_loop.run(|event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(&pipeline, size),
            WindowEvent::RedrawRequested => {
                pipeline.draw_frame();
                if let Err(e) = app.present() {
                    error!("Failed to swap buffers: {}", e);
                    elwt.exit();
                }
            }
            _ => (),
        },
        Event::AboutToWait => app.window.request_redraw(),
        _ => (),
    })?;

    // Release the program and mesh while the context is still alive.
    drop(pipeline);
    info!("Shutting down");

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        process::exit(-1);
    }
}
