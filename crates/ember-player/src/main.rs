//! Ember player - smoke-test binary for the frame loop
//!
//! Opens a window and spins a three-node transform chain through the full
//! stack: clock, fixed updates, input edges, scene graph. Escape exits,
//! Space toggles pause.

use anyhow::Result;
use clap::Parser;
use ember_app::{run, AppConfig, AppContext, EmberApp, KeyCode, Vec3};
use ember_scene::{NodeId, SceneGraph};

#[derive(Parser)]
#[command(name = "ember-player")]
#[command(about = "Run the Ember frame loop with a demo transform chain", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file; flags below override its values
    #[arg(long)]
    config: Option<String>,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Launch in borderless fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Fixed-update rate in Hz (0 disables fixed updates)
    #[arg(long)]
    fixed_hz: Option<f64>,
}

/// Root spins at a fixed rate; the arm and tip ride along the hierarchy.
struct SpinDemo {
    scene: SceneGraph,
    root: NodeId,
    tip: NodeId,
    angle: f32,
    paused: bool,
    frames: u64,
}

impl SpinDemo {
    fn new() -> Self {
        let mut scene = SceneGraph::new();
        let root = scene.spawn("root");
        let arm = scene.spawn("arm");
        let tip = scene.spawn("tip");
        scene.set_parent(arm, Some(root)).expect("fresh nodes");
        scene.set_parent(tip, Some(arm)).expect("fresh nodes");
        scene.set_position(arm, Vec3::new(2.0, 0.0, 0.0));
        scene.set_position(tip, Vec3::new(0.0, 1.0, 0.0));

        Self {
            scene,
            root,
            tip,
            angle: 0.0,
            paused: false,
            frames: 0,
        }
    }
}

impl EmberApp for SpinDemo {
    fn on_start(&mut self, _ctx: &mut AppContext) {
        log::info!("scene ready: {} nodes", self.scene.len());
    }

    fn on_fixed_update(&mut self, _ctx: &mut AppContext, dt: f64) {
        // 90 degrees per second around the up axis
        self.angle = (self.angle + 90.0 * dt as f32) % 360.0;
        self.scene.set_rotation(self.root, Vec3::UP * self.angle);
    }

    fn on_update(&mut self, ctx: &mut AppContext, _dt: f64) {
        if ctx.input.is_pressed(KeyCode::Escape) {
            ctx.request_exit();
        }
        if ctx.input.is_pressed(KeyCode::Space) {
            self.paused = !self.paused;
            ctx.set_time_scale(if self.paused { 0.0 } else { 1.0 });
            log::info!("{}", if self.paused { "paused" } else { "resumed" });
        }
    }

    fn on_render(&mut self, _ctx: &mut AppContext) {
        // No render backend; report the chain tip once a second at 60fps
        self.frames += 1;
        if self.frames % 60 == 0 {
            let world = self.scene.world_matrix(self.tip);
            log::debug!(
                "tip at ({:.2}, {:.2}, {:.2})",
                world[3][0],
                world[3][1],
                world[3][2]
            );
        }
    }

    fn on_close(&mut self, ctx: &mut AppContext) {
        log::info!(
            "closing after {} frames, {:.1}s",
            self.frames,
            ctx.clock.total_time
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::new().with_title("Ember Player"),
    };
    if let Some(title) = cli.title {
        config = config.with_title(&title);
    }
    if let (Some(width), Some(height)) = (cli.width, cli.height) {
        config = config.with_size(width, height);
    }
    if cli.fullscreen {
        config = config.with_fullscreen(true);
    }
    if let Some(hz) = cli.fixed_hz {
        config = config.with_fixed_hz(hz);
    }

    let code = run(config, SpinDemo::new())?;
    std::process::exit(code);
}
