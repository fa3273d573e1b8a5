use std::path::PathBuf;

use carquest_input::Control;
use carquest_kernel::{Session, SessionConfig, SessionEvent};
use carquest_render::{DebugTextRenderer, RenderView, Renderer, Scene};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carquest-cli", about = "Headless driver for the carquest demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Session config (YAML); defaults are used for anything missing
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the terrain seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the heightfield resolution
    #[arg(long, global = true)]
    resolution: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Steer {
    Left,
    Right,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate terrain and print heightfield statistics
    Terrain {
        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run a scripted drive and print the final frame
    Drive {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "300")]
        ticks: u64,
        /// Hold the accelerator the whole drive
        #[arg(long)]
        throttle: bool,
        /// Hold a steering direction the whole drive
        #[arg(long, value_enum)]
        steer: Option<Steer>,
        /// Start braking (and release the throttle) at this frame
        #[arg(long)]
        brake_after: Option<u64>,
        /// Extra controls to hold, by name (e.g. `backward`, `toggle_camera_mode`)
        #[arg(long)]
        hold: Vec<Control>,
        /// Print a JSON summary instead of the rendered frame
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Info => {
            println!("carquest-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", carquest_common::crate_info());
            println!("terrain: {}", carquest_terrain::crate_info());
            println!("vehicle: {}", carquest_vehicle::crate_info());
            println!("camera: {}", carquest_camera::crate_info());
            println!("input: {}", carquest_input::crate_info());
            println!("kernel: {}", carquest_kernel::crate_info());
            println!("render: {}", carquest_render::crate_info());
        }
        Commands::Terrain { json } => {
            let session = Session::new(config)?;
            let field = session.heightfield();
            if json {
                let summary = serde_json::json!({
                    "seed": session.config().seed,
                    "resolution": field.resolution(),
                    "size": field.size(),
                    "element_size": field.element_size(),
                    "min_height": field.min_height(),
                    "max_height": field.max_height(),
                    "mean_height": field.mean_height(),
                    "display_scale": session.sampler().display_scale(),
                    "ramps": session.ramps(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "Terrain: seed={}, resolution={}, size={}, element_size={:.3}",
                    session.config().seed,
                    field.resolution(),
                    field.size(),
                    field.element_size()
                );
                println!(
                    "Heights: min={:.3}, max={:.3}, mean={:.3} (display scale {})",
                    field.min_height(),
                    field.max_height(),
                    field.mean_height(),
                    session.sampler().display_scale()
                );
                println!("Ramps: {}", session.ramps().len());
            }
        }
        Commands::Drive {
            ticks,
            throttle,
            steer,
            brake_after,
            hold,
            json,
        } => {
            let mut session = Session::new(config)?;
            let mut scene = Scene::from_session(&session);
            let fov = session.config().camera.fov_degrees;

            let last = {
                let mut attached = session.attach();
                attached.control(Control::Forward, throttle);
                match steer {
                    Some(Steer::Left) => attached.control(Control::TurnLeft, true),
                    Some(Steer::Right) => attached.control(Control::TurnRight, true),
                    None => {}
                }
                for control in hold {
                    attached.control(control, true);
                }

                let mut last = None;
                for tick in 0..ticks {
                    if brake_after == Some(tick) {
                        attached.control(Control::Forward, false);
                        attached.control(Control::Brake, true);
                    }
                    let frame = attached.frame();
                    scene.sync(&frame);
                    last = Some(frame);
                }
                last
            };

            let landings = session
                .events()
                .iter()
                .filter(|e| matches!(e, SessionEvent::Landed { .. }))
                .count();

            if json {
                let pose = session.pose();
                let summary = serde_json::json!({
                    "seed": session.config().seed,
                    "ticks": session.tick(),
                    "position": [pose.position.x, pose.position.y, pose.position.z],
                    "heading": pose.heading,
                    "speed": pose.speed(),
                    "grounded": session.vehicle().is_grounded(),
                    "braking": session.vehicle().is_braking(),
                    "camera_mode": session.camera_mode(),
                    "landings": landings,
                    "state_hash": format!("{:#018x}", session.state_hash()),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let view = last
                    .map(|frame| RenderView::from_frame(&frame, fov))
                    .unwrap_or_default();
                print!("{}", DebugTextRenderer::new().render(&scene, &view));
                println!(
                    "Drive: ticks={}, speed={:.3}, landings={}, hash={:#x}",
                    session.tick(),
                    session.pose().speed(),
                    landings,
                    session.state_hash()
                );
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_yaml_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(resolution) = cli.resolution {
        config.resolution = resolution;
    }
    Ok(config)
}
