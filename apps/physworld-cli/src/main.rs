use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use physworld_input::{Action, ControlPanel};
use physworld_kernel::{ScenarioDescriptor, World, WorldConfig, WorldEvent};
use physworld_render::{DebugTextRenderer, RenderView, Renderer, SceneSync};
use physworld_scenario::{interpret, offline_examples, presets};
use physworld_tools::{FrameTimer, WorldInspector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "physworld-cli", about = "Headless host for physworld scenarios")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List the environment presets
    Presets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the offline example scenarios
    Examples,
    /// Run a scenario through a simulated render loop
    Run {
        /// Natural-language scenario, e.g. "rocket launch on mars"
        prompt: Option<String>,
        /// Read the scenario descriptor from a JSON file instead
        #[arg(short, long, conflicts_with_all = ["prompt", "example"])]
        file: Option<PathBuf>,
        /// Run an offline example by (case-insensitive) name
        #[arg(short, long, conflicts_with = "prompt")]
        example: Option<String>,
        /// World config overrides as a JSON file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Simulated seconds to run
        #[arg(short, long, default_value = "5")]
        seconds: f32,
        /// Host frame rate
        #[arg(long, default_value = "60")]
        fps: f32,
        /// Move the gravity slider to this value mid-run
        #[arg(long)]
        gravity: Option<f32>,
        /// Move the wind slider to this value mid-run
        #[arg(long)]
        wind: Option<f32>,
        /// Press a preset button mid-run
        #[arg(long)]
        preset: Option<String>,
        /// Print a frame every N frames (0 = only the last)
        #[arg(long, default_value = "30")]
        print_every: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            println!("physworld-cli v{}", env!("CARGO_PKG_VERSION"));
            let config = WorldConfig::default();
            println!(
                "kernel: fixed_dt={:.5}s max_frame_delta={}s max_substeps={}",
                config.fixed_dt, config.max_frame_delta, config.max_substeps
            );
            println!("scenario: {}", physworld_scenario::crate_info());
            println!("render: {}", physworld_render::crate_info());
            println!("input: {}", physworld_input::crate_info());
            println!("tools: {}", physworld_tools::crate_info());
        }
        Commands::Presets { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(presets())?);
            } else {
                for p in presets() {
                    println!(
                        "{:<8} gravity={:>6.2} m/s² wind={:>5.1} m/s temperature={:>6.1} °C",
                        p.name, p.gravity, p.wind, p.temperature
                    );
                }
            }
        }
        Commands::Examples => {
            for ex in offline_examples() {
                println!("{}: \"{}\"", ex.name, ex.prompt);
            }
        }
        Commands::Run {
            prompt,
            file,
            example,
            config,
            seconds,
            fps,
            gravity,
            wind,
            preset,
            print_every,
        } => {
            let descriptor = load_descriptor(prompt, file, example)?;
            let config = match config {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    serde_json::from_str(&text)
                        .with_context(|| format!("parsing {}", path.display()))?
                }
                None => WorldConfig::default(),
            };
            let mut actions = Vec::new();
            if let Some(name) = preset {
                actions.push(Action::ApplyPreset(name));
            }
            if let Some(g) = gravity {
                actions.push(Action::SetGravity(g));
            }
            if let Some(w) = wind {
                actions.push(Action::SetWind(w));
            }
            run(&descriptor, config, seconds, fps, actions, print_every)?;
        }
    }

    Ok(())
}

fn load_descriptor(
    prompt: Option<String>,
    file: Option<PathBuf>,
    example: Option<String>,
) -> anyhow::Result<ScenarioDescriptor> {
    if let Some(path) = file {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        return Ok(ScenarioDescriptor::from_json(&text)?);
    }
    if let Some(name) = example {
        return offline_examples()
            .into_iter()
            .find(|ex| ex.name.eq_ignore_ascii_case(&name))
            .map(|ex| ex.descriptor)
            .with_context(|| format!("no offline example named {name:?}"));
    }
    match prompt {
        Some(prompt) => {
            let interpretation = interpret(&prompt);
            println!(
                "Interpreted: gravity={} wind={} temperature={}°C objects={}",
                interpretation.descriptor.gravity,
                interpretation.descriptor.wind,
                interpretation.temperature,
                interpretation.descriptor.objects.len()
            );
            Ok(interpretation.descriptor)
        }
        None => bail!("give a prompt, --file or --example"),
    }
}

/// Frame on which queued UI actions fire: halfway through, but never
/// before the first frame.
fn action_frame(frames: u64) -> u64 {
    (frames / 2).max(1)
}

/// Drive the world the way a render loop would: one `step` and one
/// snapshot per frame, slider actions halfway through.
fn run(
    descriptor: &ScenarioDescriptor,
    config: WorldConfig,
    seconds: f32,
    fps: f32,
    actions: Vec<Action>,
    print_every: u64,
) -> anyhow::Result<()> {
    if !(fps.is_finite() && fps > 0.0) {
        bail!("fps must be positive, got {fps}");
    }
    let frame_dt = 1.0 / fps;
    let frames = (seconds.max(0.0) * fps).round() as u64;

    let mut world = World::build_with_config(descriptor, config)?;
    let mut scene = SceneSync::new(descriptor.objects.iter().map(|o| o.kind));
    let mut panel = ControlPanel::new(world.control_handle()?, descriptor.gravity, descriptor.wind);
    let mut timer = FrameTimer::new(120).with_budget(Duration::from_millis(4));
    let view = RenderView::default();
    let mut actions = Some(actions);
    let action_at = action_frame(frames);

    println!(
        "Running {:?}: {} bodies, {frames} frames at {fps} fps",
        descriptor.scenario,
        descriptor.objects.len()
    );

    for frame in 1..=frames {
        if frame == action_at {
            for action in actions.take().unwrap_or_default() {
                println!("UI: {action:?}");
                panel.dispatch(action)?;
            }
        }

        let started = Instant::now();
        let report = world.step(frame_dt)?;
        timer.record(started.elapsed());
        if !report.frozen.is_empty() {
            tracing::warn!(frozen = ?report.frozen, "bodies frozen this frame");
        }

        scene.apply(&world.snapshot()?)?;

        for event in world.drain_events()? {
            match event {
                WorldEvent::Impact { id, speed } => {
                    tracing::info!(%id, speed, "impact");
                }
                WorldEvent::GravityChanged { new, .. } => tracing::info!(gravity = new, "gravity changed"),
                WorldEvent::WindChanged { new, .. } => tracing::info!(wind = new, "wind changed"),
                other => tracing::debug!(?other, "world event"),
            }
        }

        let last = frame == frames;
        if last || (print_every > 0 && frame % print_every == 0) {
            let renderer =
                DebugTextRenderer::with_caption(format!("t={:.2}s", world.sim_time()?));
            print!("{}", renderer.render(&world.snapshot()?, &view));
        }
    }

    println!("{}", WorldInspector::summary(&world)?);
    for id in WorldInspector::list_bodies(&world)? {
        println!("  {}", WorldInspector::inspect_body(&world, id)?);
    }
    println!(
        "Step time: avg={:?} max={:?} over_budget={} (scene frames={})",
        timer.average(),
        timer.max(),
        timer.over_budget(),
        scene.frames()
    );

    world.teardown();
    Ok(())
}
