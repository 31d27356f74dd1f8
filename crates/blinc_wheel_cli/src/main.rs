//! Blinc Wheel CLI
//!
//! Inspect wheel geometry and replay scripted gestures against the picker
//! engine, printing every committed frame.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod render;
mod script;

use blinc_wheel::{Geometry, SegmentTable, WheelPicker};
use config::WheelFile;
use render::TextRenderer;
use script::{parse_script, Simulation};

#[derive(Parser)]
#[command(name = "blinc-wheel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Blinc wheel picker simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ring geometry for a configuration
    Geometry {
        /// Item slots around the full ring
        #[arg(long, default_value = "20")]
        visible_count: u32,

        /// Height of one item in pixels
        #[arg(long, default_value = "36")]
        item_height: f32,
    },

    /// Replay a gesture script against a picker
    Simulate {
        /// Wheel config file (wheel.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Comma-separated option values, replacing any from the config
        #[arg(short, long)]
        options: Option<String>,

        /// Loop the option list
        #[arg(long)]
        infinite: bool,

        /// Steps: wheel:+1, drag:<dy>:<ms>, tap:<y>, wait:<ms>, set:<value>
        #[arg(short, long)]
        script: String,

        /// Frame rate of the virtual clock
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Only print the frame each step settles on
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Geometry {
            visible_count,
            item_height,
        } => cmd_geometry(visible_count, item_height),

        Commands::Simulate {
            config,
            options,
            infinite,
            script,
            fps,
            quiet,
        } => cmd_simulate(
            config.as_deref(),
            options.as_deref(),
            infinite,
            &script,
            fps,
            quiet,
        ),
    }
}

fn cmd_geometry(visible_count: u32, item_height: f32) -> Result<()> {
    let config = blinc_wheel::WheelConfig::default()
        .visible_count(visible_count)
        .item_height(item_height);
    config.validate().context("Invalid wheel geometry")?;

    let geometry = Geometry::from_config(&config);
    println!("Wheel geometry");
    println!("==============");
    println!("Visible count:    {}", geometry.visible_count);
    println!("Item height:      {:.2}px", geometry.item_height);
    println!("Item angle:       {:.3}deg", geometry.item_angle);
    println!("Radius:           {:.3}px", geometry.radius);
    println!("Container height: {:.0}px", geometry.container_height);
    println!("Quarter count:    {}", geometry.quarter_count);
    println!("Min loop length:  {}", geometry.min_loop_len());
    println!();
    println!("Tap segments:");
    for segment in SegmentTable::new(&geometry).segments() {
        println!(
            "  {:>2}  {:>7.2} .. {:>7.2}  step {:+}",
            segment.index,
            segment.start,
            segment.end,
            segment.step()
        );
    }

    Ok(())
}

fn cmd_simulate(
    config_path: Option<&std::path::Path>,
    options: Option<&str>,
    infinite: bool,
    script: &str,
    fps: u32,
    quiet: bool,
) -> Result<()> {
    let mut file = match config_path {
        Some(path) => WheelFile::load(path)?,
        None => WheelFile::default(),
    };
    if let Some(csv) = options {
        file.set_options_csv(csv);
    }
    if infinite {
        file.picker.infinite = true;
    }
    if file.options.is_empty() {
        anyhow::bail!("No options given. Pass --options or a config with [[options]].");
    }

    let steps = parse_script(script)?;
    let mut picker = WheelPicker::try_new(file.wheel_options(), file.picker)
        .context("Invalid picker configuration")?;
    if let Some(initial) = &file.initial {
        picker = picker.with_model_value(initial.clone());
    }

    let labels = picker
        .working_list()
        .iter()
        .map(|option| option.label.clone())
        .collect();
    let mut renderer = TextRenderer::new(labels, file.picker.item_height);

    info!(
        "Simulating {} steps over {} options ({} working, {})",
        steps.len(),
        picker.options().len(),
        picker.working_list().len(),
        if file.picker.infinite { "looping" } else { "bounded" }
    );

    let mut sim = Simulation::new(picker, fps);
    sim.commit(&mut renderer);
    print_frames(&mut renderer, quiet);
    for change in sim.take_changes() {
        println!("change: {}", change);
    }

    let start = sim.now();
    for (n, step) in steps.iter().enumerate() {
        println!("--- step {}: {:?}", n + 1, step);
        sim.run(step, &mut renderer)?;
        print_frames(&mut renderer, quiet);
        for change in sim.take_changes() {
            println!("change: {}", change);
        }
    }

    let picker = sim.picker();
    println!(
        "Settled on {} (index {:?}) after {:?}",
        picker
            .selected_value()
            .map(String::as_str)
            .unwrap_or("<none>"),
        picker.selected_index(),
        sim.elapsed_since(start)
    );

    Ok(())
}

fn print_frames(renderer: &mut TextRenderer, quiet: bool) {
    let frames = renderer.drain();
    let shown = if quiet {
        frames.last().into_iter().collect::<Vec<_>>()
    } else {
        frames.iter().collect()
    };
    for frame in shown {
        print!("{}", frame);
    }
}
