//! Command-line host for the rover simulator.
//!
//! # Usage
//!
//! ```bash
//! # Run a mission file and print the final rover positions
//! mars-rover mission.txt
//!
//! # Read the mission from stdin, animate each step over 4 ticks, print JSON
//! cat mission.txt | mars-rover --frames 4 --json
//!
//! # Drive rovers by hand: one key name per token (n, l, m, r, ArrowUp, ...)
//! mars-rover --interactive --size "5 5"
//! ```

use std::fs;
use std::io::{self, BufRead, Read};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use mars_rover::error::Result;
use mars_rover::{Coordinate, MissionPlan, Plateau, PlateauConfig};

#[derive(Parser, Debug)]
#[command(name = "mars-rover", about = "Simulate rovers on a Martian plateau")]
struct Args {
    /// Mission file; reads stdin when omitted.
    mission: Option<PathBuf>,

    /// JSON plateau configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ticks each turn or move is spread over.
    #[arg(long, value_name = "N")]
    frames: Option<u32>,

    /// Rendering scale reported in snapshots.
    #[arg(long, value_name = "S")]
    scale: Option<f64>,

    /// Print the final plateau snapshot as JSON instead of rover labels.
    #[arg(long)]
    json: bool,

    /// Read key names from stdin and drive the active rover.
    #[arg(long)]
    interactive: bool,

    /// Plateau size for interactive mode, as "X Y".
    #[arg(long, value_name = "\"X Y\"", default_value = "5 5")]
    size: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PlateauConfig::from_json(&fs::read_to_string(path)?)?,
        None => PlateauConfig::default(),
    };
    if let Some(frames) = args.frames {
        config.frames_per_step = frames;
    }
    if let Some(scale) = args.scale {
        config.scale = scale;
    }

    if args.interactive {
        return run_interactive(&args, config);
    }

    let text = match &args.mission {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut plateau = Plateau::with_config(Coordinate::ORIGIN, config);
    plateau.execute(&text)?;
    print_plateau(&plateau, args.json)
}

fn run_interactive(args: &Args, config: PlateauConfig) -> Result<()> {
    // Reuse the mission parser so the size line follows the same rules.
    let size = args.size.parse::<MissionPlan>()?.size;
    let mut plateau = Plateau::with_config(size, config);
    info!("interactive mode on a {} plateau", size);

    for line in io::stdin().lock().lines() {
        for key in line?.split_whitespace() {
            if let Err(e) = plateau.handle_key(key) {
                eprintln!("{}", e);
            }
            if let Some(rover) = plateau.active_rover() {
                println!("{}", rover);
            }
        }
    }
    if args.json {
        print_plateau(&plateau, true)?;
    }
    Ok(())
}

fn print_plateau(plateau: &Plateau, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&plateau.snapshot())?);
    } else {
        for rover in plateau.rovers() {
            println!("{}", rover);
        }
    }
    Ok(())
}
