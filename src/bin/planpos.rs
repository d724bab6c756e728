//! Planetary Position Table Tool
//!
//! Prints geocentric ecliptic positions of the Sun, Moon and planets for a
//! given date and time.
//!
//! Usage:
//!   cargo run --bin planpos -- [--mean] [--true-node] [2003-08-27T18:00:00]

use clap::{ArgAction, Parser};

use orrery::calendar::{format_date, julian_date_from_utc};
use orrery::coordinates::ecliptic_to_equatorial;
use orrery::EphemerisContext;

/// Planetary Position Table Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prints geocentric positions of the Sun, Moon and planets",
    long_about = None
)]
struct Args {
    /// Report mean (geometric) places instead of apparent ones
    #[arg(short, long, action = ArgAction::SetTrue)]
    mean: bool,

    /// Report the true lunar node instead of the mean node
    #[arg(short, long, action = ArgAction::SetTrue)]
    true_node: bool,

    /// UTC date and time, RFC 3339 (defaults to now)
    datetime: Option<String>,
}

fn main() {
    let args = Args::parse();

    let utc = match &args.datetime {
        Some(s) => match s.parse::<chrono::DateTime<chrono::Utc>>() {
            Ok(dt) => dt,
            Err(e) => {
                eprintln!("Cannot parse {s:?} as an RFC 3339 timestamp: {e}");
                std::process::exit(1);
            }
        },
        None => chrono::Utc::now(),
    };
    let jd = julian_date_from_utc(&utc);

    let ctx = EphemerisContext::new(jd, !args.mean, args.true_node);
    println!(
        "{} (JD {:.5}), {} places",
        format_date(jd),
        jd,
        if args.mean { "mean" } else { "apparent" }
    );
    println!(
        "{:<12} {:>12} {:>10} {:>12} {:>12} {:>10}",
        "Body", "Longitude", "Latitude", "Distance AU", "Motion °/d", "RA"
    );

    let names = [
        "Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
        "Pluto", "Node",
    ];
    for name in names {
        match (ctx.position(name), ctx.daily_motion(name)) {
            (Ok(pos), Ok(motion)) => {
                let eq = ecliptic_to_equatorial(pos.lambda, pos.beta, ctx.obliquity());
                println!(
                    "{:<12} {:>12.5} {:>10.5} {:>12.6} {:>12.6} {:>10.4}",
                    name, pos.lambda, pos.beta, pos.delta, motion, eq.ra
                );
            }
            (Err(e), _) | (_, Err(e)) => eprintln!("{name}: {e}"),
        }
    }
}
