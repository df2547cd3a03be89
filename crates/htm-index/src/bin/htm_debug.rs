//! Console debug harness: drives `htm-index` against a polygon
//! typed on the command line and prints tab-separated `lo<TAB>hi<TAB>full`
//! rows to stdout, bypassing the host database integration entirely.
//!
//! Argument parsing is hand-rolled rather than built on a CLI framework —
//! `geo`/`geo-types` carry no such dependency, and this harness is the one
//! place in the crate that would otherwise need one.

use std::env;
use std::process::ExitCode;

use geo_types::{Coord, Geometry, LineString, Polygon};
use htm_types::{CartesianPoint, HtmId};

use htm_index::{geom_to_htm_chull, htm_index_create, SeedMode};

struct Args {
    query: String,
    max_level: u8,
    seed_level: u8,
    epsilon: f64,
    seed_only: bool,
    chull_only: bool,
    hull_dump_path: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_level: 10,
            seed_level: htm_index::DEFAULT_SEED_LEVEL,
            epsilon: 1e-10,
            seed_only: false,
            chull_only: false,
            hull_dump_path: None,
        }
    }
}

fn usage() -> String {
    "usage: htm_debug --query <lon,lat;lon,lat;...> [--max-level N] [--seed-level N] \
     [--epsilon F] [--seed-only] [--chull-only] [--dump-hull PATH]"
        .to_string()
}

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut args = Args::default();
    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "--query" => {
                i += 1;
                args.query = argv.get(i).ok_or("--query needs a value")?.clone();
            }
            "--max-level" => {
                i += 1;
                args.max_level = argv
                    .get(i)
                    .ok_or("--max-level needs a value")?
                    .parse()
                    .map_err(|_| "--max-level must be an integer")?;
            }
            "--seed-level" => {
                i += 1;
                args.seed_level = argv
                    .get(i)
                    .ok_or("--seed-level needs a value")?
                    .parse()
                    .map_err(|_| "--seed-level must be an integer")?;
            }
            "--epsilon" => {
                i += 1;
                args.epsilon = argv
                    .get(i)
                    .ok_or("--epsilon needs a value")?
                    .parse()
                    .map_err(|_| "--epsilon must be a float")?;
            }
            "--seed-only" => args.seed_only = true,
            "--chull-only" => args.chull_only = true,
            "--dump-hull" => {
                i += 1;
                args.hull_dump_path = Some(argv.get(i).ok_or("--dump-hull needs a path")?.clone());
            }
            other => return Err(format!("unrecognized argument: {other}")),
        }
        i += 1;
    }
    if args.query.is_empty() {
        return Err("--query is required".to_string());
    }
    Ok(args)
}

/// Parses the harness's simplified polygon notation: `lon,lat;lon,lat;...`,
/// an unclosed ring in WGS-84 degrees. Not WKT — no WKT-parsing crate is
/// part of this workspace's dependency stack.
fn parse_query(query: &str) -> Result<Geometry<f64>, String> {
    let mut coords = Vec::new();
    for pair in query.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (lon, lat) = pair
            .split_once(',')
            .ok_or_else(|| format!("malformed vertex: {pair}"))?;
        let lon: f64 = lon.trim().parse().map_err(|_| format!("bad longitude: {lon}"))?;
        let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude: {lat}"))?;
        coords.push(Coord { x: lon, y: lat });
    }
    if coords.len() < 3 {
        return Err("a polygon needs at least 3 vertices".to_string());
    }
    if coords.first() != coords.last() {
        coords.push(coords[0]);
    }
    Ok(Polygon::new(LineString::new(coords), Vec::new()).into())
}

fn dump_hull(path: &str, vertices: &[CartesianPoint]) -> std::io::Result<()> {
    use std::io::Write;
    let mut f = std::fs::File::create(path)?;
    for v in vertices {
        writeln!(f, "{}\t{}", v.ra_deg(), v.dec_deg())?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), String> {
    let geom = parse_query(&args.query)?;

    if let Some(path) = &args.hull_dump_path {
        let vertices = htm_index::vertices_of(&geom).map_err(|e| e.to_string())?;
        dump_hull(path, &vertices).map_err(|e| e.to_string())?;
    }

    if args.chull_only {
        let ranges = geom_to_htm_chull(&geom, args.max_level).map_err(|e| e.to_string())?;
        for (lo, hi) in ranges {
            println!("{}\t{}", lo.0, hi.0);
        }
        return Ok(());
    }

    if args.seed_only {
        let vertices = htm_index::vertices_of(&geom).map_err(|e| e.to_string())?;
        let seed_level = htm_index::coerce_seed_level(args.seed_level, htm_index::DEFAULT_SEED_LEVEL);
        let ids = htm_index::seed_trixels(&SeedMode::ConvexHullFromVertices(vertices), seed_level)
            .map_err(|e| e.to_string())?;
        for id in ids {
            let (lo, hi) = id.extend(HtmId::MAX_LEVEL);
            println!("{}\t{}\t{}", lo.0, hi.0, false);
        }
        return Ok(());
    }

    let rows = htm_index_create(
        &geom,
        args.max_level,
        args.epsilon,
        args.seed_level,
        false,
    )
    .map_err(|e| e.to_string())?;
    for row in rows {
        println!("{}\t{}\t{}", row.lo.0, row.hi.0, row.full);
    }
    Ok(())
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n{}", usage());
            return ExitCode::FAILURE;
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
