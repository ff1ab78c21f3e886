use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use lattice_vortex::renderer::TerminalRenderer;
use lattice_vortex::{EngineError, Simulation, config};

/// Log diagnostics every this many frames.
const DIAGNOSTIC_INTERVAL: u64 = 50;

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<PathBuf>,
    frames: Option<u64>,
}

/// Parse `--config <path>` and `--frames <n>`; unknown arguments are ignored.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                let path = it.next().ok_or("--config requires a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--frames" => {
                let n = it.next().ok_or("--frames requires a number")?;
                let n = n.parse().map_err(|e| format!("invalid --frames value {n:?}: {e}"))?;
                parsed.frames = Some(n);
            }
            other => log::debug!("ignoring argument {other:?}"),
        }
    }
    Ok(parsed)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    let cfg = match &args.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    let frames = args.frames.unwrap_or(cfg.display.frames);

    let mut sim = match Simulation::with_params(cfg.lattice.x_dim, cfg.lattice.y_dim, cfg.physics.sim_params()) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("cannot build simulation: {e}");
            std::process::exit(1);
        }
    };
    if let Some(obstacle) = cfg.obstacle.obstacle(sim.x_dim(), sim.y_dim()) {
        obstacle.apply(&mut sim);
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || r.store(false, Ordering::SeqCst)) {
        log::warn!("could not install Ctrl+C handler: {e}");
    }

    let mut renderer = TerminalRenderer::new(cfg.display.contrast, cfg.display.colormap);
    let frame_interval = Duration::from_millis(cfg.display.frame_interval_ms);

    // Terminal setup
    let stdout = std::io::stdout();
    let mut out = BufWriter::with_capacity(1024 * 1024, stdout.lock());
    let _ = write!(out, "\x1b[?1049h"); // alternate screen
    let _ = write!(out, "\x1b[?25l"); // hide cursor
    let _ = write!(out, "\x1b[2J"); // clear screen
    let _ = out.flush();

    let mut frame = 0u64;
    while running.load(Ordering::SeqCst) && (frames == 0 || frame < frames) {
        let frame_start = Instant::now();

        match sim.simulate() {
            Ok(()) => {}
            Err(e @ EngineError::NumericalInstability { .. }) => {
                log::error!("{e}; resetting fluid");
                sim.reset();
            }
            Err(e) => {
                log::error!("simulation failed: {e}");
                break;
            }
        }

        if let Err(e) = renderer.paint(&mut out, &sim) {
            log::error!("terminal write failed: {e}");
            break;
        }

        frame += 1;
        if frame % DIAGNOSTIC_INTERVAL == 0 {
            log::debug!(
                "frame {frame} step {}: mass={:.4} energy={:.6} max|u|={:.4}",
                sim.step_count(),
                sim.total_mass(),
                sim.kinetic_energy(),
                sim.max_speed(),
            );
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            std::thread::sleep(frame_interval - elapsed);
        }
    }

    // Terminal restore
    let _ = write!(out, "\x1b[?25h"); // show cursor
    let _ = write!(out, "\x1b[?1049l"); // restore main screen
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_vortex::config::Config;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_empty() {
        assert_eq!(parse_args(args(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_args_config_and_frames() {
        let parsed = parse_args(args(&["--frames", "0", "--config", "run.yaml"])).unwrap();
        assert_eq!(parsed.frames, Some(0));
        assert_eq!(parsed.config, Some(PathBuf::from("run.yaml")));
    }

    #[test]
    fn test_parse_args_missing_value() {
        assert!(parse_args(args(&["--frames"])).is_err());
        assert!(parse_args(args(&["--config"])).is_err());
    }

    #[test]
    fn test_parse_args_bad_number() {
        let err = parse_args(args(&["--frames", "ten"])).unwrap_err();
        assert!(err.contains("ten"), "error should name the bad value: {err}");
    }

    #[test]
    fn test_pipeline_no_panic() {
        // End-to-end: config defaults -> engine -> obstacle -> terminal frame
        let cfg = Config::default();
        let mut sim =
            Simulation::with_params(cfg.lattice.x_dim, cfg.lattice.y_dim, cfg.physics.sim_params()).unwrap();
        if let Some(obstacle) = cfg.obstacle.obstacle(sim.x_dim(), sim.y_dim()) {
            obstacle.apply(&mut sim);
        }
        let mut renderer = TerminalRenderer::new(cfg.display.contrast, cfg.display.colormap);
        let mut buf = Vec::new();
        for _ in 0..3 {
            sim.simulate().unwrap();
            buf.clear();
            renderer.paint(&mut buf, &sim).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches("\x1b[0m\n").count(), cfg.lattice.y_dim);
        assert_eq!(
            text.matches("\x1b[48;2;0;0;0m ").count(),
            17,
            "the default line obstacle is 17 cells tall"
        );
    }
}
