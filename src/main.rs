//! Replays a scripted pointer sequence through the orbit rig and logs the
//! resulting render state of every frame as JSON.
//!
//! ```text
//! orbit-rig <script.toml> [options.toml]
//! ```

use std::path::Path;

use orbit_rig::input::{PointerSample, Viewport};
use orbit_rig::{OrbitController, Options, RigError};
use serde::Deserialize;

/// Frame timing used when a frame omits `dt`.
const DEFAULT_DT: f32 = 1.0 / 60.0;

#[derive(Debug, Deserialize)]
struct Script {
    /// Starting viewport; 1920x1080 when omitted.
    #[serde(default)]
    viewport: Viewport,
    frames: Vec<Frame>,
}

#[derive(Debug, Deserialize)]
struct Frame {
    #[serde(default = "default_dt")]
    dt: f32,
    /// Replay this frame several times in a row.
    #[serde(default = "default_repeat")]
    repeat: u32,
    #[serde(default)]
    sample: PointerSample,
    /// Resize before this frame.
    viewport: Option<Viewport>,
}

fn default_dt() -> f32 {
    DEFAULT_DT
}

fn default_repeat() -> u32 {
    1
}

impl Script {
    fn load(path: &Path) -> Result<Self, RigError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| RigError::OptionsParse(e.to_string()))
    }
}

fn run(script: &Path, options: Option<&Path>) -> Result<(), RigError> {
    let options = match options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let script = Script::load(script)?;
    log::info!(
        "replaying {} scripted frames at {}x{}",
        script.frames.len(),
        script.viewport.width,
        script.viewport.height
    );

    let mut controller = OrbitController::new(&options, script.viewport)?;
    let mut index = 0_usize;
    for frame in &script.frames {
        if let Some(viewport) = frame.viewport {
            controller.resize(viewport);
        }
        for _ in 0..frame.repeat.max(1) {
            let state = controller.tick(frame.dt, &frame.sample);
            let json = serde_json::to_string(&state)
                .map_err(|e| RigError::OptionsParse(e.to_string()))?;
            log::info!(
                "frame {index} {:?}: {json}",
                controller.last_intent().movement
            );
            index += 1;
        }
    }

    let volume = controller.rig().volume();
    for (a, b) in volume.segments() {
        log::debug!("view volume edge {a} -> {b}");
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let mut args = std::env::args().skip(1);
    let Some(script) = args.next() else {
        log::error!("Usage: orbit-rig <script.toml> [options.toml]");
        std::process::exit(1);
    };
    let options = args.next();

    if let Err(e) = run(Path::new(&script), options.as_deref().map(Path::new))
    {
        log::error!("{e}");
        std::process::exit(1);
    }
}
