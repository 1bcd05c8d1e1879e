use clap::Parser;
use glide::RemoteOverride;
use glide::core::config::{CliOverrides, GlideConfig, PolicyKind, ResolvedConfig, load_config, resolve};
use glide::core::input_mode::{EnvironmentProbe, HeuristicDetector, detect_at_startup};
use glide::core::settings::{Settings, settings_path};
use glide::tui::{self, CELL_HEIGHT_PX, CELL_WIDTH_PX};
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::Path;

#[derive(Parser)]
#[command(name = "glide", about = "Gesture and remote navigation for a media library")]
struct Args {
    /// Directional-remote mode: on/off store a forced choice, auto clears it and re-detects
    #[arg(long, default_value_t, value_enum)]
    remote: RemoteOverride,

    /// Grid width in tiles
    #[arg(long)]
    columns: Option<usize>,

    /// Focus movement policy
    #[arg(long, value_enum)]
    policy: Option<PolicyKind>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to glide.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("glide.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().unwrap_or_else(|e| {
        warn!("Falling back to default config: {e}");
        GlideConfig::default()
    });
    let config = resolve(
        &file_config,
        CliOverrides {
            columns: args.columns,
            policy: args.policy,
        },
    );
    info!("Glide starting up with {:?}", config.policy);

    let settings_file = settings_path();
    if let Some(path) = settings_file.as_deref() {
        store_remote_override(args.remote, path);
    }

    let detector = heuristic_detector(&config);
    let input_mode = detect_at_startup(&detector, settings_file.as_deref());

    tui::run(config, input_mode)
}

/// Write the `--remote` choice to settings before detection reads them.
fn store_remote_override(remote: RemoteOverride, path: &Path) {
    if remote == RemoteOverride::Keep {
        return;
    }
    let mut settings = Settings::load_from(path).unwrap_or_else(|e| {
        warn!("Replacing unreadable settings: {e}");
        Settings::default()
    });
    remote.apply_to(&mut settings);
    match settings.save_to(path) {
        Ok(()) => info!("Stored remote override: {:?}", remote),
        Err(e) => warn!("Failed to store remote override: {e}"),
    }
}

/// Probe the terminal the way a browser client probes its window: platform
/// string, screen size in pixels, touch points. Terminals report no touch.
fn heuristic_detector(config: &ResolvedConfig) -> HeuristicDetector {
    let platform = std::env::var("GLIDE_PLATFORM").unwrap_or_else(|_| {
        format!(
            "{} {}",
            std::env::consts::OS,
            std::env::var("TERM").unwrap_or_default()
        )
    });
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));

    let mut detector = HeuristicDetector::new(EnvironmentProbe {
        platform,
        screen_width: cols as u32 * CELL_WIDTH_PX,
        screen_height: rows as u32 * CELL_HEIGHT_PX,
        touch_points: 0,
    });
    detector.min_screen_width = config.min_screen_width;
    detector.min_screen_height = config.min_screen_height;
    detector
}
