use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::meta::LineOptions;
use crate::render::RenderOptions;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>, // e.g., "info" | "debug"
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub kind: Option<DisplayKind>,
    pub bus: Option<String>,    // e.g. "/dev/i2c-1"
    pub brightness: Option<u8>, // 0-255
    pub show_player: Option<bool>,
    pub show_artist: Option<bool>,
    pub show_title: Option<bool>,
    pub scroll_passes: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    Microdot,
    Scrollphathd,
}

impl DisplayConfig {
    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            brightness: self.brightness.unwrap_or(defaults.brightness),
            lines: LineOptions {
                show_player: self.show_player.unwrap_or(true),
                show_artist: self.show_artist.unwrap_or(true),
                show_title: self.show_title.unwrap_or(true),
            },
            scroll_passes: self.scroll_passes.unwrap_or(defaults.scroll_passes),
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "phatline", about = "Now-playing scroller for Pimoroni pHAT LED displays")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long, value_enum)]
    pub display_kind: Option<DisplayKind>,
    #[arg(long)]
    pub i2c_bus: Option<String>,
    #[arg(long)]
    pub brightness: Option<u8>,
    #[arg(long)]
    pub scroll_passes: Option<u32>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();

    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, &cli);

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/phatline/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/phatline/config.yaml");
        if p.exists() {
            return Some(p);
        }
        let p = home.join(".config/phatline.yaml");
        if p.exists() {
            return Some(p);
        }
    }
    // project local
    for candidate in &["phatline.yaml", "config.yaml", "config/phatline.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() {
        dst.log_level = src.log_level;
    }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.kind.is_some() {
        dst.kind = src.kind;
    }
    if src.bus.is_some() {
        dst.bus = src.bus;
    }
    if src.brightness.is_some() {
        dst.brightness = src.brightness;
    }
    if src.show_player.is_some() {
        dst.show_player = src.show_player;
    }
    if src.show_artist.is_some() {
        dst.show_artist = src.show_artist;
    }
    if src.show_title.is_some() {
        dst.show_title = src.show_title;
    }
    if src.scroll_passes.is_some() {
        dst.scroll_passes = src.scroll_passes;
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }
    let any_case = cli.display_kind.is_some()
        || cli.i2c_bus.is_some()
        || cli.brightness.is_some()
        || cli.scroll_passes.is_some();

    if any_case && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.display_kind.is_some() {
            display.kind = cli.display_kind;
        }
        if cli.i2c_bus.is_some() {
            display.bus = cli.i2c_bus.clone();
        }
        if cli.brightness.is_some() {
            display.brightness = cli.brightness;
        }
        if cli.scroll_passes.is_some() {
            display.scroll_passes = cli.scroll_passes;
        }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        if let Some(passes) = display.scroll_passes {
            if passes == 0 {
                return Err(ConfigError::Validation(
                    "display scroll_passes must be >= 1".into(),
                ));
            }
        }
        if let Some(bus) = display.bus.as_deref() {
            if bus.is_empty() {
                return Err(ConfigError::Validation(
                    "display bus must not be empty".into(),
                ));
            }
        }
    }
    Ok(())
}
