use std::{fs, path::Path, str::FromStr};

use anyhow::Context as _;
use path2d::{FillRule, ReplayConfig};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    RGBA(f64, f64, f64, f64),
    RGB(f64, f64, f64),
    None,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid color: {0}")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	if s.eq_ignore_ascii_case("none") {
	    return Ok(Color::None);
	}

	let err = || ParseColorError(String::from(s));
	let parse_hex = |s_rep: &str| u8::from_str_radix(s_rep, 16)
	    .map(|v| (v as f64) / 255.0)
	    .map_err(|_| err());
	let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
	if !hex.is_ascii() {
	    return Err(err());
	}

	match hex.len() {
	    6 => Ok(Color::RGB(parse_hex(&hex[0..2])?, parse_hex(&hex[2..4])?, parse_hex(&hex[4..6])?)),
	    8 => Ok(Color::RGBA(
		parse_hex(&hex[0..2])?,
		parse_hex(&hex[2..4])?,
		parse_hex(&hex[4..6])?,
		parse_hex(&hex[6..8])?,
	    )),
	    _ => Err(err()),
	}
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
	let s = String::deserialize(deserializer)?;
	s.parse().map_err(serde::de::Error::custom)
    }
}

/// Output and paint settings, read from an optional TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub width: i32,
    pub height: i32,
    pub background: Color,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill_rule: FillRule,
    pub replay: ReplayConfig,
}

impl Default for Settings {
    fn default() -> Self {
	Settings {
	    width: 800,
	    height: 800,
	    background: Color::RGB(1.0, 1.0, 1.0),
	    fill: Color::RGB(0.0, 0.0, 0.0),
	    stroke: Color::None,
	    stroke_width: 1.0,
	    fill_rule: FillRule::NonZero,
	    replay: ReplayConfig::default(),
	}
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Settings> {
	let path = match path {
	    Some(path) => path,
	    None => return Ok(Settings::default()),
	};

	let content = fs::read_to_string(path)
	    .with_context(|| format!("failed to read settings at {}", path.display()))?;
	let settings = toml::from_str(&content)
	    .with_context(|| format!("failed to parse settings at {}", path.display()))?;
	tracing::info!("loaded settings from {}", path.display());

	Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use path2d::ClosePolicy;

    #[test]
    fn hex_colors() {
	assert_eq!("#ff0000".parse::<Color>().unwrap(), Color::RGB(1.0, 0.0, 0.0));
	assert_eq!("#00000000".parse::<Color>().unwrap(), Color::RGBA(0.0, 0.0, 0.0, 0.0));
	assert_eq!("None".parse::<Color>().unwrap(), Color::None);
	assert!("#fff".parse::<Color>().is_err());
	assert!("ff0000".parse::<Color>().is_err());
	assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn partial_settings_keep_defaults() {
	let settings: Settings = toml::from_str(r##"
width = 200
stroke = "#0000ff"
fill-rule = "evenodd"

[replay]
close-policy = "error"
"##).unwrap();

	assert_eq!(settings.width, 200);
	assert_eq!(settings.height, 800);
	assert_eq!(settings.stroke, Color::RGB(0.0, 0.0, 1.0));
	assert_eq!(settings.fill_rule, FillRule::EvenOdd);
	assert_eq!(settings.replay.close_policy, ClosePolicy::Error);
	assert_eq!(settings.fill, Settings::default().fill);
    }

    #[test]
    fn bad_color_is_rejected() {
	assert!(toml::from_str::<Settings>("fill = \"red\"").is_err());
    }
}
