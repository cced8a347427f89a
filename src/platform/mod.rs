//! Platform adapters: display probing and wallpaper installation.
//!
//! The orchestrator only sees the two traits below; everything that shells
//! out to the operating system lives behind them.

pub mod resolution;
pub mod wallpaper;

use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::PprError;

pub use resolution::SystemResolutionProbe;
pub use wallpaper::CommandWallpaperSetter;

/// Output size in pixels. Both dimensions are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Creates a resolution, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, PprError> {
        if width == 0 || height == 0 {
            return Err(PprError::InvalidResolution(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }
}

impl FromStr for Resolution {
    type Err = PprError;

    /// Parses `WIDTHxHEIGHT` (case-insensitive `x`).
    fn from_str(s: &str) -> Result<Self, PprError> {
        let invalid = || PprError::InvalidResolution(s.to_string());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
        Self::new(width, height).map_err(|_| invalid())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Reports the primary display's resolution.
pub trait ResolutionProbe {
    /// Probes the primary display.
    fn primary_resolution(&self) -> Result<Resolution>;
}

/// Installs an image as the desktop background.
pub trait WallpaperSetter {
    /// Sets `path` (absolute) as the wallpaper.
    fn set_wallpaper(&self, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        assert_eq!(
            "1920x1080".parse::<Resolution>().unwrap(),
            Resolution { width: 1920, height: 1080 }
        );
        assert_eq!(
            " 800X600 ".parse::<Resolution>().unwrap(),
            Resolution { width: 800, height: 600 }
        );
    }

    #[test]
    fn test_parse_resolution_invalid() {
        for bad in ["1920", "0x1080", "1920x0", "axb", "-1x5", "1920x1080x2", ""] {
            assert!(bad.parse::<Resolution>().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_display_round_trip() {
        let r = Resolution::new(2560, 1440).unwrap();
        assert_eq!(r.to_string(), "2560x1440");
        assert_eq!(r.to_string().parse::<Resolution>().unwrap(), r);
    }
}
