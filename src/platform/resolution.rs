//! Primary display resolution probing via platform tools.
//!
//! - Linux: `xrandr`, falling back to `xdpyinfo`
//! - macOS: `system_profiler SPDisplaysDataType`
//! - Windows: `wmic path Win32_VideoController`
//!
//! The parsers are pure functions over tool output.

use anyhow::{Context, Result};
use std::process::Command;

use super::{Resolution, ResolutionProbe};

/// Probes the display by running the platform's command-line tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolutionProbe;

impl ResolutionProbe for SystemResolutionProbe {
    fn primary_resolution(&self) -> Result<Resolution> {
        if cfg!(target_os = "macos") {
            let output = run("system_profiler", &["SPDisplaysDataType"])?;
            parse_system_profiler(&output)
                .context("No resolution found in system_profiler output")
        } else if cfg!(target_os = "windows") {
            let output = run(
                "wmic",
                &[
                    "path",
                    "Win32_VideoController",
                    "get",
                    "CurrentHorizontalResolution,CurrentVerticalResolution",
                    "/format:value",
                ],
            )?;
            parse_wmic(&output).context("No resolution found in wmic output")
        } else {
            let from_xrandr = run("xrandr", &[])
                .ok()
                .and_then(|output| parse_xrandr(&output));
            if let Some(resolution) = from_xrandr {
                return Ok(resolution);
            }
            tracing::debug!("xrandr gave no resolution, trying xdpyinfo");
            let output = run("xdpyinfo", &[])?;
            parse_xdpyinfo(&output).context("No resolution found in xdpyinfo output")
        }
    }
}

fn run(cmd: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(cmd)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute {cmd}"))?;
    if !output.status.success() {
        anyhow::bail!("{cmd} exited with {}", output.status);
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// `WxH` with no trailing junk, both positive.
fn parse_dims(text: &str) -> Option<Resolution> {
    let (w, h) = text.split_once('x')?;
    Resolution::new(w.trim().parse().ok()?, h.trim().parse().ok()?).ok()
}

/// First connected output's current mode, preferring the primary one.
///
/// Matches lines like `eDP-1 connected primary 2560x1600+0+0 (normal ...)`.
pub fn parse_xrandr(output: &str) -> Option<Resolution> {
    let mode_of = |line: &str| {
        line.split_whitespace()
            .filter(|part| part.contains('x') && part.contains('+'))
            .find_map(|part| part.split('+').next().and_then(parse_dims))
    };

    let connected = || {
        output
            .lines()
            .filter(|line| line.contains(" connected") && !line.contains("disconnected"))
    };

    connected()
        .filter(|line| line.contains(" connected primary"))
        .find_map(mode_of)
        .or_else(|| connected().find_map(mode_of))
}

/// `dimensions:    1920x1080 pixels (508x285 millimeters)`
pub fn parse_xdpyinfo(output: &str) -> Option<Resolution> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("dimensions:"))
        .find_map(|line| line.split_whitespace().nth(1).and_then(parse_dims))
}

/// `Resolution: 3024 x 1964 Retina`
pub fn parse_system_profiler(output: &str) -> Option<Resolution> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("Resolution:"))
        .find_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return None;
            }
            Resolution::new(parts[1].parse().ok()?, parts[3].parse().ok()?).ok()
        })
}

/// `CurrentHorizontalResolution=1920` / `CurrentVerticalResolution=1080`
pub fn parse_wmic(output: &str) -> Option<Resolution> {
    let value = |key: &str| {
        output
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix(key))
            .find_map(|v| v.trim().parse::<u32>().ok())
    };
    Resolution::new(
        value("CurrentHorizontalResolution=")?,
        value("CurrentVerticalResolution=")?,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xrandr_primary() {
        let output = "Screen 0: minimum 8 x 8, current 4480 x 1440, maximum 32767 x 32767
HDMI-1 connected 1920x1080+2560+0 (normal left inverted right x axis y axis) 527mm x 296mm
eDP-1 connected primary 2560x1440+0+0 (normal left inverted right x axis y axis) 309mm x 174mm
   2560x1440     60.00*+
DP-1 disconnected (normal left inverted right x axis y axis)
";
        assert_eq!(parse_xrandr(output), Some(Resolution { width: 2560, height: 1440 }));
    }

    #[test]
    fn test_parse_xrandr_without_primary() {
        let output = "DP-2 disconnected\nHDMI-1 connected 1680x1050+0+0 (normal) 0mm x 0mm\n";
        assert_eq!(parse_xrandr(output), Some(Resolution { width: 1680, height: 1050 }));
    }

    #[test]
    fn test_parse_xrandr_nothing_connected() {
        assert_eq!(parse_xrandr("DP-1 disconnected\n"), None);
    }

    #[test]
    fn test_parse_xdpyinfo() {
        let output = "screen #0:\n  dimensions:    3840x2160 pixels (1016x571 millimeters)\n";
        assert_eq!(parse_xdpyinfo(output), Some(Resolution { width: 3840, height: 2160 }));
    }

    #[test]
    fn test_parse_system_profiler() {
        let output = "Graphics/Displays:\n    Displays:\n      Color LCD:\n        Resolution: 3024 x 1964 Retina\n";
        assert_eq!(
            parse_system_profiler(output),
            Some(Resolution { width: 3024, height: 1964 })
        );
    }

    #[test]
    fn test_parse_wmic() {
        let output = "\r\n\r\nCurrentHorizontalResolution=1920\r\nCurrentVerticalResolution=1200\r\n";
        assert_eq!(parse_wmic(output), Some(Resolution { width: 1920, height: 1200 }));
        assert_eq!(parse_wmic("CurrentHorizontalResolution=\r\n"), None);
    }
}
