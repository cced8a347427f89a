//! Wallpaper installation through desktop-specific commands.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

use super::WallpaperSetter;

/// Linux desktop families with distinct wallpaper mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Desktop {
    /// gsettings
    Gnome,
    /// Plasma scripting over qdbus
    Kde,
    /// xfconf-query
    Xfce,
    /// i3 (feh, or swaybg)
    I3,
    /// sway (swaybg, or feh)
    Sway,
    /// Whatever of feh/nitrogen/pcmanfm is present
    Generic,
}

/// One external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Spawn without waiting (long-running daemons such as swaybg)
    pub detach: bool,
}

impl Invocation {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            detach: false,
        }
    }

    fn detached(mut self) -> Self {
        self.detach = true;
        self
    }

    fn run(&self) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);

        if self.detach {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .with_context(|| format!("Failed to start {}", self.program))?;
            return Ok(());
        }

        let output = command
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))?;
        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

/// Sets the wallpaper with the platform's own tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandWallpaperSetter;

impl WallpaperSetter for CommandWallpaperSetter {
    fn set_wallpaper(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            anyhow::bail!("Wallpaper file not accessible: {}", path.display());
        }
        let image = path.to_string_lossy().to_string();

        let candidates = if cfg!(target_os = "macos") {
            macos_invocations(&image)
        } else if cfg!(target_os = "windows") {
            vec![windows_invocation(&image)]
        } else {
            let desktop = detect_desktop(
                std::env::var("XDG_CURRENT_DESKTOP").ok().as_deref(),
                command_exists,
            );
            tracing::debug!("detected desktop {:?}", desktop);
            linux_invocations(desktop, &image)
                .into_iter()
                .filter(|inv| command_exists(&inv.program))
                .collect()
        };

        run_first_success(&candidates)
    }
}

/// Runs candidates in order and stops at the first success.
///
/// GNOME's dark-mode key is set in addition to the primary key, so every
/// `gsettings` candidate runs.
fn run_first_success(candidates: &[Invocation]) -> Result<()> {
    if candidates.is_empty() {
        anyhow::bail!("No suitable wallpaper setter found");
    }

    let mut last_error = None;
    let mut succeeded = false;
    for invocation in candidates {
        if succeeded && invocation.program != "gsettings" {
            break;
        }
        match invocation.run() {
            Ok(()) => {
                tracing::debug!("wallpaper set with {}", invocation.program);
                succeeded = true;
            }
            Err(e) => {
                tracing::debug!("{:#}", e);
                if !succeeded {
                    last_error = Some(e);
                }
            }
        }
    }

    if succeeded {
        Ok(())
    } else {
        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("No suitable wallpaper setter found"))
            .context("Failed to set wallpaper"))
    }
}

/// Picks a desktop from `XDG_CURRENT_DESKTOP`, then from installed binaries.
pub fn detect_desktop(xdg_current: Option<&str>, has_command: impl Fn(&str) -> bool) -> Desktop {
    if let Some(value) = xdg_current {
        for part in value.split(':').map(str::to_lowercase) {
            match part.as_str() {
                "gnome" | "unity" | "ubuntu" | "pantheon" | "budgie" => return Desktop::Gnome,
                "kde" | "plasma" => return Desktop::Kde,
                "xfce" => return Desktop::Xfce,
                "i3" => return Desktop::I3,
                "sway" => return Desktop::Sway,
                _ => {}
            }
        }
    }

    if has_command("gnome-session") {
        Desktop::Gnome
    } else if has_command("plasmashell") || has_command("kwin") {
        Desktop::Kde
    } else if has_command("xfce4-session") {
        Desktop::Xfce
    } else if has_command("i3") {
        Desktop::I3
    } else if has_command("sway") {
        Desktop::Sway
    } else {
        Desktop::Generic
    }
}

/// Candidate commands for a Linux desktop, in preference order.
pub fn linux_invocations(desktop: Desktop, image: &str) -> Vec<Invocation> {
    let uri = format!("file://{image}");
    let feh = Invocation::new("feh", &["--bg-scale", image]);
    let swaybg = Invocation::new("swaybg", &["-i", image, "-m", "fill"]).detached();

    match desktop {
        Desktop::Gnome => vec![
            Invocation::new(
                "gsettings",
                &["set", "org.gnome.desktop.background", "picture-uri", &uri],
            ),
            Invocation::new(
                "gsettings",
                &["set", "org.gnome.desktop.background", "picture-uri-dark", &uri],
            ),
        ],
        Desktop::Kde => {
            let script = format!(
                "var allDesktops = desktops();\n\
                 for (i = 0; i < allDesktops.length; i++) {{\n\
                 d = allDesktops[i];\n\
                 d.wallpaperPlugin = \"org.kde.image\";\n\
                 d.currentConfigGroup = Array(\"Wallpaper\", \"org.kde.image\", \"General\");\n\
                 d.writeConfig(\"Image\", \"{uri}\");\n\
                 }}"
            );
            vec![
                Invocation::new(
                    "qdbus",
                    &[
                        "org.kde.plasmashell",
                        "/PlasmaShell",
                        "org.kde.PlasmaShell.evaluateScript",
                        &script,
                    ],
                ),
                Invocation::new("plasma-apply-wallpaperimage", &[image]),
            ]
        }
        Desktop::Xfce => vec![Invocation::new(
            "xfconf-query",
            &[
                "-c",
                "xfce4-desktop",
                "-p",
                "/backdrop/screen0/monitor0/workspace0/last-image",
                "-s",
                image,
            ],
        )],
        Desktop::I3 => vec![feh, swaybg],
        Desktop::Sway => vec![swaybg, feh],
        Desktop::Generic => vec![
            feh,
            Invocation::new("nitrogen", &["--set-scaled", image]),
            Invocation::new("pcmanfm", &["--set-wallpaper", image]),
        ],
    }
}

fn macos_invocations(image: &str) -> Vec<Invocation> {
    let escaped = image.replace('\\', "\\\\").replace('"', "\\\"");
    let system_events = format!(
        "tell application \"System Events\" to tell every desktop to set picture to \"{escaped}\""
    );
    let finder = format!(
        "tell application \"Finder\" to set desktop picture to POSIX file \"{escaped}\""
    );
    vec![
        Invocation::new("osascript", &["-e", &system_events]),
        Invocation::new("osascript", &["-e", &finder]),
    ]
}

fn windows_invocation(image: &str) -> Invocation {
    let escaped = image.replace('\'', "''");
    let script = format!(
        "Add-Type -TypeDefinition 'using System; using System.Runtime.InteropServices; \
         public class Wallpaper {{ [DllImport(\"user32.dll\", CharSet=CharSet.Auto)] \
         public static extern int SystemParametersInfo(int uAction, int uParam, string lpvParam, int fuWinIni); }}'; \
         [Wallpaper]::SystemParametersInfo(20, 0, '{escaped}', 3)"
    );
    Invocation::new("powershell", &["-NoProfile", "-Command", &script])
}

/// Whether `name` is an executable file somewhere on `PATH`.
fn command_exists(name: &str) -> bool {
    std::env::var_os("PATH").is_some_and(|paths| {
        std::env::split_paths(&paths).any(|dir| {
            let candidate = dir.join(name);
            candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
        })
    })
}
