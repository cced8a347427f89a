//! End-to-end tests for `ppr generate` and `ppr switch-current`.

mod fixtures;
use fixtures::*;

// ============================================================================
// Generate
// ============================================================================

#[test]
fn test_generate_writes_variant_and_current() {
    let ws = Workspace::new();
    let output = ws.run(&["generate", "--theme", "nord", "--resolution", "100x100"]);
    assert_exit(&output, 0);

    let variant = ws.output.join("ppr").join("nord").join("square.png");
    let current = ws.output.join("current.png");
    assert!(variant.is_file(), "named variant missing");
    assert!(current.is_file(), "current.png missing");
    assert_eq!(dimensions(&current), (100, 100));
    assert_eq!(pixel(&current, 50, 50), [0x2E, 0x34, 0x40, 0xFF]);
    assert_eq!(
        std::fs::read(&variant).unwrap(),
        std::fs::read(&current).unwrap()
    );

    let stdout = stdout(&output);
    assert!(stdout.contains("Theme: nord"), "stdout: {stdout}");
    assert!(stdout.contains("History:"), "stdout: {stdout}");
}

#[test]
fn test_generate_keeps_timestamped_history() {
    let ws = Workspace::new();
    assert_exit(&ws.run(&["generate", "-t", "nord", "-r", "10x10"]), 0);

    let history: Vec<_> = std::fs::read_dir(ws.output.join("ppr"))
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with("nord-square-") && n.ends_with(".png"))
        .collect();
    assert_eq!(history.len(), 1, "history files: {history:?}");
}

#[test]
fn test_generate_cover_crops_to_target_aspect() {
    let ws = Workspace::new();
    ws.write_template("wide.svg", ACCENT_TEMPLATE);
    let output = ws.run(&[
        "generate", "-t", "nord", "-s", "wide.svg", "-r", "100x100",
    ]);
    assert_exit(&output, 0);

    let current = ws.output.join("current.png");
    assert_eq!(dimensions(&current), (100, 100));
    // Centered circle survives the crop; corners are background.
    assert_eq!(pixel(&current, 50, 50), [0x81, 0xA1, 0xC1, 0xFF]);
    assert_eq!(pixel(&current, 1, 1), [0x2E, 0x34, 0x40, 0xFF]);
}

#[test]
fn test_generate_template_without_namespace_declaration() {
    let ws = Workspace::new();
    ws.write_template(
        "bare.svg",
        r#"<svg width="100" height="100"><rect width="100" height="100" fill="{{base00}}"/></svg>"#,
    );
    let output = ws.run(&["generate", "-t", "nord", "-s", "bare.svg", "-r", "200x100"]);
    assert_exit(&output, 0);

    let current = ws.output.join("current.png");
    assert_eq!(dimensions(&current), (200, 100));
    assert_eq!(pixel(&current, 0, 0), [0x2E, 0x34, 0x40, 0xFF]);
    assert_eq!(pixel(&current, 199, 99), [0x2E, 0x34, 0x40, 0xFF]);
}

#[test]
fn test_generate_uses_configured_resolution_when_given() {
    let ws = Workspace::new();
    let output = ws.run(&["generate", "-t", "nord", "-r", "64x48"]);
    assert_exit(&output, 0);
    assert_eq!(dimensions(&ws.output.join("current.png")), (64, 48));
}

#[test]
fn test_generate_records_session() {
    let ws = Workspace::new();
    assert_exit(&ws.run(&["generate", "-t", "nord", "-r", "10x10"]), 0);

    let config = ws.read_config();
    assert!(config.contains("current_theme = \"nord\""), "{config}");
    assert!(config.contains("current_template = \"square.svg\""), "{config}");
    assert!(config.contains("last_output_path"), "{config}");
}

#[test]
fn test_generate_with_svg_and_filename() {
    let ws = Workspace::new();
    let out_dir = ws.dir.path().join("custom");
    let output = ws.run(&[
        "generate",
        "-t",
        "nord",
        "-r",
        "10x10",
        "-o",
        out_dir.to_str().unwrap(),
        "-f",
        "desk",
        "--svg",
    ]);
    assert_exit(&output, 0);

    let png = out_dir.join("ppr").join("nord").join("desk.png");
    let svg = png.with_extension("svg");
    assert!(png.is_file());
    let bound = std::fs::read_to_string(svg).unwrap();
    assert!(bound.contains("#2E3440"));
    assert!(!bound.contains("{{"));
}

#[test]
fn test_generate_unknown_theme_is_validation_error() {
    let ws = Workspace::new();
    let output = ws.run(&["generate", "-t", "dracula", "-r", "10x10"]);
    assert_exit(&output, 1);
    assert!(stderr(&output).contains("dracula"));
    assert!(!ws.output.join("current.png").exists());
}

#[test]
fn test_generate_missing_template_is_validation_error() {
    let ws = Workspace::new();
    let output = ws.run(&["generate", "-t", "nord", "-s", "nope.svg", "-r", "10x10"]);
    assert_exit(&output, 1);
}

#[test]
fn test_generate_unresolved_placeholder_fails() {
    let ws = Workspace::new();
    ws.write_template(
        "bad.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect fill="{{base10}}"/></svg>"#,
    );
    let output = ws.run(&["generate", "-t", "nord", "-s", "bad.svg", "-r", "10x10"]);
    assert_exit(&output, 1);
    assert!(stderr(&output).contains("base10"), "{}", stderr(&output));
}

#[test]
fn test_generate_missing_dimensions_fails() {
    let ws = Workspace::new();
    ws.write_template(
        "nodims.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect fill="{{base00}}"/></svg>"#,
    );
    let output = ws.run(&["generate", "-t", "nord", "-s", "nodims.svg", "-r", "10x10"]);
    assert_exit(&output, 1);
}

#[test]
fn test_generate_invalid_resolution_is_usage_error() {
    let ws = Workspace::new();
    let output = ws.run(&["generate", "-t", "nord", "-r", "wide"]);
    assert!(!output.status.success());
}

#[test]
fn test_generate_malformed_palette_is_skipped() {
    let ws = Workspace::new();
    ws.write_palette("broken", "system: base16\npalette:\n  base00: \"#zzzzzz\"\n");
    let output = ws.run(&["generate", "-t", "nord", "-r", "10x10"]);
    assert_exit(&output, 0);

    let output = ws.run(&["generate", "-t", "broken", "-r", "10x10"]);
    assert_exit(&output, 1);
}

// ============================================================================
// Switch current
// ============================================================================

#[test]
fn test_switch_current_rethemes_current_template() {
    let ws = Workspace::new();
    assert_exit(&ws.run(&["generate", "-t", "nord", "-r", "20x20"]), 0);

    let output = ws.run(&["switch-current", "solarized-light", "-r", "20x20"]);
    assert_exit(&output, 0);

    let current = ws.output.join("current.png");
    assert_eq!(pixel(&current, 10, 10), [0xFD, 0xF6, 0xE3, 0xFF]);
    assert!(ws
        .output
        .join("ppr")
        .join("solarized-light")
        .join("square.png")
        .is_file());

    let config = ws.read_config();
    assert!(config.contains("current_theme = \"solarized-light\""), "{config}");
    assert!(config.contains("current_template = \"square.svg\""), "{config}");
}

#[test]
fn test_switch_current_without_history_uses_default_template() {
    let ws = Workspace::new();
    let output = ws.run(&["switch-current", "nord", "-r", "10x10"]);
    assert_exit(&output, 0);
    assert!(ws.output.join("ppr").join("nord").join("square.png").is_file());
}

#[test]
fn test_switch_current_unknown_theme() {
    let ws = Workspace::new();
    let output = ws.run(&["switch-current", "missing", "-r", "10x10"]);
    assert_exit(&output, 1);
}

// ============================================================================
// Shared output flags
// ============================================================================

#[test]
fn test_output_flags_listed_in_help() {
    let ws = Workspace::new();
    for command in ["generate", "cycle", "switch-current"] {
        let output = ws.run(&[command, "--help"]);
        assert_exit(&output, 0);
        let help = stdout(&output);
        for flag in ["--resolution", "--output", "--filename", "--svg"] {
            assert!(help.contains(flag), "{command} help lacks {flag}: {help}");
        }
    }
}
