//! End-to-end tests for `ppr cycle`.

mod fixtures;
use fixtures::*;

fn current_template(ws: &Workspace) -> Option<String> {
    ws.read_config().lines().find_map(|line| {
        line.strip_prefix("current_template = ")
            .map(|v| v.trim_matches('"').to_string())
    })
}

#[test]
fn test_cycle_walks_templates_in_order_and_wraps() {
    let ws = Workspace::new();
    ws.write_template("a.svg", SQUARE_TEMPLATE);
    ws.write_template("b.svg", SQUARE_TEMPLATE);
    ws.write_config(&["preferred_templates = [\"a.svg\", \"b.svg\"]"]);

    for expected in ["a.svg", "b.svg", "a.svg"] {
        let output = ws.run(&["cycle", "--no-wallpaper", "-r", "10x10"]);
        assert_exit(&output, 0);
        assert_eq!(current_template(&ws).as_deref(), Some(expected));
    }
}

#[test]
fn test_cycle_all_uses_every_template() {
    let ws = Workspace::new();
    ws.write_template("nested/zz.svg", SQUARE_TEMPLATE);

    let output = ws.run(&["cycle", "nord", "--no-wallpaper", "-r", "10x10"]);
    assert_exit(&output, 0);
    assert_eq!(current_template(&ws).as_deref(), Some("nested/zz.svg"));

    let output = ws.run(&["cycle", "--no-wallpaper", "-r", "10x10"]);
    assert_exit(&output, 0);
    assert_eq!(current_template(&ws).as_deref(), Some("square.svg"));
    assert!(ws.output.join("ppr").join("nord").join("zz.png").is_file());
}

#[test]
fn test_cycle_keeps_current_theme() {
    let ws = Workspace::new();
    assert_exit(
        &ws.run(&["generate", "-t", "solarized-light", "-r", "10x10"]),
        0,
    );
    let output = ws.run(&["cycle", "--no-wallpaper", "-r", "10x10"]);
    assert_exit(&output, 0);
    assert!(stdout(&output).contains("solarized-light"));
    assert!(!ws.output.join("ppr").join("nord").exists());
}

#[test]
fn test_cycle_reuses_existing_variant() {
    let ws = Workspace::new();
    let first = ws.run(&["cycle", "--no-wallpaper", "-r", "10x10"]);
    assert_exit(&first, 0);
    assert!(stdout(&first).contains("Generated"));

    let second = ws.run(&["cycle", "--no-wallpaper", "-r", "10x10"]);
    assert_exit(&second, 0);
    assert!(stdout(&second).contains("Reused"), "{}", stdout(&second));
}

#[test]
fn test_cycle_without_templates_fails() {
    let ws = Workspace::new();
    std::fs::remove_file(ws.templates.join("square.svg")).unwrap();
    let output = ws.run(&["cycle", "--no-wallpaper", "-r", "10x10"]);
    assert_exit(&output, 1);
}
