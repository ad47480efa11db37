use crate::Colors;

#[test]
fn off_is_default() {
    assert_eq!(Colors::default(), Colors::OFF);
    assert!(!Colors::OFF.is_enabled());
    assert!(Colors::ON.is_enabled());
}

#[test]
fn paint_without_colors_is_plain() {
    let c = Colors::new(false);
    assert_eq!(c.paint(c.label, "S00"), "S00");
}

#[test]
fn paint_with_colors_resets() {
    let c = Colors::new(true);
    assert_eq!(c.paint(c.label, "T1"), "\x1b[36mT1\x1b[0m");
}
