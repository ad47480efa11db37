use std::path::Path;

use dexir::test_utils::single_method;
use dexir::{BuildOptions, build};

use super::check::CheckReport;

fn truncated_report() -> CheckReport {
    // const-wide with only three of its five code units
    let (f, _) = single_method(vec![0x0018, 0x0000, 0x0000]);
    let header = build(&f.build(), &BuildOptions::default()).unwrap();
    CheckReport::new(Path::new("classes.dex"), &header)
}

#[test]
fn text_report() {
    insta::assert_snapshot!(truncated_report().render_text(), @r"
    classes.dex: dex 035, 384 bytes
      4 strings, 3 types, 1 protos, 0 fields, 1 methods
      1 classes, 1 code items, 0 call sites, 0 method handles
      warning: LMain;->run()V truncated at pc 0
    ");
}

#[test]
fn json_report() {
    let value = serde_json::to_value(truncated_report()).unwrap();

    assert_eq!(value["version"], "035");
    assert_eq!(value["classes"], 1);
    assert_eq!(value["code_items"], 1);
    assert_eq!(value["truncated"][0]["method"], "LMain;->run()V");
    assert_eq!(value["truncated"][0]["pc"], 0);
}

#[test]
fn clean_image_has_no_warnings() {
    let (f, _) = single_method(vec![0x000e]);
    let header = build(&f.build(), &BuildOptions::default()).unwrap();
    let report = CheckReport::new(Path::new("ok.dex"), &header);

    assert!(report.truncated.is_empty());
    assert!(!report.render_text().contains("warning"));
}
