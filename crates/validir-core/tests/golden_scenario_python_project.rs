use std::fs;
use std::path::Path;

use validir_core::{EntryKind, MismatchKind, Template};

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn create_dir(path: &Path) {
    fs::create_dir_all(path).unwrap();
    assert!(path.is_dir());
}

const TEMPLATE: &str = r#"
root:
  - README.md
  - src:
      - "*.py"
skip_hidden: true
"#;

#[test]
fn golden_python_project_matches() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_file(&root.join("README.md"), "# demo\n");
    write_file(&root.join("src/main.py"), "print('hi')\n");
    write_file(&root.join("src/util.py"), "\n");

    let template: Template = TEMPLATE.parse().unwrap();
    let report = template.validate(root).unwrap();

    assert!(report.is_match());
    assert_eq!(report.directory(), root);
}

#[test]
fn golden_python_project_missing_src() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_file(&root.join("README.md"), "# demo\n");

    let template: Template = TEMPLATE.parse().unwrap();
    let report = template.validate(root).unwrap();

    assert!(!report.is_match());
    let m = report.mismatch().unwrap();
    assert_eq!(m.kind, MismatchKind::MissingRequired);
    assert_eq!(m.entry, EntryKind::Directory);
    assert_eq!(m.path, "src");
}

#[test]
fn golden_python_project_extra_file() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_file(&root.join("README.md"), "# demo\n");
    write_file(&root.join("src/main.py"), "print('hi')\n");
    write_file(&root.join("extra.txt"), "\n");

    let template: Template = TEMPLATE.parse().unwrap();

    let strict = template.validate_with(root, false).unwrap();
    assert!(!strict.is_match());
    let m = strict.mismatch().unwrap();
    assert_eq!(m.kind, MismatchKind::Unexpected);
    assert_eq!(m.entry, EntryKind::File);
    assert_eq!(m.path, "extra.txt");

    let lenient = template.validate_with(root, true).unwrap();
    assert!(lenient.is_match());
    assert!(lenient.policy().allow_extra);
}

#[test]
fn golden_python_project_empty_src_is_fine() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_file(&root.join("README.md"), "# demo\n");
    create_dir(&root.join("src"));

    let template: Template = TEMPLATE.parse().unwrap();
    assert!(template.validate(root).unwrap().is_match());
}
