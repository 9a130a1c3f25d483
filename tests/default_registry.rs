//! Default Registry Bootstrap Test
//!
//! Runs in its own process so the search path can be set before the default
//! registry is first touched. Kept as a single test for that reason.

use manifests::StringSource;
use tempfile::tempdir;

#[test]
fn test_default_registry_bootstraps_once_from_search_path() {
    let dir = tempdir().unwrap();
    let meta = dir.path().join("META-INF");
    std::fs::create_dir_all(&meta).unwrap();
    std::fs::write(meta.join("MANIFEST.MF"), "Built-By: ci\nBootstrap-Only: yes\n").unwrap();
    let broken = dir.path().join("broken.MF");
    std::fs::write(&broken, " misplaced continuation\n").unwrap();

    let search_path = std::env::join_paths([dir.path(), broken.as_path()]).unwrap();
    std::env::set_var("MANIFESTS_PATH", &search_path);

    // Malformed documents on the search path do not prevent bootstrap
    assert_eq!(manifests::read("Built-By").unwrap(), "ci");
    assert!(manifests::exists("Bootstrap-Only").unwrap());
    assert!(manifests::read("absent-property").unwrap_err().is_not_found());
    assert!(manifests::read("").unwrap_err().is_invalid_argument());

    // A later manifest on the search path is not picked up: bootstrap ran once
    let late = tempdir().unwrap();
    std::fs::write(late.path().join("late.MF"), "Late: 1\n").unwrap();
    std::env::set_var("MANIFESTS_PATH", late.path().join("late.MF"));
    assert!(!manifests::exists("Late").unwrap());

    // Appends to the default registry follow the same first-wins rule
    manifests::singleton()
        .append(&StringSource::new("Built-By: someone-else\nfoo: bar\n"))
        .unwrap();
    assert_eq!(manifests::read("Built-By").unwrap(), "ci");
    assert_eq!(manifests::read("foo").unwrap(), "bar");
    assert_eq!(manifests::singleton().all_values("Built-By"), vec!["ci", "someone-else"]);
}
