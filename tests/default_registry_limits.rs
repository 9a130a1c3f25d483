//! Default Registry Parser Limits Test
//!
//! Runs in its own process so the environment is in place before the default
//! registry bootstraps.

use tempfile::tempdir;

#[test]
fn test_default_registry_accepts_unbounded_document_limit() {
    let dir = tempdir().unwrap();
    let meta = dir.path().join("META-INF");
    std::fs::create_dir_all(&meta).unwrap();
    std::fs::write(meta.join("MANIFEST.MF"), "A: 1\n").unwrap();

    std::env::set_var("MANIFESTS_PATH", dir.path());
    std::env::set_var("MANIFESTS__PARSE__MAX_DOCUMENT_BYTES", usize::MAX.to_string());

    assert_eq!(manifests::read("A").unwrap(), "1");
    // Registry stays usable after bootstrap
    assert!(manifests::exists("A").unwrap());
    assert!(!manifests::exists("B").unwrap());
}
