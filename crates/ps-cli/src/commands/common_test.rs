use super::*;
use tempfile::TempDir;

fn global_for(dir: &Path, config: Option<String>) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: dir.display().to_string(),
        config,
    }
}

#[test]
fn test_worker_count_explicit() {
    assert_eq!(worker_count(3), 3);
}

#[test]
fn test_worker_count_zero_uses_cpus() {
    assert!(worker_count(0) >= 1);
}

#[test]
fn test_load_config_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&global_for(dir.path(), None)).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_config_discovers_project_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("planspeak.yml"), "workers: 2\n").unwrap();

    let config = load_config(&global_for(dir.path(), None)).unwrap();
    assert_eq!(config.workers, 2);
}

#[test]
fn test_load_config_explicit_missing_path_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yml").display().to_string();
    let err = load_config(&global_for(dir.path(), Some(missing))).unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
}

#[test]
fn test_load_plan_reports_path_on_parse_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    std::fs::write(&path, "<ShowPlanXML").unwrap();

    let err = load_plan(&path).unwrap_err();
    assert!(err.to_string().contains("broken.xml"));
}
