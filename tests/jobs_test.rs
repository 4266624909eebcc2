use indexmap::IndexMap;
use kiln::error::Error;
use kiln::jobs::{CurrentSyntaxJobs, JobParser, JobSyntax, LegacyJobs, RenderJob, TargetResolution};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn current(spec: &str) -> Vec<RenderJob> {
    CurrentSyntaxJobs::new(spec).parse().unwrap()
}

#[test]
fn test_current_syntax_preserves_order() {
    let jobs = current("z.j2 out/z\na.j2 out/a mode=700\nm.j2 out/m");

    assert_eq!(
        jobs,
        vec![
            RenderJob::new("z.j2", "out/z", None),
            RenderJob::new("a.j2", "out/a", Some(0o700)),
            RenderJob::new("m.j2", "out/m", None),
        ]
    );
}

#[test]
fn test_current_syntax_quoted_paths() {
    let jobs = current(r#""my template.j2" 'my target.txt' mode=0755"#);

    assert_eq!(jobs, vec![RenderJob::new("my template.j2", "my target.txt", Some(0o755))]);
}

#[test]
fn test_current_syntax_ignores_trailing_text() {
    let jobs = current("a.j2 a.txt b.j2");

    assert_eq!(jobs, vec![RenderJob::new("a.j2", "a.txt", None)]);
    assert!(current("lonely").is_empty());
    assert!(current("").is_empty());
}

#[test]
fn test_current_syntax_rejects_non_octal_mode() {
    let err = CurrentSyntaxJobs::new("a.j2 a.txt mode=789").parse().unwrap_err();

    assert!(matches!(err, Error::ConfigError(msg) if msg.contains("789")));
}

#[test]
fn test_legacy_broadcasts_single_flag() {
    let jobs = LegacyJobs::new(list(&["a", "b"]), list(&["x", "y"]), list(&["true"]))
        .parse()
        .unwrap();

    assert_eq!(
        jobs,
        vec![
            RenderJob::new("a", "x", Some(0o755)),
            RenderJob::new("b", "y", Some(0o755)),
        ]
    );
}

#[test]
fn test_legacy_flags() {
    let jobs = LegacyJobs::new(list(&["a", "b"]), list(&["x", "y"]), vec![])
        .parse()
        .unwrap();
    assert!(jobs.iter().all(|job| job.mode.is_none()));

    let jobs = LegacyJobs::new(list(&["a", "\"b\""]), list(&["x", "'y'"]), list(&["off", "ON"]))
        .parse()
        .unwrap();
    assert_eq!(
        jobs,
        vec![
            RenderJob::new("a", "x", None),
            RenderJob::new("b", "y", Some(0o755)),
        ]
    );

    let err = LegacyJobs::new(
        list(&["a", "b", "c"]),
        list(&["x", "y", "z"]),
        list(&["true", "false"]),
    )
    .parse()
    .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_legacy_length_mismatch() {
    let cases = [
        (vec![], list(&["x"])),
        (list(&["a"]), vec![]),
        (list(&["a", "b"]), list(&["x"])),
    ];
    for (templates, targets) in cases {
        let err = LegacyJobs::new(templates, targets, vec![]).parse().unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}

#[test]
fn test_syntax_selection() {
    let mut options = IndexMap::new();
    assert!(JobSyntax::from_options(&options).unwrap().is_none());

    options.insert("template-file".to_string(), "a.j2".to_string());
    options.insert("target-file".to_string(), "/x".to_string());
    let legacy = JobSyntax::from_options(&options).unwrap().unwrap();
    assert!(matches!(legacy, JobSyntax::Legacy(_)));
    assert_eq!(legacy.root_option(), "base-dir");
    assert_eq!(legacy.reserved_names(), &["parts"]);
    assert_eq!(legacy.target_resolution(), TargetResolution::AlwaysJoin);

    options.insert("templates".to_string(), "b.j2 y".to_string());
    let current = JobSyntax::from_options(&options).unwrap().unwrap();
    assert!(matches!(current, JobSyntax::Current(_)));
    assert_eq!(current.root_option(), "root");
    assert_eq!(current.reserved_names(), &["parts", "jobs"]);
    assert_eq!(current.parse().unwrap(), vec![RenderJob::new("b.j2", "y", None)]);
}

#[test]
fn test_render_job_display() {
    assert_eq!(RenderJob::new("a.j2", "out", Some(0o755)).to_string(), "a.j2 -> out, mode=0755");
    assert_eq!(RenderJob::new("a.j2", "out", None).to_string(), "a.j2 -> out");
}
