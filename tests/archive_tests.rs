mod common;

use anyhow::Result;
use common::{TestProject, key};
use flate2::read::GzDecoder;
use projpack::commands;
use projpack::manifest::Manifest;
use projpack::scanner::ScanOptions;
use std::collections::HashSet;
use std::fs::{self, File};

fn archive_members(path: &std::path::Path) -> Result<HashSet<String>> {
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(path)?));
    let mut members = HashSet::new();
    for member in archive.entries()? {
        let member = member?;
        assert!(member.header().entry_type().is_file());
        members.insert(member.path()?.to_string_lossy().into_owned());
    }
    Ok(members)
}

fn setup() -> Result<TestProject> {
    let project = TestProject::new(
        r#"{"excluded_directories": ["ai-supp", "node_modules"], "excluded_files": [".env"]}"#,
    )?;
    project.file("src/app.py", "print('hi')")?;
    project.file("src/lib/util.py", "pass")?;
    project.file("src/cache.pyc", "")?;
    project.file(".env", "SECRET=1")?;
    project.file("node_modules/pkg/index.js", "")?;
    project.dir("empty")?;
    Ok(project)
}

#[test]
fn test_archive_matches_included_files() -> Result<()> {
    let project = setup()?;
    let config = project.ctx.default_config_path();

    commands::scan::execute(&project.ctx, &config, ScanOptions::default())?;
    let report = commands::archive::execute(&project.ctx)?;
    let manifest = Manifest::load(&project.ctx.manifest_path())?;

    let expected: HashSet<String> = manifest.included_files().map(str::to_string).collect();
    let members = archive_members(&project.ctx.archive_path())?;

    // soundness and completeness: every member is included, every included file is a member
    assert_eq!(members, expected);
    assert!(members.contains("src/app.py"));
    assert!(members.contains("src/lib/util.py"));
    assert!(!members.contains("src/cache.pyc"));
    assert!(!members.contains(".env"));
    assert!(!members.iter().any(|m| m.starts_with("node_modules")));
    assert!(!members.contains("empty"));
    assert!(report.missing.is_empty());
    Ok(())
}

#[test]
fn test_deleted_file_is_skipped_without_failing() -> Result<()> {
    let project = setup()?;
    commands::scan::execute(
        &project.ctx,
        &project.ctx.default_config_path(),
        ScanOptions::default(),
    )?;
    fs::remove_file(project.root().join("src/app.py"))?;

    let report = commands::archive::execute(&project.ctx)?;
    let members = archive_members(&project.ctx.archive_path())?;

    assert_eq!(report.missing, [project.root().join(key("src/app.py"))]);
    assert!(!members.contains("src/app.py"));
    assert!(members.contains("src/lib/util.py"));
    Ok(())
}

#[test]
fn test_hand_edited_manifest_controls_membership() -> Result<()> {
    let project = setup()?;
    fs::create_dir_all(project.ctx.output_dir())?;
    fs::write(
        project.ctx.manifest_path(),
        r#"{
    "node_modules": {"type": "directory", "include": true},
    "node_modules/pkg/index.js": {"type": "file", "include": true},
    "src/app.py": {"type": "file", "include": false},
    "src/lib": {"type": "directory", "include": true}
}"#,
    )?;

    let report = commands::archive::execute(&project.ctx)?;
    let members = archive_members(&project.ctx.archive_path())?;

    assert_eq!(report.added, ["node_modules/pkg/index.js"]);
    assert_eq!(
        members,
        HashSet::from(["node_modules/pkg/index.js".to_string()])
    );
    Ok(())
}

#[test]
fn test_manifest_escaping_root_is_corrupt() -> Result<()> {
    let project = setup()?;
    fs::create_dir_all(project.ctx.output_dir())?;
    fs::write(
        project.ctx.manifest_path(),
        r#"{"../outside.txt": {"type": "file", "include": true}}"#,
    )?;

    assert!(commands::archive::execute(&project.ctx).is_err());
    assert!(!project.ctx.archive_path().exists());
    Ok(())
}

#[test]
fn test_rerun_without_rules_never_packs_previous_archive() -> Result<()> {
    let project = TestProject::new("{}")?;
    project.file("src/app.py", "print('hi')")?;
    let config = project.ctx.default_config_path();

    commands::scan::execute(&project.ctx, &config, ScanOptions::default())?;
    commands::archive::execute(&project.ctx)?;

    // the second scan sees the first archive and marks it for inclusion
    commands::scan::execute(&project.ctx, &config, ScanOptions::default())?;
    let own_key = key("ai-supp/for-ai/project-key-files.tar.gz");
    let manifest = Manifest::load(&project.ctx.manifest_path())?;
    assert_eq!(manifest.get(&own_key).map(|e| e.include), Some(true));

    let report = commands::archive::execute(&project.ctx)?;
    let members = archive_members(&project.ctx.archive_path())?;

    assert_eq!(report.skipped_output, [own_key]);
    assert!(members.contains("src/app.py"));
    assert!(!members.iter().any(|m| m.ends_with(".tar.gz")));
    Ok(())
}

#[test]
fn test_directory_replaced_by_file_after_scan() -> Result<()> {
    let project = setup()?;
    commands::scan::execute(
        &project.ctx,
        &project.ctx.default_config_path(),
        ScanOptions::default(),
    )?;
    fs::remove_dir_all(project.root().join("src/lib"))?;
    fs::write(project.root().join("src/lib"), "not a directory any more")?;

    let report = commands::archive::execute(&project.ctx)?;
    let members = archive_members(&project.ctx.archive_path())?;

    assert_eq!(report.missing, [project.root().join(key("src/lib/util.py"))]);
    assert!(members.contains("src/app.py"));
    assert!(!members.contains("src/lib/util.py"));
    Ok(())
}
