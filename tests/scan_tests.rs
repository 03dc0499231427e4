mod common;

use anyhow::Result;
use common::{TestProject, key};
use projpack::commands;
use projpack::config::ExclusionRules;
use projpack::manifest::{EntryType, Manifest, ManifestEntry};
use projpack::scanner::{ScanOptions, WalkStrategy, scan};
use std::fs;

fn entry(entry_type: EntryType, include: bool) -> Option<ManifestEntry> {
    Some(ManifestEntry {
        entry_type,
        include,
    })
}

#[test]
fn test_node_modules_scenario_end_to_end() -> Result<()> {
    let project = TestProject::new(r#"{"excluded_directories": ["node_modules", "ai-supp", "projects"]}"#)?;
    project.file("node_modules/pkg/index.js", "module.exports = {}")?;
    project.file("src/app.py", "print('hi')")?;

    commands::scan::execute(&project.ctx, &project.ctx.default_config_path(), ScanOptions::default())?;
    let manifest = Manifest::load(&project.ctx.manifest_path())?;

    assert_eq!(manifest.get("node_modules").copied(), entry(EntryType::Directory, false));
    assert_eq!(manifest.get(&key("node_modules/pkg")).copied(), entry(EntryType::Directory, false));
    assert_eq!(
        manifest.get(&key("node_modules/pkg/index.js")).copied(),
        entry(EntryType::File, false)
    );
    assert_eq!(manifest.get("src").copied(), entry(EntryType::Directory, true));
    assert_eq!(manifest.get(&key("src/app.py")).copied(), entry(EntryType::File, true));

    Ok(())
}

#[test]
fn test_compiled_artifact_without_rule() -> Result<()> {
    let project = TestProject::new("{}")?;
    project.file("thing.pyc", "\0\0")?;

    let output = scan(project.root(), &ExclusionRules::default(), ScanOptions::default())?;
    let thing = output
        .entries
        .iter()
        .find(|e| e.name == "thing.pyc")
        .expect("thing.pyc scanned");

    assert!(!thing.included);
    assert!(!thing.relevant);
    assert!(!output.abbreviated.lines().iter().any(|l| l.contains("thing.pyc")));
    assert!(output.full.lines().iter().any(|l| l == "- thing.pyc"));
    Ok(())
}

#[test]
fn test_excluded_but_relevant_and_included_but_irrelevant() -> Result<()> {
    let project = TestProject::new("{}")?;
    project.file("dist/bundle.js", "")?;
    project.file("Cargo.toml", "")?;
    let rules = ExclusionRules::new(["dist"], Vec::<String>::new());

    let output = scan(project.root(), &rules, ScanOptions::default())?;
    let find = |name: &str| output.entries.iter().find(|e| e.name == name).cloned();

    let bundle = find("bundle.js").expect("bundle.js");
    assert!(!bundle.included);
    assert!(bundle.relevant);

    let cargo = find("Cargo.toml").expect("Cargo.toml");
    assert!(cargo.included);
    assert!(!cargo.relevant);
    Ok(())
}

#[test]
fn test_output_is_deterministic() -> Result<()> {
    let project = TestProject::new(r#"{"excluded_directories": ["ai-supp"]}"#)?;
    for name in ["zeta.py", "alpha.py", "Beta.py", "mid/inner.ts", "mid/a.css"] {
        project.file(name, "")?;
    }
    let config = project.ctx.default_config_path();

    commands::scan::execute(&project.ctx, &config, ScanOptions::default())?;
    let first = (
        fs::read_to_string(project.ctx.full_listing_path())?,
        fs::read_to_string(project.ctx.manifest_path())?,
    );

    commands::scan::execute(&project.ctx, &config, ScanOptions::default())?;
    let second = (
        fs::read_to_string(project.ctx.full_listing_path())?,
        fs::read_to_string(project.ctx.manifest_path())?,
    );

    assert_eq!(first, second);
    // byte order: uppercase sorts before lowercase
    let beta = first.0.find("- Beta.py").expect("Beta.py listed");
    let alpha = first.0.find("- alpha.py").expect("alpha.py listed");
    assert!(beta < alpha);
    Ok(())
}

#[test]
fn test_excluded_directory_is_still_walked_for_manifest() -> Result<()> {
    let project = TestProject::new("{}")?;
    project.file(".git/objects/ab/cdef", "blob")?;
    project.dir(".git/refs")?;
    let rules = ExclusionRules::new([".git"], Vec::<String>::new());

    let full = scan(project.root(), &rules, ScanOptions::default())?;
    let pruned = scan(
        project.root(),
        &rules,
        ScanOptions {
            strategy: WalkStrategy::Iterative,
            prune_excluded: true,
        },
    )?;

    assert!(full.manifest.get(&key(".git/objects/ab/cdef")).is_some());
    assert!(full.manifest.get(&key(".git/refs")).is_some());
    assert!(
        full.manifest
            .iter()
            .filter(|(k, _)| k.starts_with(".git"))
            .all(|(_, e)| !e.include)
    );

    assert!(pruned.manifest.get(".git").is_some());
    assert!(pruned.manifest.get(&key(".git/objects")).is_none());
    Ok(())
}

#[test]
fn test_malformed_config_aborts_before_scan() -> Result<()> {
    let project = TestProject::new("{ \"excluded_directories\": [")?;
    project.file("src/app.py", "")?;

    let result = commands::scan::execute(
        &project.ctx,
        &project.ctx.default_config_path(),
        ScanOptions::default(),
    );

    assert!(result.is_err());
    assert!(!project.ctx.manifest_path().exists());
    Ok(())
}

#[test]
fn test_toml_config() -> Result<()> {
    let project = TestProject::new("{}")?;
    let toml_path = project.ctx.script_dir.join("exclusions-config.toml");
    fs::write(&toml_path, "excluded_files = [\"secret.py\"]\n")?;
    project.file("secret.py", "")?;
    project.file("open.py", "")?;

    let output = commands::scan::execute(&project.ctx, &toml_path, ScanOptions::default())?;

    assert_eq!(output.manifest.get("secret.py").map(|e| e.include), Some(false));
    assert_eq!(output.manifest.get("open.py").map(|e| e.include), Some(true));
    Ok(())
}
