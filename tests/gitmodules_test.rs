mod common;

use common::parse_in;
use git_submodule_sync::gitmodules::{self, ParseWarning};
use tempfile::TempDir;

#[test]
fn test_parses_full_entry() -> anyhow::Result<()> {
    let cwd = TempDir::new()?;
    std::fs::create_dir(cwd.path().join("lib"))?;

    let modules = parse_in(
        cwd.path(),
        "[submodule \"foo\"]\n\
         \tpath = ./lib\n\
         \turl = https://example.com/x.git\n\
         \tbranch = dev\n\
         \tshallow = true\n",
    )?;

    assert_eq!(modules.len(), 1);
    let foo = modules.get("foo").unwrap();
    assert_eq!(foo.name, "foo");
    assert!(foo.has_url);
    assert_eq!(foo.path, Some(cwd.path().join("lib")));
    assert!(foo.path.as_ref().unwrap().is_absolute());
    assert_eq!(foo.raw_path.as_deref(), Some("./lib"));
    assert_eq!(foo.url.as_deref(), Some("https://example.com/x.git"));
    assert_eq!(foo.branch.as_deref(), Some("dev"));
    assert_eq!(foo.shallow, Some(true));
    assert!(foo.is_shallow());
    Ok(())
}

#[test]
fn test_missing_directory_keeps_entry_without_path() -> anyhow::Result<()> {
    let cwd = TempDir::new()?;

    let modules = parse_in(
        cwd.path(),
        "[submodule \"gone\"]\n\tpath = vendor/gone\n\turl = https://example.com/gone.git\n",
    )?;

    let gone = modules.get("gone").unwrap();
    assert_eq!(gone.path, None);
    assert_eq!(gone.raw_path.as_deref(), Some("vendor/gone"));
    assert!(gone.url.is_some());
    Ok(())
}

#[test]
fn test_absolute_path_is_used_as_is() -> anyhow::Result<()> {
    let cwd = TempDir::new()?;
    let elsewhere = TempDir::new()?;

    let contents = format!(
        "[submodule \"abs\"]\npath = {}\nurl = https://example.com/abs.git\n",
        elsewhere.path().display()
    );
    let modules = parse_in(cwd.path(), &contents)?;

    assert_eq!(
        modules.get("abs").unwrap().path.as_deref(),
        Some(elsewhere.path())
    );
    Ok(())
}

#[test]
fn test_shallow_other_than_literals_is_absent() -> anyhow::Result<()> {
    let cwd = TempDir::new()?;

    let modules = parse_in(
        cwd.path(),
        "[submodule \"a\"]\nurl = https://a/a\nshallow = yes\n",
    )?;

    let a = modules.get("a").unwrap();
    assert_eq!(a.shallow, None);
    assert!(!a.is_shallow());
    Ok(())
}

#[test]
fn test_entries_keep_file_order() -> anyhow::Result<()> {
    let cwd = TempDir::new()?;

    let modules = parse_in(
        cwd.path(),
        "[submodule \"zeta\"]\nurl = https://z/z\n\
         [submodule \"alpha\"]\nurl = https://a/a\n\
         [submodule \"mid\"]\nurl = https://m/m\n",
    )?;

    let names: Vec<_> = modules.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
    Ok(())
}

#[test]
fn test_missing_url_warning_names_entry() -> anyhow::Result<()> {
    let cwd = TempDir::new()?;
    std::fs::write(
        cwd.path().join(".gitmodules"),
        "[submodule \"nourl\"]\npath = lib\n[submodule \"ok\"]\nurl = https://o/k\n",
    )?;

    let parsed = gitmodules::collect_modules(cwd.path(), ".gitmodules")?.unwrap();

    assert_eq!(parsed.modules.len(), 2);
    assert_eq!(
        parsed.warnings,
        [ParseWarning::MissingUrl("nourl".to_string())]
    );
    Ok(())
}

#[test]
fn test_missing_file_returns_none() -> anyhow::Result<()> {
    let cwd = TempDir::new()?;
    assert!(gitmodules::collect_modules(cwd.path(), ".gitmodules")?.is_none());
    Ok(())
}

#[test]
fn test_crlf_line_endings() -> anyhow::Result<()> {
    let cwd = TempDir::new()?;

    let modules = parse_in(
        cwd.path(),
        "[submodule \"win\"]\r\n\turl = https://w/w.git\r\n\tbranch = main\r\n",
    )?;

    let win = modules.get("win").unwrap();
    assert_eq!(win.url.as_deref(), Some("https://w/w.git"));
    assert_eq!(win.branch.as_deref(), Some("main"));
    Ok(())
}
