//! `.gitmodules` parsing.
//!
//! Only the subset of the submodule config grammar this tool acts on is
//! understood: `[submodule "<name>"]` headers and the `path`, `url`,
//! `branch` and `shallow` keys. Whitespace is stripped from every line
//! before it is classified, so values cannot contain spaces.

use crate::paths;
use anyhow::Context;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const SECTION_PREFIX: &str = "[submodule\"";
const SECTION_SUFFIX: &str = "\"]";

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9:/.]+").expect("valid url pattern"));
static BRANCH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.]+").expect("valid branch pattern"));

/// One `[submodule "..."]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleEntry {
    pub name: String,
    /// Absolute checkout directory. `None` when the `path=` value was
    /// missing or did not name an existing directory.
    pub path: Option<PathBuf>,
    /// The `path=` value as written.
    pub raw_path: Option<String>,
    pub url: Option<String>,
    pub branch: Option<String>,
    pub shallow: Option<bool>,
    /// Set once a `url=` line was seen, valid or not.
    pub has_url: bool,
}

impl SubmoduleEntry {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: None,
            raw_path: None,
            url: None,
            branch: None,
            shallow: None,
            has_url: false,
        }
    }

    #[must_use]
    pub fn is_shallow(&self) -> bool {
        self.shallow == Some(true)
    }
}

/// Submodule entries keyed by name, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmoduleMap {
    entries: Vec<SubmoduleEntry>,
}

impl SubmoduleMap {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SubmoduleEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubmoduleEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Starts a fresh entry. A name seen before is reset in place and keeps
    /// its original position.
    fn begin(&mut self, name: &str) -> usize {
        match self.entries.iter().position(|e| e.name == name) {
            Some(index) => {
                self.entries[index] = SubmoduleEntry::new(name);
                index
            }
            None => {
                self.entries.push(SubmoduleEntry::new(name));
                self.entries.len() - 1
            }
        }
    }
}

impl<'a> IntoIterator for &'a SubmoduleMap {
    type Item = &'a SubmoduleEntry;
    type IntoIter = std::slice::Iter<'a, SubmoduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Recognized keys, in the order lines are tested against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Url,
    Branch,
    Shallow,
    Path,
}

impl Key {
    const ALL: [Key; 4] = [Key::Url, Key::Branch, Key::Shallow, Key::Path];

    fn prefix(self) -> &'static str {
        match self {
            Key::Url => "url=",
            Key::Branch => "branch=",
            Key::Shallow => "shallow=",
            Key::Path => "path=",
        }
    }
}

/// A trimmed config line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Section(&'a str),
    Key(Key, &'a str),
    Blank,
    Unhandled(&'a str),
}

/// Removes every space, tab, carriage return and newline.
#[must_use]
pub fn trim(line: &str) -> String {
    line.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .collect()
}

/// Classifies a line that has already been through [`trim`].
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(name) = line
        .strip_prefix(SECTION_PREFIX)
        .and_then(|rest| rest.strip_suffix(SECTION_SUFFIX))
    {
        return Line::Section(name);
    }
    Key::ALL
        .into_iter()
        .find_map(|key| line.strip_prefix(key.prefix()).map(|v| Line::Key(key, v)))
        .unwrap_or(Line::Unhandled(line))
}

/// A value rejected by one of the `check_*` validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue {
    pub key: Key,
    pub value: String,
}

fn invalid(key: Key, value: &str) -> InvalidValue {
    InvalidValue {
        key,
        value: value.to_string(),
    }
}

pub fn check_url(value: &str) -> Result<&str, InvalidValue> {
    if URL_PATTERN.is_match(value) {
        Ok(value)
    } else {
        Err(invalid(Key::Url, value))
    }
}

pub fn check_branch(value: &str) -> Result<&str, InvalidValue> {
    if BRANCH_PATTERN.is_match(value) {
        Ok(value)
    } else {
        Err(invalid(Key::Branch, value))
    }
}

pub fn check_shallow(value: &str) -> Result<bool, InvalidValue> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(Key::Shallow, value)),
    }
}

/// Advisory findings from a parse. None of them stop parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    UnhandledLine(String),
    InvalidUrl { name: String, value: String },
    MissingUrl(String),
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnhandledLine(line) => write!(f, "unhandled line: {}", line),
            ParseWarning::InvalidUrl { name, value } => {
                write!(f, "invalid url for the module {}: {}", name, value)
            }
            ParseWarning::MissingUrl(name) => {
                write!(f, "unable to determine the url for the module: {}", name)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedModules {
    pub modules: SubmoduleMap,
    pub warnings: Vec<ParseWarning>,
}

/// Parses config text. Relative `path=` values resolve against `cwd`.
#[must_use]
pub fn parse_modules(cwd: &Path, contents: &str) -> ParsedModules {
    let mut parsed = ParsedModules::default();
    let mut current: Option<usize> = None;

    for raw in contents.lines() {
        let trimmed = trim(raw);
        let line = classify(&trimmed);

        if let Line::Section(name) = line {
            current = Some(parsed.modules.begin(name));
            continue;
        }
        let Some(index) = current else {
            continue;
        };
        let entry = &mut parsed.modules.entries[index];

        match line {
            Line::Key(Key::Url, value) => {
                entry.has_url = true;
                match check_url(value) {
                    Ok(url) => entry.url = Some(url.to_string()),
                    Err(rejected) => {
                        entry.url = None;
                        parsed.warnings.push(ParseWarning::InvalidUrl {
                            name: entry.name.clone(),
                            value: rejected.value,
                        });
                    }
                }
            }
            Line::Key(Key::Branch, value) => {
                entry.branch = check_branch(value).ok().map(str::to_string);
            }
            Line::Key(Key::Shallow, value) => {
                entry.shallow = check_shallow(value).ok();
            }
            Line::Key(Key::Path, value) => {
                entry.raw_path = Some(value.to_string());
                entry.path = paths::resolve_directory(cwd, value);
            }
            Line::Unhandled(text) => {
                parsed
                    .warnings
                    .push(ParseWarning::UnhandledLine(text.to_string()));
            }
            Line::Blank | Line::Section(_) => {}
        }
    }

    parsed.warnings.extend(
        parsed
            .modules
            .iter()
            .filter(|e| !e.has_url)
            .map(|e| ParseWarning::MissingUrl(e.name.clone())),
    );
    parsed
}

/// Reads and parses `<cwd>/<file_name>`. Returns `Ok(None)` when the file
/// does not exist.
pub fn collect_modules(cwd: &Path, file_name: &str) -> anyhow::Result<Option<ParsedModules>> {
    let path = paths::make_absolute(cwd, file_name);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(parse_modules(cwd, &contents)))
}
