//! Partial PyPI mirror.
//!
//! Distributions are fetched with `pip download` into
//! `<ods_dir>/pythonlibraries` once per platform, then arranged as a
//! "simple" repository (PEP 503) under `<ods_dir>/pypi` that pip can use as
//! its `index-url`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::{ensure_dir, escape_html};
use crate::error::Result;
use crate::sys::{self, OutputPolicy};

/// Directory `pip download` writes into.
pub const DOWNLOAD_DIR: &str = "pythonlibraries";
/// Directory holding the simple repository.
pub const MIRROR_DIR: &str = "pypi";

static SEPARATOR_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("SEPARATOR_RUN_REGEX must compile"));

const SDIST_SUFFIXES: &[&str] = &[".tar.gz", ".tar.bz2", ".zip"];

/// Arguments for one `pip download` run.
pub fn pip_download_args(
    dest: &Path,
    platform: &str,
    python_version: &str,
    packages: &[String],
) -> Vec<String> {
    let mut args = vec![
        "download".to_string(),
        "--dest".to_string(),
        dest.to_string_lossy().into_owned(),
        "--only-binary=:all:".to_string(),
        "--platform".to_string(),
        platform.to_string(),
        "--python-version".to_string(),
        python_version.to_string(),
    ];
    args.extend(packages.iter().cloned());
    args
}

/// Download `packages` for every platform with the `pip` binary at `pip`,
/// then rebuild the simple repository. Returns the mirror directory.
pub fn download_python_libraries(
    pip: &Path,
    ods_dir: &Path,
    packages: &[String],
    python_version: &str,
    platforms: &[String],
    output: OutputPolicy,
) -> Result<PathBuf> {
    let download_dir = ensure_dir(ods_dir, DOWNLOAD_DIR)?;
    let program = pip.to_string_lossy();

    for platform in platforms {
        tracing::info!("Downloading Python packages for {}", platform);
        sys::run(
            &program,
            pip_download_args(&download_dir, platform, python_version, packages),
            output,
        )?;
    }

    let mirror_dir = ods_dir.join(MIRROR_DIR);
    let projects = create_mirror(&download_dir, &mirror_dir)?;
    tracing::info!("PyPI mirror has {} projects", projects);
    Ok(mirror_dir)
}

/// Normalized project name: runs of `-`, `_` and `.` become `-`, lowercased.
///
/// # Example
///
/// ```
/// use offlinedatasci::download::pypi::normalize_project_name;
///
/// assert_eq!(normalize_project_name("Jupyter_Core"), "jupyter-core");
/// assert_eq!(normalize_project_name("zope.interface"), "zope-interface");
/// ```
pub fn normalize_project_name(name: &str) -> String {
    SEPARATOR_RUN_REGEX.replace_all(name, "-").to_lowercase()
}

/// Project name of a distribution file, or `None` if it is not a wheel or
/// source archive.
pub fn project_name(filename: &str) -> Option<String> {
    if let Some(stem) = filename.strip_suffix(".whl") {
        let name = stem.split('-').next().filter(|n| !n.is_empty())?;
        return Some(normalize_project_name(name));
    }

    let stem = SDIST_SUFFIXES
        .iter()
        .find_map(|suffix| filename.strip_suffix(suffix))?;
    let (name, _version) = stem.rsplit_once('-')?;
    if name.is_empty() {
        return None;
    }
    Some(normalize_project_name(name))
}

fn render_index(title: &str, links: &[(String, String)]) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n",
        escape_html(title)
    );
    for (href, text) in links {
        html.push_str(&format!(
            "<a href=\"{}\">{}</a><br/>\n",
            escape_html(href),
            escape_html(text)
        ));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Arrange the distributions in `download_dir` as a simple repository in
/// `mirror_dir`. Returns the number of projects.
///
/// Files that are neither wheels nor source archives are ignored.
pub fn create_mirror(download_dir: &Path, mirror_dir: &Path) -> Result<usize> {
    let mut projects: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in fs::read_dir(download_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().into_owned();
        match project_name(&filename) {
            Some(project) => projects.entry(project).or_default().push(filename),
            None => tracing::debug!("Skipping {} in {}", filename, download_dir.display()),
        }
    }

    fs::create_dir_all(mirror_dir)?;
    for (project, files) in projects.iter_mut() {
        files.sort();
        let project_dir = mirror_dir.join(project);
        fs::create_dir_all(&project_dir)?;
        for file in files.iter() {
            let dest = project_dir.join(file);
            if !dest.exists() {
                fs::copy(download_dir.join(file), &dest)?;
            }
        }
        let links: Vec<(String, String)> = files.iter().map(|f| (f.clone(), f.clone())).collect();
        fs::write(
            project_dir.join("index.html"),
            render_index(&format!("Links for {}", project), &links),
        )?;
    }

    let root_links: Vec<(String, String)> = projects
        .keys()
        .map(|p| (format!("{}/", p), p.clone()))
        .collect();
    fs::write(
        mirror_dir.join("index.html"),
        render_index("Simple index", &root_links),
    )?;

    Ok(projects.len())
}
