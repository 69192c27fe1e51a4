//! Rendered lesson websites.
//!
//! Lessons are mirrored with `wget` into `<ods_dir>/lessons/<source>/<lesson>`
//! and a landing page linking every lesson is written to
//! `<ods_dir>/lessons/index.html`.

use std::fs;
use std::path::{Path, PathBuf};

use super::{ensure_dir, escape_html};
use crate::error::Result;
use crate::sys::{self, OutputPolicy};

/// Flags used for every lesson mirror.
const BASE_WGET_ARGS: &[&str] = &[
    "-r",
    "-k",
    "-N",
    "-c",
    "--no-parent",
    "--no-host-directories",
];

/// Extra flags for sites that pull stylesheets from another host.
const SPANNING_WGET_ARGS: &[&str] = &["-p", "-E", "-H", "-D", "swcarpentry.github.io", "-K"];

/// A group of lessons mirrored into one directory.
#[derive(Debug, Clone, Copy)]
pub struct LessonSource {
    /// Directory name under `lessons/`.
    pub name: &'static str,
    /// Lesson site roots.
    pub urls: &'static [&'static str],
    /// Additional `wget` flags for this source.
    pub extra_args: &'static [&'static str],
}

/// Lesson sources in download order.
pub static LESSON_SOURCES: &[LessonSource] = &[
    LessonSource {
        name: "data-carpentry",
        urls: &[
            "https://datacarpentry.org/ecology-workshop/",
            "https://datacarpentry.org/spreadsheet-ecology-lesson/",
            "http://datacarpentry.org/OpenRefine-ecology-lesson/",
            "https://datacarpentry.org/R-ecology-lesson/",
            "https://datacarpentry.org/python-ecology-lesson/",
            "https://datacarpentry.org/sql-ecology-lesson/",
        ],
        extra_args: &[],
    },
    LessonSource {
        name: "library-carpentry",
        urls: &[
            "https://librarycarpentry.org/lc-overview/",
            "https://librarycarpentry.org/lc-data-intro/",
            "https://librarycarpentry.org/lc-shell/",
            "https://librarycarpentry.org/lc-open-refine/",
            "https://librarycarpentry.org/lc-git/",
        ],
        extra_args: &[],
    },
    LessonSource {
        name: "software-carpentry",
        urls: &[
            "http://swcarpentry.github.io/shell-novice",
            "http://swcarpentry.github.io/git-novice",
            "http://swcarpentry.github.io/python-novice-inflammation",
            "http://swcarpentry.github.io/python-novice-gapminder",
            "http://swcarpentry.github.io/r-novice-inflammation",
            "http://swcarpentry.github.io/r-novice-gapminder",
            "http://swcarpentry.github.io/shell-novice-es",
            "http://swcarpentry.github.io/git-novice-es",
            "http://swcarpentry.github.io/r-novice-gapminder-es",
        ],
        extra_args: SPANNING_WGET_ARGS,
    },
];

/// Arguments to mirror `url` into `dest` with `wget`.
pub fn wget_args(source: &LessonSource, dest: &Path, url: &str) -> Vec<String> {
    let mut args: Vec<String> = source
        .extra_args
        .iter()
        .chain(BASE_WGET_ARGS)
        .map(|a| a.to_string())
        .collect();
    args.push("-P".to_string());
    args.push(dest.to_string_lossy().into_owned());
    args.push(url.to_string());
    args
}

/// Mirror all lessons with the `wget` binary at `wget`, then write the index.
///
/// `wget` exits non-zero when any page of a recursive mirror fails, so
/// failures are logged and the remaining lessons are still fetched.
/// Returns the path of the index page.
pub fn download_lessons(wget: &Path, ods_dir: &Path, output: OutputPolicy) -> Result<PathBuf> {
    let lesson_path = ensure_dir(ods_dir, "lessons")?;
    let program = wget.to_string_lossy();

    for source in LESSON_SOURCES {
        let dest = lesson_path.join(source.name);
        for url in source.urls {
            tracing::info!("Downloading lesson from {}", url);
            if let Err(e) = sys::run(&program, wget_args(source, &dest, url), output) {
                tracing::warn!("Lesson {} may be incomplete: {}", url, e);
            }
        }
    }

    add_lesson_index_page(&lesson_path)
}

/// Python-style title case: the first letter of each alphabetic run is
/// uppercased, the rest lowercased. Dashes become spaces.
pub fn title_case(name: &str) -> String {
    let mut titled = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if at_word_start {
                titled.extend(c.to_uppercase());
            } else {
                titled.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            titled.push(c);
            at_word_start = true;
        }
    }
    titled
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Render the landing page for `sections` of `(source, lessons)`.
pub fn render_lesson_index(sections: &[(String, Vec<String>)]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Lessons</title>\n</head>\n<body>\n<h1>Lesson Material</h1>\n",
    );
    for (source, lessons) in sections {
        html.push_str(&format!("<h2>{}</h2>\n<ul>\n", escape_html(&title_case(source))));
        for lesson in lessons {
            let href = format!("{}/{}/index.html", source, lesson);
            html.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                escape_html(&href),
                escape_html(&title_case(lesson))
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Write `index.html` in `lesson_path` linking every `<source>/<lesson>`
/// directory found there.
pub fn add_lesson_index_page(lesson_path: &Path) -> Result<PathBuf> {
    let mut sections = Vec::new();
    for source in sorted_subdirs(lesson_path)? {
        let lessons = sorted_subdirs(&lesson_path.join(&source))?;
        sections.push((source, lessons));
    }

    let index = lesson_path.join("index.html");
    fs::write(&index, render_lesson_index(&sections))?;
    tracing::debug!("Wrote lesson index with {} sections", sections.len());
    Ok(index)
}
