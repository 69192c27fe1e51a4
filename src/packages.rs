//! Default package collections and package selection.
//!
//! Workshops usually want a named collection of packages (e.g. everything
//! the Data Carpentry R lessons use) plus a few extras. [`package_selection`]
//! expands collection names and passes any other name through unchanged.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::OdsError;

/// Package ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    R,
    Python,
}

impl FromStr for Language {
    type Err = OdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "r" => Ok(Self::R),
            "python" => Ok(Self::Python),
            _ => Err(OdsError::UnknownLanguage {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::R => write!(f, "r"),
            Language::Python => write!(f, "python"),
        }
    }
}

const R_COLLECTIONS: &[(&str, &[&str])] = &[
    ("data-carpentry", &["tidyverse", "RSQLite"]),
    (
        "data-science",
        &[
            "dplyr", "ggplot2", "shiny", "lubridate", "knitr", "esquisse", "mlr3", "knitr",
            "DT", "ratdat",
        ],
    ),
];

const PYTHON_COLLECTIONS: &[(&str, &[&str])] = &[
    (
        "data-carpentry",
        &["pandas", "notebook", "numpy", "matplotlib", "plotnine"],
    ),
    (
        "software-carpentry",
        &["matplotlib", "notebook", "numpy", "pandas"],
    ),
    (
        "data-science",
        &[
            "scipy",
            "numpy",
            "pandas",
            "matplotlib",
            "keras",
            "scikit-learn",
            "beautifulsoup4",
            "seaborn",
            "torch",
        ],
    ),
];

/// Named package collections for a language.
pub fn default_packages(language: Language) -> &'static [(&'static str, &'static [&'static str])] {
    match language {
        Language::R => R_COLLECTIONS,
        Language::Python => PYTHON_COLLECTIONS,
    }
}

/// Expand collection names and de-duplicate.
///
/// Items naming a collection of `language` are replaced by its packages;
/// anything else is kept as a package name. The result is sorted.
///
/// # Example
///
/// ```
/// use offlinedatasci::packages::{package_selection, Language};
///
/// let packages = package_selection(Language::R, &["data-carpentry", "here"]);
/// assert_eq!(packages, vec!["RSQLite", "here", "tidyverse"]);
/// ```
pub fn package_selection<S: AsRef<str>>(language: Language, requested: &[S]) -> Vec<String> {
    let collections = default_packages(language);
    let mut selected = BTreeSet::new();

    for item in requested {
        let item = item.as_ref();
        match collections.iter().find(|(name, _)| *name == item) {
            Some((_, packages)) => {
                selected.extend(packages.iter().map(|p| p.to_string()));
            }
            None => {
                selected.insert(item.to_string());
            }
        }
    }

    selected.into_iter().collect()
}
