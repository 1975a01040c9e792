use anyhow::{bail, Result};
use regex::Regex;
use tracing::debug;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::record::SalesRecord;

#[derive(Debug)]
struct Group {
    name: String,
    regex: Regex,
}

/// Maps line-item product names onto product groups.
///
/// With no groups defined, every product is reported under its own name.
#[derive(Debug, Default)]
pub struct Groups(Vec<Group>);

impl Groups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads product group configuration from `path`.
    ///
    /// The configuration file consists of group specifications, one per line,
    /// in the following format:
    ///
    /// ```txt
    /// GROUP_NAME | GROUP_REGEX
    /// ```
    ///
    /// Blank lines are ignored. `GROUP_REGEX` can be any regular expression
    /// supported by [`regex::Regex`].
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * The file cannot be opened
    /// * The file cannot be read
    /// * There is a line with an invalid format (no `|` character)
    /// * `GROUP_REGEX` is an invalid regular expression
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut groups = Self::new();
        let file = BufReader::new(File::open(&path)?);
        for line in file.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let Some((name, regex_str)) = line.split_once(" | ") else {
                bail!(
                    "reading {:?}: bad line format (missing |): {line}",
                    path.as_ref(),
                );
            };
            groups.add(name, regex_str)?;
        }
        debug!(groups = groups.0.len(), "read product groups");
        Ok(groups)
    }

    /// Adds a group: products whose name matches `regex_str` are reported
    /// as `name`.
    ///
    /// # Errors
    ///
    /// Returns any errors from compiling `regex_str` with [`Regex::new`].
    pub fn add(&mut self, name: &str, regex_str: &str) -> Result<()> {
        self.0.push(Group {
            name: name.to_string(),
            regex: Regex::new(regex_str)?,
        });
        Ok(())
    }

    /// Returns the name of the first group matching `product`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sales_summary::Groups;
    /// let mut groups = Groups::new();
    /// groups.add("Foo", "foo").unwrap();
    /// assert_eq!(groups.product_group("foo variant 1"), Some("Foo"));
    /// assert_eq!(groups.product_group("ungrouped product"), None);
    /// ```
    #[must_use]
    pub fn product_group(&self, product: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|g| g.regex.is_match(product))
            .map(|g| g.name.as_str())
    }

    /// Renames each record's product to its group name, where it has one.
    #[must_use]
    pub fn regroup(&self, mut records: Vec<SalesRecord>) -> Vec<SalesRecord> {
        if self.0.is_empty() {
            return records;
        }
        for record in &mut records {
            if let Some(name) = self.product_group(&record.product) {
                record.product = name.to_string();
            }
        }
        records
    }
}
