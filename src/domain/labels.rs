use std::fmt;

/// A category of pre-defined labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCategory {
    /// Where the work came from (customer, internal, ...).
    Origin,
    /// What kind of work it is (feature, bug, ...).
    Type,
    /// Which project or component it belongs to.
    Project,
    /// How the work was resolved. Only offered when updating labels.
    Resolve,
}

impl LabelCategory {
    /// Categories offered when creating an issue, in selection order.
    pub const CREATION: [Self; 3] = [Self::Origin, Self::Type, Self::Project];

    /// Every category, in the order offered when updating labels.
    pub const ALL: [Self; 4] = [Self::Origin, Self::Type, Self::Project, Self::Resolve];
}

impl fmt::Display for LabelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Origin => "ORIGIN",
            Self::Type => "TYPE",
            Self::Project => "PROJECT",
            Self::Resolve => "RESOLVE",
        })
    }
}

/// The pre-defined labels a user may pick from, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTaxonomy {
    /// Origin labels.
    pub origin: Vec<String>,
    /// Type labels.
    pub kind: Vec<String>,
    /// Project labels.
    pub project: Vec<String>,
    /// Resolution labels.
    pub resolve: Vec<String>,
}

impl LabelTaxonomy {
    /// The allowed values for a category.
    #[must_use]
    pub fn values(&self, category: LabelCategory) -> &[String] {
        match category {
            LabelCategory::Origin => &self.origin,
            LabelCategory::Type => &self.kind,
            LabelCategory::Project => &self.project,
            LabelCategory::Resolve => &self.resolve,
        }
    }
}

/// Merges independently selected label subsets.
///
/// The result keeps the order of the subsets and of the labels within them;
/// a label chosen in more than one subset appears once, at its first
/// position. Empty subsets contribute nothing.
#[must_use]
pub fn union<'a, I>(subsets: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut labels: Vec<String> = Vec::new();
    for label in subsets.into_iter().flatten() {
        if !labels.contains(label) {
            labels.push(label.clone());
        }
    }
    labels
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
#[must_use]
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Joins a list back into the comma-separated form used on disk.
#[must_use]
pub fn join_csv(values: &[String]) -> String {
    values.join(",")
}
