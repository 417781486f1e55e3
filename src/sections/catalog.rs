/// Section ids scored by default, in declaration order.
pub const DEFAULT_SECTION_IDS: [&str; 10] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// A declared questionnaire section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDecl {
    /// Short id, e.g. `one`
    pub id: String,
    /// Scoring key and page-name prefix, e.g. `sectionOne`
    pub name: String,
    /// Survey value holding the enablement flag, e.g. `section_one_enable`
    pub flag_key: String,
}

impl SectionDecl {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = section_name(&id);
        let flag_key = format!("section_{}_enable", id);
        Self { id, name, flag_key }
    }
}

/// `one` -> `sectionOne`
fn section_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => format!("section{}{}", first.to_uppercase(), chars.as_str()),
        None => "section".to_string(),
    }
}

/// Ordered list of the sections a questionnaire declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    sections: Vec<SectionDecl>,
}

impl Default for SectionCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_IDS)
    }
}

impl SectionCatalog {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: ids.into_iter().map(SectionDecl::new).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDecl> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by its scoring name.
    pub fn get(&self, name: &str) -> Option<&SectionDecl> {
        self.sections.iter().find(|s| s.name == name)
    }
}
