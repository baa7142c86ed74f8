//! Provenance tracking back to the source document

/// Location in the source document a record was extracted from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    /// Identifier of the owning chunk
    pub chunk_id: Option<String>,

    /// PDF page the chunk originates from (1-based)
    pub page: Option<u32>,

    /// Part heading
    pub part_title: Option<String>,

    /// Chapter heading
    pub chapter_title: Option<String>,

    /// Section heading
    pub section_title: Option<String>,
}

impl Provenance {
    /// Create provenance for a chunk on a given page
    pub fn new(chunk_id: impl Into<String>, page: u32) -> Self {
        Self {
            chunk_id: Some(chunk_id.into()),
            page: Some(page),
            ..Default::default()
        }
    }

    /// Attach the part/chapter/section headings
    pub fn with_titles(
        mut self,
        part_title: Option<String>,
        chapter_title: Option<String>,
        section_title: Option<String>,
    ) -> Self {
        self.part_title = part_title;
        self.chapter_title = chapter_title;
        self.section_title = section_title;
        self
    }

    /// Render the heading trail as `Part > Chapter > Section`
    ///
    /// Missing headings render as `None`, matching how the dashboard shows them.
    pub fn breadcrumb(&self) -> String {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "None".to_string());
        format!(
            "{} > {} > {}",
            show(&self.part_title),
            show(&self.chapter_title),
            show(&self.section_title)
        )
    }
}
