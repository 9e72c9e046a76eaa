use super::{XmlDocument, read, xml_files};
use jxlint_common::{Category, LintRule, RuleError, Severity, Violation};
use std::path::{Path, PathBuf};

/// Require an `<author>` element somewhere in the document
pub struct AuthorTag;

impl AuthorTag {
    fn check_document(&self, document: &XmlDocument, file: &Path) -> Option<Violation> {
        let has_author = document
            .tags
            .iter()
            .any(|tag| tag.name.eq_ignore_ascii_case("author"));

        (!has_author).then(|| Violation::new(self, file, "Author tag is missing"))
    }
}

impl LintRule for AuthorTag {
    fn name(&self) -> &str {
        "Author tag"
    }

    fn summary(&self) -> &str {
        "An author tag must be specified."
    }

    fn detailed_description(&self) -> &str {
        "For traceability, every document must name its author in an <author> element."
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::STYLE
    }

    fn files_to_validate(&self, source_dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
        xml_files(source_dir)
    }

    fn lint_error(&self, file: &Path) -> Result<Option<Violation>, RuleError> {
        Ok(self.check_document(&read(file)?, file))
    }
}
