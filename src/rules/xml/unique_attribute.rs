use super::{XmlDocument, read, xml_files};
use jxlint_common::{Category, LintRule, RuleError, Severity, Violation};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Detect an attribute given twice on the same element
pub struct UniqueAttribute;

impl UniqueAttribute {
    fn check_document(&self, document: &XmlDocument, file: &Path) -> Option<Violation> {
        document.tags.iter().find_map(|tag| {
            let mut seen = HashSet::new();
            tag.attributes
                .iter()
                .find(|attr| !seen.insert(attr.name.as_str()))
                .map(|attr| {
                    Violation::new(
                        self,
                        file,
                        format!("Duplicate attribute \"{}\" in <{}>", attr.name, tag.name),
                    )
                    .with_line(tag.line)
                })
        })
    }
}

impl LintRule for UniqueAttribute {
    fn name(&self) -> &str {
        "Unique attribute"
    }

    fn summary(&self) -> &str {
        "Attributes within a tag must be unique."
    }

    fn detailed_description(&self) -> &str {
        "An attribute name may appear only once in the same start tag. \
         Most parsers reject the document, the rest silently keep one of the values."
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::LINT
    }

    fn files_to_validate(&self, source_dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
        xml_files(source_dir)
    }

    fn lint_error(&self, file: &Path) -> Result<Option<Violation>, RuleError> {
        Ok(self.check_document(&read(file)?, file))
    }
}
