use super::{XmlDocument, read, xml_files};
use jxlint_common::{Category, LintRule, RuleError, Severity, Violation};
use std::path::{Path, PathBuf};

/// Require `encoding` in the XML declaration
pub struct Encoding;

impl Encoding {
    fn check_document(&self, document: &XmlDocument, file: &Path) -> Option<Violation> {
        let message = match &document.declaration {
            None => "XML declaration is missing, encoding cannot be determined",
            Some(decl) if decl.encoding.as_deref().is_none_or(str::is_empty) => {
                "Encoding is not specified"
            }
            Some(_) => return None,
        };
        Some(Violation::new(self, file, message).with_line(1))
    }
}

impl LintRule for Encoding {
    fn name(&self) -> &str {
        "Encoding"
    }

    fn summary(&self) -> &str {
        "Encoding of the XML must be specified."
    }

    fn detailed_description(&self) -> &str {
        "The encoding of the XML must be specified in the declaration. \
         For example, <?xml version=\"1.0\" encoding=\"UTF-8\"?>."
    }

    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn category(&self) -> Category {
        Category::DEFAULT
    }

    fn files_to_validate(&self, source_dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
        xml_files(source_dir)
    }

    fn lint_error(&self, file: &Path) -> Result<Option<Violation>, RuleError> {
        Ok(self.check_document(&read(file)?, file))
    }
}
