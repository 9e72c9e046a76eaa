use super::{XmlDocument, read, xml_files};
use jxlint_common::{Category, LintRule, RuleError, Severity, Violation};
use std::path::{Path, PathBuf};

/// Require `version` in the XML declaration
pub struct XmlVersionSpecified;

impl XmlVersionSpecified {
    fn check_document(&self, document: &XmlDocument, file: &Path) -> Option<Violation> {
        let has_version = document
            .declaration
            .as_ref()
            .and_then(|decl| decl.version.as_deref())
            .is_some_and(|version| !version.is_empty());

        (!has_version)
            .then(|| Violation::new(self, file, "XML version is not specified").with_line(1))
    }
}

impl LintRule for XmlVersionSpecified {
    fn name(&self) -> &str {
        "XML version specified"
    }

    fn summary(&self) -> &str {
        "Version of XML must be specified."
    }

    fn detailed_description(&self) -> &str {
        "The xml version should be specified. For example, <?xml version=\"1.0\" encoding=\"UTF-8\"?>."
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::LINT
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn files_to_validate(&self, source_dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
        xml_files(source_dir)
    }

    fn lint_error(&self, file: &Path) -> Result<Option<Violation>, RuleError> {
        Ok(self.check_document(&read(file)?, file))
    }
}
