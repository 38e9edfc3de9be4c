use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ToggleError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no root element")]
    NoDocumentElement,
    #[error("no element matches {selector}")]
    ElementNotFound { selector: &'static str },
}
