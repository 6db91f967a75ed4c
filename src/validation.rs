use crate::error::{EnterMediaError, EnterMediaResult};
use std::path::Path;

/// Checks applied to a file before it is sent to EnterMedia
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRule {
    /// Case-insensitive extension allow-list. Empty allows everything.
    AllowedExtensions(Vec<String>),
    /// Maximum size in bytes. `0` means unlimited.
    MaxFileSize(u64),
}

impl UploadRule {
    /// Parse a space-separated extension list like `"jpg png gif"`
    pub fn extensions(list: &str) -> Self {
        Self::AllowedExtensions(list.split_whitespace().map(str::to_lowercase).collect())
    }

    pub fn check(&self, filename: &str, size: u64) -> EnterMediaResult<()> {
        match self {
            UploadRule::AllowedExtensions(allowed) if !allowed.is_empty() => {
                let extension = Path::new(filename)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(str::to_lowercase)
                    .unwrap_or_default();
                if allowed.iter().any(|a| a.eq_ignore_ascii_case(&extension)) {
                    Ok(())
                } else {
                    Err(EnterMediaError::invalid_param(format!(
                        "{} is not an allowed file type, allowed: {}",
                        filename,
                        allowed.join(" ")
                    )))
                }
            }
            UploadRule::MaxFileSize(max) if *max > 0 && size > *max => {
                Err(EnterMediaError::invalid_param(format!(
                    "{} is {} bytes, exceeding the limit of {} bytes",
                    filename, size, max
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Run every rule, stopping at the first violation
pub fn check_all(rules: &[UploadRule], filename: &str, size: u64) -> EnterMediaResult<()> {
    rules.iter().try_for_each(|rule| rule.check(filename, size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        let rule = UploadRule::extensions("jpg png");
        assert!(rule.check("photo.JPG", 10).is_ok());
        assert!(rule.check("doc.pdf", 10).is_err());
        assert!(rule.check("no_extension", 10).is_err());
    }

    #[test]
    fn empty_extension_list_allows_all() {
        assert!(UploadRule::AllowedExtensions(vec![]).check("x.exe", 1).is_ok());
    }

    #[test]
    fn size_limit() {
        assert!(UploadRule::MaxFileSize(100).check("a.jpg", 100).is_ok());
        assert!(UploadRule::MaxFileSize(100).check("a.jpg", 101).is_err());
        assert!(UploadRule::MaxFileSize(0).check("a.jpg", u64::MAX).is_ok());
    }

    #[test]
    fn check_all_reports_first_violation() {
        let rules = [UploadRule::extensions("jpg"), UploadRule::MaxFileSize(5)];
        let err = check_all(&rules, "big.png", 10).unwrap_err();
        assert!(err.to_string().contains("not an allowed file type"));
    }
}
