//! Session credentials and token handling

pub mod blocking;

use crate::errors::{MediawikiApiError, Result};
use std::fs;

/// Login information for a wiki account (usually a bot password)
#[derive(Debug, Clone)]
pub struct LoginInfo {
    pub username: Box<str>,
    pub password: Box<str>,
}

impl LoginInfo {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Get login information from text file at provided path
///
/// # Arguments
/// * `path` - Path to login file (username on first line, password on second).
///   Lines are taken as they are, so surrounding spaces stay part of the value.
///
/// # Returns
/// * Returns LoginInfo struct with username and password
///
/// # Example
/// ```no_run
/// use mediawiki_api::networking::get_login_info;
/// let info = get_login_info("log.txt").expect("bad login file");
/// ```
pub fn get_login_info(path: &str) -> Result<LoginInfo> {
    let file = fs::read_to_string(path)?;
    let mut lines = file.lines();
    let username = lines.next().ok_or_else(|| {
        MediawikiApiError::ConfigurationError(format!("username not found in {path}"))
    })?;
    let password = lines.next().ok_or_else(|| {
        MediawikiApiError::ConfigurationError(format!("password not found in {path}"))
    })?;
    Ok(LoginInfo::new(username, password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_login_info_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ExampleBot@task").unwrap();
        writeln!(file, "s3cret").unwrap();

        let info = get_login_info(file.path().to_str().unwrap()).unwrap();
        assert_eq!(&*info.username, "ExampleBot@task");
        assert_eq!(&*info.password, "s3cret");
    }

    #[test]
    fn test_login_info_missing_password() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ExampleBot").unwrap();

        let err = get_login_info(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            MediawikiApiError::ConfigurationError(msg) if msg.contains("password")
        ));
    }

    #[test]
    fn test_login_info_keeps_lines_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ExampleBot\r\n  pass phrase  \n").unwrap();

        let info = get_login_info(file.path().to_str().unwrap()).unwrap();
        assert_eq!(&*info.username, "ExampleBot");
        assert_eq!(&*info.password, "  pass phrase  ");
    }

    #[test]
    fn test_login_info_missing_file() {
        let err = get_login_info("/nonexistent/login.txt").unwrap_err();
        assert!(matches!(err, MediawikiApiError::IoError(_)));
    }
}
