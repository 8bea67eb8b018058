//! Local naming rules, checked before any request is built.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

/// Worker script name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerName(String);

/// R2 bucket name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

/// Pages project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

/// D1 database name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseName(String);

/// Key in a KV namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KvKey(String);

macro_rules! name_type {
    ($ty:ident) => {
        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

name_type!(WorkerName);
name_type!(BucketName);
name_type!(ProjectName);
name_type!(DatabaseName);
name_type!(KvKey);

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

impl FromStr for WorkerName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > 63 {
            bail!("Invalid worker name '{}': must be 1-63 characters.", s);
        }
        if !s.chars().all(|c| is_lower_alnum(c) || c == '-' || c == '_') {
            bail!(
                "Invalid worker name '{}': use lowercase letters, digits, '-' or '_'.",
                s
            );
        }
        if s.starts_with('-') || s.ends_with('-') {
            bail!(
                "Invalid worker name '{}': must not start or end with '-'.",
                s
            );
        }
        Ok(WorkerName(s.to_string()))
    }
}

impl FromStr for BucketName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() < 3 || s.len() > 63 {
            bail!("Invalid bucket name '{}': must be 3-63 characters.", s);
        }
        if !s.chars().all(|c| is_lower_alnum(c) || c == '-') {
            bail!(
                "Invalid bucket name '{}': use lowercase letters, digits and '-'.",
                s
            );
        }
        let starts_ok = s.chars().next().is_some_and(is_lower_alnum);
        let ends_ok = s.chars().last().is_some_and(is_lower_alnum);
        if !starts_ok || !ends_ok {
            bail!(
                "Invalid bucket name '{}': must start and end with a letter or digit.",
                s
            );
        }
        Ok(BucketName(s.to_string()))
    }
}

impl FromStr for ProjectName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > 58 {
            bail!("Invalid project name '{}': must be 1-58 characters.", s);
        }
        if !s.chars().all(|c| is_lower_alnum(c) || c == '-') {
            bail!(
                "Invalid project name '{}': use lowercase letters, digits and '-'.",
                s
            );
        }
        if s.starts_with('-') || s.ends_with('-') {
            bail!(
                "Invalid project name '{}': must not start or end with '-'.",
                s
            );
        }
        Ok(ProjectName(s.to_string()))
    }
}

impl FromStr for DatabaseName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > 64 {
            bail!("Invalid database name '{}': must be 1-64 characters.", s);
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!(
                "Invalid database name '{}': use letters, digits, '-' or '_'.",
                s
            );
        }
        Ok(DatabaseName(s.to_string()))
    }
}

impl FromStr for KvKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            bail!("KV key must not be empty.");
        }
        if s.len() > 512 {
            bail!("KV key is {} bytes long; the limit is 512.", s.len());
        }
        if s == "." || s == ".." {
            bail!("KV key must not be '.' or '..'.");
        }
        Ok(KvKey(s.to_string()))
    }
}
