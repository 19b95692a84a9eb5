//! Built-in file capabilities.
//!
//! The three capabilities registered here are the whole surface the model may
//! touch: reading a file, listing a directory, and editing (or creating) a
//! file. A missing file or directory degrades to an empty result; other I/O
//! failures surface as capability errors.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::tool::{Capability, CapabilityError, CapabilityRegistry, ToolArgs, ToolOutput};

/// Build the default registry: `read_file`, `list_files`, `edit_file`.
pub fn file_toolkit() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    registry.register(ReadFileTool);
    registry.register(ListFilesTool);
    registry.register(EditFileTool);
    registry
}

/// Missing keys default to the empty string; capabilities tolerate them.
fn arg(args: &ToolArgs, key: &str) -> String {
    args.get(key).cloned().unwrap_or_default()
}

fn output(key: &str, value: impl Into<String>) -> ToolOutput {
    let mut out = ToolOutput::new();
    out.insert(key.to_string(), value.into());
    out
}

struct ReadRequest {
    path: PathBuf,
}

impl ReadRequest {
    fn from_args(args: &ToolArgs) -> Self {
        Self {
            path: arg(args, "path").into(),
        }
    }
}

struct ReadFileTool;

#[async_trait]
impl Capability for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a UTF-8 file as text. Expects {\"path\": string}."
    }

    async fn call(&self, args: &ToolArgs) -> Result<ToolOutput, CapabilityError> {
        let request = ReadRequest::from_args(args);
        let content = match fs::read_to_string(&request.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(output("content", content))
    }
}

struct ListRequest {
    path: PathBuf,
}

impl ListRequest {
    fn from_args(args: &ToolArgs) -> Self {
        Self {
            path: arg(args, "path").into(),
        }
    }
}

struct ListFilesTool;

#[async_trait]
impl Capability for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List the immediate entries of a directory. Expects {\"path\": string}."
    }

    async fn call(&self, args: &ToolArgs) -> Result<ToolOutput, CapabilityError> {
        let request = ListRequest::from_args(args);
        let mut names = Vec::new();
        match fs::read_dir(&request.path).await {
            Ok(mut dir) => {
                while let Some(entry) = dir.next_entry().await? {
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        names.sort();
        Ok(output("files", names.join(" ")))
    }
}

struct EditRequest {
    path: PathBuf,
    old: String,
    new: String,
}

impl EditRequest {
    fn from_args(args: &ToolArgs) -> Self {
        Self {
            path: arg(args, "path").into(),
            old: arg(args, "old"),
            new: arg(args, "new"),
        }
    }
}

struct EditFileTool;

#[async_trait]
impl Capability for EditFileTool {
    fn name(&self) -> &str {
        "edit_file"
    }

    fn description(&self) -> &str {
        "Replace the first occurrence of `old` with `new` in a file, or the \
         whole content when `old` is empty. Creates the file if needed. \
         Expects {\"path\": string, \"old\": string, \"new\": string}."
    }

    async fn call(&self, args: &ToolArgs) -> Result<ToolOutput, CapabilityError> {
        let request = EditRequest::from_args(args);
        let current = match fs::read_to_string(&request.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        let updated = if request.old.is_empty() {
            request.new
        } else {
            current.replacen(&request.old, &request.new, 1)
        };

        fs::write(&request.path, updated).await?;
        Ok(output("status", "ok"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> ToolArgs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn registers_exactly_the_three_file_capabilities() {
        let registry = file_toolkit();
        let names: Vec<String> = registry
            .describe()
            .into_iter()
            .map(|capability| capability.name)
            .collect();

        assert_eq!(names, ["edit_file", "list_files", "read_file"]);
        assert!(registry.get("shell").is_none());
    }

    #[tokio::test]
    async fn read_file_returns_empty_content_for_a_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let out = ReadFileTool
            .call(&args(&[("path", path.to_str().unwrap())]))
            .await
            .unwrap();

        assert_eq!(out.get("content").map(String::as_str), Some(""));
    }

    #[tokio::test]
    async fn read_file_tolerates_a_missing_path_argument() {
        let out = ReadFileTool.call(&ToolArgs::new()).await.unwrap();

        assert_eq!(out.get("content").map(String::as_str), Some(""));
    }

    #[tokio::test]
    async fn list_files_names_immediate_entries_space_joined() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("nested.txt"), "").unwrap();

        let out = ListFilesTool
            .call(&args(&[("path", dir.path().to_str().unwrap())]))
            .await
            .unwrap();

        assert_eq!(out.get("files").map(String::as_str), Some("a.txt b.txt sub"));
    }

    #[tokio::test]
    async fn list_files_degrades_to_an_empty_listing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");

        let out = ListFilesTool
            .call(&args(&[("path", path.to_str().unwrap())]))
            .await
            .unwrap();

        assert_eq!(out.get("files").map(String::as_str), Some(""));
    }

    #[tokio::test]
    async fn edit_file_with_empty_old_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let path_str = path.to_str().unwrap();

        let out = EditFileTool
            .call(&args(&[("path", path_str), ("old", ""), ("new", "hello")]))
            .await
            .unwrap();
        assert_eq!(out.get("status").map(String::as_str), Some("ok"));

        let read = ReadFileTool
            .call(&args(&[("path", path_str)]))
            .await
            .unwrap();
        assert_eq!(read.get("content").map(String::as_str), Some("hello"));
    }

    #[tokio::test]
    async fn edit_file_replaces_only_the_first_occurrence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeting.txt");
        std::fs::write(&path, "hello world, world").unwrap();

        EditFileTool
            .call(&args(&[
                ("path", path.to_str().unwrap()),
                ("old", "world"),
                ("new", "there"),
            ]))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "hello there, world"
        );
    }

    #[tokio::test]
    async fn edit_file_reports_ok_when_old_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("same.txt");
        std::fs::write(&path, "untouched").unwrap();

        let out = EditFileTool
            .call(&args(&[
                ("path", path.to_str().unwrap()),
                ("old", "missing"),
                ("new", "replacement"),
            ]))
            .await
            .unwrap();

        assert_eq!(out.get("status").map(String::as_str), Some("ok"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "untouched");
    }
}
