//! Selection-widget refresh: triplet parsing and choice-list production.
//!
//! The panel hands over one flat positional argument list, three entries
//! per widget: the root to list, a bracketed extension spec, and the mode
//! (`directory` or `files`). Each group becomes one [`ChoiceUpdate`], in
//! the same order the groups arrived.

use std::path::PathBuf;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::listing::list_entries;
use crate::models::{ChoiceSet, ChoiceUpdate, ListMode};

/// One `(root, extensions, mode)` group from the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshRequest {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub mode: ListMode,
}

impl RefreshRequest {
    /// Group a flat positional argument list into requests, three at a time.
    pub fn from_args(args: &[String]) -> Result<Vec<RefreshRequest>> {
        if args.is_empty() {
            return Err(Error::InvalidRefreshSpec(
                "expected at least one (root, extensions, mode) group".to_string(),
            ));
        }
        if args.len() % 3 != 0 {
            return Err(Error::InvalidRefreshSpec(format!(
                "got {} arguments, expected groups of three",
                args.len()
            )));
        }

        args.chunks(3)
            .map(|group| {
                Ok(RefreshRequest {
                    root: PathBuf::from(&group[0]),
                    extensions: parse_extensions_spec(&group[1]),
                    mode: group[2].parse()?,
                })
            })
            .collect()
    }
}

/// Parse a bracketed comma list such as `"[.wav, .txt]"`.
///
/// Brackets are optional, items are trimmed, empty items dropped. An empty
/// spec means "all files".
pub fn parse_extensions_spec(spec: &str) -> Vec<String> {
    spec.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|ext| ext.trim().to_string())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Runs refresh groups through the lister and caches the latest result.
///
/// The cache lets the panel re-read the most recent choice lists without
/// touching the filesystem again.
pub struct RefreshService {
    last: RwLock<Option<ChoiceSet>>,
}

impl RefreshService {
    pub fn new() -> Self {
        Self {
            last: RwLock::new(None),
        }
    }

    /// Run every group through the lister, in order.
    ///
    /// One group collapses to [`ChoiceSet::Single`]; anything else keeps
    /// the input order in [`ChoiceSet::Multiple`].
    pub async fn refresh(&self, requests: &[RefreshRequest]) -> Result<ChoiceSet> {
        if requests.is_empty() {
            return Err(Error::InvalidRefreshSpec(
                "expected at least one (root, extensions, mode) group".to_string(),
            ));
        }

        let mut updates = Vec::with_capacity(requests.len());
        for request in requests {
            let directories_only = request.mode == ListMode::Directory;
            let choices =
                list_entries(&request.root, &request.extensions, directories_only).await?;
            updates.push(ChoiceUpdate::new(
                request.root.clone(),
                request.mode,
                choices,
            ));
        }

        let set = ChoiceSet::from_updates(updates);
        *self.last.write() = Some(set.clone());
        Ok(set)
    }

    /// The most recent refresh result, if any.
    pub fn last(&self) -> Option<ChoiceSet> {
        self.last.read().clone()
    }
}

impl Default for RefreshService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_extensions_spec() {
        assert_eq!(
            parse_extensions_spec("[.wav, .txt]"),
            vec![".wav".to_string(), ".txt".to_string()]
        );
        assert_eq!(parse_extensions_spec("[]"), Vec::<String>::new());
        assert_eq!(parse_extensions_spec(""), Vec::<String>::new());
        assert_eq!(parse_extensions_spec(".txt"), vec![".txt".to_string()]);
    }

    #[test]
    fn test_from_args_groups_in_threes() {
        let requests =
            RefreshRequest::from_args(&args(&["/data", "[.txt]", "files", "/out", "[]", "directory"]))
                .unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].root, PathBuf::from("/data"));
        assert_eq!(requests[0].extensions, vec![".txt".to_string()]);
        assert_eq!(requests[0].mode, ListMode::Files);
        assert_eq!(requests[1].mode, ListMode::Directory);
    }

    #[test]
    fn test_from_args_rejects_bad_arity() {
        let err = RefreshRequest::from_args(&args(&["/data", "[.txt]"])).unwrap_err();
        assert!(matches!(err, Error::InvalidRefreshSpec(_)));

        let err = RefreshRequest::from_args(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidRefreshSpec(_)));
    }

    #[test]
    fn test_from_args_rejects_unknown_mode() {
        let err = RefreshRequest::from_args(&args(&["/data", "[]", "folders"])).unwrap_err();
        assert!(matches!(err, Error::InvalidRefreshSpec(_)));
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_single_group_returns_single() {
        let dir = fixture();
        let root = dir.path().to_string_lossy().to_string();
        let requests =
            RefreshRequest::from_args(&args(&[root.as_str(), "[.txt]", "files"])).unwrap();

        let service = RefreshService::new();
        let set = service.refresh(&requests).await.unwrap();
        match &set {
            ChoiceSet::Single(update) => {
                assert_eq!(update.choices, vec![dir.path().join("a.txt")]);
            }
            other => panic!("expected Single, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_two_groups_return_ordered_multiple() {
        let dir = fixture();
        let root = dir.path().to_string_lossy().to_string();
        let requests = RefreshRequest::from_args(&args(&[
            root.as_str(),
            "[.txt]",
            "files",
            root.as_str(),
            "[]",
            "directory",
        ]))
        .unwrap();

        let service = RefreshService::new();
        let set = service.refresh(&requests).await.unwrap();
        match &set {
            ChoiceSet::Multiple(updates) => {
                assert_eq!(updates.len(), 2);
                assert_eq!(updates[0].mode, ListMode::Files);
                assert_eq!(updates[0].choices, vec![dir.path().join("a.txt")]);
                assert_eq!(updates[1].mode, ListMode::Directory);
                assert_eq!(updates[1].choices, vec![dir.path().join("sub")]);
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_last_caches_most_recent_refresh() {
        let dir = fixture();
        let root = dir.path().to_string_lossy().to_string();
        let requests =
            RefreshRequest::from_args(&args(&[root.as_str(), "[]", "directory"])).unwrap();

        let service = RefreshService::new();
        assert!(service.last().is_none());

        let set = service.refresh(&requests).await.unwrap();
        assert_eq!(service.last().unwrap(), set);
    }
}
