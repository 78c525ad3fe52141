//! Output directory holding converted frame listings.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::DuplicatePolicy;

/// Extension of converted frame files
pub const ARTIFACT_EXTENSION: &str = "h";

const MAX_VERSIONS: u32 = 10_000;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// What happened to a listing handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// An artifact with this name already existed and the policy is `skip`
    Skipped(PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written(p) | WriteOutcome::Skipped(p) => p,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    policy: DuplicatePolicy,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, policy: DuplicatePolicy) -> Self {
        Self {
            dir: dir.into(),
            policy,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// `images/cat.jpg` -> `cat`
    ///
    /// Dot files are rejected: their artifact would be hidden and never
    /// listed.
    pub fn base_name(input: &Path) -> io::Result<String> {
        let base = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("no file name in {}", input.display()),
                )
            })?;
        if base.starts_with('.') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("hidden file {}", input.display()),
            ));
        }
        Ok(base)
    }

    /// Write `contents` as the artifact for `input`.
    ///
    /// The listing goes to a hidden temporary file first and is moved into
    /// place in one step, so readers never observe a partial frame.
    pub fn write(&self, input: &Path, contents: &str) -> io::Result<WriteOutcome> {
        let base = Self::base_name(input)?;
        let tmp = self.write_tmp(&base, contents)?;

        let result = match self.policy {
            DuplicatePolicy::Overwrite => {
                let dest = self.dir.join(artifact_name(&base, 0));
                fs::rename(&tmp, &dest).map(|_| WriteOutcome::Written(dest))
            }
            DuplicatePolicy::Skip => {
                let dest = self.dir.join(artifact_name(&base, 0));
                match fs::hard_link(&tmp, &dest) {
                    Ok(()) => Ok(WriteOutcome::Written(dest)),
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                        Ok(WriteOutcome::Skipped(dest))
                    }
                    Err(e) => Err(e),
                }
            }
            DuplicatePolicy::Version => self.link_next_version(&tmp, &base),
        };

        // After a rename the temporary file is already gone.
        if tmp.exists() {
            if let Err(e) = fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %e, "Failed to remove temporary file");
            }
        }
        result
    }

    fn write_tmp(&self, base: &str, contents: &str) -> io::Result<PathBuf> {
        self.write_tmp_with(base, |file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        })
    }

    /// Create a hidden temporary file and let `fill` write it. The file is
    /// removed again if `fill` fails.
    fn write_tmp_with(
        &self,
        base: &str,
        fill: impl FnOnce(&mut fs::File) -> io::Result<()>,
    ) -> io::Result<PathBuf> {
        let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .dir
            .join(format!(".{base}.{}-{n}.tmp", std::process::id()));
        let mut file = fs::File::create(&tmp)?;
        if let Err(e) = fill(&mut file) {
            drop(file);
            if let Err(rm) = fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %rm, "Failed to remove temporary file");
            }
            return Err(e);
        }
        Ok(tmp)
    }

    fn link_next_version(&self, tmp: &Path, base: &str) -> io::Result<WriteOutcome> {
        for version in 0..MAX_VERSIONS {
            let dest = self.dir.join(artifact_name(base, version));
            match fs::hard_link(tmp, &dest) {
                Ok(()) => return Ok(WriteOutcome::Written(dest)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{MAX_VERSIONS} versions of {base} already exist"),
        ))
    }

    /// File names of all artifacts, sorted.
    pub fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_artifact_name(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Resolve an artifact name from [`list`](Self::list) to a path.
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        is_artifact_name(name).then(|| self.dir.join(name))
    }
}

fn artifact_name(base: &str, version: u32) -> String {
    if version == 0 {
        format!("{base}.{ARTIFACT_EXTENSION}")
    } else {
        format!("{base}-{version}.{ARTIFACT_EXTENSION}")
    }
}

fn is_artifact_name(name: &str) -> bool {
    !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext == ARTIFACT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store(policy: DuplicatePolicy) -> (tempfile::TempDir, ArtifactStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), policy);
        (dir, store)
    }

    #[test]
    fn test_base_name_strips_directory_and_extension() {
        assert_eq!(ArtifactStore::base_name(Path::new("images/cat.jpg")).unwrap(), "cat");
        assert_eq!(
            ArtifactStore::base_name(Path::new("/a/b/holiday.2024.PNG")).unwrap(),
            "holiday.2024"
        );
        assert!(ArtifactStore::base_name(Path::new("/")).is_err());
    }

    #[test]
    fn test_hidden_inputs_are_rejected() {
        let (dir, store) = store(DuplicatePolicy::Overwrite);

        let err = store.write(Path::new("in/.hidden.png"), "    0xFF,\n").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_creates_named_artifact() {
        let (dir, store) = store(DuplicatePolicy::Overwrite);

        let outcome = store.write(Path::new("images/cat.jpg"), "    0xFF,\n").unwrap();

        let expected = dir.path().join("cat.h");
        assert_eq!(outcome, WriteOutcome::Written(expected.clone()));
        assert_eq!(fs::read_to_string(expected).unwrap(), "    0xFF,\n");
    }

    #[test]
    fn test_no_temporary_files_left_behind() {
        let (dir, store) = store(DuplicatePolicy::Skip);
        store.write(Path::new("a.png"), "one").unwrap();
        store.write(Path::new("a.jpg"), "two").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["a.h".to_string()]);
    }

    #[test]
    fn test_failed_temporary_write_is_removed() {
        let (dir, store) = store(DuplicatePolicy::Overwrite);

        let err = store
            .write_tmp_with("cat", |file| {
                file.write_all(b"    0x")?;
                Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
            })
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::StorageFull);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_overwrite_policy_last_writer_wins() {
        let (dir, store) = store(DuplicatePolicy::Overwrite);
        store.write(Path::new("cat.png"), "first").unwrap();
        store.write(Path::new("cat.jpg"), "second").unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("cat.h")).unwrap(), "second");
        assert_eq!(store.list().unwrap(), vec!["cat.h"]);
    }

    #[test]
    fn test_skip_policy_keeps_existing() {
        let (dir, store) = store(DuplicatePolicy::Skip);
        store.write(Path::new("cat.png"), "first").unwrap();
        let outcome = store.write(Path::new("cat.jpg"), "second").unwrap();

        assert_eq!(outcome, WriteOutcome::Skipped(dir.path().join("cat.h")));
        assert_eq!(fs::read_to_string(dir.path().join("cat.h")).unwrap(), "first");
    }

    #[test]
    fn test_version_policy_numbers_collisions() {
        let (dir, store) = store(DuplicatePolicy::Version);
        store.write(Path::new("cat.png"), "first").unwrap();
        store.write(Path::new("cat.jpg"), "second").unwrap();
        let outcome = store.write(Path::new("cat.jpeg"), "third").unwrap();

        assert_eq!(outcome, WriteOutcome::Written(dir.path().join("cat-2.h")));
        assert_eq!(store.list().unwrap(), vec!["cat-1.h", "cat-2.h", "cat.h"]);
        assert_eq!(fs::read_to_string(dir.path().join("cat-1.h")).unwrap(), "second");
    }

    #[test]
    fn test_list_only_returns_artifacts() {
        let (dir, store) = store(DuplicatePolicy::Overwrite);
        fs::write(dir.path().join("b.h"), "").unwrap();
        fs::write(dir.path().join("a.h"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join(".c.123-0.tmp"), "").unwrap();
        fs::create_dir(dir.path().join("d.h")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["a.h", "b.h"]);
    }

    #[test]
    fn test_list_missing_dir_is_an_error() {
        let store = ArtifactStore::new("/no/such/dir", DuplicatePolicy::Overwrite);
        assert_eq!(store.list().unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_path_of_rejects_foreign_names() {
        let (dir, store) = store(DuplicatePolicy::Overwrite);
        assert_eq!(store.path_of("cat.h"), Some(dir.path().join("cat.h")));
        assert_eq!(store.path_of("../etc/passwd.h"), None);
        assert_eq!(store.path_of("cat.png"), None);
        assert_eq!(store.path_of(".hidden.h"), None);
    }
}
