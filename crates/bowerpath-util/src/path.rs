use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding segment.
///
/// The filesystem is never consulted, so symlinks are preserved. A `..`
/// at the root of an absolute path is discarded.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    Some(Component::RootDir | Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve `path` against `base` (if relative) and normalize the result.
#[must_use]
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Join `rel` under `base`, ignoring any root or prefix `rel` carries.
///
/// Unlike [`Path::join`], an absolute `rel` never replaces `base`:
/// `join_under("/pkg", "/dist/a.js")` is `/pkg/dist/a.js`.
#[must_use]
pub fn join_under(base: &Path, rel: impl AsRef<Path>) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in rel.as_ref().components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    normalize(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cur_dir() {
        assert_eq!(
            normalize(Path::new("/proj/bower_components/./jquery/./dist/jquery.js")),
            PathBuf::from("/proj/bower_components/jquery/dist/jquery.js")
        );
    }

    #[test]
    fn test_normalize_parent_dir() {
        assert_eq!(
            normalize(Path::new("/proj/bower_components/jquery/../lodash/lodash.js")),
            PathBuf::from("/proj/bower_components/lodash/lodash.js")
        );
    }

    #[test]
    fn test_normalize_parent_past_root() {
        assert_eq!(normalize(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn test_normalize_relative_keeps_leading_parent() {
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn test_absolutize_relative() {
        assert_eq!(
            absolutize(Path::new("/home/me/app"), Path::new("../lib")),
            PathBuf::from("/home/me/lib")
        );
    }

    #[test]
    fn test_absolutize_absolute_ignores_base() {
        assert_eq!(
            absolutize(Path::new("/home/me/app"), Path::new("/srv/site/./js")),
            PathBuf::from("/srv/site/js")
        );
    }

    #[test]
    fn test_join_under_relative() {
        assert_eq!(
            join_under(Path::new("/proj/pkg"), "./dist/a.js"),
            PathBuf::from("/proj/pkg/dist/a.js")
        );
    }

    #[test]
    fn test_join_under_strips_root() {
        assert_eq!(
            join_under(Path::new("/proj/pkg"), "/dist/a.js"),
            PathBuf::from("/proj/pkg/dist/a.js")
        );
        assert_eq!(
            join_under(Path::new("/proj/pkg"), "/tmp/elsewhere/a.js"),
            PathBuf::from("/proj/pkg/tmp/elsewhere/a.js")
        );
    }
}
