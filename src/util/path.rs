use std::{
    env::current_dir,
    path::{Path, PathBuf},
};

use path_clean::PathClean;

/**
    Resolves a path against the current directory and
    normalizes away any `.` and `..` components.

    If the current directory can not be determined,
    relative paths are only cleaned.
*/
pub fn make_absolute_and_clean(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_relative() {
        match current_dir() {
            Ok(cwd) => cwd.join(path).clean(),
            Err(_) => path.clean(),
        }
    } else {
        path.clean()
    }
}
