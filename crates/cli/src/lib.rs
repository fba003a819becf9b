use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Result};
use path_clean::PathClean;
use rustc_hash::FxHashSet;

pub mod ast_print;
pub mod pretty_error;

pub use pretty_error::PrettyErrorHandler;

pub fn absolute_path(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    }
    .clean();

    Ok(absolute_path)
}

pub fn get_delimiters(delimiters: &str) -> Result<(String, String)> {
    match delimiters.split_once(' ') {
        Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok((a.to_string(), b.to_string())),
        _ => bail!("The delimiter argument should be split by one whitespace"),
    }
}

pub fn get_binding_prefixes(prefixes: &str) -> Result<FxHashSet<char>> {
    let set: FxHashSet<char> = prefixes.chars().filter(|c| !c.is_whitespace()).collect();
    if set.is_empty() {
        bail!("At least one binding prefix is required");
    }
    Ok(set)
}
