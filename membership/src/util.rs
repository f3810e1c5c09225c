use std::path::{Path, PathBuf};

pub(crate) fn get_base_dir(dir: &str) -> Option<PathBuf> {
    let mut path_buf = PathBuf::new();
    if dir.starts_with("~/") {
        let home_dir = dirs::home_dir()?;
        path_buf.push(home_dir);
        path_buf.push(dir.strip_prefix("~/")?);
    } else {
        path_buf.push(dir);
    }
    Some(path_buf)
}

pub(crate) fn get_toml_config_file(dir: &str, name: &str) -> Option<PathBuf> {
    let mut path_buf = get_base_dir(dir)?;
    path_buf.push("config");
    path_buf.push(format!("{name}.toml"));
    Some(path_buf)
}

/// Where each artifact of the pipeline lives, relative to the root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Paths {
    base: PathBuf,
}

impl Paths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn from_root_dir(dir: &str) -> Option<Self> {
        get_base_dir(dir).map(Self::new)
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.base.join(relative)
    }

    pub fn addresses(&self) -> PathBuf {
        self.join("data/addresses.json")
    }

    pub fn hashed_leaves(&self) -> PathBuf {
        self.join("data/hashedLeaves.json")
    }

    pub fn fixed_input(&self) -> PathBuf {
        self.join("inputs/membership_input.json")
    }

    pub fn incremental_input(&self) -> PathBuf {
        self.join("inputs/membership_input_LIMT.json")
    }

    pub fn raw_calldata(&self) -> PathBuf {
        self.join("build/membership-circuit/calldata.txt")
    }

    pub fn calldata(&self) -> PathBuf {
        self.join("build/membership-circuit/calldata.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_root_dir_is_kept() {
        let paths = Paths::from_root_dir("some/dir").unwrap();

        assert_eq!(
            paths.hashed_leaves(),
            PathBuf::from("some/dir/data/hashedLeaves.json")
        );
    }

    #[test]
    fn toml_config_lives_under_config() {
        assert_eq!(
            get_toml_config_file(".", "config").unwrap(),
            PathBuf::from("./config/config.toml")
        );
    }
}
