//! Derivation operations: whole-file and subset copies
//!
//! Both forms go through the ordinary create/open contract and hand back
//! a fully opened handle, ready for further views and operations.

use crate::error::{MatrixError, Result};
use crate::store::MatrixStore;
use odmx_core::MatrixElement;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

impl<T: MatrixElement> MatrixStore<T> {
    /// Duplicate the whole file and open the duplicate
    ///
    /// The source is flushed first so the copy sees every pending write.
    /// If a view is active on the source, the same view is activated on
    /// the returned handle.
    pub fn copy<P: AsRef<Path>>(&self, target: P) -> Result<MatrixStore<T>> {
        self.flush()?;
        std::fs::copy(self.path(), target.as_ref())?;

        let mut output = MatrixStore::open(target)?;
        if let Some(names) = self.view_names() {
            let names: Vec<String> = names.to_vec();
            output.set_view(&names)?;
        }
        Ok(output)
    }

    /// Copy a subset of cores into a brand-new matrix file
    ///
    /// `cores` selects existing cores in the order they should appear in
    /// the new file; `names`, when given, renames them one for one. The
    /// zone index is copied verbatim. Validation happens before the
    /// target file is created.
    pub fn copy_cores<P: AsRef<Path>>(
        &self,
        target: P,
        cores: &[&str],
        names: Option<&[&str]>,
    ) -> Result<MatrixStore<T>> {
        for name in cores {
            if self.core_position(name).is_none() {
                return Err(MatrixError::UnknownCore((*name).to_string()));
            }
        }
        if let Some(names) = names {
            if names.len() != cores.len() {
                return Err(MatrixError::RenameLengthMismatch {
                    cores: cores.len(),
                    names: names.len(),
                });
            }
        }
        let new_names = names.unwrap_or(cores);

        let mut output = MatrixStore::<T>::create(target, self.zones(), new_names)?;
        output.set_zone_ids(&self.zone_ids())?;

        let zones = self.zones();
        for (dst, name) in cores.iter().enumerate() {
            // Validated above
            let src = self
                .core_position(name)
                .ok_or_else(|| MatrixError::UnknownCore((*name).to_string()))?;
            for origin in 0..zones {
                for dest in 0..zones {
                    output.write_at(origin, dest, dst, self.read_at(origin, dest, src));
                }
            }
        }

        output.flush()?;
        Ok(output)
    }
}

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Build a unique matrix path inside a caller-supplied directory
///
/// Derivations that need an anonymous target take an explicit directory
/// instead of a hidden process-wide temp convention.
pub fn scratch_path<P: AsRef<Path>>(dir: P) -> PathBuf {
    let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.as_ref()
        .join(format!("odmx_{}_{}.odm", std::process::id(), n))
}
