//! Tabular export keyed by external zone identifiers

use crate::error::{MatrixError, Result};
use crate::store::MatrixStore;
use odmx_core::MatrixElement;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Supported export targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-delimited text, one line per (origin, destination) pair
    Csv,
}

impl ExportFormat {
    /// Resolve the target format from a file extension
    ///
    /// Unrecognized extensions are a hard error rather than a warning,
    /// so a typoed target never silently produces nothing.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(OsStr::to_str).unwrap_or("");
        if ext.eq_ignore_ascii_case("csv") {
            Ok(ExportFormat::Csv)
        } else {
            Err(MatrixError::UnsupportedExportFormat(ext.to_string()))
        }
    }
}

impl<T: MatrixElement> MatrixStore<T> {
    /// Export the requested cores (default: all) as delimited text
    ///
    /// Temporarily activates a view over the requested cores, writes a
    /// `row,column,<core...>` header and one line per zone pair using the
    /// external identifiers from the zone index, then restores whatever
    /// view was active before the call.
    pub fn export<P: AsRef<Path>>(&mut self, output: P, cores: Option<&[&str]>) -> Result<()> {
        let format = ExportFormat::from_path(output.as_ref())?;

        let previous: Option<Vec<String>> = self.view_names().map(<[String]>::to_vec);
        let selected = match cores {
            Some(selection) => self.set_view(selection),
            None => {
                self.set_view_all();
                Ok(())
            }
        };

        let result = selected.and_then(|()| match format {
            ExportFormat::Csv => self.write_csv(output.as_ref()),
        });

        match previous {
            Some(names) => self.set_view(&names)?,
            None => self.clear_view(),
        }
        result
    }

    fn write_csv(&self, output: &Path) -> Result<()> {
        let view = self.view()?;
        let ids = self.zone_ids();
        let zones = self.zones();

        let mut out = BufWriter::new(File::create(output)?);

        write!(out, "row,column")?;
        for name in view.names() {
            write!(out, ",{name}")?;
        }
        writeln!(out)?;

        for origin in 0..zones {
            for dest in 0..zones {
                write!(out, "{},{}", ids[origin], ids[dest])?;
                for layer in 0..view.cores() {
                    write!(out, ",{}", view.get_layer(layer, origin, dest))?;
                }
                writeln!(out)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}
