//! Writing surfaces to SVG files.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};

use crate::{document::Deck, error::BackdropError, surface::Surface};

/// Writes `surface` as an SVG document to `path`.
///
/// # Errors
///
/// Returns [`BackdropError::Io`] if the file cannot be created or written.
pub fn write_surface(surface: &Surface, path: &Path) -> Result<(), BackdropError> {
    let doc = surface.to_svg();

    let mut file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            error!(path:? = path, err:err; "Failed to create SVG file");
            return Err(BackdropError::Io(err));
        }
    };

    if let Err(err) = write!(file, "{doc}") {
        error!(path:? = path, err:err; "Failed to write SVG content");
        return Err(BackdropError::Io(err));
    }

    debug!(path:? = path; "SVG file written");
    Ok(())
}

/// File stem used for the container at `index`: its id, or `container-N`.
pub fn surface_file_stem(id: Option<&str>, index: usize) -> String {
    match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("container-{index}"),
    }
}

/// Writes every surface of `deck` into `dir`, creating it if needed.
///
/// Returns the written paths in document order. Containers without a surface
/// are skipped.
///
/// # Errors
///
/// Returns [`BackdropError::Export`] if the directory cannot be created or
/// two containers map to the same file, and [`BackdropError::Io`] if a file
/// cannot be written.
pub fn export_deck(deck: &Deck, dir: &Path) -> Result<Vec<PathBuf>, BackdropError> {
    fs::create_dir_all(dir).map_err(|err| {
        BackdropError::Export(format!(
            "cannot create output directory `{}`: {err}",
            dir.display()
        ))
    })?;

    let mut written: Vec<PathBuf> = Vec::new();
    for (index, container) in deck.containers().iter().enumerate() {
        let Some(surface) = container.surface() else {
            continue;
        };

        let path = dir.join(format!("{}.svg", surface_file_stem(container.id(), index)));
        if written.contains(&path) {
            return Err(BackdropError::Export(format!(
                "duplicate output file `{}`",
                path.display()
            )));
        }

        write_surface(surface, &path)?;
        written.push(path);
    }

    info!(dir:? = dir, files = written.len(); "Surfaces exported");
    Ok(written)
}
