//! Kernel description files.
//!
//! Plain text: the first non-blank line holds the odd side length `N`, then
//! `N²` integer weights follow, one per line (any whitespace separation is
//! accepted). Weights are taken as-is; call [`Kernel::normalized`] for a
//! kernel whose weights should sum to one.
//!
//! ```text
//! 3
//! 1
//! 2
//! 1
//! 2
//! 4
//! 2
//! 1
//! 2
//! 1
//! ```

use std::fs;
use std::path::Path;

use crate::error::KernelFileError;
use crate::filters::core::{Kernel, MAX_RADIUS};

/// Largest side length a kernel file may declare.
pub const MAX_KERNEL_SIZE: usize = 2 * MAX_RADIUS + 1;

/// Parse kernel text. Never returns a partially filled kernel.
pub fn parse_kernel(text: &str) -> Result<Kernel, KernelFileError> {
    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)));

    let (line, token) = tokens.next().ok_or(KernelFileError::Empty)?;
    let size = match token.parse::<usize>() {
        Ok(n) if n > 0 && n <= MAX_KERNEL_SIZE => n,
        _ => {
            return Err(KernelFileError::InvalidSize {
                line,
                token: token.to_string(),
            })
        }
    };

    // Capacity follows the file's contents, never the declared header.
    let mut weights = Vec::new();
    for (line, token) in tokens {
        let w: i64 = token.parse().map_err(|_| KernelFileError::InvalidWeight {
            line,
            token: token.to_string(),
        })?;
        weights.push(w as f32);
    }

    Ok(Kernel::from_weights(size, weights)?)
}

/// Read and parse a kernel file.
pub fn load_kernel(path: &Path) -> Result<Kernel, KernelFileError> {
    let text = fs::read_to_string(path).map_err(|source| KernelFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let kernel = parse_kernel(&text)?;
    log::debug!("loaded {}x{} kernel from {}", kernel.size(), kernel.size(), path.display());
    Ok(kernel)
}
