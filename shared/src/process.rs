//! Tile-by-tile cube processing.

use crate::brick::Brick;
use crate::cube::{Cube, CubeError, Result};

/// Run `f` over every tile of `input`, storing each result at the same place in `output`.
///
/// Tiles are visited band by band, row by row. Tiles on the right and bottom
/// edges hang off the cube; those pixels read as Null and are discarded on
/// write, so `f` never needs to special-case partial tiles.
///
/// # Arguments
/// * `input` - Cube to read from
/// * `output` - Cube of identical dimensions to write to
/// * `tile_samples`, `tile_lines` - Tile size in pixels
/// * `f` - Receives the input tile and the output tile to fill
pub fn process_by_tile<F>(
    input: &Cube,
    output: &mut Cube,
    tile_samples: usize,
    tile_lines: usize,
    mut f: F,
) -> Result<()>
where
    F: FnMut(&Brick, &mut Brick),
{
    let size = input.size();
    if size != output.size() {
        return Err(CubeError::SizeMismatch {
            input: size,
            output: output.size(),
        });
    }

    let tile_samples = tile_samples.max(1);
    let tile_lines = tile_lines.max(1);
    let mut in_tile = Brick::new(tile_samples, tile_lines, 1);
    let mut out_tile = Brick::new(tile_samples, tile_lines, 1);
    let mut tiles = 0usize;

    for band in 1..=size.bands {
        for line in (1..=size.lines).step_by(tile_lines) {
            for sample in (1..=size.samples).step_by(tile_samples) {
                let base = (sample as i64, line as i64, band as i64);
                in_tile.set_base_position(base.0, base.1, base.2);
                out_tile.set_base_position(base.0, base.1, base.2);
                input.read(&mut in_tile);
                f(&in_tile, &mut out_tile);
                output.write(&out_tile);
                tiles += 1;
            }
        }
    }

    log::debug!("Processed {tiles} tiles of {tile_samples}x{tile_lines} over {size}");
    Ok(())
}

/// Tile function that copies input pixels unchanged.
pub fn copy_tile(input: &Brick, output: &mut Brick) {
    output.as_mut_slice().copy_from_slice(input.as_slice());
}
