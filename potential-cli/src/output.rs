use std::io::{self, Write};

use potential_core::Grid;

/// Write the field as CSV: one line per row, top row (`y = h-1`) first,
/// columns left to right, no header.
pub fn write_csv<W: Write>(w: &mut W, grid: &Grid) -> io::Result<()> {
    for row in grid.rows().rev() {
        for (x, v) in row.iter().enumerate() {
            if x > 0 {
                w.write_all(b",")?;
            }
            write!(w, "{v}")?;
        }
        w.write_all(b"\n")?;
    }
    Ok(())
}
