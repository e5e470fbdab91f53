// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use errors::{ErrorKind, Result}` to get at what `error_chain!` creates.
use error_chain::*;

error_chain! {

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must be positive and fit a u32 grid",
                    width, height)
        }

        DegenerateBoundary(attempts: usize) {
            description("no valid entry/exit pair on the maze boundary")
            display("gave up placing entry and exit on different boundary edges after {} attempts",
                    attempts)
        }

        InvalidBoundaryPoint(x: u32, y: u32) {
            description("boundary point is not on the maze edge")
            display("position ({}, {}) is outside the grid or not on its boundary", x, y)
        }

        ConflictingBoundaryPoints(entry: (u32, u32), exit: (u32, u32)) {
            description("entry and exit conflict")
            display("entry {:?} and exit {:?} are equal or share a boundary edge", entry, exit)
        }
    }
}
