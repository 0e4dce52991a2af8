#![doc = include_str!("../README.md")]

mod extent;
pub mod field;
pub mod format;
mod grid;
mod options;
pub mod points;
pub mod prelude;
mod write_vts;

pub use extent::{Extent, PointExtent};
pub use field::{Field, Fields};
pub use format::NumberFormat;
pub use grid::{flatten, GridBuffers, StructuredGrid};
pub use options::ExportOptions;
pub use points::{Coordinates, PointIter};

pub use write_vts::{export, export_with, write_vts, write_vts_file};

pub use ndarray;

pub use quick_xml::writer::Writer;

/// general purpose error enumeration for possible causes of failure.
///
/// Everything except `Io` and `Xml` is a problem with the input, and is reported before
/// anything is written.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occurred: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Could not write XML data: `{0}`")]
    Xml(quick_xml::Error),
    #[error("Buffer `{buffer}` holds {len} values but the grid has {required} points")]
    ShortBuffer {
        buffer: String,
        len: usize,
        required: usize,
    },
    #[error("A Z buffer is required for a grid with {} layers of cells", .0.layers)]
    MissingZ(Extent),
    #[error("Field names cannot be empty")]
    EmptyFieldName,
    #[error("Field name {0:?} contains a control character")]
    ControlCharacterInName(String),
    #[error("Field `{0}` was given more than once")]
    DuplicateField(String),
    #[error("{names} field names were given for {arrays} field arrays")]
    FieldCountMismatch { names: usize, arrays: usize },
    #[error("Array `{array}` has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        array: String,
        expected: [usize; 3],
        found: [usize; 3],
    },
    #[error("Array `{array}` has no points along axis {axis}")]
    EmptyAxis { array: String, axis: usize },
    #[error("The number of points in extent {0:?} does not fit in a usize")]
    ExtentOverflow(Extent),
}

impl From<quick_xml::Error> for Error {
    fn from(error: quick_xml::Error) -> Self {
        match error {
            quick_xml::Error::Io(io) => Error::Io(io),
            other => Error::Xml(other),
        }
    }
}
