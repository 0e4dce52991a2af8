//! Common traits and types that are useful for working with `vts`
#![allow(unused_imports)]

pub use crate::{
    Coordinates, Error, ExportOptions, Extent, Field, Fields, GridBuffers, NumberFormat,
    PointExtent, StructuredGrid,
};

pub(crate) use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
pub(crate) use quick_xml::writer::Writer;
pub(crate) use std::io::Write;

pub(crate) use derive_more::Deref;
