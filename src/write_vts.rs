use crate::prelude::*;
use crate::{field, points};

use quick_xml::events::BytesDecl;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a structured grid to a `Writer`
///
/// The grid has already been validated on construction, so nothing is written unless every
/// buffer is long enough for the grid. The writer is flushed before returning.
pub fn write_vts<W: Write>(
    writer: W,
    grid: &StructuredGrid,
    options: &ExportOptions,
) -> Result<(), Error> {
    let extent = grid.extent();

    tracing::debug!(
        rows = extent.rows,
        cols = extent.cols,
        layers = extent.layers,
        fields = grid.fields().len(),
        "writing structured grid"
    );

    let mut writer = match options.indent {
        Some(indent) => Writer::new_with_indent(writer, b' ', indent),
        None => Writer::new(writer),
    };

    if options.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    }

    writer.write_event(Event::Start(BytesStart::new("VTKFile").with_attributes([
        ("type", "StructuredGrid"),
        ("version", "1.0"),
        ("byte_order", "LittleEndian"),
    ])))?;

    // both extents are given in cells, not points
    let span_str = extent.span_string();

    writer.write_event(Event::Start(
        BytesStart::new("StructuredGrid").with_attributes([("WholeExtent", span_str.as_str())]),
    ))?;

    writer.write_event(Event::Start(
        BytesStart::new("Piece").with_attributes([("Extent", span_str.as_str())]),
    ))?;

    field::write_point_data(&mut writer, grid.fields(), grid.num_points(), options)?;

    points::write_points(&mut writer, grid.coordinates(), &extent, options)?;

    writer.write_event(Event::End(BytesEnd::new("Piece")))?;
    writer.write_event(Event::End(BytesEnd::new("StructuredGrid")))?;
    writer.write_event(Event::End(BytesEnd::new("VTKFile")))?;

    let mut inner = writer.into_inner();
    inner.write_all(b"\n")?;
    inner.flush()?;

    Ok(())
}

/// Create (or truncate) the file at `path` and write the grid to it
pub fn write_vts_file<P: AsRef<Path>>(
    path: P,
    grid: &StructuredGrid,
    options: &ExportOptions,
) -> Result<(), Error> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    write_vts(writer, grid, options)?;

    tracing::info!(path = %path.display(), points = grid.num_points(), "wrote vts file");

    Ok(())
}

/// Write a structured grid and its point fields to the file at `path`
/// with the default [`ExportOptions`].
///
/// `rows`, `cols` and `layers` are the number of *cells* along each axis; every buffer
/// must hold at least `(rows + 1) * (cols + 1) * (layers + 1)` values. `z` is only read when
/// `layers > 0`. Fields are written in the order they are given.
///
/// All buffers are checked before the file is created, so a precondition error never
/// leaves a file behind.
///
/// ## Example
///
/// ```no_run
/// let x = [0., 1., 0., 1.];
/// let y = [0., 0., 1., 1.];
/// let pressure = [1., 2., 3., 4.];
///
/// vts::export(
///     "pressure.vts",
///     &x,
///     &y,
///     None,
///     &[("pressure", pressure.as_slice())],
///     1,
///     1,
///     0,
/// )
/// .unwrap();
/// ```
#[allow(clippy::too_many_arguments)]
pub fn export<P: AsRef<Path>>(
    path: P,
    x: &[f64],
    y: &[f64],
    z: Option<&[f64]>,
    fields: &[(&str, &[f64])],
    rows: usize,
    cols: usize,
    layers: usize,
) -> Result<(), Error> {
    export_with(
        path,
        x,
        y,
        z,
        fields,
        rows,
        cols,
        layers,
        &ExportOptions::default(),
    )
}

/// [`export`] with explicit [`ExportOptions`]
#[allow(clippy::too_many_arguments)]
pub fn export_with<P: AsRef<Path>>(
    path: P,
    x: &[f64],
    y: &[f64],
    z: Option<&[f64]>,
    fields: &[(&str, &[f64])],
    rows: usize,
    cols: usize,
    layers: usize,
    options: &ExportOptions,
) -> Result<(), Error> {
    let grid = StructuredGrid::new(
        Extent::new(rows, cols, layers),
        Coordinates::new(x, y, z),
        fields.iter().copied().collect(),
    )?;

    write_vts_file(path, &grid, options)
}
