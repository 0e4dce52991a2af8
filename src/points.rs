//! Point locations written to the `<Points>` section of the file.

use crate::prelude::*;

/// X, Y and (optionally) Z location of every grid point, each as a flat buffer.
///
/// All three buffers are addressed with [`PointExtent::flat_index`], so the location
/// of point (`row`, `col`, `layer`) is `x[i], y[i], z[i]` with
/// `i = (col * rows + row) * layers + layer` (in point counts).
///
/// `z` is only read for grids with at least one cell along the third axis. For a planar
/// grid it may be `None` or any buffer at all; every point is written with `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub z: Option<&'a [f64]>,
}

impl<'a> Coordinates<'a> {
    pub fn new(x: &'a [f64], y: &'a [f64], z: Option<&'a [f64]>) -> Self {
        Self { x, y, z }
    }

    /// coordinates for a planar grid
    pub fn planar(x: &'a [f64], y: &'a [f64]) -> Self {
        Self { x, y, z: None }
    }

    /// Check that every buffer that will be read holds at least `num_points` values
    pub fn validate(&self, extent: &Extent, num_points: usize) -> Result<(), Error> {
        check_len("X", self.x, num_points)?;
        check_len("Y", self.y, num_points)?;

        if !extent.is_planar() {
            let z = self.z.ok_or(Error::MissingZ(*extent))?;
            check_len("Z", z, num_points)?;
        }

        Ok(())
    }

    /// Iterate over the points in the order they are written to the file.
    ///
    /// The buffers must have been checked with [`Coordinates::validate`] first, otherwise
    /// this iterator may panic on a short buffer.
    pub fn points(&self, extent: &Extent) -> Result<PointIter<'a>, Error> {
        Ok(PointIter::new(*self, extent.points()?))
    }
}

fn check_len(name: &str, buffer: &[f64], num_points: usize) -> Result<(), Error> {
    if buffer.len() < num_points {
        return Err(Error::ShortBuffer {
            buffer: name.to_string(),
            len: buffer.len(),
            required: num_points,
        });
    }
    Ok(())
}

/// where the third coordinate of each point comes from
#[derive(Debug, Clone, Copy)]
enum ZSource<'a> {
    Buffer(&'a [f64]),
    Zero,
}

impl<'a> ZSource<'a> {
    fn select(z: Option<&'a [f64]>, points: &PointExtent) -> Self {
        match z {
            Some(z) if points.layers > 1 => ZSource::Buffer(z),
            _ => ZSource::Zero,
        }
    }

    #[inline]
    fn get(&self, index: usize) -> f64 {
        match self {
            ZSource::Buffer(z) => z[index],
            ZSource::Zero => 0.0,
        }
    }
}

/// Iterator over `[x, y, z]` point locations: columns outermost, then rows,
/// with layers varying fastest.
#[derive(Debug, Clone)]
pub struct PointIter<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: ZSource<'a>,
    points: PointExtent,
    row: usize,
    col: usize,
    layer: usize,
}

impl<'a> PointIter<'a> {
    fn new(coordinates: Coordinates<'a>, points: PointExtent) -> Self {
        Self {
            x: coordinates.x,
            y: coordinates.y,
            z: ZSource::select(coordinates.z, &points),
            points,
            row: 0,
            col: 0,
            layer: 0,
        }
    }
}

impl<'a> Iterator for PointIter<'a> {
    type Item = [f64; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.col == self.points.cols {
            return None;
        }

        let index = self.points.flat_index(self.row, self.col, self.layer);
        let value = [self.x[index], self.y[index], self.z.get(index)];

        self.layer += 1;

        if self.layer == self.points.layers {
            self.layer = 0;
            self.row += 1;
        }

        if self.row == self.points.rows {
            self.row = 0;
            self.col += 1;
        }

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let p = &self.points;
        let done = self.points.flat_index(self.row, self.col, self.layer);
        let remaining = p.rows * p.cols * p.layers - done;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for PointIter<'a> {}

/// Write the `<Points>` section: a single three component ascii `DataArray`
/// with one `x y z` triple per grid point.
///
/// `coordinates` must already have been checked with [`Coordinates::validate`].
pub(crate) fn write_points<W: Write>(
    writer: &mut Writer<W>,
    coordinates: &Coordinates,
    extent: &Extent,
    options: &ExportOptions,
) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new("Points")))?;
    writer.write_event(Event::Start(BytesStart::new("DataArray").with_attributes([
        ("type", "Float64"),
        ("NumberOfComponents", "3"),
        ("format", "ascii"),
    ])))?;

    let points = coordinates.points(extent)?;
    let mut data = String::with_capacity(points.len() * 3 * 8);

    for point in points {
        for component in point {
            options.number_format.push(&mut data, component);
            data.push(' ');
        }
    }

    writer.write_event(Event::Text(BytesText::new(&data)))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;
    writer.write_event(Event::End(BytesEnd::new("Points")))?;

    Ok(())
}
