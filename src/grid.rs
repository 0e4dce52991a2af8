//! Containers for everything that goes into a single `.vts` file.

use crate::prelude::*;
use ndarray::{ArrayView2, ArrayView3, Axis};

#[derive(Debug, Clone, PartialEq)]
/// A validated structured grid that borrows its buffers.
///
/// Constructing a `StructuredGrid` checks every buffer against the extent, so a grid that
/// exists can always be written by [write_vts](`crate::write_vts()`) without reading past
/// the end of a buffer.
///
/// ## Example
///
/// ```
/// let x = [0., 1., 0., 1.];
/// let y = [0., 0., 1., 1.];
/// let pressure = [1., 2., 3., 4.];
///
/// let grid = vts::StructuredGrid::new(
///     vts::Extent::new(1, 1, 0),
///     vts::Coordinates::planar(&x, &y),
///     vts::Fields::new().with("pressure", &pressure),
/// )
/// .unwrap();
///
/// assert_eq!(grid.num_points(), 4);
/// ```
pub struct StructuredGrid<'a> {
    extent: Extent,
    num_points: usize,
    coordinates: Coordinates<'a>,
    fields: Fields<'a>,
}

impl<'a> StructuredGrid<'a> {
    pub fn new(
        extent: Extent,
        coordinates: Coordinates<'a>,
        fields: Fields<'a>,
    ) -> Result<Self, Error> {
        let num_points = extent.num_points()?;

        coordinates.validate(&extent, num_points)?;
        fields.validate(num_points)?;

        Ok(Self {
            extent,
            num_points,
            coordinates,
            fields,
        })
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn coordinates(&self) -> &Coordinates<'a> {
        &self.coordinates
    }

    pub fn fields(&self) -> &Fields<'a> {
        &self.fields
    }
}

/// Owned grid buffers built from `ndarray` arrays.
///
/// Every array is indexed `[row, col, layer]`. The number of rows is taken from the
/// first axis of `x`, the number of columns from the second axis of `y` and the number of
/// layers from the third axis of `z` (a grid without `z` is planar). Every array, fields
/// included, must then have exactly one value per grid point.
///
/// The arrays are copied into flat buffers in the order the points are written, so the
/// memory layout of the input arrays does not matter.
///
/// ## Example
///
/// ```
/// use ndarray::Array3;
///
/// let x = Array3::from_shape_fn((3, 2, 1), |(i, _, _)| i as f64);
/// let y = Array3::from_shape_fn((3, 2, 1), |(_, j, _)| j as f64);
/// let temperature = Array3::from_elem((3, 2, 1), 300.0);
///
/// let buffers = vts::GridBuffers::from_arrays(x.view(), y.view(), None)
///     .unwrap()
///     .with_field("temperature", temperature.view())
///     .unwrap();
///
/// assert_eq!(buffers.extent(), vts::Extent::new(2, 1, 0));
///
/// let mut file = Vec::new();
/// vts::write_vts(&mut file, &buffers.grid().unwrap(), &vts::ExportOptions::default()).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridBuffers {
    extent: Extent,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Option<Vec<f64>>,
    fields: Vec<(String, Vec<f64>)>,
}

impl GridBuffers {
    pub fn from_arrays(
        x: ArrayView3<f64>,
        y: ArrayView3<f64>,
        z: Option<ArrayView3<f64>>,
    ) -> Result<Self, Error> {
        let rows = cells("X", 0, x.len_of(Axis(0)))?;
        let cols = cells("Y", 1, y.len_of(Axis(1)))?;
        let layers = match &z {
            Some(z) => cells("Z", 2, z.len_of(Axis(2)))?,
            None => 0,
        };

        let extent = Extent::new(rows, cols, layers);
        extent.num_points()?;

        check_shape("X", &x, &extent)?;
        check_shape("Y", &y, &extent)?;
        if let Some(z) = &z {
            check_shape("Z", z, &extent)?;
        }

        Ok(Self {
            extent,
            x: flatten(&x),
            y: flatten(&y),
            z: z.as_ref().map(flatten),
            fields: Vec::new(),
        })
    }

    /// build a planar grid from `[row, col]` indexed arrays
    pub fn from_arrays_2d(x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<Self, Error> {
        Self::from_arrays(x.insert_axis(Axis(2)), y.insert_axis(Axis(2)), None)
    }

    /// Add a field. Its array must have the same shape as the coordinate arrays.
    pub fn with_field<S: Into<String>>(
        mut self,
        name: S,
        values: ArrayView3<f64>,
    ) -> Result<Self, Error> {
        let name = name.into();
        check_shape(&name, &values, &self.extent)?;
        self.fields.push((name, flatten(&values)));
        Ok(self)
    }

    /// add a field to a planar grid from a `[row, col]` indexed array
    pub fn with_field_2d<S: Into<String>>(
        self,
        name: S,
        values: ArrayView2<f64>,
    ) -> Result<Self, Error> {
        self.with_field(name, values.insert_axis(Axis(2)))
    }

    /// Add several fields at once from a list of names and a list of arrays
    pub fn with_fields<S: AsRef<str>>(
        self,
        names: &[S],
        values: &[ArrayView3<f64>],
    ) -> Result<Self, Error> {
        if names.len() != values.len() {
            return Err(Error::FieldCountMismatch {
                names: names.len(),
                arrays: values.len(),
            });
        }

        names
            .iter()
            .zip(values)
            .try_fold(self, |buffers, (name, values)| {
                buffers.with_field(name.as_ref(), values.view())
            })
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Borrow the buffers as a [`StructuredGrid`] ready to be written
    pub fn grid(&self) -> Result<StructuredGrid<'_>, Error> {
        let coordinates = Coordinates::new(&self.x, &self.y, self.z.as_deref());
        let fields = self
            .fields
            .iter()
            .map(|(name, values)| Field::new(name, values))
            .collect();

        StructuredGrid::new(self.extent, coordinates, fields)
    }
}

fn cells(array: &str, axis: usize, points: usize) -> Result<usize, Error> {
    points.checked_sub(1).ok_or_else(|| Error::EmptyAxis {
        array: array.to_string(),
        axis,
    })
}

fn check_shape(array: &str, values: &ArrayView3<f64>, extent: &Extent) -> Result<(), Error> {
    let p = extent.points()?;
    let expected = [p.rows, p.cols, p.layers];
    let (rows, cols, layers) = values.dim();
    let found = [rows, cols, layers];

    if found != expected {
        return Err(Error::ShapeMismatch {
            array: array.to_string(),
            expected,
            found,
        });
    }

    Ok(())
}

/// Copy a `[row, col, layer]` indexed array into a flat buffer: columns outermost, then
/// rows, layers fastest
pub fn flatten(values: &ArrayView3<f64>) -> Vec<f64> {
    values
        .view()
        .permuted_axes([1, 0, 2])
        .iter()
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, ShapeBuilder};

    #[test]
    fn flatten_order() {
        let arr = Array3::from_shape_fn((2, 3, 2), |(r, c, l)| (100 * r + 10 * c + l) as f64);
        let flat = flatten(&arr.view());
        let p = Extent::new(1, 2, 1).points().unwrap();

        for r in 0..2 {
            for c in 0..3 {
                for l in 0..2 {
                    assert_eq!(flat[p.flat_index(r, c, l)], arr[[r, c, l]]);
                }
            }
        }
    }

    #[test]
    fn flatten_ignores_memory_layout() {
        let arr = Array3::from_shape_fn((3, 2, 2), |(r, c, l)| (r * 4 + c * 2 + l) as f64);
        let fortran = {
            let mut f = Array3::zeros((3, 2, 2).f());
            f.assign(&arr);
            f
        };

        assert_eq!(flatten(&arr.view()), flatten(&fortran.view()));
    }

    #[test]
    fn extents_from_shapes() {
        let x = Array3::<f64>::zeros((4, 3, 2));
        let buffers = GridBuffers::from_arrays(x.view(), x.view(), Some(x.view())).unwrap();
        assert_eq!(buffers.extent(), Extent::new(3, 2, 1));
        assert_eq!(buffers.grid().unwrap().num_points(), 24);
    }

    #[test]
    fn planar_from_2d() {
        let x = Array2::<f64>::zeros((2, 5));
        let f = Array2::<f64>::ones((2, 5));

        let buffers = GridBuffers::from_arrays_2d(x.view(), x.view())
            .unwrap()
            .with_field_2d("f", f.view())
            .unwrap();

        assert_eq!(buffers.extent(), Extent::new(1, 4, 0));
        assert_eq!(buffers.grid().unwrap().fields().len(), 1);
    }

    #[test]
    fn mismatched_shapes() {
        let x = Array3::<f64>::zeros((4, 3, 1));
        let y = Array3::<f64>::zeros((4, 2, 1));

        let err = GridBuffers::from_arrays(x.view(), y.view(), None).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch { ref array, expected: [4, 2, 1], found: [4, 3, 1] } if array == "X"
        ));

        let buffers = GridBuffers::from_arrays(x.view(), x.view(), None).unwrap();
        let err = buffers.with_field("p", y.view()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { ref array, .. } if array == "p"));
    }

    #[test]
    fn empty_axis() {
        let x = Array3::<f64>::zeros((0, 3, 1));
        let y = Array3::<f64>::zeros((1, 3, 1));

        let err = GridBuffers::from_arrays(x.view(), y.view(), None).unwrap_err();
        assert!(matches!(err, Error::EmptyAxis { axis: 0, .. }));
    }

    #[test]
    fn names_and_arrays_must_pair_up() {
        let x = Array3::<f64>::zeros((2, 2, 1));
        let buffers = GridBuffers::from_arrays(x.view(), x.view(), None).unwrap();

        let err = buffers
            .with_fields(&["a", "b"], &[x.view()])
            .unwrap_err();
        assert!(matches!(err, Error::FieldCountMismatch { names: 2, arrays: 1 }));
    }

    #[test]
    fn duplicate_names_fail_on_grid() {
        let x = Array3::<f64>::zeros((2, 2, 1));
        let buffers = GridBuffers::from_arrays(x.view(), x.view(), None)
            .unwrap()
            .with_fields(&["a", "a"], &[x.view(), x.view()])
            .unwrap();

        assert!(matches!(buffers.grid(), Err(Error::DuplicateField(_))));
    }
}
