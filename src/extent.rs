use crate::Error;

/// Number of cells along each axis of a structured grid.
///
/// A grid with `rows` cells along its first axis has `rows + 1` points along that axis.
/// `layers == 0` describes a planar (2D) grid whose third coordinate is always zero.
///
/// ## Example
///
/// ```
/// let extent = vts::Extent::new(2, 3, 0);
/// assert_eq!(extent.points().unwrap(), vts::PointExtent { rows: 3, cols: 4, layers: 1 });
/// assert_eq!(extent.num_points().unwrap(), 12);
/// assert!(extent.is_planar());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    pub rows: usize,
    pub cols: usize,
    pub layers: usize,
}

/// Number of points along each axis. Every field is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointExtent {
    pub rows: usize,
    pub cols: usize,
    pub layers: usize,
}

impl Extent {
    pub fn new(rows: usize, cols: usize, layers: usize) -> Self {
        Self { rows, cols, layers }
    }

    /// point counts along each axis (`cells + 1`)
    pub fn points(&self) -> Result<PointExtent, Error> {
        let overflow = || Error::ExtentOverflow(*self);

        Ok(PointExtent {
            rows: self.rows.checked_add(1).ok_or_else(overflow)?,
            cols: self.cols.checked_add(1).ok_or_else(overflow)?,
            layers: self.layers.checked_add(1).ok_or_else(overflow)?,
        })
    }

    /// Total number of grid points. Every coordinate and field buffer must hold
    /// at least this many values.
    pub fn num_points(&self) -> Result<usize, Error> {
        let p = self.points()?;

        p.rows
            .checked_mul(p.cols)
            .and_then(|n| n.checked_mul(p.layers))
            .ok_or(Error::ExtentOverflow(*self))
    }

    /// true when there are no cells along the third axis
    pub fn is_planar(&self) -> bool {
        self.layers == 0
    }

    /// Format the extent the way it appears in the `WholeExtent` and `Extent`
    /// attributes of the file
    pub fn span_string(&self) -> String {
        format!("0 {} 0 {} 0 {}", self.rows, self.cols, self.layers)
    }
}

impl PointExtent {
    /// Position in a flat buffer of the point at (`row`, `col`, `layer`).
    ///
    /// The layer index varies fastest, then the row, then the column.
    #[inline]
    pub fn flat_index(&self, row: usize, col: usize, layer: usize) -> usize {
        (col * self.rows + row) * self.layers + layer
    }
}

#[test]
fn point_counts() {
    let extent = Extent::new(4, 2, 3);
    let p = extent.points().unwrap();

    assert_eq!((p.rows, p.cols, p.layers), (5, 3, 4));
    assert_eq!(extent.num_points().unwrap(), 60);
    assert!(!extent.is_planar());
}

#[test]
fn zero_cells_is_a_single_point() {
    let extent = Extent::new(0, 0, 0);
    assert_eq!(extent.num_points().unwrap(), 1);
    assert!(extent.is_planar());
}

#[test]
fn overflowing_extent() {
    let extent = Extent::new(usize::MAX / 2, 4, 0);
    assert!(matches!(extent.num_points(), Err(Error::ExtentOverflow(_))));
}

#[test]
fn max_cells_on_an_axis() {
    let extent = Extent::new(usize::MAX, 0, 0);

    assert!(matches!(extent.points(), Err(Error::ExtentOverflow(_))));
    assert!(matches!(extent.num_points(), Err(Error::ExtentOverflow(_))));
    assert!(matches!(
        Extent::new(0, 0, usize::MAX).points(),
        Err(Error::ExtentOverflow(_))
    ));
}

#[test]
fn span_string_uses_cells() {
    assert_eq!(Extent::new(10, 20, 0).span_string(), "0 10 0 20 0 0");
}

#[test]
fn flat_index_layer_fastest() {
    let p = Extent::new(1, 2, 1).points().unwrap();

    assert_eq!(p.flat_index(0, 0, 0), 0);
    assert_eq!(p.flat_index(0, 0, 1), 1);
    assert_eq!(p.flat_index(1, 0, 0), 2);
    assert_eq!(p.flat_index(0, 1, 0), 4);
    assert_eq!(p.flat_index(1, 2, 1), 11);
}
