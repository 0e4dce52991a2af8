//! Named scalar arrays written to the `<PointData>` section of the file.

use crate::prelude::*;
use std::collections::HashSet;

/// A named scalar value for every point in the grid (pressure, density, ...).
///
/// `values` is a flat buffer addressed with the same flat index as the coordinates
/// (see [`PointExtent::flat_index`](crate::PointExtent::flat_index)). Only the first
/// `N` values are written, where `N` is the number of grid points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, values: &'a [f64]) -> Self {
        Self { name, values }
    }
}

/// Ordered list of fields. The order they are added in is the order they
/// appear in the file.
///
/// ## Example
///
/// ```
/// let pressure = vec![1.0, 2.0, 3.0, 4.0];
/// let density = vec![0.5; 4];
///
/// let fields = vts::Fields::new()
///     .with("pressure", &pressure)
///     .with("density", &density);
///
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields.scalars_attribute(true), "pressure,density,");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deref)]
pub struct Fields<'a>(Vec<Field<'a>>);

impl<'a> Fields<'a> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// append a field to the end of the list
    pub fn push(&mut self, name: &'a str, values: &'a [f64]) {
        self.0.push(Field::new(name, values));
    }

    /// builder version of [`Fields::push`]
    pub fn with(mut self, name: &'a str, values: &'a [f64]) -> Self {
        self.push(name, values);
        self
    }

    /// Pair up a list of names with a list of buffers of the same length
    pub fn from_pairs<S, V>(names: &'a [S], values: &'a [V]) -> Result<Self, Error>
    where
        S: AsRef<str>,
        V: AsRef<[f64]>,
    {
        if names.len() != values.len() {
            return Err(Error::FieldCountMismatch {
                names: names.len(),
                arrays: values.len(),
            });
        }

        Ok(names
            .iter()
            .zip(values)
            .map(|(name, values)| Field::new(name.as_ref(), values.as_ref()))
            .collect())
    }

    /// Check every field against the number of grid points.
    ///
    /// Names must be non-empty, unique and free of control characters (an XML reader
    /// would normalize them to spaces), and every buffer must hold at least `num_points`
    /// values.
    pub fn validate(&self, num_points: usize) -> Result<(), Error> {
        let mut seen = HashSet::with_capacity(self.0.len());

        for field in &self.0 {
            if field.name.is_empty() {
                return Err(Error::EmptyFieldName);
            }
            if field.name.chars().any(char::is_control) {
                return Err(Error::ControlCharacterInName(field.name.to_string()));
            }
            if !seen.insert(field.name) {
                return Err(Error::DuplicateField(field.name.to_string()));
            }
            if field.values.len() < num_points {
                return Err(Error::ShortBuffer {
                    buffer: field.name.to_string(),
                    len: field.values.len(),
                    required: num_points,
                });
            }
        }

        Ok(())
    }

    /// The value of the `Scalars` attribute on `<PointData>`: every name joined with commas
    pub fn scalars_attribute(&self, trailing_comma: bool) -> String {
        let mut out = String::new();

        for (idx, field) in self.0.iter().enumerate() {
            if idx > 0 {
                out.push(',');
            }
            out.push_str(field.name);
        }

        if trailing_comma && !self.0.is_empty() {
            out.push(',');
        }

        out
    }
}

impl<'a> FromIterator<Field<'a>> for Fields<'a> {
    fn from_iter<I: IntoIterator<Item = Field<'a>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a [f64])> for Fields<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a [f64])>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, values)| Field::new(name, values))
            .collect()
    }
}

/// Write the `<PointData>` section: the opening tag with the `Scalars` list,
/// one ascii `DataArray` per field, and the closing tag.
///
/// `fields` must already have been checked with [`Fields::validate`] against `num_points`.
pub(crate) fn write_point_data<W: Write>(
    writer: &mut Writer<W>,
    fields: &Fields,
    num_points: usize,
    options: &ExportOptions,
) -> Result<(), Error> {
    let scalars = fields.scalars_attribute(options.trailing_scalar_comma);

    writer.write_event(Event::Start(
        BytesStart::new("PointData").with_attributes([("Scalars", scalars.as_str())]),
    ))?;

    for field in fields.iter() {
        tracing::trace!(name = field.name, num_points, "writing field");
        write_scalar_array(writer, field, num_points, options.number_format)?;
    }

    writer.write_event(Event::End(BytesEnd::new("PointData")))?;

    Ok(())
}

fn write_scalar_array<W: Write>(
    writer: &mut Writer<W>,
    field: &Field,
    num_points: usize,
    number_format: NumberFormat,
) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new("DataArray").with_attributes([
        ("type", "Float64"),
        ("Name", field.name),
        ("format", "ascii"),
    ])))?;

    let mut data = String::with_capacity(num_points * 8);

    for value in &field.values[..num_points] {
        number_format.push(&mut data, *value);
        data.push(' ');
    }

    writer.write_event(Event::Text(BytesText::new(&data)))?;
    writer.write_event(Event::End(BytesEnd::new("DataArray")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_attribute_keeps_order() {
        let a = [0.0; 2];
        let fields = Fields::new().with("zeta", &a).with("alpha", &a).with("mid", &a);

        assert_eq!(fields.scalars_attribute(true), "zeta,alpha,mid,");
        assert_eq!(fields.scalars_attribute(false), "zeta,alpha,mid");
    }

    #[test]
    fn empty_scalars_attribute() {
        assert_eq!(Fields::new().scalars_attribute(true), "");
    }

    #[test]
    fn from_pairs_mismatch() {
        let names = vec!["a".to_string(), "b".to_string()];
        let values = vec![vec![1.0]];

        let err = Fields::from_pairs(&names, &values).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldCountMismatch {
                names: 2,
                arrays: 1
            }
        ));
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let long = [1.0; 4];
        let short = [1.0; 3];

        let err = Fields::new().with("p", &short).validate(4).unwrap_err();
        assert!(matches!(err, Error::ShortBuffer { len: 3, required: 4, .. }));

        let err = Fields::new().with("", &long).validate(4).unwrap_err();
        assert!(matches!(err, Error::EmptyFieldName));

        for name in ["a\nb", "tab\tname", "bell\u{7}"] {
            let err = Fields::new().with(name, &long).validate(4).unwrap_err();
            assert!(matches!(err, Error::ControlCharacterInName(ref n) if n == name));
        }

        assert!(Fields::new().with("a,b", &long).validate(4).is_ok());
        assert!(Fields::new().with("über druck", &long).validate(4).is_ok());

        let err = Fields::new()
            .with("p", &long)
            .with("p", &long)
            .validate(4)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateField(name) if name == "p"));

        assert!(Fields::new().with("p", &long).validate(4).is_ok());
    }

    #[test]
    fn only_num_points_values_written() {
        let values = [1.0, 2.5, 3.0, 99.0, 100.0];
        let fields = Fields::new().with("p", &values);

        let mut writer = Writer::new(Vec::new());
        write_point_data(&mut writer, &fields, 3, &ExportOptions::default()).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();

        assert_eq!(
            out,
            "<PointData Scalars=\"p,\">\
             <DataArray type=\"Float64\" Name=\"p\" format=\"ascii\">1 2.5 3 </DataArray>\
             </PointData>"
        );
    }

    #[test]
    fn names_with_commas_are_written() {
        let values = [1.0, 2.0];
        let fields = Fields::new().with("a,b", &values).with("c", &values);

        let mut writer = Writer::new(Vec::new());
        write_point_data(&mut writer, &fields, 2, &ExportOptions::default()).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();

        assert!(out.contains("Scalars=\"a,b,c,\""));
        assert!(out.contains("<DataArray type=\"Float64\" Name=\"a,b\" format=\"ascii\">1 2 </DataArray>"));
    }

    #[test]
    fn names_are_escaped() {
        let values = [1.0];
        let fields = Fields::new().with("a<b", &values);

        let mut writer = Writer::new(Vec::new());
        write_point_data(&mut writer, &fields, 1, &ExportOptions::default()).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();

        assert!(out.contains("Name=\"a&lt;b\""));
    }
}
