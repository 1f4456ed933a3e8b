mod spec;
mod value;

pub use spec::{AttrType, CustomAttributeSpec, RadioOptions, default_set};
pub use value::{DateMode, ValueStyle, apply, date_columns, quantity_bounds, random_value, resolve};
