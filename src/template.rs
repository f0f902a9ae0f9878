pub(crate) mod model;
pub(crate) mod presets;
pub(crate) mod vars;
