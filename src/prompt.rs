pub(crate) mod background;
pub(crate) mod zone;
