pub(crate) mod composite;
pub(crate) mod compose;
pub(crate) mod pipeline;
pub(crate) mod text;
