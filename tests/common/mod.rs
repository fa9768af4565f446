pub(crate) mod cluster;

pub(crate) mod logging;
